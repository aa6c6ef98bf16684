use axum::extract::FromRequest;
use axum::extract::Multipart;
use axum::extract::Path;
use axum::extract::Request;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use http::header;
use serde::Deserialize;

use super::non_empty;
use super::ApiError;
use super::ApiSuccess;
use super::UserData;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::PhotoUpload;
use crate::domain::user::models::UpdateProfileCommand;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserName;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

/// Merge-patch a profile from a JSON or `multipart/form-data` body.
///
/// Only the profile owner or an administrator may update it.
pub async fn update_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Extension(caller): Extension<AuthenticatedUser>,
    request: Request,
) -> Result<ApiSuccess<UserData>, ApiError> {
    let user_id = UserId::from_string(&user_id)
        .map_err(|_| ApiError::NotFound("User not found".to_string()))?;

    if caller.user.id != user_id && !caller.user.is_admin {
        tracing::warn!(
            caller_id = %caller.user.id,
            target_id = %user_id,
            "Profile update denied"
        );
        return Err(ApiError::Forbidden(
            "Not authorized to update this user".to_string(),
        ));
    }

    let form = ProfileForm::from_request(request, &state).await?;
    let command = form.try_into_command()?;

    state
        .user_service
        .update_profile(&user_id, command)
        .await
        .map_err(ApiError::from)
        .map(|user| ApiSuccess::new(StatusCode::OK, (&user).into()))
}

/// Profile fields accepted by the update endpoint.
#[derive(Default, Deserialize)]
pub struct ProfileForm {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    phone: Option<String>,
    #[serde(default)]
    bio: Option<String>,
    #[serde(default)]
    address: Option<String>,
    #[serde(skip)]
    photo: Option<PhotoUpload>,
}

impl ProfileForm {
    async fn from_request(request: Request, state: &AppState) -> Result<Self, ApiError> {
        let is_multipart = request
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.starts_with("multipart/form-data"));

        if is_multipart {
            let multipart = Multipart::from_request(request, state)
                .await
                .map_err(|e| ApiError::BadRequest(e.body_text()))?;
            Self::from_multipart(multipart).await
        } else {
            let Json(form) = Json::<ProfileForm>::from_request(request, state).await?;
            Ok(form)
        }
    }

    async fn from_multipart(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut form = Self::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| ApiError::BadRequest(e.body_text()))?
        {
            let field_name = field.name().unwrap_or_default().to_string();

            if field_name == "photo" {
                let file_name = field.file_name().map(str::to_string);
                let content_type = field.content_type().map(str::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadRequest(e.body_text()))?;

                // Browsers send an empty part when no file was chosen.
                if !bytes.is_empty() {
                    form.photo = Some(PhotoUpload {
                        file_name,
                        content_type,
                        bytes: bytes.to_vec(),
                    });
                }
                continue;
            }

            let slot = match field_name.as_str() {
                "name" => &mut form.name,
                "email" => &mut form.email,
                "phone" => &mut form.phone,
                "bio" => &mut form.bio,
                "address" => &mut form.address,
                _ => continue,
            };
            let value = field
                .text()
                .await
                .map_err(|e| ApiError::BadRequest(e.body_text()))?;
            *slot = Some(value);
        }

        Ok(form)
    }

    fn try_into_command(self) -> Result<UpdateProfileCommand, UserError> {
        let name = non_empty(self.name).map(UserName::new).transpose()?;
        let email = non_empty(self.email).map(EmailAddress::new).transpose()?;

        Ok(UpdateProfileCommand {
            name,
            email,
            phone: non_empty(self.phone),
            bio: non_empty(self.bio),
            address: non_empty(self.address),
            photo: self.photo,
        })
    }
}
