use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

/// Issue a password reset token.
///
/// The token is returned in the response body rather than mailed.
pub async fn forgot_password(
    State(state): State<AppState>,
    body: Result<Json<ForgotPasswordRequestBody>, JsonRejection>,
) -> Result<ApiSuccess<ForgotPasswordResponseData>, ApiError> {
    let Json(body) = body?;
    let email = body
        .email
        .ok_or_else(|| UserError::MissingField("email".to_string()))?;

    let reset = state
        .user_service
        .request_password_reset(&email)
        .await
        .map_err(|e| match e {
            UserError::NotFound(_) => {
                ApiError::NotFound("No user found with that email".to_string())
            }
            other => ApiError::from(other),
        })?;

    let (token, _) = reset.into_parts();

    Ok(ApiSuccess::new(
        StatusCode::OK,
        ForgotPasswordResponseData {
            message: "Password reset token generated".to_string(),
            token,
        },
    ))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ForgotPasswordRequestBody {
    #[serde(default)]
    email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForgotPasswordResponseData {
    pub message: String,
    pub token: String,
}
