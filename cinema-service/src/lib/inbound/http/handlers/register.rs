use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::domain::user::models::AuthSession;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::UserName;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

pub async fn register(
    State(state): State<AppState>,
    body: Result<Json<RegisterRequestBody>, JsonRejection>,
) -> Result<ApiSuccess<SessionResponseData>, ApiError> {
    let Json(body) = body?;
    let command = body.try_into_command()?;

    state
        .user_service
        .register(command)
        .await
        .map_err(ApiError::from)
        .map(|session| ApiSuccess::new(StatusCode::CREATED, session.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterRequestBody {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    password: Option<String>,
}

impl RegisterRequestBody {
    fn try_into_command(self) -> Result<CreateUserCommand, UserError> {
        let name = self
            .name
            .ok_or_else(|| UserError::MissingField("name".to_string()))?;
        let email = self
            .email
            .ok_or_else(|| UserError::MissingField("email".to_string()))?;
        let password = self
            .password
            .ok_or_else(|| UserError::MissingField("password".to_string()))?;

        Ok(CreateUserCommand::new(
            UserName::new(name)?,
            EmailAddress::new(email)?,
            password,
        ))
    }
}

/// Body returned by register and login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponseData {
    pub id: String,
    pub name: String,
    pub email: String,
    pub is_admin: bool,
    pub token: String,
}

impl From<AuthSession> for SessionResponseData {
    fn from(session: AuthSession) -> Self {
        Self {
            id: session.user.id.to_string(),
            name: session.user.name.as_str().to_string(),
            email: session.user.email.as_str().to_string(),
            is_admin: session.user.is_admin,
            token: session.token,
        }
    }
}
