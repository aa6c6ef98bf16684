use axum::extract::Request;
use axum::extract::State;
use axum::middleware::Next;
use axum::response::Response;
use http::header;

use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;
use crate::user::errors::UserError;

const NOT_AUTHORIZED: &str = "Not authorized, token failed";

/// Extension type holding the caller resolved from the bearer token
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user: User,
}

fn not_authorized() -> ApiError {
    ApiError::Unauthorized(NOT_AUTHORIZED.to_string())
}

/// Middleware that validates the bearer token and attaches the caller to request extensions.
///
/// Every failure yields the same 401 body; the precise reason is only logged.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_token_from_header(&req).map_err(|reason| {
        tracing::warn!(reason, "Rejected unauthenticated request");
        not_authorized()
    })?;

    let subject = state.authenticator.verify_token(token).map_err(|e| {
        tracing::warn!(error = %e, "JWT validation failed");
        not_authorized()
    })?;

    let user_id = UserId::from_string(&subject).map_err(|e| {
        tracing::warn!(error = %e, "Token subject is not a user id");
        not_authorized()
    })?;

    let user = state
        .user_service
        .get_user(&user_id)
        .await
        .map_err(|e| match e {
            UserError::NotFound(_) => {
                tracing::warn!(user_id = %user_id, "Token subject no longer exists");
                not_authorized()
            }
            other => ApiError::from(other),
        })?;

    req.extensions_mut().insert(AuthenticatedUser { user });

    Ok(next.run(req).await)
}

/// Middleware that lets only administrators through.
///
/// Must run after [`authenticate`]; without an attached caller it answers 401.
pub async fn require_admin(req: Request, next: Next) -> Result<Response, ApiError> {
    let (user_id, is_admin) = match req.extensions().get::<AuthenticatedUser>() {
        Some(caller) => (caller.user.id, caller.user.is_admin),
        None => return Err(not_authorized()),
    };

    if !is_admin {
        tracing::warn!(user_id = %user_id, uri = %req.uri(), "Admin access denied");
        return Err(ApiError::Forbidden("Not authorized as an admin".to_string()));
    }

    Ok(next.run(req).await)
}

fn extract_token_from_header(req: &Request) -> Result<&str, &'static str> {
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or("missing Authorization header")?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| "Authorization header is not valid ASCII")?;

    auth_str
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or("Authorization header is not a Bearer token")
}
