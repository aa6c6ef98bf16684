use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use crate::domain::movie::models::Movie;
use crate::domain::user::models::User;
use crate::movie::errors::MovieError;
use crate::user::errors::PhotoStorageError;
use crate::user::errors::UserError;

pub mod create_movie;
pub mod delete_movie;
pub mod delete_user;
pub mod forgot_password;
pub mod get_movie;
pub mod get_profile;
pub mod list_movies;
pub mod list_users;
pub mod login;
pub mod register;
pub mod reset_password;
pub mod update_movie;
pub mod update_user;

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<T>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(data))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    BadRequest(String),
    Unauthorized(String),
    Forbidden(String),
    NotFound(String),
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        Self::InternalServerError(e.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(detail) => {
                tracing::error!(error = %detail, "Request failed with internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
        };

        (status, Json(MessageData { message })).into_response()
    }
}

impl From<UserError> for ApiError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound(_) => ApiError::NotFound("User not found".to_string()),
            UserError::EmailAlreadyExists(_) => {
                ApiError::BadRequest("User already exists".to_string())
            }
            UserError::InvalidCredentials => {
                ApiError::Unauthorized("Invalid email or password".to_string())
            }
            UserError::InvalidOrExpiredResetToken => {
                ApiError::BadRequest("Invalid or expired token".to_string())
            }
            UserError::InvalidName(_)
            | UserError::InvalidEmail(_)
            | UserError::InvalidUserId(_)
            | UserError::MissingField(_)
            | UserError::PhotoStorage(PhotoStorageError::EmptyUpload) => {
                ApiError::BadRequest(err.to_string())
            }
            UserError::Password(_)
            | UserError::Token(_)
            | UserError::PhotoStorage(_)
            | UserError::DatabaseError(_)
            | UserError::Unknown(_) => ApiError::InternalServerError(err.to_string()),
        }
    }
}

impl From<MovieError> for ApiError {
    fn from(err: MovieError) -> Self {
        match err {
            // A malformed id can never name a stored movie.
            MovieError::NotFound(_) | MovieError::InvalidMovieId(_) => {
                ApiError::NotFound("Movie not found".to_string())
            }
            MovieError::InvalidTitle(_) | MovieError::MissingField(_) => {
                ApiError::BadRequest(err.to_string())
            }
            MovieError::DatabaseError(_) | MovieError::Unknown(_) => {
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}

/// Liveness banner served at `/`.
pub async fn api_status() -> &'static str {
    "API is running..."
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MessageData {
    pub message: String,
}

impl MessageData {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Public view of a user. Never carries the password hash or reset state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserData {
    pub id: String,
    pub name: String,
    pub email: String,
    pub is_admin: bool,
    pub phone: Option<String>,
    pub bio: Option<String>,
    pub address: Option<String>,
    pub photo: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for UserData {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name.as_str().to_string(),
            email: user.email.as_str().to_string(),
            is_admin: user.is_admin,
            phone: user.phone.clone(),
            bio: user.bio.clone(),
            address: user.address.clone(),
            photo: user.photo.clone(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieData {
    pub id: String,
    pub title: String,
    pub genre: Vec<String>,
    pub description: String,
    pub release_year: i32,
    pub rating: f64,
    pub num_reviews: i32,
    pub poster_url: Option<String>,
    pub trailer_url: Option<String>,
    pub cast: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Movie> for MovieData {
    fn from(movie: Movie) -> Self {
        Self {
            id: movie.id.to_string(),
            title: movie.title.as_str().to_string(),
            genre: movie.genre,
            description: movie.description,
            release_year: movie.release_year,
            rating: movie.rating,
            num_reviews: movie.num_reviews,
            poster_url: movie.poster_url,
            trailer_url: movie.trailer_url,
            cast: movie.cast,
            created_at: movie.created_at,
            updated_at: movie.updated_at,
        }
    }
}

/// Treat empty strings the same as an absent field.
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
