use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use super::ApiError;
use super::ApiSuccess;
use super::MessageData;
use crate::domain::movie::models::MovieId;
use crate::inbound::http::router::AppState;
use crate::movie::errors::MovieError;

pub async fn delete_movie(
    State(state): State<AppState>,
    Path(movie_id): Path<String>,
) -> Result<ApiSuccess<MessageData>, ApiError> {
    let movie_id = MovieId::from_string(&movie_id).map_err(MovieError::from)?;

    state
        .movie_service
        .delete_movie(&movie_id)
        .await
        .map_err(ApiError::from)
        .map(|_| {
            ApiSuccess::new(
                StatusCode::OK,
                MessageData::new("Movie deleted successfully"),
            )
        })
}
