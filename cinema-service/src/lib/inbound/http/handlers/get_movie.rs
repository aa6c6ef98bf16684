use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use super::ApiError;
use super::ApiSuccess;
use super::MovieData;
use crate::domain::movie::models::MovieId;
use crate::inbound::http::router::AppState;
use crate::movie::errors::MovieError;

pub async fn get_movie(
    State(state): State<AppState>,
    Path(movie_id): Path<String>,
) -> Result<ApiSuccess<MovieData>, ApiError> {
    let movie_id = MovieId::from_string(&movie_id).map_err(MovieError::from)?;

    state
        .movie_service
        .get_movie(&movie_id)
        .await
        .map_err(ApiError::from)
        .map(|movie| ApiSuccess::new(StatusCode::OK, movie.into()))
}
