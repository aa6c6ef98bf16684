use axum::extract::State;
use axum::http::StatusCode;

use super::ApiError;
use super::ApiSuccess;
use super::MovieData;
use crate::inbound::http::router::AppState;

pub async fn list_movies(
    State(state): State<AppState>,
) -> Result<ApiSuccess<Vec<MovieData>>, ApiError> {
    let movies = state.movie_service.list_movies().await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        movies.into_iter().map(MovieData::from).collect(),
    ))
}
