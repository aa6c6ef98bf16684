use axum::extract::rejection::JsonRejection;
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::non_empty;
use super::ApiError;
use super::ApiSuccess;
use super::MovieData;
use crate::domain::movie::models::MovieId;
use crate::domain::movie::models::MovieTitle;
use crate::domain::movie::models::UpdateMovieCommand;
use crate::inbound::http::router::AppState;
use crate::movie::errors::MovieError;

pub async fn update_movie(
    State(state): State<AppState>,
    Path(movie_id): Path<String>,
    body: Result<Json<UpdateMovieRequestBody>, JsonRejection>,
) -> Result<ApiSuccess<MovieData>, ApiError> {
    let movie_id = MovieId::from_string(&movie_id).map_err(MovieError::from)?;
    let Json(body) = body?;
    let command = body.try_into_command()?;

    state
        .movie_service
        .update_movie(&movie_id, command)
        .await
        .map_err(ApiError::from)
        .map(|movie| ApiSuccess::new(StatusCode::OK, movie.into()))
}

/// Merge patch for a movie. Numbers are taken as given, so `rating: 0` is a real update.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMovieRequestBody {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    genre: Option<Vec<String>>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    release_year: Option<i32>,
    #[serde(default)]
    rating: Option<f64>,
    #[serde(default)]
    poster_url: Option<String>,
    #[serde(default)]
    trailer_url: Option<String>,
    #[serde(default)]
    cast: Option<Vec<String>>,
}

impl UpdateMovieRequestBody {
    fn try_into_command(self) -> Result<UpdateMovieCommand, MovieError> {
        let title = non_empty(self.title).map(MovieTitle::new).transpose()?;

        Ok(UpdateMovieCommand {
            title,
            genre: self.genre,
            description: non_empty(self.description),
            release_year: self.release_year,
            rating: self.rating,
            poster_url: non_empty(self.poster_url),
            trailer_url: non_empty(self.trailer_url),
            cast: self.cast,
        })
    }
}
