use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::non_empty;
use super::ApiError;
use super::ApiSuccess;
use super::MovieData;
use crate::domain::movie::models::CreateMovieCommand;
use crate::domain::movie::models::MovieTitle;
use crate::inbound::http::router::AppState;
use crate::movie::errors::MovieError;

pub async fn create_movie(
    State(state): State<AppState>,
    body: Result<Json<CreateMovieRequestBody>, JsonRejection>,
) -> Result<ApiSuccess<MovieData>, ApiError> {
    let Json(body) = body?;
    let command = body.try_into_command()?;

    state
        .movie_service
        .create_movie(command)
        .await
        .map_err(ApiError::from)
        .map(|movie| ApiSuccess::new(StatusCode::CREATED, movie.into()))
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMovieRequestBody {
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

impl CreateMovieRequestBody {
    fn try_into_command(self) -> Result<CreateMovieCommand, MovieError> {
        let title = self
            .title
            .ok_or_else(|| MovieError::MissingField("title".to_string()))?;
        let description = self
            .description
            .ok_or_else(|| MovieError::MissingField("description".to_string()))?;
        let release_year = self
            .release_year
            .ok_or_else(|| MovieError::MissingField("releaseYear".to_string()))?;

        let mut command =
            CreateMovieCommand::new(MovieTitle::new(title)?, description, release_year)?;
        command.genre = self.genre.unwrap_or_default();
        command.rating = self.rating;
        command.poster_url = non_empty(self.poster_url);
        command.trailer_url = non_empty(self.trailer_url);
        command.cast = self.cast.unwrap_or_default();

        Ok(command)
    }
}
