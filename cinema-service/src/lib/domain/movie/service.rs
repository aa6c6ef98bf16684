use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::movie::models::dedup_genres;
use crate::domain::movie::models::CreateMovieCommand;
use crate::domain::movie::models::Movie;
use crate::domain::movie::models::MovieId;
use crate::domain::movie::models::UpdateMovieCommand;
use crate::movie::errors::MovieError;
use crate::movie::ports::MovieRepository;
use crate::movie::ports::MovieServicePort;

/// Domain service implementation for the movie catalogue.
pub struct MovieService<MR>
where
    MR: MovieRepository,
{
    repository: Arc<MR>,
}

impl<MR> MovieService<MR>
where
    MR: MovieRepository,
{
    pub fn new(repository: Arc<MR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<MR> MovieServicePort for MovieService<MR>
where
    MR: MovieRepository,
{
    async fn list_movies(&self) -> Result<Vec<Movie>, MovieError> {
        self.repository.list_all().await
    }

    async fn get_movie(&self, id: &MovieId) -> Result<Movie, MovieError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(MovieError::NotFound(id.to_string()))
    }

    async fn create_movie(&self, command: CreateMovieCommand) -> Result<Movie, MovieError> {
        let now = Utc::now();
        let movie = Movie {
            id: MovieId::new(),
            title: command.title,
            genre: dedup_genres(command.genre),
            description: command.description,
            release_year: command.release_year,
            rating: command.rating.unwrap_or(0.0),
            num_reviews: 0,
            poster_url: command.poster_url,
            trailer_url: command.trailer_url,
            cast: command.cast,
            created_at: now,
            updated_at: now,
        };

        let created_movie = self.repository.create(movie).await?;

        tracing::info!(movie_id = %created_movie.id, title = %created_movie.title, "Movie created");

        Ok(created_movie)
    }

    async fn update_movie(
        &self,
        id: &MovieId,
        command: UpdateMovieCommand,
    ) -> Result<Movie, MovieError> {
        let mut movie = self.get_movie(id).await?;

        if let Some(title) = command.title {
            movie.title = title;
        }
        if let Some(genre) = command.genre {
            movie.genre = dedup_genres(genre);
        }
        if let Some(description) = command.description {
            movie.description = description;
        }
        if let Some(release_year) = command.release_year {
            movie.release_year = release_year;
        }
        if let Some(rating) = command.rating {
            movie.rating = rating;
        }
        if let Some(poster_url) = command.poster_url {
            movie.poster_url = Some(poster_url);
        }
        if let Some(trailer_url) = command.trailer_url {
            movie.trailer_url = Some(trailer_url);
        }
        if let Some(cast) = command.cast {
            movie.cast = cast;
        }
        movie.updated_at = Utc::now();

        let updated_movie = self.repository.update(movie).await?;

        tracing::info!(movie_id = %updated_movie.id, "Movie updated");

        Ok(updated_movie)
    }

    async fn delete_movie(&self, id: &MovieId) -> Result<(), MovieError> {
        self.repository.delete(id).await?;

        tracing::info!(movie_id = %id, "Movie deleted");

        Ok(())
    }
}
