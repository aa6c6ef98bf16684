use async_trait::async_trait;

use crate::domain::movie::models::CreateMovieCommand;
use crate::domain::movie::models::Movie;
use crate::domain::movie::models::MovieId;
use crate::domain::movie::models::UpdateMovieCommand;
use crate::movie::errors::MovieError;

/// Port for movie catalogue operations.
#[async_trait]
pub trait MovieServicePort: Send + Sync + 'static {
    /// List every movie, oldest first.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_movies(&self) -> Result<Vec<Movie>, MovieError>;

    /// Retrieve a movie by identifier.
    ///
    /// # Errors
    /// * `NotFound` - Movie does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_movie(&self, id: &MovieId) -> Result<Movie, MovieError>;

    /// Add a movie to the catalogue.
    ///
    /// Rating defaults to 0 and review count starts at 0.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create_movie(&self, command: CreateMovieCommand) -> Result<Movie, MovieError>;

    /// Merge-patch an existing movie.
    ///
    /// # Errors
    /// * `NotFound` - Movie does not exist
    /// * `DatabaseError` - Database operation failed
    async fn update_movie(
        &self,
        id: &MovieId,
        command: UpdateMovieCommand,
    ) -> Result<Movie, MovieError>;

    /// Remove a movie from the catalogue.
    ///
    /// # Errors
    /// * `NotFound` - Movie does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete_movie(&self, id: &MovieId) -> Result<(), MovieError>;
}

/// Persistence operations for movie aggregate.
#[async_trait]
pub trait MovieRepository: Send + Sync + 'static {
    async fn create(&self, movie: Movie) -> Result<Movie, MovieError>;

    async fn find_by_id(&self, id: &MovieId) -> Result<Option<Movie>, MovieError>;

    /// Retrieve all movies ordered by creation time.
    async fn list_all(&self) -> Result<Vec<Movie>, MovieError>;

    /// # Errors
    /// * `NotFound` - Movie does not exist
    async fn update(&self, movie: Movie) -> Result<Movie, MovieError>;

    /// # Errors
    /// * `NotFound` - Movie does not exist
    async fn delete(&self, id: &MovieId) -> Result<(), MovieError>;
}
