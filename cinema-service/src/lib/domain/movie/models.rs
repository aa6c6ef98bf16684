use std::collections::HashSet;
use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::movie::errors::MovieError;
use crate::movie::errors::MovieIdError;
use crate::movie::errors::MovieTitleError;

/// Movie aggregate entity.
#[derive(Debug, Clone, PartialEq)]
pub struct Movie {
    pub id: MovieId,
    pub title: MovieTitle,
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

/// Movie unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MovieId(pub Uuid);

impl MovieId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a movie ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, MovieIdError> {
        Uuid::parse_str(s)
            .map(MovieId)
            .map_err(|e| MovieIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for MovieId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MovieId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Movie title value type
///
/// Non-blank, at most 200 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieTitle(String);

impl MovieTitle {
    const MAX_LENGTH: usize = 200;

    /// Create a new valid title.
    ///
    /// # Errors
    /// * `Empty` - Title is empty or whitespace only
    /// * `TooLong` - Title longer than 200 characters
    pub fn new(title: String) -> Result<Self, MovieTitleError> {
        if title.trim().is_empty() {
            return Err(MovieTitleError::Empty);
        }

        let length = title.chars().count();
        if length > Self::MAX_LENGTH {
            return Err(MovieTitleError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }

        Ok(Self(title))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MovieTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Command to add a movie to the catalogue
#[derive(Debug, Clone)]
pub struct CreateMovieCommand {
    pub title: MovieTitle,
    pub genre: Vec<String>,
    pub description: String,
    pub release_year: i32,
    pub rating: Option<f64>,
    pub poster_url: Option<String>,
    pub trailer_url: Option<String>,
    pub cast: Vec<String>,
}

impl CreateMovieCommand {
    /// Construct a command from the required fields; optional ones start empty.
    ///
    /// # Errors
    /// * `MissingField` - Description is blank
    pub fn new(
        title: MovieTitle,
        description: String,
        release_year: i32,
    ) -> Result<Self, MovieError> {
        if description.trim().is_empty() {
            return Err(MovieError::MissingField("description".to_string()));
        }

        Ok(Self {
            title,
            genre: Vec::new(),
            description,
            release_year,
            rating: None,
            poster_url: None,
            trailer_url: None,
            cast: Vec::new(),
        })
    }
}

/// Command to merge-patch a movie.
///
/// `None` keeps the stored value; `Some` overwrites it, including zero ratings.
#[derive(Debug, Clone, Default)]
pub struct UpdateMovieCommand {
    pub title: Option<MovieTitle>,
    pub genre: Option<Vec<String>>,
    pub description: Option<String>,
    pub release_year: Option<i32>,
    pub rating: Option<f64>,
    pub poster_url: Option<String>,
    pub trailer_url: Option<String>,
    pub cast: Option<Vec<String>>,
}

/// Drop repeated genres, keeping the first occurrence of each.
pub fn dedup_genres(genres: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    genres
        .into_iter()
        .filter(|genre| seen.insert(genre.clone()))
        .collect()
}
