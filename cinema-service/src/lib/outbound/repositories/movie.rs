use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::FromRow;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::movie::models::Movie;
use crate::domain::movie::models::MovieId;
use crate::domain::movie::models::MovieTitle;
use crate::domain::movie::ports::MovieRepository;
use crate::movie::errors::MovieError;

const MOVIE_COLUMNS: &str = "id, title, genre, description, release_year, rating, num_reviews, \
     poster_url, trailer_url, cast_members, created_at, updated_at";

#[derive(Debug, FromRow)]
struct MovieRow {
    id: Uuid,
    title: String,
    genre: Vec<String>,
    description: String,
    release_year: i32,
    rating: f64,
    num_reviews: i32,
    poster_url: Option<String>,
    trailer_url: Option<String>,
    cast_members: Vec<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<MovieRow> for Movie {
    type Error = MovieError;

    fn try_from(row: MovieRow) -> Result<Self, Self::Error> {
        Ok(Movie {
            id: MovieId(row.id),
            title: MovieTitle::new(row.title)?,
            genre: row.genre,
            description: row.description,
            release_year: row.release_year,
            rating: row.rating,
            num_reviews: row.num_reviews,
            poster_url: row.poster_url,
            trailer_url: row.trailer_url,
            cast: row.cast_members,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

pub struct PostgresMovieRepository {
    pool: PgPool,
}

impl PostgresMovieRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MovieRepository for PostgresMovieRepository {
    async fn create(&self, movie: Movie) -> Result<Movie, MovieError> {
        sqlx::query(
            r#"
            INSERT INTO movies (id, title, genre, description, release_year, rating, num_reviews,
                                poster_url, trailer_url, cast_members, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(movie.id.0)
        .bind(movie.title.as_str())
        .bind(&movie.genre)
        .bind(&movie.description)
        .bind(movie.release_year)
        .bind(movie.rating)
        .bind(movie.num_reviews)
        .bind(&movie.poster_url)
        .bind(&movie.trailer_url)
        .bind(&movie.cast)
        .bind(movie.created_at)
        .bind(movie.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| MovieError::DatabaseError(e.to_string()))?;

        Ok(movie)
    }

    async fn find_by_id(&self, id: &MovieId) -> Result<Option<Movie>, MovieError> {
        let row = sqlx::query_as::<_, MovieRow>(&format!(
            "SELECT {} FROM movies WHERE id = $1",
            MOVIE_COLUMNS
        ))
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| MovieError::DatabaseError(e.to_string()))?;

        row.map(Movie::try_from).transpose()
    }

    async fn list_all(&self) -> Result<Vec<Movie>, MovieError> {
        let rows = sqlx::query_as::<_, MovieRow>(&format!(
            "SELECT {} FROM movies ORDER BY created_at ASC",
            MOVIE_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| MovieError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(Movie::try_from).collect()
    }

    async fn update(&self, movie: Movie) -> Result<Movie, MovieError> {
        let result = sqlx::query(
            r#"
            UPDATE movies
            SET title = $2, genre = $3, description = $4, release_year = $5, rating = $6,
                poster_url = $7, trailer_url = $8, cast_members = $9, updated_at = $10
            WHERE id = $1
            "#,
        )
        .bind(movie.id.0)
        .bind(movie.title.as_str())
        .bind(&movie.genre)
        .bind(&movie.description)
        .bind(movie.release_year)
        .bind(movie.rating)
        .bind(&movie.poster_url)
        .bind(&movie.trailer_url)
        .bind(&movie.cast)
        .bind(movie.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| MovieError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(MovieError::NotFound(movie.id.to_string()));
        }

        Ok(movie)
    }

    async fn delete(&self, id: &MovieId) -> Result<(), MovieError> {
        let result = sqlx::query("DELETE FROM movies WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(|e| MovieError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(MovieError::NotFound(id.to_string()));
        }

        Ok(())
    }
}
