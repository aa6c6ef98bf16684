#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use auth::Authenticator;
use auth::PasswordHasher;
use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use cinema_service::domain::movie::models::Movie;
use cinema_service::domain::movie::models::MovieId;
use cinema_service::domain::movie::ports::MovieRepository;
use cinema_service::domain::movie::service::MovieService;
use cinema_service::domain::user::models::PendingReset;
use cinema_service::domain::user::models::User;
use cinema_service::domain::user::models::UserId;
use cinema_service::domain::user::ports::UserRepository;
use cinema_service::domain::user::service::UserService;
use cinema_service::inbound::http::router::create_router;
use cinema_service::inbound::http::router::HttpOptions;
use cinema_service::movie::errors::MovieError;
use cinema_service::outbound::storage::LocalPhotoStorage;
use cinema_service::user::errors::UserError;
use serde_json::json;
use serde_json::Value;
use sqlx::postgres::PgConnectOptions;
use sqlx::postgres::PgPoolOptions;
use sqlx::Connection;
use sqlx::Executor;
use sqlx::PgConnection;
use sqlx::PgPool;
use tempfile::TempDir;

pub const JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// User store with the same observable semantics as the Postgres adapter.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<HashMap<UserId, User>>,
}

impl InMemoryUserRepository {
    /// Grant admin rights; accounts are promoted out of band in production.
    pub fn promote_to_admin(&self, id: &UserId) {
        if let Some(user) = self.users.lock().unwrap().get_mut(id) {
            user.is_admin = true;
        }
    }

    /// Move every pending reset into the past.
    pub fn expire_reset_tokens(&self) {
        for user in self.users.lock().unwrap().values_mut() {
            if let Some(reset) = user.reset.as_mut() {
                reset.expires_at = Utc::now() - Duration::seconds(1);
            }
        }
    }

    pub fn get(&self, id: &UserId) -> Option<User> {
        self.users.lock().unwrap().get(id).cloned()
    }

    fn email_taken_by_other(users: &HashMap<UserId, User>, user: &User) -> bool {
        users
            .values()
            .any(|other| other.id != user.id && other.email == user.email)
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.lock().unwrap();
        if Self::email_taken_by_other(&users, &user) {
            return Err(UserError::EmailAlreadyExists(user.email.to_string()));
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        Ok(self.users.lock().unwrap().get(id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .find(|user| user.email.as_str() == email)
            .cloned())
    }

    async fn list_all(&self) -> Result<Vec<User>, UserError> {
        let mut users: Vec<User> = self.users.lock().unwrap().values().cloned().collect();
        users.sort_by_key(|user| user.created_at);
        Ok(users)
    }

    async fn update(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.lock().unwrap();
        if Self::email_taken_by_other(&users, &user) {
            return Err(UserError::EmailAlreadyExists(user.email.to_string()));
        }
        let stored = users
            .get_mut(&user.id)
            .ok_or_else(|| UserError::NotFound(user.id.to_string()))?;

        stored.name = user.name.clone();
        stored.email = user.email.clone();
        stored.phone = user.phone.clone();
        stored.bio = user.bio.clone();
        stored.address = user.address.clone();
        stored.photo = user.photo.clone();
        stored.updated_at = user.updated_at;

        Ok(user)
    }

    async fn delete(&self, id: &UserId) -> Result<(), UserError> {
        self.users
            .lock()
            .unwrap()
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| UserError::NotFound(id.to_string()))
    }

    async fn set_reset_token(
        &self,
        id: &UserId,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), UserError> {
        let mut users = self.users.lock().unwrap();
        let user = users
            .get_mut(id)
            .ok_or_else(|| UserError::NotFound(id.to_string()))?;
        user.reset = Some(PendingReset {
            token: token.to_string(),
            expires_at,
        });
        Ok(())
    }

    async fn consume_reset_token(
        &self,
        token: &str,
        password_hash: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<User>, UserError> {
        let mut users = self.users.lock().unwrap();
        let matched = users.values_mut().find(|user| {
            user.reset
                .as_ref()
                .is_some_and(|reset| reset.token == token && reset.expires_at > now)
        });

        Ok(matched.map(|user| {
            user.password_hash = password_hash.to_string();
            user.reset = None;
            user.updated_at = now;
            user.clone()
        }))
    }
}

#[derive(Default)]
pub struct InMemoryMovieRepository {
    movies: Mutex<HashMap<MovieId, Movie>>,
}

impl InMemoryMovieRepository {
    pub fn get(&self, id: &MovieId) -> Option<Movie> {
        self.movies.lock().unwrap().get(id).cloned()
    }
}

#[async_trait]
impl MovieRepository for InMemoryMovieRepository {
    async fn create(&self, movie: Movie) -> Result<Movie, MovieError> {
        self.movies.lock().unwrap().insert(movie.id, movie.clone());
        Ok(movie)
    }

    async fn find_by_id(&self, id: &MovieId) -> Result<Option<Movie>, MovieError> {
        Ok(self.movies.lock().unwrap().get(id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Movie>, MovieError> {
        let mut movies: Vec<Movie> = self.movies.lock().unwrap().values().cloned().collect();
        movies.sort_by_key(|movie| movie.created_at);
        Ok(movies)
    }

    async fn update(&self, movie: Movie) -> Result<Movie, MovieError> {
        let mut movies = self.movies.lock().unwrap();
        if !movies.contains_key(&movie.id) {
            return Err(MovieError::NotFound(movie.id.to_string()));
        }
        movies.insert(movie.id, movie.clone());
        Ok(movie)
    }

    async fn delete(&self, id: &MovieId) -> Result<(), MovieError> {
        self.movies
            .lock()
            .unwrap()
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| MovieError::NotFound(id.to_string()))
    }
}

/// A registered account as seen by a client.
pub struct TestUser {
    pub id: String,
    pub token: String,
}

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub api_client: reqwest::Client,
    pub authenticator: Arc<Authenticator>,
    pub users: Arc<InMemoryUserRepository>,
    pub movies: Arc<InMemoryMovieRepository>,
    pub uploads: TempDir,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let uploads = tempfile::tempdir().expect("Failed to create uploads dir");

        // Cheap hashing parameters keep the suite fast.
        let hasher = PasswordHasher::with_cost(8192, 1, 1).expect("Invalid hashing cost");
        let authenticator = Arc::new(
            Authenticator::new(JWT_SECRET, Duration::days(30)).with_password_hasher(hasher),
        );

        let users = Arc::new(InMemoryUserRepository::default());
        let movies = Arc::new(InMemoryMovieRepository::default());
        let photo_storage = Arc::new(LocalPhotoStorage::new(uploads.path(), "/uploads"));

        let user_service = Arc::new(UserService::new(
            Arc::clone(&users),
            photo_storage,
            Arc::clone(&authenticator),
        ));
        let movie_service = Arc::new(MovieService::new(Arc::clone(&movies)));

        let router = create_router(
            user_service,
            movie_service,
            Arc::clone(&authenticator),
            HttpOptions {
                allowed_origins: Vec::new(),
                uploads_dir: uploads.path().to_path_buf(),
                uploads_public_path: "/uploads".to_string(),
            },
        );

        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            port,
            api_client: reqwest::Client::new(),
            authenticator,
            users,
            movies,
            uploads,
        }
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    /// Helper to make PUT request with Bearer token
    pub fn put_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .put(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Helper to make DELETE request with Bearer token
    pub fn delete_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .delete(format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Register an account and return its id and token.
    pub async fn register(&self, name: &str, email: &str, password: &str) -> TestUser {
        let response = self
            .post("/api/users/register")
            .json(&json!({
                "name": name,
                "email": email,
                "password": password
            }))
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        let body: Value = response.json().await.expect("Failed to parse response");
        TestUser {
            id: body["id"].as_str().unwrap().to_string(),
            token: body["token"].as_str().unwrap().to_string(),
        }
    }

    /// Register an account and promote it to administrator.
    pub async fn register_admin(&self) -> TestUser {
        let admin = self.register("Admin", "admin@x.com", "admin-pass").await;
        self.users
            .promote_to_admin(&UserId::from_string(&admin.id).unwrap());
        admin
    }

    /// Create a movie as `token` and return the response body.
    pub async fn create_movie(&self, token: &str, body: Value) -> Value {
        let response = self
            .post_authenticated("/api/movies", token)
            .json(&body)
            .send()
            .await
            .expect("Failed to execute request");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        response.json().await.expect("Failed to parse response")
    }
}

/// Throwaway Postgres database with migrations applied.
pub struct TestDb {
    pub pool: PgPool,
    pub db_name: String,
    server_url: String,
}

impl TestDb {
    /// Create a uniquely named database on the server at `DATABASE_URL`.
    ///
    /// Returns None when `DATABASE_URL` is unset so the rest of the suite
    /// runs without a Postgres server.
    pub async fn new() -> Option<Self> {
        let Ok(server_url) = std::env::var("DATABASE_URL") else {
            eprintln!("DATABASE_URL not set, skipping Postgres-backed test");
            return None;
        };

        let db_name = format!(
            "test_cinema_service_{}",
            uuid::Uuid::new_v4().to_string().replace('-', "_")
        );

        let mut conn = PgConnection::connect(&server_url)
            .await
            .expect("Failed to connect to Postgres");
        conn.execute(format!(r#"CREATE DATABASE "{}";"#, db_name).as_str())
            .await
            .expect("Failed to create test database");

        let options = server_url
            .parse::<PgConnectOptions>()
            .expect("Failed to parse DATABASE_URL")
            .database(&db_name);

        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .expect("Failed to connect to test database");

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("Failed to run migrations");

        Some(Self {
            pool,
            db_name,
            server_url,
        })
    }
}

impl Drop for TestDb {
    fn drop(&mut self) {
        let db_name = self.db_name.clone();
        let server_url = self.server_url.clone();
        tokio::spawn(async move {
            if let Ok(mut conn) = PgConnection::connect(&server_url).await {
                let _ = conn
                    .execute(
                        format!(
                            r#"SELECT pg_terminate_backend(pid) FROM pg_stat_activity WHERE datname = '{}';"#,
                            db_name
                        )
                        .as_str(),
                    )
                    .await;
                let _ = conn
                    .execute(format!(r#"DROP DATABASE IF EXISTS "{}";"#, db_name).as_str())
                    .await;
            }
        });
    }
}
