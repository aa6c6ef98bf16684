use std::path::PathBuf;
use std::sync::Arc;

use auth::Authenticator;
use auth::PasswordHasher;
use cinema_service::config::Config;
use cinema_service::domain::movie::service::MovieService;
use cinema_service::domain::user::service::UserService;
use cinema_service::inbound::http::router::create_router;
use cinema_service::inbound::http::router::HttpOptions;
use cinema_service::outbound::repositories::PostgresMovieRepository;
use cinema_service::outbound::repositories::PostgresUserRepository;
use cinema_service::outbound::storage::LocalPhotoStorage;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cinema_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "cinema-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        allowed_origins = ?config.server.allowed_origins,
        uploads_dir = %config.uploads.dir,
        jwt_expiration_days = config.jwt.expiration_days,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = 5,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let mut authenticator = Authenticator::new(
        config.jwt.secret.as_bytes(),
        chrono::Duration::days(config.jwt.expiration_days),
    );
    if let Some(cost) = &config.password_hashing {
        authenticator = authenticator.with_password_hasher(PasswordHasher::with_cost(
            cost.memory_kib,
            cost.iterations,
            cost.parallelism,
        )?);
        tracing::info!(
            memory_kib = cost.memory_kib,
            iterations = cost.iterations,
            parallelism = cost.parallelism,
            "Custom password hashing cost applied"
        );
    }
    let authenticator = Arc::new(authenticator);

    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool.clone()));
    let movie_repository = Arc::new(PostgresMovieRepository::new(pg_pool));
    let photo_storage = Arc::new(LocalPhotoStorage::new(
        &config.uploads.dir,
        &config.uploads.public_path,
    ));

    let user_service = Arc::new(UserService::new(
        user_repository,
        photo_storage,
        Arc::clone(&authenticator),
    ));
    let movie_service = Arc::new(MovieService::new(movie_repository));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(
        user_service,
        movie_service,
        authenticator,
        HttpOptions {
            allowed_origins: config.server.allowed_origins.clone(),
            uploads_dir: PathBuf::from(&config.uploads.dir),
            uploads_public_path: config.uploads.public_path.clone(),
        },
    );

    if let Err(e) = axum::serve(http_listener, http_application).await {
        tracing::error!(error = %e, "Server error");
        return Err(e.into());
    }

    tracing::info!("Server exited successfully");

    Ok(())
}
