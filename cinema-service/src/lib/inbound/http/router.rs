use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use axum::body::Body;
use axum::extract::DefaultBodyLimit;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::delete;
use axum::routing::get;
use axum::routing::post;
use axum::routing::put;
use axum::Router;
use http::header;
use http::HeaderValue;
use http::Method;
use tower_http::cors::AllowOrigin;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::api_status;
use super::handlers::create_movie::create_movie;
use super::handlers::delete_movie::delete_movie;
use super::handlers::delete_user::delete_user;
use super::handlers::forgot_password::forgot_password;
use super::handlers::get_movie::get_movie;
use super::handlers::get_profile::get_profile;
use super::handlers::list_movies::list_movies;
use super::handlers::list_users::list_users;
use super::handlers::login::login;
use super::handlers::register::register;
use super::handlers::reset_password::reset_password;
use super::handlers::update_movie::update_movie;
use super::handlers::update_user::update_user;
use super::middleware::authenticate as auth_middleware;
use super::middleware::require_admin;
use crate::domain::movie::ports::MovieServicePort;
use crate::domain::user::ports::UserServicePort;

/// Largest accepted profile update body (multipart photo included).
pub const PROFILE_BODY_LIMIT: usize = 5 * 1024 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServicePort>,
    pub movie_service: Arc<dyn MovieServicePort>,
    pub authenticator: Arc<Authenticator>,
}

/// Edge settings for the HTTP surface.
#[derive(Debug, Clone)]
pub struct HttpOptions {
    /// Origins allowed cross-origin with credentials; empty allows any origin.
    pub allowed_origins: Vec<String>,
    pub uploads_dir: PathBuf,
    pub uploads_public_path: String,
}

pub fn create_router(
    user_service: Arc<dyn UserServicePort>,
    movie_service: Arc<dyn MovieServicePort>,
    authenticator: Arc<Authenticator>,
    options: HttpOptions,
) -> Router {
    let state = AppState {
        user_service,
        movie_service,
        authenticator,
    };

    let public_routes = Router::new()
        .route("/", get(api_status))
        .route("/api/users/register", post(register))
        .route("/api/users/login", post(login))
        .route("/api/users/forgot-password", post(forgot_password))
        .route("/api/users/reset-password", post(reset_password))
        .route("/api/movies", get(list_movies))
        .route("/api/movies/:movie_id", get(get_movie));

    let protected_routes = Router::new()
        .route("/api/users/profile", get(get_profile))
        .route(
            "/api/users/:user_id",
            put(update_user).layer(DefaultBodyLimit::max(PROFILE_BODY_LIMIT)),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    // Layers run outside-in, so authentication wraps the admin check.
    let admin_routes = Router::new()
        .route("/api/users", get(list_users))
        .route("/api/users/", get(list_users))
        .route("/api/users/:user_id", delete(delete_user))
        .route("/api/movies", post(create_movie))
        .route(
            "/api/movies/:movie_id",
            put(update_movie).delete(delete_movie),
        )
        .route_layer(middleware::from_fn(require_admin))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .merge(admin_routes)
        .nest_service(
            &options.uploads_public_path,
            ServeDir::new(&options.uploads_dir),
        )
        .layer(trace_layer)
        .layer(cors_layer(&options.allowed_origins))
        .with_state(state)
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    if allowed_origins.is_empty() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(origin = %origin, error = %e, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
}
