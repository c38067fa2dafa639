//! Authentication backend issuing paired access/refresh tokens.
//!
//! Exposes signup and signin over HTTP; passwords and refresh tokens are
//! stored as argon2 hashes, tokens are HS256 JWTs signed with a single
//! configured secret.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;

pub use auth::AuthService;
pub use config::Config;
pub use error::AppError;
pub use handlers::http::AppState;

use axum::routing::{get, post};
use handlers::http;

/// Build the API router (auth, health). Used by main and by integration tests.
pub fn create_app(state: AppState) -> axum::Router {
    let auth_routes = axum::Router::new()
        .route("/signup", post(auth::signup))
        .route("/signin", post(auth::signin));

    axum::Router::new()
        .route("/health", get(http::health))
        .nest("/auth", auth_routes)
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .with_state(state)
}
