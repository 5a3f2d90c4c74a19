//! Authentication routes

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers;

/// Creates and returns the authentication router
///
/// # Routes
/// - `POST /token` - Password login, returns a bearer token
/// - `POST /users/` - Signup
/// - `GET /users/me/` - Current user
pub fn auth_routes() -> Router {
    Router::new()
        .route("/token", post(handlers::login_for_access_token))
        .route("/users/", post(handlers::create_user))
        .route("/users", post(handlers::create_user))
        .route("/users/me/", get(handlers::read_users_me))
        .route("/users/me", get(handlers::read_users_me))
}
