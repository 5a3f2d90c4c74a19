//! Authentication handlers

use axum::extract::{Extension, Json};
use std::sync::Arc;
use tracing::{info, warn};

use super::extractors::{CurrentUser, LoginForm};
use super::models::{TokenResponse, UserCreate, UserResponse};
use super::password::{hash_password_blocking, verify_password_blocking};
use super::validators::SignupValidator;
use crate::common::{safe_email_log, ApiError, AppState, Validator};
use crate::store::StoreError;

const EMAIL_TAKEN: &str = "Email already registered";

/// POST /token
/// Exchanges email and password for a bearer token
///
/// # Request Body
/// `application/x-www-form-urlencoded` with `username` and `password`,
/// or the same fields as JSON.
///
/// # Response
/// ```json
/// { "access_token": "<jwt>", "token_type": "bearer" }
/// ```
pub async fn login_for_access_token(
    Extension(state): Extension<Arc<AppState>>,
    LoginForm(credentials): LoginForm,
) -> Result<Json<TokenResponse>, ApiError> {
    let bad_credentials = || ApiError::Unauthorized("Incorrect email or password".to_string());

    let email = credentials.username.trim();
    let Some(user) = state.users.find_by_email(email).await? else {
        warn!(email = %safe_email_log(email), "Login failed: unknown email");
        return Err(bad_credentials());
    };

    if !verify_password_blocking(credentials.password, user.hashed_password.clone()).await? {
        warn!(user_id = user.id, "Login failed: wrong password");
        return Err(bad_credentials());
    }

    let token = state.tokens.issue(&user.email)?;
    info!(user_id = user.id, email = %safe_email_log(&user.email), "Access token issued");

    Ok(Json(TokenResponse::bearer(token)))
}

/// POST /users/
/// Creates an account
///
/// # Request Body
/// ```json
/// { "email": "a@x.com", "password": "secret" }
/// ```
pub async fn create_user(
    Extension(state): Extension<Arc<AppState>>,
    Json(payload): Json<UserCreate>,
) -> Result<Json<UserResponse>, ApiError> {
    SignupValidator.validate(&payload).into_result()?;
    let email = payload.email.trim();

    if state.users.find_by_email(email).await?.is_some() {
        return Err(ApiError::BadRequest(EMAIL_TAKEN.to_string()));
    }

    let hashed_password = hash_password_blocking(payload.password).await?;

    // The lookup above can race with a concurrent signup; the unique index decides.
    let user = match state.users.create(email, &hashed_password).await {
        Ok(user) => user,
        Err(StoreError::Conflict(_)) => return Err(ApiError::BadRequest(EMAIL_TAKEN.to_string())),
        Err(e) => return Err(e.into()),
    };

    info!(user_id = user.id, email = %safe_email_log(&user.email), "User account created");
    Ok(Json(user.into()))
}

/// GET /users/me/
/// Returns the authenticated account
pub async fn read_users_me(CurrentUser(user): CurrentUser) -> Json<UserResponse> {
    Json(user.into())
}
