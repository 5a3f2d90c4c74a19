//! Authentication extractors for Axum

use async_trait::async_trait;
use axum::{
    extract::{Extension, Form, FromRequest, FromRequestParts, Json, Request},
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        request::Parts,
    },
};
use std::sync::Arc;
use tracing::{debug, error, warn};

use super::models::{LoginRequest, User};
use crate::common::helpers::safe_token_log;
use crate::common::{safe_email_log, ApiError, AppState};

const CREDENTIALS_ERROR: &str = "Could not validate credentials";

/// The account behind a valid bearer token.
///
/// Resolution runs before the handler body: the `Authorization` header is
/// decoded, the `sub` claim is taken as the email and the user is loaded.
/// Every failure along the way is the same 401.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Extension(app_state): Extension<Arc<AppState>> =
            Extension::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::InternalServer("missing app state".to_string()))?;

        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .ok_or_else(|| {
                debug!("Authentication failed: missing Authorization header");
                ApiError::Unauthorized("Not authenticated".to_string())
            })?;

        let token = bearer_token(header).ok_or_else(|| {
            warn!("Authentication failed: Authorization header is not a bearer token");
            ApiError::Unauthorized("Not authenticated".to_string())
        })?;

        let claims = app_state.tokens.decode(token).map_err(|e| {
            warn!(error = %e, token = %safe_token_log(token), "JWT token validation failed");
            ApiError::Unauthorized(CREDENTIALS_ERROR.to_string())
        })?;

        let user = app_state
            .users
            .find_by_email(&claims.sub)
            .await
            .map_err(|e| {
                error!(error = %e, "Store error during user lookup in authentication");
                ApiError::Store(e)
            })?;

        match user {
            Some(user) => {
                debug!(user_id = user.id, email = %safe_email_log(&user.email), "User authenticated");
                Ok(CurrentUser(user))
            }
            None => {
                warn!(email = %safe_email_log(&claims.sub), "Authentication failed: user not found");
                Err(ApiError::Unauthorized(CREDENTIALS_ERROR.to_string()))
            }
        }
    }
}

/// Token part of a `Bearer <token>` header; the scheme is case-insensitive.
fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.trim().split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

/// Login credentials from an OAuth2 password form or an equivalent JSON body.
#[derive(Debug)]
pub struct LoginForm(pub LoginRequest);

#[async_trait]
impl<S> FromRequest<S> for LoginForm
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|ct| ct.trim_start().starts_with("application/json"))
            .unwrap_or(false);

        let credentials = if is_json {
            let Json(credentials) = Json::<LoginRequest>::from_request(req, state)
                .await
                .map_err(|e| ApiError::ValidationError(e.body_text()))?;
            credentials
        } else {
            let Form(credentials) = Form::<LoginRequest>::from_request(req, state)
                .await
                .map_err(|e| ApiError::ValidationError(e.body_text()))?;
            credentials
        };

        Ok(LoginForm(credentials))
    }
}
