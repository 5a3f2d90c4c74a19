// src/logging_middleware.rs
//! Debug-level logging of JSON request and response bodies

use axum::body::to_bytes;
use axum::{
    body::{Body, Bytes},
    extract::Request,
    http::{header::CONTENT_TYPE, HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};
use tracing::{debug, enabled, Level};

use crate::common::helpers::redact_json;

/// Bodies above this size are passed through without being logged.
const MAX_LOGGED_BODY: usize = 64 * 1024;

/// Logs JSON bodies with credential fields redacted. Form bodies (the login
/// form carries a password) and other content types are only sized.
pub async fn log_request_response(request: Request, next: Next) -> Result<Response, StatusCode> {
    if !enabled!(Level::DEBUG) {
        return Ok(next.run(request).await);
    }

    let (parts, body) = request.into_parts();
    let bytes = to_bytes(body, usize::MAX)
        .await
        .map_err(|_| StatusCode::BAD_REQUEST)?;

    if let Some(rendered) = render_body(&parts.headers, &bytes) {
        debug!(method = %parts.method, uri = %parts.uri, request_body = %rendered, "Request");
    }

    let response = next.run(Request::from_parts(parts, Body::from(bytes))).await;

    let (parts, body) = response.into_parts();
    let bytes = to_bytes(body, usize::MAX)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    if let Some(rendered) = render_body(&parts.headers, &bytes) {
        debug!(status = %parts.status, response_body = %rendered, "Response");
    }

    Ok(Response::from_parts(parts, Body::from(bytes)))
}

fn render_body(headers: &HeaderMap, bytes: &Bytes) -> Option<String> {
    if bytes.is_empty() {
        return None;
    }
    let is_json = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|ct| ct.starts_with("application/json"))
        .unwrap_or(false);

    if !is_json || bytes.len() > MAX_LOGGED_BODY {
        return Some(format!("<{} bytes>", bytes.len()));
    }

    match serde_json::from_slice::<serde_json::Value>(bytes) {
        Ok(mut json) => {
            redact_json(&mut json);
            Some(serde_json::to_string(&json).unwrap_or_default())
        }
        Err(_) => Some(format!("<{} bytes of invalid json>", bytes.len())),
    }
}
