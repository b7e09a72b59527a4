//! JSON API response shaping.
//!
//! API handlers return [`ApiResponse`] on success and
//! [`crate::error::AppError`] on failure, so every API route renders either
//! `{"status": "ok", "data": ...}` or `{"status": "error", "reason": ...}`
//! with the matching HTTP status. The [`require_json`] layer enforces a
//! JSON object body on mutating methods before the handler runs, and
//! [`json_unauthorized`] rewrites plain 401 responses into the envelope.

use axum::{
    body::{to_bytes, Body},
    extract::Request,
    http::{header, Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;

use crate::error::AppError;

// Matches the global body limit applied by the bootstrap router
const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// A successful API response, rendered as `{"status": "ok", "data": <T>}`.
#[derive(Debug, Clone)]
pub struct ApiResponse<T>(pub T);

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let body = json!({
            "status": "ok",
            "data": self.0,
        });
        (StatusCode::OK, Json(body)).into_response()
    }
}

/// Rejects mutating requests that do not carry a JSON object body.
///
/// POST, PUT and DELETE requests must have a `Content-Type` of
/// `application/json` and a body parsing to a JSON object; anything else is
/// answered with a 400 error envelope and the reason "Not in JSON format".
/// The buffered body is re-installed so extractors downstream still work.
pub async fn require_json(req: Request, next: Next) -> Response {
    if !matches!(*req.method(), Method::POST | Method::PUT | Method::DELETE) {
        return next.run(req).await;
    }

    let is_json_content_type = req
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|ct| ct.starts_with("application/json"))
        .unwrap_or(false);
    if !is_json_content_type {
        return not_json();
    }

    let (parts, body) = req.into_parts();
    let bytes = match to_bytes(body, MAX_BODY_BYTES).await {
        Ok(bytes) => bytes,
        Err(_) => return not_json(),
    };
    match serde_json::from_slice::<serde_json::Value>(&bytes) {
        Ok(value) if value.is_object() => {}
        _ => return not_json(),
    }

    let req = Request::from_parts(parts, Body::from(bytes));
    next.run(req).await
}

fn not_json() -> Response {
    AppError::api(StatusCode::BAD_REQUEST, "Not in JSON format").into_response()
}

/// Rewrites plain 401 responses into the JSON error envelope.
///
/// Login-protected API routes otherwise surface the framework's bare 401;
/// clients of JSON endpoints expect the envelope instead.
pub async fn json_unauthorized(req: Request, next: Next) -> Response {
    let res = next.run(req).await;
    if res.status() != StatusCode::UNAUTHORIZED {
        return res;
    }
    let already_json = res
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|ct| ct.starts_with("application/json"))
        .unwrap_or(false);
    if already_json {
        return res;
    }
    AppError::Unauthorized.into_response()
}
