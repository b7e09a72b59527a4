//! HTML error pages for browser-facing routes.
//!
//! API routes already render the JSON error envelope; everything else that
//! ends in an error status gets a minimal HTML error page here, with 401
//! specially redirecting to the configured login path.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::Next,
    response::{Html, IntoResponse, Redirect, Response},
};
use tracing::warn;

use crate::config::AppConfig;

/// Renders the minimal error page for a status code.
pub fn render_error_page(status: StatusCode) -> Html<String> {
    let reason = status.canonical_reason().unwrap_or("Error");
    Html(format!(
        "<!DOCTYPE html>\n<html>\n<head><title>{code} {reason}</title></head>\n\
         <body>\n<h1>{code} {reason}</h1>\n<p>{text}</p>\n</body>\n</html>\n",
        code = status.as_u16(),
        reason = reason,
        text = if status.is_server_error() {
            "The server encountered an internal error."
        } else {
            "The request could not be completed."
        },
    ))
}

/// Response-mapping layer that converts error responses on non-JSON routes
/// into HTML error pages, redirecting 401s to the login page.
pub async fn error_page_middleware(
    State(cfg): State<Arc<AppConfig>>,
    req: Request,
    next: Next,
) -> Response {
    let res = next.run(req).await;
    let status = res.status();
    if !(status.is_client_error() || status.is_server_error()) {
        return res;
    }

    // JSON responses come from the API envelope and pass through verbatim
    let is_json = res
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|ct| ct.starts_with("application/json"))
        .unwrap_or(false);
    if is_json {
        return res;
    }

    if status == StatusCode::UNAUTHORIZED {
        return Redirect::to(&cfg.auth.login_path).into_response();
    }
    if status.is_server_error() {
        warn!("Rendering error page for status {}", status);
    }
    (status, render_error_page(status)).into_response()
}
