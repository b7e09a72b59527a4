//! Request identity resolution.
//!
//! Two strategies, tried in order: a `session` cookie holding an opaque
//! session token, and an `Authorization: Basic base64("<key_id>:<secret>")`
//! header carrying an API key. Any failure along the way (bad encoding,
//! unknown key, failed verification, expiry) resolves to an anonymous
//! request rather than an error; route protection is a separate concern
//! handled by [`require_login`].

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};
use base64::Engine;
use tracing::{debug, warn};

use crate::models::{self, User};
use crate::state::AppState;

/// The authenticated user for the current request, installed as a request
/// extension by [`identify`]. Absent for anonymous requests.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// Resolves the request identity and installs [`CurrentUser`] when a
/// session or API key checks out.
pub async fn identify(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    let user = match resolve_user(&state, req.headers()).await {
        Ok(user) => user,
        Err(e) => {
            // Resolution failures degrade to anonymous, never to an error
            warn!("Identity resolution failed: {}", e);
            None
        }
    };
    if let Some(user) = user {
        req.extensions_mut().insert(CurrentUser(user));
    }
    next.run(req).await
}

/// Rejects anonymous requests with 401. API routes layered with
/// `json_unauthorized` render the JSON envelope; browser routes get the
/// login redirect from the bootstrap error-page layer.
pub async fn require_login(req: Request, next: Next) -> Result<Response, StatusCode> {
    if req.extensions().get::<CurrentUser>().is_none() {
        return Err(StatusCode::UNAUTHORIZED);
    }
    Ok(next.run(req).await)
}

async fn resolve_user(state: &AppState, headers: &HeaderMap) -> anyhow::Result<Option<User>> {
    if let Some(token) = session_token(headers) {
        if let Some(user) = models::get_session_user(&state.db, &token).await? {
            return Ok(Some(user));
        }
    }
    user_from_api_key(state, headers).await
}

/// Extracts the `session` cookie value, if present.
fn session_token(headers: &HeaderMap) -> Option<String> {
    let cookies = headers.get(header::COOKIE)?.to_str().ok()?;
    cookies.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == "session").then(|| value.to_string())
    })
}

/// Looks up a user via the API-key `Authorization` header.
///
/// An expired key is deleted as a side effect of the lookup; the deletion
/// is best-effort and not transactionally linked to the decision.
async fn user_from_api_key(state: &AppState, headers: &HeaderMap) -> anyhow::Result<Option<User>> {
    let Some(auth) = headers.get(header::AUTHORIZATION).and_then(|h| h.to_str().ok()) else {
        return Ok(None);
    };
    let Some(encoded) = auth.strip_prefix("Basic ") else {
        return Ok(None);
    };
    let Ok(decoded) = base64::engine::general_purpose::STANDARD.decode(encoded.trim()) else {
        return Ok(None);
    };
    let Ok(credentials) = String::from_utf8(decoded) else {
        return Ok(None);
    };
    let Some((key_id, secret)) = credentials.split_once(':') else {
        return Ok(None);
    };

    let Some(api_key) = models::get_api_key(&state.db, key_id).await? else {
        return Ok(None);
    };
    if !api_key.verify(secret) {
        debug!("API key {} failed verification", key_id);
        return Ok(None);
    }
    if api_key.has_expired(state.config.auth.api_key_max_age_secs) {
        debug!("Deleting expired API key {}", key_id);
        if let Err(e) = models::delete_api_key(&state.db, &api_key.id).await {
            warn!("Failed to delete expired API key {}: {}", api_key.id, e);
        }
        return Ok(None);
    }

    Ok(models::get_user(&state.db, api_key.user_id).await?)
}
