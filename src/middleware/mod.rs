//! Middleware components for HTTP request processing.
//!
//! `api` shapes JSON API requests and responses (body enforcement, the
//! ok/error envelope, 401 rewriting); `auth` resolves the request identity
//! from a session cookie or an API-key `Authorization` header.

pub mod api;
pub mod auth;

pub use api::ApiResponse;
pub use auth::CurrentUser;
