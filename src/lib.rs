//! # Grundbau
//!
//! Grundbau is a helper library for small axum web applications. It bundles
//! the boilerplate that every deployment of ours needs anyway: layered
//! configuration, file logging, SQLite setup with default auth tables,
//! blueprint-style route registration, session and API-key login, JSON API
//! response envelopes, an embedded HTTP server and periodic background
//! tasks.
//!
//! ## Architecture
//!
//! The library is built using:
//! - **Axum**: HTTP server, routing and middleware
//! - **SQLx**: Asynchronous database operations with SQLite
//! - **Tokio**: Async runtime for the server and background tasks
//! - **Serde**: Serialization/deserialization for JSON APIs
//!
//! ## Core Components
//!
//! - [`config`]: Layered application configuration
//! - [`logging`]: tracing subscriber setup with file rotation
//! - [`error`]: Centralized error handling and the JSON error envelope
//! - [`db`]: Database pool construction and schema initialization
//! - [`models`]: Default user/session/API-key records and queries
//! - [`middleware`]: Request identity resolution and API response shaping
//! - [`bootstrap`]: Blueprint registry and application assembly
//! - [`pages`]: HTML error page rendering for browser-facing routes
//! - [`routes`]: Handlers behind the default blueprints
//! - [`server`]: Embedded server with graceful shutdown
//! - [`tasks`]: Named repeating background tasks
//! - [`units`]: Human-readable byte-count parsing and formatting
//! - [`fsutil`]: Filtered, sorted directory listing

pub mod bootstrap;
pub mod config;
pub mod db;
pub mod error;
pub mod fsutil;
pub mod logging;
pub mod middleware;
pub mod models;
pub mod pages;
pub mod routes;
pub mod server;
pub mod state;
pub mod tasks;
pub mod units;

#[cfg(test)]
mod tests;
