use std::sync::Arc;

use crate::config::AppConfig;

/// The shared application state.
///
/// Holds the database pool and the configuration; cloneable for use with
/// Axum's request extraction system. Embedding applications that need more
/// state wrap this in their own state type and derive `FromRef`.
#[derive(Clone)]
pub struct AppState {
    /// The database connection pool.
    pub db: sqlx::SqlitePool,
    /// The application configuration.
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(db: sqlx::SqlitePool, config: AppConfig) -> Self {
        Self { db, config: Arc::new(config) }
    }
}
