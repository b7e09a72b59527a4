//! Unit and integration tests for the library.
//!
//! - **units_tests**: byte-string parsing and formatting
//! - **fsutil_tests**: directory listing filters and ordering
//! - **tasks_tests**: background task loops and shutdown
//! - **api_tests**: JSON envelope, body enforcement, 401 rewriting
//! - **auth_tests**: session and API-key identity resolution
//! - **bootstrap_tests**: blueprint registry and error pages
//! - **config_tests**: configuration defaults
//! - **db_tests**: schema init and model queries

pub mod api_tests;
pub mod fsutil_tests;

use crate::config::AppConfig;
use crate::state::AppState;
use sqlx::migrate::MigrateDatabase;
use sqlx::sqlite::SqlitePoolOptions;
use tempfile::TempDir;

/// Creates an `AppState` backed by a fresh SQLite database in a temp
/// directory. The returned `TempDir` keeps the database file alive.
pub async fn setup_test_state() -> (AppState, TempDir) {
    let temp = TempDir::new().unwrap();
    let db_path = temp.path().join("test.db");
    let db_url = format!("sqlite:{}", db_path.display());

    sqlx::Sqlite::create_database(&db_url).await.unwrap();
    let pool = SqlitePoolOptions::new().max_connections(1).connect(&db_url).await.unwrap();
    crate::db::init_db(&pool).await.unwrap();

    let mut config = AppConfig::default();
    config.database.url = db_url;
    (AppState::new(pool, config), temp)
}
