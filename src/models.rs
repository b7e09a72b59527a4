//! Default records owned by the library: users, sessions and API keys.

use base64::Engine;
use serde::Serialize;
use sha2::{Digest, Sha256};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::error::AppResult;

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
}

/// An API key record. The secret itself is never stored; only its SHA-256
/// hex digest is kept for verification.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ApiKey {
    pub id: String,
    pub user_id: i64,
    pub secret_hash: String,
    pub created_at: i64,
}

impl ApiKey {
    /// Verifies a candidate secret against the stored digest using a
    /// constant-time comparison.
    pub fn verify(&self, secret: &str) -> bool {
        let candidate = hash_secret(secret);
        let a = candidate.as_bytes();
        let b = self.secret_hash.as_bytes();
        if a.len() != b.len() {
            return false;
        }
        let mut diff = 0u8;
        for (x, y) in a.iter().zip(b.iter()) {
            diff |= x ^ y;
        }
        diff == 0
    }

    pub fn has_expired(&self, max_age_secs: i64) -> bool {
        chrono::Utc::now().timestamp() - self.created_at > max_age_secs
    }

    /// Renders an `Authorization` header value carrying this key id and
    /// the given secret: `Basic base64("<id>:<secret>")`.
    pub fn authorization_header(id: &str, secret: &str) -> String {
        let payload = base64::engine::general_purpose::STANDARD.encode(format!("{}:{}", id, secret));
        format!("Basic {}", payload)
    }
}

fn hash_secret(secret: &str) -> String {
    let digest = Sha256::digest(secret.as_bytes());
    format!("{:x}", digest)
}

pub async fn create_user(pool: &SqlitePool, username: &str) -> AppResult<User> {
    let user = sqlx::query_as::<_, User>(
        "INSERT INTO users (username) VALUES (?) RETURNING id, username",
    )
    .bind(username)
    .fetch_one(pool)
    .await?;
    Ok(user)
}

pub async fn get_user(pool: &SqlitePool, id: i64) -> AppResult<Option<User>> {
    let user = sqlx::query_as::<_, User>("SELECT id, username FROM users WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(user)
}

pub async fn get_user_by_name(pool: &SqlitePool, username: &str) -> AppResult<Option<User>> {
    let user = sqlx::query_as::<_, User>("SELECT id, username FROM users WHERE username = ?")
        .bind(username)
        .fetch_optional(pool)
        .await?;
    Ok(user)
}

/// Creates a session for a user and returns the opaque session token.
pub async fn create_session(pool: &SqlitePool, user_id: i64) -> AppResult<String> {
    let token = Uuid::new_v4().to_string();
    sqlx::query("INSERT INTO sessions (token, user_id) VALUES (?, ?)")
        .bind(&token)
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(token)
}

/// Resolves the user a session token belongs to, if any.
pub async fn get_session_user(pool: &SqlitePool, token: &str) -> AppResult<Option<User>> {
    let user = sqlx::query_as::<_, User>(
        "SELECT u.id, u.username FROM users u \
         JOIN sessions s ON s.user_id = u.id WHERE s.token = ?",
    )
    .bind(token)
    .fetch_optional(pool)
    .await?;
    Ok(user)
}

pub async fn delete_session(pool: &SqlitePool, token: &str) -> AppResult<()> {
    sqlx::query("DELETE FROM sessions WHERE token = ?").bind(token).execute(pool).await?;
    Ok(())
}

/// Creates an API key for a user. Returns the key id and the plain secret;
/// the secret is shown once and only its digest is persisted.
pub async fn create_api_key(pool: &SqlitePool, user_id: i64) -> AppResult<(String, String)> {
    let id = Uuid::new_v4().to_string();
    let secret = Uuid::new_v4().to_string();
    sqlx::query("INSERT INTO api_keys (id, user_id, secret_hash, created_at) VALUES (?, ?, ?, ?)")
        .bind(&id)
        .bind(user_id)
        .bind(hash_secret(&secret))
        .bind(chrono::Utc::now().timestamp())
        .execute(pool)
        .await?;
    Ok((id, secret))
}

pub async fn get_api_key(pool: &SqlitePool, id: &str) -> AppResult<Option<ApiKey>> {
    let key = sqlx::query_as::<_, ApiKey>(
        "SELECT id, user_id, secret_hash, created_at FROM api_keys WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(key)
}

pub async fn delete_api_key(pool: &SqlitePool, id: &str) -> AppResult<()> {
    sqlx::query("DELETE FROM api_keys WHERE id = ?").bind(id).execute(pool).await?;
    Ok(())
}

#[cfg(test)]
pub(crate) async fn backdate_api_key(pool: &SqlitePool, id: &str, created_at: i64) -> AppResult<()> {
    sqlx::query("UPDATE api_keys SET created_at = ? WHERE id = ?")
        .bind(created_at)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}
