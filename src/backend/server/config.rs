/**
 * Server Configuration
 *
 * This module loads server configuration from the environment and owns
 * database setup: connecting the SQLite pool and creating the schema.
 *
 * # Configuration Sources
 *
 * Configuration is loaded from environment variables, with sensible
 * defaults for local development.
 */

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

use crate::backend::auth::tokens::DEFAULT_TTL_SECS;

/// Fallback signing secret for local development only
const DEV_JWT_SECRET: &str = "dev-secret-change-in-production";

/// Server configuration loaded from the environment
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// SQLite database URL (`DATABASE_URL`)
    pub database_url: String,
    /// Token signing secret (`JWT_SECRET`)
    pub jwt_secret: String,
    /// Token lifetime in seconds (`TOKEN_TTL_SECS`)
    pub token_ttl_secs: i64,
    /// Listen port (`SERVER_PORT`)
    pub port: u16,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// Missing values fall back to development defaults; a missing
    /// `JWT_SECRET` is logged loudly since every token signed with the
    /// fallback is forgeable.
    pub fn from_env() -> Self {
        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite:mealbook.db".to_string());

        let jwt_secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| {
            tracing::warn!("JWT_SECRET not set, using development secret");
            DEV_JWT_SECRET.to_string()
        });

        let token_ttl_secs = std::env::var("TOKEN_TTL_SECS")
            .ok()
            .and_then(|v| v.parse::<i64>().ok())
            .unwrap_or(DEFAULT_TTL_SECS);

        let port = std::env::var("SERVER_PORT")
            .ok()
            .and_then(|v| v.parse::<u16>().ok())
            .unwrap_or(3000);

        Self {
            database_url,
            jwt_secret,
            token_ttl_secs,
            port,
        }
    }
}

/// Connect the SQLite pool for the given database URL
///
/// The database file is created if it does not exist yet.
pub async fn connect_database(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    tracing::info!("Connecting to database at {database_url}");

    let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

    SqlitePoolOptions::new().connect_with(options).await
}

/// Open an in-memory database on a single-connection pool
///
/// SQLite gives every connection its own `:memory:` database, so the pool
/// is capped at one connection to keep a single coherent store. Used by
/// tests and ephemeral runs.
pub async fn memory_pool() -> SqlitePool {
    SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory database should always open")
}

/// Create the schema if it does not exist yet
///
/// Users plus the three owner-scoped record tables. Every owner-scoped
/// table carries a `user_id` column; uniqueness constraints give duplicate
/// saves and duplicate accounts a database-level backstop.
pub async fn init_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id BLOB PRIMARY KEY,
            username TEXT NOT NULL UNIQUE,
            email TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL,
            created_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS saved_recipes (
            id BLOB PRIMARY KEY,
            user_id BLOB NOT NULL,
            meal_id TEXT NOT NULL,
            meal_name TEXT NOT NULL,
            meal_thumb TEXT NOT NULL,
            created_at TEXT NOT NULL,
            UNIQUE (user_id, meal_id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS ratings (
            user_id BLOB NOT NULL,
            meal_id TEXT NOT NULL,
            score INTEGER NOT NULL,
            created_at TEXT NOT NULL,
            PRIMARY KEY (user_id, meal_id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS comments (
            id BLOB PRIMARY KEY,
            user_id BLOB NOT NULL,
            meal_id TEXT NOT NULL,
            content TEXT NOT NULL,
            created_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
