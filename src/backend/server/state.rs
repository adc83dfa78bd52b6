/**
 * Application State Management
 *
 * This module defines the application state structure and the `FromRef`
 * implementations for Axum state extraction.
 *
 * # Architecture
 *
 * `AppState` is the central state container: the database pool for user
 * and owner-scoped records, and the token codec holding the signing
 * secret. Authentication itself is stateless per request, so there is no
 * session table and no shared mutable auth state here.
 */

use axum::extract::FromRef;
use sqlx::SqlitePool;

use crate::backend::auth::tokens::TokenCodec;

/// Application state shared by all handlers
///
/// # Thread Safety
///
/// Both fields are cheap to clone and safe to share: `SqlitePool` is an
/// internally synchronized handle, and `TokenCodec` is immutable after
/// construction.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool for users and owner-scoped records
    pub db: SqlitePool,
    /// Issues and verifies session tokens
    pub codec: TokenCodec,
}

impl AppState {
    pub fn new(db: SqlitePool, codec: TokenCodec) -> Self {
        Self { db, codec }
    }
}

/// Allow handlers to extract the pool directly with `State(SqlitePool)`
impl FromRef<AppState> for SqlitePool {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.db.clone()
    }
}

/// Allow handlers and middleware to extract the codec directly
impl FromRef<AppState> for TokenCodec {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.codec.clone()
    }
}
