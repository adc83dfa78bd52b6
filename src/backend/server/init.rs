/**
 * Server Initialization
 *
 * This module handles the setup of the Axum HTTP server: database
 * connection, schema creation, state construction and route configuration.
 */

use axum::Router;

use crate::backend::auth::tokens::TokenCodec;
use crate::backend::routes::router::create_router;
use crate::backend::server::config::{connect_database, init_schema, ServerConfig};
use crate::backend::server::state::AppState;

/// Create and configure the Axum application
///
/// # Initialization Steps
///
/// 1. Connect the database pool (creating the file if needed)
/// 2. Create the schema if it does not exist
/// 3. Build the token codec from the configured secret and TTL
/// 4. Assemble the router with public and guarded routes
///
/// # Errors
///
/// Fails if the database cannot be opened or the schema cannot be created;
/// the server cannot do anything useful without its record store.
pub async fn create_app(config: &ServerConfig) -> Result<Router, sqlx::Error> {
    tracing::info!("Initializing mealbook backend server");

    let db = connect_database(&config.database_url).await?;
    init_schema(&db).await?;

    let codec = TokenCodec::new(&config.jwt_secret, config.token_ttl_secs);
    let app_state = AppState::new(db, codec);

    tracing::info!("Database ready, router configured");
    Ok(create_router(app_state))
}
