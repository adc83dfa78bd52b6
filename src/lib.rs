//! Mealbook - Main Library
//!
//! Mealbook is a recipe-browsing application: recipe search and display are
//! backed by a third-party data provider, while registered users keep
//! personal collections (saved recipes, ratings, comments) against the
//! Mealbook backend.
//!
//! This crate contains the authentication and session-authorization core of
//! the application: how a user obtains a credential, how the credential is
//! carried on every request, how the server validates it and scopes access
//! to user-owned records, and how the client reacts to credential loss.
//!
//! # Module Structure
//!
//! The library is organized into three main modules:
//!
//! - **`shared`** - Wire types shared between client and backend
//!   - Auth request/response bodies, user summary, owner-scoped records
//!   - Field validation helpers
//!
//! - **`backend`** - Server-side code
//!   - Axum HTTP server with JWT token codec and access-guard middleware
//!   - Registration/login handlers and owner-scoped CRUD handlers
//!   - SQLite persistence via sqlx
//!
//! - **`client`** - Client-side plumbing (no UI)
//!   - Credential store with durable persistence and change notification
//!   - Request pipeline over reqwest with bearer injection and the
//!     401-clears-credentials interceptor
//!   - Route gate for authenticated-only views
//!
//! # Usage
//!
//! ## Server-Side
//!
//! ```rust,no_run
//! use mealbook::backend::server::{config::ServerConfig, init::create_app};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ServerConfig::from_env();
//! let app = create_app(&config).await?;
//! // Serve `app` with axum
//! # Ok(())
//! # }
//! ```
//!
//! ## Client-Side
//!
//! ```rust,no_run
//! use mealbook::client::{api::ApiClient, config::Config, session::SessionStore};
//! use mealbook::client::vault::FileVault;
//!
//! # fn example() {
//! let session = SessionStore::new(FileVault::at_default_path());
//! session.rehydrate();
//! let api = ApiClient::new(Config::new(), session.clone());
//! # }
//! ```

pub mod shared;
pub mod backend;
pub mod client;
