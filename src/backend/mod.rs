//! Backend Module
//!
//! Server-side code for the mealbook application: an Axum HTTP server with
//! stateless token authentication and owner-scoped record storage.
//!
//! # Architecture
//!
//! The backend is organized into focused submodules:
//!
//! - **`server`** - Initialization, application state, configuration
//! - **`routes`** - Route configuration and router assembly
//! - **`auth`** - Token codec, user records, register/login/me handlers
//! - **`recipes`** - Owner-scoped saved recipes, ratings and comments
//! - **`middleware`** - The access guard
//! - **`error`** - Error taxonomy and HTTP conversion
//!
//! # Authentication Flow
//!
//! A request carrying `Authorization: Bearer <token>` passes through the
//! access guard, which verifies signature and expiry against the
//! server-held secret and attaches the resolved identity to the request.
//! Handlers then scope every database operation to that identity. There is
//! no server-side session state: verification is pure, per-request, and
//! survives restarts as long as the secret is stable.

pub mod auth;
pub mod error;
pub mod middleware;
pub mod recipes;
pub mod routes;
pub mod server;
