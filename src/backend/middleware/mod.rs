//! Middleware Module
//!
//! Request-processing middleware; currently the access guard that gates
//! authenticated-only routes.

pub mod auth;

pub use auth::{require_auth, AuthUser, AuthenticatedUser};
