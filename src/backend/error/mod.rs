//! Backend Error Module
//!
//! Error taxonomy for HTTP handlers and its single conversion point to
//! HTTP responses.

pub mod types;

pub use types::{ApiError, AUTH_REQUIRED_MESSAGE};
