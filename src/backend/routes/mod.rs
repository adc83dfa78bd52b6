//! Routes Module
//!
//! HTTP route configuration and router assembly.

pub mod router;

pub use router::create_router;
