//! Server Module
//!
//! Server initialization, application state and configuration.

pub mod config;
pub mod init;
pub mod state;

pub use config::ServerConfig;
pub use state::AppState;
