//! Authentication Handlers
//!
//! HTTP handlers for the authentication surface:
//!
//! - `POST /api/auth/register` - create an account, returns a session token
//! - `POST /api/auth/login` - authenticate, returns a session token
//! - `GET /api/auth/me` - current user summary (guarded)

pub mod login;
pub mod me;
pub mod register;

pub use login::login;
pub use me::me;
pub use register::register;
