//! Authentication Module
//!
//! Token issuing/verification, user records, and the register/login/me
//! handlers.
//!
//! # Design
//!
//! Session tokens are stateless: the codec signs the user id and expiry
//! with a server-held secret and verification never touches the database.
//! There is consequently no server-side revocation before natural expiry;
//! logout is client-side credential clearing.

pub mod handlers;
pub mod tokens;
pub mod users;

pub use handlers::{login, me, register};
pub use tokens::{Claims, IssuedToken, TokenCodec, TokenError};
