//! Owner-Scoped Records Module
//!
//! Persistence and handlers for the records a user owns: saved recipes,
//! ratings and comments. Access control is exactly "belongs to one user;
//! only that user may read, modify or delete it", enforced by scoping
//! every query to the identity the access guard resolved.

pub mod db;
pub mod handlers;
