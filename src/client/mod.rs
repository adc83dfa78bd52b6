/**
 * Client
 *
 * The client half of the crate: durable credential storage, the session
 * store that owns the authenticated state, the request pipeline that talks
 * to the backend, and the advisory route gate consulted before rendering
 * protected views.
 */

pub mod api;
pub mod config;
pub mod gate;
pub mod session;
pub mod vault;

pub use api::{ApiClient, ApiEnvelope};
pub use config::Config;
pub use gate::{check as gate_check, GateDecision};
pub use session::{CredentialContext, Credentials, SessionStore};
pub use vault::{CredentialVault, FileVault, MemoryVault, VaultError};
