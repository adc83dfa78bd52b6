/**
 * Credential Vault
 *
 * Durable storage for the client's credential context. The session store
 * writes through a vault on every change so the context survives process
 * restarts, and reads it back once at startup.
 *
 * The serialized form is exactly the `CredentialContext` wire type, so a
 * stored context round-trips bit-for-bit through set and rehydrate.
 */

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use thiserror::Error;

use crate::client::session::CredentialContext;

/// Vault failure
#[derive(Debug, Error)]
pub enum VaultError {
    #[error("vault I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("vault serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Durable storage behind the session store
///
/// Implementations must treat `store` as a full replacement of whatever was
/// persisted before; the session store never patches.
pub trait CredentialVault: Send + Sync {
    /// Load the persisted context, if any
    ///
    /// Absence and unreadable content both yield `None`; a corrupt vault
    /// must never prevent the client from starting logged out.
    fn load(&self) -> Option<CredentialContext>;

    /// Persist the context, replacing any previous state
    fn store(&self, context: &CredentialContext) -> Result<(), VaultError>;
}

/// JSON-file vault under the platform data directory
#[derive(Debug)]
pub struct FileVault {
    path: PathBuf,
}

impl FileVault {
    /// Vault at an explicit path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Vault at the platform default location
    ///
    /// `<data dir>/mealbook/credentials.json`, falling back to the working
    /// directory when no data dir is available.
    pub fn at_default_path() -> Self {
        let base = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
        Self::new(base.join("mealbook").join("credentials.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CredentialVault for FileVault {
    fn load(&self) -> Option<CredentialContext> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!("could not read credential vault: {e}");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(context) => Some(context),
            Err(e) => {
                tracing::warn!("credential vault is corrupt, ignoring: {e}");
                None
            }
        }
    }

    fn store(&self, context: &CredentialContext) -> Result<(), VaultError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let raw = serde_json::to_string_pretty(context)?;
        let mut file = std::fs::File::create(&self.path)?;
        file.write_all(raw.as_bytes())?;
        Ok(())
    }
}

/// In-memory vault for tests
#[derive(Debug, Default)]
pub struct MemoryVault {
    slot: Mutex<Option<CredentialContext>>,
}

impl MemoryVault {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialVault for MemoryVault {
    fn load(&self) -> Option<CredentialContext> {
        self.slot.lock().unwrap().clone()
    }

    fn store(&self, context: &CredentialContext) -> Result<(), VaultError> {
        *self.slot.lock().unwrap() = Some(context.clone());
        Ok(())
    }
}
