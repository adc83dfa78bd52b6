/**
 * Credential Store
 *
 * Client-side session state: the current token and authenticated-user
 * identity, held as one atomic unit. Every change goes through `set` or
 * `clear`, which persist to the vault and notify subscribers inside the
 * same locked update, so no consumer can observe a token without its user
 * or vice versa.
 *
 * A monotonically increasing generation counter marks each state change.
 * In-flight requests snapshot the generation before sending; a 401 arriving
 * for a request that predates the current session is discarded instead of
 * clearing credentials that no longer belong to it.
 */

use std::sync::{Arc, Mutex};

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::client::vault::CredentialVault;
use crate::shared::UserSummary;

/// The authenticated pair: token plus user summary plus the token's expiry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Credentials {
    /// Opaque session token, attached as a bearer credential
    pub token: String,
    /// Token expiry (Unix timestamp, seconds), as reported by the server.
    /// Used only for the best-effort local expiry check; the server's
    /// verification stays authoritative.
    pub expires_at: i64,
    /// Identity summary of the authenticated user
    pub user: UserSummary,
}

/// The client's credential context: authenticated or empty, never partial
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct CredentialContext {
    credentials: Option<Credentials>,
}

impl CredentialContext {
    /// The empty (logged-out) context
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_authenticated(&self) -> bool {
        self.credentials.is_some()
    }

    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    pub fn token(&self) -> Option<&str> {
        self.credentials.as_ref().map(|c| c.token.as_str())
    }

    pub fn user(&self) -> Option<&UserSummary> {
        self.credentials.as_ref().map(|c| &c.user)
    }

    /// Best-effort local expiry check
    ///
    /// True when a token is held and its reported expiry has passed. An
    /// empty context is not "expired", it is just empty.
    pub fn is_locally_expired(&self, now: i64) -> bool {
        self.credentials
            .as_ref()
            .is_some_and(|c| c.expires_at <= now)
    }
}

impl From<Credentials> for CredentialContext {
    fn from(credentials: Credentials) -> Self {
        Self {
            credentials: Some(credentials),
        }
    }
}

type Subscriber = Box<dyn Fn(&CredentialContext) + Send + Sync>;

struct Inner {
    context: CredentialContext,
    generation: u64,
    subscribers: Vec<Subscriber>,
}

/// Owner of the client's credential context
///
/// Cloning yields another handle to the same store. All mutations are
/// serialized through one lock, so a `set` and a concurrent `clear` can
/// never interleave into a torn state, and subscribers always observe a
/// complete context.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<Mutex<Inner>>,
    vault: Arc<dyn CredentialVault>,
}

impl SessionStore {
    /// Create a store backed by the given vault
    ///
    /// The store starts empty; call [`rehydrate`](Self::rehydrate) to load
    /// a persisted session.
    pub fn new(vault: impl CredentialVault + 'static) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                context: CredentialContext::empty(),
                generation: 0,
                subscribers: Vec::new(),
            })),
            vault: Arc::new(vault),
        }
    }

    /// Atomically install a new credential context
    ///
    /// Persists to the vault and notifies subscribers within the same
    /// update. Replaces whatever was held before (last write wins).
    pub fn set(&self, credentials: Credentials) {
        let mut inner = self.inner.lock().unwrap();
        inner.context = CredentialContext::from(credentials);
        inner.generation += 1;
        self.persist(&inner.context);
        Self::notify(&inner);
    }

    /// Atomically empty the credential context
    ///
    /// Idempotent: clearing an already-empty store changes nothing and
    /// raises no error.
    pub fn clear(&self) {
        let mut inner = self.inner.lock().unwrap();
        if !inner.context.is_authenticated() {
            return;
        }
        inner.context = CredentialContext::empty();
        inner.generation += 1;
        self.persist(&inner.context);
        Self::notify(&inner);
    }

    /// Clear only if the store is still at `generation`
    ///
    /// Used by the request pipeline: a 401 for a request sent under an
    /// older session must not clear credentials installed since.
    pub fn clear_if_current(&self, generation: u64) {
        let mut inner = self.inner.lock().unwrap();
        if inner.generation != generation {
            tracing::debug!(
                "ignoring stale clear (generation {generation}, store at {})",
                inner.generation
            );
            return;
        }
        if !inner.context.is_authenticated() {
            return;
        }
        inner.context = CredentialContext::empty();
        inner.generation += 1;
        self.persist(&inner.context);
        Self::notify(&inner);
    }

    /// Load the persisted context at process start
    ///
    /// A context whose token is locally past its expiry is cleared (and
    /// the cleared state persisted) instead of being exposed to the UI as
    /// a stale authenticated state.
    pub fn rehydrate(&self) {
        let loaded = match self.vault.load() {
            Some(context) => context,
            None => return,
        };

        if !loaded.is_authenticated() {
            return;
        }

        let mut inner = self.inner.lock().unwrap();
        if loaded.is_locally_expired(Utc::now().timestamp()) {
            tracing::info!("persisted session is expired, starting logged out");
            self.persist(&CredentialContext::empty());
            return;
        }

        inner.context = loaded;
        inner.generation += 1;
        Self::notify(&inner);
    }

    /// Register a consumer notified on every change
    ///
    /// The callback runs synchronously inside the update that changed the
    /// state, with the new context.
    pub fn subscribe(&self, subscriber: impl Fn(&CredentialContext) + Send + Sync + 'static) {
        self.inner.lock().unwrap().subscribers.push(Box::new(subscriber));
    }

    /// A copy of the current context
    pub fn snapshot(&self) -> CredentialContext {
        self.inner.lock().unwrap().context.clone()
    }

    /// The current token, if authenticated
    pub fn token(&self) -> Option<String> {
        self.inner
            .lock()
            .unwrap()
            .context
            .token()
            .map(String::from)
    }

    /// The current generation counter
    pub fn generation(&self) -> u64 {
        self.inner.lock().unwrap().generation
    }

    fn persist(&self, context: &CredentialContext) {
        // Persistence is best effort: a failing vault must not take the
        // in-memory session down with it.
        if let Err(e) = self.vault.store(context) {
            tracing::warn!("failed to persist credential context: {e}");
        }
    }

    fn notify(inner: &Inner) {
        for subscriber in &inner.subscribers {
            subscriber(&inner.context);
        }
    }
}
