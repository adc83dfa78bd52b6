/**
 * Route Gate
 *
 * Advisory navigation check: before the UI renders a protected view it asks
 * the gate whether the credential store currently holds a session. A denial
 * redirects to the login view with the original destination attached, so a
 * successful login can resume where the user was headed.
 *
 * This is a UX convenience only. The server-side guard remains the sole
 * authority; a token that passes the gate can still be rejected upstream,
 * in which case the 401 interceptor clears the store and the next gate
 * check denies.
 */

use crate::client::session::SessionStore;

/// Outcome of a gate check for a protected destination
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// A session is held; proceed to the destination
    Allow,
    /// No session; navigate to `redirect` instead
    Deny {
        /// Login route carrying the original destination
        redirect: String,
    },
}

impl GateDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow)
    }
}

/// Check whether navigation to `destination` should proceed
///
/// Denies when the store is empty or the held token is past its reported
/// expiry; the expiry case also clears the store so the UI flips to
/// logged-out immediately instead of on the next rejected request.
pub fn check(session: &SessionStore, destination: &str) -> GateDecision {
    let snapshot = session.snapshot();

    if snapshot.is_locally_expired(chrono::Utc::now().timestamp()) {
        tracing::debug!("session expired locally, denying navigation to {destination}");
        session.clear();
        return deny(destination);
    }

    if snapshot.is_authenticated() {
        GateDecision::Allow
    } else {
        deny(destination)
    }
}

fn deny(destination: &str) -> GateDecision {
    GateDecision::Deny {
        redirect: format!("/login?next={destination}"),
    }
}
