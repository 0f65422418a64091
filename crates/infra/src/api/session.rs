//! Session state
//!
//! Holds the one access credential of a logical client. Constructed once and
//! shared (`Arc<Session>`) between the API client, the refresh coordinator
//! and whatever code performs login/logout.

use parking_lot::RwLock;
use refundline_domain::Credential;
use tracing::debug;

/// Holder of the current access credential.
///
/// A pure holder: no validation, no expiry tracking. Reads and writes are
/// guarded by a lock that is never held across an await point, so a reader
/// sees either the old or the new value and never a partial update.
#[derive(Debug, Default)]
pub struct Session {
    credential: RwLock<Option<Credential>>,
}

impl Session {
    /// New session with no credential.
    pub fn new() -> Self {
        Self::default()
    }

    /// Session pre-loaded with a credential.
    pub fn with_credential(credential: Credential) -> Self {
        Self { credential: RwLock::new(Some(credential)) }
    }

    /// Replace the current credential (`None` clears it).
    pub fn set(&self, credential: Option<Credential>) {
        debug!(present = credential.is_some(), "session credential replaced");
        *self.credential.write() = credential;
    }

    /// Snapshot of the current credential.
    pub fn get(&self) -> Option<Credential> {
        self.credential.read().clone()
    }

    /// Forget the credential; used on logout.
    pub fn clear(&self) {
        self.set(None);
    }

    /// Whether a credential is held. Says nothing about its validity.
    pub fn is_authenticated(&self) -> bool {
        self.credential.read().is_some()
    }
}
