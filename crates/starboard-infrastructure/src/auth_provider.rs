//! In-process auth provider adapter.

use std::sync::Mutex;

use starboard_core::auth::AuthProvider;
use starboard_core::error::Result;
use starboard_core::identity::Identity;
use starboard_core::stream::{Publisher, Subscription};

/// Adapter the platform shell drives from whatever auth SDK it links.
///
/// The shell pushes identity changes with [`set_identity`]; everything
/// downstream observes them through the [`AuthProvider`] boundary. The
/// current value is replayed to each new subscription.
///
/// [`set_identity`]: InProcessAuthProvider::set_identity
pub struct InProcessAuthProvider {
    current: Mutex<Option<Identity>>,
    changes: Publisher<Option<Identity>>,
}

impl InProcessAuthProvider {
    pub fn new() -> Self {
        let changes = Publisher::new();
        changes.send(None);
        Self {
            current: Mutex::new(None),
            changes,
        }
    }

    /// Records a sign-in, sign-out, or identity change from the shell's
    /// auth SDK.
    pub fn set_identity(&self, identity: Option<Identity>) {
        *self.current.lock().unwrap() = identity.clone();
        self.changes.send(identity);
    }
}

impl Default for InProcessAuthProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthProvider for InProcessAuthProvider {
    fn identity_changes(&self) -> Subscription<Option<Identity>> {
        self.changes.subscribe()
    }

    fn current_identity(&self) -> Option<Identity> {
        self.current.lock().unwrap().clone()
    }

    fn sign_out(&self) -> Result<()> {
        self.set_identity(None);
        Ok(())
    }
}
