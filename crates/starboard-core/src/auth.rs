//! Auth provider boundary.
//!
//! The actual authentication flow (login screens, token refresh, platform
//! SDKs) lives outside this workspace. The core only needs to know who is
//! signed in right now and to be told when that changes.

use crate::error::Result;
use crate::identity::Identity;
use crate::stream::Subscription;

/// External authentication provider.
///
/// Implementations push `Some(identity)` on sign-in and `None` on sign-out
/// (or on a token refresh that changes the identity). A subscription must
/// deliver the current value immediately on attach so consumers never start
/// from an unknown auth state.
pub trait AuthProvider: Send + Sync {
    /// Subscribes to identity changes. Emits the current identity first.
    fn identity_changes(&self) -> Subscription<Option<Identity>>;

    /// Returns the identity signed in right now, if any.
    fn current_identity(&self) -> Option<Identity>;

    /// Signs the current identity out.
    ///
    /// # Errors
    ///
    /// Returns an error if the provider rejects the sign-out. Callers treat
    /// this as unrecoverable (see `AuthSession::sign_out`).
    fn sign_out(&self) -> Result<()>;
}
