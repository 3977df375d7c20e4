//! Remote profile document store boundary.

use async_trait::async_trait;

use crate::error::Result;
use crate::profile::UserProfile;
use crate::stream::Subscription;

/// Remote store holding one profile document per user id.
///
/// The store supports whole-document get/set plus a live-update
/// subscription. There is no partial update and no optimistic concurrency
/// token: writers racing on the same document lose updates (last write
/// wins), which the application layer accepts as a documented limitation.
#[async_trait]
pub trait ProfileDocumentStore: Send + Sync {
    /// Fetches the profile document for `user_id`.
    ///
    /// An absent document reads as [`UserProfile::empty`] so that the first
    /// read-modify-write cycle of a fresh user starts from a valid state.
    ///
    /// # Errors
    ///
    /// Returns an error if the remote read fails or the document cannot be
    /// decoded.
    async fn get(&self, user_id: &str) -> Result<UserProfile>;

    /// Overwrites the full profile document for `user_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the remote write fails.
    async fn set(&self, user_id: &str, profile: &UserProfile) -> Result<()>;

    /// Subscribes to live updates of the document for `user_id`.
    ///
    /// The current document is delivered immediately, then every change.
    /// Read or decode failures are delivered as `Err` items; the consumer
    /// decides whether to absorb or surface them.
    fn subscribe(&self, user_id: &str) -> Subscription<Result<UserProfile>>;
}
