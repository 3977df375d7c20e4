//! Remote proposal feed boundary.

use async_trait::async_trait;

use crate::error::Result;
use crate::proposal::Proposal;
use crate::stream::Subscription;

/// Read-only remote proposal collection.
///
/// The feed publishes the full proposal list on every update. `None` is the
/// load-failure marker and is distinct from `Some(vec![])`: an empty list
/// is a valid transient state (e.g. nothing fetched yet), while `None`
/// means the feed is broken until a refresh succeeds.
#[async_trait]
pub trait ProposalFeed: Send + Sync {
    /// Subscribes to proposal list updates.
    ///
    /// The latest known value is delivered immediately on attach.
    fn subscribe(&self) -> Subscription<Option<Vec<Proposal>>>;

    /// Forces a re-fetch of the collection.
    ///
    /// On success the new list is published to all subscribers before this
    /// returns. On failure the error is returned to the caller and the
    /// subscription retains its last value.
    ///
    /// # Errors
    ///
    /// Returns whatever error the remote source raises.
    async fn refresh(&self) -> Result<()>;
}
