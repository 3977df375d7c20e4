//! Star-annotated proposal catalog.

use std::sync::Arc;

use tokio::task::JoinHandle;

use starboard_core::error::Result;
use starboard_core::profile::UserProfile;
use starboard_core::proposal::{EnrichedProposal, Proposal, ProposalFeed};
use starboard_core::stream::{Publisher, Subscription};

use crate::profile_store::UserProfileStore;

/// The enriched, star-annotated proposal list.
///
/// A spawned combine task merges the raw feed with the profile stream and
/// re-emits the enriched list whenever either side updates. `None` marks a
/// broken feed (distinct from an empty list, which is a valid transient
/// state such as the first load).
pub struct ProposalCatalog {
    feed: Arc<dyn ProposalFeed>,
    profiles: Arc<UserProfileStore>,
    output: Arc<Publisher<Option<Vec<EnrichedProposal>>>>,
    combine_task: JoinHandle<()>,
}

impl ProposalCatalog {
    pub fn new(feed: Arc<dyn ProposalFeed>, profiles: Arc<UserProfileStore>) -> Self {
        let output = Arc::new(Publisher::new());
        let mut feed_sub = feed.subscribe();
        let mut profile_sub = profiles.observe();
        let publisher = output.clone();
        let combine_task = tokio::spawn(async move {
            let mut latest_feed: Option<Option<Vec<Proposal>>> = None;
            let mut latest_profile: Option<UserProfile> = None;
            loop {
                tokio::select! {
                    item = feed_sub.recv() => match item {
                        Some(value) => latest_feed = Some(value),
                        None => return,
                    },
                    item = profile_sub.recv() => match item {
                        Some(profile) => latest_profile = Some(profile),
                        None => return,
                    },
                }
                if let (Some(feed_value), Some(profile)) = (&latest_feed, &latest_profile) {
                    publisher.send(Self::enrich(feed_value, profile));
                }
            }
        });
        Self {
            feed,
            profiles,
            output,
            combine_task,
        }
    }

    fn enrich(
        feed_value: &Option<Vec<Proposal>>,
        profile: &UserProfile,
    ) -> Option<Vec<EnrichedProposal>> {
        feed_value.as_ref().map(|proposals| {
            proposals
                .iter()
                .map(|proposal| {
                    let starred = profile.is_starred(&proposal.id);
                    EnrichedProposal::new(proposal.clone(), starred)
                })
                .collect()
        })
    }

    /// Subscribes to the enriched list. The latest value is replayed on
    /// attach once both underlying streams have emitted.
    pub fn observe(&self) -> Subscription<Option<Vec<EnrichedProposal>>> {
        self.output.subscribe()
    }

    /// Stars or unstars `proposal` based on its current flag.
    ///
    /// # Errors
    ///
    /// Propagates the profile store error (`NotAuthenticated` or a remote
    /// failure).
    pub async fn toggle_star(&self, proposal: &EnrichedProposal) -> Result<()> {
        if proposal.starred {
            self.profiles.remove_star(proposal.id()).await
        } else {
            self.profiles.add_star(proposal.id()).await
        }
    }

    #[cfg(test)]
    pub(crate) fn observer_count(&self) -> usize {
        self.output.subscriber_count()
    }

    /// Forces a re-fetch of the proposal feed.
    ///
    /// # Errors
    ///
    /// Returns whatever error the feed raises; the error is not absorbed
    /// here so callers can distinguish refresh failure from a feed update.
    pub async fn refresh(&self) -> Result<()> {
        self.feed.refresh().await
    }
}

impl Drop for ProposalCatalog {
    fn drop(&mut self) {
        self.combine_task.abort();
    }
}
