//! Per-user profile document access, gated behind authentication.

use std::sync::Arc;

use starboard_core::error::{Result, StarboardError};
use starboard_core::profile::{ProfileDocumentStore, UserProfile};
use starboard_core::stream::Subscription;

use crate::auth_session::AuthSession;

/// Owns the signed-in user's mutable profile document.
///
/// Observation is identity-gated: while signed out the stream holds
/// [`UserProfile::empty`], and every sign-in re-subscribes the remote
/// document of the new identity. Mutations run as coarse read-modify-write
/// cycles against the full document; two cycles racing on the same
/// document are not serialized and the last writer wins.
pub struct UserProfileStore {
    auth: Arc<AuthSession>,
    documents: Arc<dyn ProfileDocumentStore>,
}

impl UserProfileStore {
    pub fn new(auth: Arc<AuthSession>, documents: Arc<dyn ProfileDocumentStore>) -> Self {
        Self { auth, documents }
    }

    /// Streams the current identity's profile.
    ///
    /// Emits [`UserProfile::empty`] while signed out. Remote read or decode
    /// failures are absorbed here and replaced with the empty profile; the
    /// stream itself never fails.
    pub fn observe(&self) -> Subscription<UserProfile> {
        let documents = self.documents.clone();
        self.auth
            .bind_to_identity(UserProfile::empty(), move |identity| {
                documents.subscribe(&identity.id).map(|result| match result {
                    Ok(profile) => profile,
                    Err(err) => {
                        tracing::warn!(
                            "profile document unreadable, substituting empty: {}",
                            err
                        );
                        UserProfile::empty()
                    }
                })
            })
    }

    /// Stars a proposal.
    ///
    /// # Errors
    ///
    /// Returns [`StarboardError::NotAuthenticated`] while signed out, or
    /// the remote error if the read-modify-write cycle fails.
    pub async fn add_star(&self, proposal_id: &str) -> Result<()> {
        self.update_document(|profile| profile.add_star(proposal_id))
            .await
    }

    /// Unstars a proposal.
    ///
    /// # Errors
    ///
    /// Returns [`StarboardError::NotAuthenticated`] while signed out, or
    /// the remote error if the read-modify-write cycle fails.
    pub async fn remove_star(&self, proposal_id: &str) -> Result<()> {
        self.update_document(|profile| profile.remove_star(proposal_id))
            .await
    }

    /// Records a search keyword at the front of the history.
    ///
    /// # Errors
    ///
    /// Returns [`StarboardError::NotAuthenticated`] while signed out, or
    /// the remote error if the read-modify-write cycle fails.
    pub async fn add_search_history(&self, keyword: &str) -> Result<()> {
        self.update_document(|profile| profile.record_search(keyword))
            .await
    }

    /// One read-modify-write cycle: fetch the current identity's document,
    /// apply `mutate` in memory, write the full document back.
    async fn update_document<F>(&self, mutate: F) -> Result<()>
    where
        F: FnOnce(&mut UserProfile),
    {
        let identity = self
            .auth
            .current_identity()
            .ok_or(StarboardError::NotAuthenticated)?;
        let mut profile = self.documents.get(&identity.id).await?;
        mutate(&mut profile);
        self.documents.set(&identity.id, &profile).await
    }
}
