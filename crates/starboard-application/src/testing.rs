//! Test doubles for the collaborator traits, shared by the unit tests in
//! this crate.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;

use starboard_core::auth::AuthProvider;
use starboard_core::error::Result;
use starboard_core::identity::Identity;
use starboard_core::profile::{ProfileDocumentStore, UserProfile};
use starboard_core::proposal::{Proposal, ProposalFeed};
use starboard_core::stream::{Publisher, Subscription};

/// Provider double driven directly from the test body.
pub(crate) struct MockAuthProvider {
    current: Mutex<Option<Identity>>,
    pub(crate) changes: Publisher<Option<Identity>>,
}

impl MockAuthProvider {
    pub(crate) fn new(initial: Option<Identity>) -> Self {
        let changes = Publisher::new();
        changes.send(initial.clone());
        Self {
            current: Mutex::new(initial),
            changes,
        }
    }

    pub(crate) fn set_identity(&self, identity: Option<Identity>) {
        *self.current.lock().unwrap() = identity.clone();
        self.changes.send(identity);
    }
}

impl AuthProvider for MockAuthProvider {
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

/// In-memory document store with per-user publishers and an optional gate
/// that holds `get` open so tests can interleave read-modify-write cycles.
pub(crate) struct MockDocumentStore {
    pub(crate) documents: Mutex<HashMap<String, UserProfile>>,
    publishers: Mutex<HashMap<String, Arc<Publisher<Result<UserProfile>>>>>,
    get_gate: Option<Arc<Notify>>,
}

impl MockDocumentStore {
    pub(crate) fn new() -> Self {
        Self {
            documents: Mutex::new(HashMap::new()),
            publishers: Mutex::new(HashMap::new()),
            get_gate: None,
        }
    }

    pub(crate) fn gated(gate: Arc<Notify>) -> Self {
        Self {
            get_gate: Some(gate),
            ..Self::new()
        }
    }

    fn publisher(&self, user_id: &str) -> Arc<Publisher<Result<UserProfile>>> {
        self.publishers
            .lock()
            .unwrap()
            .entry(user_id.to_string())
            .or_default()
            .clone()
    }

    /// Current stored document, empty when absent.
    pub(crate) fn document(&self, user_id: &str) -> UserProfile {
        self.documents
            .lock()
            .unwrap()
            .get(user_id)
            .cloned()
            .unwrap_or_default()
    }

    pub(crate) fn is_untouched(&self) -> bool {
        self.documents.lock().unwrap().is_empty()
    }

    /// Simulates a remote-side update (or decode failure) reaching the
    /// live subscription.
    pub(crate) fn push_remote(&self, user_id: &str, update: Result<UserProfile>) {
        if let Ok(profile) = &update {
            self.documents
                .lock()
                .unwrap()
                .insert(user_id.to_string(), profile.clone());
        }
        self.publisher(user_id).send(update);
    }
}

#[async_trait]
impl ProfileDocumentStore for MockDocumentStore {
    async fn get(&self, user_id: &str) -> Result<UserProfile> {
        let profile = self.document(user_id);
        if let Some(gate) = &self.get_gate {
            gate.notified().await;
        }
        Ok(profile)
    }

    async fn set(&self, user_id: &str, profile: &UserProfile) -> Result<()> {
        self.documents
            .lock()
            .unwrap()
            .insert(user_id.to_string(), profile.clone());
        self.publisher(user_id).send(Ok(profile.clone()));
        Ok(())
    }

    fn subscribe(&self, user_id: &str) -> Subscription<Result<UserProfile>> {
        let subscription = self.publisher(user_id).subscribe();
        // A fresh user has no document yet; replay the empty state so
        // subscribers start from a known value.
        if !self.documents.lock().unwrap().contains_key(user_id) {
            self.publisher(user_id).send(Ok(UserProfile::empty()));
        }
        subscription
    }
}

/// Feed double with a scriptable refresh outcome and an optional gate
/// that holds `refresh` open until released.
pub(crate) struct MockFeed {
    pub(crate) proposals: Publisher<Option<Vec<Proposal>>>,
    refresh_result: Mutex<Result<Vec<Proposal>>>,
    refresh_gate: Option<Arc<Notify>>,
}

impl MockFeed {
    pub(crate) fn new() -> Self {
        Self {
            proposals: Publisher::new(),
            refresh_result: Mutex::new(Ok(Vec::new())),
            refresh_gate: None,
        }
    }

    pub(crate) fn gated(gate: Arc<Notify>) -> Self {
        Self {
            refresh_gate: Some(gate),
            ..Self::new()
        }
    }

    pub(crate) fn set_refresh_result(&self, result: Result<Vec<Proposal>>) {
        *self.refresh_result.lock().unwrap() = result;
    }
}

#[async_trait]
impl ProposalFeed for MockFeed {
    fn subscribe(&self) -> Subscription<Option<Vec<Proposal>>> {
        self.proposals.subscribe()
    }

    async fn refresh(&self) -> Result<()> {
        if let Some(gate) = &self.refresh_gate {
            gate.notified().await;
        }
        match self.refresh_result.lock().unwrap().clone() {
            Ok(proposals) => {
                self.proposals.send(Some(proposals));
                Ok(())
            }
            Err(err) => Err(err),
        }
    }
}

pub(crate) fn identity(id: &str) -> Identity {
    Identity::new(id, format!("User {id}"))
}

pub(crate) fn proposal(id: &str, title: &str) -> Proposal {
    Proposal {
        id: id.to_string(),
        title: title.to_string(),
        status: String::new(),
        link: None,
    }
}
