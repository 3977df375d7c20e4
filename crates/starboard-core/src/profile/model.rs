//! UserProfile domain model.

use serde::{Deserialize, Serialize};

/// Maximum number of retained search history entries.
pub const MAX_SEARCH_HISTORY: usize = 5;

/// The per-user mutable document: starred proposal ids and recent search
/// keywords.
///
/// One instance exists per identity, keyed by the identity id. The wire
/// schema is `{"stars": [...], "searchHistories": [...]}`; both fields
/// default to empty so a partial or missing document decodes cleanly.
///
/// All mutations go through the rule methods below; the application layer
/// applies them inside a read-modify-write cycle against the remote store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserProfile {
    /// Starred proposal ids, in starring order
    pub stars: Vec<String>,
    /// Recent search keywords, most recent first, at most
    /// [`MAX_SEARCH_HISTORY`] entries
    pub search_histories: Vec<String>,
}

impl UserProfile {
    /// The profile substituted while signed out or when a remote document
    /// fails to decode.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether `proposal_id` is starred.
    pub fn is_starred(&self, proposal_id: &str) -> bool {
        self.stars.iter().any(|id| id == proposal_id)
    }

    /// Appends `proposal_id` to the star list.
    ///
    /// Appending an already-starred id is tolerated and yields a duplicate
    /// entry; `is_starred` and `remove_star` treat duplicates as one star.
    pub fn add_star(&mut self, proposal_id: &str) {
        self.stars.push(proposal_id.to_string());
    }

    /// Removes every entry equal to `proposal_id` from the star list.
    pub fn remove_star(&mut self, proposal_id: &str) {
        self.stars.retain(|id| id != proposal_id);
    }

    /// Records `keyword` as the most recent search.
    ///
    /// Any existing equal entry is removed first, the keyword is inserted
    /// at the front, and the history is truncated to
    /// [`MAX_SEARCH_HISTORY`] entries.
    pub fn record_search(&mut self, keyword: &str) {
        self.search_histories.retain(|k| k != keyword);
        self.search_histories.insert(0, keyword.to_string());
        self.search_histories.truncate(MAX_SEARCH_HISTORY);
    }
}
