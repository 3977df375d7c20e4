//! Proposal list item models.

use serde::{Deserialize, Serialize};

/// A single proposal as delivered by the remote feed.
///
/// The feed owns the full schema; this crate only relies on `id` plus the
/// text fields that drive search and suggestions. Unknown fields are
/// ignored on decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Proposal {
    /// Stable proposal id (e.g. "SB-0042")
    pub id: String,
    /// Proposal title
    pub title: String,
    /// Review status label
    #[serde(default)]
    pub status: String,
    /// Link to the full proposal text
    #[serde(default)]
    pub link: Option<String>,
}

impl Proposal {
    /// The text fields a search query is matched against.
    pub fn searchable_text(&self) -> [&str; 3] {
        [&self.id, &self.title, &self.status]
    }
}

/// A proposal annotated with the current user's star status.
///
/// Derived data: recomputed whenever the base feed or the star set changes,
/// with no identity of its own beyond `proposal.id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichedProposal {
    pub proposal: Proposal,
    pub starred: bool,
}

impl EnrichedProposal {
    pub fn new(proposal: Proposal, starred: bool) -> Self {
        Self { proposal, starred }
    }

    pub fn id(&self) -> &str {
        &self.proposal.id
    }
}
