//! Identity domain model.

use serde::{Deserialize, Serialize};

/// The signed-in user's stable reference.
///
/// An `Identity` exists only while a session is authenticated. It is held
/// transiently as the "current identity" and never persisted by this crate;
/// its `id` keys the per-user profile document in the remote store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Stable user id
    pub id: String,
    /// Human-readable display name
    pub display_name: String,
}

impl Identity {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
        }
    }
}
