//! Error types for the Starboard client core.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the Starboard client core.
///
/// This provides typed, structured error variants with automatic conversion
/// from common error types via the `From` trait.
///
/// Sign-out failure is intentionally not represented here: it is treated as
/// unrecoverable and asserts at the call site instead of propagating.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum StarboardError {
    /// An operation that requires a signed-in identity was invoked while
    /// signed out
    #[error("not authenticated")]
    NotAuthenticated,

    /// A remote document failed to decode
    #[error("decode error: {message}")]
    Decode { message: String },

    /// The proposal feed failed to load or refresh
    #[error("feed error: {0}")]
    Feed(String),

    /// Remote document read/write failure
    #[error("data access error: {0}")]
    DataAccess(String),

    /// Internal error (should not happen in normal operation)
    #[error("internal error: {0}")]
    Internal(String),
}

impl StarboardError {
    /// Creates a Decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Creates a Feed error
    pub fn feed(message: impl Into<String>) -> Self {
        Self::Feed(message.into())
    }

    /// Creates a DataAccess error
    pub fn data_access(message: impl Into<String>) -> Self {
        Self::DataAccess(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Check if this is a NotAuthenticated error
    pub fn is_not_authenticated(&self) -> bool {
        matches!(self, Self::NotAuthenticated)
    }

    /// Check if this is a decode error
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode { .. })
    }
}

impl From<serde_json::Error> for StarboardError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode {
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, StarboardError>`.
pub type Result<T> = std::result::Result<T, StarboardError>;
