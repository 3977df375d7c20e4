//! Transport implementations of the Starboard collaborator boundaries.
//!
//! The application layer only sees the traits from `starboard-core`; this
//! crate supplies the HTTP-backed document store and proposal feed plus
//! the in-process auth adapter a platform shell wires to its auth SDK.

mod auth_provider;
mod http_profile_store;
mod http_proposal_feed;

pub use auth_provider::InProcessAuthProvider;
pub use http_profile_store::HttpProfileDocumentStore;
pub use http_proposal_feed::HttpProposalFeed;
