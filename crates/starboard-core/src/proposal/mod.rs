//! Proposal domain module.
//!
//! - `model`: proposal list items (`Proposal`, `EnrichedProposal`)
//! - `feed`: the read-only remote proposal collection boundary
//!   (`ProposalFeed`)

mod feed;
mod model;

pub use feed::ProposalFeed;
pub use model::{EnrichedProposal, Proposal};
