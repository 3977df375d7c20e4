//! Reactive application layer for the Starboard client.
//!
//! Four components, wired by explicit dependency injection (construct one
//! of each and pass references; no process-wide singletons):
//!
//! - [`AuthSession`]: the current identity as an observable value, plus
//!   the identity-gated stream combinator
//! - [`UserProfileStore`]: the per-user stars/search-history document,
//!   mutated via read-modify-write cycles
//! - [`ProposalCatalog`]: the proposal feed merged with the star set
//! - [`ListPresentation`]: the state machine one list view renders from
//!
//! A typical app builds the stack once and hands two `ListPresentation`
//! instances (all / starred-only) to its shell:
//!
//! ```ignore
//! let session = Arc::new(AuthSession::new(provider));
//! let profiles = Arc::new(UserProfileStore::new(session.clone(), documents));
//! let catalog = Arc::new(ProposalCatalog::new(feed, profiles));
//! let all = ListPresentation::new(session.clone(), catalog.clone(), Arc::new(|_| true));
//! let starred = ListPresentation::new(session, catalog, Arc::new(|p| p.starred));
//! ```

mod auth_session;
mod catalog;
mod presentation;
mod profile_store;

#[cfg(test)]
pub(crate) mod testing;

pub use auth_session::AuthSession;
pub use catalog::ProposalCatalog;
pub use presentation::{
    Content, DEFAULT_MIN_REFRESH_DELAY, FeedbackCallback, ItemFilter, ListPresentation,
    ListViewState, PresentationState,
};
pub use profile_store::UserProfileStore;
