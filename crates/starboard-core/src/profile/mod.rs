//! User profile domain module.
//!
//! - `model`: the per-user profile document (`UserProfile`) and its
//!   mutation rules
//! - `repository`: the remote document store boundary
//!   (`ProfileDocumentStore`)

mod model;
mod repository;

pub use model::{MAX_SEARCH_HISTORY, UserProfile};
pub use repository::ProfileDocumentStore;
