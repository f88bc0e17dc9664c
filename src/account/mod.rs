//! Account Directory
//!
//! Owns every account record and is the only component allowed to mutate a
//! balance. Callers receive snapshots; mutation happens through
//! [`AccountStore::apply_delta`] or an [`AccountGuard`] obtained from
//! [`AccountStore::lock`].

pub mod error;
pub mod memory;
pub mod models;
pub mod store;

// Re-export commonly used types
pub use error::StoreError;
pub use memory::{InMemoryAccountStore, MemoryAccountGuard};
pub use models::{Account, AccountId, seed_accounts};
pub use store::{AccountGuard, AccountStore};
