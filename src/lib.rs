//! Account Transfer Service
//!
//! An in-memory account directory and an engine that moves money between
//! accounts atomically, with an HTTP gateway in front.
//!
//! # Modules
//!
//! - [`account`] - Account type, directory trait and in-memory directory
//! - [`transfer`] - Transfer rules, ids, results and the engine
//! - [`money`] - Decimal amount parsing/formatting
//! - [`config`] - YAML configuration
//! - [`logging`] - tracing subscriber setup
//! - [`gateway`] - axum HTTP adapter

// Domain
pub mod account;
pub mod money;
pub mod transfer;

// Service plumbing
pub mod config;
pub mod gateway;
pub mod logging;

// Convenient re-exports at crate root
pub use account::{Account, AccountId, AccountStore, InMemoryAccountStore, StoreError};
pub use transfer::{
    TransferEngine, TransferError, TransferId, TransferRequest, TransferResult, TransferStatus,
};
