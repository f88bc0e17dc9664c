//! Transfer Engine
//!
//! Moves money between two accounts of the directory under a fixed set of
//! business rules.
//!
//! # Rules (evaluated in this order; the first failure wins)
//!
//! ```text
//! 1. amount > 0
//! 2. source != target
//! 3. source exists, then target exists
//! 4. source balance >= amount
//! 5. debit + credit applied atomically under both account locks
//! ```
//!
//! Every outcome is returned as a [`TransferResult`]; nothing is thrown.

pub mod engine;
pub mod error;
mod integration_tests;
pub mod state;
pub mod types;

// Re-exports for convenience
pub use engine::TransferEngine;
pub use error::TransferError;
pub use state::TransferStatus;
pub use types::{TransferId, TransferIdGenerator, TransferRequest, TransferResult};
