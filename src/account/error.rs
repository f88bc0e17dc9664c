//! Account directory error types

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised by an [`AccountStore`](super::AccountStore)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Account {0} not found")]
    AccountNotFound(String),

    #[error("Account {0} already exists")]
    DuplicateAccount(String),

    #[error("Account {0} cannot open with a negative balance")]
    NegativeBalance(String),

    #[error("Balance of {id} would be negative: {balance} + {delta}")]
    WouldBeNegative {
        id: String,
        balance: Decimal,
        delta: Decimal,
    },

    #[error("Balance of {0} would overflow or lose precision")]
    Overflow(String),

    /// Backing storage could not be reached (durable stores only)
    #[error("Account store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    /// Get the error code for logs and API responses
    pub fn code(&self) -> &'static str {
        match self {
            StoreError::AccountNotFound(_) => "ACCOUNT_NOT_FOUND",
            StoreError::DuplicateAccount(_) => "DUPLICATE_ACCOUNT",
            StoreError::NegativeBalance(_) => "NEGATIVE_BALANCE",
            StoreError::WouldBeNegative { .. } => "WOULD_BE_NEGATIVE",
            StoreError::Overflow(_) => "OVERFLOW",
            StoreError::Unavailable(_) => "STORE_UNAVAILABLE",
        }
    }
}
