//! Transfer Error Types
//!
//! Every failure the engine can report. Display strings are the exact
//! user-facing messages carried in [`TransferResult::message`].
//!
//! [`TransferResult::message`]: super::types::TransferResult

use rust_decimal::Decimal;
use thiserror::Error;

use crate::account::StoreError;

/// Transfer error types
///
/// Rule violations come first; system errors last.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransferError {
    // === Validation Errors ===
    #[error("Amount must be greater than 0.")]
    InvalidAmount,

    #[error("Source and target accounts must be different.")]
    SameAccount,

    // === Account Errors ===
    #[error("Source account {0} does not exist.")]
    SourceAccountNotFound(String),

    #[error("Target account {0} does not exist.")]
    TargetAccountNotFound(String),

    #[error("Insufficient funds. Available: {available}, Required: {required}.")]
    InsufficientFunds {
        available: Decimal,
        required: Decimal,
    },

    #[error("Balance of account {0} would overflow or lose precision.")]
    Overflow(String),

    // === System Errors ===
    #[error("Transfer abandoned: deadline exceeded before commit.")]
    DeadlineExceeded,

    #[error("Service unavailable: {0}")]
    Unavailable(String),
}

impl TransferError {
    /// Get the error code for API responses
    pub fn code(&self) -> &'static str {
        match self {
            TransferError::InvalidAmount => "INVALID_AMOUNT",
            TransferError::SameAccount => "SAME_ACCOUNT",
            TransferError::SourceAccountNotFound(_) => "SOURCE_ACCOUNT_NOT_FOUND",
            TransferError::TargetAccountNotFound(_) => "TARGET_ACCOUNT_NOT_FOUND",
            TransferError::InsufficientFunds { .. } => "INSUFFICIENT_FUNDS",
            TransferError::Overflow(_) => "OVERFLOW",
            TransferError::DeadlineExceeded => "DEADLINE_EXCEEDED",
            TransferError::Unavailable(_) => "SERVICE_UNAVAILABLE",
        }
    }

    /// Get HTTP status code suggestion
    pub fn http_status(&self) -> u16 {
        match self {
            TransferError::InvalidAmount
            | TransferError::SameAccount
            | TransferError::SourceAccountNotFound(_)
            | TransferError::TargetAccountNotFound(_)
            | TransferError::InsufficientFunds { .. } => 422,
            TransferError::Overflow(_) => 500,
            TransferError::Unavailable(_) => 503,
            TransferError::DeadlineExceeded => 504,
        }
    }

    /// Business-rule rejection (as opposed to a system fault)
    pub fn is_rule_violation(&self) -> bool {
        self.http_status() == 422
    }
}

impl From<StoreError> for TransferError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Overflow(id) => TransferError::Overflow(id),
            other => TransferError::Unavailable(other.to_string()),
        }
    }
}
