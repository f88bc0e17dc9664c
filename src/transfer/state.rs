//! Transfer outcome status

use std::fmt;

use serde::Serialize;
use utoipa::ToSchema;

/// Final status of one transfer attempt
///
/// Closed set: an attempt either committed both deltas or changed nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ToSchema)]
pub enum TransferStatus {
    /// Terminal: both balances moved
    Success,
    /// Terminal: no balance moved
    Failed,
}

impl TransferStatus {
    #[inline]
    pub fn is_success(&self) -> bool {
        matches!(self, TransferStatus::Success)
    }

    /// Get the transport name
    pub fn as_str(&self) -> &'static str {
        match self {
            TransferStatus::Success => "Success",
            TransferStatus::Failed => "Failed",
        }
    }
}

impl fmt::Display for TransferStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
