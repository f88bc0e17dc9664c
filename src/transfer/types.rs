//! Transfer Core Types

use std::fmt;
use std::str::FromStr;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use super::error::TransferError;
use super::state::TransferStatus;
use crate::account::AccountId;

/// Prefix carried by every transfer id
pub const TRANSFER_ID_PREFIX: &str = "TRF-";

/// Transfer ID - `TRF-` followed by a ULID
///
/// The ULID embeds the creation millisecond and an 80-bit random component,
/// so ids sort by time and two ids are never equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TransferId(ulid::Ulid);

impl fmt::Display for TransferId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", TRANSFER_ID_PREFIX, self.0)
    }
}

impl FromStr for TransferId {
    type Err = ulid::DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.strip_prefix(TRANSFER_ID_PREFIX).unwrap_or(s);
        Ok(Self(ulid::Ulid::from_string(raw)?))
    }
}

impl Serialize for TransferId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Monotonic transfer id generator
///
/// Ids generated within the same millisecond increment the random part, so
/// back-to-back ids from one generator are strictly increasing.
pub struct TransferIdGenerator {
    inner: Mutex<ulid::Generator>,
}

impl TransferIdGenerator {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(ulid::Generator::new()),
        }
    }

    pub fn generate(&self) -> TransferId {
        let mut generator = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        // Random-part overflow inside one millisecond; fall back to a fresh ULID.
        let ulid = generator.generate().unwrap_or_else(|_| ulid::Ulid::new());
        TransferId(ulid)
    }
}

impl Default for TransferIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// A request to move `amount` from one account to another.
///
/// Exists only for the duration of one `execute` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRequest {
    pub source_account_id: AccountId,
    pub target_account_id: AccountId,
    pub amount: Decimal,
    /// Free-text memo, never validated
    pub concept: Option<String>,
}

impl TransferRequest {
    pub fn new(
        source_account_id: impl Into<AccountId>,
        target_account_id: impl Into<AccountId>,
        amount: Decimal,
    ) -> Self {
        Self {
            source_account_id: source_account_id.into(),
            target_account_id: target_account_id.into(),
            amount,
            concept: None,
        }
    }

    pub fn with_concept(mut self, concept: impl Into<String>) -> Self {
        self.concept = Some(concept.into());
        self
    }
}

/// Outcome of one transfer attempt. Created fresh per call, never stored.
#[derive(Debug, Clone)]
pub struct TransferResult {
    pub transfer_id: TransferId,
    pub status: TransferStatus,
    /// Human-readable explanation, present on success too
    pub message: String,
    /// Instant the result was produced
    pub timestamp: DateTime<Utc>,
    /// Failure kind; `None` on success
    pub error: Option<TransferError>,
}

impl TransferResult {
    pub fn success(transfer_id: TransferId, request: &TransferRequest) -> Self {
        Self {
            transfer_id,
            status: TransferStatus::Success,
            message: format!(
                "Transfer completed successfully. From: {}, To: {}, Amount: {}",
                request.source_account_id, request.target_account_id, request.amount
            ),
            timestamp: Utc::now(),
            error: None,
        }
    }

    pub fn failed(transfer_id: TransferId, error: TransferError) -> Self {
        Self {
            transfer_id,
            status: TransferStatus::Failed,
            message: error.to_string(),
            timestamp: Utc::now(),
            error: Some(error),
        }
    }

    #[inline]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}
