//! Transfer Engine
//!
//! Validates a transfer against the business rules, then moves both balances
//! as one unit while holding both account locks.
//!
//! # Flow
//!
//! ```text
//! validate (snapshots) → lock lower id → lock higher id → re-validate → debit + credit → release
//! ```
//!
//! # Safety Invariants
//!
//! 1. **Ordered Locking**: locks are taken by account id, never by role, so
//!    A→B and B→A running together cannot deadlock
//! 2. **Re-check Under Lock**: snapshot reads may be stale; existence and
//!    funds are checked again once both locks are held
//! 3. **No Await In Commit**: both deltas are applied synchronously, so a
//!    dropped future can only abandon the attempt before anything moved

use std::sync::Arc;
use std::time::Duration;

use rust_decimal::Decimal;
use tracing::{debug, error, info, warn};

use super::error::TransferError;
use super::types::{TransferId, TransferIdGenerator, TransferRequest, TransferResult};
use crate::account::{AccountGuard, AccountStore};
use crate::money;

/// Transfer Engine - applies transfers against an account directory
pub struct TransferEngine<S: AccountStore> {
    store: Arc<S>,
    id_gen: TransferIdGenerator,
}

impl<S: AccountStore> TransferEngine<S> {
    /// Create an engine over an explicit account directory
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            id_gen: TransferIdGenerator::new(),
        }
    }

    /// Access to the directory for read-only callers
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Execute a transfer. Always returns a result; never panics on input.
    pub async fn execute(&self, request: TransferRequest) -> TransferResult {
        let transfer_id = self.begin(&request);
        let outcome = self.run(transfer_id, &request).await;
        self.finish(transfer_id, &request, outcome)
    }

    /// Execute with a deadline.
    ///
    /// Lock acquisition is the only suspension point, so on timeout the
    /// attempt is dropped before any balance has moved.
    pub async fn execute_within(
        &self,
        request: TransferRequest,
        deadline: Duration,
    ) -> TransferResult {
        let transfer_id = self.begin(&request);
        match tokio::time::timeout(deadline, self.run(transfer_id, &request)).await {
            Ok(outcome) => self.finish(transfer_id, &request, outcome),
            Err(_) => {
                warn!(
                    transfer_id = %transfer_id,
                    deadline_ms = deadline.as_millis() as u64,
                    "Transfer abandoned before commit"
                );
                TransferResult::failed(transfer_id, TransferError::DeadlineExceeded)
            }
        }
    }

    fn begin(&self, request: &TransferRequest) -> TransferId {
        let transfer_id = self.id_gen.generate();
        info!(
            transfer_id = %transfer_id,
            source = %request.source_account_id,
            target = %request.target_account_id,
            amount = %request.amount,
            "Starting transfer"
        );
        transfer_id
    }

    fn finish(
        &self,
        transfer_id: TransferId,
        request: &TransferRequest,
        outcome: Result<(), TransferError>,
    ) -> TransferResult {
        match outcome {
            Ok(()) => {
                info!(transfer_id = %transfer_id, "Transfer committed");
                TransferResult::success(transfer_id, request)
            }
            Err(e) if e.is_rule_violation() => {
                warn!(transfer_id = %transfer_id, code = e.code(), "Transfer failed: {}", e);
                TransferResult::failed(transfer_id, e)
            }
            Err(e) => {
                error!(transfer_id = %transfer_id, code = e.code(), "Transfer failed: {}", e);
                TransferResult::failed(transfer_id, e)
            }
        }
    }

    async fn run(
        &self,
        transfer_id: TransferId,
        request: &TransferRequest,
    ) -> Result<(), TransferError> {
        let source_id = request.source_account_id.as_str();
        let target_id = request.target_account_id.as_str();
        let amount = request.amount;

        // 1. Positive amount
        if amount <= Decimal::ZERO {
            return Err(TransferError::InvalidAmount);
        }

        // 2. Distinct accounts
        if source_id == target_id {
            return Err(TransferError::SameAccount);
        }

        // 3. Both accounts exist, source first (snapshot reads)
        let source = self
            .store
            .get(source_id)
            .await?
            .ok_or_else(|| TransferError::SourceAccountNotFound(source_id.to_string()))?;
        if !self.store.exists(target_id).await? {
            return Err(TransferError::TargetAccountNotFound(target_id.to_string()));
        }

        // 4. Sufficient funds (snapshot)
        if source.balance() < amount {
            return Err(TransferError::InsufficientFunds {
                available: source.balance(),
                required: amount,
            });
        }

        // 5. Lock in id order, not source/target order
        let source_first = source_id < target_id;
        let (first_id, second_id) = if source_first {
            (source_id, target_id)
        } else {
            (target_id, source_id)
        };

        let first = self.store.lock(first_id).await?;
        let second = self.store.lock(second_id).await?;
        debug!(transfer_id = %transfer_id, first = first_id, second = second_id, "Locks held");

        let (source_guard, target_guard) = if source_first {
            (first, second)
        } else {
            (second, first)
        };

        // Re-check under lock; a stale failure reports the same kind as the first check.
        let mut source_guard = source_guard.ok_or_else(|| {
            warn!(transfer_id = %transfer_id, stale = true, "Source vanished before lock");
            TransferError::SourceAccountNotFound(source_id.to_string())
        })?;
        let mut target_guard = target_guard.ok_or_else(|| {
            warn!(transfer_id = %transfer_id, stale = true, "Target vanished before lock");
            TransferError::TargetAccountNotFound(target_id.to_string())
        })?;

        let available = source_guard.account().balance();
        if available < amount {
            warn!(
                transfer_id = %transfer_id,
                stale = true,
                snapshot = %source.balance(),
                available = %available,
                "Funds drained between snapshot and lock"
            );
            return Err(TransferError::InsufficientFunds {
                available,
                required: amount,
            });
        }
        // Both sides must land exactly; a rounded balance would leak money.
        if money::checked_add_exact(available, -amount).is_none() {
            return Err(TransferError::Overflow(source_id.to_string()));
        }
        if money::checked_add_exact(target_guard.account().balance(), amount).is_none() {
            return Err(TransferError::Overflow(target_id.to_string()));
        }

        Self::commit(&mut source_guard, &mut target_guard, amount)
        // Guards drop here, releasing both locks.
    }

    /// Apply debit and credit under both held locks. Nothing here can suspend.
    fn commit(
        source: &mut S::Guard,
        target: &mut S::Guard,
        amount: Decimal,
    ) -> Result<(), TransferError> {
        source.apply_delta(-amount)?;
        if let Err(e) = target.apply_delta(amount) {
            // Pre-checked above; undo the debit so neither side moves.
            if let Err(undo) = source.apply_delta(amount) {
                error!(error = %undo, "Failed to restore source after credit failure");
            }
            return Err(e.into());
        }
        Ok(())
    }
}
