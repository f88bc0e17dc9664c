//! Account Directory seam
//!
//! The transfer engine only ever talks to accounts through [`AccountStore`].
//! The in-memory directory is one implementation; a durable store (WAL or
//! database backed) can be dropped in without touching the engine.

use async_trait::async_trait;
use rust_decimal::Decimal;

use super::error::StoreError;
use super::models::Account;

/// Exclusive hold on a single account.
///
/// While a guard is alive no other mutation of that account can run. The
/// lock is released when the guard is dropped.
pub trait AccountGuard: Send {
    /// Current state of the locked account
    fn account(&self) -> &Account;

    /// Same contract as [`AccountStore::apply_delta`], applied under the held lock
    fn apply_delta(&mut self, delta: Decimal) -> Result<Decimal, StoreError>;
}

/// Source of truth for account existence and balance.
///
/// # Concurrency contract
/// - `apply_delta` on one id is linearizable with every other mutation of that id
/// - `get` observes either the pre- or the post-state of a mutation, never a partial write
/// - Locks are async-aware: implementations may suspend on I/O while holding them
#[async_trait]
pub trait AccountStore: Send + Sync + 'static {
    type Guard: AccountGuard + 'static;

    /// Snapshot of an account (never a live reference)
    async fn get(&self, id: &str) -> Result<Option<Account>, StoreError>;

    async fn exists(&self, id: &str) -> Result<bool, StoreError>;

    /// Atomically add a signed delta to an account balance.
    ///
    /// Debits pass a negative delta, credits a positive one. The stored balance
    /// is left untouched when the result would be negative.
    ///
    /// # Errors
    /// * `AccountNotFound` - no such account
    /// * `WouldBeNegative` - result below zero
    /// * `Overflow` - result outside the decimal range
    async fn apply_delta(&self, id: &str, delta: Decimal) -> Result<Decimal, StoreError>;

    /// Every account exactly once
    async fn list_all(&self) -> Result<Vec<Account>, StoreError>;

    /// Acquire the exclusive lock of one account. `None` if it does not exist.
    async fn lock(&self, id: &str) -> Result<Option<Self::Guard>, StoreError>;
}
