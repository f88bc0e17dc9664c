//! In-memory Account Directory
//!
//! One `tokio::sync::Mutex` per account, indexed by a `DashMap`. The map
//! itself is only touched to find an account's slot; balances are read and
//! written exclusively under the slot's lock.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use rust_decimal::Decimal;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::debug;

use super::error::StoreError;
use super::models::{Account, AccountId, seed_accounts};
use super::store::{AccountGuard, AccountStore};

type Slot = Arc<Mutex<Account>>;

/// Owned lock on one in-memory account
pub struct MemoryAccountGuard(OwnedMutexGuard<Account>);

impl AccountGuard for MemoryAccountGuard {
    fn account(&self) -> &Account {
        &self.0
    }

    fn apply_delta(&mut self, delta: Decimal) -> Result<Decimal, StoreError> {
        self.0.apply_delta(delta)
    }
}

/// Account directory kept entirely in process memory
#[derive(Default)]
pub struct InMemoryAccountStore {
    accounts: DashMap<AccountId, Slot>,
}

impl InMemoryAccountStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Directory pre-populated with ACC-001, ACC-002 and ACC-003
    pub fn seeded() -> Self {
        let store = Self::new();
        for account in seed_accounts() {
            store
                .accounts
                .insert(account.id().to_string(), Arc::new(Mutex::new(account)));
        }
        store
    }

    /// Build a directory from a list of accounts. Duplicate ids are rejected.
    pub fn with_accounts(accounts: impl IntoIterator<Item = Account>) -> Result<Self, StoreError> {
        let store = Self::new();
        for account in accounts {
            store.insert(account)?;
        }
        Ok(store)
    }

    /// Register a new account
    pub fn insert(&self, account: Account) -> Result<(), StoreError> {
        match self.accounts.entry(account.id().to_string()) {
            Entry::Occupied(e) => Err(StoreError::DuplicateAccount(e.key().clone())),
            Entry::Vacant(e) => {
                debug!(account_id = %account.id(), balance = %account.balance(), "Account registered");
                e.insert(Arc::new(Mutex::new(account)));
                Ok(())
            }
        }
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    // The shard guard is dropped before the caller awaits the account lock.
    fn slot(&self, id: &str) -> Option<Slot> {
        self.accounts.get(id).map(|entry| Arc::clone(entry.value()))
    }
}

#[async_trait]
impl AccountStore for InMemoryAccountStore {
    type Guard = MemoryAccountGuard;

    async fn get(&self, id: &str) -> Result<Option<Account>, StoreError> {
        let Some(slot) = self.slot(id) else {
            return Ok(None);
        };
        let snapshot = slot.lock().await.clone();
        Ok(Some(snapshot))
    }

    async fn exists(&self, id: &str) -> Result<bool, StoreError> {
        Ok(self.accounts.contains_key(id))
    }

    async fn apply_delta(&self, id: &str, delta: Decimal) -> Result<Decimal, StoreError> {
        let slot = self
            .slot(id)
            .ok_or_else(|| StoreError::AccountNotFound(id.to_string()))?;
        let mut account = slot.lock().await;
        account.apply_delta(delta)
    }

    async fn list_all(&self) -> Result<Vec<Account>, StoreError> {
        let slots: Vec<Slot> = self
            .accounts
            .iter()
            .map(|entry| Arc::clone(entry.value()))
            .collect();

        let mut accounts = Vec::with_capacity(slots.len());
        for slot in slots {
            accounts.push(slot.lock().await.clone());
        }
        accounts.sort_by(|a, b| a.id().cmp(b.id()));
        Ok(accounts)
    }

    async fn lock(&self, id: &str) -> Result<Option<Self::Guard>, StoreError> {
        let Some(slot) = self.slot(id) else {
            return Ok(None);
        };
        Ok(Some(MemoryAccountGuard(slot.lock_owned().await)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_seeded_directory() {
        let store = InMemoryAccountStore::seeded();
        assert_eq!(store.len(), 3);

        let acc = store.get("ACC-001").await.unwrap().unwrap();
        assert_eq!(acc.owner(), "John Doe");
        assert_eq!(acc.balance(), dec!(1000));

        assert!(store.exists("ACC-003").await.unwrap());
        assert!(!store.exists("ACC-999").await.unwrap());
        assert!(store.get("ACC-999").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_insert_rejects_duplicate() {
        let store = InMemoryAccountStore::seeded();
        let dup = Account::new("ACC-001", "Someone", dec!(1), "USD").unwrap();
        assert_eq!(
            store.insert(dup),
            Err(StoreError::DuplicateAccount("ACC-001".into()))
        );
        assert_eq!(
            store.get("ACC-001").await.unwrap().unwrap().owner(),
            "John Doe"
        );
    }

    #[test]
    fn test_with_accounts_rejects_duplicate() {
        let a = Account::new("A", "a", dec!(1), "USD").unwrap();
        let result = InMemoryAccountStore::with_accounts([a.clone(), a]);
        assert!(matches!(result, Err(StoreError::DuplicateAccount(_))));
    }

    #[tokio::test]
    async fn test_get_returns_snapshot() {
        let store = InMemoryAccountStore::seeded();
        let before = store.get("ACC-002").await.unwrap().unwrap();
        store.apply_delta("ACC-002", dec!(25)).await.unwrap();
        assert_eq!(before.balance(), dec!(500));
        assert_eq!(
            store.get("ACC-002").await.unwrap().unwrap().balance(),
            dec!(525)
        );
    }

    #[tokio::test]
    async fn test_apply_delta_outcomes() {
        let store = InMemoryAccountStore::seeded();

        assert_eq!(
            store.apply_delta("ACC-002", dec!(-500)).await.unwrap(),
            Decimal::ZERO
        );
        let err = store.apply_delta("ACC-002", dec!(-0.01)).await.unwrap_err();
        assert!(matches!(err, StoreError::WouldBeNegative { .. }));
        assert_eq!(
            store.apply_delta("ACC-999", dec!(1)).await.unwrap_err(),
            StoreError::AccountNotFound("ACC-999".into())
        );
        assert_eq!(
            store.get("ACC-002").await.unwrap().unwrap().balance(),
            Decimal::ZERO
        );
    }

    #[tokio::test]
    async fn test_list_all_each_account_once() {
        let store = InMemoryAccountStore::seeded();
        let ids: Vec<String> = store
            .list_all()
            .await
            .unwrap()
            .iter()
            .map(|a| a.id().to_string())
            .collect();
        assert_eq!(ids, vec!["ACC-001", "ACC-002", "ACC-003"]);
    }

    #[tokio::test]
    async fn test_lock_guard_mutates_and_releases() {
        let store = InMemoryAccountStore::seeded();
        {
            let mut guard = store.lock("ACC-001").await.unwrap().unwrap();
            assert_eq!(guard.apply_delta(dec!(-1)).unwrap(), dec!(999));
            assert_eq!(guard.account().balance(), dec!(999));
        }
        assert!(store.lock("ACC-999").await.unwrap().is_none());
        assert_eq!(
            store.get("ACC-001").await.unwrap().unwrap().balance(),
            dec!(999)
        );
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_debits_never_go_negative() {
        let store = Arc::new(InMemoryAccountStore::seeded());

        let handles: Vec<_> = (0..100)
            .map(|_| {
                let store = store.clone();
                tokio::spawn(async move { store.apply_delta("ACC-002", dec!(-10)).await })
            })
            .collect();

        let mut ok = 0;
        for handle in handles {
            if handle.await.unwrap().is_ok() {
                ok += 1;
            }
        }

        assert_eq!(ok, 50);
        assert_eq!(
            store.get("ACC-002").await.unwrap().unwrap().balance(),
            Decimal::ZERO
        );
    }
}
