//! Concurrency Tests for the Transfer Engine
//!
//! These tests drive many transfers in parallel on a multi-threaded runtime
//! against the in-memory directory and check the balance invariants.

#[cfg(test)]
mod integration_tests {
    use std::collections::HashSet;
    use std::sync::Arc;

    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    use crate::account::{Account, AccountStore, InMemoryAccountStore};
    use crate::transfer::engine::TransferEngine;
    use crate::transfer::error::TransferError;
    use crate::transfer::types::{TransferRequest, TransferResult};

    type Engine = TransferEngine<InMemoryAccountStore>;

    /// Helper to build an engine over a fixed set of accounts
    struct TestHarness {
        engine: Arc<Engine>,
    }

    impl TestHarness {
        fn new(accounts: &[(&str, Decimal)]) -> Self {
            let store = InMemoryAccountStore::with_accounts(
                accounts
                    .iter()
                    .map(|(id, balance)| Account::new(*id, "Test Owner", *balance, "USD").unwrap()),
            )
            .unwrap();
            Self {
                engine: Arc::new(TransferEngine::new(Arc::new(store))),
            }
        }

        async fn balance(&self, id: &str) -> Decimal {
            self.engine.store().get(id).await.unwrap().unwrap().balance()
        }

        async fn total(&self) -> Decimal {
            self.engine
                .store()
                .list_all()
                .await
                .unwrap()
                .iter()
                .map(|a| a.balance())
                .sum()
        }

        /// Fire all requests at once and collect every result
        async fn run_parallel(&self, requests: Vec<TransferRequest>) -> Vec<TransferResult> {
            let handles: Vec<_> = requests
                .into_iter()
                .map(|req| {
                    let engine = self.engine.clone();
                    tokio::spawn(async move { engine.execute(req).await })
                })
                .collect();

            futures::future::join_all(handles)
                .await
                .into_iter()
                .map(|r| r.expect("transfer task panicked"))
                .collect()
        }
    }

    // ========================================================================
    // Double-spend
    // ========================================================================

    /// N transfers of X from a source holding k*X: exactly k succeed
    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn test_concurrent_drain_exactly_k_successes() {
        let harness = TestHarness::new(&[("SRC", dec!(500)), ("DST", dec!(0))]);
        let n = 40;
        let k = 5;

        let requests = (0..n)
            .map(|_| TransferRequest::new("SRC", "DST", dec!(100)))
            .collect();
        let results = harness.run_parallel(requests).await;

        let successes = results.iter().filter(|r| r.is_success()).count();
        let insufficient = results
            .iter()
            .filter(|r| matches!(r.error, Some(TransferError::InsufficientFunds { .. })))
            .count();

        assert_eq!(successes, k);
        assert_eq!(insufficient, n - k);
        assert_eq!(harness.balance("SRC").await, Decimal::ZERO);
        assert_eq!(harness.balance("DST").await, dec!(500));
    }

    /// Amount that does not divide the balance evenly
    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn test_concurrent_drain_with_remainder() {
        let harness = TestHarness::new(&[("SRC", dec!(1000)), ("DST", dec!(0))]);

        let requests = (0..25)
            .map(|_| TransferRequest::new("SRC", "DST", dec!(300)))
            .collect();
        let results = harness.run_parallel(requests).await;

        assert_eq!(results.iter().filter(|r| r.is_success()).count(), 3);
        assert_eq!(harness.balance("SRC").await, dec!(100));
        assert_eq!(harness.balance("DST").await, dec!(900));
    }

    // ========================================================================
    // Deadlock avoidance
    // ========================================================================

    /// A→B and B→A interleaved must all finish and conserve the total
    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn test_opposite_directions_do_not_deadlock() {
        let harness = TestHarness::new(&[("ACC-A", dec!(1000)), ("ACC-B", dec!(1000))]);

        let requests = (0..200)
            .map(|i| {
                if i % 2 == 0 {
                    TransferRequest::new("ACC-A", "ACC-B", dec!(7))
                } else {
                    TransferRequest::new("ACC-B", "ACC-A", dec!(7))
                }
            })
            .collect();

        let results = tokio::time::timeout(
            std::time::Duration::from_secs(10),
            harness.run_parallel(requests),
        )
        .await
        .expect("transfers deadlocked");

        assert!(results.iter().all(|r| r.is_success()));
        // Equal number in each direction: balances return to start.
        assert_eq!(harness.balance("ACC-A").await, dec!(1000));
        assert_eq!(harness.balance("ACC-B").await, dec!(1000));
    }

    /// A→B, B→C, C→A running together cannot form a lock cycle
    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn test_ring_of_transfers_conserves_total() {
        let harness = TestHarness::new(&[
            ("A", dec!(50)),
            ("B", dec!(50)),
            ("C", dec!(50)),
        ]);

        let pairs = [("A", "B"), ("B", "C"), ("C", "A")];
        let requests = (0..300)
            .map(|i| {
                let (from, to) = pairs[i % 3];
                TransferRequest::new(from, to, dec!(3.5))
            })
            .collect();

        let results = tokio::time::timeout(
            std::time::Duration::from_secs(10),
            harness.run_parallel(requests),
        )
        .await
        .expect("transfers deadlocked");

        // Some may fail for funds depending on interleaving; none may corrupt state.
        for r in &results {
            assert!(r.is_success() || matches!(r.error, Some(TransferError::InsufficientFunds { .. })));
        }
        assert_eq!(harness.total().await, dec!(150));
        for id in ["A", "B", "C"] {
            assert!(harness.balance(id).await >= Decimal::ZERO);
        }
    }

    // ========================================================================
    // Independence and identity
    // ========================================================================

    /// Disjoint pairs proceed independently
    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn test_disjoint_pairs_independent() {
        let harness = TestHarness::new(&[
            ("P1", dec!(100)),
            ("Q1", dec!(0)),
            ("P2", dec!(100)),
            ("Q2", dec!(0)),
        ]);

        let mut requests = Vec::new();
        for _ in 0..10 {
            requests.push(TransferRequest::new("P1", "Q1", dec!(10)));
            requests.push(TransferRequest::new("P2", "Q2", dec!(5)));
        }
        let results = harness.run_parallel(requests).await;

        assert!(results.iter().all(|r| r.is_success()));
        assert_eq!(harness.balance("P1").await, dec!(0));
        assert_eq!(harness.balance("Q1").await, dec!(100));
        assert_eq!(harness.balance("P2").await, dec!(50));
        assert_eq!(harness.balance("Q2").await, dec!(50));
    }

    /// Concurrent identical requests still get unique transfer ids
    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn test_transfer_ids_unique_under_load() {
        let harness = TestHarness::new(&[("X", dec!(1000000)), ("Y", dec!(0))]);

        let requests = (0..500)
            .map(|_| TransferRequest::new("X", "Y", dec!(1)))
            .collect();
        let results = harness.run_parallel(requests).await;

        let ids: HashSet<String> = results.iter().map(|r| r.transfer_id.to_string()).collect();
        assert_eq!(ids.len(), 500);
        assert_eq!(harness.balance("Y").await, dec!(500));
    }

    /// Readers running alongside writers only ever see whole transfers
    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn test_readers_never_see_negative_or_partial() {
        let harness = TestHarness::new(&[("R1", dec!(100)), ("R2", dec!(100))]);
        let store = harness.engine.store().clone();

        let reader = tokio::spawn(async move {
            for _ in 0..500 {
                for account in store.list_all().await.unwrap() {
                    assert!(account.balance() >= Decimal::ZERO);
                }
                tokio::task::yield_now().await;
            }
        });

        let requests = (0..100)
            .map(|i| {
                if i % 3 == 0 {
                    TransferRequest::new("R2", "R1", dec!(11))
                } else {
                    TransferRequest::new("R1", "R2", dec!(9))
                }
            })
            .collect();
        harness.run_parallel(requests).await;
        reader.await.unwrap();

        assert_eq!(harness.total().await, dec!(200));
    }
}
