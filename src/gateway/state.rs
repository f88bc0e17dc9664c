use std::sync::Arc;
use std::time::Duration;

use crate::account::InMemoryAccountStore;
use crate::transfer::TransferEngine;

/// Shared gateway state
#[derive(Clone)]
pub struct AppState {
    /// Transfer engine; owns the account directory
    pub engine: Arc<TransferEngine<InMemoryAccountStore>>,
    /// Deadline applied to every transfer request
    pub transfer_timeout: Duration,
}

impl AppState {
    pub fn new(engine: Arc<TransferEngine<InMemoryAccountStore>>, transfer_timeout: Duration) -> Self {
        Self {
            engine,
            transfer_timeout,
        }
    }

    /// Read-only view of the directory
    pub fn accounts(&self) -> &Arc<InMemoryAccountStore> {
        self.engine.store()
    }
}
