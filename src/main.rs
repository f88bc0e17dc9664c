//! Account Transfer Service
//!
//! ```text
//! ┌──────────┐    ┌──────────┐    ┌──────────┐    ┌──────────┐
//! │  Config  │───▶│ Accounts │───▶│ Transfer │───▶│ Gateway  │
//! │  (YAML)  │    │(in-mem)  │    │  Engine  │    │  (HTTP)  │
//! └──────────┘    └──────────┘    └──────────┘    └──────────┘
//! ```
//!
//! Usage: `account_transfer [--env dev|prod] [--port N]`

use std::sync::Arc;

use anyhow::Context;

use account_transfer::account::InMemoryAccountStore;
use account_transfer::config::AppConfig;
use account_transfer::gateway::{self, state::AppState};
use account_transfer::logging::init_logging;
use account_transfer::transfer::TransferEngine;

fn get_env() -> String {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if (args[i] == "--env" || args[i] == "-e") && i + 1 < args.len() {
            return args[i + 1].clone();
        }
    }
    "dev".to_string()
}

/// Get port override from command line (--port argument)
fn get_port_override() -> Option<u16> {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if args[i] == "--port" && i + 1 < args.len() {
            return args[i + 1].parse().ok();
        }
    }
    None
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env = get_env();
    let mut app_config = AppConfig::load(&env)?;
    if let Some(port) = get_port_override() {
        app_config.gateway.port = port;
    }
    let _log_guard = init_logging(&app_config);

    tracing::info!(
        version = env!("GIT_HASH"),
        "Starting Account Transfer Service in {} mode",
        env
    );

    let accounts = app_config.opening_accounts()?;
    let store = InMemoryAccountStore::with_accounts(accounts)
        .context("Failed to build account directory")?;
    tracing::info!(accounts = store.len(), "Account directory loaded");

    let engine = Arc::new(TransferEngine::new(Arc::new(store)));
    let state = Arc::new(AppState::new(engine, app_config.transfer.timeout()));

    gateway::run_server(&app_config.gateway, state).await
}
