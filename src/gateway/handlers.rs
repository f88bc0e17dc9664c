//! HTTP handlers
//!
//! Thin translation layer: parse the request, call the directory or the
//! transfer engine, map the outcome to a status code and `ApiResponse`.

pub mod account;
pub mod health;
pub mod transfer;

pub use account::{get_account_balance, list_accounts};
pub use health::{HealthResponse, health_check};
pub use transfer::create_transfer;
