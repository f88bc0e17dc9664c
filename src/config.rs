use std::fs;
use std::time::Duration;

use anyhow::Context;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::account::{Account, seed_accounts};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub log_dir: String,
    pub log_file: String,
    pub use_json: bool,
    pub rotation: String,
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub transfer: TransferConfig,
    /// Opening accounts; the three seed accounts when omitted
    #[serde(default)]
    pub accounts: Option<Vec<AccountSeed>>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GatewayConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TransferConfig {
    /// Deadline for one transfer attempt, lock waits included
    pub timeout_ms: u64,
}

impl Default for TransferConfig {
    fn default() -> Self {
        Self { timeout_ms: 5000 }
    }
}

impl TransferConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// One opening account as written in the config file
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AccountSeed {
    pub id: String,
    pub owner: String,
    /// Decimal as text, e.g. "1000.00"
    pub balance: String,
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_currency() -> String {
    "USD".to_string()
}

impl AppConfig {
    pub fn load(env: &str) -> anyhow::Result<Self> {
        let config_path = format!("config/{}.yaml", env);
        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path))?;
        Self::from_yaml(&content).with_context(|| format!("Failed to parse {}", config_path))
    }

    pub fn from_yaml(content: &str) -> anyhow::Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Opening accounts for the in-memory directory
    pub fn opening_accounts(&self) -> anyhow::Result<Vec<Account>> {
        let Some(seeds) = &self.accounts else {
            return Ok(seed_accounts());
        };
        seeds
            .iter()
            .map(|seed| -> anyhow::Result<Account> {
                let balance: Decimal = crate::money::parse_amount(&seed.balance)
                    .with_context(|| format!("Invalid balance for account {}", seed.id))?;
                Ok(Account::new(&seed.id, &seed.owner, balance, &seed.currency)?)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const BASE: &str = r#"
log_level: info
log_dir: ./logs
log_file: account_transfer.log
use_json: false
rotation: daily
gateway:
  host: 127.0.0.1
  port: 8080
"#;

    #[test]
    fn test_defaults_when_sections_missing() {
        let config = AppConfig::from_yaml(BASE).unwrap();
        assert_eq!(config.gateway.port, 8080);
        assert_eq!(config.transfer.timeout(), Duration::from_millis(5000));

        let accounts = config.opening_accounts().unwrap();
        assert_eq!(accounts, seed_accounts());
    }

    #[test]
    fn test_custom_accounts() {
        let yaml = format!(
            "{}transfer:\n  timeout_ms: 250\naccounts:\n  - id: ACC-900\n    owner: Ops\n    balance: \"12.50\"\n    currency: EUR\n  - id: ACC-901\n    owner: Ops\n    balance: \"0\"\n",
            BASE
        );
        let config = AppConfig::from_yaml(&yaml).unwrap();
        assert_eq!(config.transfer.timeout_ms, 250);

        let accounts = config.opening_accounts().unwrap();
        assert_eq!(accounts.len(), 2);
        assert_eq!(accounts[0].balance(), dec!(12.50));
        assert_eq!(accounts[0].currency(), "EUR");
        assert_eq!(accounts[1].currency(), "USD");
    }

    #[test]
    fn test_negative_opening_balance_rejected() {
        let yaml = format!(
            "{}accounts:\n  - id: BAD\n    owner: X\n    balance: \"-1\"\n",
            BASE
        );
        let config = AppConfig::from_yaml(&yaml).unwrap();
        assert!(config.opening_accounts().is_err());
    }

    #[test]
    fn test_missing_required_field() {
        assert!(AppConfig::from_yaml("log_level: info\n").is_err());
    }
}
