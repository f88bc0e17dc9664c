//! Account record held by the directory

use rust_decimal::Decimal;

use super::error::StoreError;

/// Opaque account identifier (e.g. `ACC-001`)
pub type AccountId = String;

/// A named holder of a non-negative balance in a single currency.
///
/// # Invariants (ENFORCED by private fields):
/// - `balance >= 0` after every completed mutation
/// - `id`, `owner` and `currency` never change after construction
/// - Only the directory mutates `balance` (via `apply_delta`)
///
/// Values handed out by the directory are snapshots; mutating a clone never
/// affects the stored record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    id: AccountId,
    owner: String,
    balance: Decimal,
    currency: String,
}

impl Account {
    /// Create an account, rejecting a negative opening balance.
    pub fn new(
        id: impl Into<AccountId>,
        owner: impl Into<String>,
        balance: Decimal,
        currency: impl Into<String>,
    ) -> Result<Self, StoreError> {
        let id = id.into();
        if balance < Decimal::ZERO {
            return Err(StoreError::NegativeBalance(id));
        }
        Ok(Self {
            id,
            owner: owner.into(),
            balance,
            currency: currency.into(),
        })
    }

    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[inline]
    pub fn owner(&self) -> &str {
        &self.owner
    }

    #[inline]
    pub fn balance(&self) -> Decimal {
        self.balance
    }

    #[inline]
    pub fn currency(&self) -> &str {
        &self.currency
    }

    /// Add a signed delta to the balance.
    ///
    /// Leaves the balance untouched and returns an error if the result would
    /// be negative or cannot be represented exactly. Returns the new balance.
    pub(crate) fn apply_delta(&mut self, delta: Decimal) -> Result<Decimal, StoreError> {
        let next = crate::money::checked_add_exact(self.balance, delta)
            .ok_or_else(|| StoreError::Overflow(self.id.clone()))?;
        if next < Decimal::ZERO {
            return Err(StoreError::WouldBeNegative {
                id: self.id.clone(),
                balance: self.balance,
                delta,
            });
        }
        self.balance = next;
        Ok(next)
    }
}

/// The three accounts every fresh in-memory directory starts with.
pub fn seed_accounts() -> Vec<Account> {
    vec![
        Account {
            id: "ACC-001".to_string(),
            owner: "John Doe".to_string(),
            balance: Decimal::from(1000),
            currency: "USD".to_string(),
        },
        Account {
            id: "ACC-002".to_string(),
            owner: "Jane Smith".to_string(),
            balance: Decimal::from(500),
            currency: "USD".to_string(),
        },
        Account {
            id: "ACC-003".to_string(),
            owner: "Bob Johnson".to_string(),
            balance: Decimal::ZERO,
            currency: "USD".to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn account(balance: Decimal) -> Account {
        Account::new("ACC-T", "Tester", balance, "USD").unwrap()
    }

    #[test]
    fn test_new_rejects_negative_balance() {
        let err = Account::new("ACC-X", "X", dec!(-0.01), "USD").unwrap_err();
        assert_eq!(err, StoreError::NegativeBalance("ACC-X".into()));
    }

    #[test]
    fn test_new_accepts_zero() {
        assert_eq!(account(Decimal::ZERO).balance(), Decimal::ZERO);
    }

    #[test]
    fn test_apply_delta_credit_and_debit() {
        let mut acc = account(dec!(100));
        assert_eq!(acc.apply_delta(dec!(50.25)).unwrap(), dec!(150.25));
        assert_eq!(acc.apply_delta(dec!(-150.25)).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_apply_delta_rejects_negative_result() {
        let mut acc = account(dec!(10));
        let err = acc.apply_delta(dec!(-10.01)).unwrap_err();
        assert!(matches!(err, StoreError::WouldBeNegative { .. }));
        assert_eq!(acc.balance(), dec!(10), "balance must be untouched");
    }

    #[test]
    fn test_apply_delta_overflow() {
        let mut acc = account(Decimal::MAX);
        let err = acc.apply_delta(Decimal::ONE).unwrap_err();
        assert_eq!(err, StoreError::Overflow("ACC-T".into()));
        assert_eq!(acc.balance(), Decimal::MAX);
    }

    #[test]
    fn test_apply_delta_rejects_rounded_result() {
        let big = Decimal::from_str_exact("1000000000000000000000000000").unwrap();
        let mut acc = account(big);
        let err = acc.apply_delta(dec!(0.01)).unwrap_err();
        assert_eq!(err, StoreError::Overflow("ACC-T".into()));
        assert_eq!(acc.balance(), big);
    }

    #[test]
    fn test_seed_accounts() {
        let seeds = seed_accounts();
        assert_eq!(seeds.len(), 3);
        assert_eq!(seeds[0].id(), "ACC-001");
        assert_eq!(seeds[0].balance(), dec!(1000));
        assert_eq!(seeds[1].owner(), "Jane Smith");
        assert_eq!(seeds[2].balance(), Decimal::ZERO);
        assert!(seeds.iter().all(|a| a.currency() == "USD"));
    }
}
