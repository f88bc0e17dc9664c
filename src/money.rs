//! Money Conversion Module
//!
//! Conversion between client-facing strings and the internal
//! `rust_decimal::Decimal` representation. All amounts entering through the
//! gateway MUST go through this module.
//!
//! ## Design Principles
//! 1. Never a binary float: text is parsed straight into `Decimal`
//! 2. Explicit Error Handling: no silent rounding or truncation
//! 3. Sign is kept, so the transfer rules (not the parser) reject `<= 0`
//!
//! ## Usage
//! ```rust
//! use account_transfer::money::{format_amount, parse_amount};
//!
//! let amount = parse_amount("250.50").unwrap();
//! assert_eq!(format_amount(amount), "250.5");
//! ```

use rust_decimal::Decimal;
use thiserror::Error;

/// Most fractional digits a `Decimal` can hold
pub const MAX_SCALE: u32 = 28;

/// Most integer digits accepted before the value is treated as overflow
const MAX_WHOLE_DIGITS: usize = 28;

// ============================================================================
// Error Types
// ============================================================================

/// Money conversion errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MoneyError {
    #[error("Precision overflow: provided {provided} decimals, max allowed {max}")]
    PrecisionOverflow { provided: u32, max: u32 },

    #[error("Amount too large, would overflow")]
    Overflow,

    #[error("Invalid format: {0}")]
    InvalidFormat(String),
}

// ============================================================================
// Parse: Client → Internal (String → Decimal)
// ============================================================================

/// Convert a client amount string to `Decimal`
///
/// Accepts `123`, `123.45`, `-5` (sign is preserved). Rejects exponents,
/// `.5`, `5.`, stray characters and more than [`MAX_SCALE`] decimals.
///
/// # Errors
/// * `PrecisionOverflow` - more fractional digits than `Decimal` can hold
/// * `Overflow` - integer part too large
/// * `InvalidFormat` - anything that is not a plain decimal number
pub fn parse_amount(amount_str: &str) -> Result<Decimal, MoneyError> {
    let amount_str = amount_str.trim();
    if amount_str.is_empty() {
        return Err(MoneyError::InvalidFormat("empty string".into()));
    }

    let unsigned = amount_str.strip_prefix('-').unwrap_or(amount_str);

    let parts: Vec<&str> = unsigned.split('.').collect();
    let (whole, frac) = match parts.len() {
        1 => (parts[0], ""),
        2 => {
            // Both sides of the dot must be present: no ".5" or "5."
            if parts[0].is_empty() {
                return Err(MoneyError::InvalidFormat(
                    "missing leading zero (e.g., use 0.5 instead of .5)".into(),
                ));
            }
            if parts[1].is_empty() {
                return Err(MoneyError::InvalidFormat(
                    "missing fractional part (e.g., use 5.0 instead of 5.)".into(),
                ));
            }
            (parts[0], parts[1])
        }
        _ => return Err(MoneyError::InvalidFormat("multiple decimal points".into())),
    };

    if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
        return Err(MoneyError::InvalidFormat(format!(
            "invalid character in whole part: {}",
            whole
        )));
    }
    if !frac.bytes().all(|b| b.is_ascii_digit()) {
        return Err(MoneyError::InvalidFormat(format!(
            "invalid character in fractional part: {}",
            frac
        )));
    }

    // Precision validation: REJECT if too many decimals (no silent rounding!)
    if frac.len() > MAX_SCALE as usize {
        return Err(MoneyError::PrecisionOverflow {
            provided: frac.len() as u32,
            max: MAX_SCALE,
        });
    }

    if whole.trim_start_matches('0').len() > MAX_WHOLE_DIGITS {
        return Err(MoneyError::Overflow);
    }

    Decimal::from_str_exact(amount_str).map_err(|e| match e {
        rust_decimal::Error::ExceedsMaximumPossibleValue
        | rust_decimal::Error::LessThanMinimumPossibleValue => MoneyError::Overflow,
        other => MoneyError::InvalidFormat(other.to_string()),
    })
}

// ============================================================================
// Format: Internal → Client (Decimal → String)
// ============================================================================

/// Render an amount without trailing zeros (`750.00` → `750`)
pub fn format_amount(value: Decimal) -> String {
    value.normalize().to_string()
}

// ============================================================================
// Arithmetic
// ============================================================================

/// Add two amounts, or `None` if the exact sum does not fit in a `Decimal`.
///
/// `Decimal::checked_add` only fails past the 96-bit range; below that it
/// drops fractional digits to make the sum fit. Such a rounded sum is
/// rejected here.
pub fn checked_add_exact(a: Decimal, b: Decimal) -> Option<Decimal> {
    let sum = a.checked_add(b)?;
    match sum.checked_sub(a) {
        Some(back) if back == b => Some(sum),
        _ => None,
    }
}
