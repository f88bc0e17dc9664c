//! API boundary types
//!
//! - `ApiResponse<T>`: unified response wrapper
//! - `ApiError` / `ApiResult`: handler error plumbing
//! - Request/response DTOs for accounts and transfers
//! - `error_codes`: numeric codes carried in `ApiResponse::code`

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::account::Account;
use crate::money::{self, MoneyError};
use crate::transfer::{TransferError, TransferRequest, TransferResult, TransferStatus};

// ============================================================================
// Unified API Response Format
// ============================================================================

/// Unified API response wrapper
///
/// - code: 0 = success, non-zero = error code
/// - msg: short message description
/// - data: payload (always present for transfers, even when they fail)
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Response code: 0 for success, non-zero for errors
    #[schema(example = 0)]
    pub code: i32,
    /// Response message
    #[schema(example = "ok")]
    pub msg: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Create success response
    pub fn success(data: T) -> Self {
        Self {
            code: error_codes::SUCCESS,
            msg: "ok".to_string(),
            data: Some(data),
        }
    }

    /// Create error response
    pub fn error(code: i32, msg: impl Into<String>) -> ApiResponse<()> {
        ApiResponse {
            code,
            msg: msg.into(),
            data: None,
        }
    }
}

pub type ApiResult<T> = Result<(StatusCode, Json<ApiResponse<T>>), ApiError>;

/// Wrap data in a 200 response
pub fn ok<T>(data: T) -> ApiResult<T> {
    Ok((StatusCode::OK, Json(ApiResponse::success(data))))
}

/// Handler error rendered as `ApiResponse<()>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub code: i32,
    pub msg: String,
}

impl ApiError {
    pub fn new(status: StatusCode, code: i32, msg: impl Into<String>) -> Self {
        Self {
            status,
            code,
            msg: msg.into(),
        }
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, error_codes::INVALID_PARAMETER, msg)
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, error_codes::ACCOUNT_NOT_FOUND, msg)
    }

    pub fn service_unavailable(msg: impl Into<String>) -> Self {
        Self::new(
            StatusCode::SERVICE_UNAVAILABLE,
            error_codes::SERVICE_UNAVAILABLE,
            msg,
        )
    }

    pub fn into_err<T>(self) -> ApiResult<T> {
        Err(self)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ApiResponse::<()>::error(self.code, self.msg))).into_response()
    }
}

// ============================================================================
// Error Codes
// ============================================================================

/// Standard API error codes
pub mod error_codes {
    pub const SUCCESS: i32 = 0;

    // Client errors (1xxx)
    pub const INVALID_PARAMETER: i32 = 1001;
    pub const INVALID_AMOUNT: i32 = 1002;
    pub const SAME_ACCOUNT: i32 = 1003;

    // Balance errors (2xxx)
    pub const INSUFFICIENT_FUNDS: i32 = 2001;

    // Resource errors (4xxx)
    pub const ACCOUNT_NOT_FOUND: i32 = 4001;

    // Server errors (5xxx)
    pub const INTERNAL_ERROR: i32 = 5000;
    pub const SERVICE_UNAVAILABLE: i32 = 5001;
    pub const DEADLINE_EXCEEDED: i32 = 5004;
}

/// Numeric API code for a transfer failure
pub fn transfer_error_code(e: &TransferError) -> i32 {
    match e {
        TransferError::InvalidAmount => error_codes::INVALID_AMOUNT,
        TransferError::SameAccount => error_codes::SAME_ACCOUNT,
        TransferError::SourceAccountNotFound(_) | TransferError::TargetAccountNotFound(_) => {
            error_codes::ACCOUNT_NOT_FOUND
        }
        TransferError::InsufficientFunds { .. } => error_codes::INSUFFICIENT_FUNDS,
        TransferError::Overflow(_) => error_codes::INTERNAL_ERROR,
        TransferError::Unavailable(_) => error_codes::SERVICE_UNAVAILABLE,
        TransferError::DeadlineExceeded => error_codes::DEADLINE_EXCEEDED,
    }
}

// ============================================================================
// Account DTOs
// ============================================================================

/// Account balance as returned to clients
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccountApiData {
    #[schema(example = "ACC-001")]
    pub account_id: String,
    #[schema(example = "John Doe")]
    pub account_owner: String,
    /// Decimal string, trailing zeros removed
    #[schema(example = "1000")]
    pub balance: String,
    #[schema(example = "USD")]
    pub currency: String,
}

impl From<Account> for AccountApiData {
    fn from(account: Account) -> Self {
        Self {
            balance: money::format_amount(account.balance()),
            account_id: account.id().to_string(),
            account_owner: account.owner().to_string(),
            currency: account.currency().to_string(),
        }
    }
}

// ============================================================================
// Transfer DTOs
// ============================================================================

/// Amount as sent by clients: a decimal string, or a JSON integer
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AmountInput {
    Text(String),
    Number(serde_json::Number),
}

impl AmountInput {
    /// Fractional JSON numbers are rejected: serde_json has already turned
    /// them into `f64`, so the client's digits are gone.
    pub fn parse(&self) -> Result<Decimal, MoneyError> {
        match self {
            AmountInput::Text(s) => money::parse_amount(s),
            AmountInput::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(Decimal::from(i))
                } else if let Some(u) = n.as_u64() {
                    Ok(Decimal::from(u))
                } else {
                    Err(MoneyError::InvalidFormat(format!(
                        "fractional JSON number {} is not accepted, send the amount as a string",
                        n
                    )))
                }
            }
        }
    }
}

/// API request for executing a transfer
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransferApiRequest {
    #[schema(example = "ACC-001")]
    pub source_account_id: String,
    #[schema(example = "ACC-002")]
    pub target_account_id: String,
    /// Amount as a decimal string; plain JSON integers are also accepted
    #[schema(value_type = String, example = "250.00")]
    pub amount: AmountInput,
    /// Free-text memo
    #[serde(default)]
    pub concept: Option<String>,
}

impl TransferApiRequest {
    /// Convert to the engine request, parsing the amount
    pub fn into_request(self) -> Result<TransferRequest, MoneyError> {
        let amount = self.amount.parse()?;
        Ok(TransferRequest {
            source_account_id: self.source_account_id,
            target_account_id: self.target_account_id,
            amount,
            concept: self.concept,
        })
    }
}

/// Transfer outcome as returned to clients
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransferApiData {
    #[schema(example = "TRF-01HZX3Q8W6N4M2K9P7R5T3V1B0")]
    pub transfer_id: String,
    pub status: TransferStatus,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl From<&TransferResult> for TransferApiData {
    fn from(result: &TransferResult) -> Self {
        Self {
            transfer_id: result.transfer_id.to_string(),
            status: result.status,
            message: result.message.clone(),
            timestamp: result.timestamp,
        }
    }
}
