//! Transfer handler

use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};

use super::super::state::AppState;
use super::super::types::{
    ApiError, ApiResponse, ApiResult, TransferApiData, TransferApiRequest, error_codes,
    transfer_error_code,
};

/// Execute a transfer between two accounts
///
/// POST /api/v1/transfers
///
/// The body always carries the transfer outcome (id, status, message,
/// timestamp). Rule failures answer 422, system failures 5xx; only a
/// malformed request (bad JSON, unparseable amount) answers 400 without data.
#[utoipa::path(
    post,
    path = "/api/v1/transfers",
    request_body(content = TransferApiRequest, description = "Source, target, amount, optional concept", content_type = "application/json"),
    responses(
        (status = 200, description = "Transfer completed", body = TransferApiData, content_type = "application/json"),
        (status = 400, description = "Malformed request"),
        (status = 422, description = "Business rule violated", body = TransferApiData),
        (status = 500, description = "Balance arithmetic overflow", body = TransferApiData),
        (status = 503, description = "Directory unavailable", body = TransferApiData),
        (status = 504, description = "Deadline exceeded before commit", body = TransferApiData)
    ),
    tag = "Transfer"
)]
pub async fn create_transfer(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<TransferApiRequest>, JsonRejection>,
) -> ApiResult<TransferApiData> {
    let Json(req) = payload.map_err(|e| ApiError::bad_request(e.body_text()))?;

    let request = req.into_request().map_err(|e| {
        tracing::warn!("Rejected transfer amount: {}", e);
        ApiError::new(
            StatusCode::BAD_REQUEST,
            error_codes::INVALID_AMOUNT,
            format!("Invalid amount: {}", e),
        )
    })?;

    let result = state
        .engine
        .execute_within(request, state.transfer_timeout)
        .await;

    let data = TransferApiData::from(&result);
    let (status, code) = match &result.error {
        None => (StatusCode::OK, error_codes::SUCCESS),
        Some(e) => (
            StatusCode::from_u16(e.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            transfer_error_code(e),
        ),
    };

    Ok((
        status,
        Json(ApiResponse {
            code,
            msg: result.message,
            data: Some(data),
        }),
    ))
}
