//! Account directory queries

use std::sync::Arc;

use axum::extract::{Path, State};

use super::super::state::AppState;
use super::super::types::{AccountApiData, ApiError, ApiResult, ok};
use crate::account::{AccountStore, StoreError};

/// Get the balance of one account
///
/// GET /api/v1/accounts/{account_id}/balance
#[utoipa::path(
    get,
    path = "/api/v1/accounts/{account_id}/balance",
    params(
        ("account_id" = String, Path, description = "Account identifier, e.g. ACC-001")
    ),
    responses(
        (status = 200, description = "Account found", body = AccountApiData, content_type = "application/json"),
        (status = 400, description = "Empty account id"),
        (status = 404, description = "Account not found"),
        (status = 503, description = "Directory unavailable")
    ),
    tag = "Account"
)]
pub async fn get_account_balance(
    State(state): State<Arc<AppState>>,
    Path(account_id): Path<String>,
) -> ApiResult<AccountApiData> {
    if account_id.trim().is_empty() {
        return ApiError::bad_request("Account ID cannot be empty.").into_err();
    }

    match state.accounts().get(&account_id).await {
        Ok(Some(account)) => ok(AccountApiData::from(account)),
        Ok(None) => ApiError::not_found(format!("Account {} not found.", account_id)).into_err(),
        Err(e) => {
            tracing::error!(account_id = %account_id, "Balance lookup failed: {}", e);
            ApiError::service_unavailable(e.to_string()).into_err()
        }
    }
}

/// List every account, ordered by id
///
/// GET /api/v1/accounts
#[utoipa::path(
    get,
    path = "/api/v1/accounts",
    responses(
        (status = 200, description = "All accounts", body = Vec<AccountApiData>, content_type = "application/json"),
        (status = 503, description = "Directory unavailable")
    ),
    tag = "Account"
)]
pub async fn list_accounts(State(state): State<Arc<AppState>>) -> ApiResult<Vec<AccountApiData>> {
    let accounts = state
        .accounts()
        .list_all()
        .await
        .map_err(|e: StoreError| ApiError::service_unavailable(e.to_string()))?;

    ok(accounts.into_iter().map(AccountApiData::from).collect())
}
