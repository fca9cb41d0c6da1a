// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Withdrawal endpoints (INTMAX → L1).

use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use super::extract::{missing, non_empty, present, JsonBody};
use crate::{
    auth::CurrentSession,
    error::{ApiError, ErrorBody},
    value::WalletValue,
    wallet::WithdrawParams,
};

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct WithdrawRequest {
    #[schema(value_type = Option<Object>)]
    pub amount: Option<Value>,
    /// Token descriptor as returned by `/tokens`
    #[schema(value_type = Option<Object>)]
    pub token: Option<Value>,
    /// L1 recipient address
    pub address: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct WithdrawResponse {
    /// Fee quoted before submitting
    #[schema(value_type = Object)]
    pub fee: WalletValue,
    #[schema(value_type = Object)]
    pub tx: WalletValue,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PendingWithdrawalsResponse {
    #[schema(value_type = Object)]
    pub pending: WalletValue,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClaimWithdrawalsRequest {
    #[schema(value_type = Option<Vec<Object>>)]
    pub withdrawal_ids: Option<Value>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ClaimWithdrawalsResponse {
    #[schema(value_type = Object)]
    pub result: WalletValue,
}

/// Quote the withdrawal fee, then submit the withdrawal.
///
/// If the fee quote fails nothing is submitted.
#[utoipa::path(
    post,
    path = "/withdraw",
    request_body = WithdrawRequest,
    tag = "Withdrawals",
    security(("session_id" = [])),
    responses(
        (status = 200, description = "Withdrawal submitted", body = WithdrawResponse),
        (status = 400, description = "Missing amount, token or address", body = ErrorBody),
        (status = 401, description = "Invalid or missing session", body = ErrorBody),
        (status = 500, description = "Wallet call failed", body = ErrorBody)
    )
)]
pub async fn withdraw(
    CurrentSession(session): CurrentSession,
    JsonBody(request): JsonBody<WithdrawRequest>,
) -> Result<Json<WithdrawResponse>, ApiError> {
    let amount = request.amount.filter(present);
    let token = request.token.filter(present);
    let address = non_empty(request.address);
    let fields = [
        ("amount", amount.is_some()),
        ("token", token.is_some()),
        ("address", address.is_some()),
    ];
    let ((amount, token), address) = amount
        .zip(token)
        .zip(address)
        .ok_or_else(|| missing(&fields))?;

    let fee = session
        .client
        .get_withdrawal_fee(&token)
        .await
        .map_err(|e| ApiError::downstream("get_withdrawal_fee", e))?;

    let tx = session
        .client
        .withdraw(WithdrawParams {
            amount,
            token,
            address,
        })
        .await
        .map_err(|e| ApiError::downstream("withdraw", e))?;

    tracing::info!(session_id = %session.session_id, "withdrawal submitted");
    Ok(Json(WithdrawResponse { fee, tx }))
}

/// List withdrawals waiting to be claimed on L1.
#[utoipa::path(
    get,
    path = "/pending-withdrawals",
    tag = "Withdrawals",
    security(("session_id" = [])),
    responses(
        (status = 200, description = "Pending withdrawals", body = PendingWithdrawalsResponse),
        (status = 401, description = "Invalid or missing session", body = ErrorBody),
        (status = 500, description = "Wallet call failed", body = ErrorBody)
    )
)]
pub async fn pending_withdrawals(
    CurrentSession(session): CurrentSession,
) -> Result<Json<PendingWithdrawalsResponse>, ApiError> {
    let pending = session
        .client
        .fetch_pending_withdrawals()
        .await
        .map_err(|e| ApiError::downstream("fetch_pending_withdrawals", e))?;

    Ok(Json(PendingWithdrawalsResponse { pending }))
}

/// Claim finalized withdrawals on L1.
#[utoipa::path(
    post,
    path = "/claim-withdrawals",
    request_body = ClaimWithdrawalsRequest,
    tag = "Withdrawals",
    security(("session_id" = [])),
    responses(
        (status = 200, description = "Claim submitted", body = ClaimWithdrawalsResponse),
        (status = 400, description = "withdrawalIds is not an array", body = ErrorBody),
        (status = 401, description = "Invalid or missing session", body = ErrorBody),
        (status = 500, description = "Wallet call failed", body = ErrorBody)
    )
)]
pub async fn claim_withdrawals(
    CurrentSession(session): CurrentSession,
    JsonBody(request): JsonBody<ClaimWithdrawalsRequest>,
) -> Result<Json<ClaimWithdrawalsResponse>, ApiError> {
    let Some(Value::Array(withdrawal_ids)) = request.withdrawal_ids else {
        return Err(ApiError::bad_request("withdrawalIds must be an array"));
    };

    let result = session
        .client
        .claim_withdrawal(withdrawal_ids)
        .await
        .map_err(|e| ApiError::downstream("claim_withdrawal", e))?;

    Ok(Json(ClaimWithdrawalsResponse { result }))
}
