// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Deposit endpoints (L1 → INTMAX).

use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use super::extract::{missing, non_empty, present, JsonBody};
use crate::{
    auth::CurrentSession,
    error::{ApiError, ErrorBody},
    session::SessionContext,
    value::WalletValue,
    wallet::DepositParams,
};

/// Deposit or deposit-estimate request.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct DepositRequest {
    /// Amount to deposit
    #[schema(value_type = Option<Object>)]
    pub amount: Option<Value>,
    /// Token descriptor as returned by `/tokens`
    #[schema(value_type = Option<Object>)]
    pub token: Option<Value>,
    /// Recipient; defaults to the session's own address
    pub address: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct GasEstimateResponse {
    #[schema(value_type = Object)]
    pub gas: WalletValue,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DepositResponse {
    #[schema(value_type = Object)]
    pub result: WalletValue,
}

/// Validate a deposit request and fill in the default recipient.
fn deposit_params(
    session: &SessionContext,
    request: DepositRequest,
    is_gas_estimation: bool,
) -> Result<DepositParams, ApiError> {
    let amount = request.amount.filter(present);
    let token = request.token.filter(present);
    let fields = [("amount", amount.is_some()), ("token", token.is_some())];
    let (amount, token) = amount.zip(token).ok_or_else(|| missing(&fields))?;

    Ok(DepositParams {
        amount,
        token,
        address: non_empty(request.address).unwrap_or_else(|| session.address.clone()),
        is_gas_estimation,
    })
}

/// Estimate the L1 gas a deposit would cost.
#[utoipa::path(
    post,
    path = "/deposit/estimate",
    request_body = DepositRequest,
    tag = "Deposits",
    security(("session_id" = [])),
    responses(
        (status = 200, description = "Gas estimate", body = GasEstimateResponse),
        (status = 400, description = "Missing amount or token", body = ErrorBody),
        (status = 401, description = "Invalid or missing session", body = ErrorBody),
        (status = 500, description = "Wallet call failed", body = ErrorBody)
    )
)]
pub async fn estimate_deposit(
    CurrentSession(session): CurrentSession,
    JsonBody(request): JsonBody<DepositRequest>,
) -> Result<Json<GasEstimateResponse>, ApiError> {
    let params = deposit_params(&session, request, true)?;

    let gas = session
        .client
        .estimate_deposit_gas(params)
        .await
        .map_err(|e| ApiError::downstream("estimate_deposit_gas", e))?;

    Ok(Json(GasEstimateResponse { gas }))
}

/// Deposit tokens from L1 into the wallet.
#[utoipa::path(
    post,
    path = "/deposit",
    request_body = DepositRequest,
    tag = "Deposits",
    security(("session_id" = [])),
    responses(
        (status = 200, description = "Deposit submitted", body = DepositResponse),
        (status = 400, description = "Missing amount or token", body = ErrorBody),
        (status = 401, description = "Invalid or missing session", body = ErrorBody),
        (status = 500, description = "Wallet call failed", body = ErrorBody)
    )
)]
pub async fn deposit(
    CurrentSession(session): CurrentSession,
    JsonBody(request): JsonBody<DepositRequest>,
) -> Result<Json<DepositResponse>, ApiError> {
    let params = deposit_params(&session, request, false)?;

    let result = session
        .client
        .deposit(params)
        .await
        .map_err(|e| ApiError::downstream("deposit", e))?;

    Ok(Json(DepositResponse { result }))
}
