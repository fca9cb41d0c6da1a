// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Transaction history endpoints.

use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

use super::extract::QueryParams;
use crate::{
    auth::CurrentSession,
    error::{ApiError, ErrorBody},
    value::WalletValue,
    wallet::HistoryFilter,
};

#[derive(Debug, Serialize, ToSchema)]
pub struct DepositsResponse {
    #[schema(value_type = Object)]
    pub deposits: WalletValue,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TransfersResponse {
    #[schema(value_type = Object)]
    pub transfers: WalletValue,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TransactionsResponse {
    #[schema(value_type = Object)]
    pub txs: WalletValue,
}

/// List deposits received by the wallet.
#[utoipa::path(
    get,
    path = "/deposits",
    tag = "History",
    params(HistoryFilter),
    security(("session_id" = [])),
    responses(
        (status = 200, description = "Deposit history", body = DepositsResponse),
        (status = 400, description = "Malformed query", body = ErrorBody),
        (status = 401, description = "Invalid or missing session", body = ErrorBody),
        (status = 500, description = "Wallet call failed", body = ErrorBody)
    )
)]
pub async fn deposits(
    CurrentSession(session): CurrentSession,
    QueryParams(filter): QueryParams<HistoryFilter>,
) -> Result<Json<DepositsResponse>, ApiError> {
    let deposits = session
        .client
        .fetch_deposits(filter)
        .await
        .map_err(|e| ApiError::downstream("fetch_deposits", e))?;

    Ok(Json(DepositsResponse { deposits }))
}

/// List transfers received by the wallet.
#[utoipa::path(
    get,
    path = "/transfers",
    tag = "History",
    params(HistoryFilter),
    security(("session_id" = [])),
    responses(
        (status = 200, description = "Transfer history", body = TransfersResponse),
        (status = 400, description = "Malformed query", body = ErrorBody),
        (status = 401, description = "Invalid or missing session", body = ErrorBody),
        (status = 500, description = "Wallet call failed", body = ErrorBody)
    )
)]
pub async fn transfers(
    CurrentSession(session): CurrentSession,
    QueryParams(filter): QueryParams<HistoryFilter>,
) -> Result<Json<TransfersResponse>, ApiError> {
    let transfers = session
        .client
        .fetch_transfers(filter)
        .await
        .map_err(|e| ApiError::downstream("fetch_transfers", e))?;

    Ok(Json(TransfersResponse { transfers }))
}

/// List transactions sent by the wallet.
#[utoipa::path(
    get,
    path = "/transactions",
    tag = "History",
    params(HistoryFilter),
    security(("session_id" = [])),
    responses(
        (status = 200, description = "Transaction history", body = TransactionsResponse),
        (status = 400, description = "Malformed query", body = ErrorBody),
        (status = 401, description = "Invalid or missing session", body = ErrorBody),
        (status = 500, description = "Wallet call failed", body = ErrorBody)
    )
)]
pub async fn transactions(
    CurrentSession(session): CurrentSession,
    QueryParams(filter): QueryParams<HistoryFilter>,
) -> Result<Json<TransactionsResponse>, ApiError> {
    let txs = session
        .client
        .fetch_transactions(filter)
        .await
        .map_err(|e| ApiError::downstream("fetch_transactions", e))?;

    Ok(Json(TransactionsResponse { txs }))
}
