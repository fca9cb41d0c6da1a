// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Balance, token and message-signing endpoints.

use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use super::extract::{missing, non_empty, present, JsonBody};
use crate::{
    auth::CurrentSession,
    error::{ApiError, ErrorBody},
    value::WalletValue,
};

#[derive(Debug, Serialize, ToSchema)]
pub struct BalancesResponse {
    /// Token balances; integer amounts are decimal strings
    #[schema(value_type = Object)]
    pub balances: WalletValue,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TokensResponse {
    #[schema(value_type = Object)]
    pub tokens: WalletValue,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct SignRequest {
    pub message: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SignResponse {
    #[schema(value_type = Object)]
    pub signature: WalletValue,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct VerifyRequest {
    /// Signature as returned by `/sign`
    #[schema(value_type = Option<Object>)]
    pub signature: Option<Value>,
    pub message: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct VerifyResponse {
    pub valid: bool,
}

/// Fetch the token balances of the session's wallet.
#[utoipa::path(
    get,
    path = "/balances",
    tag = "Wallet",
    security(("session_id" = [])),
    responses(
        (status = 200, description = "Balances retrieved", body = BalancesResponse),
        (status = 401, description = "Invalid or missing session", body = ErrorBody),
        (status = 500, description = "Wallet call failed", body = ErrorBody)
    )
)]
pub async fn balances(
    CurrentSession(session): CurrentSession,
) -> Result<Json<BalancesResponse>, ApiError> {
    let balances = session
        .client
        .fetch_token_balances()
        .await
        .map_err(|e| ApiError::downstream("fetch_token_balances", e))?;

    Ok(Json(BalancesResponse { balances }))
}

/// Sign a message with the session's key.
#[utoipa::path(
    post,
    path = "/sign",
    request_body = SignRequest,
    tag = "Wallet",
    security(("session_id" = [])),
    responses(
        (status = 200, description = "Message signed", body = SignResponse),
        (status = 400, description = "Missing message", body = ErrorBody),
        (status = 401, description = "Invalid or missing session", body = ErrorBody),
        (status = 500, description = "Wallet call failed", body = ErrorBody)
    )
)]
pub async fn sign(
    CurrentSession(session): CurrentSession,
    JsonBody(request): JsonBody<SignRequest>,
) -> Result<Json<SignResponse>, ApiError> {
    let message = non_empty(request.message).ok_or_else(|| missing(&[("message", false)]))?;

    let signature = session
        .client
        .sign_message(&message)
        .await
        .map_err(|e| ApiError::downstream("sign_message", e))?;

    Ok(Json(SignResponse { signature }))
}

/// Check a signature against the session's identity.
#[utoipa::path(
    post,
    path = "/verify",
    request_body = VerifyRequest,
    tag = "Wallet",
    security(("session_id" = [])),
    responses(
        (status = 200, description = "Verification result", body = VerifyResponse),
        (status = 400, description = "Missing signature or message", body = ErrorBody),
        (status = 401, description = "Invalid or missing session", body = ErrorBody),
        (status = 500, description = "Wallet call failed", body = ErrorBody)
    )
)]
pub async fn verify(
    CurrentSession(session): CurrentSession,
    JsonBody(request): JsonBody<VerifyRequest>,
) -> Result<Json<VerifyResponse>, ApiError> {
    let signature = request.signature.filter(present);
    let message = non_empty(request.message);
    let fields = [
        ("signature", signature.is_some()),
        ("message", message.is_some()),
    ];
    let (signature, message) = signature.zip(message).ok_or_else(|| missing(&fields))?;

    let valid = session
        .client
        .verify_signature(&signature, &message)
        .await
        .map_err(|e| ApiError::downstream("verify_signature", e))?;

    Ok(Json(VerifyResponse { valid }))
}

/// List the tokens known to the wallet.
#[utoipa::path(
    get,
    path = "/tokens",
    tag = "Wallet",
    security(("session_id" = [])),
    responses(
        (status = 200, description = "Token list", body = TokensResponse),
        (status = 401, description = "Invalid or missing session", body = ErrorBody),
        (status = 500, description = "Wallet call failed", body = ErrorBody)
    )
)]
pub async fn tokens(
    CurrentSession(session): CurrentSession,
) -> Result<Json<TokensResponse>, ApiError> {
    let tokens = session
        .client
        .get_tokens_list()
        .await
        .map_err(|e| ApiError::downstream("get_tokens_list", e))?;

    Ok(Json(TokensResponse { tokens }))
}
