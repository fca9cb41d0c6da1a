// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Wallet client abstraction.
//!
//! The gateway never talks to a ledger directly. A [`WalletConnector`]
//! authenticates a credential and hands back a [`WalletClient`] bound to one
//! identity; every HTTP operation forwards to exactly one of its methods.

use std::{fmt, sync::Arc};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::{IntoParams, ToSchema};

use super::network::{Environment, NetworkConfig};
use crate::value::WalletValue;

/// Raw private key material supplied at login.
///
/// The key is never printed; `Debug` is redacted.
#[derive(Clone, Deserialize)]
#[serde(transparent)]
pub struct Credential(String);

impl Credential {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

/// Parameters for a deposit or a deposit gas estimate.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DepositParams {
    pub amount: Value,
    pub token: Value,
    /// Recipient INTMAX address
    pub address: String,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_gas_estimation: bool,
}

/// Parameters for a withdrawal to L1.
#[derive(Debug, Clone, Serialize)]
pub struct WithdrawParams {
    pub amount: Value,
    pub token: Value,
    /// Recipient L1 address
    pub address: String,
}

/// Pagination filter for history queries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct HistoryFilter {
    /// Opaque cursor returned by a previous page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
    /// Maximum number of entries to return
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

/// Errors raised by a wallet client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Invalid private key: {0}")]
    InvalidCredential(String),

    #[error("L1 RPC reports chain {actual}, but {environment} settles on chain {expected}")]
    NetworkMismatch {
        environment: Environment,
        expected: u64,
        actual: u64,
    },

    #[error("RPC error: {0}")]
    Rpc(String),

    #[error("Wallet service unreachable: {0}")]
    Transport(String),

    #[error("{message}")]
    Remote { status: u16, message: String },

    #[error("Unexpected wallet service response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else {
            ClientError::Transport(err.to_string())
        }
    }
}

/// An authenticated wallet bound to one identity.
#[async_trait]
pub trait WalletClient: Send + Sync {
    /// Public address of the authenticated identity.
    fn address(&self) -> &str;

    /// Tear down the remote session.
    async fn logout(&self) -> Result<(), ClientError>;

    async fn fetch_token_balances(&self) -> Result<WalletValue, ClientError>;

    async fn sign_message(&self, message: &str) -> Result<WalletValue, ClientError>;

    async fn verify_signature(&self, signature: &Value, message: &str)
        -> Result<bool, ClientError>;

    async fn get_tokens_list(&self) -> Result<WalletValue, ClientError>;

    async fn estimate_deposit_gas(&self, params: DepositParams)
        -> Result<WalletValue, ClientError>;

    async fn deposit(&self, params: DepositParams) -> Result<WalletValue, ClientError>;

    /// Quote the fee for withdrawing `token`.
    async fn get_withdrawal_fee(&self, token: &Value) -> Result<WalletValue, ClientError>;

    async fn withdraw(&self, params: WithdrawParams) -> Result<WalletValue, ClientError>;

    async fn fetch_deposits(&self, filter: HistoryFilter) -> Result<WalletValue, ClientError>;

    async fn fetch_transfers(&self, filter: HistoryFilter) -> Result<WalletValue, ClientError>;

    async fn fetch_transactions(&self, filter: HistoryFilter)
        -> Result<WalletValue, ClientError>;

    async fn fetch_pending_withdrawals(&self) -> Result<WalletValue, ClientError>;

    async fn claim_withdrawal(&self, withdrawal_ids: Vec<Value>)
        -> Result<WalletValue, ClientError>;
}

/// Factory that turns a credential into an authenticated [`WalletClient`].
#[async_trait]
pub trait WalletConnector: Send + Sync {
    async fn authenticate(
        &self,
        credential: Credential,
        network: &NetworkConfig,
    ) -> Result<Arc<dyn WalletClient>, ClientError>;
}
