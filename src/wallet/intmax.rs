// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! INTMAX wallet service client.
//!
//! Logging in derives the address locally, checks that the configured L1
//! RPC serves the environment's chain, then runs a challenge/response
//! handshake with the wallet service:
//!
//! 1. `POST v1/auth/challenge { address, environment }` → `{ message }`
//! 2. sign `message` (EIP-191) with the session key
//! 3. `POST v1/auth/login { address, signature, environment, l1RpcUrl }` →
//!    `{ accessToken }`
//!
//! All later calls carry the access token as a bearer token. Message
//! signing and verification never leave the process.

use std::{sync::Arc, time::Duration};

use alloy::{
    providers::{Provider, ProviderBuilder},
    signers::local::PrivateKeySigner,
};
use async_trait::async_trait;
use reqwest::{RequestBuilder, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{json, Value};
use url::Url;

use super::client::{
    ClientError, Credential, DepositParams, HistoryFilter, WalletClient, WalletConnector,
    WithdrawParams,
};
use super::network::NetworkConfig;
use super::signing::{sign_personal_message, signer_from_hex, verify_personal_message};
use crate::value::WalletValue;

#[derive(Deserialize)]
struct ChallengeResponse {
    message: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginResponse {
    access_token: String,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: String,
}

/// Thin JSON transport to the wallet service.
#[derive(Clone)]
struct ServiceApi {
    http: reqwest::Client,
    base: Url,
    access_token: Option<String>,
}

impl ServiceApi {
    fn with_token(mut self, token: String) -> Self {
        self.access_token = Some(token);
        self
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        self.base
            .join(path)
            .map_err(|e| ClientError::Transport(format!("Invalid endpoint {path}: {e}")))
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let request = self.http.get(self.endpoint(path)?);
        let response = self.send(request).await?;
        Ok(response.json().await?)
    }

    async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &impl Serialize,
    ) -> Result<T, ClientError> {
        let request = self.http.get(self.endpoint(path)?).query(query);
        let response = self.send(request).await?;
        Ok(response.json().await?)
    }

    async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> Result<T, ClientError> {
        let request = self.http.post(self.endpoint(path)?).json(body);
        let response = self.send(request).await?;
        Ok(response.json().await?)
    }

    /// POST without reading the response body.
    async fn post_empty(&self, path: &str) -> Result<(), ClientError> {
        let request = self.http.post(self.endpoint(path)?);
        self.send(request).await.map(|_| ())
    }

    async fn send(&self, request: RequestBuilder) -> Result<reqwest::Response, ClientError> {
        let request = match &self.access_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(ClientError::Remote {
            status: status.as_u16(),
            message: remote_message(status, &body),
        })
    }
}

/// Prefer the service's `{error}` message, then the raw body, then the
/// status line.
fn remote_message(status: StatusCode, body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorResponse>(body) {
        return parsed.error;
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        format!("Wallet service returned {status}")
    } else {
        trimmed.to_string()
    }
}

/// Connector for the INTMAX wallet service.
pub struct IntmaxConnector {
    http: reqwest::Client,
    service_url: Url,
}

impl IntmaxConnector {
    pub fn new(mut service_url: Url, timeout: Duration) -> Result<Self, ClientError> {
        // `Url::join` replaces the last segment unless the base ends in '/'.
        if !service_url.path().ends_with('/') {
            let path = format!("{}/", service_url.path());
            service_url.set_path(&path);
        }

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        Ok(Self { http, service_url })
    }

    fn api(&self) -> ServiceApi {
        ServiceApi {
            http: self.http.clone(),
            base: self.service_url.clone(),
            access_token: None,
        }
    }
}

/// Fail unless the L1 RPC serves the environment's chain.
async fn ensure_l1_chain(network: &NetworkConfig) -> Result<(), ClientError> {
    let provider = ProviderBuilder::new().connect_http(network.l1_rpc_url.clone());
    let actual = provider
        .get_chain_id()
        .await
        .map_err(|e| ClientError::Rpc(e.to_string()))?;

    let expected = network.environment.l1_chain_id();
    if actual != expected {
        return Err(ClientError::NetworkMismatch {
            environment: network.environment,
            expected,
            actual,
        });
    }
    Ok(())
}

#[async_trait]
impl WalletConnector for IntmaxConnector {
    async fn authenticate(
        &self,
        credential: Credential,
        network: &NetworkConfig,
    ) -> Result<Arc<dyn WalletClient>, ClientError> {
        let signer = signer_from_hex(credential.expose())?;
        drop(credential);
        let address = signer.address().to_checksum(None);

        ensure_l1_chain(network).await?;

        let api = self.api();
        let challenge: ChallengeResponse = api
            .post(
                "v1/auth/challenge",
                &json!({ "address": address, "environment": network.environment }),
            )
            .await?;

        let signature = sign_personal_message(&signer, &challenge.message)?;
        let login: LoginResponse = api
            .post(
                "v1/auth/login",
                &json!({
                    "address": address,
                    "signature": signature,
                    "environment": network.environment,
                    "l1RpcUrl": network.l1_rpc_url.as_str(),
                }),
            )
            .await?;

        tracing::debug!(%address, environment = %network.environment, "wallet service login complete");

        Ok(Arc::new(IntmaxClient {
            api: api.with_token(login.access_token),
            signer,
            address,
        }))
    }
}

/// A logged-in INTMAX wallet.
pub struct IntmaxClient {
    api: ServiceApi,
    signer: PrivateKeySigner,
    address: String,
}

#[async_trait]
impl WalletClient for IntmaxClient {
    fn address(&self) -> &str {
        &self.address
    }

    async fn logout(&self) -> Result<(), ClientError> {
        self.api.post_empty("v1/auth/logout").await
    }

    async fn fetch_token_balances(&self) -> Result<WalletValue, ClientError> {
        self.api.get("v1/balances").await
    }

    async fn sign_message(&self, message: &str) -> Result<WalletValue, ClientError> {
        sign_personal_message(&self.signer, message).map(WalletValue::String)
    }

    async fn verify_signature(&self, signature: &Value, message: &str) -> Result<bool, ClientError> {
        Ok(signature
            .as_str()
            .is_some_and(|sig| verify_personal_message(sig, message, self.signer.address())))
    }

    async fn get_tokens_list(&self) -> Result<WalletValue, ClientError> {
        self.api.get("v1/tokens").await
    }

    async fn estimate_deposit_gas(&self, params: DepositParams) -> Result<WalletValue, ClientError> {
        self.api.post("v1/deposits/estimate", &params).await
    }

    async fn deposit(&self, params: DepositParams) -> Result<WalletValue, ClientError> {
        self.api.post("v1/deposits", &params).await
    }

    async fn get_withdrawal_fee(&self, token: &Value) -> Result<WalletValue, ClientError> {
        self.api
            .post("v1/withdrawals/fee", &json!({ "token": token }))
            .await
    }

    async fn withdraw(&self, params: WithdrawParams) -> Result<WalletValue, ClientError> {
        self.api.post("v1/withdrawals", &params).await
    }

    async fn fetch_deposits(&self, filter: HistoryFilter) -> Result<WalletValue, ClientError> {
        self.api.get_with_query("v1/deposits", &filter).await
    }

    async fn fetch_transfers(&self, filter: HistoryFilter) -> Result<WalletValue, ClientError> {
        self.api.get_with_query("v1/transfers", &filter).await
    }

    async fn fetch_transactions(&self, filter: HistoryFilter) -> Result<WalletValue, ClientError> {
        self.api.get_with_query("v1/transactions", &filter).await
    }

    async fn fetch_pending_withdrawals(&self) -> Result<WalletValue, ClientError> {
        self.api.get("v1/withdrawals/pending").await
    }

    async fn claim_withdrawal(&self, withdrawal_ids: Vec<Value>) -> Result<WalletValue, ClientError> {
        self.api
            .post(
                "v1/withdrawals/claim",
                &json!({ "withdrawalIds": withdrawal_ids }),
            )
            .await
    }
}
