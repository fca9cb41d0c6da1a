// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Stub wallet collaborators for tests.
//!
//! [`StubClient`] records every capability call by name and can be told to
//! fail specific capabilities. [`StubConnector`] hands out stub clients for
//! a fixed set of credentials.

use std::{
    collections::{HashMap, HashSet},
    str::FromStr,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use num_bigint::BigInt;
use serde_json::Value;
use tokio::sync::Notify;

use crate::value::WalletValue;
use crate::wallet::{
    ClientError, Credential, DepositParams, Environment, HistoryFilter, NetworkConfig,
    WalletClient, WalletConnector, WithdrawParams,
};

pub fn test_network() -> NetworkConfig {
    NetworkConfig {
        environment: Environment::Testnet,
        l1_rpc_url: url::Url::parse("http://127.0.0.1:8545").unwrap(),
    }
}

/// A wei amount too large for a JSON number.
pub const BIG_AMOUNT: &str = "1000000000000000000000";

pub fn big_amount() -> WalletValue {
    WalletValue::BigInt(BigInt::from_str(BIG_AMOUNT).unwrap())
}

pub struct StubClient {
    address: String,
    failing: HashSet<&'static str>,
    gates: HashMap<&'static str, Arc<Notify>>,
    calls: Mutex<Vec<&'static str>>,
    deposits: Mutex<Vec<DepositParams>>,
    filters: Mutex<Vec<HistoryFilter>>,
}

impl StubClient {
    pub fn new(address: &str) -> Self {
        Self {
            address: address.to_string(),
            failing: HashSet::new(),
            gates: HashMap::new(),
            calls: Mutex::new(Vec::new()),
            deposits: Mutex::new(Vec::new()),
            filters: Mutex::new(Vec::new()),
        }
    }

    /// Make `capability` fail with a remote error.
    pub fn failing(mut self, capability: &'static str) -> Self {
        self.failing.insert(capability);
        self
    }

    /// Park every call to `capability` until `gate` is notified.
    pub fn gated(mut self, capability: &'static str, gate: Arc<Notify>) -> Self {
        self.gates.insert(capability, gate);
        self
    }

    /// Number of calls made to `capability`.
    pub fn calls(&self, capability: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|name| **name == capability)
            .count()
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn last_deposit(&self) -> Option<DepositParams> {
        self.deposits.lock().unwrap().last().cloned()
    }

    pub fn last_filter(&self) -> Option<HistoryFilter> {
        self.filters.lock().unwrap().last().cloned()
    }

    async fn record(&self, capability: &'static str) -> Result<(), ClientError> {
        self.calls.lock().unwrap().push(capability);
        if let Some(gate) = self.gates.get(capability) {
            gate.notified().await;
        }
        if self.failing.contains(capability) {
            return Err(ClientError::Remote {
                status: 502,
                message: format!("{capability} failed"),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl WalletClient for StubClient {
    fn address(&self) -> &str {
        &self.address
    }

    async fn logout(&self) -> Result<(), ClientError> {
        self.record("logout").await
    }

    async fn fetch_token_balances(&self) -> Result<WalletValue, ClientError> {
        self.record("fetch_token_balances").await?;
        Ok(WalletValue::Array(vec![WalletValue::object([
            ("tokenIndex", WalletValue::Number(0u64.into())),
            ("amount", big_amount()),
        ])]))
    }

    async fn sign_message(&self, message: &str) -> Result<WalletValue, ClientError> {
        self.record("sign_message").await?;
        Ok(WalletValue::String(format!("sig:{message}")))
    }

    async fn verify_signature(&self, signature: &Value, message: &str) -> Result<bool, ClientError> {
        self.record("verify_signature").await?;
        Ok(signature.as_str() == Some(format!("sig:{message}").as_str()))
    }

    async fn get_tokens_list(&self) -> Result<WalletValue, ClientError> {
        self.record("get_tokens_list").await?;
        Ok(WalletValue::Array(vec![WalletValue::object([
            ("symbol", WalletValue::from("ETH")),
            ("decimals", WalletValue::Number(18u64.into())),
        ])]))
    }

    async fn estimate_deposit_gas(&self, params: DepositParams) -> Result<WalletValue, ClientError> {
        self.record("estimate_deposit_gas").await?;
        self.deposits.lock().unwrap().push(params);
        Ok(WalletValue::BigInt(BigInt::from(21_000u32) * BigInt::from(u64::MAX)))
    }

    async fn deposit(&self, params: DepositParams) -> Result<WalletValue, ClientError> {
        self.record("deposit").await?;
        self.deposits.lock().unwrap().push(params);
        Ok(WalletValue::object([("txHash", WalletValue::from("0xdep"))]))
    }

    async fn get_withdrawal_fee(&self, _token: &Value) -> Result<WalletValue, ClientError> {
        self.record("get_withdrawal_fee").await?;
        Ok(WalletValue::object([("amount", big_amount())]))
    }

    async fn withdraw(&self, _params: WithdrawParams) -> Result<WalletValue, ClientError> {
        self.record("withdraw").await?;
        Ok(WalletValue::object([("txTreeRoot", WalletValue::from("0xroot"))]))
    }

    async fn fetch_deposits(&self, filter: HistoryFilter) -> Result<WalletValue, ClientError> {
        self.record("fetch_deposits").await?;
        self.filters.lock().unwrap().push(filter);
        Ok(WalletValue::Array(vec![big_amount()]))
    }

    async fn fetch_transfers(&self, filter: HistoryFilter) -> Result<WalletValue, ClientError> {
        self.record("fetch_transfers").await?;
        self.filters.lock().unwrap().push(filter);
        Ok(WalletValue::Array(Vec::new()))
    }

    async fn fetch_transactions(&self, filter: HistoryFilter) -> Result<WalletValue, ClientError> {
        self.record("fetch_transactions").await?;
        self.filters.lock().unwrap().push(filter);
        Ok(WalletValue::Array(Vec::new()))
    }

    async fn fetch_pending_withdrawals(&self) -> Result<WalletValue, ClientError> {
        self.record("fetch_pending_withdrawals").await?;
        Ok(WalletValue::object([("need_claim", WalletValue::Array(Vec::new()))]))
    }

    async fn claim_withdrawal(&self, withdrawal_ids: Vec<Value>) -> Result<WalletValue, ClientError> {
        self.record("claim_withdrawal").await?;
        Ok(WalletValue::object([(
            "claimed",
            WalletValue::from(Value::Array(withdrawal_ids)),
        )]))
    }
}

/// Connector issuing stub clients for known credentials.
#[derive(Default)]
pub struct StubConnector {
    identities: HashMap<String, (String, Vec<&'static str>)>,
    gates: Vec<(&'static str, Arc<Notify>)>,
    issued: Mutex<Vec<Arc<StubClient>>>,
    logins: Mutex<usize>,
}

impl StubConnector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept `credential` and log it in as `address`.
    pub fn with_identity(self, credential: &str, address: &str) -> Self {
        self.with_failing_identity(credential, address, &[])
    }

    /// Like [`Self::with_identity`], but the issued client fails `capabilities`.
    pub fn with_failing_identity(
        mut self,
        credential: &str,
        address: &str,
        capabilities: &[&'static str],
    ) -> Self {
        self.identities.insert(
            credential.to_string(),
            (address.to_string(), capabilities.to_vec()),
        );
        self
    }

    /// Every issued client parks `capability` until `gate` is notified.
    pub fn with_gate(mut self, capability: &'static str, gate: Arc<Notify>) -> Self {
        self.gates.push((capability, gate));
        self
    }

    /// Most recent client issued for `address`.
    pub fn client_for(&self, address: &str) -> Option<Arc<StubClient>> {
        self.issued
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|client| client.address == address)
            .cloned()
    }

    pub fn login_attempts(&self) -> usize {
        *self.logins.lock().unwrap()
    }
}

#[async_trait]
impl WalletConnector for StubConnector {
    async fn authenticate(
        &self,
        credential: Credential,
        _network: &NetworkConfig,
    ) -> Result<Arc<dyn WalletClient>, ClientError> {
        *self.logins.lock().unwrap() += 1;

        let (address, failing) = self
            .identities
            .get(credential.expose())
            .ok_or_else(|| ClientError::InvalidCredential("unknown key".into()))?;

        let client = failing
            .iter()
            .fold(StubClient::new(address), |client, capability| {
                client.failing(*capability)
            });
        let client = self
            .gates
            .iter()
            .fold(client, |client, (capability, gate)| {
                client.gated(*capability, gate.clone())
            });
        let client = Arc::new(client);
        self.issued.lock().unwrap().push(client.clone());
        Ok(client)
    }
}
