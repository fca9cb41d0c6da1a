// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Network environments and their L1 settlement chains.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use url::Url;

/// Ethereum mainnet chain ID.
pub const ETHEREUM_MAINNET_CHAIN_ID: u64 = 1;

/// Ethereum Sepolia testnet chain ID.
pub const ETHEREUM_SEPOLIA_CHAIN_ID: u64 = 11_155_111;

/// INTMAX deployment a client authenticates against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Mainnet,
    Testnet,
}

impl Environment {
    pub fn as_str(self) -> &'static str {
        match self {
            Environment::Mainnet => "mainnet",
            Environment::Testnet => "testnet",
        }
    }

    /// Chain ID of the L1 the environment settles on.
    pub fn l1_chain_id(self) -> u64 {
        match self {
            Environment::Mainnet => ETHEREUM_MAINNET_CHAIN_ID,
            Environment::Testnet => ETHEREUM_SEPOLIA_CHAIN_ID,
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "mainnet" => Ok(Environment::Mainnet),
            "testnet" => Ok(Environment::Testnet),
            other => Err(format!(
                "Unknown environment `{other}` (expected `mainnet` or `testnet`)"
            )),
        }
    }
}

/// Network settings handed to the wallet client on every login.
#[derive(Debug, Clone)]
pub struct NetworkConfig {
    pub environment: Environment,
    /// Ethereum L1 RPC endpoint
    pub l1_rpc_url: Url,
}
