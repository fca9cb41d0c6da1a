// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Wallet client integration.
//!
//! This module provides:
//! - The [`WalletConnector`] / [`WalletClient`] traits the API is written against
//! - Network environments and their L1 chains
//! - Local key handling (address derivation, EIP-191 signatures)
//! - The INTMAX wallet service implementation

pub mod client;
pub mod intmax;
pub mod network;
pub mod signing;

pub use client::{
    ClientError, Credential, DepositParams, HistoryFilter, WalletClient, WalletConnector,
    WithdrawParams,
};
pub use intmax::{IntmaxClient, IntmaxConnector};
pub use network::{Environment, NetworkConfig};
