// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! INTMAX Session Gateway - Multi-session HTTP gateway for INTMAX wallets
//!
//! Clients log in with an Ethereum private key, receive an opaque session id
//! and then drive that wallet over plain HTTP. Many sessions can be active at
//! once; each one owns its own authenticated wallet client.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `auth` - Session-header authorization middleware
//! - `session` - Session registry
//! - `value` - Wallet results with big-integer aware JSON rendering
//! - `wallet` - INTMAX wallet client abstraction and service bridge

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod session;
pub mod state;
pub mod value;
pub mod wallet;

#[cfg(test)]
mod testing;
