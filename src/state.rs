// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use crate::session::SessionRegistry;
use crate::wallet::{NetworkConfig, WalletConnector};

#[derive(Clone)]
pub struct AppState {
    pub sessions: SessionRegistry,
    pub connector: Arc<dyn WalletConnector>,
    /// Network every new wallet client is configured for
    pub network: NetworkConfig,
}

impl AppState {
    pub fn new(connector: Arc<dyn WalletConnector>, network: NetworkConfig) -> Self {
        Self {
            sessions: SessionRegistry::new(),
            connector,
            network,
        }
    }
}
