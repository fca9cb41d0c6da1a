// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! In-memory session registry.

use std::{collections::HashMap, sync::Arc};

use tokio::sync::RwLock;
use uuid::Uuid;

use super::{Session, SessionId};
use crate::wallet::WalletClient;

/// Maps session ids to logged-in wallet clients.
///
/// Cloning is cheap and every clone shares the same map. Reads never
/// create entries; `create` and `remove` are the only mutators.
#[derive(Clone, Default)]
pub struct SessionRegistry {
    sessions: Arc<RwLock<HashMap<SessionId, Arc<Session>>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a freshly authenticated client under a new random id.
    pub async fn create(&self, client: Arc<dyn WalletClient>, address: String) -> SessionId {
        let id = SessionId(Uuid::new_v4());
        let session = Arc::new(Session::new(id, client, address));
        self.sessions.write().await.insert(id, session);
        id
    }

    /// Look up a session by its textual id. Ids that are not UUIDs are
    /// never present.
    pub async fn get(&self, id: &str) -> Option<Arc<Session>> {
        let id: SessionId = id.parse().ok()?;
        self.sessions.read().await.get(&id).cloned()
    }

    /// Forget a session. Removing an unknown id is a no-op.
    pub async fn remove(&self, id: SessionId) {
        self.sessions.write().await.remove(&id);
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}
