// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Sessions
//!
//! A session binds an opaque id (UUID v4) to one authenticated wallet
//! client. Sessions are created by `POST /login`, removed by
//! `POST /logout`, and otherwise live until the process exits.
//!
//! ## Per-session serialization
//!
//! Wallet clients are not assumed to tolerate concurrent calls, so every
//! session carries a request lock. The session middleware holds it for the
//! whole request; requests on different sessions never contend.

use std::{fmt, str::FromStr, sync::Arc};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, OwnedMutexGuard};
use uuid::Uuid;

use crate::wallet::WalletClient;

pub mod registry;

pub use registry::SessionRegistry;

/// Opaque session token handed to API callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub Uuid);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Text that is not a session id as issued by `/login`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid session id")]
pub struct InvalidSessionId;

/// Only the exact form handed out at login (lowercase, hyphenated) parses.
/// Other spellings of the same UUID are different tokens.
impl FromStr for SessionId {
    type Err = InvalidSessionId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = Uuid::try_parse(s).map_err(|_| InvalidSessionId)?;
        if id.hyphenated().to_string() != s {
            return Err(InvalidSessionId);
        }
        Ok(SessionId(id))
    }
}

/// A logged-in identity.
pub struct Session {
    pub id: SessionId,
    pub client: Arc<dyn WalletClient>,
    /// Public address of the identity
    pub address: String,
    pub created_at: DateTime<Utc>,
    request_lock: Arc<Mutex<()>>,
}

impl Session {
    pub fn new(id: SessionId, client: Arc<dyn WalletClient>, address: String) -> Self {
        Self {
            id,
            client,
            address,
            created_at: Utc::now(),
            request_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Wait until no other request is running against this session.
    ///
    /// The returned guard releases the lock when dropped.
    pub async fn lock_requests(&self) -> OwnedMutexGuard<()> {
        self.request_lock.clone().lock_owned().await
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("address", &self.address)
            .field("created_at", &self.created_at)
            .finish_non_exhaustive()
    }
}

/// Per-request view of the authenticated session, attached by the session
/// middleware. Handlers read identity from here only.
#[derive(Clone)]
pub struct SessionContext {
    pub session_id: SessionId,
    pub address: String,
    pub client: Arc<dyn WalletClient>,
    /// When the session was opened
    pub opened_at: DateTime<Utc>,
}

impl From<&Session> for SessionContext {
    fn from(session: &Session) -> Self {
        Self {
            session_id: session.id,
            address: session.address.clone(),
            client: session.client.clone(),
            opened_at: session.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::StubClient;
    use std::time::Duration;

    #[test]
    fn session_id_round_trips_through_text() {
        let id = SessionId(Uuid::new_v4());
        assert_eq!(id.to_string().parse::<SessionId>().unwrap(), id);
        assert_eq!("S1".parse::<SessionId>(), Err(InvalidSessionId));
    }

    #[test]
    fn only_the_issued_spelling_parses() {
        let id = SessionId(Uuid::new_v4());
        let issued = id.to_string();

        let aliases = [
            format!(" {issued}"),
            format!("{issued}\n"),
            issued.to_uppercase(),
            id.0.simple().to_string(),
            id.0.braced().to_string(),
            id.0.urn().to_string(),
        ];
        for alias in aliases {
            assert_eq!(alias.parse::<SessionId>(), Err(InvalidSessionId), "{alias:?}");
        }
    }

    #[test]
    fn context_carries_the_opening_time() {
        let session = Session::new(
            SessionId(Uuid::new_v4()),
            Arc::new(StubClient::new("0xAAA")),
            "0xAAA".into(),
        );
        let context = SessionContext::from(&session);

        assert_eq!(context.session_id, session.id);
        assert_eq!(context.opened_at, session.created_at);
        assert!(context.opened_at <= Utc::now());
    }

    #[test]
    fn debug_omits_client() {
        let session = Session::new(
            SessionId(Uuid::nil()),
            Arc::new(StubClient::new("0xAAA")),
            "0xAAA".into(),
        );
        let rendered = format!("{session:?}");
        assert!(rendered.contains("0xAAA"));
        assert!(!rendered.contains("client"));
    }

    #[tokio::test]
    async fn request_lock_serializes_holders() {
        let session = Arc::new(Session::new(
            SessionId(Uuid::new_v4()),
            Arc::new(StubClient::new("0xAAA")),
            "0xAAA".into(),
        ));

        let guard = session.lock_requests().await;
        let waiter = {
            let session = session.clone();
            tokio::spawn(async move {
                let _guard = session.lock_requests().await;
            })
        };

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!waiter.is_finished(), "second request must wait");

        drop(guard);
        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .expect("lock released")
            .unwrap();
    }
}
