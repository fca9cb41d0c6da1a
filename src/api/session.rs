// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Login and logout endpoints.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::extract::JsonBody;
use crate::{
    auth::CurrentSession,
    error::{ApiError, ErrorBody},
    session::SessionId,
    state::AppState,
    wallet::Credential,
};

/// Request to open a session.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct LoginRequest {
    /// Hex-encoded Ethereum private key
    #[schema(value_type = Option<String>)]
    pub eth_private_key: Option<Credential>,
}

/// A freshly opened session.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// Token to send as `x-session-id`
    #[schema(value_type = String, format = Uuid)]
    pub session_id: SessionId,
    /// Address of the authenticated identity
    pub address: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StatusResponse {
    pub status: String,
}

/// Authenticate a private key and open a session for it.
#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    tag = "Session",
    responses(
        (status = 200, description = "Session opened", body = LoginResponse),
        (status = 400, description = "Missing private key", body = ErrorBody),
        (status = 500, description = "Wallet login failed", body = ErrorBody)
    )
)]
pub async fn login(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let credential = request
        .eth_private_key
        .filter(|credential| !credential.is_empty())
        .ok_or_else(|| ApiError::bad_request("eth_private_key is required"))?;

    let client = state
        .connector
        .authenticate(credential, &state.network)
        .await
        .map_err(|e| ApiError::downstream("login", e))?;

    let address = client.address().to_string();
    let session_id = state.sessions.create(client, address.clone()).await;
    tracing::info!(%session_id, %address, "session opened");

    Ok(Json(LoginResponse {
        session_id,
        address,
    }))
}

/// Log the wallet out and close the session.
///
/// The session is only closed once the wallet logout succeeds; on failure
/// it stays usable so the call can be retried.
#[utoipa::path(
    post,
    path = "/logout",
    tag = "Session",
    security(("session_id" = [])),
    responses(
        (status = 200, description = "Session closed", body = StatusResponse),
        (status = 401, description = "Invalid or missing session", body = ErrorBody),
        (status = 500, description = "Wallet logout failed", body = ErrorBody)
    )
)]
pub async fn logout(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
) -> Result<Json<StatusResponse>, ApiError> {
    session
        .client
        .logout()
        .await
        .map_err(|e| ApiError::downstream("logout", e))?;

    state.sessions.remove(session.session_id).await;
    let age = chrono::Utc::now() - session.opened_at;
    tracing::info!(
        session_id = %session.session_id,
        age_secs = age.num_seconds(),
        "session closed"
    );

    Ok(Json(StatusResponse {
        status: "Logged out".to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        session::SessionContext,
        testing::{test_network, StubConnector},
    };
    use axum::http::StatusCode;
    use std::sync::Arc;

    fn state(connector: StubConnector) -> (AppState, Arc<StubConnector>) {
        let connector = Arc::new(connector);
        (
            AppState::new(connector.clone(), test_network()),
            connector,
        )
    }

    #[tokio::test]
    async fn login_registers_a_session() {
        let (state, _) = state(StubConnector::new().with_identity("K1", "0xAAA"));

        let Json(response) = login(
            State(state.clone()),
            JsonBody(LoginRequest {
                eth_private_key: Some(Credential::new("K1")),
            }),
        )
        .await
        .expect("login succeeds");

        assert_eq!(response.address, "0xAAA");
        let session = state
            .sessions
            .get(&response.session_id.to_string())
            .await
            .expect("registered");
        assert_eq!(session.address, "0xAAA");
    }

    #[tokio::test]
    async fn login_without_key_is_rejected_before_connecting() {
        let (state, connector) = state(StubConnector::new().with_identity("K1", "0xAAA"));

        for key in [None, Some(Credential::new(""))] {
            let err = login(
                State(state.clone()),
                JsonBody(LoginRequest {
                    eth_private_key: key,
                }),
            )
            .await
            .unwrap_err();
            assert_eq!(err.status, StatusCode::BAD_REQUEST);
            assert_eq!(err.message, "eth_private_key is required");
        }

        assert_eq!(connector.login_attempts(), 0);
        assert!(state.sessions.is_empty().await);
    }

    #[tokio::test]
    async fn failed_login_creates_no_session() {
        let (state, connector) = state(StubConnector::new());

        let err = login(
            State(state.clone()),
            JsonBody(LoginRequest {
                eth_private_key: Some(Credential::new("unknown")),
            }),
        )
        .await
        .unwrap_err();

        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message, "Invalid private key: unknown key");
        assert_eq!(connector.login_attempts(), 1);
        assert!(state.sessions.is_empty().await);
    }

    #[tokio::test]
    async fn failed_logout_keeps_the_session() {
        let (state, connector) = state(StubConnector::new().with_failing_identity(
            "K1",
            "0xAAA",
            &["logout"],
        ));
        let Json(opened) = login(
            State(state.clone()),
            JsonBody(LoginRequest {
                eth_private_key: Some(Credential::new("K1")),
            }),
        )
        .await
        .unwrap();
        let session = state
            .sessions
            .get(&opened.session_id.to_string())
            .await
            .unwrap();

        let err = logout(
            State(state.clone()),
            CurrentSession(SessionContext::from(session.as_ref())),
        )
        .await
        .unwrap_err();

        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message, "logout failed");
        assert_eq!(connector.client_for("0xAAA").unwrap().calls("logout"), 1);
        assert!(state
            .sessions
            .get(&opened.session_id.to_string())
            .await
            .is_some());
    }
}
