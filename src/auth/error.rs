// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication errors.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::error::ErrorBody;

/// Message returned for every rejected session.
pub const INVALID_SESSION_MESSAGE: &str = "Invalid or missing session ID";

/// Why a request failed session authentication.
///
/// Callers see the same 401 body for every variant; the distinction only
/// shows up in logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    /// No `x-session-id` header, or one that is not valid text
    MissingSessionId,
    /// The id is not in the registry
    UnknownSession,
}

impl AuthError {
    pub fn reason(&self) -> &'static str {
        match self {
            AuthError::MissingSessionId => "missing_session_id",
            AuthError::UnknownSession => "unknown_session",
        }
    }
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(INVALID_SESSION_MESSAGE)
    }
}

impl std::error::Error for AuthError {}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let body = Json(ErrorBody {
            error: self.to_string(),
        });
        (StatusCode::UNAUTHORIZED, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[tokio::test]
    async fn every_variant_returns_the_same_401() {
        for err in [AuthError::MissingSessionId, AuthError::UnknownSession] {
            let response = err.into_response();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

            let body_bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
            let body: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();
            assert_eq!(body, serde_json::json!({"error": "Invalid or missing session ID"}));
        }
    }

    #[test]
    fn reasons_are_distinct() {
        assert_ne!(
            AuthError::MissingSessionId.reason(),
            AuthError::UnknownSession.reason()
        );
    }
}
