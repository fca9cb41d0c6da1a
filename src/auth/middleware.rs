// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Session middleware for Axum.
//!
//! Every request except `POST /login` must carry a registered session id
//! in the `x-session-id` header. Accepted requests get a
//! [`SessionContext`] in their extensions and run while holding the
//! session's request lock; rejected requests never reach a handler.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let app = Router::new()
//!     .route("/balances", get(balances))
//!     .layer(axum::middleware::from_fn_with_state(state.clone(), require_session))
//!     .with_state(state);
//! ```

use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use super::AuthError;
use crate::session::{Session, SessionContext, SessionRegistry};
use crate::state::AppState;

/// Header carrying the session id.
pub const SESSION_HEADER: &str = "x-session-id";

/// The only path reachable without a session.
pub const LOGIN_PATH: &str = "/login";

/// Resolve the session named by the request headers.
pub async fn resolve_session(
    sessions: &SessionRegistry,
    headers: &HeaderMap,
) -> Result<Arc<Session>, AuthError> {
    let raw = headers
        .get(SESSION_HEADER)
        .ok_or(AuthError::MissingSessionId)?
        .to_str()
        .map_err(|_| AuthError::MissingSessionId)?;

    if raw.trim().is_empty() {
        return Err(AuthError::MissingSessionId);
    }

    sessions.get(raw).await.ok_or(AuthError::UnknownSession)
}

/// Session authentication middleware function.
pub async fn require_session(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    if request.uri().path() == LOGIN_PATH {
        return next.run(request).await;
    }

    let session = match resolve_session(&state.sessions, request.headers()).await {
        Ok(session) => session,
        Err(e) => {
            tracing::info!(reason = e.reason(), path = %request.uri().path(), "rejected request");
            return e.into_response();
        }
    };

    let _guard = session.lock_requests().await;

    // A logout may have completed while this request waited for the lock.
    if state.sessions.get(&session.id.to_string()).await.is_none() {
        return AuthError::UnknownSession.into_response();
    }

    request
        .extensions_mut()
        .insert(SessionContext::from(session.as_ref()));
    next.run(request).await
}
