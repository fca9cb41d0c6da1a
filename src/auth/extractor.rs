// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Axum extractor for the authenticated session.
//!
//! ```rust,ignore
//! async fn my_handler(CurrentSession(session): CurrentSession) -> impl IntoResponse {
//!     // session.client is the caller's wallet client
//! }
//! ```

use axum::{extract::FromRequestParts, http::request::Parts};

use super::AuthError;
use crate::session::SessionContext;

/// The session attached by [`super::middleware::require_session`].
///
/// Handlers never look at the `x-session-id` header themselves; if the
/// middleware did not attach a context the request is rejected.
pub struct CurrentSession(pub SessionContext);

impl<S: Send + Sync> FromRequestParts<S> for CurrentSession {
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<SessionContext>()
            .cloned()
            .map(CurrentSession)
            .ok_or(AuthError::MissingSessionId)
    }
}
