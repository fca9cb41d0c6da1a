// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication Module
//!
//! Session-token authentication for the gateway API.
//!
//! ## Auth Flow
//!
//! 1. Client calls `POST /login` with an Ethereum private key
//! 2. Gateway authenticates a wallet client and returns a `sessionId`
//! 3. Client sends `x-session-id: <sessionId>` on every other request
//! 4. [`middleware::require_session`] resolves the id against the
//!    [`crate::session::SessionRegistry`] and attaches a
//!    [`crate::session::SessionContext`]; handlers read it through
//!    [`CurrentSession`]
//!
//! Unknown, missing and logged-out ids all receive the same 401.

pub mod error;
pub mod extractor;
pub mod middleware;

pub use error::AuthError;
pub use extractor::CurrentSession;
pub use middleware::{require_session, LOGIN_PATH, SESSION_HEADER};
