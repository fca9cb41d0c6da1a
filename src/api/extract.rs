// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Request extractors whose rejections use the `{error}` body.

use axum::extract::{rejection::QueryRejection, FromRequest, FromRequestParts};
use serde_json::Value;

use crate::error::ApiError;

/// JSON body; malformed or non-JSON bodies become a 400 `ApiError`.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct JsonBody<T>(pub T);

/// Query string; malformed parameters become a 400 `ApiError`.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct QueryParams<T>(pub T);

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::bad_request(rejection.body_text())
    }
}

/// The 400 error naming the fields whose flag is `false`.
///
/// `missing(&[("signature", false), ("message", false)])` yields
/// "signature and message are required".
pub fn missing(fields: &[(&str, bool)]) -> ApiError {
    let absent: Vec<&str> = fields
        .iter()
        .filter(|(_, present)| !present)
        .map(|(name, _)| *name)
        .collect();

    match absent.as_slice() {
        [] => ApiError::bad_request("Invalid request body"),
        [one] => ApiError::bad_request(format!("{one} is required")),
        [init @ .., last] => ApiError::bad_request(format!(
            "{} and {last} are required",
            init.join(", ")
        )),
    }
}

/// A JSON field counts as present unless it is `null` or `""`.
pub fn present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.is_empty(),
        _ => true,
    }
}

/// Drop empty strings so they count as missing.
pub fn non_empty(text: Option<String>) -> Option<String> {
    text.filter(|t| !t.is_empty())
}
