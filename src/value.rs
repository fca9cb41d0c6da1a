// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Wallet Values
//!
//! Results returned by the wallet client are arbitrary trees of JSON-like
//! values that may carry integers wider than a JavaScript number can hold
//! (token amounts in wei, gas limits, nonces). [`WalletValue`] models that
//! tree with an explicit [`WalletValue::BigInt`] variant.
//!
//! ## Rendering
//!
//! [`WalletValue::to_json`] is the only way a value leaves the gateway. It
//! renders every `BigInt` as its exact base-10 string so the response stays
//! valid, lossless JSON for any consumer. The `Serialize` impl goes through
//! the same transform, so a `WalletValue` embedded in a response type can
//! never leak a raw big integer.

use std::{collections::BTreeMap, str::FromStr};

use num_bigint::{BigInt, BigUint};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Number, Value};

/// Largest integer a consumer can hold exactly in an IEEE-754 double.
pub const MAX_SAFE_INTEGER: u64 = (1 << 53) - 1;

/// A value produced by the wallet client.
#[derive(Debug, Clone, PartialEq)]
pub enum WalletValue {
    Null,
    Bool(bool),
    /// A number that is safe to emit as a JSON number.
    Number(Number),
    /// An arbitrary-precision integer, rendered as a decimal string.
    BigInt(BigInt),
    String(String),
    Array(Vec<WalletValue>),
    Object(BTreeMap<String, WalletValue>),
}

impl WalletValue {
    /// Build an object from `(key, value)` pairs.
    pub fn object<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, WalletValue)>,
    {
        WalletValue::Object(
            entries
                .into_iter()
                .map(|(key, value)| (key.into(), value))
                .collect(),
        )
    }

    /// Render the value as JSON, converting every big integer to its exact
    /// decimal string. Arrays keep their order, objects keep all their keys.
    pub fn to_json(&self) -> Value {
        match self {
            WalletValue::Null => Value::Null,
            WalletValue::Bool(b) => Value::Bool(*b),
            WalletValue::Number(n) => Value::Number(n.clone()),
            WalletValue::BigInt(n) => Value::String(n.to_string()),
            WalletValue::String(s) => Value::String(s.clone()),
            WalletValue::Array(items) => Value::Array(items.iter().map(Self::to_json).collect()),
            WalletValue::Object(map) => Value::Object(
                map.iter()
                    .map(|(key, value)| (key.clone(), value.to_json()))
                    .collect(),
            ),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            WalletValue::String(s) => Some(s),
            _ => None,
        }
    }
}

impl Serialize for WalletValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for WalletValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(WalletValue::from)
    }
}

/// Integers outside the safe range are promoted to `BigInt` so they are
/// transported as strings.
impl From<Value> for WalletValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => WalletValue::Null,
            Value::Bool(b) => WalletValue::Bool(b),
            Value::Number(n) => from_number(n),
            Value::String(s) => WalletValue::String(s),
            Value::Array(items) => {
                WalletValue::Array(items.into_iter().map(WalletValue::from).collect())
            }
            Value::Object(map) => WalletValue::Object(
                map.into_iter()
                    .map(|(key, value)| (key, WalletValue::from(value)))
                    .collect(),
            ),
        }
    }
}

fn from_number(n: Number) -> WalletValue {
    // Numbers keep their source text, so integers of any width parse here
    // exactly; fractions and exponents fail and stay numbers.
    match BigInt::from_str(n.as_str()) {
        Ok(v) if v.magnitude() > &BigUint::from(MAX_SAFE_INTEGER) => WalletValue::BigInt(v),
        _ => WalletValue::Number(n),
    }
}

impl From<&str> for WalletValue {
    fn from(value: &str) -> Self {
        WalletValue::String(value.to_string())
    }
}
