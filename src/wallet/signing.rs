// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Local key handling for logged-in identities.
//!
//! Private keys stay inside the gateway process: they are parsed into an
//! alloy signer at login and used for the service handshake and for
//! EIP-191 personal-message signatures.

use alloy::{
    primitives::{Address, Signature},
    signers::{local::PrivateKeySigner, SignerSync},
};

use super::client::ClientError;

/// Create a signer from a hex private key (with or without `0x` prefix).
pub fn signer_from_hex(private_key_hex: &str) -> Result<PrivateKeySigner, ClientError> {
    let key_bytes = alloy::hex::decode(private_key_hex.trim())
        .map_err(|e| ClientError::InvalidCredential(e.to_string()))?;

    PrivateKeySigner::from_slice(&key_bytes)
        .map_err(|e| ClientError::InvalidCredential(e.to_string()))
}

/// Sign `message` as an EIP-191 personal message.
///
/// Returns the 65-byte `r || s || v` signature as `0x`-prefixed hex.
pub fn sign_personal_message(
    signer: &PrivateKeySigner,
    message: &str,
) -> Result<String, ClientError> {
    let signature = signer
        .sign_message_sync(message.as_bytes())
        .map_err(|e| ClientError::InvalidCredential(e.to_string()))?;
    Ok(alloy::hex::encode_prefixed(signature.as_bytes()))
}

/// Check that `signature_hex` is a personal-message signature of `message`
/// by `expected`. Malformed signatures are simply not valid.
pub fn verify_personal_message(signature_hex: &str, message: &str, expected: Address) -> bool {
    let Ok(bytes) = alloy::hex::decode(signature_hex.trim()) else {
        return false;
    };
    let Ok(signature) = Signature::try_from(bytes.as_slice()) else {
        return false;
    };

    signature
        .recover_address_from_msg(message)
        .map(|recovered| recovered == expected)
        .unwrap_or(false)
}
