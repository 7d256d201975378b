//! The persisted ciphertext artifact.
//!
//! On disk a blob is a small JSON document:
//!
//! ```text
//! { "salt": "<32 hex chars>", "ciphertext": "<base64(iv || ciphertext)>", "iterations": 10000 }
//! ```
//!
//! `iterations` is optional; blobs written without it are opened with
//! the engine's configured round count.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};

use super::kdf::SALT_LEN;
use crate::errors::{Result, VaultError};

/// Salt plus encrypted payload, as written to `data.encrypted`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedBlob {
    /// KDF salt (hex in JSON).  Not secret.
    #[serde(serialize_with = "hex_encode", deserialize_with = "hex_decode")]
    pub salt: Vec<u8>,

    /// IV followed by the padded ciphertext (base64 in JSON).
    #[serde(serialize_with = "base64_encode", deserialize_with = "base64_decode")]
    pub ciphertext: Vec<u8>,

    /// PBKDF2 round count used to derive the key for this blob.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iterations: Option<u32>,
}

impl EncryptedBlob {
    /// Serialize to the on-disk JSON text.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self)
            .map_err(|e| VaultError::SerializationError(format!("encrypted blob: {e}")))
    }

    /// Parse the on-disk JSON text.
    ///
    /// Anything that is not a well-formed blob is reported as a
    /// decryption failure, the same as a wrong password.
    pub fn from_json(text: &str) -> Result<Self> {
        let blob: Self = serde_json::from_str(text).map_err(|_| VaultError::DecryptionFailed)?;
        if blob.salt.len() != SALT_LEN {
            return Err(VaultError::DecryptionFailed);
        }
        Ok(blob)
    }
}

// ---------------------------------------------------------------------------
// Serde helpers for encoded Vec<u8> fields
// ---------------------------------------------------------------------------

fn hex_encode<S>(data: &[u8], serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&hex::encode(data))
}

fn hex_decode<'de, D>(deserializer: D) -> std::result::Result<Vec<u8>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    hex::decode(&s).map_err(serde::de::Error::custom)
}

fn base64_encode<S>(data: &[u8], serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&BASE64.encode(data))
}

fn base64_decode<'de, D>(deserializer: D) -> std::result::Result<Vec<u8>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    BASE64.decode(&s).map_err(serde::de::Error::custom)
}
