//! Password-level encryption of whole payloads.
//!
//! `CipherEngine` ties the KDF and the block cipher together: every
//! `encrypt` draws a fresh salt, derives a key from the password, and
//! encrypts under a fresh IV.  `decrypt` re-derives the key from the
//! blob's salt.  Any failure on the way back (bad encoding, bad padding,
//! empty or non-UTF-8 output) is a `DecryptionFailed`.

use zeroize::Zeroize;

use super::blob::EncryptedBlob;
use super::encryption;
use super::kdf::{self, KdfParams};
use super::keys::DerivedKey;
use crate::errors::{Result, VaultError};

/// Encrypts and decrypts text payloads under a password.
#[derive(Debug, Clone, Copy, Default)]
pub struct CipherEngine {
    params: KdfParams,
}

impl CipherEngine {
    /// Build an engine with explicit KDF parameters.
    pub fn new(params: KdfParams) -> Self {
        Self { params }
    }

    /// The KDF parameters new blobs are written with.
    pub fn params(&self) -> KdfParams {
        self.params
    }

    /// Derive the symmetric key for `password` and `salt`.
    pub fn derive_key(&self, password: &str, salt: &[u8]) -> Result<DerivedKey> {
        kdf::derive_key_with_params(password.as_bytes(), salt, &self.params)
    }

    /// Encrypt `plaintext` under `password` with a fresh salt and IV.
    pub fn encrypt(&self, plaintext: &str, password: &str) -> Result<EncryptedBlob> {
        let salt = kdf::generate_salt();
        let key = self.derive_key(password, &salt)?;
        let ciphertext = encryption::encrypt(key.as_bytes(), plaintext.as_bytes())?;

        Ok(EncryptedBlob {
            salt: salt.to_vec(),
            ciphertext,
            iterations: Some(self.params.iterations),
        })
    }

    /// Decrypt a blob produced by `encrypt`.
    pub fn decrypt(&self, blob: &EncryptedBlob, password: &str) -> Result<String> {
        let params = KdfParams {
            iterations: blob.iterations.unwrap_or(self.params.iterations),
        };
        let key = kdf::derive_key_with_params(password.as_bytes(), &blob.salt, &params)
            .map_err(|_| VaultError::DecryptionFailed)?;

        let plaintext = encryption::decrypt(key.as_bytes(), &blob.ciphertext)?;

        // An empty payload is never written by `save`; padding that happens
        // to unwrap to nothing means the key was wrong.
        if plaintext.is_empty() {
            return Err(VaultError::DecryptionFailed);
        }

        // On error, zeroize the bytes inside the error before discarding.
        String::from_utf8(plaintext).map_err(|e| {
            let mut bad_bytes = e.into_bytes();
            bad_bytes.zeroize();
            VaultError::DecryptionFailed
        })
    }

    /// Decrypt the on-disk JSON form of a blob.
    pub fn decrypt_json(&self, blob_json: &str, password: &str) -> Result<String> {
        let blob = EncryptedBlob::from_json(blob_json)?;
        self.decrypt(&blob, password)
    }
}
