//! Cryptographic primitives for ConnVault.
//!
//! This module provides:
//! - AES-256-CBC encryption and decryption (`encryption`)
//! - PBKDF2-HMAC-SHA256 password-based key derivation (`kdf`)
//! - The `{salt, ciphertext}` blob format (`blob`)
//! - Password-level encrypt/decrypt of whole payloads (`engine`)
//! - The master-password verification hash (`verify`)

pub mod blob;
pub mod encryption;
pub mod engine;
pub mod kdf;
pub mod keys;
pub mod verify;

// Re-export the most commonly used items so callers can write:
//   use crate::crypto::{CipherEngine, EncryptedBlob, hash_password, ...};
pub use blob::EncryptedBlob;
pub use engine::CipherEngine;
pub use kdf::{derive_key, derive_key_with_params, generate_salt, KdfParams};
pub use keys::DerivedKey;
pub use verify::{hash_password, verify_password_hash};
