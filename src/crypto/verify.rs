//! Master-password verification hash.
//!
//! The verification record is a plain SHA-256 of the password, stored
//! as 64 lowercase hex characters.  It is checked before any decryption
//! is attempted and does not depend on any blob salt.

use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

/// Hash a password for the verification record.
pub fn hash_password(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}

/// Compare a password against a stored verification hash.
///
/// Surrounding whitespace in `stored_hash` is ignored so hand-edited
/// files with a trailing newline still match.
pub fn verify_password_hash(password: &str, stored_hash: &str) -> bool {
    let actual = hash_password(password);
    actual
        .as_bytes()
        .ct_eq(stored_hash.trim().as_bytes())
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_stable_sha256_hex() {
        assert_eq!(
            hash_password("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
        assert_eq!(hash_password("abc"), hash_password("abc"));
    }

    #[test]
    fn verify_accepts_matching_password() {
        let stored = hash_password("correcthorse1");
        assert!(verify_password_hash("correcthorse1", &stored));
    }

    #[test]
    fn verify_rejects_other_password() {
        let stored = hash_password("correcthorse1");
        assert!(!verify_password_hash("wrongpass1", &stored));
    }

    #[test]
    fn verify_ignores_trailing_newline() {
        let stored = format!("{}\n", hash_password("pw"));
        assert!(verify_password_hash("pw", &stored));
    }

    #[test]
    fn verify_rejects_empty_record() {
        assert!(!verify_password_hash("pw", ""));
    }
}
