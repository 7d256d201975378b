use thiserror::Error;

/// All errors that can occur in ConnVault.
#[derive(Debug, Error)]
pub enum VaultError {
    // --- Crypto errors ---
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Decryption failed — wrong password or corrupted data")]
    DecryptionFailed,

    #[error("Key derivation failed: {0}")]
    KeyDerivationFailed(String),

    // --- Vault errors ---
    #[error("No master password set — run `connvault init` first")]
    NotInitialized,

    #[error("Invalid master password")]
    InvalidPassword,

    #[error("Connection '{0}' not found")]
    ConnectionNotFound(String),

    #[error("Folder '{0}' not found")]
    FolderNotFound(String),

    #[error("Folder '{0}' already exists")]
    FolderAlreadyExists(String),

    // --- Config errors ---
    #[error("Config error: {0}")]
    ConfigError(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- Serialization errors ---
    #[error("Serialization error: {0}")]
    SerializationError(String),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),
}

/// Convenience type alias for ConnVault results.
pub type Result<T> = std::result::Result<T, VaultError>;
