//! Vault module: encrypted connection storage.
//!
//! This module provides:
//! - `Dataset`, `Connection` and `Folder` types (`dataset`)
//! - `VaultManager` for initializing, unlocking, saving and rotating a vault (`store`)

pub mod dataset;
pub mod store;

// Re-export the most commonly used items.
pub use dataset::{Connection, ConnectionType, Dataset, Folder, ROOT_FOLDER};
pub use store::VaultManager;
