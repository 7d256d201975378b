//! Plaintext application settings (`settings.json`).

pub mod settings;

pub use settings::{Settings, Theme};
