use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::crypto::kdf::{DEFAULT_ITERATIONS, MAX_ITERATIONS};
use crate::crypto::KdfParams;
use crate::errors::{Result, VaultError};

/// Colour scheme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    System,
}

/// Application settings, stored unencrypted in `settings.json`.
///
/// Every field has a sensible default so a missing or partial file
/// still loads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Folder new connections go into when none is given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_folder: Option<String>,

    /// VNC viewer to launch (default: RealVNC).
    #[serde(default = "default_vnc_client")]
    pub vnc_client: String,

    /// Minutes of inactivity before the caller should lock (default: 15).
    #[serde(default = "default_auto_lock_minutes")]
    pub auto_lock_minutes: u32,

    #[serde(default = "default_theme")]
    pub theme: Theme,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remember_database: Option<bool>,

    #[serde(default)]
    pub minimize_to_tray: bool,

    #[serde(default)]
    pub close_to_tray: bool,

    #[serde(default)]
    pub start_with_windows: bool,

    /// PBKDF2 round count for newly written blobs (default: 10 000).
    #[serde(default = "default_kdf_iterations")]
    pub kdf_iterations: u32,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_vnc_client() -> String {
    "RealVNC".to_string()
}

fn default_auto_lock_minutes() -> u32 {
    15
}

fn default_theme() -> Theme {
    Theme::Dark
}

fn default_kdf_iterations() -> u32 {
    DEFAULT_ITERATIONS
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_folder: None,
            vnc_client: default_vnc_client(),
            auto_lock_minutes: default_auto_lock_minutes(),
            theme: default_theme(),
            remember_database: None,
            minimize_to_tray: false,
            close_to_tray: false,
            start_with_windows: false,
            kdf_iterations: default_kdf_iterations(),
        }
    }
}

impl Settings {
    /// Load settings from `path`.
    ///
    /// If the file does not exist, defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)?;

        serde_json::from_str(&contents).map_err(|e| {
            VaultError::ConfigError(format!("Failed to parse {}: {e}", path.display()))
        })
    }

    /// Write settings to `path` as pretty JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| VaultError::SerializationError(format!("settings: {e}")))?;
        crate::vault::store::write_atomic(path, json.as_bytes())
    }

    /// Convert the KDF setting into crypto-layer params.
    ///
    /// Hand-edited values outside `DEFAULT_ITERATIONS..=MAX_ITERATIONS`
    /// are clamped into that range.
    pub fn kdf_params(&self) -> KdfParams {
        let iterations = self.kdf_iterations.clamp(DEFAULT_ITERATIONS, MAX_ITERATIONS);
        if iterations != self.kdf_iterations {
            tracing::warn!(
                configured = self.kdf_iterations,
                used = iterations,
                "kdfIterations out of range, clamped"
            );
        }
        KdfParams { iterations }
    }

    /// Update a single setting from its camelCase key and a string value.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "defaultFolder" => {
                self.default_folder = if value.is_empty() {
                    None
                } else {
                    Some(value.to_string())
                };
            }
            "vncClient" => self.vnc_client = value.to_string(),
            "autoLockMinutes" => self.auto_lock_minutes = parse_value(key, value)?,
            "theme" => {
                self.theme = serde_json::from_value(serde_json::Value::String(value.to_lowercase()))
                    .map_err(|_| {
                        VaultError::ConfigError(format!(
                            "invalid theme '{value}' — expected light, dark, or system"
                        ))
                    })?;
            }
            "rememberDatabase" => self.remember_database = Some(parse_value(key, value)?),
            "minimizeToTray" => self.minimize_to_tray = parse_value(key, value)?,
            "closeToTray" => self.close_to_tray = parse_value(key, value)?,
            "startWithWindows" => self.start_with_windows = parse_value(key, value)?,
            "kdfIterations" => {
                let n: u32 = parse_value(key, value)?;
                if !(DEFAULT_ITERATIONS..=MAX_ITERATIONS).contains(&n) {
                    return Err(VaultError::ConfigError(format!(
                        "kdfIterations must be between {DEFAULT_ITERATIONS} and {MAX_ITERATIONS}"
                    )));
                }
                self.kdf_iterations = n;
            }
            other => {
                return Err(VaultError::ConfigError(format!("unknown setting '{other}'")));
            }
        }
        Ok(())
    }
}

fn parse_value<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| VaultError::ConfigError(format!("invalid value '{value}' for {key}")))
}

// ── Tests ────────────────────────────────────────────────────────────
