//! CLI module: Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use std::path::PathBuf;

use clap::Parser;

use zeroize::Zeroizing;

use crate::config::Settings;
use crate::crypto::CipherEngine;
use crate::errors::{Result, VaultError};
use crate::vault::{Dataset, VaultManager};

/// Minimum password length to prevent trivially weak passwords.
const MIN_PASSWORD_LEN: usize = 8;

/// Environment variable consulted before prompting for the master password.
pub const PASSWORD_ENV: &str = "CONNVAULT_PASSWORD";

/// Environment variable consulted before prompting for a new master password.
pub const NEW_PASSWORD_ENV: &str = "CONNVAULT_NEW_PASSWORD";

/// ConnVault CLI: encrypted remote-connection vault.
#[derive(Parser)]
#[command(
    name = "connvault",
    about = "Encrypted vault for SSH/RDP/VNC connection profiles",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Vault data directory (default: platform data dir + /connvault)
    #[arg(long, env = "CONNVAULT_DATA_DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Print debug logs to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Set the master password for a new vault
    Init {
        /// Overwrite an existing master password (existing data stays
        /// encrypted under the old one)
        #[arg(long)]
        force: bool,
    },

    /// List connections
    List {
        /// Only show connections in this folder
        #[arg(long)]
        folder: Option<String>,
        /// Only show connections with this tag
        #[arg(long)]
        tag: Option<String>,
    },

    /// Add a connection
    Add {
        /// Display name
        #[arg(long)]
        name: String,
        /// ssh, rdp, vnc, anydesk, or teamviewer
        #[arg(long = "type")]
        kind: String,
        /// Host name, IP address, or remote ID
        #[arg(long)]
        host: String,
        #[arg(long)]
        port: Option<u16>,
        #[arg(long)]
        username: Option<String>,
        /// Password to store (omit and use --ask-password for a prompt)
        #[arg(long)]
        password: Option<String>,
        /// Prompt for the connection password
        #[arg(long, conflicts_with = "password")]
        ask_password: bool,
        /// Path to an SSH private key
        #[arg(long)]
        key_file: Option<String>,
        /// Folder path (default: settings.defaultFolder or /)
        #[arg(long)]
        folder: Option<String>,
        /// Tag (repeatable)
        #[arg(long = "tag")]
        tags: Vec<String>,
        #[arg(long)]
        custom_command: Option<String>,
        #[arg(long)]
        notes: Option<String>,
        #[arg(long)]
        favorite: bool,
    },

    /// Show a connection's details
    Show {
        /// Connection id or name
        target: String,
        /// Print the stored password in clear text
        #[arg(long)]
        reveal: bool,
    },

    /// Remove a connection
    Remove {
        /// Connection id or name
        target: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Toggle a connection's favorite flag
    Favorite {
        /// Connection id or name
        target: String,
    },

    /// Mark a connection as used just now
    Touch {
        /// Connection id or name
        target: String,
    },

    /// Manage folders
    Folder {
        #[command(subcommand)]
        action: FolderAction,
    },

    /// Manage tags
    Tag {
        #[command(subcommand)]
        action: TagAction,
    },

    /// Change the master password (re-encrypts all data)
    Passwd,

    /// View or change plaintext settings
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Folder subcommands.
#[derive(clap::Subcommand)]
pub enum FolderAction {
    /// List folders
    List,
    /// Add a folder
    Add {
        /// Folder path (e.g. /servers/prod)
        path: String,
        /// Display name
        name: String,
    },
    /// Remove a folder (its connections move to /)
    Remove {
        /// Folder path
        path: String,
    },
}

/// Tag subcommands.
#[derive(clap::Subcommand)]
pub enum TagAction {
    /// List tags
    List,
    /// Add a tag
    Add { tag: String },
    /// Remove a tag from the vault and every connection
    Remove { tag: String },
    /// Rename a tag everywhere
    Rename { old: String, new: String },
}

/// Settings subcommands.
#[derive(clap::Subcommand)]
pub enum SettingsAction {
    /// Print current settings
    Show,
    /// Change one setting (camelCase key, e.g. autoLockMinutes)
    Set { key: String, value: String },
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Resolve the data directory from the CLI arguments.
///
/// Order: `--data-dir` / `CONNVAULT_DATA_DIR`, then the platform data
/// directory, then `./connvault-data`.
pub fn data_dir(cli: &Cli) -> PathBuf {
    if let Some(dir) = &cli.data_dir {
        return dir.clone();
    }
    dirs::data_dir()
        .map(|p| p.join("connvault"))
        .unwrap_or_else(|| PathBuf::from("connvault-data"))
}

/// Build a `VaultManager` for the CLI's data directory.
///
/// The KDF round count for new blobs comes from `settings.json`.  An
/// unreadable settings file never locks the vault: defaults are used
/// and a warning is logged.
pub fn vault_manager(cli: &Cli) -> Result<VaultManager> {
    let dir = data_dir(cli);
    let bootstrap = VaultManager::new(&dir, CipherEngine::default());
    let settings = match bootstrap.load_settings() {
        Ok(settings) => settings,
        Err(e) => {
            tracing::warn!(error = %e, "ignoring unreadable settings, using defaults");
            Settings::default()
        }
    };
    Ok(VaultManager::new(
        dir,
        CipherEngine::new(settings.kdf_params()),
    ))
}

/// An unlocked vault: manager, the password that unlocked it, and the
/// decrypted dataset.
pub struct Unlocked {
    pub manager: VaultManager,
    pub password: Zeroizing<String>,
    pub dataset: Dataset,
}

impl Unlocked {
    /// Re-encrypt and persist the dataset.
    pub fn save(&self) -> Result<()> {
        self.manager.save(&self.dataset, &self.password)
    }
}

/// Prompt for the master password, verify it, and load the dataset.
pub fn unlock(cli: &Cli) -> Result<Unlocked> {
    let manager = vault_manager(cli)?;
    if !manager.has_master_password() {
        return Err(VaultError::NotInitialized);
    }

    let password = prompt_password()?;
    if !manager.verify_master_password(&password) {
        return Err(VaultError::InvalidPassword);
    }

    let dataset = manager.load(&password)?;
    Ok(Unlocked {
        manager,
        password,
        dataset,
    })
}

/// Get the master password, trying in order:
/// 1. `CONNVAULT_PASSWORD` env var (scripting)
/// 2. Interactive prompt
///
/// Returns `Zeroizing<String>` so the password is wiped from memory on drop.
pub fn prompt_password() -> Result<Zeroizing<String>> {
    if let Ok(pw) = std::env::var(PASSWORD_ENV) {
        if !pw.is_empty() {
            return Ok(Zeroizing::new(pw));
        }
    }

    let pw = dialoguer::Password::new()
        .with_prompt("Enter master password")
        .interact()
        .map_err(|e| VaultError::CommandFailed(format!("password prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

/// Prompt for a new password with confirmation.
///
/// `env_var` is checked first for scripted usage.  Enforces a minimum
/// password length.
pub fn prompt_new_password(env_var: &str) -> Result<Zeroizing<String>> {
    if let Ok(pw) = std::env::var(env_var) {
        if !pw.is_empty() {
            check_password_strength(&pw)?;
            return Ok(Zeroizing::new(pw));
        }
    }

    loop {
        let password = dialoguer::Password::new()
            .with_prompt("Choose master password")
            .with_confirmation(
                "Confirm master password",
                "Passwords do not match, try again",
            )
            .interact()
            .map_err(|e| VaultError::CommandFailed(format!("password prompt: {e}")))?;

        if let Err(e) = check_password_strength(&password) {
            output::warning(&format!("{e}. Try again."));
            continue;
        }

        return Ok(Zeroizing::new(password));
    }
}

/// Reject passwords shorter than the minimum length.
pub fn check_password_strength(password: &str) -> Result<()> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(VaultError::CommandFailed(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_dir_prefers_flag() {
        let cli = Cli::parse_from(["connvault", "--data-dir", "/tmp/cv", "passwd"]);
        assert_eq!(data_dir(&cli), PathBuf::from("/tmp/cv"));
    }

    #[test]
    fn broken_settings_fall_back_to_defaults() {
        let tmp = tempfile::TempDir::new().unwrap();
        std::fs::write(tmp.path().join("settings.json"), "{ broken").unwrap();

        let cli = Cli::parse_from([
            "connvault",
            "--data-dir",
            tmp.path().to_str().unwrap(),
            "list",
        ]);
        let manager = vault_manager(&cli).unwrap();
        assert_eq!(manager.engine().params(), crate::crypto::KdfParams::default());
    }

    #[test]
    fn short_passwords_rejected() {
        assert!(check_password_strength("short").is_err());
        assert!(check_password_strength("long-enough").is_ok());
    }

    #[test]
    fn password_length_counts_characters() {
        // Eight characters, more than eight bytes.
        assert!(check_password_strength("äöüäöüäö").is_ok());
    }

    #[test]
    fn add_parses_repeated_tags() {
        let cli = Cli::parse_from([
            "connvault", "add", "--name", "db", "--type", "ssh", "--host", "db.lan", "--tag",
            "prod", "--tag", "db",
        ]);
        match cli.command {
            Commands::Add { tags, .. } => assert_eq!(tags, vec!["prod", "db"]),
            _ => panic!("expected add"),
        }
    }
}
