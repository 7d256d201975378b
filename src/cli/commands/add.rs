//! `connvault add`: store a new connection profile.

use crate::cli::output;
use crate::cli::{unlock, Cli};
use crate::errors::{Result, VaultError};
use crate::vault::{Connection, ConnectionType, ROOT_FOLDER};

/// Fields collected from the command line for a new connection.
pub struct NewConnection<'a> {
    pub name: &'a str,
    pub kind: &'a str,
    pub host: &'a str,
    pub port: Option<u16>,
    pub username: Option<&'a str>,
    pub password: Option<&'a str>,
    pub ask_password: bool,
    pub key_file: Option<&'a str>,
    pub folder: Option<&'a str>,
    pub tags: &'a [String],
    pub custom_command: Option<&'a str>,
    pub notes: Option<&'a str>,
    pub favorite: bool,
}

/// Execute the `add` command.
pub fn execute(cli: &Cli, args: &NewConnection<'_>) -> Result<()> {
    let kind: ConnectionType = args.kind.parse()?;
    if args.name.trim().is_empty() {
        return Err(VaultError::CommandFailed("connection name cannot be empty".into()));
    }
    if args.host.trim().is_empty() {
        return Err(VaultError::CommandFailed("host cannot be empty".into()));
    }

    let mut vault = unlock(cli)?;

    let password = if args.ask_password {
        Some(
            dialoguer::Password::new()
                .with_prompt(format!("Password for {}", args.name))
                .interact()
                .map_err(|e| VaultError::CommandFailed(format!("input prompt: {e}")))?,
        )
    } else {
        if args.password.is_some() {
            output::warning("Password provided on command line — it may appear in shell history.");
        }
        args.password.map(str::to_string)
    };

    let folder = match args.folder {
        Some(f) => f.to_string(),
        None => vault
            .manager
            .load_settings()?
            .default_folder
            .unwrap_or_else(|| ROOT_FOLDER.to_string()),
    };

    let mut conn = Connection::new(args.name, kind, args.host);
    conn.port = args.port;
    conn.username = args.username.map(str::to_string);
    conn.password = password;
    conn.key_file = args.key_file.map(str::to_string);
    conn.folder = folder;
    conn.tags = args.tags.to_vec();
    conn.custom_command = args.custom_command.map(str::to_string);
    conn.notes = args.notes.map(str::to_string);
    conn.favorite = args.favorite;

    let id = vault.dataset.add_connection(conn)?;
    vault.save()?;

    output::success(&format!(
        "Connection '{}' added ({id}, {} total)",
        args.name,
        vault.dataset.connections.len()
    ));
    Ok(())
}
