//! `connvault show`: print one connection.

use crate::cli::output;
use crate::cli::{unlock, Cli};
use crate::errors::{Result, VaultError};

/// Execute the `show` command.
pub fn execute(cli: &Cli, target: &str, reveal: bool) -> Result<()> {
    let vault = unlock(cli)?;

    let conn = vault
        .dataset
        .find_connection(target)
        .ok_or_else(|| VaultError::ConnectionNotFound(target.to_string()))?;

    output::print_connection_detail(conn, reveal);
    Ok(())
}
