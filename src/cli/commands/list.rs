//! `connvault list`: display connections in a table.

use crate::cli::output;
use crate::cli::{unlock, Cli};
use crate::errors::Result;

/// Execute the `list` command.
pub fn execute(cli: &Cli, folder: Option<&str>, tag: Option<&str>) -> Result<()> {
    let vault = unlock(cli)?;

    let mut shown: Vec<_> = vault
        .dataset
        .connections
        .iter()
        .filter(|c| folder.map_or(true, |f| c.folder == f))
        .filter(|c| tag.map_or(true, |t| c.tags.iter().any(|ct| ct == t)))
        .collect();

    // Favorites first, then by name.
    shown.sort_by(|a, b| {
        b.favorite
            .cmp(&a.favorite)
            .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
    });

    output::info(&format!(
        "{} of {} connection(s)",
        shown.len(),
        vault.dataset.connections.len()
    ));
    output::print_connections_table(&shown);

    Ok(())
}
