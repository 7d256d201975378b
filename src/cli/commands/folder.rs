//! `connvault folder`: list, add and remove folders.

use comfy_table::{ContentArrangement, Table};

use crate::cli::output;
use crate::cli::{unlock, Cli, FolderAction};
use crate::errors::Result;

/// Execute a `folder` subcommand.
pub fn execute(cli: &Cli, action: &FolderAction) -> Result<()> {
    let mut vault = unlock(cli)?;

    match action {
        FolderAction::List => {
            let mut table = Table::new();
            table.set_content_arrangement(ContentArrangement::Dynamic);
            table.set_header(vec!["Path", "Name", "Connections"]);
            for f in &vault.dataset.folders {
                let count = vault
                    .dataset
                    .connections
                    .iter()
                    .filter(|c| c.folder == f.path)
                    .count();
                table.add_row(vec![f.path.clone(), f.name.clone(), count.to_string()]);
            }
            println!("{table}");
        }
        FolderAction::Add { path, name } => {
            vault.dataset.add_folder(path, name)?;
            vault.save()?;
            output::success(&format!("Folder '{path}' added"));
        }
        FolderAction::Remove { path } => {
            let moved = vault.dataset.delete_folder(path)?;
            vault.save()?;
            output::success(&format!("Folder '{path}' removed"));
            if moved > 0 {
                output::info(&format!("{moved} connection(s) moved to /"));
            }
        }
    }

    Ok(())
}
