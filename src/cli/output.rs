//! Colored terminal output helpers.
//!
//! All user-facing output goes through these functions so we get
//! consistent styling across every command.

use comfy_table::{ContentArrangement, Table};
use console::style;

use crate::vault::Connection;

/// Print a green success message: "check_mark {msg}"
pub fn success(msg: &str) {
    println!("{} {}", style("\u{2713}").green().bold(), msg);
}

/// Print a red error message: "x_mark {msg}"
pub fn error(msg: &str) {
    eprintln!("{} {}", style("\u{2717}").red().bold(), msg);
}

/// Print a yellow warning: "warning_sign {msg}"
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("\u{26a0}").yellow().bold(), msg);
}

/// Print a blue info message: "info_sign {msg}"
pub fn info(msg: &str) {
    println!("{} {}", style("\u{2139}").blue().bold(), msg);
}

/// Print a dim tip/hint: "arrow {msg}"
pub fn tip(msg: &str) {
    println!("{} {}", style("\u{2192}").dim(), style(msg).dim());
}

/// Print a table of connections.  Secrets are never shown here.
pub fn print_connections_table(connections: &[&Connection]) {
    if connections.is_empty() {
        info("No connections to show.");
        tip("Run `connvault add --name <NAME> --type ssh --host <HOST>` to add one.");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["", "Name", "Type", "Host", "Folder", "Tags", "Last used"]);

    for c in connections {
        let host = match c.port {
            Some(port) => format!("{}:{port}", c.host),
            None => c.host.clone(),
        };
        table.add_row(vec![
            if c.favorite { "\u{2605}".to_string() } else { String::new() },
            c.name.clone(),
            c.kind.to_string(),
            host,
            c.folder.clone(),
            c.tags.join(", "),
            c.last_used
                .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|| "never".to_string()),
        ]);
    }

    println!("{table}");
}

/// Print every field of one connection.
pub fn print_connection_detail(c: &Connection, reveal: bool) {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);

    let mut row = |k: &str, v: String| {
        table.add_row(vec![k.to_string(), v]);
    };

    row("ID", c.id.clone());
    row("Name", c.name.clone());
    row("Type", c.kind.to_string());
    row("Host", c.host.clone());
    if let Some(port) = c.port {
        row("Port", port.to_string());
    }
    if let Some(user) = &c.username {
        row("Username", user.clone());
    }
    if let Some(pw) = &c.password {
        row(
            "Password",
            if reveal { pw.clone() } else { "********".to_string() },
        );
    }
    if let Some(key) = &c.key_file {
        row("Key file", key.clone());
    }
    if let Some(cmd) = &c.custom_command {
        row("Command", cmd.clone());
    }
    row("Folder", c.folder.clone());
    row("Tags", c.tags.join(", "));
    row("Favorite", if c.favorite { "yes" } else { "no" }.to_string());
    if let Some(notes) = &c.notes {
        row("Notes", notes.clone());
    }
    row(
        "Last used",
        c.last_used
            .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| "never".to_string()),
    );
    row("Created", c.created_at.format("%Y-%m-%d %H:%M:%S").to_string());
    row("Updated", c.updated_at.format("%Y-%m-%d %H:%M:%S").to_string());

    println!("{table}");
}
