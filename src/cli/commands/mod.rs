//! One module per subcommand.  Each exposes an `execute` entry point.

pub mod add;
pub mod completions;
pub mod favorite;
pub mod folder;
pub mod init;
pub mod list;
pub mod passwd;
pub mod remove;
pub mod settings;
pub mod show;
pub mod tag;
