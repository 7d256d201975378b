use clap::Parser;
use connvault::cli::commands::{self, add::NewConnection};
use connvault::cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Init { force } => commands::init::execute(&cli, force),
        Commands::List {
            ref folder,
            ref tag,
        } => commands::list::execute(&cli, folder.as_deref(), tag.as_deref()),
        Commands::Add {
            ref name,
            ref kind,
            ref host,
            port,
            ref username,
            ref password,
            ask_password,
            ref key_file,
            ref folder,
            ref tags,
            ref custom_command,
            ref notes,
            favorite,
        } => commands::add::execute(
            &cli,
            &NewConnection {
                name,
                kind,
                host,
                port,
                username: username.as_deref(),
                password: password.as_deref(),
                ask_password,
                key_file: key_file.as_deref(),
                folder: folder.as_deref(),
                tags,
                custom_command: custom_command.as_deref(),
                notes: notes.as_deref(),
                favorite,
            },
        ),
        Commands::Show { ref target, reveal } => commands::show::execute(&cli, target, reveal),
        Commands::Remove { ref target, force } => commands::remove::execute(&cli, target, force),
        Commands::Favorite { ref target } => commands::favorite::execute(&cli, target),
        Commands::Touch { ref target } => commands::favorite::execute_touch(&cli, target),
        Commands::Folder { ref action } => commands::folder::execute(&cli, action),
        Commands::Tag { ref action } => commands::tag::execute(&cli, action),
        Commands::Passwd => commands::passwd::execute(&cli),
        Commands::Settings { ref action } => commands::settings::execute(&cli, action),
        Commands::Completions { shell } => commands::completions::execute(shell),
    };

    if let Err(e) = result {
        connvault::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}

/// Install the stderr log subscriber.  `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("connvault={level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
