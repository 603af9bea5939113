use clap::Parser;
use pwvault::cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    pwvault::logging::init(cli.verbose);

    let result = match cli.command {
        None | Some(Commands::Shell) => pwvault::cli::commands::shell::execute(&cli),
        Some(Commands::Init) => pwvault::cli::commands::init::execute(&cli),
        Some(Commands::Add {
            ref name,
            ref username,
            ref notes,
            ref secret,
        }) => pwvault::cli::commands::add::execute(
            &cli,
            name,
            username.as_deref(),
            notes.as_deref(),
            secret.as_deref(),
        ),
        Some(Commands::Get { id }) => pwvault::cli::commands::get::execute(&cli, id),
        Some(Commands::Show { id }) => pwvault::cli::commands::show::execute(&cli, id),
        Some(Commands::List) => pwvault::cli::commands::list::execute(&cli),
        Some(Commands::Delete { id, force }) => {
            pwvault::cli::commands::delete::execute(&cli, id, force)
        }
    };

    if let Err(e) = result {
        tracing::debug!(error = ?e, "command failed");
        pwvault::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}
