//! EatSavvy CLI - Command-line client for the EatSavvy restaurant directory.

use clap::Parser;
use eatsavvy_cli::commands;
use eatsavvy_cli::repl;
use eatsavvy_cli::{Cli, Command, Config, Formatter};
use eatsavvy_sdk::{DirectoryClient, DirectorySession};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Log to stderr, honouring `RUST_LOG`; `--verbose` raises the default to debug.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> eatsavvy_cli::Result<()> {
    // Load or create config
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Falling back to default configuration");
            Config::default()
        }),
    };

    // Override profile if specified
    if let Some(profile_name) = cli.profile {
        config.switch_profile(profile_name)?;
    }

    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    // Profile management works without a reachable service
    let command = match cli.command.unwrap_or(Command::Repl) {
        Command::Profile(args) => {
            println!("{}", commands::execute_profile(args, &mut config, &formatter)?);
            return Ok(());
        }
        other => other,
    };

    let profile = config.get_active_profile()?.clone();
    let offset = profile.utc_offset();
    let client = DirectoryClient::new(profile.client_config())?;
    let mut session = DirectorySession::new(client);

    let output = match command {
        Command::Repl => {
            repl::run_repl(&mut session, &mut config, offset, &formatter).await?;
            return Ok(());
        }
        Command::Ping => commands::execute_ping(session.service(), &formatter).await?,
        Command::List(args) => commands::execute_list(args, &mut session, offset, &formatter).await?,
        Command::Search(args) => commands::execute_search(args, &mut session, offset, &formatter).await?,
        Command::Enrich(args) => commands::execute_enrich(args, &mut session, offset, &formatter).await?,
        Command::Hours(args) => commands::execute_hours(args, &mut session, offset, &formatter).await?,
        Command::Profile(_) => unreachable!(),
    };

    println!("{}", output);
    Ok(())
}
