mod cli;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Cli, Commands};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "docsync=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let cli = Cli::parse();
    let config = cli::load_config(&cli.root, cli.config.as_deref())?;

    match cli.command.unwrap_or(Commands::Update) {
        Commands::Update => {
            cli::update(&cli.root, &config)?;
        }
        Commands::Check { format } => {
            cli::check(&cli.root, &config, &format)?;
        }
        Commands::Types => {
            cli::print_types(&cli.root, &config)?;
        }
    }

    Ok(())
}
