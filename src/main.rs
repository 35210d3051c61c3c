//! Netsec Validation - Main Entry Point

use clap::Parser;
use netsec_validation::cli::{cmd_schema, cmd_validate, Cli, Commands};

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "netsec_validation=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate(args) => {
            cmd_validate(&args)?;
        }
        Commands::Schema { schema } => {
            cmd_schema(&schema)?;
        }
    }

    Ok(())
}
