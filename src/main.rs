//! oidc-login - OpenID Connect login resolution CLI
//!
#![doc = "Main entry point for the oidc-login binary."]

use anyhow::Result;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use oidc_login::cli::{Cli, Commands};
use oidc_login::commands;
use oidc_login::config::Config;

fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse_args();

    // Initialize tracing
    init_tracing(cli.verbose, cli.json_logs);

    // Load configuration
    let config_path = cli.config.as_deref().unwrap_or("config/config.yaml");
    let config = Config::load(config_path, &cli)?;

    // Validate configuration
    config.validate()?;

    let output = match &cli.command {
        Commands::Resolve { .. } => {
            tracing::debug!("Resolving grant strategy");
            commands::resolve::run_resolve(&config)?
        }
        Commands::Plan { .. } => {
            tracing::debug!("Resolving login plan");
            commands::plan::run_plan(&config)?
        }
    };
    println!("{}", output);
    Ok(())
}

/// Initialize tracing subscriber with environment filter
///
/// Logs go to stderr so stdout carries only the JSON output.
fn init_tracing(verbose: bool, json_logs: bool) {
    let default_level = if verbose {
        "oidc_login=debug"
    } else {
        "oidc_login=info"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let json_layer = json_logs.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
    });
    let text_layer =
        (!json_logs).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}
