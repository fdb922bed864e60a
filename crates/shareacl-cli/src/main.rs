use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

mod cli;
mod commands;
mod output;
mod store;

#[derive(Debug)]
pub struct AppContext {
    pub config: shareacl_config::AclConfig,
    pub store_path: PathBuf,
}

fn main() {
    if let Err(error) = run() {
        eprintln!("shareacl error: {error:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    let flags = cli.global_flags();

    let config = shareacl_config::AclConfig::load_with_dotenv()
        .context("failed to load shareacl configuration")?;
    init_tracing(flags.quiet, flags.verbose, &config.general.log_level)?;

    let store_path = flags
        .store
        .clone()
        .unwrap_or_else(|| config.store.path_buf());
    tracing::debug!(store = %store_path.display(), "resolved ACL store");

    let ctx = AppContext { config, store_path };
    commands::dispatch::dispatch(cli.command, &ctx, &flags)
}

fn init_tracing(quiet: bool, verbose: bool, configured: &str) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        configured
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("SHAREACL_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}
