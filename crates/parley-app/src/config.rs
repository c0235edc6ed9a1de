use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::path::PathBuf;

use parley_engine::IntentSet;

use crate::cli::Cli;

/// Resolved application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the reply service the client talks to
    pub api_url: String,
    /// Bind address for the reply service mode
    pub listen: SocketAddr,
    /// Optional intents file replacing the embedded definition
    pub intents_path: Option<PathBuf>,
}

/// Build the application configuration from parsed CLI arguments
pub fn setup_from_cli(cli: &Cli) -> Result<AppConfig> {
    let listen: SocketAddr = cli
        .listen
        .parse()
        .with_context(|| format!("invalid listen address: {}", cli.listen))?;

    Ok(AppConfig {
        api_url: cli.api_url.trim_end_matches('/').to_string(),
        listen,
        intents_path: cli.intents.clone(),
    })
}

/// Load the configured intent definition, or the embedded default
pub fn load_intents(config: &AppConfig) -> Result<IntentSet> {
    match &config.intents_path {
        Some(path) => IntentSet::load(path)
            .with_context(|| format!("failed to load intents from {}", path.display())),
        None => IntentSet::embedded().context("embedded intent definition is invalid"),
    }
}
