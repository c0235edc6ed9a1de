use anyhow::Result;
use clap::Parser;

use parley::app::{run_ask_mode, run_repl_mode};
use parley::web::run_web_server;
use parley::{setup_from_cli, Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file if it exists
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = setup_from_cli(&cli)?;

    if let Some(ref command) = cli.command {
        match command {
            Commands::Ask { message } => return run_ask_mode(message, &config).await,
        }
    }

    if cli.web {
        return run_web_server(&config).await;
    }

    run_repl_mode(&config).await
}
