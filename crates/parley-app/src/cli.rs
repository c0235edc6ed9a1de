use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for parley
#[derive(Parser)]
#[command(name = "parley")]
#[command(about = "Parley - a tiny intent-driven chat service and client")]
#[command(version = "0.1.0")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Run the reply service (with the embedded chat page) instead of the client
    #[arg(long)]
    pub web: bool,

    /// Address the reply service binds to
    #[arg(
        long,
        value_name = "ADDR",
        env = "PARLEY_LISTEN",
        default_value = "127.0.0.1:5000"
    )]
    pub listen: String,

    /// Base URL of the reply service the client talks to
    #[arg(
        long,
        value_name = "URL",
        env = "PARLEY_API_URL",
        default_value = "http://127.0.0.1:5000"
    )]
    pub api_url: String,

    /// Intent definition file to use instead of the embedded set
    #[arg(long, value_name = "PATH")]
    pub intents: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Send a single message and print the exchange
    Ask {
        /// The message to send
        message: String,
    },
}
