//! Application shell for parley
//!
//! Ties the chat client and the intent engine together behind one binary:
//! an interactive REPL, a one-shot ask mode, and the reply service with
//! its embedded chat page.

pub mod app;
pub mod cli;
pub mod config;
pub mod web;

pub use cli::{Cli, Commands};
pub use config::{load_intents, setup_from_cli, AppConfig};
