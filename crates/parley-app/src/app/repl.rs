use anyhow::Result;
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::sync::Arc;

use parley_client::{ChatClient, HttpReplyTransport, TranscriptView};
use parley_types::{Message, Role};

use crate::config::AppConfig;

/// Terminal rendering collaborator.
///
/// Bot entries are printed as they arrive. User entries are skipped by
/// default: in the REPL the submitted line is already on screen at the
/// prompt. One-shot mode turns the echo on.
pub struct TermView {
    echo_user: bool,
}

impl TermView {
    pub fn new() -> Self {
        Self { echo_user: false }
    }

    pub fn with_user_echo() -> Self {
        Self { echo_user: true }
    }
}

impl TranscriptView for TermView {
    fn append(&mut self, message: &Message) {
        let label = format!("{}:", message.role.label());
        match message.role {
            Role::User if !self.echo_user => {}
            Role::User => {
                println!("{} {}", label.bright_green().bold(), message.text);
            }
            Role::Bot => {
                println!("{} {}", label.bright_magenta().bold(), message.text);
            }
        }
    }
}

/// Run interactive REPL mode
pub async fn run_repl_mode(config: &AppConfig) -> Result<()> {
    println!("{}", "💬 Parley".bright_cyan().bold());
    println!(
        "{}",
        format!("Reply service: {}", config.api_url).bright_black()
    );
    println!("{}", "Type 'exit' or 'quit' to leave.\n".bright_black());

    let transport = Arc::new(HttpReplyTransport::new(&config.api_url));
    let client = ChatClient::new(transport, Box::new(TermView::new()));

    let mut rl = DefaultEditor::new()?;

    loop {
        let readline = rl.readline(&format!("{} ", "You:".bright_green().bold()));

        match readline {
            Ok(line) => {
                let line = line.trim();

                if line.is_empty() {
                    continue;
                }

                if line == "exit" || line == "quit" {
                    println!("{}", "Goodbye!".bright_cyan());
                    break;
                }

                let _ = rl.add_history_entry(line);
                client.send_message(line).await;
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("{}", "Goodbye!".bright_cyan());
                break;
            }
            Err(err) => {
                eprintln!("{} Readline error: {}", "❌".bright_red(), err);
                break;
            }
        }
    }

    Ok(())
}
