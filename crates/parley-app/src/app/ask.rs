use anyhow::Result;
use std::sync::Arc;

use parley_client::{ChatClient, HttpReplyTransport};

use crate::app::repl::TermView;
use crate::config::AppConfig;

/// Run one-shot ask mode: a single exchange, printed, then exit
pub async fn run_ask_mode(message: &str, config: &AppConfig) -> Result<()> {
    let transport = Arc::new(HttpReplyTransport::new(&config.api_url));
    let client = ChatClient::new(transport, Box::new(TermView::with_user_echo()));

    client.send_message(message).await;

    Ok(())
}
