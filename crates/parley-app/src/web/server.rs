use anyhow::{Context, Result};
use colored::Colorize;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::cors::{Any, CorsLayer};

use parley_engine::Responder;

use crate::config::{load_intents, AppConfig};
use crate::web::routes::{create_router, AppState};

/// Reply service instance
pub struct WebServer {
    bind_addr: SocketAddr,
    responder: Responder,
}

impl WebServer {
    pub fn new(bind_addr: SocketAddr, responder: Responder) -> Self {
        Self {
            bind_addr,
            responder,
        }
    }

    /// Serve until the process is stopped
    pub async fn start(self) -> Result<()> {
        let state = AppState {
            responder: Arc::new(Mutex::new(self.responder)),
        };

        // CORS layer for development
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        let app = create_router(state).layer(cors);

        println!(
            "{} Reply service on http://{}",
            "🌐".bright_cyan(),
            self.bind_addr
        );
        println!(
            "{}",
            format!("   Chat page: http://{}/", self.bind_addr).bright_black()
        );
        println!(
            "{}",
            format!("   Endpoint:  POST http://{}/get", self.bind_addr).bright_black()
        );

        let listener = tokio::net::TcpListener::bind(&self.bind_addr)
            .await
            .with_context(|| format!("failed to bind {}", self.bind_addr))?;
        axum::serve(listener, app).await?;

        Ok(())
    }
}

/// Build the responder from configuration and run the service
pub async fn run_web_server(config: &AppConfig) -> Result<()> {
    let intents = load_intents(config)?;
    let responder = Responder::new(intents)?;

    WebServer::new(config.listen, responder).start().await
}
