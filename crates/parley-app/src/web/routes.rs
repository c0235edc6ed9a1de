use axum::extract::State;
use axum::response::Html;
use axum::routing::{get, post};
use axum::{Json, Router};
use std::sync::Arc;
use tokio::sync::Mutex;

use parley_engine::Responder;
use parley_types::{AskRequest, ReplyEnvelope};

/// Application state shared across routes
#[derive(Clone)]
pub struct AppState {
    pub responder: Arc<Mutex<Responder>>,
}

/// Create router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/get", post(get_bot_response))
        .route("/", get(serve_index))
        .with_state(state)
}

/// POST /get - exchange one message for one reply
async fn get_bot_response(
    State(state): State<AppState>,
    Json(request): Json<AskRequest>,
) -> Json<ReplyEnvelope> {
    let reply = state.responder.lock().await.respond(&request.message);
    Json(ReplyEnvelope { reply: Some(reply) })
}

/// GET / - the embedded chat page
async fn serve_index() -> Html<&'static str> {
    Html(include_str!("index.html"))
}
