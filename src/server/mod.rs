//! HTTP surface: one request type in, one response type out.
//!
//! Malformed or missing input never crashes resolution; an absent
//! `user_input` field is treated as the empty string and falls through the
//! pattern table to the fallback.

use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tracing::info;

use crate::intent::{ActionResult, Resolver};
use crate::session::SharedContext;

#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<Resolver>,
    pub context: SharedContext,
}

#[derive(Debug, Deserialize)]
pub struct ProcessTextRequest {
    #[serde(default)]
    pub user_input: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ProcessTextResponse {
    pub assistant_response: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/process_text", post(process_text))
        .route("/healthz", get(healthz))
        .with_state(state)
}

pub async fn serve(listen: &str, state: AppState) -> crate::error::Result<()> {
    let listener = TcpListener::bind(listen).await?;
    info!(addr = %listen, "voxd listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("shutdown signal received");
}

async fn healthz() -> &'static str {
    "ok"
}

async fn process_text(State(state): State<AppState>, body: String) -> Json<ProcessTextResponse> {
    // A malformed or missing input field never crashes resolution; it
    // degrades to the empty string and the fallback answers
    let request: ProcessTextRequest =
        serde_json::from_str(&body).unwrap_or(ProcessTextRequest { user_input: None });

    // Case-normalize once at the boundary; the resolver assumes it
    let utterance = request
        .user_input
        .unwrap_or_default()
        .trim()
        .to_lowercase();

    info!(utterance = %utterance, "received user input");

    let assistant_response = match state.resolver.resolve(&utterance, &state.context).await {
        ActionResult::Reply(text) => text,
        ActionResult::Failed(failure) => failure.user_message().to_string(),
    };

    Json(ProcessTextResponse { assistant_response })
}
