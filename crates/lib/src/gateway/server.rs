//! Gateway HTTP server: health probe and the chat completion endpoint.

use crate::config::{self, Config};
use crate::gateway::fallback::FallbackChain;
use crate::gateway::protocol::{parse_chat_request, ChatErrorReply};
use anyhow::{Context, Result};
use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;

/// Shared, read-only state for handlers. Requests never mutate it.
#[derive(Clone)]
pub struct GatewayState {
    pub config: Arc<Config>,
    pub chain: Arc<FallbackChain>,
}

/// Routes: `GET /` health, `POST /api/chat` completion.
pub fn router(state: GatewayState) -> Router {
    Router::new()
        .route("/", get(health_http))
        .route("/api/chat", post(chat_http))
        .with_state(state)
}

/// Run the gateway with the OpenRouter model chain from config.
/// Binds to config.gateway.bind:config.gateway.port and blocks until shutdown (e.g. Ctrl+C).
pub async fn run_gateway(config: Config) -> Result<()> {
    let api_key = config::resolve_api_key(&config);
    if api_key.is_none() {
        log::warn!(
            "no provider api key (set EQUIED_API_KEY or provider.apiKey); every request will get the static fallback"
        );
    }
    let chain = FallbackChain::from_config(&config, api_key);
    run_gateway_with_chain(config, chain).await
}

/// Run the gateway with an explicit chain.
pub async fn run_gateway_with_chain(config: Config, chain: FallbackChain) -> Result<()> {
    log::info!("model chain: {}", chain.labels().join(" -> "));
    let bind_addr = format!("{}:{}", config.gateway.bind.trim(), config.gateway.port);
    let state = GatewayState {
        config: Arc::new(config),
        chain: Arc::new(chain),
    };
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("binding to {}", bind_addr))?;
    log::info!("gateway listening on {}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("gateway server exited")?;
    log::info!("gateway stopped");
    Ok(())
}

/// Future that completes when the process should shut down (SIGINT or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    log::info!("shutdown signal received, draining connections");
}

/// GET / returns a simple health JSON (for probes).
async fn health_http(State(state): State<GatewayState>) -> Json<serde_json::Value> {
    Json(json!({
        "runtime": "running",
        "port": state.config.gateway.port,
        "models": state.chain.labels(),
    }))
}

/// POST /api/chat: provider failures are absorbed by the chain; only an unparseable body is a 500.
async fn chat_http(State(state): State<GatewayState>, body: Bytes) -> Response {
    let req = match parse_chat_request(&body) {
        Ok(r) => r,
        Err(e) => {
            log::warn!("chat: rejecting request: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ChatErrorReply::new(e.to_string())),
            )
                .into_response();
        }
    };
    log::debug!("chat: {} message(s)", req.messages.len());
    Json(state.chain.complete(&req.messages).await).into_response()
}
