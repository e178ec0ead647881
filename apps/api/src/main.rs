mod analysis;
mod config;
mod errors;
mod extraction;
mod providers;
mod routes;
mod session;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::providers::{AnthropicBackend, CompletionBackend, OpenAiBackend};
use crate::routes::build_router;
use crate::session::SessionStore;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Matchlens API v{}", env!("CARGO_PKG_VERSION"));

    // Completion backends. Credentials are not validated here; a missing
    // key fails on the first call, not at startup.
    let openai: Arc<dyn CompletionBackend> =
        Arc::new(OpenAiBackend::new(config.openai_api_key.clone()));
    let claude: Arc<dyn CompletionBackend> =
        Arc::new(AnthropicBackend::new(config.anthropic_api_key.clone()));
    info!("Completion backends initialized (OpenAI, Claude)");

    let state = AppState {
        sessions: SessionStore::new(),
        openai,
        claude,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
