mod config;
mod errors;
mod export;
mod extract;
mod layout;
mod llm_client;
mod optimize;
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
use crate::layout::default_doc_style;
use crate::llm_client::LlmClient;
use crate::optimize::{LlmOptimizer, OptimizeBackend};
use crate::routes::build_router;
use crate::session::SessionStore;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Reforge API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize the LLM-backed optimizer
    let llm = LlmClient::new(config.anthropic_api_key.clone());
    let optimizer: Arc<dyn OptimizeBackend> = Arc::new(LlmOptimizer::new(llm));
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    // Transient in-memory editor sessions
    let sessions = SessionStore::default();

    // Layout defaults: Helvetica pair on A4 with 50pt margins
    let doc_style = default_doc_style();
    info!(
        "Layout page config: {}x{}pt, {}pt margins",
        doc_style.page_width, doc_style.page_height, doc_style.margin
    );

    // Build app state
    let state = AppState {
        optimizer,
        sessions,
        config: config.clone(),
        doc_style,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
