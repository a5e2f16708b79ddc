mod chat;
mod config;
mod content;
mod errors;
mod llm_client;
mod models;
mod routes;
mod session;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::content::defaults;
use crate::llm_client::GeminiClient;
use crate::routes::build_router;
use crate::session::SessionGate;
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

    info!("Starting Vitrine API v{}", env!("CARGO_PKG_VERSION"));

    // Seed the in-memory content store. State lives for the process
    // lifetime only; a restart serves the built-in defaults again.
    let store = defaults::content_store();
    info!(
        "Content store seeded: {} skills, {} experiences, {} projects, {} certifications",
        store.skills.len(),
        store.experiences.len(),
        store.projects.len(),
        store.certifications.len()
    );

    // Session gate, optionally pre-provisioned from the environment
    let session = SessionGate::new(config.admin_key.clone());
    if session.is_provisioned() {
        info!("Admin key provisioned from environment");
    } else {
        info!("Admin key not provisioned; first provision call will claim it");
    }

    // Chat model client
    let chat = GeminiClient::new(config.gemini_api_key.clone());
    info!(
        "Chat model client initialized (model: {})",
        llm_client::CHAT_MODEL
    );

    let state = AppState::new(store, session, Arc::new(chat));

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
