// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! SkyLog API Server
//!
//! Serves the flight log, travel stats and free-text flight parsing to the
//! SkyLog frontend.

use skylog::{
    config::Config,
    services::{DisabledParser, FlightParser, GeminiParser},
    storage::{FileStore, KeyValueStore},
    time_utils::SystemClock,
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(port = config.port, "Starting SkyLog API");

    // Persisted documents live under the data directory
    let file_store = FileStore::new(&config.data_dir);
    tracing::info!(path = %file_store.dir().display(), "Using file storage");
    let storage: Arc<dyn KeyValueStore> = Arc::new(file_store);

    let parser: Arc<dyn FlightParser> = match &config.gemini_api_key {
        Some(key) => {
            tracing::info!(model = %config.gemini_model, "Gemini text parsing enabled");
            Arc::new(GeminiParser::new(key.clone(), config.gemini_model.clone()))
        }
        None => {
            tracing::warn!("GEMINI_API_KEY not set, text parsing disabled");
            Arc::new(DisabledParser)
        }
    };

    // Build shared state
    let state = Arc::new(AppState::new(
        config.clone(),
        storage,
        parser,
        Arc::new(SystemClock),
    ));
    tracing::info!(
        flights = state.flights.read().await.list().len(),
        "Flight log ready"
    );

    // Build router
    let app = skylog::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("skylog=debug,info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(format)
        .init();
}
