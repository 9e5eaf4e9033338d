//! Swift VO HTTP Server Binary
//!
//! This is the main entry point for the ObjObsSAP / ObsLocTAP server.
//! It loads the configuration, builds the engine, sets up the HTTP router,
//! and starts serving requests.
//!
//! # Usage
//!
//! ```bash
//! # Run against the Swift API (default)
//! cargo run --bin swift-vo-server
//!
//! # Run with the in-memory engine
//! ENGINE_KIND=static cargo run --bin swift-vo-server
//! ```
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `VO_SERVER`: Public base URL echoed in responses
//! - `ENGINE_KIND`, `ENGINE_URL`, `ENGINE_TIMEOUT_SECS`: engine selection
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::net::SocketAddr;

use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use swift_vo::config::ServiceConfig;
use swift_vo::engine::EngineFactory;
use swift_vo::http::{create_router, AppState};
use swift_vo::services::mark_service_start;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    let started = mark_service_start();
    info!("Starting Swift VO server at {}", started);

    let config = ServiceConfig::load()?;
    let engine = EngineFactory::create(&config.engine)?;
    info!("Engine '{}' initialized", engine.name());

    let state = AppState::new(engine, &config.server.public_base_url);
    let app = create_router(state);

    let addr: SocketAddr = config.server.bind_address().parse()?;
    info!("Server listening on http://{}", addr);
    info!("Public base URL: {}", config.server.public_base_url);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
