//! HTTP server for the device web simulator.
//!
//! Provides:
//! - `SimulatorConfig` - bind address and content-root settings
//! - The routing table: `/heap`, websocket upgrades, static assets
//! - `serve` - bind the socket and run until the process stops

pub mod config;
pub mod heap;
pub mod routes;

pub use config::SimulatorConfig;
pub use routes::{AppState, router};

use std::{net::SocketAddr, sync::Arc};

use espsim_assets::AssetStore;

/// Bind the listening socket and serve until the process is stopped.
///
/// # Errors
/// Returns an error when the socket cannot be bound or the accept loop
/// fails. Per-request failures never reach here.
pub async fn serve(config: SimulatorConfig) -> std::io::Result<()> {
    let addr = config.listen_addr();
    let assets = AssetStore::new(
        config.root,
        config.default_document,
        config.fallback_document,
    );
    let app = router(AppState {
        assets: Arc::new(assets),
    });

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("server listening on http://{addr}");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
}
