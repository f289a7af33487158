//! Device web simulator binary.
//!
//! Serves a device image's web assets over HTTP and exposes the realtime
//! echo channel as a WebSocket endpoint on the same port, so the web UI
//! can be exercised in a browser without flashing hardware.

use std::{net::IpAddr, path::PathBuf};

use clap::Parser;
use espsim_server::SimulatorConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Serve device web assets with a websocket echo channel.
#[derive(Debug, Parser)]
#[command(name = "espsim", version, about)]
struct Args {
    /// Address to bind.
    #[arg(long, env = "ESPSIM_BIND", default_value = "0.0.0.0")]
    bind: IpAddr,

    /// Listening port.
    #[arg(long, env = "ESPSIM_PORT", default_value_t = 8080)]
    port: u16,

    /// Content root holding the device's web assets.
    #[arg(long, env = "ESPSIM_ROOT", default_value = ".")]
    root: PathBuf,

    /// Document substituted for the root path `/`.
    #[arg(long, default_value = "index.htm")]
    index: String,

    /// Body served when a requested file is absent.
    #[arg(long, default_value = "404.html")]
    fallback: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args = Args::parse();
    let config = SimulatorConfig {
        bind: args.bind,
        port: args.port,
        root: args.root,
        default_document: args.index,
        fallback_document: args.fallback,
    };

    espsim_server::serve(config).await?;
    Ok(())
}
