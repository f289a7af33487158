//! Simulator configuration.

use std::{
    net::{IpAddr, Ipv4Addr, SocketAddr},
    path::PathBuf,
};

/// Configuration for the simulator server.
///
/// All of this is surface, not logic: the defaults mirror the device
/// firmware (port 8080, `index.htm`, `404.html`).
#[derive(Debug, Clone)]
pub struct SimulatorConfig {
    /// Address to bind.
    pub bind: IpAddr,
    /// Listening port.
    pub port: u16,
    /// Content root for static assets.
    pub root: PathBuf,
    /// Document substituted for the root path `/`.
    pub default_document: String,
    /// Body served when a requested file is absent.
    pub fallback_document: String,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            bind: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 8080,
            root: PathBuf::from("."),
            default_document: "index.htm".to_owned(),
            fallback_document: "404.html".to_owned(),
        }
    }
}

impl SimulatorConfig {
    /// Socket address to listen on.
    #[must_use]
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind, self.port)
    }
}
