use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use log::info;
use tokio::net::TcpListener;

use crate::config::Config;
use crate::core_network::network;

/// Runs the server with the provided configuration.
///
/// Resolves the served root directory, binds the listen address and hands
/// the listener to the accept loop.
pub async fn run(config: Config) -> Result<()> {
    info!("Starting server with config: {:?}", config);

    let root_dir = PathBuf::from(&config.server.root_dir)
        .canonicalize()
        .with_context(|| {
            format!(
                "Failed to resolve root directory: {}",
                config.server.root_dir
            )
        })?;
    info!("Serving root directory {}", root_dir.display());

    let listen = format!(
        "{}:{}",
        config.server.listen_address, config.server.listen_port
    );
    let listener = TcpListener::bind(&listen)
        .await
        .with_context(|| format!("Failed to bind listen address: {}", listen))?;

    network::start_server(listener, Arc::new(config), root_dir).await
}
