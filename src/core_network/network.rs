use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use log::{error, info};
use tokio::net::TcpListener;

use crate::config::Config;
use crate::session::Session;

/// Accept loop: one independent session task per inbound connection.
///
/// The listener is bound by the caller, so the bind address (including
/// port 0 in tests) stays out of this loop. Each accepted socket is owned
/// by exactly one spawned session; the loop itself blocks only on
/// `accept`.
pub async fn start_server(
    listener: TcpListener,
    config: Arc<Config>,
    root_dir: PathBuf,
) -> Result<()> {
    info!("Server listening on {}", listener.local_addr()?);

    loop {
        let (socket, addr) = listener.accept().await?;
        info!("New connection from {:?}", addr);

        let chunk_size = config.chunk_size();
        let root = root_dir.clone();

        tokio::spawn(async move {
            let mut session = Session::new(socket, root, chunk_size);
            if let Err(e) = session.run().await {
                error!("Session error for {:?}: {:?}", addr, e);
            }
            info!("Connection closed for {:?}", addr);
        });
    }
}
