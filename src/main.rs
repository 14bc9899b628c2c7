use anyhow::Result;
use clap::Parser;
use env_logger::{Builder, Env};
use std::io::Write;

use rouillefsd::config::{load_config, Config};
use rouillefsd::core_cli::Cli;
use rouillefsd::server;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let args = Cli::parse();

    // Initialize the logger with a custom format
    let default_level = if args.verbose { "debug" } else { "info" };
    Builder::from_env(Env::default().default_filter_or(default_level))
        .format(|buf, record| {
            let timestamp = buf.timestamp();
            writeln!(
                buf,
                "[{}] [{}] {}",
                timestamp,
                record.level(),
                record.args()
            )
        })
        .init();

    // Load configuration from the TOML file, or fall back to defaults
    let mut config = if args.config.is_empty() {
        Config::default()
    } else {
        load_config(&args.config)?
    };

    // Apply CLI overrides
    if let Some(port) = args.port {
        config.server.listen_port = port;
    }
    if let Some(root) = args.root {
        config.server.root_dir = root;
    }

    // Run the server
    server::run(config).await?;

    Ok(())
}
