use clap::Parser;

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(name = "rouillefsd", about = "A remote filesystem server written in Rust.")]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "")]
    pub config: String,

    /// Override the configured listen port
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Override the configured root directory
    #[arg(short, long)]
    pub root: Option<String>,

    /// Enable verbose mode
    #[arg(short, long)]
    pub verbose: bool,
}
