use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_CHUNK_SIZE;

#[derive(Debug, Deserialize, Serialize)]
pub struct ServerConfig {
    pub listen_address: String,
    pub listen_port: u16,
    /// Directory served as every session's initial working directory.
    pub root_dir: String,
    pub chunk_size: Option<usize>, // Optional to allow default value
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    pub server: ServerConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_address: String::from("127.0.0.1"),
            listen_port: 65432,
            root_dir: String::from("."),
            chunk_size: Some(DEFAULT_CHUNK_SIZE),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
        }
    }
}

impl Config {
    /// Receive buffer size, falling back to the built-in default.
    pub fn chunk_size(&self) -> usize {
        self.server.chunk_size.unwrap_or(DEFAULT_CHUNK_SIZE)
    }
}

pub fn load_config(path: &str) -> Result<Config> {
    let config_str = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path))?;
    let mut config: Config = toml::from_str(&config_str)
        .with_context(|| format!("Failed to parse configuration file: {}", path))?;

    // Set defaults if not specified
    if config.server.chunk_size.is_none() {
        config.server.chunk_size = Some(DEFAULT_CHUNK_SIZE);
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.listen_address, "127.0.0.1");
        assert_eq!(config.server.listen_port, 65432);
        assert_eq!(config.server.root_dir, ".");
        assert_eq!(config.chunk_size(), DEFAULT_CHUNK_SIZE);
    }

    #[test]
    fn test_parse_full_config() {
        let toml_str = r#"
            [server]
            listen_address = "0.0.0.0"
            listen_port = 2121
            root_dir = "/srv/files"
            chunk_size = 4096
        "#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.server.listen_address, "0.0.0.0");
        assert_eq!(config.server.listen_port, 2121);
        assert_eq!(config.server.root_dir, "/srv/files");
        assert_eq!(config.chunk_size(), 4096);
    }

    #[test]
    fn test_chunk_size_defaults_when_absent() {
        let toml_str = r#"
            [server]
            listen_address = "127.0.0.1"
            listen_port = 2121
            root_dir = "."
        "#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert!(config.server.chunk_size.is_none());
        assert_eq!(config.chunk_size(), DEFAULT_CHUNK_SIZE);
    }

    #[test]
    fn test_load_config_missing_file_has_context() {
        let err = load_config("/definitely/not/there.toml").unwrap_err();
        assert!(err.to_string().contains("Failed to read configuration file"));
    }
}
