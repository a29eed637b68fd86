// Configuration module entry point
// Manages application configuration and the shared runtime state

mod state;
mod types;

use std::net::SocketAddr;

// Re-export public types
pub use state::AppState;
pub use types::{
    Config, HttpConfig, LoggingConfig, PerformanceConfig, ServerConfig, StoreConfig,
};

impl Config {
    /// Load configuration from "config.toml" plus `SERVER_*` environment variables
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from specified file path (without extension)
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(config::Environment::with_prefix("SERVER"))
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8000)?
            .set_default("store.path", "db.db")?
            .set_default("store.max_idle", 4)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .set_default("http.server_name", "kjv-server/0.1")?
            .set_default("http.enable_cors", false)?
            .set_default("http.max_body_size", 65_536)?
            .build()?;

        settings.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_config_file() {
        let config = Config::load_from("no-such-config-file").unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.store.path, "db.db");
        assert_eq!(config.store.max_idle, 4);
        assert!(config.logging.access_log);
        assert_eq!(config.logging.access_log_format, "combined");
        assert!(!config.http.enable_cors);
    }

    #[test]
    fn test_default_socket_addr_parses() {
        let config = Config::load_from("no-such-config-file").unwrap();
        let addr = config.get_socket_addr().unwrap();
        assert_eq!(addr.port(), 8000);
    }
}
