use serde::Deserialize;
use std::net::SocketAddr;

use crate::store::{CustomerStore, MemoryStore};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
    pub http: HttpConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub access_log: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceConfig {
    pub keep_alive: bool,
    pub max_connections: Option<u64>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    pub server_name: String,
    pub max_body_size: u64,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name("config").required(false))
            .add_source(config::Environment::with_prefix("CUSTOMER_API"))
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("performance.keep_alive", true)?
            .set_default("http.server_name", "customer-api/0.1")?
            .set_default("http.max_body_size", 1_048_576)? // 1MB
            .build()?;

        settings.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

/// Shared per-process state handed to every request handler.
///
/// The store is an explicit dependency here rather than a global; handlers
/// only see it through the `CustomerStore` trait.
pub struct AppState {
    pub config: Config,
    pub store: Box<dyn CustomerStore>,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self {
            config: config.clone(),
            store: Box::new(MemoryStore::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
                workers: None,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                access_log: false,
            },
            performance: PerformanceConfig {
                keep_alive: true,
                max_connections: None,
            },
            http: HttpConfig {
                server_name: "customer-api/0.1".to_string(),
                max_body_size: 1_048_576,
            },
        }
    }

    #[test]
    fn test_get_socket_addr() {
        let config = test_config();
        assert_eq!(
            config.get_socket_addr(),
            Ok("127.0.0.1:8080".parse().expect("addr"))
        );
    }

    #[test]
    fn test_get_socket_addr_rejects_bad_host() {
        let mut config = test_config();
        config.server.host = "not a host".to_string();
        assert!(config.get_socket_addr().is_err());
    }

    #[test]
    fn test_app_state_starts_with_empty_store() {
        let state = AppState::new(&test_config());
        assert!(state.store.list().is_empty());
    }
}
