//! Server configuration.

use crate::error::ServerError;
use std::net::SocketAddr;

/// Display names drawn for new NPC opponents unless configured otherwise.
pub const DEFAULT_NPC_NAMES: [&str; 3] = ["Rocky Balboa", "Julius Scissor", "Paper Tiger"];

/// Configuration settings for the game server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Network address and port to bind the server to
    pub bind_address: SocketAddr,

    /// Maximum number of concurrently open connections. Further handshakes
    /// are refused until a connection closes.
    pub max_connections: usize,

    /// Pool of NPC display names
    pub npc_names: Vec<String>,
}

impl ServerConfig {
    /// Create a configuration bound to `bind_address` with other defaults.
    pub fn new(bind_address: SocketAddr) -> Self {
        Self {
            bind_address,
            ..Default::default()
        }
    }

    pub fn with_max_connections(mut self, max: usize) -> Self {
        self.max_connections = max;
        self
    }

    pub fn with_npc_names(mut self, names: Vec<String>) -> Self {
        self.npc_names = names;
        self
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// `ServerError::Config` describing the first invalid value.
    pub fn validate(&self) -> Result<(), ServerError> {
        if self.max_connections == 0 {
            return Err(ServerError::Config(
                "max_connections must be greater than 0".to_string(),
            ));
        }

        if self.npc_names.is_empty() {
            return Err(ServerError::Config("npc_names cannot be empty".to_string()));
        }

        if self.npc_names.iter().any(|name| name.trim().is_empty()) {
            return Err(ServerError::Config("npc_names cannot contain blank names".to_string()));
        }

        Ok(())
    }
}

impl Default for ServerConfig {
    /// Defaults: 127.0.0.1:8080, 1000 connections, the built-in NPC names.
    fn default() -> Self {
        Self {
            bind_address: SocketAddr::from(([127, 0, 0, 1], 8080)),
            max_connections: 1000,
            npc_names: DEFAULT_NPC_NAMES.iter().map(|name| name.to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ServerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.bind_address.to_string(), "127.0.0.1:8080");
        assert_eq!(config.npc_names.len(), 3);
    }

    #[test]
    fn test_invalid_max_connections() {
        let config = ServerConfig::default().with_max_connections(0);
        assert!(matches!(config.validate(), Err(ServerError::Config(_))));
    }

    #[test]
    fn test_invalid_npc_names() {
        let config = ServerConfig::default().with_npc_names(vec![]);
        assert!(config.validate().is_err());

        let config = ServerConfig::default().with_npc_names(vec!["  ".to_string()]);
        assert!(config.validate().is_err());
    }
}
