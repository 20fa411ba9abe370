// ⚙️ Configuration - Server settings from the environment

use anyhow::{Context, Result};

pub const HOST_VAR: &str = "CALCULATOR_HOST";
pub const PORT_VAR: &str = "CALCULATOR_PORT";

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Interface to bind (hostname or IP)
    pub host: String,

    /// TCP port to listen on
    pub port: u16,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset or blank values fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let host = value(HOST_VAR)
            .map(|h| h.trim().to_string())
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match value(PORT_VAR) {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .with_context(|| format!("{} must be a port number, got {:?}", PORT_VAR, raw))?,
            None => DEFAULT_PORT,
        };

        Ok(ServerConfig { host, port })
    }

    /// `host:port`, suitable for `TcpListener::bind`
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
