#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::domain::ports::ServerSettings;
use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, validate_origin, validate_range, Validate};
use serde::{Deserialize, Serialize};

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5000;

/// Effective server settings after the config file and command line are merged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub allowed_origins: Vec<String>,
    pub json_logs: bool,
    pub verbose: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            allowed_origins: vec!["*".to_string()],
            json_logs: false,
            verbose: false,
        }
    }
}

impl ServerSettings for ServerConfig {
    fn host(&self) -> &str {
        &self.host
    }

    fn port(&self) -> u16 {
        self.port
    }

    fn allowed_origins(&self) -> &[String] {
        &self.allowed_origins
    }

    fn json_logs(&self) -> bool {
        self.json_logs
    }
}

impl Validate for ServerConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("server.host", &self.host)?;

        // 0 would ask the OS for an ephemeral port, which nobody could find
        validate_range("server.port", self.port, 1, u16::MAX)?;

        for origin in &self.allowed_origins {
            validate_origin("cors.allowed_origins", origin)?;
        }

        tracing::debug!("✅ Server configuration validation passed");
        Ok(())
    }
}
