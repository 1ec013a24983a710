use crate::config::toml_config::TomlConfig;
use crate::config::ServerConfig;
use crate::utils::error::Result;
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, Parser)]
#[command(name = "card-check")]
#[command(about = "HTTP service that validates and classifies payment card numbers")]
pub struct CliConfig {
    /// TOML configuration file; flags given here override its values
    #[arg(short, long)]
    pub config: Option<String>,

    /// Address to bind [default: 127.0.0.1]
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on [default: 5000]
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Origins allowed to call the API; `*` allows any [default: *]
    #[arg(long, value_delimiter = ',')]
    pub allowed_origins: Vec<String>,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    /// Defaults, then the config file, then command-line flags.
    pub fn resolve(&self) -> Result<ServerConfig> {
        let mut config = ServerConfig::default();

        if let Some(path) = &self.config {
            config = TomlConfig::from_file(path)?.apply_to(config);
        }

        Ok(self.apply_to(config))
    }

    fn apply_to(&self, mut base: ServerConfig) -> ServerConfig {
        if let Some(host) = &self.host {
            base.host = host.clone();
        }
        if let Some(port) = self.port {
            base.port = port;
        }
        if !self.allowed_origins.is_empty() {
            base.allowed_origins = self.allowed_origins.clone();
        }
        base.json_logs |= self.json_logs;
        base.verbose |= self.verbose;
        base
    }
}
