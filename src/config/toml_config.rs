use crate::config::ServerConfig;
use crate::utils::error::{AppError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub server: Option<ServerSection>,
    pub cors: Option<CorsSection>,
    pub logging: Option<LoggingSection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerSection {
    pub host: Option<String>,
    pub port: Option<u16>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CorsSection {
    pub allowed_origins: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingSection {
    pub json: Option<bool>,
    pub verbose: Option<bool>,
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("valid regex"))
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(AppError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// Parses TOML after replacing `${VAR}` placeholders from the environment.
    /// Unset variables are left as written.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = Self::substitute_env_vars(content);

        toml::from_str(&processed).map_err(|e| AppError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    fn substitute_env_vars(content: &str) -> String {
        env_var_pattern()
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    /// Overlays the values present in this file onto `base`.
    pub fn apply_to(&self, mut base: ServerConfig) -> ServerConfig {
        if let Some(server) = &self.server {
            if let Some(host) = &server.host {
                base.host = host.clone();
            }
            if let Some(port) = server.port {
                base.port = port;
            }
        }

        if let Some(origins) = self.cors.as_ref().and_then(|c| c.allowed_origins.as_ref()) {
            base.allowed_origins = origins.clone();
        }

        if let Some(logging) = &self.logging {
            if let Some(json) = logging.json {
                base.json_logs = json;
            }
            if let Some(verbose) = logging.verbose {
                base.verbose = verbose;
            }
        }

        base
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_file() {
        let config = TomlConfig::from_toml_str(
            r#"
[server]
host = "0.0.0.0"
port = 8080

[cors]
allowed_origins = ["https://shop.example.com", "http://localhost:3000"]

[logging]
json = true
"#,
        )
        .unwrap();

        let merged = config.apply_to(ServerConfig::default());
        assert_eq!(merged.host, "0.0.0.0");
        assert_eq!(merged.port, 8080);
        assert_eq!(merged.allowed_origins.len(), 2);
        assert!(merged.json_logs);
        assert!(!merged.verbose);
    }

    #[test]
    fn test_empty_file_keeps_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert_eq!(config.apply_to(ServerConfig::default()), ServerConfig::default());
    }

    #[test]
    fn test_env_substitution() {
        std::env::set_var("CARD_CHECK_TEST_HOST", "10.1.2.3");
        let config = TomlConfig::from_toml_str(
            r#"
[server]
host = "${CARD_CHECK_TEST_HOST}"
"#,
        )
        .unwrap();
        assert_eq!(
            config.server.unwrap().host.as_deref(),
            Some("10.1.2.3")
        );
    }

    #[test]
    fn test_unset_variable_left_in_place() {
        let config = TomlConfig::from_toml_str(
            r#"
[server]
host = "${CARD_CHECK_TEST_SURELY_UNSET}"
"#,
        )
        .unwrap();
        assert_eq!(
            config.server.unwrap().host.as_deref(),
            Some("${CARD_CHECK_TEST_SURELY_UNSET}")
        );
    }

    #[test]
    fn test_bad_toml_is_config_error() {
        let err = TomlConfig::from_toml_str("[server\nport = 1").unwrap_err();
        assert!(matches!(err, AppError::ConfigValidationError { .. }));
    }

    #[test]
    fn test_out_of_range_port_fails_to_parse() {
        assert!(TomlConfig::from_toml_str("[server]\nport = 70000").is_err());
    }
}
