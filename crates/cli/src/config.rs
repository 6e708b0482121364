//! Configuration loading from medassist.toml.

use gateway::{DEFAULT_BASE_URL, OpenAiGateway};
use registry::ToolRegistry;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Config file picked up from the working directory when no path is given.
pub const CONFIG_FILE: &str = "medassist.toml";

/// Environment variable holding the completion API credential.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub gateway: GatewayConfig,

    #[serde(default)]
    pub registry: RegistryConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    /// Address to bind, e.g. `0.0.0.0:3000`.
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
        }
    }
}

/// Completion provider configuration.
#[derive(Debug, Deserialize)]
pub struct GatewayConfig {
    /// API root, without the `/chat/completions` suffix.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Upper bound for one completion call.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Credential used when `OPENAI_API_KEY` is unset.
    pub api_key: Option<String>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            api_key: None,
        }
    }
}

/// Where tool definitions come from.
#[derive(Debug, Default, Deserialize)]
pub struct RegistryConfig {
    /// TOML file with `[[tool]]` entries. The built-in set is used when unset.
    pub path: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

fn default_listen_addr() -> String {
    "127.0.0.1:3000".to_string()
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML string.
    pub fn parse(toml: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml).map_err(|e| ConfigError::Parse(e.to_string()))?;
        if config.gateway.timeout_secs == 0 {
            return Err(ConfigError::Parse(
                "gateway.timeout_secs must be positive".into(),
            ));
        }
        Ok(config)
    }

    /// Load the explicit path if given, else `medassist.toml` when present,
    /// else defaults.
    pub fn discover(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None if Path::new(CONFIG_FILE).exists() => Self::load(CONFIG_FILE),
            None => Ok(Self::default()),
        }
    }

    /// The completion credential, read once from the environment with the
    /// config file as fallback.
    pub fn api_key(&self) -> Option<String> {
        self.api_key_with(std::env::var(API_KEY_ENV).ok())
    }

    fn api_key_with(&self, from_env: Option<String>) -> Option<String> {
        let present = |key: &String| !key.trim().is_empty();
        from_env
            .filter(present)
            .or_else(|| self.gateway.api_key.clone().filter(present))
    }

    /// Build the gateway, or `None` when no credential is configured.
    pub fn gateway(&self) -> Result<Option<OpenAiGateway>, gateway::GatewayError> {
        self.api_key()
            .map(|key| {
                OpenAiGateway::builder(key)
                    .base_url(&self.gateway.base_url)
                    .timeout(Duration::from_secs(self.gateway.timeout_secs))
                    .build()
            })
            .transpose()
    }

    /// Load the configured registry, or the built-in one.
    pub fn registry(&self) -> registry::Result<ToolRegistry> {
        match &self.registry.path {
            Some(path) => ToolRegistry::load(path),
            None => ToolRegistry::builtin(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.server.listen_addr, "127.0.0.1:3000");
        assert_eq!(config.gateway.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.gateway.timeout_secs, 60);
        assert_eq!(config.logging.format, LogFormat::Compact);
        assert!(config.registry.path.is_none());
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[server]
listen_addr = "0.0.0.0:8080"

[gateway]
base_url = "http://localhost:11434/v1"
timeout_secs = 15
api_key = "sk-from-file"

[registry]
path = "clinic-tools.toml"

[logging]
format = "json"
"#;
        let config = Config::parse(toml).unwrap();
        assert_eq!(config.server.listen_addr, "0.0.0.0:8080");
        assert_eq!(config.gateway.base_url, "http://localhost:11434/v1");
        assert_eq!(config.gateway.timeout_secs, 15);
        assert_eq!(config.registry.path, Some(PathBuf::from("clinic-tools.toml")));
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let err = Config::parse("[gateway]\ntimeout_secs = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn unknown_log_format_is_rejected() {
        assert!(Config::parse("[logging]\nformat = \"xml\"").is_err());
    }

    #[test]
    fn environment_key_takes_precedence() {
        let config = Config::parse("[gateway]\napi_key = \"sk-from-file\"").unwrap();
        assert_eq!(
            config.api_key_with(Some("sk-from-env".into())).as_deref(),
            Some("sk-from-env")
        );
        assert_eq!(config.api_key_with(None).as_deref(), Some("sk-from-file"));
    }

    #[test]
    fn blank_key_counts_as_missing() {
        let config = Config::default();
        assert_eq!(config.api_key_with(None), None);
        assert_eq!(config.api_key_with(Some("  ".into())), None);
    }

    #[test]
    fn default_registry_is_builtin() {
        let registry = Config::default().registry().unwrap();
        assert!(registry.lookup("mental-health").is_ok());
    }

    #[test]
    fn missing_registry_file_is_io_error() {
        let mut config = Config::default();
        config.registry.path = Some(PathBuf::from("/nonexistent/tools.toml"));
        assert!(matches!(config.registry().unwrap_err(), registry::Error::Io(_)));
    }
}
