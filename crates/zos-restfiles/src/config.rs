//! Service configuration: listener, request limits, native backend and build info.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Top-level service configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// HTTP listener settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Request size limits.
    #[serde(default)]
    pub limits: LimitsConfig,
    /// Native backend settings.
    #[serde(default)]
    pub backend: BackendConfig,
    /// Values reported by `/zosservice/application/info`.
    #[serde(default)]
    pub service_info: ServiceInfoConfig,
}

/// Server binding configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address.
    #[serde(default = "default_host")]
    pub host: String,
    /// Listen port.
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitsConfig {
    /// Largest accepted request body, in bytes.
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

/// Native backend configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// User ID the native layer acts as; owns created files and submitted jobs.
    #[serde(default = "default_user")]
    pub user: String,
}

/// Build information reported by the info endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceInfoConfig {
    #[serde(default = "default_service_name")]
    pub name: String,
    #[serde(default = "default_service_version")]
    pub version: String,
    /// Machine name reported in build info.
    #[serde(default = "default_machine")]
    pub machine: String,
}

/// Failure loading a configuration file.
#[derive(Debug, Error, miette::Diagnostic)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {source}")]
    #[diagnostic(code(zos_restfiles::config::io))]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    #[diagnostic(code(zos_restfiles::config::parse))]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

impl ServiceConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_string(),
            source,
        })?;
        Self::from_toml(&content).map_err(|source| ConfigError::Parse {
            path: path.to_string(),
            source,
        })
    }

    /// Parse configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Apply the `RESTFILES_PORT` override when it holds a valid port.
    pub fn apply_env(&mut self) {
        if let Some(port) = std::env::var("RESTFILES_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
        {
            self.server.port = port;
        }
    }

    /// `host:port` the listener binds to.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            user: default_user(),
        }
    }
}

impl Default for ServiceInfoConfig {
    fn default() -> Self {
        Self {
            name: default_service_name(),
            version: default_service_version(),
            machine: default_machine(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    10018
}

fn default_max_body_bytes() -> usize {
    10 * 1024 * 1024
}

fn default_user() -> String {
    "IBMUSER".to_string()
}

fn default_service_name() -> String {
    "zos-restfiles-service".to_string()
}

fn default_service_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn default_machine() -> String {
    "mainframe-system".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ServiceConfig::default();
        assert_eq!(config.server.port, 10018);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.limits.max_body_bytes, 10 * 1024 * 1024);
        assert_eq!(config.backend.user, "IBMUSER");
        assert_eq!(config.service_info.name, "zos-restfiles-service");
    }

    #[test]
    fn test_partial_toml() {
        let config = ServiceConfig::from_toml(
            r#"
            [server]
            port = 8080

            [backend]
            user = "TESTER"
            "#,
        )
        .unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.backend.user, "TESTER");
        assert_eq!(config.limits.max_body_bytes, 10 * 1024 * 1024);
    }

    #[test]
    fn test_bind_addr() {
        let mut config = ServiceConfig::default();
        config.server.host = "127.0.0.1".to_string();
        assert_eq!(config.bind_addr(), "127.0.0.1:10018");
    }

    #[test]
    fn test_missing_file() {
        let err = ServiceConfig::from_file("/nonexistent/restfiles.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_invalid_toml() {
        assert!(ServiceConfig::from_toml("[server\nport=").is_err());
    }
}
