//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `wakehub.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use std::net::SocketAddr;

use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Database settings.
    pub database: DatabaseConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Session and bootstrap settings.
    pub auth: AuthConfig,
    /// Wake-on-LAN delivery settings.
    pub wol: WolConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
}

/// `SQLite` database configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// `SQLite` connection URL or file path.
    pub url: String,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

/// Session-token and bootstrap configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// HMAC secret for session tokens.
    pub secret: String,
    /// Session lifetime in minutes.
    pub session_ttl_minutes: i64,
    /// When set and the user table is empty, an `admin` account is created
    /// with this password on startup.
    pub admin_password: Option<String>,
}

/// Wake-on-LAN delivery configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct WolConfig {
    /// Destination for magic packets, usually the broadcast address.
    pub broadcast_addr: String,
}

impl Config {
    /// Load configuration from `wakehub.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or a
    /// value fails semantic validation.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("wakehub.toml")?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("WAKEHUB_HOST") {
            self.server.host = val;
        }
        if let Ok(val) = std::env::var("WAKEHUB_PORT") {
            if let Ok(port) = val.parse() {
                self.server.port = port;
            }
        }
        if let Ok(val) = std::env::var("WAKEHUB_BIND") {
            if let Some((host, port)) = val.rsplit_once(':') {
                self.server.host = host.to_string();
                if let Ok(port) = port.parse() {
                    self.server.port = port;
                }
            }
        }
        if let Ok(val) = std::env::var("WAKEHUB_DATABASE_URL") {
            self.database.url = val;
        }
        if let Ok(val) = std::env::var("WAKEHUB_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("WAKEHUB_SECRET_KEY") {
            self.auth.secret = val;
        }
        if let Ok(val) = std::env::var("WAKEHUB_ADMIN_PASSWORD") {
            self.auth.admin_password = Some(val);
        }
        if let Ok(val) = std::env::var("WAKEHUB_WOL_BROADCAST") {
            self.wol.broadcast_addr = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        if self.auth.secret.is_empty() {
            return Err(ConfigError::Validation(
                "auth secret must not be empty".to_string(),
            ));
        }
        if self.auth.session_ttl_minutes <= 0 {
            return Err(ConfigError::Validation(
                "session ttl must be positive".to_string(),
            ));
        }
        self.wol_target().map(|_| ())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Return the database URL in `sqlx`-compatible format.
    #[must_use]
    pub fn database_url(&self) -> &str {
        &self.database.url
    }

    /// Parse the configured magic-packet destination.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] when the address is not a valid
    /// `host:port` socket address.
    pub fn wol_target(&self) -> Result<SocketAddr, ConfigError> {
        self.wol.broadcast_addr.parse().map_err(|_| {
            ConfigError::Validation(format!(
                "invalid broadcast address {:?}",
                self.wol.broadcast_addr
            ))
        })
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite:wakehub.db?mode=rwc".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "wakehubd=info,wakehub=info,tower_http=debug".to_string(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            secret: "fallback_secret_key".to_string(),
            session_ttl_minutes: 60,
            admin_password: None,
        }
    }
}

impl Default for WolConfig {
    fn default() -> Self {
        Self {
            broadcast_addr: "255.255.255.255:9".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_produce_sensible_defaults() {
        let config = Config::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.database.url, "sqlite:wakehub.db?mode=rwc");
        assert_eq!(config.auth.secret, "fallback_secret_key");
        assert_eq!(config.wol.broadcast_addr, "255.255.255.255:9");
        assert!(config.auth.admin_password.is_none());
    }

    #[test]
    fn should_parse_minimal_toml() {
        let toml = "";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn should_parse_full_toml() {
        let toml = "
            [server]
            host = '127.0.0.1'
            port = 9090

            [database]
            url = 'sqlite:test.db'

            [logging]
            filter = 'debug'

            [auth]
            secret = 'hunter2'
            session_ttl_minutes = 15
            admin_password = 'bootstrap'

            [wol]
            broadcast_addr = '192.168.1.255:9'
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.database.url, "sqlite:test.db");
        assert_eq!(config.logging.filter, "debug");
        assert_eq!(config.auth.secret, "hunter2");
        assert_eq!(config.auth.session_ttl_minutes, 15);
        assert_eq!(config.auth.admin_password.as_deref(), Some("bootstrap"));
        assert_eq!(config.wol.broadcast_addr, "192.168.1.255:9");
    }

    #[test]
    fn should_return_default_when_file_not_found() {
        let config = Config::from_file("nonexistent.toml").unwrap();
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn should_reject_zero_port() {
        let mut config = Config::default();
        config.server.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_reject_empty_secret() {
        let mut config = Config::default();
        config.auth.secret = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_reject_non_positive_session_ttl() {
        let mut config = Config::default();
        config.auth.session_ttl_minutes = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_reject_malformed_broadcast_addr() {
        let mut config = Config::default();
        config.wol.broadcast_addr = "not-an-address".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_accept_defaults() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn should_format_bind_addr() {
        let config = Config::default();
        assert_eq!(config.bind_addr(), "0.0.0.0:3000");
    }

    #[test]
    fn should_parse_wol_target() {
        let config = Config::default();
        let target = config.wol_target().unwrap();
        assert_eq!(target.to_string(), "255.255.255.255:9");
    }

    #[test]
    fn should_parse_partial_toml_with_defaults() {
        let toml = "
            [server]
            port = 8080
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.database.url, "sqlite:wakehub.db?mode=rwc");
    }

    #[test]
    fn should_report_parse_error_for_invalid_toml() {
        let result: Result<Config, _> = toml::from_str("invalid {{{");
        assert!(result.is_err());
    }
}
