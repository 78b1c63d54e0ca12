//! Server configuration
//!
//! Values come from, in increasing precedence: built-in defaults, an
//! optional TOML file, then whatever the caller overrides (the CLI applies
//! flags and environment variables on top).

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to (default: 127.0.0.1:3030)
    pub bind_addr: SocketAddr,

    /// SQLite connection string
    pub database_url: String,

    /// Directory uploaded attachments are written to
    pub upload_dir: PathBuf,

    /// Name of the cookie carrying the session token
    pub session_cookie: String,

    /// Per-request timeout
    pub request_timeout: Duration,

    /// Maximum request body size, uploads included
    pub max_upload_bytes: usize,

    /// Require a session for write-submit, reply, nested reply and delete.
    ///
    /// The write form always requires one.
    pub require_login: bool,

    /// Allow any origin (default: false = same origin only)
    pub cors_permissive: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3030)),
            database_url: "sqlite://gesipan.db".to_string(),
            upload_dir: PathBuf::from("uploads"),
            session_cookie: "gesipan_session".to_string(),
            request_timeout: Duration::from_secs(30),
            max_upload_bytes: 20 * 1024 * 1024,
            require_login: false,
            cors_permissive: false,
        }
    }
}

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// TOML config file; every field optional
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub bind: Option<String>,
    pub port: Option<u16>,
    pub database_url: Option<String>,
    pub upload_dir: Option<PathBuf>,
    pub session_cookie: Option<String>,
    pub timeout_secs: Option<u64>,
    pub max_upload_bytes: Option<usize>,
    pub require_login: Option<bool>,
    pub cors_permissive: Option<bool>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Overlay the values present in this file onto `config`.
    pub fn apply(self, config: &mut ServerConfig) -> Result<(), ConfigError> {
        if let Some(bind) = self.bind {
            config.bind_addr.set_ip(bind.parse().map_err(|_| ConfigError::Invalid {
                field: "bind",
                reason: format!("'{bind}' is not an IP address"),
            })?);
        }
        if let Some(port) = self.port {
            config.bind_addr.set_port(port);
        }
        if let Some(url) = self.database_url {
            config.database_url = url;
        }
        if let Some(dir) = self.upload_dir {
            config.upload_dir = dir;
        }
        if let Some(name) = self.session_cookie {
            config.session_cookie = name;
        }
        if let Some(secs) = self.timeout_secs {
            config.request_timeout = Duration::from_secs(secs);
        }
        if let Some(max) = self.max_upload_bytes {
            config.max_upload_bytes = max;
        }
        if let Some(require) = self.require_login {
            config.require_login = require;
        }
        if let Some(permissive) = self.cors_permissive {
            config.cors_permissive = permissive;
        }
        config.validate()
    }
}

impl ServerConfig {
    /// Reject values the server cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let cookie_ok = !self.session_cookie.is_empty()
            && self
                .session_cookie
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !cookie_ok {
            return Err(ConfigError::Invalid {
                field: "session_cookie",
                reason: "must be non-empty ASCII letters, digits, '_' or '-'".to_string(),
            });
        }

        if self.request_timeout.is_zero() {
            return Err(ConfigError::Invalid {
                field: "timeout",
                reason: "must be at least one second".to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_addr.port(), 3030);
        assert_eq!(config.session_cookie, "gesipan_session");
        assert!(!config.require_login);
        assert!(!config.cors_permissive);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn file_overrides_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("gesipan.toml");
        std::fs::write(
            &path,
            r#"
            bind = "0.0.0.0"
            port = 8080
            upload_dir = "/srv/uploads"
            require_login = true
            "#,
        )
        .unwrap();

        let mut config = ServerConfig::default();
        FileConfig::load(&path).unwrap().apply(&mut config).unwrap();

        assert_eq!(config.bind_addr, SocketAddr::from(([0, 0, 0, 0], 8080)));
        assert_eq!(config.upload_dir, PathBuf::from("/srv/uploads"));
        assert!(config.require_login);
        // untouched
        assert_eq!(config.database_url, "sqlite://gesipan.db");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bad.toml");
        std::fs::write(&path, "prot = 1\n").unwrap();

        assert!(matches!(
            FileConfig::load(&path).unwrap_err(),
            ConfigError::Parse { .. }
        ));
    }

    #[test]
    fn rejects_bad_cookie_name() {
        let config = ServerConfig {
            session_cookie: "bad name;".to_string(),
            ..ServerConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
