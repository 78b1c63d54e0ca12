//! HTTP server command
//!
//! Settings resolve as: flag > environment variable > config file > default.

use std::net::IpAddr;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;

use gesipan_server::{run_server, ServerConfig};

use super::StoreArgs;

/// Arguments for the serve command
#[derive(Args, Debug, Clone, Default)]
pub struct ServeArgs {
    #[command(flatten)]
    pub store: StoreArgs,

    /// IP address to bind to (default: 127.0.0.1)
    #[arg(long, short = 'b', env = "GESIPAN_BIND")]
    pub bind: Option<IpAddr>,

    /// Port to bind to (default: 3030)
    #[arg(long, short = 'p', env = "GESIPAN_PORT")]
    pub port: Option<u16>,

    /// Directory uploaded attachments are stored in (default: ./uploads)
    #[arg(long, env = "GESIPAN_UPLOAD_DIR", value_name = "DIR")]
    pub upload_dir: Option<PathBuf>,

    /// Name of the session cookie (default: gesipan_session)
    #[arg(long, env = "GESIPAN_SESSION_COOKIE")]
    pub cookie_name: Option<String>,

    /// Request timeout in seconds (default: 30)
    #[arg(long, env = "GESIPAN_TIMEOUT", value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Maximum request body size in bytes (default: 20 MiB)
    #[arg(long, env = "GESIPAN_MAX_UPLOAD_BYTES", value_name = "BYTES")]
    pub max_upload_bytes: Option<usize>,

    /// Require a login session to post, reply or delete
    #[arg(
        long,
        env = "GESIPAN_REQUIRE_LOGIN",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        value_name = "BOOL"
    )]
    pub require_login: Option<bool>,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,
}

impl ServeArgs {
    /// Resolve the full server configuration.
    pub fn resolve_config(&self) -> Result<ServerConfig> {
        let mut config = self.store.base_config()?;

        if let Some(ip) = self.bind {
            config.bind_addr.set_ip(ip);
        }
        if let Some(port) = self.port {
            config.bind_addr.set_port(port);
        }
        if let Some(dir) = &self.upload_dir {
            config.upload_dir = dir.clone();
        }
        if let Some(name) = &self.cookie_name {
            config.session_cookie = name.clone();
        }
        if let Some(secs) = self.timeout {
            config.request_timeout = Duration::from_secs(secs);
        }
        if let Some(max) = self.max_upload_bytes {
            config.max_upload_bytes = max;
        }
        if let Some(require) = self.require_login {
            config.require_login = require;
        }
        if self.cors_permissive {
            config.cors_permissive = true;
        }

        config.validate().context("Invalid server configuration")?;
        Ok(config)
    }
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let config = args.resolve_config()?;

    tracing::info!(
        bind = %config.bind_addr,
        database_url = %config.database_url,
        require_login = config.require_login,
        "Starting gesipan server"
    );

    // Run server (blocks until shutdown)
    run_server(config).await.context("Server error")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        serve: ServeArgs,
    }

    fn parse(args: &[&str]) -> ServeArgs {
        let mut argv = vec!["gesipan"];
        argv.extend_from_slice(args);
        TestCli::parse_from(argv).serve
    }

    #[test]
    fn flags_override_defaults() {
        let config = parse(&["--port", "8080", "--require-login", "--timeout", "5"])
            .resolve_config()
            .unwrap();

        assert_eq!(config.bind_addr.port(), 8080);
        assert!(config.require_login);
        assert_eq!(config.request_timeout, Duration::from_secs(5));
    }

    #[test]
    fn flags_override_config_file() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("gesipan.toml");
        std::fs::write(&path, "port = 9000\nrequire_login = true\nupload_dir = \"/data\"\n").unwrap();

        let config = parse(&[
            "--config",
            path.to_str().unwrap(),
            "--port",
            "9100",
            "--require-login=false",
        ])
        .resolve_config()
        .unwrap();

        assert_eq!(config.bind_addr.port(), 9100);
        assert!(!config.require_login);
        assert_eq!(config.upload_dir, PathBuf::from("/data"));
    }

    #[test]
    fn rejects_zero_timeout() {
        assert!(parse(&["--timeout", "0"]).resolve_config().is_err());
    }
}
