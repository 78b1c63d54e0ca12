//! Command implementations for gesipan CLI

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use gesipan_server::db::{self, migrations, SqlitePool};
use gesipan_server::{FileConfig, ServerConfig};

pub mod migrate;
pub mod serve;
pub mod session;

// Re-export main dispatcher functions for flat access from main.rs
pub use migrate::run_migrate;
pub use serve::run_serve;
pub use session::run_session;

/// Options shared by every command that touches the database
#[derive(Args, Debug, Clone, Default)]
pub struct StoreArgs {
    /// TOML config file (values are overridden by flags and environment)
    #[arg(long, short = 'c', value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Database URL
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,
}

impl StoreArgs {
    /// Defaults, then the config file, then the database URL from flag/env.
    pub fn base_config(&self) -> Result<ServerConfig> {
        let mut config = ServerConfig::default();

        if let Some(path) = &self.config {
            FileConfig::load(path)?
                .apply(&mut config)
                .with_context(|| format!("Invalid config file {}", path.display()))?;
            tracing::debug!(path = %path.display(), "config file loaded");
        }

        if let Some(url) = &self.database_url {
            config.database_url = url.clone();
        }

        Ok(config)
    }
}

/// Open the database and make sure every table exists.
pub(crate) async fn open_migrated(database_url: &str) -> Result<SqlitePool> {
    let pool = db::create_pool(database_url)
        .await
        .with_context(|| format!("Failed to open database {database_url}"))?;
    migrations::run(&pool)
        .await
        .context("Failed to run migrations")?;
    Ok(pool)
}
