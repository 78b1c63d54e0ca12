//! Create the database schema

use anyhow::Result;

use super::{open_migrated, StoreArgs};

pub async fn run_migrate(args: StoreArgs) -> Result<()> {
    let config = args.base_config()?;

    let pool = open_migrated(&config.database_url).await?;
    pool.close().await;

    tracing::info!(database_url = %config.database_url, "migrations applied");
    println!("Database ready: {}", config.database_url);
    Ok(())
}
