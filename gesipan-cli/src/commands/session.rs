//! Session administration
//!
//! Login itself is handled elsewhere; these commands let an operator hand
//! out a session cookie (for testing the write form, or for a trusted
//! front end) and take it back.

use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand};

use gesipan_server::db::SessionRepo;
use gesipan_server::models::validate_userid;

use super::{open_migrated, StoreArgs};

#[derive(Subcommand, Debug)]
pub enum SessionCommand {
    /// Start a session for a member and print its cookie
    Issue(IssueArgs),
    /// Delete a session
    Revoke(RevokeArgs),
}

#[derive(Args, Debug)]
pub struct IssueArgs {
    /// Member id the session belongs to
    pub uid: String,

    #[command(flatten)]
    pub store: StoreArgs,
}

#[derive(Args, Debug)]
pub struct RevokeArgs {
    /// Session token printed by `session issue`
    pub token: String,

    #[command(flatten)]
    pub store: StoreArgs,
}

pub async fn run_session(command: SessionCommand) -> Result<()> {
    match command {
        SessionCommand::Issue(args) => issue(args).await,
        SessionCommand::Revoke(args) => revoke(args).await,
    }
}

async fn issue(args: IssueArgs) -> Result<()> {
    let uid = validate_userid(&args.uid).context("Invalid member id")?;
    let config = args.store.base_config()?;
    let pool = open_migrated(&config.database_url).await?;

    let token = SessionRepo::new(&pool)
        .create(&uid)
        .await
        .context("Failed to create session")?;
    pool.close().await;

    tracing::info!(%uid, "session issued");
    println!("token: {token}");
    println!("Cookie: {}={token}", config.session_cookie);
    Ok(())
}

async fn revoke(args: RevokeArgs) -> Result<()> {
    let config = args.store.base_config()?;
    let pool = open_migrated(&config.database_url).await?;

    let removed = SessionRepo::new(&pool)
        .revoke(&args.token)
        .await
        .context("Failed to revoke session")?;
    pool.close().await;

    if !removed {
        bail!("No session with token {}", args.token);
    }

    println!("Session revoked");
    Ok(())
}
