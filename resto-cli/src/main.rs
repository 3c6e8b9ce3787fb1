//! `resto`: the restaurant front desk from the terminal

mod cli;
mod commands;
mod logger;
mod render;

use clap::Parser;
use resto_client::{ClientConfig, ClientError};

use crate::cli::Cli;
use crate::commands::Context;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    logger::init_logger_with_file(&cli.log_level, cli.log_json, cli.log_dir.as_deref())?;

    let mut config = ClientConfig::from_env();
    if let Some(url) = cli.api_url {
        config.base_url = url;
    }
    if let Some(dir) = cli.session_dir {
        config = config.with_session_dir(dir);
    }
    tracing::debug!(base_url = %config.base_url, session_dir = %config.session_dir.display(), "Starting");

    let mut ctx = Context::open(&config)?;
    let result = commands::run(&mut ctx, cli.command).await;

    if let Err(e) = &result
        && matches!(
            e.downcast_ref::<ClientError>(),
            Some(ClientError::NotLoggedIn | ClientError::Unauthorized(_))
        )
    {
        eprintln!("hint: run `resto login` first");
    }
    result
}
