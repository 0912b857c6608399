mod api;
mod app;
mod bootstrap;
mod cli;
mod config;
mod logging;
mod login;
mod runtime;
mod session_store;
mod ui;

use anyhow::{Context, Result};
use clap::Parser;

use crate::api::ApiClient;
use crate::app::Route;
use crate::cli::{Cli, Commands};
use crate::config::StoryPathConfig;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let cfg = StoryPathConfig::load()?;
    logging::init(&cfg)?;

    match cli.command {
        Commands::Run { path } => {
            let session = session_store::load_session()?
                .context("No saved session. Run `storypath-tui login` to authenticate.")?;
            let client = ApiClient::new(&cfg.api_url, &session)?;
            bootstrap::run_tui(client, session.username, Route::parse_or_home(&path)).await?;
        }
        Commands::Dev { path } => {
            let client = ApiClient::dev()?;
            bootstrap::run_tui(client, "dev".to_string(), Route::parse_or_home(&path)).await?;
        }
        Commands::Login => {
            login::run_login(&cfg.api_url).await?;
        }
        Commands::Logout => {
            session_store::clear_session()?;
            println!("Logged out. Saved session removed.");
        }
        Commands::ConfigPath => {
            let path = StoryPathConfig::config_path()?;
            if !path.exists() {
                StoryPathConfig::default().save()?;
                println!("Created default config at {}", path.display());
            } else {
                println!("{}", path.display());
            }
        }
    }

    Ok(())
}
