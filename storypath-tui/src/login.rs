use anyhow::{Context, Result};
use std::io::{self, BufRead, Write};

use crate::api::ApiClient;
use crate::session_store::{self, Session};

/// Run the interactive login flow:
/// 1. Prompt for the username that owns the author's records
/// 2. Prompt for the API token without echo
/// 3. Verify both by listing projects
/// 4. Save the session
pub async fn run_login(api_url: &str) -> Result<Session> {
    print!("Username: ");
    io::stdout().flush()?;
    let mut username = String::new();
    io::stdin()
        .lock()
        .read_line(&mut username)
        .context("Failed to read username")?;
    let username = username.trim().to_string();
    if username.is_empty() {
        anyhow::bail!("Username must not be empty");
    }

    let token = rpassword::prompt_password("API token: ").context("Failed to read API token")?;
    let token = token.trim().to_string();
    if token.is_empty() {
        anyhow::bail!("API token must not be empty");
    }

    let session = Session { username, token };
    let client = ApiClient::new(api_url, &session)?;
    let projects = client
        .list_projects()
        .await
        .context("Could not verify the token against the backend")?;

    session_store::save_session(&session)?;
    tracing::info!(username = %session.username, "session saved");
    println!(
        "Login successful. {} project(s) visible. Session saved.",
        projects.len()
    );

    Ok(session)
}
