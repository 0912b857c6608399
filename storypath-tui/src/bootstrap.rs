use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

use crate::api::ApiClient;
use crate::app::{App, Route};
use crate::runtime::run_app;

/// Take over the terminal, run the UI from `start`, and always hand the
/// terminal back before returning.
pub async fn run_tui(client: ApiClient, username: String, start: Route) -> Result<()> {
    let mut app = App::new(username);
    app.navigate_to(start);
    tracing::info!(route = %start, user = %app.username, "starting terminal UI");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app, &client).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = &res {
        tracing::error!("terminal UI stopped: {:#}", e);
    }
    res
}
