use crate::api::ApiClient;
use crate::app::App;
use crate::ui;
use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;

use super::action_queue::channel;
use super::actions::run_action;
use super::views::{enqueue_route_load, handle_key};

pub async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    client: &ApiClient,
) -> Result<()> {
    let (action_tx, mut action_rx) = channel();
    enqueue_route_load(app, &action_tx);

    loop {
        terminal.draw(|f| ui::render(f, app))?;

        if app.is_loading {
            app.throbber_state.calc_next();
        }

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    handle_key(key, app, &action_tx);
                }
            }
        }

        while let Ok(action) = action_rx.try_recv() {
            // Show the loading state before blocking on the request.
            terminal.draw(|f| ui::render(f, app))?;
            run_action(action, app, client, &action_tx).await?;
        }

        if !app.running {
            break;
        }
    }

    Ok(())
}
