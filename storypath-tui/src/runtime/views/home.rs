use crate::app::{App, Route};
use crossterm::event::{KeyCode, KeyEvent};

use super::super::action_queue::ActionTx;
use super::open_route;

pub(super) fn handle_home_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    match key.code {
        KeyCode::Enter | KeyCode::Char('p') | KeyCode::Char('P') => {
            open_route(app, action_tx, Route::Projects);
        }
        KeyCode::Char('a') | KeyCode::Char('A') => {
            open_route(app, action_tx, Route::ProjectAdd);
        }
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => app.quit(),
        _ => {}
    }
}
