use crate::app::{App, Route};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::super::action_queue::ActionTx;
use super::open_route;

pub(super) fn handle_project_list_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    if app.project_list.search_focused {
        handle_search_key(key, app);
        return;
    }

    let selected = app.project_list.selected_project().map(|p| p.id);
    match key.code {
        KeyCode::Down | KeyCode::Char('j') => app.project_list.select_next(),
        KeyCode::Up | KeyCode::Char('k') => app.project_list.select_previous(),
        KeyCode::Char('/') => app.project_list.search_focused = true,
        KeyCode::Char('a') | KeyCode::Char('A') => {
            open_route(app, action_tx, Route::ProjectAdd);
        }
        KeyCode::Char('e') | KeyCode::Char('E') | KeyCode::Enter => {
            if let Some(id) = selected {
                open_route(app, action_tx, Route::ProjectEdit(id));
            }
        }
        KeyCode::Char('l') | KeyCode::Char('L') => {
            if let Some(id) = selected {
                open_route(app, action_tx, Route::Locations(id));
            }
        }
        KeyCode::Char('v') | KeyCode::Char('V') => {
            if let Some(id) = selected {
                open_route(app, action_tx, Route::Preview(id));
            }
        }
        KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Delete => {
            app.request_project_delete();
        }
        KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Esc => {
            open_route(app, action_tx, Route::Home);
        }
        KeyCode::Char('q') | KeyCode::Char('Q') => app.quit(),
        _ => {}
    }
}

fn handle_search_key(key: KeyEvent, app: &mut App) {
    let list = &mut app.project_list;
    match key.code {
        KeyCode::Esc | KeyCode::Enter | KeyCode::Tab => list.search_focused = false,
        KeyCode::Char('x') | KeyCode::Char('X')
            if key.modifiers.contains(KeyModifiers::CONTROL) =>
        {
            list.search_input.clear();
            list.apply_filter();
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            list.search_input_char(c);
        }
        KeyCode::Backspace => list.search_backspace(),
        KeyCode::Left => list.search_input.move_left(),
        KeyCode::Right => list.search_input.move_right(),
        _ => {}
    }
}
