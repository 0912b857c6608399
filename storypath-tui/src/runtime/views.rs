use crate::app::{App, Route};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::action_queue::{Action, ActionTx};

mod confirm_delete;
mod home;
mod location_form;
mod location_list;
mod notice;
mod preview;
mod project_form;
mod project_list;

fn enqueue_action(action_tx: &ActionTx, action: Action) {
    let _ = action_tx.send(action);
}

/// Queue the fetch for the current route, if it shows backend data.
pub(super) fn enqueue_route_load(app: &mut App, action_tx: &ActionTx) {
    app.is_loading = app.route.needs_fetch();
    if app.is_loading {
        enqueue_action(action_tx, Action::LoadRoute(app.route));
    }
}

fn open_route(app: &mut App, action_tx: &ActionTx, route: Route) {
    app.clear_status();
    app.navigate_to(route);
    enqueue_route_load(app, action_tx);
}

fn is_ctrl(key: &KeyEvent, c: char) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char(k) if k.eq_ignore_ascii_case(&c))
}

pub(super) fn handle_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    if app.notice.is_some() {
        notice::handle_notice_key(key, app);
        return;
    }
    if is_ctrl(&key, 'c') {
        app.quit();
        return;
    }
    if app.delete_context.is_some() {
        confirm_delete::handle_confirm_delete_key(key, app, action_tx);
        return;
    }

    match app.route {
        Route::Home => home::handle_home_key(key, app, action_tx),
        Route::Projects => project_list::handle_project_list_key(key, app, action_tx),
        Route::ProjectAdd | Route::ProjectEdit(_) => {
            project_form::handle_project_form_key(key, app, action_tx)
        }
        Route::Locations(_) => location_list::handle_location_list_key(key, app, action_tx),
        Route::LocationAdd(_) | Route::LocationEdit(_) => {
            location_form::handle_location_form_key(key, app, action_tx)
        }
        Route::Preview(_) => preview::handle_preview_key(key, app, action_tx),
    }
}
