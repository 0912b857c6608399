use crate::app::{App, NO_CHANGES};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::super::action_queue::{Action, ActionTx};
use super::{enqueue_action, is_ctrl, open_route};

pub(super) fn handle_project_form_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    if is_ctrl(&key, 's') {
        submit(app, action_tx);
        return;
    }

    let Some(form) = app.project_form.as_mut() else {
        return;
    };
    match key.code {
        KeyCode::Tab | KeyCode::Down => form.focus_next(),
        KeyCode::BackTab | KeyCode::Up => form.focus_previous(),
        KeyCode::Left => form.horizontal(false),
        KeyCode::Right => form.horizontal(true),
        KeyCode::Home => {
            if let Some(input) = form.focused_input() {
                input.home();
            }
        }
        KeyCode::End => {
            if let Some(input) = form.focused_input() {
                input.end();
            }
        }
        KeyCode::Backspace => form.backspace(),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            form.input_char(c);
        }
        KeyCode::Enter => submit(app, action_tx),
        KeyCode::Esc => {
            let parent = form.parent_route();
            open_route(app, action_tx, parent);
        }
        _ => {}
    }
}

/// Queue the save only for a loaded, changed and valid form.
fn submit(app: &mut App, action_tx: &ActionTx) {
    let Some(form) = app.project_form.as_mut() else {
        return;
    };
    if !form.loaded {
        return;
    }
    if !form.is_dirty() {
        tracing::info!("project form submitted without changes");
        app.show_notice(NO_CHANGES);
        return;
    }
    if let Err(message) = form.validate() {
        tracing::warn!(%message, "project form rejected");
        form.validation_error = Some(message);
        return;
    }
    form.validation_error = None;
    enqueue_action(action_tx, Action::SubmitProjectForm);
}
