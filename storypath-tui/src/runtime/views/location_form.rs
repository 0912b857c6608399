use crate::app::{App, NO_CHANGES};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::super::action_queue::{Action, ActionTx};
use super::{enqueue_action, is_ctrl, open_route};

pub(super) fn handle_location_form_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    if is_ctrl(&key, 's') {
        submit(app, action_tx);
        return;
    }

    let Some(form) = app.location_form.as_mut() else {
        return;
    };
    match key.code {
        KeyCode::Tab => form.focus_next(),
        KeyCode::BackTab => form.focus_previous(),
        KeyCode::Down => form.focus_next(),
        KeyCode::Up => form.focus_previous(),
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
        KeyCode::Enter => {
            if !form.newline() {
                submit(app, action_tx);
            }
        }
        KeyCode::Esc => {
            let parent = form.parent_route();
            open_route(app, action_tx, parent);
        }
        _ => {}
    }
}

fn submit(app: &mut App, action_tx: &ActionTx) {
    let Some(form) = app.location_form.as_mut() else {
        return;
    };
    if !form.loaded {
        return;
    }
    if !form.is_dirty() {
        tracing::info!("location form submitted without changes");
        app.show_notice(NO_CHANGES);
        return;
    }
    if let Err(message) = form.validate() {
        tracing::warn!(%message, "location form rejected");
        form.validation_error = Some(message);
        return;
    }
    form.validation_error = None;
    enqueue_action(action_tx, Action::SubmitLocationForm);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{LocationField, Route, TextInput};
    use storypath::ProjectId;

    use super::super::super::action_queue::channel;

    fn press(app: &mut App, code: KeyCode, modifiers: KeyModifiers) -> Option<Action> {
        let (tx, mut rx) = channel();
        handle_location_form_key(KeyEvent::new(code, modifiers), app, &tx);
        rx.try_recv().ok()
    }

    fn create_app() -> App {
        let mut app = App::new("author");
        app.navigate_to(Route::LocationAdd(ProjectId::new(4)));
        app
    }

    #[test]
    fn enter_in_content_adds_line_instead_of_submitting() {
        let mut app = create_app();
        app.location_form.as_mut().unwrap().focused = LocationField::Content;
        assert_eq!(press(&mut app, KeyCode::Enter, KeyModifiers::NONE), None);
        assert!(app.notice.is_none());
        assert_eq!(app.location_form.as_ref().unwrap().content.value, "\n");
    }

    #[test]
    fn ctrl_s_submits_from_content() {
        let mut app = create_app();
        {
            let form = app.location_form.as_mut().unwrap();
            form.name = TextInput::from_str("Oval");
            form.position = TextInput::from_str("(1, 2)");
            form.focused = LocationField::Content;
        }
        press(&mut app, KeyCode::Char('x'), KeyModifiers::NONE);
        assert_eq!(
            press(&mut app, KeyCode::Char('s'), KeyModifiers::CONTROL),
            Some(Action::SubmitLocationForm)
        );
    }

    #[test]
    fn unparsable_position_blocks_submit() {
        let mut app = create_app();
        for c in "Oval".chars() {
            press(&mut app, KeyCode::Char(c), KeyModifiers::NONE);
        }
        press(&mut app, KeyCode::Tab, KeyModifiers::NONE);
        press(&mut app, KeyCode::Tab, KeyModifiers::NONE);
        for c in "north".chars() {
            press(&mut app, KeyCode::Char(c), KeyModifiers::NONE);
        }
        assert_eq!(press(&mut app, KeyCode::Enter, KeyModifiers::NONE), None);
        assert!(app
            .location_form
            .as_ref()
            .unwrap()
            .validation_error
            .is_some());
    }

    #[test]
    fn unchanged_submit_shows_notice() {
        let mut app = create_app();
        assert_eq!(press(&mut app, KeyCode::Enter, KeyModifiers::NONE), None);
        assert_eq!(app.notice.as_deref(), Some(NO_CHANGES));
    }

    #[test]
    fn escape_returns_to_project_locations() {
        let mut app = create_app();
        press(&mut app, KeyCode::Esc, KeyModifiers::NONE);
        assert_eq!(app.route, Route::Locations(ProjectId::new(4)));
    }
}
