use crate::app::{App, Route};
use crossterm::event::{KeyCode, KeyEvent};

use super::super::action_queue::ActionTx;
use super::open_route;

pub(super) fn handle_location_list_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    let Some(list) = app.location_list.as_mut() else {
        return;
    };
    let project_id = list.project_id;
    let selected = list.selected_location().map(|l| l.id);

    match key.code {
        KeyCode::Down | KeyCode::Char('j') => list.select_next(),
        KeyCode::Up | KeyCode::Char('k') => list.select_previous(),
        KeyCode::Char(']') => list.scroll_labels_down(),
        KeyCode::Char('[') => list.scroll_labels_up(),
        KeyCode::Char('x') | KeyCode::Char('X') => list.close_labels(),
        KeyCode::Char('p') => {
            if let Err(e) = list.print_selected() {
                tracing::warn!("QR generation failed: {}", e);
                app.show_notice(e.to_string());
            }
        }
        KeyCode::Char('P') => {
            if let Err(e) = list.print_all() {
                tracing::warn!("QR generation failed: {}", e);
                app.show_notice(e.to_string());
            }
        }
        KeyCode::Char('a') | KeyCode::Char('A') => {
            open_route(app, action_tx, Route::LocationAdd(project_id));
        }
        KeyCode::Char('e') | KeyCode::Char('E') | KeyCode::Enter => {
            if let Some(id) = selected {
                open_route(app, action_tx, Route::LocationEdit(id));
            }
        }
        KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Delete => {
            app.request_location_delete();
        }
        KeyCode::Char('v') | KeyCode::Char('V') => {
            open_route(app, action_tx, Route::Preview(project_id));
        }
        KeyCode::Esc => open_route(app, action_tx, Route::Projects),
        KeyCode::Char('q') | KeyCode::Char('Q') => app.quit(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::DeleteTarget;
    use crossterm::event::KeyModifiers;
    use storypath::{Location, LocationId, LocationTrigger, ProjectId};

    use super::super::super::action_queue::{channel, Action};

    fn location(id: i64, name: &str) -> Location {
        Location {
            id: LocationId::new(id),
            project_id: ProjectId::new(2),
            location_name: name.to_string(),
            location_trigger: LocationTrigger::Both,
            location_position: "(0, 0)".to_string(),
            score_points: 1,
            clue: None,
            location_content: None,
            username: None,
        }
    }

    fn test_app(locations: Vec<Location>) -> App {
        let mut app = App::new("author");
        app.navigate_to(Route::Locations(ProjectId::new(2)));
        app.location_list.as_mut().unwrap().set_locations(locations);
        app
    }

    fn press(app: &mut App, code: KeyCode) -> Option<Action> {
        let (tx, mut rx) = channel();
        handle_location_list_key(KeyEvent::new(code, KeyModifiers::NONE), app, &tx);
        rx.try_recv().ok()
    }

    #[test]
    fn print_all_on_empty_list_shows_notice() {
        let mut app = test_app(vec![]);
        press(&mut app, KeyCode::Char('P'));
        assert_eq!(app.notice.as_deref(), Some("There is no location to print."));
        assert!(app.location_list.as_ref().unwrap().qr_labels.is_empty());
    }

    #[test]
    fn print_all_lays_out_every_location() {
        let mut app = test_app(vec![location(1, "Gate"), location(2, "Pond")]);
        press(&mut app, KeyCode::Char('P'));
        assert!(app.notice.is_none());
        assert_eq!(app.location_list.as_ref().unwrap().qr_labels.len(), 2);
    }

    #[test]
    fn add_opens_form_for_this_project() {
        let mut app = test_app(vec![]);
        assert_eq!(press(&mut app, KeyCode::Char('a')), None);
        assert_eq!(app.route, Route::LocationAdd(ProjectId::new(2)));
    }

    #[test]
    fn delete_targets_selected_row() {
        let mut app = test_app(vec![location(1, "Gate"), location(2, "Pond")]);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Char('d'));
        assert_eq!(
            app.delete_context.as_ref().map(|c| c.target),
            Some(DeleteTarget::Location(LocationId::new(2)))
        );
    }
}
