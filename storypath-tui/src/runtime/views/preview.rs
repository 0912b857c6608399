use crate::app::{App, PreviewState, Route};
use crossterm::event::{KeyCode, KeyEvent};

use super::super::action_queue::ActionTx;
use super::open_route;

pub(super) fn handle_preview_key(key: KeyEvent, app: &mut App, action_tx: &ActionTx) {
    let back = match app.route {
        Route::Preview(project_id) => Route::Locations(project_id),
        _ => Route::Projects,
    };
    if matches!(key.code, KeyCode::Esc) {
        open_route(app, action_tx, back);
        return;
    }
    if matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q')) {
        app.quit();
        return;
    }

    let Some(PreviewState::Ready(view)) = app.preview.as_mut() else {
        return;
    };
    match key.code {
        KeyCode::Down | KeyCode::Char('j') => view.selector_next(),
        KeyCode::Up | KeyCode::Char('k') => view.selector_previous(),
        KeyCode::Enter => {
            view.apply_selector();
        }
        KeyCode::Char('m') | KeyCode::Char('M') => view.session.toggle_map(),
        KeyCode::Char('r') | KeyCode::Char('R') => view.session.toggle_qr(),
        KeyCode::Tab if view.session.map_visible() => view.focus_next_marker(true),
        KeyCode::BackTab if view.session.map_visible() => view.focus_next_marker(false),
        KeyCode::Char(' ') if view.session.map_visible() => {
            view.visit_focused_marker();
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::PreviewView;
    use crossterm::event::KeyModifiers;
    use storypath::{
        HomescreenDisplay, Location, LocationId, LocationTrigger, ParticipantScoring,
        PreviewScreen, PreviewSession, Project, ProjectId,
    };

    use super::super::super::action_queue::{channel, Action};

    fn ready_app() -> App {
        let project = Project {
            id: ProjectId::new(1),
            title: "Tour".to_string(),
            description: String::new(),
            instructions: "Go".to_string(),
            initial_clue: String::new(),
            homescreen_display: HomescreenDisplay::AllLocations,
            participant_scoring: ParticipantScoring::LocationsEntered,
            is_published: true,
            username: None,
        };
        let location = |id: i64, name: &str, points: u32| Location {
            id: LocationId::new(id),
            project_id: ProjectId::new(1),
            location_name: name.to_string(),
            location_trigger: LocationTrigger::LocationEntry,
            location_position: "(1, 1)".to_string(),
            score_points: points,
            clue: None,
            location_content: None,
            username: None,
        };
        let mut app = App::new("author");
        app.navigate_to(Route::Preview(ProjectId::new(1)));
        app.preview = Some(PreviewState::Ready(PreviewView::new(PreviewSession::new(
            project,
            vec![location(10, "A", 5), location(11, "B", 3)],
        ))));
        app
    }

    fn press(app: &mut App, code: KeyCode) -> Option<Action> {
        let (tx, mut rx) = channel();
        handle_preview_key(KeyEvent::new(code, KeyModifiers::NONE), app, &tx);
        rx.try_recv().ok()
    }

    fn session(app: &App) -> &PreviewSession {
        match &app.preview {
            Some(PreviewState::Ready(view)) => &view.session,
            _ => panic!("preview not ready"),
        }
    }

    #[test]
    fn selecting_through_keys_scores_each_location_once() {
        let mut app = ready_app();
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        assert_eq!(session(&app).score(), 8);
        assert_eq!(session(&app).visited_count(), 2);

        press(&mut app, KeyCode::Up);
        press(&mut app, KeyCode::Enter);
        assert_eq!(session(&app).score(), 8);
        assert_eq!(
            session(&app).screen(),
            PreviewScreen::AtLocation(LocationId::new(10))
        );
    }

    #[test]
    fn marker_keys_only_work_with_map_open() {
        let mut app = ready_app();
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Char(' '));
        assert_eq!(session(&app).visited_count(), 0);

        press(&mut app, KeyCode::Char('m'));
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Char(' '));
        assert_eq!(session(&app).visited_count(), 1);
        assert_eq!(session(&app).score(), 5);
    }

    #[test]
    fn escape_leaves_and_discards_session() {
        let mut app = ready_app();
        let action = press(&mut app, KeyCode::Esc);
        assert_eq!(app.route, Route::Locations(ProjectId::new(1)));
        assert!(app.preview.is_none());
        assert_eq!(
            action,
            Some(Action::LoadRoute(Route::Locations(ProjectId::new(1))))
        );
    }
}
