use storypath::{LocationId, PreviewScreen, PreviewSession, ProjectId};

/// Preview screen state. The session is rebuilt on every visit to the route,
/// so progress never outlives the screen.
#[derive(Debug, Clone)]
pub enum PreviewState {
    Loading(ProjectId),
    Missing(ProjectId),
    Ready(PreviewView),
}

#[derive(Debug, Clone)]
pub struct PreviewView {
    pub session: PreviewSession,
    /// Highlighted entry of the location selector (0 is the homescreen).
    pub selector_index: usize,
    /// Marker under the map cursor, the terminal stand-in for hovering.
    pub focused_marker: Option<usize>,
}

impl PreviewView {
    pub fn new(session: PreviewSession) -> Self {
        Self {
            session,
            selector_index: 0,
            focused_marker: None,
        }
    }

    pub fn selector_next(&mut self) {
        let count = self.session.location_count() + 1;
        self.selector_index = (self.selector_index + 1) % count;
    }

    pub fn selector_previous(&mut self) {
        let count = self.session.location_count() + 1;
        self.selector_index = (self.selector_index + count - 1) % count;
    }

    /// Apply the highlighted selector entry.
    pub fn apply_selector(&mut self) -> bool {
        let Some(name) = self
            .session
            .selector_options()
            .get(self.selector_index)
            .map(|s| s.to_string())
        else {
            return false;
        };
        self.session.select(&name)
    }

    /// Move the map cursor to the next marker with a usable position.
    pub fn focus_next_marker(&mut self, forward: bool) {
        let plottable: Vec<usize> = self
            .session
            .markers()
            .enumerate()
            .filter(|(_, (_, pos))| pos.is_finite())
            .map(|(i, _)| i)
            .collect();
        if plottable.is_empty() {
            self.focused_marker = None;
            return;
        }
        let current = self
            .focused_marker
            .and_then(|m| plottable.iter().position(|&i| i == m));
        let next = match (current, forward) {
            (None, true) => 0,
            (None, false) => plottable.len() - 1,
            (Some(p), true) => (p + 1) % plottable.len(),
            (Some(p), false) => (p + plottable.len() - 1) % plottable.len(),
        };
        self.focused_marker = Some(plottable[next]);
    }

    pub fn focused_location_id(&self) -> Option<LocationId> {
        self.focused_marker
            .and_then(|i| self.session.locations().get(i))
            .map(|l| l.id)
    }

    /// Clicking a marker: visit it and keep the selector in step.
    pub fn visit_focused_marker(&mut self) -> bool {
        let Some(id) = self.focused_location_id() else {
            return false;
        };
        if !self.session.visit(id) {
            return false;
        }
        self.sync_selector();
        true
    }

    fn sync_selector(&mut self) {
        self.selector_index = match self.session.screen() {
            PreviewScreen::Home => 0,
            PreviewScreen::AtLocation(id) => self
                .session
                .locations()
                .iter()
                .position(|l| l.id == id)
                .map(|i| i + 1)
                .unwrap_or(0),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storypath::{
        HomescreenDisplay, Location, LocationTrigger, ParticipantScoring, Project, HOMESCREEN,
    };

    fn session() -> PreviewSession {
        let project = Project {
            id: ProjectId::new(1),
            title: "Tour".to_string(),
            description: String::new(),
            instructions: String::new(),
            initial_clue: String::new(),
            homescreen_display: HomescreenDisplay::InitialClue,
            participant_scoring: ParticipantScoring::NotScored,
            is_published: true,
            username: None,
        };
        let location = |id: i64, name: &str, position: &str| Location {
            id: LocationId::new(id),
            project_id: ProjectId::new(1),
            location_name: name.to_string(),
            location_trigger: LocationTrigger::LocationEntry,
            location_position: position.to_string(),
            score_points: 2,
            clue: None,
            location_content: None,
            username: None,
        };
        PreviewSession::new(
            project,
            vec![
                location(10, "A", "(1, 1)"),
                location(11, "Broken", "nowhere"),
                location(12, "C", "(2, 2)"),
            ],
        )
    }

    #[test]
    fn test_selector_wraps_around() {
        let mut view = PreviewView::new(session());
        view.selector_previous();
        assert_eq!(view.selector_index, 3);
        view.selector_next();
        assert_eq!(view.selector_index, 0);
    }

    #[test]
    fn test_apply_selector_visits_location() {
        let mut view = PreviewView::new(session());
        view.selector_next();
        assert!(view.apply_selector());
        assert_eq!(view.session.selected_name(), "A");
        view.selector_index = 0;
        assert!(view.apply_selector());
        assert_eq!(view.session.selected_name(), HOMESCREEN);
    }

    #[test]
    fn test_marker_focus_skips_unplottable_positions() {
        let mut view = PreviewView::new(session());
        view.focus_next_marker(true);
        assert_eq!(view.focused_marker, Some(0));
        view.focus_next_marker(true);
        assert_eq!(view.focused_marker, Some(2));
        view.focus_next_marker(true);
        assert_eq!(view.focused_marker, Some(0));
        view.focus_next_marker(false);
        assert_eq!(view.focused_marker, Some(2));
    }

    #[test]
    fn test_visiting_marker_moves_selector() {
        let mut view = PreviewView::new(session());
        view.focus_next_marker(false);
        assert!(view.visit_focused_marker());
        assert_eq!(view.selector_index, 3);
        assert_eq!(view.session.score(), 2);
        assert_eq!(view.session.visited_count(), 1);
    }
}
