//! Session-local simulation of the participant experience.
//!
//! A [`PreviewSession`] owns its visited/score tracking. Nothing here is ever
//! written back to the backend; dropping the session discards the progress.

use std::collections::HashSet;

use tracing::debug;

use crate::domain::{
    total_score, HomescreenDisplay, Location, LocationId, Position, Project, FALLBACK_CENTER,
};
use crate::qr;

/// Selector value that returns the preview to the home screen.
pub const HOMESCREEN: &str = "Homescreen";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewScreen {
    Home,
    AtLocation(LocationId),
}

/// What the home screen shows below the instructions.
#[derive(Debug, Clone, PartialEq)]
pub enum HomeBody<'a> {
    InitialClue(&'a str),
    AllLocations(Vec<&'a str>),
}

#[derive(Debug, Clone)]
pub struct PreviewSession {
    project: Project,
    locations: Vec<Location>,
    max_score: u32,
    score: u32,
    visited: HashSet<LocationId>,
    visited_count: usize,
    screen: PreviewScreen,
    show_map: bool,
    show_qr: bool,
}

impl PreviewSession {
    pub fn new(project: Project, locations: Vec<Location>) -> Self {
        let max_score = total_score(&locations);
        Self {
            project,
            locations,
            max_score,
            score: 0,
            visited: HashSet::new(),
            visited_count: 0,
            screen: PreviewScreen::Home,
            show_map: false,
            show_qr: false,
        }
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    pub fn screen(&self) -> PreviewScreen {
        self.screen
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn max_score(&self) -> u32 {
        self.max_score
    }

    pub fn visited_count(&self) -> usize {
        self.visited_count
    }

    pub fn location_count(&self) -> usize {
        self.locations.len()
    }

    pub fn is_visited(&self, id: LocationId) -> bool {
        self.visited.contains(&id)
    }

    pub fn active_location(&self) -> Option<&Location> {
        match self.screen {
            PreviewScreen::Home => None,
            PreviewScreen::AtLocation(id) => self.locations.iter().find(|l| l.id == id),
        }
    }

    /// Name currently shown in the location selector.
    pub fn selected_name(&self) -> &str {
        self.active_location()
            .map(|l| l.location_name.as_str())
            .unwrap_or(HOMESCREEN)
    }

    /// Selector entries: the home sentinel followed by every location name.
    pub fn selector_options(&self) -> Vec<&str> {
        std::iter::once(HOMESCREEN)
            .chain(self.locations.iter().map(|l| l.location_name.as_str()))
            .collect()
    }

    /// Switch to the home screen or to the location called `name`.
    ///
    /// Unknown names leave the session untouched and return `false`.
    pub fn select(&mut self, name: &str) -> bool {
        if name == HOMESCREEN {
            self.screen = PreviewScreen::Home;
            return true;
        }

        let Some(id) = self
            .locations
            .iter()
            .find(|l| l.location_name == name)
            .map(|l| l.id)
        else {
            debug!(name, "preview selection does not match any location");
            return false;
        };
        self.visit(id)
    }

    /// Make `id` the active location, scoring it on the first visit only.
    pub fn visit(&mut self, id: LocationId) -> bool {
        let Some(points) = self
            .locations
            .iter()
            .find(|l| l.id == id)
            .map(|l| l.score_points)
        else {
            return false;
        };

        self.screen = PreviewScreen::AtLocation(id);
        if self.visited.insert(id) {
            self.visited_count += 1;
            self.score = self.score.saturating_add(points).min(self.max_score);
            debug!(%id, score = self.score, visited = self.visited_count, "location visited");
        }
        true
    }

    pub fn map_visible(&self) -> bool {
        self.show_map && self.screen == PreviewScreen::Home
    }

    pub fn qr_visible(&self) -> bool {
        self.show_qr && matches!(self.screen, PreviewScreen::AtLocation(_))
    }

    /// Toggle the map. Only meaningful on the home screen.
    pub fn toggle_map(&mut self) {
        if self.screen == PreviewScreen::Home {
            self.show_map = !self.show_map;
        }
    }

    /// Toggle the scannable code. Only meaningful at a location.
    pub fn toggle_qr(&mut self) {
        if matches!(self.screen, PreviewScreen::AtLocation(_)) {
            self.show_qr = !self.show_qr;
        }
    }

    /// First location's position, or the fallback centre for an empty project.
    pub fn map_center(&self) -> Position {
        self.locations
            .first()
            .map(Location::position)
            .unwrap_or(FALLBACK_CENTER)
    }

    pub fn markers(&self) -> impl Iterator<Item = (&Location, Position)> {
        self.locations.iter().map(|l| (l, l.position()))
    }

    pub fn home_body(&self) -> HomeBody<'_> {
        match self.project.homescreen_display {
            HomescreenDisplay::InitialClue => HomeBody::InitialClue(&self.project.initial_clue),
            HomescreenDisplay::AllLocations => HomeBody::AllLocations(
                self.locations
                    .iter()
                    .map(|l| l.location_name.as_str())
                    .collect(),
            ),
        }
    }

    /// Payload for the active location's participant QR code.
    pub fn qr_payload(&self) -> Option<String> {
        self.active_location()
            .map(|l| qr::preview_payload(self.project.id, l.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{LocationTrigger, ParticipantScoring, ProjectId};

    fn project(display: HomescreenDisplay) -> Project {
        Project {
            id: ProjectId::new(1),
            title: "Campus Tour".to_string(),
            description: String::new(),
            instructions: "Walk around".to_string(),
            initial_clue: "Start at the library".to_string(),
            homescreen_display: display,
            participant_scoring: ParticipantScoring::LocationsEntered,
            is_published: true,
            username: None,
        }
    }

    fn location(id: i64, name: &str, points: u32, position: &str) -> Location {
        Location {
            id: LocationId::new(id),
            project_id: ProjectId::new(1),
            location_name: name.to_string(),
            location_trigger: LocationTrigger::LocationEntry,
            location_position: position.to_string(),
            score_points: points,
            clue: Some(format!("clue for {name}")),
            location_content: None,
            username: None,
        }
    }

    fn two_stop_session() -> PreviewSession {
        PreviewSession::new(
            project(HomescreenDisplay::InitialClue),
            vec![
                location(10, "A", 5, "(10.5, 20.25)"),
                location(11, "B", 3, "(1, 2)"),
            ],
        )
    }

    #[test]
    fn test_max_score_is_sum_of_points() {
        let session = two_stop_session();
        assert_eq!(session.max_score(), 8);
        assert_eq!(session.score(), 0);
        assert_eq!(session.visited_count(), 0);
        assert_eq!(session.screen(), PreviewScreen::Home);
    }

    #[test]
    fn test_visit_sequence_scores_each_location_once() {
        let mut session = two_stop_session();

        assert!(session.select("A"));
        assert!(session.select("B"));
        assert_eq!(session.score(), 8);
        assert_eq!(session.visited_count(), 2);

        assert!(session.select("A"));
        assert_eq!(session.score(), 8);
        assert_eq!(session.visited_count(), 2);
        assert_eq!(session.screen(), PreviewScreen::AtLocation(LocationId::new(10)));
    }

    #[test]
    fn test_marker_visit_twice_counts_once() {
        let mut session = two_stop_session();

        session.visit(LocationId::new(11));
        session.visit(LocationId::new(11));
        assert_eq!(session.visited_count(), 1);
        assert_eq!(session.score(), 3);
        assert!(session.is_visited(LocationId::new(11)));
    }

    #[test]
    fn test_score_never_exceeds_max() {
        let mut session = two_stop_session();
        for name in ["B", "A", "B", "A", "A"] {
            session.select(name);
            assert!(session.score() <= session.max_score());
        }
    }

    #[test]
    fn test_homescreen_always_returns_home() {
        let mut session = two_stop_session();
        assert!(session.select(HOMESCREEN));
        assert_eq!(session.screen(), PreviewScreen::Home);

        session.select("B");
        assert!(session.select(HOMESCREEN));
        assert_eq!(session.screen(), PreviewScreen::Home);
        assert_eq!(session.selected_name(), HOMESCREEN);
        // Returning home keeps the progress.
        assert_eq!(session.score(), 3);
    }

    #[test]
    fn test_unknown_name_is_ignored() {
        let mut session = two_stop_session();
        session.select("A");
        assert!(!session.select("Nowhere"));
        assert_eq!(session.screen(), PreviewScreen::AtLocation(LocationId::new(10)));
        assert_eq!(session.visited_count(), 1);
    }

    #[test]
    fn test_map_center_uses_first_location() {
        let session = two_stop_session();
        assert_eq!(session.map_center(), Position::new(10.5, 20.25));
    }

    #[test]
    fn test_map_center_falls_back_without_locations() {
        let session = PreviewSession::new(project(HomescreenDisplay::InitialClue), vec![]);
        assert_eq!(session.map_center(), FALLBACK_CENTER);
        assert_eq!(session.max_score(), 0);
    }

    #[test]
    fn test_toggles_are_scoped_to_their_screen() {
        let mut session = two_stop_session();

        session.toggle_qr();
        assert!(!session.qr_visible());
        session.toggle_map();
        assert!(session.map_visible());

        session.select("A");
        assert!(!session.map_visible());
        session.toggle_map();
        session.toggle_qr();
        assert!(session.qr_visible());

        session.select(HOMESCREEN);
        assert!(session.map_visible());
        assert!(!session.qr_visible());
    }

    #[test]
    fn test_home_body_follows_display_mode() {
        let session = two_stop_session();
        assert_eq!(
            session.home_body(),
            HomeBody::InitialClue("Start at the library")
        );

        let session = PreviewSession::new(
            project(HomescreenDisplay::AllLocations),
            vec![location(1, "A", 1, "(0, 0)"), location(2, "B", 1, "(0, 0)")],
        );
        assert_eq!(session.home_body(), HomeBody::AllLocations(vec!["A", "B"]));
    }

    #[test]
    fn test_qr_payload_pairs_project_and_location() {
        let mut session = two_stop_session();
        assert_eq!(session.qr_payload(), None);
        session.select("B");
        assert_eq!(session.qr_payload().as_deref(), Some("1,11"));
    }

    #[test]
    fn test_selector_options_start_with_homescreen() {
        let session = two_stop_session();
        assert_eq!(session.selector_options(), vec![HOMESCREEN, "A", "B"]);
    }
}
