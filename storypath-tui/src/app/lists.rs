use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use storypath::qr::{self, QrLabel};
use storypath::{Location, LocationId, Project, ProjectId, StoryPathError};

use super::state::TextInput;

/// Author's projects with a fuzzy title filter.
#[derive(Debug, Clone, Default)]
pub struct ProjectListState {
    pub projects: Vec<Project>,
    pub filtered: Vec<Project>,
    pub selected: usize,
    pub search_input: TextInput,
    pub search_focused: bool,
    pub loaded: bool,
}

impl ProjectListState {
    pub fn set_projects(&mut self, projects: Vec<Project>) {
        self.projects = projects;
        self.loaded = true;
        self.apply_filter();
    }

    pub fn apply_filter(&mut self) {
        if self.search_input.value.is_empty() {
            self.filtered = self.projects.clone();
        } else {
            let matcher = SkimMatcherV2::default();
            let mut scored: Vec<(Project, i64)> = self
                .projects
                .iter()
                .filter_map(|project| {
                    matcher
                        .fuzzy_match(&project.title, &self.search_input.value)
                        .map(|score| (project.clone(), score))
                })
                .collect();
            scored.sort_by(|a, b| b.1.cmp(&a.1));
            self.filtered = scored.into_iter().map(|(p, _)| p).collect();
        }
        self.selected = self.selected.min(self.filtered.len().saturating_sub(1));
    }

    pub fn search_input_char(&mut self, c: char) {
        self.search_input.insert(c);
        self.selected = 0;
        self.apply_filter();
    }

    pub fn search_backspace(&mut self) {
        if self.search_input.backspace() {
            self.apply_filter();
        }
    }

    pub fn selected_project(&self) -> Option<&Project> {
        self.filtered.get(self.selected)
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.filtered.len() {
            self.selected += 1;
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Drop a deleted project from the view without re-fetching.
    pub fn remove(&mut self, id: ProjectId) {
        self.projects.retain(|p| p.id != id);
        self.apply_filter();
    }
}

/// Locations of one project plus the printable QR sheet.
#[derive(Debug, Clone)]
pub struct LocationListState {
    pub project_id: ProjectId,
    pub locations: Vec<Location>,
    pub selected: usize,
    pub loaded: bool,
    /// Labels currently laid out for printing, shown together as a grid.
    pub qr_labels: Vec<QrLabel>,
    /// First grid row on screen.
    pub qr_scroll: usize,
}

impl LocationListState {
    pub fn new(project_id: ProjectId) -> Self {
        Self {
            project_id,
            locations: Vec::new(),
            selected: 0,
            loaded: false,
            qr_labels: Vec::new(),
            qr_scroll: 0,
        }
    }

    pub fn set_locations(&mut self, locations: Vec<Location>) {
        self.locations = locations;
        self.loaded = true;
        self.clamp_selection();
    }

    fn clamp_selection(&mut self) {
        self.selected = self.selected.min(self.locations.len().saturating_sub(1));
    }

    pub fn selected_location(&self) -> Option<&Location> {
        self.locations.get(self.selected)
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.locations.len() {
            self.selected += 1;
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn remove(&mut self, id: LocationId) {
        self.locations.retain(|l| l.id != id);
        self.close_labels();
        self.clamp_selection();
    }

    /// Lay out the selected location's code alone.
    pub fn print_selected(&mut self) -> Result<(), StoryPathError> {
        let location = self
            .selected_location()
            .ok_or(StoryPathError::NothingToPrint)?;
        self.qr_labels = vec![QrLabel::new(qr::location_payload(location))?];
        self.qr_scroll = 0;
        Ok(())
    }

    /// Lay out one code per location, in list order.
    pub fn print_all(&mut self) -> Result<(), StoryPathError> {
        self.qr_labels = qr::labels_for_locations(&self.locations)?;
        self.qr_scroll = 0;
        Ok(())
    }

    /// Scroll the grid down a row. There is never more than one row per
    /// label; the view clamps to the rows that fit its width.
    pub fn scroll_labels_down(&mut self) {
        if self.qr_scroll + 1 < self.qr_labels.len() {
            self.qr_scroll += 1;
        }
    }

    pub fn scroll_labels_up(&mut self) {
        self.qr_scroll = self.qr_scroll.saturating_sub(1);
    }

    pub fn close_labels(&mut self) {
        self.qr_labels.clear();
        self.qr_scroll = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use storypath::{HomescreenDisplay, LocationTrigger, ParticipantScoring};

    fn project(id: i64, title: &str) -> Project {
        Project {
            id: ProjectId::new(id),
            title: title.to_string(),
            description: String::new(),
            instructions: String::new(),
            initial_clue: String::new(),
            homescreen_display: HomescreenDisplay::InitialClue,
            participant_scoring: ParticipantScoring::NotScored,
            is_published: false,
            username: None,
        }
    }

    fn location(id: i64, name: &str) -> Location {
        Location {
            id: LocationId::new(id),
            project_id: ProjectId::new(1),
            location_name: name.to_string(),
            location_trigger: LocationTrigger::LocationEntry,
            location_position: "(0, 0)".to_string(),
            score_points: 1,
            clue: None,
            location_content: None,
            username: None,
        }
    }

    #[test]
    fn test_filter_matches_titles() {
        let mut list = ProjectListState::default();
        list.set_projects(vec![project(1, "Campus Tour"), project(2, "Museum Hunt")]);
        assert_eq!(list.filtered.len(), 2);

        for c in "musm".chars() {
            list.search_input_char(c);
        }
        assert_eq!(list.filtered.len(), 1);
        assert_eq!(list.selected_project().map(|p| p.id), Some(ProjectId::new(2)));
    }

    #[test]
    fn test_remove_project_keeps_selection_in_bounds() {
        let mut list = ProjectListState::default();
        list.set_projects(vec![project(1, "A"), project(2, "B")]);
        list.select_next();
        list.remove(ProjectId::new(2));
        assert_eq!(list.projects.len(), 1);
        assert_eq!(list.selected, 0);
    }

    #[test]
    fn test_print_all_with_no_locations_errors() {
        let mut list = LocationListState::new(ProjectId::new(1));
        list.set_locations(vec![]);
        let err = list.print_all().unwrap_err();
        assert_eq!(err.to_string(), "There is no location to print.");
        assert!(list.qr_labels.is_empty());
    }

    #[test]
    fn test_print_all_lays_out_every_label() {
        let mut list = LocationListState::new(ProjectId::new(1));
        list.set_locations(vec![location(1, "A"), location(2, "B")]);
        list.print_all().unwrap();
        let payloads: Vec<&str> = list.qr_labels.iter().map(|l| l.payload.as_str()).collect();
        assert_eq!(payloads, vec!["A", "B"]);

        list.scroll_labels_down();
        list.scroll_labels_down();
        assert_eq!(list.qr_scroll, 1);
        list.scroll_labels_up();
        assert_eq!(list.qr_scroll, 0);
        list.close_labels();
        assert!(list.qr_labels.is_empty());
    }

    #[test]
    fn test_print_selected_uses_location_name() {
        let mut list = LocationListState::new(ProjectId::new(1));
        list.set_locations(vec![location(1, "A"), location(2, "B")]);
        list.select_next();
        list.print_selected().unwrap();
        assert_eq!(list.qr_labels.len(), 1);
        assert_eq!(list.qr_labels[0].payload, "B");
    }

    #[test]
    fn test_remove_location_clears_sheet() {
        let mut list = LocationListState::new(ProjectId::new(1));
        list.set_locations(vec![location(1, "A"), location(2, "B")]);
        list.print_all().unwrap();
        list.remove(LocationId::new(1));
        assert_eq!(list.locations.len(), 1);
        assert!(list.qr_labels.is_empty());
    }
}
