use storypath::{
    HomescreenDisplay, Location, LocationId, LocationPayload, LocationTrigger, ParticipantScoring,
    Position, Project, ProjectId, ProjectPayload,
};
use strum::{EnumIter, IntoEnumIterator};

use super::navigation::Route;
use super::state::TextInput;

pub const NO_CHANGES: &str = "No changes were made.";

/// Whether a form creates a new record or edits the one with the given id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode<Id> {
    Create,
    Edit(Id),
}

/// Step to the next (or previous) variant of a closed enum, wrapping around.
pub fn cycle<T: IntoEnumIterator + PartialEq + Copy>(current: T, forward: bool) -> T {
    let all: Vec<T> = T::iter().collect();
    let idx = all.iter().position(|v| *v == current).unwrap_or(0);
    let next = if forward {
        (idx + 1) % all.len()
    } else {
        (idx + all.len() - 1) % all.len()
    };
    all[next]
}

fn require(input: &TextInput, label: &str) -> Result<(), String> {
    if input.value.trim().is_empty() {
        Err(format!("{} is required.", label))
    } else {
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter)]
pub enum ProjectField {
    Title,
    Description,
    Instructions,
    InitialClue,
    HomescreenDisplay,
    ParticipantScoring,
    Published,
}

impl ProjectField {
    pub fn label(&self) -> &'static str {
        match self {
            ProjectField::Title => "Title",
            ProjectField::Description => "Description",
            ProjectField::Instructions => "Instructions",
            ProjectField::InitialClue => "Initial Clue",
            ProjectField::HomescreenDisplay => "Homescreen Display",
            ProjectField::ParticipantScoring => "Participant Scoring",
            ProjectField::Published => "Published",
        }
    }

    pub fn hint(&self) -> &'static str {
        match self {
            ProjectField::Title => "The name of your project.",
            ProjectField::Description => {
                "A brief description of your project. This is not displayed to participants."
            }
            ProjectField::Instructions => {
                "Instructions for participants, explaining how to engage with the project."
            }
            ProjectField::InitialClue => "The first clue to start the project. This is optional.",
            ProjectField::HomescreenDisplay => {
                "Choose what to display on the homescreen of the project."
            }
            ProjectField::ParticipantScoring => "How participants are scored.",
            ProjectField::Published => "Visible to participants.",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProjectForm {
    pub mode: FormMode<ProjectId>,
    pub title: TextInput,
    pub description: TextInput,
    pub instructions: TextInput,
    pub initial_clue: TextInput,
    pub homescreen_display: HomescreenDisplay,
    pub participant_scoring: ParticipantScoring,
    pub published: bool,
    pub focused: ProjectField,
    /// False while an edit form waits for its record.
    pub loaded: bool,
    pub validation_error: Option<String>,
    dirty: bool,
}

impl ProjectForm {
    pub fn create() -> Self {
        Self {
            mode: FormMode::Create,
            title: TextInput::new(),
            description: TextInput::new(),
            instructions: TextInput::new(),
            initial_clue: TextInput::new(),
            homescreen_display: HomescreenDisplay::default(),
            participant_scoring: ParticipantScoring::default(),
            published: false,
            focused: ProjectField::Title,
            loaded: true,
            validation_error: None,
            dirty: false,
        }
    }

    pub fn edit(id: ProjectId) -> Self {
        Self {
            mode: FormMode::Edit(id),
            loaded: false,
            ..Self::create()
        }
    }

    /// Populate the fields from a fetched record. The form starts clean.
    pub fn load(&mut self, project: &Project) {
        self.title = TextInput::from_str(&project.title);
        self.description = TextInput::from_str(&project.description);
        self.instructions = TextInput::from_str(&project.instructions);
        self.initial_clue = TextInput::from_str(&project.initial_clue);
        self.homescreen_display = project.homescreen_display;
        self.participant_scoring = project.participant_scoring;
        self.published = project.is_published;
        self.loaded = true;
        self.dirty = false;
        self.validation_error = None;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn heading(&self) -> &'static str {
        match self.mode {
            FormMode::Create => "Add Project",
            FormMode::Edit(_) => "Edit Project",
        }
    }

    pub fn parent_route(&self) -> Route {
        Route::Projects
    }

    pub fn focused_input(&mut self) -> Option<&mut TextInput> {
        match self.focused {
            ProjectField::Title => Some(&mut self.title),
            ProjectField::Description => Some(&mut self.description),
            ProjectField::Instructions => Some(&mut self.instructions),
            ProjectField::InitialClue => Some(&mut self.initial_clue),
            _ => None,
        }
    }

    pub fn focus_next(&mut self) {
        self.focused = cycle(self.focused, true);
    }

    pub fn focus_previous(&mut self) {
        self.focused = cycle(self.focused, false);
    }

    pub fn input_char(&mut self, c: char) {
        if !self.loaded {
            return;
        }
        if let Some(input) = self.focused_input() {
            input.insert(c);
            self.dirty = true;
        } else if c == ' ' {
            self.change_choice(true);
        }
    }

    pub fn backspace(&mut self) {
        if !self.loaded {
            return;
        }
        if let Some(input) = self.focused_input() {
            if input.backspace() {
                self.dirty = true;
            }
        }
    }

    /// Left/right: move the cursor in text fields, change the value of choices.
    pub fn horizontal(&mut self, forward: bool) {
        if !self.loaded {
            return;
        }
        match self.focused_input() {
            Some(input) if forward => input.move_right(),
            Some(input) => input.move_left(),
            None => self.change_choice(forward),
        }
    }

    fn change_choice(&mut self, forward: bool) {
        match self.focused {
            ProjectField::HomescreenDisplay => {
                self.homescreen_display = cycle(self.homescreen_display, forward);
            }
            ProjectField::ParticipantScoring => {
                self.participant_scoring = cycle(self.participant_scoring, forward);
            }
            ProjectField::Published => self.published = !self.published,
            _ => return,
        }
        self.dirty = true;
    }

    pub fn validate(&self) -> Result<(), String> {
        require(&self.title, "Title")?;
        require(&self.description, "Description")?;
        require(&self.instructions, "Instructions")?;
        Ok(())
    }

    pub fn to_payload(&self, username: &str) -> ProjectPayload {
        ProjectPayload {
            title: self.title.value.trim().to_string(),
            description: self.description.value.trim().to_string(),
            instructions: self.instructions.value.trim().to_string(),
            initial_clue: self.initial_clue.value.trim().to_string(),
            homescreen_display: self.homescreen_display,
            is_published: self.published,
            participant_scoring: self.participant_scoring,
            username: username.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter)]
pub enum LocationField {
    Name,
    Trigger,
    Position,
    ScorePoints,
    Clue,
    Content,
}

impl LocationField {
    pub fn label(&self) -> &'static str {
        match self {
            LocationField::Name => "Location Name",
            LocationField::Trigger => "Location Trigger",
            LocationField::Position => "Location Position (lat, long)",
            LocationField::ScorePoints => "Points for Reaching Location",
            LocationField::Clue => "Clue (Optional)",
            LocationField::Content => "Location Content (HTML)",
        }
    }

    pub fn hint(&self) -> &'static str {
        match self {
            LocationField::Name => "The name of this location.",
            LocationField::Trigger => "What counts as reaching this location.",
            LocationField::Position => "Latitude and longitude, e.g. (-27.4975, 153.0137).",
            LocationField::ScorePoints => "Points participants earn by reaching this location.",
            LocationField::Clue => "The clue that leads to the next location.",
            LocationField::Content => "Shown when the participant arrives. Enter adds a line.",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LocationForm {
    pub mode: FormMode<LocationId>,
    /// Owning project: from the route when creating, from the record when editing.
    pub project_id: Option<ProjectId>,
    pub name: TextInput,
    pub trigger: LocationTrigger,
    pub position: TextInput,
    pub score: TextInput,
    pub score_points: u32,
    pub clue: TextInput,
    pub content: TextInput,
    pub focused: LocationField,
    pub loaded: bool,
    pub validation_error: Option<String>,
    dirty: bool,
}

impl LocationForm {
    pub fn create(project_id: ProjectId) -> Self {
        Self {
            mode: FormMode::Create,
            project_id: Some(project_id),
            name: TextInput::new(),
            trigger: LocationTrigger::default(),
            position: TextInput::new(),
            score: TextInput::from_str("0"),
            score_points: 0,
            clue: TextInput::new(),
            content: TextInput::new(),
            focused: LocationField::Name,
            loaded: true,
            validation_error: None,
            dirty: false,
        }
    }

    pub fn edit(id: LocationId) -> Self {
        Self {
            mode: FormMode::Edit(id),
            project_id: None,
            loaded: false,
            ..Self::create(ProjectId::new(0))
        }
    }

    /// Populate the fields from a fetched record. Stored HTML goes into the
    /// editor as-is; it is only sanitized when rendered for participants.
    pub fn load(&mut self, location: &Location) {
        self.project_id = Some(location.project_id);
        self.name = TextInput::from_str(&location.location_name);
        self.trigger = location.location_trigger;
        self.position = TextInput::from_str(&location.location_position);
        self.score_points = location.score_points;
        self.score = TextInput::from_str(&location.score_points.to_string());
        self.clue = TextInput::from_str(location.clue.as_deref().unwrap_or_default());
        self.content = TextInput::from_str(location.location_content.as_deref().unwrap_or_default());
        self.loaded = true;
        self.dirty = false;
        self.validation_error = None;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn heading(&self) -> &'static str {
        match self.mode {
            FormMode::Create => "Add Location",
            FormMode::Edit(_) => "Edit Location",
        }
    }

    pub fn parent_route(&self) -> Route {
        self.project_id
            .map(Route::Locations)
            .unwrap_or(Route::Projects)
    }

    pub fn focused_input(&mut self) -> Option<&mut TextInput> {
        match self.focused {
            LocationField::Name => Some(&mut self.name),
            LocationField::Position => Some(&mut self.position),
            LocationField::ScorePoints => Some(&mut self.score),
            LocationField::Clue => Some(&mut self.clue),
            LocationField::Content => Some(&mut self.content),
            LocationField::Trigger => None,
        }
    }

    pub fn focus_next(&mut self) {
        self.focused = cycle(self.focused, true);
    }

    pub fn focus_previous(&mut self) {
        self.focused = cycle(self.focused, false);
    }

    pub fn input_char(&mut self, c: char) {
        if !self.loaded {
            return;
        }
        match self.focused {
            LocationField::ScorePoints => self.input_score_digit(c),
            LocationField::Trigger => {
                if c == ' ' {
                    self.change_trigger(true);
                }
            }
            _ => {
                if let Some(input) = self.focused_input() {
                    input.insert(c);
                    self.dirty = true;
                }
            }
        }
    }

    /// Enter inside the content editor starts a new line.
    pub fn newline(&mut self) -> bool {
        if self.loaded && self.focused == LocationField::Content {
            self.content.insert('\n');
            self.dirty = true;
            return true;
        }
        false
    }

    pub fn backspace(&mut self) {
        if !self.loaded {
            return;
        }
        if self.focused == LocationField::ScorePoints {
            let previous = self.score.value.clone();
            if self.score.backspace() {
                self.coerce_score(&previous, self.score.value.clone());
            }
            return;
        }
        if let Some(input) = self.focused_input() {
            if input.backspace() {
                self.dirty = true;
            }
        }
    }

    pub fn horizontal(&mut self, forward: bool) {
        if !self.loaded {
            return;
        }
        match self.focused_input() {
            Some(input) if forward => input.move_right(),
            Some(input) => input.move_left(),
            None => self.change_trigger(forward),
        }
    }

    fn change_trigger(&mut self, forward: bool) {
        self.trigger = cycle(self.trigger, forward);
        self.dirty = true;
    }

    /// Digits only; the text is re-rendered from the parsed number on every
    /// keystroke, so an empty field reads as 0.
    fn input_score_digit(&mut self, c: char) {
        if !c.is_ascii_digit() {
            return;
        }
        let mut candidate = self.score.clone();
        candidate.insert(c);
        if candidate.value.parse::<u32>().is_ok() {
            let previous = self.score.value.clone();
            self.coerce_score(&previous, candidate.value);
        }
    }

    /// Only a change in the number or its rendering counts as an edit.
    fn coerce_score(&mut self, previous: &str, raw: String) {
        let points = raw.parse::<u32>().unwrap_or(0);
        let rendered = points.to_string();
        if points != self.score_points || rendered != previous {
            self.dirty = true;
        }
        self.score_points = points;
        self.score = TextInput::from_str(&rendered);
    }

    pub fn validate(&self) -> Result<(), String> {
        require(&self.name, "Location Name")?;
        require(&self.position, "Location Position")?;
        if !Position::parse(self.position.value.trim()).is_finite() {
            return Err("Location Position must look like (lat, long).".to_string());
        }
        if self.project_id.is_none() {
            return Err("Location is not attached to a project.".to_string());
        }
        Ok(())
    }

    pub fn to_payload(&self, username: &str) -> Option<LocationPayload> {
        Some(LocationPayload {
            project_id: self.project_id?,
            location_name: self.name.value.trim().to_string(),
            location_trigger: self.trigger,
            location_position: self.position.value.trim().to_string(),
            score_points: self.score_points,
            clue: self.clue.value.trim().to_string(),
            location_content: self.content.value.clone(),
            username: username.to_string(),
        })
    }
}
