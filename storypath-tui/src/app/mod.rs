mod forms;
mod lists;
mod navigation;
mod preview;
mod state;

pub use forms::{FormMode, LocationField, LocationForm, ProjectField, ProjectForm, NO_CHANGES};
pub use lists::{LocationListState, ProjectListState};
pub use navigation::Route;
pub use preview::{PreviewState, PreviewView};
pub use state::{DeleteContext, DeleteTarget, TextInput};

pub struct App {
    pub running: bool,
    pub route: Route,
    /// Owner written into every create/update payload.
    pub username: String,
    pub status_message: Option<String>,
    /// Blocking message; any key dismisses it.
    pub notice: Option<String>,

    // Loading indicator
    pub is_loading: bool,
    pub throbber_state: throbber_widgets_tui::ThrobberState,

    // Per-route state, rebuilt whenever the route is opened
    pub project_list: ProjectListState,
    pub location_list: Option<LocationListState>,
    pub project_form: Option<ProjectForm>,
    pub location_form: Option<LocationForm>,
    pub preview: Option<PreviewState>,

    // Delete confirmation
    pub delete_context: Option<DeleteContext>,
}

impl App {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            running: true,
            route: Route::Home,
            username: username.into(),
            status_message: None,
            notice: None,
            is_loading: false,
            throbber_state: throbber_widgets_tui::ThrobberState::default(),
            project_list: ProjectListState::default(),
            location_list: None,
            project_form: None,
            location_form: None,
            preview: None,
            delete_context: None,
        }
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Switch screens and reset the state the new route owns.
    pub fn navigate_to(&mut self, route: Route) {
        tracing::debug!(from = %self.route, to = %route, "navigate");
        self.route = route;
        self.delete_context = None;
        self.project_form = None;
        self.location_form = None;
        self.location_list = None;
        self.preview = None;

        match route {
            Route::Home => {}
            Route::Projects => {
                self.project_list.loaded = false;
            }
            Route::ProjectAdd => self.project_form = Some(ProjectForm::create()),
            Route::ProjectEdit(id) => self.project_form = Some(ProjectForm::edit(id)),
            Route::Locations(project_id) => {
                self.location_list = Some(LocationListState::new(project_id));
            }
            Route::LocationAdd(project_id) => {
                self.location_form = Some(LocationForm::create(project_id));
            }
            Route::LocationEdit(id) => self.location_form = Some(LocationForm::edit(id)),
            Route::Preview(project_id) => {
                self.preview = Some(PreviewState::Loading(project_id));
            }
        }
    }

    pub fn set_status(&mut self, message: String) {
        self.status_message = Some(message);
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    pub fn show_notice(&mut self, message: impl Into<String>) {
        self.notice = Some(message.into());
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// Ask for confirmation before deleting the highlighted project.
    pub fn request_project_delete(&mut self) {
        if let Some(project) = self.project_list.selected_project() {
            self.delete_context = Some(DeleteContext {
                target: DeleteTarget::Project(project.id),
                display_label: project.title.clone(),
            });
        }
    }

    /// Ask for confirmation before deleting the highlighted location.
    pub fn request_location_delete(&mut self) {
        let selected = self
            .location_list
            .as_ref()
            .and_then(|list| list.selected_location());
        if let Some(location) = selected {
            self.delete_context = Some(DeleteContext {
                target: DeleteTarget::Location(location.id),
                display_label: location.location_name.clone(),
            });
        }
    }

    pub fn cancel_delete(&mut self) {
        self.delete_context = None;
    }
}
