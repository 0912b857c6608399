use std::sync::{Arc, Mutex};

use storypath::{
    HomescreenDisplay, Location, LocationId, LocationPayload, LocationTrigger, ParticipantScoring,
    Project, ProjectId, ProjectPayload,
};

/// In-memory stand-in for the REST backend, used by `storypath-tui dev`.
#[derive(Debug, Clone)]
pub struct DevBackend {
    store: Arc<Mutex<DevStore>>,
}

#[derive(Debug)]
struct DevStore {
    projects: Vec<Project>,
    locations: Vec<Location>,
    next_id: i64,
    #[cfg(test)]
    delete_calls: Vec<String>,
}

impl DevStore {
    fn next_id(&mut self) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

impl DevBackend {
    pub fn new() -> Self {
        let (projects, locations) = seed_dev_data();
        Self {
            store: Arc::new(Mutex::new(DevStore {
                projects,
                locations,
                next_id: 100,
                #[cfg(test)]
                delete_calls: Vec::new(),
            })),
        }
    }

    fn with_store<T>(&self, f: impl FnOnce(&mut DevStore) -> T) -> T {
        let mut store = self.store.lock().expect("dev store lock poisoned");
        f(&mut store)
    }

    pub fn projects(&self) -> Vec<Project> {
        self.with_store(|store| store.projects.clone())
    }

    pub fn project(&self, id: ProjectId) -> Option<Project> {
        self.with_store(|store| store.projects.iter().find(|p| p.id == id).cloned())
    }

    pub fn create_project(&self, payload: &ProjectPayload) -> Project {
        self.with_store(|store| {
            let project = project_from_payload(ProjectId::new(store.next_id()), payload);
            store.projects.push(project.clone());
            project
        })
    }

    pub fn update_project(&self, id: ProjectId, payload: &ProjectPayload) -> Option<Project> {
        self.with_store(|store| {
            let slot = store.projects.iter_mut().find(|p| p.id == id)?;
            *slot = project_from_payload(id, payload);
            Some(slot.clone())
        })
    }

    pub fn delete_project(&self, id: ProjectId) {
        self.with_store(|store| {
            #[cfg(test)]
            store.delete_calls.push(format!("project:{id}"));
            store.projects.retain(|p| p.id != id);
            store.locations.retain(|l| l.project_id != id);
        })
    }

    pub fn locations_by_project(&self, project_id: ProjectId) -> Vec<Location> {
        self.with_store(|store| {
            store
                .locations
                .iter()
                .filter(|l| l.project_id == project_id)
                .cloned()
                .collect()
        })
    }

    pub fn location(&self, id: LocationId) -> Option<Location> {
        self.with_store(|store| store.locations.iter().find(|l| l.id == id).cloned())
    }

    pub fn create_location(&self, payload: &LocationPayload) -> Location {
        self.with_store(|store| {
            let location = location_from_payload(LocationId::new(store.next_id()), payload);
            store.locations.push(location.clone());
            location
        })
    }

    pub fn update_location(&self, id: LocationId, payload: &LocationPayload) -> Option<Location> {
        self.with_store(|store| {
            let slot = store.locations.iter_mut().find(|l| l.id == id)?;
            *slot = location_from_payload(id, payload);
            Some(slot.clone())
        })
    }

    pub fn delete_location(&self, id: LocationId) {
        self.with_store(|store| {
            #[cfg(test)]
            store.delete_calls.push(format!("location:{id}"));
            store.locations.retain(|l| l.id != id);
        })
    }

    /// Every delete issued so far, as `"{resource}:{id}"`.
    #[cfg(test)]
    pub fn delete_calls(&self) -> Vec<String> {
        self.with_store(|store| store.delete_calls.clone())
    }
}

fn project_from_payload(id: ProjectId, payload: &ProjectPayload) -> Project {
    Project {
        id,
        title: payload.title.clone(),
        description: payload.description.clone(),
        instructions: payload.instructions.clone(),
        initial_clue: payload.initial_clue.clone(),
        homescreen_display: payload.homescreen_display,
        participant_scoring: payload.participant_scoring,
        is_published: payload.is_published,
        username: Some(payload.username.clone()),
    }
}

fn location_from_payload(id: LocationId, payload: &LocationPayload) -> Location {
    Location {
        id,
        project_id: payload.project_id,
        location_name: payload.location_name.clone(),
        location_trigger: payload.location_trigger,
        location_position: payload.location_position.clone(),
        score_points: payload.score_points,
        clue: Some(payload.clue.clone()).filter(|c| !c.is_empty()),
        location_content: Some(payload.location_content.clone()).filter(|c| !c.is_empty()),
        username: Some(payload.username.clone()),
    }
}

fn seed_dev_data() -> (Vec<Project>, Vec<Location>) {
    let projects = vec![
        Project {
            id: ProjectId::new(1),
            title: "Campus Tour".to_string(),
            description: "Orientation week walk for new students".to_string(),
            instructions: "Follow the clues across campus and check in at each stop.".to_string(),
            initial_clue: "Start where the jacarandas bloom.".to_string(),
            homescreen_display: HomescreenDisplay::InitialClue,
            participant_scoring: ParticipantScoring::LocationsEntered,
            is_published: true,
            username: Some("dev".to_string()),
        },
        Project {
            id: ProjectId::new(2),
            title: "Museum Treasure Hunt".to_string(),
            description: "Draft for the school holidays".to_string(),
            instructions: "Scan the code next to each exhibit.".to_string(),
            initial_clue: String::new(),
            homescreen_display: HomescreenDisplay::AllLocations,
            participant_scoring: ParticipantScoring::QrScans,
            is_published: false,
            username: Some("dev".to_string()),
        },
    ];

    let location = |id: i64, name: &str, position: &str, points: u32, clue: &str, html: &str| {
        Location {
            id: LocationId::new(id),
            project_id: ProjectId::new(1),
            location_name: name.to_string(),
            location_trigger: LocationTrigger::Both,
            location_position: position.to_string(),
            score_points: points,
            clue: Some(clue.to_string()).filter(|c| !c.is_empty()),
            location_content: Some(html.to_string()).filter(|c| !c.is_empty()),
            username: Some("dev".to_string()),
        }
    };

    let locations = vec![
        location(
            10,
            "Great Court",
            "(-27.4975, 153.0137)",
            10,
            "Head to the library next.",
            "<h2>Great Court</h2><p>The heart of the <strong>sandstone</strong> campus.</p>",
        ),
        location(
            11,
            "Central Library",
            "(-27.4965, 153.0143)",
            5,
            "Find the lake.",
            "<p>Ask at the desk for the <em>orientation stamp</em>.</p>",
        ),
        location(
            12,
            "UQ Lakes",
            "(-27.4999, 153.0165)",
            15,
            "",
            "<p>Spot the turtles!</p><script>alert('not sanitized')</script>",
        ),
    ];

    (projects, locations)
}
