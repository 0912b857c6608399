use super::ProjectId;

/// A PostgREST row filter, rendered as a `column=operator.value` query pair.
pub trait StoryPathFilter {
    fn as_query_pair(&self) -> (&'static str, String);
}

pub struct IdFilter {
    id: i64,
}

impl IdFilter {
    pub fn new(id: impl Into<i64>) -> Self {
        Self { id: id.into() }
    }
}

impl StoryPathFilter for IdFilter {
    fn as_query_pair(&self) -> (&'static str, String) {
        ("id", format!("eq.{}", self.id))
    }
}

pub struct ProjectIdFilter {
    project_id: ProjectId,
}

impl ProjectIdFilter {
    pub fn new(project_id: ProjectId) -> Self {
        Self { project_id }
    }
}

impl StoryPathFilter for ProjectIdFilter {
    fn as_query_pair(&self) -> (&'static str, String) {
        ("project_id", format!("eq.{}", self.project_id))
    }
}
