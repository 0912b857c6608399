use anyhow::{Context, Result};
use storypath::{
    Location, LocationId, LocationPayload, Project, ProjectId, ProjectPayload, StoryPathClient,
    StoryPathError,
};

use crate::api::dev_backend::DevBackend;
use crate::session_store::Session;

const UNAUTH_INVALID_SESSION: &str =
    "Session expired or invalid. Run `storypath-tui login` to authenticate.";

#[derive(Debug, Clone)]
pub struct ApiClient {
    client: StoryPathClient,
    dev_backend: Option<DevBackend>,
}

impl ApiClient {
    pub fn new(base_url: &str, session: &Session) -> Result<Self> {
        let client = StoryPathClient::new(base_url, session.token.clone())
            .with_context(|| format!("Invalid API URL: {}", base_url))?;

        Ok(Self {
            client,
            dev_backend: None,
        })
    }

    pub fn dev() -> Result<Self> {
        let client =
            StoryPathClient::new("http://localhost", "").context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            dev_backend: Some(DevBackend::new()),
        })
    }

    #[cfg(test)]
    pub fn dev_backend(&self) -> Option<&DevBackend> {
        self.dev_backend.as_ref()
    }

    pub async fn list_projects(&self) -> Result<Vec<Project>> {
        if let Some(dev) = &self.dev_backend {
            return Ok(dev.projects());
        }

        self.client
            .list_projects()
            .await
            .map_err(|e| describe(e, "GET /project"))
    }

    pub async fn get_project(&self, id: ProjectId) -> Result<Project> {
        if let Some(dev) = &self.dev_backend {
            return dev.project(id).ok_or_else(|| {
                describe(
                    StoryPathError::NotFound {
                        entity: "project",
                        id: id.as_i64(),
                    },
                    "GET /project",
                )
            });
        }

        self.client
            .get_project(id)
            .await
            .map_err(|e| describe(e, "GET /project"))
    }

    pub async fn create_project(&self, payload: &ProjectPayload) -> Result<Project> {
        if let Some(dev) = &self.dev_backend {
            return Ok(dev.create_project(payload));
        }

        self.client
            .create_project(payload)
            .await
            .map_err(|e| describe(e, "POST /project"))
    }

    pub async fn update_project(&self, id: ProjectId, payload: &ProjectPayload) -> Result<Project> {
        if let Some(dev) = &self.dev_backend {
            return dev.update_project(id, payload).ok_or_else(|| {
                describe(
                    StoryPathError::NotFound {
                        entity: "project",
                        id: id.as_i64(),
                    },
                    "PATCH /project",
                )
            });
        }

        self.client
            .update_project(id, payload)
            .await
            .map_err(|e| describe(e, "PATCH /project"))
    }

    pub async fn delete_project(&self, id: ProjectId) -> Result<()> {
        if let Some(dev) = &self.dev_backend {
            dev.delete_project(id);
            return Ok(());
        }

        self.client
            .delete_project(id)
            .await
            .map_err(|e| describe(e, "DELETE /project"))
    }

    pub async fn list_locations_by_project(&self, project_id: ProjectId) -> Result<Vec<Location>> {
        if let Some(dev) = &self.dev_backend {
            return Ok(dev.locations_by_project(project_id));
        }

        self.client
            .list_locations_by_project(project_id)
            .await
            .map_err(|e| describe(e, "GET /location"))
    }

    pub async fn get_location(&self, id: LocationId) -> Result<Location> {
        if let Some(dev) = &self.dev_backend {
            return dev.location(id).ok_or_else(|| {
                describe(
                    StoryPathError::NotFound {
                        entity: "location",
                        id: id.as_i64(),
                    },
                    "GET /location",
                )
            });
        }

        self.client
            .get_location(id)
            .await
            .map_err(|e| describe(e, "GET /location"))
    }

    pub async fn create_location(&self, payload: &LocationPayload) -> Result<Location> {
        if let Some(dev) = &self.dev_backend {
            return Ok(dev.create_location(payload));
        }

        self.client
            .create_location(payload)
            .await
            .map_err(|e| describe(e, "POST /location"))
    }

    pub async fn update_location(
        &self,
        id: LocationId,
        payload: &LocationPayload,
    ) -> Result<Location> {
        if let Some(dev) = &self.dev_backend {
            return dev.update_location(id, payload).ok_or_else(|| {
                describe(
                    StoryPathError::NotFound {
                        entity: "location",
                        id: id.as_i64(),
                    },
                    "PATCH /location",
                )
            });
        }

        self.client
            .update_location(id, payload)
            .await
            .map_err(|e| describe(e, "PATCH /location"))
    }

    pub async fn delete_location(&self, id: LocationId) -> Result<()> {
        if let Some(dev) = &self.dev_backend {
            dev.delete_location(id);
            return Ok(());
        }

        self.client
            .delete_location(id)
            .await
            .map_err(|e| describe(e, "DELETE /location"))
    }
}

fn describe(err: StoryPathError, call_name: &str) -> anyhow::Error {
    match err {
        StoryPathError::Unauthorized => anyhow::anyhow!(UNAUTH_INVALID_SESSION),
        other => anyhow::Error::new(other).context(format!("{} failed", call_name)),
    }
}

/// True when the root cause is a missing entity, so callers can show a
/// "not found" screen instead of a generic error.
pub fn is_not_found(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        matches!(
            cause.downcast_ref::<StoryPathError>(),
            Some(StoryPathError::NotFound { .. })
        )
    })
}
