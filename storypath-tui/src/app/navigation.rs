use std::fmt;
use std::str::FromStr;

use storypath::{LocationId, ProjectId};
use thiserror::Error;

/// Every screen of the app, addressed by the same paths the web client used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Projects,
    ProjectAdd,
    ProjectEdit(ProjectId),
    /// Location list of a project.
    Locations(ProjectId),
    /// New location for a project.
    LocationAdd(ProjectId),
    LocationEdit(LocationId),
    Preview(ProjectId),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown route: {0}")]
pub struct UnknownRoute(pub String);

impl FromStr for Route {
    type Err = UnknownRoute;

    fn from_str(path: &str) -> Result<Self, Self::Err> {
        let unknown = || UnknownRoute(path.to_string());
        let segments: Vec<&str> = path
            .trim()
            .trim_matches('/')
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();

        let route = match segments.as_slice() {
            [] => Route::Home,
            ["projects"] => Route::Projects,
            ["project", "add"] => Route::ProjectAdd,
            ["project", "edit", id] => Route::ProjectEdit(id.parse().map_err(|_| unknown())?),
            ["locations", id] => Route::Locations(id.parse().map_err(|_| unknown())?),
            ["location", "add", id] => Route::LocationAdd(id.parse().map_err(|_| unknown())?),
            ["location", "edit", id] => Route::LocationEdit(id.parse().map_err(|_| unknown())?),
            ["preview", id] => Route::Preview(id.parse().map_err(|_| unknown())?),
            _ => return Err(unknown()),
        };
        Ok(route)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Home => write!(f, "/"),
            Route::Projects => write!(f, "/projects"),
            Route::ProjectAdd => write!(f, "/project/add"),
            Route::ProjectEdit(id) => write!(f, "/project/edit/{}", id),
            Route::Locations(id) => write!(f, "/locations/{}", id),
            Route::LocationAdd(id) => write!(f, "/location/add/{}", id),
            Route::LocationEdit(id) => write!(f, "/location/edit/{}", id),
            Route::Preview(id) => write!(f, "/preview/{}", id),
        }
    }
}

impl Route {
    /// Parse a path, falling back to the home screen for anything unknown.
    pub fn parse_or_home(path: &str) -> Self {
        path.parse().unwrap_or_else(|e: UnknownRoute| {
            tracing::warn!("{}, opening home instead", e);
            Route::Home
        })
    }

    /// Whether opening the route starts a backend fetch.
    pub fn needs_fetch(&self) -> bool {
        !matches!(self, Route::Home | Route::ProjectAdd | Route::LocationAdd(_))
    }

    /// Header navigation label, if the route is one of the top-level links.
    pub fn nav_label(&self) -> &'static str {
        match self {
            Route::Home => "HOME",
            Route::Projects | Route::ProjectAdd | Route::ProjectEdit(_) => "PROJECTS",
            Route::Locations(_) | Route::LocationAdd(_) | Route::LocationEdit(_) => "LOCATIONS",
            Route::Preview(_) => "PREVIEW",
        }
    }
}
