use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use super::{null_as_default, LocationId, Position, ProjectId};

/// Condition under which a location counts as reached.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumIter)]
pub enum LocationTrigger {
    #[default]
    #[serde(rename = "Location Entry")]
    #[strum(serialize = "Location Entry")]
    LocationEntry,
    #[serde(rename = "QR Code Scan")]
    #[strum(serialize = "QR Code Scan")]
    QrScan,
    #[serde(rename = "Both Location Entry and QR Code Scan")]
    #[strum(serialize = "Both Location Entry and QR Code Scan")]
    Both,
}

/// A geolocated waypoint belonging to one project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: LocationId,
    pub project_id: ProjectId,
    pub location_name: String,
    pub location_trigger: LocationTrigger,
    /// Stored as `"(lat, long)"`, see [`Position::parse`].
    #[serde(default, deserialize_with = "null_as_default")]
    pub location_position: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub score_points: u32,
    #[serde(default)]
    pub clue: Option<String>,
    /// HTML fragment from the content editor. Untrusted until sanitized.
    #[serde(default)]
    pub location_content: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
}

impl Location {
    pub fn position(&self) -> Position {
        Position::parse(&self.location_position)
    }
}

/// Full-record body for creating or updating a location.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationPayload {
    pub project_id: ProjectId,
    pub location_name: String,
    pub location_trigger: LocationTrigger,
    pub location_position: String,
    pub score_points: u32,
    pub clue: String,
    pub location_content: String,
    pub username: String,
}

/// Sum of every location's score, saturating instead of overflowing.
pub fn total_score(locations: &[Location]) -> u32 {
    locations
        .iter()
        .fold(0u32, |sum, location| sum.saturating_add(location.score_points))
}
