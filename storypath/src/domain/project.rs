use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use super::{null_as_default, ProjectId};

/// What a participant sees on the project's landing screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumIter)]
pub enum HomescreenDisplay {
    #[default]
    #[serde(rename = "Display initial clue")]
    #[strum(serialize = "Display initial clue")]
    InitialClue,
    #[serde(rename = "Display all locations")]
    #[strum(serialize = "Display all locations")]
    AllLocations,
}

/// How participants are scored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumIter)]
pub enum ParticipantScoring {
    #[default]
    #[serde(rename = "Not Scored")]
    #[strum(serialize = "Not Scored")]
    NotScored,
    #[serde(rename = "Number of Scanned QR Codes")]
    #[strum(serialize = "Number of Scanned QR Codes")]
    QrScans,
    #[serde(rename = "Number of Locations Entered")]
    #[strum(serialize = "Number of Locations Entered")]
    LocationsEntered,
}

/// A tour definition as stored by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub title: String,
    /// Internal note for authors, never shown to participants.
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub instructions: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub initial_clue: String,
    pub homescreen_display: HomescreenDisplay,
    pub participant_scoring: ParticipantScoring,
    #[serde(default)]
    pub is_published: bool,
    #[serde(default)]
    pub username: Option<String>,
}

/// Full-record body for creating or updating a project.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectPayload {
    pub title: String,
    pub description: String,
    pub instructions: String,
    pub initial_clue: String,
    pub homescreen_display: HomescreenDisplay,
    pub is_published: bool,
    pub participant_scoring: ParticipantScoring,
    pub username: String,
}
