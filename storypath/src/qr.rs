use qrcode::render::unicode::Dense1x2;
use qrcode::QrCode;

use crate::domain::{Location, LocationId, ProjectId};
use crate::StoryPathError;

/// A rendered QR code together with the text it encodes.
#[derive(Debug, Clone, PartialEq)]
pub struct QrLabel {
    pub payload: String,
    pub rendered: String,
}

impl QrLabel {
    pub fn new(payload: impl Into<String>) -> Result<Self, StoryPathError> {
        let payload = payload.into();
        let rendered = render(&payload)?;
        Ok(Self { payload, rendered })
    }
}

/// Payload printed for a location in the authoring list: its name.
pub fn location_payload(location: &Location) -> String {
    location.location_name.clone()
}

/// Payload a participant scans during a preview: `"{project_id},{location_id}"`.
pub fn preview_payload(project_id: ProjectId, location_id: LocationId) -> String {
    format!("{},{}", project_id, location_id)
}

/// Render `payload` as half-block characters, light modules drawn as blocks so
/// the code reads correctly on a dark terminal.
pub fn render(payload: &str) -> Result<String, StoryPathError> {
    let code =
        QrCode::new(payload.as_bytes()).map_err(|e| StoryPathError::QrError(e.to_string()))?;
    Ok(code
        .render::<Dense1x2>()
        .dark_color(Dense1x2::Light)
        .light_color(Dense1x2::Dark)
        .quiet_zone(true)
        .build())
}

/// One code per location, in list order. An empty list is an error rather
/// than an empty sheet.
pub fn labels_for_locations(locations: &[Location]) -> Result<Vec<QrLabel>, StoryPathError> {
    if locations.is_empty() {
        return Err(StoryPathError::NothingToPrint);
    }
    locations
        .iter()
        .map(|location| QrLabel::new(location_payload(location)))
        .collect()
}
