//! Conversion pixel attachments on a line item

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::PixelId;

/// Activation state of a pixel attachment
///
/// Unknown states from the remote side are kept verbatim so a read-modify-
/// write cycle never rewrites them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PixelState {
    Active,
    Inactive,
    Other(String),
}

impl From<String> for PixelState {
    fn from(value: String) -> Self {
        match value.as_str() {
            "active" => Self::Active,
            "inactive" => Self::Inactive,
            _ => Self::Other(value),
        }
    }
}

impl From<PixelState> for String {
    fn from(state: PixelState) -> Self {
        match state {
            PixelState::Active => "active".to_string(),
            PixelState::Inactive => "inactive".to_string(),
            PixelState::Other(s) => s,
        }
    }
}

/// A pixel attached to a line item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pixel {
    pub id: PixelId,
    /// Absent when the remote entry carries no state (or a null one).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<PixelState>,
    /// Remaining remote fields, echoed back untouched on update.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Pixel {
    pub fn active(id: PixelId) -> Self {
        Self { id, state: Some(PixelState::Active), extra: Map::new() }
    }
}

/// What [`activate_pixel`] did to the list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelChange {
    /// An existing entry was set to active (it may already have been).
    Activated,
    /// No entry had the id; a new active entry was appended.
    Appended,
}

/// Upsert `pixel_id` as active.
///
/// Existing entries keep their position and extra fields; every other entry
/// is left as-is.
pub fn activate_pixel(pixels: &mut Vec<Pixel>, pixel_id: PixelId) -> PixelChange {
    match pixels.iter_mut().find(|p| p.id == pixel_id) {
        Some(existing) => {
            existing.state = Some(PixelState::Active);
            PixelChange::Activated
        }
        None => {
            pixels.push(Pixel::active(pixel_id));
            PixelChange::Appended
        }
    }
}
