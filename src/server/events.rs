use serde::Serialize;
use uuid::Uuid;

use crate::locations::Location;
use crate::projection::PercentOffset;
use crate::view_state::ViewSnapshot;

// API response payloads
#[derive(Debug, Clone, Serialize)]
pub struct SessionCreated {
    pub session_id: Uuid,
    pub state: ViewSnapshot,
}

#[derive(Debug, Clone, Serialize)]
pub struct EventOutcome {
    pub state: ViewSnapshot,
    pub html: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LocationEntry {
    #[serde(flatten)]
    pub location: Location,
    pub position: PercentOffset,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub status: &'static str,
    pub message: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: "error",
            message: message.into(),
        }
    }
}
