use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

use crate::projection::{check_coordinates, CoordinateError};

/// One office site shown on the map.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub id: &'static str,
    pub name: &'static str,
    pub country: &'static str,
    pub lat: f64,
    pub lng: f64,
    pub stream_url: &'static str,
    pub timezone: &'static str,
}

pub static LOCATIONS: [Location; 5] = [
    Location {
        id: "canada",
        name: "Toronto",
        country: "Canada",
        lat: 43.6532,
        lng: -79.3832,
        stream_url: "https://your-video-url.com/canada-stream.mp4",
        timezone: "EST",
    },
    Location {
        id: "bangkok",
        name: "Bangkok",
        country: "Thailand",
        lat: 13.7563,
        lng: 100.5018,
        stream_url: "https://your-video-url.com/bangkok-stream.mp4",
        timezone: "ICT",
    },
    Location {
        id: "malaysia",
        name: "Kuala Lumpur",
        country: "Malaysia",
        lat: 3.139,
        lng: 101.6869,
        stream_url: "https://your-video-url.com/malaysia-stream.mp4",
        timezone: "MYT",
    },
    Location {
        id: "dubai",
        name: "Dubai",
        country: "UAE",
        lat: 25.2048,
        lng: 55.2708,
        stream_url: "https://your-video-url.com/dubai-stream.mp4",
        timezone: "GST",
    },
    Location {
        id: "vietnam",
        name: "Ho Chi Minh City",
        country: "Vietnam",
        lat: 10.8231,
        lng: 106.6297,
        stream_url: "https://your-video-url.com/vietnam-stream.mp4",
        timezone: "ICT",
    },
];

pub fn all() -> &'static [Location] {
    &LOCATIONS
}

pub fn find(id: &str) -> Option<&'static Location> {
    LOCATIONS.iter().find(|location| location.id == id)
}

/// Problems found while checking a registry at startup
#[derive(Debug, Clone, PartialEq)]
pub enum RegistryIssue {
    DuplicateId(&'static str),
    BadCoordinates {
        id: &'static str,
        error: CoordinateError,
    },
    BadStreamUrl {
        id: &'static str,
        reason: String,
    },
}

impl fmt::Display for RegistryIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryIssue::DuplicateId(id) => write!(f, "duplicate location id '{}'", id),
            RegistryIssue::BadCoordinates { id, error } => write!(f, "location '{}': {}", id, error),
            RegistryIssue::BadStreamUrl { id, reason } => {
                write!(f, "location '{}' has an unusable stream URL: {}", id, reason)
            }
        }
    }
}

/// Reports duplicate ids, out-of-domain coordinates and stream URLs that
/// are not absolute http(s) URLs. Nothing here is fatal; the page still renders.
pub fn check_registry(registry: &[Location]) -> Vec<RegistryIssue> {
    let mut issues = Vec::new();
    let mut seen = HashSet::new();

    for location in registry {
        if !seen.insert(location.id) {
            issues.push(RegistryIssue::DuplicateId(location.id));
        }

        if let Err(error) = check_coordinates(location.lat, location.lng) {
            issues.push(RegistryIssue::BadCoordinates {
                id: location.id,
                error,
            });
        }

        if let Err(reason) = check_stream_url(location.stream_url) {
            issues.push(RegistryIssue::BadStreamUrl {
                id: location.id,
                reason,
            });
        }
    }

    issues
}

fn check_stream_url(raw: &str) -> Result<(), String> {
    let parsed = url::Url::parse(raw).map_err(|e| e.to_string())?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(format!("unsupported scheme '{}'", other)),
    }
}
