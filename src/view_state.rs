use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::locations::{self, Location};

/// Per-session UI state: which location's modal is open, whether its feed is
/// playing, and which marker the pointer is over.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ViewState {
    pub selected: Option<&'static Location>,
    pub is_playing: bool,
    pub hovered: Option<&'static str>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Mode {
    Idle,
    Viewing {
        location: &'static Location,
        is_playing: bool,
    },
}

/// Client-originated events, as posted by the page script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ViewEvent {
    Select { id: String },
    Close,
    TogglePlayback,
    Hover { id: Option<String> },
}

#[derive(Debug, Error, PartialEq)]
pub enum ViewError {
    #[error("unknown location '{0}'")]
    UnknownLocation(String),
}

impl ViewState {
    pub fn mode(&self) -> Mode {
        match self.selected {
            None => Mode::Idle,
            Some(location) => Mode::Viewing {
                location,
                is_playing: self.is_playing,
            },
        }
    }

    /// Opens the modal for `location`. Playback always starts stopped,
    /// even when the same location is selected again.
    pub fn select(self, location: &'static Location) -> Self {
        Self {
            selected: Some(location),
            is_playing: false,
            ..self
        }
    }

    pub fn close(self) -> Self {
        Self {
            selected: None,
            is_playing: false,
            ..self
        }
    }

    pub fn toggle_playback(self) -> Self {
        if self.selected.is_none() {
            debug!("toggle_playback ignored: no location selected");
            return self;
        }
        Self {
            is_playing: !self.is_playing,
            ..self
        }
    }

    pub fn hover(self, location: Option<&'static Location>) -> Self {
        Self {
            hovered: location.map(|l| l.id),
            ..self
        }
    }

    pub fn apply(self, event: &ViewEvent) -> Result<Self, ViewError> {
        let next = match event {
            ViewEvent::Select { id } => self.select(resolve(id)?),
            ViewEvent::Close => self.close(),
            ViewEvent::TogglePlayback => self.toggle_playback(),
            ViewEvent::Hover { id: None } => self.hover(None),
            ViewEvent::Hover { id: Some(id) } => self.hover(Some(resolve(id)?)),
        };
        Ok(next)
    }

    pub fn snapshot(&self) -> ViewSnapshot {
        ViewSnapshot {
            mode: match self.mode() {
                Mode::Idle => "idle",
                Mode::Viewing { .. } => "viewing",
            },
            selected: self.selected.map(|l| l.id),
            is_playing: self.is_playing,
            hovered: self.hovered,
        }
    }
}

fn resolve(id: &str) -> Result<&'static Location, ViewError> {
    locations::find(id).ok_or_else(|| ViewError::UnknownLocation(id.to_string()))
}

/// Wire form of [`ViewState`]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewSnapshot {
    pub mode: &'static str,
    pub selected: Option<&'static str>,
    pub is_playing: bool,
    pub hovered: Option<&'static str>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc(id: &str) -> &'static Location {
        locations::find(id).unwrap()
    }

    #[test]
    fn starts_idle() {
        let state = ViewState::default();
        assert_eq!(state.mode(), Mode::Idle);
        assert!(!state.is_playing);
        assert!(state.hovered.is_none());
    }

    #[test]
    fn playback_never_carries_over_between_selections() {
        let toronto = loc("canada");
        let dubai = loc("dubai");

        let playing = ViewState::default().select(toronto).toggle_playback();
        assert!(playing.is_playing);

        let other = playing.select(dubai);
        assert_eq!(
            other.mode(),
            Mode::Viewing {
                location: dubai,
                is_playing: false
            }
        );

        let same = playing.select(toronto);
        assert_eq!(
            same.mode(),
            Mode::Viewing {
                location: toronto,
                is_playing: false
            }
        );
    }

    #[test]
    fn close_then_reselect_starts_stopped() {
        let bangkok = loc("bangkok");
        let state = ViewState::default().select(bangkok).toggle_playback();
        assert!(state.is_playing);

        let closed = state.close();
        assert_eq!(closed.mode(), Mode::Idle);

        let reopened = closed.select(bangkok);
        assert!(!reopened.is_playing);
    }

    #[test]
    fn toggle_when_idle_is_ignored() {
        let state = ViewState::default().toggle_playback();
        assert_eq!(state, ViewState::default());
    }

    #[test]
    fn toggle_flips_back_and_forth() {
        let state = ViewState::default().select(loc("malaysia"));
        let on = state.toggle_playback();
        let off = on.toggle_playback();
        assert!(on.is_playing);
        assert!(!off.is_playing);
    }

    #[test]
    fn hover_is_independent_of_selection() {
        let state = ViewState::default().hover(Some(loc("vietnam")));
        let selected = state.select(loc("canada"));
        assert_eq!(selected.hovered, Some("vietnam"));

        let closed = selected.close();
        assert_eq!(closed.hovered, Some("vietnam"));

        let cleared = closed.hover(None);
        assert!(cleared.hovered.is_none());
        assert_eq!(cleared.mode(), Mode::Idle);
    }

    #[test]
    fn hover_does_not_touch_playback() {
        let state = ViewState::default()
            .select(loc("dubai"))
            .toggle_playback()
            .hover(Some(loc("bangkok")));
        assert!(state.is_playing);
        assert_eq!(state.selected.map(|l| l.id), Some("dubai"));
    }

    #[test]
    fn apply_resolves_ids_through_registry() {
        let state = ViewState::default()
            .apply(&ViewEvent::Select { id: "dubai".into() })
            .unwrap()
            .apply(&ViewEvent::TogglePlayback)
            .unwrap();
        assert_eq!(state.snapshot().selected, Some("dubai"));
        assert!(state.is_playing);

        let err = state
            .apply(&ViewEvent::Hover {
                id: Some("atlantis".into()),
            })
            .unwrap_err();
        assert_eq!(err, ViewError::UnknownLocation("atlantis".into()));
    }

    #[test]
    fn events_use_tagged_json() {
        let event: ViewEvent =
            serde_json::from_str(r#"{"type":"select","id":"canada"}"#).unwrap();
        assert_eq!(event, ViewEvent::Select { id: "canada".into() });

        let event: ViewEvent = serde_json::from_str(r#"{"type":"toggle_playback"}"#).unwrap();
        assert_eq!(event, ViewEvent::TogglePlayback);

        let event: ViewEvent = serde_json::from_str(r#"{"type":"hover","id":null}"#).unwrap();
        assert_eq!(event, ViewEvent::Hover { id: None });
    }

    #[test]
    fn snapshot_serializes_camel_case() {
        let state = ViewState::default().select(loc("canada")).toggle_playback();
        let json = serde_json::to_value(state.snapshot()).unwrap();
        assert_eq!(json["mode"], "viewing");
        assert_eq!(json["selected"], "canada");
        assert_eq!(json["isPlaying"], true);
        assert!(json["hovered"].is_null());
    }
}
