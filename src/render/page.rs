use askama::Template;

use crate::constants::{PAGE_SUBTITLE, PAGE_TITLE};
use crate::locations::Location;
use crate::projection::project;
use crate::view_state::{Mode, ViewState};

pub struct MarkerView {
    pub id: &'static str,
    pub name: &'static str,
    pub country: &'static str,
    pub timezone: &'static str,
    pub left: f64,
    pub top: f64,
    pub hovered: bool,
}

pub struct CardView {
    pub id: &'static str,
    pub name: &'static str,
    pub country: &'static str,
    pub timezone: &'static str,
}

pub struct ModalView {
    pub id: &'static str,
    pub name: &'static str,
    pub country: &'static str,
    pub timezone: &'static str,
    pub stream_url: &'static str,
    pub is_playing: bool,
}

/// Everything one session sees: header, map markers, cards and the open modal.
#[derive(Template)]
#[template(path = "view.html")]
pub struct ViewTemplate {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub markers: Vec<MarkerView>,
    pub cards: Vec<CardView>,
    pub modal: Option<ModalView>,
}

pub fn render_view(registry: &[Location], state: &ViewState) -> ViewTemplate {
    let markers = registry
        .iter()
        .map(|location| {
            let offset = project(location.lat, location.lng).to_percent();
            MarkerView {
                id: location.id,
                name: location.name,
                country: location.country,
                timezone: location.timezone,
                left: offset.left,
                top: offset.top,
                hovered: state.hovered == Some(location.id),
            }
        })
        .collect();

    let cards = registry
        .iter()
        .map(|location| CardView {
            id: location.id,
            name: location.name,
            country: location.country,
            timezone: location.timezone,
        })
        .collect();

    let modal = match state.mode() {
        Mode::Idle => None,
        Mode::Viewing {
            location,
            is_playing,
        } => Some(ModalView {
            id: location.id,
            name: location.name,
            country: location.country,
            timezone: location.timezone,
            stream_url: location.stream_url,
            is_playing,
        }),
    };

    ViewTemplate {
        title: PAGE_TITLE,
        subtitle: PAGE_SUBTITLE,
        markers,
        cards,
        modal,
    }
}
