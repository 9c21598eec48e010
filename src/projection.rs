use serde::Serialize;
use thiserror::Error;

use crate::constants::{LAT_MAX, LAT_MIN, LNG_MAX, LNG_MIN, MAP_HEIGHT, MAP_WIDTH};

/// Position on the 800x400 reference canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MapPoint {
    pub x: f64,
    pub y: f64,
}

/// Position as a percentage of the map container, independent of its pixel size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PercentOffset {
    pub left: f64,
    pub top: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum CoordinateError {
    #[error("latitude {0} is outside [-90, 90]")]
    LatitudeOutOfRange(f64),
    #[error("longitude {0} is outside [-180, 180]")]
    LongitudeOutOfRange(f64),
    #[error("coordinates must be finite numbers")]
    NotFinite,
}

/// Equirectangular projection onto the reference canvas. Inputs are not clamped.
pub fn project(lat: f64, lng: f64) -> MapPoint {
    MapPoint {
        x: ((lng + 180.0) / 360.0) * MAP_WIDTH,
        y: ((90.0 - lat) / 180.0) * MAP_HEIGHT,
    }
}

impl MapPoint {
    pub fn to_percent(self) -> PercentOffset {
        PercentOffset {
            left: self.x / MAP_WIDTH * 100.0,
            top: self.y / MAP_HEIGHT * 100.0,
        }
    }
}

pub fn check_coordinates(lat: f64, lng: f64) -> Result<(), CoordinateError> {
    if !lat.is_finite() || !lng.is_finite() {
        return Err(CoordinateError::NotFinite);
    }
    if !(LAT_MIN..=LAT_MAX).contains(&lat) {
        return Err(CoordinateError::LatitudeOutOfRange(lat));
    }
    if !(LNG_MIN..=LNG_MAX).contains(&lng) {
        return Err(CoordinateError::LongitudeOutOfRange(lng));
    }
    Ok(())
}
