//! Validation of map options typed by the user.
//!
//! Out-of-range or unknown values fall back to a default with a notice
//! instead of failing.

use super::menu::parse_integer;
use crate::error_handling::InputError;
use crate::output::{MarkerColor, ZoomLevel};

pub const ZOOM_OUT_OF_RANGE_NOTICE: &str = "Zoom level out of range. Using default (10).";
pub const INVALID_COLOR_NOTICE: &str = "Invalid color. Using default (blue).";

/// Parses the zoom entry. Blank input is `Ok(None)` (use the default);
/// anything else must be an integer.
pub fn parse_zoom(input: &str) -> Result<Option<i64>, InputError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    parse_integer(trimmed).map(Some)
}

/// Resolves a parsed zoom entry, defaulting out-of-range values.
///
/// Returns the zoom level and, if the entry was replaced, the notice to show.
pub fn resolve_zoom(requested: Option<i64>) -> (ZoomLevel, Option<&'static str>) {
    match requested {
        None => (ZoomLevel::default(), None),
        Some(level) => match ZoomLevel::new(level) {
            Some(zoom) => (zoom, None),
            None => (ZoomLevel::default(), Some(ZOOM_OUT_OF_RANGE_NOTICE)),
        },
    }
}

/// Resolves a color entry, case-insensitively. Blank input selects the
/// default silently; an unknown color selects it with a notice.
pub fn resolve_color(input: &str) -> (MarkerColor, Option<&'static str>) {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return (MarkerColor::default(), None);
    }
    match trimmed.parse::<MarkerColor>() {
        Ok(color) => (color, None),
        Err(_) => (MarkerColor::default(), Some(INVALID_COLOR_NOTICE)),
    }
}
