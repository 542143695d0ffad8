//! Standalone HTML map rendering.
//!
//! Maps are single HTML files that load Leaflet and OpenStreetMap tiles from
//! public CDNs and show one colored marker with a details popup.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use strum_macros::{Display, EnumIter, EnumString};

use crate::config::{DEFAULT_ZOOM, MAX_ZOOM, MIN_ZOOM, NOT_AVAILABLE};
use crate::geo::{Coordinates, GeoRecord};

const LEAFLET_VERSION: &str = "1.9.4";

/// Marker colors offered to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum MarkerColor {
    Red,
    #[default]
    Blue,
    Green,
    Purple,
    Orange,
}

/// A map zoom level, always within `MIN_ZOOM..=MAX_ZOOM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoomLevel(u8);

impl ZoomLevel {
    /// Returns `None` when `level` is outside the supported range.
    pub fn new(level: i64) -> Option<Self> {
        u8::try_from(level)
            .ok()
            .filter(|l| (MIN_ZOOM..=MAX_ZOOM).contains(l))
            .map(ZoomLevel)
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for ZoomLevel {
    fn default() -> Self {
        ZoomLevel(DEFAULT_ZOOM)
    }
}

/// Everything needed to draw one marker.
#[derive(Debug, Clone, PartialEq)]
pub struct MapRequest {
    pub coordinates: Coordinates,
    pub zoom: ZoomLevel,
    pub color: MarkerColor,
    /// Record shown in the marker popup; a bare "Location" label otherwise.
    pub details: Option<GeoRecord>,
}

/// Shows a rendered map to the user.
pub trait MapViewer {
    fn open(&mut self, path: &Path) -> Result<()>;
}

/// Opens maps with the platform's default browser.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserViewer;

impl MapViewer for BrowserViewer {
    fn open(&mut self, path: &Path) -> Result<()> {
        open::that_detached(path)
            .with_context(|| format!("Failed to open {} in a browser", path.display()))?;
        log::debug!("Opened {} in the default browser", path.display());
        Ok(())
    }
}

/// Produces a map artifact for a request.
pub trait MapRenderer {
    /// Renders the map and returns the path of the artifact.
    fn render(&mut self, request: &MapRequest) -> Result<PathBuf>;
}

/// Writes a Leaflet HTML page to a fixed path, replacing any previous map.
#[derive(Debug, Clone)]
pub struct LeafletRenderer {
    path: PathBuf,
}

impl LeafletRenderer {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl MapRenderer for LeafletRenderer {
    fn render(&mut self, request: &MapRequest) -> Result<PathBuf> {
        let html = render_html(request)?;
        std::fs::write(&self.path, html)
            .with_context(|| format!("Failed to write map to {}", self.path.display()))?;
        log::info!(
            "Rendered map at {} (zoom {}, {} marker)",
            self.path.display(),
            request.zoom.get(),
            request.color
        );
        Ok(self.path.clone())
    }
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Builds the popup HTML for a request.
pub fn popup_html(request: &MapRequest) -> String {
    let Some(record) = &request.details else {
        return "Location".to_string();
    };
    let field = |value: Option<&str>| escape_html(value.unwrap_or(NOT_AVAILABLE));
    format!(
        "<b>Location Details</b><br>IP: {}<br>City: {}<br>Region: {}<br>Country: {}<br>Coordinates: {}, {}",
        escape_html(record.ip()),
        field(record.city()),
        field(record.region()),
        field(record.country()),
        request.coordinates.latitude,
        request.coordinates.longitude
    )
}

/// Builds the complete HTML page for a request.
pub fn render_html(request: &MapRequest) -> Result<String> {
    // JSON string literals are valid JavaScript string literals
    let popup = serde_json::to_string(&popup_html(request)).context("Failed to encode popup")?;
    let color = request.color.to_string();
    let Coordinates {
        latitude,
        longitude,
    } = request.coordinates;

    Ok(format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>IP Geolocation Map</title>
    <link rel="stylesheet" href="https://unpkg.com/leaflet@{version}/dist/leaflet.css">
    <script src="https://unpkg.com/leaflet@{version}/dist/leaflet.js"></script>
    <style>html, body, #map {{ height: 100%; margin: 0; }}</style>
</head>
<body>
    <div id="map"></div>
    <script>
        var map = L.map("map").setView([{latitude}, {longitude}], {zoom});
        L.tileLayer("https://tile.openstreetmap.org/{{z}}/{{x}}/{{y}}.png", {{
            maxZoom: 19,
            attribution: "&copy; OpenStreetMap contributors"
        }}).addTo(map);
        L.circleMarker([{latitude}, {longitude}], {{
            radius: 10,
            color: "{color}",
            fillColor: "{color}",
            fillOpacity: 0.8
        }}).addTo(map).bindPopup({popup});
    </script>
</body>
</html>
"#,
        version = LEAFLET_VERSION,
        zoom = request.zoom.get(),
    ))
}
