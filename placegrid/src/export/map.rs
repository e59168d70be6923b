//! Coverage map export
//!
//! Renders the rectangles an area search visited as a self-contained
//! Leaflet HTML document. Each leaf rectangle is colored by how many
//! results its query returned, which makes truncated (page-capped) regions
//! and empty regions visible at a glance.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use tracing::info;

use super::ExportError;
use crate::geo::Rectangle;
use crate::search::SearchLog;

/// Initial zoom level for the rendered map.
const MAP_ZOOM: u32 = 8;

/// Color used for leaves that returned no results.
const EMPTY_COLOR: &str = "#808080";

/// Linear color ramp over a value range.
///
/// Colors are interpolated component-wise between evenly spaced stops;
/// values outside the range clamp to the end colors.
#[derive(Debug, Clone)]
pub struct ColorRamp {
    stops: Vec<(u8, u8, u8)>,
    max_value: f64,
}

impl ColorRamp {
    /// Creates a ramp from evenly spaced color stops.
    pub fn new(stops: Vec<(u8, u8, u8)>, max_value: f64) -> Self {
        Self { stops, max_value }
    }

    /// Green→yellow→red ramp over 0–60 results.
    ///
    /// 60 is the most a single query can return across its three pages, so
    /// anything at or beyond that renders fully red.
    pub fn result_density() -> Self {
        Self::new(vec![(0, 128, 0), (255, 255, 0), (255, 0, 0)], 60.0)
    }

    /// Returns the interpolated color for a value as a `#rrggbb` string.
    pub fn color_for(&self, value: f64) -> String {
        let clamped = value.clamp(0.0, self.max_value);
        let segments = (self.stops.len() - 1) as f64;
        let position = clamped / self.max_value * segments;
        let index = (position.floor() as usize).min(self.stops.len() - 2);
        let t = position - index as f64;

        let (r1, g1, b1) = self.stops[index];
        let (r2, g2, b2) = self.stops[index + 1];
        let lerp = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;

        format!("#{:02x}{:02x}{:02x}", lerp(r1, r2), lerp(g1, g2), lerp(b1, b2))
    }
}

/// Writes the coverage map for one search session to an HTML file.
///
/// The map is centered on the midpoint of the initial bounding rectangle
/// and draws one overlay rectangle per log entry, colored by result count
/// on the [`ColorRamp::result_density`] ramp (gray when the leaf was
/// empty), with a popup showing the count and whether the leaf was
/// subdivided further.
///
/// # Errors
///
/// Disk I/O failures are fatal and propagate.
pub fn write_coverage_map<P: AsRef<Path>>(
    path: P,
    region: &Rectangle,
    log: &SearchLog,
) -> Result<(), ExportError> {
    let (center_lat, center_lon) = region.center();
    let ramp = ColorRamp::result_density();

    let mut overlays = String::new();
    for record in log.records() {
        let color = if record.result_count > 0 {
            ramp.color_for(record.result_count as f64)
        } else {
            EMPTY_COLOR.to_string()
        };
        let status = if record.subdivided {
            "Subdivided"
        } else {
            "Not subdivided"
        };
        let bounds = record.bounds;
        writeln!(
            overlays,
            concat!(
                "L.rectangle([[{}, {}], [{}, {}]], ",
                "{{color: '{}', weight: 1, opacity: 0.5, fill: true, fillOpacity: 0.2}})",
                ".addTo(map).bindPopup('Results: {}<br>{}');"
            ),
            bounds.sw_lat,
            bounds.sw_lon,
            bounds.ne_lat,
            bounds.ne_lon,
            color,
            record.result_count,
            status
        )
        .expect("writing to a String cannot fail");
    }

    let html = format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8"/>
<title>Search coverage</title>
<link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css"/>
<script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js"></script>
<style>
html, body, #map {{ height: 100%; margin: 0; }}
.legend {{
  position: absolute; bottom: 16px; right: 16px; z-index: 1000;
  background: white; padding: 6px 10px; font: 12px sans-serif;
  border: 1px solid #999; border-radius: 4px;
}}
.legend .bar {{
  width: 140px; height: 10px;
  background: linear-gradient(to right, #008000, #ffff00, #ff0000);
}}
</style>
</head>
<body>
<div id="map"></div>
<div class="legend">Number of results found<div class="bar"></div>0&nbsp;&ndash;&nbsp;60+</div>
<script>
var map = L.map('map').setView([{center_lat}, {center_lon}], {zoom});
L.tileLayer('https://tile.openstreetmap.org/{{z}}/{{x}}/{{y}}.png', {{
  attribution: '&copy; OpenStreetMap contributors'
}}).addTo(map);
{overlays}</script>
</body>
</html>
"#,
        center_lat = center_lat,
        center_lon = center_lon,
        zoom = MAP_ZOOM,
        overlays = overlays
    );

    fs::write(&path, html)?;
    info!(
        path = %path.as_ref().display(),
        rectangles = log.len(),
        "coverage map written"
    );
    Ok(())
}
