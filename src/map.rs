use log::info;
use serde::Serialize;
use std::fs;
use std::path::Path;

use crate::layers::Layer;
use crate::processing::schema::PopupSchema;
use crate::processing::style::{Style, StyleOptions, StyleRule, highlight, style};
use crate::utils::config::MapConfig;
use crate::utils::error::Result;
use crate::utils::geometry::{BoundingBox, GeometryKind};

/// Everything the renderer needs for one overlay.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerSpec {
    pub name: String,
    /// Relative URL the page fetches the GeoJSON from.
    pub source: String,
    pub point_style: Style,
    pub area_style: Style,
    pub highlight_style: Style,
    pub point_radius: u32,
    pub popup: PopupSchema,
}

/// Renderer-independent description of the output map.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapDocument {
    /// `[lat, lon]` of the bounding box midpoint.
    pub center: [f64; 2],
    /// `[[south, west], [north, east]]`.
    pub bounds: [[f64; 2]; 2],
    pub zoom_start: u8,
    pub collapsed_layer_control: bool,
    pub layers: Vec<LayerSpec>,
}

/**
 * Wires the computed extent, styles and popup schemas into a map description.
 *
 * # Arguments
 * `layers` - Loaded layers, in display order.
 * `bounds` - Combined extent of all layers.
 * `config` - Style constants and view settings.
 */
pub fn assemble(layers: &[Layer], bounds: &BoundingBox, config: &MapConfig) -> MapDocument {
    let options = StyleOptions::from(config);
    let center = bounds.center();

    let layers = layers
        .iter()
        .map(|layer| LayerSpec {
            name: layer.name.clone(),
            source: layer.source.to_string_lossy().replace('\\', "/"),
            point_style: style(StyleRule::new(&layer.color, Some(GeometryKind::Point)), &options),
            area_style: style(StyleRule::new(&layer.color, Some(GeometryKind::Polygon)), &options),
            highlight_style: highlight(&layer.color, &options),
            point_radius: config.point_radius,
            popup: layer.popup.clone(),
        })
        .collect();

    MapDocument {
        center: [center.y, center.x],
        bounds: [
            [bounds.min_y(), bounds.min_x()],
            [bounds.max_y(), bounds.max_x()],
        ],
        zoom_start: config.zoom_start,
        collapsed_layer_control: config.collapsed_layer_control,
        layers,
    }
}

/// Turns a map description into a document.
pub trait MapRenderer {
    fn render(&self, document: &MapDocument) -> Result<String>;
}

/// Standalone HTML page backed by Leaflet. Layers are fetched from their
/// relative paths at view time instead of being embedded.
#[derive(Debug, Clone)]
pub struct LeafletHtml {
    pub title: String,
}

impl Default for LeafletHtml {
    fn default() -> Self {
        LeafletHtml {
            title: "Map".to_string(),
        }
    }
}

const LEAFLET_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>__TITLE__</title>
<link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css">
<script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js"></script>
<style>html, body, #map { height: 100%; margin: 0; }</style>
</head>
<body>
<div id="map"></div>
<script>
const doc = __MAP_DOCUMENT__;
const map = L.map("map").setView(doc.center, doc.zoomStart);
L.tileLayer("https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png", {
  attribution: "&copy; OpenStreetMap contributors"
}).addTo(map);
map.fitBounds(doc.bounds);

const isPoint = (feature) =>
  feature && feature.geometry && ["Point", "MultiPoint"].includes(feature.geometry.type);
const escapeHtml = (value) =>
  String(value ?? "").replace(/[&<>"']/g, (c) => ({"&": "&amp;", "<": "&lt;", ">": "&gt;", '"': "&quot;", "'": "&#39;"}[c]));
const formatValue = (value) =>
  typeof value === "number" ? value.toLocaleString() : value;

const control = L.control.layers(null, null, {collapsed: doc.collapsedLayerControl}).addTo(map);
for (const spec of doc.layers) {
  const styleFor = (feature) => isPoint(feature) ? spec.pointStyle : spec.areaStyle;
  const overlay = L.geoJSON(null, {
    style: styleFor,
    pointToLayer: (feature, latlng) =>
      L.circleMarker(latlng, Object.assign({radius: spec.pointRadius, fill: true}, styleFor(feature))),
    onEachFeature: (feature, layer) => {
      layer.on("mouseover", () => layer.setStyle(spec.highlightStyle));
      layer.on("mouseout", () => layer.setStyle(styleFor(feature)));
      if (spec.popup.kind === "fields") {
        const props = feature.properties || {};
        const rows = spec.popup.fields.map((field, i) =>
          "<tr><th>" + escapeHtml(spec.popup.aliases[i]) + "</th><td>" + escapeHtml(formatValue(props[field])) + "</td></tr>");
        layer.bindPopup("<table>" + rows.join("") + "</table>");
      }
    }
  }).addTo(map);
  control.addOverlay(overlay, spec.name);
  fetch(spec.source).then((response) => response.json()).then((data) => overlay.addData(data));
}
</script>
</body>
</html>
"#;

impl MapRenderer for LeafletHtml {
    fn render(&self, document: &MapDocument) -> Result<String> {
        // `</` would close the script element early.
        let json = serde_json::to_string(document)?.replace("</", "<\\/");
        Ok(LEAFLET_TEMPLATE
            .replace("__TITLE__", &escape_html(&self.title))
            .replace("__MAP_DOCUMENT__", &json))
    }
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Renders the document and writes it to `path`, creating parent directories.
pub fn write_map(document: &MapDocument, renderer: &dyn MapRenderer, path: &Path) -> Result<()> {
    let rendered = renderer.render(document)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, rendered)?;
    info!("Wrote {} layers to {}", document.layers.len(), path.display());
    Ok(())
}
