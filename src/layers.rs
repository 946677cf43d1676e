use geojson::{Feature, FeatureCollection, Geometry, Position, Value};
use log::{debug, info};
use serde_json::{Map, Value as JsonValue};
use std::fs;
use std::path::{Path, PathBuf};

use crate::processing::schema::{PopupSchema, discover_popup};
use crate::utils::config::MapConfig;
use crate::utils::error::{Error, Result};
use crate::utils::geometry::GeometryKind;

static NULL: JsonValue = JsonValue::Null;

/// A loaded input layer, ready to be styled and placed on the map.
#[derive(Debug, Clone)]
pub struct Layer {
    pub name: String,
    /// Path as configured, used by the map to fetch the file.
    pub source: PathBuf,
    pub color: String,
    pub collection: FeatureCollection,
    pub popup: PopupSchema,
}

/**
 * Loads every configured dataset.
 *
 * # Arguments
 * `config` - Lists the datasets and the palette.
 * `base_dir` - Directory the dataset paths are relative to.
 *
 * # Returns
 * One layer per dataset, in configuration order. Fails with
 * `Error::InvalidConfig` for an unusable config, and with
 * `Error::MissingInputFiles` naming every absent file before anything is read.
 */
pub fn load_layers(config: &MapConfig, base_dir: &Path) -> Result<Vec<Layer>> {
    config.validate()?;

    let missing: Vec<PathBuf> = config
        .datasets
        .iter()
        .filter(|dataset| !base_dir.join(&dataset.path).exists())
        .map(|dataset| dataset.path.clone())
        .collect();
    if !missing.is_empty() {
        return Err(Error::MissingInputFiles(missing));
    }

    let mut layers = Vec::with_capacity(config.datasets.len());
    for (index, dataset) in config.datasets.iter().enumerate() {
        let full_path = base_dir.join(&dataset.path);
        let collection = read_feature_collection(&full_path)?;
        let popup = discover_popup(&collection);
        info!(
            "Loaded layer {:?}: {} features, {} popup fields",
            dataset.name,
            collection.features.len(),
            popup.fields().len()
        );
        layers.push(Layer {
            name: dataset.name.clone(),
            source: dataset.path.clone(),
            color: config.color_for(index).to_string(),
            collection,
            popup,
        });
    }
    Ok(layers)
}

/// Reads a GeoJSON document from disk into a feature collection.
pub fn read_feature_collection(path: &Path) -> Result<FeatureCollection> {
    let text = fs::read_to_string(path)?;
    let json: JsonValue = serde_json::from_str(&text)?;
    parse_feature_collection(&json, path)
}

/**
 * Builds a feature collection from a parsed JSON document.
 *
 * Only `features[].geometry` and `features[].properties` are kept. A missing
 * `features` member is an empty collection. Geometries of an unknown type are
 * dropped, as are null ones. Positions are not length-checked here; the
 * coordinate walk rejects short ones. `source` names the document in errors.
 */
pub fn parse_feature_collection(json: &JsonValue, source: &Path) -> Result<FeatureCollection> {
    let object = json
        .as_object()
        .ok_or_else(|| Error::InvalidFeatureCollection(source.to_path_buf()))?;

    let features = match object.get("features") {
        None | Some(JsonValue::Null) => Vec::new(),
        Some(JsonValue::Array(features)) => features
            .iter()
            .map(parse_feature)
            .collect::<Result<Vec<Feature>>>()?,
        Some(_) => return Err(Error::InvalidFeatureCollection(source.to_path_buf())),
    };

    Ok(FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    })
}

fn parse_feature(json: &JsonValue) -> Result<Feature> {
    let properties: Option<Map<String, JsonValue>> = json
        .get("properties")
        .and_then(JsonValue::as_object)
        .cloned();
    let geometry = match json.get("geometry") {
        Some(geometry @ JsonValue::Object(_)) => parse_geometry(geometry)?,
        _ => None,
    };

    Ok(Feature {
        bbox: None,
        geometry,
        id: None,
        properties,
        foreign_members: None,
    })
}

fn parse_geometry(json: &JsonValue) -> Result<Option<Geometry>> {
    let type_name = json.get("type").and_then(JsonValue::as_str).unwrap_or("");
    let kind = match GeometryKind::from_type_name(type_name) {
        Some(kind) => kind,
        None => {
            debug!("Ignoring geometry of unknown type {:?}", type_name);
            return Ok(None);
        }
    };

    let coordinates = json.get("coordinates").unwrap_or(&NULL);
    let value = match kind {
        GeometryKind::Point => Value::Point(parse_position(coordinates)?),
        GeometryKind::MultiPoint => Value::MultiPoint(parse_list(coordinates, kind, parse_position)?),
        GeometryKind::LineString => Value::LineString(parse_list(coordinates, kind, parse_position)?),
        GeometryKind::MultiLineString => Value::MultiLineString(parse_list(coordinates, kind, |line| {
            parse_list(line, kind, parse_position)
        })?),
        GeometryKind::Polygon => Value::Polygon(parse_list(coordinates, kind, |ring| {
            parse_list(ring, kind, parse_position)
        })?),
        GeometryKind::MultiPolygon => Value::MultiPolygon(parse_list(coordinates, kind, |polygon| {
            parse_list(polygon, kind, |ring| parse_list(ring, kind, parse_position))
        })?),
        GeometryKind::GeometryCollection => {
            let children = match json.get("geometries") {
                Some(JsonValue::Array(children)) => children,
                None | Some(JsonValue::Null) => return Ok(Some(Geometry::new(Value::GeometryCollection(vec![])))),
                Some(_) => return Err(Error::MalformedGeometry(kind.type_name().to_string())),
            };
            let mut geometries = Vec::with_capacity(children.len());
            for child in children {
                if let Some(geometry) = parse_geometry(child)? {
                    geometries.push(geometry);
                }
            }
            Value::GeometryCollection(geometries)
        }
    };
    Ok(Some(Geometry::new(value)))
}

/// A null list is treated as empty.
fn parse_list<T>(
    json: &JsonValue,
    kind: GeometryKind,
    parse_item: impl Fn(&JsonValue) -> Result<T>,
) -> Result<Vec<T>> {
    match json {
        JsonValue::Null => Ok(Vec::new()),
        JsonValue::Array(items) => items.iter().map(parse_item).collect(),
        _ => Err(Error::MalformedGeometry(kind.type_name().to_string())),
    }
}

fn parse_position(json: &JsonValue) -> Result<Position> {
    let components = match json {
        JsonValue::Array(components) => components,
        JsonValue::Null => return Ok(Vec::new()),
        _ => return Err(Error::InvalidCoordinate { components: 0 }),
    };
    components
        .iter()
        .map(|component| {
            component.as_f64().ok_or(Error::InvalidCoordinate {
                components: components.len(),
            })
        })
        .collect()
}
