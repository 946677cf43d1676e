use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::utils::error::{Error, Result};

/// One input layer: the name shown in the layer control and the GeoJSON file
/// it streams from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetConfig {
    pub name: String,
    pub path: PathBuf,
}

impl DatasetConfig {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}

/// Everything the map build needs, passed explicitly instead of living in
/// process-wide constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub datasets: Vec<DatasetConfig>,
    pub palette: Vec<String>,
    pub polygon_opacity: f64,
    pub point_opacity: f64,
    pub highlight_opacity_boost: f64,
    pub stroke_weight: u32,
    pub highlight_weight: u32,
    pub point_radius: u32,
    pub zoom_start: u8,
    pub collapsed_layer_control: bool,
    pub output: PathBuf,
    pub max_nesting_depth: usize,
    pub parallel: bool,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            datasets: vec![
                DatasetConfig::new("Setores", "camadas/setores.geojson"),
                DatasetConfig::new("DRM 2022", "camadas/drm2022.geojson"),
                DatasetConfig::new("PMRR 2017", "camadas/pmrr2017.geojson"),
                DatasetConfig::new("Vistorias", "camadas/vistorias.geojson"),
            ],
            palette: ["#1f78b4", "#33a02c", "#e31a1c", "#ff7f00"]
                .into_iter()
                .map(String::from)
                .collect(),
            polygon_opacity: 0.25,
            point_opacity: 0.7,
            highlight_opacity_boost: 0.15,
            stroke_weight: 2,
            highlight_weight: 3,
            point_radius: 6,
            zoom_start: 12,
            collapsed_layer_control: false,
            output: PathBuf::from("index.html"),
            max_nesting_depth: 32,
            parallel: false,
        }
    }
}

impl MapConfig {
    /// Reads a JSON config file. Fields left out keep their default values.
    pub fn from_path(path: &Path) -> Result<MapConfig> {
        let reader = BufReader::new(File::open(path)?);
        let config: MapConfig = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.palette.is_empty() {
            return Err(Error::InvalidConfig("palette must not be empty".into()));
        }
        if self.datasets.is_empty() {
            return Err(Error::InvalidConfig(
                "at least one dataset is required".into(),
            ));
        }
        for opacity in [self.polygon_opacity, self.point_opacity] {
            if !(0.0..=1.0).contains(&opacity) {
                return Err(Error::InvalidConfig(format!(
                    "opacity {} is outside 0..=1",
                    opacity
                )));
            }
        }
        Ok(())
    }

    /// Palette entry for the layer at `index`, cycling when there are more
    /// layers than colors.
    pub fn color_for(&self, index: usize) -> &str {
        &self.palette[index % self.palette.len()]
    }
}
