//! Builds a single interactive map page from a fixed set of local GeoJSON
//! layers: the combined extent sets the initial view, each layer gets a
//! palette color, and popups list every property key the layer uses.

pub mod layers;
pub mod map;
pub mod processing;
pub mod utils;

use log::info;
use std::path::{Path, PathBuf};

use crate::layers::load_layers;
use crate::map::{LeafletHtml, assemble, write_map};
use crate::processing::extent::{compute_extent, compute_extent_parallel};
use crate::utils::config::MapConfig;
use crate::utils::error::Result;

/**
 * Loads the configured layers, computes their extent and writes the map.
 *
 * # Arguments
 * `config` - Datasets, palette, styling constants and output path.
 * `base_dir` - Directory that relative dataset and output paths resolve against.
 *
 * # Returns
 * The path of the written document. Nothing is written if any step fails.
 */
pub fn build_map(config: &MapConfig, base_dir: &Path) -> Result<PathBuf> {
    config.validate()?;
    let layers = load_layers(config, base_dir)?;

    let collections: Vec<_> = layers.iter().map(|layer| &layer.collection).collect();
    let bounds = if config.parallel {
        compute_extent_parallel(&collections, config.max_nesting_depth)?
    } else {
        compute_extent(collections.iter().copied(), config.max_nesting_depth)?
    };
    info!("Map extent: {:?}", bounds.to_array());

    let document = assemble(&layers, &bounds, config);
    let output = base_dir.join(&config.output);
    write_map(&document, &LeafletHtml::default(), &output)?;
    Ok(output)
}
