use geo::Coord;
use geojson::FeatureCollection;
use log::debug;
use rayon::prelude::*;

use crate::processing::coordinates::coordinates;
use crate::utils::error::{Error, Result};
use crate::utils::geometry::BoundingBox;

/// Running min/max fold over coordinates.
///
/// Starts with nothing seen. Merging two accumulators is associative and
/// commutative, so the order in which layers and features are folded does not
/// change the result.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ExtentAccumulator {
    bounds: Option<BoundingBox>,
}

impl ExtentAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, coord: Coord<f64>) {
        match self.bounds.as_mut() {
            Some(bounds) => bounds.include(coord),
            None => self.bounds = Some(BoundingBox::from_coord(coord)),
        }
    }

    pub fn merge(self, other: ExtentAccumulator) -> ExtentAccumulator {
        let bounds = match (self.bounds, other.bounds) {
            (Some(a), Some(b)) => Some(a.union(&b)),
            (a, b) => a.or(b),
        };
        ExtentAccumulator { bounds }
    }

    /// Fold every vertex of every feature in `collection` into the extent.
    pub fn add_collection(&mut self, collection: &FeatureCollection, max_depth: usize) -> Result<()> {
        for geometry in collection.features.iter().filter_map(|f| f.geometry.as_ref()) {
            for coord in coordinates(geometry, max_depth) {
                self.add(coord?);
            }
        }
        Ok(())
    }

    /// The final bounding box, or `Error::EmptyExtent` if nothing was seen.
    pub fn finish(self) -> Result<BoundingBox> {
        self.bounds.ok_or(Error::EmptyExtent)
    }
}

/**
 * Computes the combined extent of several feature collections.
 *
 * # Arguments
 * `collections` - The feature collections, one per layer.
 * `max_depth` - Nesting limit for geometry collections.
 *
 * # Returns
 * The bounding box of every coordinate in every collection. Fails on the first
 * invalid coordinate, or with `Error::EmptyExtent` when there are no coordinates.
 */
pub fn compute_extent<'a, I>(collections: I, max_depth: usize) -> Result<BoundingBox>
where
    I: IntoIterator<Item = &'a FeatureCollection>,
{
    let mut extent = ExtentAccumulator::new();
    for collection in collections {
        extent.add_collection(collection, max_depth)?;
    }
    debug!("Extent after all layers: {:?}", extent);
    extent.finish()
}

/**
 * Same as [`compute_extent`] but each collection is folded on the rayon pool.
 *
 * Per-collection results are merged in input order, so when several layers
 * are invalid the error reported is the one from the first of them.
 */
pub fn compute_extent_parallel(
    collections: &[&FeatureCollection],
    max_depth: usize,
) -> Result<BoundingBox> {
    let partials: Vec<Result<ExtentAccumulator>> = collections
        .par_iter()
        .map(|collection| -> Result<ExtentAccumulator> {
            let mut extent = ExtentAccumulator::new();
            extent.add_collection(collection, max_depth)?;
            Ok(extent)
        })
        .collect();

    let mut extent = ExtentAccumulator::new();
    for partial in partials {
        extent = extent.merge(partial?);
    }
    extent.finish()
}
