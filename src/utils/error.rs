use std::path::PathBuf;

use thiserror::Error;

// Define error type
#[derive(Error, Debug)]
pub enum Error {
    #[error("Missing input files:{}", format_paths(.0))]
    MissingInputFiles(Vec<PathBuf>),
    #[error("Invalid coordinate: expected at least 2 finite components, found {components}")]
    InvalidCoordinate { components: usize },
    #[error("Could not determine the map extent: no coordinates found in any layer")]
    EmptyExtent,
    #[error("Geometry collections nested deeper than {max_depth} levels")]
    NestingTooDeep { max_depth: usize },
    #[error("Invalid feature collection in {}", .0.display())]
    InvalidFeatureCollection(PathBuf),
    #[error("Malformed {0} geometry")]
    MalformedGeometry(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

fn format_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|path| format!("\n - {}", path.display()))
        .collect()
}
