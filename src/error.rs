use std::path::PathBuf;

use thiserror::Error;

/// Startup-time configuration failures. Nothing here can happen mid-frame.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse config json: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("grid has no cells")]
    EmptyGrid,

    #[error("grid row {row} has {len} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        len: usize,
        expected: usize,
    },

    #[error("wall value {value} needs at least {value} palette colors, palette has {len}")]
    PaletteTooShort { value: u32, len: usize },

    #[error("{0} vector must be non-zero and finite")]
    DegenerateVector(&'static str),

    #[error("camera plane is parallel to the facing direction")]
    ParallelCameraPlane,

    #[error("start position ({x}, {y}) lies outside the {width}x{height} grid")]
    StartOutOfBounds {
        x: f64,
        y: f64,
        width: usize,
        height: usize,
    },

    #[error("start position ({x}, {y}) lies inside a wall")]
    StartInWall { x: f64, y: f64 },

    #[error("screen size {width}x{height} must be non-zero")]
    EmptyScreen { width: u32, height: u32 },

    #[error("{0} must be finite and non-negative")]
    BadSpeed(&'static str),
}
