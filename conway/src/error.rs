//! Errors surfaced by the grid, the controller and configuration loading.

use std::path::PathBuf;
use thiserror::Error;

/// All kinds of errors in this crate.
#[derive(Debug, Error)]
pub enum LifeError {
    /// A cell index outside the grid.
    #[error("cell ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfRange {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },

    /// Width and height must both be positive.
    #[error("grid dimensions must be positive, got {width}x{height}")]
    InvalidDimension { width: usize, height: usize },

    /// The advancement period must be at least one millisecond.
    #[error("advancement period must be greater than 0 ms")]
    InvalidPeriod,

    #[error("unknown pattern {0:?}")]
    UnknownPattern(String),

    #[error("cannot read config file {}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse config file {}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, LifeError>;
