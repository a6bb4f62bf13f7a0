use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{LifeError, Result};

/// Session settings, read from `config.toml`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Canvas size in pixels
    pub canvas_width: usize,
    pub canvas_height: usize,
    /// Side of one cell in pixels
    pub cell_size: usize,
    /// Delay between generations in milliseconds
    pub period_ms: u64,
    /// A run stops once the generation counter reaches this
    pub generation_limit: u64,
    /// Pattern placed on the grid at startup
    pub pattern: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            canvas_width: 800,
            canvas_height: 600,
            cell_size: 20,
            period_ms: 200,
            generation_limit: 100,
            pattern: None,
        }
    }
}

impl Settings {
    /// Load from `path`, or from the default location when `path` is `None`.
    ///
    /// A missing default file yields the defaults; a missing explicit file is
    /// an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let path = Self::config_path();
                if path.exists() {
                    Self::from_file(&path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| LifeError::Config {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| LifeError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("conway")
            .join("config.toml")
    }

    /// Check that the canvas holds at least one cell and the period is positive
    pub fn validate(&self) -> Result<()> {
        let (width, height) = self.grid_size();
        if self.cell_size == 0 || width == 0 || height == 0 {
            return Err(LifeError::InvalidDimension { width, height });
        }
        if self.period_ms == 0 {
            return Err(LifeError::InvalidPeriod);
        }
        Ok(())
    }

    /// Grid dimensions in cells
    pub fn grid_size(&self) -> (usize, usize) {
        match self.cell_size {
            0 => (0, 0),
            size => (self.canvas_width / size, self.canvas_height / size),
        }
    }

    pub fn period(&self) -> Duration {
        Duration::from_millis(self.period_ms)
    }
}
