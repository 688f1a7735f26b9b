//! TOML configuration for the facade.
//!
//! Every field has a default, so an empty document (or no file at all) is
//! a valid configuration:
//!
//! ```toml
//! background = "#ffffff"
//! harmony_range = 30.0
//! candidate_limit = 20
//! accent_count = 3
//!
//! [weights]
//! harmony = 40
//! cud = 30
//! contrast = 30
//!
//! [solver]
//! tolerance = 0.01
//! iterations = 20
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use swatch_accent::{DEFAULT_HUE_RANGE, GenerateOptions, ScoreWeights};
use swatch_tone::SolverOptions;
use thiserror::Error;
use tracing::debug;

/// Errors from loading a configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Contrast solver settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Accepted distance from the target ratio.
    pub tolerance: f64,
    /// Bisection steps per search.
    pub iterations: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        let options = SolverOptions::default();
        Self {
            tolerance: options.tolerance,
            iterations: options.iterations,
        }
    }
}

impl From<SolverConfig> for SolverOptions {
    fn from(config: SolverConfig) -> Self {
        Self {
            tolerance: config.tolerance,
            iterations: config.iterations,
        }
    }
}

/// Facade settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Background candidates are scored against. Invalid means white.
    pub background: String,
    pub weights: ScoreWeights,
    /// Degrees around a target hue that still count as a match.
    pub harmony_range: f32,
    /// Most candidates [`recommend_accents`](crate::recommend_accents)
    /// returns.
    pub candidate_limit: usize,
    /// Default accent count for palettes (clamped to 2..=5 on use).
    pub accent_count: usize,
    pub solver: SolverConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            background: "#ffffff".to_owned(),
            weights: ScoreWeights::DEFAULT,
            harmony_range: DEFAULT_HUE_RANGE,
            candidate_limit: 20,
            accent_count: 3,
            solver: SolverConfig::default(),
        }
    }
}

impl Config {
    /// Parse a TOML document. Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Parse`] for malformed TOML or mistyped values.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Read and parse a TOML file.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Io`] when the file cannot be read, otherwise as
    /// [`Config::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Candidate generation options: this background and weights, no limit.
    #[must_use]
    pub fn generate_options(&self) -> GenerateOptions {
        GenerateOptions::default()
            .with_background(self.background.clone())
            .with_weights(self.weights)
    }

    #[must_use]
    pub fn solver_options(&self) -> SolverOptions {
        self.solver.into()
    }
}
