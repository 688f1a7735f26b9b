//! Error types for accent recommendation.
//!
//! Expected outcomes (bad brand input, a harmony of "all" where a concrete
//! one is required, too few candidates) are typed variants, not panics.
//! Catalog variants cover collaborator failures.

use std::path::PathBuf;

use thiserror::Error;

use crate::harmony::HarmonyType;

/// Everything that can go wrong between catalog load and palette assembly.
#[derive(Error, Debug)]
pub enum AccentError {
    /// Brand input is empty or not a 3/6-digit hex color.
    #[error("brand color is not set or is not a valid hex color: {0:?}")]
    BrandColorNotSet(String),

    /// `all` was passed where a concrete harmony type is required.
    #[error("a concrete harmony type is required, got \"all\"")]
    InvalidHarmonyType,

    /// Fewer than two usable accents survived selection.
    #[error("could not assemble a {harmony} palette: fewer than 2 usable candidates")]
    PaletteGenerationFailed { harmony: HarmonyType },

    /// The catalog source produced no usable entries.
    #[error("catalog is empty")]
    CatalogEmpty,

    /// Reading a catalog file failed.
    #[error("failed to read catalog '{path}': {source}")]
    CatalogIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A catalog document did not deserialize.
    #[error("failed to parse catalog: {0}")]
    CatalogParse(#[from] serde_json::Error),
}

impl AccentError {
    /// Stable machine-readable code for UI layers.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::BrandColorNotSet(_) => "BRAND_COLOR_NOT_SET",
            Self::InvalidHarmonyType => "INVALID_HARMONY_TYPE",
            Self::PaletteGenerationFailed { .. } => "PALETTE_GENERATION_FAILED",
            Self::CatalogEmpty | Self::CatalogIo { .. } | Self::CatalogParse(_) => "CATALOG_UNAVAILABLE",
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, AccentError>;
