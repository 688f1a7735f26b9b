//! # swatch-accent — accent colors that fit a brand
//!
//! Ranks a design-token catalog against one brand color, narrows the
//! ranking to a color harmony, and assembles small accent palettes.
//!
//! # Architecture
//!
//! ```text
//! brand hex + catalog
//!     │
//!     ▼
//! generate.rs: score every chromatic entry (score.rs, cud.rs), rank
//!     │
//!     ├──▶ filter.rs:   keep candidates near the harmony's target hues,
//!     │                 or offer the closest misses
//!     │
//!     └──▶ assemble.rs: pick 2-5 accents per harmony rule
//! ```
//!
//! Hue geometry lives in `harmony.rs`. The catalog is loaded lazily and
//! memoized per [`CatalogRepository`]; everything else is recomputed per
//! call.

// Hue/lightness variable names are inherently similar.
#![allow(clippy::similar_names)]

pub mod assemble;
pub mod builtin;
pub mod catalog;
pub mod cud;
pub mod error;
pub mod filter;
pub mod generate;
pub mod harmony;
pub mod score;

#[cfg(test)]
mod fixtures;

pub use assemble::{MAX_ACCENTS, MIN_ACCENTS, PaletteResult, assemble_palette};
pub use builtin::BuiltinCatalog;
pub use catalog::{CatalogEntry, CatalogRepository, CatalogSource, Category, HueFamily, JsonCatalog};
pub use cud::{CUD_REFERENCE, CudColor, CudMatch, nearest_cud};
pub use error::{AccentError, Result};
pub use filter::{HarmonyFilterResult, MAX_ALTERNATIVES, filter_by_harmony, find_nearest_alternatives};
pub use generate::{GenerateOptions, ScoredCandidate, generate_candidates, parse_brand, resolve_background};
pub use harmony::{
    DEFAULT_HUE_RANGE, HarmonySelection, HarmonyType, circular_distance, is_within_range, target_hues,
};
pub use score::{CandidateScore, ScoreBreakdown, ScoreWeights, normalize_weights, score_candidate};
