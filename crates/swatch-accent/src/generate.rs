//! Candidate generation: score every chromatic catalog color against a
//! brand color and rank them.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use swatch_color::{Color, normalize_hex};
use tracing::{debug, warn};

use crate::catalog::{CatalogEntry, CatalogRepository, HueFamily};
use crate::error::{AccentError, Result};
use crate::score::{CandidateScore, ScoreWeights, score_candidate};

/// A catalog color ranked as an accent for one brand color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredCandidate {
    /// `#rrggbb`.
    pub hex: String,
    pub hue_family: HueFamily,
    pub step: u16,
    pub token_id: String,
    /// OKLCH hue in [0, 360).
    pub hue: f32,
    pub score: CandidateScore,
}

impl ScoredCandidate {
    /// Parsed color. Candidates are built from validated entries, so this
    /// only falls back to black for hand-built values.
    #[must_use]
    pub fn color(&self) -> Color {
        Color::hex(&self.hex).unwrap_or(Color::BLACK)
    }

    /// OKLCH lightness.
    #[must_use]
    pub fn lightness(&self) -> f32 {
        self.color().l
    }
}

/// Knobs for [`generate_candidates`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Background the contrast score is measured against. Missing or
    /// invalid means white.
    pub background: Option<String>,
    /// Maximum number of candidates returned.
    pub limit: usize,
    pub weights: ScoreWeights,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            background: None,
            limit: usize::MAX,
            weights: ScoreWeights::DEFAULT,
        }
    }
}

impl GenerateOptions {
    #[must_use]
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    #[must_use]
    pub fn with_background(mut self, hex: impl Into<String>) -> Self {
        self.background = Some(hex.into());
        self
    }

    #[must_use]
    pub const fn with_weights(mut self, weights: ScoreWeights) -> Self {
        self.weights = weights;
        self
    }
}

/// Validate brand input and return it as `(#rrggbb, color)`.
///
/// # Errors
///
/// [`AccentError::BrandColorNotSet`] when `brand` is empty or not a 3- or
/// 6-digit hex color.
pub fn parse_brand(brand: &str) -> Result<(String, Color)> {
    normalize_hex(brand)
        .and_then(|hex| Color::hex(&hex).map(|c| (hex, c)))
        .ok_or_else(|| AccentError::BrandColorNotSet(brand.to_owned()))
}

/// Resolve an optional background hex; anything unusable is white.
#[must_use]
pub fn resolve_background(background: Option<&str>) -> Color {
    match background {
        None => Color::WHITE,
        Some(raw) => normalize_hex(raw).and_then(|hex| Color::hex(&hex)).unwrap_or_else(|| {
            warn!(background = raw, "invalid background, using white");
            Color::WHITE
        }),
    }
}

fn score_entry(entry: &CatalogEntry, brand: Color, background: Color, weights: ScoreWeights) -> Option<ScoredCandidate> {
    let color = entry.color()?;
    Some(ScoredCandidate {
        hex: color.to_hex(),
        hue_family: entry.hue_family,
        step: entry.step,
        token_id: entry.id.clone(),
        hue: color.h,
        score: score_candidate(brand, color, background, weights),
    })
}

/// Rank every chromatic catalog entry as an accent for `brand`.
///
/// Scoring runs in parallel; the result is sorted by total score
/// descending with ties kept in catalog order, then truncated to
/// `options.limit`. The same inputs always produce the same list.
///
/// # Errors
///
/// [`AccentError::BrandColorNotSet`] for bad brand input, and any error
/// from loading the catalog.
pub fn generate_candidates(
    repo: &CatalogRepository,
    brand: &str,
    options: &GenerateOptions,
) -> Result<Vec<ScoredCandidate>> {
    let (brand_hex, brand_color) = parse_brand(brand)?;
    let background = resolve_background(options.background.as_deref());
    let entries = repo.entries()?;

    let mut candidates: Vec<ScoredCandidate> = entries
        .par_iter()
        .filter(|e| e.is_chromatic())
        .filter_map(|e| score_entry(e, brand_color, background, options.weights))
        .collect();

    candidates.sort_by(|a, b| b.score.total.total_cmp(&a.score.total));
    candidates.truncate(options.limit);

    debug!(brand = %brand_hex, count = candidates.len(), "generated candidates");
    Ok(candidates)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
