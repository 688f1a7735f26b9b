//! # swatch — contrast-exact tone scales and harmony-aware accents
//!
//! Facade over the workspace crates:
//!
//! - `swatch-color`: OKLCH [`Color`], hex, gamut, WCAG contrast
//! - `swatch-tone`: contrast solver and tone scales
//! - `swatch-accent`: catalog, scoring, harmony filtering, palettes
//!
//! The functions here wire both pipelines to a [`Config`]:
//! [`solve_contrast`] and [`build_tone_scale`] run with its solver
//! settings, [`recommend_accents`] returns ranked lists and
//! [`assemble_palette`] finished palettes. The crate never installs a
//! tracing subscriber.

pub mod config;

pub use swatch_accent as accent;
pub use swatch_color as color;
pub use swatch_tone as tone;

pub use config::{Config, ConfigError, SolverConfig};
pub use swatch_accent::{
    AccentError, CatalogEntry, CatalogRepository, CatalogSource, HarmonyFilterResult, HarmonySelection,
    HarmonyType, JsonCatalog, PaletteResult, ScoreWeights, ScoredCandidate, filter_by_harmony,
    generate_candidates, score_candidate,
};
pub use swatch_color::Color;
pub use swatch_tone::{SolveReport, ToneScale, ToneStep};

use swatch_accent::parse_brand;
use tracing::{debug, instrument};

/// Move `seed` onto `target_ratio` against `background` using the
/// configured tolerance and iteration count.
#[must_use]
pub fn solve_contrast(seed: Color, background: Color, target_ratio: f64, config: &Config) -> SolveReport {
    swatch_tone::solve_contrast_with(seed, background, target_ratio, config.solver_options())
}

/// Tone scale through `keys`, one step per ratio, corrected with the
/// configured solver settings.
#[must_use]
pub fn build_tone_scale(keys: &[Color], ratios: &[f64], background: Color, config: &Config) -> ToneScale {
    swatch_tone::build_tone_scale_with(keys, ratios, background, config.solver_options())
}

/// Target hue(s) for a harmony around `brand_hue`, in [0, 360).
///
/// Monochromatic and shades have none.
#[must_use]
pub fn target_hues_for_harmony(brand_hue: f32, kind: HarmonyType) -> Vec<f32> {
    swatch_accent::target_hues(brand_hue, kind)
}

/// Ranked accent candidates for `brand`, narrowed to `selection`.
///
/// Matches are capped at `config.candidate_limit`. When nothing matches,
/// the closest misses come back as alternatives.
///
/// # Errors
///
/// [`AccentError::BrandColorNotSet`] for empty or malformed brand input,
/// and catalog errors from `repo`.
#[instrument(skip(repo, config))]
pub fn recommend_accents(
    repo: &CatalogRepository,
    brand: &str,
    selection: HarmonySelection,
    config: &Config,
) -> Result<HarmonyFilterResult, AccentError> {
    let (_, brand_color) = parse_brand(brand)?;
    let ranked = generate_candidates(repo, brand, &config.generate_options())?;

    let mut result = filter_by_harmony(&ranked, selection, brand_color.h, config.harmony_range);
    result.candidates.truncate(config.candidate_limit);
    debug!(
        matched = result.candidates.len(),
        alternatives = result.alternatives.len(),
        "recommended accents"
    );
    Ok(result)
}

/// Assemble a palette of `accent_count` accents (clamped to 2..=5) for
/// `brand` under one harmony. `None` uses `config.accent_count`.
///
/// # Errors
///
/// - [`AccentError::InvalidHarmonyType`] for [`HarmonySelection::All`]
/// - [`AccentError::BrandColorNotSet`] for empty or malformed brand input
/// - [`AccentError::PaletteGenerationFailed`] when fewer than two accents
///   can be selected
/// - catalog errors from `repo`
#[instrument(skip(repo, config))]
pub fn assemble_palette(
    repo: &CatalogRepository,
    brand: &str,
    selection: HarmonySelection,
    accent_count: Option<usize>,
    config: &Config,
) -> Result<PaletteResult, AccentError> {
    let kind = selection.harmony().ok_or(AccentError::InvalidHarmonyType)?;
    let accent_count = accent_count.unwrap_or(config.accent_count);
    let ranked = generate_candidates(repo, brand, &config.generate_options())?;

    swatch_accent::assemble_palette(brand, kind, &ranked, accent_count, config.harmony_range)
        .ok_or(AccentError::PaletteGenerationFailed { harmony: kind })
}
