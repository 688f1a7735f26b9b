//! Narrow a ranked candidate list to one harmony.

use serde::Serialize;

use crate::generate::ScoredCandidate;
use crate::harmony::{HarmonySelection, distance_to_nearest, is_within_range, target_hues};

/// Alternatives offered when nothing matches.
pub const MAX_ALTERNATIVES: usize = 3;

/// Result of [`filter_by_harmony`].
///
/// `alternatives` is only populated when `candidates` came out empty but
/// the input was not.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HarmonyFilterResult {
    pub candidates: Vec<ScoredCandidate>,
    pub alternatives: Vec<ScoredCandidate>,
    pub is_showing_alternatives: bool,
}

/// Keep the candidates whose hue lies within `range` degrees of one of the
/// selection's target hues, in their original (score) order.
///
/// `All` passes the input through untouched. When nothing survives, the
/// result carries up to [`MAX_ALTERNATIVES`] of the closest misses instead.
#[must_use]
pub fn filter_by_harmony(
    candidates: &[ScoredCandidate],
    selection: HarmonySelection,
    brand_hue: f32,
    range: f32,
) -> HarmonyFilterResult {
    let HarmonySelection::Harmony(kind) = selection else {
        return HarmonyFilterResult {
            candidates: candidates.to_vec(),
            ..HarmonyFilterResult::default()
        };
    };

    let targets = target_hues(brand_hue, kind);
    let matched: Vec<_> = candidates
        .iter()
        .filter(|c| is_within_range(c.hue, &targets, range))
        .cloned()
        .collect();

    if !matched.is_empty() {
        return HarmonyFilterResult {
            candidates: matched,
            ..HarmonyFilterResult::default()
        };
    }

    let alternatives = find_nearest_alternatives(candidates, &targets, MAX_ALTERNATIVES);
    HarmonyFilterResult {
        candidates: Vec::new(),
        is_showing_alternatives: !alternatives.is_empty(),
        alternatives,
    }
}

/// The `max_count` candidates whose hue is closest to any target.
///
/// Ties keep input order. With no targets, the first `max_count`
/// candidates are returned as-is.
#[must_use]
pub fn find_nearest_alternatives(
    candidates: &[ScoredCandidate],
    targets: &[f32],
    max_count: usize,
) -> Vec<ScoredCandidate> {
    if targets.is_empty() {
        return candidates.iter().take(max_count).cloned().collect();
    }

    let mut ranked: Vec<(f32, &ScoredCandidate)> =
        candidates.iter().map(|c| (distance_to_nearest(c.hue, targets), c)).collect();
    ranked.sort_by(|a, b| a.0.total_cmp(&b.0));
    ranked.into_iter().take(max_count).map(|(_, c)| c.clone()).collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
