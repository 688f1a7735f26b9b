//! Palette assembly: pick a handful of accents for one harmony.
//!
//! Input is a ranked candidate list (best first). Each harmony type has its
//! own selection rule:
//!
//! - **complementary**: best candidates near the opposite hue, spread over
//!   distinct steps where possible
//! - **directional** types: round-robin over the target hues so every
//!   direction gets a turn
//! - **monochromatic / shades**: one hue, accents spread evenly from light
//!   to dark
//!
//! The brand color itself is never an accent, and no token or hex appears
//! twice.

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;
use tracing::debug;

use crate::generate::{ScoredCandidate, parse_brand};
use crate::harmony::{HarmonyType, circular_distance, is_within_range, target_hues};

pub const MIN_ACCENTS: usize = 2;
pub const MAX_ACCENTS: usize = 5;

/// An assembled palette.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaletteResult {
    /// Normalized `#rrggbb` brand color.
    pub brand_color: String,
    /// Accent hexes, unique, never equal to `brand_color`.
    pub accent_colors: Vec<String>,
    /// The candidate behind each entry of `accent_colors`.
    pub candidates: Vec<ScoredCandidate>,
    pub harmony_type: HarmonyType,
    /// Requested accent count after clamping to 2..=5.
    pub accent_count: usize,
}

/// Assemble a palette for `brand` from ranked `candidates`.
///
/// Returns `None` when the brand is not a valid hex color or fewer than
/// two accents could be selected.
#[must_use]
pub fn assemble_palette(
    brand: &str,
    kind: HarmonyType,
    candidates: &[ScoredCandidate],
    accent_count: usize,
    range: f32,
) -> Option<PaletteResult> {
    let (brand_hex, brand_color) = parse_brand(brand).ok()?;
    let count = accent_count.clamp(MIN_ACCENTS, MAX_ACCENTS);
    let pool = usable(candidates, &brand_hex);

    let selected = match kind {
        HarmonyType::Complementary => {
            pick_complementary(&pool, &target_hues(brand_color.h, kind), count, range)
        }
        HarmonyType::Triadic
        | HarmonyType::Analogous
        | HarmonyType::SplitComplementary
        | HarmonyType::Square
        | HarmonyType::Compound => pick_directional(&pool, &target_hues(brand_color.h, kind), count, range),
        HarmonyType::Monochromatic => {
            let near: Vec<_> = pool
                .into_iter()
                .filter(|c| circular_distance(c.hue, brand_color.h) <= range)
                .collect();
            spread_by_lightness(&near, count)
        }
        HarmonyType::Shades => {
            let family = pool
                .iter()
                .min_by(|a, b| {
                    circular_distance(a.hue, brand_color.h).total_cmp(&circular_distance(b.hue, brand_color.h))
                })
                .map(|c| c.hue_family);
            let same: Vec<_> = pool.into_iter().filter(|c| Some(c.hue_family) == family).collect();
            spread_by_lightness(&same, count)
        }
    };

    if selected.len() < MIN_ACCENTS {
        debug!(brand = %brand_hex, harmony = %kind, selected = selected.len(), "too few accents");
        return None;
    }

    debug!(brand = %brand_hex, harmony = %kind, accents = selected.len(), "palette assembled");
    Some(PaletteResult {
        brand_color: brand_hex,
        accent_colors: selected.iter().map(|c| c.hex.clone()).collect(),
        candidates: selected,
        harmony_type: kind,
        accent_count: count,
    })
}

/// Drop the brand color and any repeated token or hex, keeping score order.
fn usable<'a>(candidates: &'a [ScoredCandidate], brand_hex: &str) -> Vec<&'a ScoredCandidate> {
    let mut tokens = HashSet::new();
    let mut hexes = HashSet::new();
    let mut out: Vec<&ScoredCandidate> = candidates
        .iter()
        .filter(|c| !c.hex.eq_ignore_ascii_case(brand_hex))
        .filter(|c| {
            let new_token = tokens.insert(c.token_id.as_str());
            let new_hex = hexes.insert(c.hex.to_ascii_lowercase());
            new_token && new_hex
        })
        .collect();
    out.sort_by(|a, b| b.score.total.total_cmp(&a.score.total));
    out
}

fn by_lightness_desc(list: &mut [ScoredCandidate]) {
    list.sort_by(|a, b| b.lightness().total_cmp(&a.lightness()));
}

fn pick_complementary(
    pool: &[&ScoredCandidate],
    targets: &[f32],
    count: usize,
    range: f32,
) -> Vec<ScoredCandidate> {
    let near: Vec<&ScoredCandidate> = pool
        .iter()
        .copied()
        .filter(|c| is_within_range(c.hue, targets, range))
        .collect();

    let mut chosen: Vec<&ScoredCandidate> = Vec::with_capacity(count);
    let mut steps = HashSet::new();
    for &c in &near {
        if chosen.len() == count {
            break;
        }
        if steps.insert(c.step) {
            chosen.push(c);
        }
    }

    if chosen.len() < count {
        debug!(have = chosen.len(), want = count, "filling complementary with repeated steps");
        for &c in &near {
            if chosen.len() == count {
                break;
            }
            if !chosen.iter().any(|p| p.token_id == c.token_id) {
                chosen.push(c);
            }
        }
    }

    let mut out: Vec<_> = chosen.into_iter().cloned().collect();
    by_lightness_desc(&mut out);
    out
}

fn pick_directional(
    pool: &[&ScoredCandidate],
    targets: &[f32],
    count: usize,
    range: f32,
) -> Vec<ScoredCandidate> {
    if targets.is_empty() {
        return Vec::new();
    }

    let directions: Vec<Vec<&ScoredCandidate>> = targets
        .iter()
        .map(|&t| pool.iter().copied().filter(|c| circular_distance(c.hue, t) <= range).collect())
        .collect();

    let mut used_tokens: HashSet<&str> = HashSet::new();
    let mut used_steps: Vec<HashSet<u16>> = vec![HashSet::new(); directions.len()];
    let mut out = Vec::with_capacity(count);

    for visit in 0..count * 2 {
        if out.len() == count {
            break;
        }
        let d = visit % directions.len();
        let list = &directions[d];
        let pick = list
            .iter()
            .find(|c| !used_tokens.contains(c.token_id.as_str()) && !used_steps[d].contains(&c.step))
            .or_else(|| list.iter().find(|c| !used_tokens.contains(c.token_id.as_str())));

        if let Some(&c) = pick {
            used_tokens.insert(c.token_id.as_str());
            used_steps[d].insert(c.step);
            out.push(c.clone());
        }
    }

    out
}

/// Best candidate per step, then `count` of them evenly spaced from
/// lightest to darkest.
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn spread_by_lightness(pool: &[&ScoredCandidate], count: usize) -> Vec<ScoredCandidate> {
    let mut best: BTreeMap<u16, &ScoredCandidate> = BTreeMap::new();
    for &c in pool {
        best.entry(c.step).or_insert(c);
    }

    let mut steps: Vec<ScoredCandidate> = best.into_values().cloned().collect();
    by_lightness_desc(&mut steps);

    let n = steps.len();
    if n <= count {
        return steps;
    }

    // count >= 2 and n > count, so the indices are distinct and hit both ends.
    let stride = (n - 1) as f64 / (count - 1) as f64;
    (0..count)
        .map(|i| steps[(i as f64 * stride).round() as usize].clone())
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::HueFamily;
    use crate::fixtures::candidate;
    use pretty_assertions::assert_eq;

    const BRAND: &str = "#0056ff";

    fn brand_hue() -> f32 {
        parse_brand(BRAND).unwrap().1.h
    }

    fn tokens(p: &PaletteResult) -> Vec<&str> {
        p.candidates.iter().map(|c| c.token_id.as_str()).collect()
    }

    fn assert_invariants(p: &PaletteResult) {
        assert_eq!(p.candidates.len(), p.accent_colors.len());
        assert!(p.accent_colors.len() >= MIN_ACCENTS && p.accent_colors.len() <= p.accent_count);
        assert!(!p.accent_colors.contains(&p.brand_color));
        let unique: HashSet<_> = p.accent_colors.iter().collect();
        assert_eq!(unique.len(), p.accent_colors.len());
    }

    #[test]
    fn invalid_brand_gives_none() {
        let list = vec![candidate(HueFamily::Orange, 80.0, 0.7, 500, 90.0)];
        assert!(assemble_palette("nope", HarmonyType::Complementary, &list, 2, 30.0).is_none());
    }

    #[test]
    fn complementary_prefers_distinct_steps() {
        let opp = brand_hue() + 180.0;
        let list = vec![
            candidate(HueFamily::Orange, opp, 0.70, 500, 90.0),
            candidate(HueFamily::Yellow, opp + 5.0, 0.72, 500, 85.0),
            candidate(HueFamily::Orange, opp - 5.0, 0.50, 700, 80.0),
            candidate(HueFamily::Purple, opp - 90.0, 0.60, 600, 95.0),
        ];
        let p = assemble_palette(BRAND, HarmonyType::Complementary, &list, 2, 30.0).unwrap();
        assert_invariants(&p);
        // Step 500 is used once; step 700 beats a second 500. Lighter first.
        assert_eq!(tokens(&p), vec!["orange-500", "orange-700"]);
    }

    #[test]
    fn complementary_fills_with_repeated_steps() {
        let opp = brand_hue() + 180.0;
        let list = vec![
            candidate(HueFamily::Orange, opp, 0.60, 500, 90.0),
            candidate(HueFamily::Yellow, opp + 5.0, 0.75, 500, 85.0),
        ];
        let p = assemble_palette(BRAND, HarmonyType::Complementary, &list, 3, 30.0).unwrap();
        assert_invariants(&p);
        assert_eq!(tokens(&p), vec!["yellow-500", "orange-500"]);
        assert_eq!(p.accent_count, 3);
    }

    #[test]
    fn complementary_with_one_candidate_fails() {
        let opp = brand_hue() + 180.0;
        let list = vec![
            candidate(HueFamily::Orange, opp, 0.60, 500, 90.0),
            candidate(HueFamily::Blue, brand_hue(), 0.50, 600, 99.0),
        ];
        assert!(assemble_palette(BRAND, HarmonyType::Complementary, &list, 2, 30.0).is_none());
    }

    #[test]
    fn brand_and_duplicates_are_excluded() {
        let opp = brand_hue() + 180.0;
        let mut brand = candidate(HueFamily::Orange, opp, 0.60, 400, 99.0);
        brand.hex = BRAND.to_owned();
        let first = candidate(HueFamily::Orange, opp, 0.70, 500, 90.0);
        let mut dup_hex = candidate(HueFamily::Yellow, opp, 0.70, 500, 89.0);
        dup_hex.hex.clone_from(&first.hex);
        let list = vec![brand, first.clone(), first, dup_hex];
        assert!(assemble_palette(BRAND, HarmonyType::Complementary, &list, 2, 30.0).is_none());
    }

    #[test]
    fn triadic_round_robins_directions() {
        let h = brand_hue();
        let list = vec![
            candidate(HueFamily::Red, h + 120.0, 0.70, 500, 95.0),
            candidate(HueFamily::Red, h + 125.0, 0.50, 700, 94.0),
            candidate(HueFamily::Red, h + 115.0, 0.60, 600, 93.0),
            candidate(HueFamily::Green, h + 240.0, 0.70, 500, 70.0),
        ];
        let p = assemble_palette(BRAND, HarmonyType::Triadic, &list, 3, 30.0).unwrap();
        assert_invariants(&p);
        // Direction 1, direction 2, then direction 1 again.
        assert_eq!(tokens(&p), vec!["red-500", "green-500", "red-700"]);
    }

    #[test]
    fn square_stops_when_directions_run_dry() {
        let h = brand_hue();
        let list = vec![
            candidate(HueFamily::Red, h + 90.0, 0.70, 500, 95.0),
            candidate(HueFamily::Orange, h + 180.0, 0.70, 500, 90.0),
        ];
        let p = assemble_palette(BRAND, HarmonyType::Square, &list, 5, 30.0).unwrap();
        assert_invariants(&p);
        assert_eq!(p.accent_colors.len(), 2);
    }

    #[test]
    fn monochromatic_spreads_lightness() {
        let h = brand_hue();
        let list: Vec<_> = (0..9u16)
            .map(|i| {
                let step = 100 + i * 100;
                candidate(HueFamily::Blue, h + 2.0, 0.95 - f32::from(i) * 0.08, step, 90.0 - f64::from(i))
            })
            .collect();
        let p = assemble_palette(BRAND, HarmonyType::Monochromatic, &list, 3, 30.0).unwrap();
        assert_invariants(&p);
        assert_eq!(tokens(&p), vec!["blue-100", "blue-500", "blue-900"]);
    }

    #[test]
    fn monochromatic_keeps_best_per_step() {
        let h = brand_hue();
        let list = vec![
            candidate(HueFamily::Blue, h, 0.80, 300, 90.0),
            candidate(HueFamily::LightBlue, h + 10.0, 0.78, 300, 80.0),
            candidate(HueFamily::Blue, h, 0.40, 800, 70.0),
        ];
        let p = assemble_palette(BRAND, HarmonyType::Monochromatic, &list, 5, 30.0).unwrap();
        assert_eq!(tokens(&p), vec!["blue-300", "blue-800"]);
    }

    #[test]
    fn shades_use_nearest_family() {
        let h = brand_hue();
        let list = vec![
            candidate(HueFamily::Purple, h + 40.0, 0.80, 200, 99.0),
            candidate(HueFamily::Blue, h + 1.0, 0.80, 200, 60.0),
            candidate(HueFamily::Blue, h + 3.0, 0.30, 900, 50.0),
            candidate(HueFamily::Purple, h + 40.0, 0.40, 800, 98.0),
        ];
        let p = assemble_palette(BRAND, HarmonyType::Shades, &list, 2, 30.0).unwrap();
        assert_eq!(tokens(&p), vec!["blue-200", "blue-900"]);
    }

    #[test]
    fn accent_count_is_clamped() {
        let opp = brand_hue() + 180.0;
        let list: Vec<_> = (0..8u16)
            .map(|i| candidate(HueFamily::Orange, opp, 0.9 - f32::from(i) * 0.08, 100 + i * 100, 90.0))
            .collect();
        let p = assemble_palette(BRAND, HarmonyType::Complementary, &list, 99, 30.0).unwrap();
        assert_eq!(p.accent_count, MAX_ACCENTS);
        assert_eq!(p.accent_colors.len(), MAX_ACCENTS);
        let p = assemble_palette(BRAND, HarmonyType::Complementary, &list, 0, 30.0).unwrap();
        assert_eq!(p.accent_count, MIN_ACCENTS);
        assert_eq!(p.accent_colors.len(), MIN_ACCENTS);
    }

    #[test]
    fn evenly_spaced_indices() {
        let h = brand_hue();
        let list: Vec<_> = (0..5u16)
            .map(|i| candidate(HueFamily::Blue, h, 0.9 - f32::from(i) * 0.1, 100 + i * 100, 50.0))
            .collect();
        let refs: Vec<_> = list.iter().collect();
        let picked = spread_by_lightness(&refs, 4);
        let steps: Vec<_> = picked.iter().map(|c| c.step).collect();
        // stride 4/3 → indices 0, 1, 3, 4.
        assert_eq!(steps, vec![100, 200, 400, 500]);
    }
}
