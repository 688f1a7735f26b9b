//! Weighted candidate scoring.
//!
//! A candidate gets three sub-scores, each in [0, 100]:
//!
//! - **harmony**: how close its hue is to the brand hue
//! - **cud**: how close it is to a colorblind-safe reference color
//! - **contrast**: how readable it is against the background
//!
//! The total is their weighted sum with weights normalized to 100, so it is
//! also in [0, 100]. Nothing is rounded here; rounding is a display concern.

use serde::{Deserialize, Serialize};
use swatch_color::{Color, contrast_ratio};

use crate::cud::nearest_cud;
use crate::harmony::circular_distance;

/// Sub-score floor for a hue directly opposite the brand.
const HARMONY_FLOOR: f64 = 20.0;

/// Delta E over which the CUD score decays by a factor of e.
const CUD_FALLOFF: f64 = 0.12;

/// WCAG ratio at which the contrast sub-score saturates.
const CONTRAST_SATURATION: f64 = 7.0;

// ---------------------------------------------------------------------------
// Weights
// ---------------------------------------------------------------------------

/// Relative importance of each sub-score.
///
/// Any non-negative integers are accepted; [`normalize_weights`] scales
/// them to sum to exactly 100 before use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    pub harmony: u32,
    pub cud: u32,
    pub contrast: u32,
}

impl ScoreWeights {
    /// Harmony 40, CUD 30, contrast 30.
    pub const DEFAULT: Self = Self {
        harmony: 40,
        cud: 30,
        contrast: 30,
    };

    #[must_use]
    pub const fn new(harmony: u32, cud: u32, contrast: u32) -> Self {
        Self { harmony, cud, contrast }
    }

    #[must_use]
    pub fn sum(self) -> u64 {
        u64::from(self.harmony) + u64::from(self.cud) + u64::from(self.contrast)
    }
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Scale weights proportionally so they sum to exactly 100.
///
/// Largest-remainder rounding: every share is floored, then the missing
/// points go one at a time to the shares with the largest fractional
/// remainder, ties resolved harmony, then cud, then contrast. Anything still
/// missing lands on the largest original weight. All-zero input yields
/// [`ScoreWeights::DEFAULT`].
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn normalize_weights(weights: ScoreWeights) -> ScoreWeights {
    let total = weights.sum();
    if total == 0 {
        return ScoreWeights::DEFAULT;
    }

    let raw = [weights.harmony, weights.cud, weights.contrast].map(|w| u64::from(w) * 100);
    // Each share is <= 100, so the casts back to u32 are lossless.
    let mut shares = raw.map(|scaled| (scaled / total) as u32);
    let remainders = raw.map(|scaled| scaled % total);

    let mut deficit = 100 - shares.iter().sum::<u32>();
    // Stable sort keeps harmony > cud > contrast among equal remainders.
    let mut order = [0, 1, 2];
    order.sort_by_key(|&i| std::cmp::Reverse(remainders[i]));
    for i in order {
        if deficit == 0 || remainders[i] == 0 {
            break;
        }
        shares[i] += 1;
        deficit -= 1;
    }

    if deficit > 0 {
        let largest = if weights.harmony >= weights.cud && weights.harmony >= weights.contrast {
            0
        } else if weights.cud >= weights.contrast {
            1
        } else {
            2
        };
        shares[largest] += deficit;
    }

    let [harmony, cud, contrast] = shares;
    ScoreWeights { harmony, cud, contrast }
}

// ---------------------------------------------------------------------------
// Scores
// ---------------------------------------------------------------------------

/// Per-metric sub-scores, each in [0, 100].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub harmony: f64,
    pub cud: f64,
    pub contrast: f64,
}

/// A candidate's full score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CandidateScore {
    /// Weighted sum of `breakdown`, in [0, 100].
    pub total: f64,
    pub breakdown: ScoreBreakdown,
    /// The normalized weights that produced `total`.
    pub weights: ScoreWeights,
}

/// Harmony sub-score from the hue distance to the brand.
///
/// Raised cosine from 100 (same hue) down to [`HARMONY_FLOOR`] (opposite
/// hue); non-increasing in distance.
#[must_use]
pub fn harmony_score(brand_hue: f32, candidate_hue: f32) -> f64 {
    let d = f64::from(circular_distance(brand_hue, candidate_hue));
    let closeness = (1.0 + d.to_radians().cos()) * 0.5;
    closeness.mul_add(100.0 - HARMONY_FLOOR, HARMONY_FLOOR).clamp(0.0, 100.0)
}

/// CUD sub-score: exponential decay in the distance to the nearest
/// reference color. 100 on an exact match.
#[must_use]
pub fn cud_score(candidate: Color) -> f64 {
    let d = f64::from(nearest_cud(candidate).distance);
    (100.0 * (-d / CUD_FALLOFF).exp()).clamp(0.0, 100.0)
}

/// Contrast sub-score: linear from 0 at 1:1 to 100 at 7:1.
#[must_use]
pub fn contrast_score(ratio: f64) -> f64 {
    ((ratio - 1.0) / (CONTRAST_SATURATION - 1.0) * 100.0).clamp(0.0, 100.0)
}

/// Score `candidate` as an accent for `brand` on `background`.
#[must_use]
pub fn score_candidate(brand: Color, candidate: Color, background: Color, weights: ScoreWeights) -> CandidateScore {
    let weights = normalize_weights(weights);
    let breakdown = ScoreBreakdown {
        harmony: harmony_score(brand.h, candidate.h),
        cud: cud_score(candidate),
        contrast: contrast_score(contrast_ratio(candidate, background)),
    };

    let total = breakdown.contrast.mul_add(
        f64::from(weights.contrast),
        breakdown.harmony.mul_add(f64::from(weights.harmony), breakdown.cud * f64::from(weights.cud)),
    ) / 100.0;

    CandidateScore {
        total: total.clamp(0.0, 100.0),
        breakdown,
        weights,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
