//! Hand-built candidates for unit tests.

use swatch_color::{Color, normalize_hue};

use crate::catalog::HueFamily;
use crate::generate::ScoredCandidate;
use crate::score::{CandidateScore, ScoreBreakdown, ScoreWeights};

fn score(total: f64) -> CandidateScore {
    CandidateScore {
        total,
        breakdown: ScoreBreakdown {
            harmony: total,
            cud: total,
            contrast: total,
        },
        weights: ScoreWeights::DEFAULT,
    }
}

/// A candidate with an explicit hue, lightness and step.
///
/// `hue` is stored as given (normalized); the hex is the closest in-gamut
/// color, so its own hue may drift slightly.
pub fn candidate(family: HueFamily, hue: f32, l: f32, step: u16, total: f64) -> ScoredCandidate {
    let hue = normalize_hue(hue);
    ScoredCandidate {
        hex: Color::clamped(l, 0.1, hue).to_hex(),
        hue_family: family,
        step,
        token_id: format!("{family}-{step}"),
        hue,
        score: score(total),
    }
}

/// A mid-lightness candidate at `hue`, for hue-only tests.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn candidate_at(hue: f32, total: f64) -> ScoredCandidate {
    let mut c = candidate(HueFamily::Red, hue, 0.6, 500, total);
    c.token_id = format!("hue-{}", hue as u32);
    c
}
