//! Exact-ratio contrast solving.
//!
//! [`solve_contrast`] moves a seed color along the OKLCH lightness axis
//! until its WCAG contrast against a background matches a target ratio.
//! Hue is preserved; chroma follows the gamut boundary where needed.
//!
//! Two search paths:
//!
//! - **General hues.** Contrast is monotonic in lightness on each side of
//!   the background, so the solver bisects `[0, bgL]` and `[bgL, 1]`
//!   independently and picks a branch afterwards.
//! - **Chroma-constrained hues** (yellows, [`WARM_HUES`]). Their gamut
//!   collapses at low lightness, so bisecting at the seed's chroma yields
//!   muddy olive. Instead the solver bisects *tone* and re-derives chroma
//!   from the gamut boundary at every trial tone.
//!
//! The solver never fails. An unreachable ratio resolves to the closest
//! achievable color; callers that need to know can ask for a
//! [`SolveReport`].

use std::ops::RangeInclusive;

use swatch_color::{Color, contrast_ratio, max_chroma};
use tracing::{debug, trace, warn};

/// Hues (OKLCH degrees) whose achievable chroma collapses toward the dark
/// end of the lightness axis.
pub const WARM_HUES: RangeInclusive<f32> = 70.0..=110.0;

/// Seeds below this chroma are treated as neutral regardless of hue.
const WARM_MIN_CHROMA: f32 = 0.03;

/// Share of the gamut-boundary chroma used at each warm trial tone.
const BOUNDARY_CHROMA_SHARE: f32 = 0.95;

/// Lowest tone that still reads as a vivid warm color.
const WARM_PREFERRED_MIN_TONE: f32 = 0.55;

/// Lowest tone the warm path will ever reach for.
const WARM_TONE_FLOOR: f32 = 0.25;

/// Tones probed when looking for the hue's chroma peak.
const VIVID_PROBES: [f32; 10] = [0.50, 0.55, 0.60, 0.65, 0.70, 0.75, 0.80, 0.85, 0.90, 0.95];

// ---------------------------------------------------------------------------
// Options and report
// ---------------------------------------------------------------------------

/// Tuning for [`solve_contrast_with`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverOptions {
    /// Acceptable `|achieved − target|`.
    pub tolerance: f64,
    /// Bisection steps per branch.
    pub iterations: u32,
}

impl Default for SolverOptions {
    fn default() -> Self {
        Self {
            tolerance: 0.01,
            iterations: 20,
        }
    }
}

/// What the solver produced, with the ratio it actually achieved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolveReport {
    pub color: Color,
    pub ratio: f64,
    /// Whether `ratio` is within tolerance of the clamped target.
    pub converged: bool,
}

// ---------------------------------------------------------------------------
// Public entry points
// ---------------------------------------------------------------------------

/// Adjust `seed` so its contrast against `background` equals `target_ratio`
/// (within `tolerance`). Always returns a displayable color.
#[must_use]
pub fn solve_contrast(seed: Color, background: Color, target_ratio: f64, tolerance: f64) -> Color {
    let options = SolverOptions {
        tolerance,
        ..SolverOptions::default()
    };
    solve_contrast_with(seed, background, target_ratio, options).color
}

/// [`solve_contrast`] with explicit options, reporting the achieved ratio.
#[must_use]
pub fn solve_contrast_with(
    seed: Color,
    background: Color,
    target_ratio: f64,
    options: SolverOptions,
) -> SolveReport {
    let target = if target_ratio.is_finite() {
        target_ratio.clamp(1.0, 21.0)
    } else {
        1.0
    };
    let tolerance = options.tolerance.abs();
    let seed = seed.to_gamut();

    let best = if is_chroma_constrained(seed) {
        let warm = solve_warm(seed, background, target, options);
        if warm.distance <= tolerance {
            warm
        } else {
            let general = solve_general(seed, background, target, options);
            debug!(
                warm = warm.ratio,
                general = general.ratio,
                target,
                "warm tone search missed, comparing with lightness search"
            );
            if general.distance < warm.distance { general } else { warm }
        }
    } else {
        solve_general(seed, background, target, options)
    };

    let converged = best.distance <= tolerance;
    if !converged {
        warn!(
            seed = %seed,
            background = %background,
            target,
            achieved = best.ratio,
            "contrast target not reachable, returning closest color"
        );
    }

    SolveReport {
        color: best.color,
        ratio: best.ratio,
        converged,
    }
}

/// Whether `color` falls in the hue band that needs the tone search.
#[must_use]
pub fn is_chroma_constrained(color: Color) -> bool {
    color.c >= WARM_MIN_CHROMA && WARM_HUES.contains(&color.h)
}

// ---------------------------------------------------------------------------
// Search internals
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
struct Trial {
    color: Color,
    ratio: f64,
    distance: f64,
}

impl Trial {
    fn new(color: Color, background: Color, target: f64) -> Self {
        let ratio = contrast_ratio(color, background);
        Self {
            color,
            ratio,
            distance: (ratio - target).abs(),
        }
    }

    fn closer(self, other: Self) -> Self {
        if other.distance < self.distance { other } else { self }
    }
}

/// Bisect lightness in `[lo, hi]`.
///
/// `rising` says whether contrast grows with lightness on this side of the
/// background. `far` is the end of the interval away from the background;
/// it is evaluated up front because bisection never lands exactly on it.
#[allow(clippy::too_many_arguments)]
fn bisect(
    mut lo: f32,
    mut hi: f32,
    rising: bool,
    make: &impl Fn(f32) -> Color,
    background: Color,
    target: f64,
    iterations: u32,
) -> Trial {
    let far = if rising { hi } else { lo };
    let mut best = Trial::new(make(far), background, target);

    for _ in 0..iterations {
        let mid = (lo + hi) * 0.5;
        let trial = Trial::new(make(mid), background, target);
        best = best.closer(trial);

        if (trial.ratio > target) == rising {
            hi = mid;
        } else {
            lo = mid;
        }
    }

    best
}

/// Pick between the darker and lighter branch.
///
/// Both converged: the one whose lightness is closer to `anchor`. One
/// converged: that one. Neither: whichever is numerically closer.
fn choose(darker: Trial, lighter: Trial, anchor: f32, tolerance: f64) -> Trial {
    let band = 2.0 * tolerance;
    match (darker.distance <= band, lighter.distance <= band) {
        (true, true) => {
            if (darker.color.l - anchor).abs() <= (lighter.color.l - anchor).abs() {
                darker
            } else {
                lighter
            }
        }
        (true, false) => darker,
        (false, true) => lighter,
        (false, false) => darker.closer(lighter),
    }
}

fn solve_general(seed: Color, background: Color, target: f64, options: SolverOptions) -> Trial {
    let bg_l = background.l.clamp(0.0, 1.0);
    let make = |l: f32| Color::clamped(l, seed.c, seed.h);

    let darker = bisect(0.0, bg_l, false, &make, background, target, options.iterations);
    let lighter = bisect(bg_l, 1.0, true, &make, background, target, options.iterations);
    trace!(darker = darker.ratio, lighter = lighter.ratio, target, "lightness branches");

    choose(darker, lighter, seed.l, options.tolerance)
}

/// Tone at which the hue reaches its widest in-gamut chroma.
fn vivid_tone(h: f32) -> f32 {
    VIVID_PROBES
        .iter()
        .copied()
        .fold((VIVID_PROBES[0], f32::MIN), |(best_t, best_c), t| {
            let c = max_chroma(t, h);
            if c > best_c { (t, c) } else { (best_t, best_c) }
        })
        .0
}

fn solve_warm(seed: Color, background: Color, target: f64, options: SolverOptions) -> Trial {
    let h = seed.h;
    let bg_l = background.l.clamp(0.0, 1.0);
    let make = |t: f32| Color::clamped(t, BOUNDARY_CHROMA_SHARE * max_chroma(t, h), h);
    let vivid = vivid_tone(h);

    let bg_is_light =
        contrast_ratio(background, Color::BLACK) >= contrast_ratio(background, Color::WHITE);

    let lighter = bisect(bg_l, 1.0, true, &make, background, target, options.iterations);
    let darker = if bg_is_light {
        darker_warm(&make, bg_l, background, target, options)
    } else {
        bisect(0.0, bg_l, false, &make, background, target, options.iterations)
    };
    debug!(vivid, darker = darker.ratio, lighter = lighter.ratio, target, "warm tone branches");

    choose(darker, lighter, vivid, options.tolerance)
}

/// Darker-than-background search for warm hues on light backgrounds.
///
/// Within the vivid range (down to the preferred minimum tone) this is a
/// plain bisection. Past it, tone is interpolated toward the floor by how
/// far beyond reach the target is, then refined.
fn darker_warm(
    make: &impl Fn(f32) -> Color,
    bg_l: f32,
    background: Color,
    target: f64,
    options: SolverOptions,
) -> Trial {
    let preferred_min = WARM_PREFERRED_MIN_TONE.min(bg_l);
    let floor = WARM_TONE_FLOOR.min(preferred_min);
    let reach = contrast_ratio(make(preferred_min), background);

    if target <= reach {
        return bisect(preferred_min, bg_l, false, make, background, target, options.iterations);
    }

    let floor_ratio = contrast_ratio(make(floor), background);
    let remaining = floor_ratio - reach;
    let excess = if remaining > f64::EPSILON {
        ((target - reach) / remaining).clamp(0.0, 1.0)
    } else {
        1.0
    };
    #[allow(clippy::cast_possible_truncation)]
    let tone = (floor - preferred_min).mul_add(excess as f32, preferred_min);
    let interpolated = Trial::new(make(tone), background, target);
    trace!(tone, excess, achieved = interpolated.ratio, "warm tone interpolated past vivid range");

    if interpolated.distance <= options.tolerance {
        return interpolated;
    }
    let refined = bisect(floor, preferred_min, false, make, background, target, options.iterations);
    interpolated.closer(refined)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_gray_hits_any_reachable_target(
            seed_l in 0.0f32..=1.0,
            bg_l in 0.0f32..=1.0,
            t in 0.0f64..=1.0,
        ) {
            let bg = Color::oklch(bg_l, 0.0, 0.0);
            let reach = contrast_ratio(Color::BLACK, bg).max(contrast_ratio(Color::WHITE, bg));
            let target = (reach - 1.0).mul_add(t * 0.98, 1.0);
            let out = solve_contrast(Color::oklch(seed_l, 0.0, 0.0), bg, target, 0.01);
            let ratio = contrast_ratio(out, bg);
            prop_assert!((ratio - target).abs() <= 0.01, "target {target} got {ratio}");
        }

        #[test]
        fn prop_chromatic_seed_hits_reachable_target(
            rgb in any::<(u8, u8, u8)>(),
            dark_bg in any::<bool>(),
            t in 0.0f64..=1.0,
        ) {
            // Against black or white the lightness axis spans the whole
            // ratio range, whatever the seed's hue.
            let bg = if dark_bg { Color::BLACK } else { Color::WHITE };
            let target = 19.5f64.mul_add(t, 1.05);
            let seed = Color::rgb8(rgb.0, rgb.1, rgb.2);
            let report = solve_contrast_with(seed, bg, target, SolverOptions::default());
            prop_assert!(report.converged, "{seed} on {bg}: target {target} got {}", report.ratio);
        }

        #[test]
        fn prop_always_displayable(
            rgb in any::<(u8, u8, u8)>(),
            bg in any::<(u8, u8, u8)>(),
            target in 1.0f64..=21.0,
        ) {
            let seed = Color::rgb8(rgb.0, rgb.1, rgb.2);
            let bg = Color::rgb8(bg.0, bg.1, bg.2);
            let report = solve_contrast_with(seed, bg, target, SolverOptions::default());
            prop_assert!(report.color.in_srgb_gamut());
            prop_assert!(report.ratio.is_finite());
            prop_assert!((1.0..=21.0).contains(&report.ratio));
        }
    }
}
