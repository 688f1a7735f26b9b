//! Tone scales pinned to exact contrast ratios.
//!
//! A scale is described by a handful of ordered key colors (light to dark,
//! or the reverse) and a list of target ratios against one background. The
//! keys are joined by a smooth curve; each target ratio picks a point on
//! the curve, and the contrast solver then nudges that point onto the exact
//! ratio.

use swatch_color::{Color, contrast_ratio};
use tracing::debug;

use crate::solver::{SolverOptions, solve_contrast_with};

// ---------------------------------------------------------------------------
// ToneScale
// ---------------------------------------------------------------------------

/// One entry of a built scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneStep {
    /// Requested contrast against the scale background.
    pub target_ratio: f64,
    /// Final color for this step.
    pub color: Color,
    /// Contrast `color` actually achieves.
    pub ratio: f64,
    /// Whether the solver's correction was kept. `false` means the
    /// interpolated color was already the better answer.
    pub corrected: bool,
}

/// A scale with one step per requested ratio, in request order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToneScale {
    pub steps: Vec<ToneStep>,
}

impl ToneScale {
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Colors in step order.
    #[must_use]
    pub fn colors(&self) -> Vec<Color> {
        self.steps.iter().map(|s| s.color).collect()
    }

    /// Hex strings in step order.
    #[must_use]
    pub fn hexes(&self) -> Vec<String> {
        self.steps.iter().map(|s| s.color.to_hex()).collect()
    }
}

// ---------------------------------------------------------------------------
// Building
// ---------------------------------------------------------------------------

/// Build a scale with default solver options.
#[must_use]
pub fn build_tone_scale(keys: &[Color], ratios: &[f64], background: Color) -> ToneScale {
    build_tone_scale_with(keys, ratios, background, SolverOptions::default())
}

/// Build a scale: interpolate, then correct every point to its exact ratio.
///
/// Each ratio maps to a curve position `t` by inverse-lerp against the
/// first and last key's own contrast (clamped to [0, 1]). No step is ever
/// dropped: if the solver's answer is unusable the interpolated color is
/// kept instead.
#[must_use]
pub fn build_tone_scale_with(
    keys: &[Color],
    ratios: &[f64],
    background: Color,
    options: SolverOptions,
) -> ToneScale {
    let Some((first, last)) = keys.first().zip(keys.last()) else {
        return ToneScale::default();
    };

    let first_ratio = contrast_ratio(*first, background);
    let last_ratio = contrast_ratio(*last, background);
    let curve = Spline::new(keys);

    let steps = ratios
        .iter()
        .map(|&target| {
            let t = inverse_lerp(first_ratio, last_ratio, target);
            let interpolated = curve.at(t);
            correct(interpolated, background, target, options)
        })
        .collect();

    ToneScale { steps }
}

fn correct(interpolated: Color, background: Color, target: f64, options: SolverOptions) -> ToneStep {
    let before = contrast_ratio(interpolated, background);
    let report = solve_contrast_with(interpolated, background, target, options);

    let usable = report.ratio.is_finite()
        && report.color.l.is_finite()
        && (report.ratio - target).abs() <= (before - target).abs();

    if usable {
        ToneStep {
            target_ratio: target,
            color: report.color,
            ratio: report.ratio,
            corrected: true,
        }
    } else {
        debug!(target, before, after = report.ratio, "keeping interpolated tone");
        ToneStep {
            target_ratio: target,
            color: interpolated,
            ratio: before,
            corrected: false,
        }
    }
}

/// Position of `value` between `a` and `b`, clamped to [0, 1].
/// Coincident endpoints map everything to 0.
fn inverse_lerp(a: f64, b: f64, value: f64) -> f32 {
    let span = b - a;
    if span.abs() < f64::EPSILON || !value.is_finite() {
        return 0.0;
    }
    #[allow(clippy::cast_possible_truncation)]
    let t = ((value - a) / span).clamp(0.0, 1.0) as f32;
    t
}

// ---------------------------------------------------------------------------
// Spline — uniform Catmull-Rom through the keys, in Oklab
// ---------------------------------------------------------------------------

struct Spline {
    points: Vec<[f32; 3]>,
}

impl Spline {
    fn new(keys: &[Color]) -> Self {
        let points = keys
            .iter()
            .map(|k| {
                let (l, a, b) = k.to_oklab();
                [l, a, b]
            })
            .collect();
        Self { points }
    }

    /// Evaluate at `t` ∈ [0, 1]. Passes through every key.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn at(&self, t: f32) -> Color {
        let n = self.points.len();
        if n == 1 {
            let [l, a, b] = self.points[0];
            return Color::from_oklab(l, a, b).to_gamut();
        }

        let segments = (n - 1) as f32;
        let pos = t.clamp(0.0, 1.0) * segments;
        let i = (pos.floor() as usize).min(n - 2);
        let u = pos - i as f32;

        let p0 = self.points[i.saturating_sub(1)];
        let p1 = self.points[i];
        let p2 = self.points[i + 1];
        let p3 = self.points[(i + 2).min(n - 1)];

        let out: [f32; 3] = std::array::from_fn(|k| catmull_rom(p0[k], p1[k], p2[k], p3[k], u));

        let color = Color::from_oklab(out[0], out[1], out[2]);
        Color::clamped(color.l, color.c, color.h)
    }
}

fn catmull_rom(p0: f32, p1: f32, p2: f32, p3: f32, u: f32) -> f32 {
    let u2 = u * u;
    let u3 = u2 * u;
    0.5 * (2.0 * p1
        + (p2 - p0) * u
        + (2.0f32.mul_add(p0, -5.0 * p1) + 4.0f32.mul_add(p2, -p3)) * u2
        + (3.0f32.mul_add(p1, -p0) + (-3.0f32).mul_add(p2, p3)) * u3)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
