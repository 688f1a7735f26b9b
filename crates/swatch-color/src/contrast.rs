// SPDX-License-Identifier: MIT
//
// WCAG 2.x luminance contrast.
//
// Ratios are computed in f64 from the clipped sRGB channels of a color, so
// an out-of-gamut value is measured the way it will actually display.

use crate::color::{Color, srgb_decode};

/// A color against itself.
pub const MIN_RATIO: f64 = 1.0;

/// Black against white.
pub const MAX_RATIO: f64 = 21.0;

/// Rec. 709 channel weights.
const LUMA: [f64; 3] = [0.2126, 0.7152, 0.0722];

/// Flare term added to both luminances.
const FLARE: f64 = 0.05;

/// WCAG relative luminance, 0 for black and 1 for white.
#[must_use]
pub fn relative_luminance(color: Color) -> f64 {
    let (r, g, b) = color.to_srgb();
    [r, g, b]
        .into_iter()
        .map(|v| f64::from(srgb_decode(v)))
        .zip(LUMA)
        .map(|(v, w)| v * w)
        .sum()
}

/// `(lighter + 0.05) / (darker + 0.05)`, in [`MIN_RATIO`, `MAX_RATIO`].
/// Argument order does not matter.
#[must_use]
pub fn contrast_ratio(a: Color, b: Color) -> f64 {
    let (ya, yb) = (relative_luminance(a), relative_luminance(b));
    let ratio = (ya.max(yb) + FLARE) / (ya.min(yb) + FLARE);
    ratio.clamp(MIN_RATIO, MAX_RATIO)
}

impl Color {
    #[inline]
    #[must_use]
    pub fn contrast_ratio(self, other: Self) -> f64 {
        contrast_ratio(self, other)
    }
}
