//! Harmony geometry — pure hue math for accent selection.
//!
//! Each harmony type maps a brand hue (0-360) to the hue(s) an accent
//! should sit near. Monochromatic and shades have no target hue: they vary
//! step and lightness around the brand hue instead.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Default tolerance (degrees) around a target hue.
pub const DEFAULT_HUE_RANGE: f32 = 30.0;

/// The geometric rule used to pick accent hues from a brand hue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HarmonyType {
    /// Opposite side of the wheel (+180).
    Complementary,
    /// 120-degree spacing (+120, +240).
    Triadic,
    /// Neighbors on both sides (-30, +30).
    Analogous,
    /// Both neighbors of the complement (+150, +210).
    SplitComplementary,
    /// Brand hue only; variety comes from lightness.
    Monochromatic,
    /// Steps of the brand's own hue family.
    Shades,
    /// One neighbor plus the complement (+30, +180).
    Compound,
    /// 90-degree spacing (+90, +180, +270).
    Square,
}

impl HarmonyType {
    /// Target hue(s) for this harmony, all in [0, 360).
    #[must_use]
    pub fn target_hues(self, brand_hue: f32) -> Vec<f32> {
        target_hues(brand_hue, self)
    }

    /// Whether the type picks accents along a hue direction (as opposed to
    /// varying lightness around the brand hue).
    #[must_use]
    pub fn is_directional(self) -> bool {
        !self.target_hues(0.0).is_empty()
    }

    /// Kebab-case name, matching the serde representation.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Complementary => "complementary",
            Self::Triadic => "triadic",
            Self::Analogous => "analogous",
            Self::SplitComplementary => "split-complementary",
            Self::Monochromatic => "monochromatic",
            Self::Shades => "shades",
            Self::Compound => "compound",
            Self::Square => "square",
        }
    }

    /// Parse a harmony type from its name (case-insensitive).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let lower = name.trim().to_lowercase();
        Self::all().iter().find(|t| t.name() == lower).copied()
    }

    /// All harmony types.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Complementary, Self::Triadic, Self::Analogous,
            Self::SplitComplementary, Self::Monochromatic, Self::Shades,
            Self::Compound, Self::Square,
        ]
    }
}

impl fmt::Display for HarmonyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What a candidate list is narrowed to: every harmony, or one of them.
///
/// `All` is only meaningful for filtering. Palette assembly takes a
/// concrete [`HarmonyType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HarmonySelection {
    All,
    Harmony(HarmonyType),
}

impl HarmonySelection {
    /// Parse `"all"` or a harmony type name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        if name.trim().eq_ignore_ascii_case("all") {
            Some(Self::All)
        } else {
            HarmonyType::from_name(name).map(Self::Harmony)
        }
    }

    /// The concrete type, if any.
    #[must_use]
    pub const fn harmony(self) -> Option<HarmonyType> {
        match self {
            Self::All => None,
            Self::Harmony(t) => Some(t),
        }
    }
}

impl From<HarmonyType> for HarmonySelection {
    fn from(t: HarmonyType) -> Self {
        Self::Harmony(t)
    }
}

impl fmt::Display for HarmonySelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Harmony(t) => t.fmt(f),
        }
    }
}

/// Normalize a hue to [0, 360).
fn norm(h: f32) -> f32 {
    swatch_color::normalize_hue(h)
}

/// Target hue(s) for `kind` around `brand_hue`.
#[must_use]
pub fn target_hues(brand_hue: f32, kind: HarmonyType) -> Vec<f32> {
    let h = brand_hue;
    match kind {
        HarmonyType::Complementary => vec![norm(h + 180.0)],
        HarmonyType::Triadic => vec![norm(h + 120.0), norm(h + 240.0)],
        HarmonyType::Analogous => vec![norm(h - 30.0), norm(h + 30.0)],
        HarmonyType::SplitComplementary => vec![norm(h + 150.0), norm(h + 210.0)],
        HarmonyType::Square => vec![norm(h + 90.0), norm(h + 180.0), norm(h + 270.0)],
        HarmonyType::Compound => vec![norm(h + 30.0), norm(h + 180.0)],
        HarmonyType::Monochromatic | HarmonyType::Shades => Vec::new(),
    }
}

/// Shortest angular distance between two hues, in [0, 180].
///
/// Symmetric, and zero exactly when the hues are equal mod 360.
#[must_use]
pub fn circular_distance(a: f32, b: f32) -> f32 {
    swatch_color::hue_distance(a, b)
}

/// Distance from `hue` to the nearest of `targets` (`f32::INFINITY` when
/// there are none).
#[must_use]
pub fn distance_to_nearest(hue: f32, targets: &[f32]) -> f32 {
    targets
        .iter()
        .map(|&t| circular_distance(hue, t))
        .fold(f32::INFINITY, f32::min)
}

/// Whether `hue` is within `range` degrees of ANY target.
#[must_use]
pub fn is_within_range(hue: f32, targets: &[f32], range: f32) -> bool {
    targets.iter().any(|&t| circular_distance(hue, t) <= range)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_distance_to_self_is_zero(h in -720.0f32..720.0) {
            prop_assert_eq!(circular_distance(h, h), 0.0);
        }

        #[test]
        fn prop_distance_symmetric_and_bounded(a in 0.0f32..360.0, b in 0.0f32..360.0) {
            let ab = circular_distance(a, b);
            prop_assert_eq!(ab, circular_distance(b, a));
            prop_assert!((0.0..=180.0).contains(&ab));
        }

        #[test]
        fn prop_targets_in_circle(h in -1000.0f32..1000.0) {
            for kind in HarmonyType::all() {
                for t in kind.target_hues(h) {
                    prop_assert!((0.0..360.0).contains(&t));
                }
            }
        }
    }
}
