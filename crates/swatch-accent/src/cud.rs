//! Color Universal Design (CUD v4) reference palette.
//!
//! Twenty colors chosen to stay distinguishable under the common color
//! vision deficiencies: nine accents, seven pale base colors and four
//! achromatics. The scorer rewards catalog colors that sit close to one of
//! them.

use std::sync::OnceLock;

use swatch_color::Color;

/// One reference color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CudColor {
    pub id: &'static str,
    pub hex: &'static str,
}

const fn cud(id: &'static str, hex: &'static str) -> CudColor {
    CudColor { id, hex }
}

/// The CUD v4 recommended set.
pub const CUD_REFERENCE: [CudColor; 20] = [
    // Accent colors
    cud("red", "#ff2800"),
    cud("yellow", "#faf500"),
    cud("green", "#35a16b"),
    cud("blue", "#0041ff"),
    cud("sky-blue", "#66ccff"),
    cud("pink", "#ff99a0"),
    cud("orange", "#ff9900"),
    cud("purple", "#9a0079"),
    cud("brown", "#663300"),
    // Base colors
    cud("light-pink", "#ffd1d1"),
    cud("cream", "#ffff99"),
    cud("light-yellow-green", "#cbf266"),
    cud("light-sky-blue", "#b4ebfa"),
    cud("beige", "#edc58f"),
    cud("light-green", "#87e7b0"),
    cud("light-purple", "#c7b2de"),
    // Achromatic colors
    cud("white", "#ffffff"),
    cud("light-gray", "#c8c8cb"),
    cud("gray", "#7f878f"),
    cud("black", "#000000"),
];

static PARSED: OnceLock<[Color; 20]> = OnceLock::new();

fn parsed() -> &'static [Color; 20] {
    PARSED.get_or_init(|| CUD_REFERENCE.map(|c| Color::hex(c.hex).unwrap_or_default()))
}

/// The reference color closest to a candidate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CudMatch {
    pub reference: &'static CudColor,
    /// Oklab Delta E to `reference`.
    pub distance: f32,
}

/// Find the nearest CUD reference color (first wins on ties).
#[must_use]
pub fn nearest_cud(color: Color) -> CudMatch {
    let (index, distance) = parsed()
        .iter()
        .map(|r| color.distance(r))
        .enumerate()
        .fold((0, f32::INFINITY), |best, (i, d)| if d < best.1 { (i, d) } else { best });

    CudMatch {
        reference: &CUD_REFERENCE[index],
        distance,
    }
}
