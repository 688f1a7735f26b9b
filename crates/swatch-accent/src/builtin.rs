//! The built-in catalog, generated in OKLCH.
//!
//! Ten chromatic families of thirteen steps each, one gray family, and a
//! few semantic tokens. Every color is computed from fixed constants, so
//! the catalog is identical on every run.

use swatch_color::{Color, max_chroma};

use crate::catalog::{CatalogEntry, CatalogSource, Category, HueFamily};
use crate::error::Result;

/// Scale steps, lightest first.
pub const STEPS: [u16; 13] = [50, 100, 200, 300, 400, 500, 600, 700, 800, 900, 1000, 1100, 1200];

const LIGHTEST: f32 = 0.97;
const DARKEST: f32 = 0.22;
const CHROMA_CAP: f32 = 0.22;
/// Fraction of the gamut boundary a step may use.
const CHROMA_FILL: f32 = 0.9;

/// OKLCH hue each chromatic family is built on.
#[must_use]
pub const fn family_hue(family: HueFamily) -> Option<f32> {
    Some(match family {
        HueFamily::Red => 27.0,
        HueFamily::Orange => 55.0,
        HueFamily::Yellow => 95.0,
        HueFamily::Lime => 125.0,
        HueFamily::Green => 150.0,
        HueFamily::Cyan => 200.0,
        HueFamily::LightBlue => 235.0,
        HueFamily::Blue => 262.0,
        HueFamily::Purple => 300.0,
        HueFamily::Magenta => 340.0,
        HueFamily::Gray => return None,
    })
}

/// Lightness of the `index`-th step.
#[allow(clippy::cast_precision_loss)]
fn step_lightness(index: usize) -> f32 {
    let span = LIGHTEST - DARKEST;
    LIGHTEST - index as f32 * span / (STEPS.len() - 1) as f32
}

fn entry(family: HueFamily, step: u16, color: Color, category: Category) -> CatalogEntry {
    CatalogEntry {
        id: format!("{family}-{step}"),
        hex: color.to_hex(),
        hue_family: family,
        step,
        category,
    }
}

/// Generate the full built-in catalog.
#[must_use]
pub fn builtin_entries() -> Vec<CatalogEntry> {
    let mut out = Vec::with_capacity((HueFamily::CHROMATIC.len() + 1) * STEPS.len() + 3);

    for family in HueFamily::CHROMATIC {
        let Some(hue) = family_hue(family) else { continue };
        for (i, &step) in STEPS.iter().enumerate() {
            let l = step_lightness(i);
            let c = (max_chroma(l, hue) * CHROMA_FILL).min(CHROMA_CAP);
            out.push(entry(family, step, Color::clamped(l, c, hue), Category::Chromatic));
        }
    }

    for (i, &step) in STEPS.iter().enumerate() {
        let color = Color::oklch(step_lightness(i), 0.0, 0.0);
        out.push(entry(HueFamily::Gray, step, color, Category::Neutral));
    }

    for (id, family, step) in [
        ("success", HueFamily::Green, 700),
        ("error", HueFamily::Red, 600),
        ("warning", HueFamily::Orange, 500),
    ] {
        let index = STEPS.iter().position(|&s| s == step).unwrap_or(0);
        let hue = family_hue(family).unwrap_or(0.0);
        let l = step_lightness(index);
        let c = (max_chroma(l, hue) * CHROMA_FILL).min(CHROMA_CAP);
        out.push(CatalogEntry {
            id: id.to_owned(),
            ..entry(family, step, Color::clamped(l, c, hue), Category::Semantic)
        });
    }

    out
}

/// [`CatalogSource`] for [`builtin_entries`].
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinCatalog;

impl CatalogSource for BuiltinCatalog {
    fn load(&self) -> Result<Vec<CatalogEntry>> {
        Ok(builtin_entries())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use swatch_color::hue_distance;

    #[test]
    fn sizes() {
        let entries = builtin_entries();
        let chromatic = entries.iter().filter(|e| e.category == Category::Chromatic).count();
        let neutral = entries.iter().filter(|e| e.category == Category::Neutral).count();
        let semantic = entries.iter().filter(|e| e.category == Category::Semantic).count();
        assert_eq!(chromatic, 130);
        assert_eq!(neutral, 13);
        assert_eq!(semantic, 3);
    }

    #[test]
    fn deterministic() {
        assert_eq!(builtin_entries(), builtin_entries());
    }

    #[test]
    fn ids_are_unique_and_hexes_parse() {
        let entries = builtin_entries();
        let mut ids: Vec<_> = entries.iter().map(|e| e.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), entries.len());
        assert!(entries.iter().all(|e| e.color().is_some()));
    }

    #[test]
    fn steps_darken() {
        let entries = builtin_entries();
        for family in HueFamily::CHROMATIC {
            let ls: Vec<f32> = entries
                .iter()
                .filter(|e| e.hue_family == family && e.is_chromatic())
                .map(|e| e.color().unwrap().l)
                .collect();
            assert_eq!(ls.len(), STEPS.len());
            for pair in ls.windows(2) {
                assert!(pair[0] > pair[1], "{family} does not darken: {ls:?}");
            }
        }
    }

    #[test]
    fn mid_steps_keep_family_hue() {
        let entries = builtin_entries();
        for family in HueFamily::CHROMATIC {
            let mid = entries
                .iter()
                .find(|e| e.hue_family == family && e.step == 600 && e.is_chromatic())
                .unwrap();
            let hue = family_hue(family).unwrap();
            let got = mid.color().unwrap().h;
            // 8-bit rounding can drift the hue a little.
            assert!(hue_distance(got, hue) < 6.0, "{family}: {got} vs {hue}");
        }
    }

    #[test]
    fn gray_has_no_hue() {
        assert_eq!(family_hue(HueFamily::Gray), None);
    }
}
