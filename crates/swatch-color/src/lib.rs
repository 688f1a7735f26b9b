// SPDX-License-Identifier: MIT
//
// swatch-color — color-space primitives for the swatch workspace.
//
// OKLCH is the working space: catalog entries, brand colors and solver
// results are all `Color` values. This crate owns the conversions
// (hex ↔ sRGB ↔ linear sRGB ↔ Oklab ↔ OKLCH), the sRGB gamut boundary,
// and the WCAG contrast ratio. It is total: everything clamps rather than
// fails, except parsing a malformed hex string, which yields `None`.

pub mod color;
pub mod contrast;

pub use color::{Color, hue_distance, max_chroma, normalize_hex, normalize_hue};
pub use contrast::{contrast_ratio, relative_luminance};
