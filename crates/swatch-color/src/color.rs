// SPDX-License-Identifier: MIT
//
// OKLCH color values and the conversions behind them.
//
// A `Color` is always OKLCH. sRGB exists only at the edges of the
// workspace: a catalog or brand hex comes in, a result hex goes out, and
// WCAG luminance is measured on the way. Everything in between (lightness
// bisection, hue geometry, scale interpolation, Delta E) works on the
// perceptual coordinates.
//
//   #rrggbb ─ decode ─▶ linear sRGB ─ M1, cbrt, M2 ─▶ Oklab ─ polar ─▶ OKLCH
//
// The inverse runs the same chain backwards with the inverse matrices and
// a cube instead of a cube root. Matrices are Björn Ottosson's.

// l/c/h, r/g/b and a/b are the names the formulas use.
#![allow(clippy::many_single_char_names)]

use std::fmt;

type Vec3 = [f32; 3];

// ─── Color ───────────────────────────────────────────────────────────────────

/// An opaque color in OKLCH.
///
/// Equal steps in `l` look like equal steps in lightness, and `h` does not
/// drift when chroma changes. The solver leans on the first property, the
/// harmony math on the second.
///
/// ```
/// use swatch_color::Color;
///
/// let brand = Color::hex("#0056ff").unwrap();
/// assert_eq!(brand.to_hex(), "#0056ff");
/// assert!(brand.in_srgb_gamut());
/// ```
#[derive(Clone, Copy)]
pub struct Color {
    /// Perceptual lightness, 0 (black) to 1 (white).
    pub l: f32,
    /// Chroma, 0 for grays. sRGB tops out around 0.32.
    pub c: f32,
    /// Hue angle in degrees, [0, 360).
    pub h: f32,
}

impl Color {
    pub const BLACK: Self = Self::oklch(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::oklch(1.0, 0.0, 0.0);

    /// Raw OKLCH, taken as given. May be out of gamut.
    #[inline]
    #[must_use]
    pub const fn oklch(l: f32, c: f32, h: f32) -> Self {
        Self { l, c, h }
    }

    /// OKLCH made displayable: lightness clamped, hue wrapped, chroma cut
    /// back to the sRGB boundary.
    #[must_use]
    pub fn clamped(l: f32, c: f32, h: f32) -> Self {
        Self::oklch(l.clamp(0.0, 1.0), c.max(0.0), normalize_hue(h)).to_gamut()
    }

    /// From gamma-encoded sRGB channels in [0, 1].
    #[must_use]
    pub fn srgb(r: f32, g: f32, b: f32) -> Self {
        let lab = linear_to_oklab([r, g, b].map(srgb_decode));
        Self::from_oklab(lab[0], lab[1], lab[2])
    }

    #[must_use]
    pub fn rgb8(r: u8, g: u8, b: u8) -> Self {
        let [r, g, b] = [r, g, b].map(|v| f32::from(v) / 255.0);
        Self::srgb(r, g, b)
    }

    /// Parse `#rgb` / `#rrggbb` (the `#` is optional, case is ignored).
    #[must_use]
    pub fn hex(s: &str) -> Option<Self> {
        let [r, g, b] = parse_hex_channels(s)?;
        Some(Self::rgb8(r, g, b))
    }

    #[must_use]
    pub fn from_oklab(l: f32, a: f32, b: f32) -> Self {
        let c = a.hypot(b);
        // Below this the angle is noise.
        let h = if c < 1e-8 { 0.0 } else { normalize_hue(b.atan2(a).to_degrees()) };
        Self { l, c, h }
    }

    #[inline]
    #[must_use]
    pub fn is_achromatic(self) -> bool {
        self.c.abs() < 1e-5
    }

    #[must_use]
    pub fn to_oklab(self) -> (f32, f32, f32) {
        let (sin, cos) = self.h.to_radians().sin_cos();
        (self.l, self.c * cos, self.c * sin)
    }

    /// Euclidean distance in Oklab (Delta E OK). About 0.02 is the
    /// threshold of a visible difference.
    #[must_use]
    pub fn distance(self, other: &Self) -> f32 {
        let (l1, a1, b1) = self.to_oklab();
        let (l2, a2, b2) = other.to_oklab();
        let d = [l1 - l2, a1 - a2, b1 - b2];
        d.iter().map(|x| x * x).sum::<f32>().sqrt()
    }

    /// Linear sRGB, unclamped.
    fn to_linear(self) -> Vec3 {
        let (l, a, b) = self.to_oklab();
        oklab_to_linear([l, a, b])
    }

    /// Gamma-encoded sRGB with each channel clipped to [0, 1].
    #[must_use]
    pub fn to_srgb(self) -> (f32, f32, f32) {
        let [r, g, b] = self.to_linear().map(|v| srgb_encode(v).clamp(0.0, 1.0));
        (r, g, b)
    }

    #[must_use]
    pub fn to_rgb8(self) -> (u8, u8, u8) {
        let (r, g, b) = self.to_srgb();
        (channel_u8(r), channel_u8(g), channel_u8(b))
    }

    /// Lowercase `#rrggbb`.
    #[must_use]
    pub fn to_hex(self) -> String {
        let (r, g, b) = self.to_rgb8();
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    /// Whether every linear channel lies in [0, 1] (with a little slack
    /// for float error).
    #[must_use]
    pub fn in_srgb_gamut(self) -> bool {
        const SLACK: f32 = 1e-4;
        self.to_linear().iter().all(|v| (-SLACK..=1.0 + SLACK).contains(v))
    }

    /// Clamp lightness, then cap chroma at the first sRGB boundary out from
    /// gray. Hue is left alone.
    ///
    /// Some blues leave the gamut and re-enter it at higher chroma; a color
    /// in that outer band is still pulled back to the inner boundary, so the
    /// result moves continuously with lightness.
    #[must_use]
    pub fn to_gamut(self) -> Self {
        let l = self.l.clamp(0.0, 1.0);
        let c = first_boundary(self.c, |c| Self::oklch(l, c, self.h).in_srgb_gamut());
        Self::oklch(l, c, self.h)
    }
}

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "oklch({:.4} {:.4} {:.1})", self.l, self.c, self.h)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Approximate: coordinates within 1e-5, hue ignored for grays.
impl PartialEq for Color {
    fn eq(&self, other: &Self) -> bool {
        const EPS: f32 = 1e-5;
        let hue_matches = self.is_achromatic() || other.is_achromatic() || hue_distance(self.h, other.h) < EPS;
        (self.l - other.l).abs() < EPS && (self.c - other.c).abs() < EPS && hue_matches
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

// ─── Gamut Boundary ──────────────────────────────────────────────────────────

/// No sRGB color has more chroma than this.
const CHROMA_CEILING: f32 = 0.4;

/// Coarse scan width for [`first_boundary`].
const SCAN_STEP: f32 = 0.004;

/// Chroma at which `fits` first turns false walking out from 0, capped at
/// `limit`.
///
/// The gamut is not convex along a constant-hue ray, so a plain bisection
/// over `[0, limit]` can land in an outer in-gamut band. Scanning in
/// [`SCAN_STEP`] strides finds the first failing stride, then bisection
/// narrows it down.
fn first_boundary(limit: f32, fits: impl Fn(f32) -> bool) -> f32 {
    let limit = limit.max(0.0);
    let mut lo = 0.0f32;
    while lo < limit {
        let hi = (lo + SCAN_STEP).min(limit);
        if !fits(hi) {
            return bisect_boundary(lo, hi, &fits);
        }
        lo = hi;
    }
    limit
}

/// Narrow `[lo, hi]`, where `fits(lo)` holds and `fits(hi)` does not.
fn bisect_boundary(mut lo: f32, mut hi: f32, fits: &impl Fn(f32) -> bool) -> f32 {
    for _ in 0..14 {
        let mid = 0.5 * (lo + hi);
        if fits(mid) { lo = mid } else { hi = mid }
    }
    lo
}

/// Highest chroma that is still displayable at lightness `l` and hue `h`,
/// measured to the first boundary out from gray.
///
/// Collapses to zero at both ends of the lightness axis; for yellows the
/// dark side collapses much sooner.
#[must_use]
pub fn max_chroma(l: f32, h: f32) -> f32 {
    let (l, h) = (l.clamp(0.0, 1.0), normalize_hue(h));
    first_boundary(CHROMA_CEILING, |c| Color::oklch(l, c, h).in_srgb_gamut())
}

// ─── Hex ─────────────────────────────────────────────────────────────────────

// Every channel is masked to 0..=255 before the cast.
#[allow(clippy::cast_possible_truncation)]
fn parse_hex_channels(s: &str) -> Option<[u8; 3]> {
    let digits = s.strip_prefix('#').unwrap_or(s);
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let value = u32::from_str_radix(digits, 16).ok()?;
    let channels = match digits.len() {
        3 => [value >> 8, value >> 4, value].map(|n| (n & 0xf) * 0x11),
        6 => [value >> 16, value >> 8, value].map(|n| n & 0xff),
        _ => return None,
    };
    Some(channels.map(|n| n as u8))
}

/// Canonical lowercase `#rrggbb` for user input.
///
/// Accepts 3 or 6 hex digits, `#` optional, any case, surrounding
/// whitespace ignored.
#[must_use]
pub fn normalize_hex(s: &str) -> Option<String> {
    let [r, g, b] = parse_hex_channels(s.trim())?;
    Some(format!("#{r:02x}{g:02x}{b:02x}"))
}

// ─── Hue ─────────────────────────────────────────────────────────────────────

/// Wrap a hue into [0, 360).
#[inline]
#[must_use]
pub fn normalize_hue(h: f32) -> f32 {
    let wrapped = h.rem_euclid(360.0);
    // Tiny negative inputs round up to exactly 360.0 in f32.
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Shortest arc between two hues, in [0, 180].
#[inline]
#[must_use]
pub fn hue_distance(a: f32, b: f32) -> f32 {
    let d = (a - b).abs() % 360.0;
    d.min(360.0 - d)
}

// ─── Transfer Functions & Matrices ───────────────────────────────────────────

/// sRGB gamma decode of one channel.
#[inline]
#[must_use]
pub fn srgb_decode(v: f32) -> f32 {
    if v <= 0.040_45 { v / 12.92 } else { ((v + 0.055) / 1.055).powf(2.4) }
}

/// sRGB gamma encode of one linear channel.
#[inline]
#[must_use]
pub fn srgb_encode(v: f32) -> f32 {
    if v <= 0.003_130_8 { 12.92 * v } else { v.powf(1.0 / 2.4).mul_add(1.055, -0.055) }
}

const LINEAR_TO_LMS: [Vec3; 3] = [
    [0.412_221_47, 0.536_332_55, 0.051_445_995],
    [0.211_903_5, 0.680_699_5, 0.107_396_96],
    [0.088_302_46, 0.281_718_84, 0.629_978_7],
];

const LMS_TO_OKLAB: [Vec3; 3] = [
    [0.210_454_26, 0.793_617_8, -0.004_072_047],
    [1.977_998_5, -2.428_592_2, 0.450_593_7],
    [0.025_904_037, 0.782_771_77, -0.808_675_77],
];

const OKLAB_TO_LMS: [Vec3; 3] = [
    [1.0, 0.396_337_78, 0.215_803_76],
    [1.0, -0.105_561_346, -0.063_854_17],
    [1.0, -0.089_484_18, -1.291_485_5],
];

const LMS_TO_LINEAR: [Vec3; 3] = [
    [4.076_741_7, -3.307_711_6, 0.230_969_94],
    [-1.268_438, 2.609_757_4, -0.341_319_38],
    [-0.004_196_086_3, -0.703_418_6, 1.707_614_7],
];

#[inline]
fn transform(m: [Vec3; 3], v: Vec3) -> Vec3 {
    m.map(|row| row[2].mul_add(v[2], row[1].mul_add(v[1], row[0] * v[0])))
}

fn linear_to_oklab(rgb: Vec3) -> Vec3 {
    transform(LMS_TO_OKLAB, transform(LINEAR_TO_LMS, rgb).map(f32::cbrt))
}

fn oklab_to_linear(lab: Vec3) -> Vec3 {
    transform(LMS_TO_LINEAR, transform(OKLAB_TO_LMS, lab).map(|x| x * x * x))
}

#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn channel_u8(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32, eps: f32) -> bool {
        (a - b).abs() < eps
    }

    // ── Conversions ──────────────────────────────────────────────────────

    #[test]
    fn srgb_corners_survive_the_trip() {
        for rgb in [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 1.0], [1.0, 1.0, 1.0]] {
            let (r, g, b) = Color::srgb(rgb[0], rgb[1], rgb[2]).to_srgb();
            for (got, want) in [r, g, b].into_iter().zip(rgb) {
                assert!(close(got, want, 0.005), "{rgb:?} came back as {:?}", (r, g, b));
            }
        }
    }

    #[test]
    fn oklab_round_trip() {
        let c = Color::oklch(0.62, 0.12, 250.0);
        let (l, a, b) = c.to_oklab();
        let back = Color::from_oklab(l, a, b);
        assert!(close(c.l, back.l, 1e-4) && close(c.c, back.c, 1e-4));
        assert!(hue_distance(c.h, back.h) < 0.01);
    }

    #[test]
    fn reference_values() {
        // Published OKLCH for #ff0000 is about (0.628, 0.258, 29.2).
        let red = Color::hex("#ff0000").unwrap();
        assert!(close(red.l, 0.628, 0.002), "{red:?}");
        assert!(close(red.c, 0.258, 0.002), "{red:?}");
        assert!(close(red.h, 29.2, 0.5), "{red:?}");

        let white = Color::rgb8(255, 255, 255);
        assert!(close(white.l, 1.0, 1e-3) && white.is_achromatic());
        assert!(close(Color::rgb8(0, 0, 0).l, 0.0, 1e-3));
    }

    #[test]
    fn gamma_curve_is_inverse() {
        for v in [0.0, 0.02, 0.2, 0.5, 0.9, 1.0] {
            assert!(close(srgb_encode(srgb_decode(v)), v, 1e-5), "{v}");
        }
    }

    // ── Hex ──────────────────────────────────────────────────────────────

    #[test]
    fn hex_accepts_short_long_and_bare() {
        assert_eq!(Color::hex("#ff8000").unwrap().to_rgb8(), (255, 128, 0));
        assert_eq!(Color::hex("F80").unwrap().to_rgb8(), (255, 136, 0));
        assert_eq!(Color::hex("0056FF").unwrap().to_hex(), "#0056ff");
    }

    #[test]
    fn hex_rejects_everything_else() {
        for bad in ["", "#", "#12", "#1234", "#12345", "#ff000080", "#gg0000", "+12345", "##fff", " #fff"] {
            assert!(Color::hex(bad).is_none(), "{bad:?} parsed");
        }
    }

    #[test]
    fn hex_output_is_stable() {
        for hex in ["#c86432", "#0056ff", "#ffffff", "#000000", "#7f878f", "#faf500"] {
            assert_eq!(Color::hex(hex).unwrap().to_hex(), hex);
        }
    }

    #[test]
    fn normalize_hex_canonicalizes() {
        assert_eq!(normalize_hex("#ABC").as_deref(), Some("#aabbcc"));
        assert_eq!(normalize_hex("0056FF").as_deref(), Some("#0056ff"));
        assert_eq!(normalize_hex("  #0056ff ").as_deref(), Some("#0056ff"));
        assert_eq!(normalize_hex("#12"), None);
        assert_eq!(normalize_hex("#gggggg"), None);
        assert_eq!(normalize_hex("   "), None);
    }

    // ── Hue ──────────────────────────────────────────────────────────────

    #[test]
    fn hue_wrapping() {
        assert!(close(normalize_hue(370.0), 10.0, 1e-4));
        assert!(close(normalize_hue(-30.0), 330.0, 1e-4));
        assert!(normalize_hue(-1e-6) < 360.0);
        assert!(close(hue_distance(350.0, 10.0), 20.0, 1e-4));
        assert!(close(hue_distance(0.0, 180.0), 180.0, 1e-4));
        assert!(close(hue_distance(-10.0, 710.0), 0.0, 1e-3));
    }

    // ── Gamut ────────────────────────────────────────────────────────────

    #[test]
    fn to_gamut_keeps_displayable_colors() {
        let c = Color::hex("#66997f").unwrap();
        assert!(c.in_srgb_gamut());
        assert_eq!(c.to_gamut(), c);
    }

    #[test]
    fn to_gamut_trims_only_chroma() {
        let wild = Color::oklch(0.5, 0.4, 180.0);
        assert!(!wild.in_srgb_gamut());
        let tamed = wild.to_gamut();
        assert!(tamed.in_srgb_gamut() && tamed.c < wild.c);
        assert!(close(tamed.l, 0.5, 1e-6) && close(tamed.h, 180.0, 1e-6));
    }

    #[test]
    fn to_gamut_stops_at_the_inner_boundary() {
        // Along this blue ray the gamut re-opens past the first boundary.
        let h = 264.1;
        let mut prev: Option<f32> = None;
        for i in 20u8..=60 {
            let l = f32::from(i) / 100.0;
            let mapped = Color::oklch(l, CHROMA_CEILING, h).to_gamut();
            assert!(mapped.in_srgb_gamut(), "L {l}");
            assert!(close(mapped.c, max_chroma(l, h), 1e-6), "L {l}: {} vs {}", mapped.c, max_chroma(l, h));
            if let Some(p) = prev {
                assert!((mapped.c - p).abs() < 0.02, "chroma jumped at L {l}: {p} -> {}", mapped.c);
            }
            prev = Some(mapped.c);
        }

        let outer = Color::oklch(0.43, 0.2911, h).to_gamut();
        assert!(outer.c <= max_chroma(0.43, h) + 1e-6, "kept {}", outer.c);
    }

    #[test]
    fn clamped_wraps_and_fits() {
        let c = Color::clamped(1.4, 0.3, -90.0);
        assert!(c.in_srgb_gamut());
        assert!(close(c.l, 1.0, 1e-6) && close(c.h, 270.0, 1e-3));
    }

    #[test]
    fn max_chroma_shape() {
        assert!(max_chroma(0.0, 90.0) < 0.04);
        assert!(max_chroma(1.0, 90.0) < 0.01);
        assert!(max_chroma(0.6, 260.0) > 0.1);
        // Yellow peaks light.
        assert!(max_chroma(0.9, 100.0) > max_chroma(0.5, 100.0));

        let c = max_chroma(0.7, 145.0);
        assert!(Color::oklch(0.7, c, 145.0).in_srgb_gamut());
        assert!(!Color::oklch(0.7, c + 0.01, 145.0).in_srgb_gamut());
    }

    // ── Equality / Distance ──────────────────────────────────────────────

    #[test]
    fn grays_compare_without_hue() {
        assert_eq!(Color::oklch(0.5, 0.0, 0.0), Color::oklch(0.5, 0.0, 180.0));
        assert_ne!(Color::oklch(0.5, 0.1, 0.0), Color::oklch(0.5, 0.1, 180.0));
    }

    #[test]
    fn delta_e() {
        let c = Color::oklch(0.5, 0.1, 200.0);
        assert!(c.distance(&c) < 1e-6);
        assert!(close(Color::BLACK.distance(&Color::WHITE), 1.0, 1e-6));
        // Opposite hues at equal chroma sit 2c apart.
        assert!(close(c.distance(&Color::oklch(0.5, 0.1, 20.0)), 0.2, 1e-5));
    }

    #[test]
    fn formatting() {
        assert_eq!(Color::rgb8(255, 0, 0).to_string(), "#ff0000");
        assert_eq!(format!("{:?}", Color::oklch(0.5, 0.1, 200.0)), "oklch(0.5000 0.1000 200.0)");
    }
}
