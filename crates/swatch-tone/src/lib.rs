//! # swatch-tone — exact-ratio contrast solving and tone scales
//!
//! ```text
//! seed Color + background + target ratio
//!     │
//!     ▼
//! solver.rs: bisect lightness (or tone, for yellows) until the WCAG
//!            ratio matches; never fails, falls back to the closest color
//!     │
//!     ▼
//! scale.rs:  interpolate key colors, pick a point per target ratio,
//!            correct each point through the solver
//! ```
//!
//! Everything here is deterministic: fixed iteration counts, no
//! randomness, no shared state.

// Single-char math variables are standard in color science.
#![allow(clippy::many_single_char_names)]
// Small integer-to-float casts (segment counts, probe indices).
#![allow(clippy::cast_precision_loss)]
// Lightness/luminance variable names are inherently similar.
#![allow(clippy::similar_names)]

pub mod scale;
pub mod solver;

pub use scale::{ToneScale, ToneStep, build_tone_scale, build_tone_scale_with};
pub use solver::{SolveReport, SolverOptions, is_chroma_constrained, solve_contrast, solve_contrast_with};
