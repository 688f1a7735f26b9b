//! Design-token catalog: the model, where it comes from, and its cache.
//!
//! A [`CatalogSource`] produces entries; a [`CatalogRepository`] loads them
//! once and hands out a shared slice from then on. Repositories are plain
//! values, so tests and hosts can each own one with their own source.

use std::fmt;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use swatch_color::Color;
use tracing::{info, warn};

use crate::builtin::BuiltinCatalog;
use crate::error::{AccentError, Result};

// ---------------------------------------------------------------------------
// Model
// ---------------------------------------------------------------------------

/// Named slice of the color wheel a catalog groups its scales by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HueFamily {
    Red,
    Orange,
    Yellow,
    Lime,
    Green,
    Cyan,
    LightBlue,
    Blue,
    Purple,
    Magenta,
    Gray,
}

impl HueFamily {
    /// The chromatic families, in wheel order.
    pub const CHROMATIC: [Self; 10] = [
        Self::Red,
        Self::Orange,
        Self::Yellow,
        Self::Lime,
        Self::Green,
        Self::Cyan,
        Self::LightBlue,
        Self::Blue,
        Self::Purple,
        Self::Magenta,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Orange => "orange",
            Self::Yellow => "yellow",
            Self::Lime => "lime",
            Self::Green => "green",
            Self::Cyan => "cyan",
            Self::LightBlue => "light-blue",
            Self::Blue => "blue",
            Self::Purple => "purple",
            Self::Magenta => "magenta",
            Self::Gray => "gray",
        }
    }
}

impl fmt::Display for HueFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What role an entry plays in the design system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    #[default]
    Chromatic,
    Neutral,
    Semantic,
}

/// One catalog color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    /// Token id, e.g. `blue-600`.
    pub id: String,
    /// `#rrggbb`.
    pub hex: String,
    pub hue_family: HueFamily,
    /// Lightness position in the family's scale; larger is darker.
    pub step: u16,
    #[serde(default)]
    pub category: Category,
}

impl CatalogEntry {
    /// Parsed color, `None` for a malformed hex.
    #[must_use]
    pub fn color(&self) -> Option<Color> {
        Color::hex(&self.hex)
    }

    #[must_use]
    pub fn is_chromatic(&self) -> bool {
        self.category == Category::Chromatic
    }
}

// ---------------------------------------------------------------------------
// Sources
// ---------------------------------------------------------------------------

/// Anything that can produce catalog entries.
pub trait CatalogSource: Send + Sync {
    /// Produce every entry. Called at most once per successful repository
    /// load.
    ///
    /// # Errors
    ///
    /// Whatever the source hits reading or decoding its entries.
    fn load(&self) -> Result<Vec<CatalogEntry>>;
}

/// A catalog stored as a JSON array of [`CatalogEntry`].
#[derive(Debug, Clone)]
pub enum JsonCatalog {
    Inline(String),
    File(PathBuf),
}

impl JsonCatalog {
    pub fn inline(json: impl Into<String>) -> Self {
        Self::Inline(json.into())
    }

    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::File(path.into())
    }
}

impl CatalogSource for JsonCatalog {
    fn load(&self) -> Result<Vec<CatalogEntry>> {
        let entries = match self {
            Self::Inline(json) => serde_json::from_str(json)?,
            Self::File(path) => {
                let text = std::fs::read_to_string(path).map_err(|source| AccentError::CatalogIo {
                    path: path.clone(),
                    source,
                })?;
                serde_json::from_str(&text)?
            }
        };
        Ok(entries)
    }
}

// ---------------------------------------------------------------------------
// Repository
// ---------------------------------------------------------------------------

/// Lazily loaded, memoized catalog.
///
/// The first [`entries`](Self::entries) call loads from the source; every
/// later call returns the same shared slice. Concurrent first calls
/// serialize on the lock, so the source runs once. A failed load is not
/// remembered: the next call tries again.
pub struct CatalogRepository {
    source: Box<dyn CatalogSource>,
    cache: Mutex<Option<Arc<[CatalogEntry]>>>,
}

impl CatalogRepository {
    pub fn new(source: impl CatalogSource + 'static) -> Self {
        Self {
            source: Box::new(source),
            cache: Mutex::new(None),
        }
    }

    /// Repository over the generated built-in catalog.
    #[must_use]
    pub fn builtin() -> Self {
        Self::new(BuiltinCatalog)
    }

    /// All usable entries, loading them on first use.
    ///
    /// Entries whose hex does not parse are dropped with a warning. A
    /// source that yields nothing usable is [`AccentError::CatalogEmpty`].
    ///
    /// # Errors
    ///
    /// [`AccentError::CatalogEmpty`], or the source's own load error. A
    /// failed load is not cached; the next call tries again.
    pub fn entries(&self) -> Result<Arc<[CatalogEntry]>> {
        let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(entries) = cache.as_ref() {
            return Ok(Arc::clone(entries));
        }

        let raw = self.source.load()?;
        let total = raw.len();
        let entries: Arc<[CatalogEntry]> = raw
            .into_iter()
            .filter(|e| {
                let ok = e.color().is_some();
                if !ok {
                    warn!(id = %e.id, hex = %e.hex, "skipping catalog entry with invalid hex");
                }
                ok
            })
            .collect();

        if entries.is_empty() {
            return Err(AccentError::CatalogEmpty);
        }

        info!(entries = entries.len(), skipped = total - entries.len(), "catalog loaded");
        *cache = Some(Arc::clone(&entries));
        Ok(entries)
    }

    /// Whether a load has already succeeded.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner).is_some()
    }
}

impl fmt::Debug for CatalogRepository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CatalogRepository")
            .field("loaded", &self.is_loaded())
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
