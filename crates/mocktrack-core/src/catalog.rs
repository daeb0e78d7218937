//! Platform and series catalog.
//!
//! The catalog lists the identifiers a user may pick from, their display
//! names, and the score limits enforced at the entry boundary. The ledger
//! itself accepts any identifier.

use serde::{Deserialize, Serialize};

use crate::error::LedgerError;
use crate::model::{Platform, Series};

/// One selectable catalog item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Identifier stored in the ledger (e.g. "Platform 1").
    pub id: String,
    /// Human-readable name (e.g. "Testbook").
    pub name: String,
}

impl CatalogEntry {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    fn matches(&self, value: &str) -> bool {
        self.id.eq_ignore_ascii_case(value) || self.name.eq_ignore_ascii_case(value)
    }
}

/// Upper bounds for submitted values. `None` or `0` disables a bound.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreLimits {
    #[serde(default = "default_max_test")]
    pub max_test_number: Option<u32>,
    #[serde(default = "default_max_attempt")]
    pub max_attempt_number: Option<u32>,
    #[serde(default = "default_max_quantitative")]
    pub max_quantitative: Option<u32>,
    #[serde(default = "default_max_reasoning")]
    pub max_reasoning: Option<u32>,
    #[serde(default = "default_max_english")]
    pub max_english: Option<u32>,
}

fn default_max_test() -> Option<u32> {
    Some(30)
}
fn default_max_attempt() -> Option<u32> {
    Some(10)
}
fn default_max_quantitative() -> Option<u32> {
    Some(35)
}
fn default_max_reasoning() -> Option<u32> {
    Some(35)
}
fn default_max_english() -> Option<u32> {
    Some(20)
}

impl Default for ScoreLimits {
    fn default() -> Self {
        Self {
            max_test_number: default_max_test(),
            max_attempt_number: default_max_attempt(),
            max_quantitative: default_max_quantitative(),
            max_reasoning: default_max_reasoning(),
            max_english: default_max_english(),
        }
    }
}

impl ScoreLimits {
    /// No upper bounds at all.
    pub fn unbounded() -> Self {
        Self {
            max_test_number: None,
            max_attempt_number: None,
            max_quantitative: None,
            max_reasoning: None,
            max_english: None,
        }
    }

    pub(crate) fn check(field: &'static str, value: u32, max: Option<u32>) -> Result<u32, LedgerError> {
        match max {
            Some(max) if max > 0 && value > max => Err(LedgerError::invalid(
                field,
                format!("{value} exceeds maximum of {max}"),
            )),
            _ => Ok(value),
        }
    }
}

/// The enumerated platforms and series plus score limits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default = "default_platforms")]
    pub platforms: Vec<CatalogEntry>,
    #[serde(default = "default_series")]
    pub series: Vec<CatalogEntry>,
    #[serde(default)]
    pub limits: ScoreLimits,
}

fn default_platforms() -> Vec<CatalogEntry> {
    vec![
        CatalogEntry::new("Platform 1", "Testbook"),
        CatalogEntry::new("Platform 2", "Guidely"),
        CatalogEntry::new("Platform 3", "Smartkeeda"),
    ]
}

fn default_series() -> Vec<CatalogEntry> {
    vec![
        CatalogEntry::new("Series 1", "RRB PO"),
        CatalogEntry::new("Series 2", "RRB Clerk"),
        CatalogEntry::new("Series 3", "IBPS PO"),
        CatalogEntry::new("Series 4", "IBPS Clerk"),
        CatalogEntry::new("Series 5", "SBI PO"),
        CatalogEntry::new("Series 6", "SBI Clerk"),
    ]
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            platforms: default_platforms(),
            series: default_series(),
            limits: ScoreLimits::default(),
        }
    }
}

impl Catalog {
    /// Resolve a platform by id or display name (case-insensitive).
    pub fn resolve_platform(&self, value: &str) -> Result<Platform, LedgerError> {
        find(&self.platforms, value)
            .map(|e| Platform::new(e.id.clone()))
            .ok_or_else(|| LedgerError::UnknownCatalogEntry {
                kind: "platform",
                value: value.trim().to_string(),
            })
    }

    /// Resolve a series by id or display name (case-insensitive).
    pub fn resolve_series(&self, value: &str) -> Result<Series, LedgerError> {
        find(&self.series, value)
            .map(|e| Series::new(e.id.clone()))
            .ok_or_else(|| LedgerError::UnknownCatalogEntry {
                kind: "series",
                value: value.trim().to_string(),
            })
    }

    /// Display name for a platform, falling back to its id.
    pub fn platform_name<'a>(&'a self, platform: &'a Platform) -> &'a str {
        find(&self.platforms, platform.as_str())
            .map(|e| e.name.as_str())
            .unwrap_or(platform.as_str())
    }

    /// Display name for a series, falling back to its id.
    pub fn series_name<'a>(&'a self, series: &'a Series) -> &'a str {
        find(&self.series, series.as_str())
            .map(|e| e.name.as_str())
            .unwrap_or(series.as_str())
    }
}

fn find<'a>(entries: &'a [CatalogEntry], value: &str) -> Option<&'a CatalogEntry> {
    let value = value.trim();
    entries.iter().find(|e| e.matches(value))
}

/// A warning from catalog validation.
#[derive(Debug, Clone)]
pub struct CatalogWarning {
    pub message: String,
}

/// Check a catalog for empty lists and duplicate ids.
pub fn validate_catalog(catalog: &Catalog) -> Vec<CatalogWarning> {
    let mut warnings = Vec::new();

    for (kind, entries) in [("platform", &catalog.platforms), ("series", &catalog.series)] {
        if entries.is_empty() {
            warnings.push(CatalogWarning {
                message: format!("no {kind} entries configured"),
            });
        }
        let mut seen = std::collections::HashSet::new();
        for e in entries.iter() {
            if !seen.insert(e.id.to_lowercase()) {
                warnings.push(CatalogWarning {
                    message: format!("duplicate {kind} id: {}", e.id),
                });
            }
        }
    }

    warnings
}
