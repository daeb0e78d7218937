//! Ledger error types.
//!
//! These represent rejected submissions and catalog lookups. They are
//! recovered at the entry boundary; a rejected operation never changes the
//! ledger.

use thiserror::Error;

/// Errors raised by the ledger and its entry boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// A score field was missing, non-numeric, negative, out of range, or
    /// a test/attempt number was not positive.
    #[error("invalid {field}: {reason}")]
    InvalidScoreInput { field: &'static str, reason: String },

    /// A platform or series is not part of the configured catalog.
    #[error("unknown {kind}: {value}")]
    UnknownCatalogEntry { kind: &'static str, value: String },

    /// The ledger could not be serialized or restored.
    #[error("persistence error: {0}")]
    Persistence(String),
}

impl LedgerError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        LedgerError::InvalidScoreInput {
            field,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_field() {
        let err = LedgerError::invalid("english", "must not be negative");
        assert_eq!(err.to_string(), "invalid english: must not be negative");
    }

    #[test]
    fn display_unknown_catalog_entry() {
        let err = LedgerError::UnknownCatalogEntry {
            kind: "platform",
            value: "Nowhere".into(),
        };
        assert_eq!(err.to_string(), "unknown platform: Nowhere");
    }
}
