//! mocktrack-core — score ledger and trend projection.
//!
//! This crate records practice-test scores in a nested ledger keyed by
//! platform, series, test number and attempt, persists the ledger through a
//! key-value store, and projects per-series trends for charting.

pub mod catalog;
pub mod config;
pub mod error;
pub mod ledger;
pub mod model;
pub mod session;
pub mod store;
pub mod submission;
pub mod trend;
