//! Order records, the store seam, and the views built on store snapshots.

/// Associate dashboard partitions.
pub mod dashboard;
/// Order record and editable fields.
pub mod model;
/// End-of-day pickup report.
pub mod report;
/// Customer name search.
pub mod search;
/// Store trait, clocks and the in-memory store.
pub mod store;
