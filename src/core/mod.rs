//! In-memory authoritative table and index helpers.

/// Helper index aliases.
pub mod indices;
/// Authoritative patient table with persisted mutations.
pub mod store;
