//! Action boundary used by presentation layers.

/// Session façade and its error type.
pub mod handle;
/// Values returned by session actions.
pub mod outcome;
