//! Session action results.

use serde::{Deserialize, Serialize};

use crate::query::{BreachDistribution, HistogramBucket, Summary};

/// Everything the dashboard view renders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardView {
    /// Headline figures.
    pub summary: Summary,
    /// Breach vs non-breach bar chart input.
    pub distribution: BreachDistribution,
    /// Length-of-stay histogram input.
    pub histogram: Vec<HistogramBucket>,
}

/// Result of a modify action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ModifyOutcome {
    /// The record was updated and persisted.
    Updated,
    /// No record has the id; nothing changed.
    NotFound,
}

/// Result of a delete action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DeleteReply {
    /// Matching rows were removed and the table persisted.
    Deleted {
        /// Number of rows removed.
        removed: usize,
    },
    /// No row matched; nothing changed.
    NotFound,
    /// The caller did not confirm; nothing changed.
    ConfirmationRequired,
}
