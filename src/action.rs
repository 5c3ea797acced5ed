//! User actions and the audit wording each one produces.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::{NumericColumn, PatientId};

/// One user-triggered action, as recorded in the audit trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    /// Dashboard figures were rendered.
    ViewedDashboard,
    /// A search found the id.
    Retrieved {
        /// Searched id.
        id: PatientId,
    },
    /// A search did not find the id.
    SearchMissed {
        /// Searched id.
        id: PatientId,
    },
    /// Rows were filtered by an inclusive range.
    Filtered {
        /// Filtered column.
        column: NumericColumn,
        /// Inclusive lower bound.
        low: i64,
        /// Inclusive upper bound.
        high: i64,
    },
    /// A record was updated.
    Modified {
        /// Updated id.
        id: PatientId,
    },
    /// Rows were deleted.
    Deleted {
        /// Deleted id.
        id: PatientId,
    },
    /// A confirmed delete matched nothing.
    DeleteMissed {
        /// Requested id.
        id: PatientId,
    },
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ViewedDashboard => f.write_str("Viewed dashboard"),
            Self::Retrieved { id } => write!(f, "Retrieved Patient ID {id}"),
            Self::SearchMissed { id } => write!(f, "Searched Patient ID {id} – Not found"),
            Self::Filtered { column, low, high } => {
                write!(f, "Filtered patients by {column} range ({low}, {high})")
            }
            Self::Modified { id } => write!(f, "Modified Patient ID {id}"),
            Self::Deleted { id } => write!(f, "Deleted Patient ID {id}"),
            Self::DeleteMissed { id } => {
                write!(f, "Attempted delete for Patient ID {id} – Not found")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_wording_uses_file_header() {
        let action = Action::Filtered {
            column: NumericColumn::LengthOfStay,
            low: 30,
            high: 240,
        };
        assert_eq!(action.to_string(), "Filtered patients by LoS range (30, 240)");
    }
}
