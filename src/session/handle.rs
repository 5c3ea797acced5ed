use tracing::{debug, warn};

use crate::{
    action::Action,
    audit::AuditSink,
    core::store::{DeleteOutcome, RecordStore, StoreError},
    patient::{PatientRecord, PatientUpdate},
    query::{self, QueryError},
    types::NumericColumn,
};

use super::outcome::{DashboardView, DeleteReply, ModifyOutcome};

/// Per-action failure. The in-memory table is unchanged when one is returned.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Store operation failed.
    #[error(transparent)]
    Store(#[from] StoreError),
    /// Query parameters were rejected.
    #[error(transparent)]
    Query(#[from] QueryError),
}

/// Result alias for session actions.
pub type SessionResult<T> = Result<T, SessionError>;

/// One user's view of a [`RecordStore`], with every action audited.
///
/// A failed audit write is reported through `tracing` and never fails the
/// action that triggered it.
pub struct Session {
    store: RecordStore,
    audit: Box<dyn AuditSink>,
    histogram_buckets: usize,
}

impl Session {
    /// Couples `store` with `audit`; dashboards use `histogram_buckets` bars.
    pub fn new(store: RecordStore, audit: Box<dyn AuditSink>, histogram_buckets: usize) -> Self {
        Self {
            store,
            audit,
            histogram_buckets,
        }
    }

    /// Read access to the underlying store.
    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    /// Releases the store.
    pub fn into_store(self) -> RecordStore {
        self.store
    }

    /// Summary, breach distribution, and length-of-stay histogram.
    pub fn dashboard(&mut self) -> SessionResult<DashboardView> {
        self.dashboard_with_buckets(self.histogram_buckets)
    }

    /// [`Session::dashboard`] with an explicit histogram bucket count.
    pub fn dashboard_with_buckets(&mut self, buckets: usize) -> SessionResult<DashboardView> {
        let rows = self.store.records();
        let view = DashboardView {
            summary: query::summarize(rows),
            distribution: query::breach_distribution(rows),
            histogram: query::length_of_stay_histogram(rows, buckets)?,
        };
        self.log(Action::ViewedDashboard);
        Ok(view)
    }

    /// First record with `id`, if any.
    pub fn search(&mut self, id: &str) -> Option<PatientRecord> {
        let found = self.store.find_by_id_cloned(id);
        let action = match found {
            Some(_) => Action::Retrieved { id: id.to_string() },
            None => Action::SearchMissed { id: id.to_string() },
        };
        self.log(action);
        found
    }

    /// Every record with `id`, in table order; logged like [`Session::search`].
    pub fn search_all(&mut self, id: &str) -> Vec<PatientRecord> {
        let found: Vec<PatientRecord> = self
            .store
            .find_all_by_id(id)
            .into_iter()
            .cloned()
            .collect();
        let action = if found.is_empty() {
            Action::SearchMissed { id: id.to_string() }
        } else {
            Action::Retrieved { id: id.to_string() }
        };
        self.log(action);
        found
    }

    /// Records whose `column` lies in `low..=high`.
    pub fn filter(&mut self, column: &str, low: i64, high: i64) -> SessionResult<Vec<PatientRecord>> {
        let column = column
            .parse::<NumericColumn>()
            .map_err(|err| QueryError::InvalidColumn(err.0))?;
        let rows = query::filter_by(self.store.records(), column, low, high);
        debug!(%column, low, high, matched = rows.len(), "filtered records");
        self.log(Action::Filtered { column, low, high });
        Ok(rows)
    }

    /// Updates the record with `id` if it exists.
    ///
    /// Setting an unrecognised breach status fails with
    /// [`StoreError::InvalidStatus`] and writes nothing.
    pub fn modify(&mut self, id: &str, update: PatientUpdate) -> SessionResult<ModifyOutcome> {
        if !self.store.contains_id(id) {
            return Ok(ModifyOutcome::NotFound);
        }
        self.store.update(id, update)?;
        self.log(Action::Modified { id: id.to_string() });
        Ok(ModifyOutcome::Updated)
    }

    /// Deletes every record with `id`; requires `confirmed`.
    pub fn delete(&mut self, id: &str, confirmed: bool) -> SessionResult<DeleteReply> {
        if !confirmed {
            return Ok(DeleteReply::ConfirmationRequired);
        }
        match self.store.delete(id)? {
            DeleteOutcome::Deleted { removed } => {
                self.log(Action::Deleted { id: id.to_string() });
                Ok(DeleteReply::Deleted { removed })
            }
            DeleteOutcome::NotFound => {
                self.log(Action::DeleteMissed { id: id.to_string() });
                Ok(DeleteReply::NotFound)
            }
        }
    }

    fn log(&mut self, action: Action) {
        if let Err(err) = self.audit.record(&action.to_string()) {
            warn!(error = %err, %action, "audit entry not written");
        }
    }
}
