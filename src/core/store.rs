use std::{fmt, path::PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::{
    patient::{BreachBinaryPolicy, PatientRecord, PatientUpdate, Table},
    persist::{PersistError, TableSink, flatfile::CsvTableFile},
    types::PatientId,
};

use super::indices::VecIndex;

/// Failures of store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No row carries the requested id.
    #[error("no patient with id `{0}`")]
    NotFound(PatientId),
    /// An update tried to set a breach status other than `non-breach` / `breach`.
    #[error("breach status must be `non-breach` or `breach`, got `{0}`")]
    InvalidStatus(String),
    /// Reading or rewriting the backing table failed.
    #[error(transparent)]
    Persist(#[from] PersistError),
}

/// Result alias for store calls.
pub type StoreResult<T> = Result<T, StoreError>;

/// Store behaviour knobs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Whether updates refresh `breach_binary`.
    pub breach_binary: BreachBinaryPolicy,
}

/// Result of [`RecordStore::delete`]. A miss is not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DeleteOutcome {
    /// Every row with the id was removed.
    Deleted {
        /// Number of rows removed.
        removed: usize,
    },
    /// No row matched; nothing was written.
    NotFound,
}

/// Owns the in-memory table and is the only writer of its sink.
///
/// Each mutation rewrites the whole table through the sink before returning.
/// If the write fails the in-memory change is rolled back, so the table and
/// the store of record only differ while a mutation is in flight.
///
/// The store assumes it is the sole writer. Two processes editing the same
/// file race and the last rewrite wins.
pub struct RecordStore {
    table: Table,
    by_id: VecIndex<PatientId>,
    sink: Box<dyn TableSink>,
    config: StoreConfig,
}

impl fmt::Debug for RecordStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordStore")
            .field("rows", &self.table.rows.len())
            .field("sink", &self.sink.describe())
            .field("config", &self.config)
            .finish()
    }
}

impl RecordStore {
    /// Reads the full table from `sink`.
    pub fn load(mut sink: Box<dyn TableSink>, config: StoreConfig) -> StoreResult<Self> {
        let table = sink.load_table()?;
        info!(source = %sink.describe(), rows = table.rows.len(), "loaded patient table");

        let mut store = Self {
            table,
            by_id: VecIndex::new(),
            sink,
            config,
        };
        store.rebuild_index();
        Ok(store)
    }

    /// Loads the CSV file at `path`.
    pub fn open(path: impl Into<PathBuf>, config: StoreConfig) -> StoreResult<Self> {
        Self::load(Box::new(CsvTableFile::new(path)), config)
    }

    /// First row whose id equals `id` exactly.
    pub fn find_by_id(&self, id: &str) -> Option<&PatientRecord> {
        self.first_position(id).and_then(|pos| self.table.rows.get(pos))
    }

    /// Owned copy of [`RecordStore::find_by_id`].
    pub fn find_by_id_cloned(&self, id: &str) -> Option<PatientRecord> {
        self.find_by_id(id).cloned()
    }

    /// Every row whose id equals `id`, in table order.
    pub fn find_all_by_id(&self, id: &str) -> Vec<&PatientRecord> {
        self.by_id
            .get(id)
            .into_iter()
            .flat_map(|positions| positions.iter())
            .filter_map(|pos| self.table.rows.get(*pos))
            .collect()
    }

    /// True when at least one row has `id`.
    pub fn contains_id(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    /// Overwrites the editable fields of the first row with `id`, then persists.
    ///
    /// The new status must be `non-breach` or `breach`, unless it is the
    /// unrecognised text the row already carries.
    pub fn update(&mut self, id: &str, update: PatientUpdate) -> StoreResult<()> {
        let pos = self
            .first_position(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        let status = &update.breach_status;
        if status.binary().is_none() && *status != self.table.rows[pos].breach_status {
            return Err(StoreError::InvalidStatus(status.to_string()));
        }

        let previous = self.table.rows[pos].clone();
        update.apply_to(&mut self.table.rows[pos], self.config.breach_binary);

        if let Err(err) = self.persist() {
            warn!(id, error = %err, "update not persisted, restoring previous row");
            self.table.rows[pos] = previous;
            return Err(err);
        }

        info!(id, "updated patient record");
        Ok(())
    }

    /// Removes every row with `id`, then persists.
    pub fn delete(&mut self, id: &str) -> StoreResult<DeleteOutcome> {
        if !self.contains_id(id) {
            debug!(id, "delete matched no rows");
            return Ok(DeleteOutcome::NotFound);
        }

        let before = self.table.rows.clone();
        self.table.rows.retain(|row| row.id != id);
        let removed = before.len() - self.table.rows.len();

        if let Err(err) = self.persist() {
            warn!(id, error = %err, "delete not persisted, restoring previous rows");
            self.table.rows = before;
            return Err(err);
        }

        self.rebuild_index();
        info!(id, removed, "deleted patient records");
        Ok(DeleteOutcome::Deleted { removed })
    }

    /// Rewrites the whole table through the sink.
    pub fn persist(&mut self) -> StoreResult<()> {
        self.sink.store_table(&self.table)?;
        Ok(())
    }

    /// Rows in table order.
    pub fn records(&self) -> &[PatientRecord] {
        &self.table.rows
    }

    /// The table, including its header order.
    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.table.rows.len()
    }

    /// True when the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.table.rows.is_empty()
    }

    /// Active configuration.
    pub fn config(&self) -> StoreConfig {
        self.config
    }

    fn first_position(&self, id: &str) -> Option<usize> {
        self.by_id.get(id).and_then(|positions| positions.first().copied())
    }

    fn rebuild_index(&mut self) {
        self.by_id.clear();
        for (pos, row) in self.table.rows.iter().enumerate() {
            self.by_id.entry(row.id.clone()).or_default().push(pos);
        }
    }
}
