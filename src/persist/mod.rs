/// Flat-file CSV implementation of [`TableSink`].
pub mod flatfile;

use std::path::PathBuf;

use crate::patient::Table;

/// Failures while reading or rewriting the backing table.
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    /// The backing file does not exist.
    #[error("backing file not found: {}", path.display())]
    MissingFile {
        /// Path that was looked up.
        path: PathBuf,
    },
    /// A required column is absent from the header row.
    #[error("backing file has no `{0}` column")]
    MissingColumn(String),
    /// An integer column holds text that cannot be coerced.
    #[error("line {line}: column `{column}` holds `{value}`, expected an integer")]
    InvalidInteger {
        /// 1-based line in the file.
        line: u64,
        /// Column header.
        column: String,
        /// Offending cell.
        value: String,
    },
    /// Malformed CSV (column count mismatch, invalid UTF-8).
    #[error("csv: {0}")]
    Csv(#[from] csv::Error),
    /// Filesystem failure.
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for persistence calls.
pub type PersistResult<T> = Result<T, PersistError>;

/// Store of record for a whole [`Table`].
///
/// `store_table` must either replace the previous contents completely or leave
/// them untouched.
pub trait TableSink: Send {
    /// Reads the full table.
    fn load_table(&mut self) -> PersistResult<Table>;
    /// Replaces the stored table with `table`.
    fn store_table(&mut self, table: &Table) -> PersistResult<()>;
    /// Short human-readable location, used in log fields.
    fn describe(&self) -> String {
        "table sink".to_string()
    }
}
