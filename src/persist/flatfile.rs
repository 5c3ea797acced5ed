//! CSV backing file with durable-replace writes.

use std::{
    collections::BTreeMap,
    fs::File,
    io,
    path::{Path, PathBuf},
};

use csv::StringRecord;
use tracing::debug;

use crate::{
    patient::{PatientRecord, Table},
    types::{BREACH_BINARY_HEADER, BREACH_HEADER, BreachStatus, ID_HEADER, NumericColumn},
};

use super::{PersistError, PersistResult, TableSink};

/// CSV file implementation of [`TableSink`].
///
/// Writes go to a temporary file in the same directory which is fsynced and
/// then renamed over the target, so readers see either the old or the new
/// table. There is no cross-process lock.
#[derive(Debug, Clone)]
pub struct CsvTableFile {
    path: PathBuf,
}

impl CsvTableFile {
    /// Points at `path`; nothing is read until [`CsvTableFile::read`].
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Backing file location.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the whole file.
    pub fn read(&self) -> PersistResult<Table> {
        let file = File::open(&self.path).map_err(|err| match err.kind() {
            io::ErrorKind::NotFound => PersistError::MissingFile {
                path: self.path.clone(),
            },
            _ => PersistError::Io(err),
        })?;

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(file);
        let layout = ColumnLayout::resolve(reader.headers()?)?;

        let mut rows = Vec::new();
        for record in reader.records() {
            rows.push(layout.decode(&record?)?);
        }

        debug!(path = %self.path.display(), rows = rows.len(), "loaded table");
        Ok(Table {
            headers: layout.kept_headers,
            rows,
        })
    }

    /// Replaces the file with `table` via temp file + rename.
    pub fn write_atomic(&self, table: &Table) -> PersistResult<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut tmp = tempfile::Builder::new()
            .prefix(".aedrecords-")
            .suffix(".tmp")
            .tempfile_in(dir)?;
        {
            let mut writer = csv::Writer::from_writer(tmp.as_file_mut());
            writer.write_record(&table.headers)?;
            for row in &table.rows {
                writer.write_record(encode_row(&table.headers, row))?;
            }
            writer.flush()?;
        }
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|err| PersistError::Io(err.error))?;

        debug!(path = %self.path.display(), rows = table.rows.len(), "replaced table");
        Ok(())
    }
}

impl TableSink for CsvTableFile {
    fn load_table(&mut self) -> PersistResult<Table> {
        self.read()
    }

    fn store_table(&mut self, table: &Table) -> PersistResult<()> {
        self.write_atomic(table)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Header positions resolved once per file.
struct ColumnLayout {
    id: usize,
    numeric: [usize; 5],
    breach: usize,
    extra: Vec<(usize, String)>,
    kept_headers: Vec<String>,
}

impl ColumnLayout {
    fn resolve(headers: &StringRecord) -> PersistResult<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| PersistError::MissingColumn(name.to_string()))
        };

        let id = find(ID_HEADER)?;
        let breach = find(BREACH_HEADER)?;
        let mut numeric = [0usize; 5];
        for (slot, column) in numeric.iter_mut().zip(NumericColumn::ALL) {
            *slot = find(column.header())?;
        }

        let mut extra = Vec::new();
        let mut kept_headers = Vec::new();
        for (idx, header) in headers.iter().enumerate() {
            if header == BREACH_BINARY_HEADER {
                continue;
            }
            kept_headers.push(header.to_string());
            if idx != id && idx != breach && !numeric.contains(&idx) {
                extra.push((idx, header.to_string()));
            }
        }

        Ok(Self {
            id,
            numeric,
            breach,
            extra,
            kept_headers,
        })
    }

    fn decode(&self, record: &StringRecord) -> PersistResult<PatientRecord> {
        let line = record.position().map_or(0, |p| p.line());
        let cell = |idx: usize| record.get(idx).unwrap_or("");

        let mut values = [0i64; 5];
        for ((value, idx), column) in values.iter_mut().zip(self.numeric).zip(NumericColumn::ALL) {
            *value = coerce_integer(cell(idx), line, column.header())?;
        }
        let [age, length_of_stay, investigation_count, treatment_count, patient_count] = values;

        let breach_status = BreachStatus::from(cell(self.breach));
        let breach_binary = breach_status.binary();
        let extra = self
            .extra
            .iter()
            .map(|(idx, header)| (header.clone(), cell(*idx).to_string()))
            .collect::<BTreeMap<_, _>>();

        Ok(PatientRecord {
            id: cell(self.id).to_string(),
            age,
            length_of_stay,
            investigation_count,
            treatment_count,
            patient_count,
            breach_status,
            breach_binary,
            extra,
        })
    }
}

/// Integer parse that also accepts integral floats such as `"42.0"`.
///
/// Floats outside the `i64` range are rejected rather than saturated.
fn coerce_integer(raw: &str, line: u64, column: &str) -> PersistResult<i64> {
    let trimmed = raw.trim();
    if let Ok(v) = trimmed.parse::<i64>() {
        return Ok(v);
    }
    // i64::MAX as f64 rounds up to 2^63, so the upper end is exclusive.
    let representable = i64::MIN as f64..i64::MAX as f64;
    match trimmed.parse::<f64>() {
        Ok(v) if v.fract() == 0.0 && representable.contains(&v) => Ok(v as i64),
        _ => Err(PersistError::InvalidInteger {
            line,
            column: column.to_string(),
            value: raw.to_string(),
        }),
    }
}

fn encode_row(headers: &[String], row: &PatientRecord) -> Vec<String> {
    headers
        .iter()
        .map(|header| {
            if header == ID_HEADER {
                return row.id.clone();
            }
            if header == BREACH_HEADER {
                return row.breach_status.to_string();
            }
            if let Some(column) = NumericColumn::ALL.into_iter().find(|c| c.header() == header) {
                return row.value(column).to_string();
            }
            row.extra.get(header).cloned().unwrap_or_default()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coerce_accepts_integral_floats_only() {
        assert_eq!(coerce_integer(" 42 ", 2, "Age").unwrap(), 42);
        assert_eq!(coerce_integer("42.0", 2, "Age").unwrap(), 42);
        assert!(matches!(
            coerce_integer("42.5", 7, "Age"),
            Err(PersistError::InvalidInteger { line: 7, .. })
        ));
        assert!(coerce_integer("", 2, "Age").is_err());
    }

    #[test]
    fn coerce_rejects_floats_outside_i64() {
        assert_eq!(coerce_integer("-9.2e18", 2, "LoS").unwrap(), -9_200_000_000_000_000_000);
        for raw in ["1e20", "-1e20", "9223372036854775808.0", "inf", "NaN"] {
            assert!(
                matches!(
                    coerce_integer(raw, 3, "LoS"),
                    Err(PersistError::InvalidInteger { line: 3, ref value, .. }) if value == raw
                ),
                "{raw} should be rejected"
            );
        }
    }
}
