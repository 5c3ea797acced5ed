use crate::{patient::PatientRecord, types::NumericColumn};

use super::{QueryError, QueryResult};

/// Rows whose `column` lies in `low..=high`.
///
/// `column` accepts the field name (`length_of_stay`) or the file header
/// (`LoS`). Anything outside the filterable set is rejected.
pub fn filter_range(
    rows: &[PatientRecord],
    column: &str,
    low: i64,
    high: i64,
) -> QueryResult<Vec<PatientRecord>> {
    let column = column
        .parse::<NumericColumn>()
        .map_err(|err| QueryError::InvalidColumn(err.0))?;
    Ok(filter_by(rows, column, low, high))
}

/// Typed form of [`filter_range`].
pub fn filter_by(
    rows: &[PatientRecord],
    column: NumericColumn,
    low: i64,
    high: i64,
) -> Vec<PatientRecord> {
    rows.iter()
        .filter(|r| (low..=high).contains(&r.value(column)))
        .cloned()
        .collect()
}

/// Observed `(min, max)` of `column`; `None` on an empty table.
pub fn column_bounds(rows: &[PatientRecord], column: NumericColumn) -> Option<(i64, i64)> {
    rows.iter().map(|r| r.value(column)).fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}
