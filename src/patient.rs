//! Patient record, draft, update, and table types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::{BREACH_HEADER, BreachStatus, ID_HEADER, NumericColumn, PatientId};

/// One row of the backing table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientRecord {
    /// Lookup key; not guaranteed unique.
    pub id: PatientId,
    /// Patient age in years.
    pub age: i64,
    /// Minutes spent in the department.
    pub length_of_stay: i64,
    /// Number of investigations performed.
    pub investigation_count: i64,
    /// Number of treatments given.
    pub treatment_count: i64,
    /// Contextual patient count carried by the row.
    pub patient_count: i64,
    /// Breach outcome.
    pub breach_status: BreachStatus,
    /// 0/1 mirror of `breach_status`, computed at load.
    pub breach_binary: Option<u8>,
    /// Columns the crate does not model, keyed by header.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, String>,
}

impl PatientRecord {
    /// Returns the value of a filterable column.
    pub fn value(&self, column: NumericColumn) -> i64 {
        match column {
            NumericColumn::Age => self.age,
            NumericColumn::LengthOfStay => self.length_of_stay,
            NumericColumn::InvestigationCount => self.investigation_count,
            NumericColumn::TreatmentCount => self.treatment_count,
            NumericColumn::PatientCount => self.patient_count,
        }
    }

    /// Recomputes `breach_binary` from `breach_status`.
    pub fn refresh_breach_binary(&mut self) {
        self.breach_binary = self.breach_status.binary();
    }
}

/// Payload used to build a [`PatientRecord`] outside of a file load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatientDraft {
    /// Lookup key.
    pub id: PatientId,
    /// Patient age in years.
    pub age: i64,
    /// Minutes spent in the department.
    pub length_of_stay: i64,
    /// Number of investigations performed.
    pub investigation_count: i64,
    /// Number of treatments given.
    pub treatment_count: i64,
    /// Contextual patient count.
    pub patient_count: i64,
    /// Breach outcome.
    pub breach_status: BreachStatus,
}

impl From<PatientDraft> for PatientRecord {
    fn from(draft: PatientDraft) -> Self {
        let breach_binary = draft.breach_status.binary();
        Self {
            id: draft.id,
            age: draft.age,
            length_of_stay: draft.length_of_stay,
            investigation_count: draft.investigation_count,
            treatment_count: draft.treatment_count,
            patient_count: draft.patient_count,
            breach_status: draft.breach_status,
            breach_binary,
            extra: BTreeMap::new(),
        }
    }
}

/// How `breach_binary` reacts when an update changes `breach_status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BreachBinaryPolicy {
    /// Keep the value computed at load, even if it goes stale.
    #[default]
    PreserveLoaded,
    /// Recompute from the new status on every update.
    RecomputeOnUpdate,
}

/// The five editable fields of a record. Every field overwrites.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientUpdate {
    /// Replacement age.
    pub age: i64,
    /// Replacement length of stay.
    pub length_of_stay: i64,
    /// Replacement investigation count.
    pub investigation_count: i64,
    /// Replacement treatment count.
    pub treatment_count: i64,
    /// Replacement breach status.
    pub breach_status: BreachStatus,
}

impl PatientUpdate {
    /// Captures the editable fields of `rec` as they are now.
    pub fn capture_from(rec: &PatientRecord) -> Self {
        Self {
            age: rec.age,
            length_of_stay: rec.length_of_stay,
            investigation_count: rec.investigation_count,
            treatment_count: rec.treatment_count,
            breach_status: rec.breach_status.clone(),
        }
    }

    /// Editable fields of `current`, with every field set in `overrides` replaced.
    pub fn merged(current: &PatientRecord, overrides: PatientOverrides) -> Self {
        let mut update = Self::capture_from(current);
        update.age = overrides.age.unwrap_or(update.age);
        update.length_of_stay = overrides.length_of_stay.unwrap_or(update.length_of_stay);
        update.investigation_count = overrides
            .investigation_count
            .unwrap_or(update.investigation_count);
        update.treatment_count = overrides.treatment_count.unwrap_or(update.treatment_count);
        if let Some(status) = overrides.breach_status {
            update.breach_status = status;
        }
        update
    }

    /// Applies this update in place to `rec`.
    pub fn apply_to(&self, rec: &mut PatientRecord, policy: BreachBinaryPolicy) {
        rec.age = self.age;
        rec.length_of_stay = self.length_of_stay;
        rec.investigation_count = self.investigation_count;
        rec.treatment_count = self.treatment_count;
        rec.breach_status = self.breach_status.clone();
        if policy == BreachBinaryPolicy::RecomputeOnUpdate {
            rec.refresh_breach_binary();
        }
    }
}

/// Partial edit; `None` keeps the record's current value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientOverrides {
    /// New age.
    pub age: Option<i64>,
    /// New length of stay.
    pub length_of_stay: Option<i64>,
    /// New investigation count.
    pub investigation_count: Option<i64>,
    /// New treatment count.
    pub treatment_count: Option<i64>,
    /// New breach status.
    pub breach_status: Option<BreachStatus>,
}

/// Ordered rows plus the header row of the backing file.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Table {
    /// Column order used when the table is written back.
    pub headers: Vec<String>,
    /// Rows in file order.
    pub rows: Vec<PatientRecord>,
}

impl Table {
    /// Builds a table with the standard column set.
    pub fn new(rows: Vec<PatientRecord>) -> Self {
        Self {
            headers: Self::standard_headers(),
            rows,
        }
    }

    /// Required columns, in the order the dataset ships them.
    pub fn standard_headers() -> Vec<String> {
        std::iter::once(ID_HEADER)
            .chain(NumericColumn::ALL.iter().map(|c| c.header()))
            .chain(std::iter::once(BREACH_HEADER))
            .map(str::to_string)
            .collect()
    }
}
