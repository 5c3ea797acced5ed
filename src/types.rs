//! Shared primitive ids, breach status, and the filterable column set.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Opaque patient identifier as it appears in the `ID` column.
pub type PatientId = String;

/// Header of the identifier column.
pub const ID_HEADER: &str = "ID";
/// Header of the breach status column.
pub const BREACH_HEADER: &str = "Breachornot";
/// Header of the derived breach column some tools write back; dropped on load.
pub const BREACH_BINARY_HEADER: &str = "Breach_binary";

/// Whether a visit exceeded the department's target time.
///
/// Text other than `non-breach` / `breach` is kept verbatim in
/// [`BreachStatus::Unrecognised`] so a rewrite never alters it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BreachStatus {
    /// Seen within target.
    NonBreach,
    /// Target exceeded.
    Breach,
    /// Any other text found in the backing file.
    Unrecognised(String),
}

impl BreachStatus {
    /// Text written to the backing file.
    pub fn as_str(&self) -> &str {
        match self {
            Self::NonBreach => "non-breach",
            Self::Breach => "breach",
            Self::Unrecognised(raw) => raw,
        }
    }

    /// Derived 0/1 value; `None` for unrecognised text.
    pub fn binary(&self) -> Option<u8> {
        match self {
            Self::NonBreach => Some(0),
            Self::Breach => Some(1),
            Self::Unrecognised(_) => None,
        }
    }
}

impl From<String> for BreachStatus {
    fn from(value: String) -> Self {
        match value.as_str() {
            "non-breach" => Self::NonBreach,
            "breach" => Self::Breach,
            _ => Self::Unrecognised(value),
        }
    }
}

impl From<&str> for BreachStatus {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<BreachStatus> for String {
    fn from(value: BreachStatus) -> Self {
        match value {
            BreachStatus::Unrecognised(raw) => raw,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for BreachStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Integer columns a range filter may target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericColumn {
    /// `Age`.
    Age,
    /// `LoS`, minutes in the department.
    LengthOfStay,
    /// `noofinvestigation`.
    InvestigationCount,
    /// `nooftreatment`.
    TreatmentCount,
    /// `noofpatients`.
    PatientCount,
}

impl NumericColumn {
    /// Every filterable column, in backing-file order.
    pub const ALL: [NumericColumn; 5] = [
        Self::Age,
        Self::LengthOfStay,
        Self::InvestigationCount,
        Self::TreatmentCount,
        Self::PatientCount,
    ];

    /// Column header in the backing file.
    pub fn header(self) -> &'static str {
        match self {
            Self::Age => "Age",
            Self::LengthOfStay => "LoS",
            Self::InvestigationCount => "noofinvestigation",
            Self::TreatmentCount => "nooftreatment",
            Self::PatientCount => "noofpatients",
        }
    }

    /// Field name used by the library API.
    pub fn field_name(self) -> &'static str {
        match self {
            Self::Age => "age",
            Self::LengthOfStay => "length_of_stay",
            Self::InvestigationCount => "investigation_count",
            Self::TreatmentCount => "treatment_count",
            Self::PatientCount => "patient_count",
        }
    }
}

impl fmt::Display for NumericColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

/// Error returned when a name is outside the filterable column set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownColumn(pub String);

impl FromStr for NumericColumn {
    type Err = UnknownColumn;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.field_name() == s || c.header() == s)
            .ok_or_else(|| UnknownColumn(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breach_status_keeps_unknown_text() {
        let status = BreachStatus::from("Breach ");
        assert_eq!(status, BreachStatus::Unrecognised("Breach ".to_string()));
        assert_eq!(status.binary(), None);
        assert_eq!(String::from(status), "Breach ");
    }

    #[test]
    fn column_parses_field_and_header_names() {
        assert_eq!("LoS".parse::<NumericColumn>(), Ok(NumericColumn::LengthOfStay));
        assert_eq!(
            "length_of_stay".parse::<NumericColumn>(),
            Ok(NumericColumn::LengthOfStay)
        );
        assert_eq!(
            "ID".parse::<NumericColumn>(),
            Err(UnknownColumn("ID".to_string()))
        );
    }
}
