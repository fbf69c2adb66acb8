//! Raw and canonical record models
//!
//! A [`RawRecord`] is exactly what a store returned for one row: backend column
//! names mapped to loosely-typed scalars. A [`CanonicalRecord`] is the
//! backend-independent shape produced by the field mapper and consumed by the
//! prefill-link builder.

use crate::domain::ids::{CaseNumber, RecordId};
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Untyped scalar value read from a store
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RawValue {
    /// SQL NULL, JSON null, or a missing cell
    Null,
    /// Boolean cell
    Bool(bool),
    /// Integer cell (Grist numeric ids, epoch timestamps, SQL integers)
    Int(i64),
    /// Floating point cell (Grist dates are float epoch seconds)
    Float(f64),
    /// Text cell
    Text(String),
}

impl RawValue {
    /// Converts a JSON value returned by a REST store
    ///
    /// Lists and objects (Grist reference lists, attachments) are kept as their
    /// JSON text so that nothing is silently dropped.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => RawValue::Null,
            Value::Bool(b) => RawValue::Bool(*b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => RawValue::Int(i),
                None => n.as_f64().map(RawValue::Float).unwrap_or(RawValue::Null),
            },
            Value::String(s) => RawValue::Text(s.clone()),
            other => RawValue::Text(other.to_string()),
        }
    }

    /// Returns true for [`RawValue::Null`]
    pub fn is_null(&self) -> bool {
        matches!(self, RawValue::Null)
    }

    /// Renders the value as text, `None` for null
    ///
    /// Integral floats are rendered without a fractional part so that a case
    /// number stored as `12345.0` compares equal to `"12345"`.
    pub fn as_text(&self) -> Option<String> {
        match self {
            RawValue::Null => None,
            RawValue::Bool(b) => Some(b.to_string()),
            RawValue::Int(i) => Some(i.to_string()),
            RawValue::Float(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => {
                Some((*f as i64).to_string())
            }
            RawValue::Float(f) => Some(f.to_string()),
            RawValue::Text(s) => Some(s.clone()),
        }
    }
}

impl<'de> Deserialize<'de> for RawValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(|v| RawValue::from_json(&v))
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        RawValue::Text(s.to_string())
    }
}

impl From<String> for RawValue {
    fn from(s: String) -> Self {
        RawValue::Text(s)
    }
}

impl From<i64> for RawValue {
    fn from(i: i64) -> Self {
        RawValue::Int(i)
    }
}

impl From<f64> for RawValue {
    fn from(f: f64) -> Self {
        RawValue::Float(f)
    }
}

impl<T: Into<RawValue>> From<Option<T>> for RawValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(RawValue::Null)
    }
}

/// One row as returned by a store, keyed by backend column name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRecord(BTreeMap<String, RawValue>);

impl RawRecord {
    /// Creates an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a column value
    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<RawValue>) {
        self.0.insert(column.into(), value.into());
    }

    /// Builder-style variant of [`RawRecord::insert`]
    pub fn with(mut self, column: impl Into<String>, value: impl Into<RawValue>) -> Self {
        self.insert(column, value);
        self
    }

    /// Returns the raw value of a column
    pub fn get(&self, column: &str) -> Option<&RawValue> {
        self.0.get(column)
    }

    /// Returns the text of a column, `None` when absent or null
    pub fn text(&self, column: &str) -> Option<String> {
        self.get(column).and_then(RawValue::as_text)
    }

    /// Iterates over columns in name order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &RawValue)> {
        self.0.iter()
    }

    /// Number of columns
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when the record has no column at all
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, RawValue)> for RawRecord {
    fn from_iter<I: IntoIterator<Item = (String, RawValue)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Result of the date normalizer
///
/// Values that parse become calendar dates; values that do not are kept
/// verbatim for display rather than failing the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalizedDate {
    /// Parsed calendar date
    Date(NaiveDate),
    /// Unrecognised input, passed through unchanged
    Unparsed(String),
}

impl NormalizedDate {
    /// Returns the calendar date, if the input parsed
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            NormalizedDate::Date(d) => Some(*d),
            NormalizedDate::Unparsed(_) => None,
        }
    }

    /// Renders the value the way French forms display dates (`DD/MM/YYYY`)
    pub fn to_display(&self) -> String {
        match self {
            NormalizedDate::Date(d) => d.format("%d/%m/%Y").to_string(),
            NormalizedDate::Unparsed(s) => s.clone(),
        }
    }
}

impl fmt::Display for NormalizedDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NormalizedDate::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            NormalizedDate::Unparsed(s) => write!(f, "{s}"),
        }
    }
}

impl Serialize for NormalizedDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

/// Salutation of the learner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Salutation {
    Mr,
    Ms,
}

impl Salutation {
    /// Parses the free-text salutation found in stores
    ///
    /// Returns `None` for anything that is not clearly one of the two values.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "m" | "m." | "mr" | "mr." | "monsieur" => Some(Salutation::Mr),
            "mme" | "mme." | "ms" | "ms." | "madame" | "mlle" | "mademoiselle" => {
                Some(Salutation::Ms)
            }
            _ => None,
        }
    }

    /// Value expected by the case provider's salutation field
    pub fn provider_value(&self) -> &'static str {
        match self {
            Salutation::Mr => "M.",
            Salutation::Ms => "Mme",
        }
    }
}

/// Learner mobility kind, as entered in the application form
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum LearnerMobilityKind {
    /// `Mobilité de stage (SMT)`
    Traineeship,
    /// `Mobilité d'étude (SMS)`
    Study,
    /// `Mobilité d'apprentissage de courte durée`
    ShortTermLearning,
    /// `Concours de compétence`
    CompetencyContest,
    /// Any other non-empty text
    Other(String),
    /// Empty or missing
    Unspecified,
}

impl LearnerMobilityKind {
    pub const TRAINEESHIP: &'static str = "Mobilité de stage (SMT)";
    pub const STUDY: &'static str = "Mobilité d'étude (SMS)";
    pub const SHORT_TERM_LEARNING: &'static str = "Mobilité d'apprentissage de courte durée";
    pub const COMPETENCY_CONTEST: &'static str = "Concours de compétence";

    /// Classifies the source text (exact, case-sensitive comparison)
    pub fn parse(value: &str) -> Self {
        match value {
            "" => LearnerMobilityKind::Unspecified,
            Self::TRAINEESHIP => LearnerMobilityKind::Traineeship,
            Self::STUDY => LearnerMobilityKind::Study,
            Self::SHORT_TERM_LEARNING => LearnerMobilityKind::ShortTermLearning,
            Self::COMPETENCY_CONTEST => LearnerMobilityKind::CompetencyContest,
            other => LearnerMobilityKind::Other(other.to_string()),
        }
    }

    /// Returns the source text
    pub fn as_str(&self) -> &str {
        match self {
            LearnerMobilityKind::Traineeship => Self::TRAINEESHIP,
            LearnerMobilityKind::Study => Self::STUDY,
            LearnerMobilityKind::ShortTermLearning => Self::SHORT_TERM_LEARNING,
            LearnerMobilityKind::CompetencyContest => Self::COMPETENCY_CONTEST,
            LearnerMobilityKind::Other(s) => s,
            LearnerMobilityKind::Unspecified => "",
        }
    }
}

/// Where a canonical record came from
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SourceRef {
    /// Store-internal row id
    pub record_id: Option<RecordId>,
    /// Case number of the dossier
    pub case_number: Option<CaseNumber>,
}

/// Normalized, backend-independent mobility record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CanonicalRecord {
    // Identity
    pub salutation: Option<Salutation>,
    pub last_name: String,
    pub first_name: String,
    pub birth_date: Option<NormalizedDate>,

    // Mobility
    pub mobility_format: String,
    pub is_hybrid: bool,
    pub learner_mobility_kind: LearnerMobilityKind,
    pub mobility_type_label: String,
    pub mobility_program_label: String,
    pub departure_date: Option<NormalizedDate>,
    pub return_date: Option<NormalizedDate>,
    pub host_country: String,

    // Participant
    pub participant_status: String,
    pub is_apprentice: bool,
    pub participant_status_label: String,

    // Affiliation
    pub institution: String,

    // Policy constants
    pub region: String,
    pub destination_zone: String,
    pub is_erasmus_project: bool,
    pub erasmus_charter_accepted: bool,

    /// Source row reference, not sent to the provider
    pub source: SourceRef,
}

impl CanonicalRecord {
    /// Names of required identity fields that are empty
    ///
    /// Link generation is still allowed: the provider form is reviewed by a
    /// human before submission.
    pub fn missing_required_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.last_name.trim().is_empty() {
            missing.push("last name");
        }
        if self.first_name.trim().is_empty() {
            missing.push("first name");
        }
        missing
    }
}

/// Formats an optional date for display, `Non renseigné` when absent
pub fn display_date(value: Option<&NormalizedDate>) -> String {
    value
        .map(NormalizedDate::to_display)
        .unwrap_or_else(|| "Non renseigné".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_raw_value_from_json() {
        assert_eq!(RawValue::from_json(&json!(null)), RawValue::Null);
        assert_eq!(RawValue::from_json(&json!(12)), RawValue::Int(12));
        assert_eq!(RawValue::from_json(&json!(1.5)), RawValue::Float(1.5));
        assert_eq!(RawValue::from_json(&json!("x")), RawValue::Text("x".into()));
        assert_eq!(
            RawValue::from_json(&json!(["L", 1, 2])),
            RawValue::Text("[\"L\",1,2]".into())
        );
    }

    #[test]
    fn test_raw_value_as_text() {
        assert_eq!(RawValue::Float(12345.0).as_text(), Some("12345".to_string()));
        assert_eq!(RawValue::Float(1.25).as_text(), Some("1.25".to_string()));
        assert_eq!(RawValue::Null.as_text(), None);
    }

    #[test]
    fn test_raw_record_deserializes_mixed_cells() {
        let record: RawRecord =
            serde_json::from_value(json!({"nom": "DUPONT", "n": 3, "d": null})).unwrap();
        assert_eq!(record.text("nom"), Some("DUPONT".to_string()));
        assert_eq!(record.get("n"), Some(&RawValue::Int(3)));
        assert_eq!(record.text("d"), None);
        assert_eq!(record.text("missing"), None);
    }

    #[test]
    fn test_salutation_parse() {
        assert_eq!(Salutation::parse("M."), Some(Salutation::Mr));
        assert_eq!(Salutation::parse("Madame"), Some(Salutation::Ms));
        assert_eq!(Salutation::parse(""), None);
        assert_eq!(Salutation::parse("Dr"), None);
    }

    #[test]
    fn test_mobility_kind_round_trips_source_text() {
        for text in [
            LearnerMobilityKind::TRAINEESHIP,
            LearnerMobilityKind::STUDY,
            "Autre chose",
            "",
        ] {
            assert_eq!(LearnerMobilityKind::parse(text).as_str(), text);
        }
        assert_eq!(
            LearnerMobilityKind::parse("mobilité de stage (smt)"),
            LearnerMobilityKind::Other("mobilité de stage (smt)".to_string())
        );
    }

    #[test]
    fn test_display_date() {
        let date = NormalizedDate::Date(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
        assert_eq!(display_date(Some(&date)), "01/03/2025");
        assert_eq!(date.to_string(), "2025-03-01");
        assert_eq!(display_date(None), "Non renseigné");
    }
}
