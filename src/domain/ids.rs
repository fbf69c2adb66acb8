//! Identifier newtypes
//!
//! Stores identify rows by an internal id (a numeric Grist row id, a
//! `dossier_id` column in the relational table) while humans refer to a case
//! by its case number. Both are kept as trimmed strings so that numeric and
//! textual backends compare the same way.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Store-internal record identifier
///
/// # Examples
///
/// ```
/// use dossier_prefill::domain::ids::RecordId;
///
/// let id = RecordId::new(" 42 ").unwrap();
/// assert_eq!(id.as_str(), "42");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordId(String);

impl RecordId {
    /// Creates a new RecordId, rejecting empty values
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into().trim().to_string();
        if id.is_empty() {
            return Err("Record ID cannot be empty".to_string());
        }
        Ok(Self(id))
    }

    /// Returns the id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RecordId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Case number of a dossier, as known by the applicant
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CaseNumber(String);

impl CaseNumber {
    /// Creates a new CaseNumber
    ///
    /// Case numbers are digits, optionally with a leading `#` that users tend
    /// to copy from notification e-mails.
    pub fn new(value: impl Into<String>) -> Result<Self, String> {
        let value = value.into();
        let trimmed = value.trim().trim_start_matches('#').trim();
        if trimmed.is_empty() {
            return Err("Case number cannot be empty".to_string());
        }
        if !trimmed.chars().all(|c| c.is_ascii_digit()) {
            return Err(format!("Invalid case number '{value}': expected digits only"));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the case number as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CaseNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CaseNumber {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}
