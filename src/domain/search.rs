//! Search key validation
//!
//! Learner names are stored upper-cased; the key normalizes the name the same
//! way before it reaches a store. Validation happens here, before any I/O.

use crate::domain::ids::CaseNumber;
use crate::domain::{PrefillError, Result};
use serde::Serialize;

/// Human-provided search criteria
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchKey {
    last_name: String,
    institution: Option<String>,
    case_number: Option<CaseNumber>,
}

impl SearchKey {
    /// Builds a validated search key
    ///
    /// # Errors
    ///
    /// Returns [`PrefillError::Validation`] when the name is empty or contains
    /// characters other than letters, spaces, `-` and `'`, when the case number
    /// is malformed, or when neither an institution nor a case number is given.
    ///
    /// # Examples
    ///
    /// ```
    /// use dossier_prefill::domain::SearchKey;
    ///
    /// let key = SearchKey::new("Dupont", Some("EPLEFPA Toulouse"), None).unwrap();
    /// assert_eq!(key.last_name(), "DUPONT");
    /// ```
    pub fn new(
        last_name: &str,
        institution: Option<&str>,
        case_number: Option<&str>,
    ) -> Result<Self> {
        let last_name = normalize_last_name(last_name)?;

        let institution = institution
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        let case_number = case_number
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(CaseNumber::new)
            .transpose()
            .map_err(PrefillError::Validation)?;

        if institution.is_none() && case_number.is_none() {
            return Err(PrefillError::Validation(
                "An institution is required when no case number is given".to_string(),
            ));
        }

        Ok(Self {
            last_name,
            institution,
            case_number,
        })
    }

    /// Upper-cased learner last name
    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    /// Institution, if given
    pub fn institution(&self) -> Option<&str> {
        self.institution.as_deref()
    }

    /// Case number, if given
    pub fn case_number(&self) -> Option<&CaseNumber> {
        self.case_number.as_ref()
    }
}

/// Checks that a name only contains letters, spaces, hyphens and apostrophes
pub fn is_valid_name(name: &str) -> bool {
    !name.trim().is_empty()
        && name
            .chars()
            .all(|c| c.is_alphabetic() || c.is_whitespace() || c == '-' || c == '\'')
}

/// Validates and upper-cases a last name the way stores keep it
pub fn normalize_last_name(name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(PrefillError::Validation(
            "Last name cannot be empty".to_string(),
        ));
    }
    if !is_valid_name(trimmed) {
        return Err(PrefillError::Validation(format!(
            "Invalid last name '{trimmed}': only letters, spaces, '-' and ''' are allowed"
        )));
    }
    Ok(trimmed.to_uppercase())
}
