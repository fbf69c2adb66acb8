//! Resolution outcomes

use crate::core::mapping::{FieldMapper, SourceField};
use crate::domain::{
    CanonicalRecord, CaseNumber, NormalizedDate, PrefillError, RawRecord, RecordId, Result,
};
use serde::Serialize;
use std::fmt;

/// Why a search found nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NotFoundReason {
    /// No row matched the search criteria
    NoMatch,
    /// The case number exists but belongs to another learner or institution
    CaseNumberNameMismatch,
    /// The case number does not exist at all
    CaseNumberUnknown,
}

impl fmt::Display for NotFoundReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotFoundReason::NoMatch => write!(f, "No record matches the search criteria"),
            NotFoundReason::CaseNumberNameMismatch => write!(
                f,
                "The case number exists but does not match the given name or institution"
            ),
            NotFoundReason::CaseNumberUnknown => write!(f, "No record has this case number"),
        }
    }
}

/// Lightweight view of one candidate row, shown when a search is ambiguous
///
/// The raw fields are kept so that the chosen candidate can be normalized
/// without querying the store again.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaseSummary {
    pub id: Option<RecordId>,
    pub case_number: Option<CaseNumber>,
    pub last_name: String,
    pub first_name: String,
    pub institution: String,
    pub submitted_date: Option<NormalizedDate>,
    #[serde(skip)]
    pub raw_fields: RawRecord,
}

impl CaseSummary {
    pub fn from_raw(mapper: &FieldMapper, raw: RawRecord) -> Self {
        let source = mapper.source_ref(&raw);
        Self {
            id: source.record_id,
            case_number: source.case_number,
            last_name: mapper.text(&raw, SourceField::LastName),
            first_name: mapper.text(&raw, SourceField::FirstName),
            institution: mapper.text(&raw, SourceField::Institution),
            submitted_date: mapper.date(&raw, SourceField::SubmittedDate),
            raw_fields: raw,
        }
    }

    /// True when `selector` is this candidate's record id or case number
    pub fn matches(&self, selector: &str) -> bool {
        let selector = selector.trim();
        self.id.as_ref().is_some_and(|id| id.as_str() == selector)
            || self
                .case_number
                .as_ref()
                .is_some_and(|n| n.as_str() == selector.trim_start_matches('#'))
    }
}

/// Result of a search
#[derive(Debug, Clone, PartialEq)]
pub enum ResolutionOutcome {
    NotFound(NotFoundReason),
    Single(Box<CanonicalRecord>),
    /// Candidates in store order; nothing normalized yet
    Ambiguous(Vec<CaseSummary>),
}

impl ResolutionOutcome {
    /// Turns `NotFound` into a [`PrefillError::NotFound`]
    pub fn into_result(self) -> Result<Self> {
        match self {
            ResolutionOutcome::NotFound(reason) => Err(PrefillError::NotFound(reason.to_string())),
            other => Ok(other),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ResolutionOutcome::NotFound(_))
    }
}
