//! Record resolution
//!
//! Turns a human search key into zero, one or several store rows:
//!
//! 1. Build an AND filter from every supplied key field
//! 2. Query the store
//! 3. No row: if a case number was given, look it up alone to tell a name
//!    mismatch from an unknown case number
//! 4. One row: normalize it
//! 5. Several rows: return lightweight summaries; [`RecordResolver::select`]
//!    normalizes the chosen one without another query
//!
//! The resolver is read-only and keeps no state between calls. Caller-side
//! state across searches lives in [`SearchSession`].

pub mod outcome;
pub mod session;

pub use outcome::{CaseSummary, NotFoundReason, ResolutionOutcome};
pub use session::SearchSession;

use crate::adapters::store::{RecordStore, StoreFilter};
use crate::core::dates::normalize_date_str;
use crate::core::mapping::{FieldMapper, MappingPolicy, SourceField};
use crate::domain::{
    normalize_last_name, CanonicalRecord, CaseNumber, NormalizedDate, PrefillError, RawRecord,
    Result, SearchKey,
};
use std::sync::Arc;

/// Resolves search keys against one record store
pub struct RecordResolver {
    store: Arc<dyn RecordStore>,
    mapper: FieldMapper,
}

impl RecordResolver {
    /// Binds a resolver to a store, mapping rows with the store's columns
    pub fn new(store: Arc<dyn RecordStore>, policy: MappingPolicy) -> Self {
        let mapper = FieldMapper::new(store.columns().clone(), policy);
        Self { store, mapper }
    }

    pub fn mapper(&self) -> &FieldMapper {
        &self.mapper
    }

    pub fn store(&self) -> &Arc<dyn RecordStore> {
        &self.store
    }

    /// Resolves a validated search key
    ///
    /// # Errors
    ///
    /// Only store failures are errors; finding nothing is an outcome.
    pub async fn resolve(&self, key: &SearchKey) -> Result<ResolutionOutcome> {
        let filter = StoreFilter::new()
            .with(SourceField::LastName, key.last_name())
            .with_opt(SourceField::Institution, key.institution())
            .with_opt(SourceField::CaseNumber, key.case_number().map(CaseNumber::as_str));

        let rows = self.store.query(&filter).await?;

        if rows.is_empty() {
            let reason = match key.case_number() {
                Some(case_number) => {
                    let by_number = StoreFilter::new()
                        .with(SourceField::CaseNumber, case_number.as_str());
                    if self.store.query(&by_number).await?.is_empty() {
                        NotFoundReason::CaseNumberUnknown
                    } else {
                        NotFoundReason::CaseNumberNameMismatch
                    }
                }
                None => NotFoundReason::NoMatch,
            };
            tracing::info!(reason = ?reason, "No record found");
            return Ok(ResolutionOutcome::NotFound(reason));
        }

        Ok(self.classify(rows))
    }

    /// Looks a case up by its number alone
    pub async fn find_by_case_number(&self, case_number: &CaseNumber) -> Result<ResolutionOutcome> {
        let filter = StoreFilter::new().with(SourceField::CaseNumber, case_number.as_str());
        let rows = self.store.query(&filter).await?;

        if rows.is_empty() {
            tracing::info!(case_number = %case_number, "Unknown case number");
            return Ok(ResolutionOutcome::NotFound(NotFoundReason::CaseNumberUnknown));
        }
        Ok(self.classify(rows))
    }

    /// Normalizes the candidate whose record id or case number is `selector`
    ///
    /// # Errors
    ///
    /// Returns [`PrefillError::NotFound`] when no candidate matches.
    pub fn select(&self, summaries: &[CaseSummary], selector: &str) -> Result<CanonicalRecord> {
        summaries
            .iter()
            .find(|summary| summary.matches(selector))
            .map(|summary| self.mapper.map_to_canonical(&summary.raw_fields))
            .ok_or_else(|| {
                PrefillError::NotFound(format!("No candidate with id or case number '{selector}'"))
            })
    }

    /// Records whose departure date is `date`, optionally in one institution
    ///
    /// # Errors
    ///
    /// Returns [`PrefillError::Validation`] when `date` is not a recognizable
    /// calendar date.
    pub async fn find_departures(
        &self,
        date: &str,
        institution: Option<&str>,
    ) -> Result<Vec<CanonicalRecord>> {
        let wanted = match normalize_date_str(date) {
            Some(NormalizedDate::Date(d)) => d,
            _ => {
                return Err(PrefillError::Validation(format!(
                    "Invalid departure date '{date}', expected YYYY-MM-DD or DD/MM/YYYY"
                )))
            }
        };

        let institution = institution.map(str::trim).filter(|s| !s.is_empty());
        let filter = StoreFilter::new().with_opt(SourceField::Institution, institution);

        // Date encodings differ per row, so comparison happens after normalization
        let records: Vec<CanonicalRecord> = self
            .store
            .query(&filter)
            .await?
            .iter()
            .filter(|raw| {
                self.mapper
                    .date(raw, SourceField::DepartureDate)
                    .and_then(|d| d.as_date())
                    == Some(wanted)
            })
            .map(|raw| self.mapper.map_to_canonical(raw))
            .collect();

        tracing::info!(date = %wanted, count = records.len(), "Departures found");
        Ok(records)
    }

    /// Distinct institutions, for every learner or for one last name
    ///
    /// # Errors
    ///
    /// Returns [`PrefillError::Validation`] for a malformed name.
    pub async fn list_institutions(&self, last_name: Option<&str>) -> Result<Vec<String>> {
        let filter = match last_name {
            Some(name) => StoreFilter::new().with(SourceField::LastName, normalize_last_name(name)?),
            None => StoreFilter::new(),
        };
        self.store.list_distinct_institutions(&filter).await
    }

    fn classify(&self, mut rows: Vec<RawRecord>) -> ResolutionOutcome {
        if rows.len() == 1 {
            let raw = rows.remove(0);
            let record = self.mapper.map_to_canonical(&raw);
            let missing = record.missing_required_fields();
            if !missing.is_empty() {
                tracing::warn!(missing = ?missing, "Record is missing required fields");
            }
            return ResolutionOutcome::Single(Box::new(record));
        }

        tracing::info!(count = rows.len(), "Several records match");
        ResolutionOutcome::Ambiguous(
            rows.into_iter()
                .map(|raw| CaseSummary::from_raw(&self.mapper, raw))
                .collect(),
        )
    }
}
