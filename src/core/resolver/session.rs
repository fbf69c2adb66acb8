//! Caller-held search state
//!
//! Interactive callers search, look at candidates, then pick one. Instead of
//! keeping that context in ambient globals, the caller owns a
//! [`SearchSession`] and passes it to every step.

use super::{CaseSummary, RecordResolver, ResolutionOutcome};
use crate::domain::{normalize_last_name, CanonicalRecord, PrefillError, Result, SearchKey};

#[derive(Debug, Clone, Default)]
pub struct SearchSession {
    /// Last name the institution list was fetched for
    last_name: Option<String>,
    institutions: Vec<String>,
    /// Candidates of the last ambiguous search
    pending: Vec<CaseSummary>,
    history: Vec<SearchKey>,
}

impl SearchSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Institutions known for `last_name`
    ///
    /// The store is only queried again when the name differs from the
    /// previous call.
    pub async fn institutions_for(
        &mut self,
        resolver: &RecordResolver,
        last_name: &str,
    ) -> Result<&[String]> {
        let normalized = normalize_last_name(last_name)?;
        if self.last_name.as_deref() != Some(normalized.as_str()) {
            self.institutions = resolver.list_institutions(Some(&normalized)).await?;
            self.last_name = Some(normalized);
        }
        Ok(&self.institutions)
    }

    /// Runs a search and remembers ambiguous candidates
    pub async fn search(
        &mut self,
        resolver: &RecordResolver,
        key: SearchKey,
    ) -> Result<ResolutionOutcome> {
        let outcome = resolver.resolve(&key).await?;
        self.history.push(key);
        self.pending = match &outcome {
            ResolutionOutcome::Ambiguous(candidates) => candidates.clone(),
            _ => Vec::new(),
        };
        Ok(outcome)
    }

    /// Picks one of the pending candidates by record id or case number
    ///
    /// # Errors
    ///
    /// Returns [`PrefillError::Validation`] when there is nothing to choose
    /// from, and [`PrefillError::NotFound`] for an unknown selector.
    pub fn choose(&mut self, resolver: &RecordResolver, selector: &str) -> Result<CanonicalRecord> {
        if self.pending.is_empty() {
            return Err(PrefillError::Validation(
                "No pending candidates to choose from".to_string(),
            ));
        }
        let record = resolver.select(&self.pending, selector)?;
        self.pending.clear();
        Ok(record)
    }

    /// Keeps candidates obtained outside [`SearchSession::search`] for a later
    /// [`SearchSession::choose`]
    pub fn remember(&mut self, candidates: Vec<CaseSummary>) {
        self.pending = candidates;
    }

    pub fn pending(&self) -> &[CaseSummary] {
        &self.pending
    }

    /// Search keys in the order they were submitted
    pub fn history(&self) -> &[SearchKey] {
        &self.history
    }

    /// Forgets everything but the history
    pub fn reset(&mut self) {
        self.last_name = None;
        self.institutions.clear();
        self.pending.clear();
    }
}
