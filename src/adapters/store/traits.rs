//! Record store abstraction
//!
//! This module defines the trait that store backends must implement to be
//! queried by the record resolver.

use crate::core::mapping::{ColumnMap, SourceField};
use crate::domain::{RawRecord, Result};
use async_trait::async_trait;

/// Exact-match filter over semantic fields, combined with AND
///
/// Each store translates fields to its own column names through its
/// [`ColumnMap`]. An empty filter matches every row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreFilter {
    conditions: Vec<(SourceField, String)>,
}

impl StoreFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an equality condition, replacing any previous one on the same field
    pub fn with(mut self, field: SourceField, value: impl Into<String>) -> Self {
        let value = value.into();
        match self.conditions.iter_mut().find(|(f, _)| *f == field) {
            Some(existing) => existing.1 = value,
            None => self.conditions.push((field, value)),
        }
        self
    }

    /// Adds a condition only when a value is present
    pub fn with_opt(self, field: SourceField, value: Option<&str>) -> Self {
        match value {
            Some(value) => self.with(field, value),
            None => self,
        }
    }

    pub fn conditions(&self) -> &[(SourceField, String)] {
        &self.conditions
    }

    pub fn get(&self, field: SourceField) -> Option<&str> {
        self.conditions
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Conditions translated to backend column names
    pub fn columns<'a>(&'a self, map: &'a ColumnMap) -> impl Iterator<Item = (&'a str, &'a str)> {
        self.conditions
            .iter()
            .map(move |(field, value)| (map.column(*field), value.as_str()))
    }
}

/// Read-only access to mobility records
///
/// Implementations open whatever connection they need per call and keep no
/// state between calls.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Backend name used in logs and CLI output
    fn backend_name(&self) -> &'static str;

    /// Column table used to translate filters and read rows
    fn columns(&self) -> &ColumnMap;

    /// Test the store connection
    ///
    /// # Errors
    ///
    /// Returns a store error if the backend cannot be reached or rejects the
    /// credentials.
    async fn test_connection(&self) -> Result<()>;

    /// Rows matching every condition of the filter, in store order
    ///
    /// # Errors
    ///
    /// Returns a store error on any transport or query failure.
    async fn query(&self, filter: &StoreFilter) -> Result<Vec<RawRecord>>;

    /// Distinct, non-empty institution names of matching rows, sorted
    ///
    /// # Errors
    ///
    /// Returns a store error on any transport or query failure.
    async fn list_distinct_institutions(&self, filter: &StoreFilter) -> Result<Vec<String>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_replaces_same_field() {
        let filter = StoreFilter::new()
            .with(SourceField::LastName, "DUPONT")
            .with(SourceField::LastName, "MARTIN");
        assert_eq!(filter.len(), 1);
        assert_eq!(filter.get(SourceField::LastName), Some("MARTIN"));
    }

    #[test]
    fn test_filter_translates_columns() {
        let filter = StoreFilter::new()
            .with(SourceField::LastName, "DUPONT")
            .with_opt(SourceField::Institution, None)
            .with_opt(SourceField::CaseNumber, Some("123"));
        let map = ColumnMap::spreadsheet();
        let columns: Vec<_> = filter.columns(&map).collect();
        assert_eq!(
            columns,
            vec![("nom_participant", "DUPONT"), ("dossier_number", "123")]
        );
    }
}
