//! Grist record store
//!
//! Filters are pushed to the server as Grist `filter` JSON. Numeric
//! identifiers are sent both as text and as numbers so that they match
//! whichever type the column has.

use super::client::GristClient;
use crate::adapters::store::{RecordStore, StoreFilter};
use crate::core::mapping::{ColumnMap, SourceField};
use crate::domain::{RawRecord, Result};
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use std::time::Instant;

/// Grist store
pub struct GristStore {
    client: GristClient,
    columns: ColumnMap,
}

impl GristStore {
    pub fn new(client: GristClient, columns: ColumnMap) -> Self {
        Self { client, columns }
    }

    async fn fetch(&self, filter: &StoreFilter) -> Result<Vec<RawRecord>> {
        let grist_filter = build_filter(&self.columns, filter);
        let id_column = self.columns.column(SourceField::RecordId);
        Ok(self
            .client
            .fetch_records(&grist_filter)
            .await?
            .into_iter()
            .map(|record| record.into_raw_record(id_column))
            .collect())
    }
}

#[async_trait]
impl RecordStore for GristStore {
    fn backend_name(&self) -> &'static str {
        "grist"
    }

    fn columns(&self) -> &ColumnMap {
        &self.columns
    }

    async fn test_connection(&self) -> Result<()> {
        self.client.test_connection().await
    }

    async fn query(&self, filter: &StoreFilter) -> Result<Vec<RawRecord>> {
        let started = Instant::now();
        let records = self.fetch(filter).await?;
        crate::log_store_query!(self.backend_name(), filter.len(), records.len(), started.elapsed());
        Ok(records)
    }

    async fn list_distinct_institutions(&self, filter: &StoreFilter) -> Result<Vec<String>> {
        let started = Instant::now();
        let institution_column = self.columns.column(SourceField::Institution);

        let institutions: BTreeSet<String> = self
            .fetch(filter)
            .await?
            .iter()
            .filter_map(|record| record.text(institution_column))
            .filter(|name| !name.trim().is_empty())
            .collect();

        crate::log_store_query!(
            self.backend_name(),
            filter.len(),
            institutions.len(),
            started.elapsed()
        );
        Ok(institutions.into_iter().collect())
    }
}

/// Translates a store filter to the Grist `{"column": [values]}` form
fn build_filter(columns: &ColumnMap, filter: &StoreFilter) -> Map<String, Value> {
    filter
        .conditions()
        .iter()
        .map(|(field, value)| {
            let mut accepted = vec![Value::String(value.clone())];
            if matches!(field, SourceField::RecordId | SourceField::CaseNumber) {
                if let Ok(number) = value.parse::<i64>() {
                    accepted.push(Value::from(number));
                }
            }
            (columns.column(*field).to_string(), Value::Array(accepted))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_build_filter() {
        let filter = StoreFilter::new()
            .with(SourceField::LastName, "DUPONT")
            .with(SourceField::CaseNumber, "123");
        let grist = build_filter(&ColumnMap::spreadsheet(), &filter);
        assert_eq!(
            Value::Object(grist),
            json!({"nom_participant": ["DUPONT"], "dossier_number": ["123", 123]})
        );
    }

    #[test]
    fn test_empty_filter() {
        assert!(build_filter(&ColumnMap::spreadsheet(), &StoreFilter::new()).is_empty());
    }
}
