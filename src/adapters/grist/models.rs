//! Grist REST API models

use crate::domain::RawRecord;
use serde::Deserialize;

/// Body of `GET /api/docs/{doc}/tables/{table}/records`
#[derive(Debug, Clone, Deserialize)]
pub struct RecordsResponse {
    #[serde(default)]
    pub records: Vec<GristRecord>,
}

/// One Grist row
#[derive(Debug, Clone, Deserialize)]
pub struct GristRecord {
    /// Grist row id, not part of `fields`
    pub id: i64,

    #[serde(default)]
    pub fields: RawRecord,
}

impl GristRecord {
    /// Field map with the row id stored under `id_column`
    pub fn into_raw_record(self, id_column: &str) -> RawRecord {
        let mut record = self.fields;
        record.insert(id_column, self.id);
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RawValue;
    use serde_json::json;

    #[test]
    fn test_records_response_parsing() {
        let body = json!({
            "records": [
                {"id": 7, "fields": {"nom_participant": "DUPONT", "date_depart": 1740787200.0}},
                {"id": 8, "fields": {}}
            ]
        });
        let response: RecordsResponse = serde_json::from_value(body).unwrap();
        assert_eq!(response.records.len(), 2);

        let record = response.records[0].clone().into_raw_record("id");
        assert_eq!(record.get("id"), Some(&RawValue::Int(7)));
        assert_eq!(record.text("nom_participant"), Some("DUPONT".to_string()));
        assert_eq!(record.get("date_depart"), Some(&RawValue::Float(1740787200.0)));
    }

    #[test]
    fn test_missing_records_key_means_empty() {
        let response: RecordsResponse = serde_json::from_value(json!({})).unwrap();
        assert!(response.records.is_empty());
    }
}
