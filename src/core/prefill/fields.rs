//! Provider field table
//!
//! Maps canonical record fields to the opaque field identifiers of the
//! mobility procedure. Identifiers are fixed by the procedure definition.

use crate::domain::{CanonicalRecord, NormalizedDate};
use serde_json::Value;
use std::collections::BTreeMap;

pub const REGION: &str = "champ_Q2hhbXAtMzM0ODUwMg";
pub const SALUTATION: &str = "champ_Q2hhbXAtMTAzMjQ0Ng";
pub const LAST_NAME: &str = "champ_Q2hhbXAtNzg1Mjcx";
pub const FIRST_NAME: &str = "champ_Q2hhbXAtNzg1Mjcy";
pub const BIRTH_DATE: &str = "champ_Q2hhbXAtNjI2NjMx";
pub const PROGRAM_LABEL: &str = "champ_Q2hhbXAtMjc4NDc3MQ";
pub const IS_APPRENTICE: &str = "champ_Q2hhbXAtMzAwMjA2MA";
pub const STATUS_LABEL: &str = "champ_Q2hhbXAtMTAzMjQ0NQ";
pub const ERASMUS_PROJECT: &str = "champ_Q2hhbXAtNDcwODc3MA";
pub const ERASMUS_CHARTER: &str = "champ_Q2hhbXAtNDcwODc3MQ";
pub const IS_HYBRID: &str = "champ_Q2hhbXAtMjE0MTIxNg";
pub const MOBILITY_TYPE: &str = "champ_Q2hhbXAtNzEyMjc0";
pub const DEPARTURE_DATE: &str = "champ_Q2hhbXAtNjI2Njg2";
pub const RETURN_DATE: &str = "champ_Q2hhbXAtNjI2Njg4";
pub const DESTINATION_ZONE: &str = "champ_Q2hhbXAtNDczNTI1MA";
pub const HOST_COUNTRY: &str = "champ_Q2hhbXAtNDczNTAyNg";

/// Builds the case-creation body
///
/// Absent dates and an unset salutation are left out. Empty strings are
/// sent as-is. Flags use the provider's conventions: `"true"`/`"false"`
/// for checkboxes and `"Oui"`/`"Non"` for the hybrid yes/no field.
pub fn prefill_fields(record: &CanonicalRecord) -> BTreeMap<&'static str, Value> {
    let entries: [(&'static str, Option<Value>); 16] = [
        (REGION, Some(text(&record.region))),
        (
            SALUTATION,
            record.salutation.map(|s| text(s.provider_value())),
        ),
        (LAST_NAME, Some(text(&record.last_name))),
        (FIRST_NAME, Some(text(&record.first_name))),
        (BIRTH_DATE, date(record.birth_date.as_ref())),
        (PROGRAM_LABEL, Some(text(&record.mobility_program_label))),
        (IS_APPRENTICE, Some(checkbox(record.is_apprentice))),
        (STATUS_LABEL, Some(text(&record.participant_status_label))),
        (ERASMUS_PROJECT, Some(checkbox(record.is_erasmus_project))),
        (ERASMUS_CHARTER, Some(checkbox(record.erasmus_charter_accepted))),
        (
            IS_HYBRID,
            Some(text(if record.is_hybrid { "Oui" } else { "Non" })),
        ),
        (MOBILITY_TYPE, Some(text(&record.mobility_type_label))),
        (DEPARTURE_DATE, date(record.departure_date.as_ref())),
        (RETURN_DATE, date(record.return_date.as_ref())),
        (DESTINATION_ZONE, Some(text(&record.destination_zone))),
        (HOST_COUNTRY, Some(text(&record.host_country))),
    ];

    entries
        .into_iter()
        .filter_map(|(id, value)| value.map(|v| (id, v)))
        .collect()
}

fn text(value: &str) -> Value {
    Value::String(value.to_string())
}

fn checkbox(value: bool) -> Value {
    text(if value { "true" } else { "false" })
}

/// Dates go out as `YYYY-MM-DD`; unparsed text is passed through
fn date(value: Option<&NormalizedDate>) -> Option<Value> {
    value.map(|d| Value::String(d.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::mapping::{ColumnMap, FieldMapper, MappingPolicy};
    use crate::domain::RawRecord;

    fn record(raw: RawRecord) -> CanonicalRecord {
        FieldMapper::new(ColumnMap::relational(), MappingPolicy::link()).map_to_canonical(&raw)
    }

    #[test]
    fn test_complete_record_fills_every_field() {
        let fields = prefill_fields(&record(
            RawRecord::new()
                .with("civilite", "Mme")
                .with("nom", "DUPONT")
                .with("date_naissance", "2003-02-11")
                .with("date_depart", "2025-03-01")
                .with("date_retour", "2025-06-30"),
        ));
        assert_eq!(fields.len(), 16);
        assert_eq!(fields[SALUTATION], "Mme");
        assert_eq!(fields[BIRTH_DATE], "2003-02-11");
    }

    #[test]
    fn test_nulls_are_dropped() {
        let fields = prefill_fields(&record(RawRecord::new().with("nom", "DUPONT")));
        for id in [SALUTATION, BIRTH_DATE, DEPARTURE_DATE, RETURN_DATE] {
            assert!(!fields.contains_key(id), "{id} should be dropped");
        }
        assert_eq!(fields.len(), 12);
        // empty strings are still sent
        assert_eq!(fields[FIRST_NAME], "");
        assert_eq!(fields[HOST_COUNTRY], "");
    }

    #[test]
    fn test_constants_and_flags() {
        let fields = prefill_fields(&record(
            RawRecord::new()
                .with("format_mobilite", "Mobilité physique")
                .with("statut_participant", "apprenti"),
        ));
        assert_eq!(fields[REGION], "Occitanie");
        assert_eq!(fields[DESTINATION_ZONE], "Pays membre de l'Union Européenne");
        assert_eq!(fields[ERASMUS_PROJECT], "true");
        assert_eq!(fields[ERASMUS_CHARTER], "true");
        assert_eq!(fields[IS_HYBRID], "Non");
        assert_eq!(fields[IS_APPRENTICE], "true");
        assert_eq!(fields[STATUS_LABEL], "Apprenti");
    }

    #[test]
    fn test_unparsed_date_is_passed_through() {
        let fields = prefill_fields(&record(RawRecord::new().with("date_depart", "mars 2025")));
        assert_eq!(fields[DEPARTURE_DATE], "mars 2025");
    }
}
