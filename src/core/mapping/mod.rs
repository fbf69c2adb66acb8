//! Field mapping
//!
//! Converts a [`RawRecord`] read from any store into a [`CanonicalRecord`].
//! The backend column table and the mapping policy are injected at
//! construction, so one mapper instance is bound to one backend:
//!
//! - **Columns** ([`ColumnMap`]): backend column name of each semantic field
//! - **Policy** ([`MappingPolicy`]): default labels, versioned
//! - **Rules** ([`rules`]): pure derivation functions
//!
//! Mapping never fails. Missing strings become `""`, unparseable dates are
//! passed through, and empty names are reported by
//! [`CanonicalRecord::missing_required_fields`].

pub mod columns;
pub mod policy;
pub mod rules;

pub use columns::{ColumnMap, ColumnOverrides, SourceField};
pub use policy::{MappingPolicy, PolicyName, DESTINATION_ZONE, REGION};

use crate::core::dates::normalize_date;
use crate::domain::{
    CanonicalRecord, CaseNumber, LearnerMobilityKind, NormalizedDate, RawRecord, RecordId,
    Salutation, SourceRef,
};

/// Maps raw store rows to canonical records
#[derive(Debug, Clone)]
pub struct FieldMapper {
    columns: ColumnMap,
    policy: MappingPolicy,
}

impl FieldMapper {
    pub fn new(columns: ColumnMap, policy: MappingPolicy) -> Self {
        Self { columns, policy }
    }

    pub fn columns(&self) -> &ColumnMap {
        &self.columns
    }

    pub fn policy(&self) -> &MappingPolicy {
        &self.policy
    }

    /// Normalizes one raw record
    ///
    /// # Examples
    ///
    /// ```
    /// use dossier_prefill::core::mapping::{ColumnMap, FieldMapper, MappingPolicy};
    /// use dossier_prefill::domain::RawRecord;
    ///
    /// let mapper = FieldMapper::new(ColumnMap::relational(), MappingPolicy::link());
    /// let raw = RawRecord::new()
    ///     .with("nom", "DUPONT")
    ///     .with("statut_participant", "Apprenti");
    ///
    /// let record = mapper.map_to_canonical(&raw);
    /// assert_eq!(record.last_name, "DUPONT");
    /// assert!(record.is_apprentice);
    /// assert_eq!(record.participant_status_label, "Apprenti");
    /// ```
    pub fn map_to_canonical(&self, raw: &RawRecord) -> CanonicalRecord {
        let mobility_format = self.text(raw, SourceField::MobilityFormat);
        let learner_mobility_kind =
            LearnerMobilityKind::parse(&self.text(raw, SourceField::LearnerMobilityKind));
        let participant_status = self.text(raw, SourceField::ParticipantStatus);
        let is_apprentice = rules::is_apprentice(&participant_status);

        CanonicalRecord {
            salutation: Salutation::parse(&self.text(raw, SourceField::Salutation)),
            last_name: self.text(raw, SourceField::LastName),
            first_name: self.text(raw, SourceField::FirstName),
            birth_date: self.date(raw, SourceField::BirthDate),

            is_hybrid: rules::is_hybrid(&mobility_format),
            mobility_format,
            mobility_type_label: rules::mobility_type_label(&learner_mobility_kind).to_string(),
            mobility_program_label: rules::mobility_program_label(
                &learner_mobility_kind,
                &self.policy,
            )
            .to_string(),
            learner_mobility_kind,
            departure_date: self.date(raw, SourceField::DepartureDate),
            return_date: self.date(raw, SourceField::ReturnDate),
            host_country: self.text(raw, SourceField::HostCountry),

            participant_status_label: rules::participant_status_label(is_apprentice, &self.policy)
                .to_string(),
            participant_status,
            is_apprentice,

            institution: self.text(raw, SourceField::Institution),

            region: REGION.to_string(),
            destination_zone: DESTINATION_ZONE.to_string(),
            is_erasmus_project: true,
            erasmus_charter_accepted: true,

            source: self.source_ref(raw),
        }
    }

    /// Text of a semantic field, `""` when absent or null
    pub fn text(&self, raw: &RawRecord, field: SourceField) -> String {
        raw.text(self.columns.column(field)).unwrap_or_default()
    }

    /// Normalized date of a semantic field
    pub fn date(&self, raw: &RawRecord, field: SourceField) -> Option<NormalizedDate> {
        raw.get(self.columns.column(field)).and_then(normalize_date)
    }

    /// Record id and case number of the source row
    ///
    /// Malformed values are dropped rather than failing the mapping.
    pub fn source_ref(&self, raw: &RawRecord) -> SourceRef {
        SourceRef {
            record_id: raw
                .text(self.columns.column(SourceField::RecordId))
                .and_then(|id| RecordId::new(id).ok()),
            case_number: raw
                .text(self.columns.column(SourceField::CaseNumber))
                .and_then(|n| CaseNumber::new(n).ok()),
        }
    }
}
