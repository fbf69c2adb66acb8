//! Backend column tables
//!
//! The same semantic field is named differently in each store. A [`ColumnMap`]
//! resolves a [`SourceField`] to the backend column name; stores use it to
//! build filters and the mapper uses it to read rows.

use serde::{Deserialize, Serialize};

/// Semantic fields read from a store row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceField {
    RecordId,
    CaseNumber,
    Salutation,
    LastName,
    FirstName,
    BirthDate,
    MobilityFormat,
    LearnerMobilityKind,
    DepartureDate,
    ReturnDate,
    HostCountry,
    ParticipantStatus,
    SubmittedDate,
    Institution,
}

/// Column names of one backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMap {
    pub record_id: String,
    pub case_number: String,
    pub salutation: String,
    pub last_name: String,
    pub first_name: String,
    pub birth_date: String,
    pub mobility_format: String,
    pub learner_mobility_kind: String,
    pub departure_date: String,
    pub return_date: String,
    pub host_country: String,
    pub participant_status: String,
    pub submitted_date: String,
    pub institution: String,
}

/// Partial column table from configuration, applied over a preset
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnOverrides {
    pub record_id: Option<String>,
    pub case_number: Option<String>,
    pub salutation: Option<String>,
    pub last_name: Option<String>,
    pub first_name: Option<String>,
    pub birth_date: Option<String>,
    pub mobility_format: Option<String>,
    pub learner_mobility_kind: Option<String>,
    pub departure_date: Option<String>,
    pub return_date: Option<String>,
    pub host_country: Option<String>,
    pub participant_status: Option<String>,
    pub submitted_date: Option<String>,
    pub institution: Option<String>,
}

impl ColumnMap {
    /// Column names of the relational mobility table
    pub fn relational() -> Self {
        Self {
            record_id: "dossier_id".to_string(),
            case_number: "dossier_number".to_string(),
            salutation: "civilite".to_string(),
            last_name: "nom".to_string(),
            first_name: "prenom".to_string(),
            birth_date: "date_naissance".to_string(),
            mobility_format: "format_mobilite".to_string(),
            learner_mobility_kind: "mobilite_apprenant".to_string(),
            departure_date: "date_depart".to_string(),
            return_date: "date_retour".to_string(),
            host_country: "pays_accueil".to_string(),
            participant_status: "statut_participant".to_string(),
            submitted_date: "dateDepot".to_string(),
            institution: "etablissement".to_string(),
        }
    }

    /// Column names of the Grist document
    pub fn spreadsheet() -> Self {
        Self {
            record_id: "id".to_string(),
            case_number: "dossier_number".to_string(),
            salutation: "civilite".to_string(),
            last_name: "nom_participant".to_string(),
            first_name: "prenom_participant".to_string(),
            birth_date: "date_de_naissance".to_string(),
            mobility_format: "format_de_la_mobilite_apprenant".to_string(),
            learner_mobility_kind: "mobilite_apprenant".to_string(),
            departure_date: "date_depart".to_string(),
            return_date: "date_retour".to_string(),
            host_country: "pays_d_accueil".to_string(),
            participant_status: "statut_des_participants_de_la_mobilite".to_string(),
            submitted_date: "ref_dossiers_date_depot".to_string(),
            institution: "votre_etablissement".to_string(),
        }
    }

    /// Returns a copy with every configured override applied
    pub fn with_overrides(mut self, overrides: &ColumnOverrides) -> Self {
        let pairs: [(&mut String, &Option<String>); 14] = [
            (&mut self.record_id, &overrides.record_id),
            (&mut self.case_number, &overrides.case_number),
            (&mut self.salutation, &overrides.salutation),
            (&mut self.last_name, &overrides.last_name),
            (&mut self.first_name, &overrides.first_name),
            (&mut self.birth_date, &overrides.birth_date),
            (&mut self.mobility_format, &overrides.mobility_format),
            (&mut self.learner_mobility_kind, &overrides.learner_mobility_kind),
            (&mut self.departure_date, &overrides.departure_date),
            (&mut self.return_date, &overrides.return_date),
            (&mut self.host_country, &overrides.host_country),
            (&mut self.participant_status, &overrides.participant_status),
            (&mut self.submitted_date, &overrides.submitted_date),
            (&mut self.institution, &overrides.institution),
        ];
        for (column, value) in pairs {
            if let Some(value) = value {
                *column = value.clone();
            }
        }
        self
    }

    /// Backend column name of a semantic field
    pub fn column(&self, field: SourceField) -> &str {
        match field {
            SourceField::RecordId => &self.record_id,
            SourceField::CaseNumber => &self.case_number,
            SourceField::Salutation => &self.salutation,
            SourceField::LastName => &self.last_name,
            SourceField::FirstName => &self.first_name,
            SourceField::BirthDate => &self.birth_date,
            SourceField::MobilityFormat => &self.mobility_format,
            SourceField::LearnerMobilityKind => &self.learner_mobility_kind,
            SourceField::DepartureDate => &self.departure_date,
            SourceField::ReturnDate => &self.return_date,
            SourceField::HostCountry => &self.host_country,
            SourceField::ParticipantStatus => &self.participant_status,
            SourceField::SubmittedDate => &self.submitted_date,
            SourceField::Institution => &self.institution,
        }
    }

    /// Checks that no column name is blank
    pub fn validate(&self) -> Result<(), String> {
        let columns = [
            ("record_id", &self.record_id),
            ("case_number", &self.case_number),
            ("salutation", &self.salutation),
            ("last_name", &self.last_name),
            ("first_name", &self.first_name),
            ("birth_date", &self.birth_date),
            ("mobility_format", &self.mobility_format),
            ("learner_mobility_kind", &self.learner_mobility_kind),
            ("departure_date", &self.departure_date),
            ("return_date", &self.return_date),
            ("host_country", &self.host_country),
            ("participant_status", &self.participant_status),
            ("submitted_date", &self.submitted_date),
            ("institution", &self.institution),
        ];
        for (name, column) in columns {
            if column.trim().is_empty() {
                return Err(format!("store.columns.{name} cannot be empty"));
            }
        }
        Ok(())
    }
}
