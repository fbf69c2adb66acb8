//! Derivation rules
//!
//! Each derived field of a canonical record is a pure function of one source
//! field and the active policy.

use super::policy::{MappingPolicy, ProgramLabelRule, APPRENTICE_LABEL};
use crate::domain::LearnerMobilityKind;

const HYBRID_FORMAT: &str = "Mobilité hybride";
const TRAINEESHIP_LABEL: &str = "Stage";
const STUDY_LABEL: &str = "Etudes";

/// Exact, case-sensitive comparison with `Mobilité hybride`
pub fn is_hybrid(mobility_format: &str) -> bool {
    mobility_format == HYBRID_FORMAT
}

/// `Stage` or `Etudes`; unknown and missing kinds count as traineeships
pub fn mobility_type_label(kind: &LearnerMobilityKind) -> &'static str {
    match kind {
        LearnerMobilityKind::Study => STUDY_LABEL,
        _ => TRAINEESHIP_LABEL,
    }
}

pub fn mobility_program_label(kind: &LearnerMobilityKind, policy: &MappingPolicy) -> &'static str {
    match policy.program_label {
        ProgramLabelRule::Constant(label) => label,
        ProgramLabelRule::ByKind { fallback } => match kind {
            LearnerMobilityKind::CompetencyContest => LearnerMobilityKind::COMPETENCY_CONTEST,
            _ => fallback,
        },
    }
}

/// Case-insensitive comparison with `apprenti`
pub fn is_apprentice(participant_status: &str) -> bool {
    !participant_status.is_empty() && participant_status.to_lowercase() == "apprenti"
}

pub fn participant_status_label(is_apprentice: bool, policy: &MappingPolicy) -> &'static str {
    if is_apprentice {
        APPRENTICE_LABEL
    } else {
        policy.default_status_label
    }
}
