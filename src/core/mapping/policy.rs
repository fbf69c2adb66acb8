//! Mapping policies
//!
//! Two screens of the original workflow label the same record differently.
//! Each variant is a named, versioned policy so that a change in labels is a
//! change in policy, not a silent change in behaviour.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Region every mobility belongs to
pub const REGION: &str = "Occitanie";

/// EU member state zone, spelled the way the provider form expects it
pub const DESTINATION_ZONE: &str = "Pays membre de l'Union Européenne";

/// Program label used whenever no kind-specific label applies
pub const SHORT_TERM_PROGRAM_LABEL: &str = "Mobilité d'apprentissage de courte durée";

/// Participant status label for apprentices, under every policy
pub const APPRENTICE_LABEL: &str = "Apprenti";

/// Named policy variants
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyName {
    /// Labels sent to the provider when building a link
    #[default]
    Link,
    /// Labels shown on the record summary screen
    Summary,
}

impl fmt::Display for PolicyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PolicyName::Link => write!(f, "link"),
            PolicyName::Summary => write!(f, "summary"),
        }
    }
}

impl FromStr for PolicyName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "link" => Ok(PolicyName::Link),
            "summary" => Ok(PolicyName::Summary),
            other => Err(format!(
                "Unknown mapping policy '{other}', expected 'link' or 'summary'"
            )),
        }
    }
}

/// How the program label is chosen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgramLabelRule {
    /// Always the same label
    Constant(&'static str),
    /// Competency contests get their own label, everything else the fallback
    ByKind { fallback: &'static str },
}

/// Default values and label rules applied by the field mapper
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingPolicy {
    pub name: PolicyName,
    pub version: u32,
    /// Status label for non-apprentices
    pub default_status_label: &'static str,
    pub program_label: ProgramLabelRule,
}

impl MappingPolicy {
    /// Labels used for link generation
    pub fn link() -> Self {
        Self {
            name: PolicyName::Link,
            version: 1,
            default_status_label: "Étudiant",
            program_label: ProgramLabelRule::Constant(SHORT_TERM_PROGRAM_LABEL),
        }
    }

    /// Labels used on the summary screen
    pub fn summary() -> Self {
        Self {
            name: PolicyName::Summary,
            version: 1,
            default_status_label: "Élève",
            program_label: ProgramLabelRule::ByKind {
                fallback: SHORT_TERM_PROGRAM_LABEL,
            },
        }
    }

    pub fn from_name(name: PolicyName) -> Self {
        match name {
            PolicyName::Link => Self::link(),
            PolicyName::Summary => Self::summary(),
        }
    }

    /// `name@vN`, as written to logs
    pub fn id(&self) -> String {
        format!("{}@v{}", self.name, self.version)
    }
}

impl Default for MappingPolicy {
    fn default() -> Self {
        Self::link()
    }
}
