//! Shared value schemas
//!
//! Reusable structural fragments (versions, statuses, contributors, index
//! codes, specialties, references) embedded into elements and sets.

use serde::{Deserialize, Serialize};

/// Version of an element or set: a monotonically increasing number plus the
/// date (ISO `YYYY-MM-DD`) it was assigned.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Version {
    pub number: u32,

    /// ISO date (`YYYY-MM-DD`)
    pub date: String,
}

/// Lifecycle state of an element or set.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StatusState {
    Proposed,
    Published,
    Retired,
}

/// Current status: the date it took effect and an optional state name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Status {
    /// ISO date (`YYYY-MM-DD`)
    pub date: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<StatusState>,
}

impl Status {
    /// Create a status with a known state.
    pub fn new(date: impl Into<String>, name: StatusState) -> Self {
        Self {
            date: date.into(),
            name: Some(name),
        }
    }
}

/// A status-change event in an entity's history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Event {
    /// ISO date (`YYYY-MM-DD`)
    pub date: String,

    pub status: Status,
}

/// Reference into an external medical coding system (RadLex, SNOMED, LOINC).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IndexCode {
    /// Coding system identifier (e.g. "RADLEX", "SNOMEDCT", "LOINC")
    pub system: String,

    /// Code within the system
    pub code: String,

    /// Human-readable display text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,

    /// Resolvable URL for the code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl IndexCode {
    pub fn new(system: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            code: code.into(),
            display: None,
            url: None,
        }
    }
}

/// Role a person plays in authoring an element or set.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PersonRole {
    Author,
    Editor,
    Translator,
    Reviewer,
    Contributor,
}

/// Role an organization plays in sponsoring or authoring.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OrganizationRole {
    Author,
    Sponsor,
    Translator,
    Reviewer,
    Contributor,
}

/// A contributing person.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Person {
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub orcid_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub twitter_handle: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<PersonRole>,
}

/// A contributing organization.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Organization {
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub abbreviation: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<OrganizationRole>,
}

/// People and organizations that contributed to an element or set.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Contributors {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub people: Vec<Person>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub organizations: Vec<Organization>,
}

/// Closed list of radiology specialty abbreviations.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SpecialtyAbbreviation {
    AB,
    BR,
    CA,
    CH,
    ER,
    GI,
    GU,
    HN,
    IR,
    MI,
    MK,
    NR,
    OB,
    OI,
    OT,
    PD,
    QI,
    RS,
    US,
    VA,
}

impl SpecialtyAbbreviation {
    /// Display name for the abbreviation.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::AB => "Abdominal",
            Self::BR => "Breast",
            Self::CA => "Cardiac",
            Self::CH => "Chest",
            Self::ER => "Emergency Radiology",
            Self::GI => "Gastrointestinal",
            Self::GU => "Genitourinary",
            Self::HN => "Head and Neck",
            Self::IR => "Interventional Radiology",
            Self::MI => "Molecular Imaging",
            Self::MK => "Musculoskeletal",
            Self::NR => "Neuroradiology",
            Self::OB => "Obstetric/Gynecologic",
            Self::OI => "Oncologic Imaging",
            Self::OT => "Other",
            Self::PD => "Pediatric",
            Self::QI => "Quality Improvement",
            Self::RS => "Radiation Safety",
            Self::US => "Ultrasound",
            Self::VA => "Vascular",
        }
    }
}

/// A specialty tag: abbreviation from the closed list plus its name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Specialty {
    pub abbreviation: SpecialtyAbbreviation,
    pub name: String,
}

impl Specialty {
    pub fn new(abbreviation: SpecialtyAbbreviation) -> Self {
        Self {
            abbreviation,
            name: abbreviation.display_name().to_string(),
        }
    }
}

/// A literature citation attached to an element or set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Reference {
    pub citation: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub doi_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub pubmed_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_state_serializes_lowercase() {
        let status = Status::new("2024-01-15", StatusState::Proposed);
        let json = serde_json::to_value(&status).unwrap();
        assert_eq!(json["name"], "proposed");
        assert_eq!(json["date"], "2024-01-15");
    }

    #[test]
    fn specialty_carries_display_name() {
        let s = Specialty::new(SpecialtyAbbreviation::NR);
        assert_eq!(s.name, "Neuroradiology");
        let json = serde_json::to_value(&s).unwrap();
        assert_eq!(json["abbreviation"], "NR");
    }

    #[test]
    fn contributors_skip_empty_lists() {
        let c = Contributors::default();
        let json = serde_json::to_string(&c).unwrap();
        assert_eq!(json, "{}");
    }

    #[test]
    fn index_code_optional_fields_roundtrip() {
        let code = IndexCode {
            system: "RADLEX".to_string(),
            code: "RID28662".to_string(),
            display: Some("attenuation".to_string()),
            url: None,
        };
        let json = serde_json::to_string(&code).unwrap();
        let back: IndexCode = serde_json::from_str(&json).unwrap();
        assert_eq!(back, code);
        assert!(!json.contains("url"));
    }
}
