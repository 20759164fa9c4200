//! FHIR-style Observation projection
//!
//! A minimal Observation skeleton a CDE set can be projected into for
//! exchange with FHIR-speaking systems. This is a projection, not a full
//! FHIR resource: only the fields a reporting template needs are modeled.

use crate::set::CdeSet;
use serde::{Deserialize, Serialize};

/// A coded reference (system/code/display triplet).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Coding {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,
}

/// A concept, coded in zero or more systems with optional free text.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CodeableConcept {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub coding: Vec<Coding>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// One component of an observation: a coded slot for an element's answer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ObservationComponent {
    pub code: CodeableConcept,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub value_string: Option<String>,
}

/// FHIR-style Observation skeleton.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Observation {
    /// Resource type - always "Observation"
    #[serde(default = "default_resource_type")]
    pub resource_type: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Observation status (registered | preliminary | final | amended)
    pub status: String,

    pub code: CodeableConcept,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub component: Vec<ObservationComponent>,
}

fn default_resource_type() -> String {
    "Observation".to_string()
}

/// Coding system URL used for CDE identifiers.
pub const RADELEMENT_SYSTEM: &str = "https://radelement.org";

impl Observation {
    /// Project a set into an Observation skeleton: the set becomes the
    /// observation code, each element one coded component with an empty
    /// value slot.
    pub fn from_cde_set(set: &CdeSet) -> Self {
        let code = CodeableConcept {
            coding: vec![Coding {
                system: Some(RADELEMENT_SYSTEM.to_string()),
                code: Some(set.id.clone()),
                display: Some(set.name.clone()),
            }],
            text: Some(set.name.clone()),
        };

        let component = set
            .elements
            .iter()
            .map(|element| ObservationComponent {
                code: CodeableConcept {
                    coding: vec![Coding {
                        system: Some(RADELEMENT_SYSTEM.to_string()),
                        code: Some(element.id().to_string()),
                        display: Some(element.name().to_string()),
                    }],
                    text: Some(element.name().to_string()),
                },
                value_string: None,
            })
            .collect();

        Self {
            resource_type: "Observation".to_string(),
            id: None,
            status: "preliminary".to_string(),
            code,
            component,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::{create_set, create_value_set_element, ValueInput};
    use crate::element::CdElement;

    #[test]
    fn projects_set_into_components() {
        let mut set = create_set("Pneumothorax", None, true).unwrap();
        let extra = create_value_set_element(
            "Laterality",
            &[ValueInput::new("Left"), ValueInput::new("Right")],
            None,
            None,
        )
        .unwrap();
        set.add_element(CdElement::ValueSet(extra));

        let observation = Observation::from_cde_set(&set);
        assert_eq!(observation.resource_type, "Observation");
        assert_eq!(observation.code.coding[0].code.as_deref(), Some(set.id.as_str()));
        assert_eq!(observation.component.len(), 2);
        assert_eq!(
            observation.component[1].code.text.as_deref(),
            Some("Laterality")
        );
    }

    #[test]
    fn serializes_camel_case() {
        let set = create_set("Pneumothorax", None, false).unwrap();
        let observation = Observation::from_cde_set(&set);
        let json = serde_json::to_value(&observation).unwrap();
        assert_eq!(json["resourceType"], "Observation");
        assert!(json.get("component").is_none());
    }
}
