//! Finding model
//!
//! An alternate, attribute-based description of a clinical finding. Simpler
//! than a full CDE set and convertible into one via
//! [`crate::builders::create_set_from_finding_model`].

use serde::{Deserialize, Serialize};

/// A clinical finding described as a list of attributes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FindingModel {
    pub name: String,

    pub description: String,

    pub attributes: Vec<FindingAttribute>,
}

/// One selectable value of a choice attribute.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AttributeValue {
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// An attribute of a finding: either a pick-from-list choice or a numeric
/// measurement. Tagged on the wire by a `type` field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FindingAttribute {
    Choice {
        name: String,

        #[serde(skip_serializing_if = "Option::is_none")]
        description: Option<String>,

        values: Vec<AttributeValue>,
    },
    Numeric {
        name: String,

        #[serde(skip_serializing_if = "Option::is_none")]
        description: Option<String>,

        #[serde(skip_serializing_if = "Option::is_none")]
        minimum: Option<f64>,

        #[serde(skip_serializing_if = "Option::is_none")]
        maximum: Option<f64>,

        #[serde(skip_serializing_if = "Option::is_none")]
        unit: Option<String>,
    },
}

impl FindingAttribute {
    pub fn name(&self) -> &str {
        match self {
            Self::Choice { name, .. } | Self::Numeric { name, .. } => name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_tagged_attributes() {
        let record = json!({
            "name": "Pulmonary nodule",
            "description": "Solitary pulmonary nodule on chest CT",
            "attributes": [
                {
                    "type": "choice",
                    "name": "Composition",
                    "values": [
                        { "name": "Solid" },
                        { "name": "Ground glass", "description": "No solid component" }
                    ]
                },
                {
                    "type": "numeric",
                    "name": "Diameter",
                    "minimum": 0,
                    "unit": "mm"
                }
            ]
        });

        let model: FindingModel = serde_json::from_value(record).unwrap();
        assert_eq!(model.attributes.len(), 2);
        assert!(matches!(model.attributes[0], FindingAttribute::Choice { .. }));
        match &model.attributes[1] {
            FindingAttribute::Numeric { minimum, unit, maximum, .. } => {
                assert_eq!(*minimum, Some(0.0));
                assert_eq!(*maximum, None);
                assert_eq!(unit.as_deref(), Some("mm"));
            }
            other => panic!("expected numeric attribute, got {other:?}"),
        }
        assert_eq!(model.attributes[1].name(), "Diameter");
    }

    #[test]
    fn unknown_attribute_type_is_rejected() {
        let record = json!({
            "name": "X",
            "description": "Y",
            "attributes": [ { "type": "freetext", "name": "Notes" } ]
        });
        assert!(serde_json::from_value::<FindingModel>(record).is_err());
    }
}
