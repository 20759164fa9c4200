//! CDE element variants
//!
//! A common data element is one of four mutually exclusive shapes, selected
//! by which type-specific payload field is present on the wire:
//! `value_set`, `integer_value`, `float_value`, or `boolean_value`.

use crate::shared::{Contributors, Event, IndexCode, Reference, Specialty, Status, Version};
use serde::{Deserialize, Serialize};

/// Fields common to all four element variants.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ElementBase {
    /// Identifier, unique within the owning set
    pub id: String,

    /// Id of the owning set (non-owning back reference)
    pub parent_set: String,

    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub definition: Option<String>,

    pub element_version: Version,

    /// Semantic version of the schema this record conforms to
    pub schema_version: String,

    pub status: Status,

    /// Question presented to the reporter when filling the element
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub index_codes: Option<Vec<IndexCode>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub contributors: Option<Contributors>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub specialties: Option<Vec<Specialty>>,

    /// Ordered status-change history
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history: Option<Vec<Event>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub references: Option<Vec<Reference>>,
}

/// One selectable entry in a value-set element.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ValueSetValue {
    /// Code of the form `{elementId}.{index}`
    pub code: String,

    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub definition: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub index_codes: Option<Vec<IndexCode>>,
}

/// Payload of a value-set element: how many entries may be selected, and the
/// ordered list of coded entries.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ValueSet {
    pub min_cardinality: u32,

    pub max_cardinality: u32,

    pub values: Vec<ValueSetValue>,
}

/// Payload of an integer element. Omitted bounds mean unbounded.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct IntegerValue {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_value: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_value: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub step: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

/// Payload of a float element. Same shape as [`IntegerValue`] over f64.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct FloatValue {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_value: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_value: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub step: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

/// Element whose value is chosen from an enumerated, coded list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ValueSetElement {
    #[serde(flatten)]
    pub base: ElementBase,

    pub value_set: ValueSet,
}

/// Element holding an integer measurement.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IntegerElement {
    #[serde(flatten)]
    pub base: ElementBase,

    pub integer_value: IntegerValue,
}

/// Element holding a floating-point measurement.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FloatElement {
    #[serde(flatten)]
    pub base: ElementBase,

    pub float_value: FloatValue,
}

/// Element holding a yes/no answer.
///
/// The wire payload is a string tag rather than an actual boolean. That is a
/// quirk of the published schema, preserved here pending clarification.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BooleanElement {
    #[serde(flatten)]
    pub base: ElementBase,

    pub boolean_value: String,
}

/// A common data element: exactly one of the four variant shapes.
///
/// Deserialization tries the variants in the fixed discriminant order
/// (`value_set`, `integer_value`, `float_value`, `boolean_value`), so a
/// malformed record carrying two discriminants resolves deterministically to
/// the first match. [`crate::validation::validate_element`] rejects such
/// records outright.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum CdElement {
    ValueSet(ValueSetElement),
    Integer(IntegerElement),
    Float(FloatElement),
    Boolean(BooleanElement),
}

impl CdElement {
    /// Fields shared by every variant.
    pub fn base(&self) -> &ElementBase {
        match self {
            Self::ValueSet(e) => &e.base,
            Self::Integer(e) => &e.base,
            Self::Float(e) => &e.base,
            Self::Boolean(e) => &e.base,
        }
    }

    pub fn id(&self) -> &str {
        &self.base().id
    }

    pub fn name(&self) -> &str {
        &self.base().name
    }
}
