//! Programmatic builders
//!
//! Factory functions that synthesize schema-valid element and set records
//! from simple arguments, filling the required-but-irrelevant fields
//! (randomized draft identifiers, today's date, proposed status) so callers
//! need not know every field.

use crate::element::{
    BooleanElement, CdElement, ElementBase, FloatElement, FloatValue, IntegerElement,
    IntegerValue, ValueSet, ValueSetElement, ValueSetValue,
};
use crate::error::{Error, Result};
use crate::finding_model::{FindingAttribute, FindingModel};
use crate::set::CdeSet;
use crate::shared::{Status, StatusState, Version};
use rand::Rng;

/// Schema version stamped onto builder-produced records.
pub const CURRENT_SCHEMA_VERSION: &str = "1.0.0";

/// Input for one value of a value-set element under construction.
#[derive(Debug, Clone)]
pub struct ValueInput {
    pub name: String,

    /// Explicit value string; when absent, the slugified name is used.
    pub value: Option<String>,
}

impl ValueInput {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
        }
    }

    pub fn with_value(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
        }
    }
}

impl From<&str> for ValueInput {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Create an empty draft set, optionally seeded with the canned four-valued
/// presence element (Absent/Present/Unknown/Indeterminate).
pub fn create_set(
    name: &str,
    description: Option<&str>,
    add_presence_element: bool,
) -> Result<CdeSet> {
    if name.trim().is_empty() {
        return Err(Error::InvalidArgument("set name must not be empty".into()));
    }

    let mut set = CdeSet {
        id: draft_id("RDES"),
        name: name.to_string(),
        parent_set: None,
        description: description.map(str::to_string),
        element_version: None,
        schema_version: CURRENT_SCHEMA_VERSION.to_string(),
        set_version: Version {
            number: 1,
            date: today(),
        },
        status: Status::new(today(), StatusState::Proposed),
        index_codes: None,
        contributors: None,
        specialties: None,
        history: None,
        references: None,
        elements: Vec::new(),
    };

    if add_presence_element {
        let mut presence = create_value_set_element(
            "Presence",
            &[
                ValueInput::new("Absent"),
                ValueInput::new("Present"),
                ValueInput::new("Unknown"),
                ValueInput::new("Indeterminate"),
            ],
            None,
            None,
        )?;
        presence.base.parent_set = set.id.clone();
        set.add_element(CdElement::ValueSet(presence));
    }

    Ok(set)
}

/// Create a draft value-set element.
///
/// Fails when fewer than two values are supplied: a one-entry value set has
/// no discriminating power. Value codes are `{elementId}.{index}` in input
/// order; a value with no explicit value string gets the slugified name.
pub fn create_value_set_element(
    name: &str,
    values: &[ValueInput],
    min_cardinality: Option<u32>,
    max_cardinality: Option<u32>,
) -> Result<ValueSetElement> {
    if name.trim().is_empty() {
        return Err(Error::InvalidArgument(
            "element name must not be empty".into(),
        ));
    }
    if values.len() < 2 {
        return Err(Error::InvalidArgument(format!(
            "a value set needs at least 2 values, got {}",
            values.len()
        )));
    }

    let id = draft_id("RDE");
    let values = values
        .iter()
        .enumerate()
        .map(|(index, input)| ValueSetValue {
            code: format!("{id}.{index}"),
            name: input.name.clone(),
            value: Some(
                input
                    .value
                    .clone()
                    .unwrap_or_else(|| slugify(&input.name)),
            ),
            definition: None,
            index_codes: None,
        })
        .collect();

    Ok(ValueSetElement {
        base: draft_base(id, name),
        value_set: ValueSet {
            min_cardinality: min_cardinality.unwrap_or(1),
            max_cardinality: max_cardinality.unwrap_or(1),
            values,
        },
    })
}

/// Create a draft integer element. Omitted bounds stay absent.
pub fn create_integer_element(
    name: &str,
    min_value: Option<i64>,
    max_value: Option<i64>,
    step: Option<i64>,
    unit: Option<&str>,
) -> Result<IntegerElement> {
    if name.trim().is_empty() {
        return Err(Error::InvalidArgument(
            "element name must not be empty".into(),
        ));
    }
    Ok(IntegerElement {
        base: draft_base(draft_id("RDE"), name),
        integer_value: IntegerValue {
            min_value,
            max_value,
            step,
            unit: unit.map(str::to_string),
        },
    })
}

/// Create a draft float element. Omitted bounds stay absent.
pub fn create_float_element(
    name: &str,
    min_value: Option<f64>,
    max_value: Option<f64>,
    step: Option<f64>,
    unit: Option<&str>,
) -> Result<FloatElement> {
    if name.trim().is_empty() {
        return Err(Error::InvalidArgument(
            "element name must not be empty".into(),
        ));
    }
    Ok(FloatElement {
        base: draft_base(draft_id("RDE"), name),
        float_value: FloatValue {
            min_value,
            max_value,
            step,
            unit: unit.map(str::to_string),
        },
    })
}

/// Create a draft boolean element. The payload is the schema's string tag.
pub fn create_boolean_element(name: &str) -> Result<BooleanElement> {
    if name.trim().is_empty() {
        return Err(Error::InvalidArgument(
            "element name must not be empty".into(),
        ));
    }
    Ok(BooleanElement {
        base: draft_base(draft_id("RDE"), name),
        boolean_value: "boolean".to_string(),
    })
}

/// Map a finding model 1:1 into a draft set.
///
/// Choice attributes become value-set elements; the attribute values'
/// descriptions land in the value-set values' `value` field. Numeric
/// attributes become float elements with the attribute description copied to
/// the element definition. No presence element is added, so the element
/// count equals the attribute count.
pub fn create_set_from_finding_model(model: &FindingModel) -> Result<CdeSet> {
    let mut set = create_set(&model.name, Some(&model.description), false)?;

    for attribute in &model.attributes {
        match attribute {
            FindingAttribute::Choice {
                name,
                description,
                values,
            } => {
                let inputs: Vec<ValueInput> = values
                    .iter()
                    .map(|v| ValueInput {
                        name: v.name.clone(),
                        value: v.description.clone(),
                    })
                    .collect();
                let mut element = create_value_set_element(name, &inputs, None, None)?;
                element.base.definition = description.clone();
                element.base.parent_set = set.id.clone();
                set.add_element(CdElement::ValueSet(element));
            }
            FindingAttribute::Numeric {
                name,
                description,
                minimum,
                maximum,
                unit,
            } => {
                let mut element =
                    create_float_element(name, *minimum, *maximum, None, unit.as_deref())?;
                element.base.definition = description.clone();
                element.base.parent_set = set.id.clone();
                set.add_element(CdElement::Float(element));
            }
        }
    }

    Ok(set)
}

fn draft_base(id: String, name: &str) -> ElementBase {
    ElementBase {
        id,
        parent_set: draft_id("RDES"),
        name: name.to_string(),
        definition: None,
        element_version: Version {
            number: 1,
            date: today(),
        },
        schema_version: CURRENT_SCHEMA_VERSION.to_string(),
        status: Status::new(today(), StatusState::Proposed),
        question: None,
        index_codes: None,
        contributors: None,
        specialties: None,
        history: None,
        references: None,
    }
}

/// Today's date as an ISO `YYYY-MM-DD` string.
fn today() -> String {
    chrono::Utc::now().format("%Y-%m-%d").to_string()
}

/// Randomized draft identifier: prefix plus five random digits.
fn draft_id(prefix: &str) -> String {
    let mut rng = rand::thread_rng();
    format!("{prefix}{}", rng.gen_range(10000..100000))
}

/// Lowercase and underscore-join a display name.
fn slugify(name: &str) -> String {
    name.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
}
