//! Polymorphic element factory
//!
//! Dispatches a raw JSON record to the matching element variant by probing
//! the type-specific discriminant fields in a fixed order.

use crate::element::{
    BooleanElement, CdElement, FloatElement, IntegerElement, ValueSetElement,
};
use serde_json::Value;

/// Factory for constructing [`CdElement`] values from raw records.
pub struct CdElementFactory;

impl CdElementFactory {
    /// Construct the element variant matching `record`, or `None` when no
    /// discriminant field is present or the matching shape fails to parse.
    ///
    /// Discriminants are probed in a fixed order: `value_set`,
    /// `integer_value`, `float_value`, `boolean_value`. A record carrying
    /// more than one discriminant resolves to the first match; run
    /// [`crate::validation::validate_element`] first to reject those.
    ///
    /// Pure function of its input aside from the diagnostic log on failure.
    pub fn create(record: &Value) -> Option<CdElement> {
        let Some(obj) = record.as_object() else {
            tracing::warn!("element record is not a JSON object");
            return None;
        };

        if obj.contains_key("value_set") {
            parse::<ValueSetElement>(record, "value_set").map(CdElement::ValueSet)
        } else if obj.contains_key("integer_value") {
            parse::<IntegerElement>(record, "integer_value").map(CdElement::Integer)
        } else if obj.contains_key("float_value") {
            parse::<FloatElement>(record, "float_value").map(CdElement::Float)
        } else if obj.contains_key("boolean_value") {
            parse::<BooleanElement>(record, "boolean_value").map(CdElement::Boolean)
        } else {
            tracing::warn!(
                id = obj.get("id").and_then(serde_json::Value::as_str),
                "element record carries no discriminant field"
            );
            None
        }
    }
}

fn parse<T: serde::de::DeserializeOwned>(record: &Value, variant: &str) -> Option<T> {
    match serde_json::from_value(record.clone()) {
        Ok(parsed) => Some(parsed),
        Err(err) => {
            tracing::warn!(
                variant,
                id = record.get("id").and_then(serde_json::Value::as_str),
                %err,
                "element record matched a discriminant but failed to parse"
            );
            None
        }
    }
}
