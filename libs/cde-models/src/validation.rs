//! Structural validation of raw element and set records
//!
//! Validation is aggregating, not fail-fast: every structural mismatch found
//! is reported, so a malformed batch can be diagnosed in one pass.

use chrono::NaiveDate;
use serde_json::Value;
use std::fmt;

/// Discriminant fields, in the factory's fixed probe order.
pub const DISCRIMINANTS: [&str; 4] = ["value_set", "integer_value", "float_value", "boolean_value"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warning => write!(f, "warning"),
        }
    }
}

/// One structural mismatch found in a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub severity: Severity,
    /// Dotted path to the offending field, e.g. `elements[2].value_set.values`
    pub path: String,
    pub message: String,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}: {}", self.severity, self.path, self.message)
    }
}

impl ValidationIssue {
    fn error(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            path: path.into(),
            message: message.into(),
        }
    }

    fn warning(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Validate a raw element record, returning every issue found.
///
/// An empty result means the record parses into exactly one of the four
/// element variants.
pub fn validate_element(record: &Value) -> Vec<ValidationIssue> {
    validate_element_at(record, "")
}

/// Validate a raw set record, including every entry of its `elements` list.
pub fn validate_set(record: &Value) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    let Some(obj) = record.as_object() else {
        issues.push(ValidationIssue::error("", "set record must be a JSON object"));
        return issues;
    };

    check_string(obj, "", "id", &mut issues);
    check_string(obj, "", "name", &mut issues);
    check_semver(obj, "", &mut issues);
    check_version(obj, "", "set_version", true, &mut issues);
    check_version(obj, "", "element_version", false, &mut issues);
    check_status(obj, "", &mut issues);

    match obj.get("elements") {
        Some(Value::Array(entries)) => {
            if entries.is_empty() {
                issues.push(ValidationIssue::warning("elements", "set contains no elements"));
            }
            for (index, entry) in entries.iter().enumerate() {
                issues.extend(validate_element_at(entry, &format!("elements[{index}].")));
            }
        }
        Some(_) => issues.push(ValidationIssue::error("elements", "must be an array")),
        None => issues.push(ValidationIssue::error("elements", "required field is missing")),
    }

    issues
}

fn validate_element_at(record: &Value, prefix: &str) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    let Some(obj) = record.as_object() else {
        issues.push(ValidationIssue::error(
            prefix.trim_end_matches('.'),
            "element record must be a JSON object",
        ));
        return issues;
    };

    check_string(obj, prefix, "id", &mut issues);
    check_string(obj, prefix, "parent_set", &mut issues);
    check_string(obj, prefix, "name", &mut issues);
    check_semver(obj, prefix, &mut issues);
    check_version(obj, prefix, "element_version", true, &mut issues);
    check_status(obj, prefix, &mut issues);

    let present: Vec<&str> = DISCRIMINANTS
        .iter()
        .copied()
        .filter(|key| obj.contains_key(*key))
        .collect();
    match present.len() {
        0 => issues.push(ValidationIssue::error(
            prefix.trim_end_matches('.'),
            format!("exactly one of {DISCRIMINANTS:?} must be present, found none"),
        )),
        1 => {}
        _ => issues.push(ValidationIssue::error(
            prefix.trim_end_matches('.'),
            format!("exactly one discriminant must be present, found {present:?}"),
        )),
    }

    if let Some(payload) = obj.get("value_set") {
        check_value_set(payload, &format!("{prefix}value_set"), &mut issues);
    }
    if let Some(payload) = obj.get("integer_value") {
        check_numeric(payload, &format!("{prefix}integer_value"), &mut issues);
    }
    if let Some(payload) = obj.get("float_value") {
        check_numeric(payload, &format!("{prefix}float_value"), &mut issues);
    }
    if let Some(payload) = obj.get("boolean_value") {
        if !payload.is_string() {
            issues.push(ValidationIssue::error(
                format!("{prefix}boolean_value"),
                "must be a string tag",
            ));
        }
    }

    issues
}

fn check_value_set(payload: &Value, path: &str, issues: &mut Vec<ValidationIssue>) {
    let Some(obj) = payload.as_object() else {
        issues.push(ValidationIssue::error(path, "must be a JSON object"));
        return;
    };

    let min = obj.get("min_cardinality").and_then(Value::as_u64);
    let max = obj.get("max_cardinality").and_then(Value::as_u64);
    if min.is_none() {
        issues.push(ValidationIssue::error(
            format!("{path}.min_cardinality"),
            "required non-negative integer is missing",
        ));
    }
    if max.is_none() {
        issues.push(ValidationIssue::error(
            format!("{path}.max_cardinality"),
            "required non-negative integer is missing",
        ));
    }
    if let (Some(min), Some(max)) = (min, max) {
        if min > max {
            issues.push(ValidationIssue::error(
                format!("{path}.min_cardinality"),
                format!("min_cardinality {min} exceeds max_cardinality {max}"),
            ));
        }
    }

    match obj.get("values") {
        Some(Value::Array(values)) => {
            if let Some(max) = max {
                if max > values.len() as u64 {
                    issues.push(ValidationIssue::error(
                        format!("{path}.max_cardinality"),
                        format!(
                            "max_cardinality {max} exceeds the {} available value(s)",
                            values.len()
                        ),
                    ));
                }
            }
            for (index, value) in values.iter().enumerate() {
                let value_path = format!("{path}.values[{index}]");
                match value.as_object() {
                    Some(value_obj) => {
                        for key in ["code", "name"] {
                            if !value_obj.get(key).is_some_and(Value::is_string) {
                                issues.push(ValidationIssue::error(
                                    format!("{value_path}.{key}"),
                                    "required string is missing",
                                ));
                            }
                        }
                    }
                    None => issues.push(ValidationIssue::error(value_path, "must be a JSON object")),
                }
            }
        }
        Some(_) => issues.push(ValidationIssue::error(
            format!("{path}.values"),
            "must be an array",
        )),
        None => issues.push(ValidationIssue::error(
            format!("{path}.values"),
            "required field is missing",
        )),
    }
}

fn check_numeric(payload: &Value, path: &str, issues: &mut Vec<ValidationIssue>) {
    let Some(obj) = payload.as_object() else {
        issues.push(ValidationIssue::error(path, "must be a JSON object"));
        return;
    };

    for key in ["min_value", "max_value", "step"] {
        if let Some(value) = obj.get(key) {
            if !value.is_number() {
                issues.push(ValidationIssue::error(
                    format!("{path}.{key}"),
                    "must be a number",
                ));
            }
        }
    }
    if let Some(unit) = obj.get("unit") {
        if !unit.is_string() {
            issues.push(ValidationIssue::error(
                format!("{path}.unit"),
                "must be a string",
            ));
        }
    }

    let min = obj.get("min_value").and_then(Value::as_f64);
    let max = obj.get("max_value").and_then(Value::as_f64);
    if let (Some(min), Some(max)) = (min, max) {
        if min > max {
            issues.push(ValidationIssue::error(
                format!("{path}.min_value"),
                format!("min_value {min} exceeds max_value {max}"),
            ));
        }
    }
}

fn check_string(
    obj: &serde_json::Map<String, Value>,
    prefix: &str,
    key: &str,
    issues: &mut Vec<ValidationIssue>,
) {
    match obj.get(key) {
        Some(Value::String(s)) if !s.is_empty() => {}
        Some(Value::String(_)) => issues.push(ValidationIssue::error(
            format!("{prefix}{key}"),
            "must not be empty",
        )),
        Some(_) => issues.push(ValidationIssue::error(
            format!("{prefix}{key}"),
            "must be a string",
        )),
        None => issues.push(ValidationIssue::error(
            format!("{prefix}{key}"),
            "required field is missing",
        )),
    }
}

fn check_semver(
    obj: &serde_json::Map<String, Value>,
    prefix: &str,
    issues: &mut Vec<ValidationIssue>,
) {
    match obj.get("schema_version").and_then(Value::as_str) {
        Some(raw) => {
            if semver::Version::parse(raw).is_err() {
                issues.push(ValidationIssue::error(
                    format!("{prefix}schema_version"),
                    format!("'{raw}' is not a semantic version"),
                ));
            }
        }
        None => issues.push(ValidationIssue::error(
            format!("{prefix}schema_version"),
            "required semantic-version string is missing",
        )),
    }
}

fn check_version(
    obj: &serde_json::Map<String, Value>,
    prefix: &str,
    key: &str,
    required: bool,
    issues: &mut Vec<ValidationIssue>,
) {
    let path = format!("{prefix}{key}");
    match obj.get(key) {
        Some(Value::Object(version)) => {
            if !version.get("number").is_some_and(Value::is_u64) {
                issues.push(ValidationIssue::error(
                    format!("{path}.number"),
                    "required non-negative integer is missing",
                ));
            }
            check_date(version.get("date"), &format!("{path}.date"), issues);
        }
        Some(_) => issues.push(ValidationIssue::error(path, "must be a JSON object")),
        None if required => {
            issues.push(ValidationIssue::error(path, "required field is missing"));
        }
        None => {}
    }
}

fn check_status(
    obj: &serde_json::Map<String, Value>,
    prefix: &str,
    issues: &mut Vec<ValidationIssue>,
) {
    let path = format!("{prefix}status");
    match obj.get("status") {
        Some(Value::Object(status)) => {
            check_date(status.get("date"), &format!("{path}.date"), issues);
            if let Some(name) = status.get("name") {
                let valid = name
                    .as_str()
                    .is_some_and(|n| matches!(n, "proposed" | "published" | "retired"));
                if !valid {
                    issues.push(ValidationIssue::error(
                        format!("{path}.name"),
                        "must be one of 'proposed', 'published', 'retired'",
                    ));
                }
            }
        }
        Some(_) => issues.push(ValidationIssue::error(path, "must be a JSON object")),
        None => issues.push(ValidationIssue::error(path, "required field is missing")),
    }
}

fn check_date(value: Option<&Value>, path: &str, issues: &mut Vec<ValidationIssue>) {
    match value.and_then(Value::as_str) {
        Some(raw) => {
            if NaiveDate::parse_from_str(raw, "%Y-%m-%d").is_err() {
                issues.push(ValidationIssue::error(
                    path,
                    format!("'{raw}' is not an ISO date (YYYY-MM-DD)"),
                ));
            }
        }
        None => issues.push(ValidationIssue::error(
            path,
            "required ISO date (YYYY-MM-DD) is missing",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_element() -> Value {
        json!({
            "id": "RDE42",
            "parent_set": "RDES3",
            "name": "Aortic dissection",
            "element_version": { "number": 1, "date": "2024-01-15" },
            "schema_version": "1.0.0",
            "status": { "date": "2024-01-15", "name": "published" },
            "value_set": {
                "min_cardinality": 1,
                "max_cardinality": 1,
                "values": [
                    { "code": "RDE42.0", "name": "Absent" },
                    { "code": "RDE42.1", "name": "Present" }
                ]
            }
        })
    }

    #[test]
    fn valid_element_has_no_issues() {
        assert!(validate_element(&valid_element()).is_empty());
    }

    #[test]
    fn aggregates_multiple_issues_in_one_pass() {
        let record = json!({
            "id": "RDE1",
            "name": "Broken",
            "element_version": { "number": 1, "date": "not-a-date" },
            "schema_version": "one point oh",
            "status": { "date": "2024-01-15" }
        });
        let issues = validate_element(&record);
        let paths: Vec<&str> = issues.iter().map(|i| i.path.as_str()).collect();

        // missing parent_set, bad date, bad semver, and no discriminant,
        // all reported together
        assert!(paths.contains(&"parent_set"));
        assert!(paths.contains(&"element_version.date"));
        assert!(paths.contains(&"schema_version"));
        assert!(issues.iter().any(|i| i.message.contains("found none")));
        assert!(issues.len() >= 4);
    }

    #[test]
    fn multiple_discriminants_are_rejected() {
        let mut record = valid_element();
        record["integer_value"] = json!({ "min_value": 0 });
        let issues = validate_element(&record);
        assert!(issues
            .iter()
            .any(|i| i.message.contains("value_set") && i.message.contains("integer_value")));
    }

    #[test]
    fn cardinality_must_not_exceed_value_count() {
        let mut record = valid_element();
        record["value_set"]["max_cardinality"] = json!(5);
        let issues = validate_element(&record);
        assert!(issues
            .iter()
            .any(|i| i.path == "value_set.max_cardinality" && i.message.contains("exceeds")));
    }

    #[test]
    fn set_validation_prefixes_element_paths() {
        let set = json!({
            "id": "RDES3",
            "name": "Chest CT",
            "schema_version": "1.0.0",
            "set_version": { "number": 1, "date": "2024-01-15" },
            "status": { "date": "2024-01-15" },
            "elements": [ { "id": "RDE1" } ]
        });
        let issues = validate_set(&set);
        assert!(issues.iter().any(|i| i.path.starts_with("elements[0].")));
    }

    #[test]
    fn empty_element_list_is_a_warning() {
        let set = json!({
            "id": "RDES3",
            "name": "Chest CT",
            "schema_version": "1.0.0",
            "set_version": { "number": 1, "date": "2024-01-15" },
            "status": { "date": "2024-01-15" },
            "elements": []
        });
        let issues = validate_set(&set);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Warning);
    }
}
