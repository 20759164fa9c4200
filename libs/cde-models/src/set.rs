//! CDE Set model
//!
//! A named, versioned collection of elements plus set-level metadata. A set
//! exclusively owns its elements; they are materialized once at construction
//! through [`CdElementFactory`] and immutable afterwards, apart from the
//! explicit [`CdeSet::add_element`] append.

use crate::element::CdElement;
use crate::error::{Error, Result};
use crate::factory::CdElementFactory;
use crate::shared::{Contributors, Event, IndexCode, Reference, Specialty, Status, Version};
use crate::validation::{self, Severity};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A CDE Set: identity, versioning, metadata, and the owned element list.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CdeSet {
    pub id: String,

    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_set: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub element_version: Option<Version>,

    /// Semantic version of the schema this record conforms to
    pub schema_version: String,

    pub set_version: Version,

    pub status: Status,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub index_codes: Option<Vec<IndexCode>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub contributors: Option<Contributors>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub specialties: Option<Vec<Specialty>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub history: Option<Vec<Event>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub references: Option<Vec<Reference>>,

    pub elements: Vec<CdElement>,
}

/// Set-level record with elements left raw, so element materialization can
/// proceed entry by entry.
#[derive(Deserialize)]
struct RawSet {
    id: String,
    name: String,
    #[serde(default)]
    parent_set: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    element_version: Option<Version>,
    schema_version: String,
    set_version: Version,
    status: Status,
    #[serde(default)]
    index_codes: Option<Vec<IndexCode>>,
    #[serde(default)]
    contributors: Option<Contributors>,
    #[serde(default)]
    specialties: Option<Vec<Specialty>>,
    #[serde(default)]
    history: Option<Vec<Event>>,
    #[serde(default)]
    references: Option<Vec<Reference>>,
    #[serde(default)]
    elements: Vec<Value>,
}

impl CdeSet {
    /// Build a set from a raw JSON record.
    ///
    /// The record is validated at the set level first; every error-severity
    /// set-level issue found is returned together in [`Error::Validation`].
    /// Element entries are never fatal: an entry that fails element
    /// validation or that the factory rejects is dropped with a logged
    /// diagnostic rather than aborting the whole set (partial-success
    /// policy).
    pub fn from_value(record: &Value) -> Result<CdeSet> {
        let issues = validation::validate_set(record);
        for issue in issues.iter().filter(|i| i.severity == Severity::Warning) {
            tracing::warn!(%issue, "set record warning");
        }
        let set_level: Vec<_> = issues
            .into_iter()
            .filter(|i| i.severity == Severity::Error && !i.path.starts_with("elements["))
            .collect();
        if !set_level.is_empty() {
            return Err(Error::Validation { issues: set_level });
        }

        let raw: RawSet = serde_json::from_value(record.clone())?;
        let mut elements = Vec::with_capacity(raw.elements.len());
        for (index, entry) in raw.elements.iter().enumerate() {
            let entry_issues = validation::validate_element(entry);
            if entry_issues.iter().any(|i| i.severity == Severity::Error) {
                for issue in &entry_issues {
                    tracing::warn!(set = %raw.id, index, %issue, "dropping invalid element entry");
                }
                continue;
            }
            match CdElementFactory::create(entry) {
                Some(element) => elements.push(element),
                None => {
                    tracing::warn!(
                        set = %raw.id,
                        index,
                        "dropping element entry the factory could not materialize"
                    );
                }
            }
        }

        Ok(CdeSet {
            id: raw.id,
            name: raw.name,
            parent_set: raw.parent_set,
            description: raw.description,
            element_version: raw.element_version,
            schema_version: raw.schema_version,
            set_version: raw.set_version,
            status: raw.status,
            index_codes: raw.index_codes,
            contributors: raw.contributors,
            specialties: raw.specialties,
            history: raw.history,
            references: raw.references,
            elements,
        })
    }

    /// Parse a set from its JSON text form.
    pub fn from_json(input: &str) -> Result<CdeSet> {
        let record: Value = serde_json::from_str(input)?;
        Self::from_value(&record)
    }

    /// Serialize to the JSON text form. Round-trips through [`Self::from_json`]
    /// for any schema-valid set.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Append an element to the set.
    ///
    /// The only mutation a set supports after construction. Single-writer
    /// only; not designed for concurrent callers.
    pub fn add_element(&mut self, element: CdElement) {
        self.elements.push(element);
    }

    /// Look up an element by id.
    pub fn element_by_id(&self, id: &str) -> Option<&CdElement> {
        self.elements.iter().find(|e| e.id() == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn set_record() -> Value {
        json!({
            "id": "RDES3",
            "name": "Acute aortic syndrome",
            "description": "CT findings of acute aortic syndrome",
            "schema_version": "1.0.0",
            "set_version": { "number": 2, "date": "2024-02-01" },
            "status": { "date": "2024-02-01", "name": "published" },
            "specialties": [
                { "abbreviation": "CA", "name": "Cardiac" },
                { "abbreviation": "CH", "name": "Chest" }
            ],
            "elements": [
                {
                    "id": "RDE41",
                    "parent_set": "RDES3",
                    "name": "Dissection flap",
                    "element_version": { "number": 1, "date": "2024-02-01" },
                    "schema_version": "1.0.0",
                    "status": { "date": "2024-02-01", "name": "published" },
                    "value_set": {
                        "min_cardinality": 1,
                        "max_cardinality": 1,
                        "values": [
                            { "code": "RDE41.0", "name": "Absent" },
                            { "code": "RDE41.1", "name": "Present" }
                        ]
                    }
                },
                {
                    "id": "RDE42",
                    "parent_set": "RDES3",
                    "name": "Maximum aortic diameter",
                    "element_version": { "number": 1, "date": "2024-02-01" },
                    "schema_version": "1.0.0",
                    "status": { "date": "2024-02-01", "name": "published" },
                    "float_value": { "min_value": 0.0, "max_value": 15.0, "unit": "cm" }
                }
            ]
        })
    }

    #[test]
    fn constructs_elements_through_the_factory() {
        let set = CdeSet::from_value(&set_record()).unwrap();
        assert_eq!(set.id, "RDES3");
        assert_eq!(set.elements.len(), 2);
        assert!(matches!(set.elements[0], CdElement::ValueSet(_)));
        assert!(matches!(set.elements[1], CdElement::Float(_)));
        assert_eq!(set.element_by_id("RDE42").unwrap().name(), "Maximum aortic diameter");
    }

    #[test]
    fn invalid_set_record_reports_aggregated_issues() {
        let record = json!({ "name": "No id", "elements": [] });
        let err = CdeSet::from_value(&record).unwrap_err();
        match err {
            Error::Validation { issues } => {
                assert!(issues.iter().any(|i| i.path == "id"));
                assert!(issues.iter().any(|i| i.path == "schema_version"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn roundtrip_preserves_identity_and_elements() {
        let set = CdeSet::from_value(&set_record()).unwrap();
        let text = set.to_json().unwrap();
        let back = CdeSet::from_json(&text).unwrap();

        assert_eq!(back.id, set.id);
        assert_eq!(back.name, set.name);
        assert_eq!(back.elements.len(), set.elements.len());
        for (a, b) in set.elements.iter().zip(back.elements.iter()) {
            assert_eq!(a.id(), b.id());
            assert_eq!(a.name(), b.name());
        }
        assert_eq!(back, set);
    }

    #[test]
    fn bad_element_entry_is_dropped_not_fatal() {
        let mut record = set_record();
        record["elements"]
            .as_array_mut()
            .unwrap()
            .push(json!({ "id": "RDE99", "name": "No discriminant" }));

        let set = CdeSet::from_value(&record).unwrap();
        // the malformed entry is dropped; the two valid ones survive
        assert_eq!(set.elements.len(), 2);
    }

    #[test]
    fn element_entry_violating_invariants_is_dropped() {
        // parses fine through serde, but the date is not ISO and the
        // cardinality exceeds the two available values
        let mut record = set_record();
        record["elements"].as_array_mut().unwrap().push(json!({
            "id": "RDE98",
            "parent_set": "RDES3",
            "name": "Bad entry",
            "element_version": { "number": 1, "date": "02/01/2024" },
            "schema_version": "1.0.0",
            "status": { "date": "2024-02-01", "name": "published" },
            "value_set": {
                "min_cardinality": 1,
                "max_cardinality": 5,
                "values": [
                    { "code": "RDE98.0", "name": "Absent" },
                    { "code": "RDE98.1", "name": "Present" }
                ]
            }
        }));

        let set = CdeSet::from_value(&record).unwrap();
        assert_eq!(set.elements.len(), 2);
        assert!(set.element_by_id("RDE98").is_none());
    }

    #[test]
    fn add_element_appends() {
        let mut set = CdeSet::from_value(&set_record()).unwrap();
        let extra = set.elements[0].clone();
        set.add_element(extra);
        assert_eq!(set.elements.len(), 3);
    }
}
