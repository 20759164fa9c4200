//! Common Data Element (CDE) data models
//!
//! This crate provides strongly-typed Rust structures for Common Data
//! Elements used in structured radiology reporting: reusable value schemas,
//! the four element variants, the element factory, CDE sets, finding models,
//! and the programmatic builders.
//!
//! # Module Organization
//!
//! - `shared`: reusable structural fragments (versions, statuses,
//!   contributors, index codes, specialties, references)
//! - `element`: the four element variants and the [`CdElement`] union
//! - `factory`: discriminant-driven construction from raw records
//! - `validation`: aggregated structural validation of raw records
//! - `set`: [`CdeSet`] composition and JSON round-tripping
//! - `finding_model`: the attribute-based alternate input format
//! - `builders`: factory functions for programmatic record creation
//! - `observation`: minimal FHIR-style Observation projection
//!
//! # Example
//!
//! ```rust
//! use radcde_models::{CdElement, CdElementFactory};
//! use serde_json::json;
//!
//! let record = json!({
//!     "id": "RDE42",
//!     "parent_set": "RDES3",
//!     "name": "Nodule count",
//!     "element_version": { "number": 1, "date": "2024-01-15" },
//!     "schema_version": "1.0.0",
//!     "status": { "date": "2024-01-15", "name": "proposed" },
//!     "integer_value": { "min_value": 0, "max_value": 50 }
//! });
//!
//! let element = CdElementFactory::create(&record).unwrap();
//! assert!(matches!(element, CdElement::Integer(_)));
//! assert_eq!(element.id(), "RDE42");
//! ```

pub mod builders;
pub mod element;
pub mod error;
pub mod factory;
pub mod finding_model;
pub mod observation;
pub mod set;
pub mod shared;
pub mod validation;

// Re-export commonly used types
pub use element::{
    BooleanElement, CdElement, ElementBase, FloatElement, FloatValue, IntegerElement,
    IntegerValue, ValueSet, ValueSetElement, ValueSetValue,
};
pub use error::{Error, Result};
pub use factory::CdElementFactory;
pub use finding_model::{AttributeValue, FindingAttribute, FindingModel};
pub use observation::Observation;
pub use set::CdeSet;
pub use shared::{
    Contributors, Event, IndexCode, Organization, OrganizationRole, Person, PersonRole,
    Reference, Specialty, SpecialtyAbbreviation, Status, StatusState, Version,
};
pub use validation::{validate_element, validate_set, Severity, ValidationIssue};
