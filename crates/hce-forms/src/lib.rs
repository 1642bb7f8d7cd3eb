//! # hce-forms: Field Schemas and Validation
//!
//! Declarative schemas for the site's forms and the pure validator that
//! maps a schema plus the current values to either the coerced values or a
//! per-field error map.
//!
//! ## Layers
//!
//! - [`constraint`]: single-value checks (`Required`, length bounds, the
//!   email pattern, option catalogs) and constraints that switch on and off
//!   with other values.
//! - [`schema`]: `FieldDef`, `CrossFieldRule` and the ordered `FieldSchema`.
//! - [`validate`]: the validator. No I/O, no clock, no shared state.
//! - [`forms`]: the login, registration and contact schemas.
//! - [`catalog`]: option lists behind the contact form's selects.
//!
//! ## Crate Policy
//!
//! - Depends only on `hce-core` internally.
//! - Validation is deterministic: equal inputs give equal results.

pub mod catalog;
pub mod constraint;
pub mod forms;
pub mod schema;
pub mod validate;

pub use catalog::{ChoiceOption, ContactCatalog};
pub use constraint::{Constraint, DynamicConstraint, Pattern};
pub use forms::{contact_schema, login_schema, register_schema, FormKind, UnknownForm};
pub use schema::{CrossFieldRule, FieldDef, FieldSchema};
pub use validate::{
    validate, validate_field, FieldErrors, ValidationReport, ValidationResult, WRONG_TYPE_MESSAGE,
};
