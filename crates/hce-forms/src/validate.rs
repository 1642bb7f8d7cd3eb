//! # Validator
//!
//! Pure mapping from a schema and the current values to either the
//! coerced value set or a field → message map.
//!
//! ## Algorithm
//!
//! 1. Every schema field is coerced: absent text becomes `""`, absent flags
//!    become `false`, and text of trimming kinds is trimmed.
//! 2. The field's effective constraints (static, then resolved dynamic) are
//!    checked in order. The first failure wins. An empty field without a
//!    required constraint skips its remaining constraints.
//! 3. Cross-field rules run against the coerced values in declaration
//!    order. A failing rule overwrites the error on its target field.
//! 4. No errors yields `Valid` with the coerced values; fields not in the
//!    schema are dropped.
//!
//! Validation has no side effects, so validating the same values twice
//! returns equal results.

use std::collections::BTreeMap;

use hce_core::{FieldKind, FieldName, FieldValue, FieldValues};
use serde::{Deserialize, Serialize};

use crate::schema::{FieldDef, FieldSchema};

/// Reported when a text field receives a flag or the reverse.
pub const WRONG_TYPE_MESSAGE: &str = "Unexpected value type";

/// Field → message mapping. A field is valid iff it has no entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<FieldName, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Record an error, keeping an existing one.
    pub fn insert_first(&mut self, field: FieldName, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }

    /// Record an error, replacing an existing one.
    pub fn overwrite(&mut self, field: FieldName, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    /// Clear the error on one field.
    pub fn remove(&mut self, field: &str) -> Option<String> {
        self.0.remove(field)
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FieldName, &String)> {
        self.0.iter()
    }

    /// Field names with errors, in order.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(FieldName::as_str)
    }
}

/// Result of validating a form. Exactly one variant is populated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationResult {
    /// All constraints hold. Carries the trimmed, coerced values.
    Valid(FieldValues),
    /// At least one constraint failed.
    Invalid(FieldErrors),
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }

    /// The error map; empty when valid.
    pub fn errors(&self) -> FieldErrors {
        match self {
            Self::Valid(_) => FieldErrors::new(),
            Self::Invalid(errors) => errors.clone(),
        }
    }

    /// Convert into a `Result`.
    pub fn into_result(self) -> Result<FieldValues, FieldErrors> {
        match self {
            Self::Valid(values) => Ok(values),
            Self::Invalid(errors) => Err(errors),
        }
    }
}

/// Wire shape of a validation result shared by the HTTP API and the CLI:
/// `{"valid": true, "values": {..}}` or `{"valid": false, "errors": {..}}`.
///
/// Sensitive fields (passwords) are dropped from `values`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<FieldValues>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<FieldErrors>,
}

impl ValidationReport {
    pub fn new(schema: &FieldSchema, result: ValidationResult) -> Self {
        match result {
            ValidationResult::Valid(mut values) => {
                for def in schema.fields().iter().filter(|d| d.kind.is_sensitive()) {
                    values.remove(def.name.as_str());
                }
                Self {
                    valid: true,
                    values: Some(values),
                    errors: None,
                }
            }
            ValidationResult::Invalid(errors) => Self {
                valid: false,
                values: None,
                errors: Some(errors),
            },
        }
    }
}

/// Validate `values` against `schema`.
pub fn validate(schema: &FieldSchema, values: &FieldValues) -> ValidationResult {
    let mut coerced = FieldValues::new();
    let mut errors = FieldErrors::new();

    for def in schema.fields() {
        let value = coerce(def, values.get(def.name.as_str()));
        if let Some(message) = check_field(def, &value, values) {
            errors.insert_first(def.name.clone(), message);
        }
        coerced.insert(def.name.clone(), value);
    }

    for rule in schema.rules() {
        if let Some(message) = rule.evaluate(&coerced) {
            errors.overwrite(rule.target.clone(), message);
        }
    }

    if errors.is_empty() {
        ValidationResult::Valid(coerced)
    } else {
        ValidationResult::Invalid(errors)
    }
}

/// Validate a single field in isolation, ignoring cross-field rules.
pub fn validate_field(schema: &FieldSchema, name: &str, values: &FieldValues) -> Option<String> {
    let def = schema.get(name)?;
    let value = coerce(def, values.get(name));
    check_field(def, &value, values)
}

fn coerce(def: &FieldDef, raw: Option<&FieldValue>) -> FieldValue {
    match (def.kind, raw) {
        (FieldKind::Boolean, None) => FieldValue::Flag(false),
        (_, None) => FieldValue::Text(String::new()),
        (kind, Some(FieldValue::Text(s))) if kind.trims() => FieldValue::Text(s.trim().to_string()),
        (_, Some(v)) => v.clone(),
    }
}

fn check_field(def: &FieldDef, value: &FieldValue, values: &FieldValues) -> Option<String> {
    let is_flag_kind = def.kind == FieldKind::Boolean;
    if value.as_flag().is_some() != is_flag_kind && !has_boolean_constraint(def) {
        return Some(WRONG_TYPE_MESSAGE.to_string());
    }

    let constraints = def.resolve(values);
    let required = constraints.iter().find(|c| c.is_required());

    if value.is_empty() && !is_flag_kind {
        return required.map(|c| c.message().to_string());
    }

    if let Some(c) = required {
        if let Err(message) = c.check(value) {
            return Some(message.to_string());
        }
    }

    constraints
        .iter()
        .filter(|c| !c.is_required())
        .find_map(|c| c.check(value).err().map(str::to_string))
}

fn has_boolean_constraint(def: &FieldDef) -> bool {
    def.constraints
        .iter()
        .any(|c| matches!(c, crate::constraint::Constraint::Boolean { .. }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraint::{Constraint, DynamicConstraint};
    use crate::schema::CrossFieldRule;

    fn schema() -> FieldSchema {
        FieldSchema::new("test")
            .field(
                FieldDef::new("email", FieldKind::Email)
                    .constraint(Constraint::required("email required"))
                    .constraint(Constraint::email("bad email"))
                    .constraint(Constraint::max_length(12, "email too long")),
            )
            .field(
                FieldDef::new("nick", FieldKind::Text)
                    .constraint(Constraint::min_length(3, "nick too short")),
            )
            .field(
                FieldDef::new("flag", FieldKind::Boolean)
                    .constraint(Constraint::boolean("flag must be a checkbox")),
            )
            .field(
                FieldDef::new("extra", FieldKind::Text)
                    .dynamic(DynamicConstraint::required_when("flag", "extra needed")),
            )
    }

    #[test]
    fn first_failing_constraint_wins() {
        // Fails both pattern and max length; the pattern is declared first.
        let values = FieldValues::new().with("email", "not-an-email-at-all");
        let errors = validate(&schema(), &values).errors();
        assert_eq!(errors.get("email"), Some("bad email"));
    }

    #[test]
    fn empty_optional_field_skips_its_constraints() {
        let values = FieldValues::new().with("email", "a@b.co").with("nick", "   ");
        let result = validate(&schema(), &values);
        assert!(result.is_valid(), "{result:?}");
    }

    #[test]
    fn absent_fields_are_coerced() {
        let values = FieldValues::new().with("email", "a@b.co");
        match validate(&schema(), &values) {
            ValidationResult::Valid(v) => {
                assert_eq!(v.get("nick"), Some(&FieldValue::Text(String::new())));
                assert_eq!(v.get("flag"), Some(&FieldValue::Flag(false)));
            }
            other => panic!("expected Valid, got {other:?}"),
        }
    }

    #[test]
    fn unknown_fields_are_dropped() {
        let values = FieldValues::new().with("email", "a@b.co").with("admin", true);
        let v = validate(&schema(), &values).into_result().unwrap();
        assert!(!v.contains("admin"));
    }

    #[test]
    fn text_in_boolean_field_fails_type_check() {
        let values = FieldValues::new().with("email", "a@b.co").with("flag", "yes");
        let errors = validate(&schema(), &values).errors();
        assert_eq!(errors.get("flag"), Some("flag must be a checkbox"));
    }

    #[test]
    fn flag_in_text_field_fails_type_check() {
        let values = FieldValues::new().with("email", true);
        let errors = validate(&schema(), &values).errors();
        assert_eq!(errors.get("email"), Some(WRONG_TYPE_MESSAGE));
    }

    #[test]
    fn dynamic_required_applies_only_when_flag_set() {
        let base = FieldValues::new().with("email", "a@b.co");
        assert!(validate(&schema(), &base.clone().with("flag", false)).is_valid());
        let errors = validate(&schema(), &base.with("flag", true)).errors();
        assert_eq!(errors.get("extra"), Some("extra needed"));
    }

    #[test]
    fn cross_field_rule_overwrites_target_error() {
        let s = schema().rule(CrossFieldRule::new(
            "nick-not-reserved",
            "nick",
            "nick is reserved",
            |_| true,
            |v| v.text("nick") != "no",
        ));
        // nick fails min length first, then the rule overwrites it.
        let values = FieldValues::new().with("email", "a@b.co").with("nick", "no");
        let errors = validate(&s, &values).errors();
        assert_eq!(errors.get("nick"), Some("nick is reserved"));
    }

    #[test]
    fn cross_field_rules_see_trimmed_values() {
        let s = schema().rule(CrossFieldRule::new(
            "nick-set",
            "nick",
            "nick needed with flag",
            |v| v.flag("flag"),
            |v| !v.text("nick").is_empty(),
        ));
        let values = FieldValues::new()
            .with("email", "a@b.co")
            .with("flag", true)
            .with("extra", "x")
            .with("nick", "    ");
        let errors = validate(&s, &values).errors();
        assert_eq!(errors.get("nick"), Some("nick needed with flag"));
    }

    #[test]
    fn validate_field_ignores_other_fields() {
        let values = FieldValues::new().with("nick", "ab");
        assert_eq!(
            validate_field(&schema(), "nick", &values).as_deref(),
            Some("nick too short")
        );
        assert_eq!(validate_field(&schema(), "unknown", &values), None);
    }

    #[test]
    fn field_errors_insert_first_keeps_original() {
        let mut errors = FieldErrors::new();
        errors.insert_first(FieldName::new("a"), "one");
        errors.insert_first(FieldName::new("a"), "two");
        assert_eq!(errors.get("a"), Some("one"));
        errors.overwrite(FieldName::new("a"), "three");
        assert_eq!(errors.get("a"), Some("three"));
    }

    #[test]
    fn report_omits_sensitive_values() {
        let s = schema().field(FieldDef::new("secret", FieldKind::Password));
        let values = FieldValues::new().with("email", "a@b.co").with("secret", " x ");
        let report = ValidationReport::new(&s, validate(&s, &values));
        assert!(report.valid);
        let values = report.values.unwrap();
        assert!(!values.contains("secret"));
        assert_eq!(values.text("email"), "a@b.co");
    }

    #[test]
    fn invalid_report_carries_errors_only() {
        let report = ValidationReport::new(&schema(), validate(&schema(), &FieldValues::new()));
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["valid"], false);
        assert_eq!(json["errors"]["email"], "email required");
        assert!(json.get("values").is_none());
    }

    #[test]
    fn result_serializes_with_variant_tag() {
        let invalid = validate(&schema(), &FieldValues::new());
        let json = serde_json::to_value(&invalid).unwrap();
        assert_eq!(json["invalid"]["email"], "email required");
    }
}
