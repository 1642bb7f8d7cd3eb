//! # Field Schema
//!
//! Declarative description of a form: an ordered list of field
//! definitions plus cross-field rules evaluated in declaration order.
//!
//! A field's effective constraint set is its static constraints followed by
//! whatever its dynamic constraints resolve to against the current values.
//! Required-ness is therefore not fixed when the schema is built: the
//! student `sala` field is optional until `isStudent` is set.

use std::fmt;
use std::sync::Arc;

use hce_core::{FieldKind, FieldName, FieldValue, FieldValues};

use crate::constraint::{Constraint, DynamicConstraint};

/// Definition of a single field.
#[derive(Debug, Clone)]
pub struct FieldDef {
    /// Unique key within the schema.
    pub name: FieldName,
    /// Semantic type.
    pub kind: FieldKind,
    /// Constraints that always apply, checked in order.
    pub constraints: Vec<Constraint>,
    /// Constraints whose presence depends on the current values.
    pub dynamic: Vec<DynamicConstraint>,
    /// Value the field starts with when the form mounts.
    pub default: Option<FieldValue>,
}

impl FieldDef {
    /// A field with no constraints.
    pub fn new(name: &str, kind: FieldKind) -> Self {
        Self {
            name: FieldName::new(name),
            kind,
            constraints: Vec::new(),
            dynamic: Vec::new(),
            default: None,
        }
    }

    /// Append a static constraint.
    pub fn constraint(mut self, constraint: Constraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    /// Append a dynamic constraint.
    pub fn dynamic(mut self, constraint: DynamicConstraint) -> Self {
        self.dynamic.push(constraint);
        self
    }

    /// Set the default value.
    pub fn default_value(mut self, value: impl Into<FieldValue>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Whether the field is required regardless of other values.
    pub fn is_statically_required(&self) -> bool {
        self.constraints.iter().any(Constraint::is_required)
    }

    /// Effective constraints against the current values: static first, then
    /// resolved dynamic ones.
    pub fn resolve(&self, values: &FieldValues) -> Vec<Constraint> {
        self.constraints
            .iter()
            .cloned()
            .chain(self.dynamic.iter().filter_map(|d| d.resolve(values)))
            .collect()
    }
}

type RulePredicate = dyn Fn(&FieldValues) -> bool + Send + Sync;

/// A check spanning several fields, reported on one target field.
///
/// The predicate is only evaluated when the guard holds; an inactive rule
/// never produces an error.
#[derive(Clone)]
pub struct CrossFieldRule {
    /// Rule name, used in logs.
    pub name: String,
    /// Field the error is written to.
    pub target: FieldName,
    /// Message written on failure.
    pub message: String,
    guard: Arc<RulePredicate>,
    predicate: Arc<RulePredicate>,
}

impl CrossFieldRule {
    /// Build a rule. `predicate` returns `true` when the values are acceptable.
    pub fn new<G, P>(
        name: impl Into<String>,
        target: &str,
        message: impl Into<String>,
        guard: G,
        predicate: P,
    ) -> Self
    where
        G: Fn(&FieldValues) -> bool + Send + Sync + 'static,
        P: Fn(&FieldValues) -> bool + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            target: FieldName::new(target),
            message: message.into(),
            guard: Arc::new(guard),
            predicate: Arc::new(predicate),
        }
    }

    /// Whether the rule applies to these values.
    pub fn is_active(&self, values: &FieldValues) -> bool {
        (self.guard)(values)
    }

    /// Evaluate the rule. `None` when inactive or satisfied.
    pub fn evaluate(&self, values: &FieldValues) -> Option<&str> {
        if self.is_active(values) && !(self.predicate)(values) {
            Some(&self.message)
        } else {
            None
        }
    }
}

impl fmt::Debug for CrossFieldRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CrossFieldRule")
            .field("name", &self.name)
            .field("target", &self.target)
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

/// Ordered set of field definitions plus cross-field rules.
#[derive(Debug, Clone)]
pub struct FieldSchema {
    name: String,
    fields: Vec<FieldDef>,
    rules: Vec<CrossFieldRule>,
}

impl FieldSchema {
    /// An empty schema.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            rules: Vec::new(),
        }
    }

    /// Append a field. A later field with the same name replaces the earlier one.
    pub fn field(mut self, def: FieldDef) -> Self {
        if let Some(existing) = self.fields.iter_mut().find(|f| f.name == def.name) {
            *existing = def;
        } else {
            self.fields.push(def);
        }
        self
    }

    /// Append a cross-field rule.
    pub fn rule(mut self, rule: CrossFieldRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Schema name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> &[FieldDef] {
        &self.fields
    }

    /// Cross-field rules in declaration order.
    pub fn rules(&self) -> &[CrossFieldRule] {
        &self.rules
    }

    /// Look up a field definition.
    pub fn get(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name.as_str() == name)
    }

    /// Effective constraint set of a field against the current values.
    pub fn constraints_for(&self, name: &str, values: &FieldValues) -> Option<Vec<Constraint>> {
        self.get(name).map(|def| def.resolve(values))
    }

    /// The values a freshly mounted form starts with.
    pub fn defaults(&self) -> FieldValues {
        self.fields
            .iter()
            .filter_map(|f| f.default.clone().map(|v| (f.name.clone(), v)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> FieldSchema {
        FieldSchema::new("test")
            .field(
                FieldDef::new("isStudent", FieldKind::Boolean)
                    .constraint(Constraint::boolean("checkbox"))
                    .default_value(false),
            )
            .field(
                FieldDef::new("sala", FieldKind::Text)
                    .constraint(Constraint::max_length(20, "too long"))
                    .dynamic(DynamicConstraint::required_when("isStudent", "needed")),
            )
            .rule(CrossFieldRule::new(
                "both",
                "sala",
                "both needed",
                |v| v.flag("isStudent"),
                |v| !v.text("turma").is_empty(),
            ))
    }

    #[test]
    fn defaults_only_include_fields_with_defaults() {
        let defaults = schema().defaults();
        assert_eq!(defaults.len(), 1);
        assert!(!defaults.flag("isStudent"));
        assert!(defaults.get("isStudent").is_some());
    }

    #[test]
    fn required_ness_is_resolved_from_values() {
        let s = schema();
        let off = s
            .constraints_for("sala", &FieldValues::new().with("isStudent", false))
            .unwrap();
        let on = s
            .constraints_for("sala", &FieldValues::new().with("isStudent", true))
            .unwrap();
        assert!(!off.iter().any(Constraint::is_required));
        assert!(on.iter().any(Constraint::is_required));
        assert!(!s.get("sala").unwrap().is_statically_required());
    }

    #[test]
    fn unknown_field_has_no_constraints() {
        assert!(schema().constraints_for("nope", &FieldValues::new()).is_none());
    }

    #[test]
    fn inactive_rule_never_fails() {
        let s = schema();
        let rule = &s.rules()[0];
        let values = FieldValues::new().with("isStudent", false);
        assert!(!rule.is_active(&values));
        assert_eq!(rule.evaluate(&values), None);
    }

    #[test]
    fn active_rule_reports_message() {
        let s = schema();
        let values = FieldValues::new().with("isStudent", true);
        assert_eq!(s.rules()[0].evaluate(&values), Some("both needed"));
    }

    #[test]
    fn redefining_a_field_replaces_it() {
        let s = FieldSchema::new("dup")
            .field(FieldDef::new("a", FieldKind::Text))
            .field(FieldDef::new("a", FieldKind::Email));
        assert_eq!(s.fields().len(), 1);
        assert_eq!(s.get("a").unwrap().kind, FieldKind::Email);
    }
}
