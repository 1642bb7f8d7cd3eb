//! # Field Primitives
//!
//! Names, kinds and values of form fields.
//!
//! `FieldValues` serializes as a flat JSON object so the same value set can
//! move between the form controller, the HTTP API and the CLI unchanged:
//!
//! ```json
//! { "name": "Jo", "email": "jo@x.com", "isStudent": true, "sala": "1" }
//! ```

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Unique key of a field within a form schema.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldName(String);

impl FieldName {
    /// Create a field name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Access the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FieldName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl std::borrow::Borrow<str> for FieldName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Semantic type of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    /// Free text.
    Text,
    /// An email address.
    Email,
    /// A password. Never trimmed, never logged.
    Password,
    /// A checkbox.
    Boolean,
    /// One value out of a fixed option catalog.
    Choice,
}

impl FieldKind {
    /// Whether values of this kind are trimmed before length and pattern checks.
    pub fn trims(&self) -> bool {
        !matches!(self, Self::Password | Self::Boolean)
    }

    /// Whether values of this kind may appear in log output.
    pub fn is_sensitive(&self) -> bool {
        matches!(self, Self::Password)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Text => "text",
            Self::Email => "email",
            Self::Password => "password",
            Self::Boolean => "boolean",
            Self::Choice => "choice",
        };
        f.write_str(s)
    }
}

/// Current value of a single field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Text, email, password and choice fields.
    Text(String),
    /// Boolean fields.
    Flag(bool),
}

impl FieldValue {
    /// The text content, or `None` for a flag.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Flag(_) => None,
        }
    }

    /// The flag content, or `None` for text.
    pub fn as_flag(&self) -> Option<bool> {
        match self {
            Self::Flag(b) => Some(*b),
            Self::Text(_) => None,
        }
    }

    /// Whether the value counts as empty (blank text or an unset flag).
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(s) => s.trim().is_empty(),
            Self::Flag(b) => !b,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        Self::Flag(b)
    }
}

/// Ordered mapping from field name to current value.
///
/// Lookups of absent fields are lenient: [`FieldValues::text`] returns `""`
/// and [`FieldValues::flag`] returns `false`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldValues(BTreeMap<FieldName, FieldValue>);

impl FieldValues {
    /// Create an empty value set.
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<FieldName>, value: impl Into<FieldValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Insert or replace a value, returning the previous one.
    pub fn insert(
        &mut self,
        name: impl Into<FieldName>,
        value: impl Into<FieldValue>,
    ) -> Option<FieldValue> {
        self.0.insert(name.into(), value.into())
    }

    /// Remove a value.
    pub fn remove(&mut self, name: &str) -> Option<FieldValue> {
        self.0.remove(name)
    }

    /// The raw value of a field, if present.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.0.get(name)
    }

    /// Text content of a field; `""` when absent or not text.
    pub fn text(&self, name: &str) -> &str {
        self.0.get(name).and_then(FieldValue::as_text).unwrap_or("")
    }

    /// Flag content of a field; `false` when absent or not a flag.
    pub fn flag(&self, name: &str) -> bool {
        self.0.get(name).and_then(FieldValue::as_flag).unwrap_or(false)
    }

    /// Optional text: `None` when the field is absent or blank.
    pub fn optional_text(&self, name: &str) -> Option<&str> {
        let text = self.text(name);
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }

    /// Whether a field is present.
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Remove every value.
    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Number of fields with a value.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no field has a value.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate in field-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&FieldName, &FieldValue)> {
        self.0.iter()
    }
}

impl<N: Into<FieldName>, V: Into<FieldValue>> FromIterator<(N, V)> for FieldValues {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(n, v)| (n.into(), v.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_text_reads_as_empty() {
        let values = FieldValues::new();
        assert_eq!(values.text("email"), "");
        assert!(!values.flag("isStudent"));
    }

    #[test]
    fn flag_under_text_lookup_reads_as_empty() {
        let values = FieldValues::new().with("isStudent", true);
        assert_eq!(values.text("isStudent"), "");
        assert!(values.flag("isStudent"));
    }

    #[test]
    fn optional_text_treats_blank_as_absent() {
        let values = FieldValues::new().with("budget", "").with("deadline", "urgent");
        assert_eq!(values.optional_text("budget"), None);
        assert_eq!(values.optional_text("deadline"), Some("urgent"));
        assert_eq!(values.optional_text("missing"), None);
    }

    #[test]
    fn field_value_emptiness() {
        assert!(FieldValue::from("   ").is_empty());
        assert!(!FieldValue::from(" a ").is_empty());
        assert!(FieldValue::from(false).is_empty());
        assert!(!FieldValue::from(true).is_empty());
    }

    #[test]
    fn values_serialize_as_flat_object() {
        let values = FieldValues::new()
            .with("email", "jo@x.com")
            .with("isStudent", true);
        let json = serde_json::to_value(&values).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "email": "jo@x.com", "isStudent": true })
        );
    }

    #[test]
    fn values_deserialize_from_flat_object() {
        let values: FieldValues =
            serde_json::from_str(r#"{"name":"Jo","isStudent":false}"#).unwrap();
        assert_eq!(values.text("name"), "Jo");
        assert_eq!(values.get("isStudent"), Some(&FieldValue::Flag(false)));
    }

    #[test]
    fn numbers_are_not_field_values() {
        let parsed: Result<FieldValues, _> = serde_json::from_str(r#"{"age": 12}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn kind_trimming_rules() {
        assert!(FieldKind::Email.trims());
        assert!(FieldKind::Text.trims());
        assert!(!FieldKind::Password.trims());
        assert!(FieldKind::Password.is_sensitive());
    }

    #[test]
    fn from_iterator_collects_pairs() {
        let values: FieldValues = [("a", "1"), ("b", "2")].into_iter().collect();
        assert_eq!(values.len(), 2);
        assert_eq!(values.text("b"), "2");
    }
}
