//! # Field Constraints
//!
//! The individual checks a field value can be subjected to. Each constraint
//! carries the user-facing message reported when it fails.
//!
//! Constraints are checked against the *coerced* value: text is already
//! trimmed (for kinds that trim) and absent values have been replaced by
//! `""` or `false` before any check runs.

use std::fmt;
use std::sync::{Arc, OnceLock};

use hce_core::{FieldValue, FieldValues};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Shape accepted by `Pattern::Email`.
///
/// Dot-separated local part, at least one dotted domain label, and an
/// alphabetic top-level domain of two or more letters.
const EMAIL_PATTERN: &str =
    r"^[A-Za-z0-9_'+\-]+(\.[A-Za-z0-9_'+\-]+)*@([A-Za-z0-9]([A-Za-z0-9\-]*[A-Za-z0-9])?\.)+[A-Za-z]{2,}$";

fn email_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(EMAIL_PATTERN).expect("email regex must compile"))
}

/// Named value shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pattern {
    /// An email address.
    Email,
}

impl Pattern {
    /// Whether `text` has this shape.
    pub fn matches(&self, text: &str) -> bool {
        match self {
            Self::Email => email_re().is_match(text),
        }
    }
}

/// A single check over one field value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "constraint", rename_all = "snake_case")]
pub enum Constraint {
    /// The value must not be empty (blank text or an unset flag).
    Required { message: String },
    /// Text must have at least `min` characters.
    MinLength { min: usize, message: String },
    /// Text must have at most `max` characters.
    MaxLength { max: usize, message: String },
    /// Text must match a named shape.
    Pattern { pattern: Pattern, message: String },
    /// Text must be one of the listed option values.
    OneOf { options: Vec<String>, message: String },
    /// The value must be a boolean flag.
    Boolean { message: String },
}

impl Constraint {
    pub fn required(message: impl Into<String>) -> Self {
        Self::Required { message: message.into() }
    }

    pub fn min_length(min: usize, message: impl Into<String>) -> Self {
        Self::MinLength { min, message: message.into() }
    }

    pub fn max_length(max: usize, message: impl Into<String>) -> Self {
        Self::MaxLength { max, message: message.into() }
    }

    pub fn email(message: impl Into<String>) -> Self {
        Self::Pattern { pattern: Pattern::Email, message: message.into() }
    }

    pub fn one_of<I, S>(options: I, message: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::OneOf {
            options: options.into_iter().map(Into::into).collect(),
            message: message.into(),
        }
    }

    pub fn boolean(message: impl Into<String>) -> Self {
        Self::Boolean { message: message.into() }
    }

    /// Whether this is a required-ness constraint.
    pub fn is_required(&self) -> bool {
        matches!(self, Self::Required { .. })
    }

    /// The message reported when this constraint fails.
    pub fn message(&self) -> &str {
        match self {
            Self::Required { message }
            | Self::MinLength { message, .. }
            | Self::MaxLength { message, .. }
            | Self::Pattern { message, .. }
            | Self::OneOf { message, .. }
            | Self::Boolean { message } => message,
        }
    }

    /// Check a coerced value. Returns the failure message, if any.
    ///
    /// Length and pattern constraints pass vacuously on flags; a flag in a
    /// text field is caught by the validator's kind check, not here.
    pub fn check(&self, value: &FieldValue) -> Result<(), &str> {
        let ok = match (self, value) {
            (Self::Required { .. }, v) => !v.is_empty(),
            (Self::Boolean { .. }, v) => v.as_flag().is_some(),
            (Self::MinLength { min, .. }, FieldValue::Text(s)) => s.chars().count() >= *min,
            (Self::MaxLength { max, .. }, FieldValue::Text(s)) => s.chars().count() <= *max,
            (Self::Pattern { pattern, .. }, FieldValue::Text(s)) => pattern.matches(s),
            (Self::OneOf { options, .. }, FieldValue::Text(s)) => {
                options.iter().any(|o| o == s)
            }
            (_, FieldValue::Flag(_)) => true,
        };
        if ok {
            Ok(())
        } else {
            Err(self.message())
        }
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Required { .. } => write!(f, "required"),
            Self::MinLength { min, .. } => write!(f, "minLength({min})"),
            Self::MaxLength { max, .. } => write!(f, "maxLength({max})"),
            Self::Pattern { pattern: Pattern::Email, .. } => write!(f, "pattern(email)"),
            Self::OneOf { options, .. } => write!(f, "oneOf({})", options.join("|")),
            Self::Boolean { .. } => write!(f, "type(boolean)"),
        }
    }
}

type ConstraintFn = dyn Fn(&FieldValues) -> Option<Constraint> + Send + Sync;

/// A constraint whose presence depends on the current form values.
///
/// Resolved against the full value set on every validation, so toggling the
/// controlling field changes the outcome without rebuilding the schema.
#[derive(Clone)]
pub struct DynamicConstraint {
    description: String,
    resolve: Arc<ConstraintFn>,
}

impl DynamicConstraint {
    /// Build from an arbitrary resolver.
    pub fn new<F>(description: impl Into<String>, resolve: F) -> Self
    where
        F: Fn(&FieldValues) -> Option<Constraint> + Send + Sync + 'static,
    {
        Self {
            description: description.into(),
            resolve: Arc::new(resolve),
        }
    }

    /// Required only while the boolean field `flag` is set.
    pub fn required_when(flag: &str, message: impl Into<String>) -> Self {
        let flag = flag.to_string();
        let message = message.into();
        Self::new(format!("required when {flag}"), move |values| {
            values
                .flag(&flag)
                .then(|| Constraint::required(message.clone()))
        })
    }

    /// Resolve against the current values.
    pub fn resolve(&self, values: &FieldValues) -> Option<Constraint> {
        (self.resolve)(values)
    }

    /// Human-readable description.
    pub fn description(&self) -> &str {
        &self.description
    }
}

impl fmt::Debug for DynamicConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynamicConstraint")
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}
