//! # Built-in Form Schemas
//!
//! The three forms of the site: login, registration (with the optional
//! student section) and the project contact form.
//!
//! ## Student section
//!
//! `sala` and `turma` are optional text fields. Checking `isStudent` makes
//! `sala` required through a dynamic constraint, and the
//! `student-class-required` rule reports a missing `sala` *or* `turma` on
//! `sala`, where the form shows the student section's single error slot.

use std::fmt;
use std::str::FromStr;

use hce_core::FieldKind;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::{self, BUDGET_RANGES, DEADLINES, PROJECT_TYPES};
use crate::constraint::{Constraint, DynamicConstraint};
use crate::schema::{CrossFieldRule, FieldDef, FieldSchema};

/// Field keys, shared with the submission adapters.
pub mod fields {
    pub const NAME: &str = "name";
    pub const EMAIL: &str = "email";
    pub const PASSWORD: &str = "password";
    pub const IS_STUDENT: &str = "isStudent";
    pub const SALA: &str = "sala";
    pub const TURMA: &str = "turma";
    pub const PROJECT_TYPE: &str = "projectType";
    pub const DESCRIPTION: &str = "description";
    pub const DEADLINE: &str = "deadline";
    pub const BUDGET: &str = "budget";
}

/// Field-level product copy.
pub mod messages {
    pub const NAME_REQUIRED: &str = "Name is required";
    pub const NAME_MIN: &str = "Name must be at least 2 characters";
    pub const NAME_MAX: &str = "Name must be at most 100 characters";
    pub const EMAIL_REQUIRED: &str = "Email is required";
    pub const EMAIL_INVALID: &str = "Invalid email";
    pub const EMAIL_MAX: &str = "Email must be at most 255 characters";
    pub const PASSWORD_REQUIRED: &str = "Password is required";
    pub const PASSWORD_MIN: &str = "Password must be at least 6 characters";
    pub const PASSWORD_MAX: &str = "Password must be at most 72 characters";
    pub const IS_STUDENT_TYPE: &str = "Student selection must be a checkbox";
    pub const CLASS_MAX: &str = "Must be at most 20 characters";
    pub const STUDENT_CLASS_REQUIRED: &str = "Sala and turma are required for students";
    pub const PROJECT_TYPE_REQUIRED: &str = "Select a project type";
    pub const PROJECT_TYPE_INVALID: &str = "Select a valid project type";
    pub const DESCRIPTION_REQUIRED: &str = "Describe your project";
    pub const DESCRIPTION_MIN: &str = "Description must be at least 10 characters";
    pub const DESCRIPTION_MAX: &str = "Description must be at most 2000 characters";
    pub const DEADLINE_INVALID: &str = "Select a valid deadline";
    pub const BUDGET_INVALID: &str = "Select a valid budget range";
}

use fields::*;

/// Requested form name is not one of the built-in forms.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown form '{0}' (expected login, register or contact)")]
pub struct UnknownForm(pub String);

/// The built-in forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormKind {
    Login,
    Register,
    Contact,
}

impl FormKind {
    pub const ALL: [FormKind; 3] = [Self::Login, Self::Register, Self::Contact];

    /// Build this form's schema.
    pub fn schema(&self) -> FieldSchema {
        match self {
            Self::Login => login_schema(),
            Self::Register => register_schema(),
            Self::Contact => contact_schema(),
        }
    }

    /// Whether a successful submission pauses on a success panel before resetting.
    pub fn pauses_on_success(&self) -> bool {
        matches!(self, Self::Contact)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Register => "register",
            Self::Contact => "contact",
        }
    }
}

impl fmt::Display for FormKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FormKind {
    type Err = UnknownForm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "login" | "sign-in" | "signin" => Ok(Self::Login),
            "register" | "sign-up" | "signup" => Ok(Self::Register),
            "contact" => Ok(Self::Contact),
            _ => Err(UnknownForm(s.to_string())),
        }
    }
}

fn email_field() -> FieldDef {
    FieldDef::new(EMAIL, FieldKind::Email)
        .constraint(Constraint::required(messages::EMAIL_REQUIRED))
        .constraint(Constraint::email(messages::EMAIL_INVALID))
        .constraint(Constraint::max_length(255, messages::EMAIL_MAX))
}

fn password_field() -> FieldDef {
    FieldDef::new(PASSWORD, FieldKind::Password)
        .constraint(Constraint::required(messages::PASSWORD_REQUIRED))
        .constraint(Constraint::min_length(6, messages::PASSWORD_MIN))
        .constraint(Constraint::max_length(72, messages::PASSWORD_MAX))
}

fn name_field() -> FieldDef {
    FieldDef::new(NAME, FieldKind::Text)
        .constraint(Constraint::required(messages::NAME_REQUIRED))
        .constraint(Constraint::min_length(2, messages::NAME_MIN))
        .constraint(Constraint::max_length(100, messages::NAME_MAX))
}

/// Login: email and password.
pub fn login_schema() -> FieldSchema {
    FieldSchema::new("login")
        .field(email_field())
        .field(password_field())
}

/// Registration with the optional student section.
pub fn register_schema() -> FieldSchema {
    FieldSchema::new("register")
        .field(name_field())
        .field(email_field())
        .field(password_field())
        .field(
            FieldDef::new(IS_STUDENT, FieldKind::Boolean)
                .constraint(Constraint::boolean(messages::IS_STUDENT_TYPE))
                .default_value(false),
        )
        .field(
            FieldDef::new(SALA, FieldKind::Text)
                .constraint(Constraint::max_length(20, messages::CLASS_MAX))
                .dynamic(DynamicConstraint::required_when(
                    IS_STUDENT,
                    messages::STUDENT_CLASS_REQUIRED,
                )),
        )
        .field(
            FieldDef::new(TURMA, FieldKind::Text)
                .constraint(Constraint::max_length(20, messages::CLASS_MAX)),
        )
        .rule(CrossFieldRule::new(
            "student-class-required",
            SALA,
            messages::STUDENT_CLASS_REQUIRED,
            |v| v.flag(IS_STUDENT),
            |v| !v.text(SALA).is_empty() && !v.text(TURMA).is_empty(),
        ))
}

/// Project contact request.
pub fn contact_schema() -> FieldSchema {
    FieldSchema::new("contact")
        .field(name_field())
        .field(email_field())
        .field(
            FieldDef::new(PROJECT_TYPE, FieldKind::Choice)
                .constraint(Constraint::required(messages::PROJECT_TYPE_REQUIRED))
                .constraint(Constraint::one_of(
                    catalog::values(PROJECT_TYPES),
                    messages::PROJECT_TYPE_INVALID,
                )),
        )
        .field(
            FieldDef::new(DESCRIPTION, FieldKind::Text)
                .constraint(Constraint::required(messages::DESCRIPTION_REQUIRED))
                .constraint(Constraint::min_length(10, messages::DESCRIPTION_MIN))
                .constraint(Constraint::max_length(2000, messages::DESCRIPTION_MAX)),
        )
        .field(
            FieldDef::new(DEADLINE, FieldKind::Choice).constraint(Constraint::one_of(
                catalog::values(DEADLINES),
                messages::DEADLINE_INVALID,
            )),
        )
        .field(
            FieldDef::new(BUDGET, FieldKind::Choice).constraint(Constraint::one_of(
                catalog::values(BUDGET_RANGES),
                messages::BUDGET_INVALID,
            )),
        )
}
