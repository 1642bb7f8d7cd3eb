//! # Contact Option Catalogs
//!
//! The fixed option lists behind the contact form's select fields. Option
//! values are what travels in `FieldValues`; labels are display copy.

use serde::Serialize;

/// One selectable option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChoiceOption {
    pub value: &'static str,
    pub label: &'static str,
}

const fn opt(value: &'static str, label: &'static str) -> ChoiceOption {
    ChoiceOption { value, label }
}

pub const PROJECT_TYPES: &[ChoiceOption] = &[
    opt("web", "Web Development"),
    opt("system", "Custom System"),
    opt("landing", "Landing Page"),
    opt("automation", "Automation"),
    opt("maintenance", "Maintenance"),
    opt("other", "Other"),
];

pub const DEADLINES: &[ChoiceOption] = &[
    opt("urgent", "Urgent (1-2 weeks)"),
    opt("normal", "Normal (1-2 months)"),
    opt("flexible", "Flexible (3+ months)"),
    opt("discuss", "To be discussed"),
];

// Values are historical identifiers; the labels carry the current ranges.
pub const BUDGET_RANGES: &[ChoiceOption] = &[
    opt("under-50", "Up to R$ 50"),
    opt("5k-15k", "R$ 50 - R$ 80"),
    opt("15k-30k", "R$ 80 - R$ 100"),
    opt("30k-plus", "Above R$ 100"),
    opt("discuss", "To be discussed"),
];

/// Option values of a catalog.
pub fn values(catalog: &[ChoiceOption]) -> impl Iterator<Item = &'static str> + '_ {
    catalog.iter().map(|o| o.value)
}

/// All catalogs, keyed by the contact field they populate.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactCatalog {
    pub project_type: &'static [ChoiceOption],
    pub deadline: &'static [ChoiceOption],
    pub budget: &'static [ChoiceOption],
}

impl ContactCatalog {
    pub fn get() -> Self {
        Self {
            project_type: PROJECT_TYPES,
            deadline: DEADLINES,
            budget: BUDGET_RANGES,
        }
    }
}
