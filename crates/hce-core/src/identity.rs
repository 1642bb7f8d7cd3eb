//! # Identity Newtypes
//!
//! Identifiers for live form instances. Every mounted form controller gets a
//! fresh `FormId` so that log lines from concurrent forms can be told apart.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier of a mounted form instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FormId(pub Uuid);

impl FormId {
    /// Generate a new random form identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for FormId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for FormId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "form:{}", self.0)
    }
}
