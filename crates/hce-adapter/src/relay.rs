//! # Contact Relay
//!
//! Delivery of contact requests. The site has no delivery backend yet;
//! [`SimulatedRelay`] stands in for one by waiting, logging the request and
//! reporting success.

use std::time::Duration;

use async_trait::async_trait;
use hce_core::FieldValues;
use hce_forms::forms::fields;
use serde::{Deserialize, Serialize};

use crate::error::RelayError;

/// A validated contact request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub project_type: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<String>,
}

impl ContactRequest {
    /// Build from validated contact form values. Blank optional selects
    /// become `None`.
    pub fn from_values(values: &FieldValues) -> Self {
        Self {
            name: values.text(fields::NAME).to_string(),
            email: values.text(fields::EMAIL).to_string(),
            project_type: values.text(fields::PROJECT_TYPE).to_string(),
            description: values.text(fields::DESCRIPTION).to_string(),
            deadline: values.optional_text(fields::DEADLINE).map(str::to_string),
            budget: values.optional_text(fields::BUDGET).map(str::to_string),
        }
    }
}

/// Adapter trait for contact delivery.
#[async_trait]
pub trait ContactRelay: Send + Sync {
    async fn relay(&self, request: &ContactRequest) -> Result<(), RelayError>;

    /// Implementation name, for logs.
    fn relay_name(&self) -> &str;
}

/// Relay that accepts every request after a fixed delay.
#[derive(Debug, Clone)]
pub struct SimulatedRelay {
    delay: Duration,
}

impl SimulatedRelay {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

#[async_trait]
impl ContactRelay for SimulatedRelay {
    async fn relay(&self, request: &ContactRequest) -> Result<(), RelayError> {
        tokio::time::sleep(self.delay).await;
        tracing::info!(
            name = %request.name,
            email = %request.email,
            project_type = %request.project_type,
            deadline = request.deadline.as_deref().unwrap_or("-"),
            budget = request.budget.as_deref().unwrap_or("-"),
            description_chars = request.description.chars().count(),
            "contact request received (simulated relay)"
        );
        Ok(())
    }

    fn relay_name(&self) -> &str {
        "SimulatedRelay"
    }
}
