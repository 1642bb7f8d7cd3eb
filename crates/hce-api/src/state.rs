//! # Application State
//!
//! Shared state for the Axum application, passed to all route handlers
//! via the `State` extractor. Cheap to clone: collaborators sit behind
//! `Arc`.

use std::sync::Arc;

use hce_adapter::{AdapterConfig, ConfigError, ContactRelay, FeedbackSink, SimulatedRelay, TracingFeedback};

/// Service configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Port to bind (default 8080).
    pub port: u16,
    pub adapter: AdapterConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            adapter: AdapterConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load from `PORT` and the `HCE_*` adapter variables.
    ///
    /// An unparsable `PORT` falls back to 8080.
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080);
        Ok(Self {
            port,
            adapter: AdapterConfig::from_env()?,
        })
    }
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub relay: Arc<dyn ContactRelay>,
    pub feedback: Arc<dyn FeedbackSink>,
}

impl AppState {
    /// Default configuration with the simulated relay.
    pub fn new() -> Self {
        Self::with_config(AppConfig::default())
    }

    /// The simulated relay, delayed per `config`.
    pub fn with_config(config: AppConfig) -> Self {
        let relay = Arc::new(SimulatedRelay::new(config.adapter.relay_delay));
        Self::with_relay(config, relay)
    }

    /// Explicit relay, for alternative delivery backends and tests.
    pub fn with_relay(config: AppConfig, relay: Arc<dyn ContactRelay>) -> Self {
        Self {
            config,
            relay,
            feedback: Arc::new(TracingFeedback),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .field("relay", &self.relay.relay_name())
            .finish_non_exhaustive()
    }
}
