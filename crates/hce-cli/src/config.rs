//! # Config Subcommand
//!
//! Prints the configuration the service would run with, read from the
//! `HCE_*` environment variables.

use anyhow::Result;
use clap::Args;
use hce_adapter::AdapterConfig;
use hce_core::HceError;
use serde::Serialize;

/// Arguments for the `hce config` subcommand.
#[derive(Args, Debug)]
pub struct ConfigArgs {}

/// Printable view of the effective configuration.
#[derive(Debug, Serialize)]
pub struct ConfigView {
    pub site_origin: String,
    pub email_redirect_to: String,
    pub relay_delay_ms: u64,
    pub success_pause_ms: u64,
}

impl From<&AdapterConfig> for ConfigView {
    fn from(config: &AdapterConfig) -> Self {
        Self {
            site_origin: config.site_origin.clone(),
            email_redirect_to: config.email_redirect_to(),
            relay_delay_ms: config.relay_delay.as_millis() as u64,
            success_pause_ms: config.success_pause.as_millis() as u64,
        }
    }
}

/// Execute the config subcommand.
pub fn run_config(_args: &ConfigArgs) -> Result<u8> {
    let config = AdapterConfig::from_env().map_err(|e| HceError::Config(e.to_string()))?;
    println!("{}", serde_json::to_string_pretty(&ConfigView::from(&config))?);
    Ok(0)
}
