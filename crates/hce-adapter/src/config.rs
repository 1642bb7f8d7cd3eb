//! Adapter configuration.
//!
//! Defaults reproduce the production behavior. Override via environment
//! variables, or build explicitly in tests.

use std::time::Duration;

use url::Url;

use crate::error::ConfigError;

/// Pause between a successful contact submission and the form reset.
pub const DEFAULT_SUCCESS_PAUSE: Duration = Duration::from_millis(3000);

/// Latency of the simulated contact relay.
pub const DEFAULT_RELAY_DELAY: Duration = Duration::from_millis(2000);

pub const DEFAULT_SITE_ORIGIN: &str = "http://localhost:8080";

/// Settings shared by the submission adapters and the form controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdapterConfig {
    /// Public origin of the site, without a trailing slash.
    pub site_origin: String,
    /// Delay applied by `SimulatedRelay`.
    pub relay_delay: Duration,
    /// How long the contact form shows its success panel.
    pub success_pause: Duration,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            site_origin: DEFAULT_SITE_ORIGIN.to_string(),
            relay_delay: DEFAULT_RELAY_DELAY,
            success_pause: DEFAULT_SUCCESS_PAUSE,
        }
    }
}

impl AdapterConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `HCE_SITE_ORIGIN` (default: `http://localhost:8080`)
    /// - `HCE_RELAY_DELAY_MS` (default: 2000)
    /// - `HCE_SUCCESS_PAUSE_MS` (default: 3000)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let site_origin = match lookup("HCE_SITE_ORIGIN") {
            Some(raw) => parse_origin("HCE_SITE_ORIGIN", &raw)?,
            None => DEFAULT_SITE_ORIGIN.to_string(),
        };
        Ok(Self {
            site_origin,
            relay_delay: env_millis(&lookup, "HCE_RELAY_DELAY_MS", DEFAULT_RELAY_DELAY)?,
            success_pause: env_millis(&lookup, "HCE_SUCCESS_PAUSE_MS", DEFAULT_SUCCESS_PAUSE)?,
        })
    }

    /// Where the confirmation email sends a newly registered user.
    pub fn email_redirect_to(&self) -> String {
        format!("{}/", self.site_origin)
    }
}

/// Accepts an `http`/`https` origin: scheme, host and optional port, with at
/// most a bare `/` path. Returns its serialized form without trailing slash.
fn parse_origin(var: &str, raw: &str) -> Result<String, ConfigError> {
    let invalid = || ConfigError::InvalidOrigin {
        var: var.to_string(),
        value: raw.to_string(),
    };
    let url = Url::parse(raw.trim()).map_err(|_| invalid())?;
    let is_origin = matches!(url.scheme(), "http" | "https")
        && url.host().is_some()
        && url.username().is_empty()
        && url.password().is_none()
        && url.path() == "/"
        && url.query().is_none()
        && url.fragment().is_none();
    if !is_origin {
        return Err(invalid());
    }
    Ok(url.origin().ascii_serialization())
}

fn env_millis<F>(lookup: &F, var: &str, default: Duration) -> Result<Duration, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(var) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse::<u64>()
            .map(Duration::from_millis)
            .map_err(|_| ConfigError::InvalidDuration {
                var: var.to_string(),
                value: raw,
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |var: &str| map.get(var).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = AdapterConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, AdapterConfig::default());
        assert_eq!(config.success_pause, Duration::from_secs(3));
    }

    #[test]
    fn overrides_are_applied() {
        let config = AdapterConfig::from_lookup(lookup(&[
            ("HCE_SITE_ORIGIN", "https://basehce.com.br/"),
            ("HCE_RELAY_DELAY_MS", "10"),
            ("HCE_SUCCESS_PAUSE_MS", "0"),
        ]))
        .unwrap();
        assert_eq!(config.site_origin, "https://basehce.com.br");
        assert_eq!(config.relay_delay, Duration::from_millis(10));
        assert_eq!(config.success_pause, Duration::ZERO);
        assert_eq!(config.email_redirect_to(), "https://basehce.com.br/");
    }

    #[test]
    fn invalid_duration_is_rejected() {
        let err = AdapterConfig::from_lookup(lookup(&[("HCE_RELAY_DELAY_MS", "soon")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidDuration { ref var, .. } if var == "HCE_RELAY_DELAY_MS"));
    }

    #[test]
    fn invalid_origin_is_rejected() {
        for bad in [
            "basehce.com.br",
            "ftp://x",
            "https://",
            "https://x/app",
            "https://bad host",
            "https://x?y#z",
            "https://x/#top",
            "http://@@@",
            "https://a:b:c:d",
            "https://user:pw@x",
        ] {
            let err = AdapterConfig::from_lookup(lookup(&[("HCE_SITE_ORIGIN", bad)])).unwrap_err();
            assert!(
                matches!(err, ConfigError::InvalidOrigin { ref value, .. } if value == bad),
                "{bad} should be rejected, got {err:?}"
            );
        }
    }

    #[test]
    fn origin_keeps_port_and_normalizes_case() {
        let config =
            AdapterConfig::from_lookup(lookup(&[("HCE_SITE_ORIGIN", " HTTP://LocalHost:5173/ ")])).unwrap();
        assert_eq!(config.site_origin, "http://localhost:5173");
        assert_eq!(config.email_redirect_to(), "http://localhost:5173/");
    }
}
