//! Runtime configuration for the dashboard pipeline.

use crate::error::DashboardError;
use bon::Builder;
use std::env;
use std::time::Duration;

pub const DEFAULT_GEOCODING_URL: &str = "https://api.openrouteservice.org/geocode/search";
pub const DEFAULT_FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_PAST_DAYS: u32 = 1;
pub const DEFAULT_FORECAST_DAYS: u32 = 14;

pub const API_KEY_VAR: &str = "ORS_API_KEY";
pub const GEOCODING_URL_VAR: &str = "METEODASH_GEOCODING_URL";
pub const FORECAST_URL_VAR: &str = "METEODASH_FORECAST_URL";
pub const TIMEOUT_VAR: &str = "METEODASH_TIMEOUT_SECS";

/// Settings shared by the geocoder and the forecast fetcher.
///
/// Build one explicitly with [`DashboardConfig::builder`], or read it from the
/// process environment with [`DashboardConfig::from_env`].
///
/// # Examples
///
/// ```
/// use meteodash::DashboardConfig;
/// use std::time::Duration;
///
/// let config = DashboardConfig::builder()
///     .api_key("my-key")
///     .timeout(Duration::from_secs(5))
///     .build();
///
/// assert_eq!(config.api_key, "my-key");
/// assert_eq!(config.forecast_days, 14);
/// ```
#[derive(Debug, Clone, Builder)]
pub struct DashboardConfig {
    /// Key for the geocoding service, sent as the `api_key` query parameter.
    #[builder(into)]
    pub api_key: String,

    #[builder(into, default = DEFAULT_GEOCODING_URL.to_string())]
    pub geocoding_url: String,

    #[builder(into, default = DEFAULT_FORECAST_URL.to_string())]
    pub forecast_url: String,

    /// Applied to every request made to either service.
    #[builder(default = DEFAULT_TIMEOUT)]
    pub timeout: Duration,

    /// How many days before today the forecast window starts.
    #[builder(default = DEFAULT_PAST_DAYS)]
    pub past_days: u32,

    /// How many days after today the forecast window ends.
    #[builder(default = DEFAULT_FORECAST_DAYS)]
    pub forecast_days: u32,
}

impl DashboardConfig {
    /// Reads the configuration from environment variables.
    ///
    /// * `ORS_API_KEY` (required): the geocoding API key.
    /// * `METEODASH_GEOCODING_URL`, `METEODASH_FORECAST_URL` (optional): endpoint overrides.
    /// * `METEODASH_TIMEOUT_SECS` (optional): request timeout in whole seconds.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::MissingApiKey`] if the key is unset or blank, and
    /// [`DashboardError::InvalidConfig`] if the timeout is not a positive integer.
    pub fn from_env() -> Result<Self, DashboardError> {
        let api_key = env::var(API_KEY_VAR)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or(DashboardError::MissingApiKey(API_KEY_VAR))?;

        let timeout = match env::var(TIMEOUT_VAR) {
            Ok(raw) => parse_timeout(&raw)?,
            Err(_) => DEFAULT_TIMEOUT,
        };

        Ok(Self::builder()
            .api_key(api_key)
            .maybe_geocoding_url(env::var(GEOCODING_URL_VAR).ok())
            .maybe_forecast_url(env::var(FORECAST_URL_VAR).ok())
            .timeout(timeout)
            .build())
    }
}

fn parse_timeout(raw: &str) -> Result<Duration, DashboardError> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(DashboardError::InvalidConfig {
            key: TIMEOUT_VAR,
            value: raw.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let config = DashboardConfig::builder().api_key("key").build();
        assert_eq!(config.geocoding_url, DEFAULT_GEOCODING_URL);
        assert_eq!(config.forecast_url, DEFAULT_FORECAST_URL);
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.past_days, 1);
        assert_eq!(config.forecast_days, 14);
    }

    // Single test so the environment is never mutated concurrently.
    #[test]
    fn test_from_env() {
        env::remove_var(API_KEY_VAR);
        env::remove_var(GEOCODING_URL_VAR);
        env::remove_var(FORECAST_URL_VAR);
        env::remove_var(TIMEOUT_VAR);
        assert!(matches!(
            DashboardConfig::from_env(),
            Err(DashboardError::MissingApiKey(API_KEY_VAR))
        ));

        env::set_var(API_KEY_VAR, "   ");
        assert!(matches!(
            DashboardConfig::from_env(),
            Err(DashboardError::MissingApiKey(API_KEY_VAR))
        ));

        env::set_var(API_KEY_VAR, "env-key");
        let config = DashboardConfig::from_env().unwrap();
        assert_eq!(config.api_key, "env-key");
        assert_eq!(config.geocoding_url, DEFAULT_GEOCODING_URL);
        assert_eq!(config.forecast_url, DEFAULT_FORECAST_URL);
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);

        env::set_var(GEOCODING_URL_VAR, "http://localhost:1/geocode");
        env::set_var(FORECAST_URL_VAR, "http://localhost:2/forecast");
        env::set_var(TIMEOUT_VAR, "3");
        let config = DashboardConfig::from_env().unwrap();
        assert_eq!(config.geocoding_url, "http://localhost:1/geocode");
        assert_eq!(config.forecast_url, "http://localhost:2/forecast");
        assert_eq!(config.timeout, Duration::from_secs(3));

        env::set_var(TIMEOUT_VAR, "never");
        assert!(matches!(
            DashboardConfig::from_env(),
            Err(DashboardError::InvalidConfig { key: TIMEOUT_VAR, .. })
        ));

        for var in [API_KEY_VAR, GEOCODING_URL_VAR, FORECAST_URL_VAR, TIMEOUT_VAR] {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_parse_timeout() {
        assert_eq!(parse_timeout(" 30 ").ok(), Some(Duration::from_secs(30)));
        assert!(matches!(
            parse_timeout("0"),
            Err(DashboardError::InvalidConfig { key: TIMEOUT_VAR, .. })
        ));
        assert!(parse_timeout("soon").is_err());
    }
}
