use anyhow::{Context, Result, anyhow};
use std::time::Duration;

pub const DEFAULT_GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com/v1";
pub const DEFAULT_FORECAST_URL: &str = "https://api.open-meteo.com/v1";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

pub const ENV_GEOCODING_URL: &str = "WEATHER_GEOCODING_URL";
pub const ENV_FORECAST_URL: &str = "WEATHER_FORECAST_URL";
pub const ENV_TIMEOUT_SECS: &str = "WEATHER_TIMEOUT_SECS";

/// Runtime settings for the Open-Meteo client.
///
/// Nothing is read from or written to disk; values come from defaults,
/// environment variables and command-line flags, in that order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the geocoding API, without the `/search` path.
    pub geocoding_url: String,

    /// Base URL of the forecast API, without the `/forecast` path.
    pub forecast_url: String,

    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            geocoding_url: DEFAULT_GEOCODING_URL.to_string(),
            forecast_url: DEFAULT_FORECAST_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Config {
    /// Defaults overridden by `WEATHER_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each `WEATHER_*` key.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();

        if let Some(url) = lookup(ENV_GEOCODING_URL) {
            cfg.set_geocoding_url(url);
        }

        if let Some(url) = lookup(ENV_FORECAST_URL) {
            cfg.set_forecast_url(url);
        }

        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            let secs = raw
                .trim()
                .parse::<u64>()
                .with_context(|| format!("Invalid {ENV_TIMEOUT_SECS} value: '{raw}'"))?;
            cfg.set_timeout_secs(secs)?;
        }

        Ok(cfg)
    }

    pub fn set_geocoding_url(&mut self, url: impl Into<String>) {
        self.geocoding_url = trim_base_url(url.into());
    }

    pub fn set_forecast_url(&mut self, url: impl Into<String>) {
        self.forecast_url = trim_base_url(url.into());
    }

    pub fn set_timeout_secs(&mut self, secs: u64) -> Result<()> {
        if secs == 0 {
            return Err(anyhow!("Request timeout must be at least 1 second"));
        }
        self.timeout_secs = secs;
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn trim_base_url(url: String) -> String {
    url.trim().trim_end_matches('/').to_string()
}
