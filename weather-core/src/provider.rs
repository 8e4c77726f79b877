use crate::{Config, Coordinates, Forecast, ProviderError, provider::openmeteo::OpenMeteoProvider};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openmeteo;

/// The two external services a lookup needs: a geocoder and a forecast API.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Resolve a free-text place name to its best match.
    ///
    /// `Ok(None)` means the service answered but knows no such place.
    async fn geocode(&self, name: &str) -> Result<Option<Coordinates>, ProviderError>;

    /// Current conditions and the daily summary at a position.
    async fn forecast(&self, latitude: f64, longitude: f64) -> Result<Forecast, ProviderError>;
}

/// Construct the Open-Meteo provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let provider = OpenMeteoProvider::new(config)?;
    Ok(Box::new(provider))
}
