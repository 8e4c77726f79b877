//! One city lookup: geocode, fetch the forecast, classify.

use tracing::{debug, warn};

use crate::{ProviderError, WeatherProvider, WeatherReport};

/// Result of looking up the weather for a place name.
#[derive(Debug)]
pub enum LookupOutcome {
    Found(Box<WeatherReport>),
    /// The geocoder answered but had no match.
    NotFound { query: String },
    /// Either service failed or sent something unusable.
    Unavailable(ProviderError),
}

impl LookupOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, LookupOutcome::Found(_))
    }
}

/// Look up the current weather for `city`.
///
/// The forecast is only requested once the geocoder has found a match. No
/// failure is retried.
pub async fn lookup(provider: &dyn WeatherProvider, city: &str) -> LookupOutcome {
    let location = match provider.geocode(city).await {
        Ok(Some(location)) => location,
        Ok(None) => {
            debug!(city, "no geocoding match");
            return LookupOutcome::NotFound {
                query: city.to_string(),
            };
        }
        Err(err) => {
            warn!(city, error = %err, "geocoding failed");
            return LookupOutcome::Unavailable(err);
        }
    };

    debug!(
        city,
        name = %location.name,
        latitude = location.latitude,
        longitude = location.longitude,
        "resolved location"
    );

    match provider.forecast(location.latitude, location.longitude).await {
        Ok(forecast) => LookupOutcome::Found(Box::new(WeatherReport::new(location, forecast))),
        Err(err) => {
            warn!(city, error = %err, "forecast failed");
            LookupOutcome::Unavailable(err)
        }
    }
}
