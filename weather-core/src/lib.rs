//! Core library for the `weather` CLI.
//!
//! This crate defines:
//! - WMO weather code classification
//! - Temperature bands and clothing advice
//! - An Open-Meteo client behind the `WeatherProvider` trait
//! - The geocode-then-forecast lookup and its outcome type
//!
//! It is used by `weather-cli`, but can also be reused by other binaries or services.

pub mod advisory;
pub mod condition;
pub mod config;
pub mod error;
pub mod lookup;
pub mod model;
pub mod provider;

pub use advisory::{TemperatureBand, describe_temperature, suggest_clothing, temperature_band};
pub use condition::{Precipitation, classify_condition};
pub use config::Config;
pub use error::ProviderError;
pub use lookup::{LookupOutcome, lookup};
pub use model::{Coordinates, CurrentObservation, DailySummary, Forecast, WeatherReport};
pub use provider::{WeatherProvider, provider_from_config};
