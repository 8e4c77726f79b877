use chrono::{NaiveDate, NaiveDateTime};

use crate::advisory::{TemperatureBand, describe_temperature, suggest_clothing};
use crate::condition::classify_condition;

/// Timezone reported when the geocoder does not return one.
pub const DEFAULT_TIMEZONE: &str = "UTC";

/// First geocoding match for a place name.
#[derive(Debug, Clone, PartialEq)]
pub struct Coordinates {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Absent for some places (oceans, disputed areas).
    pub country: Option<String>,
    pub timezone: Option<String>,
}

impl Coordinates {
    /// Country name, or an empty string when the geocoder had none.
    pub fn country(&self) -> &str {
        self.country.as_deref().unwrap_or("")
    }

    /// IANA timezone, or [`DEFAULT_TIMEZONE`].
    pub fn timezone(&self) -> &str {
        self.timezone.as_deref().unwrap_or(DEFAULT_TIMEZONE)
    }

    /// "Name, Country", or just the name when the country is unknown.
    pub fn display_name(&self) -> String {
        match self.country() {
            "" => self.name.clone(),
            country => format!("{}, {}", self.name, country),
        }
    }
}

/// Snapshot of the `current` block of a forecast response.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentObservation {
    /// Local time at the location.
    pub time: NaiveDateTime,
    pub temperature_2m: f64,
    pub apparent_temperature: f64,
    pub relative_humidity_2m: f64,
    /// km/h
    pub wind_speed_10m: f64,
    pub weather_code: i32,
    pub is_day: u8,
}

impl CurrentObservation {
    pub fn is_daytime(&self) -> bool {
        self.is_day == 1
    }
}

/// One day of the daily forecast.
#[derive(Debug, Clone, PartialEq)]
pub struct DailySummary {
    pub date: NaiveDate,
    pub weather_code: i32,
    pub temperature_2m_max: f64,
    pub temperature_2m_min: f64,
}

/// Parsed forecast response.
///
/// `daily` is fetched alongside the current conditions and exposed for
/// callers, but the report and the advice only look at `current`.
#[derive(Debug, Clone, PartialEq)]
pub struct Forecast {
    pub timezone: String,
    pub current: CurrentObservation,
    pub daily: Vec<DailySummary>,
}

/// Everything printed for one successful lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReport {
    pub location: Coordinates,
    pub forecast: Forecast,
    pub condition: &'static str,
    pub band: TemperatureBand,
    pub advice: String,
}

impl WeatherReport {
    /// Classify a forecast. Advice is keyed on the apparent temperature.
    pub fn new(location: Coordinates, forecast: Forecast) -> Self {
        let current = &forecast.current;
        let condition = classify_condition(current.weather_code);
        let band = describe_temperature(current.apparent_temperature);
        let advice = suggest_clothing(current.apparent_temperature, Some(current.weather_code));

        Self {
            location,
            forecast,
            condition,
            band,
            advice,
        }
    }

    pub fn current(&self) -> &CurrentObservation {
        &self.forecast.current
    }
}
