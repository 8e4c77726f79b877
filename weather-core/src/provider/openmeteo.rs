use anyhow::Context;
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use reqwest::Client;
use serde::{Deserialize, Deserializer, de::DeserializeOwned};
use tracing::debug;

use crate::{
    Config, ProviderError,
    model::{Coordinates, CurrentObservation, DEFAULT_TIMEZONE, DailySummary, Forecast},
};

use super::WeatherProvider;

const GEOCODING: &str = "Open-Meteo geocoding";
const FORECAST: &str = "Open-Meteo forecast";

const CURRENT_FIELDS: &str =
    "temperature_2m,relative_humidity_2m,apparent_temperature,is_day,weather_code,wind_speed_10m";
const DAILY_FIELDS: &str = "weather_code,temperature_2m_max,temperature_2m_min";

#[derive(Debug, Clone)]
pub struct OpenMeteoProvider {
    geocoding_url: String,
    forecast_url: String,
    http: Client,
}

impl OpenMeteoProvider {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(config.timeout())
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            geocoding_url: config.geocoding_url.clone(),
            forecast_url: config.forecast_url.clone(),
            http,
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        service: &'static str,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, ProviderError> {
        debug!(service, url, ?query, "sending request");

        let res = self
            .http
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|source| ProviderError::Request { service, source })?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|source| ProviderError::Request { service, source })?;

        if !status.is_success() {
            return Err(ProviderError::Status {
                service,
                status,
                body: truncate_body(&body),
            });
        }

        serde_json::from_str(&body).map_err(|source| ProviderError::Parse { service, source })
    }
}

#[async_trait]
impl WeatherProvider for OpenMeteoProvider {
    async fn geocode(&self, name: &str) -> Result<Option<Coordinates>, ProviderError> {
        let url = format!("{}/search", self.geocoding_url);

        let parsed: GeoResponse = self
            .get_json(
                GEOCODING,
                &url,
                &[
                    ("name", name.to_string()),
                    ("count", "1".to_string()),
                    ("language", "en".to_string()),
                    ("format", "json".to_string()),
                ],
            )
            .await?;

        let found = parsed.results.into_iter().next().map(|r| Coordinates {
            name: r.name,
            latitude: r.latitude,
            longitude: r.longitude,
            country: r.country,
            timezone: r.timezone,
        });

        debug!(query = name, found = ?found.as_ref().map(|c| &c.name), "geocoding finished");
        Ok(found)
    }

    async fn forecast(&self, latitude: f64, longitude: f64) -> Result<Forecast, ProviderError> {
        let url = format!("{}/forecast", self.forecast_url);

        let parsed: OmForecastResponse = self
            .get_json(
                FORECAST,
                &url,
                &[
                    ("latitude", latitude.to_string()),
                    ("longitude", longitude.to_string()),
                    ("current", CURRENT_FIELDS.to_string()),
                    ("daily", DAILY_FIELDS.to_string()),
                    ("timezone", "auto".to_string()),
                ],
            )
            .await?;

        parsed.into_forecast()
    }
}

#[derive(Debug, Deserialize)]
struct GeoResult {
    name: String,
    latitude: f64,
    longitude: f64,
    country: Option<String>,
    timezone: Option<String>,
}

/// No matches come back as a body without `results`.
#[derive(Debug, Deserialize)]
struct GeoResponse {
    #[serde(default)]
    results: Vec<GeoResult>,
}

#[derive(Debug, Deserialize)]
struct OmCurrent {
    #[serde(deserialize_with = "local_minutes")]
    time: NaiveDateTime,
    temperature_2m: f64,
    relative_humidity_2m: f64,
    apparent_temperature: f64,
    is_day: u8,
    weather_code: i32,
    wind_speed_10m: f64,
}

/// Column-oriented: one array per variable, all indexed by `time`.
/// Open-Meteo sends `null` for values it has no model data for.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OmDaily {
    time: Vec<NaiveDate>,
    weather_code: Vec<Option<i32>>,
    temperature_2m_max: Vec<Option<f64>>,
    temperature_2m_min: Vec<Option<f64>>,
}

impl OmDaily {
    /// Complete days only. Nothing downstream reads the daily summary, so a
    /// malformed block yields no days instead of failing the forecast.
    fn into_summaries(self) -> Vec<DailySummary> {
        let days = self.time.len();
        if self.weather_code.len() != days
            || self.temperature_2m_max.len() != days
            || self.temperature_2m_min.len() != days
        {
            debug!(
                days,
                weather_code = self.weather_code.len(),
                temperature_2m_max = self.temperature_2m_max.len(),
                temperature_2m_min = self.temperature_2m_min.len(),
                "daily arrays have different lengths, dropping daily summary"
            );
            return Vec::new();
        }

        self.time
            .into_iter()
            .zip(self.weather_code)
            .zip(self.temperature_2m_max.into_iter().zip(self.temperature_2m_min))
            .filter_map(|((date, code), (max, min))| {
                let summary = DailySummary {
                    date,
                    weather_code: code?,
                    temperature_2m_max: max?,
                    temperature_2m_min: min?,
                };
                Some(summary)
            })
            .collect()
    }
}

#[derive(Debug, Deserialize)]
struct OmForecastResponse {
    timezone: Option<String>,
    current: OmCurrent,
    #[serde(default)]
    daily: OmDaily,
}

impl OmForecastResponse {
    fn into_forecast(self) -> Result<Forecast, ProviderError> {
        let current = self.current;

        if !current.apparent_temperature.is_finite() {
            return Err(ProviderError::InvalidData {
                service: FORECAST,
                reason: format!("apparent temperature is {}", current.apparent_temperature),
            });
        }

        let daily = self.daily.into_summaries();

        Ok(Forecast {
            timezone: self.timezone.unwrap_or_else(|| DEFAULT_TIMEZONE.to_string()),
            current: CurrentObservation {
                time: current.time,
                temperature_2m: current.temperature_2m,
                apparent_temperature: current.apparent_temperature,
                relative_humidity_2m: current.relative_humidity_2m,
                wind_speed_10m: current.wind_speed_10m,
                weather_code: current.weather_code,
                is_day: current.is_day,
            },
            daily,
        })
    }
}

/// Open-Meteo reports local times as `2024-11-03T14:15`, without seconds.
fn local_minutes<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M").map_err(serde::de::Error::custom)
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        format!("{}...", body.chars().take(MAX).collect::<String>())
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn provider_for(server: &MockServer) -> OpenMeteoProvider {
        let mut cfg = Config::default();
        cfg.set_geocoding_url(server.base_url());
        cfg.set_forecast_url(server.base_url());
        OpenMeteoProvider::new(&cfg).expect("client must build")
    }

    fn forecast_body() -> serde_json::Value {
        json!({
            "latitude": 52.52,
            "longitude": 13.419998,
            "timezone": "Europe/Berlin",
            "current": {
                "time": "2024-11-03T14:15",
                "interval": 900,
                "temperature_2m": 8.4,
                "relative_humidity_2m": 87,
                "apparent_temperature": 5.9,
                "is_day": 1,
                "weather_code": 61,
                "wind_speed_10m": 11.2
            },
            "daily": {
                "time": ["2024-11-03", "2024-11-04"],
                "weather_code": [61, 3],
                "temperature_2m_max": [9.1, 10.4],
                "temperature_2m_min": [4.2, 3.8]
            }
        })
    }

    #[tokio::test]
    async fn geocode_returns_first_match() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/search")
                    .query_param("name", "Berlin")
                    .query_param("count", "1")
                    .query_param("language", "en")
                    .query_param("format", "json");
                then.status(200).json_body(json!({
                    "results": [{
                        "id": 2950159,
                        "name": "Berlin",
                        "latitude": 52.52437,
                        "longitude": 13.41053,
                        "country": "Germany",
                        "timezone": "Europe/Berlin"
                    }],
                    "generationtime_ms": 0.5
                }));
            })
            .await;

        let coords = provider_for(&server)
            .geocode("Berlin")
            .await
            .expect("request should succeed")
            .expect("Berlin should be found");

        mock.assert_async().await;
        assert_eq!(coords.name, "Berlin");
        assert_eq!(coords.latitude, 52.52437);
        assert_eq!(coords.longitude, 13.41053);
        assert_eq!(coords.country(), "Germany");
        assert_eq!(coords.timezone(), "Europe/Berlin");
    }

    #[tokio::test]
    async fn geocode_without_optional_fields() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/search");
                then.status(200).json_body(json!({
                    "results": [{ "name": "Point Nemo", "latitude": -48.87, "longitude": -123.39 }]
                }));
            })
            .await;

        let coords = provider_for(&server)
            .geocode("Point Nemo")
            .await
            .expect("request should succeed")
            .expect("place should be found");

        assert_eq!(coords.country, None);
        assert_eq!(coords.country(), "");
        assert_eq!(coords.timezone(), "UTC");
    }

    #[tokio::test]
    async fn geocode_without_results_is_none() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/search");
                then.status(200).json_body(json!({ "generationtime_ms": 0.3 }));
            })
            .await;

        let found = provider_for(&server).geocode("Atlantis").await.expect("request should succeed");

        assert!(found.is_none());
    }

    #[tokio::test]
    async fn geocode_server_error_is_status_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/search");
                then.status(500).body("internal error");
            })
            .await;

        let err = provider_for(&server).geocode("Berlin").await.unwrap_err();

        match err {
            ProviderError::Status { service, status, body } => {
                assert_eq!(service, GEOCODING);
                assert_eq!(status.as_u16(), 500);
                assert_eq!(body, "internal error");
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn forecast_parses_current_and_daily() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/forecast")
                    .query_param("latitude", "52.52437")
                    .query_param("longitude", "13.41053")
                    .query_param("current", CURRENT_FIELDS)
                    .query_param("daily", DAILY_FIELDS)
                    .query_param("timezone", "auto");
                then.status(200).json_body(forecast_body());
            })
            .await;

        let forecast = provider_for(&server)
            .forecast(52.52437, 13.41053)
            .await
            .expect("forecast should parse");

        mock.assert_async().await;
        assert_eq!(forecast.timezone, "Europe/Berlin");
        assert_eq!(forecast.current.apparent_temperature, 5.9);
        assert_eq!(forecast.current.relative_humidity_2m, 87.0);
        assert_eq!(forecast.current.weather_code, 61);
        assert_eq!(forecast.current.time.format("%Y-%m-%d %H:%M").to_string(), "2024-11-03 14:15");
        assert!(forecast.current.is_daytime());

        assert_eq!(forecast.daily.len(), 2);
        assert_eq!(forecast.daily[1].date, NaiveDate::from_ymd_opt(2024, 11, 4).unwrap());
        assert_eq!(forecast.daily[1].weather_code, 3);
        assert_eq!(forecast.daily[1].temperature_2m_max, 10.4);
        assert_eq!(forecast.daily[1].temperature_2m_min, 3.8);
    }

    #[tokio::test]
    async fn forecast_with_unexpected_shape_is_parse_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/forecast");
                then.status(200).json_body(json!({ "error": false, "current": {} }));
            })
            .await;

        let err = provider_for(&server).forecast(0.0, 0.0).await.unwrap_err();

        assert!(matches!(err, ProviderError::Parse { service: FORECAST, .. }));
    }

    #[tokio::test]
    async fn forecast_bad_request_is_status_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/forecast");
                then.status(400).json_body(json!({
                    "error": true,
                    "reason": "Latitude must be in range of -90 to 90°. Given: 91.0."
                }));
            })
            .await;

        let err = provider_for(&server).forecast(91.0, 0.0).await.unwrap_err();

        assert!(err.to_string().contains("status 400"));
        assert!(err.to_string().contains("Latitude must be in range"));
    }

    #[test]
    fn mismatched_daily_arrays_drop_daily_summary() {
        let mut body = forecast_body();
        body["daily"]["weather_code"] = json!([61]);
        let parsed: OmForecastResponse = serde_json::from_value(body).expect("shape is valid");

        let forecast = parsed.into_forecast().expect("current block is usable");

        assert!(forecast.daily.is_empty());
        assert_eq!(forecast.current.weather_code, 61);
    }

    #[test]
    fn null_daily_values_skip_that_day() {
        let mut body = forecast_body();
        body["daily"]["temperature_2m_max"] = json!([9.1, null]);
        let parsed: OmForecastResponse = serde_json::from_value(body).expect("nulls are accepted");

        let forecast = parsed.into_forecast().expect("current block is usable");

        assert_eq!(forecast.daily.len(), 1);
        assert_eq!(forecast.daily[0].date, NaiveDate::from_ymd_opt(2024, 11, 3).unwrap());
        assert_eq!(forecast.daily[0].temperature_2m_max, 9.1);
    }

    #[test]
    fn missing_daily_block_is_empty_summary() {
        let mut body = forecast_body();
        body.as_object_mut().unwrap().remove("daily");
        let parsed: OmForecastResponse = serde_json::from_value(body).expect("daily is optional");

        assert!(parsed.into_forecast().unwrap().daily.is_empty());
    }

    #[tokio::test]
    async fn lookup_succeeds_when_daily_has_gaps() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/search");
                then.status(200).json_body(json!({
                    "results": [{
                        "name": "Berlin",
                        "latitude": 52.52437,
                        "longitude": 13.41053,
                        "country": "Germany",
                        "timezone": "Europe/Berlin"
                    }]
                }));
            })
            .await;
        let mut body = forecast_body();
        body["daily"]["temperature_2m_max"] = json!([9.1, null]);
        body["daily"]["weather_code"] = json!([null, 3]);
        server
            .mock_async(|when, then| {
                when.method(GET).path("/forecast");
                then.status(200).json_body(body);
            })
            .await;

        let outcome = crate::lookup(&provider_for(&server), "Berlin").await;

        match outcome {
            crate::LookupOutcome::Found(report) => {
                assert_eq!(report.condition, "Raining");
                assert!(report.forecast.daily.is_empty());
            }
            other => panic!("expected a report, got {other:?}"),
        }
    }

    #[test]
    fn missing_timezone_defaults_to_utc() {
        let mut body = forecast_body();
        body.as_object_mut().unwrap().remove("timezone");
        let parsed: OmForecastResponse = serde_json::from_value(body).expect("shape is valid");

        assert_eq!(parsed.into_forecast().unwrap().timezone, "UTC");
    }

    #[test]
    fn truncate_body_limits_length_on_char_boundaries() {
        let long = "°".repeat(300);
        let short = truncate_body(&long);

        assert!(short.ends_with("..."));
        assert_eq!(short.chars().count(), 203);
        assert_eq!(truncate_body("ok"), "ok");
    }
}
