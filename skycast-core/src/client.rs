//! OpenWeatherMap client.
//!
//! One outbound request per invocation, no retries and no caching; callers
//! decide what to do with a failed request. The endpoint is injectable so
//! tests can point the client at a local mock server.

use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::model::{ConditionEntry, LocationQuery, Units, WeatherSnapshot};

/// Current-weather endpoint of the free OpenWeatherMap API.
pub const OPENWEATHER_ENDPOINT: &str = "https://api.openweathermap.org/data/2.5/weather";

const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Everything that can go wrong with a single fetch.
///
/// `Display` strings double as the user-visible message for that request;
/// nothing here is retried automatically.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error(
        "No API key configured. Get one free at openweathermap.org/api, \
         then run `skycast configure` or set OPENWEATHER_API_KEY."
    )]
    MissingCredential,

    #[error("City not found")]
    NotFound,

    #[error("Weather provider returned status {0}")]
    Provider(StatusCode),

    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    #[error("Malformed provider response: {0}")]
    Schema(String),

    #[error("Invalid location query: {0}")]
    InvalidQuery(String),
}

#[derive(Debug, Clone)]
pub struct WeatherClient {
    http: Client,
    endpoint: String,
    api_key: Option<String>,
    units: Units,
}

impl WeatherClient {
    /// Build a client. A missing key is not an error here: it is reported as
    /// [`FetchError::MissingCredential`] on the first fetch, before any
    /// network activity.
    pub fn new(api_key: Option<String>) -> Result<Self, FetchError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(FetchError::Network)?;

        Ok(Self {
            http,
            endpoint: OPENWEATHER_ENDPOINT.to_string(),
            api_key,
            units: Units::default(),
        })
    }

    /// Build a client from resolved configuration (env override included).
    pub fn from_config(config: &Config) -> Result<Self, FetchError> {
        Ok(Self::new(config.resolved_api_key())?.with_units(config.units.unwrap_or_default()))
    }

    /// Point the client at a different endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_units(mut self, units: Units) -> Self {
        self.units = units;
        self
    }

    /// Dispatch on the query form.
    pub async fn fetch(&self, query: &LocationQuery) -> Result<WeatherSnapshot, FetchError> {
        match query {
            LocationQuery::Name(name) => self.fetch_by_name(name).await,
            LocationQuery::Coordinates { lat, lon } => self.fetch_by_coordinates(*lat, *lon).await,
        }
    }

    /// Current weather for a free-text place name.
    pub async fn fetch_by_name(&self, name: &str) -> Result<WeatherSnapshot, FetchError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(FetchError::InvalidQuery("city name is empty".to_string()));
        }

        let key = self.credential()?;
        info!(city = name, "fetching current weather");

        let response = self
            .http
            .get(&self.endpoint)
            .query(&[("q", name), ("appid", key), ("units", self.units.as_str())])
            .send()
            .await
            .map_err(FetchError::Network)?;

        self.read_snapshot(response, true).await
    }

    /// Current weather for a coordinate pair in decimal degrees.
    pub async fn fetch_by_coordinates(
        &self,
        lat: f64,
        lon: f64,
    ) -> Result<WeatherSnapshot, FetchError> {
        if !(-90.0..=90.0).contains(&lat) {
            return Err(FetchError::InvalidQuery(format!("latitude {lat} out of range")));
        }
        if !(-180.0..=180.0).contains(&lon) {
            return Err(FetchError::InvalidQuery(format!("longitude {lon} out of range")));
        }

        let key = self.credential()?;
        info!(lat, lon, "fetching current weather");

        let response = self
            .http
            .get(&self.endpoint)
            .query(&[
                ("lat", lat.to_string()),
                ("lon", lon.to_string()),
                ("appid", key.to_string()),
                ("units", self.units.as_str().to_string()),
            ])
            .send()
            .await
            .map_err(FetchError::Network)?;

        self.read_snapshot(response, false).await
    }

    fn credential(&self) -> Result<&str, FetchError> {
        self.api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or(FetchError::MissingCredential)
    }

    async fn read_snapshot(
        &self,
        response: reqwest::Response,
        name_lookup: bool,
    ) -> Result<WeatherSnapshot, FetchError> {
        let status = response.status();

        if status == StatusCode::NOT_FOUND && name_lookup {
            return Err(FetchError::NotFound);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%status, body = %truncate_body(&body), "provider request failed");
            return Err(FetchError::Provider(status));
        }

        let body = response.text().await.map_err(FetchError::Network)?;
        let parsed: OwmResponse =
            serde_json::from_str(&body).map_err(|e| FetchError::Schema(e.to_string()))?;

        debug!(city = %parsed.name, "provider response parsed");
        parsed.into_snapshot()
    }
}

#[derive(Debug, Deserialize)]
struct OwmMain {
    temp: f64,
    feels_like: f64,
    temp_min: f64,
    temp_max: f64,
    humidity: u8,
    pressure: u32,
}

#[derive(Debug, Deserialize)]
struct OwmWeather {
    id: i64,
    main: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwmWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwmSys {
    country: String,
}

#[derive(Debug, Deserialize)]
struct OwmResponse {
    name: String,
    sys: OwmSys,
    main: OwmMain,
    weather: Vec<OwmWeather>,
    wind: OwmWind,
    visibility: u32,
    dt: Option<i64>,
}

impl OwmResponse {
    fn into_snapshot(self) -> Result<WeatherSnapshot, FetchError> {
        if self.weather.is_empty() {
            return Err(FetchError::Schema("empty weather conditions array".to_string()));
        }

        let conditions = self
            .weather
            .into_iter()
            .map(|w| ConditionEntry { code: w.id, label: w.main, description: w.description })
            .collect();

        Ok(WeatherSnapshot {
            city: self.name,
            country: self.sys.country,
            temperature: self.main.temp,
            feels_like: self.main.feels_like,
            temp_min: self.main.temp_min,
            temp_max: self.main.temp_max,
            humidity: self.main.humidity,
            pressure: self.main.pressure,
            wind_speed: self.wind.speed,
            visibility: self.visibility,
            conditions,
            observed_at: self.dt.and_then(unix_to_utc),
        })
    }
}

fn unix_to_utc(ts: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(ts, 0)
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX { format!("{}...", &body[..MAX]) } else { body.to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> OwmResponse {
        serde_json::from_value(serde_json::json!({
            "name": "Accra",
            "sys": { "country": "GH" },
            "main": {
                "temp": 28.4,
                "feels_like": 30.1,
                "temp_min": 27.0,
                "temp_max": 29.8,
                "humidity": 74,
                "pressure": 1012
            },
            "weather": [
                { "id": 802, "main": "Clouds", "description": "scattered clouds" }
            ],
            "wind": { "speed": 3.6 },
            "visibility": 10000,
            "dt": 1_700_000_000
        }))
        .expect("payload must deserialize")
    }

    #[test]
    fn snapshot_preserves_numeric_fields_exactly() {
        let snapshot = payload().into_snapshot().expect("valid payload");
        assert_eq!(snapshot.city, "Accra");
        assert_eq!(snapshot.country, "GH");
        assert_eq!(snapshot.temperature, 28.4);
        assert_eq!(snapshot.feels_like, 30.1);
        assert_eq!(snapshot.temp_min, 27.0);
        assert_eq!(snapshot.temp_max, 29.8);
        assert_eq!(snapshot.humidity, 74);
        assert_eq!(snapshot.pressure, 1012);
        assert_eq!(snapshot.wind_speed, 3.6);
        assert_eq!(snapshot.visibility, 10_000);
        assert_eq!(snapshot.conditions.len(), 1);
        assert_eq!(snapshot.primary_condition().map(|c| c.code), Some(802));
        assert!(snapshot.observed_at.is_some());
    }

    #[test]
    fn empty_conditions_is_a_schema_error() {
        let mut raw = payload();
        raw.weather.clear();
        let err = raw.into_snapshot().unwrap_err();
        assert!(matches!(err, FetchError::Schema(_)));
    }

    #[test]
    fn missing_observation_time_is_tolerated() {
        let mut raw = payload();
        raw.dt = None;
        let snapshot = raw.into_snapshot().expect("valid payload");
        assert!(snapshot.observed_at.is_none());
    }

    #[test]
    fn not_found_message_is_user_facing() {
        assert_eq!(FetchError::NotFound.to_string(), "City not found");
    }
}
