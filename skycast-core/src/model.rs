use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Where to look the weather up. Exactly one form per request.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationQuery {
    /// Free-text place name, e.g. "Accra" or "New York".
    Name(String),
    /// Decimal degrees.
    Coordinates { lat: f64, lon: f64 },
}

impl LocationQuery {
    pub fn name(name: impl Into<String>) -> Self {
        LocationQuery::Name(name.into())
    }
}

/// A position reported by a [`crate::locate::Locator`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// Unit preference sent to the provider with every request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[default]
    Metric,
    Imperial,
}

impl Units {
    /// Value of the provider's `units` query parameter.
    pub fn as_str(self) -> &'static str {
        match self {
            Units::Metric => "metric",
            Units::Imperial => "imperial",
        }
    }
}

/// One condition reported by the provider.
///
/// `code` is the provider-defined integer identifying the phenomenon,
/// `label` its short group name (e.g. "Rain"), `description` the long form
/// (e.g. "light intensity shower rain").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionEntry {
    pub code: i64,
    pub label: String,
    pub description: String,
}

/// One fetched and parsed weather observation for a single place and instant.
///
/// Built only from a successful, schema-valid provider response; `conditions`
/// carries at least one entry. A fresh snapshot fully replaces the previous
/// one, there is no merging.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub city: String,
    pub country: String,
    pub temperature: f64,
    pub feels_like: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    /// Relative humidity, percent.
    pub humidity: u8,
    /// Atmospheric pressure, hPa.
    pub pressure: u32,
    /// Wind speed in the unit system the snapshot was requested with.
    pub wind_speed: f64,
    /// Visibility distance, meters.
    pub visibility: u32,
    pub conditions: Vec<ConditionEntry>,
    /// Provider observation time, when it reported one.
    pub observed_at: Option<DateTime<Utc>>,
}

impl WeatherSnapshot {
    /// The condition used for display. Snapshots always carry at least one.
    pub fn primary_condition(&self) -> Option<&ConditionEntry> {
        self.conditions.first()
    }
}
