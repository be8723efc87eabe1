//! Presentation-ready data derived from a snapshot.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::condition::{ConditionCategory, classify};
use crate::model::WeatherSnapshot;

/// Quick-access city shortcuts. Static, never derived from a snapshot.
pub const QUICK_CITIES: [&str; 6] = ["London", "New York", "Tokyo", "Paris", "Dubai", "Sydney"];

/// Everything the display layer needs, precomputed.
///
/// Deterministic function of the snapshot it was built from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayModel {
    /// "City, CC".
    pub place: String,
    /// Whole degrees, rounded independently of each other.
    pub temperature: i32,
    pub feels_like: i32,
    pub temp_min: i32,
    pub temp_max: i32,
    pub description: String,
    pub category: ConditionCategory,
    pub icon: &'static str,
    pub color: &'static str,
    pub wind: String,
    pub humidity: String,
    pub visibility: String,
    pub pressure: String,
    pub observed_at: Option<DateTime<Utc>>,
}

/// Derive the display model from a snapshot.
pub fn to_view_model(snapshot: &WeatherSnapshot) -> DisplayModel {
    let condition = snapshot.primary_condition();
    let category =
        condition.map(|c| classify(c.code)).unwrap_or(ConditionCategory::Unknown);
    let description = condition
        .map(|c| c.description.clone())
        .unwrap_or_else(|| "unknown".to_string());
    let style = category.style();

    DisplayModel {
        place: format!("{}, {}", snapshot.city, snapshot.country),
        temperature: round_degrees(snapshot.temperature),
        feels_like: round_degrees(snapshot.feels_like),
        temp_min: round_degrees(snapshot.temp_min),
        temp_max: round_degrees(snapshot.temp_max),
        description,
        category,
        icon: style.icon,
        color: style.color,
        wind: format!("{} m/s", snapshot.wind_speed),
        humidity: format!("{}%", snapshot.humidity),
        visibility: format!("{:.1} km", f64::from(snapshot.visibility) / 1000.0),
        pressure: format!("{} hPa", snapshot.pressure),
        observed_at: snapshot.observed_at,
    }
}

fn round_degrees(value: f64) -> i32 {
    value.round() as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ConditionEntry;

    fn snapshot() -> WeatherSnapshot {
        WeatherSnapshot {
            city: "Accra".to_string(),
            country: "GH".to_string(),
            temperature: 28.4,
            feels_like: 30.5,
            temp_min: 27.4,
            temp_max: 29.5,
            humidity: 74,
            pressure: 1012,
            wind_speed: 3.6,
            visibility: 8046,
            conditions: vec![ConditionEntry {
                code: 500,
                label: "Rain".to_string(),
                description: "light rain".to_string(),
            }],
            observed_at: None,
        }
    }

    #[test]
    fn temperatures_round_to_nearest_whole_degree() {
        let model = to_view_model(&snapshot());
        assert_eq!(model.temperature, 28);
        assert_eq!(model.feels_like, 31);
    }

    #[test]
    fn temperatures_round_independently() {
        // 27.4 and 29.5 sit on opposite sides of the rounding boundary.
        let model = to_view_model(&snapshot());
        assert_eq!(model.temp_min, 27);
        assert_eq!(model.temp_max, 30);
    }

    #[test]
    fn visibility_renders_in_kilometers_with_one_decimal() {
        let model = to_view_model(&snapshot());
        assert_eq!(model.visibility, "8.0 km");

        let mut hazy = snapshot();
        hazy.visibility = 3250;
        assert_eq!(to_view_model(&hazy).visibility, "3.2 km");
    }

    #[test]
    fn metrics_are_formatted_with_units() {
        let model = to_view_model(&snapshot());
        assert_eq!(model.wind, "3.6 m/s");
        assert_eq!(model.humidity, "74%");
        assert_eq!(model.pressure, "1012 hPa");
    }

    #[test]
    fn category_and_style_come_from_the_first_condition() {
        let model = to_view_model(&snapshot());
        assert_eq!(model.category, ConditionCategory::Rain);
        assert_eq!(model.icon, "cloud-rain");
        assert_eq!(model.color, "blue-400");
        assert_eq!(model.description, "light rain");
    }

    #[test]
    fn derivation_is_deterministic() {
        let snap = snapshot();
        assert_eq!(to_view_model(&snap), to_view_model(&snap));
    }

    #[test]
    fn place_joins_city_and_country() {
        assert_eq!(to_view_model(&snapshot()).place, "Accra, GH");
    }

    #[test]
    fn quick_cities_are_fixed() {
        assert_eq!(QUICK_CITIES.len(), 6);
        assert!(QUICK_CITIES.contains(&"London"));
    }
}
