//! Condition-code classification.
//!
//! OpenWeatherMap identifies each weather phenomenon with an integer code
//! grouped by numeric range (2xx thunderstorm, 3xx drizzle, ...). Display
//! only cares about the group, so everything here reduces a code to one of
//! eight categories and a fixed per-category visual style.

use serde::{Deserialize, Serialize};

/// Display category for a provider condition code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionCategory {
    Thunderstorm,
    Drizzle,
    Rain,
    Snow,
    /// Fog, mist, haze, dust and other obscurations.
    Atmosphere,
    Clear,
    Clouds,
    /// Anything outside the documented ranges, including the unassigned
    /// 4xx block. Display always has a fallback.
    Unknown,
}

impl ConditionCategory {
    pub const ALL: [ConditionCategory; 8] = [
        ConditionCategory::Thunderstorm,
        ConditionCategory::Drizzle,
        ConditionCategory::Rain,
        ConditionCategory::Snow,
        ConditionCategory::Atmosphere,
        ConditionCategory::Clear,
        ConditionCategory::Clouds,
        ConditionCategory::Unknown,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ConditionCategory::Thunderstorm => "thunderstorm",
            ConditionCategory::Drizzle => "drizzle",
            ConditionCategory::Rain => "rain",
            ConditionCategory::Snow => "snow",
            ConditionCategory::Atmosphere => "atmosphere",
            ConditionCategory::Clear => "clear",
            ConditionCategory::Clouds => "clouds",
            ConditionCategory::Unknown => "unknown",
        }
    }

    /// Fixed icon/color pairing for this category.
    pub fn style(self) -> &'static ConditionStyle {
        &STYLES[self as usize]
    }
}

impl std::fmt::Display for ConditionCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map a provider condition code to its display category.
///
/// Total over all of `i64`: codes outside every documented range resolve to
/// [`ConditionCategory::Unknown`] rather than failing.
pub fn classify(code: i64) -> ConditionCategory {
    match code {
        200..=299 => ConditionCategory::Thunderstorm,
        300..=399 => ConditionCategory::Drizzle,
        500..=599 => ConditionCategory::Rain,
        600..=699 => ConditionCategory::Snow,
        700..=799 => ConditionCategory::Atmosphere,
        800 => ConditionCategory::Clear,
        801.. => ConditionCategory::Clouds,
        _ => ConditionCategory::Unknown,
    }
}

/// Purely presentational icon identifier and color token for a category.
#[derive(Debug, PartialEq, Eq)]
pub struct ConditionStyle {
    pub icon: &'static str,
    pub color: &'static str,
}

// Indexed by `ConditionCategory` discriminant, same order as `ALL`.
const STYLES: [ConditionStyle; 8] = [
    ConditionStyle { icon: "zap", color: "yellow-500" },
    ConditionStyle { icon: "cloud-drizzle", color: "blue-300" },
    ConditionStyle { icon: "cloud-rain", color: "blue-400" },
    ConditionStyle { icon: "cloud-snow", color: "blue-200" },
    ConditionStyle { icon: "cloud-fog", color: "gray-400" },
    ConditionStyle { icon: "sun", color: "yellow-400" },
    ConditionStyle { icon: "cloud", color: "gray-400" },
    ConditionStyle { icon: "cloud", color: "gray-400" },
];
