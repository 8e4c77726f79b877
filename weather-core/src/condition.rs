//! WMO weather code classification.
//!
//! Open-Meteo reports the current condition as a WMO code (0 = clear sky,
//! 61 = slight rain, ...). This module turns it into a short English label
//! and tells the advisory engine whether the code means rain or snow.

/// Label returned for codes missing from the table.
pub const UNKNOWN_CONDITION: &str = "Unknown Condition";

/// Every code the classifier knows about, in table order.
pub const KNOWN_CODES: &[i32] = &[
    0, 1, 2, 3, 45, 48, 51, 53, 55, 56, 57, 61, 63, 65, 66, 67, 71, 73, 75, 77, 80, 81, 82, 85,
    86, 95, 96, 99,
];

/// Map a WMO weather code to a human-readable condition label.
///
/// Total over `i32`: codes outside the table yield [`UNKNOWN_CONDITION`].
pub fn classify_condition(code: i32) -> &'static str {
    match code {
        0 => "Clear Sky",
        1..=3 => "Partly Cloudy",
        45 | 48 => "Foggy",
        51 | 53 | 55 => "Drizzling",
        56 | 57 => "Freezing Drizzle",
        61 | 63 | 65 => "Raining",
        66 | 67 => "Freezing Rain",
        71 | 73 | 75 => "Snowing",
        77 => "Snow Grains",
        80..=82 => "Rain Showers",
        85 | 86 => "Snow Showers",
        95 => "Thunderstorm",
        96 | 99 => "Thunderstorm with Hail",
        _ => UNKNOWN_CONDITION,
    }
}

/// Kind of precipitation a weather code implies, as far as clothing goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Precipitation {
    /// Drizzle, rain, showers and thunderstorms.
    Rain,
    /// Snowfall, snow grains and snow showers.
    Snow,
}

/// Precipitation group for `code`, or `None` for dry and unknown codes.
pub fn precipitation(code: i32) -> Option<Precipitation> {
    match code {
        51 | 53 | 55 | 56 | 57 | 61 | 63 | 65 | 66 | 67 | 80..=82 | 95 | 96 | 99 => {
            Some(Precipitation::Rain)
        }
        71 | 73 | 75 | 77 | 85 | 86 => Some(Precipitation::Snow),
        _ => None,
    }
}
