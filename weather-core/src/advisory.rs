//! Temperature bands and clothing advice.

use crate::condition::{Precipitation, precipitation};

/// Appended to the advice when the weather code means rain.
pub const RAIN_ADVICE: &str = "Don't forget an umbrella or raincoat!";

/// Appended to the advice when the weather code means snow.
pub const SNOW_ADVICE: &str = "Wear waterproof boots.";

/// Descriptive temperature category.
///
/// The bands partition the real line at 0, 10, 20 and 30 °C; each band
/// includes its lower bound and excludes its upper one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TemperatureBand {
    /// Below 0 °C.
    FreezingCold,
    /// 0 °C up to 10 °C.
    Cold,
    /// 10 °C up to 20 °C.
    Cool,
    /// 20 °C up to 30 °C.
    Warm,
    /// 30 °C and above.
    Hot,
}

impl TemperatureBand {
    pub fn as_str(&self) -> &'static str {
        match self {
            TemperatureBand::FreezingCold => "Freezing Cold",
            TemperatureBand::Cold => "Cold",
            TemperatureBand::Cool => "Cool",
            TemperatureBand::Warm => "Warm",
            TemperatureBand::Hot => "Hot",
        }
    }

    pub const fn all() -> &'static [TemperatureBand] {
        &[
            TemperatureBand::FreezingCold,
            TemperatureBand::Cold,
            TemperatureBand::Cool,
            TemperatureBand::Warm,
            TemperatureBand::Hot,
        ]
    }

    /// Base clothing sentence for this band, without any precipitation advice.
    pub fn clothing(&self) -> &'static str {
        match self {
            TemperatureBand::FreezingCold => {
                "It's freezing! Wear a heavy coat, scarf, gloves, and hat."
            }
            TemperatureBand::Cold => "It's cold. Wear a warm jacket and layers.",
            TemperatureBand::Cool => "It's a bit cool. A light jacket or sweater should do.",
            TemperatureBand::Warm => "It's warm. A T-shirt and light trousers or shorts are fine.",
            TemperatureBand::Hot => "It's hot! Wear light, breathable clothing and stay hydrated.",
        }
    }
}

impl std::fmt::Display for TemperatureBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Band lookup shared by [`describe_temperature`] and [`suggest_clothing`].
///
/// `temp` must not be NaN; a NaN falls through to [`TemperatureBand::Hot`].
pub fn temperature_band(temp: f64) -> TemperatureBand {
    if temp < 0.0 {
        TemperatureBand::FreezingCold
    } else if temp < 10.0 {
        TemperatureBand::Cold
    } else if temp < 20.0 {
        TemperatureBand::Cool
    } else if temp < 30.0 {
        TemperatureBand::Warm
    } else {
        TemperatureBand::Hot
    }
}

/// Describe a temperature in °C.
pub fn describe_temperature(temp: f64) -> TemperatureBand {
    temperature_band(temp)
}

/// Clothing suggestion for a temperature in °C, with rain or snow advice
/// appended when `code` is a precipitation code.
pub fn suggest_clothing(temp: f64, code: Option<i32>) -> String {
    let mut advice = temperature_band(temp).clothing().to_string();

    let extra = match code.and_then(precipitation) {
        Some(Precipitation::Rain) => Some(RAIN_ADVICE),
        Some(Precipitation::Snow) => Some(SNOW_ADVICE),
        None => None,
    };

    if let Some(extra) = extra {
        advice.push(' ');
        advice.push_str(extra);
    }

    advice
}
