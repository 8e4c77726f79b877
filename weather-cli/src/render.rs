//! Human-friendly console output.

use weather_core::{LookupOutcome, WeatherReport};

pub fn report(report: &WeatherReport) -> String {
    let loc = &report.location;
    let cur = report.current();
    let daylight = if cur.is_daytime() { "day" } else { "night" };

    format!(
        "Found: {name} ({lat}, {lon})\n\
         \n\
         --- Current Weather ---\n\
         Observed:      {time} ({tz})\n\
         Condition:     {condition} ({daylight})\n\
         Temperature:   {temp:.1}°C\n\
         Apparent Temp: {apparent:.1}°C ({band})\n\
         Humidity:      {humidity:.0}%\n\
         Wind Speed:    {wind:.1} km/h\n\
         \n\
         {advice}",
        name = loc.display_name(),
        lat = loc.latitude,
        lon = loc.longitude,
        time = cur.time.format("%Y-%m-%d %H:%M"),
        tz = loc.timezone(),
        condition = report.condition,
        temp = cur.temperature_2m,
        apparent = cur.apparent_temperature,
        band = report.band,
        humidity = cur.relative_humidity_2m,
        wind = cur.wind_speed_10m,
        advice = report.advice,
    )
}

pub fn outcome(outcome: &LookupOutcome) -> String {
    match outcome {
        LookupOutcome::Found(found) => report(found),
        LookupOutcome::NotFound { query } => format!("City not found: {query}"),
        LookupOutcome::Unavailable(err) => format!("Failed to fetch weather data: {err}"),
    }
}
