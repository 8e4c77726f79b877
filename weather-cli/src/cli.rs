use anyhow::{Context, anyhow};
use clap::Parser;
use inquire::{InquireError, Text};
use std::io::{BufRead, IsTerminal};
use weather_core::{Config, LookupOutcome, WeatherProvider, lookup, provider_from_config};

use crate::render;

/// City used when the prompt is answered with an empty line.
pub const DEFAULT_CITY: &str = "London";

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(
    name = "weather",
    version,
    about = "Current weather and clothing advice for a city"
)]
pub struct Cli {
    /// City to look up once. Without it, prompts for cities until `q` is entered;
    /// when stdin is not a terminal, reads one city per line until `q` or end of input.
    pub city: Option<String>,

    /// Log requests and responses to stderr.
    #[arg(short, long)]
    pub verbose: bool,

    /// Per-request timeout in seconds (env: WEATHER_TIMEOUT_SECS).
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Geocoding API base URL (env: WEATHER_GEOCODING_URL).
    #[arg(long, value_name = "URL")]
    pub geocoding_url: Option<String>,

    /// Forecast API base URL (env: WEATHER_FORECAST_URL).
    #[arg(long, value_name = "URL")]
    pub forecast_url: Option<String>,
}

/// What the user typed at the prompt.
#[derive(Debug, PartialEq, Eq)]
pub enum Input {
    Quit,
    City(String),
}

impl Input {
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.eq_ignore_ascii_case("q") {
            Input::Quit
        } else if trimmed.is_empty() {
            Input::City(DEFAULT_CITY.to_string())
        } else {
            Input::City(trimmed.to_string())
        }
    }
}

impl Cli {
    /// Environment config with command-line flags applied on top.
    pub fn config(&self) -> anyhow::Result<Config> {
        let mut cfg = Config::from_env()?;
        self.apply_overrides(&mut cfg)?;
        Ok(cfg)
    }

    fn apply_overrides(&self, cfg: &mut Config) -> anyhow::Result<()> {
        if let Some(url) = &self.geocoding_url {
            cfg.set_geocoding_url(url.as_str());
        }
        if let Some(url) = &self.forecast_url {
            cfg.set_forecast_url(url.as_str());
        }
        if let Some(secs) = self.timeout {
            cfg.set_timeout_secs(secs)?;
        }
        Ok(())
    }

    pub async fn run(self) -> anyhow::Result<()> {
        let config = self.config()?;
        tracing::debug!(?config, "configuration loaded");

        let provider = provider_from_config(&config)?;

        match self.city {
            Some(city) => run_once(provider.as_ref(), &city).await,
            None => {
                let stdin = std::io::stdin();
                let source = if stdin.is_terminal() {
                    CitySource::Prompt
                } else {
                    CitySource::Lines(stdin.lock())
                };
                run_interactive(provider.as_ref(), source).await
            }
        }
    }
}

/// Single lookup; a missing city or a failed request becomes the process error.
async fn run_once(provider: &dyn WeatherProvider, city: &str) -> anyhow::Result<()> {
    match lookup(provider, city).await {
        LookupOutcome::Found(report) => {
            println!("{}", render::report(&report));
            Ok(())
        }
        LookupOutcome::NotFound { query } => Err(anyhow!("City not found: {query}")),
        LookupOutcome::Unavailable(err) => {
            Err(anyhow::Error::new(err).context("Failed to fetch weather data"))
        }
    }
}

/// Where interactive city names come from.
pub enum CitySource<R> {
    /// Terminal prompt.
    Prompt,
    /// Piped input, one city per line.
    Lines(R),
}

impl<R: BufRead> CitySource<R> {
    /// Next raw answer, or `None` once the user is done (end of input, Esc, Ctrl-C).
    pub fn next_line(&mut self) -> anyhow::Result<Option<String>> {
        match self {
            CitySource::Prompt => match Text::new("Enter city name:")
                .with_placeholder(DEFAULT_CITY)
                .prompt()
            {
                Ok(raw) => Ok(Some(raw)),
                Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
                    Ok(None)
                }
                Err(err) => Err(err).context("Failed to read city name"),
            },
            CitySource::Lines(reader) => {
                let mut line = String::new();
                let read = reader
                    .read_line(&mut line)
                    .context("Failed to read city name from stdin")?;
                Ok((read > 0).then_some(line))
            }
        }
    }
}

async fn run_interactive<R: BufRead>(
    provider: &dyn WeatherProvider,
    mut source: CitySource<R>,
) -> anyhow::Result<()> {
    println!("--- Weather lookup (enter 'q' to quit) ---");

    while let Some(raw) = source.next_line()? {
        let city = match Input::parse(&raw) {
            Input::Quit => break,
            Input::City(city) => city,
        };

        println!("\nSearching for {city}...");
        let outcome = lookup(provider, &city).await;
        println!("{}\n", render::outcome(&outcome));
    }

    println!("Goodbye!");
    Ok(())
}
