use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use inquire::{Select, Text};
use tracing::debug;
use weather2_core::{ATTRIBUTION, ForecastProvider, ForecastRequest, TemperatureUnit, WeatherReport, WindUnit};

use crate::config::Config;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather2", version, about = "MyWeather2 forecast CLI")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the MyWeather2 UAC, units and default locations.
    Configure,

    /// Two-day forecast for a postcode, zip code or "lat,lon".
    Forecast {
        /// Location query; falls back to the configured default location.
        query: Option<String>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Seven-day forecast for a location reference from your developer zone.
    Extended {
        /// Location reference; falls back to the configured uref.
        uref: Option<String>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Print the location of the config file.
    ConfigPath,
}

#[derive(Debug, Args)]
pub struct OutputArgs {
    /// Print the report as JSON.
    #[arg(long)]
    pub json: bool,

    /// Temperature unit for this request: c or f.
    #[arg(long)]
    pub temp_unit: Option<String>,

    /// Wind speed unit for this request: mps, mph or kph.
    #[arg(long)]
    pub wind_unit: Option<String>,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Forecast { query, output } => {
                let cfg = Config::load()?;
                let client = cfg.client(output.temp_unit.as_deref(), output.wind_unit.as_deref())?;
                let request = ForecastRequest::short_range(cfg.location_or_default(query)?);

                show(&client, &request, output.json).await
            }
            Command::Extended { uref, output } => {
                let cfg = Config::load()?;
                let client = cfg.client(output.temp_unit.as_deref(), output.wind_unit.as_deref())?;
                let request = ForecastRequest::extended(cfg.uref_or_default(uref)?);

                show(&client, &request, output.json).await
            }
            Command::ConfigPath => {
                println!("{}", Config::config_file_path()?.display());
                Ok(())
            }
        }
    }
}

async fn show(provider: &dyn ForecastProvider, request: &ForecastRequest, json: bool) -> Result<()> {
    let report = provider.forecast(request).await.with_context(|| {
        format!("Failed to fetch {} forecast for '{}'", request.endpoint, request.location)
    })?;

    debug!(forecasts = report.forecasts.len(), "Rendering report");

    println!("{}", render(&report, json)?);
    Ok(())
}

/// Human or JSON rendering. Both end with the attribution line the service requires.
fn render(report: &WeatherReport, json: bool) -> Result<String> {
    if json {
        let body = serde_json::to_string_pretty(report).context("Failed to serialize report to JSON")?;
        Ok(format!("{body}\n{ATTRIBUTION}"))
    } else {
        Ok(report.to_string())
    }
}

fn configure() -> Result<()> {
    let mut cfg = Config::load()?;

    let uac = Text::new("MyWeather2 UAC:")
        .with_initial_value(cfg.uac.as_deref().unwrap_or_default())
        .with_help_message("Found in the developer zone at www.myweather2.com/developer")
        .prompt()
        .context("Failed to read UAC")?;

    let temperature_unit = Select::new("Temperature unit:", TemperatureUnit::all().to_vec())
        .with_starting_cursor(position(TemperatureUnit::all(), &cfg.temperature_unit))
        .prompt()
        .context("Failed to read temperature unit")?;

    let wind_unit = Select::new("Wind speed unit:", WindUnit::all().to_vec())
        .with_starting_cursor(position(WindUnit::all(), &cfg.wind_unit))
        .prompt()
        .context("Failed to read wind speed unit")?;

    let default_location = Text::new("Default location (optional):")
        .with_initial_value(cfg.default_location.as_deref().unwrap_or_default())
        .with_help_message("UK postcode, zip code or \"lat,lon\"")
        .prompt_skippable()
        .context("Failed to read default location")?;

    let uref = Text::new("Extended forecast uref (optional):")
        .with_initial_value(cfg.uref.as_deref().unwrap_or_default())
        .prompt_skippable()
        .context("Failed to read uref")?;

    cfg.uac = Some(uac.trim().to_string());
    cfg.temperature_unit = temperature_unit;
    cfg.wind_unit = wind_unit;
    cfg.default_location = non_empty(default_location);
    cfg.uref = non_empty(uref);
    cfg.save()?;

    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

fn position<T: PartialEq>(all: &[T], current: &T) -> usize {
    all.iter().position(|item| item == current).unwrap_or(0)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}
