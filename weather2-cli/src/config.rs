use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use weather2_core::{Client, TemperatureUnit, WindUnit};

/// Configuration stored on disk.
///
/// Example TOML:
/// uac = "..."
/// temperature_unit = "c"
/// wind_unit = "mph"
/// default_location = "SW1A 1AA"
/// uref = "..."
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// MyWeather2 account token.
    pub uac: Option<String>,

    #[serde(default)]
    pub temperature_unit: TemperatureUnit,

    #[serde(default)]
    pub wind_unit: WindUnit,

    /// Query used by `forecast` when none is given.
    pub default_location: Option<String>,

    /// Location reference used by `extended` when none is given.
    pub uref: Option<String>,
}

impl Config {
    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("com", "myweather2", "weather2")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn is_configured(&self) -> bool {
        self.uac.as_deref().is_some_and(|uac| !uac.is_empty())
    }

    /// Build a client from the stored account, with optional unit overrides
    /// given as service codes.
    pub fn client(&self, temperature_unit: Option<&str>, wind_unit: Option<&str>) -> Result<Client> {
        let uac = self.uac.as_deref().filter(|uac| !uac.is_empty()).ok_or_else(|| {
            anyhow!(
                "No MyWeather2 UAC configured.\n\
                 Hint: run `weather2 configure` and enter the UAC from your developer zone."
            )
        })?;

        let temperature_unit = temperature_unit.unwrap_or(self.temperature_unit.as_str());
        let wind_unit = wind_unit.unwrap_or(self.wind_unit.as_str());

        Ok(Client::new(uac, temperature_unit, wind_unit)?)
    }

    pub fn location_or_default(&self, query: Option<String>) -> Result<String> {
        query.or_else(|| self.default_location.clone()).ok_or_else(|| {
            anyhow!(
                "No location given and no default location configured.\n\
                 Hint: pass a postcode, zip code or \"lat,lon\", or run `weather2 configure`."
            )
        })
    }

    pub fn uref_or_default(&self, uref: Option<String>) -> Result<String> {
        uref.or_else(|| self.uref.clone()).ok_or_else(|| {
            anyhow!(
                "No uref given and none configured.\n\
                 Hint: set up a location in the MyWeather2 developer zone, then run `weather2 configure`."
            )
        })
    }
}
