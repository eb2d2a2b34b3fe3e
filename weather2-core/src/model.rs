use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, de};
use std::fmt;

/// Backlink the MyWeather2 terms of use require wherever feed data is displayed.
pub const ATTRIBUTION: &str = "Weather provided by www.MyWeather2.com";

/// Top-level `<weather>` document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherReport {
    // The service spells it this way.
    #[serde(rename(deserialize = "curren_weather"))]
    pub current: CurrentConditions,

    #[serde(rename(deserialize = "forecast"), default)]
    pub forecasts: Vec<ForecastDay>,
}

/// Elements missing from a block fall back to `""` or `0`, as do empty integers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrentConditions {
    #[serde(rename(deserialize = "temp"), deserialize_with = "int_or_zero")]
    pub temperature: i32,
    #[serde(rename(deserialize = "temp_unit"))]
    pub temperature_unit: String,
    pub wind: WindInfo,
    #[serde(rename(deserialize = "humidity"), deserialize_with = "int_or_zero")]
    pub humidity_percent: i32,
    #[serde(rename(deserialize = "pressure"), deserialize_with = "int_or_zero")]
    pub pressure_millibar: i32,
    #[serde(rename(deserialize = "weather_text"))]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastDay {
    /// As sent by the service, normally `YYYY-MM-DD`.
    pub date: String,
    #[serde(rename(deserialize = "temp_unit"))]
    pub temperature_unit: String,
    #[serde(rename(deserialize = "day_max_temp"), deserialize_with = "int_or_zero")]
    pub max_temp: i32,
    #[serde(rename(deserialize = "night_min_temp"), deserialize_with = "int_or_zero")]
    pub min_temp: i32,
    pub day: PeriodConditions,
    pub night: PeriodConditions,
}

impl ForecastDay {
    /// The forecast date, if the service sent it in `YYYY-MM-DD` form.
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d").ok()
    }
}

/// Daytime or nighttime half of a [`ForecastDay`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PeriodConditions {
    pub wind: WindInfo,
    pub weather_code: String,
    #[serde(rename(deserialize = "weather_text"))]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindInfo {
    #[serde(rename(deserialize = "speed"), deserialize_with = "int_or_zero")]
    pub speed_value: i32,
    #[serde(rename(deserialize = "wind_unit"))]
    pub unit: String,
    #[serde(rename(deserialize = "dir"))]
    pub direction: String,
}

/// Integer element text. An empty element reads as 0.
fn int_or_zero<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    let text = String::deserialize(deserializer)?;
    let text = text.trim();

    if text.is_empty() {
        return Ok(0);
    }

    text.parse().map_err(de::Error::custom)
}

impl fmt::Display for WeatherReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.current)?;
        for forecast in &self.forecasts {
            writeln!(f, "{forecast}")?;
        }
        f.write_str(ATTRIBUTION)
    }
}

impl fmt::Display for CurrentConditions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Today ({})\n\tTemp: {}{} :: {} :: Humidity: {}pct :: Pressure: {}mb",
            self.description,
            self.temperature,
            self.temperature_unit,
            self.wind,
            self.humidity_percent,
            self.pressure_millibar,
        )
    }
}

impl fmt::Display for ForecastDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\n\tHigh: {}{} Low: {}{}\n\tDay: {}\n\tNight: {}",
            self.date,
            self.max_temp,
            self.temperature_unit,
            self.min_temp,
            self.temperature_unit,
            self.day,
            self.night,
        )
    }
}

impl fmt::Display for PeriodConditions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} :: {}", self.description, self.wind)
    }
}

impl fmt::Display for WindInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Wind: {}{} (Direction: {})", self.speed_value, self.unit, self.direction)
    }
}
