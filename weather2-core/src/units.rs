use serde::{Deserialize, Serialize};
use std::{convert::TryFrom, str::FromStr};

use crate::error::ValidationError;

/// Temperature unit requested from the service (`temp_unit` parameter).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TemperatureUnit {
    #[default]
    #[serde(rename = "c")]
    Celsius,
    #[serde(rename = "f")]
    Fahrenheit,
}

impl TemperatureUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "c",
            TemperatureUnit::Fahrenheit => "f",
        }
    }

    pub const fn all() -> &'static [TemperatureUnit] {
        &[TemperatureUnit::Celsius, TemperatureUnit::Fahrenheit]
    }
}

impl std::fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TemperatureUnit {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "c" => Ok(TemperatureUnit::Celsius),
            "f" => Ok(TemperatureUnit::Fahrenheit),
            _ => Err(ValidationError::InvalidTemperatureUnit(value.to_string())),
        }
    }
}

impl FromStr for TemperatureUnit {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TemperatureUnit::try_from(s)
    }
}

/// Wind speed unit requested from the service (`ws_unit` parameter).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum WindUnit {
    #[default]
    #[serde(rename = "mps")]
    MetersPerSecond,
    #[serde(rename = "mph")]
    MilesPerHour,
    #[serde(rename = "kph")]
    KilometersPerHour,
}

impl WindUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            WindUnit::MetersPerSecond => "mps",
            WindUnit::MilesPerHour => "mph",
            WindUnit::KilometersPerHour => "kph",
        }
    }

    pub const fn all() -> &'static [WindUnit] {
        &[WindUnit::MetersPerSecond, WindUnit::MilesPerHour, WindUnit::KilometersPerHour]
    }
}

impl std::fmt::Display for WindUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for WindUnit {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "mps" => Ok(WindUnit::MetersPerSecond),
            "mph" => Ok(WindUnit::MilesPerHour),
            "kph" => Ok(WindUnit::KilometersPerHour),
            _ => Err(ValidationError::InvalidWindUnit(value.to_string())),
        }
    }
}

impl FromStr for WindUnit {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        WindUnit::try_from(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temperature_unit_as_str_roundtrip() {
        for unit in TemperatureUnit::all() {
            let parsed = TemperatureUnit::try_from(unit.as_str()).expect("roundtrip should succeed");
            assert_eq!(*unit, parsed);
        }
    }

    #[test]
    fn wind_unit_as_str_roundtrip() {
        for unit in WindUnit::all() {
            let parsed: WindUnit = unit.as_str().parse().expect("roundtrip should succeed");
            assert_eq!(*unit, parsed);
        }
    }

    #[test]
    fn temperature_unit_rejects_anything_else() {
        for bad in ["", "C", "k", "celsius", "badinput", " c"] {
            let err = TemperatureUnit::try_from(bad).unwrap_err();
            assert_eq!(err, ValidationError::InvalidTemperatureUnit(bad.to_string()));
        }
    }

    #[test]
    fn wind_unit_rejects_anything_else() {
        for bad in ["", "MPH", "kmh", "knots", "badinput"] {
            let err = WindUnit::try_from(bad).unwrap_err();
            assert_eq!(err, ValidationError::InvalidWindUnit(bad.to_string()));
        }
    }
}
