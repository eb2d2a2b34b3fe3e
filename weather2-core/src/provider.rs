use async_trait::async_trait;
use std::{borrow::Cow, fmt::Debug};

use crate::{WeatherReport, error::FetchError};

/// The two MyWeather2 forecast endpoints. They share one fetch pipeline and
/// differ only in path, parameter name and escaping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// Two-day forecast for a postcode, zip code or `lat,lon` query.
    ShortRange,
    /// Seven-day forecast for a location reference registered on the account.
    Extended,
}

impl Endpoint {
    pub fn as_str(&self) -> &'static str {
        match self {
            Endpoint::ShortRange => "short-range",
            Endpoint::Extended => "extended",
        }
    }

    /// Path below the service base.
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::ShortRange => "forecast.ashx",
            Endpoint::Extended => "weather.ashx",
        }
    }

    /// Name of the location query parameter.
    pub fn param(&self) -> &'static str {
        match self {
            Endpoint::ShortRange => "query",
            Endpoint::Extended => "uref",
        }
    }

    /// Prepare a location for the query string. Free-form queries are
    /// query-escaped with spaces as `+`; urefs go out verbatim, as the service
    /// has always received them.
    pub fn encode<'a>(&self, location: &'a str) -> Cow<'a, str> {
        match self {
            Endpoint::ShortRange => {
                let encoded = urlencoding::encode(location);
                // Every `%` in the output starts an escape, so `%20` is always a space.
                if encoded.contains("%20") {
                    Cow::Owned(encoded.replace("%20", "+"))
                } else {
                    encoded
                }
            }
            Endpoint::Extended => Cow::Borrowed(location),
        }
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForecastRequest {
    pub endpoint: Endpoint,
    pub location: String,
}

impl ForecastRequest {
    pub fn short_range(query: impl Into<String>) -> Self {
        Self { endpoint: Endpoint::ShortRange, location: query.into() }
    }

    pub fn extended(uref: impl Into<String>) -> Self {
        Self { endpoint: Endpoint::Extended, location: uref.into() }
    }
}

#[async_trait]
pub trait ForecastProvider: Send + Sync + Debug {
    async fn forecast(&self, request: &ForecastRequest) -> Result<WeatherReport, FetchError>;
}
