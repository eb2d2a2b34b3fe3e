//! Client library for the MyWeather2 forecast API.
//!
//! This crate defines:
//! - The [`Client`] and its unit validation
//! - The fetch-and-decode pipeline shared by both forecast endpoints
//! - The forecast data model and its text renderings
//!
//! MyWeather2's terms of use require the backlink text [`ATTRIBUTION`] wherever
//! feed data is displayed. The free tier is capped at 500 requests per day;
//! the client does not track or throttle this.

pub mod client;
pub mod error;
pub mod model;
pub mod provider;
pub mod units;

pub use client::{Client, DEFAULT_BASE_URL, XML_PROLOG, decode};
pub use error::{FetchError, ValidationError};
pub use model::{ATTRIBUTION, CurrentConditions, ForecastDay, PeriodConditions, WeatherReport, WindInfo};
pub use provider::{Endpoint, ForecastProvider, ForecastRequest};
pub use units::{TemperatureUnit, WindUnit};
