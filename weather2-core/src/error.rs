use thiserror::Error;

/// Raised when a [`Client`](crate::Client) is built with a unit the service does not know.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Invalid temperature unit '{0}'. Supported units: c, f.")]
    InvalidTemperatureUnit(String),

    #[error("Invalid wind speed unit '{0}'. Supported units: mps, mph, kph.")]
    InvalidWindUnit(String),
}

/// Failure of a single forecast fetch. No partial report is ever returned alongside one.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport failure: DNS, refused connection, broken body stream.
    #[error("Failed to reach MyWeather2: {0}")]
    Network(#[from] reqwest::Error),

    /// The service answered with plain text instead of XML. Carries the body verbatim.
    #[error("{0}")]
    Service(String),

    /// The body carried the XML prolog but did not match the forecast schema.
    #[error("Failed to parse MyWeather2 XML: {0}")]
    Parse(#[from] quick_xml::de::DeError),
}

impl FetchError {
    /// The raw service message, if the service rejected the request.
    pub fn service_message(&self) -> Option<&str> {
        match self {
            FetchError::Service(msg) => Some(msg),
            _ => None,
        }
    }
}
