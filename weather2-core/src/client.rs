use async_trait::async_trait;
use tracing::{debug, trace};

use crate::{
    WeatherReport,
    error::{FetchError, ValidationError},
    provider::{ForecastProvider, ForecastRequest},
    units::{TemperatureUnit, WindUnit},
};

pub const DEFAULT_BASE_URL: &str = "http://www.myweather2.com/developer";

/// Successful responses always carry this declaration; errors come back as plain text.
pub const XML_PROLOG: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

/// MyWeather2 API client. Immutable once built, so one instance can serve
/// any number of concurrent calls.
#[derive(Debug, Clone)]
pub struct Client {
    uac: String,
    temperature_unit: TemperatureUnit,
    wind_unit: WindUnit,
    base_url: String,
    http: reqwest::Client,
}

impl Client {
    /// Build a client from the unit codes the service uses (`c`/`f`, `mps`/`mph`/`kph`).
    ///
    /// The uac is not checked; get one from the MyWeather2 developer zone.
    pub fn new(uac: impl Into<String>, temperature_unit: &str, wind_unit: &str) -> Result<Self, ValidationError> {
        let temperature_unit = TemperatureUnit::try_from(temperature_unit)?;
        let wind_unit = WindUnit::try_from(wind_unit)?;

        Ok(Self::with_units(uac, temperature_unit, wind_unit))
    }

    pub fn with_units(uac: impl Into<String>, temperature_unit: TemperatureUnit, wind_unit: WindUnit) -> Self {
        Self {
            uac: uac.into(),
            temperature_unit,
            wind_unit,
            base_url: DEFAULT_BASE_URL.to_string(),
            http: reqwest::Client::new(),
        }
    }

    /// Point the client at another host, e.g. a local mock of the service.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn uac(&self) -> &str {
        &self.uac
    }

    pub fn temperature_unit(&self) -> TemperatureUnit {
        self.temperature_unit
    }

    pub fn wind_unit(&self) -> WindUnit {
        self.wind_unit
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Two-day forecast. `query` may be a UK postcode, a zip code or `lat,lon`.
    pub async fn fetch_short_range_forecast(&self, query: &str) -> Result<WeatherReport, FetchError> {
        self.fetch(&ForecastRequest::short_range(query)).await
    }

    /// Seven-day forecast for a uref set up in the account's developer zone.
    pub async fn fetch_extended_forecast(&self, uref: &str) -> Result<WeatherReport, FetchError> {
        self.fetch(&ForecastRequest::extended(uref)).await
    }

    /// Full request URL, account token included.
    pub fn request_url(&self, request: &ForecastRequest) -> String {
        let endpoint = request.endpoint;

        format!(
            "{}/{}?{}={}&uac={}&output=xml&temp_unit={}&ws_unit={}",
            self.base_url.trim_end_matches('/'),
            endpoint.path(),
            endpoint.param(),
            endpoint.encode(&request.location),
            self.uac,
            self.temperature_unit,
            self.wind_unit,
        )
    }

    async fn fetch(&self, request: &ForecastRequest) -> Result<WeatherReport, FetchError> {
        debug!(endpoint = %request.endpoint, location = %request.location, "Requesting MyWeather2 forecast");

        let url = self.request_url(request);
        let res = self.http.get(&url).send().await?;

        trace!(status = %res.status(), "MyWeather2 responded");

        // The service reports API errors with status 200, so the status is not checked.
        let body = res.text().await?;

        trace!(bytes = body.len(), "Read MyWeather2 response body");

        decode(&body)
    }
}

#[async_trait]
impl ForecastProvider for Client {
    async fn forecast(&self, request: &ForecastRequest) -> Result<WeatherReport, FetchError> {
        self.fetch(request).await
    }
}

/// Turn a MyWeather2 response body into a report.
///
/// A body without [`XML_PROLOG`] is the service's plain-text error message and
/// comes back as [`FetchError::Service`].
pub fn decode(body: &str) -> Result<WeatherReport, FetchError> {
    if !body.contains(XML_PROLOG) {
        debug!("MyWeather2 answered with a plain-text error");
        return Err(FetchError::Service(body.to_string()));
    }

    let report: WeatherReport = quick_xml::de::from_str(body)?;

    debug!(forecasts = report.forecasts.len(), "Decoded MyWeather2 report");

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ATTRIBUTION, WindInfo};

    const TWO_DAY: &str = include_str!("../tests/fixtures/two_day.xml");
    const ONE_DAY: &str = include_str!("../tests/fixtures/one_day.xml");

    #[test]
    fn rejects_bad_temperature_unit() {
        let err = Client::new("UAC", "badinput", "mph").unwrap_err();
        assert_eq!(err, ValidationError::InvalidTemperatureUnit("badinput".into()));
    }

    #[test]
    fn rejects_bad_wind_unit() {
        let err = Client::new("UAC", "c", "badinput").unwrap_err();
        assert_eq!(err, ValidationError::InvalidWindUnit("badinput".into()));
    }

    #[test]
    fn temperature_unit_is_checked_first() {
        let err = Client::new("UAC", "x", "y").unwrap_err();
        assert!(matches!(err, ValidationError::InvalidTemperatureUnit(_)));
    }

    #[test]
    fn valid_construction_keeps_inputs() {
        let client = Client::new("my-uac", "c", "mph").expect("valid units");

        assert_eq!(client.uac(), "my-uac");
        assert_eq!(client.temperature_unit(), TemperatureUnit::Celsius);
        assert_eq!(client.temperature_unit().as_str(), "c");
        assert_eq!(client.wind_unit(), WindUnit::MilesPerHour);
        assert_eq!(client.wind_unit().as_str(), "mph");
        assert_eq!(client.base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn short_range_url_escapes_query() {
        let client = Client::new("UAC1", "f", "kph").expect("valid units");
        let url = client.request_url(&ForecastRequest::short_range("51.5,-0.12"));

        assert_eq!(
            url,
            "http://www.myweather2.com/developer/forecast.ashx?query=51.5%2C-0.12&uac=UAC1&output=xml&temp_unit=f&ws_unit=kph"
        );
    }

    #[test]
    fn extended_url_keeps_uref_verbatim() {
        let client = Client::new("UAC1", "c", "mps").expect("valid units").with_base_url("http://localhost:8080/");
        let url = client.request_url(&ForecastRequest::extended("123abc"));

        assert_eq!(
            url,
            "http://localhost:8080/weather.ashx?uref=123abc&uac=UAC1&output=xml&temp_unit=c&ws_unit=mps"
        );
    }

    #[test]
    fn decode_one_day_fixture() {
        let report = decode(ONE_DAY).expect("fixture should decode");

        let current = &report.current;
        assert_eq!(current.temperature, 7);
        assert_eq!(current.temperature_unit, "c");
        assert_eq!(current.wind.speed_value, 10);
        assert_eq!(current.wind.direction, "SW");
        assert_eq!(current.wind.unit, "mph");
        assert_eq!(current.humidity_percent, 81);
        assert_eq!(current.pressure_millibar, 1012);
        assert_eq!(current.description, "Light rain");

        assert_eq!(report.forecasts.len(), 1);
        let day = &report.forecasts[0];
        assert_eq!(day.date, "2012-12-19");
        assert_eq!(day.temperature_unit, "c");
        assert_eq!(day.max_temp, 9);
        assert_eq!(day.min_temp, -2);
        assert_eq!(day.day.wind.speed_value, 14);
        assert_eq!(day.day.wind.direction, "WSW");
        assert_eq!(day.day.weather_code, "3");
        assert_eq!(day.day.description, "Overcast skies");
        assert_eq!(day.night.wind.speed_value, 6);
        assert_eq!(day.night.wind.direction, "W");
        assert_eq!(day.night.weather_code, "0");
        assert_eq!(day.night.description, "Clear skies");
    }

    #[test]
    fn decode_keeps_forecast_order() {
        let report = decode(TWO_DAY).expect("fixture should decode");

        let dates: Vec<&str> = report.forecasts.iter().map(|f| f.date.as_str()).collect();
        assert_eq!(dates, ["2012-12-19", "2012-12-20"]);
        assert!(report.to_string().ends_with(ATTRIBUTION));
    }

    #[test]
    fn decode_without_forecasts() {
        let body = format!(
            "{XML_PROLOG}\n<weather><curren_weather><temp>-3</temp><temp_unit>c</temp_unit>\
             <wind><speed>0</speed><dir>N</dir><wind_unit>mps</wind_unit></wind>\
             <humidity>95</humidity><pressure>1030</pressure><weather_text>Fog</weather_text>\
             </curren_weather></weather>"
        );

        let report = decode(&body).expect("current-only document should decode");
        assert_eq!(report.current.temperature, -3);
        assert!(report.forecasts.is_empty());
    }

    #[test]
    fn plain_text_body_is_service_error() {
        let err = decode("Daily limit exceeded").unwrap_err();

        assert!(matches!(err, FetchError::Service(_)));
        assert_eq!(err.service_message(), Some("Daily limit exceeded"));
        assert_eq!(err.to_string(), "Daily limit exceeded");
    }

    #[test]
    fn single_quoted_declaration_is_not_the_prolog() {
        let body = "<?xml version='1.0'?><weather></weather>";
        assert!(matches!(decode(body).unwrap_err(), FetchError::Service(_)));
    }

    #[test]
    fn unterminated_tag_is_parse_error() {
        let body = format!("{XML_PROLOG}\n<weather><curren_weather><temp>12</temp>");
        assert!(matches!(decode(&body).unwrap_err(), FetchError::Parse(_)));
    }

    #[test]
    fn missing_current_weather_is_parse_error() {
        let body = format!("{XML_PROLOG}\n<weather></weather>");
        assert!(matches!(decode(&body).unwrap_err(), FetchError::Parse(_)));
    }

    #[test]
    fn empty_integer_element_reads_as_zero() {
        let body = ONE_DAY.replace("<humidity>81</humidity>", "<humidity></humidity>");
        let report = decode(&body).expect("empty integer should decode");

        assert_eq!(report.current.humidity_percent, 0);
        assert_eq!(report.current.pressure_millibar, 1012);
    }

    #[test]
    fn self_closing_integer_element_reads_as_zero() {
        let body = ONE_DAY.replace("<day_max_temp>9</day_max_temp>", "<day_max_temp/>");
        let report = decode(&body).expect("self-closing integer should decode");

        assert_eq!(report.forecasts[0].max_temp, 0);
        assert_eq!(report.forecasts[0].min_temp, -2);
    }

    #[test]
    fn missing_elements_fall_back_to_zero_values() {
        let body = ONE_DAY
            .replace("<pressure>1012</pressure>", "")
            .replacen("<weather_code>3</weather_code>", "", 1);
        let report = decode(&body).expect("missing elements should decode");

        assert_eq!(report.current.pressure_millibar, 0);
        assert_eq!(report.current.humidity_percent, 81);
        assert_eq!(report.forecasts[0].day.weather_code, "");
        assert_eq!(report.forecasts[0].day.description, "Overcast skies");
        assert_eq!(report.forecasts[0].night.weather_code, "0");
    }

    #[test]
    fn missing_wind_block_is_all_defaults() {
        let body = format!(
            "{XML_PROLOG}\n<weather><curren_weather><temp>5</temp>\
             <weather_text>Mist</weather_text></curren_weather></weather>"
        );
        let report = decode(&body).expect("sparse current block should decode");

        assert_eq!(report.current.temperature, 5);
        assert_eq!(report.current.wind, WindInfo::default());
        assert_eq!(report.current.temperature_unit, "");
    }

    #[test]
    fn non_numeric_temperature_is_parse_error() {
        let body = ONE_DAY.replace("<temp>7</temp>", "<temp>warm</temp>");
        assert!(matches!(decode(&body).unwrap_err(), FetchError::Parse(_)));
    }
}
