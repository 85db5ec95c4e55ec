//! OpenWeather one-call API client
//!
//! This module fetches the raw one-call document for a location. The body is
//! returned as text so the cache can persist it unchanged; decoding happens
//! in [`super::onecall`].

use std::future::Future;
use std::time::Duration;

use reqwest::Client;
use thiserror::Error;

use super::ForecastRequest;

/// Default URL of the OpenWeather 3.0 one-call endpoint
pub const ONE_CALL_URL: &str = "https://api.openweathermap.org/data/3.0/onecall";

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Granularities left out of the response; only current, daily and alerts are rendered
const EXCLUDE: &str = "minutely,hourly";

/// Errors that can occur when fetching weather data
#[derive(Debug, Error)]
pub enum FetchError {
    /// The provider did not answer within the configured timeout
    #[error("Weather request timed out")]
    Timeout,

    /// Connection, TLS, or body transfer failure
    #[error("HTTP request failed: {0}")]
    Request(reqwest::Error),

    /// The provider answered with a non-success status
    #[error("Weather provider returned HTTP {0}")]
    Status(u16),
}

impl FetchError {
    /// Short machine-friendly reason for logs
    pub fn reason(&self) -> String {
        match self {
            Self::Timeout => "timeout".to_string(),
            Self::Request(e) => e.to_string(),
            Self::Status(code) => format!("status {code}"),
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout
        } else if let Some(status) = e.status() {
            Self::Status(status.as_u16())
        } else {
            Self::Request(e)
        }
    }
}

/// Source of raw one-call documents
///
/// Implemented by [`WeatherClient`]; the cache is generic over it so tests
/// can count or fail fetches without a network.
pub trait Fetch {
    fn fetch(
        &self,
        request: &ForecastRequest,
    ) -> impl Future<Output = Result<String, FetchError>> + Send;
}

/// Client for fetching weather data from the OpenWeather one-call API
#[derive(Debug, Clone)]
pub struct WeatherClient {
    client: Client,
    base_url: String,
}

impl WeatherClient {
    /// Create a new WeatherClient with the default endpoint and timeout
    pub fn new() -> Result<Self, FetchError> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// Create a new WeatherClient whose requests give up after `timeout`
    pub fn with_timeout(timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(FetchError::Request)?;

        Ok(Self::with_client(client))
    }

    /// Create a new WeatherClient with a custom HTTP client
    pub fn with_client(client: Client) -> Self {
        Self {
            client,
            base_url: ONE_CALL_URL.to_string(),
        }
    }

    /// Point the client at a different one-call endpoint
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Fetch the raw one-call JSON for the request's coordinates
    ///
    /// # Returns
    /// * `Ok(String)` - Response body of a 2xx reply
    /// * `Err(FetchError)` - On transport failure, timeout, or non-2xx status
    pub async fn fetch_one_call(&self, request: &ForecastRequest) -> Result<String, FetchError> {
        tracing::debug!(url = %masked_url(&self.base_url, request), "requesting one-call forecast");

        let response = self
            .client
            .get(&self.base_url)
            .query(&query_params(request))
            .send()
            .await?
            .error_for_status()?;

        Ok(response.text().await?)
    }
}

impl Fetch for WeatherClient {
    async fn fetch(&self, request: &ForecastRequest) -> Result<String, FetchError> {
        self.fetch_one_call(request).await
    }
}

/// Query string for a one-call request, in the order the provider documents it
fn query_params(request: &ForecastRequest) -> Vec<(&'static str, String)> {
    vec![
        ("lat", request.latitude.to_string()),
        ("lon", request.longitude.to_string()),
        ("appid", request.api_key.clone()),
        ("units", "imperial".to_string()),
        ("exclude", EXCLUDE.to_string()),
    ]
}

/// Request URL for logs, with the API key replaced by `***`
fn masked_url(base_url: &str, request: &ForecastRequest) -> String {
    let query = query_params(request)
        .into_iter()
        .map(|(name, value)| match name {
            "appid" => format!("{name}=***"),
            _ => format!("{name}={value}"),
        })
        .collect::<Vec<_>>()
        .join("&");
    format!("{base_url}?{query}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> ForecastRequest {
        ForecastRequest::new("49.28", "-123.12", "secret", "Vancouver").unwrap()
    }

    #[test]
    fn test_query_params_cover_one_call_contract() {
        let params = query_params(&request());

        assert_eq!(params[0], ("lat", "49.28".to_string()));
        assert_eq!(params[1], ("lon", "-123.12".to_string()));
        assert_eq!(params[2], ("appid", "secret".to_string()));
        assert_eq!(params[3], ("units", "imperial".to_string()));
        assert_eq!(params[4], ("exclude", "minutely,hourly".to_string()));
    }

    #[test]
    fn test_masked_url_hides_api_key() {
        let url = masked_url(ONE_CALL_URL, &request());

        assert!(!url.contains("secret"));
        assert_eq!(
            url,
            "https://api.openweathermap.org/data/3.0/onecall?lat=49.28&lon=-123.12&appid=***&units=imperial&exclude=minutely,hourly"
        );
    }

    #[test]
    fn test_weather_client_defaults_to_one_call_url() {
        let client = WeatherClient::new().expect("Client should build");
        assert_eq!(client.base_url, ONE_CALL_URL);
    }

    #[test]
    fn test_weather_client_with_base_url() {
        let client = WeatherClient::new()
            .expect("Client should build")
            .with_base_url("http://localhost:9999/onecall");
        assert_eq!(client.base_url, "http://localhost:9999/onecall");
    }

    #[test]
    fn test_timeout_reason() {
        assert_eq!(FetchError::Timeout.reason(), "timeout");
        assert_eq!(FetchError::Status(401).reason(), "status 401");
    }
}
