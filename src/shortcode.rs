//! Page-facing entry points for the weather widget and warning banner
//!
//! Each entry point yields a string for every recoverable outcome: the
//! widget, a guidance message, a fallback message, or nothing. Only a missing
//! or unreadable cache resource comes back as an error.

use crate::cache::{CacheError, CacheStore, WeatherCache};
use crate::data::{Fetch, ForecastRequest};
use crate::render::{self, RenderOptions};

/// Returned when a required attribute is empty
pub const MISSING_ATTRIBUTES_MESSAGE: &str =
    "Add lat, lon, appid (OpenWeather API key), and locationname to weather shortcode";

/// Returned when the provider could not be reached or sent unusable data
pub const FETCH_FAILED_MESSAGE: &str = "Something went wrong: we could not fetch the weather data.";

/// Attributes of the weather shortcode, each defaulting to `""`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShortcodeAttributes {
    pub lon: String,
    pub lat: String,
    pub appid: String,
    pub locationname: String,
}

impl ShortcodeAttributes {
    /// Collects recognised attributes from `(name, value)` pairs
    ///
    /// Unknown names are ignored; later duplicates win.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut attributes = Self::default();
        for (name, value) in pairs {
            match name.as_ref() {
                "lon" => attributes.lon = value.into(),
                "lat" => attributes.lat = value.into(),
                "appid" => attributes.appid = value.into(),
                "locationname" => attributes.locationname = value.into(),
                _ => {}
            }
        }
        attributes
    }

    /// The validated request, or `None` if any attribute is unusable
    pub fn forecast_request(&self) -> Option<ForecastRequest> {
        ForecastRequest::new(&self.lat, &self.lon, &self.appid, &self.locationname)
    }
}

/// The two render entry points over one shared cache
#[derive(Debug)]
pub struct Shortcodes<S, F> {
    cache: WeatherCache<S, F>,
    options: RenderOptions,
}

impl<S: CacheStore, F: Fetch> Shortcodes<S, F> {
    pub fn new(cache: WeatherCache<S, F>, options: RenderOptions) -> Self {
        Self { cache, options }
    }

    pub fn cache(&self) -> &WeatherCache<S, F> {
        &self.cache
    }

    /// Forecast widget for the given attributes
    ///
    /// # Returns
    /// * `Ok(String)` - Widget HTML, [`MISSING_ATTRIBUTES_MESSAGE`], or [`FETCH_FAILED_MESSAGE`]
    /// * `Err(CacheError)` - The cache resource is missing or unreadable
    pub async fn render_forecast(&self, attributes: &ShortcodeAttributes) -> Result<String, CacheError> {
        let Some(request) = attributes.forecast_request() else {
            tracing::debug!("weather shortcode is missing attributes");
            return Ok(MISSING_ATTRIBUTES_MESSAGE.to_string());
        };

        match self.cache.get_snapshot(&request).await {
            Ok(snapshot) => Ok(render::render_forecast(&request.location_name, &snapshot, &self.options)),
            Err(e) if e.is_provisioning() => Err(e),
            Err(e) => {
                tracing::warn!(error = %e, "showing weather fallback message");
                Ok(FETCH_FAILED_MESSAGE.to_string())
            }
        }
    }

    /// Warning banner from whatever is cached; never refreshes
    pub fn render_alert(&self) -> String {
        match self.cache.peek_snapshot() {
            Ok(Some(snapshot)) => render::render_alert(&snapshot),
            Ok(None) => String::new(),
            Err(e) => {
                tracing::warn!(error = %e, "cached weather document unusable for warnings");
                String::new()
            }
        }
    }
}
