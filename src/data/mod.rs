//! Core data models for the weather shortcodes
//!
//! This module contains the request and snapshot types shared by the cache,
//! the provider client, and the HTML renderers.

pub mod classify;
pub mod onecall;
pub mod weather;

pub use classify::{compass_direction, icon_code, CLEAR_ICON};
pub use onecall::{parse_snapshot, ParseError};
pub use weather::{Fetch, FetchError, WeatherClient};

use chrono::{DateTime, FixedOffset, Utc};

/// Location and credentials needed to query the one-call endpoint
///
/// Build it with [`ForecastRequest::new`], which refuses empty fields and
/// unparsable coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastRequest {
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Longitude in decimal degrees
    pub longitude: f64,
    /// OpenWeather API key
    pub api_key: String,
    /// Display name for the widget heading
    pub location_name: String,
}

impl ForecastRequest {
    /// Builds a request from the raw shortcode strings
    ///
    /// Returns `None` when any field is empty (after trimming) or when a
    /// coordinate is not a finite decimal number.
    pub fn new(lat: &str, lon: &str, api_key: &str, location_name: &str) -> Option<Self> {
        let (lat, lon) = (lat.trim(), lon.trim());
        if lat.is_empty()
            || lon.is_empty()
            || api_key.trim().is_empty()
            || location_name.trim().is_empty()
        {
            return None;
        }

        let latitude = lat.parse::<f64>().ok().filter(|v| v.is_finite())?;
        let longitude = lon.parse::<f64>().ok().filter(|v| v.is_finite())?;

        Some(Self {
            latitude,
            longitude,
            api_key: api_key.trim().to_string(),
            location_name: location_name.to_string(),
        })
    }
}

/// Current conditions at the requested location
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentConditions {
    /// Temperature in Fahrenheit
    pub temp_f: f64,
    /// Provider's short text description ("light rain")
    pub description: String,
    /// Provider condition code; `None` when the payload carried a non-numeric id
    pub condition_code: Option<i64>,
    /// Wind speed in miles per hour
    pub wind_speed_mph: f64,
    /// Wind bearing in degrees
    pub wind_degrees: f64,
    /// When the provider observed these conditions
    pub observed_at: DateTime<Utc>,
}

/// One day of the multi-day forecast
#[derive(Debug, Clone, PartialEq)]
pub struct DailyForecast {
    /// Daytime temperature in Fahrenheit
    pub day_temp_f: f64,
    pub description: String,
    pub condition_code: Option<i64>,
    pub wind_speed_mph: f64,
    pub wind_degrees: f64,
    /// Timestamp identifying the forecast day
    pub forecast_at: DateTime<Utc>,
}

/// A government weather alert as relayed by the provider
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    /// Event name, e.g. "Small Craft Advisory"
    pub event_name: String,
    /// Free-form alert text, `*`-bulleted by most issuing agencies
    pub description_text: String,
}

/// Decoded form of the cached provider document
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherSnapshot {
    pub current: CurrentConditions,
    /// Daily entries in provider order (chronological)
    pub daily: Vec<DailyForecast>,
    /// `None` when the payload has no `alerts` key at all
    pub alerts: Option<Vec<Alert>>,
    /// Offset of the location from UTC, used for display only
    pub utc_offset: FixedOffset,
}
