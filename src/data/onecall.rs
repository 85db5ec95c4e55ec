//! OpenWeather one-call payload decoding
//!
//! The cached document is the provider's raw JSON. This module checks it
//! against the shape the renderers rely on and converts it into a
//! [`WeatherSnapshot`], so a malformed payload fails here instead of
//! somewhere inside the HTML code.

use chrono::{DateTime, FixedOffset, Offset, Utc};
use serde::Deserialize;
use thiserror::Error;

use super::{Alert, CurrentConditions, DailyForecast, WeatherSnapshot};

/// Errors that can occur when decoding a one-call document
#[derive(Debug, Error)]
pub enum ParseError {
    /// Document is not JSON or does not match the expected shape
    #[error("Failed to parse weather document: {0}")]
    Json(#[from] serde_json::Error),

    /// A field the renderers need is present but empty
    #[error("Missing expected field in weather document: {0}")]
    MissingField(String),

    /// A `dt` value outside the representable range
    #[error("Invalid timestamp in weather document: {0}")]
    InvalidTimestamp(i64),
}

/// Decode raw one-call JSON into a snapshot
pub fn parse_snapshot(raw: &str) -> Result<WeatherSnapshot, ParseError> {
    let response: OneCallResponse = serde_json::from_str(raw)?;

    let utc_offset = response
        .timezone_offset
        .and_then(FixedOffset::east_opt)
        .unwrap_or_else(|| Utc.fix());

    let now = response.current;
    let condition = now
        .weather
        .first()
        .ok_or_else(|| ParseError::MissingField("current.weather".to_string()))?;
    let current = CurrentConditions {
        temp_f: now.temp,
        description: condition.description.clone(),
        condition_code: condition.code(),
        wind_speed_mph: now.wind_speed,
        wind_degrees: now.wind_deg,
        observed_at: timestamp(now.dt)?,
    };

    let daily = response
        .daily
        .into_iter()
        .enumerate()
        .map(|(i, day)| {
            let condition = day
                .weather
                .first()
                .ok_or_else(|| ParseError::MissingField(format!("daily[{i}].weather")))?;
            Ok(DailyForecast {
                day_temp_f: day.temp.day,
                description: condition.description.clone(),
                condition_code: condition.code(),
                wind_speed_mph: day.wind_speed,
                wind_degrees: day.wind_deg,
                forecast_at: timestamp(day.dt)?,
            })
        })
        .collect::<Result<Vec<_>, ParseError>>()?;

    let alerts = response.alerts.map(|alerts| {
        alerts
            .into_iter()
            .map(|alert| Alert {
                event_name: alert.event,
                description_text: alert.description,
            })
            .collect()
    });

    Ok(WeatherSnapshot {
        current,
        daily,
        alerts,
        utc_offset,
    })
}

fn timestamp(dt: i64) -> Result<DateTime<Utc>, ParseError> {
    DateTime::from_timestamp(dt, 0).ok_or(ParseError::InvalidTimestamp(dt))
}

/// One-call API response structure (only the parts that are rendered)
#[derive(Debug, Deserialize)]
struct OneCallResponse {
    #[serde(default)]
    timezone_offset: Option<i32>,
    current: RawCurrent,
    #[serde(default)]
    daily: Vec<RawDaily>,
    alerts: Option<Vec<RawAlert>>,
}

#[derive(Debug, Deserialize)]
struct RawCurrent {
    dt: i64,
    temp: f64,
    wind_speed: f64,
    wind_deg: f64,
    weather: Vec<RawCondition>,
}

#[derive(Debug, Deserialize)]
struct RawDaily {
    dt: i64,
    temp: RawDailyTemp,
    wind_speed: f64,
    wind_deg: f64,
    weather: Vec<RawCondition>,
}

#[derive(Debug, Deserialize)]
struct RawDailyTemp {
    day: f64,
}

/// Entry of the provider's `weather` array
#[derive(Debug, Deserialize)]
struct RawCondition {
    /// Usually a number; kept loose so an odd value still renders
    #[serde(default)]
    id: serde_json::Value,
    #[serde(default)]
    description: String,
}

impl RawCondition {
    fn code(&self) -> Option<i64> {
        self.id
            .as_i64()
            .or_else(|| self.id.as_str().and_then(|s| s.trim().parse().ok()))
    }
}

#[derive(Debug, Deserialize)]
struct RawAlert {
    event: String,
    #[serde(default)]
    description: String,
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Trimmed one-call response for Vancouver with one alert
    pub(crate) const VALID_RESPONSE: &str = r#"{
        "lat": 49.28,
        "lon": -123.12,
        "timezone": "America/Vancouver",
        "timezone_offset": -25200,
        "current": {
            "dt": 1721077200,
            "sunrise": 1721046600,
            "sunset": 1721103300,
            "temp": 72.4,
            "feels_like": 72.9,
            "humidity": 65,
            "wind_speed": 8.6,
            "wind_deg": 270,
            "weather": [
                {"id": 801, "main": "Clouds", "description": "few clouds", "icon": "02d"}
            ]
        },
        "daily": [
            {
                "dt": 1721070000,
                "temp": {"day": 73.2, "min": 58.1, "max": 75.0, "night": 60.3, "eve": 70.1, "morn": 59.0},
                "wind_speed": 10.4,
                "wind_deg": 248,
                "weather": [
                    {"id": 500, "main": "Rain", "description": "light rain", "icon": "10d"}
                ]
            },
            {
                "dt": 1721156400,
                "temp": {"day": 69.8, "min": 57.0, "max": 71.2, "night": 59.4, "eve": 66.0, "morn": 57.5},
                "wind_speed": 6.2,
                "wind_deg": 12,
                "weather": [
                    {"id": 800, "main": "Clear", "description": "clear sky", "icon": "01d"}
                ]
            }
        ],
        "alerts": [
            {
                "sender_name": "Environment Canada",
                "event": "Marine Weather Statement",
                "start": 1721070000,
                "end": 1721156400,
                "description": "Calm seas.",
                "tags": []
            },
            {
                "sender_name": "Environment Canada",
                "event": "Small Craft Advisory",
                "start": 1721070000,
                "end": 1721156400,
                "description": "* WHAT...Winds 20 kt.\n* WHERE...Strait of Georgia.",
                "tags": ["Wind"]
            }
        ]
    }"#;

    #[test]
    fn test_parse_valid_response() {
        let snapshot = parse_snapshot(VALID_RESPONSE).expect("Failed to parse valid response");

        assert!((snapshot.current.temp_f - 72.4).abs() < 0.01);
        assert_eq!(snapshot.current.description, "few clouds");
        assert_eq!(snapshot.current.condition_code, Some(801));
        assert!((snapshot.current.wind_speed_mph - 8.6).abs() < 0.01);
        assert!((snapshot.current.wind_degrees - 270.0).abs() < 0.01);
        assert_eq!(snapshot.current.observed_at.timestamp(), 1721077200);
        assert_eq!(snapshot.utc_offset.local_minus_utc(), -25200);
    }

    #[test]
    fn test_daily_order_is_preserved() {
        let snapshot = parse_snapshot(VALID_RESPONSE).expect("Failed to parse valid response");

        assert_eq!(snapshot.daily.len(), 2);
        assert_eq!(snapshot.daily[0].description, "light rain");
        assert_eq!(snapshot.daily[0].condition_code, Some(500));
        assert!((snapshot.daily[0].day_temp_f - 73.2).abs() < 0.01);
        assert_eq!(snapshot.daily[1].description, "clear sky");
        assert!(snapshot.daily[0].forecast_at < snapshot.daily[1].forecast_at);
    }

    #[test]
    fn test_alerts_are_decoded_in_order() {
        let snapshot = parse_snapshot(VALID_RESPONSE).expect("Failed to parse valid response");
        let alerts = snapshot.alerts.expect("Alerts present");

        assert_eq!(alerts.len(), 2);
        assert_eq!(alerts[0].event_name, "Marine Weather Statement");
        assert_eq!(alerts[1].event_name, "Small Craft Advisory");
        assert!(alerts[1].description_text.contains("Strait of Georgia"));
    }

    #[test]
    fn test_missing_alerts_key_is_none() {
        let raw = r#"{
            "current": {"dt": 1721077200, "temp": 60, "wind_speed": 3, "wind_deg": 90,
                        "weather": [{"id": 800, "description": "clear sky"}]},
            "daily": []
        }"#;

        let snapshot = parse_snapshot(raw).expect("Failed to parse");
        assert!(snapshot.alerts.is_none());
        assert!(snapshot.daily.is_empty());
        assert_eq!(snapshot.utc_offset.local_minus_utc(), 0);
    }

    #[test]
    fn test_non_numeric_condition_id_is_none() {
        let raw = r#"{
            "current": {"dt": 1721077200, "temp": 60, "wind_speed": 3, "wind_deg": 90,
                        "weather": [{"id": "cloudy", "description": "clouds"}]}
        }"#;

        let snapshot = parse_snapshot(raw).expect("Failed to parse");
        assert_eq!(snapshot.current.condition_code, None);
    }

    #[test]
    fn test_string_condition_id_is_parsed() {
        let raw = r#"{
            "current": {"dt": 1721077200, "temp": 60, "wind_speed": 3, "wind_deg": 90,
                        "weather": [{"id": "511", "description": "freezing rain"}]}
        }"#;

        let snapshot = parse_snapshot(raw).expect("Failed to parse");
        assert_eq!(snapshot.current.condition_code, Some(511));
    }

    #[test]
    fn test_empty_weather_array_is_missing_field() {
        let raw = r#"{
            "current": {"dt": 1721077200, "temp": 60, "wind_speed": 3, "wind_deg": 90, "weather": []}
        }"#;

        match parse_snapshot(raw) {
            Err(ParseError::MissingField(field)) => assert_eq!(field, "current.weather"),
            other => panic!("Expected MissingField error, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_current_is_json_error() {
        let raw = r#"{"daily": []}"#;
        assert!(matches!(parse_snapshot(raw), Err(ParseError::Json(_))));
    }

    #[test]
    fn test_provider_error_body_is_rejected() {
        let raw = r#"{"cod": 401, "message": "Invalid API key."}"#;
        assert!(matches!(parse_snapshot(raw), Err(ParseError::Json(_))));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(parse_snapshot("{ invalid json }"), Err(ParseError::Json(_))));
        assert!(matches!(parse_snapshot(""), Err(ParseError::Json(_))));
    }
}
