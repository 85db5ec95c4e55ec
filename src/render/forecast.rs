//! Forecast widget markup
//!
//! Renders the current conditions header followed by one block per daily
//! forecast, in provider order, and a closing "updated" line.

use chrono::{DateTime, FixedOffset, Utc};

use super::html::escape;
use super::RenderOptions;
use crate::data::{compass_direction, icon_code, WeatherSnapshot, CLEAR_ICON};

/// Build the forecast widget for `location_name`
pub fn render_forecast(location_name: &str, snapshot: &WeatherSnapshot, options: &RenderOptions) -> String {
    let current = &snapshot.current;
    let mut html = String::from("<div class=\"peter-weather-widget\">");

    html.push_str(&format!(
        "<h3 class=\"weather-title\">Current weather at {}</h3>",
        escape(location_name)
    ));
    html.push_str(&format!(
        "<p class=\"weather-period\">{}</p>",
        escape(&options.refresh_caption())
    ));
    html.push_str(&icon_img(options, current.condition_code, &current.description, "weather-icon current"));
    html.push_str("<div>");
    push_conditions(&mut html, current.temp_f, &current.description, current.wind_speed_mph, current.wind_degrees);
    html.push_str("</div><hr>");

    for day in &snapshot.daily {
        html.push_str("<div class=\"day\">");
        html.push_str(&icon_img(options, day.condition_code, &day.description, "weather-icon"));
        html.push_str(&format!(
            "<h5 class=\"day-heading\">{} forecast</h5>",
            escape(&weekday(day.forecast_at, snapshot.utc_offset))
        ));
        push_conditions(&mut html, day.day_temp_f, &day.description, day.wind_speed_mph, day.wind_degrees);
        html.push_str("<hr></div>");
    }

    html.push_str(&format!(
        "<p class=\"weather-update\">updated {}</p>",
        escape(&updated_at(current.observed_at, snapshot.utc_offset))
    ));
    html.push_str("</div>");
    html
}

fn icon_img(options: &RenderOptions, code: Option<i64>, description: &str, class: &str) -> String {
    let icon = code.map_or(CLEAR_ICON, icon_code);
    format!(
        "<img src=\"{}{}.png\" class=\"{}\" alt=\"{}\" />",
        escape(&options.icon_base_url),
        escape(icon),
        class,
        escape(description)
    )
}

/// TEMP, WEATHER and WIND rows
fn push_conditions(html: &mut String, temp_f: f64, description: &str, wind_mph: f64, wind_degrees: f64) {
    flex_row(html, "TEMP", &format!("{}&deg;F", whole(temp_f)));
    flex_row(html, "WEATHER", &escape(description));
    flex_row(
        html,
        "WIND",
        &format!("{} MPH, {}", whole(wind_mph), escape(compass_direction(wind_degrees))),
    );
}

/// `value` must already be escaped
fn flex_row(html: &mut String, header: &str, value: &str) {
    html.push_str(&format!(
        "<div class=\"flex-table\"><span class=\"flex-row header\">{header}</span>\
         <span class=\"flex-row day\">{value}</span></div>"
    ));
}

fn whole(value: f64) -> i64 {
    value.round() as i64
}

/// English long weekday name of the local calendar date
fn weekday(at: DateTime<Utc>, offset: FixedOffset) -> String {
    at.with_timezone(&offset).format("%A").to_string()
}

/// e.g. "15 July 2024 2:00 PM"
fn updated_at(at: DateTime<Utc>, offset: FixedOffset) -> String {
    at.with_timezone(&offset).format("%-d %B %Y %-I:%M %p").to_string()
}
