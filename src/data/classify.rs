//! Classifiers turning raw provider numbers into display values
//!
//! Both classifiers are ordered first-match-wins rules. Out-of-range input is
//! not wrapped or clamped: it falls through the same comparisons as any other
//! value.

/// Icon shown when a condition code is unavailable
pub const CLEAR_ICON: &str = "01";

/// Upper edges of the 16 compass sectors, each 22.5° wide and centred on
/// its bearing. Comparison is `degrees < edge`.
const COMPASS_SECTORS: [(f64, &str); 16] = [
    (11.25, "N"),
    (33.75, "NNE"),
    (56.25, "NE"),
    (78.75, "ENE"),
    (101.25, "E"),
    (123.75, "ESE"),
    (146.25, "SE"),
    (168.75, "SSE"),
    (191.25, "S"),
    (213.75, "SSW"),
    (236.25, "SW"),
    (258.75, "WSW"),
    (281.25, "W"),
    (303.75, "WNW"),
    (326.25, "NW"),
    (348.75, "NNW"),
];

/// Map a wind bearing in degrees to a 16-point compass label
///
/// Values at or above 348.75 wrap to "N". NaN and infinities yield an
/// empty string.
pub fn compass_direction(degrees: f64) -> &'static str {
    if !degrees.is_finite() {
        return "";
    }

    COMPASS_SECTORS
        .iter()
        .find(|&&(edge, _)| degrees < edge)
        .map_or("N", |&(_, label)| label)
}

/// Map an OpenWeather condition code to a two-digit icon identifier
///
/// Condition code groups:
/// - 2xx: Thunderstorm
/// - 3xx: Drizzle
/// - 5xx: Rain (511 is freezing rain and gets the snow icon)
/// - 6xx: Snow
/// - 7xx: Atmosphere (mist, smoke, haze, fog)
/// - 800: Clear
/// - 801-802: Few/scattered clouds
/// - 803+: Broken/overcast clouds
pub fn icon_code(code: i64) -> &'static str {
    match code {
        511 => "13",
        800 => CLEAR_ICON,
        c if c < 299 => "11",
        c if c < 522 => "09",
        c if c < 599 => "10",
        c if c < 699 => "13",
        c if c < 799 => "50",
        c if c < 803 => "02",
        _ => "05",
    }
}
