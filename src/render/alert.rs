//! Storm-warning banner markup
//!
//! Only the first alert whose event name mentions a marine or storm hazard is
//! shown. Providers often send the same warning more than once, so later
//! matches are skipped even if they are more severe.

use super::html::{bullet_list, escape};
use crate::data::{Alert, WeatherSnapshot};

/// Case-sensitive fragments of event names that get a banner
pub const WARNING_EVENTS: [&str; 6] = [
    "Small Craft",
    "Gale",
    "Storm",
    "Hurricane",
    "Dense Fog",
    "Thunderstorm",
];

/// Whether an alert's event name calls for a banner
pub fn is_warning(alert: &Alert) -> bool {
    WARNING_EVENTS
        .iter()
        .any(|fragment| alert.event_name.contains(fragment))
}

/// Banner for the first matching alert, or an empty string
pub fn render_alert(snapshot: &WeatherSnapshot) -> String {
    let Some(alerts) = &snapshot.alerts else {
        return String::new();
    };

    match alerts.iter().find(|alert| is_warning(alert)) {
        Some(alert) => {
            tracing::debug!(event = %alert.event_name, "rendering weather warning");
            format!(
                "<article class=\"post-entry warning\">\
                 <h2 class=\"post-title warning\">{}</h2>{}</article>",
                escape(&alert.event_name),
                bullet_list(&alert.description_text)
            )
        }
        None => String::new(),
    }
}
