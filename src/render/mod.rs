//! HTML fragments built from a weather snapshot
//!
//! Two independent fragments: the forecast widget and the storm-warning
//! banner. Both are pure functions of the snapshot; all interpolated
//! provider text is escaped.

pub mod alert;
pub mod forecast;
pub mod html;

pub use alert::render_alert;
pub use forecast::render_forecast;

use crate::cache::DEFAULT_TTL_SECONDS;

/// Presentation settings for the forecast widget
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    /// Prefix for icon images; the icon id and `.png` are appended
    pub icon_base_url: String,
    /// Cache TTL shown in the "updated every ..." caption
    pub refresh_seconds: u64,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            icon_base_url: "icons/".to_string(),
            refresh_seconds: DEFAULT_TTL_SECONDS,
        }
    }
}

impl RenderOptions {
    /// Caption describing how often the widget refreshes
    pub fn refresh_caption(&self) -> String {
        let (amount, unit) = if self.refresh_seconds >= 60 && self.refresh_seconds % 60 == 0 {
            (self.refresh_seconds / 60, "minute")
        } else {
            (self.refresh_seconds, "second")
        };
        let plural = if amount == 1 { "" } else { "s" };
        format!("updated every {amount} {unit}{plural}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refresh_caption() {
        assert_eq!(RenderOptions::default().refresh_caption(), "updated every 5 minutes");

        let caption = |refresh_seconds| {
            RenderOptions {
                refresh_seconds,
                ..RenderOptions::default()
            }
            .refresh_caption()
        };
        assert_eq!(caption(180), "updated every 3 minutes");
        assert_eq!(caption(60), "updated every 1 minute");
        assert_eq!(caption(90), "updated every 90 seconds");
    }
}
