//! Command-line interface parsing for the weather shortcodes
//!
//! This module handles parsing of CLI arguments using clap and resolves them,
//! together with their environment-variable fallbacks, into [`Settings`].

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use directories::ProjectDirs;
use thiserror::Error;

use crate::cache::DEFAULT_TTL_SECONDS;
use crate::data::weather::ONE_CALL_URL;
use crate::render::RenderOptions;
use crate::shortcode::ShortcodeAttributes;

/// File name of the cached provider document
pub const CACHE_FILE_NAME: &str = "api-cache.json";

/// Error types for CLI argument validation
#[derive(Debug, Error)]
pub enum CliError {
    /// No `--cache-file` given and the platform has no cache directory
    #[error("Could not determine a cache directory; pass --cache-file or set WEATHER_CACHE_FILE")]
    NoCacheDir,

    /// A zero timeout would fail every request
    #[error("Invalid timeout: must be at least 1 second")]
    InvalidTimeout,
}

/// Render the weather forecast widget and storm-warning banner as HTML
#[derive(Parser, Debug)]
#[command(name = "weather-shortcodes")]
#[command(about = "Cached OpenWeather forecast widget and storm-warning banner")]
#[command(version)]
pub struct Cli {
    /// Path of the cached one-call document
    #[arg(long, env = "WEATHER_CACHE_FILE", global = true, value_name = "PATH")]
    pub cache_file: Option<PathBuf>,

    /// Seconds before the cached document is refreshed
    #[arg(long, env = "WEATHER_CACHE_TTL", global = true, default_value_t = DEFAULT_TTL_SECONDS)]
    pub ttl: u64,

    /// Prefix for weather icon images
    #[arg(long, env = "WEATHER_ICON_BASE_URL", global = true, default_value = "icons/")]
    pub icon_base_url: String,

    /// One-call endpoint URL
    #[arg(long, env = "WEATHER_ENDPOINT", global = true, default_value = ONE_CALL_URL)]
    pub endpoint: String,

    /// Request timeout in seconds
    #[arg(long, env = "WEATHER_TIMEOUT", global = true, default_value_t = 30)]
    pub timeout: u64,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Print the forecast widget (refreshes the cache when stale)
    ///
    /// Examples:
    ///   weather-shortcodes forecast --lat 49.28 --lon -123.12 --appid KEY --locationname Vancouver
    Forecast {
        /// Latitude in decimal degrees
        #[arg(long, default_value = "", allow_hyphen_values = true)]
        lat: String,

        /// Longitude in decimal degrees
        #[arg(long, default_value = "", allow_hyphen_values = true)]
        lon: String,

        /// OpenWeather API key
        #[arg(long, env = "WEATHER_APPID", default_value = "", hide_env_values = true)]
        appid: String,

        /// Name shown in the widget heading
        #[arg(long, default_value = "")]
        locationname: String,
    },

    /// Print the storm-warning banner from the cached document
    Alert,

    /// Create an empty cache file if none exists
    InitCache,
}

impl Command {
    /// Shortcode attributes of a `forecast` invocation
    pub fn attributes(&self) -> Option<ShortcodeAttributes> {
        match self {
            Command::Forecast {
                lat,
                lon,
                appid,
                locationname,
            } => Some(ShortcodeAttributes {
                lat: lat.clone(),
                lon: lon.clone(),
                appid: appid.clone(),
                locationname: locationname.clone(),
            }),
            _ => None,
        }
    }
}

/// Resolved runtime configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub cache_file: PathBuf,
    pub ttl_seconds: u64,
    pub endpoint: String,
    pub timeout: Duration,
    pub render: RenderOptions,
}

impl Settings {
    /// Creates Settings from parsed CLI arguments.
    ///
    /// # Returns
    /// * `Ok(Settings)` with every value resolved
    /// * `Err(CliError)` if no cache path can be found or the timeout is zero
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let cache_file = match &cli.cache_file {
            Some(path) => path.clone(),
            None => default_cache_file().ok_or(CliError::NoCacheDir)?,
        };

        if cli.timeout == 0 {
            return Err(CliError::InvalidTimeout);
        }

        Ok(Settings {
            cache_file,
            ttl_seconds: cli.ttl,
            endpoint: cli.endpoint.clone(),
            timeout: Duration::from_secs(cli.timeout),
            render: RenderOptions {
                icon_base_url: cli.icon_base_url.clone(),
                refresh_seconds: cli.ttl,
            },
        })
    }

    /// Log the resolved settings at debug level
    pub fn log_settings(&self) {
        tracing::debug!(
            cache_file = %self.cache_file.display(),
            ttl_seconds = self.ttl_seconds,
            endpoint = %self.endpoint,
            timeout_secs = self.timeout.as_secs(),
            icon_base_url = %self.render.icon_base_url,
            "settings resolved"
        );
    }
}

/// `api-cache.json` in the XDG cache directory (`~/.cache/weather-shortcodes/` on Linux)
pub fn default_cache_file() -> Option<PathBuf> {
    let project_dirs = ProjectDirs::from("", "", "weather-shortcodes")?;
    Some(project_dirs.cache_dir().join(CACHE_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_forecast_with_negative_longitude() {
        let cli = Cli::parse_from([
            "weather-shortcodes",
            "forecast",
            "--lat",
            "49.28",
            "--lon",
            "-123.12",
            "--appid",
            "key",
            "--locationname",
            "Vancouver",
        ]);

        let attributes = cli.command.attributes().expect("Forecast command");
        assert_eq!(attributes.lat, "49.28");
        assert_eq!(attributes.lon, "-123.12");
        assert_eq!(attributes.locationname, "Vancouver");
        assert!(attributes.forecast_request().is_some());
    }

    #[test]
    fn test_cli_parse_forecast_defaults_to_empty_attributes() {
        let cli = Cli::parse_from(["weather-shortcodes", "forecast", "--lat", "49.28"]);

        let attributes = cli.command.attributes().expect("Forecast command");
        assert_eq!(attributes.lon, "");
        assert_eq!(attributes.locationname, "");
        assert!(attributes.forecast_request().is_none());
    }

    #[test]
    fn test_cli_parse_alert() {
        let cli = Cli::parse_from(["weather-shortcodes", "alert"]);
        assert_eq!(cli.command, Command::Alert);
        assert!(cli.command.attributes().is_none());
    }

    #[test]
    fn test_settings_from_explicit_arguments() {
        let cli = Cli::parse_from([
            "weather-shortcodes",
            "alert",
            "--cache-file",
            "/tmp/weather/api-cache.json",
            "--ttl",
            "180",
            "--icon-base-url",
            "/static/icons/",
            "--timeout",
            "5",
        ]);

        let settings = Settings::from_cli(&cli).expect("Settings should resolve");

        assert_eq!(settings.cache_file, PathBuf::from("/tmp/weather/api-cache.json"));
        assert_eq!(settings.ttl_seconds, 180);
        assert_eq!(settings.timeout, Duration::from_secs(5));
        assert_eq!(settings.render.icon_base_url, "/static/icons/");
        assert_eq!(settings.render.refresh_seconds, 180);
    }

    #[test]
    fn test_settings_reject_zero_timeout() {
        let cli = Cli::parse_from([
            "weather-shortcodes",
            "alert",
            "--cache-file",
            "cache.json",
            "--timeout",
            "0",
        ]);

        let result = Settings::from_cli(&cli);

        assert!(matches!(result, Err(CliError::InvalidTimeout)));
    }

    #[test]
    fn test_default_cache_file_is_xdg_compliant() {
        if let Some(path) = default_cache_file() {
            let path_str = path.to_string_lossy();
            assert!(path_str.contains("weather-shortcodes"), "Cache path should contain project name");
            assert!(path_str.ends_with(CACHE_FILE_NAME));
        }
        // Test passes if no home directory is available (e.g., in CI)
    }
}
