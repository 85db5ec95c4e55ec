//! Weather shortcodes - cached forecast widget and storm-warning banner
//!
//! Prints one HTML fragment to stdout per invocation, so a page generator can
//! embed it. Logs go to stderr.
//!
//! # Environment Variables
//! - `WEATHER_LOG_LEVEL` (optional) - log verbosity when `RUST_LOG` is unset (default: `warn`)
//! - `FORCE_COLOR` (optional) - force coloured logs on (`1|true|yes`) or off (`0|false|no`)
//! - `WEATHER_CACHE_FILE`, `WEATHER_CACHE_TTL`, `WEATHER_ICON_BASE_URL`,
//!   `WEATHER_ENDPOINT`, `WEATHER_TIMEOUT`, `WEATHER_APPID` - see `--help`

use std::env;
use std::io::IsTerminal;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::filter::EnvFilter;

use weather_shortcodes::cache::{FileStore, WeatherCache};
use weather_shortcodes::cli::{Cli, Command, Settings};
use weather_shortcodes::data::WeatherClient;
use weather_shortcodes::shortcode::Shortcodes;

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::from_cli(&cli)?;
    settings.log_settings();

    let store = FileStore::new(&settings.cache_file);

    if cli.command == Command::InitCache {
        if store.provision()? {
            eprintln!("Created cache file {}", store.path().display());
        } else {
            eprintln!("Cache file already exists: {}", store.path().display());
        }
        return Ok(());
    }

    let client = WeatherClient::with_timeout(settings.timeout)?.with_base_url(&settings.endpoint);
    let cache = WeatherCache::with_ttl(store, client, settings.ttl_seconds);
    let shortcodes = Shortcodes::new(cache, settings.render.clone());

    let html = match cli.command.attributes() {
        Some(attributes) => shortcodes.render_forecast(&attributes).await?,
        None => shortcodes.render_alert(),
    };
    println!("{html}");

    Ok(())
}

/// Initialize the global tracing subscriber, writing to stderr.
///
/// - Colour output follows `FORCE_COLOR`, otherwise TTY detection on stderr
/// - `RUST_LOG` wins when set, otherwise `WEATHER_LOG_LEVEL` (default `warn`)
fn init_tracing() {
    let use_color = match env::var("FORCE_COLOR").as_deref() {
        Ok("1") | Ok("true") | Ok("yes") => true,
        Ok("0") | Ok("false") | Ok("no") => false,
        _ => std::io::stderr().is_terminal(),
    };

    let env_filter = if env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        let level = match env::var("WEATHER_LOG_LEVEL").ok().as_deref() {
            Some("trace") => "trace",
            Some("debug") => "debug",
            Some("info") => "info",
            Some("error") => "error",
            _ => "warn",
        };
        EnvFilter::new(format!("{level},hyper=warn,reqwest=warn"))
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_env_filter(env_filter)
        .with_ansi(use_color)
        .compact()
        .init();
}
