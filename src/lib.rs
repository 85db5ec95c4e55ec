//! Weather Shortcodes Library
//!
//! Fetches OpenWeather one-call data through a single-file cache and renders
//! it as a forecast widget and a storm-warning banner. The binary and the
//! integration tests use this crate.

pub mod cache;
pub mod cli;
pub mod data;
pub mod render;
pub mod shortcode;
