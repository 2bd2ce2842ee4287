//! JMA weather forecasts for Tenki
//!
//! Fetches the area directory and per-office forecast documents from the
//! Japan Meteorological Agency, picks out one area's forecast and keeps it in
//! a local SQLite table.

pub mod classify;
pub mod client;
pub mod error;
pub mod matcher;
pub mod pipeline;
pub mod rows;
pub mod store;
pub mod types;

pub use classify::weather_code;
pub use client::JmaClient;
pub use error::WeatherError;
pub use matcher::find_matching_area;
pub use pipeline::{refresh_forecast, RefreshOutcome};
pub use rows::{build_rows, forecast_date};
pub use store::ForecastStore;
pub use types::*;
