//! Weather data pipeline for skycast
//!
//! Fetches current conditions and the 5-day/3-hour forecast from an
//! OpenWeatherMap-style API and reduces them to render-ready view
//! models: one representative forecast sample per day, temperatures
//! formatted in the session's unit.

pub mod client;
pub mod sampler;
pub mod types;
pub mod units;
pub mod view;

pub use client::WeatherClient;
pub use types::{CurrentConditions, ForecastResponse, ForecastSample, QueryMode};
pub use view::{CurrentView, ForecastDayView, ViewBuilder};
