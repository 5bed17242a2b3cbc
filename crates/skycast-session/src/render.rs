//! Rendering sink abstraction.
//!
//! The session controller produces fully formatted view models and
//! pushes them here; the concrete surface (terminal, GUI, test double)
//! is the embedder's concern. Each call replaces the previously
//! rendered content for that area.

use skycast_core::TemperatureUnit;
use skycast_weather::{CurrentView, ForecastDayView};

/// Visual weight of a status message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Error,
}

pub trait RenderSink {
    fn show_current(&mut self, view: &CurrentView);

    fn show_forecast(&mut self, days: &[ForecastDayView]);

    fn show_status(&mut self, message: &str, severity: Severity);

    /// Background/category tag derived from the current conditions.
    fn set_theme(&mut self, tag: &str);

    /// Recent-search chips, newest first. Selecting a chip is expected
    /// to re-trigger a city search for it.
    fn show_history(&mut self, cities: &[String]);

    /// Unit indicator, updated on every toggle.
    fn show_unit(&mut self, unit: TemperatureUnit);
}
