//! View-model construction.
//!
//! Raw API responses are turned into fully formatted, unit-resolved
//! structures here; the rendering sink never sees a raw field. Unit
//! toggles re-run these builders against the most recent raw data.

use chrono::{DateTime, Utc};

use skycast_core::TemperatureUnit;

use crate::sampler;
use crate::types::{Condition, CurrentConditions, ForecastResponse};
use crate::units;

/// Render-ready current conditions.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentView {
    pub display_city: String,
    /// Empty when the response carried no icon code.
    pub icon_url: String,
    pub formatted_temp: String,
    pub formatted_feels_like: String,
    pub humidity_percent: u32,
    pub wind_speed: i32,
    pub condition_main: String,
    pub condition_description: String,
    /// Lowercase background/category tag for the rendering sink.
    pub theme: String,
}

/// Render-ready forecast day card.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastDayView {
    pub date_label: String,
    pub icon_url: String,
    pub formatted_temp: String,
    pub formatted_min: String,
    pub formatted_max: String,
    pub condition_description: String,
}

/// Builds view models from raw responses.
#[derive(Debug, Clone)]
pub struct ViewBuilder {
    icon_base: String,
}

impl ViewBuilder {
    pub fn new(icon_base: impl Into<String>) -> Self {
        let icon_base = icon_base.into();
        Self {
            icon_base: icon_base.trim_end_matches('/').to_string(),
        }
    }

    pub fn build_current(&self, raw: &CurrentConditions, unit: TemperatureUnit) -> CurrentView {
        let condition = raw.weather.first();
        let main = condition_main(condition);
        let description = condition_description(condition);

        let display_city = match raw.sys.country.as_deref() {
            Some(country) if !country.trim().is_empty() => {
                format!("{}, {}", raw.name.trim(), country.trim())
            }
            _ => raw.name.trim().to_string(),
        };

        let theme = if main.is_empty() {
            "clear".to_string()
        } else {
            main.to_lowercase()
        };

        CurrentView {
            display_city,
            icon_url: self.icon_url(condition, "@2x"),
            formatted_temp: units::format_kelvin(raw.main.temp, unit),
            formatted_feels_like: units::format_kelvin(raw.main.feels_like, unit),
            humidity_percent: raw.main.humidity.round() as u32,
            wind_speed: raw.wind.speed.round() as i32,
            condition_main: main,
            condition_description: description,
            theme,
        }
    }

    pub fn build_forecast_days(
        &self,
        raw: &ForecastResponse,
        unit: TemperatureUnit,
    ) -> Vec<ForecastDayView> {
        sampler::daily_representatives(&raw.list)
            .into_iter()
            .map(|sample| {
                let condition = sample.weather.first();
                ForecastDayView {
                    date_label: date_label(sample.dt),
                    icon_url: self.icon_url(condition, ""),
                    formatted_temp: units::format_kelvin(sample.main.temp, unit),
                    formatted_min: units::format_kelvin(sample.main.temp_min, unit),
                    formatted_max: units::format_kelvin(sample.main.temp_max, unit),
                    condition_description: condition_description(condition),
                }
            })
            .collect()
    }

    /// The current card uses the `@2x` asset variant, forecast cards the
    /// plain one. Empty icon codes yield an empty URL.
    fn icon_url(&self, condition: Option<&Condition>, variant: &str) -> String {
        match condition {
            Some(c) if !c.icon.is_empty() => {
                format!("{}/{}{}.png", self.icon_base, c.icon, variant)
            }
            _ => String::new(),
        }
    }
}

fn condition_main(condition: Option<&Condition>) -> String {
    match condition {
        Some(c) if !c.main.is_empty() => c.main.clone(),
        _ => "Clear".to_string(),
    }
}

fn condition_description(condition: Option<&Condition>) -> String {
    match condition {
        Some(c) if !c.description.is_empty() => c.description.clone(),
        _ => "—".to_string(),
    }
}

/// Short day label, e.g. "Mon Aug 04", from the sample's UTC timestamp.
fn date_label(epoch_seconds: i64) -> String {
    DateTime::<Utc>::from_timestamp(epoch_seconds, 0)
        .map(|when| when.format("%a %b %d").to_string())
        .unwrap_or_default()
}
