//! Temperature conversion and display formatting.

use skycast_core::TemperatureUnit;

pub fn kelvin_to_celsius(kelvin: f64) -> i32 {
    (kelvin - 273.15).round() as i32
}

pub fn celsius_to_fahrenheit(celsius: i32) -> i32 {
    (f64::from(celsius) * 9.0 / 5.0 + 32.0).round() as i32
}

/// Format a Kelvin reading for display in the given unit.
///
/// Fahrenheit is derived from the already-rounded Celsius value, not
/// from Kelvin directly. The two-stage rounding is observable (it can
/// differ from a fused conversion by one degree) and is kept as-is.
pub fn format_kelvin(kelvin: f64, unit: TemperatureUnit) -> String {
    let celsius = kelvin_to_celsius(kelvin);
    match unit {
        TemperatureUnit::Celsius => format!("{}°C", celsius),
        TemperatureUnit::Fahrenheit => format!("{}°F", celsius_to_fahrenheit(celsius)),
    }
}
