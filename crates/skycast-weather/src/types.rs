use serde::Deserialize;

/// How the last successful lookup was issued. Replayed when the
/// temperature unit toggles without a fresh search being available.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryMode {
    City(String),
    Coords { lat: f64, lon: f64 },
}

/// One `weather[i]` condition entry, shared by both endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Condition {
    #[serde(default)]
    pub main: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
}

/// Current-conditions response. Temperatures are Kelvin; the API is
/// queried without a units parameter.
#[derive(Debug, Clone, Deserialize)]
pub struct CurrentConditions {
    pub name: String,
    #[serde(default)]
    pub sys: SysInfo,
    #[serde(default)]
    pub weather: Vec<Condition>,
    pub main: MainReadings,
    pub wind: Wind,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SysInfo {
    #[serde(default)]
    pub country: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MainReadings {
    pub temp: f64,
    pub feels_like: f64,
    pub humidity: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Wind {
    pub speed: f64,
}

/// 5-day/3-hour forecast response.
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastResponse {
    #[serde(default)]
    pub list: Vec<ForecastSample>,
}

/// One 3-hour forecast step, kept verbatim from the response list.
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastSample {
    /// Epoch seconds (UTC)
    pub dt: i64,
    pub main: ForecastReadings,
    #[serde(default)]
    pub weather: Vec<Condition>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ForecastReadings {
    pub temp: f64,
    pub temp_min: f64,
    pub temp_max: f64,
}
