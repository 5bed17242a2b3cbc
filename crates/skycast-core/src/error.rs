//! Centralized error types for the skycast dashboard.
//!
//! This module provides a typed error hierarchy that:
//! - Enables precise error handling throughout the codebase
//! - Provides user-friendly messages suitable for status display
//! - Preserves full error context for debugging/logging

use thiserror::Error;

/// Errors raised by the weather API client.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// Non-success HTTP status from the weather API. The message is taken
    /// from the response body's `message` field when one can be parsed,
    /// otherwise it is a generic `API error (<status>)` string.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// Connectivity failure, timeout, or an unreadable response body.
    #[error("Network error: {0}")]
    Transport(String),
}

/// Errors raised by the geolocation capability.
#[derive(Debug, Error)]
pub enum GeoError {
    #[error("Geolocation is not supported on this system")]
    Unavailable,

    #[error("Location permission denied / error: {0}")]
    Denied(String),
}

/// Top-level session error type.
///
/// Every failure a user action can produce is convertible to this type.
/// Use `user_message()` to get text suitable for the status display.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Search input was empty after trimming. Handled locally; the
    /// network is never contacted.
    #[error("Enter a city name.")]
    EmptyQuery,

    #[error(transparent)]
    Weather(#[from] WeatherError),

    #[error(transparent)]
    Geolocation(#[from] GeoError),
}

impl SessionError {
    /// Returns a message suitable for display in the status area.
    pub fn user_message(&self) -> String {
        match self {
            SessionError::EmptyQuery => "Enter a city name.".to_string(),
            SessionError::Weather(e) => e.to_string(),
            SessionError::Geolocation(e) => e.to_string(),
        }
    }

    /// True for failures the user can fix by correcting their input.
    pub fn is_validation(&self) -> bool {
        matches!(self, SessionError::EmptyQuery)
    }
}

/// Extension trait for converting reqwest errors to our error types.
pub trait ReqwestErrorExt {
    fn into_weather_error(self) -> WeatherError;
}

impl ReqwestErrorExt for reqwest::Error {
    fn into_weather_error(self) -> WeatherError {
        if self.is_timeout() {
            WeatherError::Transport("request timed out".to_string())
        } else if self.is_connect() {
            WeatherError::Transport(format!("connection failed: {}", self))
        } else {
            WeatherError::Transport(self.to_string())
        }
    }
}
