//! Session orchestration.
//!
//! One `Session` owns the small amount of mutable dashboard state (unit,
//! last query mode, recent searches) and runs the user actions against
//! the injected capabilities. Nothing is ever cancelled: a fetch always
//! runs to completion and renders its outcome, and a later action simply
//! overwrites the sink. Surfaces that fire actions concurrently get
//! last-to-render-wins behavior.

use skycast_core::{GeoError, SessionError, TemperatureUnit, WeatherError};
use skycast_weather::{QueryMode, ViewBuilder, WeatherClient};

use crate::geo::Geolocator;
use crate::history::RecentSearches;
use crate::render::{RenderSink, Severity};
use crate::storage::KeyValueStore;

/// Where the session currently stands with respect to fetched data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Nothing fetched yet; only the recent-search list is rendered.
    Idle,
    /// A search or locate action is in flight.
    Loading,
    /// The last fetch succeeded and is on screen.
    Loaded,
    /// The last fetch failed; earlier rendered data stays untouched.
    Failed,
}

pub struct Session<S: KeyValueStore, G: Geolocator, R: RenderSink> {
    client: WeatherClient,
    views: ViewBuilder,
    history: RecentSearches<S>,
    geo: G,
    sink: R,
    unit: TemperatureUnit,
    last_query: Option<QueryMode>,
    phase: Phase,
}

impl<S: KeyValueStore, G: Geolocator, R: RenderSink> Session<S, G, R> {
    pub fn new(
        client: WeatherClient,
        views: ViewBuilder,
        history: RecentSearches<S>,
        geo: G,
        sink: R,
        unit: TemperatureUnit,
    ) -> Self {
        Self {
            client,
            views,
            history,
            geo,
            sink,
            unit,
            last_query: None,
            phase: Phase::Idle,
        }
    }

    /// Initial render: unit indicator, persisted history, and a hint.
    pub fn start(&mut self) {
        self.sink.show_unit(self.unit);
        self.sink.show_history(self.history.list());
        self.sink
            .show_status("Tip: search for a city to get started", Severity::Info);
    }

    /// Search by city name. Empty input is rejected locally without
    /// touching the network; successful lookups are recorded in the
    /// recent-search list.
    pub async fn search(&mut self, city_text: &str) {
        let city = city_text.trim();
        if city.is_empty() {
            self.sink
                .show_status(&SessionError::EmptyQuery.user_message(), Severity::Error);
            return;
        }
        let city = city.to_string();

        self.phase = Phase::Loading;
        self.sink.show_status("Loading...", Severity::Info);

        match self.fetch_and_render(&QueryMode::City(city.clone())).await {
            Ok(()) => {
                self.history.record(&city);
                self.sink.show_history(self.history.list());
                self.last_query = Some(QueryMode::City(city));
                self.phase = Phase::Loaded;
                self.sink.show_status("Done", Severity::Info);
            }
            Err(e) => {
                tracing::warn!("city search failed: {}", e);
                self.phase = Phase::Failed;
                let message = format!(
                    "{} (Check city / API key)",
                    SessionError::from(e).user_message()
                );
                self.sink.show_status(&message, Severity::Error);
            }
        }
    }

    /// Fetch for the current position. Coordinate lookups never touch
    /// the recent-search list.
    pub async fn locate(&mut self) {
        if !self.geo.available() {
            self.phase = Phase::Failed;
            self.sink.show_status(
                &SessionError::from(GeoError::Unavailable).user_message(),
                Severity::Error,
            );
            return;
        }

        self.phase = Phase::Loading;
        self.sink
            .show_status("Getting your location...", Severity::Info);

        let coords = match self.geo.locate().await {
            Ok(coords) => coords,
            Err(e) => {
                tracing::warn!("geolocation failed: {}", e);
                self.phase = Phase::Failed;
                self.sink
                    .show_status(&SessionError::from(e).user_message(), Severity::Error);
                return;
            }
        };

        let mode = QueryMode::Coords {
            lat: coords.latitude,
            lon: coords.longitude,
        };
        match self.fetch_and_render(&mode).await {
            Ok(()) => {
                self.last_query = Some(mode);
                self.phase = Phase::Loaded;
                self.sink.show_status("Done", Severity::Info);
            }
            Err(e) => {
                tracing::warn!("coordinate fetch failed: {}", e);
                self.phase = Phase::Failed;
                self.sink
                    .show_status(&SessionError::from(e).user_message(), Severity::Error);
            }
        }
    }

    /// Flip the temperature unit and replay the last successful lookup,
    /// if any. City lookups re-issue a full fetch; coordinate lookups
    /// re-invoke geolocation rather than reusing a stale position.
    pub async fn toggle_unit(&mut self) {
        self.unit = self.unit.toggle();
        self.sink.show_unit(self.unit);

        match self.last_query.clone() {
            Some(QueryMode::City(city)) => self.search(&city).await,
            Some(QueryMode::Coords { .. }) => self.locate().await,
            None => {}
        }
    }

    /// Empty the recent-search list, independent of the current phase.
    pub fn clear_history(&mut self) {
        self.history.clear();
        self.sink.show_history(self.history.list());
    }

    /// Recent searches, newest first, for chip rendering by the surface.
    pub fn recent(&self) -> &[String] {
        self.history.list()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn unit(&self) -> TemperatureUnit {
        self.unit
    }

    async fn fetch_and_render(&mut self, mode: &QueryMode) -> Result<(), WeatherError> {
        let (current, forecast) = self.client.fetch(mode).await?;

        let current_view = self.views.build_current(&current, self.unit);
        let days = self.views.build_forecast_days(&forecast, self.unit);

        self.sink.set_theme(&current_view.theme);
        self.sink.show_current(&current_view);
        self.sink.show_forecast(&days);
        Ok(())
    }
}
