//! Integration tests for the session controller, driven end to end
//! against a mock weather API, an in-memory store, a stub locator, and
//! a recording sink.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use skycast_core::{GeoError, TemperatureUnit};
use skycast_session::geo::{Coordinates, Geolocator};
use skycast_session::{MemoryStore, Phase, RecentSearches, RenderSink, Session, Severity};
use skycast_weather::{CurrentView, ForecastDayView, ViewBuilder, WeatherClient};

// ---------------------------------------------------------------------
// Test doubles
// ---------------------------------------------------------------------

#[derive(Default)]
struct SinkState {
    statuses: Vec<(String, Severity)>,
    current: Option<CurrentView>,
    forecast: Vec<ForecastDayView>,
    history: Vec<String>,
    theme: Option<String>,
    units: Vec<TemperatureUnit>,
}

#[derive(Clone, Default)]
struct RecordingSink {
    state: Rc<RefCell<SinkState>>,
}

impl RecordingSink {
    fn last_status(&self) -> Option<(String, Severity)> {
        self.state.borrow().statuses.last().cloned()
    }

    fn current_temp(&self) -> Option<String> {
        self.state
            .borrow()
            .current
            .as_ref()
            .map(|v| v.formatted_temp.clone())
    }
}

impl RenderSink for RecordingSink {
    fn show_current(&mut self, view: &CurrentView) {
        self.state.borrow_mut().current = Some(view.clone());
    }

    fn show_forecast(&mut self, days: &[ForecastDayView]) {
        self.state.borrow_mut().forecast = days.to_vec();
    }

    fn show_status(&mut self, message: &str, severity: Severity) {
        self.state
            .borrow_mut()
            .statuses
            .push((message.to_string(), severity));
    }

    fn set_theme(&mut self, tag: &str) {
        self.state.borrow_mut().theme = Some(tag.to_string());
    }

    fn show_history(&mut self, cities: &[String]) {
        self.state.borrow_mut().history = cities.to_vec();
    }

    fn show_unit(&mut self, unit: TemperatureUnit) {
        self.state.borrow_mut().units.push(unit);
    }
}

#[derive(Clone)]
enum StubOutcome {
    Coords(Coordinates),
    Denied,
}

#[derive(Clone)]
struct StubLocator {
    available: bool,
    outcome: StubOutcome,
    calls: Arc<AtomicU32>,
}

impl StubLocator {
    fn at(lat: f64, lon: f64) -> Self {
        Self {
            available: true,
            outcome: StubOutcome::Coords(Coordinates {
                latitude: lat,
                longitude: lon,
            }),
            calls: Arc::new(AtomicU32::new(0)),
        }
    }

    fn denied() -> Self {
        Self {
            available: true,
            outcome: StubOutcome::Denied,
            calls: Arc::new(AtomicU32::new(0)),
        }
    }

    fn unavailable() -> Self {
        Self {
            available: false,
            outcome: StubOutcome::Denied,
            calls: Arc::new(AtomicU32::new(0)),
        }
    }
}

impl Geolocator for StubLocator {
    fn available(&self) -> bool {
        self.available
    }

    async fn locate(&self) -> Result<Coordinates, GeoError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.outcome {
            StubOutcome::Coords(coords) => Ok(coords),
            StubOutcome::Denied => Err(GeoError::Denied("permission denied".to_string())),
        }
    }
}

// ---------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------

fn current_body(name: &str) -> serde_json::Value {
    json!({
        "name": name,
        "sys": { "country": "IN" },
        "weather": [{ "main": "Clouds", "description": "scattered clouds", "icon": "03d" }],
        "main": { "temp": 300.15, "feels_like": 301.2, "humidity": 64 },
        "wind": { "speed": 3.6 }
    })
}

fn forecast_body() -> serde_json::Value {
    json!({
        "list": [
            {
                "dt": 1722859200,
                "main": { "temp": 298.0, "temp_min": 296.5, "temp_max": 299.4 },
                "weather": [{ "description": "light rain", "icon": "10d" }]
            }
        ]
    })
}

async fn mock_city(server: &MockServer, city: &str) {
    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("q", city))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_body(city)))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .and(query_param("q", city))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body()))
        .mount(server)
        .await;
}

async fn mock_coords(server: &MockServer, lat: &str, lon: &str) {
    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("lat", lat))
        .and(query_param("lon", lon))
        .respond_with(ResponseTemplate::new(200).set_body_json(current_body("Pune")))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .and(query_param("lat", lat))
        .and(query_param("lon", lon))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body()))
        .mount(server)
        .await;
}

fn session_against(
    server: &MockServer,
    locator: StubLocator,
    sink: RecordingSink,
) -> Session<MemoryStore, StubLocator, RecordingSink> {
    let client = WeatherClient::new(&server.uri(), "test-key").unwrap();
    let views = ViewBuilder::new("https://icons.example");
    let history = RecentSearches::load(MemoryStore::new());
    Session::new(
        client,
        views,
        history,
        locator,
        sink,
        TemperatureUnit::Celsius,
    )
}

// ---------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------

#[tokio::test]
async fn test_empty_search_never_contacts_network() {
    let server = MockServer::start().await;
    let sink = RecordingSink::default();
    let mut session = session_against(&server, StubLocator::at(0.0, 0.0), sink.clone());

    session.search("   ").await;

    assert_eq!(session.phase(), Phase::Idle);
    let (message, severity) = sink.last_status().unwrap();
    assert_eq!(message, "Enter a city name.");
    assert_eq!(severity, Severity::Error);
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_successful_search_renders_and_records() {
    let server = MockServer::start().await;
    mock_city(&server, "Pune").await;
    let sink = RecordingSink::default();
    let mut session = session_against(&server, StubLocator::at(0.0, 0.0), sink.clone());

    session.search("Pune").await;

    assert_eq!(session.phase(), Phase::Loaded);
    assert_eq!(session.recent(), ["Pune"]);
    assert_eq!(sink.current_temp().as_deref(), Some("27°C"));

    let state = sink.state.borrow();
    assert_eq!(state.theme.as_deref(), Some("clouds"));
    assert_eq!(state.history, ["Pune"]);
    assert_eq!(state.forecast.len(), 1);
    assert_eq!(
        state.statuses.last().map(|(m, _)| m.as_str()),
        Some("Done")
    );
}

#[tokio::test]
async fn test_unit_toggle_replays_city_query_and_round_trips() {
    let server = MockServer::start().await;
    mock_city(&server, "Pune").await;
    let sink = RecordingSink::default();
    let mut session = session_against(&server, StubLocator::at(0.0, 0.0), sink.clone());

    session.search("Pune").await;
    let original = sink.current_temp().unwrap();
    assert_eq!(original, "27°C");

    session.toggle_unit().await;
    assert_eq!(sink.current_temp().as_deref(), Some("81°F"));

    session.toggle_unit().await;
    assert_eq!(sink.current_temp().unwrap(), original);

    // Three full fetches: the search plus one replay per toggle
    assert_eq!(server.received_requests().await.unwrap().len(), 6);
}

#[tokio::test]
async fn test_unit_toggle_without_prior_fetch_only_flips_indicator() {
    let server = MockServer::start().await;
    let sink = RecordingSink::default();
    let mut session = session_against(&server, StubLocator::at(0.0, 0.0), sink.clone());

    session.toggle_unit().await;

    assert_eq!(session.unit(), TemperatureUnit::Fahrenheit);
    assert_eq!(
        sink.state.borrow().units.last().copied(),
        Some(TemperatureUnit::Fahrenheit)
    );
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_locate_fetches_without_touching_history() {
    let server = MockServer::start().await;
    mock_coords(&server, "18.52", "73.86").await;
    let sink = RecordingSink::default();
    let mut session = session_against(&server, StubLocator::at(18.52, 73.86), sink.clone());

    session.locate().await;

    assert_eq!(session.phase(), Phase::Loaded);
    assert!(session.recent().is_empty());
    assert_eq!(sink.current_temp().as_deref(), Some("27°C"));
}

#[tokio::test]
async fn test_unit_toggle_after_locate_reinvokes_geolocation() {
    let server = MockServer::start().await;
    mock_coords(&server, "18.52", "73.86").await;
    let sink = RecordingSink::default();
    let locator = StubLocator::at(18.52, 73.86);
    let calls = locator.calls.clone();
    let mut session = session_against(&server, locator, sink.clone());

    session.locate().await;
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    session.toggle_unit().await;

    // Coordinate replays go back through the capability, not a cache
    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert_eq!(sink.current_temp().as_deref(), Some("81°F"));
}

#[tokio::test]
async fn test_locate_unavailable_fails_without_requests() {
    let server = MockServer::start().await;
    let sink = RecordingSink::default();
    let mut session = session_against(&server, StubLocator::unavailable(), sink.clone());

    session.locate().await;

    assert_eq!(session.phase(), Phase::Failed);
    let (message, severity) = sink.last_status().unwrap();
    assert!(message.contains("not supported"));
    assert_eq!(severity, Severity::Error);
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_locate_denied_fails() {
    let server = MockServer::start().await;
    let sink = RecordingSink::default();
    let mut session = session_against(&server, StubLocator::denied(), sink.clone());

    session.locate().await;

    assert_eq!(session.phase(), Phase::Failed);
    let (message, _) = sink.last_status().unwrap();
    assert!(message.contains("permission denied"));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_failed_search_keeps_previous_render() {
    let server = MockServer::start().await;
    mock_city(&server, "Pune").await;
    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("q", "Nowhere"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "cod": "404",
            "message": "city not found"
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/forecast"))
        .and(query_param("q", "Nowhere"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "cod": "404",
            "message": "city not found"
        })))
        .mount(&server)
        .await;

    let sink = RecordingSink::default();
    let mut session = session_against(&server, StubLocator::at(0.0, 0.0), sink.clone());

    session.search("Pune").await;
    session.search("Nowhere").await;

    assert_eq!(session.phase(), Phase::Failed);

    // The failed lookup was never recorded and the screen kept Pune
    assert_eq!(session.recent(), ["Pune"]);
    let state = sink.state.borrow();
    assert_eq!(state.current.as_ref().unwrap().display_city, "Pune, IN");
    let (message, severity) = state.statuses.last().cloned().unwrap();
    assert_eq!(message, "city not found (Check city / API key)");
    assert_eq!(severity, Severity::Error);
}

#[tokio::test]
async fn test_validation_error_leaves_phase_unchanged() {
    let server = MockServer::start().await;
    mock_city(&server, "Pune").await;
    let sink = RecordingSink::default();
    let mut session = session_against(&server, StubLocator::at(0.0, 0.0), sink.clone());

    session.search("Pune").await;
    assert_eq!(session.phase(), Phase::Loaded);

    session.search("").await;
    assert_eq!(session.phase(), Phase::Loaded);
}

#[tokio::test]
async fn test_clear_history_rerenders_empty_chip_list() {
    let server = MockServer::start().await;
    mock_city(&server, "Pune").await;
    let sink = RecordingSink::default();
    let mut session = session_against(&server, StubLocator::at(0.0, 0.0), sink.clone());

    session.search("Pune").await;
    assert_eq!(sink.state.borrow().history, ["Pune"]);

    session.clear_history();
    assert!(session.recent().is_empty());
    assert!(sink.state.borrow().history.is_empty());
}

#[tokio::test]
async fn test_start_renders_persisted_history_and_hint() {
    let server = MockServer::start().await;
    let sink = RecordingSink::default();

    let client = WeatherClient::new(&server.uri(), "test-key").unwrap();
    let views = ViewBuilder::new("https://icons.example");
    let store = MemoryStore::with_entry("recent_cities", br#"["Mumbai","Pune"]"#);
    let history = RecentSearches::load(store);
    let mut session = Session::new(
        client,
        views,
        history,
        StubLocator::at(0.0, 0.0),
        sink.clone(),
        TemperatureUnit::Celsius,
    );

    session.start();

    let state = sink.state.borrow();
    assert_eq!(state.history, ["Mumbai", "Pune"]);
    assert_eq!(state.units.as_slice(), [TemperatureUnit::Celsius]);
    let (message, severity) = state.statuses.last().cloned().unwrap();
    assert!(message.starts_with("Tip:"));
    assert_eq!(severity, Severity::Info);
}
