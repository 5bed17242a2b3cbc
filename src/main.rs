use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};

use skycast_core::{Config, TemperatureUnit};
use skycast_session::{
    FileStore, IpLocator, RecentSearches, RenderSink, Session, Severity,
};
use skycast_weather::{CurrentView, ForecastDayView, ViewBuilder, WeatherClient};

/// Minimal terminal rendering surface. Each call replaces the relevant
/// area by printing it again.
struct ConsoleSink;

impl RenderSink for ConsoleSink {
    fn show_current(&mut self, view: &CurrentView) {
        println!();
        println!("  {}  {}", view.formatted_temp, view.display_city);
        println!("  {} ({})", view.condition_main, view.condition_description);
        println!(
            "  Feels like: {}  Humidity: {}%  Wind: {} m/s",
            view.formatted_feels_like, view.humidity_percent, view.wind_speed
        );
    }

    fn show_forecast(&mut self, days: &[ForecastDayView]) {
        for day in days {
            println!(
                "  {}  {}  {} (min {} / max {})",
                day.date_label,
                day.formatted_temp,
                day.condition_description,
                day.formatted_min,
                day.formatted_max
            );
        }
        println!();
    }

    fn show_status(&mut self, message: &str, severity: Severity) {
        match severity {
            Severity::Info => println!("· {}", message),
            Severity::Error => eprintln!("! {}", message),
        }
    }

    fn set_theme(&mut self, _tag: &str) {
        // No theming on a plain terminal
    }

    fn show_history(&mut self, cities: &[String]) {
        if cities.is_empty() {
            println!("· No recent searches yet.");
        } else {
            println!("· Recent: {}", cities.join(", "));
        }
    }

    fn show_unit(&mut self, unit: TemperatureUnit) {
        println!("· Unit: {}", unit.label());
    }
}

fn print_help() {
    println!("Commands:");
    println!("  <city name>   search by city (plain Enter submits)");
    println!("  :locate       use your current location");
    println!("  :unit         toggle °C/°F and refresh");
    println!("  :recent       list recent searches");
    println!("  :clear        clear search history");
    println!("  :quit         exit");
}

#[tokio::main]
async fn main() -> Result<()> {
    skycast_core::init()?;

    let (config, _validation) = Config::load_validated()?;
    tracing::info!("skycast started");

    let client = WeatherClient::new(&config.api.base_url, config.api.api_key.clone())?;
    let views = ViewBuilder::new(config.api.icon_base_url.clone());
    let history = RecentSearches::load(FileStore::new(config.config_dir.join("state")));
    let locator = IpLocator::new()?;

    let mut session = Session::new(
        client,
        views,
        history,
        locator,
        ConsoleSink,
        config.display.default_unit,
    );

    println!("skycast - weather dashboard");
    print_help();
    session.start();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match line.trim() {
            ":quit" | ":q" => break,
            ":help" => print_help(),
            ":locate" => session.locate().await,
            ":unit" => session.toggle_unit().await,
            ":clear" => session.clear_history(),
            ":recent" => {
                let cities: Vec<String> = session.recent().to_vec();
                if cities.is_empty() {
                    println!("· No recent searches yet.");
                }
                for city in cities {
                    println!("  {}", city);
                }
            }
            other => session.search(other).await,
        }
    }

    tracing::info!("skycast exiting");
    Ok(())
}
