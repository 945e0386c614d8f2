// Main entry point - Dependency injection and chart rendering
use std::sync::Arc;

use anyhow::Context;
use chrono::Utc;
use tracing_subscriber::EnvFilter;

use station_charts::application::chart_service::ChartService;
use station_charts::domain::chart::hours_window;
use station_charts::application::chart_policy::format_value;
use station_charts::application::info_panel::{format_rain_amount, format_wind_direction, simplify_wind_direction};
use station_charts::application::station_service::StationService;
use station_charts::infrastructure::config::load_app_config;
use station_charts::infrastructure::http_repository::HttpWeatherRepository;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let config = load_app_config().context("failed to load configuration")?;

    // Create repository (infrastructure layer)
    let repository = Arc::new(HttpWeatherRepository::from_settings(&config.api)?);

    // Create services (application layer)
    let retry = config.charts.retry.policy();
    let station_service = StationService::new(repository.clone(), retry);
    let chart_service = ChartService::new(repository.clone(), config.charts.clone());

    let Some(station) = config.station.as_deref() else {
        for station in station_service.list_stations().await? {
            println!("{}\t{}", station.name, station.display_name());
        }
        return Ok(());
    };

    let (from, to) = hours_window(Utc::now(), config.hours)
        .with_context(|| format!("hours = {} is out of range", config.hours))?;
    tracing::info!("Rendering charts for {} from {} to {}", station, from, to);

    if let Some(widget) = chart_service.fetch_widget(station).await {
        println!("Temperatura: {}", format_value(widget.temperature, "temperatura"));
        println!(
            "Viento: {} {}",
            format_value(widget.wind_speed, "vientoVel"),
            simplify_wind_direction(&widget.wind_direction)
        );
        println!("Lluvia 1h: {}", format_rain_amount(widget.rain_last_hour, false));
        println!("Lluvia 24h: {}", format_rain_amount(widget.rain_24h, false));
        println!("Lluvia 7d: {}", format_rain_amount(widget.rain_7d, true));
    }

    for chart in chart_service.get_charts(station, from, to).await? {
        println!("== {} [{}]", chart.title, chart.color);
        if chart.is_empty() {
            println!("   sin datos");
            continue;
        }
        let labels: Vec<&str> = chart.ticks.iter().map(|t| t.label.as_str()).collect();
        println!("   eje: {}", labels.join("  "));
        if chart.parameter == "direccionViento" {
            if let Some(last) = chart.samples.last() {
                println!("   ultima: {}", format_wind_direction(last.value));
            }
        }
        if let Some(stats) = &chart.formatted_stats {
            println!(
                "   actual {}  min {}  max {}  prom {}",
                stats.current, stats.min, stats.max, stats.avg
            );
        }
    }

    Ok(())
}
