use std::path::PathBuf;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

mod api;
mod config;
mod models;
mod services;
mod web;

use api::ercot::ErcotClient;
use api::tomorrowio::TomorrowIoClient;
use config::Config;
use services::history_service::PriceHistory;
use services::tick_service;
use web::AppState;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("gridwatch=debug".parse().unwrap()),
        )
        .with_target(true)
        .init();

    info!("⚡ Starting gridwatch...");
    info!("   ___ ___ ___ _____      ___ _____ ___ _  _ ");
    info!("  / __| _ \\_ _|   \\ \\    / /_\\_   _/ __| || |");
    info!(" | (_ |   /| || |) \\ \\/\\/ / _ \\| || (__| __ |");
    info!("  \\___|_|_\\___|___/ \\_/\\_/_/ \\_\\_| \\___|_||_|");
    info!("  gridwatch v0.1.0 - live energy price and weather dashboard");
    info!("");

    let config = match Config::load() {
        Ok(c) => {
            info!("Loaded {} locations from Config.toml", c.locations.len());
            c
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return;
        }
    };

    let api_key = std::env::var("TOMORROW_API_KEY").expect("TOMORROW_API_KEY not set");

    let trend_dir = PathBuf::from(&config.dashboard.trend_dir);
    if let Err(e) = std::fs::create_dir_all(&trend_dir) {
        error!(
            "Failed to create trend directory {}: {}",
            trend_dir.display(),
            e
        );
        return;
    }

    let state = Arc::new(AppState::new(config.clone()));

    // The tick loop exclusively owns the rolling history store; the web
    // layer only ever reads published snapshots
    let tick_state = Arc::clone(&state);
    tokio::spawn(async move {
        let weather_client =
            TomorrowIoClient::new(api_key, tick_state.config.weather.url.clone());
        let price_client = ErcotClient::new(tick_state.config.report.url.clone());
        let mut history = PriceHistory::new();

        loop {
            let selected = tick_state.selected.read().await.clone();
            let locations: Vec<_> = tick_state
                .config
                .locations
                .iter()
                .filter(|location| selected.contains(&location.name))
                .cloned()
                .collect();

            let bundles = tick_service::process_tick(
                &weather_client,
                &price_client,
                &mut history,
                &locations,
                &trend_dir,
            )
            .await;
            debug!("Tick complete: {} bundle(s) published", bundles.len());
            *tick_state.latest.write().await = bundles;

            let refresh = tick_state.refresh_secs.load(Ordering::Relaxed);
            tokio::time::sleep(Duration::from_secs(refresh)).await;
        }
    });

    let addr = config.dashboard.bind_addr.clone();
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind {}: {}", addr, e);
            return;
        }
    };
    info!("Dashboard listening on http://{}", addr);

    if let Err(e) = axum::serve(listener, web::router(state)).await {
        error!("Server error: {}", e);
    }
}
