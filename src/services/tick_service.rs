//! One refresh cycle: fetch, record, derive, render.
//!
//! Locations are processed sequentially; the returned bundle map is an
//! immutable snapshot for the web layer. All fetch failures are degraded to
//! warnings and placeholder values here so nothing upstream ever sees an
//! error from a tick.

use std::collections::HashMap;
use std::path::Path;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::api::ercot::{ErcotClient, PriceQuote};
use crate::api::tomorrowio::TomorrowIoClient;
use crate::config::LocationConfig;
use crate::models::{MetricBundle, WeatherReading};
use crate::services::{chart_service, metrics_service};
use crate::services::history_service::PriceHistory;

/// Process one tick for the selected locations
pub async fn process_tick(
    weather_client: &TomorrowIoClient,
    price_client: &ErcotClient,
    history: &mut PriceHistory,
    locations: &[LocationConfig],
    trend_dir: &Path,
) -> HashMap<String, MetricBundle> {
    let mut bundles = HashMap::new();
    if locations.is_empty() {
        return bundles;
    }

    // One shared document covers every settlement point, so fetch it once
    // per cycle instead of once per location
    let report = match price_client.fetch_report().await {
        Ok(report) => {
            if report.is_empty() {
                warn!("Price report parsed but contained no rows");
            } else {
                debug!("Price report parsed with {} rows", report.len());
            }
            Some(report)
        }
        Err(e) => {
            warn!("Error fetching price report: {}", e);
            None
        }
    };

    for location in locations {
        let weather = match weather_client.fetch_forecast(&location.coordinates).await {
            Ok(reading) => Some(reading),
            Err(e) => {
                warn!("Error fetching weather for {}: {}", location.name, e);
                None
            }
        };

        let quote = match report.as_ref() {
            Some(report) => match report.require_quote(&location.identifier) {
                Ok(quote) => Some(quote),
                Err(e) => {
                    warn!("No price data for {}: {}", location.name, e);
                    None
                }
            },
            None => None,
        };

        let mut bundle = update_and_derive(history, &location.name, weather, quote, Utc::now());

        if bundle.price.is_some() {
            let window = history.snapshot(&location.name);
            bundle.trend_png = match chart_service::render_trend(&location.name, &window, trend_dir)
            {
                Ok(png) => png,
                Err(e) => {
                    warn!("Error rendering trend for {}: {}", location.name, e);
                    None
                }
            };
        }

        bundles.insert(location.name.clone(), bundle);
    }

    bundles
}

/// Record the quote into the rolling store and derive the metric bundle.
///
/// A missing quote yields the placeholder bundle and leaves the location's
/// window and previous-LMP state untouched for this tick.
pub fn update_and_derive(
    history: &mut PriceHistory,
    location: &str,
    weather: Option<WeatherReading>,
    quote: Option<PriceQuote>,
    now: DateTime<Utc>,
) -> MetricBundle {
    let Some(quote) = quote else {
        return MetricBundle::unavailable(location);
    };

    history.record(location, now, quote.price);
    let window = history.snapshot(location);

    let previous_lmp = history.previous_lmp(location);
    history.record_lmp(location, quote.lmp);

    metrics_service::derive_metrics(
        location,
        quote.price,
        &window,
        weather,
        quote.lmp,
        previous_lmp,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Direction;
    use chrono::{Duration, TimeZone};

    fn at(minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, minute, 0).unwrap()
    }

    #[test]
    fn test_missing_quote_leaves_state_untouched() {
        let mut history = PriceHistory::new();
        history.record("PHR", at(0), 100.0);
        history.record_lmp("PHR", 20.0);
        let window_before = history.snapshot("PHR");

        let bundle = update_and_derive(&mut history, "PHR", None, None, at(1));

        assert!(bundle.price.is_none());
        assert!(bundle.trend_png.is_none());
        assert_eq!(history.snapshot("PHR"), window_before);
        assert_eq!(history.previous_lmp("PHR"), Some(20.0));
    }

    #[test]
    fn test_successful_quote_updates_window_and_lmp() {
        let mut history = PriceHistory::new();
        let quote = PriceQuote {
            price: 110.0,
            lmp: 25.0,
        };

        let bundle = update_and_derive(&mut history, "PHR", None, Some(quote), at(0));

        assert_eq!(bundle.price, Some(110.0));
        assert_eq!(bundle.lmp, Some(25.0));
        // First tick for the location: no previous LMP yet
        assert_eq!(bundle.lmp_direction, Direction::Flat);
        assert_eq!(history.snapshot("PHR").len(), 1);
        assert_eq!(history.previous_lmp("PHR"), Some(25.0));
    }

    #[test]
    fn test_second_tick_derives_change_and_lmp_delta() {
        let mut history = PriceHistory::new();
        update_and_derive(
            &mut history,
            "PHR",
            None,
            Some(PriceQuote {
                price: 100.0,
                lmp: 20.0,
            }),
            at(0),
        );
        let bundle = update_and_derive(
            &mut history,
            "PHR",
            None,
            Some(PriceQuote {
                price: 110.0,
                lmp: 18.0,
            }),
            at(1),
        );

        assert!((bundle.change_percent - 10.0).abs() < 1e-9);
        assert_eq!(bundle.change, Direction::Up);
        assert_eq!(bundle.lmp_delta, Some(-2.0));
        assert_eq!(bundle.lmp_direction, Direction::Down);
    }

    #[test]
    fn test_stale_samples_age_out_across_ticks() {
        let mut history = PriceHistory::new();
        let base = Utc.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).unwrap();
        update_and_derive(
            &mut history,
            "PHR",
            None,
            Some(PriceQuote {
                price: 100.0,
                lmp: 20.0,
            }),
            base,
        );
        update_and_derive(
            &mut history,
            "PHR",
            None,
            Some(PriceQuote {
                price: 200.0,
                lmp: 20.0,
            }),
            base + Duration::hours(2),
        );

        assert_eq!(history.snapshot("PHR").len(), 1);
        assert_eq!(history.snapshot("PHR")[0].price, 200.0);
    }
}
