//! Derives the displayed metric bundle from the current samples.
//!
//! Pure computation: the tick loop feeds in the post-update window snapshot
//! and the prior LMP, and gets back everything the dashboard shows for one
//! location. No I/O, no state.

use crate::models::{Direction, MetricBundle, PriceSample, WeatherReading};

/// Build the metric bundle for one location on one tick.
///
/// `window` is the location's rolling window after the current price has
/// been appended and trimmed. `previous_lmp` is the LMP from the prior
/// successful tick, `None` on the first.
pub fn derive_metrics(
    location: &str,
    price: f64,
    window: &[PriceSample],
    weather: Option<WeatherReading>,
    lmp: f64,
    previous_lmp: Option<f64>,
) -> MetricBundle {
    // Percent change vs. the oldest retained sample, guarded against a
    // zero baseline
    let change_percent = if window.len() > 1 {
        let oldest = window[0].price;
        if oldest == 0.0 {
            0.0
        } else {
            (price - oldest) / oldest * 100.0
        }
    } else {
        0.0
    };
    let change = Direction::from_delta(change_percent);

    let lmp_delta = previous_lmp.map(|prev| lmp - prev);
    let lmp_direction = lmp_delta.map(Direction::from_delta).unwrap_or(Direction::Flat);

    // Retail premium over LMP, floored at zero; highlighted only when
    // strictly positive
    let adder = (price - lmp).max(0.0);
    let adder_direction = if adder > 0.0 {
        Direction::Up
    } else {
        Direction::Flat
    };

    MetricBundle {
        location: location.to_string(),
        price: Some(price),
        change_percent,
        change,
        weather,
        lmp: Some(lmp),
        lmp_delta,
        lmp_direction,
        adder: Some(adder),
        adder_direction,
        trend_png: None,
    }
}
