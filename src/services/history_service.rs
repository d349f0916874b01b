//! Rolling per-location price history
//!
//! The store is created once at startup and exclusively owned by the tick
//! loop; the web layer only ever sees derived snapshots. Windows are bounded
//! both by age (one hour behind the newest sample) and by count.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};

use crate::models::PriceSample;

/// Most samples retained per location
pub const WINDOW_MAX_SAMPLES: usize = 10;

/// Samples older than this (relative to the newest) are dropped
pub const WINDOW_MAX_AGE_MINUTES: i64 = 60;

/// Per-location rolling windows plus the LMP seen on the prior tick
#[derive(Debug, Default)]
pub struct PriceHistory {
    windows: HashMap<String, Vec<PriceSample>>,
    previous_lmp: HashMap<String, f64>,
}

impl PriceHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a sample to a location's window, then trim it.
    ///
    /// Only samples newer than one hour before the recorded timestamp are
    /// retained, capped at the most recent [`WINDOW_MAX_SAMPLES`], oldest
    /// discarded first. Insertion order is chronological order.
    pub fn record(&mut self, location: &str, timestamp: DateTime<Utc>, price: f64) {
        let window = self.windows.entry(location.to_string()).or_default();
        window.push(PriceSample::new(timestamp, price));

        let cutoff = timestamp - Duration::minutes(WINDOW_MAX_AGE_MINUTES);
        window.retain(|sample| sample.timestamp > cutoff);

        if window.len() > WINDOW_MAX_SAMPLES {
            let excess = window.len() - WINDOW_MAX_SAMPLES;
            window.drain(..excess);
        }
    }

    /// Immutable copy of a location's window, oldest first.
    ///
    /// An empty window is valid and means "no data yet".
    pub fn snapshot(&self, location: &str) -> Vec<PriceSample> {
        self.windows.get(location).cloned().unwrap_or_default()
    }

    /// LMP observed on the prior successful tick, if any
    pub fn previous_lmp(&self, location: &str) -> Option<f64> {
        self.previous_lmp.get(location).copied()
    }

    /// Store the LMP observed this tick, returning the prior one
    pub fn record_lmp(&mut self, location: &str, lmp: f64) -> Option<f64> {
        self.previous_lmp.insert(location.to_string(), lmp)
    }
}
