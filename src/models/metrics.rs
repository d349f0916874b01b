//! Derived metric models

use crate::models::weather::WeatherReading;

/// Movement direction of a value between two observations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Flat,
}

impl Direction {
    pub fn from_delta(delta: f64) -> Self {
        if delta > 0.0 {
            Direction::Up
        } else if delta < 0.0 {
            Direction::Down
        } else {
            Direction::Flat
        }
    }

    /// Arrow glyph shown next to the value; flat shows nothing
    pub fn arrow(&self) -> &'static str {
        match self {
            Direction::Up => "↑",
            Direction::Down => "↓",
            Direction::Flat => "",
        }
    }

    /// Display color: green for up, red for down, default text color for flat
    pub fn color(&self) -> &'static str {
        match self {
            Direction::Up => "#00e676",
            Direction::Down => "#ff1744",
            Direction::Flat => "#ffffff",
        }
    }
}

/// The full derived metric set for one location on one tick.
///
/// Recomputed from scratch every refresh cycle and handed to the web layer
/// as an immutable snapshot. `None` fields mean the upstream fetch failed
/// and the dashboard shows a placeholder instead.
#[derive(Debug, Clone)]
pub struct MetricBundle {
    pub location: String,
    pub price: Option<f64>,
    /// Percent change vs. the oldest retained sample; 0 with fewer than
    /// two samples in the window
    pub change_percent: f64,
    pub change: Direction,
    pub weather: Option<WeatherReading>,
    pub lmp: Option<f64>,
    /// LMP movement vs. the prior tick; `None` on the first successful tick
    pub lmp_delta: Option<f64>,
    pub lmp_direction: Direction,
    /// Retail premium over LMP, floored at zero
    pub adder: Option<f64>,
    pub adder_direction: Direction,
    /// Rendered trend sparkline (PNG), absent with fewer than two samples
    pub trend_png: Option<Vec<u8>>,
}

impl MetricBundle {
    /// Placeholder bundle for a location whose price fetch failed this tick
    pub fn unavailable(location: &str) -> Self {
        Self {
            location: location.to_string(),
            price: None,
            change_percent: 0.0,
            change: Direction::Flat,
            weather: None,
            lmp: None,
            lmp_delta: None,
            lmp_direction: Direction::Flat,
            adder: None,
            adder_direction: Direction::Flat,
            trend_png: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_from_delta() {
        assert_eq!(Direction::from_delta(0.01), Direction::Up);
        assert_eq!(Direction::from_delta(-0.01), Direction::Down);
        assert_eq!(Direction::from_delta(0.0), Direction::Flat);
    }

    #[test]
    fn test_flat_has_no_arrow_and_default_color() {
        assert_eq!(Direction::Flat.arrow(), "");
        assert_eq!(Direction::Flat.color(), "#ffffff");
        assert_eq!(Direction::Up.color(), "#00e676");
        assert_eq!(Direction::Down.color(), "#ff1744");
    }

    #[test]
    fn test_unavailable_bundle_is_fully_populated() {
        let bundle = MetricBundle::unavailable("PHR");
        assert_eq!(bundle.location, "PHR");
        assert!(bundle.price.is_none());
        assert!(bundle.lmp.is_none());
        assert!(bundle.adder.is_none());
        assert!(bundle.trend_png.is_none());
        assert_eq!(bundle.change, Direction::Flat);
        assert_eq!(bundle.lmp_direction, Direction::Flat);
    }
}
