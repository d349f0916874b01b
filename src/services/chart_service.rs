//! Trend sparkline rendering
//!
//! Turns a location's rolling window into a small PNG line chart. The image
//! is written into the trend directory keyed by location name, overwritten
//! every tick, and the bytes are returned for inline embedding.

use std::fs;
use std::path::Path;

use chrono::{Duration, Utc};
use plotters::prelude::*;

use crate::models::PriceSample;

/// Fixed sparkline size matching the dashboard tile
pub const TREND_WIDTH: u32 = 150;
pub const TREND_HEIGHT: u32 = 75;

/// Points per rendered series; shorter windows are left-padded so the
/// visual width stays constant
const SERIES_POINTS: usize = 10;

const RISE_COLOR: RGBColor = RGBColor(0x00, 0xe6, 0x76);
const FALL_COLOR: RGBColor = RGBColor(0xff, 0x17, 0x44);
/// Container panel color of the dashboard page
const PANEL_COLOR: RGBColor = RGBColor(0x1e, 0x1e, 0x1e);

/// Left-pad a window to [`SERIES_POINTS`] entries with zero-valued
/// placeholder points spaced one minute apart before the earliest real
/// sample. Coloring is pairwise, so padding never changes the color of a
/// real segment.
pub fn pad_points(window: &[PriceSample]) -> Vec<PriceSample> {
    let mut points: Vec<PriceSample> = window.to_vec();
    while points.len() < SERIES_POINTS {
        let anchor = points
            .first()
            .map(|p| p.timestamp)
            .unwrap_or_else(Utc::now);
        points.insert(0, PriceSample::new(anchor - Duration::minutes(1), 0.0));
    }
    points
}

/// Render the trend sparkline for one location.
///
/// Returns `Ok(None)` when the window has fewer than two samples; otherwise
/// writes `<location>_trend.png` into `trend_dir` and returns the PNG bytes.
pub fn render_trend(
    location: &str,
    window: &[PriceSample],
    trend_dir: &Path,
) -> Result<Option<Vec<u8>>, String> {
    if window.len() < 2 {
        return Ok(None);
    }

    let points = pad_points(window);
    let image_path = trend_dir.join(format!("{}_trend.png", location));

    {
        let backend = BitMapBackend::new(&image_path, (TREND_WIDTH, TREND_HEIGHT));
        let root = backend.into_drawing_area();
        root.fill(&PANEL_COLOR)
            .map_err(|e| format!("Failed to fill canvas: {}", e))?;

        // Find price range
        let min_price = points.iter().map(|p| p.price).fold(f64::INFINITY, f64::min);
        let max_price = points
            .iter()
            .map(|p| p.price)
            .fold(f64::NEG_INFINITY, f64::max);

        // Add some padding to the price range
        let price_range = (max_price - min_price).max(1e-8); // Avoid division by zero
        let padding = price_range * 0.1;
        let y_min = min_price - padding;
        let y_max = max_price + padding;

        // No caption, mesh or axes: the sparkline is the whole image
        let mut chart = ChartBuilder::on(&root)
            .build_cartesian_2d(0f64..(points.len() - 1) as f64, y_min..y_max)
            .map_err(|e| format!("Failed to build chart: {}", e))?;

        // Each adjacent pair is colored by whether the series rose across it
        for i in 1..points.len() {
            let color = if points[i].price > points[i - 1].price {
                RISE_COLOR
            } else {
                FALL_COLOR
            };
            chart
                .draw_series(std::iter::once(PathElement::new(
                    vec![
                        ((i - 1) as f64, points[i - 1].price),
                        (i as f64, points[i].price),
                    ],
                    color.stroke_width(2),
                )))
                .map_err(|e| format!("Failed to draw segment: {}", e))?;
        }

        root.present()
            .map_err(|e| format!("Failed to render chart: {}", e))?;
    }

    let image_data =
        fs::read(&image_path).map_err(|e| format!("Failed to read chart file: {}", e))?;

    Ok(Some(image_data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample(minute: u32, price: f64) -> PriceSample {
        PriceSample::new(
            Utc.with_ymd_and_hms(2024, 6, 1, 12, minute, 0).unwrap(),
            price,
        )
    }

    #[test]
    fn test_single_sample_yields_no_artifact() {
        let dir = std::env::temp_dir();
        let result = render_trend("single", &[sample(0, 10.0)], &dir).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_empty_window_yields_no_artifact() {
        let dir = std::env::temp_dir();
        let result = render_trend("empty", &[], &dir).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_pad_points_fills_to_fixed_width() {
        let padded = pad_points(&[sample(30, 25.0), sample(31, 30.0)]);
        assert_eq!(padded.len(), SERIES_POINTS);

        // Padding is zero-valued and strictly older than the real samples
        for point in &padded[..SERIES_POINTS - 2] {
            assert_eq!(point.price, 0.0);
            assert!(point.timestamp < padded[SERIES_POINTS - 2].timestamp);
        }

        // Real samples keep their values at the tail
        assert_eq!(padded[SERIES_POINTS - 2].price, 25.0);
        assert_eq!(padded[SERIES_POINTS - 1].price, 30.0);
    }

    #[test]
    fn test_pad_points_spacing_is_one_minute() {
        let padded = pad_points(&[sample(30, 25.0), sample(31, 30.0)]);
        for pair in padded[..SERIES_POINTS - 1].windows(2) {
            assert!(pair[0].timestamp < pair[1].timestamp);
        }
        assert_eq!(
            padded[1].timestamp - padded[0].timestamp,
            Duration::minutes(1)
        );
    }

    #[test]
    fn test_full_window_needs_no_padding() {
        let window: Vec<PriceSample> = (0..10).map(|i| sample(i, i as f64 + 1.0)).collect();
        let padded = pad_points(&window);
        assert_eq!(padded.len(), SERIES_POINTS);
        assert_eq!(padded[0].price, 1.0);
    }

    #[test]
    fn test_render_writes_png_keyed_by_location() {
        let dir = std::env::temp_dir();
        let window = vec![sample(0, 10.0), sample(1, 12.0), sample(2, 11.0)];
        let bytes = render_trend("render_test", &window, &dir).unwrap().unwrap();
        assert!(!bytes.is_empty());
        assert!(dir.join("render_test_trend.png").exists());
    }
}
