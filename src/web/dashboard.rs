//! Dashboard HTML rendering
//!
//! Builds the whole page as a string: dark theme, one container per active
//! location with the metric tiles, the trend sparkline inlined as a base64
//! data URI, and a settings form for location selection and refresh rate.

use std::collections::HashMap;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

use crate::config::{REFRESH_MAX_SECS, REFRESH_MIN_SECS};
use crate::models::MetricBundle;

const PAGE_STYLE: &str = r#"
    body {
        background-color: #121212;
        color: #e0e0e0;
        font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, Helvetica, Arial, sans-serif;
        margin: 0;
        padding: 20px;
    }
    .header {
        text-align: center;
        padding: 10px 0;
        font-size: 40px;
        font-weight: bold;
        color: #ffffff;
    }
    .settings {
        background-color: #1e1e1e;
        padding: 12px 20px;
        border-radius: 12px;
        margin-bottom: 20px;
        color: #b0b0b0;
    }
    .settings label { margin-right: 16px; }
    .settings input[type="number"] { width: 60px; }
    .location-container {
        background-color: #1e1e1e;
        padding: 20px;
        border-radius: 16px;
        margin-bottom: 20px;
        box-shadow: 0 4px 12px rgba(0,0,0,0.5);
        transition: transform 0.2s;
    }
    .location-container:hover { transform: scale(1.02); }
    .metric-row {
        display: flex;
        justify-content: space-between;
        align-items: center;
        flex-wrap: wrap;
    }
    .metric-cell { flex: 1; min-width: 150px; padding: 10px; }
    .metric-cell-wide { flex: 2; min-width: 250px; padding: 10px; }
    .metric-title {
        font-size: 20px;
        color: #b0b0b0;
        margin-bottom: 5px;
    }
    .metric-value {
        font-size: 18px;
        color: #ffffff;
        font-weight: bold;
    }
    .trend-graph { border-radius: 8px; }
    .footer { text-align: center; padding: 20px; color: #a0a0a0; }
"#;

/// Render the full dashboard page.
///
/// `all_locations` drives the settings form and display order; only
/// `selected` locations get a container. A selected location without a
/// bundle yet (first tick still running) renders a waiting note.
pub fn render_dashboard(
    all_locations: &[String],
    selected: &[String],
    bundles: &HashMap<String, MetricBundle>,
    refresh_secs: u64,
) -> String {
    let mut body = String::new();

    body.push_str("<div class=\"header\">Energy Dashboard</div>\n");
    body.push_str(&render_settings_form(all_locations, selected, refresh_secs));

    for name in all_locations {
        if !selected.contains(name) {
            continue;
        }
        match bundles.get(name) {
            Some(bundle) => body.push_str(&render_location(bundle)),
            None => body.push_str(&format!(
                "<div class=\"location-container\"><h2>{}</h2>\
                 <div class=\"metric-value\">Waiting for first refresh...</div></div>\n",
                name
            )),
        }
    }

    body.push_str("<div class=\"footer\">&copy; 2024 Energy Dashboard. All rights reserved.</div>\n");

    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n\
         <title>Dashboard</title>\n\
         <meta http-equiv=\"refresh\" content=\"{}\">\n\
         <style>{}</style>\n\
         </head>\n<body>\n{}</body>\n</html>\n",
        refresh_secs, PAGE_STYLE, body
    )
}

fn render_settings_form(all_locations: &[String], selected: &[String], refresh_secs: u64) -> String {
    let mut checkboxes = String::new();
    for name in all_locations {
        let checked = if selected.contains(name) { " checked" } else { "" };
        checkboxes.push_str(&format!(
            "<label><input type=\"checkbox\" name=\"loc\" value=\"{name}\"{checked}/> {name}</label>",
            name = name,
            checked = checked,
        ));
    }

    format!(
        "<form method=\"get\" class=\"settings\">\
         <input type=\"hidden\" name=\"sel\" value=\"1\"/>\
         {}\
         <label>Refresh Rate (seconds) \
         <input type=\"number\" name=\"refresh\" min=\"{}\" max=\"{}\" step=\"5\" value=\"{}\"/></label>\
         <button type=\"submit\">Apply</button>\
         </form>\n",
        checkboxes, REFRESH_MIN_SECS, REFRESH_MAX_SECS, refresh_secs
    )
}

fn render_location(bundle: &MetricBundle) -> String {
    let trend_html = match &bundle.trend_png {
        Some(png) => format!(
            "<img src=\"data:image/png;base64,{}\" class=\"trend-graph\"/>",
            BASE64.encode(png)
        ),
        None => "Graph will appear after data is available.".to_string(),
    };

    format!(
        "<div class=\"location-container\">\n\
         <h2 style=\"color: #ffffff;\">{location}</h2>\n\
         <div class=\"metric-row\">\n\
         {price}{change}{temperature}{condition}{lmp}{adder}\
         <div class=\"metric-cell-wide\"><div class=\"metric-title\">Trend</div>{trend}</div>\n\
         </div>\n</div>\n",
        location = bundle.location,
        price = metric_cell("Price", &price_text(bundle), "#ffffff"),
        change = metric_cell("Change", &change_text(bundle), bundle.change.color()),
        temperature = metric_cell("Temperature", &temperature_text(bundle), "#ffffff"),
        condition = metric_cell("Condition", &condition_text(bundle), "#ffffff"),
        lmp = metric_cell("LMP", &lmp_text(bundle), bundle.lmp_direction.color()),
        adder = metric_cell("Adder", &adder_text(bundle), bundle.adder_direction.color()),
        trend = trend_html,
    )
}

fn metric_cell(title: &str, value: &str, color: &str) -> String {
    format!(
        "<div class=\"metric-cell\"><div class=\"metric-title\">{}</div>\
         <div class=\"metric-value\" style=\"color: {};\">{}</div></div>\n",
        title, color, value
    )
}

fn price_text(bundle: &MetricBundle) -> String {
    match bundle.price {
        Some(price) => format!("${:.2}", price),
        None => "$0.0".to_string(),
    }
}

fn change_text(bundle: &MetricBundle) -> String {
    if bundle.price.is_none() {
        return "N/A".to_string();
    }
    format!("{:+.2}% {}", bundle.change_percent, bundle.change.arrow())
}

fn temperature_text(bundle: &MetricBundle) -> String {
    match &bundle.weather {
        Some(weather) => format!("🌡️ {:.1} °F", weather.temperature),
        None => "N/A".to_string(),
    }
}

fn condition_text(bundle: &MetricBundle) -> String {
    match &bundle.weather {
        Some(weather) => match weather.precipitation {
            Some(precip) => format!("{} {:.0}%", weather.condition.icon(), precip),
            None => weather.condition.icon().to_string(),
        },
        None => "N/A".to_string(),
    }
}

fn lmp_text(bundle: &MetricBundle) -> String {
    let Some(lmp) = bundle.lmp else {
        return "N/A".to_string();
    };
    match bundle.lmp_delta {
        Some(delta) => format!(
            "💰${:.2} {:+.2} {}",
            lmp,
            delta,
            bundle.lmp_direction.arrow()
        ),
        // First tick for the location: nothing to compare against yet
        None => format!("💰${:.2}", lmp),
    }
}

fn adder_text(bundle: &MetricBundle) -> String {
    match bundle.adder {
        // Highlighted with a plus only when strictly positive
        Some(adder) if adder > 0.0 => format!("${:.2} +", adder),
        Some(_) => "0.0".to_string(),
        None => "0.0".to_string(),
    }
}
