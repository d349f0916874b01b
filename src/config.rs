//! Runtime configuration loaded from Config.toml

use std::fs;

use serde::Deserialize;

/// Bounds for the dashboard refresh interval, in seconds
pub const REFRESH_MIN_SECS: u64 = 30;
pub const REFRESH_MAX_SECS: u64 = 60;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub dashboard: DashboardConfig,
    pub report: ReportConfig,
    pub weather: WeatherConfig,
    pub locations: Vec<LocationConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    pub bind_addr: String,
    pub refresh_secs: u64,
    pub trend_dir: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeatherConfig {
    pub url: String,
}

/// One dashboard location: display name, forecast coordinates, and the
/// settlement point identifier matched against report rows
#[derive(Debug, Clone, Deserialize)]
pub struct LocationConfig {
    pub name: String,
    pub coordinates: String,
    pub identifier: String,
}

impl Config {
    /// Load configuration from Config.toml in the working directory
    pub fn load() -> Result<Self, String> {
        Self::load_from("Config.toml")
    }

    pub fn load_from(path: &str) -> Result<Self, String> {
        let content = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file {}: {}", path, e))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| format!("Failed to parse config file {}: {}", path, e))?;

        if config.locations.is_empty() {
            return Err("Config has no [[locations]] entries".to_string());
        }

        Ok(config)
    }
}

/// Clamp a refresh interval into the supported 30–60 second range
pub fn clamp_refresh(secs: u64) -> u64 {
    secs.clamp(REFRESH_MIN_SECS, REFRESH_MAX_SECS)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG_FIXTURE: &str = r#"
        [dashboard]
        bind_addr = "127.0.0.1:8080"
        refresh_secs = 45
        trend_dir = "trend_graphs"

        [report]
        url = "https://example.com/report.html"

        [weather]
        url = "https://example.com/forecast"

        [[locations]]
        name = "PHR"
        coordinates = "29.5066,-94.9927"
        identifier = "BAC_RN_ALL"
    "#;

    #[test]
    fn test_parse_config() {
        let config: Config = toml::from_str(CONFIG_FIXTURE).unwrap();
        assert_eq!(config.dashboard.refresh_secs, 45);
        assert_eq!(config.locations.len(), 1);
        assert_eq!(config.locations[0].identifier, "BAC_RN_ALL");
    }

    #[test]
    fn test_clamp_refresh_bounds() {
        assert_eq!(clamp_refresh(10), 30);
        assert_eq!(clamp_refresh(30), 30);
        assert_eq!(clamp_refresh(45), 45);
        assert_eq!(clamp_refresh(60), 60);
        assert_eq!(clamp_refresh(600), 60);
    }
}
