//! Weather reading models

use std::fmt;

/// Weather condition category mapped from the provider's weather code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    Rain,
    Snow,
    Clear,
    Cloud,
    Storm,
    Fog,
    Unknown,
}

impl Condition {
    /// Map a provider weather code to a condition category.
    ///
    /// Codes may arrive as text labels ("rain_light") or numeric codes;
    /// matching is case-insensitive substring matching, and anything
    /// unrecognized falls through to `Unknown`.
    pub fn from_code(code: &str) -> Self {
        let code = code.to_lowercase();
        if code.contains("rain") || code.contains("drizzle") {
            Condition::Rain
        } else if code.contains("snow") {
            Condition::Snow
        } else if code.contains("clear") || code.contains("sunny") {
            Condition::Clear
        } else if code.contains("cloud") {
            Condition::Cloud
        } else if code.contains("storm") || code.contains("thunder") {
            Condition::Storm
        } else if code.contains("mist") || code.contains("fog") || code.contains("haze") {
            Condition::Fog
        } else {
            Condition::Unknown
        }
    }

    /// Display icon for the dashboard
    pub fn icon(&self) -> &'static str {
        match self {
            Condition::Rain => "🌧️",
            Condition::Snow => "❄️",
            Condition::Clear => "☀️",
            Condition::Cloud => "☁️",
            Condition::Storm => "⛈️",
            Condition::Fog => "🌫️",
            Condition::Unknown => "",
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.icon())
    }
}

/// One forecast reading for a location
#[derive(Debug, Clone)]
pub struct WeatherReading {
    /// Average temperature in °F
    pub temperature: f64,
    pub condition: Condition,
    /// Precipitation probability in percent, when the provider reports one
    pub precipitation: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_condition_mapping() {
        assert_eq!(Condition::from_code("rain_light"), Condition::Rain);
        assert_eq!(Condition::from_code("DRIZZLE"), Condition::Rain);
        assert_eq!(Condition::from_code("snow_heavy"), Condition::Snow);
        assert_eq!(Condition::from_code("Mostly Clear"), Condition::Clear);
        assert_eq!(Condition::from_code("partly_cloudy"), Condition::Cloud);
        assert_eq!(Condition::from_code("thunderstorm"), Condition::Storm);
        assert_eq!(Condition::from_code("fog"), Condition::Fog);
        assert_eq!(Condition::from_code("haze"), Condition::Fog);
    }

    #[test]
    fn test_unrecognized_code_has_empty_icon() {
        let cond = Condition::from_code("1001");
        assert_eq!(cond, Condition::Unknown);
        assert_eq!(cond.icon(), "");
    }
}
