use serde::Deserialize;

/// Response from the forecast endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastResponse {
    pub timelines: Timelines,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Timelines {
    #[serde(default)]
    pub daily: Vec<DailyForecast>,
}

/// One day of the daily timeline
#[derive(Debug, Clone, Deserialize)]
pub struct DailyForecast {
    pub values: DailyValues,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyValues {
    pub temperature_avg: f64,
    /// Numeric code or text label depending on the API plan
    pub weather_code: serde_json::Value,
    pub precipitation_probability: Option<f64>,
}
