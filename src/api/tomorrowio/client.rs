use std::time::Duration;

use reqwest::Client as HttpClient;

use super::models::ForecastResponse;
use crate::api::FetchError;
use crate::models::{Condition, WeatherReading};

/// Per-request budget; a slow upstream counts as a failure for this tick
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Tomorrow.io forecast API client
pub struct TomorrowIoClient {
    http_client: HttpClient,
    api_key: String,
    base_url: String,
}

impl TomorrowIoClient {
    /// Create a new forecast client for the configured endpoint
    pub fn new(api_key: String, base_url: String) -> Self {
        Self {
            http_client: HttpClient::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .unwrap_or_else(|_| HttpClient::new()),
            api_key,
            base_url,
        }
    }

    /// Fetch today's forecast for a coordinate pair ("lat,lon").
    ///
    /// Returns the first entry of the daily timeline: average temperature in
    /// °F, the mapped condition category, and precipitation probability.
    pub async fn fetch_forecast(&self, coordinates: &str) -> Result<WeatherReading, FetchError> {
        let response = self
            .http_client
            .get(&self.base_url)
            .query(&[
                ("location", coordinates),
                ("apikey", self.api_key.as_str()),
                ("timesteps", "1d"),
                ("units", "imperial"),
            ])
            .send()
            .await?
            .error_for_status()?;

        let forecast = response
            .json::<ForecastResponse>()
            .await
            .map_err(|e| FetchError::Parse(format!("forecast body: {}", e)))?;

        let today = forecast
            .timelines
            .daily
            .first()
            .ok_or_else(|| FetchError::Parse("empty daily timeline".to_string()))?;

        Ok(WeatherReading {
            temperature: today.values.temperature_avg,
            condition: Condition::from_code(&today.values.weather_code.to_string()),
            precipitation: today.values.precipitation_probability,
        })
    }
}
