use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest::Client as HttpClient;

use super::report::PriceReport;
use crate::api::FetchError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for the shared settlement point price report.
///
/// The report endpoint serves one HTML document covering every settlement
/// point, so it is fetched once per refresh cycle and shared by all
/// locations via [`PriceReport`] lookups.
pub struct ErcotClient {
    http_client: HttpClient,
    report_url: String,
}

impl ErcotClient {
    /// Create a new report client for the given report URL
    pub fn new(report_url: String) -> Self {
        Self {
            http_client: HttpClient::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .unwrap_or_else(|_| HttpClient::new()),
            report_url,
        }
    }

    /// The endpoint rejects requests without a browser user agent
    fn create_headers() -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static("Mozilla/5.0"));
        headers
    }

    /// Fetch and parse the current report
    pub async fn fetch_report(&self) -> Result<PriceReport, FetchError> {
        let response = self
            .http_client
            .get(&self.report_url)
            .headers(Self::create_headers())
            .send()
            .await?
            .error_for_status()?;

        let body = response.text().await?;
        PriceReport::parse(&body)
    }
}
