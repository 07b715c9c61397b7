//! Open-Meteo hourly forecast client.
//!
//! Query construction (date selection, hour windows, variable list) lives
//! here; the scoring engine only supplies the logical request parameters
//! (observation point + time window).

use crate::geometry::{ObservationPoint, TimeWindow};
use crate::types::{ForecastError, ForecastResponse};
use chrono::{FixedOffset, NaiveDate, Utc};
use reqwest::Client;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

const FORECAST_PATH: &str = "/v1/forecast";
const HOURLY_VARIABLES: &str = "cloud_cover_low,precipitation,weather_code,relative_humidity_2m";
const FORECAST_TIMEZONE: &str = "Asia/Tokyo";
const JST_OFFSET_SECS: i32 = 9 * 3600;

/// Source of hourly forecasts for one observation point and time window.
///
/// The scoring engine is generic over this seam so tests can substitute a
/// scripted source for the live client.
pub trait ForecastSource: Send + Sync {
    /// Fetch the hourly forecast for `point` over `window` on today's date.
    fn fetch(
        &self,
        point: &ObservationPoint,
        window: TimeWindow,
    ) -> impl Future<Output = Result<ForecastResponse, ForecastError>> + Send;
}

/// Live Open-Meteo client
#[derive(Debug, Clone)]
pub struct OpenMeteoClient {
    base_url: Url,
    client: Arc<Client>,
}

impl OpenMeteoClient {
    /// Create a client against `base_url` (injectable so tests can point it
    /// at a mock server).
    ///
    /// # Errors
    /// Fails when the base URL does not parse or the HTTP client cannot be
    /// built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ForecastError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url: Url::parse(base_url)?,
            client: Arc::new(client),
        })
    }

    /// Build the forecast request URL for one point/window on `date`.
    fn request_url(
        &self,
        point: &ObservationPoint,
        window: TimeWindow,
        date: NaiveDate,
    ) -> Result<Url, ForecastError> {
        let (start, end) = window.hour_range();
        let mut url = self.base_url.join(FORECAST_PATH)?;
        url.query_pairs_mut()
            .append_pair("latitude", &point.latitude.to_string())
            .append_pair("longitude", &point.longitude.to_string())
            .append_pair("hourly", HOURLY_VARIABLES)
            .append_pair("timezone", FORECAST_TIMEZONE)
            .append_pair("start_hour", &format!("{date}T{start:02}:00"))
            .append_pair("end_hour", &format!("{date}T{end:02}:00"));
        Ok(url)
    }
}

/// Today's date in the forecast timezone (JST, no DST).
fn today_jst() -> NaiveDate {
    match FixedOffset::east_opt(JST_OFFSET_SECS) {
        Some(offset) => Utc::now().with_timezone(&offset).date_naive(),
        // +09:00 is always in range; fall back to UTC rather than panic
        None => Utc::now().date_naive(),
    }
}

impl ForecastSource for OpenMeteoClient {
    async fn fetch(
        &self,
        point: &ObservationPoint,
        window: TimeWindow,
    ) -> Result<ForecastResponse, ForecastError> {
        let url = self.request_url(point, window, today_jst())?;
        tracing::debug!("Requesting forecast: {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ForecastError::Status(status));
        }

        let payload: ForecastResponse = response.json().await?;
        tracing::debug!(
            "Received forecast for ({}, {}), {} hours",
            payload.latitude,
            payload.longitude,
            payload.hourly.time.len()
        );
        Ok(payload)
    }
}
