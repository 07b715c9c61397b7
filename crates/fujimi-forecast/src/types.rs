use serde::Deserialize;

/// Hourly forecast payload returned by Open-Meteo.
///
/// The latitude/longitude are echoed back grid-snapped; the scoring engine
/// matches them to the originating observation point.
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastResponse {
    pub latitude: f64,
    pub longitude: f64,
    pub hourly: HourlySeries,
}

/// Column-oriented hourly series; all arrays are index-aligned.
#[derive(Debug, Clone, Deserialize)]
pub struct HourlySeries {
    pub time: Vec<String>,
    pub relative_humidity_2m: Vec<f64>,
    pub precipitation: Vec<f64>,
    pub cloud_cover_low: Vec<f64>,
    pub weather_code: Vec<i32>,
}

/// One forecast hour, row-oriented for scoring
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HourlyObservation {
    pub cloud_cover_low: f64,
    pub relative_humidity: f64,
    pub weather_code: i32,
    pub precipitation_mm: f64,
}

impl ForecastResponse {
    /// Convert the column-oriented payload into per-hour observations.
    ///
    /// # Errors
    /// Returns [`ForecastError::EmptySeries`] when the payload contains no
    /// hours and [`ForecastError::MisalignedSeries`] when the hourly arrays
    /// disagree on length.
    pub fn observations(&self) -> Result<Vec<HourlyObservation>, ForecastError> {
        let hours = self.hourly.time.len();
        if hours == 0 {
            return Err(ForecastError::EmptySeries);
        }
        if self.hourly.relative_humidity_2m.len() != hours
            || self.hourly.precipitation.len() != hours
            || self.hourly.cloud_cover_low.len() != hours
            || self.hourly.weather_code.len() != hours
        {
            return Err(ForecastError::MisalignedSeries);
        }

        Ok((0..hours)
            .map(|i| HourlyObservation {
                cloud_cover_low: self.hourly.cloud_cover_low[i],
                relative_humidity: self.hourly.relative_humidity_2m[i],
                weather_code: self.hourly.weather_code[i],
                precipitation_mm: self.hourly.precipitation[i],
            })
            .collect())
    }
}

/// Forecast collaborator errors
#[derive(Debug, thiserror::Error)]
pub enum ForecastError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Provider returned status {0}")]
    Status(reqwest::StatusCode),

    #[error("Invalid request URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Payload contains no forecast hours")]
    EmptySeries,

    #[error("Hourly arrays are not index-aligned")]
    MisalignedSeries,

    #[error("Echoed coordinates ({latitude}, {longitude}) match no observation point")]
    UnknownCoordinates { latitude: f64, longitude: f64 },
}
