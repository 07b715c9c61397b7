//! Forecast collaborator for Fujimi
//!
//! Provides the fixed observation-point geometry, the Open-Meteo hourly
//! forecast client, and the payload types the scoring engine consumes.

pub mod client;
pub mod geometry;
pub mod types;

pub use client::{ForecastSource, OpenMeteoClient};
pub use geometry::{ObservationPoint, Region, TimeWindow};
pub use types::{ForecastError, ForecastResponse, HourlyObservation};
