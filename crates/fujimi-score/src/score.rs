//! Visibility scoring heuristic.
//!
//! Maps one forecast hour to a score: 0 means the summit is not visible at
//! all, 1–10 is a visibility quality ordinal with 10 best.

use fujimi_forecast::{HourlyObservation, Region};

/// Precipitation above this many mm/h disqualifies the hour outright.
const HEAVY_RAIN_MM: f64 = 5.0;

/// WMO codes for heavy precipitation: heavy/freezing rain, heavy snow,
/// snow grains, thunderstorms.
const HEAVY_PRECIPITATION_CODES: [i32; 7] = [65, 67, 75, 77, 95, 96, 99];

/// Score one hour's conditions for a viewing region.
///
/// Returns 0 only for the immediate disqualifiers (fog, heavy precipitation
/// classes, rain above [`HEAVY_RAIN_MM`]); every other input lands in 1..=10.
pub fn visibility_score(obs: &HourlyObservation, region: Region) -> u8 {
    // Immediate disqualifiers
    if (45..=48).contains(&obs.weather_code) {
        return 0; // Fog
    }
    if HEAVY_PRECIPITATION_CODES.contains(&obs.weather_code) {
        return 0;
    }
    if obs.precipitation_mm > HEAVY_RAIN_MM {
        return 0;
    }

    // Base score from cloud cover
    let mut score = 10.0 * (1.0 - obs.cloud_cover_low / 100.0);

    // Humidity penalty (atmospheric haze)
    let humidity_penalty = if obs.relative_humidity > 80.0 {
        0.3
    } else if obs.relative_humidity > 60.0 {
        0.7
    } else {
        1.0
    };
    score *= humidity_penalty;

    // Weather code penalties
    if obs.weather_code == 3 {
        score *= 0.4; // Overcast
    } else if (51..=67).contains(&obs.weather_code) {
        score *= 0.6; // Any precipitation
    }

    // Dampening factor for different regions
    score *= region.dampening();

    score.clamp(1.0, 10.0).round() as u8
}
