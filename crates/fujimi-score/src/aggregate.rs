//! Per-point aggregation and the (region, time) accumulator cells.

use thiserror::Error;

/// Decay constant for the distance weighting.
const DISTANCE_DECAY_PER_KM: f64 = 0.1;

/// Blend a point's hourly scores into one representative value.
///
/// The fold is a running average seeded by the first hour, with each later
/// hour folded as `avg = (avg + s) / 2`. That halves the influence of every
/// earlier hour each step, so hours late in the window dominate. This
/// recency weighting is deliberate and is NOT an arithmetic mean:
/// `[10, 2, 2]` blends to 4.0, not 4.67.
///
/// Returns `None` for an empty series; callers treat that as a failed point.
pub fn point_average(scores: impl IntoIterator<Item = u8>) -> Option<f64> {
    let mut average = None;
    for score in scores {
        average = Some(match average {
            None => f64::from(score),
            Some(avg) => (avg + f64::from(score)) / 2.0,
        });
    }
    average
}

/// Weight a point by its distance from the observer reference.
///
/// Nearer points get disproportionately more influence on the blended score.
pub fn distance_weight(distance_km: f64) -> f64 {
    (-DISTANCE_DECAY_PER_KM * distance_km).exp()
}

/// Aggregation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScoreError {
    /// No point contributed any weight; there is no score to report.
    #[error("No forecast data was accumulated for this cell")]
    NoData,
}

/// Running accumulator for one (region, time window) cell.
///
/// Merged once per observation point, in visitation order, then finalized
/// once. A skipped point simply never merges, degrading the cell instead of
/// aborting it.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScoreCell {
    score_sum: f64,
    weight_sum: f64,
}

impl ScoreCell {
    /// Fold one point's weighted contribution into the cell.
    pub fn merge(&mut self, point_average: f64, weight: f64) {
        self.score_sum += point_average * weight;
        self.weight_sum += weight;
    }

    /// True once at least one point has contributed weight.
    pub fn has_data(&self) -> bool {
        self.weight_sum > 0.0
    }

    /// Weighted final score for the cell.
    ///
    /// # Errors
    /// Returns [`ScoreError::NoData`] when nothing was merged (all points
    /// failed), instead of dividing by zero.
    pub fn final_score(&self) -> Result<u8, ScoreError> {
        if !self.has_data() {
            return Err(ScoreError::NoData);
        }
        Ok((self.score_sum / self.weight_sum).round() as u8)
    }
}
