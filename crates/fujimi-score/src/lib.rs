//! Scoring & aggregation engine for Fujimi
//!
//! Maps hourly weather observations to visibility scores, blends them per
//! observation point with a recency-weighted average, accumulates the
//! distance-weighted contributions per (region, time window) cell, and drives
//! the strictly sequential fetch orchestration that feeds it.

pub mod aggregate;
pub mod orchestrator;
pub mod score;

pub use aggregate::{distance_weight, point_average, ScoreCell, ScoreError};
pub use orchestrator::{Orchestrator, RefreshContext, Scoreboard};
pub use score::visibility_score;
