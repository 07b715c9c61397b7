//! Sequential fetch orchestration and the refresh-all report gate.
//!
//! One job walks a region's three observation points in order for one time
//! window. Fetches are strictly one at a time: the next request is not issued
//! until the previous one has completed, to bound load on the provider. A
//! failed point is logged and skipped, never retried within the job.

use crate::aggregate::{distance_weight, point_average, ScoreCell, ScoreError};
use crate::score::visibility_score;
use fujimi_forecast::{ForecastError, ForecastSource, ObservationPoint, Region, TimeWindow};

/// Drives forecast jobs against a [`ForecastSource`].
#[derive(Debug, Clone)]
pub struct Orchestrator<S> {
    source: S,
}

/// Final scores for all four (region, time window) cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scoreboard {
    pub north_morning: u8,
    pub north_afternoon: u8,
    pub south_morning: u8,
    pub south_afternoon: u8,
}

impl<S: ForecastSource> Orchestrator<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Run one (region, window) job: visit the region's points in order,
    /// strictly one fetch at a time, and accumulate their contributions.
    pub async fn run_job(&self, region: Region, window: TimeWindow) -> ScoreCell {
        let mut cell = ScoreCell::default();

        for (index, point) in region.points().iter().enumerate() {
            // The await here is what enforces one-at-a-time sequencing
            match self.fetch_point(region, window, point).await {
                Ok((average, weight)) => {
                    tracing::debug!(
                        "{} {} point {}: average {:.2}, weight {:.3}",
                        region,
                        window,
                        index + 1,
                        average,
                        weight
                    );
                    cell.merge(average, weight);
                }
                Err(e) => {
                    // Best effort: a failed point contributes nothing but
                    // does not abort the job
                    tracing::warn!(
                        "Skipping {} {} point {}: {}",
                        region,
                        window,
                        index + 1,
                        e
                    );
                }
            }
        }

        cell
    }

    /// Fetch and reduce one observation point to (average score, weight).
    async fn fetch_point(
        &self,
        region: Region,
        window: TimeWindow,
        point: &ObservationPoint,
    ) -> Result<(f64, f64), ForecastError> {
        let response = self.source.fetch(point, window).await?;

        // Recover the originating point (and its distance) from the echoed
        // coordinates
        let matched = region
            .point_for(response.latitude, response.longitude)
            .ok_or(ForecastError::UnknownCoordinates {
                latitude: response.latitude,
                longitude: response.longitude,
            })?;

        let observations = response.observations()?;
        let hourly_scores = observations.iter().map(|obs| visibility_score(obs, region));
        let average = point_average(hourly_scores).ok_or(ForecastError::EmptySeries)?;

        Ok((average, distance_weight(matched.distance_km)))
    }

    /// Run a single job and finalize its cell.
    ///
    /// # Errors
    /// Returns [`ScoreError::NoData`] when every point in the job failed.
    pub async fn run_single(&self, region: Region, window: TimeWindow) -> Result<u8, ScoreError> {
        self.run_job(region, window).await.final_score()
    }

    /// Run all four jobs in immediate succession (one sequential chain of
    /// twelve fetches) and report once every cell has completed.
    ///
    /// Returns `None` when some completed cell ended up with no data; the
    /// combined report is withheld rather than emitted partially.
    pub async fn refresh_all(&self) -> Option<Scoreboard> {
        let mut context = RefreshContext::new();

        for region in Region::ALL {
            for window in TimeWindow::ALL {
                let cell = self.run_job(region, window).await;
                context.complete(region, window, cell);

                // Gate is consulted after every job; it only fires once all
                // four cells are done
                if let Some(board) = context.try_report() {
                    return Some(board);
                }
            }
        }

        tracing::warn!("Refresh completed but not all cells have data; withholding report");
        None
    }
}

/// Per-invocation accumulator state for a refresh-all cycle.
///
/// Completion is an explicit per-cell flag (a populated slot), not inferred
/// from the accumulated score, so a fully disqualified cell still counts as
/// ready and reports 0.
#[derive(Debug, Default)]
pub struct RefreshContext {
    cells: [[Option<ScoreCell>; 2]; 2],
    reported: bool,
}

fn region_index(region: Region) -> usize {
    match region {
        Region::North => 0,
        Region::South => 1,
    }
}

fn window_index(window: TimeWindow) -> usize {
    match window {
        TimeWindow::Morning => 0,
        TimeWindow::Afternoon => 1,
    }
}

impl RefreshContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a finished job's cell.
    pub fn complete(&mut self, region: Region, window: TimeWindow, cell: ScoreCell) {
        self.cells[region_index(region)][window_index(window)] = Some(cell);
    }

    fn cell(&self, region: Region, window: TimeWindow) -> Option<&ScoreCell> {
        self.cells[region_index(region)][window_index(window)].as_ref()
    }

    /// True once every (region, window) job has run to completion.
    pub fn all_completed(&self) -> bool {
        self.cells.iter().flatten().all(Option::is_some)
    }

    /// Emit the combined report if all four cells are ready.
    ///
    /// Fires at most once per context. Returns `None` before all jobs have
    /// completed, after a report was already emitted, or when a completed
    /// cell has no data (that report is withheld, with a warning from the
    /// caller).
    pub fn try_report(&mut self) -> Option<Scoreboard> {
        if self.reported || !self.all_completed() {
            return None;
        }

        let score = |region, window| -> Result<u8, ScoreError> {
            self.cell(region, window)
                .ok_or(ScoreError::NoData)?
                .final_score()
        };

        let board = (|| -> Result<Scoreboard, ScoreError> {
            Ok(Scoreboard {
                north_morning: score(Region::North, TimeWindow::Morning)?,
                north_afternoon: score(Region::North, TimeWindow::Afternoon)?,
                south_morning: score(Region::South, TimeWindow::Morning)?,
                south_afternoon: score(Region::South, TimeWindow::Afternoon)?,
            })
        })();

        match board {
            Ok(board) => {
                self.reported = true;
                Some(board)
            }
            Err(ScoreError::NoData) => None,
        }
    }
}
