//! Fixed viewing geometry for Mount Fuji.
//!
//! Each region owns three observation points ordered observer → midpoint →
//! approach. The coordinates approximate view conditions along the sightline
//! from the observer towards the summit; `distance_km` is the distance from
//! the observer reference point and drives the decay weighting.

use serde::{Deserialize, Serialize};

/// Viewing region relative to the summit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    North,
    South,
}

impl Region {
    pub const ALL: [Region; 2] = [Region::North, Region::South];

    /// The region's observation points, in fetch order.
    pub fn points(&self) -> &'static [ObservationPoint; 3] {
        match self {
            Region::North => &NORTH_POINTS,
            Region::South => &SOUTH_POINTS,
        }
    }

    /// Dampening factor to account for different atmospheric regions.
    ///
    /// The southern sightline crosses the coastal haze belt, so it is
    /// systematically penalized relative to the northern one.
    pub fn dampening(&self) -> f64 {
        match self {
            Region::North => 1.0,
            Region::South => 0.75,
        }
    }

    /// Match the coordinates echoed by the forecast provider back to the
    /// originating observation point.
    ///
    /// The provider snaps requests to its model grid, so the echoed
    /// coordinates can differ slightly from the requested ones. The points
    /// sit only 0.05° apart in latitude, closer than the snapping slack, so
    /// the match must take the nearest point; the tolerance then only
    /// rejects echoes that belong to no configured point at all.
    pub fn point_for(&self, latitude: f64, longitude: f64) -> Option<&'static ObservationPoint> {
        const TOLERANCE_DEG: f64 = 0.125;
        let distance_sq = |p: &ObservationPoint| {
            let dlat = p.latitude - latitude;
            let dlon = p.longitude - longitude;
            dlat * dlat + dlon * dlon
        };
        self.points()
            .iter()
            .min_by(|a, b| distance_sq(a).total_cmp(&distance_sq(b)))
            .filter(|p| {
                (p.latitude - latitude).abs() <= TOLERANCE_DEG
                    && (p.longitude - longitude).abs() <= TOLERANCE_DEG
            })
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Region::North => write!(f, "north"),
            Region::South => write!(f, "south"),
        }
    }
}

/// Time of day the forecast is scored for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeWindow {
    Morning,
    Afternoon,
}

impl TimeWindow {
    pub const ALL: [TimeWindow; 2] = [TimeWindow::Morning, TimeWindow::Afternoon];

    /// Local (Asia/Tokyo) hour range covered by this window, inclusive.
    pub fn hour_range(&self) -> (u32, u32) {
        match self {
            TimeWindow::Morning => (6, 11),
            TimeWindow::Afternoon => (12, 17),
        }
    }
}

impl std::fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TimeWindow::Morning => write!(f, "morning"),
            TimeWindow::Afternoon => write!(f, "afternoon"),
        }
    }
}

/// One fixed weather-query location along a region's sightline
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObservationPoint {
    pub latitude: f64,
    pub longitude: f64,
    pub distance_km: f64,
}

const NORTH_POINTS: [ObservationPoint; 3] = [
    // Observer location
    ObservationPoint {
        latitude: 35.5,
        longitude: 138.75,
        distance_km: 0.0,
    },
    // Mid-point
    ObservationPoint {
        latitude: 35.45,
        longitude: 138.75,
        distance_km: 5.55,
    },
    // Approach
    ObservationPoint {
        latitude: 35.4,
        longitude: 138.75,
        distance_km: 11.09,
    },
];

const SOUTH_POINTS: [ObservationPoint; 3] = [
    // Observer location
    ObservationPoint {
        latitude: 35.2,
        longitude: 138.6875,
        distance_km: 0.0,
    },
    // Mid-point
    ObservationPoint {
        latitude: 35.25,
        longitude: 138.6875,
        distance_km: 5.55,
    },
    // Approach
    ObservationPoint {
        latitude: 35.3,
        longitude: 138.75,
        distance_km: 12.47,
    },
];
