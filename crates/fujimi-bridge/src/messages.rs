//! Wire messages exchanged with the watch client.
//!
//! Field and tag names follow the watch protocol keys exactly (snake_case
//! tags, camelCase score keys in the combined report).

use fujimi_forecast::{Region, TimeWindow};
use serde::{Deserialize, Serialize};

/// Messages received from the watch client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InboundMessage {
    /// Watch-side app finished starting up
    Ready,
    /// Refresh all four (region, time) cells and report them together
    UpdateAll,
    /// Refresh one (region, time) cell and report it alone
    UpdateSingle { region: Region, time: TimeWindow },
}

/// Messages sent to the watch client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutboundMessage {
    /// Companion startup handshake
    Ready,
    /// Result of a single-cell refresh
    NewScore {
        region: Region,
        time: TimeWindow,
        score: u8,
    },
    /// Combined result of a full refresh
    NewScores {
        #[serde(rename = "northMorning")]
        north_morning: u8,
        #[serde(rename = "northAfternoon")]
        north_afternoon: u8,
        #[serde(rename = "southMorning")]
        south_morning: u8,
        #[serde(rename = "southAfternoon")]
        south_afternoon: u8,
    },
}
