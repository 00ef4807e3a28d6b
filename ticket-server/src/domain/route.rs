//! Route waypoint records.

use serde::Serialize;

/// One stop on a train's route, normalized for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteStationInfo {
    /// Arrival time at this stop, "HH:MM". For the origin (sequence 1)
    /// this carries the departure time, since the platform reports no
    /// arrival there.
    pub arrival_time: String,

    /// Station display name.
    pub station_name: String,

    /// How long the train waits at this stop, e.g. "3分钟" or "----".
    pub stopover_duration: String,

    /// 1-based position of this stop along the full route.
    pub sequence_number: u32,
}
