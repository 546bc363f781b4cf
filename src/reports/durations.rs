use serde::Serialize;

use crate::reports::frequency::mean;
use crate::table::TripTable;

/// Total and mean trip duration in seconds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DurationStats {
    pub trip_count: usize,
    pub total_seconds: f64,
    /// `None` when there are no trips.
    pub mean_seconds: Option<f64>,
}

impl DurationStats {
    #[tracing::instrument(name = "duration_stats", skip_all, fields(trips = table.len()))]
    pub fn from_table(table: &TripTable) -> Self {
        let durations: Vec<f64> = table.trips().iter().map(|t| t.trip_duration).collect();

        DurationStats {
            trip_count: durations.len(),
            total_seconds: durations.iter().fold(0.0, |acc, d| acc + d),
            mean_seconds: mean(&durations),
        }
    }
}
