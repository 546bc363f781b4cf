//! Descriptive statistics over a loaded trip table.
//!
//! Each reporter is a pure function of the table. Every "most common" query
//! shares one tie-break rule: among equal counts the smallest key wins.

pub mod durations;
pub mod frequency;
pub mod stations;
pub mod time;
pub mod users;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::filters::City;
use crate::table::TripTable;

pub use durations::DurationStats;
pub use frequency::Ranked;
pub use stations::{StationPair, StationStats};
pub use time::TimeStats;
pub use users::{BirthYearStats, UserStats};

/// All four reports for one filtered table.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub generated_at: DateTime<Utc>,
    pub city: City,
    pub month: String,
    pub day: String,
    pub trip_count: usize,
    pub time: TimeStats,
    pub stations: StationStats,
    pub durations: DurationStats,
    pub users: UserStats,
}

impl Report {
    pub fn from_table(table: &TripTable) -> Self {
        let filter = table.filter();
        Report {
            generated_at: Utc::now(),
            city: filter.city,
            month: filter.month.to_string(),
            day: filter.day.to_string(),
            trip_count: table.len(),
            time: TimeStats::from_table(table),
            stations: StationStats::from_table(table),
            durations: DurationStats::from_table(table),
            users: UserStats::from_table(table),
        }
    }
}
