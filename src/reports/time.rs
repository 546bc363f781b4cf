use chrono::Weekday;
use serde::Serialize;

use crate::filters::day_name;
use crate::reports::frequency::{Ranked, mode};
use crate::table::TripTable;

const WEEK_FROM_SUNDAY: [Weekday; 7] = [
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

/// Most frequent month, weekday and start hour.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeStats {
    /// Month number, 1-12.
    pub most_common_month: Option<Ranked<u32>>,
    pub most_common_day: Option<Ranked<String>>,
    /// Hour of day, 0-23.
    pub most_common_hour: Option<Ranked<u32>>,
}

impl TimeStats {
    #[tracing::instrument(name = "time_stats", skip_all, fields(trips = table.len()))]
    pub fn from_table(table: &TripTable) -> Self {
        let trips = table.trips();

        // weekdays are counted by position from Sunday so ties resolve in week order
        let most_common_day = mode(trips.iter().map(|t| t.day_of_week.num_days_from_sunday()))
            .map(|ranked| {
                ranked.map(|index| day_name(WEEK_FROM_SUNDAY[index as usize]).to_string())
            });

        TimeStats {
            most_common_month: mode(trips.iter().map(|t| t.month)),
            most_common_day,
            most_common_hour: mode(trips.iter().map(|t| t.hour)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Schema;
    use crate::table::fixtures::{table, trip};

    #[test]
    fn test_most_common_hour() {
        let t = table(
            Schema::default(),
            vec![
                trip(5, 8, "A", "B", 60.0),
                trip(6, 8, "A", "B", 60.0),
                trip(7, 17, "A", "B", 60.0),
            ],
        );

        let stats = TimeStats::from_table(&t);

        assert_eq!(stats.most_common_hour, Some(Ranked { value: 8, count: 2 }));
        assert_eq!(stats.most_common_month, Some(Ranked { value: 6, count: 3 }));
    }

    #[test]
    fn test_most_common_day() {
        // June 2017: the 4th and 11th were Sundays, the 5th a Monday
        let t = table(
            Schema::default(),
            vec![
                trip(4, 9, "A", "B", 60.0),
                trip(5, 9, "A", "B", 60.0),
                trip(11, 9, "A", "B", 60.0),
            ],
        );

        let stats = TimeStats::from_table(&t);

        assert_eq!(
            stats.most_common_day,
            Some(Ranked {
                value: "Sunday".to_string(),
                count: 2
            })
        );
    }

    #[test]
    fn test_day_tie_resolves_in_week_order() {
        // Saturday the 10th against Monday the 5th
        let t = table(
            Schema::default(),
            vec![trip(10, 9, "A", "B", 60.0), trip(5, 9, "A", "B", 60.0)],
        );

        let stats = TimeStats::from_table(&t);

        assert_eq!(stats.most_common_day.unwrap().value, "Monday");
    }

    #[test]
    fn test_empty_table_has_no_modes() {
        let stats = TimeStats::from_table(&table(Schema::default(), vec![]));

        assert_eq!(stats.most_common_month, None);
        assert_eq!(stats.most_common_day, None);
        assert_eq!(stats.most_common_hour, None);
    }
}
