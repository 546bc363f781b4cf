use serde::Serialize;

use crate::reports::frequency::{Ranked, mode};
use crate::table::TripTable;

/// A start station and end station taken together.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct StationPair {
    pub start: String,
    pub end: String,
}

/// Most popular start station, end station and start/end combination.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationStats {
    pub most_common_start: Option<Ranked<String>>,
    pub most_common_end: Option<Ranked<String>>,
    pub most_common_trip: Option<Ranked<StationPair>>,
}

impl StationStats {
    #[tracing::instrument(name = "station_stats", skip_all, fields(trips = table.len()))]
    pub fn from_table(table: &TripTable) -> Self {
        let trips = table.trips();

        let most_common_trip = mode(
            trips
                .iter()
                .map(|t| (t.start_station.as_str(), t.end_station.as_str())),
        )
        .map(|ranked| {
            ranked.map(|(start, end)| StationPair {
                start: start.to_string(),
                end: end.to_string(),
            })
        });

        StationStats {
            most_common_start: mode(trips.iter().map(|t| t.start_station.as_str()))
                .map(|r| r.map(str::to_string)),
            most_common_end: mode(trips.iter().map(|t| t.end_station.as_str()))
                .map(|r| r.map(str::to_string)),
            most_common_trip,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Schema;
    use crate::table::fixtures::{table, trip};

    #[test]
    fn test_popular_stations() {
        let t = table(
            Schema::default(),
            vec![
                trip(5, 8, "Canal St", "Clark St", 60.0),
                trip(5, 9, "Canal St", "Wells St", 60.0),
                trip(6, 9, "Wells St", "Clark St", 60.0),
                trip(6, 10, "Canal St", "Clark St", 60.0),
            ],
        );

        let stats = StationStats::from_table(&t);

        assert_eq!(stats.most_common_start.unwrap().value, "Canal St");
        assert_eq!(
            stats.most_common_end,
            Some(Ranked {
                value: "Clark St".to_string(),
                count: 3
            })
        );
        assert_eq!(
            stats.most_common_trip,
            Some(Ranked {
                value: StationPair {
                    start: "Canal St".to_string(),
                    end: "Clark St".to_string(),
                },
                count: 2
            })
        );
    }

    #[test]
    fn test_pair_is_counted_jointly() {
        // the most common start and end never occur together
        let t = table(
            Schema::default(),
            vec![
                trip(5, 8, "A", "X", 60.0),
                trip(5, 8, "A", "Y", 60.0),
                trip(5, 8, "B", "Z", 60.0),
                trip(5, 8, "B", "Z", 60.0),
                trip(5, 8, "C", "Z", 60.0),
                trip(5, 8, "A", "W", 60.0),
            ],
        );

        let stats = StationStats::from_table(&t);

        assert_eq!(stats.most_common_start.unwrap().value, "A");
        assert_eq!(stats.most_common_end.unwrap().value, "Z");
        let pair = stats.most_common_trip.unwrap();
        assert_eq!(pair.value.start, "B");
        assert_eq!(pair.value.end, "Z");
        assert_eq!(pair.count, 2);
    }

    #[test]
    fn test_empty_table_reports_nothing() {
        let stats = StationStats::from_table(&table(Schema::default(), vec![]));

        assert_eq!(stats.most_common_start, None);
        assert_eq!(stats.most_common_end, None);
        assert_eq!(stats.most_common_trip, None);
    }
}
