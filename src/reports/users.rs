use serde::Serialize;

use crate::reports::frequency::{Ranked, mode, value_counts};
use crate::table::{Capability, TripTable};

/// Earliest, most recent and most frequent birth year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BirthYearStats {
    pub most_common: Option<Ranked<i32>>,
    pub most_recent: Option<i32>,
    pub earliest: Option<i32>,
}

/// User type, gender and birth-year breakdown.
///
/// `genders` and `birth_years` are `None` when the city's dataset has no such
/// column, which is different from the column being present but blank.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserStats {
    pub user_types: Vec<Ranked<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genders: Option<Vec<Ranked<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_years: Option<BirthYearStats>,
}

fn owned(counts: Vec<Ranked<&str>>) -> Vec<Ranked<String>> {
    counts.into_iter().map(|r| r.map(str::to_string)).collect()
}

impl UserStats {
    #[tracing::instrument(name = "user_stats", skip_all, fields(trips = table.len()))]
    pub fn from_table(table: &TripTable) -> Self {
        let trips = table.trips();

        let user_types = owned(value_counts(
            trips.iter().filter_map(|t| t.user_type.as_deref()),
        ));

        let genders = table
            .supports(Capability::Gender)
            .then(|| owned(value_counts(trips.iter().filter_map(|t| t.gender.as_deref()))));

        let birth_years = table.supports(Capability::BirthYear).then(|| {
            let years: Vec<i32> = trips.iter().filter_map(|t| t.birth_year).collect();
            BirthYearStats {
                most_common: mode(years.iter().copied()),
                most_recent: years.iter().copied().max(),
                earliest: years.iter().copied().min(),
            }
        });

        UserStats {
            user_types,
            genders,
            birth_years,
        }
    }
}
