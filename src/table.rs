//! In-memory trip table produced by the loader.

use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};

use crate::filters::{City, Filter};

/// One ride, with the calendar fields derived from its start time.
#[derive(Debug, Clone, PartialEq)]
pub struct Trip {
    pub start_time: NaiveDateTime,
    pub end_time: Option<NaiveDateTime>,
    pub trip_duration: f64,
    pub start_station: String,
    pub end_station: String,
    pub user_type: Option<String>,
    pub gender: Option<String>,
    pub birth_year: Option<i32>,

    // derived at load time
    pub month: u32,
    pub day_of_week: Weekday,
    pub hour: u32,
}

impl Trip {
    /// Builds a trip and derives month, weekday and hour from `start_time`.
    pub fn new(
        start_time: NaiveDateTime,
        start_station: impl Into<String>,
        end_station: impl Into<String>,
        trip_duration: f64,
    ) -> Self {
        Trip {
            start_time,
            end_time: None,
            trip_duration,
            start_station: start_station.into(),
            end_station: end_station.into(),
            user_type: None,
            gender: None,
            birth_year: None,
            month: start_time.month(),
            day_of_week: start_time.weekday(),
            hour: start_time.hour(),
        }
    }

    #[cfg(test)]
    pub fn with_user_type(mut self, user_type: &str) -> Self {
        self.user_type = Some(user_type.to_string());
        self
    }

    #[cfg(test)]
    pub fn with_demographics(mut self, gender: Option<&str>, birth_year: Option<i32>) -> Self {
        self.gender = gender.map(str::to_string);
        self.birth_year = birth_year;
        self
    }
}

/// Optional columns a city's dataset may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    Gender,
    BirthYear,
}

/// Which optional columns the backing file exposes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Schema {
    pub gender: bool,
    pub birth_year: bool,
}

impl Schema {
    pub const GENDER_COLUMN: &'static str = "Gender";
    pub const BIRTH_YEAR_COLUMN: &'static str = "Birth Year";

    /// Detects capabilities from a CSV header row.
    pub fn from_headers<'a>(headers: impl IntoIterator<Item = &'a str>) -> Self {
        let mut schema = Schema::default();
        for header in headers {
            match header.trim() {
                Self::GENDER_COLUMN => schema.gender = true,
                Self::BIRTH_YEAR_COLUMN => schema.birth_year = true,
                _ => {}
            }
        }
        schema
    }

    pub fn supports(&self, capability: Capability) -> bool {
        match capability {
            Capability::Gender => self.gender,
            Capability::BirthYear => self.birth_year,
        }
    }
}

/// The filtered trips of one city. Read-only once built.
#[derive(Debug, Clone)]
pub struct TripTable {
    filter: Filter,
    schema: Schema,
    trips: Vec<Trip>,
}

impl TripTable {
    pub fn new(filter: Filter, schema: Schema, trips: Vec<Trip>) -> Self {
        Self {
            filter,
            schema,
            trips,
        }
    }

    pub fn city(&self) -> City {
        self.filter.city
    }

    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    pub fn supports(&self, capability: Capability) -> bool {
        self.schema.supports(capability)
    }

    pub fn trips(&self) -> &[Trip] {
        &self.trips
    }

    pub fn len(&self) -> usize {
        self.trips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }
}
