//! CSV row parser for bikeshare trip files.

use chrono::NaiveDateTime;
use serde::Deserialize;
use thiserror::Error;

use crate::table::Trip;

const TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
];

#[derive(Debug, Error, PartialEq)]
pub enum RowError {
    #[error("unparsable {column} {value:?}")]
    Timestamp { column: &'static str, value: String },

    #[error("negative trip duration {0}")]
    NegativeDuration(f64),
}

/// A row exactly as it appears in the CSV file. Unknown columns are ignored.
#[derive(Debug, Deserialize)]
pub struct RawTrip {
    #[serde(rename = "Start Time")]
    pub start_time: String,
    #[serde(rename = "End Time", default)]
    pub end_time: Option<String>,
    #[serde(rename = "Trip Duration")]
    pub trip_duration: f64,
    #[serde(rename = "Start Station")]
    pub start_station: String,
    #[serde(rename = "End Station")]
    pub end_station: String,
    #[serde(rename = "User Type", default)]
    pub user_type: Option<String>,
    #[serde(rename = "Gender", default)]
    pub gender: Option<String>,
    #[serde(rename = "Birth Year", default)]
    pub birth_year: Option<f64>,
}

/// Parses a start/end timestamp such as `2017-01-01 00:07:57`.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Converts a raw row into a [`Trip`], deriving its calendar fields.
///
/// # Errors
///
/// Returns an error if either timestamp is unparsable or the duration is negative.
pub fn parse_trip(raw: RawTrip) -> Result<Trip, RowError> {
    let start_time = parse_timestamp(&raw.start_time).ok_or_else(|| RowError::Timestamp {
        column: "Start Time",
        value: raw.start_time.clone(),
    })?;

    let end_time = match non_blank(raw.end_time) {
        Some(value) => Some(parse_timestamp(&value).ok_or(RowError::Timestamp {
            column: "End Time",
            value,
        })?),
        None => None,
    };

    if raw.trip_duration < 0.0 {
        return Err(RowError::NegativeDuration(raw.trip_duration));
    }

    let mut trip = Trip::new(
        start_time,
        raw.start_station.trim(),
        raw.end_station.trim(),
        raw.trip_duration,
    );
    trip.end_time = end_time;
    trip.user_type = non_blank(raw.user_type);
    trip.gender = non_blank(raw.gender);
    // birth years are stored as floats ("1992.0") in the source files
    trip.birth_year = raw
        .birth_year
        .filter(|year| year.is_finite())
        .map(|year| year.round() as i32);

    Ok(trip)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike, Weekday};

    fn read_rows(csv_text: &str) -> Vec<RawTrip> {
        csv::Reader::from_reader(csv_text.as_bytes())
            .deserialize()
            .collect::<Result<Vec<RawTrip>, _>>()
            .unwrap()
    }

    #[test]
    fn test_parse_timestamp_formats() {
        let plain = parse_timestamp("2017-01-01 00:07:57").unwrap();
        assert_eq!(plain.year(), 2017);
        assert_eq!(plain.second(), 57);

        assert!(parse_timestamp("2017-06-23 15:09:32.5").is_some());
        assert!(parse_timestamp("2017-06-23T15:09:32").is_some());
        assert!(parse_timestamp("23/06/2017 15:09").is_none());
        assert!(parse_timestamp("").is_none());
    }

    #[test]
    fn test_parse_chicago_row() {
        let rows = read_rows(
            ",Start Time,End Time,Trip Duration,Start Station,End Station,User Type,Gender,Birth Year\n\
             1423854,2017-06-23 15:09:32,2017-06-23 15:14:53,321,Wood St & Hubbard St,Damen Ave & Chicago Ave,Subscriber,Male,1992.0\n",
        );
        let trip = parse_trip(rows.into_iter().next().unwrap()).unwrap();

        assert_eq!(trip.month, 6);
        assert_eq!(trip.day_of_week, Weekday::Fri);
        assert_eq!(trip.hour, 15);
        assert_eq!(trip.trip_duration, 321.0);
        assert_eq!(trip.start_station, "Wood St & Hubbard St");
        assert_eq!(trip.user_type.as_deref(), Some("Subscriber"));
        assert_eq!(trip.gender.as_deref(), Some("Male"));
        assert_eq!(trip.birth_year, Some(1992));
        assert!(trip.end_time.is_some());
    }

    #[test]
    fn test_parse_washington_row_without_demographics() {
        let rows = read_rows(
            ",Start Time,End Time,Trip Duration,Start Station,End Station,User Type\n\
             1621326,2017-06-21 08:36:34,2017-06-21 08:44:43,489.066,14th & Belmont St NW,15th & K St NW,Subscriber\n",
        );
        let trip = parse_trip(rows.into_iter().next().unwrap()).unwrap();

        assert_eq!(trip.trip_duration, 489.066);
        assert_eq!(trip.gender, None);
        assert_eq!(trip.birth_year, None);
    }

    #[test]
    fn test_blank_optional_cells_are_absent() {
        let rows = read_rows(
            "Start Time,Trip Duration,Start Station,End Station,User Type,Gender,Birth Year\n\
             2017-03-01 07:00:00,100,A,B,,,\n",
        );
        let trip = parse_trip(rows.into_iter().next().unwrap()).unwrap();

        assert_eq!(trip.user_type, None);
        assert_eq!(trip.gender, None);
        assert_eq!(trip.birth_year, None);
    }

    #[test]
    fn test_bad_start_time() {
        let rows = read_rows(
            "Start Time,Trip Duration,Start Station,End Station\n\
             yesterday,100,A,B\n",
        );
        let err = parse_trip(rows.into_iter().next().unwrap()).unwrap_err();
        assert_eq!(
            err,
            RowError::Timestamp {
                column: "Start Time",
                value: "yesterday".to_string()
            }
        );
    }

    #[test]
    fn test_negative_duration() {
        let rows = read_rows(
            "Start Time,Trip Duration,Start Station,End Station\n\
             2017-03-01 07:00:00,-5,A,B\n",
        );
        let err = parse_trip(rows.into_iter().next().unwrap()).unwrap_err();
        assert_eq!(err, RowError::NegativeDuration(-5.0));
    }
}
