//! Filter vocabulary: the cities, months and days a user may choose from.
//!
//! The accepted spellings live in fixed tables bundled into [`Choices`], which
//! the prompt and the CLI receive explicitly.

use chrono::Weekday;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A city with a bikeshare dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum City {
    Chicago,
    NewYorkCity,
    Washington,
}

impl City {
    pub const ALL: [City; 3] = [City::Chicago, City::NewYorkCity, City::Washington];

    /// Lower-case name, as typed at the prompt and used as a catalog key.
    pub fn name(self) -> &'static str {
        match self {
            City::Chicago => "chicago",
            City::NewYorkCity => "new york city",
            City::Washington => "washington",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            City::Chicago => "Chicago",
            City::NewYorkCity => "New York City",
            City::Washington => "Washington",
        }
    }

    /// Backing file name used when the catalog has no override.
    pub fn default_file(self) -> &'static str {
        match self {
            City::Chicago => "chicago.csv",
            City::NewYorkCity => "new_york_city.csv",
            City::Washington => "washington.csv",
        }
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// A month that can be filtered on. The datasets cover January to June.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
}

impl Month {
    pub const ALL: [Month; 6] = [
        Month::January,
        Month::February,
        Month::March,
        Month::April,
        Month::May,
        Month::June,
    ];

    /// 1-based position in the month list, comparable with `chrono`'s month numbers.
    pub fn number(self) -> u32 {
        self as u32 + 1
    }

    pub fn name(self) -> &'static str {
        month_name(self.number()).unwrap_or("unknown")
    }
}

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Name of a 1-based month number, `None` outside 1..=12.
pub fn month_name(number: u32) -> Option<&'static str> {
    let index = usize::try_from(number).ok()?.checked_sub(1)?;
    MONTH_NAMES.get(index).copied()
}

/// Capitalized weekday name, e.g. `Sunday`.
pub fn day_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Sun => "Sunday",
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
    }
}

/// Either every value, or exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection<T> {
    All,
    Only(T),
}

impl<T: Copy + PartialEq> Selection<T> {
    pub fn matches(&self, value: T) -> bool {
        match self {
            Selection::All => true,
            Selection::Only(wanted) => *wanted == value,
        }
    }
}

impl fmt::Display for Selection<Month> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::All => f.write_str("all"),
            Selection::Only(month) => f.write_str(month.name()),
        }
    }
}

impl fmt::Display for Selection<Weekday> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::All => f.write_str("all"),
            Selection::Only(day) => f.write_str(day_name(*day)),
        }
    }
}

/// The validated (city, month, day) triple scoping one load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Filter {
    pub city: City,
    pub month: Selection<Month>,
    pub day: Selection<Weekday>,
}

impl Filter {
    /// A filter keeping every row of `city`.
    pub fn all(city: City) -> Self {
        Self {
            city,
            month: Selection::All,
            day: Selection::All,
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "city={} month={} day={}", self.city, self.month, self.day)
    }
}

/// One accepted spelling and the value it stands for.
pub type Choice<T> = (&'static str, T);

pub const CITY_CHOICES: &[Choice<City>] = &[
    ("chicago", City::Chicago),
    ("new york city", City::NewYorkCity),
    ("new york", City::NewYorkCity),
    ("washington", City::Washington),
];

pub const MONTH_CHOICES: &[Choice<Selection<Month>>] = &[
    ("january", Selection::Only(Month::January)),
    ("february", Selection::Only(Month::February)),
    ("march", Selection::Only(Month::March)),
    ("april", Selection::Only(Month::April)),
    ("may", Selection::Only(Month::May)),
    ("june", Selection::Only(Month::June)),
    ("all", Selection::All),
];

pub const DAY_CHOICES: &[Choice<Selection<Weekday>>] = &[
    ("sunday", Selection::Only(Weekday::Sun)),
    ("monday", Selection::Only(Weekday::Mon)),
    ("tuesday", Selection::Only(Weekday::Tue)),
    ("wednesday", Selection::Only(Weekday::Wed)),
    ("thursday", Selection::Only(Weekday::Thu)),
    ("friday", Selection::Only(Weekday::Fri)),
    ("saturday", Selection::Only(Weekday::Sat)),
    ("all", Selection::All),
];

/// The three enumerations a filter is chosen from.
#[derive(Debug, Clone, Copy)]
pub struct Choices {
    pub cities: &'static [Choice<City>],
    pub months: &'static [Choice<Selection<Month>>],
    pub days: &'static [Choice<Selection<Weekday>>],
}

impl Default for Choices {
    fn default() -> Self {
        Self {
            cities: CITY_CHOICES,
            months: MONTH_CHOICES,
            days: DAY_CHOICES,
        }
    }
}

/// Matches trimmed, lower-cased `input` against `table`.
pub fn lookup<T: Copy>(table: &[Choice<T>], input: &str) -> Option<T> {
    let wanted = input.trim().to_lowercase();
    table
        .iter()
        .find(|(name, _)| *name == wanted)
        .map(|(_, value)| *value)
}

#[derive(Debug, Error)]
#[error("unrecognised {kind} {value:?}, expected one of: {expected}")]
pub struct ChoiceError {
    kind: &'static str,
    value: String,
    expected: String,
}

fn parse_choice<T: Copy>(
    kind: &'static str,
    table: &[Choice<T>],
    input: &str,
) -> Result<T, ChoiceError> {
    lookup(table, input).ok_or_else(|| ChoiceError {
        kind,
        value: input.to_string(),
        expected: table
            .iter()
            .map(|(name, _)| *name)
            .collect::<Vec<_>>()
            .join(", "),
    })
}

impl FromStr for City {
    type Err = ChoiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_choice("city", CITY_CHOICES, s)
    }
}

impl FromStr for Selection<Month> {
    type Err = ChoiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_choice("month", MONTH_CHOICES, s)
    }
}

impl FromStr for Selection<Weekday> {
    type Err = ChoiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_choice("day", DAY_CHOICES, s)
    }
}
