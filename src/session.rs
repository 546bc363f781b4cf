//! Drives the interactive explore loop and the one-shot report.

use anyhow::{Context, Result};
use std::io::{self, BufRead, Write};
use tracing::info;

use crate::browser::browse;
use crate::catalog::DatasetCatalog;
use crate::filters::{Choices, Filter};
use crate::loader::load_trips;
use crate::output::{
    self, timed_section, write_duration_stats, write_station_stats, write_time_stats,
    write_user_stats,
};
use crate::prompt::{Console, select_filter};
use crate::reports::{DurationStats, Report, StationStats, TimeStats, UserStats};
use crate::table::TripTable;

const RESTART_QUESTION: &str = "\nWould you like to restart? Enter yes or no.\n";
pub const NO_MATCHES: &str = "No trips match your filters.";

/// How the one-shot report is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Format {
    #[default]
    Text,
    Json,
}

/// Runs the four reporters in order, each in its own timed section.
pub fn print_reports<W: Write>(out: &mut W, table: &TripTable) -> io::Result<()> {
    if table.is_empty() {
        writeln!(out, "\n{NO_MATCHES}")?;
    }

    timed_section(
        out,
        "Calculating The Most Frequent Times of Bikeshare Use...",
        || TimeStats::from_table(table),
        write_time_stats,
    )?;
    timed_section(
        out,
        "Calculating The Most Popular Stations and Trip...",
        || StationStats::from_table(table),
        write_station_stats,
    )?;
    timed_section(
        out,
        "Calculating Trip Duration...",
        || DurationStats::from_table(table),
        write_duration_stats,
    )?;
    timed_section(
        out,
        "Calculating User Stats...",
        || UserStats::from_table(table),
        write_user_stats,
    )?;
    Ok(())
}

/// The interactive loop: choose filters, load, report, browse, maybe restart.
pub struct Session {
    catalog: DatasetCatalog,
    choices: Choices,
}

impl Session {
    pub fn new(catalog: DatasetCatalog, choices: Choices) -> Self {
        Self { catalog, choices }
    }

    /// Runs rounds until the user declines to restart or the input ends.
    ///
    /// Returns the number of completed rounds.
    ///
    /// # Errors
    ///
    /// Load failures are fatal and end the session.
    pub fn run<R: BufRead, W: Write>(&self, console: &mut Console<R, W>) -> Result<usize> {
        let mut rounds = 0;

        loop {
            let Some(filter) = select_filter(console, &self.choices)? else {
                info!(rounds, "Input closed, ending session");
                break;
            };

            let table = load(&self.catalog, &filter)?;
            print_reports(console.output(), &table)?;
            browse(console, &table)?;
            rounds += 1;

            if !console.confirm(RESTART_QUESTION)? {
                break;
            }
            info!(rounds, "Restarting session");
        }

        Ok(rounds)
    }
}

fn load(catalog: &DatasetCatalog, filter: &Filter) -> Result<TripTable> {
    load_trips(catalog, filter).with_context(|| format!("failed to load {} trips", filter.city))
}

/// Loads once for `filter` and prints every report in `format`.
pub fn run_report<W: Write>(
    catalog: &DatasetCatalog,
    filter: &Filter,
    format: Format,
    out: &mut W,
) -> Result<()> {
    let table = load(catalog, filter)?;

    match format {
        Format::Text => {
            if table.is_empty() {
                writeln!(out, "{NO_MATCHES}")?;
            }
            output::write_report(out, &Report::from_table(&table))?;
        }
        Format::Json => output::print_json(out, &Report::from_table(&table))?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Schema;
    use crate::table::fixtures::{table, trip};

    #[test]
    fn test_print_reports_runs_every_section_in_order() {
        let t = table(Schema::default(), vec![trip(5, 8, "A", "B", 60.0)]);
        let mut buf = Vec::new();

        print_reports(&mut buf, &t).unwrap();
        let text = String::from_utf8(buf).unwrap();

        let times = text.find("Most Frequent Times").unwrap();
        let stations = text.find("Most Popular Stations").unwrap();
        let duration = text.find("Calculating Trip Duration").unwrap();
        let users = text.find("Calculating User Stats").unwrap();
        assert!(times < stations && stations < duration && duration < users);
        assert_eq!(text.matches("This took").count(), 4);
        assert!(!text.contains(NO_MATCHES));
    }

    #[test]
    fn test_print_reports_on_empty_table() {
        let t = table(Schema::default(), vec![]);
        let mut buf = Vec::new();

        print_reports(&mut buf, &t).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert!(text.contains(NO_MATCHES));
        assert!(text.contains(output::NO_DATA));
        assert!(text.contains("Total travel time: 0 seconds"));
    }
}
