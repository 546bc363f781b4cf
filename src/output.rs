//! Console rendering of reports and raw rows.
//!
//! Supports plain-text sections, pretty JSON, and CSV-formatted row windows.

use anyhow::Result;
use csv::WriterBuilder;
use serde::Serialize;
use std::io::{self, Write};
use std::time::{Duration, Instant};
use tracing::debug;

use crate::filters::month_name;
use crate::reports::{DurationStats, Ranked, Report, StationStats, TimeStats, UserStats};
use crate::table::Trip;

pub const SEPARATOR: &str = "----------------------------------------";
pub const NO_DATA: &str = "no data (no trips match the chosen filters)";

/// Prints `heading`, runs `compute`, renders its result and the elapsed time.
pub fn timed_section<W, T>(
    out: &mut W,
    heading: &str,
    compute: impl FnOnce() -> T,
    render: impl FnOnce(&mut W, &T) -> io::Result<()>,
) -> io::Result<T>
where
    W: Write,
{
    writeln!(out, "\n{heading}\n")?;
    let started = Instant::now();
    let value = compute();
    render(out, &value)?;
    let elapsed = started.elapsed();
    debug!(section = heading, elapsed_us = elapsed.as_micros() as u64, "Section computed");
    write_elapsed(out, elapsed)?;
    Ok(value)
}

pub fn write_elapsed<W: Write>(out: &mut W, elapsed: Duration) -> io::Result<()> {
    writeln!(out, "\nThis took {:.6} seconds.", elapsed.as_secs_f64())?;
    writeln!(out, "{SEPARATOR}")
}

/// Formats whole seconds as e.g. `1d 2h 3m 4s`, omitting leading zero units.
pub fn format_duration(seconds: f64) -> String {
    let total = seconds.max(0.0).round() as u64;
    let (days, rest) = (total / 86_400, total % 86_400);
    let (hours, rest) = (rest / 3_600, rest % 3_600);
    let (minutes, secs) = (rest / 60, rest % 60);

    let mut parts = Vec::new();
    if days > 0 {
        parts.push(format!("{days}d"));
    }
    if days > 0 || hours > 0 {
        parts.push(format!("{hours}h"));
    }
    if days > 0 || hours > 0 || minutes > 0 {
        parts.push(format!("{minutes}m"));
    }
    parts.push(format!("{secs}s"));
    parts.join(" ")
}

fn write_ranked_line<W: Write, K: std::fmt::Display>(
    out: &mut W,
    label: &str,
    ranked: Option<&Ranked<K>>,
) -> io::Result<()> {
    match ranked {
        Some(r) => writeln!(out, "{label}: {} ({} trips)", r.value, r.count),
        None => writeln!(out, "{label}: {NO_DATA}"),
    }
}

fn write_counts<W: Write>(out: &mut W, counts: &[Ranked<String>]) -> io::Result<()> {
    if counts.is_empty() {
        writeln!(out, "  {NO_DATA}")?;
    }
    for r in counts {
        writeln!(out, "  {}: {}", r.value, r.count)?;
    }
    Ok(())
}

pub fn write_time_stats<W: Write>(out: &mut W, stats: &TimeStats) -> io::Result<()> {
    let month = stats.most_common_month.as_ref().map(|r| Ranked {
        value: month_name(r.value).unwrap_or("unknown month"),
        count: r.count,
    });
    write_ranked_line(out, "The most common month for bike use is", month.as_ref())?;
    write_ranked_line(
        out,
        "The most common day of the week for bike use is",
        stats.most_common_day.as_ref(),
    )?;
    let hour = stats.most_common_hour.as_ref().map(|r| Ranked {
        value: format!("{:02}:00", r.value),
        count: r.count,
    });
    write_ranked_line(out, "The most common hour for bike use is", hour.as_ref())
}

pub fn write_station_stats<W: Write>(out: &mut W, stats: &StationStats) -> io::Result<()> {
    write_ranked_line(
        out,
        "The most commonly used station to start a bike trip",
        stats.most_common_start.as_ref(),
    )?;
    write_ranked_line(
        out,
        "The most commonly used station to end a bike trip",
        stats.most_common_end.as_ref(),
    )?;
    let trip = stats.most_common_trip.as_ref().map(|r| Ranked {
        value: format!("{} -> {}", r.value.start, r.value.end),
        count: r.count,
    });
    write_ranked_line(out, "The most commonly used start and end station", trip.as_ref())
}

pub fn write_duration_stats<W: Write>(out: &mut W, stats: &DurationStats) -> io::Result<()> {
    writeln!(
        out,
        "Total travel time: {} seconds ({})",
        stats.total_seconds,
        format_duration(stats.total_seconds)
    )?;
    match stats.mean_seconds {
        Some(mean) => writeln!(
            out,
            "Mean (average) travel time: {mean:.2} seconds ({})",
            format_duration(mean)
        ),
        None => writeln!(out, "Mean (average) travel time: {NO_DATA}"),
    }
}

pub fn write_user_stats<W: Write>(out: &mut W, stats: &UserStats) -> io::Result<()> {
    writeln!(out, "How many users of various types:\n")?;
    write_counts(out, &stats.user_types)?;
    writeln!(out)?;

    if let Some(genders) = &stats.genders {
        writeln!(out, "Counts of gender:\n")?;
        write_counts(out, genders)?;
        writeln!(out)?;
    }

    if let Some(years) = &stats.birth_years {
        write_ranked_line(
            out,
            "The most frequently occurring birth year",
            years.most_common.as_ref(),
        )?;
        let year_line =
            |year: Option<i32>| year.map_or_else(|| NO_DATA.to_string(), |y| y.to_string());
        writeln!(
            out,
            "The most recent birth year (youngest users): {}",
            year_line(years.most_recent)
        )?;
        writeln!(
            out,
            "The earliest birth year (oldest users): {}",
            year_line(years.earliest)
        )?;
    }
    Ok(())
}

/// Writes every section of an already computed report.
pub fn write_report<W: Write>(out: &mut W, report: &Report) -> io::Result<()> {
    writeln!(
        out,
        "{} trips in {} (month: {}, day: {})",
        report.trip_count, report.city, report.month, report.day
    )?;
    writeln!(out, "{SEPARATOR}")?;
    write_time_stats(out, &report.time)?;
    writeln!(out, "{SEPARATOR}")?;
    write_station_stats(out, &report.stations)?;
    writeln!(out, "{SEPARATOR}")?;
    write_duration_stats(out, &report.durations)?;
    writeln!(out, "{SEPARATOR}")?;
    write_user_stats(out, &report.users)?;
    writeln!(out, "{SEPARATOR}")
}

/// Writes the report as pretty-printed JSON.
pub fn print_json<W: Write>(out: &mut W, report: &Report) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, report)?;
    writeln!(out)?;
    Ok(())
}

#[derive(Serialize)]
struct RawRow<'a> {
    #[serde(rename = "Row")]
    row: usize,
    #[serde(rename = "Start Time")]
    start_time: String,
    #[serde(rename = "End Time")]
    end_time: Option<String>,
    #[serde(rename = "Trip Duration")]
    trip_duration: f64,
    #[serde(rename = "Start Station")]
    start_station: &'a str,
    #[serde(rename = "End Station")]
    end_station: &'a str,
    #[serde(rename = "User Type")]
    user_type: Option<&'a str>,
    #[serde(rename = "Gender")]
    gender: Option<&'a str>,
    #[serde(rename = "Birth Year")]
    birth_year: Option<i32>,
}

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Writes `trips` as CSV with a header, numbering rows from `offset`.
pub fn write_rows<W: Write>(out: &mut W, offset: usize, trips: &[Trip]) -> io::Result<()> {
    let mut writer = WriterBuilder::new().from_writer(&mut *out);
    for (i, trip) in trips.iter().enumerate() {
        writer.serialize(RawRow {
            row: offset + i,
            start_time: trip.start_time.format(TIMESTAMP_FORMAT).to_string(),
            end_time: trip
                .end_time
                .map(|t| t.format(TIMESTAMP_FORMAT).to_string()),
            trip_duration: trip.trip_duration,
            start_station: &trip.start_station,
            end_station: &trip.end_station,
            user_type: trip.user_type.as_deref(),
            gender: trip.gender.as_deref(),
            birth_year: trip.birth_year,
        })?;
    }
    writer.flush()?;
    Ok(())
}
