//! Dataset loading: resolves a city to its file, parses every row and
//! keeps the rows matching the month/day filter.

use flate2::read::GzDecoder;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

use crate::catalog::DatasetCatalog;
use crate::filters::{City, Filter, Selection};
use crate::parser::{RawTrip, RowError, parse_trip};
use crate::table::{Schema, Trip, TripTable};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("no dataset for {city} at {} (or a .gz alongside it)", path.display())]
    MissingDataset { city: City, path: PathBuf },

    #[error("failed to open {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV in {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{} record {record}: {source}", path.display())]
    Row {
        path: PathBuf,
        record: usize,
        #[source]
        source: RowError,
    },
}

/// Loads the trips of `filter.city` and keeps those matching its month and day.
///
/// Falls back to `<file>.gz` when the plain file is absent.
///
/// # Errors
///
/// [`LoadError::MissingDataset`] when neither file exists; other variants for
/// unreadable files, malformed CSV and unparsable rows.
#[tracing::instrument(
    skip_all,
    fields(city = %filter.city, month = %filter.month, day = %filter.day)
)]
pub fn load_trips(catalog: &DatasetCatalog, filter: &Filter) -> Result<TripTable, LoadError> {
    let path = catalog.path_for(filter.city);
    let (reader, source) = open_dataset(filter.city, &path)?;
    let table = read_trips(reader, &source, *filter)?;
    info!(
        path = %source.display(),
        rows = table.len(),
        "Dataset loaded"
    );
    Ok(table)
}

fn gz_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".gz");
    PathBuf::from(name)
}

fn open_dataset(city: City, path: &Path) -> Result<(Box<dyn Read>, PathBuf), LoadError> {
    let open = |p: &Path| {
        File::open(p).map_err(|source| LoadError::Io {
            path: p.to_path_buf(),
            source,
        })
    };

    if path.exists() {
        let reader: Box<dyn Read> = Box::new(open(path)?);
        return Ok((reader, path.to_path_buf()));
    }

    let compressed = gz_path(path);
    if compressed.exists() {
        debug!(path = %compressed.display(), "Reading gzip-compressed dataset");
        let reader: Box<dyn Read> = Box::new(GzDecoder::new(open(&compressed)?));
        return Ok((reader, compressed));
    }

    Err(LoadError::MissingDataset {
        city,
        path: path.to_path_buf(),
    })
}

/// Parses CSV trips from `reader`, keeping rows that match `filter`.
///
/// `source` is only used to label errors.
pub fn read_trips<R: Read>(
    reader: R,
    source: &Path,
    filter: Filter,
) -> Result<TripTable, LoadError> {
    let csv_error = |e: csv::Error| LoadError::Csv {
        path: source.to_path_buf(),
        source: e,
    };

    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let schema = Schema::from_headers(rdr.headers().map_err(csv_error)?.iter());
    debug!(?schema, "Detected dataset schema");

    let mut trips = Vec::new();
    let mut total = 0usize;

    for (index, result) in rdr.deserialize::<RawTrip>().enumerate() {
        let raw = result.map_err(csv_error)?;
        let trip = parse_trip(raw).map_err(|e| LoadError::Row {
            path: source.to_path_buf(),
            record: index + 1,
            source: e,
        })?;

        total += 1;
        if keeps(&filter, &trip) {
            trips.push(trip);
        }
    }

    debug!(total, kept = trips.len(), "Applied month/day filter");
    Ok(TripTable::new(filter, schema, trips))
}

/// Whether `trip` falls in the filter's month and day.
pub fn keeps(filter: &Filter, trip: &Trip) -> bool {
    let month_ok = match filter.month {
        Selection::All => true,
        Selection::Only(month) => month.number() == trip.month,
    };
    month_ok && filter.day.matches(trip.day_of_week)
}
