use crate::filters::City;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read catalog {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("catalog {path} is not a JSON object of city names to paths: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("catalog {path} names an unknown city {city:?}")]
    UnknownCity { path: PathBuf, city: String },
}

/// Maps each city to the file holding its trips.
///
/// Overrides are stored as a plain JSON object on disk:
/// ```json
/// {
///   "chicago": "chicago.csv",
///   "new york city": "/data/nyc/2017.csv.gz"
/// }
/// ```
/// Relative paths resolve against the data directory.
#[derive(Debug, Clone)]
pub struct DatasetCatalog {
    data_dir: PathBuf,
    entries: HashMap<City, PathBuf>,
}

impl DatasetCatalog {
    /// Catalog with the stock file name for every city under `data_dir`.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        let entries = City::ALL
            .iter()
            .map(|city| (*city, PathBuf::from(city.default_file())))
            .collect();
        Self {
            data_dir: data_dir.into(),
            entries,
        }
    }

    /// Stock catalog under `data_dir`, with entries replaced from the JSON file at `path`.
    pub fn load(data_dir: impl Into<PathBuf>, path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let overrides: HashMap<String, String> =
            serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        let mut catalog = Self::new(data_dir);
        for (name, file) in overrides {
            let city = name.parse::<City>().map_err(|_| ConfigError::UnknownCity {
                path: path.to_path_buf(),
                city: name.clone(),
            })?;
            catalog.entries.insert(city, PathBuf::from(file));
        }
        Ok(catalog)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Full path of the backing file for `city`.
    pub fn path_for(&self, city: City) -> PathBuf {
        let file = self
            .entries
            .get(&city)
            .cloned()
            .unwrap_or_else(|| PathBuf::from(city.default_file()));
        self.data_dir.join(file)
    }
}
