//! Static manufacturer dataset and key/alias lookup.
//!
//! The dataset is a JSON object mapping a normalized manufacturer key to a
//! [`DeviceRecord`]. A copy is bundled into the library at compile time; a
//! replacement file can be loaded from disk instead.

mod record;

pub use record::DeviceRecord;

use once_cell::sync::Lazy;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::resolver::normalize_manufacturer;

/// The dataset bundled with the library.
pub const EMBEDDED_DATA_JSON: &str = include_str!("../../data/dontkillmyapp_data.json");

static EMBEDDED: Lazy<DeviceDataset> = Lazy::new(|| DeviceDataset::load_or_empty(EMBEDDED_DATA_JSON));

/// Dataset loading errors.
#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("Failed to read dataset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse dataset: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid record '{key}': {source}")]
    InvalidRecord {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Immutable manufacturer key to [`DeviceRecord`] mapping.
///
/// Records keep the order in which they appear in the source document. Alias
/// lookups are answered from a reverse index built once at load time, where
/// the first record listing an alias owns it.
#[derive(Debug, Clone, Default)]
pub struct DeviceDataset {
    entries: Vec<(String, DeviceRecord)>,
    by_key: HashMap<String, usize>,
    by_alias: HashMap<String, usize>,
}

impl DeviceDataset {
    /// The dataset bundled with the library, parsed on first use.
    ///
    /// A corrupt bundle yields an empty dataset rather than a panic.
    pub fn embedded() -> &'static DeviceDataset {
        &EMBEDDED
    }

    /// Build a dataset from `(key, record)` pairs in the given order.
    ///
    /// Keys are normalized; a key that collides with an earlier one is dropped.
    pub fn from_entries<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, DeviceRecord)>,
        K: Into<String>,
    {
        let mut dataset = Self::default();

        for (raw_key, record) in entries {
            let raw_key = raw_key.into();
            let key = normalize_manufacturer(&raw_key);
            if key != raw_key {
                tracing::warn!("Dataset key '{}' is not normalized, using '{}'", raw_key, key);
            }
            if dataset.by_key.contains_key(&key) {
                tracing::warn!("Duplicate dataset key '{}', keeping the first record", key);
                continue;
            }

            let index = dataset.entries.len();
            for alias in &record.manufacturer_aliases {
                let alias = normalize_manufacturer(alias);
                if !alias.is_empty() {
                    dataset.by_alias.entry(alias).or_insert(index);
                }
            }
            dataset.by_key.insert(key.clone(), index);
            dataset.entries.push((key, record));
        }

        dataset
    }

    /// Parse a dataset from its JSON representation.
    pub fn from_json(json: &str) -> Result<Self, DatasetError> {
        let root: Map<String, Value> = serde_json::from_str(json)?;

        let mut entries = Vec::with_capacity(root.len());
        for (key, value) in root {
            match serde_json::from_value::<DeviceRecord>(value) {
                Ok(record) => entries.push((key, record)),
                Err(source) => return Err(DatasetError::InvalidRecord { key, source }),
            }
        }

        Ok(Self::from_entries(entries))
    }

    /// Read and parse a dataset file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    /// Parse a dataset, falling back to an empty one on failure.
    pub fn load_or_empty(json: &str) -> Self {
        Self::from_json(json).unwrap_or_else(|e| {
            tracing::error!("Failed to load device data, no instructions will be available: {}", e);
            Self::default()
        })
    }

    /// Read a dataset file, falling back to an empty dataset on failure.
    pub fn load_path_or_empty(path: impl AsRef<Path>) -> Self {
        Self::from_path(path).unwrap_or_else(|e| {
            tracing::error!("Failed to load device data, no instructions will be available: {}", e);
            Self::default()
        })
    }

    /// Find the record for a manufacturer.
    ///
    /// The input is normalized first. A direct key match wins; otherwise the
    /// first record (in document order) listing the name as an alias is
    /// returned. An empty name never matches.
    pub fn lookup_by_manufacturer(&self, manufacturer: &str) -> Option<&DeviceRecord> {
        let key = normalize_manufacturer(manufacturer);
        if key.is_empty() {
            return None;
        }

        let found = self
            .by_key
            .get(&key)
            .or_else(|| self.by_alias.get(&key))
            .map(|&index| &self.entries[index].1);

        tracing::debug!("Lookup '{}': {}", key, if found.is_some() { "found" } else { "not found" });
        found
    }

    /// Exact key match without normalization or alias fallback.
    pub fn get(&self, key: &str) -> Option<&DeviceRecord> {
        self.by_key.get(key).map(|&index| &self.entries[index].1)
    }

    /// Manufacturer keys in document order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    /// `(key, record)` pairs in document order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &DeviceRecord)> {
        self.entries.iter().map(|(key, record)| (key.as_str(), record))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
