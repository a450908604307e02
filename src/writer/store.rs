/// The shared output-configuration store and its supported formats.
use std::fmt;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

/// Structured formats accepted for the output configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Yaml,
}

impl ConfigFormat {
    /// Map a lowercased file extension to a format.
    ///
    /// Only `json`, `yaml` and `yml` are recognized.
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }
}

impl fmt::Display for ConfigFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => f.write_str("json"),
            Self::Yaml => f.write_str("yaml"),
        }
    }
}

/// Key/value view of one loaded output configuration file.
///
/// A store is created with its path registered and is populated by a
/// [`super::ConfigReader`]. Once handed out by [`super::OutputConfig`] it is
/// read-only.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
    format: ConfigFormat,
    entries: Map<String, Value>,
}

impl ConfigStore {
    /// Register `path` with an empty store.
    #[must_use]
    pub fn new(path: &Path, format: ConfigFormat) -> Self {
        Self {
            path: path.to_path_buf(),
            format,
            entries: Map::new(),
        }
    }

    /// Path of the registered configuration file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Format detected from the file extension.
    #[must_use]
    pub fn format(&self) -> ConfigFormat {
        self.format
    }

    /// Replace the store contents with a parsed document.
    pub fn populate(&mut self, entries: Map<String, Value>) {
        self.entries = entries;
    }

    /// Top-level entries, in key order.
    pub fn entries(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.entries.iter()
    }

    /// Look up a raw value by dotted key (`"output.format"`).
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<&Value> {
        let mut parts = key.split('.');
        let first = parts.next()?;
        let mut current = self.entries.get(first)?;
        for part in parts {
            current = current.as_object()?.get(part)?;
        }
        Some(current)
    }

    /// Number of top-level entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the loaded document has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
