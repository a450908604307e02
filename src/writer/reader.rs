/// Structured-parser collaborator: reads the registered file into the store.
use figment::Figment;
use figment::providers::{Format, Json, Yaml};
use serde_json::{Map, Value};

use super::errors::ReadError;
use super::store::{ConfigFormat, ConfigStore};

/// Reads and parses the file registered in a [`ConfigStore`].
///
/// Only invoked after the path has passed validation.
pub trait ConfigReader: Send + Sync {
    /// Populate `store` from the file at `store.path()`.
    ///
    /// # Errors
    ///
    /// Returns `ReadError` if the file cannot be read or decoded.
    fn read_config(&self, store: &mut ConfigStore) -> Result<(), ReadError>;
}

/// Reads JSON and YAML files through `figment` providers.
#[derive(Debug, Default, Clone, Copy)]
pub struct FigmentReader;

impl ConfigReader for FigmentReader {
    fn read_config(&self, store: &mut ConfigStore) -> Result<(), ReadError> {
        // figment's file providers treat a missing file as empty, so read it here.
        let content = std::fs::read_to_string(store.path())?;

        let figment = match store.format() {
            ConfigFormat::Json => Figment::from(Json::string(&content)),
            ConfigFormat::Yaml => Figment::from(Yaml::string(&content)),
        };
        let entries: Map<String, Value> = figment.extract()?;

        tracing::debug!(
            path = %store.path().display(),
            format = %store.format(),
            keys = entries.len(),
            "output configuration parsed"
        );
        store.populate(entries);
        Ok(())
    }
}
