//! Output configuration: path validation and one-time loading.
//!
//! Call [`OutputConfig::start`] before reading from the store. The load body
//! runs at most once per [`OutputConfig`], successfully or not; every later or
//! concurrent call receives the outcome of that first attempt.
pub mod errors;
pub mod reader;
pub mod store;

use std::path::{MAIN_SEPARATOR, Path};
use std::sync::{Arc, LazyLock, OnceLock};

pub use errors::{WriterError, is_invalid_ext_err, is_invalid_file_err};
pub use reader::{ConfigReader, FigmentReader};
pub use store::{ConfigFormat, ConfigStore};

static SHARED: LazyLock<OutputConfig> = LazyLock::new(|| OutputConfig::new(FigmentReader));

/// Handle to a lazily loaded output configuration.
pub struct OutputConfig {
    reader: Box<dyn ConfigReader>,
    state: OnceLock<Result<ConfigStore, WriterError>>,
}

impl OutputConfig {
    /// Create an unloaded handle that will parse files with `reader`.
    #[must_use]
    pub fn new(reader: impl ConfigReader + 'static) -> Self {
        Self {
            reader: Box::new(reader),
            state: OnceLock::new(),
        }
    }

    /// The process-wide instance, backed by [`FigmentReader`].
    #[must_use]
    pub fn shared() -> &'static Self {
        &SHARED
    }

    /// Validate `path` and load it into the store. Runs once.
    ///
    /// Returns the loaded store on success.
    ///
    /// # Errors
    ///
    /// Returns `WriterError::InvalidFile` if no file name can be found in the
    /// path, `WriterError::InvalidExtension` if the extension is missing or is
    /// not one of `json`, `yaml`, `yml`, and `WriterError::Read` if the file
    /// could not be read or parsed. Calls after the first return the first
    /// call's result regardless of `path`.
    pub fn start(&self, path: impl AsRef<Path>) -> Result<&ConfigStore, WriterError> {
        self.state
            .get_or_init(|| self.load(path.as_ref()))
            .as_ref()
            .map_err(Clone::clone)
    }

    /// Whether a load has been attempted, successfully or not.
    #[must_use]
    pub fn is_started(&self) -> bool {
        self.state.get().is_some()
    }

    fn load(&self, path: &Path) -> Result<ConfigStore, WriterError> {
        let shown = path.to_string_lossy().into_owned();

        let Some(file) = file_component(path) else {
            tracing::error!(path = %shown, "output config path has no file name");
            return Err(WriterError::InvalidFile { path: shown });
        };

        let extension = extension_of(&file);
        if extension.is_empty() {
            tracing::error!(path = %shown, "output config path has no extension");
            return Err(WriterError::InvalidExtension {
                path: shown,
                extension,
            });
        }

        let Some(format) = ConfigFormat::from_extension(&extension) else {
            tracing::error!(path = %shown, %extension, "output config has unsupported extension");
            return Err(WriterError::InvalidExtension {
                path: shown,
                extension,
            });
        };

        let mut store = ConfigStore::new(path, format);
        self.reader
            .read_config(&mut store)
            .map_err(|source| WriterError::Read {
                path: shown.clone(),
                source: Arc::new(source),
            })?;

        tracing::info!(path = %shown, %format, keys = store.len(), "output configuration loaded");
        Ok(store)
    }
}

/// Text after the last separator, taken lexically so `.` and `..` stay
/// as written. `None` when that text is empty.
fn file_component(path: &Path) -> Option<String> {
    let raw = path.to_string_lossy();
    let file = raw
        .rsplit_once(['/', MAIN_SEPARATOR])
        .map_or(&*raw, |(_, file)| file);
    (!file.is_empty()).then(|| file.to_owned())
}

/// Lowercased text after the last `.` of the file name; empty if there is none.
fn extension_of(file: &str) -> String {
    file.rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use std::sync::Barrier;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    use serde_json::{Map, Value};

    use super::errors::ReadError;
    use super::*;

    /// Counts reads; optionally fails each one.
    #[derive(Clone)]
    struct CountingReader {
        calls: Arc<AtomicUsize>,
        fail: bool,
    }

    impl CountingReader {
        fn new(fail: bool) -> (Self, Arc<AtomicUsize>) {
            let calls = Arc::new(AtomicUsize::new(0));
            let reader = Self {
                calls: Arc::clone(&calls),
                fail,
            };
            (reader, calls)
        }
    }

    impl ConfigReader for CountingReader {
        fn read_config(&self, store: &mut ConfigStore) -> Result<(), ReadError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(ReadError::Io(std::io::Error::other("test error")));
            }
            let mut entries = Map::new();
            entries.insert(
                "path".to_owned(),
                Value::from(store.path().to_string_lossy().into_owned()),
            );
            store.populate(entries);
            Ok(())
        }
    }

    fn loader(fail: bool) -> (OutputConfig, Arc<AtomicUsize>) {
        let (reader, calls) = CountingReader::new(fail);
        (OutputConfig::new(reader), calls)
    }

    #[test]
    fn test_empty_path_is_invalid_file() {
        let (config, calls) = loader(false);
        let err = config.start("").unwrap_err();
        assert!(is_invalid_file_err(&err));
        assert!(!is_invalid_ext_err(&err));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_directory_path_is_invalid_file() {
        let (config, _) = loader(false);
        let err = config.start("outputs/").unwrap_err();
        assert!(err.is_invalid_file());
    }

    #[test]
    fn test_dot_components_are_missing_extension() {
        for path in [".", "dir/..", "config.json/."] {
            let (config, calls) = loader(false);
            let err = config.start(path).unwrap_err();
            assert!(is_invalid_ext_err(&err), "{path}: {err}");
            assert!(!is_invalid_file_err(&err), "{path}");
            assert_eq!(calls.load(Ordering::SeqCst), 0, "{path} reached the reader");
        }
    }

    #[test]
    fn test_missing_extension() {
        let (config, calls) = loader(false);
        let err = config.start("config").unwrap_err();
        assert!(is_invalid_ext_err(&err));
        assert!(!is_invalid_file_err(&err));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_trailing_dot_is_missing_extension() {
        let (config, _) = loader(false);
        let err = config.start("config.").unwrap_err();
        assert!(matches!(err, WriterError::InvalidExtension { ref extension, .. } if extension.is_empty()));
    }

    #[test]
    fn test_unsupported_extension() {
        let (config, calls) = loader(false);
        let err = config.start("config.txt").unwrap_err();
        assert!(err.is_invalid_extension());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_extension_is_case_insensitive() {
        let (config, calls) = loader(false);
        let store = config.start("config.JSON").unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(store.format(), ConfigFormat::Json);
    }

    #[test]
    fn test_dotfile_extension() {
        let (config, _) = loader(false);
        let store = config.start("dir/.yml").unwrap();
        assert_eq!(store.format(), ConfigFormat::Yaml);
    }

    #[test]
    fn test_reader_failure_is_unclassified() {
        let (config, calls) = loader(true);
        let err = config.start("out.yaml").unwrap_err();
        assert!(!is_invalid_file_err(&err));
        assert!(!is_invalid_ext_err(&err));
        assert!(matches!(err, WriterError::Read { .. }));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(config.is_started());
    }

    #[test]
    fn test_second_call_returns_first_outcome() {
        let (config, calls) = loader(false);
        assert!(!config.is_started());
        config.start("first.json").unwrap();
        let store = config.start("second.txt").unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(store.path(), Path::new("first.json"));
        assert_eq!(store.lookup("path"), Some(&Value::from("first.json")));
    }

    #[test]
    fn test_first_failure_is_sticky() {
        let (config, calls) = loader(false);
        assert!(config.start("config.txt").unwrap_err().is_invalid_extension());
        assert!(config.start("config.json").unwrap_err().is_invalid_extension());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(config.is_started());
    }

    #[test]
    fn test_concurrent_first_calls_read_once() {
        const CALLERS: usize = 8;
        let (config, calls) = loader(false);
        let barrier = Barrier::new(CALLERS);

        let results: Vec<Result<&ConfigStore, WriterError>> = thread::scope(|s| {
            let handles: Vec<_> = (0..CALLERS)
                .map(|i| {
                    let config = &config;
                    let barrier = &barrier;
                    s.spawn(move || {
                        barrier.wait();
                        config.start(format!("out-{i}.yaml"))
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        let stores: Vec<&ConfigStore> = results.into_iter().map(Result::unwrap).collect();
        let first = stores[0];
        assert!(stores.iter().all(|store| std::ptr::eq(*store, first)));
    }

    #[test]
    fn test_concurrent_failure_seen_by_all() {
        const CALLERS: usize = 4;
        let (config, calls) = loader(true);
        let barrier = Barrier::new(CALLERS);

        let failures = thread::scope(|s| {
            let handles: Vec<_> = (0..CALLERS)
                .map(|_| {
                    let config = &config;
                    let barrier = &barrier;
                    s.spawn(move || {
                        barrier.wait();
                        config.start("out.json")
                    })
                })
                .collect();
            handles
                .into_iter()
                .map(|h| h.join().unwrap())
                .filter(Result::is_err)
                .count()
        });

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(failures, CALLERS);
    }
}
