//! Logging subsystem: console and optional file output via `tracing`.
//!
//! [`Logger::init`] installs a global subscriber and returns a
//! [`LoggerHandle`] that must be passed back to [`Logger::close`] to flush
//! buffered file output.
use std::io::{self, Write};
use std::path::PathBuf;

use thiserror::Error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{EnvFilter, Registry, fmt};

/// Directory for file logs; defaults to `$TMPDIR/crcgen`.
pub const LOG_DIR_ENV: &str = "CRCGEN_LOG_DIR";

const DEFAULT_FILE_NAME: &str = "crcgen.log";
const DEFAULT_FILTER: &str = "crcgen=debug";

/// Errors from opening or closing the logging subsystem.
#[derive(Debug, Error)]
pub enum LoggerError {
    /// A global subscriber was already installed in this process.
    #[error("logger already initialized: {0}")]
    AlreadyInitialized(String),

    /// The log directory could not be created.
    #[error("could not create log directory '{}': {source}", path.display())]
    LogDirectory {
        /// Directory that was being created.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// Flushing console output failed while closing.
    #[error("could not flush log output: {0}")]
    Flush(#[source] io::Error),
}

/// Where and how much to log.
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    /// Directory receiving the log file when file output is enabled.
    pub directory: PathBuf,
    /// Log file name inside `directory`.
    pub file_name: String,
    /// Filter directives used when `RUST_LOG` is unset or invalid.
    pub default_filter: String,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            directory: std::env::temp_dir().join("crcgen"),
            file_name: DEFAULT_FILE_NAME.to_owned(),
            default_filter: DEFAULT_FILTER.to_owned(),
        }
    }
}

impl LoggerConfig {
    /// Defaults, with the directory overridden by `CRCGEN_LOG_DIR` when set.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(dir) = std::env::var_os(LOG_DIR_ENV).filter(|v| !v.is_empty()) {
            config.directory = PathBuf::from(dir);
        }
        config
    }

    /// Full path of the log file.
    #[must_use]
    pub fn file_path(&self) -> PathBuf {
        self.directory.join(&self.file_name)
    }

    fn filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.default_filter))
    }
}

/// An open logging target. Holds the background writer for file output.
#[derive(Debug)]
pub struct LoggerHandle {
    file_guard: Option<WorkerGuard>,
}

impl LoggerHandle {
    /// A handle with nothing to flush.
    #[cfg(test)]
    #[must_use]
    pub fn detached() -> Self {
        Self { file_guard: None }
    }

    /// Whether this handle owns a file writer.
    #[must_use]
    pub fn writes_file(&self) -> bool {
        self.file_guard.is_some()
    }
}

/// Builds, installs and tears down the process logger.
#[derive(Debug, Clone, Default)]
pub struct Logger {
    config: LoggerConfig,
}

impl Logger {
    #[must_use]
    pub fn new(config: LoggerConfig) -> Self {
        Self { config }
    }

    /// Install the global subscriber. Console output always goes to stderr;
    /// `to_file` adds a plain-text file layer.
    ///
    /// # Errors
    ///
    /// Returns `LoggerError::LogDirectory` if the log directory cannot be
    /// created and `LoggerError::AlreadyInitialized` if another subscriber is
    /// already installed.
    pub fn init(&self, to_file: bool) -> Result<LoggerHandle, LoggerError> {
        let (subscriber, handle) = self.build(to_file)?;
        tracing::subscriber::set_global_default(subscriber)
            .map_err(|e| LoggerError::AlreadyInitialized(e.to_string()))?;

        if to_file {
            tracing::debug!(file = %self.config.file_path().display(), "logger started");
        } else {
            tracing::debug!("logger started");
        }
        Ok(handle)
    }

    /// Flush and release everything held by `handle`.
    ///
    /// # Errors
    ///
    /// Returns `LoggerError::Flush` if stderr cannot be flushed.
    pub fn close(&self, handle: LoggerHandle) -> Result<(), LoggerError> {
        tracing::debug!(to_file = handle.writes_file(), "logger stopping");
        // Dropping the guard blocks until the file writer has drained.
        drop(handle);
        io::stderr().flush().map_err(LoggerError::Flush)
    }

    fn build(
        &self,
        to_file: bool,
    ) -> Result<(impl tracing::Subscriber + Send + Sync + 'static, LoggerHandle), LoggerError> {
        let console = fmt::layer().with_target(false).with_writer(io::stderr);

        let (file_layer, file_guard) = if to_file {
            std::fs::create_dir_all(&self.config.directory).map_err(|source| {
                LoggerError::LogDirectory {
                    path: self.config.directory.clone(),
                    source,
                }
            })?;
            let appender =
                tracing_appender::rolling::never(&self.config.directory, &self.config.file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        } else {
            (None, None)
        };

        let subscriber = Registry::default()
            .with(self.config.filter())
            .with(console)
            .with(file_layer);

        Ok((subscriber, LoggerHandle { file_guard }))
    }
}
