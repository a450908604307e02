/// Errors from the output-configuration loader.
use std::io;
use std::sync::Arc;

use thiserror::Error;

/// Failure of the structured-parser collaborator.
#[derive(Debug, Error)]
pub enum ReadError {
    /// The configuration file could not be read from disk.
    #[error("could not read file: {0}")]
    Io(#[from] io::Error),

    /// The file was read but its contents could not be decoded.
    #[error("could not parse file: {0}")]
    Parse(#[from] figment::Error),
}

/// Errors returned by [`super::OutputConfig::start`].
///
/// `Clone` so that every caller of `start` can receive the outcome recorded by
/// the first call.
#[derive(Debug, Clone, Error)]
pub enum WriterError {
    /// No output file could be detected in the path.
    #[error("(writer/start): could not detect output file in path '{path}'")]
    InvalidFile {
        /// The rejected path, as given by the caller.
        path: String,
    },

    /// The output file has no extension, or one that is not supported.
    #[error("(writer/start): output file '{path}' has invalid extension '{extension}'")]
    InvalidExtension {
        /// The rejected path, as given by the caller.
        path: String,
        /// The lowercased extension; empty when the file has none.
        extension: String,
    },

    /// The path was accepted but reading or parsing the file failed.
    #[error("(writer/start): failed to load '{path}': {source}")]
    Read {
        /// The path handed to the reader.
        path: String,
        /// Underlying reader failure.
        #[source]
        source: Arc<ReadError>,
    },
}

impl WriterError {
    /// Whether the output file could not be located from the path.
    #[must_use]
    pub fn is_invalid_file(&self) -> bool {
        matches!(self, Self::InvalidFile { .. })
    }

    /// Whether the output file has a missing or unsupported extension.
    #[must_use]
    pub fn is_invalid_extension(&self) -> bool {
        matches!(self, Self::InvalidExtension { .. })
    }
}

/// Checks if an error returned by the writer was caused because the output
/// file could not be located from the path.
#[must_use]
pub fn is_invalid_file_err(err: &WriterError) -> bool {
    err.is_invalid_file()
}

/// Checks if an error returned by the writer was caused by the output file
/// having an invalid extension.
#[must_use]
pub fn is_invalid_ext_err(err: &WriterError) -> bool {
    err.is_invalid_extension()
}
