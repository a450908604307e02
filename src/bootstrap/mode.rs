/// Execution mode detection from the environment.
use std::ffi::OsString;
use std::fmt;

/// Any non-empty value selects [`ExecutionMode::Debug`].
pub const DEBUG_ENV: &str = "CRCGEN_DEBUG";

/// Whether this run logs to the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionMode {
    Debug,
    Production,
}

impl ExecutionMode {
    /// Derive the mode using `lookup` to read [`DEBUG_ENV`].
    pub fn detect(lookup: impl Fn(&str) -> Option<OsString>) -> Self {
        match lookup(DEBUG_ENV) {
            Some(value) if !value.is_empty() => Self::Debug,
            _ => Self::Production,
        }
    }

    #[must_use]
    pub fn is_debug(self) -> bool {
        self == Self::Debug
    }
}

impl fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Debug => f.write_str("debug"),
            Self::Production => f.write_str("production"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_is_production() {
        assert_eq!(ExecutionMode::detect(|_| None), ExecutionMode::Production);
    }

    #[test]
    fn test_empty_is_production() {
        let mode = ExecutionMode::detect(|_| Some(OsString::new()));
        assert_eq!(mode, ExecutionMode::Production);
    }

    #[test]
    fn test_any_value_is_debug() {
        for value in ["1", "debug_mode", "false"] {
            let mode = ExecutionMode::detect(|key| {
                assert_eq!(key, DEBUG_ENV);
                Some(OsString::from(value))
            });
            assert!(mode.is_debug(), "value {value:?} should select debug");
        }
    }
}
