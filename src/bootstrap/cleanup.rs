/// End-of-run resource release.
use super::LoggerClose;
use crate::logger::LoggerHandle;

/// Close `handle` if there is one. Never fails: close errors are logged and
/// dropped so they cannot replace the outcome of the run.
pub fn close_resources(closer: &dyn LoggerClose, handle: Option<LoggerHandle>) {
    let Some(handle) = handle else {
        return;
    };
    if let Err(err) = closer.close(handle) {
        tracing::warn!(error = %err, "failed to close logger");
    }
}

/// Calls [`close_resources`] when dropped, so every return path of a run
/// releases whatever was acquired before it.
pub struct ResourceGuard<'a> {
    closer: &'a dyn LoggerClose,
    logger: Option<LoggerHandle>,
}

impl<'a> ResourceGuard<'a> {
    #[must_use]
    pub fn new(closer: &'a dyn LoggerClose) -> Self {
        Self {
            closer,
            logger: None,
        }
    }

    /// Take ownership of an opened logger.
    pub fn track_logger(&mut self, handle: LoggerHandle) {
        self.logger = Some(handle);
    }
}

impl Drop for ResourceGuard<'_> {
    fn drop(&mut self) {
        close_resources(self.closer, self.logger.take());
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::logger::LoggerError;

    fn failing_close(_: LoggerHandle) -> Result<(), LoggerError> {
        Err(LoggerError::Flush(std::io::Error::other("test error")))
    }

    #[test]
    fn test_close_resources_consumes_errors() {
        let ok = |_: LoggerHandle| -> Result<(), LoggerError> { Ok(()) };
        close_resources(&ok, Some(LoggerHandle::detached()));
        close_resources(&failing_close, Some(LoggerHandle::detached()));
    }

    #[test]
    fn test_close_resources_without_handle() {
        let calls = Cell::new(0);
        let closer = |_: LoggerHandle| -> Result<(), LoggerError> {
            calls.set(calls.get() + 1);
            Ok(())
        };
        close_resources(&closer, None);
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn test_guard_closes_on_drop() {
        let calls = Cell::new(0);
        let closer = |_: LoggerHandle| -> Result<(), LoggerError> {
            calls.set(calls.get() + 1);
            Err(LoggerError::Flush(std::io::Error::other("test error")))
        };
        {
            let mut guard = ResourceGuard::new(&closer);
            guard.track_logger(LoggerHandle::detached());
        }
        assert_eq!(calls.get(), 1);
    }
}
