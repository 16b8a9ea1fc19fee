//! Fixed-capacity log of error codes, flushed to text at the end of a run

use drift_core::ErrorCode;

/// Entries beyond this many are silently dropped
pub const MAX_ERROR_COUNT: usize = 32;

/// Append-only record of the errors a run hit, in order
pub struct ErrorLog {
    codes: Vec<ErrorCode>,
}

impl Default for ErrorLog {
    fn default() -> Self {
        Self::new()
    }
}

impl ErrorLog {
    pub fn new() -> Self {
        Self {
            codes: Vec::with_capacity(MAX_ERROR_COUNT),
        }
    }

    /// Record a code. Returns false if the log was full and the code was dropped.
    pub fn append(&mut self, code: ErrorCode) -> bool {
        if self.codes.len() >= MAX_ERROR_COUNT {
            return false;
        }
        self.codes.push(code);
        true
    }

    /// Record `code` and return its status
    pub fn record(&mut self, code: ErrorCode) -> i32 {
        self.append(code);
        code.status()
    }

    /// Record `code`, run `release` once, and return the code's status.
    ///
    /// Used where a failure must also tear down a partially built resource.
    /// Failures with nothing to release go through [`ErrorLog::record`].
    pub fn cleanup<F: FnOnce()>(&mut self, code: ErrorCode, release: F) -> i32 {
        let status = self.record(code);
        release();
        status
    }

    pub fn codes(&self) -> &[ErrorCode] {
        &self.codes
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Status of the first recorded error, 0 if none
    pub fn status(&self) -> i32 {
        self.codes.first().map(|c| c.status()).unwrap_or(0)
    }

    /// Translate every entry to its message line, in insertion order, and clear.
    pub fn flush(&mut self) -> Vec<String> {
        self.codes
            .drain(..)
            .map(|code| code.message().to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_flush_preserves_order() {
        let mut log = ErrorLog::new();
        log.append(ErrorCode::Backend);
        log.append(ErrorCode::Allocation);
        log.append(ErrorCode::IntRange);

        let lines = log.flush();
        assert_eq!(
            lines,
            vec![
                ErrorCode::Backend.message(),
                ErrorCode::Allocation.message(),
                ErrorCode::IntRange.message(),
            ]
        );
    }

    #[test]
    fn test_capacity_drops_excess() {
        let mut log = ErrorLog::new();
        for i in 0..40 {
            let kept = log.append(ErrorCode::Backend);
            assert_eq!(kept, i < MAX_ERROR_COUNT);
        }
        assert_eq!(log.len(), MAX_ERROR_COUNT);
        assert_eq!(log.flush().len(), MAX_ERROR_COUNT);
    }

    #[test]
    fn test_exactly_capacity_is_kept() {
        let mut log = ErrorLog::new();
        for _ in 0..MAX_ERROR_COUNT {
            assert!(log.append(ErrorCode::IntRange));
        }
        assert_eq!(log.flush().len(), MAX_ERROR_COUNT);
    }

    #[test]
    fn test_flush_clears() {
        let mut log = ErrorLog::new();
        log.append(ErrorCode::Backend);
        assert_eq!(log.flush().len(), 1);
        assert!(log.is_empty());
        assert!(log.flush().is_empty());
    }

    #[test]
    fn test_cleanup_runs_release_once() {
        let mut log = ErrorLog::new();
        let released = Cell::new(0);

        let status = log.cleanup(ErrorCode::Backend, || released.set(released.get() + 1));

        assert_eq!(status, ErrorCode::Backend.status());
        assert_eq!(released.get(), 1);
        assert_eq!(log.codes(), &[ErrorCode::Backend]);
    }

    #[test]
    fn test_cleanup_runs_release_when_full() {
        let mut log = ErrorLog::new();
        for _ in 0..MAX_ERROR_COUNT {
            log.append(ErrorCode::Allocation);
        }
        let released = Cell::new(false);
        log.cleanup(ErrorCode::Backend, || released.set(true));
        assert!(released.get());
        assert_eq!(log.len(), MAX_ERROR_COUNT);
    }

    #[test]
    fn test_record_without_release() {
        let mut log = ErrorLog::new();
        assert_eq!(log.record(ErrorCode::IntRange), ErrorCode::IntRange.status());
        assert_eq!(log.record(ErrorCode::Backend), ErrorCode::Backend.status());
        assert_eq!(log.codes(), &[ErrorCode::IntRange, ErrorCode::Backend]);
        assert_eq!(log.status(), ErrorCode::IntRange.status());
    }

    #[test]
    fn test_record_when_full_still_reports_status() {
        let mut log = ErrorLog::new();
        for _ in 0..MAX_ERROR_COUNT {
            log.append(ErrorCode::Allocation);
        }
        assert_eq!(log.record(ErrorCode::Backend), ErrorCode::Backend.status());
        assert_eq!(log.len(), MAX_ERROR_COUNT);
    }

    #[test]
    fn test_status() {
        let mut log = ErrorLog::new();
        assert_eq!(log.status(), 0);
        log.append(ErrorCode::IntRange);
        log.append(ErrorCode::Backend);
        assert_eq!(log.status(), ErrorCode::IntRange.status());
    }
}
