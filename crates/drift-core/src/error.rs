//! Error types for Drift

use thiserror::Error;

/// Coarse error classes recorded in the run's error log.
///
/// Each code maps to a fixed human-readable line and a process status.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Memory could not be obtained.
    Allocation,
    /// An integer value fell outside its permitted range.
    IntRange,
    /// The windowing, rendering or image backend failed.
    Backend,
}

impl ErrorCode {
    /// The fixed line printed for this code when the error log is flushed.
    pub fn message(self) -> &'static str {
        match self {
            ErrorCode::Allocation => "Error during allocation of memory",
            ErrorCode::IntRange => "Error in range of integers",
            ErrorCode::Backend => "Error with execution of the windowing backend",
        }
    }

    /// Non-zero status reported when a run ends with this code.
    pub fn status(self) -> i32 {
        match self {
            ErrorCode::Allocation => 1,
            ErrorCode::IntRange => 2,
            ErrorCode::Backend => 3,
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// The main error type for Drift operations
#[derive(Debug, Error)]
pub enum DriftError {
    #[error("Allocation failed: {0}")]
    AllocationError(String),

    #[error("Value out of range: {field} must be between {min} and {max}, got {value}")]
    ValueOutOfRange {
        field: String,
        min: f64,
        max: f64,
        value: f64,
    },

    #[error("Window error: {0}")]
    WindowError(String),

    #[error("Render error: {0}")]
    RenderError(String),

    #[error("Failed to decode image '{path}': {reason}")]
    ImageDecodeError { path: String, reason: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),

    #[error("Config error: {0}")]
    ConfigError(String),
}

impl DriftError {
    /// Classify this error for the run's error log
    pub fn code(&self) -> ErrorCode {
        match self {
            DriftError::AllocationError(_) => ErrorCode::Allocation,
            DriftError::ValueOutOfRange { .. } => ErrorCode::IntRange,
            DriftError::WindowError(_)
            | DriftError::RenderError(_)
            | DriftError::ImageDecodeError { .. }
            | DriftError::IoError(_)
            | DriftError::TomlParseError(_)
            | DriftError::ConfigError(_) => ErrorCode::Backend,
        }
    }
}

/// Result type alias for Drift operations
pub type Result<T> = std::result::Result<T, DriftError>;

impl From<toml::de::Error> for DriftError {
    fn from(err: toml::de::Error) -> Self {
        DriftError::TomlParseError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_failures_share_a_code() {
        let err = DriftError::ImageDecodeError {
            path: "sprites/floor.bmp".into(),
            reason: "unexpected end of file".into(),
        };
        assert_eq!(err.code(), ErrorCode::Backend);
        assert_eq!(DriftError::WindowError("no display".into()).code(), ErrorCode::Backend);
    }

    #[test]
    fn range_errors_map_to_int_range() {
        let err = DriftError::ValueOutOfRange {
            field: "fps".into(),
            min: 1.0,
            max: 1000.0,
            value: 0.0,
        };
        assert_eq!(err.code(), ErrorCode::IntRange);
        assert!(err.to_string().contains("fps"));
    }

    #[test]
    fn statuses_are_non_zero_and_distinct() {
        let codes = [ErrorCode::Allocation, ErrorCode::IntRange, ErrorCode::Backend];
        for code in codes {
            assert_ne!(code.status(), 0);
        }
        assert_ne!(ErrorCode::Allocation.status(), ErrorCode::Backend.status());
    }
}
