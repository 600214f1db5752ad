//! Error categorization and suggestion utilities
//!
//! Groups `CoreError` variants so front ends can decide how to present a
//! failure, and offers a short hint for the common mistakes.

use super::CoreError;
use core::fmt;

/// Error category for filtering and user interface organization
///
/// # Examples
///
/// ```rust
/// use uvt_core::utils::errors::{CoreError, ErrorCategory};
///
/// let error = CoreError::invalid_timestamp("12:3");
/// assert_eq!(error.category(), ErrorCategory::Format);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Values that are well formed but fall outside the permitted bounds
    Range,

    /// Text that does not match any accepted time or argument format
    Format,

    /// Structural problems with the input records themselves
    Input,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Range => "range",
            Self::Format => "format",
            Self::Input => "input",
        };
        f.write_str(name)
    }
}

impl CoreError {
    /// Get the category this error belongs to
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::OutOfRange { .. } | Self::InvalidInterval(_) => ErrorCategory::Range,
            Self::InvalidArgument(_) | Self::InvalidTimestamp { .. } => ErrorCategory::Format,
            Self::MalformedRecord { .. } => ErrorCategory::Input,
        }
    }

    /// Get a user-facing hint for resolving the error, if one applies
    #[must_use]
    pub const fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::OutOfRange { .. } => Some("Time offsets are capped at 6 hours (21600000 ms)"),
            Self::InvalidTimestamp { .. } => {
                Some("Use integer milliseconds or [hh:]mm:ss[.fff], e.g. 01:02:03.500")
            }
            Self::InvalidInterval(_) => Some("Make sure each end time is not before its start"),
            Self::MalformedRecord { .. } => Some("Records look like: videoId,start,end[,userId]"),
            Self::InvalidArgument(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_by_variant() {
        assert_eq!(
            CoreError::out_of_range(21_600_001).category(),
            ErrorCategory::Range
        );
        assert_eq!(
            CoreError::invalid_interval("backwards").category(),
            ErrorCategory::Range
        );
        assert_eq!(
            CoreError::InvalidArgument("x".to_string()).category(),
            ErrorCategory::Format
        );
        assert_eq!(
            CoreError::malformed_record(3, "too few fields").category(),
            ErrorCategory::Input
        );
    }

    #[test]
    fn suggestions_present_for_user_errors() {
        assert!(CoreError::invalid_timestamp("bad").suggestion().is_some());
        assert!(CoreError::malformed_record(1, "x").suggestion().is_some());
        assert!(CoreError::InvalidArgument("x".to_string())
            .suggestion()
            .is_none());
    }

    #[test]
    fn category_display() {
        assert_eq!(ErrorCategory::Range.to_string(), "range");
        assert_eq!(ErrorCategory::Format.to_string(), "format");
        assert_eq!(ErrorCategory::Input.to_string(), "input");
    }
}
