//! Error types for UVT analysis
//!
//! Provides the `CoreError` enum used across the crate plus small
//! constructors that keep message formatting in one place.
//!
//! # Examples
//!
//! ```rust
//! use uvt_core::utils::errors::{CoreError, ErrorCategory};
//!
//! let range_err = CoreError::out_of_range(21_600_001);
//! let time_err = CoreError::invalid_timestamp("1:2:3");
//!
//! assert_eq!(range_err.category(), ErrorCategory::Range);
//! assert!(time_err.suggestion().is_some());
//! ```

mod category;
mod core;

pub use self::core::{CoreError, Result};
pub use category::ErrorCategory;

use crate::time::TimeOffset;
use ::core::fmt;

impl CoreError {
    /// Create range error for a millisecond value outside the permitted bounds
    pub fn out_of_range<T: fmt::Display>(value: T) -> Self {
        Self::OutOfRange {
            value: value.to_string(),
            min: TimeOffset::MIN,
            max: TimeOffset::MAX,
        }
    }

    /// Create timestamp error from the text that failed to parse
    pub fn invalid_timestamp<T: fmt::Display>(text: T) -> Self {
        Self::InvalidTimestamp {
            text: text.to_string(),
        }
    }

    /// Create interval error with a description of the problem
    pub fn invalid_interval<T: fmt::Display>(reason: T) -> Self {
        Self::InvalidInterval(reason.to_string())
    }

    /// Create record shape error for the given line
    pub fn malformed_record<T: fmt::Display>(line: usize, reason: T) -> Self {
        Self::MalformedRecord {
            line,
            reason: reason.to_string(),
        }
    }
}
