//! Decomposition of millisecond offsets into clock parts
//!
//! Conversions between a raw millisecond count and its hours, minutes,
//! seconds and millisecond remainder. Decomposition uses integer division
//! only, so it never rounds.

use crate::{CoreError, Result};

/// Milliseconds per second
pub const SECOND_MS: u32 = 1_000;
/// Milliseconds per minute
pub const MINUTE_MS: u32 = 60 * SECOND_MS;
/// Milliseconds per hour
pub const HOUR_MS: u32 = 60 * MINUTE_MS;

/// Clock-style breakdown of a millisecond offset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TimeParts {
    /// Whole hours
    pub hours: u32,
    /// Whole minutes past the hour
    pub minutes: u32,
    /// Whole seconds past the minute
    pub seconds: u32,
    /// Millisecond remainder
    pub milliseconds: u32,
}

impl TimeParts {
    /// Split a millisecond count into clock parts
    ///
    /// ```rust
    /// use uvt_core::time::TimeParts;
    ///
    /// let parts = TimeParts::from_millis(1_360_350);
    /// assert_eq!((parts.hours, parts.minutes, parts.seconds, parts.milliseconds), (0, 22, 40, 350));
    /// ```
    #[must_use]
    pub const fn from_millis(millis: u32) -> Self {
        let hours = millis / HOUR_MS;
        let remainder = millis % HOUR_MS;
        let minutes = remainder / MINUTE_MS;
        let remainder = remainder % MINUTE_MS;
        let seconds = remainder / SECOND_MS;
        let milliseconds = remainder % SECOND_MS;

        Self {
            hours,
            minutes,
            seconds,
            milliseconds,
        }
    }

    /// Recombine the parts into a millisecond count
    ///
    /// Minutes and seconds are not required to be below 60, so `00:60.758`
    /// style inputs add up the same way the parts read.
    #[must_use]
    pub const fn to_millis(&self) -> u64 {
        self.hours as u64 * HOUR_MS as u64
            + self.minutes as u64 * MINUTE_MS as u64
            + self.seconds as u64 * SECOND_MS as u64
            + self.milliseconds as u64
    }
}

/// Combine loosely typed clock parts into milliseconds
///
/// `seconds`, `minutes` and `hours` must be integral; `fraction` is the
/// fractional second and is rounded to the nearest millisecond. The result is
/// not checked against the time offset bounds.
///
/// # Errors
///
/// Returns [`CoreError::InvalidArgument`] if any whole part has a fractional
/// component or any argument is not finite.
///
/// # Example
///
/// ```rust
/// use uvt_core::time::from_parts;
///
/// assert_eq!(from_parts(0.350, 40.0, 22.0, 0.0)?, 1_360_350);
/// assert!(from_parts(0.0, 1.5, 0.0, 0.0).is_err());
/// # Ok::<(), uvt_core::CoreError>(())
/// ```
#[allow(clippy::cast_possible_truncation)]
pub fn from_parts(fraction: f64, seconds: f64, minutes: f64, hours: f64) -> Result<i64> {
    let whole = [seconds, minutes, hours];
    if !fraction.is_finite() || whole.iter().any(|part| !part.is_finite() || part.fract() != 0.0) {
        return Err(CoreError::InvalidArgument(format!(
            "All time segments must be integers. Received: [{fraction}, {seconds}, {minutes}, {hours}]"
        )));
    }

    let total = hours * f64::from(HOUR_MS)
        + minutes * f64::from(MINUTE_MS)
        + seconds * f64::from(SECOND_MS)
        + (fraction * f64::from(SECOND_MS)).round();

    Ok(total as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_millis() {
        assert_eq!(
            TimeParts::from_millis(1_360_350),
            TimeParts {
                hours: 0,
                minutes: 22,
                seconds: 40,
                milliseconds: 350
            }
        );
        assert_eq!(TimeParts::from_millis(0), TimeParts::default());
        assert_eq!(TimeParts::from_millis(21_600_000).hours, 6);
    }

    #[test]
    fn recombines_millis() {
        let parts = TimeParts {
            hours: 1,
            minutes: 2,
            seconds: 3,
            milliseconds: 4,
        };
        assert_eq!(parts.to_millis(), 3_723_004);

        let overflowing_seconds = TimeParts {
            hours: 0,
            minutes: 0,
            seconds: 60,
            milliseconds: 758,
        };
        assert_eq!(overflowing_seconds.to_millis(), 60_758);
    }

    #[test]
    fn from_parts_combines() {
        assert_eq!(from_parts(0.350, 40.0, 22.0, 0.0).unwrap(), 1_360_350);
        assert_eq!(from_parts(0.0, 0.0, 0.0, 6.0).unwrap(), 21_600_000);
        assert_eq!(from_parts(0.15, 10.0, 0.0, 0.0).unwrap(), 10_150);
        assert_eq!(from_parts(0.052, 32.0, 0.0, 0.0).unwrap(), 32_052);
    }

    #[test]
    fn from_parts_rejects_fractional_whole_parts() {
        assert!(matches!(
            from_parts(0.0, 1.5, 0.0, 0.0),
            Err(CoreError::InvalidArgument(_))
        ));
        assert!(matches!(
            from_parts(0.0, 0.0, 0.25, 0.0),
            Err(CoreError::InvalidArgument(_))
        ));
        assert!(matches!(
            from_parts(0.0, 0.0, 0.0, f64::NAN),
            Err(CoreError::InvalidArgument(_))
        ));
        assert!(matches!(
            from_parts(f64::INFINITY, 0.0, 0.0, 0.0),
            Err(CoreError::InvalidArgument(_))
        ));
    }

    #[test]
    fn from_parts_does_not_clamp() {
        assert_eq!(from_parts(0.0, 0.0, 0.0, 7.0).unwrap(), 25_200_000);
        assert_eq!(from_parts(0.0, -1.0, 0.0, 0.0).unwrap(), -1_000);
    }
}
