//! Bounded millisecond time offsets
//!
//! A [`TimeOffset`] is a point or duration relative to the start of a video,
//! stored as whole milliseconds and capped at six hours. Offsets parse from
//! two textual forms:
//!
//! - plain integer milliseconds: `0`, `1360350`
//! - clock notation `[hh:]mm:ss[.fff]`: `22:40.350`, `00:22:40.35`
//!
//! Parsing is a probe: it returns `None` instead of failing, so callers can
//! decide whether missing or malformed text is an error.
//!
//! # Example
//!
//! ```rust
//! use uvt_core::time::TimeOffset;
//!
//! let offset = TimeOffset::parse("00:22:40.350").unwrap();
//! assert_eq!(offset.milliseconds(), 1_360_350);
//! assert_eq!(offset.format(true), "00:22:40.350");
//! assert_eq!(offset.format(false), "1360350");
//! assert!(TimeOffset::parse("22:40:350").is_none());
//! ```

mod parts;

pub use parts::{from_parts, TimeParts, HOUR_MS, MINUTE_MS, SECOND_MS};

use crate::{utils::is_ascii_digits, CoreError, Result};
use core::{fmt, str::FromStr};

/// Whole-millisecond offset in `[TimeOffset::MIN, TimeOffset::MAX]`
///
/// Value type: two offsets are equal when they hold the same millisecond
/// count. Ordering follows the millisecond value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(transparent))]
pub struct TimeOffset(u32);

impl TimeOffset {
    /// Smallest representable offset in milliseconds
    pub const MIN: u32 = 0;

    /// Largest representable offset in milliseconds (6 hours)
    pub const MAX: u32 = 21_600_000;

    /// The zero offset
    pub const ZERO: Self = Self(Self::MIN);

    /// Create an offset from a millisecond count
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::OutOfRange`] if `milliseconds` exceeds [`Self::MAX`].
    pub fn new(milliseconds: u32) -> Result<Self> {
        if milliseconds > Self::MAX {
            return Err(CoreError::out_of_range(milliseconds));
        }
        Ok(Self(milliseconds))
    }

    /// Underlying millisecond value
    #[must_use]
    pub const fn milliseconds(self) -> u32 {
        self.0
    }

    /// Parse integer milliseconds or `[hh:]mm:ss[.fff]` text
    ///
    /// The integer form must not carry leading zeros (other than `0` itself).
    /// In clock form the optional hour, the minute and the second groups are
    /// exactly two digits each and the fraction is one to three digits.
    /// Minutes and seconds are not range checked individually; only the
    /// combined value must fall within `[MIN, MAX]`.
    ///
    /// Never fails: any other shape, or an out-of-range total, yields `None`.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let millis = if is_plain_millis(text) {
            text.parse::<u64>().ok()?
        } else {
            parse_clock(text)?.to_millis()
        };

        u32::try_from(millis).ok().and_then(|ms| Self::new(ms).ok())
    }

    /// Build an offset from clock parts
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::OutOfRange`] if the parts add up to more than [`Self::MAX`].
    pub fn from_parts(parts: TimeParts) -> Result<Self> {
        let millis = parts.to_millis();
        u32::try_from(millis)
            .map_err(|_| CoreError::out_of_range(millis))
            .and_then(Self::new)
    }

    /// Clock-style breakdown of this offset
    #[must_use]
    pub const fn to_parts(self) -> TimeParts {
        TimeParts::from_millis(self.0)
    }

    /// Signed millisecond difference `self - subtrahend`
    ///
    /// The result is a plain number and is not re-validated as an offset.
    #[must_use]
    pub fn diff(self, subtrahend: Self) -> i64 {
        i64::from(self.0) - i64::from(subtrahend.0)
    }

    /// Millisecond sum `self + addend`
    ///
    /// May exceed [`Self::MAX`]; the result is not re-validated as an offset.
    #[must_use]
    pub fn sum(self, addend: Self) -> i64 {
        i64::from(self.0) + i64::from(addend.0)
    }

    /// Render as `HH:MM:SS[.mmm]` when `friendly`, otherwise as raw milliseconds
    ///
    /// The millisecond suffix only appears when the remainder is non-zero.
    #[must_use]
    pub fn format(self, friendly: bool) -> String {
        if !friendly {
            return self.0.to_string();
        }

        let TimeParts {
            hours,
            minutes,
            seconds,
            milliseconds,
        } = self.to_parts();

        if milliseconds > 0 {
            format!("{hours:02}:{minutes:02}:{seconds:02}.{milliseconds:03}")
        } else {
            format!("{hours:02}:{minutes:02}:{seconds:02}")
        }
    }
}

/// Integer millisecond form: `0` or digits without a leading zero
fn is_plain_millis(text: &str) -> bool {
    is_ascii_digits(text) && (text == "0" || !text.starts_with('0'))
}

/// Parse `[hh:]mm:ss[.fff]` into parts
fn parse_clock(text: &str) -> Option<TimeParts> {
    let (clock, fraction) = match text.split_once('.') {
        Some((clock, fraction)) => (clock, Some(fraction)),
        None => (text, None),
    };

    let mut groups = clock.split(':');
    let first = two_digits(groups.next()?)?;
    let second = two_digits(groups.next()?)?;
    let third = groups.next().map(two_digits);
    if groups.next().is_some() {
        return None;
    }

    let (hours, minutes, seconds) = match third {
        None => (0, first, second),
        Some(Some(seconds)) => (first, second, seconds),
        Some(None) => return None,
    };

    let milliseconds = match fraction {
        Some(digits) => fraction_millis(digits)?,
        None => 0,
    };

    Some(TimeParts {
        hours,
        minutes,
        seconds,
        milliseconds,
    })
}

/// Exactly two ASCII digits
fn two_digits(group: &str) -> Option<u32> {
    if group.len() == 2 && is_ascii_digits(group) {
        group.parse().ok()
    } else {
        None
    }
}

/// One to three fractional-second digits scaled to milliseconds
fn fraction_millis(digits: &str) -> Option<u32> {
    if !(1..=3).contains(&digits.len()) || !is_ascii_digits(digits) {
        return None;
    }
    let value: u32 = digits.parse().ok()?;
    match digits.len() {
        1 => Some(value * 100),
        2 => Some(value * 10),
        _ => Some(value),
    }
}

impl TryFrom<u32> for TimeOffset {
    type Error = CoreError;

    fn try_from(milliseconds: u32) -> Result<Self> {
        Self::new(milliseconds)
    }
}

impl TryFrom<i64> for TimeOffset {
    type Error = CoreError;

    fn try_from(milliseconds: i64) -> Result<Self> {
        u32::try_from(milliseconds)
            .map_err(|_| CoreError::out_of_range(milliseconds))
            .and_then(Self::new)
    }
}

impl TryFrom<f64> for TimeOffset {
    type Error = CoreError;

    /// Accepts only integral values; `1.5` is out of range, not truncated.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn try_from(milliseconds: f64) -> Result<Self> {
        if !milliseconds.is_finite()
            || milliseconds.fract() != 0.0
            || milliseconds < f64::from(Self::MIN)
            || milliseconds > f64::from(Self::MAX)
        {
            return Err(CoreError::out_of_range(milliseconds));
        }
        Self::new(milliseconds as u32)
    }
}

impl From<TimeOffset> for u32 {
    fn from(offset: TimeOffset) -> Self {
        offset.0
    }
}

impl FromStr for TimeOffset {
    type Err = CoreError;

    fn from_str(text: &str) -> Result<Self> {
        Self::parse(text).ok_or_else(|| CoreError::invalid_timestamp(text))
    }
}

impl fmt::Display for TimeOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(true))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(ms: u32) -> TimeOffset {
        TimeOffset::new(ms).unwrap()
    }

    #[test]
    fn bounds() {
        assert_eq!(ts(0).milliseconds(), 0);
        assert_eq!(ts(21_600_000).milliseconds(), TimeOffset::MAX);
        assert!(matches!(
            TimeOffset::new(21_600_001),
            Err(CoreError::OutOfRange { .. })
        ));
    }

    #[test]
    fn conversions_reject_bad_values() {
        assert!(TimeOffset::try_from(-1_i64).is_err());
        assert!(TimeOffset::try_from(21_600_001_i64).is_err());
        assert_eq!(TimeOffset::try_from(5_i64).unwrap(), ts(5));
        assert!(matches!(
            TimeOffset::try_from(1.5_f64),
            Err(CoreError::OutOfRange { .. })
        ));
        assert!(TimeOffset::try_from(f64::NAN).is_err());
        assert_eq!(TimeOffset::try_from(1000.0_f64).unwrap(), ts(1000));
    }

    #[test]
    fn comparisons() {
        let ts1 = ts(1_360_350);
        let ts2 = ts(1_360_500);
        let ts3 = ts(1_360_350);

        assert!(ts2 >= ts1);
        assert!(ts1 >= ts3);
        assert!(ts2 > ts1);
        assert!(ts1 <= ts3);
        assert!(ts1 < ts2);
        assert_eq!(ts1, ts3);
        assert_ne!(ts1, ts2);
    }

    #[test]
    fn arithmetic() {
        let ts1 = ts(1_360_350);
        let ts2 = ts(1_360_500);
        assert_eq!(ts2.diff(ts1), 150);
        assert_eq!(ts1.diff(ts2), -150);
        assert_eq!(ts1.sum(ts2), 2_720_850);
        assert_eq!(ts(TimeOffset::MAX).sum(ts(1)), 21_600_001);
    }

    #[test]
    fn parse_plain_millis() {
        assert_eq!(TimeOffset::parse("0"), Some(ts(0)));
        assert_eq!(TimeOffset::parse("1360350"), Some(ts(1_360_350)));
        assert_eq!(TimeOffset::parse("21600000"), Some(ts(21_600_000)));
        assert_eq!(TimeOffset::parse("21600001"), None);
        assert_eq!(TimeOffset::parse("0123"), None);
        assert_eq!(TimeOffset::parse("99999999999999999999999"), None);
        assert_eq!(TimeOffset::parse("-5"), None);
        assert_eq!(TimeOffset::parse("+5"), None);
    }

    #[test]
    fn parse_clock_forms() {
        assert_eq!(TimeOffset::parse("00:22:40.350"), Some(ts(1_360_350)));
        assert_eq!(TimeOffset::parse("22:40.350"), Some(ts(1_360_350)));
        assert_eq!(TimeOffset::parse("00:10.15"), Some(ts(10_150)));
        assert_eq!(TimeOffset::parse("00:14.0"), Some(ts(14_000)));
        assert_eq!(TimeOffset::parse("00:14"), Some(ts(14_000)));
        assert_eq!(TimeOffset::parse("00:60.758"), Some(ts(60_758)));
        assert_eq!(TimeOffset::parse("06:00:00"), Some(ts(21_600_000)));
        assert_eq!(TimeOffset::parse("06:00:00.001"), None);
    }

    #[test]
    fn parse_rejects_other_shapes() {
        for text in [
            "", " ", "foo", "1:23", "0:00:30.50", "00:00:00:00", "00:00.", "00:00.1234",
            "00:00.a", "aa:00", "00:00.5.5", " 00:14", "00:14 ", "000:14", "00::14",
        ] {
            assert_eq!(TimeOffset::parse(text), None, "{text:?} should not parse");
        }
    }

    #[test]
    fn from_str_maps_absence_to_error() {
        assert_eq!("00:14".parse::<TimeOffset>().unwrap(), ts(14_000));
        assert_eq!(
            "bar".parse::<TimeOffset>(),
            Err(CoreError::invalid_timestamp("bar"))
        );
    }

    #[test]
    fn format_friendly_and_raw() {
        let ts1 = ts(1_360_350);
        assert_eq!(ts1.format(false), "1360350");
        assert_eq!(ts1.format(true), "00:22:40.350");
        assert_eq!(ts(5_000).format(true), "00:00:05");
        assert_eq!(ts(5_007).format(true), "00:00:05.007");
        assert_eq!(ts(21_600_000).format(true), "06:00:00");
        assert_eq!(ts1.to_string(), "00:22:40.350");
    }

    #[test]
    fn parts_round_trip() {
        let parts = ts(1_360_350).to_parts();
        assert_eq!(TimeOffset::from_parts(parts).unwrap(), ts(1_360_350));
        assert!(TimeOffset::from_parts(TimeParts {
            hours: 7,
            ..TimeParts::default()
        })
        .is_err());
    }
}
