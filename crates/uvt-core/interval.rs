//! Playback intervals over bounded time offsets
//!
//! An [`Interval`] is an immutable `[start, end)` range of a video, optionally
//! tagged with the video id it belongs to. The tag is bookkeeping only and
//! plays no part in comparisons between intervals.
//!
//! # Overlap policy
//!
//! [`Interval::overlaps`] is asymmetric: `other` overlaps `self`
//! when `other.start` lies in `[self.start, self.end)` or `other.end` lies in
//! `(self.start, self.end]`. Intervals that merely touch do not overlap, and
//! an `other` that strictly encloses `self` on both sides does not overlap
//! it either. Window clipping in the engine relies on exactly this rule.
//!
//! # Example
//!
//! ```rust
//! use uvt_core::{Interval, TimeOffset};
//!
//! let a = Interval::untagged(TimeOffset::new(0)?, TimeOffset::new(5_000)?)?;
//! let b = Interval::untagged(TimeOffset::new(3_000)?, TimeOffset::new(8_000)?)?;
//!
//! assert!(a.overlaps(&b));
//! let common = Interval::intersection(&a, &b).unwrap();
//! assert_eq!(common.duration(), 2_000);
//! # Ok::<(), uvt_core::CoreError>(())
//! ```

use crate::{time::TimeOffset, CoreError, Result};
use core::fmt;

/// Immutable `[start, end)` range with an optional video tag
///
/// Construction enforces `start <= end`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Interval {
    /// Inclusive start offset
    start: TimeOffset,
    /// Exclusive end offset
    end: TimeOffset,
    /// Video id carried along for bookkeeping
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    tag: Option<String>,
}

impl Interval {
    /// Create a tagged interval
    ///
    /// An empty tag is stored as no tag.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidInterval`] if `start` is after `end`.
    pub fn new(tag: Option<&str>, start: TimeOffset, end: TimeOffset) -> Result<Self> {
        if start > end {
            return Err(CoreError::invalid_interval(format!(
                "start {} is after end {}",
                start.format(false),
                end.format(false)
            )));
        }

        Ok(Self {
            start,
            end,
            tag: tag.filter(|t| !t.is_empty()).map(ToOwned::to_owned),
        })
    }

    /// Create an interval without a tag
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidInterval`] if `start` is after `end`.
    pub fn untagged(start: TimeOffset, end: TimeOffset) -> Result<Self> {
        Self::new(None, start, end)
    }

    /// Inclusive start offset
    #[must_use]
    pub const fn start(&self) -> TimeOffset {
        self.start
    }

    /// Exclusive end offset
    #[must_use]
    pub const fn end(&self) -> TimeOffset {
        self.end
    }

    /// Video tag, if any
    #[must_use]
    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    /// Length of the range in milliseconds
    #[must_use]
    pub fn duration(&self) -> i64 {
        self.end.diff(self.start)
    }

    /// Copy of this interval with a different end, keeping start and tag
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidInterval`] if `end` is before the start.
    pub fn with_end(&self, end: TimeOffset) -> Result<Self> {
        Self::new(self.tag(), self.start, end)
    }

    /// Whether `other` lies entirely within this interval
    #[must_use]
    pub fn contains(&self, other: &Self) -> bool {
        self.start <= other.start && self.end >= other.end
    }

    /// Whether `other` overlaps this interval under the asymmetric policy
    ///
    /// See the module documentation for the exact boundary rules.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        let start_inside = other.start >= self.start && other.start < self.end;
        let end_inside = other.end > self.start && other.end <= self.end;
        start_inside || end_inside
    }

    /// Shared range of `a` and `b`, or `None` when `a` does not overlap `b`
    ///
    /// The tag comes from `a` when it has one, otherwise from `b`.
    #[must_use]
    pub fn intersection(a: &Self, b: &Self) -> Option<Self> {
        if !a.overlaps(b) {
            return None;
        }

        Some(Self {
            start: a.start.max(b.start),
            end: a.end.min(b.end),
            tag: a.tag.clone().or_else(|| b.tag.clone()),
        })
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}
