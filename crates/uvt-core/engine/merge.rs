//! Greedy single-pass merge of viewed ranges
//!
//! [`ViewedRanges`] accumulates the disjoint ranges one user has watched of
//! one video. Intervals must be fed in ascending start order: every range
//! appended later then starts at or after every range already present, which
//! is what keeps a single forward scan sufficient.
//!
//! For each incoming interval `[s, e)` the scan stops at the first range that
//! either
//!
//! - contains it (`s >= start && e <= end`): nothing changes, or
//! - is stretched by it (`s <= end && e > end`): the range is replaced by a
//!   copy ending at `e`.
//!
//! An interval matching no range is appended. Ranges are never mutated in
//! place; an extension swaps in a new [`Interval`].

use crate::{interval::Interval, time::TimeOffset, Result};

/// What [`ViewedRanges::absorb`] did with an interval
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    /// First interval for the key, stored as is
    Seeded,
    /// Already covered by the range at `index`
    Contained {
        /// Position of the covering range
        index: usize,
    },
    /// The range at `index` now ends where the interval ends
    Extended {
        /// Position of the replaced range
        index: usize,
    },
    /// Stored as a new disjoint range
    Appended,
}

/// Ordered disjoint ranges watched for one user/video key
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewedRanges {
    /// Accumulated ranges in ascending start order
    ranges: Vec<Interval>,
}

impl ViewedRanges {
    /// Create an empty accumulator
    #[must_use]
    pub const fn new() -> Self {
        Self { ranges: Vec::new() }
    }

    /// Merge `interval` into the accumulated ranges
    ///
    /// # Errors
    ///
    /// Only fails if an extension would produce a backwards interval, which
    /// cannot happen for well-formed input; the error is still propagated.
    pub fn absorb(&mut self, interval: Interval) -> Result<MergeOutcome> {
        if self.ranges.is_empty() {
            self.ranges.push(interval);
            return Ok(MergeOutcome::Seeded);
        }

        for (index, current) in self.ranges.iter_mut().enumerate() {
            if current.contains(&interval) {
                return Ok(MergeOutcome::Contained { index });
            }

            if interval.start() <= current.end() && interval.end() > current.end() {
                *current = current.with_end(interval.end())?;
                return Ok(MergeOutcome::Extended { index });
            }
        }

        self.ranges.push(interval);
        Ok(MergeOutcome::Appended)
    }

    /// Accumulated ranges in ascending start order
    #[must_use]
    pub fn ranges(&self) -> &[Interval] {
        &self.ranges
    }

    /// Number of disjoint ranges
    #[must_use]
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    /// Whether nothing has been absorbed yet
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Sum of the range durations
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::OutOfRange`](crate::CoreError::OutOfRange) if the
    /// total does not fit a time offset.
    pub fn unique_duration(&self) -> Result<TimeOffset> {
        let total: i64 = self.ranges.iter().map(Interval::duration).sum();
        TimeOffset::try_from(total)
    }

    /// Consume the accumulator, yielding its ranges
    #[must_use]
    pub fn into_ranges(self) -> Vec<Interval> {
        self.ranges
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iv(start: u32, end: u32) -> Interval {
        Interval::new(
            Some("v"),
            TimeOffset::new(start).unwrap(),
            TimeOffset::new(end).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn first_interval_seeds() {
        let mut viewed = ViewedRanges::new();
        assert!(viewed.is_empty());
        assert_eq!(viewed.absorb(iv(10, 20)).unwrap(), MergeOutcome::Seeded);
        assert_eq!(viewed.ranges(), &[iv(10, 20)]);
    }

    #[test]
    fn contained_interval_is_discarded() {
        let mut viewed = ViewedRanges::new();
        viewed.absorb(iv(10_150, 15_552)).unwrap();
        assert_eq!(
            viewed.absorb(iv(12_375, 14_000)).unwrap(),
            MergeOutcome::Contained { index: 0 }
        );
        assert_eq!(viewed.len(), 1);
        assert_eq!(viewed.unique_duration().unwrap().milliseconds(), 5_402);
    }

    #[test]
    fn overlapping_tail_extends() {
        let mut viewed = ViewedRanges::new();
        viewed.absorb(iv(32_052, 47_179)).unwrap();
        assert_eq!(
            viewed.absorb(iv(45_000, 60_758)).unwrap(),
            MergeOutcome::Extended { index: 0 }
        );
        assert_eq!(viewed.ranges(), &[iv(32_052, 60_758)]);
    }

    #[test]
    fn touching_interval_extends() {
        let mut viewed = ViewedRanges::new();
        viewed.absorb(iv(0, 100)).unwrap();
        assert_eq!(
            viewed.absorb(iv(100, 200)).unwrap(),
            MergeOutcome::Extended { index: 0 }
        );
        assert_eq!(viewed.ranges(), &[iv(0, 200)]);
    }

    #[test]
    fn disjoint_interval_appends() {
        let mut viewed = ViewedRanges::new();
        viewed.absorb(iv(0, 100)).unwrap();
        assert_eq!(viewed.absorb(iv(101, 200)).unwrap(), MergeOutcome::Appended);
        assert_eq!(viewed.len(), 2);
        assert_eq!(viewed.unique_duration().unwrap().milliseconds(), 199);
    }

    #[test]
    fn first_matching_range_wins() {
        let mut viewed = ViewedRanges::new();
        viewed.absorb(iv(0, 100)).unwrap();
        viewed.absorb(iv(200, 300)).unwrap();
        assert_eq!(
            viewed.absorb(iv(250, 400)).unwrap(),
            MergeOutcome::Extended { index: 1 }
        );
        assert_eq!(viewed.into_ranges(), vec![iv(0, 100), iv(200, 400)]);
    }

    #[test]
    fn extension_keeps_range_tag() {
        let mut viewed = ViewedRanges::new();
        viewed.absorb(iv(0, 10)).unwrap();
        viewed
            .absorb(Interval::untagged(TimeOffset::new(5).unwrap(), TimeOffset::new(20).unwrap()).unwrap())
            .unwrap();
        assert_eq!(viewed.ranges()[0].tag(), Some("v"));
    }

    #[test]
    fn empty_duration_is_zero() {
        assert_eq!(ViewedRanges::new().unique_duration().unwrap(), TimeOffset::ZERO);
    }
}
