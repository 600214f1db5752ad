//! Raw playback observations
//!
//! A [`PlaybackEvent`] records that a user watched one contiguous range of a
//! video. Events are validated when built and immutable afterwards.

use crate::{interval::Interval, time::TimeOffset, CoreError, Result};

/// User id assumed by [`PlaybackEvent::from_text`] when none is given
///
/// The batch input parser uses its own default, see
/// [`EngineConfig`](crate::engine::EngineConfig).
pub const DEFAULT_EVENT_USER: &str = "1";

/// One observation of a user viewing a contiguous range of a video
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PlaybackEvent {
    /// Video being watched
    video_id: String,
    /// User who watched it
    user_id: String,
    /// Range watched, tagged with the video id
    playback: Interval,
}

impl PlaybackEvent {
    /// Create an event from already validated offsets
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidInterval`] if `start` is after `end`.
    pub fn new(
        video_id: impl Into<String>,
        user_id: impl Into<String>,
        start: TimeOffset,
        end: TimeOffset,
    ) -> Result<Self> {
        let video_id = video_id.into();
        let playback = Interval::new(Some(&video_id), start, end)?;

        Ok(Self {
            video_id,
            user_id: user_id.into(),
            playback,
        })
    }

    /// Create an event from textual start and end offsets
    ///
    /// `user_id` defaults to [`DEFAULT_EVENT_USER`].
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidTimestamp`] naming the first bound that
    /// fails to parse, or [`CoreError::InvalidInterval`] if the bounds are
    /// out of order.
    ///
    /// # Example
    ///
    /// ```rust
    /// use uvt_core::PlaybackEvent;
    ///
    /// let event = PlaybackEvent::from_text("1", "00:22:40.350", "00:22:45.350", Some("jake"))?;
    /// assert_eq!(event.user_id(), "jake");
    /// assert_eq!(event.playback().duration(), 5_000);
    ///
    /// assert!(PlaybackEvent::from_text("1", "foo", "bar", None).is_err());
    /// # Ok::<(), uvt_core::CoreError>(())
    /// ```
    pub fn from_text(
        video_id: &str,
        start: &str,
        end: &str,
        user_id: Option<&str>,
    ) -> Result<Self> {
        let start = TimeOffset::parse(start).ok_or_else(|| CoreError::invalid_timestamp(start))?;
        let end = TimeOffset::parse(end).ok_or_else(|| CoreError::invalid_timestamp(end))?;

        Self::new(
            video_id,
            user_id.unwrap_or(DEFAULT_EVENT_USER),
            start,
            end,
        )
    }

    /// Video id
    #[must_use]
    pub fn video_id(&self) -> &str {
        &self.video_id
    }

    /// User id
    #[must_use]
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Watched range
    #[must_use]
    pub const fn playback(&self) -> &Interval {
        &self.playback
    }
}
