//! Unique view time engine
//!
//! [`UvtEngine`] owns a batch of parsed playback events and turns it into an
//! [`AnalysisResult`]: the unique view time of every user/video pair.
//!
//! # Pipeline
//!
//! 1. Parse the input into events, sorted by playback start.
//! 2. If an analysis window is set, drop events the window does not overlap
//!    and clip the rest to the window.
//! 3. Merge each event into the [`ViewedRanges`] of its user/video key.
//! 4. Sum each key's ranges into its unique duration.
//!
//! # Lifecycle
//!
//! An engine is [`EngineState::Idle`] until it runs, [`EngineState::Running`]
//! while merging and [`EngineState::Done`] once a result is cached. Changing
//! the window returns it to `Idle`. [`UvtEngine::run_if_needed`] only runs an
//! `Idle` engine; [`UvtEngine::run`] always recomputes. Nothing runs as a side
//! effect of reading.
//!
//! # Example
//!
//! ```rust
//! use uvt_core::UvtEngine;
//!
//! let input = "
//!     1,00:32.052,00:47.179
//!     1,00:10.15,00:15.552
//!     1,00:12.375,00:14.0
//!     1,00:45.0,00:60.758
//! ";
//!
//! let engine = UvtEngine::analyze(input, None, None)?;
//! let result = engine.result().unwrap();
//! assert_eq!(result.unique_duration("unnamed", "1").unwrap().milliseconds(), 34_108);
//! # Ok::<(), uvt_core::CoreError>(())
//! ```

mod input;
mod merge;
mod result;

pub use input::{parse_input, parse_record};
pub use merge::{MergeOutcome, ViewedRanges};
pub use result::{AnalysisResult, UserViews, VideoViews};

use crate::{
    event::PlaybackEvent,
    interval::Interval,
    time::TimeOffset,
    utils::{create_hash_map_with_capacity, KeyedMap},
    Result,
};

/// User id assumed by the batch parser for records without a user field
pub const DEFAULT_INPUT_USER: &str = "unnamed";

/// Configuration for input parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// User id for records that omit one
    pub default_user: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_user: DEFAULT_INPUT_USER.to_string(),
        }
    }
}

/// Lifecycle of an engine's cached result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// No valid result cached
    Idle,
    /// Analysis in progress
    Running,
    /// Result cached and current
    Done,
}

/// Owner of one batch of playback events and its analysis
#[derive(Debug, Clone)]
pub struct UvtEngine {
    /// Parsing configuration the events were read with
    config: EngineConfig,
    /// Events sorted by start; never modified by a run
    events: Vec<PlaybackEvent>,
    /// Optional clipping window
    window: Option<Interval>,
    /// Lifecycle state of `result`
    state: EngineState,
    /// Last computed result, meaningful only when `state` is `Done`
    result: AnalysisResult,
}

impl UvtEngine {
    /// Parse `input` with the default configuration
    ///
    /// # Errors
    ///
    /// Fails on the first malformed record, see [`parse_input`].
    pub fn new(input: &str) -> Result<Self> {
        Self::with_config(input, EngineConfig::default())
    }

    /// Parse `input` with a custom configuration
    ///
    /// # Errors
    ///
    /// Fails on the first malformed record, see [`parse_input`].
    pub fn with_config(input: &str, config: EngineConfig) -> Result<Self> {
        let events = parse_input(input, &config.default_user)?;
        Ok(Self {
            config,
            events,
            window: None,
            state: EngineState::Idle,
            result: AnalysisResult::new(),
        })
    }

    /// Build an engine from events that are already parsed
    ///
    /// The events are sorted by start (stable).
    #[must_use]
    pub fn from_events(mut events: Vec<PlaybackEvent>) -> Self {
        events.sort_by_key(|event| event.playback().start());
        Self {
            config: EngineConfig::default(),
            events,
            window: None,
            state: EngineState::Idle,
            result: AnalysisResult::new(),
        }
    }

    /// One-shot entry point: parse, apply an optional window and run
    ///
    /// The window is applied only when both bounds are given and parse as
    /// time offsets; otherwise the analysis covers the whole input.
    ///
    /// # Errors
    ///
    /// Fails on malformed input, on a window whose start is after its end,
    /// or if a total does not fit a time offset.
    pub fn analyze(input: &str, window_start: Option<&str>, window_end: Option<&str>) -> Result<Self> {
        let mut engine = Self::new(input)?;
        engine.set_window(window_from_text(window_start, window_end)?);
        engine.run()?;
        Ok(engine)
    }

    /// Parsed events in ascending start order
    #[must_use]
    pub fn events(&self) -> &[PlaybackEvent] {
        &self.events
    }

    /// Configuration the input was parsed with
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Current analysis window
    #[must_use]
    pub const fn window(&self) -> Option<&Interval> {
        self.window.as_ref()
    }

    /// Replace the analysis window, invalidating any cached result
    pub fn set_window(&mut self, window: Option<Interval>) {
        self.window = window;
        self.invalidate();
    }

    /// Builder form of [`set_window`](Self::set_window)
    #[must_use]
    pub fn with_window(mut self, window: Option<Interval>) -> Self {
        self.set_window(window);
        self
    }

    /// Current lifecycle state
    #[must_use]
    pub const fn state(&self) -> EngineState {
        self.state
    }

    /// Cached result, if the engine is `Done`
    #[must_use]
    pub fn result(&self) -> Option<&AnalysisResult> {
        (self.state == EngineState::Done).then_some(&self.result)
    }

    /// Run the analysis unless a current result is cached
    ///
    /// # Errors
    ///
    /// See [`run`](Self::run).
    pub fn run_if_needed(&mut self) -> Result<&AnalysisResult> {
        if self.state != EngineState::Done {
            self.run()?;
        }
        Ok(&self.result)
    }

    /// Run the analysis, replacing any cached result
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::OutOfRange`](crate::CoreError::OutOfRange) if a
    /// total does not fit a time offset. The engine is left `Idle`.
    pub fn run(&mut self) -> Result<&AnalysisResult> {
        self.state = EngineState::Running;

        match analyze_events(&self.events, self.window.as_ref()) {
            Ok(result) => {
                self.result = result;
                self.state = EngineState::Done;
                Ok(&self.result)
            }
            Err(err) => {
                self.invalidate();
                Err(err)
            }
        }
    }

    /// Drop the cached result
    fn invalidate(&mut self) {
        self.result = AnalysisResult::new();
        self.state = EngineState::Idle;
    }
}

/// Build an analysis window from optional textual bounds
///
/// Returns `None` unless both bounds are present and parse; unparseable text
/// is treated like absent text.
///
/// # Errors
///
/// Returns [`CoreError::InvalidInterval`](crate::CoreError::InvalidInterval)
/// if both bounds parse but the start is after the end.
pub fn window_from_text(start: Option<&str>, end: Option<&str>) -> Result<Option<Interval>> {
    let start = start.and_then(TimeOffset::parse);
    let end = end.and_then(TimeOffset::parse);

    match (start, end) {
        (Some(start), Some(end)) => Interval::untagged(start, end).map(Some),
        _ => Ok(None),
    }
}

/// Merge `events` per user/video key and total the unique durations
///
/// `events` must be sorted by start. Users and videos enter the result in
/// the order their first surviving event appears.
///
/// # Errors
///
/// Propagates merge and total errors, see [`ViewedRanges`].
pub fn analyze_events(events: &[PlaybackEvent], window: Option<&Interval>) -> Result<AnalysisResult> {
    let mut viewed: KeyedMap<(&str, &str), ViewedRanges> = create_hash_map_with_capacity(events.len());
    let mut first_seen: Vec<(&str, &str)> = Vec::new();

    for event in events {
        let playback = match window {
            Some(window) => match Interval::intersection(window, event.playback()) {
                Some(common) => common,
                None => continue,
            },
            None => event.playback().clone(),
        };

        let key = (event.user_id(), event.video_id());
        viewed
            .entry(key)
            .or_insert_with(|| {
                first_seen.push(key);
                ViewedRanges::new()
            })
            .absorb(playback)?;
    }

    let mut result = AnalysisResult::new();
    for key in first_seen {
        let Some(ranges) = viewed.remove(&key) else {
            continue;
        };
        let (user_id, video_id) = key;
        let unique_duration = ranges.unique_duration()?;
        result.user_entry(user_id).insert(
            video_id.to_owned(),
            VideoViews::new(unique_duration, ranges.into_ranges()),
        );
    }

    Ok(result)
}
