//! # UVT Core
//!
//! Unique view time analysis for video playback logs. Given raw playback
//! records, computes for every (user, video) pair how much distinct video
//! content was watched, counting overlapping or repeated ranges once.
//!
//! ## Features
//!
//! - **Bounded time offsets**: millisecond values capped at six hours, parsed
//!   from integer or `[hh:]mm:ss[.fff]` text
//! - **Intervals**: `[start, end)` ranges with containment, overlap and
//!   intersection
//! - **Greedy merge**: single-pass accumulation of disjoint viewed ranges
//! - **Analysis windows**: optional clipping of events before merging
//! - **Reports**: plain-text rendering, plus `serde` serialization of results
//!
//! ## Quick Start
//!
//! ```rust
//! use uvt_core::{report::{render_report, ReportOptions}, UvtEngine};
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
//! assert_eq!(result.video("unnamed", "1").unwrap().viewed().len(), 2);
//!
//! let report = render_report(result, &ReportOptions::default());
//! assert_eq!(report, "user: unnamed\n    video: 1\n        UVT: 34108");
//! # Ok::<(), uvt_core::CoreError>(())
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(clippy::all)]
#![deny(unsafe_code)]

pub mod engine;
pub mod event;
pub mod interval;
pub mod report;
pub mod time;
pub mod utils;

pub use engine::{AnalysisResult, EngineConfig, EngineState, UvtEngine};
pub use event::PlaybackEvent;
pub use interval::Interval;
pub use time::TimeOffset;
pub use utils::{CoreError, ErrorCategory};

/// Crate version for runtime compatibility checks
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Result type for core operations, using the crate's unified `CoreError`.
pub type Result<T> = core::result::Result<T, CoreError>;

#[cfg(test)]
mod integration_tests {
    use super::*;

    #[test]
    fn version_is_set() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn reexports_compose() {
        let event = PlaybackEvent::from_text("v", "0", "00:01", Some("u")).unwrap();
        let mut engine = UvtEngine::from_events(vec![event]);
        let result: &AnalysisResult = engine.run().unwrap();
        assert_eq!(
            result.unique_duration("u", "v"),
            Some(TimeOffset::new(1_000).unwrap())
        );
    }
}
