//! Plain-text report rendering
//!
//! Renders an [`AnalysisResult`] as indented lines:
//!
//! ```text
//! user: unnamed
//!     video: 1
//!         UVT: 34108
//! ```
//!
//! Users and videos appear in the result's stable key order.

use crate::{engine::AnalysisResult, interval::Interval};

/// Line printed in place of a report when the result is empty
pub const EMPTY_REPORT: &str = "Nothing to report!";

/// Options controlling report output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReportOptions {
    /// Render durations as `HH:MM:SS[.mmm]` instead of raw milliseconds
    pub friendly: bool,
    /// Include one line per merged range under each video
    pub show_ranges: bool,
}

/// Report lines for `result`; empty when the result has no users
///
/// # Example
///
/// ```rust
/// use uvt_core::{report::{generate_report, ReportOptions}, UvtEngine};
///
/// let engine = UvtEngine::analyze("1,00:10,00:15", None, None)?;
/// let lines = generate_report(engine.result().unwrap(), &ReportOptions::default());
/// assert_eq!(lines, vec!["user: unnamed", "    video: 1", "        UVT: 5000"]);
/// # Ok::<(), uvt_core::CoreError>(())
/// ```
#[must_use]
pub fn generate_report(result: &AnalysisResult, options: &ReportOptions) -> Vec<String> {
    let mut report = Vec::new();

    for (user_id, user) in result.users() {
        report.push(format!("user: {user_id}"));
        for (video_id, video) in user.videos() {
            report.push(format!("    video: {video_id}"));
            report.push(format!(
                "        UVT: {}",
                video.unique_duration().format(options.friendly)
            ));
            if options.show_ranges {
                report.extend(
                    video
                        .viewed()
                        .iter()
                        .map(|range| format!("        range: {}", render_range(range, options))),
                );
            }
        }
    }

    report
}

/// Whole report as one string, or [`EMPTY_REPORT`] when there is nothing in it
#[must_use]
pub fn render_report(result: &AnalysisResult, options: &ReportOptions) -> String {
    let lines = generate_report(result, options);
    if lines.is_empty() {
        EMPTY_REPORT.to_string()
    } else {
        lines.join("\n")
    }
}

/// `start - end` in the requested format
fn render_range(range: &Interval, options: &ReportOptions) -> String {
    format!(
        "{} - {}",
        range.start().format(options.friendly),
        range.end().format(options.friendly)
    )
}
