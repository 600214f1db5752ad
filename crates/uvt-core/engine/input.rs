//! Playback log parsing
//!
//! Input is free text holding one record per line, `videoId,start,end[,userId]`.
//! Fields are trimmed, blank lines are skipped and `\r\n` endings are
//! accepted. A single malformed record rejects the whole batch.
//!
//! The parsed events come back sorted by playback start. The sort is stable,
//! so records with equal starts keep their input order.

use crate::{
    event::PlaybackEvent,
    utils::normalize_field_value,
    CoreError, Result,
};

/// Parse every record in `input` and sort the events by start
///
/// `default_user` is used for records whose fourth field is absent or empty.
///
/// # Errors
///
/// Returns [`CoreError::MalformedRecord`] for a line without 3 or 4 fields
/// or with an empty video id, and [`CoreError::InvalidTimestamp`] or
/// [`CoreError::InvalidInterval`] for bad bounds.
///
/// # Example
///
/// ```rust
/// use uvt_core::engine::parse_input;
///
/// let events = parse_input("1,00:32.052,00:47.179\n\n1,00:10.15,00:15.552,jake", "unnamed")?;
/// assert_eq!(events.len(), 2);
/// assert_eq!(events[0].user_id(), "jake");
/// assert_eq!(events[1].user_id(), "unnamed");
/// # Ok::<(), uvt_core::CoreError>(())
/// ```
pub fn parse_input(input: &str, default_user: &str) -> Result<Vec<PlaybackEvent>> {
    let mut events = input
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| parse_record(index + 1, line, default_user))
        .collect::<Result<Vec<_>>>()?;

    events.sort_by_key(|event| event.playback().start());
    Ok(events)
}

/// Parse one `videoId,start,end[,userId]` record
///
/// # Errors
///
/// Same as [`parse_input`]; `line` is only used in error messages.
pub fn parse_record(line: usize, record: &str, default_user: &str) -> Result<PlaybackEvent> {
    let fields: Vec<&str> = record.split(',').map(normalize_field_value).collect();

    let (video, start, end, user) = match fields.as_slice() {
        [video, start, end] => (*video, *start, *end, default_user),
        [video, start, end, user] => (*video, *start, *end, *user),
        _ => {
            return Err(CoreError::malformed_record(
                line,
                format!("expected 3 or 4 comma-separated fields, found {}", fields.len()),
            ))
        }
    };

    if video.is_empty() {
        return Err(CoreError::malformed_record(line, "missing video id"));
    }

    let user = if user.is_empty() { default_user } else { user };
    PlaybackEvent::from_text(video, start, end, Some(user))
}
