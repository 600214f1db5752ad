//! Analysis result containers
//!
//! The result is a two-level map, user id to video id to [`VideoViews`].
//! Iteration helpers return keys in a stable order: ids that are canonical
//! array-index integers (`0` to `4294967294`, no leading zeros) first,
//! ascending by value, then every other id in the order it was first
//! inserted. The engine inserts keys as it meets them in start-sorted
//! events, so a name seen earlier in playback is listed earlier.

use crate::{
    interval::Interval,
    time::TimeOffset,
    utils::{create_hash_map, is_ascii_digits, KeyedMap},
};

/// Unique view time and merged ranges for one user/video pair
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct VideoViews {
    /// Total duration of the disjoint ranges
    unique_duration: TimeOffset,
    /// Disjoint ranges in ascending start order
    viewed: Vec<Interval>,
}

impl VideoViews {
    /// Bundle a duration with its ranges
    #[must_use]
    pub const fn new(unique_duration: TimeOffset, viewed: Vec<Interval>) -> Self {
        Self {
            unique_duration,
            viewed,
        }
    }

    /// Total unique view time
    #[must_use]
    pub const fn unique_duration(&self) -> TimeOffset {
        self.unique_duration
    }

    /// Disjoint ranges that make up the total
    #[must_use]
    pub fn viewed(&self) -> &[Interval] {
        &self.viewed
    }
}

/// All videos watched by one user
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserViews {
    /// Per-video results keyed by video id
    videos: KeyedMap<String, VideoViews>,
    /// Video ids in first-insertion order
    order: Vec<String>,
}

impl UserViews {
    /// Result for `video_id`, if the user watched it
    #[must_use]
    pub fn video(&self, video_id: &str) -> Option<&VideoViews> {
        self.videos.get(video_id)
    }

    /// Videos in stable key order
    #[must_use]
    pub fn videos(&self) -> Vec<(&str, &VideoViews)> {
        ordered_entries(&self.videos, &self.order)
    }

    /// Number of distinct videos
    #[must_use]
    pub fn video_count(&self) -> usize {
        self.videos.len()
    }

    /// Sum of unique view time over all videos, in milliseconds
    #[must_use]
    pub fn total_milliseconds(&self) -> u64 {
        self.videos
            .values()
            .map(|video| u64::from(video.unique_duration.milliseconds()))
            .sum()
    }

    /// Store the result for a video, replacing any previous one
    ///
    /// A replaced video keeps its original position.
    pub(crate) fn insert(&mut self, video_id: String, views: VideoViews) {
        if !self.videos.contains_key(&video_id) {
            self.order.push(video_id.clone());
        }
        self.videos.insert(video_id, views);
    }
}

/// Outcome of one analysis run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalysisResult {
    /// Per-user results keyed by user id
    users: KeyedMap<String, UserViews>,
    /// User ids in first-insertion order
    order: Vec<String>,
}

impl AnalysisResult {
    /// Create an empty result
    #[must_use]
    pub fn new() -> Self {
        Self {
            users: create_hash_map(),
            order: Vec::new(),
        }
    }

    /// Result for `user_id`, if present
    #[must_use]
    pub fn user(&self, user_id: &str) -> Option<&UserViews> {
        self.users.get(user_id)
    }

    /// Result for one user/video pair, if present
    #[must_use]
    pub fn video(&self, user_id: &str, video_id: &str) -> Option<&VideoViews> {
        self.user(user_id).and_then(|user| user.video(video_id))
    }

    /// Unique view time for one user/video pair, if present
    #[must_use]
    pub fn unique_duration(&self, user_id: &str, video_id: &str) -> Option<TimeOffset> {
        self.video(user_id, video_id)
            .map(VideoViews::unique_duration)
    }

    /// Users in stable key order
    #[must_use]
    pub fn users(&self) -> Vec<(&str, &UserViews)> {
        ordered_entries(&self.users, &self.order)
    }

    /// Number of distinct users
    #[must_use]
    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    /// Whether no event contributed to the result
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Get or create the entry for `user_id`
    pub(crate) fn user_entry(&mut self, user_id: &str) -> &mut UserViews {
        if !self.users.contains_key(user_id) {
            self.order.push(user_id.to_owned());
        }
        self.users.entry(user_id.to_owned()).or_default()
    }
}

#[cfg(feature = "serde")]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
impl serde::Serialize for UserViews {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.videos())
    }
}

#[cfg(feature = "serde")]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
impl serde::Serialize for AnalysisResult {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.users())
    }
}

/// Entries of `map` with integer ids first by value, then the rest in `order`
fn ordered_entries<'a, V>(map: &'a KeyedMap<String, V>, order: &'a [String]) -> Vec<(&'a str, &'a V)> {
    let mut integers: Vec<&str> = order
        .iter()
        .map(String::as_str)
        .filter(|id| is_index_id(id))
        .collect();
    integers.sort_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));

    let names = order.iter().map(String::as_str).filter(|id| !is_index_id(id));

    integers
        .into_iter()
        .chain(names)
        .filter_map(|id| map.get(id).map(|value| (id, value)))
        .collect()
}

/// Canonical array-index id: `0`, or digits without a leading zero below `u32::MAX`
fn is_index_id(id: &str) -> bool {
    is_ascii_digits(id)
        && (id == "0" || !id.starts_with('0'))
        && id.parse::<u32>().is_ok_and(|value| value != u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn views(ms: u32) -> VideoViews {
        VideoViews::new(TimeOffset::new(ms).unwrap(), Vec::new())
    }

    fn user_order(result: &AnalysisResult) -> Vec<&str> {
        result.users().into_iter().map(|(id, _)| id).collect()
    }

    #[test]
    fn index_id_detection() {
        assert!(is_index_id("0"));
        assert!(is_index_id("42"));
        assert!(is_index_id("4294967294"));
        assert!(!is_index_id("4294967295"));
        assert!(!is_index_id("99999999999"));
        assert!(!is_index_id("02"));
        assert!(!is_index_id("-1"));
        assert!(!is_index_id("a"));
    }

    #[test]
    fn integers_sorted_names_in_insertion_order() {
        let mut result = AnalysisResult::new();
        for id in ["zoe", "10", "02", "amy", "2", "4294967295", "0", "bob"] {
            result.user_entry(id).insert("v".to_string(), views(1));
        }
        assert_eq!(
            user_order(&result),
            vec!["0", "2", "10", "zoe", "02", "amy", "4294967295", "bob"]
        );
    }

    #[test]
    fn reinsertion_keeps_position() {
        let mut result = AnalysisResult::new();
        result.user_entry("b").insert("y".to_string(), views(1));
        result.user_entry("a").insert("x".to_string(), views(1));
        result.user_entry("b").insert("x".to_string(), views(1));
        result.user_entry("b").insert("y".to_string(), views(5));

        assert_eq!(user_order(&result), vec!["b", "a"]);
        let videos: Vec<&str> = result.user("b").unwrap().videos().into_iter().map(|(id, _)| id).collect();
        assert_eq!(videos, vec!["y", "x"]);
        assert_eq!(result.unique_duration("b", "y"), Some(TimeOffset::new(5).unwrap()));
    }

    #[test]
    fn lookups() {
        let mut result = AnalysisResult::new();
        assert!(result.is_empty());

        result.user_entry("alice").insert("7".to_string(), views(500));
        result.user_entry("alice").insert("3".to_string(), views(250));

        assert_eq!(result.user_count(), 1);
        assert_eq!(result.video("alice", "7"), Some(&views(500)));
        assert_eq!(
            result.unique_duration("alice", "3"),
            Some(TimeOffset::new(250).unwrap())
        );
        assert!(result.video("alice", "9").is_none());
        assert!(result.video("bob", "7").is_none());

        let alice = result.user("alice").unwrap();
        assert_eq!(alice.video_count(), 2);
        assert_eq!(alice.total_milliseconds(), 750);
        let order: Vec<&str> = alice.videos().into_iter().map(|(id, _)| id).collect();
        assert_eq!(order, vec!["3", "7"]);
    }
}
