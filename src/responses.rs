//! Typed responses.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::raw::{
    parser::{status_line, StatusLine},
    RawResponse,
};

/// Response to the [`status`](crate::commands::Command::Status) command.
///
/// A `Status` is built from scratch for every response, nothing carries over from earlier
/// polls. If a line is missing from a response the corresponding field is simply unset; callers
/// that want to keep showing the last known value need to compare against their previous
/// `Status` themselves.
///
/// Every field follows the last line of its kind in the response.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[non_exhaustive]
pub struct Status {
    /// Playback state, e.g. `playing`, `paused` or `stopped`.
    pub state: Option<String>,
    /// Path of the loaded file.
    pub file: Option<String>,
    /// Length of the loaded track, in seconds.
    pub duration: Option<u64>,
    /// Playback position, in seconds.
    pub position: Option<u64>,
    /// Metadata of the loaded track, e.g. `artist` or `title`.
    pub tags: HashMap<String, String>,
    /// Player options, e.g. `repeat` or `shuffle`.
    pub settings: HashMap<String, String>,
}

impl Status {
    /// Parse the text of a status response.
    ///
    /// This never fails. Lines with unknown keywords are skipped, as are `duration` and
    /// `position` lines that do not contain a number.
    ///
    /// ```
    /// use cmus_remote::Status;
    ///
    /// let status = Status::parse("status playing\nposition 75\nduration 300\n");
    ///
    /// assert_eq!(status.state.as_deref(), Some("playing"));
    /// assert_eq!(status.progress(), 25);
    /// assert_eq!(status.run_time(), "1:15");
    /// ```
    pub fn parse(text: &str) -> Status {
        let mut status = Status::default();

        for line in text.lines() {
            status.apply(line);
        }

        status
    }

    /// Parse a raw response.
    pub fn from_response(response: &RawResponse) -> Status {
        Status::parse(response.as_str())
    }

    fn apply(&mut self, line: &str) {
        match status_line(line) {
            StatusLine::Status(state) => self.state = Some(state.to_owned()),
            StatusLine::File(file) => self.file = Some(file.to_owned()),
            StatusLine::Duration(d) => self.duration = Some(d),
            StatusLine::Position(p) => self.position = Some(p),
            StatusLine::Tag { key, value } => {
                self.tags.insert(key.to_owned(), value.to_owned());
            }
            StatusLine::Set { key, value } => {
                self.settings.insert(key.to_owned(), value.to_owned());
            }
            StatusLine::Malformed { keyword, value } => {
                warn!(keyword, value, "ignoring malformed status line");
            }
            StatusLine::Other("") => {}
            StatusLine::Other(line) => debug!(line, "unrecognized status line"),
        }
    }

    /// Get the value of a tag.
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }

    /// Get the value of a player option.
    pub fn setting(&self, key: &str) -> Option<&str> {
        self.settings.get(key).map(String::as_str)
    }

    /// The `artist` tag.
    pub fn artist(&self) -> Option<&str> {
        self.tag("artist")
    }

    /// The `title` tag.
    pub fn title(&self) -> Option<&str> {
        self.tag("title")
    }

    /// The `album` tag.
    pub fn album(&self) -> Option<&str> {
        self.tag("album")
    }

    /// Playback progress as a fraction of the duration.
    ///
    /// Returns 0 if the duration is unknown or zero. Not clamped, a position past the end gives
    /// a value above 1.
    pub fn progress_fraction(&self) -> f64 {
        match (self.position, self.duration) {
            (Some(position), Some(duration)) if duration > 0 => position as f64 / duration as f64,
            _ => 0.0,
        }
    }

    /// Playback progress as a whole percentage in `0..=100`, suitable for a progress bar.
    ///
    /// Returns 0 if the duration is unknown or zero.
    pub fn progress(&self) -> u8 {
        match self.duration {
            Some(duration) if duration > 0 => {
                let position = u128::from(self.position.unwrap_or(0));
                let percent = position * 100 / u128::from(duration);
                percent.min(100) as u8
            }
            _ => 0,
        }
    }

    /// Elapsed time formatted as `M:SS`, e.g. `1:30` or `63:05`.
    pub fn run_time(&self) -> String {
        let position = self.position.unwrap_or(0);
        format!("{}:{:02}", position / 60, position % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const PLAYING: &str = "status playing\n\
                           file /music/a.mp3\n\
                           duration 180\n\
                           position 90\n\
                           tag artist X\n\
                           tag title Y\n";

    #[test]
    fn full_status() {
        let status = Status::parse(PLAYING);

        assert_eq!(status.state.as_deref(), Some("playing"));
        assert_eq!(status.file.as_deref(), Some("/music/a.mp3"));
        assert_eq!(status.duration, Some(180));
        assert_eq!(status.position, Some(90));
        assert_eq!(status.tags.len(), 2);
        assert_eq!(status.artist(), Some("X"));
        assert_eq!(status.title(), Some("Y"));
        assert_eq!(status.album(), None);
        assert!(status.settings.is_empty());
        assert_eq!(status.progress(), 50);
        assert_eq!(status.progress_fraction(), 0.5);
        assert_eq!(status.run_time(), "1:30");
    }

    #[test]
    fn last_line_wins() {
        let status = Status::parse(
            "tag title A\ntag title B\nstatus playing\nstatus paused\nset repeat false\nset repeat true\n",
        );

        assert_eq!(status.title(), Some("B"));
        assert_eq!(status.state.as_deref(), Some("paused"));
        assert_eq!(status.setting("repeat"), Some("true"));
    }

    #[test]
    fn parsing_is_idempotent() {
        assert_eq!(Status::parse(PLAYING), Status::parse(PLAYING));
    }

    #[test]
    fn unknown_lines_are_skipped() {
        let status = Status::parse("stream http://radio\nstatus playing\n\ntag artist X\n");

        assert_eq!(status.state.as_deref(), Some("playing"));
        assert_eq!(status.artist(), Some("X"));
    }

    #[test]
    fn malformed_numbers_keep_previous_value() {
        let status = Status::parse("duration 200\nduration soon\nposition x\n");

        assert_eq!(status.duration, Some(200));
        assert_eq!(status.position, None);
    }

    #[test]
    fn missing_tag_value_is_empty() {
        let status = Status::parse("tag album\nset continue\n");

        assert_eq!(status.album(), Some(""));
        assert_eq!(status.setting("continue"), Some(""));
    }

    #[test]
    fn values_keep_spaces() {
        let status = Status::parse("file /music/My Band/Song 1.ogg\ntag title A Long Title\n");

        assert_eq!(status.file.as_deref(), Some("/music/My Band/Song 1.ogg"));
        assert_eq!(status.title(), Some("A Long Title"));
    }

    #[test]
    fn empty_response() {
        let status = Status::from_response(&RawResponse::empty());

        assert_eq!(status, Status::default());
        assert_eq!(status.progress(), 0);
        assert_eq!(status.progress_fraction(), 0.0);
        assert_eq!(status.run_time(), "0:00");
    }

    #[test]
    fn zero_duration() {
        let status = Status::parse("duration 0\nposition 10\n");
        assert_eq!(status.progress(), 0);
    }

    #[test]
    fn run_time_format() {
        let at = |position| Status {
            position: Some(position),
            ..Status::default()
        };

        assert_eq!(at(0).run_time(), "0:00");
        assert_eq!(at(9).run_time(), "0:09");
        assert_eq!(at(60).run_time(), "1:00");
        assert_eq!(at(3785).run_time(), "63:05");
    }

    proptest! {
        #[test]
        fn progress_is_bounded(position in any::<u64>(), duration in any::<u64>()) {
            let status = Status {
                position: Some(position),
                duration: Some(duration),
                ..Status::default()
            };

            let progress = status.progress();
            prop_assert!(progress <= 100);
            if duration == 0 {
                prop_assert_eq!(progress, 0);
            }
        }

        #[test]
        fn parse_never_panics(text in "(status|file|duration|position|tag|set|x)?( [a-z0-9 ]{0,12})?(\n(tag|set) [a-z ]{0,8})*") {
            let _ = Status::parse(&text);
        }
    }
}
