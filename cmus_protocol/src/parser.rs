//! [`nom`]-based parsers for the lines of a cmus `status` response.
//!
//! A status response is a list of lines, each of which starts with a keyword that says what the
//! rest of the line means:
//!
//! ```text
//! status playing
//! file /music/artist/track.mp3
//! duration 180
//! position 90
//! tag artist Some Artist
//! set repeat false
//! ```
//!
//! The parser never fails. Lines it does not understand are returned as [`StatusLine::Other`] so
//! the caller can decide whether they are worth a log message.
//!
//! [`nom`]: https://crates.io/crates/nom

use nom::{
    bytes::complete::take_till,
    character::complete::{char, digit1},
    combinator::{all_consuming, map_res, opt, rest},
    sequence::{pair, preceded},
    IResult,
};

/// A single classified line of a status response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLine<'a> {
    /// `status <state>`, the playback state.
    Status(&'a str),
    /// `file <path>`, the currently loaded file. The path may contain spaces.
    File(&'a str),
    /// `duration <seconds>`, the length of the current track.
    Duration(u64),
    /// `position <seconds>`, the playback position in the current track.
    Position(u64),
    /// `tag <key> <value>`, a metadata tag of the current track.
    Tag {
        /// Tag name, e.g. `artist`.
        key: &'a str,
        /// Tag value. Empty if the line ended after the key.
        value: &'a str,
    },
    /// `set <key> <value>`, a player option.
    Set {
        /// Option name, e.g. `shuffle`.
        key: &'a str,
        /// Option value. Empty if the line ended after the key.
        value: &'a str,
    },
    /// A known keyword whose value could not be interpreted, e.g. a non-numeric duration.
    Malformed {
        /// The keyword of the line.
        keyword: &'a str,
        /// The uninterpretable value.
        value: &'a str,
    },
    /// A line with an unknown keyword. Contains the complete line.
    Other(&'a str),
}

/// Classify a single line (without the line terminator) of a status response.
///
/// ```
/// use cmus_protocol::parser::{status_line, StatusLine};
///
/// assert_eq!(status_line("duration 180"), StatusLine::Duration(180));
/// assert_eq!(
///     status_line("tag title Song With Spaces"),
///     StatusLine::Tag { key: "title", value: "Song With Spaces" }
/// );
/// ```
pub fn status_line(line: &str) -> StatusLine<'_> {
    let (keyword, value) = match keyword_and_value(line) {
        Ok((_, kv)) => kv,
        Err(_) => return StatusLine::Other(line),
    };

    match keyword {
        "status" => StatusLine::Status(value),
        "file" => StatusLine::File(value),
        "duration" => seconds(value)
            .map(StatusLine::Duration)
            .unwrap_or(StatusLine::Malformed { keyword, value }),
        "position" => seconds(value)
            .map(StatusLine::Position)
            .unwrap_or(StatusLine::Malformed { keyword, value }),
        "tag" => {
            let (key, value) = split_key_value(value);
            StatusLine::Tag { key, value }
        }
        "set" => {
            let (key, value) = split_key_value(value);
            StatusLine::Set { key, value }
        }
        _ => StatusLine::Other(line),
    }
}

/// Recognize a word, up to (but not including) the next space.
fn word(i: &str) -> IResult<&str, &str> {
    take_till(|c| c == ' ')(i)
}

/// Recognize the remainder of the line after a single separating space, if there is one.
fn remainder(i: &str) -> IResult<&str, &str> {
    preceded(opt(char(' ')), rest)(i)
}

/// Split a line into its first word and the remainder.
fn keyword_and_value(i: &str) -> IResult<&str, (&str, &str)> {
    pair(word, remainder)(i)
}

/// Split `<key> <value>`, treating a missing value as empty.
fn split_key_value(i: &str) -> (&str, &str) {
    keyword_and_value(i).map(|(_, kv)| kv).unwrap_or((i, ""))
}

/// Parse an unsigned number of seconds making up the entire value.
fn seconds(i: &str) -> Option<u64> {
    let parsed: IResult<&str, u64> = all_consuming(map_res(digit1, str::parse::<u64>))(i.trim());
    parsed.ok().map(|(_, s)| s)
}
