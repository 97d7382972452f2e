//! Complete responses.

use std::fmt;

/// Response to a command, consisting of the lines cmus sent before the terminating empty line.
///
/// Every line is stored followed by a newline character, so the contained text can be handed to
/// line-based parsers as-is. A response without any (non-blank) content means the command
/// succeeded silently, which is how cmus acknowledges most commands.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Response {
    text: String,
}

impl Response {
    /// Construct a new empty response.
    ///
    /// ```
    /// use cmus_protocol::Response;
    ///
    /// let r = Response::empty();
    /// assert!(r.is_empty());
    /// assert_eq!(r.as_str(), "");
    /// ```
    pub fn empty() -> Self {
        Self::default()
    }

    /// Construct a response from raw text, as if each of its lines had been received.
    ///
    /// Blank lines are skipped, since on the wire a blank line would have ended the response.
    pub fn from_text(text: &str) -> Self {
        let mut builder = ResponseBuilder::new();

        for line in text.lines() {
            builder.push_line(line);
        }

        builder.finish()
    }

    /// Returns `true` if the response carries no message, ignoring whitespace.
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// The raw text of the response.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// The raw text of the response with surrounding whitespace removed, suitable for displaying
    /// as a message.
    pub fn message(&self) -> &str {
        self.text.trim()
    }

    /// Iterate over the lines of the response.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.lines()
    }

    /// Returns the number of lines in the response.
    pub fn len(&self) -> usize {
        self.lines().count()
    }

    /// Consume the response, returning the raw text.
    pub fn into_string(self) -> String {
        self.text
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Accumulates received lines into a [`Response`].
#[derive(Debug, Default)]
pub(crate) struct ResponseBuilder {
    text: String,
}

impl ResponseBuilder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Add a line, which must not contain the line terminator.
    ///
    /// Returns `false` if the line was blank, which ends the response.
    pub(crate) fn push_line(&mut self, line: &str) -> bool {
        let line = line.strip_suffix('\r').unwrap_or(line);

        if line.is_empty() {
            return false;
        }

        self.text.push_str(line);
        self.text.push('\n');
        true
    }

    pub(crate) fn finish(self) -> Response {
        Response { text: self.text }
    }
}
