//! This module contains utilities for constructing cmus command lines.

use bytes::{BufMut, BytesMut};

use std::convert::{TryFrom, TryInto};
use std::fmt::{self, Debug};

/// A single command line, which can be sent to cmus.
///
/// The primary way to create a `Command` is the [`TryFrom`] implementation, or the
/// [`new`](Command::new) function (which panics instead of returning results).
///
/// Commands consist of the command itself (which may already contain words separated by spaces,
/// like `toggle repeat`) and any number of arguments, which are appended verbatim separated by a
/// single space.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Command {
    base: String,
    arguments: Vec<String>,
}

/// The command was invalid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    /// The command was empty.
    #[error("command was empty")]
    Empty,
    /// The command contained leading or trailing whitespace.
    #[error("command contained leading or trailing whitespace")]
    UnnecessaryWhitespace,
    /// The command contained a character which would break the line framing.
    #[error("command contained an invalid character {1:?} at position {0}")]
    InvalidCharacter(usize, char),
    /// An argument contained a character which would break the line framing.
    #[error("argument {argument} contained an invalid character {character:?} at position {position}")]
    InvalidArgument {
        /// Index of the offending argument.
        argument: usize,
        /// Byte position of the offending character inside the argument.
        position: usize,
        /// The offending character.
        character: char,
    },
}

impl Command {
    /// Create a new command, but panic instead of returning a `Result` when the conversion fails.
    ///
    /// This may be useful in cases where you supply known-good commands for simplicity.
    pub fn new<C>(c: C) -> Self
    where
        C: TryInto<Self>,
        <C as TryInto<Self>>::Error: Debug,
    {
        c.try_into().expect("invalid command")
    }

    /// Append an argument, panicking if it is invalid.
    ///
    /// Use [`Command::try_argument`] for values that come from user input.
    pub fn argument<A: AsRef<str>>(self, argument: A) -> Self {
        self.try_argument(argument).expect("invalid argument")
    }

    /// Append an argument.
    ///
    /// Arguments may be empty and may contain spaces, but no line breaks.
    ///
    /// # Errors
    ///
    /// Returns an error if the argument contains a carriage return or a newline.
    pub fn try_argument<A: AsRef<str>>(mut self, argument: A) -> Result<Self, CommandError> {
        let argument = argument.as_ref();

        if let Some((position, character)) = find_line_break(argument) {
            return Err(CommandError::InvalidArgument {
                argument: self.arguments.len(),
                position,
                character,
            });
        }

        self.arguments.push(argument.to_owned());
        Ok(self)
    }

    /// The command, without any arguments.
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Render the command to the wire representation, including the terminating newline.
    pub fn render(&self, buf: &mut BytesMut) {
        buf.reserve(self.rendered_len());
        buf.put_slice(self.base.as_bytes());

        for argument in &self.arguments {
            buf.put_u8(b' ');
            buf.put_slice(argument.as_bytes());
        }

        buf.put_u8(b'\n');
    }

    fn rendered_len(&self) -> usize {
        self.arguments
            .iter()
            .fold(self.base.len() + 1, |acc, a| acc + a.len() + 1)
    }
}

impl Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Arguments may carry credentials (`passwd`), only show how many there are
        f.debug_struct("Command")
            .field("base", &self.base)
            .field("arguments", &self.arguments.len())
            .finish()
    }
}

impl TryFrom<&str> for Command {
    type Error = CommandError;

    fn try_from(c: &str) -> Result<Self, Self::Error> {
        validate_command(c)?;

        Ok(Command {
            base: c.to_owned(),
            arguments: Vec::new(),
        })
    }
}

impl TryFrom<String> for Command {
    type Error = CommandError;

    fn try_from(c: String) -> Result<Self, Self::Error> {
        validate_command(&c)?;

        Ok(Command {
            base: c,
            arguments: Vec::new(),
        })
    }
}

fn validate_command(command: &str) -> Result<(), CommandError> {
    let (first, last) = match (command.chars().next(), command.chars().last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Err(CommandError::Empty),
    };

    // If either the first or last character are whitespace we have leading or trailing whitespace
    if first.is_whitespace() || last.is_whitespace() {
        return Err(CommandError::UnnecessaryWhitespace);
    }

    if let Some((index, c)) = command.char_indices().find(|(_, c)| c.is_control()) {
        return Err(CommandError::InvalidCharacter(index, c));
    }

    Ok(())
}

fn find_line_break(s: &str) -> Option<(usize, char)> {
    s.char_indices().find(|(_, c)| *c == '\n' || *c == '\r')
}
