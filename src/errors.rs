use std::io;

use crate::raw::ProtocolError;

/// Errors which can occur during a single transaction with cmus.
///
/// None of these are retried internally. Every variant only concerns the transaction that
/// produced it, so the next transaction starts from a clean slate.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Opening the connection failed (unreachable host, refused connection, name resolution
    /// failure or timeout).
    #[error("failed to connect")]
    Connect(#[source] io::Error),
    /// Sending a line to cmus failed.
    #[error("failed to send command")]
    Write(#[source] ProtocolError),
    /// Reading a response from cmus failed. A closed connection is not an error.
    #[error("failed to read response")]
    Read(#[source] ProtocolError),
    /// cmus rejected the password. Contains the message sent by cmus.
    #[error("could not log in: {0}")]
    Auth(String),
}

impl ClientError {
    /// Returns `true` if this error was caused by an operation running into the configured
    /// timeout.
    pub fn is_timeout(&self) -> bool {
        let io_error = match self {
            ClientError::Connect(e) => Some(e),
            ClientError::Write(ProtocolError::Io(e)) | ClientError::Read(ProtocolError::Io(e)) => {
                Some(e)
            }
            _ => None,
        };

        matches!(io_error, Some(e) if e.kind() == io::ErrorKind::TimedOut)
    }
}

/// Error returned when looking up a command that is not part of the [catalog].
///
/// [catalog]: crate::commands
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown command {0:?}")]
pub struct UnknownCommand(pub String);

/// Errors returned when validating user-supplied connection settings.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InvalidTarget {
    /// No host was given.
    #[error("host is empty")]
    EmptyHost,
    /// The port was not a number between 1 and 65535.
    #[error("invalid port {0:?}")]
    InvalidPort(String),
}
