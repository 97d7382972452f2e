#![warn(
    missing_debug_implementations,
    missing_docs,
    rust_2018_idioms,
    unreachable_pub
)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! Implementation of the remote control protocol spoken by [cmus].
//!
//! The protocol is plain text and line based. Every message the client sends is a single line,
//! and every reply from the player is a block of lines terminated by an empty line (or by the
//! player closing the connection). An empty reply means success, anything else is a message the
//! player wants to show to the user.
//!
//! The async support, available if the `async` crate feature is enabled, consists of
//! [`AsyncConnection`], which works on top of any [Tokio] transport.
//!
//! [cmus]: https://cmus.github.io
//! [Tokio]: https://tokio.rs

pub mod command;
pub mod parser;
pub mod response;

#[cfg(feature = "async")]
#[cfg_attr(docsrs, doc(cfg(feature = "async")))]
mod connection;

#[cfg(feature = "async")]
pub use connection::AsyncConnection;

pub use command::{Command, CommandError};
pub use response::Response;

use std::io;

/// Unrecoverable errors.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// IO error occurred
    #[error("IO error")]
    Io(#[from] io::Error),
    /// A command line could not be built from the given parts
    #[error("invalid command")]
    InvalidCommand(#[from] CommandError),
}
