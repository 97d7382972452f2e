#![warn(
    rustdoc::broken_intra_doc_links,
    missing_debug_implementations,
    missing_docs,
    rust_2018_idioms,
    unreachable_pub,
    unused_import_braces,
    unused_qualifications
)]
#![forbid(unsafe_code)]

//! Asynchronous remote control client for [cmus](https://cmus.github.io).
//!
//! cmus can be controlled over the network when started with `--listen`. Every interaction is a
//! short *transaction*: connect, log in with the password, send one command, read the reply, and
//! disconnect. [`Client::execute`] performs exactly one such transaction.
//!
//! On top of that, [`Remote`] keeps a status poll running and dispatches user commands
//! concurrently with it, publishing everything to a single [`Events`] stream.
//!
//! ```no_run
//! use cmus_remote::{commands::Command, Client, ConnectionTarget};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Client::new();
//!     let target = ConnectionTarget::new("localhost", 3000, "secret");
//!
//!     client.execute(&target, Command::Pause).await?;
//!
//!     let status = client.status(&target).await?;
//!     println!("{} - {}", status.artist().unwrap_or(""), status.title().unwrap_or(""));
//!     Ok(())
//! }
//! ```

mod client;
mod config;
mod errors;
mod poller;
mod remote;
mod target;

pub mod commands;
pub mod responses;

pub use self::{
    client::Client,
    config::{ClientConfig, ClientConfigBuilder},
    errors::{ClientError, InvalidTarget, UnknownCommand},
    poller::Poller,
    remote::{Event, Events, Remote},
    responses::Status,
    target::{ConnectionTarget, DEFAULT_PORT},
};

/// Protocol-level types.
pub mod raw {
    pub use cmus_protocol::{
        parser, Command as RawCommand, CommandError, ProtocolError, Response as RawResponse,
    };
}
