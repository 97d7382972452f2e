//! The client implementation.

mod transaction;

use cmus_protocol::AsyncConnection;
use tokio::io::{AsyncRead, AsyncWrite};
use tracing::{debug, span, Instrument, Level};

use crate::commands::Command;
use crate::config::ClientConfig;
use crate::errors::ClientError;
use crate::raw::RawResponse;
use crate::responses::Status;
use crate::target::ConnectionTarget;

/// Client for cmus.
///
/// The client itself holds no connection. Every call to [`Client::execute`] opens a fresh
/// connection, runs one command and closes the connection again, so a `Client` can be cloned
/// and used from any number of tasks at the same time without the transactions affecting each
/// other.
///
/// ```no_run
/// use cmus_remote::{commands::Command, Client, ConnectionTarget};
///
/// # async fn example() -> Result<(), cmus_remote::ClientError> {
/// let client = Client::new();
/// let target = ConnectionTarget::new("localhost", 3000, "");
///
/// let response = client.execute(&target, Command::Next).await?;
/// if !response.is_empty() {
///     println!("cmus says: {}", response);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default)]
pub struct Client {
    config: ClientConfig,
}

impl Client {
    /// Create a client with the default configuration.
    pub fn new() -> Client {
        Client::default()
    }

    /// Create a client with the given configuration.
    pub fn with_config(config: ClientConfig) -> Client {
        Client { config }
    }

    /// Returns the configuration of this client.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Run one complete transaction: connect to the target, log in, send the command and
    /// return the response.
    ///
    /// A successful result may be [empty](RawResponse::is_empty), which is how cmus acknowledges
    /// most commands. The connection is closed again on every exit path.
    ///
    /// # Errors
    ///
    /// This returns an error if connecting fails, if reading or writing fails (including running
    /// into the configured timeout), or if cmus rejects the password. A command is never sent if
    /// logging in failed.
    pub async fn execute(
        &self,
        target: &ConnectionTarget,
        command: Command,
    ) -> Result<RawResponse, ClientError> {
        let span = span!(Level::DEBUG, "transaction", %target, %command);

        async move {
            let connection = transaction::connect(target.address(), self.config.timeout)
                .await
                .map_err(ClientError::Connect)?;
            debug!("connected");

            self.execute_on(connection, &target.password, command).await
        }
        .instrument(span)
        .await
    }

    /// Run a transaction over an already established connection.
    ///
    /// This performs all steps of [`Client::execute`] except connecting. The connection is shut
    /// down afterwards.
    ///
    /// # Errors
    ///
    /// This returns errors in the same conditions as [`Client::execute`], except for connection
    /// errors.
    pub async fn execute_on<IO>(
        &self,
        io: IO,
        password: &str,
        command: Command,
    ) -> Result<RawResponse, ClientError>
    where
        IO: AsyncRead + AsyncWrite + Unpin,
    {
        let mut connection = AsyncConnection::new(io);

        let result = transaction::run(&mut connection, password, command, self.config.timeout).await;
        transaction::close(connection).await;

        result
    }

    /// Request the status of the player and parse it.
    ///
    /// # Errors
    ///
    /// This returns errors in the same conditions as [`Client::execute`].
    pub async fn status(&self, target: &ConnectionTarget) -> Result<Status, ClientError> {
        let response = self.execute(target, Command::Status).await?;
        Ok(Status::from_response(&response))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::io;
    use tokio_test::io::Builder as MockBuilder;

    #[tokio::test]
    async fn empty_reply() {
        let io = MockBuilder::new()
            .write(b"passwd secret\n")
            .read(b"\n")
            .write(b"player-pause\n")
            .read(b"\n")
            .build();

        let response = Client::new()
            .execute_on(io, "secret", Command::Pause)
            .await
            .expect("transaction failed");

        assert!(response.is_empty());
    }

    #[tokio::test]
    async fn empty_password() {
        let io = MockBuilder::new()
            .write(b"passwd \n")
            .read(b"\n")
            .write(b"vol +10%\n")
            .build();

        let response = Client::new()
            .execute_on(io, "", Command::VolumeUp)
            .await
            .expect("transaction failed");

        // cmus closed the connection instead of sending an empty line
        assert_eq!(response, RawResponse::empty());
    }

    #[tokio::test]
    async fn status_reply() {
        let io = MockBuilder::new()
            .write(b"passwd pw\n")
            .read(b"\n")
            .write(b"status\n")
            .read(b"status playing\nduration 200\n")
            .read(b"position 50\ntag artist X\n\n")
            .build();

        let response = Client::new()
            .execute_on(io, "pw", Command::Status)
            .await
            .expect("transaction failed");

        let status = Status::from_response(&response);
        assert_eq!(status.state.as_deref(), Some("playing"));
        assert_eq!(status.progress(), 25);
        assert_eq!(status.artist(), Some("X"));
    }

    #[tokio::test]
    async fn message_reply() {
        let io = MockBuilder::new()
            .write(b"passwd pw\n")
            .read(b"\n")
            .write(b"player-next\n")
            .read(b"Error: no next track\n\n")
            .build();

        let response = Client::new()
            .execute_on(io, "pw", Command::Next)
            .await
            .expect("transaction failed");

        assert_eq!(response.message(), "Error: no next track");
    }

    #[tokio::test]
    async fn whitespace_reply_is_empty() {
        let io = MockBuilder::new()
            .write(b"passwd pw\n")
            .read(b"\n")
            .write(b"player-stop\n")
            .read(b"  \n\n")
            .build();

        let response = Client::new()
            .execute_on(io, "pw", Command::Stop)
            .await
            .expect("transaction failed");

        assert_eq!(response, RawResponse::empty());
    }

    #[tokio::test]
    async fn wrong_password() {
        // No write of the command is expected, the mock fails if one happens
        let io = MockBuilder::new()
            .write(b"passwd wrong\n")
            .read(b"wrong password\n")
            .build();

        let error = Client::new()
            .execute_on(io, "wrong", Command::Pause)
            .await
            .unwrap_err();

        assert_matches!(error, ClientError::Auth(message) if message == "wrong password");
    }

    #[tokio::test]
    async fn password_with_newline() {
        let io = MockBuilder::new().build();

        let error = Client::new()
            .execute_on(io, "pw\nplayer-stop", Command::Pause)
            .await
            .unwrap_err();

        assert_matches!(error, ClientError::Write(_));
    }

    #[tokio::test]
    async fn read_error() {
        let io = MockBuilder::new()
            .write(b"passwd pw\n")
            .read(b"\n")
            .write(b"status\n")
            .read_error(io::Error::new(io::ErrorKind::ConnectionReset, "reset"))
            .build();

        let error = Client::new()
            .execute_on(io, "pw", Command::Status)
            .await
            .unwrap_err();

        assert_matches!(error, ClientError::Read(_));
    }

    #[tokio::test]
    async fn write_error() {
        let io = MockBuilder::new()
            .write_error(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
            .build();

        let error = Client::new()
            .execute_on(io, "pw", Command::Status)
            .await
            .unwrap_err();

        assert_matches!(error, ClientError::Write(_));
    }
}
