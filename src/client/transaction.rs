use std::{future::Future, io, time::Duration};

use cmus_protocol::AsyncConnection;
use tokio::{
    io::{AsyncRead, AsyncWrite, AsyncWriteExt},
    net::TcpStream,
    time::timeout,
};
use tracing::{debug, trace, warn};

use crate::commands::Command;
use crate::errors::ClientError;
use crate::raw::{ProtocolError, RawCommand, RawResponse};

pub(super) async fn connect(address: (&str, u16), limit: Duration) -> io::Result<TcpStream> {
    match timeout(limit, TcpStream::connect(address)).await {
        Ok(result) => result,
        Err(_) => Err(timed_out("connecting")),
    }
}

/// Log in and run a single command on a fresh connection.
pub(super) async fn run<IO>(
    connection: &mut AsyncConnection<IO>,
    password: &str,
    command: Command,
    limit: Duration,
) -> Result<RawResponse, ClientError>
where
    IO: AsyncRead + AsyncWrite + Unpin,
{
    let login = RawCommand::new("passwd")
        .try_argument(password)
        .map_err(|e| ClientError::Write(e.into()))?;

    bounded(limit, "sending password", connection.send(login))
        .await
        .map_err(ClientError::Write)?;

    let reply = bounded(limit, "reading login reply", connection.receive())
        .await
        .map_err(ClientError::Read)?;

    if !reply.is_empty() {
        warn!(reply = reply.message(), "login rejected");
        return Err(ClientError::Auth(reply.message().to_owned()));
    }

    trace!("logged in");

    bounded(limit, "sending command", connection.send(command.to_raw()))
        .await
        .map_err(ClientError::Write)?;

    let response = bounded(limit, "reading response", connection.receive())
        .await
        .map_err(ClientError::Read)?;

    debug!(lines = response.len(), "transaction complete");

    if response.is_empty() {
        Ok(RawResponse::empty())
    } else {
        Ok(response)
    }
}

/// Shut down the transport, ignoring any errors.
pub(super) async fn close<IO>(connection: AsyncConnection<IO>)
where
    IO: AsyncWrite + Unpin,
{
    let mut io = connection.into_inner();

    if let Err(error) = io.shutdown().await {
        trace!(?error, "error while closing connection");
    }
}

async fn bounded<F, T>(limit: Duration, operation: &'static str, fut: F) -> Result<T, ProtocolError>
where
    F: Future<Output = Result<T, ProtocolError>>,
{
    match timeout(limit, fut).await {
        Ok(result) => result,
        Err(_) => Err(ProtocolError::Io(timed_out(operation))),
    }
}

fn timed_out(operation: &'static str) -> io::Error {
    io::Error::new(io::ErrorKind::TimedOut, format!("timed out {}", operation))
}
