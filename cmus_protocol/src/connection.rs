use bytes::BytesMut;
use memchr::memchr;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, trace};

use crate::{response::ResponseBuilder, Command, ProtocolError, Response};

/// Default receive buffer size
const DEFAULT_BUFFER_CAPACITY: usize = 4096;

/// An **asynchronous** connection to a cmus instance.
///
/// cmus does not greet connecting clients, so wrapping a transport does not perform any IO. The
/// first message on a new connection is expected to be the `passwd` command.
#[cfg_attr(docsrs, doc(cfg(feature = "async")))]
#[derive(Debug)]
pub struct AsyncConnection<IO> {
    io: IO,
    recv_buf: BytesMut,
    send_buf: BytesMut,
}

impl<IO> AsyncConnection<IO> {
    /// Wrap the given transport.
    pub fn new(io: IO) -> AsyncConnection<IO> {
        AsyncConnection {
            io,
            recv_buf: BytesMut::with_capacity(DEFAULT_BUFFER_CAPACITY),
            send_buf: BytesMut::new(),
        }
    }

    /// Send a command.
    ///
    /// # Errors
    ///
    /// This will return an error if writing to the given IO resource fails.
    #[tracing::instrument(skip(self), err)]
    pub async fn send(&mut self, command: Command) -> Result<(), ProtocolError>
    where
        IO: AsyncWrite + Unpin,
    {
        command.render(&mut self.send_buf);

        let result = self.write_send_buf().await;
        let length = self.send_buf.len();
        self.send_buf.clear();
        result?;

        debug!(length, "sent command");
        Ok(())
    }

    async fn write_send_buf(&mut self) -> Result<(), ProtocolError>
    where
        IO: AsyncWrite + Unpin,
    {
        self.io.write_all(&self.send_buf).await?;
        self.io.flush().await?;
        Ok(())
    }

    /// Receive a response from the server.
    ///
    /// A response ends at the first empty line or when the connection is closed, whichever comes
    /// first. Unlike in other protocols a closed connection is not an error here: cmus is free to
    /// close the connection instead of sending a terminating empty line.
    ///
    /// Invalid UTF-8 sequences in the received data are replaced with the replacement character.
    ///
    /// # Errors
    ///
    /// This will return an error if reading from the given IO resource returns an error.
    #[tracing::instrument(skip(self), err)]
    pub async fn receive(&mut self) -> Result<Response, ProtocolError>
    where
        IO: AsyncRead + Unpin,
    {
        let mut response = ResponseBuilder::new();

        loop {
            while let Some(end) = memchr(b'\n', &self.recv_buf) {
                let line = self.recv_buf.split_to(end + 1);

                if !response.push_line(&String::from_utf8_lossy(&line[..end])) {
                    debug!("received complete response");
                    return Ok(response.finish());
                }
            }

            let read = self.io.read_buf(&mut self.recv_buf).await?;
            trace!(read);

            if read == 0 {
                // Keep a final line that was not terminated before the connection closed
                if !self.recv_buf.is_empty() {
                    let rest = self.recv_buf.split();
                    response.push_line(&String::from_utf8_lossy(&rest));
                }

                debug!("end of stream while receiving response");
                return Ok(response.finish());
            }
        }
    }

    /// Consume the connection, returning the underlying transport.
    ///
    /// Any data that was already received but not yet returned as part of a response is lost.
    pub fn into_inner(self) -> IO {
        self.io
    }
}
