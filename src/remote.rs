//! Remote control built on top of the [`Client`].

use std::{
    pin::Pin,
    task::{Context, Poll},
};

use futures::stream::Stream;
use tokio::sync::{
    mpsc::{self, UnboundedReceiver, UnboundedSender},
    watch,
};
use tracing::{debug, span, warn, Instrument, Level};

use crate::commands::Command;
use crate::errors::ClientError;
use crate::poller::Poller;
use crate::responses::Status;
use crate::{Client, ConnectionTarget};

/// Something that happened while talking to cmus.
#[derive(Debug)]
#[non_exhaustive]
pub enum Event {
    /// A status request completed.
    Status(Status),
    /// cmus replied to a command with a message, usually an error description.
    Message {
        /// The command that was sent.
        command: Command,
        /// The trimmed reply.
        text: String,
    },
    /// A transaction failed.
    Error {
        /// The command that was being executed.
        command: Command,
        /// What went wrong.
        error: ClientError,
    },
}

/// Stream of [`Event`]s published by a [`Remote`] and its status poller.
///
/// The stream ends once the `Remote` and all transactions it started are gone. If you don't
/// care about the results you can just drop it, results are then discarded.
#[derive(Debug)]
pub struct Events {
    rx: UnboundedReceiver<Event>,
}

impl Stream for Events {
    type Item = Event;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.rx.poll_recv(cx)
    }
}

/// Remote control for one cmus instance.
///
/// Commands are run as independent background tasks and never block the caller. Their results,
/// together with the results of the status poller, are published to the [`Events`] stream
/// returned by [`Remote::new`].
///
/// ```no_run
/// use cmus_remote::{commands::Command, Client, ConnectionTarget, Event, Remote};
/// use futures::StreamExt;
///
/// # async fn example() {
/// let target = ConnectionTarget::new("localhost", 3000, "secret");
/// let (mut remote, mut events) = Remote::new(Client::new(), target);
///
/// remote.activate();
/// remote.dispatch(Command::Next);
///
/// while let Some(event) = events.next().await {
///     if let Event::Status(status) = event {
///         println!("{}% {}", status.progress(), status.title().unwrap_or(""));
///     }
/// }
/// # }
/// ```
#[derive(Debug)]
pub struct Remote {
    client: Client,
    target: watch::Sender<ConnectionTarget>,
    target_rx: watch::Receiver<ConnectionTarget>,
    sink: UnboundedSender<Event>,
    poller: Option<Poller>,
}

impl Remote {
    /// Create a new remote for the given target.
    ///
    /// Polling is not started until [`Remote::activate`] is called.
    pub fn new(client: Client, target: ConnectionTarget) -> (Remote, Events) {
        let (sink, rx) = mpsc::unbounded_channel();
        let (target, target_rx) = watch::channel(target);

        let remote = Remote {
            client,
            target,
            target_rx,
            sink,
            poller: None,
        };

        (remote, Events { rx })
    }

    /// Returns the current target.
    pub fn target(&self) -> ConnectionTarget {
        self.target_rx.borrow().clone()
    }

    /// Change the target.
    ///
    /// Only transactions started after this call use the new target.
    pub fn set_target(&self, target: ConnectionTarget) {
        debug!(%target, "changing target");
        // Cannot fail, we hold a receiver ourselves
        let _ = self.target.send(target);
    }

    /// Run a command in the background.
    ///
    /// Since this spawns a task, this will panic when called outside a Tokio runtime.
    pub fn dispatch(&self, command: Command) {
        let target = self.target();
        tokio::spawn(publish(self.client.clone(), target, command, self.sink.clone()));
    }

    /// Start polling the status at the interval configured on the client.
    ///
    /// Does nothing if polling is already running.
    ///
    /// # Panics
    ///
    /// Panics if the configured poll interval is zero.
    pub fn activate(&mut self) {
        if self.poller.is_some() {
            return;
        }

        self.poller = Some(Poller::start(
            self.client.clone(),
            self.target_rx.clone(),
            self.sink.clone(),
            self.client.config().poll_interval,
        ));
    }

    /// Stop polling.
    ///
    /// Transactions that are already running still publish their results.
    pub async fn deactivate(&mut self) {
        if let Some(poller) = self.poller.take() {
            poller.stop().await;
        }
    }

    /// Returns `true` if the status is currently being polled.
    pub fn is_active(&self) -> bool {
        self.poller.is_some()
    }
}

/// Run one transaction and publish the outcome.
pub(crate) async fn publish(
    client: Client,
    target: ConnectionTarget,
    command: Command,
    sink: UnboundedSender<Event>,
) {
    let span = span!(Level::DEBUG, "publish", %command);

    let event = async {
        match client.execute(&target, command).await {
            Ok(response) if command == Command::Status => {
                Some(Event::Status(Status::from_response(&response)))
            }
            Ok(response) if response.is_empty() => None,
            Ok(response) => Some(Event::Message {
                command,
                text: response.message().to_owned(),
            }),
            Err(error) => {
                warn!(%target, error = %error, "transaction failed");
                Some(Event::Error { command, error })
            }
        }
    }
    .instrument(span)
    .await;

    if let Some(event) = event {
        if sink.send(event).is_err() {
            debug!("event receiver dropped, discarding result");
        }
    }
}
