//! Periodic status polling.

use std::time::Duration;

use tokio::{
    sync::{mpsc::UnboundedSender, oneshot, watch},
    task::JoinHandle,
    time::{self, MissedTickBehavior},
};
use tracing::{debug, error, trace};

use crate::commands::Command;
use crate::remote::{publish, Event};
use crate::{Client, ConnectionTarget};

/// Runs a status request at a fixed interval and publishes the results.
///
/// The first request is started immediately. Every tick spawns an independent transaction
/// against the target current at that tick, so a slow or failing request never delays the
/// following ones. Results are published as [`Event::Status`] or [`Event::Error`].
///
/// Dropping the poller stops ticking, use [`Poller::stop`] to also wait until the ticker has
/// actually exited.
#[derive(Debug)]
pub struct Poller {
    shutdown: Option<oneshot::Sender<()>>,
    ticker: Option<JoinHandle<()>>,
}

impl Poller {
    /// Start polling.
    ///
    /// Since this spawns a task internally, this will panic when called outside a Tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics if `interval` is zero.
    pub fn start(
        client: Client,
        target: watch::Receiver<ConnectionTarget>,
        sink: UnboundedSender<Event>,
        interval: Duration,
    ) -> Poller {
        assert!(interval > Duration::ZERO, "poll interval must be non-zero");

        let (shutdown, shutdown_rx) = oneshot::channel();

        let ticker = tokio::spawn(tick_loop(client, target, sink, interval, shutdown_rx));
        debug!(?interval, "started polling");

        Poller {
            shutdown: Some(shutdown),
            ticker: Some(ticker),
        }
    }

    /// Stop polling.
    ///
    /// No new request is started once this returns. Requests that are already running are not
    /// cancelled and still publish their results.
    pub async fn stop(mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }

        if let Some(ticker) = self.ticker.take() {
            if let Err(e) = ticker.await {
                error!(error = ?e, "status ticker panicked");
            }
        }

        debug!("stopped polling");
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        // Dropping the sender wakes up the ticker as well
        self.shutdown.take();
    }
}

async fn tick_loop(
    client: Client,
    target: watch::Receiver<ConnectionTarget>,
    sink: UnboundedSender<Event>,
    interval: Duration,
    mut shutdown: oneshot::Receiver<()>,
) {
    let mut ticks = time::interval(interval);
    ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            biased;
            _ = &mut shutdown => break,
            _ = ticks.tick() => {
                let target = target.borrow().clone();
                trace!(%target, "tick");

                tokio::spawn(publish(client.clone(), target, Command::Status, sink.clone()));
            }
        }
    }

    trace!("ticker exiting");
}
