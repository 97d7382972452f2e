use std::time::Duration;

/// Configuration for client behavior.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// Upper bound for connecting and for every single read or write of a transaction
    /// (default: 10 seconds).
    pub timeout: Duration,

    /// Interval between two status polls (default: 500ms).
    pub poll_interval: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            poll_interval: Duration::from_millis(500),
        }
    }
}

impl ClientConfig {
    /// Create a new config builder.
    #[must_use]
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }
}

/// Builder for [`ClientConfig`].
#[derive(Clone, Debug, Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Set the timeout for connecting and for each read or write.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the status polling interval.
    ///
    /// # Panics
    ///
    /// Panics if the interval is zero.
    #[must_use]
    pub fn poll_interval(mut self, interval: Duration) -> Self {
        assert!(interval > Duration::ZERO, "poll interval must be non-zero");
        self.config.poll_interval = interval;
        self
    }

    /// Build the config.
    #[must_use]
    pub fn build(self) -> ClientConfig {
        self.config
    }
}
