//! Where to connect to.

use std::fmt;

use crate::errors::InvalidTarget;

/// Port cmus listens on when started with `--listen` and no explicit port.
pub const DEFAULT_PORT: u16 = 3000;

/// Address and credentials of a cmus instance.
///
/// A target is captured (cloned) at the start of each transaction, so changing the target used
/// by a [`Remote`](crate::Remote) only affects transactions started afterwards.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ConnectionTarget {
    /// Host name or IP address.
    pub host: String,
    /// TCP port.
    pub port: u16,
    /// Password configured in cmus (`server_password`). May be empty.
    pub password: String,
}

impl ConnectionTarget {
    /// Create a new target.
    pub fn new<H, P>(host: H, port: u16, password: P) -> Self
    where
        H: Into<String>,
        P: Into<String>,
    {
        ConnectionTarget {
            host: host.into(),
            port,
            password: password.into(),
        }
    }

    /// Create a target from raw settings as entered by a user.
    ///
    /// ```
    /// use cmus_remote::ConnectionTarget;
    ///
    /// let target = ConnectionTarget::from_settings("mediabox", " 3000 ", "").unwrap();
    /// assert_eq!(target.port, 3000);
    ///
    /// assert!(ConnectionTarget::from_settings("", "3000", "").is_err());
    /// assert!(ConnectionTarget::from_settings("mediabox", "0", "").is_err());
    /// ```
    ///
    /// # Errors
    ///
    /// This returns an error if the host is empty, or if the port is not a number between 1 and
    /// 65535.
    pub fn from_settings(host: &str, port: &str, password: &str) -> Result<Self, InvalidTarget> {
        let host = host.trim();
        if host.is_empty() {
            return Err(InvalidTarget::EmptyHost);
        }

        let port = match port.trim().parse::<u16>() {
            Ok(p) if p != 0 => p,
            _ => return Err(InvalidTarget::InvalidPort(port.to_owned())),
        };

        Ok(ConnectionTarget::new(host, port, password))
    }

    pub(crate) fn address(&self) -> (&str, u16) {
        (&self.host, self.port)
    }
}

impl fmt::Debug for ConnectionTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionTarget")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("password", &if self.password.is_empty() { "" } else { "<redacted>" })
            .finish()
    }
}

impl fmt::Display for ConnectionTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}
