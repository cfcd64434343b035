//! Validated endpoint records.
//!
//! An [`Endpoint`] is a host/port pair stamped with the time it was created.
//! Construction is the only place input is checked: once a record exists it
//! is known to carry a non-empty host and an in-range port, so the registry
//! can accept it without further validation.

use std::fmt;
use std::num::{IntErrorKind, ParseIntError};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::TrackerError;
use crate::util::clock::now_ms;

/// Port used when a record is created from a bare host.
pub const DEFAULT_PORT: u16 = 0;

/// A tracked network location.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawEndpoint")]
pub struct Endpoint {
    host: String,
    port: u16,
    tracked_at_ms: u128,
}

/// Unchecked wire shape; every deserialized record goes through validation.
#[derive(Deserialize)]
struct RawEndpoint {
    host: String,
    port: u16,
    #[serde(default)]
    tracked_at_ms: Option<u128>,
}

impl TryFrom<RawEndpoint> for Endpoint {
    type Error = TrackerError;

    fn try_from(raw: RawEndpoint) -> Result<Self, Self::Error> {
        let mut endpoint = Self::new(&raw.host, raw.port)?;
        if let Some(ts) = raw.tracked_at_ms {
            endpoint.tracked_at_ms = ts;
        }
        Ok(endpoint)
    }
}

impl Endpoint {
    /// Create a record from a host and a numeric port, stamped with the
    /// current time.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::InvalidHost`] if the host is empty after
    /// trimming, or contains whitespace or a path separator.
    pub fn new(host: &str, port: u16) -> Result<Self, TrackerError> {
        Ok(Self {
            host: validate_host(host)?,
            port,
            tracked_at_ms: now_ms(),
        })
    }

    /// Create a record from form input, where the port arrives as text.
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::InvalidHost`] for a bad host and
    /// [`TrackerError::InvalidPort`] if the port is not an integer in
    /// `0..=65535`.
    pub fn parse(host: &str, port: &str) -> Result<Self, TrackerError> {
        let host = validate_host(host)?;
        let port = parse_port(port)?;
        Ok(Self {
            host,
            port,
            tracked_at_ms: now_ms(),
        })
    }

    /// Create a record from a bare host, using [`DEFAULT_PORT`].
    ///
    /// # Errors
    ///
    /// Returns [`TrackerError::InvalidHost`] for a bad host.
    pub fn from_host(host: &str) -> Result<Self, TrackerError> {
        Self::new(host, DEFAULT_PORT)
    }

    /// Host name or address.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Port number.
    pub const fn port(&self) -> u16 {
        self.port
    }

    /// Creation time in milliseconds since the Unix epoch.
    pub const fn tracked_at_ms(&self) -> u128 {
        self.tracked_at_ms
    }

    /// `host:port` form.
    pub fn address(&self) -> String {
        self.to_string()
    }

    /// True when both records point at the same host and port, regardless
    /// of when they were tracked.
    pub fn same_address(&self, other: &Self) -> bool {
        self.port == other.port && self.host.eq_ignore_ascii_case(&other.host)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

impl FromStr for Endpoint {
    type Err = TrackerError;

    /// Parse `host:port`. The split happens at the last colon.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (host, port) = s
            .trim()
            .rsplit_once(':')
            .ok_or_else(|| TrackerError::InvalidPort(format!("`{s}` has no port")))?;
        Self::parse(host, port)
    }
}

fn validate_host(host: &str) -> Result<String, TrackerError> {
    let host = host.trim();
    if host.is_empty() {
        return Err(TrackerError::InvalidHost("host must not be empty".into()));
    }
    if host.chars().any(|c| c.is_whitespace() || c == '/') {
        return Err(TrackerError::InvalidHost(format!(
            "`{host}` is not a bare host name"
        )));
    }
    // Colons and brackets only appear in a bracketed IPv6 literal.
    let bracketed = host
        .strip_prefix('[')
        .and_then(|inner| inner.strip_suffix(']'))
        .is_some_and(|inner| !inner.is_empty() && !inner.contains(['[', ']']));
    if host.contains([':', '[', ']']) && !bracketed {
        return Err(TrackerError::InvalidHost(format!(
            "`{host}` contains a port; give the port separately or bracket an IPv6 address"
        )));
    }
    Ok(host.to_owned())
}

fn parse_port(port: &str) -> Result<u16, TrackerError> {
    let port = port.trim();
    let value: i64 = port.parse().map_err(|e: ParseIntError| match e.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
            TrackerError::InvalidPort(format!("{port} is outside 0..=65535"))
        }
        _ => TrackerError::InvalidPort(format!("`{port}` is not a number")),
    })?;
    u16::try_from(value)
        .map_err(|_| TrackerError::InvalidPort(format!("{value} is outside 0..=65535")))
}
