// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! Configuration for the sync engine.

use std::time::Duration;

use crate::protocol;

/// Default NTP server.
pub const DEFAULT_SERVER: &str = "pool.ntp.org";

/// Default local UDP port the request socket is bound to.
pub const DEFAULT_LOCAL_PORT: u16 = 1337;

/// Default interval between successful synchronizations.
pub const DEFAULT_UPDATE_INTERVAL: Duration = Duration::from_secs(60);

/// Default interval before retrying after a sent request or a transient failure.
pub const DEFAULT_RETRY_INTERVAL: Duration = Duration::from_secs(10);

/// Default interval used once name resolution keeps failing.
pub const DEFAULT_ERROR_INTERVAL: Duration = Duration::from_secs(3600);

/// Consecutive resolution failures after which the engine switches to the
/// error interval.
pub const MAX_DNS_ERRORS: u32 = 10;

/// Configuration for a [`SyncEngine`](crate::SyncEngine).
///
/// ```
/// use std::time::Duration;
/// use ntp_coop::SyncConfig;
///
/// let config = SyncConfig::new("fr.pool.ntp.org")
///     .with_time_offset(3600)
///     .with_update_interval(Duration::from_secs(3600))
///     .with_retry_interval(Duration::from_secs(5))
///     .with_error_interval(Duration::from_secs(60));
/// assert_eq!(config.local_port, 1337);
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SyncConfig {
    /// Server host name (or dotted-quad address).
    pub server: String,
    /// Server UDP port.
    pub server_port: u16,
    /// Local UDP port the socket is bound to.
    pub local_port: u16,
    /// Offset in seconds added to the synchronized time (time zone).
    pub time_offset: i32,
    /// Re-arm interval after a successful exchange.
    pub update_interval: Duration,
    /// Re-arm interval after a request was sent, or after a transient
    /// resolution failure.
    pub retry_interval: Duration,
    /// Re-arm interval once `max_dns_errors` consecutive resolution failures
    /// have occurred.
    pub error_interval: Duration,
    /// Number of consecutive resolution failures tolerated before switching to
    /// `error_interval`.
    pub max_dns_errors: u32,
}

impl SyncConfig {
    /// Creates a configuration for the given server with default intervals.
    pub fn new(server: impl Into<String>) -> Self {
        SyncConfig {
            server: server.into(),
            server_port: protocol::PORT,
            local_port: DEFAULT_LOCAL_PORT,
            time_offset: 0,
            update_interval: DEFAULT_UPDATE_INTERVAL,
            retry_interval: DEFAULT_RETRY_INTERVAL,
            error_interval: DEFAULT_ERROR_INTERVAL,
            max_dns_errors: MAX_DNS_ERRORS,
        }
    }

    /// Sets the server UDP port.
    pub fn with_server_port(mut self, port: u16) -> Self {
        self.server_port = port;
        self
    }

    /// Sets the local UDP port.
    pub fn with_local_port(mut self, port: u16) -> Self {
        self.local_port = port;
        self
    }

    /// Sets the time zone offset in seconds.
    pub fn with_time_offset(mut self, offset: i32) -> Self {
        self.time_offset = offset;
        self
    }

    /// Sets the interval between successful synchronizations.
    pub fn with_update_interval(mut self, interval: Duration) -> Self {
        self.update_interval = interval;
        self
    }

    /// Sets the retry interval.
    pub fn with_retry_interval(mut self, interval: Duration) -> Self {
        self.retry_interval = interval;
        self
    }

    /// Sets the interval used after repeated resolution failures.
    pub fn with_error_interval(mut self, interval: Duration) -> Self {
        self.error_interval = interval;
        self
    }

    /// Sets the number of consecutive resolution failures tolerated before
    /// switching to the error interval.
    pub fn with_max_dns_errors(mut self, max: u32) -> Self {
        self.max_dns_errors = max;
        self
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self::new(DEFAULT_SERVER)
    }
}
