// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! Error types for a single send attempt.
//!
//! None of these reach the caller of the polling API: the engine logs them,
//! tears the socket down and reports `false`. Custom
//! [`NetworkStack`](crate::platform::NetworkStack) implementations return them
//! from `resolve` and `open`.

use std::fmt;
use std::io;

/// The socket setup step that failed.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum SocketOp {
    /// Creating the UDP socket.
    Create,
    /// Binding it to the local port.
    Bind,
    /// Switching it to non-blocking mode.
    NonBlocking,
}

impl SocketOp {
    /// The name of the failing call, as written to the log.
    pub fn name(&self) -> &'static str {
        match self {
            SocketOp::Create => "socket",
            SocketOp::Bind => "bind",
            SocketOp::NonBlocking => "set_nonblocking",
        }
    }
}

/// Errors that abort a send attempt.
#[derive(Debug)]
pub enum SyncError {
    /// The server name could not be resolved.
    Resolve {
        /// The name that failed to resolve.
        host: String,
        /// The resolver's error.
        source: io::Error,
    },
    /// The server name resolved, but not to any IPv4 address.
    NoIpv4Address {
        /// The name that was resolved.
        host: String,
    },
    /// The socket could not be created or configured.
    Socket {
        /// Which setup step failed.
        op: SocketOp,
        /// The underlying OS error.
        source: io::Error,
    },
    /// The request datagram was only partially sent.
    ShortSend {
        /// Bytes the transport accepted.
        sent: usize,
        /// Bytes in a full request.
        expected: usize,
    },
    /// Sending the request failed.
    Send(io::Error),
}

impl SyncError {
    /// Name of the operation that failed (`gethostbyname`, `socket`, `bind`,
    /// `set_nonblocking` or `sendto`).
    pub fn op(&self) -> &'static str {
        match self {
            SyncError::Resolve { .. } | SyncError::NoIpv4Address { .. } => "gethostbyname",
            SyncError::Socket { op, .. } => op.name(),
            SyncError::ShortSend { .. } | SyncError::Send(_) => "sendto",
        }
    }

    /// The platform error code, when the failure came from the OS.
    pub fn os_code(&self) -> Option<i32> {
        match self {
            SyncError::Resolve { source, .. }
            | SyncError::Socket { source, .. }
            | SyncError::Send(source) => source.raw_os_error(),
            SyncError::NoIpv4Address { .. } | SyncError::ShortSend { .. } => None,
        }
    }

    /// Whether this failure counts towards the consecutive DNS error limit.
    pub fn is_resolve(&self) -> bool {
        matches!(
            self,
            SyncError::Resolve { .. } | SyncError::NoIpv4Address { .. }
        )
    }
}

impl fmt::Display for SyncError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncError::Resolve { host, source } => write!(f, "cannot resolve {host}: {source}"),
            SyncError::NoIpv4Address { host } => write!(f, "{host} has no IPv4 address"),
            SyncError::Socket { source, .. } => write!(f, "{source}"),
            SyncError::ShortSend { sent, expected } => {
                write!(f, "short send: {sent} of {expected} bytes")
            }
            SyncError::Send(source) => write!(f, "{source}"),
        }
    }
}

impl std::error::Error for SyncError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SyncError::Resolve { source, .. }
            | SyncError::Socket { source, .. }
            | SyncError::Send(source) => Some(source),
            SyncError::NoIpv4Address { .. } | SyncError::ShortSend { .. } => None,
        }
    }
}

impl From<SyncError> for io::Error {
    fn from(err: SyncError) -> io::Error {
        let kind = match &err {
            SyncError::Resolve { source, .. }
            | SyncError::Socket { source, .. }
            | SyncError::Send(source) => source.kind(),
            SyncError::NoIpv4Address { .. } => io::ErrorKind::AddrNotAvailable,
            SyncError::ShortSend { .. } => io::ErrorKind::WriteZero,
        };
        io::Error::new(kind, err)
    }
}
