// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! Collaborator interfaces the engine is driven through.
//!
//! The engine never touches the OS directly. Link status, name resolution and
//! socket creation come from a [`NetworkStack`]; the millisecond tick and the
//! wall clock come from a [`Clock`]. Diagnostics go through the `log` facade.
//!
//! Implementations must not block: [`DatagramSocket::recv`] returns
//! [`io::ErrorKind::WouldBlock`] when nothing is queued. Name resolution is the
//! one call that may take time on a real stack; the engine only calls it when
//! no address is cached.

use std::io;
use std::net::{Ipv4Addr, SocketAddrV4};

use crate::clock::ClockError;
use crate::error::SyncError;

/// A non-blocking UDP socket.
///
/// Dropping the socket closes it.
pub trait DatagramSocket {
    /// Send one datagram to `target`, returning the number of bytes accepted.
    fn send_to(&mut self, buf: &[u8], target: SocketAddrV4) -> io::Result<usize>;

    /// Receive one queued datagram into `buf`, returning its length.
    ///
    /// Datagrams longer than `buf` are truncated. Returns
    /// [`io::ErrorKind::WouldBlock`] when nothing is queued.
    fn recv(&mut self, buf: &mut [u8]) -> io::Result<usize>;
}

/// Link status, name resolution and socket factory.
pub trait NetworkStack {
    /// The socket type produced by [`open`](Self::open).
    type Socket: DatagramSocket;

    /// Whether the network link is up.
    fn is_connected(&self) -> bool;

    /// Resolve `host` to an IPv4 address.
    fn resolve(&mut self, host: &str) -> Result<Ipv4Addr, SyncError>;

    /// Create a non-blocking UDP socket bound to `local_port` on all interfaces.
    ///
    /// Failures report the setup step that failed via [`SyncError::Socket`].
    fn open(&mut self, local_port: u16) -> Result<Self::Socket, SyncError>;
}

/// Monotonic tick source and wall-clock setter.
pub trait Clock {
    /// Milliseconds since an arbitrary origin. Wraps at `u32::MAX`.
    fn now_ms(&self) -> u32;

    /// Set the wall clock to `unix_seconds` (offset already applied).
    fn set_time(&mut self, unix_seconds: u32) -> Result<(), ClockError>;
}
