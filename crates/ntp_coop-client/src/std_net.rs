// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! [`NetworkStack`] backed by the host OS.
//!
//! Sockets are created with `socket2` so that each setup step (create, bind,
//! non-blocking) fails separately and is reported under its own name. Name
//! resolution goes through the system resolver via [`ToSocketAddrs`], which
//! blocks; literal addresses resolve without a lookup.

use std::io;
use std::net::{IpAddr, Ipv4Addr, SocketAddr, SocketAddrV4, ToSocketAddrs, UdpSocket};

use log::debug;
use socket2::{Domain, Protocol, Socket, Type};

use crate::error::{SocketOp, SyncError};
use crate::platform::{DatagramSocket, NetworkStack};

/// Host network stack.
///
/// The link is reported as connected unless a probe is installed with
/// [`with_link_probe`](Self::with_link_probe).
#[derive(Clone, Copy, Debug)]
pub struct StdNetwork {
    link_probe: Option<fn() -> bool>,
}

impl StdNetwork {
    /// Creates a network stack that always reports the link as up.
    pub fn new() -> Self {
        StdNetwork { link_probe: None }
    }

    /// Uses `probe` to decide whether the link is up.
    pub fn with_link_probe(mut self, probe: fn() -> bool) -> Self {
        self.link_probe = Some(probe);
        self
    }
}

impl Default for StdNetwork {
    fn default() -> Self {
        Self::new()
    }
}

impl NetworkStack for StdNetwork {
    type Socket = StdSocket;

    fn is_connected(&self) -> bool {
        self.link_probe.is_none_or(|probe| probe())
    }

    fn resolve(&mut self, host: &str) -> Result<Ipv4Addr, SyncError> {
        let addrs = (host, 0)
            .to_socket_addrs()
            .map_err(|source| SyncError::Resolve {
                host: host.to_owned(),
                source,
            })?;
        first_ipv4(addrs).ok_or_else(|| SyncError::NoIpv4Address {
            host: host.to_owned(),
        })
    }

    fn open(&mut self, local_port: u16) -> Result<StdSocket, SyncError> {
        let socket = Socket::new(Domain::IPV4, Type::DGRAM, Some(Protocol::UDP)).map_err(
            |source| SyncError::Socket {
                op: SocketOp::Create,
                source,
            },
        )?;
        let local = SocketAddr::from(SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, local_port));
        socket
            .bind(&local.into())
            .map_err(|source| SyncError::Socket {
                op: SocketOp::Bind,
                source,
            })?;
        socket
            .set_nonblocking(true)
            .map_err(|source| SyncError::Socket {
                op: SocketOp::NonBlocking,
                source,
            })?;
        debug!("NTP: socket bound to port {}", local_port);
        Ok(StdSocket(socket.into()))
    }
}

fn first_ipv4(addrs: impl IntoIterator<Item = SocketAddr>) -> Option<Ipv4Addr> {
    addrs.into_iter().find_map(|addr| match addr.ip() {
        IpAddr::V4(v4) => Some(v4),
        IpAddr::V6(_) => None,
    })
}

/// A non-blocking UDP socket from [`StdNetwork`].
#[derive(Debug)]
pub struct StdSocket(UdpSocket);

impl StdSocket {
    /// The local address the socket is bound to.
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.0.local_addr()
    }
}

impl DatagramSocket for StdSocket {
    fn send_to(&mut self, buf: &[u8], target: SocketAddrV4) -> io::Result<usize> {
        self.0.send_to(buf, target)
    }

    fn recv(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.0.recv_from(buf).map(|(len, _)| len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv6Addr;

    #[test]
    fn test_first_ipv4_skips_v6() {
        let addrs = vec![
            SocketAddr::from((Ipv6Addr::LOCALHOST, 0)),
            SocketAddr::from((Ipv4Addr::new(192, 0, 2, 7), 0)),
        ];
        assert_eq!(first_ipv4(addrs), Some(Ipv4Addr::new(192, 0, 2, 7)));
        assert_eq!(first_ipv4(vec![SocketAddr::from((Ipv6Addr::LOCALHOST, 0))]), None);
    }

    #[test]
    fn test_resolve_literal() {
        let mut net = StdNetwork::new();
        assert_eq!(net.resolve("127.0.0.1").unwrap(), Ipv4Addr::LOCALHOST);
    }

    #[test]
    fn test_link_probe() {
        assert!(StdNetwork::new().is_connected());
        assert!(!StdNetwork::new().with_link_probe(|| false).is_connected());
    }

    #[test]
    fn test_open_is_non_blocking() {
        let mut net = StdNetwork::new();
        let mut socket = net.open(0).unwrap();
        assert!(socket.local_addr().unwrap().port() != 0);
        let mut buf = [0u8; 48];
        let err = socket.recv(&mut buf).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::WouldBlock);
    }

    #[test]
    fn test_bind_conflict_reports_bind() {
        let mut net = StdNetwork::new();
        let first = net.open(0).unwrap();
        let port = first.local_addr().unwrap().port();
        let err = net.open(port).unwrap_err();
        assert_eq!(err.op(), "bind");
    }
}
