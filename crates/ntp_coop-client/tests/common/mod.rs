// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! Shared test helpers: a scripted in-memory network and a hand-driven clock.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::io;
use std::net::{Ipv4Addr, SocketAddrV4};
use std::rc::Rc;

use ntp_coop::protocol::{PACKET_SIZE, TRANSMIT_TIMESTAMP_OFFSET};
use ntp_coop::{
    Clock, ClockError, DatagramSocket, NetworkStack, SocketOp, SyncConfig, SyncEngine, SyncError,
};

/// Address the mock resolver hands out unless told otherwise.
pub(crate) const SERVER_ADDR: Ipv4Addr = Ipv4Addr::new(192, 0, 2, 123);

/// NTP seconds for 2024-01-01T00:00:00Z.
pub(crate) const NTP_2024: u32 = 3_913_056_000;

/// Unix seconds for 2024-01-01T00:00:00Z.
pub(crate) const UNIX_2024: u32 = 1_704_067_200;

/// Everything the mock network does, observable from the test.
#[derive(Debug)]
pub(crate) struct NetState {
    pub link_up: bool,
    /// When set, every resolution fails.
    pub resolve_fails: bool,
    pub resolve_calls: usize,
    /// When set, opening a socket fails at this step.
    pub open_failure: Option<SocketOp>,
    pub open_calls: usize,
    pub open_sockets: usize,
    pub max_open_sockets: usize,
    pub last_local_port: Option<u16>,
    /// Datagrams waiting to be read, shared by whichever socket is open.
    pub inbox: VecDeque<Vec<u8>>,
    /// Requests as sent, with their destination.
    pub sent: Vec<(Vec<u8>, SocketAddrV4)>,
    /// When set, `send_to` reports this many bytes instead of the full length.
    pub short_send: Option<usize>,
    /// When set, every request is answered with these NTP transmit seconds.
    pub auto_reply: Option<u32>,
    pub recv_calls: usize,
}

impl Default for NetState {
    fn default() -> Self {
        NetState {
            link_up: true,
            resolve_fails: false,
            resolve_calls: 0,
            open_failure: None,
            open_calls: 0,
            open_sockets: 0,
            max_open_sockets: 0,
            last_local_port: None,
            inbox: VecDeque::new(),
            sent: Vec::new(),
            short_send: None,
            auto_reply: None,
            recv_calls: 0,
        }
    }
}

pub(crate) type SharedNet = Rc<RefCell<NetState>>;

pub(crate) struct MockNetwork {
    state: SharedNet,
}

impl MockNetwork {
    pub(crate) fn new() -> (Self, SharedNet) {
        let state = Rc::new(RefCell::new(NetState::default()));
        (
            MockNetwork {
                state: Rc::clone(&state),
            },
            state,
        )
    }
}

impl NetworkStack for MockNetwork {
    type Socket = MockSocket;

    fn is_connected(&self) -> bool {
        self.state.borrow().link_up
    }

    fn resolve(&mut self, host: &str) -> Result<Ipv4Addr, SyncError> {
        let mut state = self.state.borrow_mut();
        state.resolve_calls += 1;
        if state.resolve_fails {
            return Err(SyncError::Resolve {
                host: host.to_owned(),
                source: io::Error::new(io::ErrorKind::NotFound, "host not found"),
            });
        }
        Ok(SERVER_ADDR)
    }

    fn open(&mut self, local_port: u16) -> Result<MockSocket, SyncError> {
        let mut state = self.state.borrow_mut();
        state.open_calls += 1;
        if let Some(op) = state.open_failure {
            return Err(SyncError::Socket {
                op,
                source: io::Error::from_raw_os_error(98),
            });
        }
        state.open_sockets += 1;
        state.max_open_sockets = state.max_open_sockets.max(state.open_sockets);
        state.last_local_port = Some(local_port);
        Ok(MockSocket {
            state: Rc::clone(&self.state),
        })
    }
}

pub(crate) struct MockSocket {
    state: SharedNet,
}

impl DatagramSocket for MockSocket {
    fn send_to(&mut self, buf: &[u8], target: SocketAddrV4) -> io::Result<usize> {
        let mut state = self.state.borrow_mut();
        state.sent.push((buf.to_vec(), target));
        if let Some(seconds) = state.auto_reply {
            state.inbox.push_back(reply_packet(seconds));
        }
        Ok(state.short_send.unwrap_or(buf.len()))
    }

    fn recv(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let mut state = self.state.borrow_mut();
        state.recv_calls += 1;
        let datagram = state
            .inbox
            .pop_front()
            .ok_or_else(|| io::Error::from(io::ErrorKind::WouldBlock))?;
        let len = datagram.len().min(buf.len());
        buf[..len].copy_from_slice(&datagram[..len]);
        Ok(len)
    }
}

impl Drop for MockSocket {
    fn drop(&mut self) {
        self.state.borrow_mut().open_sockets -= 1;
    }
}

/// A tick the test advances by hand. Records every clock update.
#[derive(Debug, Default)]
pub(crate) struct MockClock {
    pub now: u32,
    pub set_calls: Vec<u32>,
}

impl MockClock {
    pub(crate) fn advance(&mut self, ms: u32) {
        self.now = self.now.wrapping_add(ms);
    }
}

impl Clock for MockClock {
    fn now_ms(&self) -> u32 {
        self.now
    }

    fn set_time(&mut self, unix_seconds: u32) -> Result<(), ClockError> {
        self.set_calls.push(unix_seconds);
        Ok(())
    }
}

pub(crate) type MockEngine = SyncEngine<MockNetwork, MockClock>;

/// Build an engine over a fresh mock network, returning the shared state.
pub(crate) fn mock_engine(config: SyncConfig) -> (MockEngine, SharedNet) {
    let (network, state) = MockNetwork::new();
    (SyncEngine::new(network, MockClock::default(), config), state)
}

/// A 48-byte server reply carrying `ntp_seconds` in the transmit timestamp.
pub(crate) fn reply_packet(ntp_seconds: u32) -> Vec<u8> {
    let mut buf = vec![0u8; PACKET_SIZE];
    let at = TRANSMIT_TIMESTAMP_OFFSET;
    buf[at..at + 4].copy_from_slice(&ntp_seconds.to_be_bytes());
    buf
}

/// Send a request and answer it with `ntp_seconds`.
pub(crate) fn exchange(engine: &mut MockEngine, state: &SharedNet, ntp_seconds: u32) -> bool {
    if !engine.force_send() {
        return false;
    }
    state.borrow_mut().inbox.push_back(reply_packet(ntp_seconds));
    engine.poll_receive()
}
