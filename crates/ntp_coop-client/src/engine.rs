// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! The poll-driven sync engine.
//!
//! [`SyncEngine`] keeps one outstanding request at a time. The caller's
//! scheduler calls [`poll_send`](SyncEngine::poll_send) and
//! [`poll_receive`](SyncEngine::poll_receive) (or [`poll`](SyncEngine::poll))
//! as often as it likes; neither call blocks. A single [`Deadline`] decides
//! when the next request goes out:
//!
//! | Event                         | Next deadline      |
//! |-------------------------------|--------------------|
//! | request sent                  | `retry_interval`   |
//! | resolution failed (< limit)   | `retry_interval`   |
//! | resolution failed (at limit)  | `error_interval`   |
//! | reply received                | `update_interval`  |
//! | link down, socket setup error | unchanged          |

use std::net::{Ipv4Addr, SocketAddrV4};
use std::time::Duration;

use chrono::DateTime;
use log::{debug, info, warn};

use crate::config::SyncConfig;
use crate::error::SyncError;
use crate::platform::{Clock, DatagramSocket, NetworkStack};
use crate::protocol::{self, ClientRequest, PACKET_SIZE};
use crate::timer::Deadline;
use crate::unix_time;

/// Time of the first successful synchronization.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BootTimestamp {
    epoch: u32,
    iso: String,
}

impl BootTimestamp {
    /// Unix seconds, offset applied.
    pub fn epoch(&self) -> u32 {
        self.epoch
    }

    /// The same instant formatted as `YYYY-MM-DDTHH:MM:SS`.
    pub fn iso(&self) -> &str {
        &self.iso
    }
}

/// What a call to [`SyncEngine::poll`] did.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct PollOutcome {
    /// A request was sent.
    pub sent: bool,
    /// A reply was received and the clock was set.
    pub received: bool,
}

/// Non-blocking NTP client state machine.
///
/// # Examples
///
/// ```no_run
/// use ntp_coop::{StdClock, StdNetwork, SyncConfig, SyncEngine};
///
/// let mut engine = SyncEngine::new(StdNetwork::new(), StdClock::new(), SyncConfig::default());
/// engine.begin(1337);
/// loop {
///     engine.poll();
///     if engine.is_time_set() {
///         println!("unix time: {}", engine.get_epoch_time());
///     }
///     // ... other cooperative tasks ...
/// #   break;
/// }
/// ```
pub struct SyncEngine<N: NetworkStack, C: Clock> {
    network: N,
    clock: C,
    config: SyncConfig,
    cached_address: Option<Ipv4Addr>,
    socket: Option<N::Socket>,
    timer: Deadline,
    dns_errors: u32,
    last_update_ms: u32,
    epoch_at_last_update: u32,
    boot: Option<BootTimestamp>,
}

impl<N: NetworkStack, C: Clock> SyncEngine<N, C> {
    /// Creates an engine. Nothing is resolved or opened until the first send.
    pub fn new(network: N, clock: C, config: SyncConfig) -> Self {
        SyncEngine {
            network,
            clock,
            config,
            cached_address: None,
            socket: None,
            timer: Deadline::expired(),
            dns_errors: 0,
            last_update_ms: 0,
            epoch_at_last_update: 0,
            boot: None,
        }
    }

    /// Sets the local UDP port used by the next socket the engine opens.
    pub fn begin(&mut self, local_port: u16) {
        self.config.local_port = local_port;
    }

    /// Closes the socket and forgets the resolved server address.
    ///
    /// Server name, offset and intervals are kept, as is the time baseline.
    pub fn end(&mut self) {
        self.close_socket();
        self.cached_address = None;
    }

    /// Sends a request if the timer has expired.
    pub fn poll_send(&mut self) -> bool {
        if !self.timer.is_expired(self.clock.now_ms()) {
            return false;
        }
        self.force_send()
    }

    /// Sends a request now, ignoring the timer.
    ///
    /// Returns `false` when the link is down or any step of the send fails.
    /// Failures are logged; none of them is returned to the caller.
    pub fn force_send(&mut self) -> bool {
        if !self.network.is_connected() {
            debug!("NTP: link down");
            return false;
        }
        match self.send_request() {
            Ok(()) => {
                info!("NTP: sent");
                self.timer.arm(self.clock.now_ms(), self.config.retry_interval);
                true
            }
            Err(err) => {
                match err.os_code() {
                    Some(code) => warn!("NTP: {} {} {}", err.op(), code, err),
                    None => warn!("NTP: {} {}", err.op(), err),
                }
                self.close_socket();
                false
            }
        }
    }

    /// Reads a pending reply, if any, and sets the clock from it.
    ///
    /// Returns `false` when there is no socket, nothing is queued, or the
    /// queued datagram is shorter than a full NTP packet.
    pub fn poll_receive(&mut self) -> bool {
        let Some(socket) = self.socket.as_mut() else {
            return false;
        };
        let mut buf = [0u8; PACKET_SIZE];
        match socket.recv(&mut buf) {
            Ok(PACKET_SIZE) => {}
            _ => return false,
        }

        self.last_update_ms = self.clock.now_ms();
        self.epoch_at_last_update =
            unix_time::ntp_to_unix_seconds(protocol::decode_transmit_seconds(&buf));
        self.close_socket();

        let now = self.get_epoch_time();
        if let Err(err) = self.clock.set_time(now) {
            warn!("NTP: set_time {}", err);
        }
        let iso = format_iso(now);
        info!("NTP: set {}", iso);
        if self.boot.is_none() {
            self.boot = Some(BootTimestamp { epoch: now, iso });
        }

        self.timer.arm(self.last_update_ms, self.config.update_interval);
        true
    }

    /// [`poll_send`](Self::poll_send) followed by
    /// [`poll_receive`](Self::poll_receive).
    pub fn poll(&mut self) -> PollOutcome {
        let sent = self.poll_send();
        let received = self.poll_receive();
        PollOutcome { sent, received }
    }

    /// Current Unix time: offset, plus the last server time, plus whole seconds
    /// elapsed since it was received.
    ///
    /// Meaningless until [`is_time_set`](Self::is_time_set) is true.
    pub fn get_epoch_time(&self) -> u32 {
        let elapsed = self.clock.now_ms().wrapping_sub(self.last_update_ms) / 1000;
        self.epoch_at_last_update
            .wrapping_add_signed(self.config.time_offset)
            .wrapping_add(elapsed)
    }

    /// Whether a reply has ever been received.
    pub fn is_time_set(&self) -> bool {
        self.epoch_at_last_update != 0
    }

    /// Changes the server and forgets the resolved address.
    pub fn set_server_name(&mut self, server: impl Into<String>) {
        self.config.server = server.into();
        self.cached_address = None;
    }

    /// Changes the time zone offset in seconds.
    pub fn set_time_offset(&mut self, offset: i32) {
        self.config.time_offset = offset;
    }

    /// Replaces all three intervals. The currently armed deadline is kept.
    pub fn set_update_intervals(&mut self, update: Duration, retry: Duration, error: Duration) {
        self.config.update_interval = update;
        self.config.retry_interval = retry;
        self.config.error_interval = error;
    }

    /// The first successful synchronization, if there has been one.
    pub fn boot_timestamp(&self) -> Option<&BootTimestamp> {
        self.boot.as_ref()
    }

    /// Server time (Unix seconds, no offset) from the last reply, or 0.
    pub fn last_sync_epoch(&self) -> u32 {
        self.epoch_at_last_update
    }

    /// Consecutive resolution failures since the last successful resolution.
    pub fn dns_error_count(&self) -> u32 {
        self.dns_errors
    }

    /// Whether a socket is currently open.
    pub fn has_socket(&self) -> bool {
        self.socket.is_some()
    }

    /// The resolved server address, if cached.
    pub fn cached_address(&self) -> Option<Ipv4Addr> {
        self.cached_address
    }

    /// The send deadline.
    pub fn timer(&self) -> &Deadline {
        &self.timer
    }

    /// Active configuration.
    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// The network stack.
    pub fn network(&self) -> &N {
        &self.network
    }

    /// Mutable access to the network stack.
    pub fn network_mut(&mut self) -> &mut N {
        &mut self.network
    }

    /// The clock.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Mutable access to the clock.
    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    fn send_request(&mut self) -> Result<(), SyncError> {
        let server = self.server_address()?;
        let target = SocketAddrV4::new(server, self.config.server_port);

        let socket = match self.socket.take() {
            Some(socket) => socket,
            None => self.network.open(self.config.local_port)?,
        };
        let socket = self.socket.insert(socket);

        drain(socket);

        let request = build_request_packet();
        let sent = socket.send_to(&request, target).map_err(SyncError::Send)?;
        if sent != PACKET_SIZE {
            return Err(SyncError::ShortSend {
                sent,
                expected: PACKET_SIZE,
            });
        }
        Ok(())
    }

    fn server_address(&mut self) -> Result<Ipv4Addr, SyncError> {
        if let Some(addr) = self.cached_address {
            return Ok(addr);
        }
        match self.network.resolve(&self.config.server) {
            Ok(addr) => {
                self.cached_address = Some(addr);
                self.dns_errors = 0;
                info!("NTP: server {}", addr);
                Ok(addr)
            }
            Err(err) => {
                let now = self.clock.now_ms();
                if self.dns_errors < self.config.max_dns_errors {
                    self.dns_errors += 1;
                    self.timer.arm(now, self.config.retry_interval);
                } else {
                    self.timer.arm(now, self.config.error_interval);
                }
                Err(err)
            }
        }
    }

    fn close_socket(&mut self) {
        self.socket = None;
    }
}

/// Discard every datagram already queued on `socket`.
fn drain<S: DatagramSocket>(socket: &mut S) {
    let mut scratch = [0u8; PACKET_SIZE];
    while socket.recv(&mut scratch).is_ok() {}
}

fn build_request_packet() -> [u8; PACKET_SIZE] {
    protocol::encode_request(&ClientRequest::default())
}

/// Format Unix seconds as `YYYY-MM-DDTHH:MM:SS` (UTC).
pub(crate) fn format_iso(unix_seconds: u32) -> String {
    DateTime::from_timestamp(i64::from(unix_seconds), 0)
        .map(|dt| dt.format("%Y-%m-%dT%H:%M:%S").to_string())
        .unwrap_or_default()
}
