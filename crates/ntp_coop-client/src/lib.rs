// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! Non-blocking NTP client for cooperative schedulers.
//!
//! [`SyncEngine`] keeps a device clock roughly in step with an NTP server
//! without ever blocking the thread that drives it. It runs no thread and no
//! event loop of its own: the caller's scheduler calls
//! [`SyncEngine::poll_send`] and [`SyncEngine::poll_receive`] (or
//! [`SyncEngine::poll`]) on every pass, and the engine decides from a single
//! deadline whether anything needs to happen.
//!
//! The OS is reached only through the traits in [`platform`]. With the
//! default `std-net` feature, [`StdNetwork`] provides UDP sockets and name
//! resolution, and [`StdClock`] provides the millisecond tick. The `clock`
//! feature adds [`SystemClock`](clock::SystemClock), which steps the system
//! clock on every successful sync.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use ntp_coop::{StdClock, StdNetwork, SyncConfig, SyncEngine};
//!
//! let config = SyncConfig::new("pool.ntp.org").with_time_offset(3600);
//! let mut engine = SyncEngine::new(StdNetwork::new(), StdClock::new(), config);
//! engine.begin(1337);
//!
//! loop {
//!     engine.poll();
//!     if let Some(boot) = engine.boot_timestamp() {
//!         println!("synchronized since {}", boot.iso());
//!     }
//!     std::thread::sleep(Duration::from_millis(100));
//! }
//! ```
//!
//! # Diagnostics
//!
//! The engine logs through the [`log`] facade under the `NTP:` prefix.
//! Failures are recovered internally and only ever surface as `false` from
//! the polling calls.

#![warn(missing_docs)]

/// Tick sources and wall-clock setters.
pub mod clock;
/// Engine configuration and defaults.
pub mod config;
mod engine;
/// Errors raised inside a send attempt.
pub mod error;
/// Collaborator traits for the network and the clock.
pub mod platform;
/// Socket-backed network stack.
#[cfg(feature = "std-net")]
pub mod std_net;
/// Wrapping millisecond deadline.
pub mod timer;

pub use ntp_coop_proto::{protocol, unix_time};

pub use clock::{ClockError, StdClock};
pub use config::SyncConfig;
pub use engine::{BootTimestamp, PollOutcome, SyncEngine};
pub use error::{SocketOp, SyncError};
pub use platform::{Clock, DatagramSocket, NetworkStack};
#[cfg(feature = "std-net")]
pub use std_net::{StdNetwork, StdSocket};
pub use timer::Deadline;
