// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! Single-deadline timer driven by a wrapping millisecond tick.

use std::time::Duration;

/// A deadline measured against a wrapping 32-bit millisecond tick.
///
/// The deadline stores when it was armed and for how long; expiry compares
/// the wrapped elapsed time, so it stays correct across tick rollover as long
/// as the deadline is checked at least once every ~49 days.
///
/// A fresh `Deadline` is already expired.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Deadline {
    armed_at: u32,
    interval_ms: u32,
}

impl Deadline {
    /// A deadline that has already passed.
    pub const fn expired() -> Self {
        Deadline {
            armed_at: 0,
            interval_ms: 0,
        }
    }

    /// Re-arm the deadline to expire `interval` after tick `now`.
    ///
    /// Intervals longer than `u32::MAX` milliseconds are clamped.
    pub fn arm(&mut self, now: u32, interval: Duration) {
        self.armed_at = now;
        self.interval_ms = duration_to_ms(interval);
    }

    /// Whether the deadline has passed at tick `now`.
    pub fn is_expired(&self, now: u32) -> bool {
        now.wrapping_sub(self.armed_at) >= self.interval_ms
    }

    /// Time left until expiry at tick `now` (zero once expired).
    pub fn remaining(&self, now: u32) -> Duration {
        let elapsed = now.wrapping_sub(self.armed_at);
        Duration::from_millis(self.interval_ms.saturating_sub(elapsed) as u64)
    }

    /// The interval the deadline was last armed with.
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms as u64)
    }

    /// The tick at which the deadline was last armed.
    pub fn armed_at(&self) -> u32 {
        self.armed_at
    }
}

fn duration_to_ms(interval: Duration) -> u32 {
    u32::try_from(interval.as_millis()).unwrap_or(u32::MAX)
}
