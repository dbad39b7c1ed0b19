// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! Tick sources and wall-clock setters.
//!
//! - [`StdClock`] derives the millisecond tick from [`std::time::Instant`] and
//!   only records the last time it was told to set. It suits hosts where the
//!   engine is a time source for the application, not for the OS.
//! - [`SystemClock`] (feature `clock`) steps the system realtime clock on every
//!   successful sync. It requires root on Unix.
//!
//! # Platform Support
//!
//! - **Linux**: `clock_settime(CLOCK_REALTIME, ...)`.
//! - **macOS**: `settimeofday(...)`.
//! - **Other platforms**: [`ClockError::Unsupported`].

#![allow(unsafe_code)]

use std::fmt;
use std::time::Instant;

use crate::platform::Clock;

/// Error type for wall-clock updates.
#[derive(Debug)]
pub enum ClockError {
    /// The operation requires elevated privileges (root/admin).
    PermissionDenied,
    /// Platform-specific error with an OS error code.
    OsError(i32),
    /// Setting the clock is not supported on this platform.
    Unsupported,
}

impl fmt::Display for ClockError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClockError::PermissionDenied => write!(f, "permission denied (requires root/admin)"),
            ClockError::OsError(code) => write!(f, "OS error: {}", code),
            ClockError::Unsupported => {
                write!(f, "setting the clock is not supported on this platform")
            }
        }
    }
}

impl std::error::Error for ClockError {}

/// Millisecond tick since construction, truncated to 32 bits.
fn ticks_since(origin: Instant) -> u32 {
    origin.elapsed().as_millis() as u32
}

/// A tick source backed by [`Instant`] that leaves the OS clock alone.
#[derive(Clone, Copy, Debug)]
pub struct StdClock {
    origin: Instant,
    last_set: Option<u32>,
}

impl StdClock {
    /// Creates a clock whose tick starts at zero now.
    pub fn new() -> Self {
        StdClock {
            origin: Instant::now(),
            last_set: None,
        }
    }

    /// The last Unix time handed to [`Clock::set_time`], if any.
    pub fn last_set(&self) -> Option<u32> {
        self.last_set
    }
}

impl Default for StdClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for StdClock {
    fn now_ms(&self) -> u32 {
        ticks_since(self.origin)
    }

    fn set_time(&mut self, unix_seconds: u32) -> Result<(), ClockError> {
        self.last_set = Some(unix_seconds);
        Ok(())
    }
}

/// A tick source backed by [`Instant`] that steps the system clock.
#[cfg(feature = "clock")]
#[derive(Clone, Copy, Debug)]
pub struct SystemClock {
    origin: Instant,
}

#[cfg(feature = "clock")]
impl SystemClock {
    /// Creates a clock whose tick starts at zero now.
    pub fn new() -> Self {
        SystemClock {
            origin: Instant::now(),
        }
    }
}

#[cfg(feature = "clock")]
impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "clock")]
impl Clock for SystemClock {
    fn now_ms(&self) -> u32 {
        ticks_since(self.origin)
    }

    fn set_time(&mut self, unix_seconds: u32) -> Result<(), ClockError> {
        platform::set(unix_seconds)
    }
}

/// Convert an OS errno to a [`ClockError`].
#[cfg(all(feature = "clock", unix))]
fn os_error_from_errno() -> ClockError {
    let errno = std::io::Error::last_os_error().raw_os_error().unwrap_or(-1);
    if errno == libc::EPERM {
        ClockError::PermissionDenied
    } else {
        ClockError::OsError(errno)
    }
}

#[cfg(all(feature = "clock", target_os = "linux"))]
mod platform {
    use super::*;

    pub(super) fn set(unix_seconds: u32) -> Result<(), ClockError> {
        let mut tp: libc::timespec = unsafe { std::mem::zeroed() };
        tp.tv_sec = unix_seconds as libc::time_t;
        let ret = unsafe { libc::clock_settime(libc::CLOCK_REALTIME, &tp) };
        if ret < 0 {
            return Err(os_error_from_errno());
        }
        Ok(())
    }
}

#[cfg(all(feature = "clock", target_os = "macos"))]
mod platform {
    use super::*;

    pub(super) fn set(unix_seconds: u32) -> Result<(), ClockError> {
        let mut tv: libc::timeval = unsafe { std::mem::zeroed() };
        tv.tv_sec = unix_seconds as libc::time_t;
        let ret = unsafe { libc::settimeofday(&tv, std::ptr::null_mut()) };
        if ret < 0 {
            return Err(os_error_from_errno());
        }
        Ok(())
    }
}

#[cfg(all(feature = "clock", not(any(target_os = "linux", target_os = "macos"))))]
mod platform {
    use super::*;

    pub(super) fn set(_unix_seconds: u32) -> Result<(), ClockError> {
        Err(ClockError::Unsupported)
    }
}
