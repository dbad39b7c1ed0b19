// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! Conversion between NTP seconds (prime epoch 1900-01-01) and Unix seconds
//! (1970-01-01).
//!
//! Both sides are 32-bit unsigned counters. The conversion wraps, so a
//! transmit timestamp from NTP era 1 (after 2036-02-07 06:28:16 UTC, when the
//! 32-bit NTP seconds field rolls over) still maps onto the right Unix value
//! until the Unix counter itself wraps in 2106.

/// The number of seconds from 1st January 1900 UTC to the start of the Unix epoch.
pub const EPOCH_DELTA: u32 = 2_208_988_800;

/// Convert raw NTP seconds into Unix seconds.
///
/// ## Example
///
/// ```
/// use ntp_coop_proto::unix_time;
///
/// assert_eq!(unix_time::ntp_to_unix_seconds(unix_time::EPOCH_DELTA), 0);
/// assert_eq!(unix_time::ntp_to_unix_seconds(3_913_056_000), 1_704_067_200);
/// ```
pub const fn ntp_to_unix_seconds(ntp_seconds: u32) -> u32 {
    ntp_seconds.wrapping_sub(EPOCH_DELTA)
}

/// Convert Unix seconds into raw NTP seconds (the inverse of [`ntp_to_unix_seconds`]).
pub const fn unix_to_ntp_seconds(unix_seconds: u32) -> u32 {
    unix_seconds.wrapping_add(EPOCH_DELTA)
}
