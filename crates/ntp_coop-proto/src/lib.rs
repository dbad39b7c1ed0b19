// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! NTP wire layout for the cooperative `ntp_coop` client.
//!
//! This crate knows how to lay out the fixed 48-byte client request and how to
//! pull the transmit timestamp back out of a server reply. It performs no I/O
//! and is usable without `std`, so the same codec can run on the target device
//! and in host-side tests.

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

/// Error types for buffer-based NTP packet parsing and serialization.
pub mod error;

/// NTP packet types, constants and the request/reply codec.
pub mod protocol;

/// Conversion between the NTP (1900) and Unix (1970) epochs.
pub mod unix_time;
