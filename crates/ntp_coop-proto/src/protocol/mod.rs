// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! Types and constants for the subset of RFC 5905 used by a unicast client.
//!
//! Two codecs are provided. [`FromBytes`]/[`ToBytes`] work on plain byte slices
//! and need neither `std` nor `byteorder`. With the `std` feature, [`WriteBytes`]
//! extends every `byteorder::WriteBytesExt` writer with the ability to write the
//! NTP types in network byte order.

/// NTP port number.
pub const PORT: u16 = 123;

/// Size of an NTP packet without extension fields or MAC.
pub const PACKET_SIZE: usize = 48;

/// Byte offset of the transmit timestamp within a packet.
pub const TRANSMIT_TIMESTAMP_OFFSET: usize = 40;

/// Reference identifier padding carried in client requests (bytes 12..16).
pub const REQUEST_REFERENCE_ID: [u8; 4] = [49, 0x4E, 49, 52];

/// Poll exponent advertised in client requests (2^6 = 64 s).
pub const REQUEST_POLL: i8 = 6;

/// Precision advertised in client requests (`0xEC`, about one microsecond).
pub const REQUEST_PRECISION: i8 = 0xECu8 as i8;

mod bytes;
#[cfg(feature = "std")]
mod io;
mod traits;
mod types;

pub use self::bytes::{decode_transmit_seconds, encode_request};
pub use self::traits::*;
pub use self::types::*;
