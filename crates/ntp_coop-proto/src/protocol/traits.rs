// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

// Codec traits shared by the slice and writer implementations.

#[cfg(feature = "std")]
use byteorder::WriteBytesExt;
#[cfg(feature = "std")]
use std::io;

use crate::error::ParseError;

/// Extension for any `byteorder` writer: write an NTP type in network order.
///
/// Blanket-implemented for every [`WriteBytesExt`]. Requires the `std` feature.
#[cfg(feature = "std")]
pub trait WriteBytes {
    /// Write `value` to this writer.
    fn write_bytes<P: WriteToBytes>(&mut self, value: P) -> io::Result<()>;
}

/// An NTP type with a big-endian writer encoding. Requires the `std` feature.
#[cfg(feature = "std")]
pub trait WriteToBytes {
    /// Write `self` to `writer`.
    fn write_to_bytes<W: WriteBytesExt>(&self, writer: W) -> io::Result<()>;
}

/// Fixed on-the-wire size.
pub trait ConstPackedSizeBytes {
    /// Encoded size in bytes.
    const PACKED_SIZE_BYTES: usize;
}

/// Decode from the front of a byte slice.
pub trait FromBytes: Sized {
    /// Returns the value and the number of bytes it occupied.
    fn from_bytes(buf: &[u8]) -> Result<(Self, usize), ParseError>;
}

/// Encode into the front of a byte slice.
pub trait ToBytes {
    /// Returns the number of bytes written, or [`ParseError::BufferTooShort`]
    /// when `buf` cannot hold the value.
    fn to_bytes(&self, buf: &mut [u8]) -> Result<usize, ParseError>;
}
