// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

// Buffer-based codec (io-independent).

use crate::error::ParseError;

use super::{
    ClientRequest, ConstPackedSizeBytes, FromBytes, LeapIndicator, Mode, PACKET_SIZE, Stratum,
    TRANSMIT_TIMESTAMP_OFFSET, TimestampFormat, ToBytes, Version,
};

fn check_len(buf: &[u8], needed: usize) -> Result<(), ParseError> {
    if buf.len() < needed {
        return Err(ParseError::BufferTooShort {
            needed,
            available: buf.len(),
        });
    }
    Ok(())
}

/// Pack leap indicator, version and mode into the first header byte.
pub(super) fn li_vn_mode_byte(li: LeapIndicator, vn: Version, mode: Mode) -> u8 {
    ((li as u8) << 6) | ((vn.0 & 0b111) << 3) | mode as u8
}

/// Serialize a client request into a full 48-byte packet.
///
/// Everything after the reference identifier (the four timestamps) is zero.
pub fn encode_request(request: &ClientRequest) -> [u8; PACKET_SIZE] {
    let mut buf = [0u8; PACKET_SIZE];
    buf[0] = li_vn_mode_byte(request.leap_indicator, request.version, request.mode);
    buf[1] = request.stratum.0;
    buf[2] = request.poll as u8;
    buf[3] = request.precision as u8;
    // bytes 4..12: root delay and root dispersion, zero
    buf[12..16].copy_from_slice(&request.reference_id);
    buf
}

/// Extract the transmit timestamp seconds (NTP epoch) from a server reply.
///
/// The fractional part is ignored. The buffer type guarantees a full packet,
/// so this cannot fail.
///
/// ```
/// use ntp_coop_proto::protocol::{PACKET_SIZE, decode_transmit_seconds};
///
/// let mut reply = [0u8; PACKET_SIZE];
/// reply[40..44].copy_from_slice(&3_913_056_000u32.to_be_bytes());
/// assert_eq!(decode_transmit_seconds(&reply), 3_913_056_000);
/// ```
pub fn decode_transmit_seconds(buf: &[u8; PACKET_SIZE]) -> u32 {
    let at = TRANSMIT_TIMESTAMP_OFFSET;
    let high = u16::from_be_bytes([buf[at], buf[at + 1]]) as u32;
    let low = u16::from_be_bytes([buf[at + 2], buf[at + 3]]) as u32;
    (high << 16) | low
}

impl FromBytes for TimestampFormat {
    fn from_bytes(buf: &[u8]) -> Result<(Self, usize), ParseError> {
        check_len(buf, Self::PACKED_SIZE_BYTES)?;
        let seconds = u32::from_be_bytes([buf[0], buf[1], buf[2], buf[3]]);
        let fraction = u32::from_be_bytes([buf[4], buf[5], buf[6], buf[7]]);
        Ok((
            TimestampFormat { seconds, fraction },
            Self::PACKED_SIZE_BYTES,
        ))
    }
}

impl FromBytes for Stratum {
    fn from_bytes(buf: &[u8]) -> Result<(Self, usize), ParseError> {
        check_len(buf, 1)?;
        Ok((Stratum(buf[0]), 1))
    }
}

impl FromBytes for (LeapIndicator, Version, Mode) {
    fn from_bytes(buf: &[u8]) -> Result<(Self, usize), ParseError> {
        check_len(buf, 1)?;
        let li_vn_mode = buf[0];
        let li_u8 = li_vn_mode >> 6;
        let vn_u8 = (li_vn_mode >> 3) & 0b111;
        let mode_u8 = li_vn_mode & 0b111;
        let li = LeapIndicator::try_from(li_u8).map_err(|_| ParseError::InvalidField {
            field: "leap indicator",
            value: li_u8 as u32,
        })?;
        let vn = Version::new(vn_u8).ok_or(ParseError::InvalidField {
            field: "version",
            value: vn_u8 as u32,
        })?;
        let mode = Mode::try_from(mode_u8).map_err(|_| ParseError::InvalidField {
            field: "association mode",
            value: mode_u8 as u32,
        })?;
        Ok(((li, vn, mode), 1))
    }
}

impl ToBytes for TimestampFormat {
    fn to_bytes(&self, buf: &mut [u8]) -> Result<usize, ParseError> {
        check_len(buf, Self::PACKED_SIZE_BYTES)?;
        buf[..4].copy_from_slice(&self.seconds.to_be_bytes());
        buf[4..8].copy_from_slice(&self.fraction.to_be_bytes());
        Ok(Self::PACKED_SIZE_BYTES)
    }
}

impl ToBytes for (LeapIndicator, Version, Mode) {
    fn to_bytes(&self, buf: &mut [u8]) -> Result<usize, ParseError> {
        check_len(buf, 1)?;
        let (li, vn, mode) = *self;
        buf[0] = li_vn_mode_byte(li, vn, mode);
        Ok(1)
    }
}

impl ToBytes for ClientRequest {
    fn to_bytes(&self, buf: &mut [u8]) -> Result<usize, ParseError> {
        check_len(buf, Self::PACKED_SIZE_BYTES)?;
        buf[..PACKET_SIZE].copy_from_slice(&encode_request(self));
        Ok(Self::PACKED_SIZE_BYTES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_request_first_byte() {
        let buf = encode_request(&ClientRequest::default());
        assert_eq!(buf[0], 0b1110_0011);
    }

    #[test]
    fn test_request_tail_is_zero() {
        let buf = encode_request(&ClientRequest::default());
        assert!(buf[4..12].iter().all(|&b| b == 0));
        assert!(buf[16..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_to_bytes_rejects_short_buffer() {
        let mut buf = [0u8; 47];
        let err = ClientRequest::default().to_bytes(&mut buf).unwrap_err();
        assert_eq!(
            err,
            ParseError::BufferTooShort {
                needed: 48,
                available: 47
            }
        );
    }

    #[test]
    fn test_decode_transmit_seconds_ignores_fraction() {
        let mut reply = [0u8; PACKET_SIZE];
        reply[40..44].copy_from_slice(&[0xE9, 0x3C, 0x68, 0x00]);
        reply[44..48].copy_from_slice(&[0xFF; 4]);
        assert_eq!(decode_transmit_seconds(&reply), 0xE93C_6800);
    }

    #[test]
    fn test_header_byte_round_trip() {
        let ((li, vn, mode), n) =
            <(LeapIndicator, Version, Mode)>::from_bytes(&[0xE3]).unwrap();
        assert_eq!(n, 1);
        assert_eq!(li, LeapIndicator::Unknown);
        assert_eq!(vn, Version::V4);
        assert_eq!(mode, Mode::Client);
    }

    #[test]
    fn test_header_byte_rejects_version_zero() {
        let err = <(LeapIndicator, Version, Mode)>::from_bytes(&[0b0000_0100]).unwrap_err();
        assert_eq!(
            err,
            ParseError::InvalidField {
                field: "version",
                value: 0
            }
        );
    }
}
