// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

use ntp_coop_proto::protocol::{
    ClientRequest, FromBytes, LeapIndicator, Mode, PACKET_SIZE, TimestampFormat, ToBytes, Version,
    decode_transmit_seconds, encode_request,
};
use ntp_coop_proto::unix_time;
use proptest::prelude::*;

/// Strategy that generates exactly 48 random bytes.
fn arb_packet() -> impl Strategy<Value = [u8; PACKET_SIZE]> {
    prop::collection::vec(any::<u8>(), PACKET_SIZE).prop_map(|v| {
        let mut buf = [0u8; PACKET_SIZE];
        buf.copy_from_slice(&v);
        buf
    })
}

proptest! {
    /// The transmit seconds decode agrees with the generic timestamp parser at offset 40.
    #[test]
    fn transmit_seconds_match_timestamp_parser(packet in arb_packet()) {
        let (ts, _) = TimestampFormat::from_bytes(&packet[40..]).unwrap();
        prop_assert_eq!(decode_transmit_seconds(&packet), ts.seconds);
    }

    /// A reply carrying X in the transmit field yields X - 2208988800 as Unix seconds.
    #[test]
    fn reply_seconds_convert_to_unix(x in any::<u32>(), fraction in any::<u32>()) {
        let mut reply = [0u8; PACKET_SIZE];
        TimestampFormat { seconds: x, fraction }.to_bytes(&mut reply[40..]).unwrap();
        let unix = unix_time::ntp_to_unix_seconds(decode_transmit_seconds(&reply));
        prop_assert_eq!(unix, x.wrapping_sub(2_208_988_800));
    }

    /// Header bytes with a non-zero version always parse, and re-encode identically.
    #[test]
    fn header_byte_reencodes(byte in any::<u8>()) {
        match <(LeapIndicator, Version, Mode)>::from_bytes(&[byte]) {
            Ok((header, _)) => {
                let mut out = [0u8; 1];
                header.to_bytes(&mut out).unwrap();
                prop_assert_eq!(out[0], byte);
            }
            Err(_) => prop_assert_eq!((byte >> 3) & 0b111, 0),
        }
    }

    /// Any poll/precision pair lands in bytes 2 and 3 without disturbing the rest.
    #[test]
    fn request_poll_and_precision_placement(poll in any::<i8>(), precision in any::<i8>()) {
        let request = ClientRequest { poll, precision, ..ClientRequest::default() };
        let buf = encode_request(&request);
        prop_assert_eq!(buf[2], poll as u8);
        prop_assert_eq!(buf[3], precision as u8);
        prop_assert_eq!(buf[0], 0xE3);
        prop_assert!(buf[16..].iter().all(|&b| b == 0));
    }
}
