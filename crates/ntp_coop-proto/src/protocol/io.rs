// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

use byteorder::{BE, WriteBytesExt};
use std::io;

use super::{
    ClientRequest, LeapIndicator, Mode, Stratum, TimestampFormat, Version, WriteBytes,
    WriteToBytes,
};

// Writer implementations.

impl<W> WriteBytes for W
where
    W: WriteBytesExt,
{
    fn write_bytes<P: WriteToBytes>(&mut self, value: P) -> io::Result<()> {
        value.write_to_bytes(self)
    }
}

impl<P> WriteToBytes for &P
where
    P: WriteToBytes,
{
    fn write_to_bytes<W: WriteBytesExt>(&self, writer: W) -> io::Result<()> {
        (*self).write_to_bytes(writer)
    }
}

impl WriteToBytes for TimestampFormat {
    fn write_to_bytes<W: WriteBytesExt>(&self, mut writer: W) -> io::Result<()> {
        writer.write_u32::<BE>(self.seconds)?;
        writer.write_u32::<BE>(self.fraction)?;
        Ok(())
    }
}

impl WriteToBytes for Stratum {
    fn write_to_bytes<W: WriteBytesExt>(&self, mut writer: W) -> io::Result<()> {
        writer.write_u8(self.0)?;
        Ok(())
    }
}

impl WriteToBytes for (LeapIndicator, Version, Mode) {
    fn write_to_bytes<W: WriteBytesExt>(&self, mut writer: W) -> io::Result<()> {
        let (li, vn, mode) = *self;
        writer.write_u8(super::bytes::li_vn_mode_byte(li, vn, mode))?;
        Ok(())
    }
}

impl WriteToBytes for ClientRequest {
    fn write_to_bytes<W: WriteBytesExt>(&self, mut writer: W) -> io::Result<()> {
        writer.write_bytes((self.leap_indicator, self.version, self.mode))?;
        writer.write_bytes(self.stratum)?;
        writer.write_i8(self.poll)?;
        writer.write_i8(self.precision)?;
        // Root delay and root dispersion.
        writer.write_u32::<BE>(0)?;
        writer.write_u32::<BE>(0)?;
        for b in self.reference_id {
            writer.write_u8(b)?;
        }
        // Reference, origin, receive and transmit timestamps.
        for _ in 0..4 {
            writer.write_bytes(TimestampFormat::default())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{PACKET_SIZE, encode_request};

    #[test]
    fn test_writer_matches_slice_codec() {
        let request = ClientRequest::default();
        let mut buf = [0u8; PACKET_SIZE];
        (&mut buf[..]).write_bytes(request).unwrap();
        assert_eq!(buf, encode_request(&request));
    }

    #[test]
    fn test_writer_emits_exactly_one_packet() {
        let mut out = Vec::new();
        out.write_bytes(&ClientRequest::default()).unwrap();
        assert_eq!(out.len(), PACKET_SIZE);
    }

    #[test]
    fn test_writer_fails_on_short_slice() {
        let mut buf = [0u8; 20];
        let err = (&mut buf[..]).write_bytes(ClientRequest::default()).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::WriteZero);
    }
}
