//! Field-level helpers shared by the packet encoders and decoders.
//!
//! Multi-byte integers are big-endian. Octet strings occupy a fixed width,
//! zero-padded on the right; decoding strips the padding.

use bytes::{Buf, BufMut, BytesMut};

use super::CommandId;
use crate::core::{CMPP_HEADER_LEN, MAX_CONTENT_LEN, MAX_DESTINATIONS, PacketError, PacketResult};

/// Builds one frame: header first, Total_Length patched in `finish`.
pub(crate) struct PacketWriter {
    buf: BytesMut,
}

impl PacketWriter {
    pub(crate) fn new(command: CommandId, seq_id: u32, body_len: usize) -> Self {
        let mut buf = BytesMut::with_capacity(CMPP_HEADER_LEN as usize + body_len);
        buf.put_u32(0);
        buf.put_u32(command.as_u32());
        buf.put_u32(seq_id);
        Self { buf }
    }

    pub(crate) fn put_u8(&mut self, value: u8) {
        self.buf.put_u8(value);
    }

    pub(crate) fn put_u32(&mut self, value: u32) {
        self.buf.put_u32(value);
    }

    pub(crate) fn put_u64(&mut self, value: u64) {
        self.buf.put_u64(value);
    }

    pub(crate) fn put_octets(
        &mut self,
        field: &'static str,
        value: &[u8],
        width: usize,
    ) -> PacketResult<()> {
        if value.len() > width {
            return Err(PacketError::FieldTooLong {
                field,
                max: width,
                actual: value.len(),
            });
        }
        self.buf.put_slice(value);
        self.buf.put_bytes(0, width - value.len());
        Ok(())
    }

    pub(crate) fn put_str(&mut self, field: &'static str, value: &str, width: usize) -> PacketResult<()> {
        self.put_octets(field, value.as_bytes(), width)
    }

    /// Count byte followed by `ids.len()` fixed-width entries.
    pub(crate) fn put_str_list(
        &mut self,
        field: &'static str,
        ids: &[String],
        width: usize,
    ) -> PacketResult<()> {
        if ids.len() > MAX_DESTINATIONS {
            return Err(PacketError::TooManyDestinations {
                count: ids.len(),
                max: MAX_DESTINATIONS,
            });
        }
        self.buf.put_u8(ids.len() as u8);
        for id in ids {
            self.put_str(field, id, width)?;
        }
        Ok(())
    }

    /// Msg_Length byte followed by Msg_Content.
    pub(crate) fn put_content(&mut self, content: &[u8]) -> PacketResult<()> {
        if content.len() > MAX_CONTENT_LEN {
            return Err(PacketError::FieldTooLong {
                field: "msg_content",
                max: MAX_CONTENT_LEN,
                actual: content.len(),
            });
        }
        self.buf.put_u8(content.len() as u8);
        self.buf.put_slice(content);
        Ok(())
    }

    pub(crate) fn finish(mut self) -> Vec<u8> {
        let total = self.buf.len() as u32;
        self.buf[..4].copy_from_slice(&total.to_be_bytes());
        self.buf.to_vec()
    }
}

/// Cursor over a frame body starting at Sequence_Id.
pub(crate) struct PacketReader<'a> {
    buf: &'a [u8],
}

impl<'a> PacketReader<'a> {
    pub(crate) fn new(body: &'a [u8]) -> Self {
        Self { buf: body }
    }

    fn need(&self, field: &'static str, needed: usize) -> PacketResult<()> {
        if self.buf.remaining() < needed {
            return Err(PacketError::UnexpectedEof {
                field,
                needed,
                remaining: self.buf.remaining(),
            });
        }
        Ok(())
    }

    pub(crate) fn get_u8(&mut self, field: &'static str) -> PacketResult<u8> {
        self.need(field, 1)?;
        Ok(self.buf.get_u8())
    }

    pub(crate) fn get_u32(&mut self, field: &'static str) -> PacketResult<u32> {
        self.need(field, 4)?;
        Ok(self.buf.get_u32())
    }

    pub(crate) fn get_u64(&mut self, field: &'static str) -> PacketResult<u64> {
        self.need(field, 8)?;
        Ok(self.buf.get_u64())
    }

    pub(crate) fn get_octets<const N: usize>(&mut self, field: &'static str) -> PacketResult<[u8; N]> {
        self.need(field, N)?;
        let mut out = [0u8; N];
        self.buf.copy_to_slice(&mut out);
        Ok(out)
    }

    pub(crate) fn get_str(&mut self, field: &'static str, width: usize) -> PacketResult<String> {
        self.need(field, width)?;
        let (raw, rest) = self.buf.split_at(width);
        self.buf = rest;
        let end = raw.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
        std::str::from_utf8(&raw[..end])
            .map(str::to_owned)
            .map_err(|_| PacketError::InvalidString { field })
    }

    pub(crate) fn get_str_list(&mut self, field: &'static str, width: usize) -> PacketResult<Vec<String>> {
        let count = self.get_u8(field)? as usize;
        if count > MAX_DESTINATIONS {
            return Err(PacketError::TooManyDestinations {
                count,
                max: MAX_DESTINATIONS,
            });
        }
        (0..count).map(|_| self.get_str(field, width)).collect()
    }

    pub(crate) fn get_content(&mut self) -> PacketResult<Vec<u8>> {
        let len = self.get_u8("msg_length")? as usize;
        self.need("msg_content", len)?;
        let (content, rest) = self.buf.split_at(len);
        self.buf = rest;
        Ok(content.to_vec())
    }

    pub(crate) fn finish(self) -> PacketResult<()> {
        if self.buf.has_remaining() {
            return Err(PacketError::TrailingBytes {
                count: self.buf.remaining(),
            });
        }
        Ok(())
    }
}
