//! Frame header validation and packet dispatch.
//!
//! Wire format (big-endian):
//! ```text
//! +---------------+---------------+----------------------------------+
//! | Total_Length  | Command_Id    | Body (Sequence_Id + fields)      |
//! | 4 bytes       | 4 bytes       | Total_Length - 8 bytes           |
//! +---------------+---------------+----------------------------------+
//! ```
//!
//! The checks are plain functions so the streaming reader in
//! [`Connection`](super::Connection) and the in-memory [`decode_frame`]
//! apply exactly the same rules in the same order.

use super::error::{TransportError, TransportResult};
use crate::core::{FRAME_PREFIX_LEN, ProtocolVersion};
use crate::packet::{Packet, PacketKind, is_valid_command_id};

/// Validated Total_Length and Command_Id of an incoming frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader {
    /// Whole frame length, header included.
    pub total_length: u32,
    /// Raw Command_Id.
    pub command_id: u32,
}

impl FrameHeader {
    /// Bytes following the 8-byte prefix.
    pub fn body_len(&self) -> usize {
        (self.total_length - FRAME_PREFIX_LEN) as usize
    }
}

/// Check Total_Length against the bounds of `version`.
///
/// Every version's minimum is at least the 12-byte header, so a length
/// that passes can never underflow `total_length - 8`.
pub fn check_total_length(version: ProtocolVersion, total_length: u32) -> TransportResult<()> {
    if !version.accepts_packet_len(total_length) {
        return Err(TransportError::InvalidTotalLength {
            length: total_length,
            version,
        });
    }
    Ok(())
}

/// Check that an encoded frame fits the Total_Length ceiling of `version`.
///
/// Outgoing counterpart of [`check_total_length`]: a frame the peer would
/// reject by length must never reach the wire.
pub fn check_frame_len(version: ProtocolVersion, len: usize) -> TransportResult<()> {
    let max = version.max_packet_len();
    if len > max as usize {
        return Err(TransportError::FrameTooLong {
            length: len,
            max,
            version,
        });
    }
    Ok(())
}

/// Check Command_Id against the exclusive request and response ranges.
pub fn check_command_id(command_id: u32) -> TransportResult<()> {
    if !is_valid_command_id(command_id) {
        return Err(TransportError::InvalidCommandId(command_id));
    }
    Ok(())
}

/// Map a Command_Id to the packet layout for `version`.
pub fn resolve_kind(version: ProtocolVersion, command_id: u32) -> TransportResult<PacketKind> {
    PacketKind::resolve(version, command_id)
        .ok_or(TransportError::UnsupportedCommandId(command_id))
}

/// Dispatch a fully read body to its packet decoder.
///
/// Packet format errors are passed through as [`TransportError::Packet`]
/// without modification.
pub fn decode_body(
    version: ProtocolVersion,
    header: FrameHeader,
    body: &[u8],
) -> TransportResult<Packet> {
    let kind = resolve_kind(version, header.command_id)?;
    Ok(Packet::decode(kind, body)?)
}

/// Decode one frame from the front of `bytes`.
///
/// Returns the packet and the number of bytes it occupied. Runs the same
/// checks, in the same order, as a connection reading from a stream.
pub fn decode_frame(version: ProtocolVersion, bytes: &[u8]) -> TransportResult<(Packet, usize)> {
    let word = |at: usize| -> Option<u32> {
        let raw = bytes.get(at..at + 4)?;
        Some(u32::from_be_bytes([raw[0], raw[1], raw[2], raw[3]]))
    };

    let total_length = word(0).ok_or(TransportError::TruncatedHeader)?;
    check_total_length(version, total_length)?;

    let command_id = word(4).ok_or(TransportError::TruncatedHeader)?;
    check_command_id(command_id)?;

    let header = FrameHeader {
        total_length,
        command_id,
    };
    let end = total_length as usize;
    let body = bytes
        .get(FRAME_PREFIX_LEN as usize..end)
        .ok_or(TransportError::TruncatedBody {
            expected: header.body_len(),
            actual: bytes.len() - FRAME_PREFIX_LEN as usize,
        })?;

    let packet = decode_body(version, header, body)?;
    Ok((packet, end))
}
