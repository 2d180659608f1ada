//! Connection layer error types.
//!
//! Nothing here is retried or logged-and-dropped: every variant reaches the
//! caller, who decides whether the connection survives.

use std::io;

use thiserror::Error;

use crate::core::{PacketError, ProtocolVersion};

/// Errors raised while sending or receiving on a [`Connection`](super::Connection).
#[derive(Debug, Error)]
pub enum TransportError {
    /// I/O error on the underlying stream (including flush failures).
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),

    /// Stream ended inside the 8-byte Total_Length / Command_Id prefix.
    #[error("stream ended inside frame header")]
    TruncatedHeader,

    /// Stream ended before the whole body arrived.
    #[error("stream ended inside frame body: expected {expected} bytes, got {actual}")]
    TruncatedBody {
        /// Body length announced by Total_Length.
        expected: usize,
        /// Bytes read before end of stream.
        actual: usize,
    },

    /// Total_Length outside the bounds of the connection's version.
    #[error("total length {length} out of bounds for {version}")]
    InvalidTotalLength {
        /// Announced Total_Length.
        length: u32,
        /// Version of the connection.
        version: ProtocolVersion,
    },

    /// Encoded frame is longer than the connection's version allows.
    ///
    /// Raised before anything is written, so the stream stays in sync.
    #[error("encoded frame of {length} bytes exceeds the {max}-byte limit of {version}")]
    FrameTooLong {
        /// Encoded frame length.
        length: usize,
        /// Largest Total_Length the version accepts.
        max: u32,
        /// Version of the connection.
        version: ProtocolVersion,
    },

    /// Command_Id outside both the request and the response range.
    #[error("invalid command id: 0x{0:08x}")]
    InvalidCommandId(u32),

    /// Command_Id in range but not in the dispatch table.
    #[error("unsupported command id: 0x{0:08x}")]
    UnsupportedCommandId(u32),

    /// Packet encode or decode failed.
    #[error(transparent)]
    Packet(#[from] PacketError),

    /// Sequence generator has been stopped.
    #[error("sequence generator stopped")]
    SequenceStopped,

    /// Connection has been closed.
    #[error("connection closed")]
    ConnectionClosed,
}

impl TransportError {
    /// Whether the peer broke framing rules or the stream has desynchronised.
    ///
    /// After one of these the byte position of the next frame is unknown, so
    /// the connection should be closed.
    pub fn is_protocol_violation(&self) -> bool {
        matches!(
            self,
            TransportError::InvalidTotalLength { .. }
                | TransportError::InvalidCommandId(_)
                | TransportError::UnsupportedCommandId(_)
        )
    }

    /// Whether the connection can no longer be used.
    pub fn is_fatal(&self) -> bool {
        self.is_protocol_violation()
            || matches!(
                self,
                TransportError::Io(_)
                    | TransportError::TruncatedHeader
                    | TransportError::TruncatedBody { .. }
                    | TransportError::SequenceStopped
                    | TransportError::ConnectionClosed
            )
    }
}

/// Result type for connection operations.
pub type TransportResult<T> = Result<T, TransportError>;
