//! Error types for CMPP packet encoding and decoding.

use thiserror::Error;

/// Format errors raised by a packet's encode or decode.
///
/// Each variant names the wire field that was being processed so a
/// malformed frame can be diagnosed without a packet dump.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PacketError {
    /// Body ended before a field could be read.
    #[error("unexpected end of packet reading {field}: need {needed} bytes, {remaining} left")]
    UnexpectedEof {
        /// Field being read.
        field: &'static str,
        /// Bytes the field needs.
        needed: usize,
        /// Bytes left in the body.
        remaining: usize,
    },

    /// Value does not fit its fixed-width field.
    #[error("{field} is {actual} bytes, field holds at most {max}")]
    FieldTooLong {
        /// Field being written.
        field: &'static str,
        /// Field capacity.
        max: usize,
        /// Length of the offending value.
        actual: usize,
    },

    /// Octet string is not valid UTF-8.
    #[error("{field} is not a valid string")]
    InvalidString {
        /// Field being read.
        field: &'static str,
    },

    /// Receiver list exceeds the protocol limit.
    #[error("too many destinations: {count} (max {max})")]
    TooManyDestinations {
        /// Number of receivers supplied or announced.
        count: usize,
        /// Protocol limit.
        max: usize,
    },

    /// Bytes left over after the last field.
    #[error("{count} trailing bytes after packet body")]
    TrailingBytes {
        /// Number of unread bytes.
        count: usize,
    },
}

/// Result type for packet codec operations.
pub type PacketResult<T> = Result<T, PacketError>;
