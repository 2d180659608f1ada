//! The capability every CMPP packet kind implements.

use super::error::PacketResult;
use crate::packet::CommandId;

/// A packet type that can serialize and deserialize itself.
///
/// # Wire contract
///
/// - `encode` produces the complete frame, header included, with
///   Total_Length filled in and `seq_id` written as Sequence_Id.
///   Encoding is all-or-nothing: either the full buffer or an error.
/// - `decode` receives the frame minus its first 8 bytes, i.e. starting
///   at Sequence_Id, and must reject truncated or over-long input.
///
/// # Example
///
/// ```
/// use cmpp_conn::core::Packer;
/// use cmpp_conn::packet::ActiveTestRequest;
///
/// let bytes = ActiveTestRequest::default().encode(7).unwrap();
/// assert_eq!(bytes.len(), 12);
///
/// let decoded = ActiveTestRequest::decode(&bytes[8..]).unwrap();
/// assert_eq!(decoded.seq_id(), 7);
/// ```
pub trait Packer: Sized {
    /// Command_Id carried in the header.
    const COMMAND_ID: CommandId;

    /// Serialize into a full frame using `seq_id` as Sequence_Id.
    fn encode(&self, seq_id: u32) -> PacketResult<Vec<u8>>;

    /// Parse from a frame body that starts at Sequence_Id.
    fn decode(body: &[u8]) -> PacketResult<Self>;

    /// Sequence_Id this packet was decoded with.
    fn seq_id(&self) -> u32;
}

/// Anything that can be written to the wire as one frame.
///
/// Implemented for every [`Packer`] and for the
/// [`Packet`](crate::packet::Packet) sum type, so a connection can send
/// either.
pub trait Encode {
    /// Serialize into a full frame using `seq_id` as Sequence_Id.
    fn encode_frame(&self, seq_id: u32) -> PacketResult<Vec<u8>>;
}

impl<P: Packer> Encode for P {
    fn encode_frame(&self, seq_id: u32) -> PacketResult<Vec<u8>> {
        self.encode(seq_id)
    }
}
