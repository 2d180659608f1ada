//! Session-control packets: CMPP_TERMINATE and CMPP_ACTIVE_TEST with their
//! responses. All four share one layout across protocol versions.

use super::codec::{PacketReader, PacketWriter};
use super::CommandId;
use crate::core::{Packer, PacketResult};

macro_rules! header_only_packet {
    ($(#[$doc:meta])* $name:ident, $command:expr) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
        pub struct $name {
            /// Sequence_Id (set on decode).
            pub seq_id: u32,
        }

        impl Packer for $name {
            const COMMAND_ID: CommandId = $command;

            fn encode(&self, seq_id: u32) -> PacketResult<Vec<u8>> {
                Ok(PacketWriter::new(Self::COMMAND_ID, seq_id, 0).finish())
            }

            fn decode(body: &[u8]) -> PacketResult<Self> {
                let mut r = PacketReader::new(body);
                let pkt = Self {
                    seq_id: r.get_u32("seq_id")?,
                };
                r.finish()?;
                Ok(pkt)
            }

            fn seq_id(&self) -> u32 {
                self.seq_id
            }
        }
    };
}

header_only_packet!(
    /// Request to tear down the session. Header only.
    TerminateRequest,
    CommandId::Terminate
);

header_only_packet!(
    /// Acknowledges a terminate request. Header only.
    TerminateResponse,
    CommandId::TerminateResp
);

header_only_packet!(
    /// Link keep-alive probe. Header only.
    ActiveTestRequest,
    CommandId::ActiveTest
);

/// Answer to an active test: header plus one reserved byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ActiveTestResponse {
    /// Sequence_Id (set on decode).
    pub seq_id: u32,
    /// Reserved, normally 0.
    pub reserved: u8,
}

impl Packer for ActiveTestResponse {
    const COMMAND_ID: CommandId = CommandId::ActiveTestResp;

    fn encode(&self, seq_id: u32) -> PacketResult<Vec<u8>> {
        let mut w = PacketWriter::new(Self::COMMAND_ID, seq_id, 1);
        w.put_u8(self.reserved);
        Ok(w.finish())
    }

    fn decode(body: &[u8]) -> PacketResult<Self> {
        let mut r = PacketReader::new(body);
        let pkt = Self {
            seq_id: r.get_u32("seq_id")?,
            reserved: r.get_u8("reserved")?,
        };
        r.finish()?;
        Ok(pkt)
    }

    fn seq_id(&self) -> u32 {
        self.seq_id
    }
}
