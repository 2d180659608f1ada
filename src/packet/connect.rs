//! CMPP_CONNECT and CMPP_CONNECT_RESP.

use super::codec::{PacketReader, PacketWriter};
use super::CommandId;
use crate::core::{AUTHENTICATOR_LEN, Packer, PacketResult, SOURCE_ADDR_LEN};

/// Login request sent by the SP. Identical in every protocol version.
///
/// Wire body (27 bytes after the 12-byte header):
/// ```text
/// +-------------+----------------------+---------+-----------+
/// | Source_Addr | AuthenticatorSource  | Version | Timestamp |
/// | 6 bytes     | 16 bytes             | 1 byte  | 4 bytes   |
/// +-------------+----------------------+---------+-----------+
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConnectRequest {
    /// Sequence_Id (set on decode).
    pub seq_id: u32,
    /// SP enterprise code.
    pub source_addr: String,
    /// Login digest, computed by the caller.
    pub authenticator_source: [u8; AUTHENTICATOR_LEN],
    /// Highest protocol version the SP speaks.
    pub version: u8,
    /// MMDDHHMMSS as a decimal number.
    pub timestamp: u32,
}

impl Packer for ConnectRequest {
    const COMMAND_ID: CommandId = CommandId::Connect;

    fn encode(&self, seq_id: u32) -> PacketResult<Vec<u8>> {
        let mut w = PacketWriter::new(Self::COMMAND_ID, seq_id, 27);
        w.put_str("source_addr", &self.source_addr, SOURCE_ADDR_LEN)?;
        w.put_octets("authenticator_source", &self.authenticator_source, AUTHENTICATOR_LEN)?;
        w.put_u8(self.version);
        w.put_u32(self.timestamp);
        Ok(w.finish())
    }

    fn decode(body: &[u8]) -> PacketResult<Self> {
        let mut r = PacketReader::new(body);
        let pkt = Self {
            seq_id: r.get_u32("seq_id")?,
            source_addr: r.get_str("source_addr", SOURCE_ADDR_LEN)?,
            authenticator_source: r.get_octets("authenticator_source")?,
            version: r.get_u8("version")?,
            timestamp: r.get_u32("timestamp")?,
        };
        r.finish()?;
        Ok(pkt)
    }

    fn seq_id(&self) -> u32 {
        self.seq_id
    }
}

/// Login response for CMPP 2.x: one-byte status.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConnectResponseV2 {
    /// Sequence_Id (set on decode).
    pub seq_id: u32,
    /// 0 on success.
    pub status: u8,
    /// ISMG digest, computed by the gateway.
    pub authenticator_ismg: [u8; AUTHENTICATOR_LEN],
    /// Highest protocol version the gateway speaks.
    pub version: u8,
}

impl Packer for ConnectResponseV2 {
    const COMMAND_ID: CommandId = CommandId::ConnectResp;

    fn encode(&self, seq_id: u32) -> PacketResult<Vec<u8>> {
        let mut w = PacketWriter::new(Self::COMMAND_ID, seq_id, 18);
        w.put_u8(self.status);
        w.put_octets("authenticator_ismg", &self.authenticator_ismg, AUTHENTICATOR_LEN)?;
        w.put_u8(self.version);
        Ok(w.finish())
    }

    fn decode(body: &[u8]) -> PacketResult<Self> {
        let mut r = PacketReader::new(body);
        let pkt = Self {
            seq_id: r.get_u32("seq_id")?,
            status: r.get_u8("status")?,
            authenticator_ismg: r.get_octets("authenticator_ismg")?,
            version: r.get_u8("version")?,
        };
        r.finish()?;
        Ok(pkt)
    }

    fn seq_id(&self) -> u32 {
        self.seq_id
    }
}

/// Login response for CMPP 3.0: status widened to four bytes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConnectResponseV3 {
    /// Sequence_Id (set on decode).
    pub seq_id: u32,
    /// 0 on success.
    pub status: u32,
    /// ISMG digest, computed by the gateway.
    pub authenticator_ismg: [u8; AUTHENTICATOR_LEN],
    /// Highest protocol version the gateway speaks.
    pub version: u8,
}

impl Packer for ConnectResponseV3 {
    const COMMAND_ID: CommandId = CommandId::ConnectResp;

    fn encode(&self, seq_id: u32) -> PacketResult<Vec<u8>> {
        let mut w = PacketWriter::new(Self::COMMAND_ID, seq_id, 21);
        w.put_u32(self.status);
        w.put_octets("authenticator_ismg", &self.authenticator_ismg, AUTHENTICATOR_LEN)?;
        w.put_u8(self.version);
        Ok(w.finish())
    }

    fn decode(body: &[u8]) -> PacketResult<Self> {
        let mut r = PacketReader::new(body);
        let pkt = Self {
            seq_id: r.get_u32("seq_id")?,
            status: r.get_u32("status")?,
            authenticator_ismg: r.get_octets("authenticator_ismg")?,
            version: r.get_u8("version")?,
        };
        r.finish()?;
        Ok(pkt)
    }

    fn seq_id(&self) -> u32 {
        self.seq_id
    }
}
