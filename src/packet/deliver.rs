//! CMPP_DELIVER and CMPP_DELIVER_RESP.
//!
//! A deliver carries either a mobile-originated message or, when
//! Registered_Delivery is 1, a status report for an earlier submit packed
//! into Msg_Content (see [`DeliveryReport`]).

use super::codec::{PacketReader, PacketWriter};
use super::CommandId;
use crate::core::{
    CMPP2_TERMINAL_ID_LEN, CMPP3_TERMINAL_ID_LEN, LINK_ID_LEN, Packer, PacketResult, RESERVE_LEN,
    SERVICE_ID_LEN, SRC_ID_LEN,
};

const STAT_LEN: usize = 7;
const REPORT_TIME_LEN: usize = 10;

/// Status report carried in the Msg_Content of a deliver.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DeliveryReport {
    /// Msg_Id of the submit this report is for.
    pub msg_id: u64,
    /// Final state, e.g. `DELIVRD`.
    pub stat: String,
    /// YYMMDDHHMM.
    pub submit_time: String,
    /// YYMMDDHHMM.
    pub done_time: String,
    /// Receiver of the original submit.
    pub dest_terminal_id: String,
    /// SMSC_sequence.
    pub smsc_sequence: u32,
}

impl DeliveryReport {
    fn decode(content: &[u8], terminal_id_len: usize) -> PacketResult<Self> {
        let mut r = PacketReader::new(content);
        let report = Self {
            msg_id: r.get_u64("report.msg_id")?,
            stat: r.get_str("report.stat", STAT_LEN)?,
            submit_time: r.get_str("report.submit_time", REPORT_TIME_LEN)?,
            done_time: r.get_str("report.done_time", REPORT_TIME_LEN)?,
            dest_terminal_id: r.get_str("report.dest_terminal_id", terminal_id_len)?,
            smsc_sequence: r.get_u32("report.smsc_sequence")?,
        };
        r.finish()?;
        Ok(report)
    }
}

/// Message or status report pushed by the gateway (CMPP 2.x).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DeliverRequestV2 {
    /// Sequence_Id (set on decode).
    pub seq_id: u32,
    /// Msg_Id.
    pub msg_id: u64,
    /// Dest_Id: SP service code.
    pub dest_id: String,
    /// Service_Id.
    pub service_id: String,
    /// TP_pid.
    pub tp_pid: u8,
    /// TP_udhi.
    pub tp_udhi: u8,
    /// Msg_Fmt.
    pub msg_fmt: u8,
    /// Src_terminal_Id.
    pub src_terminal_id: String,
    /// Registered_Delivery: 1 means `msg_content` is a status report.
    pub registered_delivery: u8,
    /// Msg_Content (Msg_Length is its length).
    pub msg_content: Vec<u8>,
    /// Reserved.
    pub reserve: String,
}

impl DeliverRequestV2 {
    /// Parse `msg_content` as a status report, if this deliver is one.
    pub fn report(&self) -> Option<PacketResult<DeliveryReport>> {
        (self.registered_delivery == 1)
            .then(|| DeliveryReport::decode(&self.msg_content, CMPP2_TERMINAL_ID_LEN))
    }
}

impl Packer for DeliverRequestV2 {
    const COMMAND_ID: CommandId = CommandId::Deliver;

    fn encode(&self, seq_id: u32) -> PacketResult<Vec<u8>> {
        let mut w = PacketWriter::new(Self::COMMAND_ID, seq_id, 73 + self.msg_content.len());
        w.put_u64(self.msg_id);
        w.put_str("dest_id", &self.dest_id, SRC_ID_LEN)?;
        w.put_str("service_id", &self.service_id, SERVICE_ID_LEN)?;
        w.put_u8(self.tp_pid);
        w.put_u8(self.tp_udhi);
        w.put_u8(self.msg_fmt);
        w.put_str("src_terminal_id", &self.src_terminal_id, CMPP2_TERMINAL_ID_LEN)?;
        w.put_u8(self.registered_delivery);
        w.put_content(&self.msg_content)?;
        w.put_str("reserve", &self.reserve, RESERVE_LEN)?;
        Ok(w.finish())
    }

    fn decode(body: &[u8]) -> PacketResult<Self> {
        let mut r = PacketReader::new(body);
        let pkt = Self {
            seq_id: r.get_u32("seq_id")?,
            msg_id: r.get_u64("msg_id")?,
            dest_id: r.get_str("dest_id", SRC_ID_LEN)?,
            service_id: r.get_str("service_id", SERVICE_ID_LEN)?,
            tp_pid: r.get_u8("tp_pid")?,
            tp_udhi: r.get_u8("tp_udhi")?,
            msg_fmt: r.get_u8("msg_fmt")?,
            src_terminal_id: r.get_str("src_terminal_id", CMPP2_TERMINAL_ID_LEN)?,
            registered_delivery: r.get_u8("registered_delivery")?,
            msg_content: r.get_content()?,
            reserve: r.get_str("reserve", RESERVE_LEN)?,
        };
        r.finish()?;
        Ok(pkt)
    }

    fn seq_id(&self) -> u32 {
        self.seq_id
    }
}

/// Message or status report pushed by the gateway (CMPP 3.0).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DeliverRequestV3 {
    /// Sequence_Id (set on decode).
    pub seq_id: u32,
    /// Msg_Id.
    pub msg_id: u64,
    /// Dest_Id: SP service code.
    pub dest_id: String,
    /// Service_Id.
    pub service_id: String,
    /// TP_pid.
    pub tp_pid: u8,
    /// TP_udhi.
    pub tp_udhi: u8,
    /// Msg_Fmt.
    pub msg_fmt: u8,
    /// Src_terminal_Id.
    pub src_terminal_id: String,
    /// Src_terminal_type: 0 real number, 1 pseudo code.
    pub src_terminal_type: u8,
    /// Registered_Delivery: 1 means `msg_content` is a status report.
    pub registered_delivery: u8,
    /// Msg_Content (Msg_Length is its length).
    pub msg_content: Vec<u8>,
    /// LinkID.
    pub link_id: String,
}

impl DeliverRequestV3 {
    /// Parse `msg_content` as a status report, if this deliver is one.
    pub fn report(&self) -> Option<PacketResult<DeliveryReport>> {
        (self.registered_delivery == 1)
            .then(|| DeliveryReport::decode(&self.msg_content, CMPP3_TERMINAL_ID_LEN))
    }
}

impl Packer for DeliverRequestV3 {
    const COMMAND_ID: CommandId = CommandId::Deliver;

    fn encode(&self, seq_id: u32) -> PacketResult<Vec<u8>> {
        let mut w = PacketWriter::new(Self::COMMAND_ID, seq_id, 97 + self.msg_content.len());
        w.put_u64(self.msg_id);
        w.put_str("dest_id", &self.dest_id, SRC_ID_LEN)?;
        w.put_str("service_id", &self.service_id, SERVICE_ID_LEN)?;
        w.put_u8(self.tp_pid);
        w.put_u8(self.tp_udhi);
        w.put_u8(self.msg_fmt);
        w.put_str("src_terminal_id", &self.src_terminal_id, CMPP3_TERMINAL_ID_LEN)?;
        w.put_u8(self.src_terminal_type);
        w.put_u8(self.registered_delivery);
        w.put_content(&self.msg_content)?;
        w.put_str("link_id", &self.link_id, LINK_ID_LEN)?;
        Ok(w.finish())
    }

    fn decode(body: &[u8]) -> PacketResult<Self> {
        let mut r = PacketReader::new(body);
        let pkt = Self {
            seq_id: r.get_u32("seq_id")?,
            msg_id: r.get_u64("msg_id")?,
            dest_id: r.get_str("dest_id", SRC_ID_LEN)?,
            service_id: r.get_str("service_id", SERVICE_ID_LEN)?,
            tp_pid: r.get_u8("tp_pid")?,
            tp_udhi: r.get_u8("tp_udhi")?,
            msg_fmt: r.get_u8("msg_fmt")?,
            src_terminal_id: r.get_str("src_terminal_id", CMPP3_TERMINAL_ID_LEN)?,
            src_terminal_type: r.get_u8("src_terminal_type")?,
            registered_delivery: r.get_u8("registered_delivery")?,
            msg_content: r.get_content()?,
            link_id: r.get_str("link_id", LINK_ID_LEN)?,
        };
        r.finish()?;
        Ok(pkt)
    }

    fn seq_id(&self) -> u32 {
        self.seq_id
    }
}

/// SP acknowledgement of a deliver (CMPP 2.x).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DeliverResponseV2 {
    /// Sequence_Id (set on decode).
    pub seq_id: u32,
    /// Msg_Id of the acknowledged deliver.
    pub msg_id: u64,
    /// Result, 0 on success.
    pub result: u8,
}

impl Packer for DeliverResponseV2 {
    const COMMAND_ID: CommandId = CommandId::DeliverResp;

    fn encode(&self, seq_id: u32) -> PacketResult<Vec<u8>> {
        let mut w = PacketWriter::new(Self::COMMAND_ID, seq_id, 9);
        w.put_u64(self.msg_id);
        w.put_u8(self.result);
        Ok(w.finish())
    }

    fn decode(body: &[u8]) -> PacketResult<Self> {
        let mut r = PacketReader::new(body);
        let pkt = Self {
            seq_id: r.get_u32("seq_id")?,
            msg_id: r.get_u64("msg_id")?,
            result: r.get_u8("result")?,
        };
        r.finish()?;
        Ok(pkt)
    }

    fn seq_id(&self) -> u32 {
        self.seq_id
    }
}

/// SP acknowledgement of a deliver (CMPP 3.0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DeliverResponseV3 {
    /// Sequence_Id (set on decode).
    pub seq_id: u32,
    /// Msg_Id of the acknowledged deliver.
    pub msg_id: u64,
    /// Result, 0 on success.
    pub result: u32,
}

impl Packer for DeliverResponseV3 {
    const COMMAND_ID: CommandId = CommandId::DeliverResp;

    fn encode(&self, seq_id: u32) -> PacketResult<Vec<u8>> {
        let mut w = PacketWriter::new(Self::COMMAND_ID, seq_id, 12);
        w.put_u64(self.msg_id);
        w.put_u32(self.result);
        Ok(w.finish())
    }

    fn decode(body: &[u8]) -> PacketResult<Self> {
        let mut r = PacketReader::new(body);
        let pkt = Self {
            seq_id: r.get_u32("seq_id")?,
            msg_id: r.get_u64("msg_id")?,
            result: r.get_u32("result")?,
        };
        r.finish()?;
        Ok(pkt)
    }

    fn seq_id(&self) -> u32 {
        self.seq_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PacketError;

    fn report_content(terminal_id_len: usize) -> Vec<u8> {
        let mut content = Vec::new();
        content.extend_from_slice(&42u64.to_be_bytes());
        content.extend_from_slice(b"DELIVRD");
        content.extend_from_slice(b"1511051315");
        content.extend_from_slice(b"1511051316");
        let mut dest = b"13500002696".to_vec();
        dest.resize(terminal_id_len, 0);
        content.extend_from_slice(&dest);
        content.extend_from_slice(&7u32.to_be_bytes());
        content
    }

    #[test]
    fn test_deliver_v2_roundtrip() {
        let pkt = DeliverRequestV2 {
            msg_id: 0xDEAD_BEEF,
            dest_id: "900001".to_string(),
            service_id: "test".to_string(),
            msg_fmt: 15,
            src_terminal_id: "13500002696".to_string(),
            msg_content: b"mo text".to_vec(),
            ..Default::default()
        };
        let bytes = pkt.encode(8).unwrap();
        assert_eq!(bytes.len(), 12 + 73 + 7);

        let decoded = DeliverRequestV2::decode(&bytes[8..]).unwrap();
        assert_eq!(decoded, DeliverRequestV2 { seq_id: 8, ..pkt });
        assert!(decoded.report().is_none());
    }

    #[test]
    fn test_deliver_v3_status_report() {
        let pkt = DeliverRequestV3 {
            src_terminal_id: "13500002696".to_string(),
            registered_delivery: 1,
            msg_content: report_content(CMPP3_TERMINAL_ID_LEN),
            link_id: "abc".to_string(),
            ..Default::default()
        };
        let bytes = pkt.encode(1).unwrap();
        assert_eq!(bytes.len(), 12 + 97 + 71);

        let decoded = DeliverRequestV3::decode(&bytes[8..]).unwrap();
        let report = decoded.report().unwrap().unwrap();
        assert_eq!(report.msg_id, 42);
        assert_eq!(report.stat, "DELIVRD");
        assert_eq!(report.submit_time, "1511051315");
        assert_eq!(report.done_time, "1511051316");
        assert_eq!(report.dest_terminal_id, "13500002696");
        assert_eq!(report.smsc_sequence, 7);
    }

    #[test]
    fn test_deliver_v2_report_uses_short_terminal_id() {
        let pkt = DeliverRequestV2 {
            registered_delivery: 1,
            msg_content: report_content(CMPP2_TERMINAL_ID_LEN),
            ..Default::default()
        };
        assert_eq!(pkt.report().unwrap().unwrap().dest_terminal_id, "13500002696");

        // A 3.0-sized report does not fit the 2.x layout.
        let wrong = DeliverRequestV2 {
            registered_delivery: 1,
            msg_content: report_content(CMPP3_TERMINAL_ID_LEN),
            ..Default::default()
        };
        assert!(matches!(
            wrong.report(),
            Some(Err(PacketError::TrailingBytes { count: 11 }))
        ));
    }

    #[test]
    fn test_deliver_responses() {
        let v2 = DeliverResponseV2 { seq_id: 0, msg_id: 5, result: 0 }.encode(2).unwrap();
        let v3 = DeliverResponseV3 { seq_id: 0, msg_id: 5, result: 0 }.encode(2).unwrap();
        assert_eq!(v2.len(), 21);
        assert_eq!(v3.len(), 24);
        assert_eq!(&v2[4..8], &[0x80, 0, 0, 5]);

        assert_eq!(DeliverResponseV2::decode(&v2[8..]).unwrap().msg_id, 5);
        assert_eq!(DeliverResponseV3::decode(&v3[8..]).unwrap().seq_id, 2);
    }
}
