//! CMPP_SUBMIT and CMPP_SUBMIT_RESP.
//!
//! The 3.0 layout widens terminal ids to 32 bytes, adds a terminal type
//! byte after the fee terminal and after the receiver list, and replaces
//! the 8-byte Reserve with a 20-byte LinkID.

use super::codec::{PacketReader, PacketWriter};
use super::CommandId;
use crate::core::{
    CMPP2_TERMINAL_ID_LEN, CMPP3_TERMINAL_ID_LEN, FEE_CODE_LEN, FEE_TYPE_LEN, LINK_ID_LEN,
    NODE_ID_LEN, Packer, PacketResult, RESERVE_LEN, SERVICE_ID_LEN, SRC_ID_LEN, TIME_LEN,
};

/// Mobile-terminated message submitted by the SP (CMPP 2.x).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SubmitRequestV2 {
    /// Sequence_Id (set on decode).
    pub seq_id: u32,
    /// Msg_Id, filled in by the gateway.
    pub msg_id: u64,
    /// Pk_total.
    pub pk_total: u8,
    /// Pk_number.
    pub pk_number: u8,
    /// Registered_Delivery: 1 requests a status report.
    pub registered_delivery: u8,
    /// Msg_level.
    pub msg_level: u8,
    /// Service_Id.
    pub service_id: String,
    /// Fee_UserType.
    pub fee_user_type: u8,
    /// Fee_terminal_Id.
    pub fee_terminal_id: String,
    /// TP_pId.
    pub tp_pid: u8,
    /// TP_udhi.
    pub tp_udhi: u8,
    /// Msg_Fmt.
    pub msg_fmt: u8,
    /// Msg_src.
    pub msg_src: String,
    /// FeeType.
    pub fee_type: String,
    /// FeeCode.
    pub fee_code: String,
    /// ValId_Time.
    pub valid_time: String,
    /// At_Time.
    pub at_time: String,
    /// Src_Id.
    pub src_id: String,
    /// Dest_terminal_Id list (DestUsr_tl is its length).
    pub dest_terminal_ids: Vec<String>,
    /// Msg_Content (Msg_Length is its length).
    pub msg_content: Vec<u8>,
    /// Reserve.
    pub reserve: String,
}

impl Packer for SubmitRequestV2 {
    const COMMAND_ID: CommandId = CommandId::Submit;

    fn encode(&self, seq_id: u32) -> PacketResult<Vec<u8>> {
        let body_len = 126
            + self.dest_terminal_ids.len() * CMPP2_TERMINAL_ID_LEN
            + self.msg_content.len();
        let mut w = PacketWriter::new(Self::COMMAND_ID, seq_id, body_len);
        w.put_u64(self.msg_id);
        w.put_u8(self.pk_total);
        w.put_u8(self.pk_number);
        w.put_u8(self.registered_delivery);
        w.put_u8(self.msg_level);
        w.put_str("service_id", &self.service_id, SERVICE_ID_LEN)?;
        w.put_u8(self.fee_user_type);
        w.put_str("fee_terminal_id", &self.fee_terminal_id, CMPP2_TERMINAL_ID_LEN)?;
        w.put_u8(self.tp_pid);
        w.put_u8(self.tp_udhi);
        w.put_u8(self.msg_fmt);
        w.put_str("msg_src", &self.msg_src, NODE_ID_LEN)?;
        w.put_str("fee_type", &self.fee_type, FEE_TYPE_LEN)?;
        w.put_str("fee_code", &self.fee_code, FEE_CODE_LEN)?;
        w.put_str("valid_time", &self.valid_time, TIME_LEN)?;
        w.put_str("at_time", &self.at_time, TIME_LEN)?;
        w.put_str("src_id", &self.src_id, SRC_ID_LEN)?;
        w.put_str_list("dest_terminal_id", &self.dest_terminal_ids, CMPP2_TERMINAL_ID_LEN)?;
        w.put_content(&self.msg_content)?;
        w.put_str("reserve", &self.reserve, RESERVE_LEN)?;
        Ok(w.finish())
    }

    fn decode(body: &[u8]) -> PacketResult<Self> {
        let mut r = PacketReader::new(body);
        let pkt = Self {
            seq_id: r.get_u32("seq_id")?,
            msg_id: r.get_u64("msg_id")?,
            pk_total: r.get_u8("pk_total")?,
            pk_number: r.get_u8("pk_number")?,
            registered_delivery: r.get_u8("registered_delivery")?,
            msg_level: r.get_u8("msg_level")?,
            service_id: r.get_str("service_id", SERVICE_ID_LEN)?,
            fee_user_type: r.get_u8("fee_user_type")?,
            fee_terminal_id: r.get_str("fee_terminal_id", CMPP2_TERMINAL_ID_LEN)?,
            tp_pid: r.get_u8("tp_pid")?,
            tp_udhi: r.get_u8("tp_udhi")?,
            msg_fmt: r.get_u8("msg_fmt")?,
            msg_src: r.get_str("msg_src", NODE_ID_LEN)?,
            fee_type: r.get_str("fee_type", FEE_TYPE_LEN)?,
            fee_code: r.get_str("fee_code", FEE_CODE_LEN)?,
            valid_time: r.get_str("valid_time", TIME_LEN)?,
            at_time: r.get_str("at_time", TIME_LEN)?,
            src_id: r.get_str("src_id", SRC_ID_LEN)?,
            dest_terminal_ids: r.get_str_list("dest_terminal_id", CMPP2_TERMINAL_ID_LEN)?,
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

/// Mobile-terminated message submitted by the SP (CMPP 3.0).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SubmitRequestV3 {
    /// Sequence_Id (set on decode).
    pub seq_id: u32,
    /// Msg_Id, filled in by the gateway.
    pub msg_id: u64,
    /// Pk_total.
    pub pk_total: u8,
    /// Pk_number.
    pub pk_number: u8,
    /// Registered_Delivery: 1 requests a status report.
    pub registered_delivery: u8,
    /// Msg_level.
    pub msg_level: u8,
    /// Service_Id.
    pub service_id: String,
    /// Fee_UserType.
    pub fee_user_type: u8,
    /// Fee_terminal_Id.
    pub fee_terminal_id: String,
    /// Fee_terminal_type: 0 real number, 1 pseudo code.
    pub fee_terminal_type: u8,
    /// TP_pId.
    pub tp_pid: u8,
    /// TP_udhi.
    pub tp_udhi: u8,
    /// Msg_Fmt.
    pub msg_fmt: u8,
    /// Msg_src.
    pub msg_src: String,
    /// FeeType.
    pub fee_type: String,
    /// FeeCode.
    pub fee_code: String,
    /// ValId_Time.
    pub valid_time: String,
    /// At_Time.
    pub at_time: String,
    /// Src_Id.
    pub src_id: String,
    /// Dest_terminal_Id list (DestUsr_tl is its length).
    pub dest_terminal_ids: Vec<String>,
    /// Dest_terminal_type.
    pub dest_terminal_type: u8,
    /// Msg_Content (Msg_Length is its length).
    pub msg_content: Vec<u8>,
    /// LinkID.
    pub link_id: String,
}

impl Packer for SubmitRequestV3 {
    const COMMAND_ID: CommandId = CommandId::Submit;

    fn encode(&self, seq_id: u32) -> PacketResult<Vec<u8>> {
        let body_len = 151
            + self.dest_terminal_ids.len() * CMPP3_TERMINAL_ID_LEN
            + self.msg_content.len();
        let mut w = PacketWriter::new(Self::COMMAND_ID, seq_id, body_len);
        w.put_u64(self.msg_id);
        w.put_u8(self.pk_total);
        w.put_u8(self.pk_number);
        w.put_u8(self.registered_delivery);
        w.put_u8(self.msg_level);
        w.put_str("service_id", &self.service_id, SERVICE_ID_LEN)?;
        w.put_u8(self.fee_user_type);
        w.put_str("fee_terminal_id", &self.fee_terminal_id, CMPP3_TERMINAL_ID_LEN)?;
        w.put_u8(self.fee_terminal_type);
        w.put_u8(self.tp_pid);
        w.put_u8(self.tp_udhi);
        w.put_u8(self.msg_fmt);
        w.put_str("msg_src", &self.msg_src, NODE_ID_LEN)?;
        w.put_str("fee_type", &self.fee_type, FEE_TYPE_LEN)?;
        w.put_str("fee_code", &self.fee_code, FEE_CODE_LEN)?;
        w.put_str("valid_time", &self.valid_time, TIME_LEN)?;
        w.put_str("at_time", &self.at_time, TIME_LEN)?;
        w.put_str("src_id", &self.src_id, SRC_ID_LEN)?;
        w.put_str_list("dest_terminal_id", &self.dest_terminal_ids, CMPP3_TERMINAL_ID_LEN)?;
        w.put_u8(self.dest_terminal_type);
        w.put_content(&self.msg_content)?;
        w.put_str("link_id", &self.link_id, LINK_ID_LEN)?;
        Ok(w.finish())
    }

    fn decode(body: &[u8]) -> PacketResult<Self> {
        let mut r = PacketReader::new(body);
        let pkt = Self {
            seq_id: r.get_u32("seq_id")?,
            msg_id: r.get_u64("msg_id")?,
            pk_total: r.get_u8("pk_total")?,
            pk_number: r.get_u8("pk_number")?,
            registered_delivery: r.get_u8("registered_delivery")?,
            msg_level: r.get_u8("msg_level")?,
            service_id: r.get_str("service_id", SERVICE_ID_LEN)?,
            fee_user_type: r.get_u8("fee_user_type")?,
            fee_terminal_id: r.get_str("fee_terminal_id", CMPP3_TERMINAL_ID_LEN)?,
            fee_terminal_type: r.get_u8("fee_terminal_type")?,
            tp_pid: r.get_u8("tp_pid")?,
            tp_udhi: r.get_u8("tp_udhi")?,
            msg_fmt: r.get_u8("msg_fmt")?,
            msg_src: r.get_str("msg_src", NODE_ID_LEN)?,
            fee_type: r.get_str("fee_type", FEE_TYPE_LEN)?,
            fee_code: r.get_str("fee_code", FEE_CODE_LEN)?,
            valid_time: r.get_str("valid_time", TIME_LEN)?,
            at_time: r.get_str("at_time", TIME_LEN)?,
            src_id: r.get_str("src_id", SRC_ID_LEN)?,
            dest_terminal_ids: r.get_str_list("dest_terminal_id", CMPP3_TERMINAL_ID_LEN)?,
            dest_terminal_type: r.get_u8("dest_terminal_type")?,
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

/// Gateway acknowledgement of a submit (CMPP 2.x).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SubmitResponseV2 {
    /// Sequence_Id (set on decode).
    pub seq_id: u32,
    /// Msg_Id assigned by the gateway.
    pub msg_id: u64,
    /// Result, 0 on success.
    pub result: u8,
}

impl Packer for SubmitResponseV2 {
    const COMMAND_ID: CommandId = CommandId::SubmitResp;

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

/// Gateway acknowledgement of a submit (CMPP 3.0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SubmitResponseV3 {
    /// Sequence_Id (set on decode).
    pub seq_id: u32,
    /// Msg_Id assigned by the gateway.
    pub msg_id: u64,
    /// Result, 0 on success.
    pub result: u32,
}

impl Packer for SubmitResponseV3 {
    const COMMAND_ID: CommandId = CommandId::SubmitResp;

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

    fn sample_v2() -> SubmitRequestV2 {
        SubmitRequestV2 {
            pk_total: 1,
            pk_number: 1,
            registered_delivery: 1,
            msg_level: 1,
            service_id: "test".to_string(),
            fee_user_type: 2,
            fee_terminal_id: "13500002696".to_string(),
            msg_fmt: 8,
            msg_src: "900001".to_string(),
            fee_type: "02".to_string(),
            fee_code: "10".to_string(),
            valid_time: "151105131555101+".to_string(),
            src_id: "900001".to_string(),
            dest_terminal_ids: vec!["13500002696".to_string(), "13600002696".to_string()],
            msg_content: "你好".encode_utf16().flat_map(u16::to_be_bytes).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_submit_v2_roundtrip() {
        let pkt = sample_v2();
        let bytes = pkt.encode(17).unwrap();

        // 12 header + 126 fixed + 21 * 2 receivers + 4 content
        assert_eq!(bytes.len(), 12 + 126 + 42 + 4);
        assert_eq!(&bytes[0..4], &(bytes.len() as u32).to_be_bytes());

        let decoded = SubmitRequestV2::decode(&bytes[8..]).unwrap();
        assert_eq!(decoded, SubmitRequestV2 { seq_id: 17, ..pkt });
    }

    #[test]
    fn test_submit_v3_roundtrip() {
        let pkt = SubmitRequestV3 {
            fee_terminal_id: "13500002696".to_string(),
            fee_terminal_type: 0,
            dest_terminal_ids: vec!["13500002696".to_string()],
            dest_terminal_type: 1,
            msg_content: b"hello".to_vec(),
            link_id: "link-0001".to_string(),
            ..Default::default()
        };
        let bytes = pkt.encode(3).unwrap();

        // 12 header + 151 fixed + 32 receiver + 5 content
        assert_eq!(bytes.len(), 12 + 151 + 32 + 5);

        let decoded = SubmitRequestV3::decode(&bytes[8..]).unwrap();
        assert_eq!(decoded, SubmitRequestV3 { seq_id: 3, ..pkt });
    }

    #[test]
    fn test_submit_rejects_oversized_fields() {
        let mut pkt = sample_v2();
        pkt.msg_content = vec![0u8; 256];
        assert!(matches!(
            pkt.encode(0),
            Err(PacketError::FieldTooLong { field: "msg_content", max: 255, actual: 256 })
        ));

        let mut pkt = sample_v2();
        pkt.dest_terminal_ids = vec!["1".repeat(22)];
        assert!(matches!(
            pkt.encode(0),
            Err(PacketError::FieldTooLong { field: "dest_terminal_id", max: 21, .. })
        ));
    }

    #[test]
    fn test_submit_truncated_body() {
        let bytes = sample_v2().encode(1).unwrap();
        let cut = &bytes[8..bytes.len() - 3];
        assert!(matches!(
            SubmitRequestV2::decode(cut),
            Err(PacketError::UnexpectedEof { field: "reserve", .. })
        ));
    }

    #[test]
    fn test_submit_responses() {
        let v2 = SubmitResponseV2 { seq_id: 0, msg_id: 0x0102_0304_0506_0708, result: 9 }
            .encode(4)
            .unwrap();
        assert_eq!(hex::encode(&v2), "000000158000000400000004010203040506070809");

        let v3 = SubmitResponseV3 { seq_id: 0, msg_id: 1, result: 9 }.encode(4).unwrap();
        assert_eq!(v3.len(), 24);
        assert_eq!(
            SubmitResponseV3::decode(&v3[8..]).unwrap(),
            SubmitResponseV3 { seq_id: 4, msg_id: 1, result: 9 }
        );
    }
}
