//! CMPP_FWD and CMPP_FWD_RESP: gateway-to-gateway message forwarding.

use super::codec::{PacketReader, PacketWriter};
use super::CommandId;
use crate::core::{
    CMPP2_TERMINAL_ID_LEN, FEE_CODE_LEN, FEE_TYPE_LEN, LINK_ID_LEN, NODE_ID_LEN, PSEUDO_LEN,
    Packer, PacketResult, RESERVE_LEN, SERVICE_ID_LEN, SRC_ID_LEN, TIME_LEN,
};

/// Message forwarded between ISMGs (CMPP 2.x).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ForwardRequestV2 {
    /// Sequence_Id (set on decode).
    pub seq_id: u32,
    /// Source_Id: originating ISMG.
    pub source_id: String,
    /// Destination_Id: next-hop ISMG.
    pub destination_id: String,
    /// NodesCount: hops taken so far.
    pub nodes_count: u8,
    /// Msg_Fwd_Type: 0 MT, 1 MO, 2 MT report, 3 MO report.
    pub msg_fwd_type: u8,
    /// Msg_Id.
    pub msg_id: u64,
    /// Pk_total.
    pub pk_total: u8,
    /// Pk_number.
    pub pk_number: u8,
    /// Registered_Delivery.
    pub registered_delivery: u8,
    /// Msg_level.
    pub msg_level: u8,
    /// Service_Id.
    pub service_id: String,
    /// Fee_UserType.
    pub fee_user_type: u8,
    /// Fee_terminal_Id.
    pub fee_terminal_id: String,
    /// TP_pid.
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
    /// Valid_Time.
    pub valid_time: String,
    /// At_Time.
    pub at_time: String,
    /// Src_Id.
    pub src_id: String,
    /// Dest_Id list (DestUsr_tl is its length).
    pub dest_ids: Vec<String>,
    /// Msg_Content (Msg_Length is its length).
    pub msg_content: Vec<u8>,
    /// Reserve.
    pub reserve: String,
}

impl Packer for ForwardRequestV2 {
    const COMMAND_ID: CommandId = CommandId::Fwd;

    fn encode(&self, seq_id: u32) -> PacketResult<Vec<u8>> {
        let body_len =
            140 + self.dest_ids.len() * CMPP2_TERMINAL_ID_LEN + self.msg_content.len();
        let mut w = PacketWriter::new(Self::COMMAND_ID, seq_id, body_len);
        w.put_str("source_id", &self.source_id, NODE_ID_LEN)?;
        w.put_str("destination_id", &self.destination_id, NODE_ID_LEN)?;
        w.put_u8(self.nodes_count);
        w.put_u8(self.msg_fwd_type);
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
        w.put_str_list("dest_id", &self.dest_ids, CMPP2_TERMINAL_ID_LEN)?;
        w.put_content(&self.msg_content)?;
        w.put_str("reserve", &self.reserve, RESERVE_LEN)?;
        Ok(w.finish())
    }

    fn decode(body: &[u8]) -> PacketResult<Self> {
        let mut r = PacketReader::new(body);
        let pkt = Self {
            seq_id: r.get_u32("seq_id")?,
            source_id: r.get_str("source_id", NODE_ID_LEN)?,
            destination_id: r.get_str("destination_id", NODE_ID_LEN)?,
            nodes_count: r.get_u8("nodes_count")?,
            msg_fwd_type: r.get_u8("msg_fwd_type")?,
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
            dest_ids: r.get_str_list("dest_id", CMPP2_TERMINAL_ID_LEN)?,
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

/// Message forwarded between ISMGs (CMPP 3.0).
///
/// Adds pseudo-code and user-type fields for the fee, source and
/// destination terminals, and swaps Reserve for LinkID.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ForwardRequestV3 {
    /// Sequence_Id (set on decode).
    pub seq_id: u32,
    /// Source_Id: originating ISMG.
    pub source_id: String,
    /// Destination_Id: next-hop ISMG.
    pub destination_id: String,
    /// NodesCount: hops taken so far.
    pub nodes_count: u8,
    /// Msg_Fwd_Type: 0 MT, 1 MO, 2 MT report, 3 MO report.
    pub msg_fwd_type: u8,
    /// Msg_Id.
    pub msg_id: u64,
    /// Pk_total.
    pub pk_total: u8,
    /// Pk_number.
    pub pk_number: u8,
    /// Registered_Delivery.
    pub registered_delivery: u8,
    /// Msg_level.
    pub msg_level: u8,
    /// Service_Id.
    pub service_id: String,
    /// Fee_UserType.
    pub fee_user_type: u8,
    /// Fee_terminal_Id.
    pub fee_terminal_id: String,
    /// Fee_terminal_pseudo.
    pub fee_terminal_pseudo: String,
    /// Fee_terminal_UserType.
    pub fee_terminal_user_type: u8,
    /// TP_pid.
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
    /// Valid_Time.
    pub valid_time: String,
    /// At_Time.
    pub at_time: String,
    /// Src_Id.
    pub src_id: String,
    /// Src_pseudo.
    pub src_pseudo: String,
    /// SrcUserType.
    pub src_user_type: u8,
    /// SrcType: 0 real number, 1 pseudo code.
    pub src_type: u8,
    /// Dest_Id list (DestUsr_tl is its length).
    pub dest_ids: Vec<String>,
    /// Dest_pseudo.
    pub dest_pseudo: String,
    /// DestUserType.
    pub dest_user_type: u8,
    /// Msg_Content (Msg_Length is its length).
    pub msg_content: Vec<u8>,
    /// LinkID.
    pub link_id: String,
}

impl Packer for ForwardRequestV3 {
    const COMMAND_ID: CommandId = CommandId::Fwd;

    fn encode(&self, seq_id: u32) -> PacketResult<Vec<u8>> {
        let body_len =
            252 + self.dest_ids.len() * CMPP2_TERMINAL_ID_LEN + self.msg_content.len();
        let mut w = PacketWriter::new(Self::COMMAND_ID, seq_id, body_len);
        w.put_str("source_id", &self.source_id, NODE_ID_LEN)?;
        w.put_str("destination_id", &self.destination_id, NODE_ID_LEN)?;
        w.put_u8(self.nodes_count);
        w.put_u8(self.msg_fwd_type);
        w.put_u64(self.msg_id);
        w.put_u8(self.pk_total);
        w.put_u8(self.pk_number);
        w.put_u8(self.registered_delivery);
        w.put_u8(self.msg_level);
        w.put_str("service_id", &self.service_id, SERVICE_ID_LEN)?;
        w.put_u8(self.fee_user_type);
        w.put_str("fee_terminal_id", &self.fee_terminal_id, CMPP2_TERMINAL_ID_LEN)?;
        w.put_str("fee_terminal_pseudo", &self.fee_terminal_pseudo, PSEUDO_LEN)?;
        w.put_u8(self.fee_terminal_user_type);
        w.put_u8(self.tp_pid);
        w.put_u8(self.tp_udhi);
        w.put_u8(self.msg_fmt);
        w.put_str("msg_src", &self.msg_src, NODE_ID_LEN)?;
        w.put_str("fee_type", &self.fee_type, FEE_TYPE_LEN)?;
        w.put_str("fee_code", &self.fee_code, FEE_CODE_LEN)?;
        w.put_str("valid_time", &self.valid_time, TIME_LEN)?;
        w.put_str("at_time", &self.at_time, TIME_LEN)?;
        w.put_str("src_id", &self.src_id, SRC_ID_LEN)?;
        w.put_str("src_pseudo", &self.src_pseudo, PSEUDO_LEN)?;
        w.put_u8(self.src_user_type);
        w.put_u8(self.src_type);
        w.put_str_list("dest_id", &self.dest_ids, CMPP2_TERMINAL_ID_LEN)?;
        w.put_str("dest_pseudo", &self.dest_pseudo, PSEUDO_LEN)?;
        w.put_u8(self.dest_user_type);
        w.put_content(&self.msg_content)?;
        w.put_str("link_id", &self.link_id, LINK_ID_LEN)?;
        Ok(w.finish())
    }

    fn decode(body: &[u8]) -> PacketResult<Self> {
        let mut r = PacketReader::new(body);
        let pkt = Self {
            seq_id: r.get_u32("seq_id")?,
            source_id: r.get_str("source_id", NODE_ID_LEN)?,
            destination_id: r.get_str("destination_id", NODE_ID_LEN)?,
            nodes_count: r.get_u8("nodes_count")?,
            msg_fwd_type: r.get_u8("msg_fwd_type")?,
            msg_id: r.get_u64("msg_id")?,
            pk_total: r.get_u8("pk_total")?,
            pk_number: r.get_u8("pk_number")?,
            registered_delivery: r.get_u8("registered_delivery")?,
            msg_level: r.get_u8("msg_level")?,
            service_id: r.get_str("service_id", SERVICE_ID_LEN)?,
            fee_user_type: r.get_u8("fee_user_type")?,
            fee_terminal_id: r.get_str("fee_terminal_id", CMPP2_TERMINAL_ID_LEN)?,
            fee_terminal_pseudo: r.get_str("fee_terminal_pseudo", PSEUDO_LEN)?,
            fee_terminal_user_type: r.get_u8("fee_terminal_user_type")?,
            tp_pid: r.get_u8("tp_pid")?,
            tp_udhi: r.get_u8("tp_udhi")?,
            msg_fmt: r.get_u8("msg_fmt")?,
            msg_src: r.get_str("msg_src", NODE_ID_LEN)?,
            fee_type: r.get_str("fee_type", FEE_TYPE_LEN)?,
            fee_code: r.get_str("fee_code", FEE_CODE_LEN)?,
            valid_time: r.get_str("valid_time", TIME_LEN)?,
            at_time: r.get_str("at_time", TIME_LEN)?,
            src_id: r.get_str("src_id", SRC_ID_LEN)?,
            src_pseudo: r.get_str("src_pseudo", PSEUDO_LEN)?,
            src_user_type: r.get_u8("src_user_type")?,
            src_type: r.get_u8("src_type")?,
            dest_ids: r.get_str_list("dest_id", CMPP2_TERMINAL_ID_LEN)?,
            dest_pseudo: r.get_str("dest_pseudo", PSEUDO_LEN)?,
            dest_user_type: r.get_u8("dest_user_type")?,
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

/// Acknowledgement of a forward (CMPP 2.x).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ForwardResponseV2 {
    /// Sequence_Id (set on decode).
    pub seq_id: u32,
    /// Msg_Id of the acknowledged forward.
    pub msg_id: u64,
    /// Pk_total.
    pub pk_total: u8,
    /// Pk_number.
    pub pk_number: u8,
    /// Result, 0 on success.
    pub result: u8,
}

impl Packer for ForwardResponseV2 {
    const COMMAND_ID: CommandId = CommandId::FwdResp;

    fn encode(&self, seq_id: u32) -> PacketResult<Vec<u8>> {
        let mut w = PacketWriter::new(Self::COMMAND_ID, seq_id, 11);
        w.put_u64(self.msg_id);
        w.put_u8(self.pk_total);
        w.put_u8(self.pk_number);
        w.put_u8(self.result);
        Ok(w.finish())
    }

    fn decode(body: &[u8]) -> PacketResult<Self> {
        let mut r = PacketReader::new(body);
        let pkt = Self {
            seq_id: r.get_u32("seq_id")?,
            msg_id: r.get_u64("msg_id")?,
            pk_total: r.get_u8("pk_total")?,
            pk_number: r.get_u8("pk_number")?,
            result: r.get_u8("result")?,
        };
        r.finish()?;
        Ok(pkt)
    }

    fn seq_id(&self) -> u32 {
        self.seq_id
    }
}

/// Acknowledgement of a forward (CMPP 3.0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ForwardResponseV3 {
    /// Sequence_Id (set on decode).
    pub seq_id: u32,
    /// Msg_Id of the acknowledged forward.
    pub msg_id: u64,
    /// Pk_total.
    pub pk_total: u8,
    /// Pk_number.
    pub pk_number: u8,
    /// Result, 0 on success.
    pub result: u32,
}

impl Packer for ForwardResponseV3 {
    const COMMAND_ID: CommandId = CommandId::FwdResp;

    fn encode(&self, seq_id: u32) -> PacketResult<Vec<u8>> {
        let mut w = PacketWriter::new(Self::COMMAND_ID, seq_id, 14);
        w.put_u64(self.msg_id);
        w.put_u8(self.pk_total);
        w.put_u8(self.pk_number);
        w.put_u32(self.result);
        Ok(w.finish())
    }

    fn decode(body: &[u8]) -> PacketResult<Self> {
        let mut r = PacketReader::new(body);
        let pkt = Self {
            seq_id: r.get_u32("seq_id")?,
            msg_id: r.get_u64("msg_id")?,
            pk_total: r.get_u8("pk_total")?,
            pk_number: r.get_u8("pk_number")?,
            result: r.get_u32("result")?,
        };
        r.finish()?;
        Ok(pkt)
    }

    fn seq_id(&self) -> u32 {
        self.seq_id
    }
}
