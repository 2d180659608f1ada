//! CMPP packet kinds and the version-aware dispatch table.
//!
//! Every packet kind the connection layer can receive is a concrete struct
//! implementing [`Packer`]. [`Packet`] is the closed sum of those structs
//! and [`PacketKind::resolve`] is the single place that maps a
//! `(ProtocolVersion, Command_Id)` pair onto a kind.
//!
//! ```text
//! Command_Id               2.0 / 2.1             3.0
//! ---------------------    ------------------    ------------------
//! CMPP_CONNECT             ConnectRequest        ConnectRequest
//! CMPP_CONNECT_RESP        ConnectResponseV2     ConnectResponseV3
//! CMPP_TERMINATE(_RESP)    Terminate*            Terminate*
//! CMPP_SUBMIT(_RESP)       Submit*V2             Submit*V3
//! CMPP_DELIVER(_RESP)      Deliver*V2            Deliver*V3
//! CMPP_FWD(_RESP)          Forward*V2            Forward*V3
//! CMPP_ACTIVE_TEST(_RESP)  ActiveTest*           ActiveTest*
//! ```

mod codec;
mod command;
mod connect;
mod deliver;
mod forward;
mod session;
mod submit;

pub use command::{CommandId, is_valid_command_id};
pub use connect::{ConnectRequest, ConnectResponseV2, ConnectResponseV3};
pub use deliver::{
    DeliverRequestV2, DeliverRequestV3, DeliverResponseV2, DeliverResponseV3, DeliveryReport,
};
pub use forward::{ForwardRequestV2, ForwardRequestV3, ForwardResponseV2, ForwardResponseV3};
pub use session::{ActiveTestRequest, ActiveTestResponse, TerminateRequest, TerminateResponse};
pub use submit::{SubmitRequestV2, SubmitRequestV3, SubmitResponseV2, SubmitResponseV3};

use crate::core::{Encode, Packer, PacketResult, ProtocolVersion};

/// The concrete packet layout a frame decodes into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PacketKind {
    /// CMPP_CONNECT (all versions).
    ConnectRequest,
    /// CMPP_CONNECT_RESP, 2.x layout.
    ConnectResponseV2,
    /// CMPP_CONNECT_RESP, 3.0 layout.
    ConnectResponseV3,
    /// CMPP_TERMINATE.
    TerminateRequest,
    /// CMPP_TERMINATE_RESP.
    TerminateResponse,
    /// CMPP_SUBMIT, 2.x layout.
    SubmitRequestV2,
    /// CMPP_SUBMIT, 3.0 layout.
    SubmitRequestV3,
    /// CMPP_SUBMIT_RESP, 2.x layout.
    SubmitResponseV2,
    /// CMPP_SUBMIT_RESP, 3.0 layout.
    SubmitResponseV3,
    /// CMPP_DELIVER, 2.x layout.
    DeliverRequestV2,
    /// CMPP_DELIVER, 3.0 layout.
    DeliverRequestV3,
    /// CMPP_DELIVER_RESP, 2.x layout.
    DeliverResponseV2,
    /// CMPP_DELIVER_RESP, 3.0 layout.
    DeliverResponseV3,
    /// CMPP_FWD, 2.x layout.
    ForwardRequestV2,
    /// CMPP_FWD, 3.0 layout.
    ForwardRequestV3,
    /// CMPP_FWD_RESP, 2.x layout.
    ForwardResponseV2,
    /// CMPP_FWD_RESP, 3.0 layout.
    ForwardResponseV3,
    /// CMPP_ACTIVE_TEST.
    ActiveTestRequest,
    /// CMPP_ACTIVE_TEST_RESP.
    ActiveTestResponse,
}

impl PacketKind {
    /// Select the layout for a Command_Id on a connection of `version`.
    ///
    /// Returns `None` for commands outside the dispatch table, including
    /// defined commands such as CMPP_QUERY that this layer does not decode.
    pub fn resolve(version: ProtocolVersion, command_id: u32) -> Option<Self> {
        let v3 = version.is_v3();
        let pick = |v2_kind, v3_kind| if v3 { v3_kind } else { v2_kind };

        let kind = match CommandId::from_u32(command_id)? {
            CommandId::Connect => Self::ConnectRequest,
            CommandId::ConnectResp => pick(Self::ConnectResponseV2, Self::ConnectResponseV3),
            CommandId::Terminate => Self::TerminateRequest,
            CommandId::TerminateResp => Self::TerminateResponse,
            CommandId::Submit => pick(Self::SubmitRequestV2, Self::SubmitRequestV3),
            CommandId::SubmitResp => pick(Self::SubmitResponseV2, Self::SubmitResponseV3),
            CommandId::Deliver => pick(Self::DeliverRequestV2, Self::DeliverRequestV3),
            CommandId::DeliverResp => pick(Self::DeliverResponseV2, Self::DeliverResponseV3),
            CommandId::Fwd => pick(Self::ForwardRequestV2, Self::ForwardRequestV3),
            CommandId::FwdResp => pick(Self::ForwardResponseV2, Self::ForwardResponseV3),
            CommandId::ActiveTest => Self::ActiveTestRequest,
            CommandId::ActiveTestResp => Self::ActiveTestResponse,
            _ => return None,
        };
        Some(kind)
    }

    /// Command_Id this kind is sent with.
    pub fn command_id(self) -> CommandId {
        match self {
            Self::ConnectRequest => ConnectRequest::COMMAND_ID,
            Self::ConnectResponseV2 => ConnectResponseV2::COMMAND_ID,
            Self::ConnectResponseV3 => ConnectResponseV3::COMMAND_ID,
            Self::TerminateRequest => TerminateRequest::COMMAND_ID,
            Self::TerminateResponse => TerminateResponse::COMMAND_ID,
            Self::SubmitRequestV2 => SubmitRequestV2::COMMAND_ID,
            Self::SubmitRequestV3 => SubmitRequestV3::COMMAND_ID,
            Self::SubmitResponseV2 => SubmitResponseV2::COMMAND_ID,
            Self::SubmitResponseV3 => SubmitResponseV3::COMMAND_ID,
            Self::DeliverRequestV2 => DeliverRequestV2::COMMAND_ID,
            Self::DeliverRequestV3 => DeliverRequestV3::COMMAND_ID,
            Self::DeliverResponseV2 => DeliverResponseV2::COMMAND_ID,
            Self::DeliverResponseV3 => DeliverResponseV3::COMMAND_ID,
            Self::ForwardRequestV2 => ForwardRequestV2::COMMAND_ID,
            Self::ForwardRequestV3 => ForwardRequestV3::COMMAND_ID,
            Self::ForwardResponseV2 => ForwardResponseV2::COMMAND_ID,
            Self::ForwardResponseV3 => ForwardResponseV3::COMMAND_ID,
            Self::ActiveTestRequest => ActiveTestRequest::COMMAND_ID,
            Self::ActiveTestResponse => ActiveTestResponse::COMMAND_ID,
        }
    }
}

/// A decoded (or ready-to-send) CMPP packet of any supported kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Packet {
    /// CMPP_CONNECT.
    ConnectRequest(ConnectRequest),
    /// CMPP_CONNECT_RESP (2.x).
    ConnectResponseV2(ConnectResponseV2),
    /// CMPP_CONNECT_RESP (3.0).
    ConnectResponseV3(ConnectResponseV3),
    /// CMPP_TERMINATE.
    TerminateRequest(TerminateRequest),
    /// CMPP_TERMINATE_RESP.
    TerminateResponse(TerminateResponse),
    /// CMPP_SUBMIT (2.x).
    SubmitRequestV2(SubmitRequestV2),
    /// CMPP_SUBMIT (3.0).
    SubmitRequestV3(SubmitRequestV3),
    /// CMPP_SUBMIT_RESP (2.x).
    SubmitResponseV2(SubmitResponseV2),
    /// CMPP_SUBMIT_RESP (3.0).
    SubmitResponseV3(SubmitResponseV3),
    /// CMPP_DELIVER (2.x).
    DeliverRequestV2(DeliverRequestV2),
    /// CMPP_DELIVER (3.0).
    DeliverRequestV3(DeliverRequestV3),
    /// CMPP_DELIVER_RESP (2.x).
    DeliverResponseV2(DeliverResponseV2),
    /// CMPP_DELIVER_RESP (3.0).
    DeliverResponseV3(DeliverResponseV3),
    /// CMPP_FWD (2.x).
    ForwardRequestV2(ForwardRequestV2),
    /// CMPP_FWD (3.0).
    ForwardRequestV3(ForwardRequestV3),
    /// CMPP_FWD_RESP (2.x).
    ForwardResponseV2(ForwardResponseV2),
    /// CMPP_FWD_RESP (3.0).
    ForwardResponseV3(ForwardResponseV3),
    /// CMPP_ACTIVE_TEST.
    ActiveTestRequest(ActiveTestRequest),
    /// CMPP_ACTIVE_TEST_RESP.
    ActiveTestResponse(ActiveTestResponse),
}

/// Expands `$body` once per variant with `$p` bound to the inner struct.
macro_rules! for_each_variant {
    ($packet:expr, $p:ident => $body:expr) => {
        match $packet {
            Packet::ConnectRequest($p) => $body,
            Packet::ConnectResponseV2($p) => $body,
            Packet::ConnectResponseV3($p) => $body,
            Packet::TerminateRequest($p) => $body,
            Packet::TerminateResponse($p) => $body,
            Packet::SubmitRequestV2($p) => $body,
            Packet::SubmitRequestV3($p) => $body,
            Packet::SubmitResponseV2($p) => $body,
            Packet::SubmitResponseV3($p) => $body,
            Packet::DeliverRequestV2($p) => $body,
            Packet::DeliverRequestV3($p) => $body,
            Packet::DeliverResponseV2($p) => $body,
            Packet::DeliverResponseV3($p) => $body,
            Packet::ForwardRequestV2($p) => $body,
            Packet::ForwardRequestV3($p) => $body,
            Packet::ForwardResponseV2($p) => $body,
            Packet::ForwardResponseV3($p) => $body,
            Packet::ActiveTestRequest($p) => $body,
            Packet::ActiveTestResponse($p) => $body,
        }
    };
}

impl Packet {
    /// Decode a frame body (starting at Sequence_Id) as `kind`.
    ///
    /// Format errors from the packet are returned unchanged.
    pub fn decode(kind: PacketKind, body: &[u8]) -> PacketResult<Self> {
        Ok(match kind {
            PacketKind::ConnectRequest => Self::ConnectRequest(Packer::decode(body)?),
            PacketKind::ConnectResponseV2 => Self::ConnectResponseV2(Packer::decode(body)?),
            PacketKind::ConnectResponseV3 => Self::ConnectResponseV3(Packer::decode(body)?),
            PacketKind::TerminateRequest => Self::TerminateRequest(Packer::decode(body)?),
            PacketKind::TerminateResponse => Self::TerminateResponse(Packer::decode(body)?),
            PacketKind::SubmitRequestV2 => Self::SubmitRequestV2(Packer::decode(body)?),
            PacketKind::SubmitRequestV3 => Self::SubmitRequestV3(Packer::decode(body)?),
            PacketKind::SubmitResponseV2 => Self::SubmitResponseV2(Packer::decode(body)?),
            PacketKind::SubmitResponseV3 => Self::SubmitResponseV3(Packer::decode(body)?),
            PacketKind::DeliverRequestV2 => Self::DeliverRequestV2(Packer::decode(body)?),
            PacketKind::DeliverRequestV3 => Self::DeliverRequestV3(Packer::decode(body)?),
            PacketKind::DeliverResponseV2 => Self::DeliverResponseV2(Packer::decode(body)?),
            PacketKind::DeliverResponseV3 => Self::DeliverResponseV3(Packer::decode(body)?),
            PacketKind::ForwardRequestV2 => Self::ForwardRequestV2(Packer::decode(body)?),
            PacketKind::ForwardRequestV3 => Self::ForwardRequestV3(Packer::decode(body)?),
            PacketKind::ForwardResponseV2 => Self::ForwardResponseV2(Packer::decode(body)?),
            PacketKind::ForwardResponseV3 => Self::ForwardResponseV3(Packer::decode(body)?),
            PacketKind::ActiveTestRequest => Self::ActiveTestRequest(Packer::decode(body)?),
            PacketKind::ActiveTestResponse => Self::ActiveTestResponse(Packer::decode(body)?),
        })
    }

    /// Encode as a full frame with `seq_id` as Sequence_Id.
    pub fn encode(&self, seq_id: u32) -> PacketResult<Vec<u8>> {
        for_each_variant!(self, p => p.encode(seq_id))
    }

    /// Sequence_Id carried by this packet.
    pub fn seq_id(&self) -> u32 {
        for_each_variant!(self, p => p.seq_id())
    }

    /// Which layout this packet uses.
    pub fn kind(&self) -> PacketKind {
        match self {
            Self::ConnectRequest(_) => PacketKind::ConnectRequest,
            Self::ConnectResponseV2(_) => PacketKind::ConnectResponseV2,
            Self::ConnectResponseV3(_) => PacketKind::ConnectResponseV3,
            Self::TerminateRequest(_) => PacketKind::TerminateRequest,
            Self::TerminateResponse(_) => PacketKind::TerminateResponse,
            Self::SubmitRequestV2(_) => PacketKind::SubmitRequestV2,
            Self::SubmitRequestV3(_) => PacketKind::SubmitRequestV3,
            Self::SubmitResponseV2(_) => PacketKind::SubmitResponseV2,
            Self::SubmitResponseV3(_) => PacketKind::SubmitResponseV3,
            Self::DeliverRequestV2(_) => PacketKind::DeliverRequestV2,
            Self::DeliverRequestV3(_) => PacketKind::DeliverRequestV3,
            Self::DeliverResponseV2(_) => PacketKind::DeliverResponseV2,
            Self::DeliverResponseV3(_) => PacketKind::DeliverResponseV3,
            Self::ForwardRequestV2(_) => PacketKind::ForwardRequestV2,
            Self::ForwardRequestV3(_) => PacketKind::ForwardRequestV3,
            Self::ForwardResponseV2(_) => PacketKind::ForwardResponseV2,
            Self::ForwardResponseV3(_) => PacketKind::ForwardResponseV3,
            Self::ActiveTestRequest(_) => PacketKind::ActiveTestRequest,
            Self::ActiveTestResponse(_) => PacketKind::ActiveTestResponse,
        }
    }

    /// Command_Id this packet is sent with.
    pub fn command_id(&self) -> CommandId {
        self.kind().command_id()
    }
}

impl Encode for Packet {
    fn encode_frame(&self, seq_id: u32) -> PacketResult<Vec<u8>> {
        self.encode(seq_id)
    }
}

macro_rules! impl_from_packet {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for Packet {
                fn from(p: $variant) -> Self {
                    Packet::$variant(p)
                }
            }
        )*
    };
}

impl_from_packet!(
    ConnectRequest,
    ConnectResponseV2,
    ConnectResponseV3,
    TerminateRequest,
    TerminateResponse,
    SubmitRequestV2,
    SubmitRequestV3,
    SubmitResponseV2,
    SubmitResponseV3,
    DeliverRequestV2,
    DeliverRequestV3,
    DeliverResponseV2,
    DeliverResponseV3,
    ForwardRequestV2,
    ForwardRequestV3,
    ForwardResponseV2,
    ForwardResponseV3,
    ActiveTestRequest,
    ActiveTestResponse,
);

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_VERSIONS: [ProtocolVersion; 3] =
        [ProtocolVersion::V20, ProtocolVersion::V21, ProtocolVersion::V30];

    #[test]
    fn test_resolve_version_independent_commands() {
        for version in ALL_VERSIONS {
            assert_eq!(
                PacketKind::resolve(version, CommandId::Connect.as_u32()),
                Some(PacketKind::ConnectRequest)
            );
            assert_eq!(
                PacketKind::resolve(version, CommandId::Terminate.as_u32()),
                Some(PacketKind::TerminateRequest)
            );
            assert_eq!(
                PacketKind::resolve(version, CommandId::TerminateResp.as_u32()),
                Some(PacketKind::TerminateResponse)
            );
            assert_eq!(
                PacketKind::resolve(version, CommandId::ActiveTest.as_u32()),
                Some(PacketKind::ActiveTestRequest)
            );
            assert_eq!(
                PacketKind::resolve(version, CommandId::ActiveTestResp.as_u32()),
                Some(PacketKind::ActiveTestResponse)
            );
        }
    }

    #[test]
    fn test_resolve_version_dependent_commands() {
        let cases = [
            (CommandId::ConnectResp, PacketKind::ConnectResponseV2, PacketKind::ConnectResponseV3),
            (CommandId::Submit, PacketKind::SubmitRequestV2, PacketKind::SubmitRequestV3),
            (CommandId::SubmitResp, PacketKind::SubmitResponseV2, PacketKind::SubmitResponseV3),
            (CommandId::Deliver, PacketKind::DeliverRequestV2, PacketKind::DeliverRequestV3),
            (CommandId::DeliverResp, PacketKind::DeliverResponseV2, PacketKind::DeliverResponseV3),
            (CommandId::Fwd, PacketKind::ForwardRequestV2, PacketKind::ForwardRequestV3),
            (CommandId::FwdResp, PacketKind::ForwardResponseV2, PacketKind::ForwardResponseV3),
        ];

        for (cmd, v2, v3) in cases {
            assert_eq!(PacketKind::resolve(ProtocolVersion::V20, cmd.as_u32()), Some(v2));
            assert_eq!(PacketKind::resolve(ProtocolVersion::V21, cmd.as_u32()), Some(v2));
            assert_eq!(PacketKind::resolve(ProtocolVersion::V30, cmd.as_u32()), Some(v3));
            assert_eq!(v2.command_id(), cmd);
            assert_eq!(v3.command_id(), cmd);
        }
    }

    #[test]
    fn test_resolve_outside_table() {
        for version in ALL_VERSIONS {
            // Defined by the protocol but not dispatched.
            assert_eq!(PacketKind::resolve(version, CommandId::Query.as_u32()), None);
            assert_eq!(PacketKind::resolve(version, CommandId::CancelResp.as_u32()), None);
            assert_eq!(PacketKind::resolve(version, CommandId::GetMoRoute.as_u32()), None);
            // In range, but unassigned.
            assert_eq!(PacketKind::resolve(version, 0x0000_0003), None);
        }
    }

    #[test]
    fn test_packet_accessors() {
        let pkt = Packet::from(SubmitResponseV3 { seq_id: 12, msg_id: 1, result: 0 });
        assert_eq!(pkt.kind(), PacketKind::SubmitResponseV3);
        assert_eq!(pkt.command_id(), CommandId::SubmitResp);
        assert_eq!(pkt.seq_id(), 12);

        let bytes = pkt.encode(12).unwrap();
        let decoded = Packet::decode(pkt.kind(), &bytes[8..]).unwrap();
        assert_eq!(decoded, pkt);
    }

    mod roundtrip {
        use super::*;
        use crate::core::{
            CMPP2_TERMINAL_ID_LEN, CMPP3_TERMINAL_ID_LEN, FEE_CODE_LEN, FEE_TYPE_LEN, LINK_ID_LEN,
            NODE_ID_LEN, PSEUDO_LEN, RESERVE_LEN, SERVICE_ID_LEN, SOURCE_ADDR_LEN, SRC_ID_LEN,
            TIME_LEN,
        };
        use crate::transport::decode_frame;
        use proptest::collection::vec;
        use proptest::prelude::*;
        use proptest::strategy::Union;

        /// Printable field value that fits `width` octets.
        fn text(width: usize) -> impl Strategy<Value = String> {
            proptest::string::string_regex(&format!("[0-9A-Za-z]{{0,{width}}}")).unwrap()
        }

        fn terminals(width: usize) -> impl Strategy<Value = Vec<String>> {
            vec(text(width), 0..=8)
        }

        fn content() -> impl Strategy<Value = Vec<u8>> {
            vec(any::<u8>(), 0..=255)
        }

        prop_compose! {
            fn connect_request()(
                seq_id in any::<u32>(),
                source_addr in text(SOURCE_ADDR_LEN),
                authenticator_source in any::<[u8; 16]>(),
                version in any::<u8>(),
                timestamp in any::<u32>()
            ) -> ConnectRequest {
                ConnectRequest { seq_id, source_addr, authenticator_source, version, timestamp }
            }
        }

        prop_compose! {
            fn connect_response_v2()(
                seq_id in any::<u32>(),
                status in any::<u8>(),
                authenticator_ismg in any::<[u8; 16]>(),
                version in any::<u8>()
            ) -> ConnectResponseV2 {
                ConnectResponseV2 { seq_id, status, authenticator_ismg, version }
            }
        }

        prop_compose! {
            fn connect_response_v3()(
                seq_id in any::<u32>(),
                status in any::<u32>(),
                authenticator_ismg in any::<[u8; 16]>(),
                version in any::<u8>()
            ) -> ConnectResponseV3 {
                ConnectResponseV3 { seq_id, status, authenticator_ismg, version }
            }
        }

        prop_compose! {
            fn submit_request_v2()(
                seq_id in any::<u32>(),
                msg_id in any::<u64>(),
                flags in any::<[u8; 8]>(),
                names in (
                    text(SERVICE_ID_LEN),
                    text(CMPP2_TERMINAL_ID_LEN),
                    text(NODE_ID_LEN),
                    text(FEE_TYPE_LEN),
                    text(FEE_CODE_LEN),
                ),
                times in (text(TIME_LEN), text(TIME_LEN), text(SRC_ID_LEN), text(RESERVE_LEN)),
                dest_terminal_ids in terminals(CMPP2_TERMINAL_ID_LEN),
                msg_content in content()
            ) -> SubmitRequestV2 {
                let (service_id, fee_terminal_id, msg_src, fee_type, fee_code) = names;
                let (valid_time, at_time, src_id, reserve) = times;
                SubmitRequestV2 {
                    seq_id,
                    msg_id,
                    pk_total: flags[0],
                    pk_number: flags[1],
                    registered_delivery: flags[2],
                    msg_level: flags[3],
                    service_id,
                    fee_user_type: flags[4],
                    fee_terminal_id,
                    tp_pid: flags[5],
                    tp_udhi: flags[6],
                    msg_fmt: flags[7],
                    msg_src,
                    fee_type,
                    fee_code,
                    valid_time,
                    at_time,
                    src_id,
                    dest_terminal_ids,
                    msg_content,
                    reserve,
                }
            }
        }

        prop_compose! {
            fn submit_request_v3()(
                seq_id in any::<u32>(),
                msg_id in any::<u64>(),
                flags in any::<[u8; 10]>(),
                names in (
                    text(SERVICE_ID_LEN),
                    text(CMPP3_TERMINAL_ID_LEN),
                    text(NODE_ID_LEN),
                    text(FEE_TYPE_LEN),
                    text(FEE_CODE_LEN),
                ),
                times in (text(TIME_LEN), text(TIME_LEN), text(SRC_ID_LEN), text(LINK_ID_LEN)),
                dest_terminal_ids in terminals(CMPP3_TERMINAL_ID_LEN),
                msg_content in content()
            ) -> SubmitRequestV3 {
                let (service_id, fee_terminal_id, msg_src, fee_type, fee_code) = names;
                let (valid_time, at_time, src_id, link_id) = times;
                SubmitRequestV3 {
                    seq_id,
                    msg_id,
                    pk_total: flags[0],
                    pk_number: flags[1],
                    registered_delivery: flags[2],
                    msg_level: flags[3],
                    service_id,
                    fee_user_type: flags[4],
                    fee_terminal_id,
                    fee_terminal_type: flags[5],
                    tp_pid: flags[6],
                    tp_udhi: flags[7],
                    msg_fmt: flags[8],
                    msg_src,
                    fee_type,
                    fee_code,
                    valid_time,
                    at_time,
                    src_id,
                    dest_terminal_ids,
                    dest_terminal_type: flags[9],
                    msg_content,
                    link_id,
                }
            }
        }

        prop_compose! {
            fn deliver_request_v2()(
                seq_id in any::<u32>(),
                msg_id in any::<u64>(),
                flags in any::<[u8; 4]>(),
                names in (
                    text(SRC_ID_LEN),
                    text(SERVICE_ID_LEN),
                    text(CMPP2_TERMINAL_ID_LEN),
                    text(RESERVE_LEN),
                ),
                msg_content in content()
            ) -> DeliverRequestV2 {
                let (dest_id, service_id, src_terminal_id, reserve) = names;
                DeliverRequestV2 {
                    seq_id,
                    msg_id,
                    dest_id,
                    service_id,
                    tp_pid: flags[0],
                    tp_udhi: flags[1],
                    msg_fmt: flags[2],
                    src_terminal_id,
                    registered_delivery: flags[3],
                    msg_content,
                    reserve,
                }
            }
        }

        prop_compose! {
            fn deliver_request_v3()(
                seq_id in any::<u32>(),
                msg_id in any::<u64>(),
                flags in any::<[u8; 5]>(),
                names in (
                    text(SRC_ID_LEN),
                    text(SERVICE_ID_LEN),
                    text(CMPP3_TERMINAL_ID_LEN),
                    text(LINK_ID_LEN),
                ),
                msg_content in content()
            ) -> DeliverRequestV3 {
                let (dest_id, service_id, src_terminal_id, link_id) = names;
                DeliverRequestV3 {
                    seq_id,
                    msg_id,
                    dest_id,
                    service_id,
                    tp_pid: flags[0],
                    tp_udhi: flags[1],
                    msg_fmt: flags[2],
                    src_terminal_id,
                    src_terminal_type: flags[3],
                    registered_delivery: flags[4],
                    msg_content,
                    link_id,
                }
            }
        }

        prop_compose! {
            fn forward_request_v2()(
                seq_id in any::<u32>(),
                msg_id in any::<u64>(),
                flags in any::<[u8; 11]>(),
                names in (
                    text(NODE_ID_LEN),
                    text(NODE_ID_LEN),
                    text(SERVICE_ID_LEN),
                    text(CMPP2_TERMINAL_ID_LEN),
                    text(NODE_ID_LEN),
                ),
                fees in (text(FEE_TYPE_LEN), text(FEE_CODE_LEN)),
                times in (text(TIME_LEN), text(TIME_LEN), text(SRC_ID_LEN), text(RESERVE_LEN)),
                dest_ids in terminals(CMPP2_TERMINAL_ID_LEN),
                msg_content in content()
            ) -> ForwardRequestV2 {
                let (source_id, destination_id, service_id, fee_terminal_id, msg_src) = names;
                let (fee_type, fee_code) = fees;
                let (valid_time, at_time, src_id, reserve) = times;
                ForwardRequestV2 {
                    seq_id,
                    source_id,
                    destination_id,
                    nodes_count: flags[0],
                    msg_fwd_type: flags[1],
                    msg_id,
                    pk_total: flags[2],
                    pk_number: flags[3],
                    registered_delivery: flags[4],
                    msg_level: flags[5],
                    service_id,
                    fee_user_type: flags[6],
                    fee_terminal_id,
                    tp_pid: flags[7],
                    tp_udhi: flags[8],
                    msg_fmt: flags[9],
                    msg_src,
                    fee_type,
                    fee_code,
                    valid_time,
                    at_time,
                    src_id,
                    dest_ids,
                    msg_content,
                    reserve,
                }
            }
        }

        prop_compose! {
            fn forward_request_v3()(
                seq_id in any::<u32>(),
                msg_id in any::<u64>(),
                flags in any::<[u8; 15]>(),
                names in (
                    text(NODE_ID_LEN),
                    text(NODE_ID_LEN),
                    text(SERVICE_ID_LEN),
                    text(CMPP2_TERMINAL_ID_LEN),
                    text(PSEUDO_LEN),
                    text(NODE_ID_LEN),
                ),
                fees in (text(FEE_TYPE_LEN), text(FEE_CODE_LEN)),
                times in (text(TIME_LEN), text(TIME_LEN), text(SRC_ID_LEN), text(PSEUDO_LEN)),
                tail in (text(PSEUDO_LEN), text(LINK_ID_LEN)),
                dest_ids in terminals(CMPP2_TERMINAL_ID_LEN),
                msg_content in content()
            ) -> ForwardRequestV3 {
                let (source_id, destination_id, service_id, fee_terminal_id, fee_terminal_pseudo, msg_src) =
                    names;
                let (fee_type, fee_code) = fees;
                let (valid_time, at_time, src_id, src_pseudo) = times;
                let (dest_pseudo, link_id) = tail;
                ForwardRequestV3 {
                    seq_id,
                    source_id,
                    destination_id,
                    nodes_count: flags[0],
                    msg_fwd_type: flags[1],
                    msg_id,
                    pk_total: flags[2],
                    pk_number: flags[3],
                    registered_delivery: flags[4],
                    msg_level: flags[5],
                    service_id,
                    fee_user_type: flags[6],
                    fee_terminal_id,
                    fee_terminal_pseudo,
                    fee_terminal_user_type: flags[7],
                    tp_pid: flags[8],
                    tp_udhi: flags[9],
                    msg_fmt: flags[10],
                    msg_src,
                    fee_type,
                    fee_code,
                    valid_time,
                    at_time,
                    src_id,
                    src_pseudo,
                    src_user_type: flags[11],
                    src_type: flags[12],
                    dest_ids,
                    dest_pseudo,
                    dest_user_type: flags[13],
                    msg_content,
                    link_id,
                }
            }
        }

        /// Any structurally valid packet of any dispatched kind.
        fn any_packet() -> impl Strategy<Value = Packet> {
            let seq = any::<u32>;
            Union::new(vec![
                connect_request().prop_map(Packet::from).boxed(),
                connect_response_v2().prop_map(Packet::from).boxed(),
                connect_response_v3().prop_map(Packet::from).boxed(),
                seq().prop_map(|seq_id| Packet::from(TerminateRequest { seq_id })).boxed(),
                seq().prop_map(|seq_id| Packet::from(TerminateResponse { seq_id })).boxed(),
                submit_request_v2().prop_map(Packet::from).boxed(),
                submit_request_v3().prop_map(Packet::from).boxed(),
                (seq(), any::<u64>(), any::<u8>())
                    .prop_map(|(seq_id, msg_id, result)| {
                        Packet::from(SubmitResponseV2 { seq_id, msg_id, result })
                    })
                    .boxed(),
                (seq(), any::<u64>(), any::<u32>())
                    .prop_map(|(seq_id, msg_id, result)| {
                        Packet::from(SubmitResponseV3 { seq_id, msg_id, result })
                    })
                    .boxed(),
                deliver_request_v2().prop_map(Packet::from).boxed(),
                deliver_request_v3().prop_map(Packet::from).boxed(),
                (seq(), any::<u64>(), any::<u8>())
                    .prop_map(|(seq_id, msg_id, result)| {
                        Packet::from(DeliverResponseV2 { seq_id, msg_id, result })
                    })
                    .boxed(),
                (seq(), any::<u64>(), any::<u32>())
                    .prop_map(|(seq_id, msg_id, result)| {
                        Packet::from(DeliverResponseV3 { seq_id, msg_id, result })
                    })
                    .boxed(),
                forward_request_v2().prop_map(Packet::from).boxed(),
                forward_request_v3().prop_map(Packet::from).boxed(),
                (seq(), any::<u64>(), any::<[u8; 3]>())
                    .prop_map(|(seq_id, msg_id, b)| {
                        Packet::from(ForwardResponseV2 {
                            seq_id,
                            msg_id,
                            pk_total: b[0],
                            pk_number: b[1],
                            result: b[2],
                        })
                    })
                    .boxed(),
                (seq(), any::<u64>(), any::<[u8; 2]>(), any::<u32>())
                    .prop_map(|(seq_id, msg_id, b, result)| {
                        Packet::from(ForwardResponseV3 {
                            seq_id,
                            msg_id,
                            pk_total: b[0],
                            pk_number: b[1],
                            result,
                        })
                    })
                    .boxed(),
                seq().prop_map(|seq_id| Packet::from(ActiveTestRequest { seq_id })).boxed(),
                (seq(), any::<u8>())
                    .prop_map(|(seq_id, reserved)| {
                        Packet::from(ActiveTestResponse { seq_id, reserved })
                    })
                    .boxed(),
            ])
        }

        proptest! {
            #[test]
            fn test_body_roundtrip(packet in any_packet()) {
                let bytes = packet.encode(packet.seq_id()).unwrap();
                let decoded = Packet::decode(packet.kind(), &bytes[8..]).unwrap();
                prop_assert_eq!(decoded, packet);
            }

            #[test]
            fn test_frame_roundtrip_on_matching_versions(packet in any_packet()) {
                let bytes = packet.encode(packet.seq_id()).unwrap();
                let raw_command = packet.command_id().as_u32();

                let mut matched = 0;
                for version in ALL_VERSIONS {
                    if PacketKind::resolve(version, raw_command) != Some(packet.kind()) {
                        continue;
                    }
                    matched += 1;
                    let (decoded, used) = decode_frame(version, &bytes).unwrap();
                    prop_assert_eq!(used, bytes.len());
                    prop_assert_eq!(&decoded, &packet);
                }
                prop_assert!(matched > 0, "{:?} is reachable from no version", packet.kind());
            }
        }
    }
}
