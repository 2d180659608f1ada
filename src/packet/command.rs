//! Command identifiers.

use std::fmt;

use crate::core::{
    CMPP_REQUEST_MAX, CMPP_REQUEST_MIN, CMPP_RESPONSE_FLAG, CMPP_RESPONSE_MAX, CMPP_RESPONSE_MIN,
};

/// Every Command_Id defined by CMPP 2.x / 3.0.
///
/// Only a subset is dispatched by the connection layer (see
/// [`PacketKind`](super::PacketKind)); the rest are still recognised so they
/// can be reported by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum CommandId {
    /// CMPP_CONNECT.
    Connect = 0x0000_0001,
    /// CMPP_TERMINATE.
    Terminate = 0x0000_0002,
    /// CMPP_SUBMIT.
    Submit = 0x0000_0004,
    /// CMPP_DELIVER.
    Deliver = 0x0000_0005,
    /// CMPP_QUERY.
    Query = 0x0000_0006,
    /// CMPP_CANCEL.
    Cancel = 0x0000_0007,
    /// CMPP_ACTIVE_TEST.
    ActiveTest = 0x0000_0008,
    /// CMPP_FWD.
    Fwd = 0x0000_0009,
    /// CMPP_MT_ROUTE.
    MtRoute = 0x0000_0010,
    /// CMPP_MO_ROUTE.
    MoRoute = 0x0000_0011,
    /// CMPP_GET_MT_ROUTE.
    GetMtRoute = 0x0000_0012,
    /// CMPP_MT_ROUTE_UPDATE.
    MtRouteUpdate = 0x0000_0013,
    /// CMPP_MO_ROUTE_UPDATE.
    MoRouteUpdate = 0x0000_0014,
    /// CMPP_PUSH_MT_ROUTE_UPDATE.
    PushMtRouteUpdate = 0x0000_0015,
    /// CMPP_PUSH_MO_ROUTE_UPDATE.
    PushMoRouteUpdate = 0x0000_0016,
    /// CMPP_GET_MO_ROUTE.
    GetMoRoute = 0x0000_0017,

    /// CMPP_CONNECT_RESP.
    ConnectResp = 0x8000_0001,
    /// CMPP_TERMINATE_RESP.
    TerminateResp = 0x8000_0002,
    /// CMPP_SUBMIT_RESP.
    SubmitResp = 0x8000_0004,
    /// CMPP_DELIVER_RESP.
    DeliverResp = 0x8000_0005,
    /// CMPP_QUERY_RESP.
    QueryResp = 0x8000_0006,
    /// CMPP_CANCEL_RESP.
    CancelResp = 0x8000_0007,
    /// CMPP_ACTIVE_TEST_RESP.
    ActiveTestResp = 0x8000_0008,
    /// CMPP_FWD_RESP.
    FwdResp = 0x8000_0009,
    /// CMPP_MT_ROUTE_RESP.
    MtRouteResp = 0x8000_0010,
    /// CMPP_MO_ROUTE_RESP.
    MoRouteResp = 0x8000_0011,
    /// CMPP_GET_MT_ROUTE_RESP.
    GetMtRouteResp = 0x8000_0012,
    /// CMPP_MT_ROUTE_UPDATE_RESP.
    MtRouteUpdateResp = 0x8000_0013,
    /// CMPP_MO_ROUTE_UPDATE_RESP.
    MoRouteUpdateResp = 0x8000_0014,
    /// CMPP_PUSH_MT_ROUTE_UPDATE_RESP.
    PushMtRouteUpdateResp = 0x8000_0015,
    /// CMPP_PUSH_MO_ROUTE_UPDATE_RESP.
    PushMoRouteUpdateResp = 0x8000_0016,
    /// CMPP_GET_MO_ROUTE_RESP.
    GetMoRouteResp = 0x8000_0017,
}

impl CommandId {
    const ALL: [CommandId; 32] = [
        Self::Connect,
        Self::Terminate,
        Self::Submit,
        Self::Deliver,
        Self::Query,
        Self::Cancel,
        Self::ActiveTest,
        Self::Fwd,
        Self::MtRoute,
        Self::MoRoute,
        Self::GetMtRoute,
        Self::MtRouteUpdate,
        Self::MoRouteUpdate,
        Self::PushMtRouteUpdate,
        Self::PushMoRouteUpdate,
        Self::GetMoRoute,
        Self::ConnectResp,
        Self::TerminateResp,
        Self::SubmitResp,
        Self::DeliverResp,
        Self::QueryResp,
        Self::CancelResp,
        Self::ActiveTestResp,
        Self::FwdResp,
        Self::MtRouteResp,
        Self::MoRouteResp,
        Self::GetMtRouteResp,
        Self::MtRouteUpdateResp,
        Self::MoRouteUpdateResp,
        Self::PushMtRouteUpdateResp,
        Self::PushMoRouteUpdateResp,
        Self::GetMoRouteResp,
    ];

    /// Look up a raw Command_Id.
    pub fn from_u32(raw: u32) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.as_u32() == raw)
    }

    /// Raw wire value.
    pub fn as_u32(self) -> u32 {
        self as u32
    }

    /// Whether this is a response command.
    pub fn is_response(self) -> bool {
        self.as_u32() & CMPP_RESPONSE_FLAG != 0
    }

    /// The response paired with a request, or `None` for responses.
    pub fn response(self) -> Option<Self> {
        if self.is_response() {
            return None;
        }
        Self::from_u32(self.as_u32() | CMPP_RESPONSE_FLAG)
    }

    /// Protocol name, e.g. `CMPP_SUBMIT_RESP`.
    pub fn name(self) -> &'static str {
        match self {
            Self::Connect => "CMPP_CONNECT",
            Self::Terminate => "CMPP_TERMINATE",
            Self::Submit => "CMPP_SUBMIT",
            Self::Deliver => "CMPP_DELIVER",
            Self::Query => "CMPP_QUERY",
            Self::Cancel => "CMPP_CANCEL",
            Self::ActiveTest => "CMPP_ACTIVE_TEST",
            Self::Fwd => "CMPP_FWD",
            Self::MtRoute => "CMPP_MT_ROUTE",
            Self::MoRoute => "CMPP_MO_ROUTE",
            Self::GetMtRoute => "CMPP_GET_MT_ROUTE",
            Self::MtRouteUpdate => "CMPP_MT_ROUTE_UPDATE",
            Self::MoRouteUpdate => "CMPP_MO_ROUTE_UPDATE",
            Self::PushMtRouteUpdate => "CMPP_PUSH_MT_ROUTE_UPDATE",
            Self::PushMoRouteUpdate => "CMPP_PUSH_MO_ROUTE_UPDATE",
            Self::GetMoRoute => "CMPP_GET_MO_ROUTE",
            Self::ConnectResp => "CMPP_CONNECT_RESP",
            Self::TerminateResp => "CMPP_TERMINATE_RESP",
            Self::SubmitResp => "CMPP_SUBMIT_RESP",
            Self::DeliverResp => "CMPP_DELIVER_RESP",
            Self::QueryResp => "CMPP_QUERY_RESP",
            Self::CancelResp => "CMPP_CANCEL_RESP",
            Self::ActiveTestResp => "CMPP_ACTIVE_TEST_RESP",
            Self::FwdResp => "CMPP_FWD_RESP",
            Self::MtRouteResp => "CMPP_MT_ROUTE_RESP",
            Self::MoRouteResp => "CMPP_MO_ROUTE_RESP",
            Self::GetMtRouteResp => "CMPP_GET_MT_ROUTE_RESP",
            Self::MtRouteUpdateResp => "CMPP_MT_ROUTE_UPDATE_RESP",
            Self::MoRouteUpdateResp => "CMPP_MO_ROUTE_UPDATE_RESP",
            Self::PushMtRouteUpdateResp => "CMPP_PUSH_MT_ROUTE_UPDATE_RESP",
            Self::PushMoRouteUpdateResp => "CMPP_PUSH_MO_ROUTE_UPDATE_RESP",
            Self::GetMoRouteResp => "CMPP_GET_MO_ROUTE_RESP",
        }
    }
}

impl fmt::Display for CommandId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Check a raw Command_Id against the request and response ranges.
///
/// Both ranges exclude their endpoints: `CMPP_REQUEST_MIN`,
/// `CMPP_REQUEST_MAX`, `CMPP_RESPONSE_MIN` and `CMPP_RESPONSE_MAX` are
/// reserved markers, not commands.
pub fn is_valid_command_id(raw: u32) -> bool {
    (raw > CMPP_REQUEST_MIN && raw < CMPP_REQUEST_MAX)
        || (raw > CMPP_RESPONSE_MIN && raw < CMPP_RESPONSE_MAX)
}
