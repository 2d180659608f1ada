//! Protocol constants for CMPP 2.0, 2.1 and 3.0.
//!
//! These values are fixed by the protocol and MUST NOT be changed.

// =============================================================================
// HEADER
// =============================================================================

/// Full packet header: Total_Length + Command_Id + Sequence_Id.
pub const CMPP_HEADER_LEN: u32 = 12;

/// Bytes read before dispatch: Total_Length + Command_Id.
pub const FRAME_PREFIX_LEN: u32 = 8;

// =============================================================================
// PACKET LENGTH BOUNDS
// =============================================================================

/// Smallest legal CMPP 2.x packet (header only).
pub const CMPP2_PACKET_MIN: u32 = 12;

/// Largest legal CMPP 2.x packet.
pub const CMPP2_PACKET_MAX: u32 = 2477;

/// Smallest legal CMPP 3.0 packet (header only).
pub const CMPP3_PACKET_MIN: u32 = 12;

/// Largest legal CMPP 3.0 packet.
pub const CMPP3_PACKET_MAX: u32 = 3335;

// =============================================================================
// COMMAND ID RANGES
// =============================================================================
//
// Both ranges are exclusive: the MIN/MAX values are reserved markers and are
// never valid commands themselves.

/// Lower sentinel of the request command range.
pub const CMPP_REQUEST_MIN: u32 = 0x0000_0000;

/// Upper sentinel of the request command range.
pub const CMPP_REQUEST_MAX: u32 = 0x0000_0018;

/// Lower sentinel of the response command range.
pub const CMPP_RESPONSE_MIN: u32 = 0x8000_0000;

/// Upper sentinel of the response command range.
pub const CMPP_RESPONSE_MAX: u32 = 0x8000_0018;

/// Bit set on every response command.
pub const CMPP_RESPONSE_FLAG: u32 = 0x8000_0000;

// =============================================================================
// FIELD WIDTHS
// =============================================================================

/// Source_Addr in CMPP_CONNECT.
pub const SOURCE_ADDR_LEN: usize = 6;

/// AuthenticatorSource / AuthenticatorISMG digest length.
pub const AUTHENTICATOR_LEN: usize = 16;

/// Service_Id.
pub const SERVICE_ID_LEN: usize = 10;

/// Terminal id in CMPP 2.x (MSISDN).
pub const CMPP2_TERMINAL_ID_LEN: usize = 21;

/// Terminal id in CMPP 3.0 (MSISDN or pseudo code).
pub const CMPP3_TERMINAL_ID_LEN: usize = 32;

/// Msg_src / Source_Id / Destination_Id (SP or ISMG code).
pub const NODE_ID_LEN: usize = 6;

/// FeeType.
pub const FEE_TYPE_LEN: usize = 2;

/// FeeCode.
pub const FEE_CODE_LEN: usize = 6;

/// ValId_Time / At_Time (SMPP time format).
pub const TIME_LEN: usize = 17;

/// Src_Id / Dest_Id.
pub const SRC_ID_LEN: usize = 21;

/// Reserve in CMPP 2.x.
pub const RESERVE_LEN: usize = 8;

/// LinkID in CMPP 3.0.
pub const LINK_ID_LEN: usize = 20;

/// Pseudo code fields in CMPP 3.0 forward requests.
pub const PSEUDO_LEN: usize = 32;

/// Maximum number of receivers in a submit or forward.
pub const MAX_DESTINATIONS: usize = 100;

/// Maximum Msg_Content length (Msg_Length is one byte).
pub const MAX_CONTENT_LEN: usize = 255;
