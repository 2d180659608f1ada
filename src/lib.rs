//! # cmpp-conn
//!
//! Connection layer for CMPP (China Mobile Peer to Peer), the SMS gateway
//! protocol spoken between service providers and ISMG gateways.
//!
//! Every CMPP packet travels in a frame:
//!
//! ```text
//! ┌──────────────┬──────────────┬──────────────┬──────────────────┐
//! │ Total_Length │  Command_Id  │ Sequence_Id  │    packet body   │
//! │   u32 (BE)   │   u32 (BE)   │   u32 (BE)   │                  │
//! └──────────────┴──────────────┴──────────────┴──────────────────┘
//! ```
//!
//! This crate numbers outgoing packets, validates incoming frames against
//! the negotiated protocol version, and dispatches each frame body to the
//! right packet decoder. Login policy, windowing and retries belong to the
//! session built on top.
//!
//! ## Feature Flags
//!
//! - `transport` (default): async [`transport::Connection`] over tokio
//!   streams, with TCP keep-alive through socket2
//!
//! ## Modules
//!
//! - [`core`]: constants, protocol versions, the [`Packer`] trait (always included)
//! - [`packet`]: every supported packet kind and the dispatch table (always included)
//! - [`transport`]: sequence numbering, frame validation and connections
//!
//! ## Example Usage
//!
//! ```rust
//! use cmpp_conn::prelude::*;
//!
//! let frame = ActiveTestRequest::default().encode(7).unwrap();
//! assert_eq!(frame.len(), 12);
//!
//! let (packet, used) = decode_frame(ProtocolVersion::V30, &frame).unwrap();
//! assert_eq!(used, 12);
//! assert_eq!(packet.kind(), PacketKind::ActiveTestRequest);
//! assert_eq!(packet.seq_id(), 7);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

// Core module (always included)
pub mod core;

// Packet kinds and codec (always included)
pub mod packet;

// Connection layer; the async parts are feature-gated inside
pub mod transport;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::core::{
        Encode, PacketError, PacketResult, Packer, ProtocolVersion, UnknownVersion,
    };
    pub use crate::packet::*;
    pub use crate::transport::{
        FrameHeader, SequenceGenerator, TransportError, TransportResult, decode_frame,
    };

    #[cfg(feature = "transport")]
    pub use crate::transport::{
        Connection, ConnectionBuilder, ConnectionConfig, ConnectionState, Transport,
    };
}

// Re-export commonly used items at crate root
pub use crate::core::{Encode, Packer, PacketError, ProtocolVersion};
pub use crate::packet::{CommandId, Packet, PacketKind};
pub use crate::transport::{SequenceGenerator, TransportError};

#[cfg(feature = "transport")]
pub use crate::transport::{Connection, ConnectionState};
