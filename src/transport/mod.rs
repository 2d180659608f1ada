//! CMPP connection layer.
//!
//! This module turns a duplex byte stream into a stream of typed CMPP
//! packets. It provides:
//!
//! - **Sequence numbering**: [`SequenceGenerator`], a stoppable, wrapping
//!   `u32` counter shared by all senders on a connection
//! - **Frame validation**: [`check_total_length`], [`check_command_id`] and
//!   version-aware dispatch via [`decode_body`] / [`decode_frame`]
//! - **Connections**: [`Connection`] with buffered full-duplex I/O and a
//!   [`ConnectionState`] lifecycle
//! - **Configuration**: [`ConnectionConfig`] and [`ConnectionBuilder`]
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │       Session (login, windowing)        │
//! ├─────────────────────────────────────────┤
//! │          Connection Layer               │  ← This module
//! │   sequence ids, framing, dispatch       │
//! ├─────────────────────────────────────────┤
//! │      Packet Codec (crate::packet)       │
//! ├─────────────────────────────────────────┤
//! │          TCP / any byte stream          │
//! └─────────────────────────────────────────┘
//! ```
//!
//! Framing, sequence numbering and errors are runtime-agnostic and always
//! compiled. The async pieces need the `transport` feature.

mod error;
mod frame;
mod sequence;

#[cfg(feature = "transport")]
mod config;
#[cfg(feature = "transport")]
mod connection;
#[cfg(feature = "transport")]
mod stream;

pub use error::*;
pub use frame::*;
pub use sequence::SequenceGenerator;

#[cfg(feature = "transport")]
#[cfg_attr(docsrs, doc(cfg(feature = "transport")))]
pub use config::{ConnectionBuilder, ConnectionConfig, DEFAULT_BUFFER_SIZE};
#[cfg(feature = "transport")]
#[cfg_attr(docsrs, doc(cfg(feature = "transport")))]
pub use connection::{Connection, ConnectionState};
#[cfg(feature = "transport")]
#[cfg_attr(docsrs, doc(cfg(feature = "transport")))]
pub use stream::Transport;
