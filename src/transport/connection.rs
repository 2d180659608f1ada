//! A single CMPP connection: buffered full-duplex I/O over a [`Transport`],
//! sequence numbering and lifecycle state.

use std::fmt;
use std::io;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU8, Ordering};

use tokio::io::{
    AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader, BufWriter, ReadHalf, WriteHalf,
};
use tokio::sync::{Mutex, watch};
use tracing::{debug, trace};

use super::config::ConnectionConfig;
use super::error::{TransportError, TransportResult};
use super::frame::{self, FrameHeader};
use super::sequence::SequenceGenerator;
use super::stream::Transport;
use crate::core::{Encode, ProtocolVersion};
use crate::packet::Packet;

/// Connection lifecycle state.
///
/// ```text
/// Connected --(login accepted, set by owner)--> AuthOk
/// Connected | AuthOk --(close)--> Closed        (terminal)
/// ```
///
/// The connection itself only enforces that `Closed` is never left; which
/// operations are legal in which state is the session owner's policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ConnectionState {
    /// Closed; terminal.
    Closed = 0,
    /// Transport established, not yet authenticated.
    Connected = 1,
    /// Login handshake succeeded.
    AuthOk = 2,
}

impl ConnectionState {
    fn from_u8(raw: u8) -> Self {
        match raw {
            1 => Self::Connected,
            2 => Self::AuthOk,
            _ => Self::Closed,
        }
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Closed => "closed",
            Self::Connected => "connected",
            Self::AuthOk => "auth_ok",
        };
        f.write_str(name)
    }
}

/// One CMPP conversation over an established byte stream.
///
/// The read and write sides are locked independently: one task may sit in
/// [`receive`](Self::receive) while others [`send`](Self::send). Concurrent
/// senders are serialised on the writer so frames never interleave, and
/// concurrent receivers likewise on the reader.
///
/// [`close`](Self::close) interrupts any send or receive still waiting on
/// the transport; those calls return [`TransportError::ConnectionClosed`].
///
/// # Example
///
/// ```no_run
/// use cmpp_conn::core::ProtocolVersion;
/// use cmpp_conn::packet::{ActiveTestRequest, Packet};
/// use cmpp_conn::transport::Connection;
/// use tokio::net::TcpStream;
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let stream = TcpStream::connect("127.0.0.1:7890").await?;
/// let conn = Connection::open(stream, ProtocolVersion::V30);
///
/// let seq = conn.send(&ActiveTestRequest::default()).await?;
/// if let Packet::ActiveTestResponse(rsp) = conn.receive().await? {
///     assert_eq!(rsp.seq_id, seq);
/// }
/// conn.close().await;
/// # Ok(())
/// # }
/// ```
pub struct Connection<T: Transport> {
    version: ProtocolVersion,
    state: AtomicU8,
    shutdown: watch::Sender<bool>,
    peer_addr: Option<SocketAddr>,
    reader: Mutex<BufReader<ReadHalf<T>>>,
    writer: Mutex<BufWriter<WriteHalf<T>>>,
    sequence: SequenceGenerator,
}

impl<T: Transport> Connection<T> {
    /// Open a connection with default buffering and keep-alive enabled.
    pub fn open(transport: T, version: ProtocolVersion) -> Self {
        Self::with_config(transport, ConnectionConfig::new(version))
    }

    /// Open a connection with explicit settings.
    pub fn with_config(transport: T, config: ConnectionConfig) -> Self {
        if config.keepalive {
            if let Err(e) = transport.set_keepalive(true) {
                debug!(error = %e, "keep-alive not enabled");
            }
        }
        let peer_addr = transport.peer_addr();

        let (read_half, write_half) = tokio::io::split(transport);
        let (shutdown, _) = watch::channel(false);
        debug!(version = %config.version, peer = ?peer_addr, "connection opened");

        Self {
            version: config.version,
            state: AtomicU8::new(ConnectionState::Connected as u8),
            shutdown,
            peer_addr,
            reader: Mutex::new(BufReader::with_capacity(config.read_buffer_size, read_half)),
            writer: Mutex::new(BufWriter::with_capacity(config.write_buffer_size, write_half)),
            sequence: SequenceGenerator::new(),
        }
    }

    /// Protocol version of this connection.
    pub fn version(&self) -> ProtocolVersion {
        self.version
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ConnectionState {
        ConnectionState::from_u8(self.state.load(Ordering::Acquire))
    }

    /// Record a state change decided by the session owner.
    ///
    /// No transition table is applied, except that nothing leaves
    /// `Closed`: requests after [`close`](Self::close) are ignored.
    pub fn set_state(&self, state: ConnectionState) {
        let _ = self
            .state
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |current| {
                (current != ConnectionState::Closed as u8).then_some(state as u8)
            });
    }

    /// Whether [`close`](Self::close) has run.
    pub fn is_closed(&self) -> bool {
        *self.shutdown.borrow()
    }

    /// Remote address, if the transport has one.
    pub fn peer_addr(&self) -> Option<SocketAddr> {
        self.peer_addr
    }

    /// This connection's Sequence_Id generator.
    pub fn sequence(&self) -> &SequenceGenerator {
        &self.sequence
    }

    /// Encode `packet` with the next Sequence_Id and write it out.
    ///
    /// Returns the Sequence_Id used, for matching the peer's response.
    pub async fn send<P: Encode + ?Sized>(&self, packet: &P) -> TransportResult<u32> {
        self.ensure_open()?;
        let seq_id = self.sequence.next()?;
        self.write_packet(packet, seq_id).await?;
        Ok(seq_id)
    }

    /// Encode `packet` with a caller-chosen Sequence_Id and write it out.
    ///
    /// Used for responses, which echo the Sequence_Id of their request.
    /// Does not consume a value from the generator.
    pub async fn send_with_seq<P: Encode + ?Sized>(
        &self,
        packet: &P,
        seq_id: u32,
    ) -> TransportResult<()> {
        self.ensure_open()?;
        self.write_packet(packet, seq_id).await
    }

    async fn write_packet<P: Encode + ?Sized>(&self, packet: &P, seq_id: u32) -> TransportResult<()> {
        let data = packet.encode_frame(seq_id)?;
        frame::check_frame_len(self.version, data.len())?;

        tokio::select! {
            biased;
            () = self.closed() => Err(TransportError::ConnectionClosed),
            written = self.write_frame(&data) => {
                written?;
                trace!(seq_id, len = data.len(), "frame sent");
                Ok(())
            }
        }
    }

    async fn write_frame(&self, data: &[u8]) -> io::Result<()> {
        let mut writer = self.writer.lock().await;
        write_full(&mut *writer, data).await
    }

    /// Read, validate and decode the next frame.
    ///
    /// Checks run in wire order: Total_Length bounds, Command_Id range,
    /// full body read, dispatch table lookup, packet decode.
    pub async fn receive(&self) -> TransportResult<Packet> {
        self.ensure_open()?;

        let (header, body) = tokio::select! {
            biased;
            () = self.closed() => return Err(TransportError::ConnectionClosed),
            read = self.read_frame() => read?,
        };

        let packet = frame::decode_body(self.version, header, &body)?;
        trace!(
            command = %packet.command_id(),
            seq_id = packet.seq_id(),
            len = header.total_length,
            "frame received"
        );
        Ok(packet)
    }

    async fn read_frame(&self) -> TransportResult<(FrameHeader, Vec<u8>)> {
        let mut reader = self.reader.lock().await;

        let total_length = read_word(&mut *reader).await?;
        frame::check_total_length(self.version, total_length)?;

        let command_id = read_word(&mut *reader).await?;
        frame::check_command_id(command_id)?;

        let header = FrameHeader {
            total_length,
            command_id,
        };
        let mut body = vec![0u8; header.body_len()];
        let read = read_full(&mut *reader, &mut body).await?;
        if read < body.len() {
            return Err(TransportError::TruncatedBody {
                expected: body.len(),
                actual: read,
            });
        }
        Ok((header, body))
    }

    /// Stop the sequence generator, interrupt pending I/O and shut the
    /// transport down.
    ///
    /// Idempotent, and never waits on the peer. Sends and receives blocked
    /// on the transport fail with [`TransportError::ConnectionClosed`].
    /// Every completed send is already flushed; bytes still buffered belong
    /// to a send that was interrupted mid-frame and are dropped. Flush and
    /// shutdown errors are not reported.
    pub async fn close(&self) {
        if self.shutdown.send_replace(true) {
            return;
        }
        self.sequence.stop();
        self.state
            .store(ConnectionState::Closed as u8, Ordering::Release);

        // Interrupted senders release the lock as soon as they observe the signal.
        let mut writer = self.writer.lock().await;
        let pending = writer.buffer().len();
        if pending > 0 {
            debug!(pending, "dropping partially written frame");
        }
        let half = writer.get_mut();
        if let Err(e) = half.flush().await {
            debug!(error = %e, "flush on close failed");
        }
        if let Err(e) = half.shutdown().await {
            debug!(error = %e, "transport shutdown failed");
        }
        debug!(peer = ?self.peer_addr, "connection closed");
    }

    /// Resolves once [`close`](Self::close) has been called.
    async fn closed(&self) {
        let mut rx = self.shutdown.subscribe();
        // The sender lives in `self`, so this can only end by observing `true`.
        let _ = rx.wait_for(|closed| *closed).await;
    }

    fn ensure_open(&self) -> TransportResult<()> {
        if self.is_closed() {
            return Err(TransportError::ConnectionClosed);
        }
        Ok(())
    }
}

impl<T: Transport> fmt::Debug for Connection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connection")
            .field("version", &self.version)
            .field("state", &self.state())
            .field("peer_addr", &self.peer_addr)
            .field("next_seq_id", &self.sequence.peek())
            .finish()
    }
}

/// Write all of `data`, flushing after every write.
///
/// A short write is not an error; the remaining tail is retried. A write
/// that makes no progress or any flush error aborts.
async fn write_full<W: AsyncWrite + Unpin + ?Sized>(writer: &mut W, data: &[u8]) -> io::Result<()> {
    let mut written = 0;
    while written < data.len() {
        let n = writer.write(&data[written..]).await?;
        writer.flush().await?;
        if n == 0 {
            return Err(io::Error::new(
                io::ErrorKind::WriteZero,
                "transport accepted no bytes",
            ));
        }
        written += n;
    }
    Ok(())
}

/// Fill `buf` until it is full or the stream ends; returns bytes read.
async fn read_full<R: AsyncRead + Unpin + ?Sized>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        let n = reader.read(&mut buf[filled..]).await?;
        if n == 0 {
            break;
        }
        filled += n;
    }
    Ok(filled)
}

async fn read_word<R: AsyncRead + Unpin + ?Sized>(reader: &mut R) -> TransportResult<u32> {
    let mut word = [0u8; 4];
    if read_full(reader, &mut word).await? < word.len() {
        return Err(TransportError::TruncatedHeader);
    }
    Ok(u32::from_be_bytes(word))
}
