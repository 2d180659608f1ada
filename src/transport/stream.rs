//! The byte-stream capability a [`Connection`](super::Connection) runs on.

use std::io;
use std::net::SocketAddr;

use tokio::io::{AsyncRead, AsyncWrite, DuplexStream};
use tokio::net::TcpStream;

/// An established, full-duplex byte stream.
///
/// Reads and writes may run concurrently; the connection splits the stream
/// into independent halves. Keep-alive is best-effort: transports without
/// the notion keep the default no-op.
pub trait Transport: AsyncRead + AsyncWrite + Send + Unpin + 'static {
    /// Enable or disable transport-level keep-alive probing.
    fn set_keepalive(&self, _enabled: bool) -> io::Result<()> {
        Ok(())
    }

    /// Remote address, when the transport has one.
    fn peer_addr(&self) -> Option<SocketAddr> {
        None
    }
}

impl Transport for TcpStream {
    fn set_keepalive(&self, enabled: bool) -> io::Result<()> {
        socket2::SockRef::from(self).set_keepalive(enabled)
    }

    fn peer_addr(&self) -> Option<SocketAddr> {
        TcpStream::peer_addr(self).ok()
    }
}

/// In-memory pipe, used for tests and in-process peers.
impl Transport for DuplexStream {}

#[cfg(unix)]
impl Transport for tokio::net::UnixStream {}
