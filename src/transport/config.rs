//! Connection configuration.

use crate::core::ProtocolVersion;

/// Default capacity of the buffered reader and writer.
pub const DEFAULT_BUFFER_SIZE: usize = 4096;

/// Settings fixed when a connection is opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionConfig {
    /// Protocol version spoken on the connection.
    pub version: ProtocolVersion,
    /// Read buffer capacity in bytes.
    pub read_buffer_size: usize,
    /// Write buffer capacity in bytes.
    pub write_buffer_size: usize,
    /// Whether to enable transport keep-alive on open.
    pub keepalive: bool,
}

impl ConnectionConfig {
    /// Defaults for `version`: 4 KiB buffers, keep-alive on.
    pub fn new(version: ProtocolVersion) -> Self {
        Self {
            version,
            read_buffer_size: DEFAULT_BUFFER_SIZE,
            write_buffer_size: DEFAULT_BUFFER_SIZE,
            keepalive: true,
        }
    }
}

/// Builder for opening a [`Connection`](super::Connection) with custom options.
#[derive(Debug, Clone)]
pub struct ConnectionBuilder {
    config: ConnectionConfig,
}

impl ConnectionBuilder {
    /// Start from the defaults for `version`.
    pub fn new(version: ProtocolVersion) -> Self {
        Self {
            config: ConnectionConfig::new(version),
        }
    }

    /// Set the read buffer capacity.
    pub fn read_buffer_size(mut self, size: usize) -> Self {
        self.config.read_buffer_size = size;
        self
    }

    /// Set the write buffer capacity.
    pub fn write_buffer_size(mut self, size: usize) -> Self {
        self.config.write_buffer_size = size;
        self
    }

    /// Enable or disable keep-alive on open.
    pub fn keepalive(mut self, enabled: bool) -> Self {
        self.config.keepalive = enabled;
        self
    }

    /// The configuration built so far.
    pub fn config(&self) -> &ConnectionConfig {
        &self.config
    }

    /// Open a connection over `transport`.
    pub fn open<T: super::Transport>(self, transport: T) -> super::Connection<T> {
        super::Connection::with_config(transport, self.config)
    }
}
