//! Protocol version descriptor.

use std::fmt;
use std::str::FromStr;

use super::constants::{CMPP2_PACKET_MAX, CMPP2_PACKET_MIN, CMPP3_PACKET_MAX, CMPP3_PACKET_MIN};

/// CMPP major protocol revision negotiated for a connection.
///
/// The three revisions share a wire header but differ in frame length
/// bounds and in the layout of several packet bodies. The version of a
/// connection never changes after it is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ProtocolVersion {
    /// CMPP 2.0.
    V20 = 0x20,
    /// CMPP 2.1.
    V21 = 0x21,
    /// CMPP 3.0.
    V30 = 0x30,
}

impl ProtocolVersion {
    /// Parse the version byte carried in CMPP_CONNECT.
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0x20 => Some(Self::V20),
            0x21 => Some(Self::V21),
            0x30 => Some(Self::V30),
            _ => None,
        }
    }

    /// Version byte as sent on the wire.
    pub fn as_byte(self) -> u8 {
        self as u8
    }

    /// Whether packets use the 3.0 layouts.
    pub fn is_v3(self) -> bool {
        self == Self::V30
    }

    /// Smallest Total_Length a peer may send.
    pub fn min_packet_len(self) -> u32 {
        if self.is_v3() {
            CMPP3_PACKET_MIN
        } else {
            CMPP2_PACKET_MIN
        }
    }

    /// Largest Total_Length a peer may send.
    pub fn max_packet_len(self) -> u32 {
        if self.is_v3() {
            CMPP3_PACKET_MAX
        } else {
            CMPP2_PACKET_MAX
        }
    }

    /// Check a Total_Length against this version's inclusive bounds.
    pub fn accepts_packet_len(self, total_length: u32) -> bool {
        (self.min_packet_len()..=self.max_packet_len()).contains(&total_length)
    }
}

impl fmt::Display for ProtocolVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::V20 => "cmpp20",
            Self::V21 => "cmpp21",
            Self::V30 => "cmpp30",
        };
        f.write_str(name)
    }
}

/// Error returned when parsing an unknown version name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown protocol version: {0}")]
pub struct UnknownVersion(pub String);

impl FromStr for ProtocolVersion {
    type Err = UnknownVersion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "cmpp20" | "2.0" => Ok(Self::V20),
            "cmpp21" | "2.1" => Ok(Self::V21),
            "cmpp30" | "3.0" => Ok(Self::V30),
            _ => Err(UnknownVersion(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_bytes() {
        for v in [ProtocolVersion::V20, ProtocolVersion::V21, ProtocolVersion::V30] {
            assert_eq!(ProtocolVersion::from_byte(v.as_byte()), Some(v));
        }
        assert_eq!(ProtocolVersion::from_byte(0x31), None);
        assert_eq!(ProtocolVersion::V30.as_byte(), 0x30);
    }

    #[test]
    fn test_version_display_and_parse() {
        assert_eq!(ProtocolVersion::V20.to_string(), "cmpp20");
        assert_eq!(ProtocolVersion::V21.to_string(), "cmpp21");
        assert_eq!(ProtocolVersion::V30.to_string(), "cmpp30");

        assert_eq!("CMPP30".parse::<ProtocolVersion>().unwrap(), ProtocolVersion::V30);
        assert_eq!("2.1".parse::<ProtocolVersion>().unwrap(), ProtocolVersion::V21);
        assert!("cmpp40".parse::<ProtocolVersion>().is_err());
    }

    #[test]
    fn test_packet_len_bounds() {
        let v3 = ProtocolVersion::V30;
        assert!(!v3.accepts_packet_len(CMPP3_PACKET_MIN - 1));
        assert!(v3.accepts_packet_len(CMPP3_PACKET_MIN));
        assert!(v3.accepts_packet_len(CMPP3_PACKET_MAX));
        assert!(!v3.accepts_packet_len(CMPP3_PACKET_MAX + 1));

        // 2.x uses its own, tighter ceiling.
        for v2 in [ProtocolVersion::V20, ProtocolVersion::V21] {
            assert!(!v2.accepts_packet_len(CMPP2_PACKET_MIN - 1));
            assert!(v2.accepts_packet_len(CMPP2_PACKET_MIN));
            assert!(v2.accepts_packet_len(CMPP2_PACKET_MAX));
            assert!(!v2.accepts_packet_len(CMPP2_PACKET_MAX + 1));
        }
        assert!(v3.accepts_packet_len(CMPP2_PACKET_MAX + 1));
    }
}
