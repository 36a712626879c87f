//! TLS record framing.
//!
//! Records entering the receive state machine are already decrypted and
//! MAC-checked by the record layer; this module only defines the plaintext
//! record shape and its framing.
//!
//! # Record Structure
//!
//! ```text
//! struct {
//!     ContentType type;
//!     ProtocolVersion version;
//!     uint16 length;
//!     opaque fragment[TLSPlaintext.length];
//! } TLSPlaintext;
//! ```

use crate::error::{Error, Result};
use crate::protocol::{ContentType, ProtocolVersion};

/// Maximum plaintext fragment size.
pub const MAX_FRAGMENT_SIZE: usize = 16384;

/// TLS record header size (5 bytes).
pub const RECORD_HEADER_SIZE: usize = 5;

/// TLS record (plaintext).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlsPlaintext {
    /// Content type
    pub content_type: ContentType,

    /// Protocol version from the record header
    pub version: ProtocolVersion,

    /// Fragment data
    pub fragment: Vec<u8>,
}

impl TlsPlaintext {
    /// Create a new plaintext record.
    pub fn new(content_type: ContentType, version: ProtocolVersion, fragment: Vec<u8>) -> Self {
        Self {
            content_type,
            version,
            fragment,
        }
    }

    /// Get the record length (including header).
    pub fn len(&self) -> usize {
        RECORD_HEADER_SIZE + self.fragment.len()
    }

    /// Check if the record fragment is empty.
    pub fn is_empty(&self) -> bool {
        self.fragment.is_empty()
    }

    /// Encode the record to bytes.
    pub fn encode(&self) -> Result<Vec<u8>> {
        if self.fragment.len() > MAX_FRAGMENT_SIZE {
            return Err(Error::InvalidMessage("Fragment too large".into()));
        }
        if self.content_type == ContentType::DeprecatedHandshake {
            // SSLv2-framed hellos only exist on the inbound path.
            return Err(Error::InvalidMessage(
                "Deprecated handshake records cannot be re-framed".into(),
            ));
        }

        let mut buf = Vec::with_capacity(self.len());
        buf.push(self.content_type.to_u8());
        buf.extend_from_slice(&self.version.to_u16().to_be_bytes());
        buf.extend_from_slice(&(self.fragment.len() as u16).to_be_bytes());
        buf.extend_from_slice(&self.fragment);

        Ok(buf)
    }

    /// Decode a record from bytes.
    pub fn decode(data: &[u8]) -> Result<Self> {
        if data.len() < RECORD_HEADER_SIZE {
            return Err(Error::InvalidMessage("Record too short".into()));
        }

        let content_type = ContentType::from_u8(data[0])
            .ok_or_else(|| Error::InvalidMessage("Invalid content type".into()))?;

        let version_raw = u16::from_be_bytes([data[1], data[2]]);
        let version = ProtocolVersion::from_u16(version_raw)
            .ok_or_else(|| Error::InvalidMessage("Invalid protocol version".into()))?;

        let length = u16::from_be_bytes([data[3], data[4]]) as usize;

        if length > MAX_FRAGMENT_SIZE {
            return Err(Error::protocol(
                "record overflow",
                crate::error::AlertDescription::RecordOverflow,
            ));
        }

        if data.len() < RECORD_HEADER_SIZE + length {
            return Err(Error::InvalidMessage("Incomplete record".into()));
        }

        let fragment = data[RECORD_HEADER_SIZE..RECORD_HEADER_SIZE + length].to_vec();

        Ok(Self {
            content_type,
            version,
            fragment,
        })
    }
}
