//! ServerHello message (RFC 5246 Section 7.4.1.3).

use bytes::{Buf, BufMut, BytesMut};

use crate::error::{Error, Result};
use crate::extensions::Extensions;
use crate::protocol::ProtocolVersion;

/// ServerHello message.
///
/// ```text
/// struct {
///     ProtocolVersion server_version;
///     Random random;
///     SessionID session_id;
///     CipherSuite cipher_suite;
///     CompressionMethod compression_method;
///     select (extensions_present) {
///         case false: struct {};
///         case true:  Extension extensions<0..2^16-1>;
///     };
/// } ServerHello;
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerHello {
    /// Version selected by the server
    pub server_version: ProtocolVersion,

    /// Server random (32 bytes)
    pub random: [u8; 32],

    /// Session ID
    pub session_id: Vec<u8>,

    /// Selected cipher suite, raw identifier
    pub cipher_suite: u16,

    /// Selected compression method
    pub compression_method: u8,

    /// Extension block; `None` when the server sent none at all
    pub extensions: Option<Extensions>,
}

impl ServerHello {
    /// Create a new ServerHello.
    pub fn new(server_version: ProtocolVersion, random: [u8; 32], cipher_suite: u16) -> Self {
        Self {
            server_version,
            random,
            session_id: Vec::new(),
            cipher_suite,
            compression_method: 0,
            extensions: None,
        }
    }

    /// Set the session ID.
    pub fn with_session_id(mut self, session_id: Vec<u8>) -> Self {
        self.session_id = session_id;
        self
    }

    /// Set the extension block.
    pub fn with_extensions(mut self, extensions: Extensions) -> Self {
        self.extensions = Some(extensions);
        self
    }

    /// Encode the ServerHello body (without the handshake header).
    pub fn encode(&self) -> Result<Vec<u8>> {
        let mut buf = BytesMut::new();

        buf.put_u16(self.server_version.to_u16());
        buf.put_slice(&self.random);

        if self.session_id.len() > 32 {
            return Err(Error::InvalidMessage("Session ID too long".into()));
        }
        buf.put_u8(self.session_id.len() as u8);
        buf.put_slice(&self.session_id);

        buf.put_u16(self.cipher_suite);
        buf.put_u8(self.compression_method);

        if let Some(extensions) = &self.extensions {
            buf.put_slice(&extensions.encode());
        }

        Ok(buf.to_vec())
    }

    /// Decode a ServerHello body.
    pub fn decode(mut data: &[u8]) -> Result<Self> {
        if data.len() < 38 {
            // Min: 2 (version) + 32 (random) + 1 (sid len) + 2 (suite) + 1 (compression)
            return Err(Error::InvalidMessage("ServerHello too short".into()));
        }

        let version_raw = data.get_u16();
        let server_version = ProtocolVersion::from_u16(version_raw)
            .ok_or_else(|| Error::InvalidMessage("Invalid server version".into()))?;

        let mut random = [0u8; 32];
        data.copy_to_slice(&mut random);

        let session_id_len = data.get_u8() as usize;
        if session_id_len > 32 || data.len() < session_id_len {
            return Err(Error::InvalidMessage("Invalid session ID".into()));
        }
        let session_id = data[..session_id_len].to_vec();
        data.advance(session_id_len);

        if data.len() < 3 {
            return Err(Error::InvalidMessage("ServerHello truncated".into()));
        }
        let cipher_suite = data.get_u16();
        let compression_method = data.get_u8();

        let extensions = if data.is_empty() {
            None
        } else {
            Some(Extensions::decode(data)?)
        };

        Ok(Self {
            server_version,
            random,
            session_id,
            cipher_suite,
            compression_method,
            extensions,
        })
    }
}
