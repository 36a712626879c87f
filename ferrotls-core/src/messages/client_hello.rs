//! ClientHello message (RFC 5246 Section 7.4.1.2).

use bytes::{Buf, BufMut, BytesMut};

use crate::error::{Error, Result};
use crate::extensions::Extensions;
use crate::protocol::ProtocolVersion;

/// ClientHello message.
///
/// ```text
/// struct {
///     ProtocolVersion client_version;
///     Random random;
///     SessionID session_id;
///     CipherSuite cipher_suites<2..2^16-2>;
///     CompressionMethod compression_methods<1..2^8-1>;
///     select (extensions_present) {
///         case false: struct {};
///         case true:  Extension extensions<0..2^16-1>;
///     };
/// } ClientHello;
/// ```
///
/// Cipher suites are kept as raw identifiers: the processor re-encodes this
/// message as authoritative transcript bytes, so nothing may be dropped or
/// normalized in decode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientHello {
    /// Version advertised by the client; retained verbatim for the
    /// premaster anti-rollback check.
    pub client_version: ProtocolVersion,

    /// Client random (32 bytes)
    pub random: [u8; 32],

    /// Session ID offered for resumption
    pub session_id: Vec<u8>,

    /// Offered cipher suites, raw identifiers in wire order
    pub cipher_suites: Vec<u16>,

    /// Offered compression methods
    pub compression_methods: Vec<u8>,

    /// Extension block; `None` when the client sent none at all
    pub extensions: Option<Extensions>,

    /// Raw bytes of an SSLv2-framed hello, as received.
    ///
    /// When set, re-encoding yields these bytes so the transcript carries
    /// the V2CLIENTHELLO exactly as it appeared on the wire.
    pub deprecated_raw: Option<Vec<u8>>,
}

impl ClientHello {
    /// Create a new ClientHello.
    pub fn new(client_version: ProtocolVersion, random: [u8; 32], cipher_suites: Vec<u16>) -> Self {
        Self {
            client_version,
            random,
            session_id: Vec::new(),
            cipher_suites,
            compression_methods: vec![0],
            extensions: None,
            deprecated_raw: None,
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

    /// Encode the ClientHello body (without the handshake header).
    pub fn encode(&self) -> Result<Vec<u8>> {
        let mut buf = BytesMut::new();

        buf.put_u16(self.client_version.to_u16());
        buf.put_slice(&self.random);

        if self.session_id.len() > 32 {
            return Err(Error::InvalidMessage("Session ID too long".into()));
        }
        buf.put_u8(self.session_id.len() as u8);
        buf.put_slice(&self.session_id);

        let cipher_suites_len = self.cipher_suites.len() * 2;
        if cipher_suites_len > 65534 {
            return Err(Error::InvalidMessage("Too many cipher suites".into()));
        }
        buf.put_u16(cipher_suites_len as u16);
        for suite in &self.cipher_suites {
            buf.put_u16(*suite);
        }

        if self.compression_methods.is_empty() || self.compression_methods.len() > 255 {
            return Err(Error::InvalidMessage(
                "Invalid compression methods length".into(),
            ));
        }
        buf.put_u8(self.compression_methods.len() as u8);
        buf.put_slice(&self.compression_methods);

        if let Some(extensions) = &self.extensions {
            buf.put_slice(&extensions.encode());
        }

        Ok(buf.to_vec())
    }

    /// Decode a ClientHello body.
    pub fn decode(mut data: &[u8]) -> Result<Self> {
        if data.len() < 38 {
            // Min: 2 (version) + 32 (random) + 1 (sid len) + 2 (cs len) + 1 (cm len)
            return Err(Error::InvalidMessage("ClientHello too short".into()));
        }

        let version_raw = data.get_u16();
        let client_version = ProtocolVersion::from_u16(version_raw)
            .ok_or_else(|| Error::InvalidMessage("Invalid client version".into()))?;

        let mut random = [0u8; 32];
        data.copy_to_slice(&mut random);

        let session_id_len = data.get_u8() as usize;
        if session_id_len > 32 || data.len() < session_id_len {
            return Err(Error::InvalidMessage("Invalid session ID".into()));
        }
        let session_id = data[..session_id_len].to_vec();
        data.advance(session_id_len);

        if data.len() < 2 {
            return Err(Error::InvalidMessage("Missing cipher suites".into()));
        }
        let cipher_suites_len = data.get_u16() as usize;
        if cipher_suites_len % 2 != 0 || cipher_suites_len < 2 || data.len() < cipher_suites_len {
            return Err(Error::InvalidMessage("Invalid cipher suites length".into()));
        }
        let mut cipher_suites = Vec::with_capacity(cipher_suites_len / 2);
        for _ in 0..cipher_suites_len / 2 {
            cipher_suites.push(data.get_u16());
        }

        if data.is_empty() {
            return Err(Error::InvalidMessage("Missing compression methods".into()));
        }
        let compression_len = data.get_u8() as usize;
        if compression_len == 0 || data.len() < compression_len {
            return Err(Error::InvalidMessage("Invalid compression methods".into()));
        }
        let compression_methods = data[..compression_len].to_vec();
        data.advance(compression_len);

        // Pre-extension clients stop here.
        let extensions = if data.is_empty() {
            None
        } else {
            Some(Extensions::decode(data)?)
        };

        Ok(Self {
            client_version,
            random,
            session_id,
            cipher_suites,
            compression_methods,
            extensions,
            deprecated_raw: None,
        })
    }
}
