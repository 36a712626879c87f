//! TLS extensions.
//!
//! Extensions keep their raw `u16` type code through decode so that
//! extensions this implementation does not interpret survive unharmed: the
//! handshake processor ignores them, and messages re-encode to the exact
//! bytes received.

use bytes::{Buf, BufMut, BytesMut};

use crate::error::{Error, Result};
use crate::protocol::ExtensionType;

/// A single TLS extension, type code kept raw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extension {
    /// Extension type code
    pub extension_type: u16,

    /// Extension payload
    pub data: Vec<u8>,
}

impl Extension {
    /// Create a new extension.
    pub fn new(extension_type: u16, data: Vec<u8>) -> Self {
        Self {
            extension_type,
            data,
        }
    }

    /// The recognized extension type, if any.
    pub fn known_type(&self) -> Option<ExtensionType> {
        ExtensionType::from_u16(self.extension_type)
    }

    /// Encode the extension to bytes.
    pub fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(4 + self.data.len());
        buf.extend_from_slice(&self.extension_type.to_be_bytes());
        buf.extend_from_slice(&(self.data.len() as u16).to_be_bytes());
        buf.extend_from_slice(&self.data);
        buf
    }

    /// Decode an extension from bytes, returning it and the bytes consumed.
    pub fn decode(data: &[u8]) -> Result<(Self, usize)> {
        if data.len() < 4 {
            return Err(Error::InvalidMessage("Extension too short".into()));
        }

        let extension_type = u16::from_be_bytes([data[0], data[1]]);
        let length = u16::from_be_bytes([data[2], data[3]]) as usize;

        if data.len() < 4 + length {
            return Err(Error::InvalidMessage("Incomplete extension data".into()));
        }

        Ok((
            Self {
                extension_type,
                data: data[4..4 + length].to_vec(),
            },
            4 + length,
        ))
    }
}

/// Extension list, as carried by ClientHello and ServerHello.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extensions {
    extensions: Vec<Extension>,
}

impl Extensions {
    /// Create a new empty extension list.
    pub fn new() -> Self {
        Self {
            extensions: Vec::new(),
        }
    }

    /// Add an extension.
    pub fn add(&mut self, extension: Extension) {
        self.extensions.push(extension);
    }

    /// Get an extension by recognized type.
    pub fn get(&self, ext_type: ExtensionType) -> Option<&Extension> {
        self.extensions
            .iter()
            .find(|e| e.extension_type == ext_type.to_u16())
    }

    /// Check if an extension is present.
    pub fn has(&self, ext_type: ExtensionType) -> bool {
        self.get(ext_type).is_some()
    }

    /// Iterate over all extensions in wire order.
    pub fn iter(&self) -> impl Iterator<Item = &Extension> {
        self.extensions.iter()
    }

    /// Get the number of extensions.
    pub fn len(&self) -> usize {
        self.extensions.len()
    }

    /// Check if the extension list is empty.
    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }

    /// Encode all extensions, with the leading two-byte total length.
    pub fn encode(&self) -> Vec<u8> {
        let mut body = Vec::new();
        for ext in &self.extensions {
            body.extend_from_slice(&ext.encode());
        }

        let mut result = Vec::with_capacity(2 + body.len());
        result.extend_from_slice(&(body.len() as u16).to_be_bytes());
        result.extend_from_slice(&body);
        result
    }

    /// Decode an extension block (two-byte total length, then extensions).
    pub fn decode(data: &[u8]) -> Result<Self> {
        if data.len() < 2 {
            return Err(Error::InvalidMessage("Extensions too short".into()));
        }

        let total_length = u16::from_be_bytes([data[0], data[1]]) as usize;
        if data.len() != 2 + total_length {
            return Err(Error::InvalidMessage("Invalid extensions length".into()));
        }

        let mut extensions = Vec::new();
        let mut offset = 2;
        while offset < 2 + total_length {
            let (ext, consumed) = Extension::decode(&data[offset..2 + total_length])?;
            extensions.push(ext);
            offset += consumed;
        }

        Ok(Self { extensions })
    }
}

/// Secure renegotiation payload (RFC 5746 Section 3.2).
///
/// On ClientHello the payload carries the client's previous verify data; on
/// ServerHello it carries client verify data followed by server verify
/// data. An initial handshake carries empty verify data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecureRenegotiation {
    /// Client verify data from the previous handshake.
    pub client_verify_data: Vec<u8>,

    /// Server verify data from the previous handshake (ServerHello only).
    pub server_verify_data: Option<Vec<u8>>,
}

impl SecureRenegotiation {
    /// Create a secure renegotiation payload.
    pub fn new(client_verify_data: Vec<u8>, server_verify_data: Option<Vec<u8>>) -> Self {
        Self {
            client_verify_data,
            server_verify_data,
        }
    }

    /// Encode the renegotiated_connection field.
    ///
    /// Verification compares the peer's payload against this encoding
    /// whole; the wire form alone cannot split client from server verify
    /// data, so there is deliberately no decoder.
    pub fn encode(&self) -> Vec<u8> {
        let mut body = BytesMut::new();
        body.put_slice(&self.client_verify_data);
        if let Some(svd) = &self.server_verify_data {
            body.put_slice(svd);
        }

        let mut buf = Vec::with_capacity(1 + body.len());
        buf.push(body.len() as u8);
        buf.extend_from_slice(&body);
        buf
    }
}

/// Decode an ALPN protocol list (RFC 7301 Section 3.1).
pub fn decode_alpn_protocols(mut data: &[u8]) -> Result<Vec<Vec<u8>>> {
    if data.len() < 2 {
        return Err(Error::InvalidMessage("ALPN list too short".into()));
    }
    let list_len = data.get_u16() as usize;
    if data.len() != list_len {
        return Err(Error::InvalidMessage("Invalid ALPN list length".into()));
    }

    let mut protocols = Vec::new();
    while data.has_remaining() {
        let len = data.get_u8() as usize;
        if len == 0 || data.len() < len {
            return Err(Error::InvalidMessage("Invalid ALPN protocol length".into()));
        }
        protocols.push(data[..len].to_vec());
        data.advance(len);
    }
    Ok(protocols)
}

/// Decode a server_name extension (RFC 6066 Section 3), returning the
/// first host_name entry if present.
pub fn decode_server_name(mut data: &[u8]) -> Result<Option<String>> {
    if data.len() < 2 {
        return Err(Error::InvalidMessage("SNI list too short".into()));
    }
    let list_len = data.get_u16() as usize;
    if data.len() != list_len {
        return Err(Error::InvalidMessage("Invalid SNI list length".into()));
    }

    while data.remaining() >= 3 {
        let name_type = data.get_u8();
        let len = data.get_u16() as usize;
        if data.len() < len {
            return Err(Error::InvalidMessage("Invalid SNI entry length".into()));
        }
        if name_type == 0 {
            let host = std::str::from_utf8(&data[..len])
                .map_err(|_| Error::InvalidMessage("SNI host name is not ASCII".into()))?;
            return Ok(Some(host.to_string()));
        }
        data.advance(len);
    }
    Ok(None)
}

/// Decode a supported_groups extension (RFC 8422 Section 5.1.1).
pub fn decode_supported_groups(mut data: &[u8]) -> Result<Vec<u16>> {
    if data.len() < 2 {
        return Err(Error::InvalidMessage("Group list too short".into()));
    }
    let list_len = data.get_u16() as usize;
    if data.len() != list_len || list_len % 2 != 0 {
        return Err(Error::InvalidMessage("Invalid group list length".into()));
    }

    let mut groups = Vec::with_capacity(list_len / 2);
    while data.has_remaining() {
        groups.push(data.get_u16());
    }
    Ok(groups)
}

/// Decode an ec_point_formats extension (RFC 8422 Section 5.1.2).
pub fn decode_ec_point_formats(mut data: &[u8]) -> Result<Vec<u8>> {
    if data.is_empty() {
        return Err(Error::InvalidMessage("Point format list too short".into()));
    }
    let list_len = data.get_u8() as usize;
    if data.len() != list_len {
        return Err(Error::InvalidMessage(
            "Invalid point format list length".into(),
        ));
    }
    Ok(data.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_encode_decode() {
        let ext = Extension::new(ExtensionType::ServerName.to_u16(), vec![1, 2, 3]);
        let encoded = ext.encode();

        let (decoded, consumed) = Extension::decode(&encoded).unwrap();
        assert_eq!(decoded.extension_type, 0);
        assert_eq!(decoded.known_type(), Some(ExtensionType::ServerName));
        assert_eq!(decoded.data, vec![1, 2, 3]);
        assert_eq!(consumed, encoded.len());
    }

    #[test]
    fn test_unknown_extension_survives() {
        let ext = Extension::new(0xABCD, vec![9, 9]);
        let (decoded, _) = Extension::decode(&ext.encode()).unwrap();
        assert_eq!(decoded.extension_type, 0xABCD);
        assert_eq!(decoded.known_type(), None);
        assert_eq!(decoded.encode(), ext.encode());
    }

    #[test]
    fn test_extensions_encode_decode() {
        let mut exts = Extensions::new();
        exts.add(Extension::new(ExtensionType::ServerName.to_u16(), vec![1]));
        exts.add(Extension::new(0xFF01, vec![0]));

        let encoded = exts.encode();
        let decoded = Extensions::decode(&encoded).unwrap();

        assert_eq!(decoded.len(), 2);
        assert!(decoded.has(ExtensionType::ServerName));
        assert!(decoded.has(ExtensionType::RenegotiationInfo));
        assert_eq!(decoded.encode(), encoded);
    }

    #[test]
    fn test_secure_renegotiation_encode() {
        // Initial handshake: empty verify data.
        assert_eq!(SecureRenegotiation::new(Vec::new(), None).encode(), vec![0]);

        // Client side of a renegotiation.
        let reneg = SecureRenegotiation::new(vec![1, 2, 3], None);
        assert_eq!(reneg.encode(), vec![3, 1, 2, 3]);

        // Server side carries both.
        let reneg = SecureRenegotiation::new(vec![1, 2, 3], Some(vec![4, 5]));
        assert_eq!(reneg.encode(), vec![5, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_decode_alpn() {
        // ["h2", "http/1.1"]
        let mut data = Vec::new();
        let body: &[u8] = &[2, b'h', b'2', 8, b'h', b't', b't', b'p', b'/', b'1', b'.', b'1'];
        data.extend_from_slice(&(body.len() as u16).to_be_bytes());
        data.extend_from_slice(body);

        let protocols = decode_alpn_protocols(&data).unwrap();
        assert_eq!(protocols, vec![b"h2".to_vec(), b"http/1.1".to_vec()]);

        assert!(decode_alpn_protocols(&[0, 3, 0]).is_err());
    }

    #[test]
    fn test_decode_server_name() {
        // host_name "example.com"
        let host = b"example.com";
        let mut entry = vec![0u8];
        entry.extend_from_slice(&(host.len() as u16).to_be_bytes());
        entry.extend_from_slice(host);
        let mut data = Vec::new();
        data.extend_from_slice(&(entry.len() as u16).to_be_bytes());
        data.extend_from_slice(&entry);

        assert_eq!(
            decode_server_name(&data).unwrap(),
            Some("example.com".to_string())
        );
    }

    #[test]
    fn test_decode_supported_groups() {
        // x25519 (0x001D), secp256r1 (0x0017)
        let data = [0, 4, 0, 0x1D, 0, 0x17];
        assert_eq!(decode_supported_groups(&data).unwrap(), vec![0x001D, 0x0017]);
        assert!(decode_supported_groups(&[0, 3, 0, 0x1D, 0]).is_err());
    }

    #[test]
    fn test_decode_ec_point_formats() {
        assert_eq!(decode_ec_point_formats(&[1, 0]).unwrap(), vec![0]);
        assert!(decode_ec_point_formats(&[2, 0]).is_err());
    }
}
