//! CertificateRequest message (RFC 5246 Section 7.4.4).

use bytes::{Buf, BufMut, BytesMut};

use crate::error::{Error, Result};
use crate::protocol::ProtocolVersion;

/// CertificateRequest message.
///
/// The supported_signature_algorithms field exists on the wire only from
/// TLS 1.2; decode is therefore version-parameterised, and the decoded
/// presence is preserved so re-encoding is lossless.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateRequest {
    /// Acceptable client certificate types
    pub certificate_types: Vec<u8>,

    /// Supported signature algorithms, raw pairs; `Some` from TLS 1.2 on
    pub signature_algorithms: Option<Vec<u16>>,

    /// Acceptable certificate authorities, DER-encoded distinguished names
    pub authorities: Vec<Vec<u8>>,
}

impl CertificateRequest {
    /// Encode the CertificateRequest body (without the handshake header).
    pub fn encode(&self) -> Result<Vec<u8>> {
        let mut buf = BytesMut::new();

        if self.certificate_types.len() > 255 {
            return Err(Error::InvalidMessage("Too many certificate types".into()));
        }
        buf.put_u8(self.certificate_types.len() as u8);
        buf.put_slice(&self.certificate_types);

        if let Some(algorithms) = &self.signature_algorithms {
            buf.put_u16((algorithms.len() * 2) as u16);
            for alg in algorithms {
                buf.put_u16(*alg);
            }
        }

        let mut dn_block = BytesMut::new();
        for dn in &self.authorities {
            dn_block.put_u16(dn.len() as u16);
            dn_block.put_slice(dn);
        }
        buf.put_u16(dn_block.len() as u16);
        buf.put_slice(&dn_block);

        Ok(buf.to_vec())
    }

    /// Decode a CertificateRequest body.
    pub fn decode(version: ProtocolVersion, mut data: &[u8]) -> Result<Self> {
        if data.is_empty() {
            return Err(Error::InvalidMessage("CertificateRequest too short".into()));
        }

        let types_len = data.get_u8() as usize;
        if data.len() < types_len {
            return Err(Error::InvalidMessage("Invalid certificate types".into()));
        }
        let certificate_types = data[..types_len].to_vec();
        data.advance(types_len);

        let signature_algorithms = if version >= ProtocolVersion::Tls12 {
            if data.len() < 2 {
                return Err(Error::InvalidMessage(
                    "Missing signature algorithms".into(),
                ));
            }
            let algs_len = data.get_u16() as usize;
            if algs_len % 2 != 0 || data.len() < algs_len {
                return Err(Error::InvalidMessage(
                    "Invalid signature algorithms".into(),
                ));
            }
            let mut algorithms = Vec::with_capacity(algs_len / 2);
            for _ in 0..algs_len / 2 {
                algorithms.push(data.get_u16());
            }
            Some(algorithms)
        } else {
            None
        };

        if data.len() < 2 {
            return Err(Error::InvalidMessage("Missing authorities".into()));
        }
        let dn_block_len = data.get_u16() as usize;
        if data.len() != dn_block_len {
            return Err(Error::InvalidMessage("Invalid authorities length".into()));
        }

        let mut authorities = Vec::new();
        while data.has_remaining() {
            if data.len() < 2 {
                return Err(Error::InvalidMessage("Truncated authority".into()));
            }
            let len = data.get_u16() as usize;
            if data.len() < len {
                return Err(Error::InvalidMessage("Truncated authority".into()));
            }
            authorities.push(data[..len].to_vec());
            data.advance(len);
        }

        Ok(Self {
            certificate_types,
            signature_algorithms,
            authorities,
        })
    }
}
