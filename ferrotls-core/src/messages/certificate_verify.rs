//! CertificateVerify message (RFC 5246 Section 7.4.8).

use bytes::{Buf, BufMut, BytesMut};

use crate::error::{Error, Result};
use crate::protocol::ProtocolVersion;

/// A digitally-signed element.
///
/// From TLS 1.2 the signature is preceded by the SignatureAndHashAlgorithm
/// pair; decode is version-parameterised and the presence is preserved for
/// lossless re-encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigitallySigned {
    /// SignatureAndHashAlgorithm, raw pair; `Some` from TLS 1.2 on
    pub algorithm: Option<u16>,

    /// Signature bytes
    pub signature: Vec<u8>,
}

impl DigitallySigned {
    /// Encode the CertificateVerify body (without the handshake header).
    pub fn encode(&self) -> Result<Vec<u8>> {
        let mut buf = BytesMut::new();

        if let Some(algorithm) = self.algorithm {
            buf.put_u16(algorithm);
        }

        if self.signature.len() > 0xFFFF {
            return Err(Error::InvalidMessage("Signature too large".into()));
        }
        buf.put_u16(self.signature.len() as u16);
        buf.put_slice(&self.signature);

        Ok(buf.to_vec())
    }

    /// Decode a CertificateVerify body.
    pub fn decode(version: ProtocolVersion, mut data: &[u8]) -> Result<Self> {
        let algorithm = if version >= ProtocolVersion::Tls12 {
            if data.len() < 2 {
                return Err(Error::InvalidMessage("CertificateVerify too short".into()));
            }
            Some(data.get_u16())
        } else {
            None
        };

        if data.len() < 2 {
            return Err(Error::InvalidMessage("CertificateVerify too short".into()));
        }
        let sig_len = data.get_u16() as usize;
        if data.len() != sig_len {
            return Err(Error::InvalidMessage("Invalid signature length".into()));
        }

        Ok(Self {
            algorithm,
            signature: data.to_vec(),
        })
    }
}
