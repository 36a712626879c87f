//! TLS handshake messages and their wire codec.
//!
//! Decoding is **lossless**: the handshake processor re-encodes every
//! message to obtain the authoritative transcript bytes, so decode must
//! preserve raw identifiers, optional blocks, and unknown content exactly.

pub mod certificate;
pub mod certificate_request;
pub mod certificate_verify;
pub mod client_hello;
pub mod server_hello;

pub use certificate::CertificateChain;
pub use certificate_request::CertificateRequest;
pub use certificate_verify::DigitallySigned;
pub use client_hello::ClientHello;
pub use server_hello::ServerHello;

use bytes::Buf;

use crate::cipher::KeyExchangeKind;
use crate::error::{Error, Result};
use crate::protocol::{HandshakeType, ProtocolVersion};

/// Handshake header size: one type byte plus a 24-bit length.
pub const HANDSHAKE_HEADER_SIZE: usize = 4;

/// One decoded handshake message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandshakeMessage {
    /// HelloRequest (empty body)
    HelloRequest,
    /// ClientHello
    ClientHello(ClientHello),
    /// ServerHello
    ServerHello(ServerHello),
    /// Certificate chain
    Certificate(CertificateChain),
    /// ServerKeyExchange; body kept opaque, its shape depends on the
    /// negotiated key exchange
    ServerKeyExchange(Vec<u8>),
    /// CertificateRequest
    CertificateRequest(CertificateRequest),
    /// ServerHelloDone (empty body)
    ServerHelloDone,
    /// CertificateVerify
    CertificateVerify(DigitallySigned),
    /// ClientKeyExchange; body kept opaque, its shape depends on the
    /// negotiated key exchange
    ClientKeyExchange(Vec<u8>),
    /// Finished verify data
    Finished(Vec<u8>),
    /// NextProtocolNegotiation (NPN draft)
    NextProtocolNegotiation(NextProtocol),
    /// A message type this implementation does not interpret; body kept
    /// verbatim so the transcript rules can still apply
    Unknown(u8, Vec<u8>),
}

impl HandshakeMessage {
    /// The wire type of this message.
    pub fn handshake_type(&self) -> HandshakeType {
        match self {
            HandshakeMessage::HelloRequest => HandshakeType::HelloRequest,
            HandshakeMessage::ClientHello(_) => HandshakeType::ClientHello,
            HandshakeMessage::ServerHello(_) => HandshakeType::ServerHello,
            HandshakeMessage::Certificate(_) => HandshakeType::Certificate,
            HandshakeMessage::ServerKeyExchange(_) => HandshakeType::ServerKeyExchange,
            HandshakeMessage::CertificateRequest(_) => HandshakeType::CertificateRequest,
            HandshakeMessage::ServerHelloDone => HandshakeType::ServerHelloDone,
            HandshakeMessage::CertificateVerify(_) => HandshakeType::CertificateVerify,
            HandshakeMessage::ClientKeyExchange(_) => HandshakeType::ClientKeyExchange,
            HandshakeMessage::Finished(_) => HandshakeType::Finished,
            HandshakeMessage::NextProtocolNegotiation(_) => HandshakeType::NextProtocolNegotiation,
            HandshakeMessage::Unknown(code, _) => HandshakeType::Unknown(*code),
        }
    }
}

/// NextProtocolNegotiation payload (NPN draft, Section 3).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NextProtocol {
    /// Peer-selected protocol
    pub selected: Vec<u8>,

    /// Padding bytes, preserved verbatim
    pub padding: Vec<u8>,
}

impl NextProtocol {
    fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(2 + self.selected.len() + self.padding.len());
        buf.push(self.selected.len() as u8);
        buf.extend_from_slice(&self.selected);
        buf.push(self.padding.len() as u8);
        buf.extend_from_slice(&self.padding);
        buf
    }

    fn decode(mut data: &[u8]) -> Result<Self> {
        if data.is_empty() {
            return Err(Error::InvalidMessage("NextProtocol too short".into()));
        }
        let selected_len = data.get_u8() as usize;
        if data.len() < selected_len {
            return Err(Error::InvalidMessage("Invalid NextProtocol payload".into()));
        }
        let selected = data[..selected_len].to_vec();
        data.advance(selected_len);

        if data.is_empty() {
            return Err(Error::InvalidMessage("NextProtocol too short".into()));
        }
        let padding_len = data.get_u8() as usize;
        if data.len() != padding_len {
            return Err(Error::InvalidMessage("Invalid NextProtocol padding".into()));
        }
        let padding = data.to_vec();

        Ok(Self { selected, padding })
    }
}

/// Decode parameters for the structural handshake decoder.
///
/// A snapshot of negotiation state: the version from the enclosing record
/// header, the pending cipher's key-exchange kind (once known), and whether
/// the NPN extension is in play.
#[derive(Debug, Clone, Copy)]
pub struct DecodeParams {
    /// Version from the record header.
    pub version: ProtocolVersion,

    /// Pending cipher's key-exchange kind, if a cipher has been chosen.
    pub key_exchange: Option<KeyExchangeKind>,

    /// Whether the NPN extension was negotiated.
    pub supports_npn: bool,
}

/// Split a handshake fragment into `(type, body)` items.
///
/// Handshake messages are length-prefixed and may span records; bytes of a
/// trailing incomplete message are returned as the leftover for the caller
/// to park until the next record arrives.
pub fn decode_handshake_stream(input: &[u8]) -> (Vec<(HandshakeType, Vec<u8>)>, Vec<u8>) {
    let mut items = Vec::new();
    let mut rest = input;

    loop {
        if rest.len() < HANDSHAKE_HEADER_SIZE {
            return (items, rest.to_vec());
        }
        let ty = HandshakeType::from_u8(rest[0]);
        let len = certificate::decode_u24(&rest[1..4]) as usize;
        if rest.len() < HANDSHAKE_HEADER_SIZE + len {
            return (items, rest.to_vec());
        }

        items.push((
            ty,
            rest[HANDSHAKE_HEADER_SIZE..HANDSHAKE_HEADER_SIZE + len].to_vec(),
        ));
        rest = &rest[HANDSHAKE_HEADER_SIZE + len..];
    }
}

/// Structurally decode one handshake message body.
pub fn decode_handshake(
    params: &DecodeParams,
    ty: HandshakeType,
    body: &[u8],
) -> Result<HandshakeMessage> {
    match ty {
        HandshakeType::HelloRequest => {
            expect_empty(body, "HelloRequest")?;
            Ok(HandshakeMessage::HelloRequest)
        },
        HandshakeType::ClientHello => Ok(HandshakeMessage::ClientHello(ClientHello::decode(body)?)),
        HandshakeType::ServerHello => Ok(HandshakeMessage::ServerHello(ServerHello::decode(body)?)),
        HandshakeType::Certificate => Ok(HandshakeMessage::Certificate(CertificateChain::decode(
            body,
        )?)),
        HandshakeType::ServerKeyExchange => {
            // Interpreted later against params.key_exchange; carried opaque.
            Ok(HandshakeMessage::ServerKeyExchange(body.to_vec()))
        },
        HandshakeType::CertificateRequest => Ok(HandshakeMessage::CertificateRequest(
            CertificateRequest::decode(params.version, body)?,
        )),
        HandshakeType::ServerHelloDone => {
            expect_empty(body, "ServerHelloDone")?;
            Ok(HandshakeMessage::ServerHelloDone)
        },
        HandshakeType::CertificateVerify => Ok(HandshakeMessage::CertificateVerify(
            DigitallySigned::decode(params.version, body)?,
        )),
        HandshakeType::ClientKeyExchange => {
            Ok(HandshakeMessage::ClientKeyExchange(body.to_vec()))
        },
        HandshakeType::Finished => Ok(HandshakeMessage::Finished(body.to_vec())),
        HandshakeType::NextProtocolNegotiation => {
            if params.supports_npn {
                Ok(HandshakeMessage::NextProtocolNegotiation(
                    NextProtocol::decode(body)?,
                ))
            } else {
                Ok(HandshakeMessage::Unknown(ty.to_u8(), body.to_vec()))
            }
        },
        HandshakeType::Unknown(code) => Ok(HandshakeMessage::Unknown(code, body.to_vec())),
    }
}

/// Encode one handshake message with its header: the authoritative wire
/// bytes the transcript records.
///
/// An SSLv2-framed ClientHello re-encodes to its raw bytes as received,
/// without a TLS handshake header.
pub fn encode_handshake(msg: &HandshakeMessage) -> Result<Vec<u8>> {
    if let HandshakeMessage::ClientHello(ch) = msg {
        if let Some(raw) = &ch.deprecated_raw {
            return Ok(raw.clone());
        }
    }

    let body = match msg {
        HandshakeMessage::HelloRequest | HandshakeMessage::ServerHelloDone => Vec::new(),
        HandshakeMessage::ClientHello(ch) => ch.encode()?,
        HandshakeMessage::ServerHello(sh) => sh.encode()?,
        HandshakeMessage::Certificate(chain) => chain.encode()?,
        HandshakeMessage::ServerKeyExchange(body) => body.clone(),
        HandshakeMessage::CertificateRequest(req) => req.encode()?,
        HandshakeMessage::CertificateVerify(signed) => signed.encode()?,
        HandshakeMessage::ClientKeyExchange(body) => body.clone(),
        HandshakeMessage::Finished(data) => data.clone(),
        HandshakeMessage::NextProtocolNegotiation(np) => np.encode(),
        HandshakeMessage::Unknown(_, body) => body.clone(),
    };

    if body.len() > 0xFF_FFFF {
        return Err(Error::InvalidMessage("Handshake message too large".into()));
    }

    let mut out = Vec::with_capacity(HANDSHAKE_HEADER_SIZE + body.len());
    out.push(msg.handshake_type().to_u8());
    out.extend_from_slice(&certificate::encode_u24(body.len() as u32));
    out.extend_from_slice(&body);
    Ok(out)
}

/// Decode an SSLv2-framed ClientHello (RFC 5246 Appendix E.2).
///
/// The fragment starts at the V2 message type byte; the raw bytes are
/// retained on the decoded message so the transcript sees the hello exactly
/// as received.
pub fn decode_deprecated_handshake(fragment: &[u8]) -> Result<HandshakeMessage> {
    let mut data = fragment;

    if data.len() < 9 {
        return Err(Error::InvalidMessage("V2 ClientHello too short".into()));
    }
    if data.get_u8() != 1 {
        return Err(Error::InvalidMessage("Not a V2 ClientHello".into()));
    }

    let version_raw = data.get_u16();
    let client_version = ProtocolVersion::from_u16(version_raw)
        .ok_or_else(|| Error::InvalidMessage("Invalid V2 ClientHello version".into()))?;

    let cipher_spec_len = data.get_u16() as usize;
    let session_id_len = data.get_u16() as usize;
    let challenge_len = data.get_u16() as usize;

    if cipher_spec_len % 3 != 0
        || data.len() != cipher_spec_len + session_id_len + challenge_len
    {
        return Err(Error::InvalidMessage("Invalid V2 ClientHello lengths".into()));
    }

    // V2 cipher specs are three bytes; only those carrying TLS suites
    // (leading zero byte) are meaningful here.
    let mut cipher_suites = Vec::new();
    for spec in data[..cipher_spec_len].chunks_exact(3) {
        if spec[0] == 0 {
            cipher_suites.push(u16::from_be_bytes([spec[1], spec[2]]));
        }
    }
    data.advance(cipher_spec_len);

    let session_id = data[..session_id_len].to_vec();
    data.advance(session_id_len);

    // The challenge becomes the client random, left-padded or truncated
    // to 32 bytes.
    let challenge = &data[..challenge_len];
    let mut random = [0u8; 32];
    if challenge_len >= 32 {
        random.copy_from_slice(&challenge[challenge_len - 32..]);
    } else {
        random[32 - challenge_len..].copy_from_slice(challenge);
    }

    Ok(HandshakeMessage::ClientHello(ClientHello {
        client_version,
        random,
        session_id,
        cipher_suites,
        compression_methods: vec![0],
        extensions: None,
        deprecated_raw: Some(fragment.to_vec()),
    }))
}

fn expect_empty(body: &[u8], what: &str) -> Result<()> {
    if body.is_empty() {
        Ok(())
    } else {
        Err(Error::InvalidMessage(format!(
            "{} carries unexpected payload",
            what
        )))
    }
}
