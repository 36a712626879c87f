//! TLS protocol constants and types.

/// TLS protocol version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u16)]
pub enum ProtocolVersion {
    /// SSL 3.0 - Legacy, kept only so pre-TLS version fields decode
    Ssl30 = 0x0300,

    /// TLS 1.0 (RFC 2246) - Legacy, not recommended
    Tls10 = 0x0301,

    /// TLS 1.1 (RFC 4346) - Legacy, not recommended
    Tls11 = 0x0302,

    /// TLS 1.2 (RFC 5246)
    Tls12 = 0x0303,

    /// TLS 1.3 (RFC 8446) - Recommended
    Tls13 = 0x0304,
}

impl ProtocolVersion {
    /// Create from wire format (u16 big-endian).
    pub const fn from_u16(value: u16) -> Option<Self> {
        match value {
            0x0300 => Some(ProtocolVersion::Ssl30),
            0x0301 => Some(ProtocolVersion::Tls10),
            0x0302 => Some(ProtocolVersion::Tls11),
            0x0303 => Some(ProtocolVersion::Tls12),
            0x0304 => Some(ProtocolVersion::Tls13),
            _ => None,
        }
    }

    /// Convert to wire format (u16 big-endian).
    pub const fn to_u16(self) -> u16 {
        self as u16
    }

    /// Get the protocol name.
    pub const fn name(self) -> &'static str {
        match self {
            ProtocolVersion::Ssl30 => "SSL 3.0",
            ProtocolVersion::Tls10 => "TLS 1.0",
            ProtocolVersion::Tls11 => "TLS 1.1",
            ProtocolVersion::Tls12 => "TLS 1.2",
            ProtocolVersion::Tls13 => "TLS 1.3",
        }
    }

    /// Check if this version is considered secure.
    ///
    /// SSL 3.0, TLS 1.0 and TLS 1.1 are no longer considered secure.
    pub const fn is_secure(self) -> bool {
        matches!(self, ProtocolVersion::Tls12 | ProtocolVersion::Tls13)
    }
}

/// TLS content type (RFC 5246 Section 6.2.1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ContentType {
    /// Change cipher spec (20)
    ChangeCipherSpec = 20,

    /// Alert (21)
    Alert = 21,

    /// Handshake (22)
    Handshake = 22,

    /// Application data (23)
    ApplicationData = 23,

    /// SSLv2-compatibility client hello.
    ///
    /// Pseudo-type synthesized by the record layer when it detects SSLv2
    /// framing (high bit set on the first length byte); never appears as a
    /// TLS wire value and is never produced by [`ContentType::from_u8`].
    DeprecatedHandshake = 0x80,
}

impl ContentType {
    /// Create from wire format (u8).
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            20 => Some(ContentType::ChangeCipherSpec),
            21 => Some(ContentType::Alert),
            22 => Some(ContentType::Handshake),
            23 => Some(ContentType::ApplicationData),
            _ => None,
        }
    }

    /// Convert to wire format (u8).
    pub const fn to_u8(self) -> u8 {
        self as u8
    }
}

/// Handshake message type (RFC 5246 Section 7.4).
///
/// Unknown type codes are preserved rather than rejected: the transcript
/// rules classify them, and peers may legitimately send informational
/// messages this implementation does not interpret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandshakeType {
    /// HelloRequest (0)
    HelloRequest,
    /// ClientHello (1)
    ClientHello,
    /// ServerHello (2)
    ServerHello,
    /// Certificate (11)
    Certificate,
    /// ServerKeyExchange (12)
    ServerKeyExchange,
    /// CertificateRequest (13)
    CertificateRequest,
    /// ServerHelloDone (14)
    ServerHelloDone,
    /// CertificateVerify (15)
    CertificateVerify,
    /// ClientKeyExchange (16)
    ClientKeyExchange,
    /// Finished (20)
    Finished,
    /// NextProtocolNegotiation (67) - NPN draft
    NextProtocolNegotiation,
    /// Any type code this implementation does not interpret
    Unknown(u8),
}

impl HandshakeType {
    /// Create from wire format (u8). Total: unrecognized codes map to
    /// [`HandshakeType::Unknown`].
    pub const fn from_u8(value: u8) -> Self {
        match value {
            0 => HandshakeType::HelloRequest,
            1 => HandshakeType::ClientHello,
            2 => HandshakeType::ServerHello,
            11 => HandshakeType::Certificate,
            12 => HandshakeType::ServerKeyExchange,
            13 => HandshakeType::CertificateRequest,
            14 => HandshakeType::ServerHelloDone,
            15 => HandshakeType::CertificateVerify,
            16 => HandshakeType::ClientKeyExchange,
            20 => HandshakeType::Finished,
            67 => HandshakeType::NextProtocolNegotiation,
            other => HandshakeType::Unknown(other),
        }
    }

    /// Convert to wire format (u8).
    pub const fn to_u8(self) -> u8 {
        match self {
            HandshakeType::HelloRequest => 0,
            HandshakeType::ClientHello => 1,
            HandshakeType::ServerHello => 2,
            HandshakeType::Certificate => 11,
            HandshakeType::ServerKeyExchange => 12,
            HandshakeType::CertificateRequest => 13,
            HandshakeType::ServerHelloDone => 14,
            HandshakeType::CertificateVerify => 15,
            HandshakeType::ClientKeyExchange => 16,
            HandshakeType::Finished => 20,
            HandshakeType::NextProtocolNegotiation => 67,
            HandshakeType::Unknown(code) => code,
        }
    }
}

/// TLS extension type (IANA registry).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum ExtensionType {
    /// server_name (0)
    ServerName = 0,

    /// supported_groups (10) - formerly supported_curves
    SupportedGroups = 10,

    /// ec_point_formats (11) - TLS 1.2, RFC 4492
    EcPointFormats = 11,

    /// signature_algorithms (13)
    SignatureAlgorithms = 13,

    /// application_layer_protocol_negotiation (16) - ALPN
    ApplicationLayerProtocolNegotiation = 16,

    /// extended_master_secret (23) - TLS 1.2
    ExtendedMasterSecret = 23,

    /// session_ticket (35)
    SessionTicket = 35,

    /// pre_shared_key (41) - TLS 1.3
    PreSharedKey = 41,

    /// supported_versions (43) - TLS 1.3
    SupportedVersions = 43,

    /// cookie (44) - TLS 1.3
    Cookie = 44,

    /// post_handshake_auth (49) - TLS 1.3
    PostHandshakeAuth = 49,

    /// key_share (51) - TLS 1.3
    KeyShare = 51,

    /// next_protocol_negotiation (0x3374) - NPN draft
    NextProtocolNegotiation = 0x3374,

    /// renegotiation_info (0xFF01) - RFC 5746
    RenegotiationInfo = 0xFF01,
}

impl ExtensionType {
    /// Create from wire format (u16).
    pub const fn from_u16(value: u16) -> Option<Self> {
        match value {
            0 => Some(ExtensionType::ServerName),
            10 => Some(ExtensionType::SupportedGroups),
            11 => Some(ExtensionType::EcPointFormats),
            13 => Some(ExtensionType::SignatureAlgorithms),
            16 => Some(ExtensionType::ApplicationLayerProtocolNegotiation),
            23 => Some(ExtensionType::ExtendedMasterSecret),
            35 => Some(ExtensionType::SessionTicket),
            41 => Some(ExtensionType::PreSharedKey),
            43 => Some(ExtensionType::SupportedVersions),
            44 => Some(ExtensionType::Cookie),
            49 => Some(ExtensionType::PostHandshakeAuth),
            51 => Some(ExtensionType::KeyShare),
            0x3374 => Some(ExtensionType::NextProtocolNegotiation),
            0xFF01 => Some(ExtensionType::RenegotiationInfo),
            _ => None,
        }
    }

    /// Convert to wire format (u16).
    pub const fn to_u16(self) -> u16 {
        self as u16
    }
}
