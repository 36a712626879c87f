//! Error types for the ferrotls core.
//!
//! All failures in the receive path are values of [`Error`]; there is no
//! other error channel. Internal invariant violations (reading the
//! negotiated version before negotiation, touching handshake scratch while
//! no handshake is in progress) indicate a caller bug and panic instead of
//! surfacing here.

use core::fmt;

/// Result type for ferrotls operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors that can occur while processing received TLS data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Semantic protocol violation.
    ///
    /// Carries the alert the caller should translate into an outbound
    /// alert record.
    Protocol {
        /// Human-readable description of the violation.
        message: String,
        /// Whether the connection must be torn down.
        fatal: bool,
        /// Alert to send to the peer.
        description: AlertDescription,
    },

    /// Malformed wire bytes.
    InvalidMessage(String),

    /// Key-exchange failure surfaced outside the rollback-protected path.
    KeyExchange(KxError),
}

impl Error {
    /// Construct a fatal protocol error.
    pub fn protocol(message: impl Into<String>, description: AlertDescription) -> Self {
        Error::Protocol {
            message: message.into(),
            fatal: true,
            description,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Protocol {
                message,
                fatal,
                description,
            } => {
                let severity = if *fatal { "fatal" } else { "warning" };
                write!(f, "protocol error ({severity}, {description:?}): {message}")
            },
            Error::InvalidMessage(msg) => write!(f, "invalid message: {}", msg),
            Error::KeyExchange(e) => write!(f, "key exchange error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<KxError> for Error {
    fn from(e: KxError) -> Self {
        Error::KeyExchange(e)
    }
}

impl From<ferrotls_crypto::Error> for Error {
    fn from(e: ferrotls_crypto::Error) -> Self {
        Error::KeyExchange(KxError::from(e))
    }
}

/// Key-exchange level errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KxError {
    /// Decryption of key-exchange material failed.
    DecryptFailed,

    /// Signature verification could not be performed.
    VerifyFailed,

    /// The operation is not supported by the provider.
    Unsupported(String),
}

impl fmt::Display for KxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KxError::DecryptFailed => write!(f, "decryption failed"),
            KxError::VerifyFailed => write!(f, "verification failed"),
            KxError::Unsupported(msg) => write!(f, "unsupported operation: {}", msg),
        }
    }
}

impl From<ferrotls_crypto::Error> for KxError {
    fn from(e: ferrotls_crypto::Error) -> Self {
        match e {
            ferrotls_crypto::Error::DecryptionFailed => KxError::DecryptFailed,
            ferrotls_crypto::Error::SignatureVerificationFailed
            | ferrotls_crypto::Error::InvalidSignature => KxError::VerifyFailed,
            ferrotls_crypto::Error::UnsupportedAlgorithm(s) => KxError::Unsupported(s),
            other => KxError::Unsupported(other.to_string()),
        }
    }
}

/// TLS alert descriptions (RFC 5246 Section 7.2, RFC 8446 Section 6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum AlertDescription {
    /// Close notify
    CloseNotify = 0,

    /// Unexpected message
    UnexpectedMessage = 10,

    /// Bad record MAC
    BadRecordMac = 20,

    /// Record overflow
    RecordOverflow = 22,

    /// Decompression failure (TLS 1.2 and below)
    DecompressionFailure = 30,

    /// Handshake failure
    HandshakeFailure = 40,

    /// Bad certificate
    BadCertificate = 42,

    /// Unsupported certificate
    UnsupportedCertificate = 43,

    /// Certificate revoked
    CertificateRevoked = 44,

    /// Certificate expired
    CertificateExpired = 45,

    /// Certificate unknown
    CertificateUnknown = 46,

    /// Illegal parameter
    IllegalParameter = 47,

    /// Unknown CA
    UnknownCa = 48,

    /// Access denied
    AccessDenied = 49,

    /// Decode error
    DecodeError = 50,

    /// Decrypt error
    DecryptError = 51,

    /// Protocol version
    ProtocolVersion = 70,

    /// Insufficient security
    InsufficientSecurity = 71,

    /// Internal error
    InternalError = 80,

    /// Inappropriate fallback
    InappropriateFallback = 86,

    /// User canceled
    UserCanceled = 90,

    /// No renegotiation (TLS 1.2 and below)
    NoRenegotiation = 100,

    /// Missing extension
    MissingExtension = 109,

    /// Unsupported extension
    UnsupportedExtension = 110,

    /// Unrecognized name
    UnrecognizedName = 112,

    /// Bad certificate status response
    BadCertificateStatusResponse = 113,

    /// Unknown PSK identity
    UnknownPskIdentity = 115,

    /// Certificate required
    CertificateRequired = 116,

    /// No application protocol
    NoApplicationProtocol = 120,
}

impl AlertDescription {
    /// Convert from wire format (u8).
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(AlertDescription::CloseNotify),
            10 => Some(AlertDescription::UnexpectedMessage),
            20 => Some(AlertDescription::BadRecordMac),
            22 => Some(AlertDescription::RecordOverflow),
            30 => Some(AlertDescription::DecompressionFailure),
            40 => Some(AlertDescription::HandshakeFailure),
            42 => Some(AlertDescription::BadCertificate),
            43 => Some(AlertDescription::UnsupportedCertificate),
            44 => Some(AlertDescription::CertificateRevoked),
            45 => Some(AlertDescription::CertificateExpired),
            46 => Some(AlertDescription::CertificateUnknown),
            47 => Some(AlertDescription::IllegalParameter),
            48 => Some(AlertDescription::UnknownCa),
            49 => Some(AlertDescription::AccessDenied),
            50 => Some(AlertDescription::DecodeError),
            51 => Some(AlertDescription::DecryptError),
            70 => Some(AlertDescription::ProtocolVersion),
            71 => Some(AlertDescription::InsufficientSecurity),
            80 => Some(AlertDescription::InternalError),
            86 => Some(AlertDescription::InappropriateFallback),
            90 => Some(AlertDescription::UserCanceled),
            100 => Some(AlertDescription::NoRenegotiation),
            109 => Some(AlertDescription::MissingExtension),
            110 => Some(AlertDescription::UnsupportedExtension),
            112 => Some(AlertDescription::UnrecognizedName),
            113 => Some(AlertDescription::BadCertificateStatusResponse),
            115 => Some(AlertDescription::UnknownPskIdentity),
            116 => Some(AlertDescription::CertificateRequired),
            120 => Some(AlertDescription::NoApplicationProtocol),
            _ => None,
        }
    }

    /// Convert to wire format (u8).
    pub const fn to_u8(self) -> u8 {
        self as u8
    }

    /// Check if this alert is always fatal.
    pub const fn is_fatal(self) -> bool {
        !matches!(
            self,
            AlertDescription::CloseNotify
                | AlertDescription::UserCanceled
                | AlertDescription::NoRenegotiation
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alert_description_conversion() {
        assert_eq!(
            AlertDescription::from_u8(20),
            Some(AlertDescription::BadRecordMac)
        );
        assert_eq!(
            AlertDescription::from_u8(40),
            Some(AlertDescription::HandshakeFailure)
        );
        assert_eq!(AlertDescription::from_u8(255), None);

        assert_eq!(AlertDescription::BadRecordMac.to_u8(), 20);
        assert_eq!(AlertDescription::HandshakeFailure.to_u8(), 40);
    }

    #[test]
    fn test_protocol_error_construction() {
        let err = Error::protocol("bad record mac", AlertDescription::BadRecordMac);
        match err {
            Error::Protocol {
                message,
                fatal,
                description,
            } => {
                assert_eq!(message, "bad record mac");
                assert!(fatal);
                assert_eq!(description, AlertDescription::BadRecordMac);
            },
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_crypto_error_wrapping() {
        let err: Error = ferrotls_crypto::Error::DecryptionFailed.into();
        assert_eq!(err, Error::KeyExchange(KxError::DecryptFailed));
    }
}
