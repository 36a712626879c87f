//! Error types for the cryptographic provider.

use std::fmt;

/// Result type for cryptographic operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during cryptographic operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The requested algorithm is not supported by this provider.
    UnsupportedAlgorithm(String),

    /// Invalid public key.
    InvalidPublicKey,

    /// Invalid private key.
    InvalidPrivateKey,

    /// Invalid signature format.
    InvalidSignature,

    /// Signature verification failed.
    SignatureVerificationFailed,

    /// Decryption failed.
    DecryptionFailed,

    /// Random number generation failed.
    RandomGenerationFailed,

    /// General cryptographic error with a message.
    CryptoError(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnsupportedAlgorithm(s) => write!(f, "Algorithm not supported: {}", s),
            Error::InvalidPublicKey => write!(f, "Invalid public key"),
            Error::InvalidPrivateKey => write!(f, "Invalid private key"),
            Error::InvalidSignature => write!(f, "Invalid signature format"),
            Error::SignatureVerificationFailed => write!(f, "Signature verification failed"),
            Error::DecryptionFailed => write!(f, "Decryption failed"),
            Error::RandomGenerationFailed => write!(f, "Random number generation failed"),
            Error::CryptoError(msg) => write!(f, "Cryptographic error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}
