//! Opaque key material holders.
//!
//! Keys are carried as DER bytes and interpreted by the provider. Keeping
//! the parsed representation out of the interface keeps the trait layer
//! free of any particular cryptography backend.

use zeroize::Zeroizing;

/// A peer public key, as the DER-encoded SubjectPublicKeyInfo taken from a
/// certificate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKey {
    spki: Vec<u8>,
}

impl PublicKey {
    /// Wrap SubjectPublicKeyInfo DER bytes.
    pub fn from_spki_der(spki: Vec<u8>) -> Self {
        Self { spki }
    }

    /// The DER-encoded SubjectPublicKeyInfo.
    pub fn spki_der(&self) -> &[u8] {
        &self.spki
    }
}

/// A local RSA private key, as PKCS#8 DER. Zeroized on drop.
#[derive(Debug, Clone)]
pub struct RsaPrivateKey {
    der: Zeroizing<Vec<u8>>,
}

impl RsaPrivateKey {
    /// Wrap PKCS#8 DER bytes.
    pub fn from_pkcs8_der(der: Vec<u8>) -> Self {
        Self {
            der: Zeroizing::new(der),
        }
    }

    /// The PKCS#8 DER encoding.
    pub fn pkcs8_der(&self) -> &[u8] {
        &self.der
    }
}
