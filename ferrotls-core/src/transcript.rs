//! Handshake transcript maintenance.
//!
//! Two views of the handshake transcript are kept, fed from disjoint (but
//! overlapping) subsets of the handshake messages:
//!
//! - the **CertificateVerify material**: the concatenated raw wire bytes of
//!   the messages a CertificateVerify signature covers;
//! - the **Finished material**: the running hash input for Finished verify
//!   data.
//!
//! The digest is kept as the ordered message list and hashed on demand.
//! That is observably identical to a streaming hash context and lets the
//! transcript accumulate before ServerHello has fixed the hash algorithm.

use ferrotls_crypto::{CryptoProvider, HashAlgorithm};

use crate::error::Result;
use crate::protocol::HandshakeType;

/// Whether a handshake message type feeds the Finished digest.
///
/// HelloRequest and Finished itself are excluded. Types this implementation
/// does not interpret are *included*: a peer that folds a new informational
/// message into its own digest must see us do the same.
pub fn is_finished_material(ty: HandshakeType) -> bool {
    !matches!(ty, HandshakeType::HelloRequest | HandshakeType::Finished)
}

/// Whether a handshake message type is covered by a CertificateVerify
/// signature.
///
/// This set is closed: unknown types are excluded.
pub fn is_cert_verify_material(ty: HandshakeType) -> bool {
    matches!(
        ty,
        HandshakeType::ClientHello
            | HandshakeType::ServerHello
            | HandshakeType::Certificate
            | HandshakeType::ServerHelloDone
            | HandshakeType::ClientKeyExchange
            | HandshakeType::ServerKeyExchange
            | HandshakeType::CertificateRequest
    )
}

/// Handshake transcript accumulator.
#[derive(Debug, Clone, Default)]
pub struct HandshakeTranscript {
    /// Finished-material messages, in wire order, hashed lazily.
    digest_messages: Vec<Vec<u8>>,

    /// Concatenated CertificateVerify-material wire bytes.
    cert_verify_messages: Vec<u8>,
}

impl HandshakeTranscript {
    /// Create an empty transcript.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one handshake message's authoritative wire bytes.
    ///
    /// Applies both material-set rules; a message may land in either view,
    /// both, or neither.
    pub fn update(&mut self, ty: HandshakeType, encoded: &[u8]) {
        if is_cert_verify_material(ty) {
            self.cert_verify_messages.extend_from_slice(encoded);
        }
        if is_finished_material(ty) {
            self.digest_messages.push(encoded.to_vec());
        }
    }

    /// Hash of the Finished-material transcript so far.
    pub fn finished_hash(
        &self,
        provider: &dyn CryptoProvider,
        algorithm: HashAlgorithm,
    ) -> Result<Vec<u8>> {
        let mut hasher = provider.hash(algorithm)?;
        for msg in &self.digest_messages {
            hasher.update(msg);
        }
        Ok(hasher.finalize())
    }

    /// The CertificateVerify-material bytes so far.
    pub fn cert_verify_bytes(&self) -> &[u8] {
        &self.cert_verify_messages
    }

    /// Number of messages folded into the Finished digest.
    pub fn digest_message_count(&self) -> usize {
        self.digest_messages.len()
    }

    /// Check if nothing has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.digest_messages.is_empty() && self.cert_verify_messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ferrotls_crypto::CryptoProvider;
    use ferrotls_crypto_rustcrypto::RustCryptoProvider;

    #[test]
    fn test_material_sets() {
        // The seven CertificateVerify-material types.
        for ty in [
            HandshakeType::ClientHello,
            HandshakeType::ServerHello,
            HandshakeType::Certificate,
            HandshakeType::ServerHelloDone,
            HandshakeType::ClientKeyExchange,
            HandshakeType::ServerKeyExchange,
            HandshakeType::CertificateRequest,
        ] {
            assert!(is_cert_verify_material(ty), "{ty:?}");
            assert!(is_finished_material(ty), "{ty:?}");
        }

        // CertificateVerify is Finished material only.
        assert!(!is_cert_verify_material(HandshakeType::CertificateVerify));
        assert!(is_finished_material(HandshakeType::CertificateVerify));

        // HelloRequest and Finished are in neither set.
        assert!(!is_cert_verify_material(HandshakeType::HelloRequest));
        assert!(!is_finished_material(HandshakeType::HelloRequest));
        assert!(!is_cert_verify_material(HandshakeType::Finished));
        assert!(!is_finished_material(HandshakeType::Finished));
    }

    #[test]
    fn test_unknown_type_asymmetry() {
        // Unknown types fold into the Finished digest but never into the
        // CertificateVerify buffer.
        let unknown = HandshakeType::Unknown(99);
        assert!(is_finished_material(unknown));
        assert!(!is_cert_verify_material(unknown));

        let mut transcript = HandshakeTranscript::new();
        transcript.update(unknown, &[0xAB, 0xCD]);
        assert_eq!(transcript.digest_message_count(), 1);
        assert!(transcript.cert_verify_bytes().is_empty());
    }

    #[test]
    fn test_cert_verify_bytes_exact_extension() {
        let mut transcript = HandshakeTranscript::new();
        transcript.update(HandshakeType::ClientHello, &[1, 2, 3]);

        let before = transcript.cert_verify_bytes().to_vec();
        transcript.update(HandshakeType::ServerHello, &[4, 5]);

        let mut expected = before;
        expected.extend_from_slice(&[4, 5]);
        assert_eq!(transcript.cert_verify_bytes(), &expected[..]);

        // A Finished-only message must not extend the buffer.
        transcript.update(HandshakeType::CertificateVerify, &[9, 9, 9]);
        assert_eq!(transcript.cert_verify_bytes(), &expected[..]);
    }

    #[test]
    fn test_finished_hash_incremental() {
        let provider = RustCryptoProvider::new();

        let mut transcript = HandshakeTranscript::new();
        transcript.update(HandshakeType::ClientHello, b"first");
        let h1 = transcript
            .finished_hash(&provider, HashAlgorithm::Sha256)
            .unwrap();

        transcript.update(HandshakeType::ServerHello, b"second");
        let h2 = transcript
            .finished_hash(&provider, HashAlgorithm::Sha256)
            .unwrap();

        // H(prev-material || new-message): recompute directly.
        let mut hasher = provider.hash(HashAlgorithm::Sha256).unwrap();
        hasher.update(b"first");
        hasher.update(b"second");
        assert_eq!(h2, hasher.finalize());
        assert_ne!(h1, h2);
    }

    #[test]
    fn test_excluded_types_do_not_change_hash() {
        let provider = RustCryptoProvider::new();

        let mut transcript = HandshakeTranscript::new();
        transcript.update(HandshakeType::ClientHello, b"hello");
        let before = transcript
            .finished_hash(&provider, HashAlgorithm::Sha256)
            .unwrap();

        transcript.update(HandshakeType::HelloRequest, &[0, 0, 0, 0]);
        transcript.update(HandshakeType::Finished, &[20, 0, 0, 12]);
        let after = transcript
            .finished_hash(&provider, HashAlgorithm::Sha256)
            .unwrap();

        assert_eq!(before, after);
    }
}
