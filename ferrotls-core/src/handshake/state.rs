//! Handshake-scoped state.
//!
//! Allocated when a handshake starts and torn down after Finished; holds
//! the cryptographic scratch that has no meaning outside a handshake.

use ferrotls_crypto::{PublicKey, RsaPrivateKey};
use zeroize::Zeroizing;

use crate::cipher::CipherSuite;
use crate::protocol::ProtocolVersion;
use crate::transcript::HandshakeTranscript;

/// State scoped to one in-progress handshake.
#[derive(Debug)]
pub struct HandshakeState {
    /// Cipher chosen by ServerHello; pending until the cipher-spec switch.
    pub pending_cipher: Option<&'static CipherSuite>,

    /// Version advertised in ClientHello, retained verbatim for the
    /// premaster anti-rollback check.
    pub client_version: ProtocolVersion,

    /// Client random from ClientHello.
    pub client_random: [u8; 32],

    /// Server random from ServerHello.
    pub server_random: Option<[u8; 32]>,

    /// Handshake transcript (CertificateVerify buffer + Finished digest).
    pub transcript: HandshakeTranscript,

    /// Server public key observed in Certificate (client side).
    pub public_key: Option<PublicKey>,

    /// Client public key observed in Certificate (server side).
    pub client_public_key: Option<PublicKey>,

    /// Local RSA private key for RSA key transport (server side).
    pub rsa_private_key: Option<RsaPrivateKey>,

    /// Master secret, once derived from the premaster.
    pub master_secret: Option<Zeroizing<Vec<u8>>>,

    /// NPN protocol staged during the handshake.
    pub negotiated_protocol: Option<Vec<u8>>,
}

impl HandshakeState {
    /// Create fresh handshake state.
    pub fn new(client_version: ProtocolVersion, client_random: [u8; 32]) -> Self {
        Self {
            pending_cipher: None,
            client_version,
            client_random,
            server_random: None,
            transcript: HandshakeTranscript::new(),
            public_key: None,
            client_public_key: None,
            rsa_private_key: None,
            master_secret: None,
            negotiated_protocol: None,
        }
    }

    /// The pending cipher.
    ///
    /// # Panics
    ///
    /// Panics if no cipher has been chosen yet; code paths that need the
    /// cipher run after ServerHello by construction.
    pub fn pending_cipher(&self) -> &'static CipherSuite {
        self.pending_cipher
            .expect("no cipher has been negotiated yet")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_state() {
        let hs = HandshakeState::new(ProtocolVersion::Tls12, [5u8; 32]);
        assert_eq!(hs.client_version, ProtocolVersion::Tls12);
        assert_eq!(hs.client_random, [5u8; 32]);
        assert!(hs.pending_cipher.is_none());
        assert!(hs.transcript.is_empty());
        assert!(hs.master_secret.is_none());
    }

    #[test]
    #[should_panic(expected = "no cipher has been negotiated")]
    fn test_pending_cipher_asserts() {
        let hs = HandshakeState::new(ProtocolVersion::Tls12, [0u8; 32]);
        let _ = hs.pending_cipher();
    }
}
