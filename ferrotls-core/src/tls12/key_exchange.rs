//! RSA key-transport processing for TLS 1.2.
//!
//! The encrypted premaster from ClientKeyExchange is decrypted with the
//! version-rollback countermeasure from the original Bleichenbacher-era
//! fix (CVE-2003-0147): a random 48-byte fallback is drawn *before*
//! decryption, and any failure — RSA error, malformed premaster, or a
//! premaster whose embedded version disagrees with the ClientHello
//! version — silently substitutes the fallback. Both outcomes then run the
//! identical master-secret derivation, so nothing about success or failure
//! is observable to an attacker who tampered with the ciphertext.

use ferrotls_crypto::{CryptoProvider, HashAlgorithm};
use zeroize::Zeroizing;

use crate::error::{Error, KxError, Result};
use crate::protocol::ProtocolVersion;
use crate::session::{Role, SessionState};
use crate::tls12::prf;

/// Premaster secret length for RSA key transport (RFC 5246 Section 7.4.7.1).
pub const PREMASTER_SIZE: usize = 48;

/// Process the encrypted premaster from a ClientKeyExchange (server side).
///
/// Never surfaces a decryption failure; see the module documentation.
pub fn process_client_key_exchange(
    state: &mut SessionState,
    provider: &dyn CryptoProvider,
    body: &[u8],
) -> Result<()> {
    let version = state.version();
    let (client_version, private_key) = {
        let hs = state.handshake();
        let key = hs
            .rsa_private_key
            .clone()
            .expect("server RSA private key has not been installed");
        (hs.client_version, key)
    };

    // Drawn before decryption so the fallback cost is paid on every path.
    let fallback = Zeroizing::new(state.draw_random(PREMASTER_SIZE));

    // From TLS 1.0 the encrypted premaster is wrapped in a two-byte
    // length prefix; SSL 3.0 sent it bare.
    let ciphertext = if version >= ProtocolVersion::Tls10 {
        body.get(2..).unwrap_or(&[])
    } else {
        body
    };

    let decrypted = state.with_rng(|rng| provider.rsa_decrypt(rng, &private_key, ciphertext));

    let premaster: Zeroizing<Vec<u8>> = match decrypted {
        Ok(plain) if premaster_version(&plain) == Some(client_version) => Zeroizing::new(plain),
        _ => fallback,
    };

    set_master_secret_from_pre(state, provider, &premaster)
}

/// The version embedded in a well-formed premaster, if it is well-formed.
fn premaster_version(premaster: &[u8]) -> Option<ProtocolVersion> {
    if premaster.len() != PREMASTER_SIZE {
        return None;
    }
    ProtocolVersion::from_u16(u16::from_be_bytes([premaster[0], premaster[1]]))
}

/// Derive and store the master secret from a premaster secret.
///
/// The only key-schedule entry point this crate owns; everything past the
/// master secret is derived elsewhere.
pub fn set_master_secret_from_pre(
    state: &mut SessionState,
    provider: &dyn CryptoProvider,
    premaster: &[u8],
) -> Result<()> {
    let (hash, client_random, server_random) = {
        let hs = state.handshake();
        let cipher = hs.pending_cipher();
        (
            cipher.hash,
            hs.client_random,
            hs.server_random
                .expect("server random has not been recorded"),
        )
    };

    let master =
        prf::compute_master_secret(provider, hash, premaster, &client_random, &server_random)?;
    state.handshake_mut().master_secret = Some(Zeroizing::new(master));
    Ok(())
}

/// Verify an RSA signature against the peer's observed public key.
///
/// Used for CertificateVerify: the server checks the client's key, the
/// client checks the server's. Does not mutate state.
///
/// # Panics
///
/// Panics if no peer public key has been observed; CertificateVerify
/// without a preceding Certificate is rejected before reaching this point.
pub fn verify_rsa(
    state: &SessionState,
    provider: &dyn CryptoProvider,
    algorithm: HashAlgorithm,
    message: &[u8],
    signature: &[u8],
) -> Result<bool> {
    let hs = state.handshake();
    let key = match state.role() {
        Role::Server => hs.client_public_key.as_ref(),
        Role::Client => hs.public_key.as_ref(),
    }
    .expect("peer public key has not been observed");

    provider
        .rsa_verify(key, algorithm, message, signature)
        .map_err(|e| Error::KeyExchange(KxError::from(e)))
}
