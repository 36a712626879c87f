//! Handshake message processing.
//!
//! [`process_handshake`] applies one decoded handshake message to the
//! connection state: role-gated side effects first, then the transcript
//! update with the message's authoritative re-encoded wire bytes. The
//! ordering is observable; side effects may read the pre-update transcript.
//!
//! ServerHello has a dedicated client-side entry point,
//! [`process_server_hello`], because it must run before the pending cipher
//! is known. The caller drives both it and the generic path on the same
//! message; the two effects are disjoint.

use ferrotls_crypto::{CryptoProvider, PublicKey};
use subtle::ConstantTimeEq;

use crate::cipher::{self, KeyExchangeKind};
use crate::error::{AlertDescription, Error, Result};
use crate::extensions::{self, Extension, SecureRenegotiation};
use crate::messages::{self, CertificateChain, HandshakeMessage};
use crate::protocol::ExtensionType;
use crate::session::{Role, SessionState};
use crate::tls12;
use crate::transcript::{is_cert_verify_material, is_finished_material};
use crate::x509;

/// Apply one handshake message to the connection state.
pub fn process_handshake(
    state: &mut SessionState,
    provider: &dyn CryptoProvider,
    msg: &HandshakeMessage,
) -> Result<()> {
    match msg {
        HandshakeMessage::ClientHello(ch) if state.role() == Role::Server => {
            if let Some(exts) = &ch.extensions {
                for ext in exts.iter() {
                    process_client_hello_extension(state, ext)?;
                }
            }
            state.begin_handshake(ch.client_version, ch.random);
        },
        HandshakeMessage::Certificate(chain) => process_certificates(state, chain)?,
        HandshakeMessage::ClientKeyExchange(body) if state.role() == Role::Server => {
            if state.handshake().pending_cipher().kx == KeyExchangeKind::Rsa {
                tls12::key_exchange::process_client_key_exchange(state, provider, body)?;
            }
        },
        HandshakeMessage::NextProtocolNegotiation(np) if state.role() == Role::Server => {
            state.handshake_mut().negotiated_protocol = Some(np.selected.clone());
            state.set_negotiated_protocol(np.selected.clone());
        },
        HandshakeMessage::Finished(fdata) => process_finished(state, provider, fdata)?,
        _ => {},
    }

    // Transcript update runs after role-specific effects, with the
    // re-encoded wire bytes as the authoritative transcript input.
    let ty = msg.handshake_type();
    if is_cert_verify_material(ty) || is_finished_material(ty) {
        let encoded = messages::encode_handshake(msg)?;
        state.handshake_mut().transcript.update(ty, &encoded);
    }

    Ok(())
}

/// Client-side ServerHello processing.
///
/// Verifies the renegotiation-indication extension, resolves the selected
/// cipher suite into the pending cipher, records the server random, and
/// sets the negotiated version. The transcript update is the generic
/// path's job; the caller feeds the same message to [`process_handshake`]
/// as well.
///
/// # Panics
///
/// Panics if `msg` is not a ServerHello; the precondition is the caller's.
pub fn process_server_hello(state: &mut SessionState, msg: &HandshakeMessage) -> Result<()> {
    let sh = match msg {
        HandshakeMessage::ServerHello(sh) => sh,
        other => panic!(
            "process_server_hello requires a ServerHello, got {:?}",
            other.handshake_type()
        ),
    };

    if let Some(exts) = &sh.extensions {
        for ext in exts.iter() {
            process_server_hello_extension(state, ext)?;
        }
    }

    // The server must pick a suite we offered and therefore know.
    let cipher = cipher::lookup(sh.cipher_suite).ok_or_else(|| {
        Error::protocol(
            format!(
                "server selected an unknown cipher suite: {:#06x}",
                sh.cipher_suite
            ),
            AlertDescription::HandshakeFailure,
        )
    })?;

    let hs = state.handshake_mut();
    hs.pending_cipher = Some(cipher);
    hs.server_random = Some(sh.random);
    state.set_version(sh.server_version)?;
    Ok(())
}

/// Expected Finished verify data for one side's PRF over the current
/// transcript.
pub fn expected_verify_data(
    state: &SessionState,
    provider: &dyn CryptoProvider,
    side: Role,
) -> Result<Vec<u8>> {
    let hs = state.handshake();
    let cipher = hs.pending_cipher();
    let master = hs
        .master_secret
        .as_ref()
        .expect("master secret has not been derived");

    let transcript_hash = hs.transcript.finished_hash(provider, cipher.hash)?;
    let label = match side {
        Role::Client => "client finished",
        Role::Server => "server finished",
    };
    tls12::prf::compute_verify_data(provider, cipher.hash, master, label, &transcript_hash)
}

fn process_finished(
    state: &mut SessionState,
    provider: &dyn CryptoProvider,
    fdata: &[u8],
) -> Result<()> {
    let peer = state.role().peer();
    let expected = expected_verify_data(state, provider, peer)?;

    if !bool::from(expected.as_slice().ct_eq(fdata)) {
        return Err(Error::protocol(
            "bad record mac",
            AlertDescription::BadRecordMac,
        ));
    }

    // Retained for renegotiation indication and channel binding.
    state.set_verify_data(peer, fdata.to_vec());
    Ok(())
}

fn process_certificates(state: &mut SessionState, chain: &CertificateChain) -> Result<()> {
    match state.role() {
        Role::Client => {
            // A server must authenticate.
            let leaf = chain.leaf().ok_or_else(|| {
                Error::protocol("server certificate missing", AlertDescription::HandshakeFailure)
            })?;
            let spki = x509::certificate_public_key(leaf)?;
            state.handshake_mut().public_key = Some(PublicKey::from_spki_der(spki));
        },
        Role::Server => {
            // A client may decline to authenticate with an empty chain.
            if let Some(leaf) = chain.leaf() {
                let spki = x509::certificate_public_key(leaf)?;
                state.handshake_mut().client_public_key = Some(PublicKey::from_spki_der(spki));
                state.set_client_certificate_chain(chain.clone());
            }
        },
    }
    Ok(())
}

fn process_client_hello_extension(state: &mut SessionState, ext: &Extension) -> Result<()> {
    match ext.known_type() {
        Some(ExtensionType::RenegotiationInfo) => {
            let expected = SecureRenegotiation::new(
                state.client_verify_data().unwrap_or_default().to_vec(),
                None,
            )
            .encode();

            if !bool::from(expected.as_slice().ct_eq(&ext.data)) {
                return Err(Error::protocol(
                    format!(
                        "client verified data not matching: {:02x?}:{:02x?}",
                        expected, ext.data
                    ),
                    AlertDescription::HandshakeFailure,
                ));
            }
            state.set_secure_renegotiation(true);
        },
        Some(ExtensionType::ApplicationLayerProtocolNegotiation) => {
            state.set_extension_alpn(true);
            state.set_client_alpn_suggest(extensions::decode_alpn_protocols(&ext.data)?);
        },
        Some(ExtensionType::ServerName) => {
            if let Some(host) = extensions::decode_server_name(&ext.data)? {
                state.set_client_sni(host);
            }
        },
        Some(ExtensionType::SupportedGroups) => {
            state.set_client_group_suggest(extensions::decode_supported_groups(&ext.data)?);
        },
        Some(ExtensionType::EcPointFormats) => {
            state.set_client_ec_point_format_suggest(extensions::decode_ec_point_formats(
                &ext.data,
            )?);
        },
        Some(ExtensionType::NextProtocolNegotiation) => {
            state.set_extension_npn(true);
        },
        // Everything else is negotiated above this layer or unknown;
        // either way it is ignored here.
        _ => {},
    }
    Ok(())
}

fn process_server_hello_extension(state: &mut SessionState, ext: &Extension) -> Result<()> {
    if ext.known_type() == Some(ExtensionType::RenegotiationInfo) {
        let expected = SecureRenegotiation::new(
            state.client_verify_data().unwrap_or_default().to_vec(),
            Some(state.server_verify_data().unwrap_or_default().to_vec()),
        )
        .encode();

        if !bool::from(expected.as_slice().ct_eq(&ext.data)) {
            return Err(Error::protocol(
                format!(
                    "server verified data not matching: {:02x?}:{:02x?}",
                    expected, ext.data
                ),
                AlertDescription::HandshakeFailure,
            ));
        }
        state.set_secure_renegotiation(true);
    }
    Ok(())
}
