//! End-to-end receive-path scenarios: deterministic, seeded-RNG fixtures
//! driving the record classifier and handshake processor together.

use ferrotls_core::cipher::TLS_RSA_WITH_AES_128_GCM_SHA256;
use ferrotls_core::error::{AlertDescription, Error};
use ferrotls_core::extensions::{Extension, Extensions, SecureRenegotiation};
use ferrotls_core::handshake::process::expected_verify_data;
use ferrotls_core::messages::{
    self, CertificateChain, ClientHello, HandshakeMessage,
};
use ferrotls_core::protocol::{ContentType, ExtensionType, ProtocolVersion};
use ferrotls_core::record::TlsPlaintext;
use ferrotls_core::tls12::prf;
use ferrotls_core::{
    process_handshake, process_packet, Packet, ReceiveCipherSwitch, Role, SessionState,
};
use ferrotls_crypto::{ConnectionRandom, CryptoProvider, RsaPrivateKey};
use ferrotls_crypto_rustcrypto::RustCryptoProvider;
use rsa::pkcs8::EncodePrivateKey;
use rsa::Pkcs1v15Encrypt;

const SEED: [u8; 32] = [42u8; 32];
const CLIENT_RANDOM: [u8; 32] = [0x11; 32];
const SERVER_RANDOM: [u8; 32] = [0x22; 32];

#[derive(Default)]
struct SwitchCounter {
    switched: usize,
}

impl ReceiveCipherSwitch for SwitchCounter {
    fn switch_receive_cipher(&mut self) {
        self.switched += 1;
    }
}

fn provider() -> RustCryptoProvider {
    RustCryptoProvider::new()
}

/// Server state mid-handshake: cipher chosen, randoms fixed, version set.
///
/// A server picks its cipher and random on the send side (out of scope
/// here), so the fixture records that choice directly; the client-side
/// equivalent comes out of `process_server_hello`.
fn server_mid_handshake() -> SessionState {
    let mut state = SessionState::new(Role::Server, ConnectionRandom::from_seed(SEED));
    state.set_version(ProtocolVersion::Tls12).unwrap();
    state.begin_handshake(ProtocolVersion::Tls12, CLIENT_RANDOM);
    state.handshake_mut().pending_cipher = Some(&TLS_RSA_WITH_AES_128_GCM_SHA256);
    state.handshake_mut().server_random = Some(SERVER_RANDOM);
    state
}

fn seed_transcript(state: &mut SessionState) {
    let hello = HandshakeMessage::ClientHello(ClientHello::new(
        ProtocolVersion::Tls12,
        CLIENT_RANDOM,
        vec![TLS_RSA_WITH_AES_128_GCM_SHA256.id],
    ));
    let encoded = messages::encode_handshake(&hello).unwrap();
    state
        .handshake_mut()
        .transcript
        .update(hello.handshake_type(), &encoded);
}

fn install_master_secret(state: &mut SessionState) {
    let premaster = [0x55u8; 48];
    ferrotls_core::tls12::set_master_secret_from_pre(state, &provider(), &premaster).unwrap();
}

/// Deterministic 1024-bit test key; generation consumes its own RNG so the
/// connection generator's draw sequence stays untouched.
fn test_rsa_key() -> (RsaPrivateKey, rsa::RsaPublicKey) {
    let mut keygen_rng = ConnectionRandom::from_seed([7u8; 32]);
    let private = rsa::RsaPrivateKey::new(&mut keygen_rng, 1024).expect("generate test key");
    let public = private.to_public_key();
    let pkcs8 = private.to_pkcs8_der().expect("encode pkcs8");
    (
        RsaPrivateKey::from_pkcs8_der(pkcs8.as_bytes().to_vec()),
        public,
    )
}

/// Encrypt a premaster and wrap it the way a TLS >= 1.0 ClientKeyExchange
/// carries it: two-byte length prefix, then the ciphertext.
fn encrypted_premaster_body(public: &rsa::RsaPublicKey, premaster: &[u8]) -> Vec<u8> {
    let mut rng = ConnectionRandom::from_seed([9u8; 32]);
    let ciphertext = public.encrypt(&mut rng, Pkcs1v15Encrypt, premaster).unwrap();

    let mut body = Vec::with_capacity(2 + ciphertext.len());
    body.extend_from_slice(&(ciphertext.len() as u16).to_be_bytes());
    body.extend_from_slice(&ciphertext);
    body
}

// --- scenario 1: Finished mismatch -----------------------------------------

#[test]
fn finished_with_flipped_bit_fails_with_bad_record_mac() {
    let mut state = server_mid_handshake();
    seed_transcript(&mut state);
    install_master_secret(&mut state);

    let mut fdata = expected_verify_data(&state, &provider(), Role::Client).unwrap();
    fdata[0] ^= 0x01;

    let err =
        process_handshake(&mut state, &provider(), &HandshakeMessage::Finished(fdata)).unwrap_err();

    assert_eq!(
        err,
        Error::Protocol {
            message: "bad record mac".into(),
            fatal: true,
            description: AlertDescription::BadRecordMac,
        }
    );
    // The failed Finished never reaches the transcript or the stored
    // verify data.
    assert_eq!(state.client_verify_data(), None);
}

#[test]
fn finished_with_correct_data_is_stored() {
    let mut state = server_mid_handshake();
    seed_transcript(&mut state);
    install_master_secret(&mut state);

    let fdata = expected_verify_data(&state, &provider(), Role::Client).unwrap();
    process_handshake(
        &mut state,
        &provider(),
        &HandshakeMessage::Finished(fdata.clone()),
    )
    .unwrap();

    assert_eq!(state.client_verify_data(), Some(&fdata[..]));
    assert_eq!(state.server_verify_data(), None);
}

// --- scenario 2: renegotiation-extension mismatch ---------------------------

#[test]
fn renegotiation_extension_mismatch_is_fatal() {
    let mut state = SessionState::new(Role::Server, ConnectionRandom::from_seed(SEED));
    state.set_client_verify_data(vec![0x01, 0x02, 0x03]);

    let mut exts = Extensions::new();
    exts.add(Extension::new(
        ExtensionType::RenegotiationInfo.to_u16(),
        SecureRenegotiation::new(vec![0x01, 0x02, 0x04], None).encode(),
    ));
    let hello = HandshakeMessage::ClientHello(
        ClientHello::new(ProtocolVersion::Tls12, CLIENT_RANDOM, vec![0x009C])
            .with_extensions(exts),
    );

    let err = process_handshake(&mut state, &provider(), &hello).unwrap_err();
    match err {
        Error::Protocol {
            message,
            fatal,
            description,
        } => {
            assert!(
                message.starts_with("client verified data not matching"),
                "message: {message}"
            );
            assert!(fatal);
            assert_eq!(description, AlertDescription::HandshakeFailure);
        },
        other => panic!("unexpected error: {:?}", other),
    }
    assert!(!state.secure_renegotiation());
}

// --- scenario 3: missing server certificate ---------------------------------

#[test]
fn empty_server_certificate_chain_is_fatal_for_client() {
    let mut state = SessionState::new(Role::Client, ConnectionRandom::from_seed(SEED));
    state.begin_handshake(ProtocolVersion::Tls12, CLIENT_RANDOM);

    let msg = HandshakeMessage::Certificate(CertificateChain::default());
    let err = process_handshake(&mut state, &provider(), &msg).unwrap_err();

    assert_eq!(
        err,
        Error::Protocol {
            message: "server certificate missing".into(),
            fatal: true,
            description: AlertDescription::HandshakeFailure,
        }
    );
}

// --- scenario 4: premaster version rollback ----------------------------------

#[test]
fn premaster_with_rolled_back_version_uses_random_fallback() {
    let (key_der, public) = test_rsa_key();

    let mut state = server_mid_handshake();
    state.handshake_mut().rsa_private_key = Some(key_der);

    // Premaster declares TLS 1.0 while the ClientHello said TLS 1.2.
    let mut premaster = [0xABu8; 48];
    premaster[0] = 0x03;
    premaster[1] = 0x01;
    let body = encrypted_premaster_body(&public, &premaster);

    let msg = HandshakeMessage::ClientKeyExchange(body);
    process_handshake(&mut state, &provider(), &msg).unwrap();

    // Replay the connection RNG: the first draw was the 48-byte fallback.
    let mut replay = ConnectionRandom::from_seed(SEED);
    let fallback = replay.generate(48);

    let expected_master = prf::compute_master_secret(
        &provider(),
        TLS_RSA_WITH_AES_128_GCM_SHA256.hash,
        &fallback,
        &CLIENT_RANDOM,
        &SERVER_RANDOM,
    )
    .unwrap();

    let master = state.handshake().master_secret.as_ref().unwrap();
    assert_eq!(&master[..], &expected_master[..]);

    // And it is NOT the master the decoded premaster would have produced.
    let rollback_master = prf::compute_master_secret(
        &provider(),
        TLS_RSA_WITH_AES_128_GCM_SHA256.hash,
        &premaster,
        &CLIENT_RANDOM,
        &SERVER_RANDOM,
    )
    .unwrap();
    assert_ne!(&master[..], &rollback_master[..]);
}

#[test]
fn tampered_encrypted_premaster_uses_random_fallback() {
    let (key_der, public) = test_rsa_key();

    let mut state = server_mid_handshake();
    state.handshake_mut().rsa_private_key = Some(key_der);

    let mut premaster = [0xCDu8; 48];
    premaster[0] = 0x03;
    premaster[1] = 0x03;
    let mut body = encrypted_premaster_body(&public, &premaster);
    // Flip random bits inside the ciphertext.
    let last = body.len() - 1;
    body[last] ^= 0xFF;
    body[10] ^= 0x10;

    // No error surfaces.
    let msg = HandshakeMessage::ClientKeyExchange(body);
    process_handshake(&mut state, &provider(), &msg).unwrap();

    let mut replay = ConnectionRandom::from_seed(SEED);
    let fallback = replay.generate(48);
    let expected_master = prf::compute_master_secret(
        &provider(),
        TLS_RSA_WITH_AES_128_GCM_SHA256.hash,
        &fallback,
        &CLIENT_RANDOM,
        &SERVER_RANDOM,
    )
    .unwrap();

    let master = state.handshake().master_secret.as_ref().unwrap();
    assert_eq!(&master[..], &expected_master[..]);
}

#[test]
fn valid_premaster_with_matching_version_is_used() {
    let (key_der, public) = test_rsa_key();

    let mut state = server_mid_handshake();
    state.handshake_mut().rsa_private_key = Some(key_der);

    let mut premaster = [0x77u8; 48];
    premaster[0] = 0x03;
    premaster[1] = 0x03;
    let body = encrypted_premaster_body(&public, &premaster);

    let msg = HandshakeMessage::ClientKeyExchange(body);
    process_handshake(&mut state, &provider(), &msg).unwrap();

    let expected_master = prf::compute_master_secret(
        &provider(),
        TLS_RSA_WITH_AES_128_GCM_SHA256.hash,
        &premaster,
        &CLIENT_RANDOM,
        &SERVER_RANDOM,
    )
    .unwrap();

    let master = state.handshake().master_secret.as_ref().unwrap();
    assert_eq!(&master[..], &expected_master[..]);
}

// --- scenario 5: ChangeCipherSpec switch -------------------------------------

#[test]
fn change_cipher_spec_switches_receive_cipher_exactly_once() {
    let mut state = server_mid_handshake();
    let mut switch = SwitchCounter::default();

    let record = TlsPlaintext::new(
        ContentType::ChangeCipherSpec,
        ProtocolVersion::Tls12,
        vec![1],
    );
    let packet = process_packet(&mut state, record, &mut switch).unwrap();

    assert_eq!(packet, Packet::ChangeCipherSpec);
    assert_eq!(switch.switched, 1);
}

// --- scenario 6: AppData passthrough ------------------------------------------

#[test]
fn app_data_passes_through_bit_exact() {
    let mut state = server_mid_handshake();
    let mut switch = SwitchCounter::default();

    let record = TlsPlaintext::new(
        ContentType::ApplicationData,
        ProtocolVersion::Tls12,
        vec![0xDE, 0xAD, 0xBE, 0xEF],
    );
    let packet = process_packet(&mut state, record, &mut switch).unwrap();

    assert_eq!(packet, Packet::AppData(vec![0xDE, 0xAD, 0xBE, 0xEF]));
    assert_eq!(switch.switched, 0);
}

// --- transcript round trip -----------------------------------------------------

#[test]
fn classified_batch_updates_transcript_like_raw_bytes() {
    // Drive a ClientHello through the classifier and processor; the
    // transcript must equal a direct hash over the wire bytes.
    let mut state = SessionState::new(Role::Server, ConnectionRandom::from_seed(SEED));
    let mut switch = SwitchCounter::default();

    let hello = HandshakeMessage::ClientHello(
        ClientHello::new(ProtocolVersion::Tls12, CLIENT_RANDOM, vec![0x009C, 0xC02F])
            .with_session_id(vec![5, 6, 7]),
    );
    let wire = messages::encode_handshake(&hello).unwrap();

    let record = TlsPlaintext::new(ContentType::Handshake, ProtocolVersion::Tls12, wire.clone());
    let packet = process_packet(&mut state, record, &mut switch).unwrap();

    let batch = match packet {
        Packet::Handshake(batch) => batch,
        other => panic!("unexpected packet: {:?}", other),
    };
    assert_eq!(batch.len(), 1);
    for msg in &batch {
        process_handshake(&mut state, &provider(), msg).unwrap();
    }

    // CertificateVerify material is byte-exact.
    assert_eq!(state.handshake().transcript.cert_verify_bytes(), &wire[..]);

    // Finished material hashes to the direct hash of the same bytes.
    let via_processor = state
        .handshake()
        .transcript
        .finished_hash(&provider(), TLS_RSA_WITH_AES_128_GCM_SHA256.hash)
        .unwrap();

    let mut hasher = provider().hash(TLS_RSA_WITH_AES_128_GCM_SHA256.hash).unwrap();
    hasher.update(&wire);
    assert_eq!(via_processor, hasher.finalize());
}

// --- full client flow through the public entry points ---------------------------

#[test]
fn client_flow_verifies_server_finished_without_touching_internals() {
    // ClientHello -> ServerHello -> ClientKeyExchange -> server Finished,
    // driven entirely through the public processing entry points. The
    // pending cipher must come out of ServerHello processing; nothing here
    // reaches into the handshake state to install it.
    let mut state = SessionState::new(Role::Client, ConnectionRandom::from_seed(SEED));
    let mut switch = SwitchCounter::default();

    state.begin_handshake(ProtocolVersion::Tls12, CLIENT_RANDOM);

    // Our own ClientHello, fed back through the processor for the
    // transcript, as the send path does.
    let client_hello = HandshakeMessage::ClientHello(ClientHello::new(
        ProtocolVersion::Tls12,
        CLIENT_RANDOM,
        vec![TLS_RSA_WITH_AES_128_GCM_SHA256.id],
    ));
    process_handshake(&mut state, &provider(), &client_hello).unwrap();

    // ServerHello arrives as a record; classify, then run both the
    // dedicated and the generic step on it.
    let server_hello = HandshakeMessage::ServerHello(
        ferrotls_core::messages::ServerHello::new(
            ProtocolVersion::Tls12,
            SERVER_RANDOM,
            TLS_RSA_WITH_AES_128_GCM_SHA256.id,
        ),
    );
    let record = TlsPlaintext::new(
        ContentType::Handshake,
        ProtocolVersion::Tls12,
        messages::encode_handshake(&server_hello).unwrap(),
    );
    let batch = match process_packet(&mut state, record, &mut switch).unwrap() {
        Packet::Handshake(batch) => batch,
        other => panic!("unexpected packet: {:?}", other),
    };
    assert_eq!(batch.len(), 1);
    ferrotls_core::process_server_hello(&mut state, &batch[0]).unwrap();
    process_handshake(&mut state, &provider(), &batch[0]).unwrap();

    assert_eq!(state.version(), ProtocolVersion::Tls12);
    assert_eq!(
        state.handshake().pending_cipher().id,
        TLS_RSA_WITH_AES_128_GCM_SHA256.id
    );

    // Our ClientKeyExchange goes through the processor for the transcript
    // (the client-side premaster never takes the server decrypt path).
    let mut premaster = [0x31u8; 48];
    premaster[0] = 0x03;
    premaster[1] = 0x03;
    let ckx = HandshakeMessage::ClientKeyExchange(vec![0xEE; 130]);
    process_handshake(&mut state, &provider(), &ckx).unwrap();

    ferrotls_core::tls12::set_master_secret_from_pre(&mut state, &provider(), &premaster).unwrap();

    // The server's Finished covers the transcript so far; a genuine peer
    // would compute exactly this value.
    let fdata = expected_verify_data(&state, &provider(), Role::Server).unwrap();
    process_handshake(
        &mut state,
        &provider(),
        &HandshakeMessage::Finished(fdata.clone()),
    )
    .unwrap();

    assert_eq!(state.server_verify_data(), Some(&fdata[..]));
    state.end_handshake();
    assert!(!state.in_handshake());
}

// --- CertificateVerify signature check -----------------------------------------

#[test]
fn verify_rsa_checks_peer_signature_over_transcript() {
    use ferrotls_crypto::{HashAlgorithm, PublicKey};
    use rsa::pkcs8::EncodePublicKey;
    use sha2::Digest;

    let mut keygen_rng = ConnectionRandom::from_seed([8u8; 32]);
    let client_key = rsa::RsaPrivateKey::new(&mut keygen_rng, 1024).unwrap();
    let spki = client_key
        .to_public_key()
        .to_public_key_der()
        .unwrap()
        .as_bytes()
        .to_vec();

    let mut state = server_mid_handshake();
    seed_transcript(&mut state);
    state.handshake_mut().client_public_key = Some(PublicKey::from_spki_der(spki));

    let content = state.handshake().transcript.cert_verify_bytes().to_vec();
    let digest = sha2::Sha256::digest(&content);
    let signature = client_key
        .sign(rsa::Pkcs1v15Sign::new::<sha2::Sha256>(), digest.as_slice())
        .unwrap();

    assert!(ferrotls_core::verify_rsa(
        &state,
        &provider(),
        HashAlgorithm::Sha256,
        &content,
        &signature
    )
    .unwrap());

    // A signature over different content fails cleanly.
    assert!(!ferrotls_core::verify_rsa(
        &state,
        &provider(),
        HashAlgorithm::Sha256,
        b"other content",
        &signature
    )
    .unwrap());
}

// --- deterministic replay of a whole exchange ----------------------------------

#[test]
fn identical_seeds_produce_identical_master_secrets() {
    let (key_der, public) = test_rsa_key();

    let run = |seed: [u8; 32]| {
        let mut state = SessionState::new(Role::Server, ConnectionRandom::from_seed(seed));
        state.set_version(ProtocolVersion::Tls12).unwrap();
        state.begin_handshake(ProtocolVersion::Tls12, CLIENT_RANDOM);
        state.handshake_mut().pending_cipher = Some(&TLS_RSA_WITH_AES_128_GCM_SHA256);
        state.handshake_mut().server_random = Some(SERVER_RANDOM);
        state.handshake_mut().rsa_private_key = Some(key_der.clone());

        // Tampered ciphertext: the fallback path runs, which consumes the
        // connection RNG.
        let mut premaster = [0x01u8; 48];
        premaster[0] = 0x03;
        premaster[1] = 0x03;
        let mut body = encrypted_premaster_body(&public, &premaster);
        body[20] ^= 0x01;

        process_handshake(
            &mut state,
            &provider(),
            &HandshakeMessage::ClientKeyExchange(body),
        )
        .unwrap();
        state.handshake().master_secret.as_ref().unwrap().to_vec()
    };

    // Same seed: bit-identical master secret. Different seed: different.
    assert_eq!(run([3u8; 32]), run([3u8; 32]));
    assert_ne!(run([3u8; 32]), run([4u8; 32]));
}
