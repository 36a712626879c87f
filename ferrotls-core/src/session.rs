//! Per-connection session state.
//!
//! One [`SessionState`] exists per connection, created with a fixed role
//! and a seeded random generator, and destroyed with the connection. It is
//! not thread-safe: callers serialize access (a per-connection lock or
//! ownership transfer), and all mutation happens through `&mut self`.
//!
//! Failure does not poison the state: an error return leaves the state
//! observable for diagnostics, but it should not be reused for further
//! protocol activity.
//!
//! # Internal invariants
//!
//! Reading the negotiated version before negotiation, or handshake scratch
//! while no handshake is in progress, is a caller bug and panics; those
//! conditions are never reported as protocol errors.

use ferrotls_crypto::ConnectionRandom;
use zeroize::Zeroizing;

use crate::error::{AlertDescription, Error, Result};
use crate::handshake::HandshakeState;
use crate::messages::CertificateChain;
use crate::protocol::ProtocolVersion;

/// Connection role, fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Client
    Client,

    /// Server
    Server,
}

impl Role {
    /// The opposite role.
    pub fn peer(self) -> Role {
        match self {
            Role::Client => Role::Server,
            Role::Server => Role::Client,
        }
    }
}

/// Negotiated session identity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    /// Session identifier
    pub id: Vec<u8>,

    /// Whether this session resumes an earlier one
    pub resuming: bool,
}

/// A TLS 1.3 key share observed during negotiation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyShareEntry {
    /// Named group
    pub group: u16,

    /// Key exchange bytes
    pub key_exchange: Vec<u8>,
}

/// Per-connection protocol state.
#[derive(Debug)]
pub struct SessionState {
    role: Role,
    version: Option<ProtocolVersion>,
    session: Option<Session>,
    secure_renegotiation: bool,
    client_verify_data: Option<Vec<u8>>,
    server_verify_data: Option<Vec<u8>>,
    server_end_point: Vec<u8>,
    extension_alpn: bool,
    extension_npn: bool,
    negotiated_protocol: Option<Vec<u8>>,
    client_alpn_suggest: Option<Vec<Vec<u8>>>,
    client_group_suggest: Option<Vec<u16>>,
    client_ec_point_format_suggest: Option<Vec<u8>>,
    client_certificate_chain: Option<CertificateChain>,
    client_sni: Option<String>,
    handshake_record_buffer: Vec<u8>,
    handshake_record_buffer13: Vec<u8>,
    random_gen: ConnectionRandom,

    // TLS 1.3 negotiation holds.
    key_share: Option<KeyShareEntry>,
    pre_shared_key: Option<Zeroizing<Vec<u8>>>,
    hrr: bool,
    cookie: Option<Vec<u8>>,
    exporter_master_secret: Option<Vec<u8>>,
    client_supports_pha: bool,

    tls12_session_ticket: Option<Vec<u8>>,

    handshake: Option<HandshakeState>,
}

impl SessionState {
    /// Create fresh connection state with a fixed role and an owned
    /// random generator.
    pub fn new(role: Role, random_gen: ConnectionRandom) -> Self {
        Self {
            role,
            version: None,
            session: None,
            secure_renegotiation: false,
            client_verify_data: None,
            server_verify_data: None,
            server_end_point: Vec::new(),
            extension_alpn: false,
            extension_npn: false,
            negotiated_protocol: None,
            client_alpn_suggest: None,
            client_group_suggest: None,
            client_ec_point_format_suggest: None,
            client_certificate_chain: None,
            client_sni: None,
            handshake_record_buffer: Vec::new(),
            handshake_record_buffer13: Vec::new(),
            random_gen,
            key_share: None,
            pre_shared_key: None,
            hrr: false,
            cookie: None,
            exporter_master_secret: None,
            client_supports_pha: false,
            tls12_session_ticket: None,
            handshake: None,
        }
    }

    /// The connection role.
    pub fn role(&self) -> Role {
        self.role
    }

    // --- negotiated version ---------------------------------------------

    /// The negotiated protocol version.
    ///
    /// # Panics
    ///
    /// Panics if called before negotiation; reading the version early is a
    /// caller bug, not a protocol condition.
    pub fn version(&self) -> ProtocolVersion {
        self.version
            .expect("protocol version has not been negotiated yet")
    }

    /// The negotiated protocol version, if negotiated.
    pub fn version_opt(&self) -> Option<ProtocolVersion> {
        self.version
    }

    /// Set the negotiated version.
    ///
    /// Setting the same version again is accepted; attempting to change an
    /// already-negotiated version is a protocol error.
    pub fn set_version(&mut self, version: ProtocolVersion) -> Result<()> {
        match self.version {
            None => {
                self.version = Some(version);
                Ok(())
            },
            Some(current) if current == version => Ok(()),
            Some(current) => Err(Error::protocol(
                format!(
                    "negotiated version cannot change from {} to {}",
                    current.name(),
                    version.name()
                ),
                AlertDescription::InternalError,
            )),
        }
    }

    /// Set the version only if none has been negotiated; a no-op afterwards.
    pub fn set_version_if_unset(&mut self, version: ProtocolVersion) {
        if self.version.is_none() {
            self.version = Some(version);
        }
    }

    // --- session identity -------------------------------------------------

    /// The established session, if any.
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Record the established session.
    pub fn set_session(&mut self, session: Session) {
        self.session = Some(session);
    }

    // --- secure renegotiation ---------------------------------------------

    /// Whether secure renegotiation (RFC 5746) is in effect.
    pub fn secure_renegotiation(&self) -> bool {
        self.secure_renegotiation
    }

    /// Update the secure-renegotiation flag. Monotonic: once true, later
    /// `false` writes are ignored for the lifetime of the connection.
    pub fn set_secure_renegotiation(&mut self, enabled: bool) {
        self.secure_renegotiation = self.secure_renegotiation || enabled;
    }

    // --- verify data --------------------------------------------------------

    /// Client verify data from the most recently validated client Finished.
    pub fn client_verify_data(&self) -> Option<&[u8]> {
        self.client_verify_data.as_deref()
    }

    /// Store validated client Finished verify data.
    pub fn set_client_verify_data(&mut self, data: Vec<u8>) {
        self.client_verify_data = Some(data);
    }

    /// Server verify data from the most recently validated server Finished.
    pub fn server_verify_data(&self) -> Option<&[u8]> {
        self.server_verify_data.as_deref()
    }

    /// Store validated server Finished verify data.
    pub fn set_server_verify_data(&mut self, data: Vec<u8>) {
        self.server_verify_data = Some(data);
    }

    /// Verify data for one side, by role.
    pub fn verify_data(&self, side: Role) -> Option<&[u8]> {
        match side {
            Role::Client => self.client_verify_data(),
            Role::Server => self.server_verify_data(),
        }
    }

    /// Store verify data for one side, by role.
    pub fn set_verify_data(&mut self, side: Role, data: Vec<u8>) {
        match side {
            Role::Client => self.set_client_verify_data(data),
            Role::Server => self.set_server_verify_data(data),
        }
    }

    // --- channel binding ---------------------------------------------------

    /// tls-server-end-point channel binding material.
    pub fn server_end_point(&self) -> &[u8] {
        &self.server_end_point
    }

    /// Set channel binding material.
    pub fn set_server_end_point(&mut self, data: Vec<u8>) {
        self.server_end_point = data;
    }

    // --- application protocol negotiation ----------------------------------

    /// Whether the ALPN extension was advertised.
    pub fn extension_alpn(&self) -> bool {
        self.extension_alpn
    }

    /// Mark the ALPN extension as advertised.
    pub fn set_extension_alpn(&mut self, advertised: bool) {
        self.extension_alpn = advertised;
    }

    /// Whether the NPN extension was negotiated.
    pub fn extension_npn(&self) -> bool {
        self.extension_npn
    }

    /// Mark the NPN extension as negotiated.
    pub fn set_extension_npn(&mut self, negotiated: bool) {
        self.extension_npn = negotiated;
    }

    /// The negotiated application protocol, if any.
    pub fn negotiated_protocol(&self) -> Option<&[u8]> {
        self.negotiated_protocol.as_deref()
    }

    /// Record the negotiated application protocol.
    pub fn set_negotiated_protocol(&mut self, protocol: Vec<u8>) {
        self.negotiated_protocol = Some(protocol);
    }

    // --- ClientHello extension captures -------------------------------------

    /// ALPN protocols the client offered.
    pub fn client_alpn_suggest(&self) -> Option<&[Vec<u8>]> {
        self.client_alpn_suggest.as_deref()
    }

    /// Record the client's offered ALPN protocols.
    pub fn set_client_alpn_suggest(&mut self, protocols: Vec<Vec<u8>>) {
        self.client_alpn_suggest = Some(protocols);
    }

    /// Named groups the client offered.
    pub fn client_group_suggest(&self) -> Option<&[u16]> {
        self.client_group_suggest.as_deref()
    }

    /// Record the client's offered named groups.
    pub fn set_client_group_suggest(&mut self, groups: Vec<u16>) {
        self.client_group_suggest = Some(groups);
    }

    /// EC point formats the client offered.
    pub fn client_ec_point_format_suggest(&self) -> Option<&[u8]> {
        self.client_ec_point_format_suggest.as_deref()
    }

    /// Record the client's offered EC point formats.
    pub fn set_client_ec_point_format_suggest(&mut self, formats: Vec<u8>) {
        self.client_ec_point_format_suggest = Some(formats);
    }

    /// The client certificate chain, if one was presented.
    pub fn client_certificate_chain(&self) -> Option<&CertificateChain> {
        self.client_certificate_chain.as_ref()
    }

    /// Record the presented client certificate chain.
    pub fn set_client_certificate_chain(&mut self, chain: CertificateChain) {
        self.client_certificate_chain = Some(chain);
    }

    /// The SNI host name the client sent.
    pub fn client_sni(&self) -> Option<&str> {
        self.client_sni.as_deref()
    }

    /// Record the client's SNI host name.
    pub fn set_client_sni(&mut self, host: String) {
        self.client_sni = Some(host);
    }

    // --- TLS 1.3 holds --------------------------------------------------------

    /// The negotiated TLS 1.3 key share, if any.
    pub fn key_share(&self) -> Option<&KeyShareEntry> {
        self.key_share.as_ref()
    }

    /// Record the negotiated TLS 1.3 key share.
    pub fn set_key_share(&mut self, entry: KeyShareEntry) {
        self.key_share = Some(entry);
    }

    /// The pre-shared key in use, if any.
    pub fn pre_shared_key(&self) -> Option<&[u8]> {
        self.pre_shared_key.as_deref().map(|v| v.as_slice())
    }

    /// Record the pre-shared key in use.
    pub fn set_pre_shared_key(&mut self, psk: Vec<u8>) {
        self.pre_shared_key = Some(Zeroizing::new(psk));
    }

    /// Whether a HelloRetryRequest round-trip happened.
    pub fn hello_retry_request(&self) -> bool {
        self.hrr
    }

    /// Record that a HelloRetryRequest round-trip happened.
    pub fn set_hello_retry_request(&mut self, hrr: bool) {
        self.hrr = hrr;
    }

    /// The TLS 1.3 cookie, if one was issued.
    pub fn cookie(&self) -> Option<&[u8]> {
        self.cookie.as_deref()
    }

    /// Record the TLS 1.3 cookie.
    pub fn set_cookie(&mut self, cookie: Vec<u8>) {
        self.cookie = Some(cookie);
    }

    /// The exporter master secret, once derived.
    pub fn exporter_master_secret(&self) -> Option<&[u8]> {
        self.exporter_master_secret.as_deref()
    }

    /// Record the exporter master secret.
    pub fn set_exporter_master_secret(&mut self, secret: Vec<u8>) {
        self.exporter_master_secret = Some(secret);
    }

    /// Whether the client supports post-handshake authentication.
    pub fn client_supports_pha(&self) -> bool {
        self.client_supports_pha
    }

    /// Record post-handshake authentication support.
    pub fn set_client_supports_pha(&mut self, supported: bool) {
        self.client_supports_pha = supported;
    }

    // --- TLS 1.2 session ticket ------------------------------------------------

    /// The TLS 1.2 session ticket, if one was issued.
    pub fn tls12_session_ticket(&self) -> Option<&[u8]> {
        self.tls12_session_ticket.as_deref()
    }

    /// Record a TLS 1.2 session ticket.
    pub fn set_tls12_session_ticket(&mut self, ticket: Vec<u8>) {
        self.tls12_session_ticket = Some(ticket);
    }

    // --- cross-record handshake buffering ---------------------------------------

    /// Take the parked bytes of a handshake message spanning records.
    pub fn take_handshake_record_buffer(&mut self, tls13: bool) -> Vec<u8> {
        if tls13 {
            std::mem::take(&mut self.handshake_record_buffer13)
        } else {
            std::mem::take(&mut self.handshake_record_buffer)
        }
    }

    /// Park the bytes of an incomplete handshake message until the next
    /// record arrives.
    pub fn set_handshake_record_buffer(&mut self, tls13: bool, buffer: Vec<u8>) {
        if tls13 {
            self.handshake_record_buffer13 = buffer;
        } else {
            self.handshake_record_buffer = buffer;
        }
    }

    // --- random generator ---------------------------------------------------------

    /// Draw `n` random bytes, committing the generator state.
    pub fn draw_random(&mut self, n: usize) -> Vec<u8> {
        self.random_gen.generate(n)
    }

    /// Run an RNG-consuming computation against the connection generator,
    /// committing its post-state.
    pub fn with_rng<T>(&mut self, f: impl FnOnce(&mut ConnectionRandom) -> T) -> T {
        f(&mut self.random_gen)
    }

    // --- handshake lifecycle ----------------------------------------------------------

    /// Whether a handshake is in progress.
    pub fn in_handshake(&self) -> bool {
        self.handshake.is_some()
    }

    /// Allocate the handshake substate.
    ///
    /// Verify data from a previous handshake is deliberately retained: a
    /// renegotiating ClientHello is checked against it before the new
    /// handshake's Finished replaces it.
    pub fn begin_handshake(&mut self, client_version: ProtocolVersion, client_random: [u8; 32]) {
        self.handshake = Some(HandshakeState::new(client_version, client_random));
    }

    /// The in-progress handshake substate, if any.
    pub fn handshake_opt(&self) -> Option<&HandshakeState> {
        self.handshake.as_ref()
    }

    /// The in-progress handshake substate.
    ///
    /// # Panics
    ///
    /// Panics when no handshake is in progress; such access is a caller
    /// bug, not a protocol condition.
    pub fn handshake(&self) -> &HandshakeState {
        self.handshake
            .as_ref()
            .expect("no handshake in progress")
    }

    /// Mutable access to the in-progress handshake substate.
    ///
    /// # Panics
    ///
    /// Panics when no handshake is in progress.
    pub fn handshake_mut(&mut self) -> &mut HandshakeState {
        self.handshake
            .as_mut()
            .expect("no handshake in progress")
    }

    /// Tear down the handshake substate after Finished.
    pub fn end_handshake(&mut self) {
        self.handshake = None;
    }
}
