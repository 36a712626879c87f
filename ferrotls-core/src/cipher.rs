//! Cipher suite definitions.
//!
//! The receive state machine needs very little from a cipher suite: its
//! identifier, its key-exchange kind (which drives ClientKeyExchange
//! interpretation) and its PRF hash (which drives transcript hashing and
//! Finished verify data). Suites are static descriptors; the pending cipher
//! in the handshake state is a `&'static` reference into this table.

use ferrotls_crypto::HashAlgorithm;

/// Key-exchange family of a cipher suite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyExchangeKind {
    /// RSA key transport (premaster encrypted under the server key)
    Rsa,
    /// Ephemeral finite-field Diffie-Hellman
    Dhe,
    /// Ephemeral elliptic-curve Diffie-Hellman
    Ecdhe,
    /// TLS 1.3 (key exchange negotiated via the key_share extension)
    Tls13,
}

/// Static cipher suite descriptor.
#[derive(Debug, PartialEq, Eq)]
pub struct CipherSuite {
    /// IANA identifier
    pub id: u16,

    /// IANA name
    pub name: &'static str,

    /// Key-exchange family
    pub kx: KeyExchangeKind,

    /// PRF / transcript hash
    pub hash: HashAlgorithm,
}

/// TLS_RSA_WITH_AES_128_GCM_SHA256
pub static TLS_RSA_WITH_AES_128_GCM_SHA256: CipherSuite = CipherSuite {
    id: 0x009C,
    name: "TLS_RSA_WITH_AES_128_GCM_SHA256",
    kx: KeyExchangeKind::Rsa,
    hash: HashAlgorithm::Sha256,
};

/// TLS_RSA_WITH_AES_256_GCM_SHA384
pub static TLS_RSA_WITH_AES_256_GCM_SHA384: CipherSuite = CipherSuite {
    id: 0x009D,
    name: "TLS_RSA_WITH_AES_256_GCM_SHA384",
    kx: KeyExchangeKind::Rsa,
    hash: HashAlgorithm::Sha384,
};

/// TLS_DHE_RSA_WITH_AES_128_GCM_SHA256
pub static TLS_DHE_RSA_WITH_AES_128_GCM_SHA256: CipherSuite = CipherSuite {
    id: 0x009E,
    name: "TLS_DHE_RSA_WITH_AES_128_GCM_SHA256",
    kx: KeyExchangeKind::Dhe,
    hash: HashAlgorithm::Sha256,
};

/// TLS_ECDHE_RSA_WITH_AES_128_GCM_SHA256
pub static TLS_ECDHE_RSA_WITH_AES_128_GCM_SHA256: CipherSuite = CipherSuite {
    id: 0xC02F,
    name: "TLS_ECDHE_RSA_WITH_AES_128_GCM_SHA256",
    kx: KeyExchangeKind::Ecdhe,
    hash: HashAlgorithm::Sha256,
};

/// TLS_ECDHE_RSA_WITH_AES_256_GCM_SHA384
pub static TLS_ECDHE_RSA_WITH_AES_256_GCM_SHA384: CipherSuite = CipherSuite {
    id: 0xC030,
    name: "TLS_ECDHE_RSA_WITH_AES_256_GCM_SHA384",
    kx: KeyExchangeKind::Ecdhe,
    hash: HashAlgorithm::Sha384,
};

/// TLS_AES_128_GCM_SHA256 (TLS 1.3)
pub static TLS13_AES_128_GCM_SHA256: CipherSuite = CipherSuite {
    id: 0x1301,
    name: "TLS_AES_128_GCM_SHA256",
    kx: KeyExchangeKind::Tls13,
    hash: HashAlgorithm::Sha256,
};

/// TLS_AES_256_GCM_SHA384 (TLS 1.3)
pub static TLS13_AES_256_GCM_SHA384: CipherSuite = CipherSuite {
    id: 0x1302,
    name: "TLS_AES_256_GCM_SHA384",
    kx: KeyExchangeKind::Tls13,
    hash: HashAlgorithm::Sha384,
};

/// Every suite the state machine knows about.
pub static SUPPORTED_CIPHER_SUITES: &[&CipherSuite] = &[
    &TLS13_AES_128_GCM_SHA256,
    &TLS13_AES_256_GCM_SHA384,
    &TLS_ECDHE_RSA_WITH_AES_128_GCM_SHA256,
    &TLS_ECDHE_RSA_WITH_AES_256_GCM_SHA384,
    &TLS_DHE_RSA_WITH_AES_128_GCM_SHA256,
    &TLS_RSA_WITH_AES_128_GCM_SHA256,
    &TLS_RSA_WITH_AES_256_GCM_SHA384,
];

/// Look up a suite by IANA identifier.
pub fn lookup(id: u16) -> Option<&'static CipherSuite> {
    SUPPORTED_CIPHER_SUITES.iter().copied().find(|c| c.id == id)
}
