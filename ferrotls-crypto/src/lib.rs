//! # ferrotls Cryptographic Provider Interface
//!
//! This crate defines the cryptographic abstraction layer for ferrotls.
//! It provides trait-based interfaces that allow pluggable cryptographic
//! backends.
//!
//! ## Design Goals
//!
//! 1. **Pluggable:** Support multiple crypto libraries behind one trait
//! 2. **Type-safe:** Leverage Rust's type system to prevent misuse
//! 3. **Deterministic where it matters:** per-connection seeded RNG for
//!    reproducible tests
//! 4. **Constant-time:** security-critical comparisons must be constant-time
//!
//! ## Architecture
//!
//! ```text
//! CryptoProvider (main trait)
//! ├── Hash (SHA-256, SHA-384, SHA-512)
//! ├── Hmac (HMAC with various hash functions)
//! ├── rsa_decrypt (blinded RSA key-transport decryption)
//! └── rsa_verify (RSA signature verification)
//! ```
//!
//! The RSA operations are free functions on the provider rather than boxed
//! objects: they are one-shot, and the decrypt side must thread the caller's
//! RNG through blinding.

#![forbid(unsafe_code)]
#![warn(
    missing_docs,
    rust_2018_idioms,
    unused_qualifications,
    missing_debug_implementations
)]

pub mod error;
pub mod hash;
pub mod hmac;
pub mod keys;
pub mod random;

pub use error::{Error, Result};
pub use hash::{Hash, HashAlgorithm};
pub use hmac::Hmac;
pub use keys::{PublicKey, RsaPrivateKey};
pub use random::ConnectionRandom;

// Re-exported so providers and callers agree on the RNG object type.
pub use rand_core::CryptoRngCore;

/// The main cryptographic provider trait.
///
/// Implementations of this trait provide all cryptographic operations
/// needed by the ferrotls core. The trait is object-safe; the core holds a
/// `&dyn CryptoProvider`.
///
/// # Thread Safety
///
/// All implementations must be `Send + Sync` to allow use in multi-threaded
/// environments.
pub trait CryptoProvider: Send + Sync + 'static {
    /// Create a new instance of the crypto provider.
    fn new() -> Self
    where
        Self: Sized;

    /// Get a hash function instance.
    fn hash(&self, algorithm: HashAlgorithm) -> Result<Box<dyn Hash>>;

    /// Get an HMAC instance keyed with `key`.
    fn hmac(&self, algorithm: HashAlgorithm, key: &[u8]) -> Result<Box<dyn Hmac>>;

    /// Decrypt an RSA PKCS#1 v1.5 ciphertext with the given private key.
    ///
    /// The caller's RNG is consumed for blinding; the implementation MUST
    /// use a blinding-capable primitive. Failure is reported as an error
    /// value and never as a panic: the TLS key-exchange path absorbs it.
    fn rsa_decrypt(
        &self,
        rng: &mut dyn CryptoRngCore,
        key: &RsaPrivateKey,
        ciphertext: &[u8],
    ) -> Result<Vec<u8>>;

    /// Verify an RSA PKCS#1 v1.5 signature over `message`.
    ///
    /// `message` is the signed content; the implementation hashes it with
    /// `algorithm` before verification. Returns `Ok(false)` for a
    /// well-formed but wrong signature, and an error only when the key or
    /// signature is malformed.
    fn rsa_verify(
        &self,
        key: &PublicKey,
        algorithm: HashAlgorithm,
        message: &[u8],
        signature: &[u8],
    ) -> Result<bool>;
}
