//! RustCrypto-backed provider for the ferrotls crypto interface.
//!
//! Implements [`ferrotls_crypto::CryptoProvider`] on top of the pure-Rust
//! `sha2`, `hmac`, and `rsa` crates. This is the default provider used by
//! the ferrotls core tests; deployments with other requirements can supply
//! their own provider.

#![forbid(unsafe_code)]
#![warn(
    missing_docs,
    rust_2018_idioms,
    unused_qualifications,
    missing_debug_implementations
)]

mod hash;
mod hmac_impl;
mod rsa_bridge;

use ferrotls_crypto::{
    CryptoProvider, CryptoRngCore, Hash, HashAlgorithm, Hmac, PublicKey, Result, RsaPrivateKey,
};

/// Crypto provider backed by the RustCrypto crates.
#[derive(Debug, Default, Clone, Copy)]
pub struct RustCryptoProvider;

impl CryptoProvider for RustCryptoProvider {
    fn new() -> Self {
        Self
    }

    fn hash(&self, algorithm: HashAlgorithm) -> Result<Box<dyn Hash>> {
        hash::create_hash(algorithm)
    }

    fn hmac(&self, algorithm: HashAlgorithm, key: &[u8]) -> Result<Box<dyn Hmac>> {
        hmac_impl::create_hmac(algorithm, key)
    }

    fn rsa_decrypt(
        &self,
        rng: &mut dyn CryptoRngCore,
        key: &RsaPrivateKey,
        ciphertext: &[u8],
    ) -> Result<Vec<u8>> {
        rsa_bridge::decrypt(rng, key, ciphertext)
    }

    fn rsa_verify(
        &self,
        key: &PublicKey,
        algorithm: HashAlgorithm,
        message: &[u8],
        signature: &[u8],
    ) -> Result<bool> {
        rsa_bridge::verify(key, algorithm, message, signature)
    }
}
