//! RSA operations bridged to the `rsa` crate.
//!
//! Keys arrive as DER bytes (PKCS#8 for private keys, SubjectPublicKeyInfo
//! for public keys) and are parsed on each call. Decryption always goes
//! through the blinded primitive so the caller's RNG is consumed.

use ferrotls_crypto::{CryptoRngCore, Error, HashAlgorithm, PublicKey, Result, RsaPrivateKey};
use rand_core::{CryptoRng, RngCore};
use rsa::pkcs8::{DecodePrivateKey, DecodePublicKey};
use rsa::{Pkcs1v15Encrypt, Pkcs1v15Sign};
use sha2::Digest;

/// Adapts a `&mut dyn CryptoRngCore` to the sized RNG parameter the `rsa`
/// crate's blinded operations expect.
struct RngAdapter<'a>(&'a mut dyn CryptoRngCore);

impl RngCore for RngAdapter<'_> {
    fn next_u32(&mut self) -> u32 {
        self.0.as_rngcore().next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.0.as_rngcore().next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.0.as_rngcore().fill_bytes(dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> core::result::Result<(), rand_core::Error> {
        self.0.as_rngcore().try_fill_bytes(dest)
    }
}

impl CryptoRng for RngAdapter<'_> {}

/// Blinded RSA PKCS#1 v1.5 decryption.
pub(crate) fn decrypt(
    rng: &mut dyn CryptoRngCore,
    key: &RsaPrivateKey,
    ciphertext: &[u8],
) -> Result<Vec<u8>> {
    let key = rsa::RsaPrivateKey::from_pkcs8_der(key.pkcs8_der())
        .map_err(|_| Error::InvalidPrivateKey)?;

    key.decrypt_blinded(&mut RngAdapter(rng), Pkcs1v15Encrypt, ciphertext)
        .map_err(|_| Error::DecryptionFailed)
}

/// RSA PKCS#1 v1.5 signature verification over `message`.
///
/// The message is hashed with `algorithm` before verification.
pub(crate) fn verify(
    key: &PublicKey,
    algorithm: HashAlgorithm,
    message: &[u8],
    signature: &[u8],
) -> Result<bool> {
    let key = rsa::RsaPublicKey::from_public_key_der(key.spki_der())
        .map_err(|_| Error::InvalidPublicKey)?;

    let outcome = match algorithm {
        HashAlgorithm::Sha256 => {
            let digest = sha2::Sha256::digest(message);
            key.verify(Pkcs1v15Sign::new::<sha2::Sha256>(), digest.as_slice(), signature)
        },
        HashAlgorithm::Sha384 => {
            let digest = sha2::Sha384::digest(message);
            key.verify(Pkcs1v15Sign::new::<sha2::Sha384>(), digest.as_slice(), signature)
        },
        HashAlgorithm::Sha512 => {
            let digest = sha2::Sha512::digest(message);
            key.verify(Pkcs1v15Sign::new::<sha2::Sha512>(), digest.as_slice(), signature)
        },
    };

    Ok(outcome.is_ok())
}
