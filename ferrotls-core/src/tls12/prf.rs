//! TLS 1.2 PRF (RFC 5246 Section 5).
//!
//! ```text
//! PRF(secret, label, seed) = P_<hash>(secret, label + seed)
//!
//! P_hash(secret, seed) = HMAC_hash(secret, A(1) + seed) +
//!                        HMAC_hash(secret, A(2) + seed) + ...
//! A(0) = seed
//! A(i) = HMAC_hash(secret, A(i-1))
//! ```
//!
//! The legacy TLS 1.0/1.1 MD5⊕SHA-1 construction is not carried; every
//! suite in the table runs a SHA-2 PRF.

use ferrotls_crypto::{CryptoProvider, HashAlgorithm};

use crate::error::Result;

/// Master secret length (RFC 5246 Section 8.1).
pub const MASTER_SECRET_LEN: usize = 48;

/// Finished verify-data length (RFC 5246 Section 7.4.9).
pub const VERIFY_DATA_LEN: usize = 12;

/// Compute the TLS 1.2 PRF.
pub fn prf(
    provider: &dyn CryptoProvider,
    algorithm: HashAlgorithm,
    secret: &[u8],
    label: &[u8],
    seed: &[u8],
    output_len: usize,
) -> Result<Vec<u8>> {
    let mut label_seed = Vec::with_capacity(label.len() + seed.len());
    label_seed.extend_from_slice(label);
    label_seed.extend_from_slice(seed);

    p_hash(provider, algorithm, secret, &label_seed, output_len)
}

fn p_hash(
    provider: &dyn CryptoProvider,
    algorithm: HashAlgorithm,
    secret: &[u8],
    seed: &[u8],
    output_len: usize,
) -> Result<Vec<u8>> {
    let mut output = Vec::with_capacity(output_len);

    // A(0) = seed
    let mut a = seed.to_vec();

    while output.len() < output_len {
        // A(i) = HMAC_hash(secret, A(i-1))
        a = hmac_once(provider, algorithm, secret, &a)?;

        // HMAC_hash(secret, A(i) + seed)
        let mut a_seed = Vec::with_capacity(a.len() + seed.len());
        a_seed.extend_from_slice(&a);
        a_seed.extend_from_slice(seed);
        let block = hmac_once(provider, algorithm, secret, &a_seed)?;

        let remaining = output_len - output.len();
        if remaining >= block.len() {
            output.extend_from_slice(&block);
        } else {
            output.extend_from_slice(&block[..remaining]);
        }
    }

    Ok(output)
}

fn hmac_once(
    provider: &dyn CryptoProvider,
    algorithm: HashAlgorithm,
    key: &[u8],
    data: &[u8],
) -> Result<Vec<u8>> {
    let mut hmac = provider.hmac(algorithm, key)?;
    hmac.update(data);
    Ok(hmac.finalize())
}

/// Derive the master secret from a premaster secret.
///
/// ```text
/// master_secret = PRF(pre_master_secret, "master secret",
///                     ClientHello.random + ServerHello.random)[0..47]
/// ```
pub fn compute_master_secret(
    provider: &dyn CryptoProvider,
    algorithm: HashAlgorithm,
    premaster: &[u8],
    client_random: &[u8; 32],
    server_random: &[u8; 32],
) -> Result<Vec<u8>> {
    let mut seed = Vec::with_capacity(64);
    seed.extend_from_slice(client_random);
    seed.extend_from_slice(server_random);

    prf(
        provider,
        algorithm,
        premaster,
        b"master secret",
        &seed,
        MASTER_SECRET_LEN,
    )
}

/// Compute Finished verify data for one side.
///
/// ```text
/// verify_data = PRF(master_secret, finished_label,
///                   Hash(handshake_messages))[0..11]
/// ```
pub fn compute_verify_data(
    provider: &dyn CryptoProvider,
    algorithm: HashAlgorithm,
    master_secret: &[u8],
    label: &str,
    transcript_hash: &[u8],
) -> Result<Vec<u8>> {
    prf(
        provider,
        algorithm,
        master_secret,
        label.as_bytes(),
        transcript_hash,
        VERIFY_DATA_LEN,
    )
}
