//! Hash function interface.

/// Hash algorithms supported by ferrotls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashAlgorithm {
    /// SHA-256 (32 bytes output)
    Sha256,
    /// SHA-384 (48 bytes output)
    Sha384,
    /// SHA-512 (64 bytes output)
    Sha512,
}

impl HashAlgorithm {
    /// Get the output size in bytes for this hash algorithm.
    pub const fn output_size(self) -> usize {
        match self {
            HashAlgorithm::Sha256 => 32,
            HashAlgorithm::Sha384 => 48,
            HashAlgorithm::Sha512 => 64,
        }
    }

    /// Get the name of this algorithm.
    pub const fn name(self) -> &'static str {
        match self {
            HashAlgorithm::Sha256 => "SHA-256",
            HashAlgorithm::Sha384 => "SHA-384",
            HashAlgorithm::Sha512 => "SHA-512",
        }
    }
}

/// Hash function trait.
///
/// Provides incremental cryptographic hashing for TLS.
///
/// # Example
///
/// ```rust,ignore
/// use ferrotls_crypto::Hash;
///
/// fn hash_example(mut hash: Box<dyn Hash>) -> Vec<u8> {
///     hash.update(b"Hello, ");
///     hash.update(b"world!");
///     hash.finalize()
/// }
/// ```
pub trait Hash: Send {
    /// Update the hash state with more data.
    fn update(&mut self, data: &[u8]);

    /// Finalize the hash and return the digest.
    ///
    /// This consumes the hash state. After calling finalize(),
    /// the hash object should not be used again.
    fn finalize(self: Box<Self>) -> Vec<u8>;

    /// Get the output size in bytes for this hash function.
    fn output_size(&self) -> usize;

    /// Get the algorithm this hash implements.
    fn algorithm(&self) -> HashAlgorithm;
}
