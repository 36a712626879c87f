//! Hash function implementations using the `sha2` crate.

use ferrotls_crypto::{Hash, HashAlgorithm, Result};
use sha2::Digest;

/// Create a hash instance for the specified algorithm.
pub(crate) fn create_hash(algorithm: HashAlgorithm) -> Result<Box<dyn Hash>> {
    match algorithm {
        HashAlgorithm::Sha256 => Ok(Box::new(Sha256Hash::new())),
        HashAlgorithm::Sha384 => Ok(Box::new(Sha384Hash::new())),
        HashAlgorithm::Sha512 => Ok(Box::new(Sha512Hash::new())),
    }
}

macro_rules! impl_hash {
    ($name:ident, $inner:ty, $alg:expr, $size:expr) => {
        struct $name {
            hasher: $inner,
        }

        impl $name {
            fn new() -> Self {
                Self {
                    hasher: <$inner>::new(),
                }
            }
        }

        impl Hash for $name {
            fn update(&mut self, data: &[u8]) {
                self.hasher.update(data);
            }

            fn finalize(self: Box<Self>) -> Vec<u8> {
                self.hasher.finalize().to_vec()
            }

            fn output_size(&self) -> usize {
                $size
            }

            fn algorithm(&self) -> HashAlgorithm {
                $alg
            }
        }
    };
}

impl_hash!(Sha256Hash, sha2::Sha256, HashAlgorithm::Sha256, 32);
impl_hash!(Sha384Hash, sha2::Sha384, HashAlgorithm::Sha384, 48);
impl_hash!(Sha512Hash, sha2::Sha512, HashAlgorithm::Sha512, 64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_known_answer() {
        // SHA-256("abc"), FIPS 180-4 test vector.
        let mut h = create_hash(HashAlgorithm::Sha256).unwrap();
        h.update(b"abc");
        let digest = h.finalize();
        assert_eq!(
            digest[..4],
            [0xba, 0x78, 0x16, 0xbf],
            "unexpected SHA-256 prefix"
        );
        assert_eq!(digest.len(), 32);
    }

    #[test]
    fn test_incremental_matches_oneshot() {
        let mut a = create_hash(HashAlgorithm::Sha384).unwrap();
        a.update(b"hello ");
        a.update(b"world");

        let mut b = create_hash(HashAlgorithm::Sha384).unwrap();
        b.update(b"hello world");

        assert_eq!(a.finalize(), b.finalize());
    }
}
