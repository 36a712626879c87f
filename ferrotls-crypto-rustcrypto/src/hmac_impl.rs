//! HMAC implementations using the `hmac` crate.

use ferrotls_crypto::{Error, HashAlgorithm, Hmac, Result};
use hmac::Mac;

type HmacSha256 = hmac::Hmac<sha2::Sha256>;
type HmacSha384 = hmac::Hmac<sha2::Sha384>;
type HmacSha512 = hmac::Hmac<sha2::Sha512>;

/// Create an HMAC instance keyed with `key`.
pub(crate) fn create_hmac(algorithm: HashAlgorithm, key: &[u8]) -> Result<Box<dyn Hmac>> {
    match algorithm {
        HashAlgorithm::Sha256 => Ok(Box::new(HmacState::<HmacSha256>::new(algorithm, key)?)),
        HashAlgorithm::Sha384 => Ok(Box::new(HmacState::<HmacSha384>::new(algorithm, key)?)),
        HashAlgorithm::Sha512 => Ok(Box::new(HmacState::<HmacSha512>::new(algorithm, key)?)),
    }
}

struct HmacState<M: Mac> {
    algorithm: HashAlgorithm,
    mac: M,
}

impl<M: Mac + hmac::digest::KeyInit> HmacState<M> {
    fn new(algorithm: HashAlgorithm, key: &[u8]) -> Result<Self> {
        let mac = <M as Mac>::new_from_slice(key)
            .map_err(|_| Error::CryptoError("invalid HMAC key length".into()))?;
        Ok(Self { algorithm, mac })
    }
}

impl<M: Mac + Send> Hmac for HmacState<M> {
    fn update(&mut self, data: &[u8]) {
        self.mac.update(data);
    }

    fn finalize(self: Box<Self>) -> Vec<u8> {
        self.mac.finalize().into_bytes().to_vec()
    }

    fn output_size(&self) -> usize {
        self.algorithm.output_size()
    }

    fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hmac_sha256_rfc4231_case2() {
        // RFC 4231 test case 2: key "Jefe", data "what do ya want for nothing?"
        let mut mac = create_hmac(HashAlgorithm::Sha256, b"Jefe").unwrap();
        mac.update(b"what do ya want for nothing?");
        let tag = mac.finalize();
        assert_eq!(tag[..4], [0x5b, 0xdc, 0xc1, 0x46]);
    }

    #[test]
    fn test_hmac_verify_constant_time() {
        let mut mac = create_hmac(HashAlgorithm::Sha256, b"key").unwrap();
        mac.update(b"message");
        let tag = {
            let mut m2 = create_hmac(HashAlgorithm::Sha256, b"key").unwrap();
            m2.update(b"message");
            m2.finalize()
        };
        assert!(mac.verify(&tag));

        let mut mac = create_hmac(HashAlgorithm::Sha256, b"key").unwrap();
        mac.update(b"message");
        let mut bad = tag.clone();
        bad[0] ^= 0x01;
        assert!(!mac.verify(&bad));
    }
}
