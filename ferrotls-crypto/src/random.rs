//! Per-connection random number generator.
//!
//! Every connection owns exactly one generator; there is no process-global
//! RNG. The generator is threaded linearly through the connection state:
//! every draw mutates the owned state in place, so no draw can be replayed
//! or discarded by accident.
//!
//! # Determinism
//!
//! Given identical seeds and identical call sequences, the output is
//! bit-identical. Tests construct generators with [`ConnectionRandom::from_seed`]
//! and replay draw sequences against a second generator built from the same
//! seed.

use rand_chacha::ChaCha20Rng;
use rand_core::{CryptoRng, RngCore, SeedableRng};

/// Seed size in bytes.
pub const SEED_SIZE: usize = 32;

/// Per-connection deterministic CSPRNG.
///
/// Backed by ChaCha20. The generator is `Send` so a connection can migrate
/// between threads, but it is deliberately not `Sync` nor cloneable:
/// duplicating the state would allow the same random bytes to be issued
/// twice.
#[derive(Debug)]
pub struct ConnectionRandom {
    rng: ChaCha20Rng,
}

impl ConnectionRandom {
    /// Create a generator from a fixed seed.
    pub fn from_seed(seed: [u8; SEED_SIZE]) -> Self {
        Self {
            rng: ChaCha20Rng::from_seed(seed),
        }
    }

    /// Create a generator seeded from the operating system entropy source.
    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha20Rng::from_entropy(),
        }
    }

    /// Fill a buffer with random bytes.
    pub fn fill(&mut self, dest: &mut [u8]) {
        self.rng.fill_bytes(dest);
    }

    /// Generate a random byte vector of the given length.
    pub fn generate(&mut self, len: usize) -> Vec<u8> {
        let mut buf = vec![0u8; len];
        self.fill(&mut buf);
        buf
    }
}

impl RngCore for ConnectionRandom {
    fn next_u32(&mut self) -> u32 {
        self.rng.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.rng.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.rng.fill_bytes(dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
        self.rng.try_fill_bytes(dest)
    }
}

impl CryptoRng for ConnectionRandom {}
