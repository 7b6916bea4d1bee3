//! Deterministic hashers for engineering collisions in tests.
//!
//! Hidden from the docs and not part of the supported API; public only so
//! the integration tests and benches share one copy with the unit tests.

use std::hash::{BuildHasher, Hasher};

/// Every key hashes to 0, so every key lands in the same bucket / probe run.
#[derive(Debug, Clone, Default)]
pub struct ConstBuildHasher;
pub struct ConstHasher;

impl BuildHasher for ConstBuildHasher {
    type Hasher = ConstHasher;
    fn build_hasher(&self) -> Self::Hasher {
        ConstHasher
    }
}

impl Hasher for ConstHasher {
    fn write(&mut self, _bytes: &[u8]) {}
    fn finish(&self) -> u64 {
        0
    }
}

/// A `u64` key hashes to itself, so key `n` starts at slot `n % capacity`.
#[derive(Debug, Clone, Default)]
pub struct IdentityBuildHasher;
pub struct IdentityHasher(u64);

impl BuildHasher for IdentityBuildHasher {
    type Hasher = IdentityHasher;
    fn build_hasher(&self) -> Self::Hasher {
        IdentityHasher(0)
    }
}

impl Hasher for IdentityHasher {
    fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.0 = (self.0 << 8) | u64::from(b);
        }
    }
    fn write_u64(&mut self, n: u64) {
        self.0 = n;
    }
    fn finish(&self) -> u64 {
        self.0
    }
}
