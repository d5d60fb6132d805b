//! Hash adapter
//!
//! Turns member and key identifiers into positions on the ring.
//! The ring never hashes anything itself: it goes through a `RingHasher`,
//! which wraps either one of the built-in algorithms or a caller closure.

use serde::{Deserialize, Serialize};
use siphasher::sip::SipHasher13;
use std::fmt;
use std::hash::Hasher;
use std::sync::Arc;

/// A point on the ring
pub type Position = u32;

/// Any function from a byte sequence to a 32-bit hash
pub type HashFn = Arc<dyn Fn(&[u8]) -> u32 + Send + Sync>;

/// Built-in hash algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    /// CRC-32 with the IEEE polynomial
    #[default]
    Crc32,
    /// SipHash-1-3 with zero keys, truncated to the low 32 bits
    Siphash13,
    /// xxHash64 with seed 0, truncated to the low 32 bits
    Xxhash64,
}

impl HashAlgorithm {
    /// Hash a byte sequence with this algorithm
    pub fn hash(self, data: &[u8]) -> u32 {
        match self {
            HashAlgorithm::Crc32 => crc32fast::hash(data),
            HashAlgorithm::Siphash13 => {
                let mut hasher = SipHasher13::new();
                hasher.write(data);
                hasher.finish() as u32
            }
            HashAlgorithm::Xxhash64 => xxhash_rust::xxh64::xxh64(data, 0) as u32,
        }
    }

    /// Lowercase algorithm name, as accepted in configuration
    pub fn name(self) -> &'static str {
        match self {
            HashAlgorithm::Crc32 => "crc32",
            HashAlgorithm::Siphash13 => "siphash13",
            HashAlgorithm::Xxhash64 => "xxhash64",
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Hash function configured on a ring
///
/// Cloning is cheap (one `Arc` bump). Hashing is pure and needs no lock.
#[derive(Clone)]
pub struct RingHasher {
    func: HashFn,
    algorithm: Option<HashAlgorithm>,
}

impl RingHasher {
    /// Use one of the built-in algorithms
    pub fn from_algorithm(algorithm: HashAlgorithm) -> Self {
        RingHasher {
            func: Arc::new(move |data: &[u8]| algorithm.hash(data)),
            algorithm: Some(algorithm),
        }
    }

    /// Use a caller-supplied hash function
    pub fn custom<F>(func: F) -> Self
    where
        F: Fn(&[u8]) -> u32 + Send + Sync + 'static,
    {
        RingHasher {
            func: Arc::new(func),
            algorithm: None,
        }
    }

    /// Hash a key's UTF-8 bytes into a ring position
    pub fn hash(&self, key: &str) -> Position {
        self.hash_bytes(key.as_bytes())
    }

    /// Hash raw bytes into a ring position
    pub fn hash_bytes(&self, data: &[u8]) -> Position {
        (self.func)(data)
    }

    /// The built-in algorithm in use, `None` for a custom function
    pub fn algorithm(&self) -> Option<HashAlgorithm> {
        self.algorithm
    }
}

impl Default for RingHasher {
    fn default() -> Self {
        Self::from_algorithm(HashAlgorithm::default())
    }
}

impl From<HashAlgorithm> for RingHasher {
    fn from(algorithm: HashAlgorithm) -> Self {
        Self::from_algorithm(algorithm)
    }
}

impl fmt::Debug for RingHasher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.algorithm {
            Some(algorithm) => write!(f, "RingHasher({})", algorithm),
            None => f.write_str("RingHasher(custom)"),
        }
    }
}
