//! FerrumRing - A consistent hashing ring
//!
//! Maps string keys onto a caller-managed set of members so that adding or
//! removing a member only remaps the keys next to it:
//! - `hash`: pluggable hash functions (CRC-32 by default)
//! - `ring`: the sorted position index and all lookups, behind one `RwLock`
//! - `config`: JSON description of a ring
//!
//! ```
//! use ferrumring::Ring;
//!
//! let ring = Ring::new();
//! ring.add("10.0.0.1:6379");
//! ring.add("10.0.0.2:6379");
//!
//! let owner = ring.get("user:42").unwrap();
//! assert!(owner.starts_with("10.0.0."));
//! assert_eq!(ring.next_n("user:42", 2).len(), 2);
//! ```

pub mod hash;
pub mod ring;
pub mod config;

/// Re-export commonly used types
pub use hash::{HashAlgorithm, HashFn, Position, RingHasher};
pub use ring::{HashRange, Ring, RingStats};
pub use config::RingConfig;
