//! Consistent hashing ring
//!
//! Maps string keys to a caller-managed set of members. Each member sits at
//! exactly one position, the hash of its identifier. A key belongs to the
//! first member strictly clockwise from the key's hash, wrapping past
//! `u32::MAX` back to the smallest position.
//!
//! All methods take `&self`: a single reader/writer lock guards the sorted
//! position index and the ownership map, so a `Ring` can be shared between
//! threads behind an `Arc`.

mod range;
mod state;

pub use range::{HashRange, RingStats};

use crate::hash::{HashAlgorithm, Position, RingHasher};
use state::{Insert, RingState, HASH_SPACE};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, warn};

/// Consistent hashing ring
#[derive(Debug)]
pub struct Ring {
    /// Hash function applied to keys and members
    hasher: RingHasher,

    /// Positions and owners, always updated together
    state: RwLock<RingState>,
}

impl Ring {
    /// Create an empty ring hashing with CRC-32 (IEEE)
    pub fn new() -> Self {
        Self::with_hasher(RingHasher::default())
    }

    /// Create an empty ring with a custom hash function
    pub fn with_hash_fn<F>(func: F) -> Self
    where
        F: Fn(&[u8]) -> u32 + Send + Sync + 'static,
    {
        Self::with_hasher(RingHasher::custom(func))
    }

    /// Create an empty ring with one of the built-in algorithms
    pub fn with_algorithm(algorithm: HashAlgorithm) -> Self {
        Self::with_hasher(RingHasher::from_algorithm(algorithm))
    }

    pub fn with_hasher(hasher: RingHasher) -> Self {
        Ring {
            hasher,
            state: RwLock::new(RingState::new()),
        }
    }

    /// The hash function this ring was built with
    pub fn hasher(&self) -> &RingHasher {
        &self.hasher
    }

    // A panic never leaves the state half-updated, so a poisoned lock is
    // still safe to use.
    fn read(&self) -> RwLockReadGuard<'_, RingState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, RingState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Check if the ring has no members
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Number of members on the ring
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Hash a key into a ring position
    pub fn hash(&self, key: &str) -> Position {
        self.hasher.hash(key)
    }

    /// Add a member, returning its position
    ///
    /// Adding the same member twice is a no-op. If a different member already
    /// occupies the same position, it is replaced.
    pub fn add(&self, key: &str) -> Position {
        let position = self.hash(key);

        match self.write().insert(position, key) {
            Insert::New => debug!("Added member '{}' at position {}", key, position),
            Insert::Unchanged => debug!("Member '{}' already at position {}", key, position),
            Insert::Replaced(previous) => warn!(
                "Hash collision at position {}: '{}' replaces '{}'",
                position, key, previous
            ),
        }

        position
    }

    /// Remove a member; does nothing if it is not on the ring
    ///
    /// Frees the member's position whoever occupies it, so removing one side
    /// of a collision also removes the other.
    pub fn remove(&self, key: &str) {
        let position = self.hash(key);

        match self.write().remove(position) {
            Some(member) => debug!("Removed member '{}' from position {}", member, position),
            None => debug!("Member '{}' not on ring, nothing to remove", key),
        }
    }

    /// Remove every member
    pub fn clear(&self) {
        let mut state = self.write();
        let removed = state.len();
        state.clear();
        debug!("Cleared ring ({} members removed)", removed);
    }

    /// Check if the key's position is occupied
    pub fn has(&self, key: &str) -> bool {
        let position = self.hash(key);
        self.read().contains(position)
    }

    /// Member owning a key (alias of [`Ring::next`])
    pub fn get(&self, key: &str) -> Option<String> {
        self.next(key)
    }

    /// First member strictly clockwise from the key's hash
    ///
    /// A key whose hash equals a member's position (for instance the member's
    /// own identifier) goes to the following member, not that one.
    pub fn next(&self, key: &str) -> Option<String> {
        self.get_from_hash(self.hash(key))
    }

    /// Same as [`Ring::get`] for an already computed hash
    pub fn get_from_hash(&self, hash: Position) -> Option<String> {
        let state = self.read();
        if state.is_empty() {
            return None;
        }
        Some(state.owner(state.successor(hash)).to_string())
    }

    /// The next `count` members clockwise from the key's hash
    ///
    /// Always returns exactly `count` entries on a non-empty ring; members
    /// repeat once the walk has gone all the way around.
    pub fn next_n(&self, key: &str, count: usize) -> Vec<String> {
        let mut position = self.hash(key);

        let state = self.read();
        if state.is_empty() {
            return Vec::new();
        }

        let mut members = Vec::with_capacity(count);
        for _ in 0..count {
            position = state.successor(position);
            members.push(state.owner(position).to_string());
        }
        members
    }

    /// The previous `count` members counter-clockwise, starting with the
    /// member at or before the key's hash
    pub fn prev_n(&self, key: &str, count: usize) -> Vec<String> {
        let hash = self.hash(key);

        let state = self.read();
        if state.is_empty() {
            return Vec::new();
        }

        let mut members = Vec::with_capacity(count);
        let mut position = state.predecessor(hash);
        for _ in 0..count {
            members.push(state.owner(position).to_string());
            position = state.predecessor(position.wrapping_sub(1));
        }
        members
    }

    /// Replica placement for a key, excluding its owner
    ///
    /// Walks clockwise from the owner and returns up to `count` other members
    /// (never more than `len() - 1`, never the same member twice).
    pub fn replicas(&self, key: &str, count: usize) -> Vec<String> {
        let hash = self.hash(key);

        let state = self.read();
        if state.is_empty() {
            return Vec::new();
        }

        let wanted = count.min(state.len() - 1);
        let mut replicas = Vec::with_capacity(wanted);
        let mut position = state.successor(hash);
        while replicas.len() < wanted {
            position = state.successor(position);
            replicas.push(state.owner(position).to_string());
        }
        replicas
    }

    /// Interval of hash space attributed to `host`
    ///
    /// `to` is the host's hash and `from` is one past the closest occupied
    /// position before it. The host does not need to be on the ring: the
    /// result is then the interval it would take over once added.
    pub fn range(&self, host: &str) -> HashRange {
        let to = self.hash(host);

        let state = self.read();
        if state.is_empty() {
            return HashRange::default();
        }

        let from = state.predecessor(to.wrapping_sub(1)).wrapping_add(1);
        HashRange::new(from, to)
    }

    /// Members in ascending position order
    pub fn members(&self) -> Vec<String> {
        self.read().members()
    }

    /// Snapshot of the sorted position index
    pub fn positions(&self) -> Vec<Position> {
        self.read().positions().to_vec()
    }

    /// Ring statistics
    pub fn stats(&self) -> RingStats {
        let state = self.read();

        let widest = state
            .positions()
            .iter()
            .map(|p| state.arc_length(*p))
            .max()
            .unwrap_or(0);

        RingStats {
            members: state.len(),
            largest_share: widest as f64 / HASH_SPACE as f64,
        }
    }
}

impl Default for Ring {
    fn default() -> Self {
        Self::new()
    }
}
