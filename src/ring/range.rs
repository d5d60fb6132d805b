//! Hash intervals owned by ring members

use super::state::HASH_SPACE;
use crate::hash::Position;
use serde::Serialize;

/// Interval of hash space attributed to a member
///
/// Covers `from..=to`, i.e. `(predecessor, member]`. When `from > to` the
/// interval wraps through zero. An empty ring reports `from == to == 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct HashRange {
    /// First hash value of the interval (one past the predecessor)
    pub from: Position,
    /// Last hash value of the interval (the member's own position)
    pub to: Position,
}

impl HashRange {
    pub fn new(from: Position, to: Position) -> Self {
        HashRange { from, to }
    }

    /// Whether the interval crosses from `u32::MAX` back to zero
    pub fn wraps(&self) -> bool {
        self.from > self.to
    }

    /// Check if a hash value falls inside the interval
    pub fn contains(&self, hash: Position) -> bool {
        if self.wraps() {
            hash >= self.from || hash <= self.to
        } else {
            self.from <= hash && hash <= self.to
        }
    }

    /// Number of hash values covered
    pub fn span(&self) -> u64 {
        if self.wraps() {
            HASH_SPACE - self.from as u64 + self.to as u64 + 1
        } else {
            (self.to - self.from) as u64 + 1
        }
    }
}

impl From<HashRange> for (Position, Position) {
    fn from(range: HashRange) -> Self {
        (range.from, range.to)
    }
}

/// Ring statistics
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RingStats {
    /// Number of members on the ring
    pub members: usize,
    /// Fraction of the hash space owned by the widest member (0.0 when empty)
    pub largest_share: f64,
}
