//! Sorted position index and ownership map
//!
//! Not thread-safe: every method here expects the caller to hold the ring
//! lock. Lookups additionally require a non-empty state.

use crate::hash::Position;
use std::collections::HashMap;

/// Size of the hash space (2^32)
pub(crate) const HASH_SPACE: u64 = 1 << 32;

/// Outcome of inserting a member
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Insert {
    /// The position was free
    New,
    /// The same member was already there
    Unchanged,
    /// Another member hashed to the same position and was replaced
    Replaced(String),
}

/// Ring contents: occupied positions and their owners
#[derive(Debug, Default)]
pub(crate) struct RingState {
    /// Occupied positions, strictly ascending
    positions: Vec<Position>,

    /// Position -> member currently occupying it
    owners: HashMap<Position, String>,
}

impl RingState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    pub fn contains(&self, position: Position) -> bool {
        self.owners.contains_key(&position)
    }

    /// Occupy `position` with `member`, overwriting any previous owner
    pub fn insert(&mut self, position: Position, member: &str) -> Insert {
        if let Err(index) = self.positions.binary_search(&position) {
            self.positions.insert(index, position);
        }

        match self.owners.insert(position, member.to_string()) {
            None => Insert::New,
            Some(previous) if previous == member => Insert::Unchanged,
            Some(previous) => Insert::Replaced(previous),
        }
    }

    /// Free `position`, returning the member that occupied it
    pub fn remove(&mut self, position: Position) -> Option<String> {
        if let Ok(index) = self.positions.binary_search(&position) {
            self.positions.remove(index);
        }
        self.owners.remove(&position)
    }

    pub fn clear(&mut self) {
        self.positions.clear();
        self.owners.clear();
    }

    /// Smallest occupied position strictly greater than `position`,
    /// wrapping to the smallest occupied position
    pub fn successor(&self, position: Position) -> Position {
        let index = self.positions.partition_point(|&p| p <= position);
        if index == self.positions.len() {
            self.positions[0]
        } else {
            self.positions[index]
        }
    }

    /// Largest occupied position less than or equal to `position`,
    /// wrapping to the largest occupied position
    pub fn predecessor(&self, position: Position) -> Position {
        let index = self.positions.partition_point(|&p| p <= position);
        if index == 0 {
            self.positions[self.positions.len() - 1]
        } else {
            self.positions[index - 1]
        }
    }

    /// Member at an occupied position
    pub fn owner(&self, position: Position) -> &str {
        self.owners.get(&position).map(String::as_str).unwrap_or_default()
    }

    /// Members in ascending position order
    pub fn members(&self) -> Vec<String> {
        self.positions
            .iter()
            .map(|p| self.owner(*p).to_string())
            .collect()
    }

    /// Number of hash values between the predecessor of `position`
    /// (exclusive) and `position` (inclusive)
    pub fn arc_length(&self, position: Position) -> u64 {
        if self.positions.len() == 1 {
            return HASH_SPACE;
        }
        let previous = self.predecessor(position.wrapping_sub(1));
        position.wrapping_sub(previous) as u64
    }
}
