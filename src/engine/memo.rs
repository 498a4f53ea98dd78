//! Memo keys for the backtracking search.
//!
//! The unordered search visits matcher entries in a fixed order, so a search
//! state is fully described by how deep it is and which actual elements are
//! already taken. Once such a state has failed it fails again on every later
//! visit; remembering it keeps repeated leftovers from being re-explored.
//!
//! Taken actuals are stored as a packed bit set, which keeps the key small and
//! hashable without allocating per element.

use std::collections::HashSet;

/// Packed set of actual indices.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct UsedSet {
    words: Vec<u64>,
}

impl UsedSet {
    pub(crate) fn new(len: usize) -> Self {
        UsedSet { words: vec![0; len.div_ceil(64)] }
    }

    pub(crate) fn contains(&self, idx: usize) -> bool {
        self.words[idx / 64] & (1u64 << (idx % 64)) != 0
    }

    pub(crate) fn insert(&mut self, idx: usize) {
        self.words[idx / 64] |= 1u64 << (idx % 64);
    }

    pub(crate) fn remove(&mut self, idx: usize) {
        self.words[idx / 64] &= !(1u64 << (idx % 64));
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct StateKey {
    depth: usize,
    used: UsedSet,
}

/// States already known not to extend to a full assignment.
#[derive(Debug, Default)]
pub(crate) struct FailedStates {
    seen: HashSet<StateKey>,
}

impl FailedStates {
    pub(crate) fn contains(&self, depth: usize, used: &UsedSet) -> bool {
        self.seen.contains(&StateKey { depth, used: used.clone() })
    }

    pub(crate) fn insert(&mut self, depth: usize, used: &UsedSet) {
        self.seen.insert(StateKey { depth, used: used.clone() });
    }
}
