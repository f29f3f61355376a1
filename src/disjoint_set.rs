//! Forest-based disjoint set (union-find)
//!
//! Values are mapped to elements of a parent-pointer forest; each tree is one
//! set and its root is the set's representative.
//!
//! - **Union by rank**: the root of the shallower tree goes under the root of
//!   the deeper one. On equal ranks the right root goes under the left root
//!   and the left root's rank grows by one.
//! - **Path compression**: [`find_set`](ForestDisjointSet::find_set) repoints
//!   every element it visits straight at the root. Parent pointers live in
//!   [`Cell`]s so that compression works through `&self`.
//!
//! Together they give an amortized cost of O(α(n)) per operation.
//!
//! # Example
//!
//! ```rust
//! use graph_collections::DisjointSet;
//! use graph_collections::disjoint_set::ForestDisjointSet;
//!
//! let mut sets = ForestDisjointSet::new();
//! for v in ["a", "b", "c"] {
//!     sets.make_set(v).unwrap();
//! }
//! assert_eq!(sets.union(&"a", &"b"), Ok(true));
//! assert_eq!(sets.are_in_same_set(&"b", &"a"), Ok(true));
//! assert_eq!(sets.are_in_same_set(&"a", &"c"), Ok(false));
//! assert_eq!(sets.set_count(), 2);
//! ```

use crate::rank::{checked_increment, Rank};
use crate::traits::{DisjointSet, DisjointSetError};
use rustc_hash::FxHashMap;
use std::cell::Cell;
use std::hash::Hash;
use tracing::trace;

#[derive(Debug, Clone)]
struct Element<T> {
    value: T,
    /// Upper bound on the height of the tree below this element
    rank: Rank,
    /// `None` for a root
    parent: Cell<Option<usize>>,
}

/// Union-find forest over hashable values.
#[derive(Debug, Clone)]
pub struct ForestDisjointSet<T> {
    elements: Vec<Element<T>>,
    index: FxHashMap<T, usize>,
    set_count: usize,
}

impl<T: Hash + Eq + Clone> ForestDisjointSet<T> {
    /// Creates an empty forest.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty forest with room for `capacity` values.
    pub fn with_capacity(capacity: usize) -> Self {
        ForestDisjointSet {
            elements: Vec::with_capacity(capacity),
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            set_count: 0,
        }
    }

    /// Iterates over every value, in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &T> + '_ {
        self.elements.iter().map(|element| &element.value)
    }

    /// Snapshot of the current partition.
    ///
    /// Sets are listed in the order their first member was added, and the
    /// members of each set in insertion order.
    pub fn sets(&self) -> Vec<Vec<&T>> {
        let mut slot_of_root: FxHashMap<usize, usize> = FxHashMap::default();
        let mut sets: Vec<Vec<&T>> = Vec::with_capacity(self.set_count);
        for (i, element) in self.elements.iter().enumerate() {
            let root = self.find_root(i);
            let slot = *slot_of_root.entry(root).or_insert_with(|| {
                sets.push(Vec::new());
                sets.len() - 1
            });
            sets[slot].push(&element.value);
        }
        sets
    }

    /// Removes every value.
    pub fn clear(&mut self) {
        self.elements.clear();
        self.index.clear();
        self.set_count = 0;
    }

    fn position(&self, value: &T) -> Result<usize, DisjointSetError> {
        self.index
            .get(value)
            .copied()
            .ok_or(DisjointSetError::NotFound)
    }

    /// Root of the tree holding element `i`, compressing the path to it.
    fn find_root(&self, i: usize) -> usize {
        let mut root = i;
        while let Some(parent) = self.elements[root].parent.get() {
            root = parent;
        }

        let mut current = i;
        while let Some(parent) = self.elements[current].parent.get() {
            self.elements[current].parent.set(Some(root));
            current = parent;
        }
        root
    }
}

impl<T: Hash + Eq + Clone> DisjointSet<T> for ForestDisjointSet<T> {
    fn set_count(&self) -> usize {
        self.set_count
    }

    fn element_count(&self) -> usize {
        self.elements.len()
    }

    fn contains(&self, value: &T) -> bool {
        self.index.contains_key(value)
    }

    fn make_set(&mut self, value: T) -> Result<(), DisjointSetError> {
        if self.index.contains_key(&value) {
            return Err(DisjointSetError::AlreadyPresent);
        }
        self.index.insert(value.clone(), self.elements.len());
        self.elements.push(Element {
            value,
            rank: 0,
            parent: Cell::new(None),
        });
        self.set_count += 1;
        Ok(())
    }

    fn find_set(&self, value: &T) -> Result<&T, DisjointSetError> {
        let root = self.find_root(self.position(value)?);
        Ok(&self.elements[root].value)
    }

    fn union(&mut self, left: &T, right: &T) -> Result<bool, DisjointSetError> {
        let left_root = self.find_root(self.position(left)?);
        let right_root = self.find_root(self.position(right)?);
        if left_root == right_root {
            return Ok(false);
        }

        let (left_rank, right_rank) = (
            self.elements[left_root].rank,
            self.elements[right_root].rank,
        );
        if left_rank < right_rank {
            self.elements[left_root].parent.set(Some(right_root));
        } else {
            self.elements[right_root].parent.set(Some(left_root));
            if left_rank == right_rank {
                self.elements[left_root].rank = checked_increment(left_rank);
            }
        }

        self.set_count -= 1;
        trace!(set_count = self.set_count, "merged disjoint sets");
        Ok(true)
    }

    fn are_in_same_set(&self, left: &T, right: &T) -> Result<bool, DisjointSetError> {
        let left_root = self.find_root(self.position(left)?);
        let right_root = self.find_root(self.position(right)?);
        Ok(left_root == right_root)
    }
}

impl<T: Hash + Eq + Clone> Default for ForestDisjointSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds a forest of singletons; repeated values are kept once.
impl<T: Hash + Eq + Clone> FromIterator<T> for ForestDisjointSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut sets = Self::with_capacity(iter.size_hint().0);
        for value in iter {
            // duplicates are skipped
            let _ = sets.make_set(value);
        }
        sets
    }
}
