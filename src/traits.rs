//! Common traits and error types for the collections in this crate
//!
//! This module provides the contracts that graph algorithms program against:
//!
//! - [`Heap`]: Base trait for simple `(priority, item)` heaps
//! - [`PriorityQueue`]: Vertex queue whose priorities come from a distance function
//! - [`DisjointSet`]: Union-find over arbitrary hashable values
//!
//! The heaps themselves expose a richer `Result`-returning API; [`Heap`] is the
//! `Option`-returning view used by generic code, compatible with the patterns of
//! Rust's standard heap API.

use thiserror::Error;

/// Error type for heap and priority-queue operations
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum HeapError {
    /// The heap has no elements
    #[error("heap is empty")]
    Empty,
    /// The handle is no longer valid (element was removed or belongs to another heap)
    #[error("handle is no longer valid (element was removed)")]
    InvalidHandle,
    /// Two Fibonacci heaps with different directions cannot be merged
    #[error("heaps must have the same direction to be merged")]
    DirectionMismatch,
    /// A soft-heap key is at or above the configured maximum
    #[error("key is greater than or equal to the maximum key value")]
    KeyOutOfRange,
    /// A soft-heap error rate outside of `(0, 0.5]`
    #[error("error rate {0} is outside of (0, 0.5]")]
    InvalidErrorRate(f64),
    /// A cursor was used after the heap it walks was structurally modified
    #[error("heap was modified since the cursor was created (version {expected}, now {found})")]
    StaleCursor {
        /// Version recorded when the cursor was created
        expected: u64,
        /// Version of the heap when the cursor was used
        found: u64,
    },
}

/// Error type for disjoint-set operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DisjointSetError {
    /// `make_set` was called with a value that already has a set
    #[error("value is already present in the disjoint set")]
    AlreadyPresent,
    /// The value was never added with `make_set`
    #[error("value is not present in the disjoint set")]
    NotFound,
}

/// A handle to an element in the heap, used for `change_key` and `delete`
///
/// This is an opaque type that identifies a specific element in the heap.
pub trait Handle: Copy + PartialEq + Eq + std::hash::Hash {}

/// Base trait for heap/priority queue data structures
///
/// This trait provides a simple API similar to Rust's `BinaryHeap`:
/// - `push` inserts an element
/// - `pop` removes and returns the top element
/// - `peek` returns the top element without removing it
///
/// Unlike `BinaryHeap` which stores values directly (using `Ord`), these heaps
/// store (priority, item) pairs to separate the ordering key from the data, and
/// order them through a [`Comparer`](crate::compare::Comparer).
///
/// # Example
///
/// ```rust
/// use graph_collections::Heap;
/// use graph_collections::binary_heap::BinaryHeap;
///
/// let mut heap = BinaryHeap::new();
/// heap.push(3, "three");
/// heap.push(1, "one");
/// heap.push(2, "two");
///
/// assert_eq!(heap.peek(), Some((&1, &"one")));
/// assert_eq!(heap.pop(), Some((1, "one")));
/// ```
pub trait Heap<T, P> {
    /// Returns true if the heap is empty
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of elements in the heap
    fn len(&self) -> usize;

    /// Inserts an element with the given priority
    fn push(&mut self, priority: P, item: T);

    /// Returns the top priority and associated item without removing it
    fn peek(&self) -> Option<(&P, &T)>;

    /// Removes and returns the top priority and associated item
    fn pop(&mut self) -> Option<(P, T)>;
}

/// Priority queue over vertices, as consumed by shortest-path, spanning-tree
/// and best-first search algorithms.
///
/// The queue does not store priorities supplied by the caller: it asks its
/// distance function for the priority of a vertex whenever the vertex is
/// enqueued or updated.
pub trait PriorityQueue<V> {
    /// Number of queued vertices
    fn len(&self) -> usize;

    /// Returns true if no vertex is queued
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true if `vertex` is queued and has not been dequeued since
    fn contains(&self, vertex: &V) -> bool;

    /// Queues `vertex` at its current distance
    fn enqueue(&mut self, vertex: V);

    /// Removes and returns the vertex with the best distance
    fn dequeue(&mut self) -> Result<V, HeapError>;

    /// Returns the vertex with the best distance without removing it
    fn peek(&self) -> Result<&V, HeapError>;

    /// Re-reads the distance of `vertex` and repositions it; queues it if absent
    fn update(&mut self, vertex: V);
}

/// Union-find over values of type `T`
pub trait DisjointSet<T> {
    /// Number of disjoint sets
    fn set_count(&self) -> usize;

    /// Number of values across all sets
    fn element_count(&self) -> usize;

    /// Returns true if `value` was added with [`make_set`](DisjointSet::make_set)
    fn contains(&self, value: &T) -> bool;

    /// Creates a singleton set holding `value`
    fn make_set(&mut self, value: T) -> Result<(), DisjointSetError>;

    /// Returns the representative of the set holding `value`
    fn find_set(&self, value: &T) -> Result<&T, DisjointSetError>;

    /// Merges the sets holding `left` and `right`; returns false if they were
    /// already the same set
    fn union(&mut self, left: &T, right: &T) -> Result<bool, DisjointSetError>;

    /// Returns true if `left` and `right` belong to the same set
    fn are_in_same_set(&self, left: &T, right: &T) -> Result<bool, DisjointSetError>;
}
