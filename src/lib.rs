//! Priority queues and disjoint sets for graph algorithms
//!
//! This crate provides the collections that shortest-path, minimum spanning
//! tree and best-first search algorithms are built on.
//!
//! # Features
//!
//! - **Binary Heap**: array-backed; O(log n) add and remove-minimum, O(n) update by value
//! - **Fibonacci Heap**: O(1) amortized enqueue, decrease-key and top; O(log n) amortized dequeue
//! - **Soft Heap**: O(1) amortized add, O(log 1/ε) amortized remove-minimum, at most εn corrupted keys
//! - **Forest Disjoint Set**: union by rank with path compression, O(α(n)) amortized
//! - **Vertex queues**: [`PriorityQueue`] adapters that read priorities from a distance function
//!
//! Heaps order priorities through a [`Comparer`](compare::Comparer) rather than
//! `Ord`, so float distances can be used directly.
//!
//! # Example
//!
//! ```rust
//! use graph_collections::fibonacci::FibonacciHeap;
//!
//! let mut heap = FibonacciHeap::new();
//! let a = heap.enqueue(10, "a");
//! heap.enqueue(5, "b");
//! heap.enqueue(20, "c");
//! heap.change_key(a, 2).unwrap();
//! assert_eq!(heap.dequeue(), Ok((2, "a")));
//! assert_eq!(heap.dequeue(), Ok((5, "b")));
//! ```

pub mod binary_heap;
pub mod compare;
pub mod disjoint_set;
pub mod fibonacci;
pub mod queue;
pub mod rank;
pub mod soft;
pub mod traits;

// Re-export the contracts for convenience
pub use traits::{DisjointSet, DisjointSetError, Heap, HeapError, PriorityQueue};
