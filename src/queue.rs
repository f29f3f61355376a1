//! Vertex priority queues for graph algorithms
//!
//! Shortest-path, spanning-tree and best-first search algorithms keep their
//! frontier in a [`PriorityQueue`]. The queues here do not take priorities
//! from the caller; they hold a *distance function* and ask it for the
//! current distance of a vertex whenever the vertex is enqueued or updated.
//! An algorithm relaxes an edge by writing the new distance into its own
//! table and calling [`update`](PriorityQueue::update).
//!
//! | Queue | Backing heap | `contains` | `update` |
//! |-------|--------------|------------|----------|
//! | [`BinaryQueue`] | [`BinaryHeap`] | O(n) | O(n) |
//! | [`FibonacciQueue`] | [`FibonacciHeap`] | O(1) | O(1) amortized decrease |
//!
//! # Example
//!
//! ```rust
//! use graph_collections::PriorityQueue;
//! use graph_collections::queue::FibonacciQueue;
//! use std::cell::RefCell;
//! use std::collections::HashMap;
//! use std::rc::Rc;
//!
//! let distances = Rc::new(RefCell::new(HashMap::from([('a', 7), ('b', 3)])));
//! let lookup = Rc::clone(&distances);
//! let mut queue = FibonacciQueue::new(move |v: &char| lookup.borrow()[v]);
//!
//! queue.enqueue('a');
//! queue.enqueue('b');
//! distances.borrow_mut().insert('a', 1);
//! queue.update('a');
//! assert_eq!(queue.dequeue(), Ok('a'));
//! ```

use crate::binary_heap::BinaryHeap;
use crate::compare::{Comparer, HeapDirection};
use crate::fibonacci::{FibonacciHandle, FibonacciHeap};
use crate::traits::{HeapError, PriorityQueue};
use rustc_hash::FxHashMap;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::hash::{BuildHasher, Hash};
use std::rc::Rc;
use tracing::debug;

/// Priority queue over a [`BinaryHeap`].
///
/// Vertices are located by linear scan, so `contains` and `update` are O(n).
pub struct BinaryQueue<V, D, F> {
    heap: BinaryHeap<D, V>,
    distance: F,
}

impl<V, D, F> BinaryQueue<V, D, F>
where
    D: Ord + 'static,
    F: Fn(&V) -> D,
{
    /// Creates a queue ordering vertices by the natural order of their
    /// distances.
    pub fn new(distance: F) -> Self {
        Self::with_comparer(distance, Comparer::natural())
    }
}

impl<V, D, F> BinaryQueue<V, D, F>
where
    F: Fn(&V) -> D,
{
    /// Creates a queue ordering vertices by `comparer` applied to their
    /// distances.
    pub fn with_comparer(distance: F, comparer: Comparer<D>) -> Self {
        BinaryQueue {
            heap: BinaryHeap::with_comparer(comparer),
            distance,
        }
    }

    /// Queued vertices in backing-array order.
    pub fn to_vec(&self) -> Vec<V>
    where
        V: Clone,
    {
        self.heap.iter().map(|(_, v)| v.clone()).collect()
    }
}

impl<V, D, F> PriorityQueue<V> for BinaryQueue<V, D, F>
where
    V: PartialEq,
    F: Fn(&V) -> D,
{
    fn len(&self) -> usize {
        self.heap.len()
    }

    fn contains(&self, vertex: &V) -> bool {
        self.heap.contains(vertex)
    }

    fn enqueue(&mut self, vertex: V) {
        let distance = (self.distance)(&vertex);
        self.heap.add(distance, vertex);
    }

    fn dequeue(&mut self) -> Result<V, HeapError> {
        self.heap.remove_minimum().map(|(_, v)| v)
    }

    fn peek(&self) -> Result<&V, HeapError> {
        self.heap.minimum().map(|(_, v)| v)
    }

    fn update(&mut self, vertex: V) {
        let distance = (self.distance)(&vertex);
        self.heap.update(distance, vertex);
    }
}

impl<V: fmt::Debug, D: fmt::Debug, F> fmt::Debug for BinaryQueue<V, D, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BinaryQueue")
            .field("heap", &self.heap)
            .finish_non_exhaustive()
    }
}

/// Whether a known vertex currently sits in the heap.
#[derive(Debug, Clone, Copy)]
enum QueueSlot {
    /// Known but not enqueued, or already dequeued
    Detached,
    Queued(FibonacciHandle),
}

/// Priority queue over a [`FibonacciHeap`].
///
/// Every vertex maps to the handle of its heap cell, so `contains` is O(1)
/// and `update` is a [`change_key`](FibonacciHeap::change_key).
pub struct FibonacciQueue<V, D, F> {
    heap: FibonacciHeap<D, V>,
    slots: FxHashMap<V, QueueSlot>,
    distance: F,
}

impl<V, D, F> FibonacciQueue<V, D, F>
where
    V: Hash + Eq + Clone,
    D: Ord + 'static,
    F: Fn(&V) -> D,
{
    /// Creates a queue handing out the vertex with the smallest distance
    /// first.
    pub fn new(distance: F) -> Self {
        Self::with_direction(distance, HeapDirection::Increasing, Comparer::natural())
    }

    /// Creates a queue that knows `vertices` up front without enqueuing
    /// them. Algorithms seed every vertex this way and enqueue the ones that
    /// become reachable.
    pub fn with_vertices<I>(vertices: I, distance: F) -> Self
    where
        I: IntoIterator<Item = V>,
    {
        let mut queue = Self::new(distance);
        queue.slots.extend(
            vertices
                .into_iter()
                .map(|vertex| (vertex, QueueSlot::Detached)),
        );
        queue
    }
}

impl<V, D> FibonacciQueue<V, D, Box<dyn Fn(&V) -> D>>
where
    V: Hash + Eq + Clone + 'static,
    D: Ord + Clone + 'static,
{
    /// Creates a queue reading distances from a shared table.
    ///
    /// Every vertex in `distances` at construction time is known up front.
    /// The table is read again on each `enqueue` and `update`, so the caller
    /// relaxes edges by writing into it. Vertices missing from the table are
    /// ordered at `unreachable`.
    ///
    /// # Panics
    /// `enqueue` and `update` panic if the table is mutably borrowed while
    /// they run.
    pub fn from_distances<S>(distances: &Rc<RefCell<HashMap<V, D, S>>>, unreachable: D) -> Self
    where
        S: BuildHasher + 'static,
    {
        let vertices: Vec<V> = distances.borrow().keys().cloned().collect();
        let table = Rc::clone(distances);
        let distance: Box<dyn Fn(&V) -> D> = Box::new(move |vertex: &V| {
            table
                .borrow()
                .get(vertex)
                .cloned()
                .unwrap_or_else(|| unreachable.clone())
        });
        Self::with_vertices(vertices, distance)
    }
}

impl<V, D, F> FibonacciQueue<V, D, F>
where
    V: Hash + Eq + Clone,
    F: Fn(&V) -> D,
{
    /// Creates a queue with an explicit direction and ordering.
    pub fn with_direction(distance: F, direction: HeapDirection, comparer: Comparer<D>) -> Self {
        FibonacciQueue {
            heap: FibonacciHeap::with_direction(direction, comparer),
            slots: FxHashMap::default(),
            distance,
        }
    }

    /// The direction of the backing heap.
    pub fn direction(&self) -> HeapDirection {
        self.heap.direction()
    }

    /// Returns true if `vertex` was seeded or has ever been enqueued.
    pub fn is_known(&self, vertex: &V) -> bool {
        self.slots.contains_key(vertex)
    }

    /// Queued vertices, best distance first.
    pub fn to_vec(&self) -> Vec<V>
    where
        D: Clone,
    {
        self.heap.iter().map(|(_, v)| v).collect()
    }

    fn queued_handle(&self, vertex: &V) -> Option<FibonacciHandle> {
        match self.slots.get(vertex) {
            Some(&QueueSlot::Queued(handle)) if self.heap.contains_handle(handle) => Some(handle),
            _ => None,
        }
    }

    fn insert(&mut self, vertex: V) {
        let distance = (self.distance)(&vertex);
        let handle = self.heap.enqueue(distance, vertex.clone());
        self.slots.insert(vertex, QueueSlot::Queued(handle));
    }
}

impl<V, D, F> PriorityQueue<V> for FibonacciQueue<V, D, F>
where
    V: Hash + Eq + Clone,
    F: Fn(&V) -> D,
{
    fn len(&self) -> usize {
        self.heap.len()
    }

    fn contains(&self, vertex: &V) -> bool {
        self.queued_handle(vertex).is_some()
    }

    /// Queues `vertex`; a vertex that is already queued is repositioned
    /// instead of being queued twice.
    fn enqueue(&mut self, vertex: V) {
        self.update(vertex);
    }

    fn dequeue(&mut self) -> Result<V, HeapError> {
        let (_, vertex) = self.heap.dequeue()?;
        if let Some(slot) = self.slots.get_mut(&vertex) {
            *slot = QueueSlot::Detached;
        }
        Ok(vertex)
    }

    fn peek(&self) -> Result<&V, HeapError> {
        self.heap.top().map(|(_, v)| v)
    }

    fn update(&mut self, vertex: V) {
        if let Some(handle) = self.queued_handle(&vertex) {
            if self
                .heap
                .change_key(handle, (self.distance)(&vertex))
                .is_ok()
            {
                return;
            }
        }
        debug!(queued = self.heap.len(), "queueing vertex");
        self.insert(vertex);
    }
}

impl<V: fmt::Debug, D: fmt::Debug, F> fmt::Debug for FibonacciQueue<V, D, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FibonacciQueue")
            .field("heap", &self.heap)
            .field("known", &self.slots.len())
            .finish_non_exhaustive()
    }
}
