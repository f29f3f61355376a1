//! Binary Heap implementation
//!
//! An array-backed binary min-heap over `(priority, value)` pairs, ordered by a
//! user-supplied [`Comparer`]. The children of index `i` live at `2i + 1` and
//! `2i + 2`.
//!
//! Besides the usual push/pop operations the heap supports locating a value by
//! linear scan, which gives an O(n) `update` that graph searches use to
//! reprioritize a vertex without handles.
//!
//! # Time Complexity
//!
//! | Operation        | Complexity |
//! |------------------|------------|
//! | `add`            | O(log n)   |
//! | `remove_minimum` | O(log n)   |
//! | `minimum`        | O(1)       |
//! | `index_of`       | O(n)       |
//! | `update`         | O(n)       |
//!
//! # Example
//!
//! ```rust
//! use graph_collections::binary_heap::BinaryHeap;
//!
//! let mut heap = BinaryHeap::new();
//! heap.add(3, "three");
//! heap.add(1, "one");
//! heap.add(2, "two");
//!
//! assert_eq!(heap.minimum(), Ok((&1, &"one")));
//! assert_eq!(heap.remove_minimum(), Ok((1, "one")));
//! heap.update(0, "three");
//! assert_eq!(heap.remove_minimum(), Ok((0, "three")));
//! ```

use crate::compare::Comparer;
use crate::traits::{Heap, HeapError};
use std::cmp::Ordering;

/// A binary min-heap with a configurable ordering
///
/// Structural mutations bump an internal version counter. A [`Cursor`]
/// remembers the version it was created at and refuses to continue once the
/// heap has changed underneath it.
#[derive(Debug)]
pub struct BinaryHeap<P, T> {
    /// The heap data stored as a vector of (priority, value) pairs
    items: Vec<(P, T)>,
    comparer: Comparer<P>,
    version: u64,
}

impl<P: Ord + 'static, T> BinaryHeap<P, T> {
    /// Creates an empty heap ordered by the natural order of `P`.
    pub fn new() -> Self {
        Self::with_comparer(Comparer::natural())
    }
}

impl<P, T> BinaryHeap<P, T> {
    /// Creates an empty heap ordered by `comparer`.
    pub fn with_comparer(comparer: Comparer<P>) -> Self {
        Self::with_capacity(0, comparer)
    }

    /// Creates an empty heap with room for `capacity` elements.
    pub fn with_capacity(capacity: usize, comparer: Comparer<P>) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            comparer,
            version: 0,
        }
    }

    /// Returns the number of elements in the heap
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the heap is empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of elements the heap can hold before growing.
    pub fn capacity(&self) -> usize {
        self.items.capacity()
    }

    /// The ordering used by this heap.
    pub fn comparer(&self) -> &Comparer<P> {
        &self.comparer
    }

    /// Inserts `value` with the given priority.
    pub fn add(&mut self, priority: P, value: T) {
        if self.items.len() == self.items.capacity() {
            // grow to 2c + 1
            self.items.reserve_exact(self.items.capacity() + 1);
        }
        self.items.push((priority, value));
        self.version += 1;
        self.sift_up(self.items.len() - 1);
    }

    /// Returns the minimum priority and its value without removing them.
    ///
    /// # Errors
    /// Returns [`HeapError::Empty`] if the heap has no elements.
    pub fn minimum(&self) -> Result<(&P, &T), HeapError> {
        self.items
            .first()
            .map(|(p, t)| (p, t))
            .ok_or(HeapError::Empty)
    }

    /// Removes and returns the minimum priority and its value.
    ///
    /// # Errors
    /// Returns [`HeapError::Empty`] if the heap has no elements; the heap is
    /// left untouched.
    pub fn remove_minimum(&mut self) -> Result<(P, T), HeapError> {
        if self.items.is_empty() {
            return Err(HeapError::Empty);
        }

        let last_idx = self.items.len() - 1;
        self.items.swap(0, last_idx);
        let result = self.items.pop().ok_or(HeapError::Empty)?;
        self.version += 1;

        if !self.items.is_empty() {
            self.sift_down(0);
        }

        Ok(result)
    }

    /// Removes the element stored at `index` in the backing array.
    ///
    /// Returns `None` if `index` is out of range.
    pub fn remove_at(&mut self, index: usize) -> Option<(P, T)> {
        if index >= self.items.len() {
            return None;
        }

        let result = self.items.swap_remove(index);
        self.version += 1;

        if index < self.items.len() {
            // the element moved into `index` came from the last leaf and may
            // belong above or below its new position
            let index = self.sift_up(index);
            self.sift_down(index);
        }

        Some(result)
    }

    /// Removes every element.
    pub fn clear(&mut self) {
        self.items.clear();
        self.version += 1;
    }

    /// Position of `value` in the backing array, found by linear scan.
    pub fn index_of(&self, value: &T) -> Option<usize>
    where
        T: PartialEq,
    {
        self.items.iter().position(|(_, v)| v == value)
    }

    /// Returns true if `value` is stored in the heap.
    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.index_of(value).is_some()
    }

    /// Sets the priority of `value`, inserting it if absent.
    ///
    /// The element moves up if its priority decreased and down if it
    /// increased. A tied priority is stored in place without moving anything.
    pub fn update(&mut self, priority: P, value: T)
    where
        T: PartialEq,
    {
        let Some(index) = self.index_of(&value) else {
            self.add(priority, value);
            return;
        };

        let ordering = self.comparer.compare(&priority, &self.items[index].0);
        self.items[index] = (priority, value);
        self.version += 1;

        match ordering {
            Ordering::Less => {
                self.sift_up(index);
            }
            Ordering::Greater => self.sift_down(index),
            Ordering::Equal => {}
        }
    }

    /// Lowers the priority of `value` if `priority` does not exceed its
    /// current one; inserts it if absent.
    ///
    /// Returns false, leaving the heap untouched, when the new priority is
    /// worse than the stored one.
    pub fn minimum_update(&mut self, priority: P, value: T) -> bool
    where
        T: PartialEq,
    {
        let Some(index) = self.index_of(&value) else {
            self.add(priority, value);
            return true;
        };

        if self.comparer.compare(&priority, &self.items[index].0) == Ordering::Greater {
            return false;
        }

        self.items[index] = (priority, value);
        self.version += 1;
        self.sift_up(index);
        true
    }

    /// Checks the heap-order invariant for every parent/child pair.
    pub fn is_consistent(&self) -> bool {
        (1..self.items.len()).all(|child| {
            let parent = (child - 1) / 2;
            !self
                .comparer
                .less(&self.items[child].0, &self.items[parent].0)
        })
    }

    /// Copies the `(priority, value)` pairs in backing-array order.
    pub fn to_priority_value_vec(&self) -> Vec<(P, T)>
    where
        P: Clone,
        T: Clone,
    {
        self.items.clone()
    }

    /// Iterates over the `(priority, value)` pairs in backing-array order.
    pub fn iter(&self) -> impl Iterator<Item = (&P, &T)> + '_ {
        self.items.iter().map(|(p, t)| (p, t))
    }

    /// Creates a cursor over the backing array that does not borrow the heap.
    pub fn cursor(&self) -> Cursor {
        Cursor {
            index: 0,
            version: self.version,
        }
    }

    /// Move element at index up to maintain heap property; returns its final index
    fn sift_up(&mut self, mut index: usize) -> usize {
        while index > 0 {
            let parent = (index - 1) / 2;
            if self.comparer.less(&self.items[index].0, &self.items[parent].0) {
                self.items.swap(index, parent);
                index = parent;
            } else {
                break;
            }
        }
        index
    }

    /// Move element at index down to maintain heap property
    fn sift_down(&mut self, mut index: usize) {
        let len = self.items.len();
        loop {
            let left = 2 * index + 1;
            let right = 2 * index + 2;
            let mut smallest = index;

            if left < len && self.comparer.less(&self.items[left].0, &self.items[smallest].0) {
                smallest = left;
            }
            if right < len && self.comparer.less(&self.items[right].0, &self.items[smallest].0) {
                smallest = right;
            }

            if smallest != index {
                self.items.swap(index, smallest);
                index = smallest;
            } else {
                break;
            }
        }
    }
}

impl<P: Ord + 'static, T> Default for BinaryHeap<P, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P, T> Heap<T, P> for BinaryHeap<P, T> {
    fn len(&self) -> usize {
        self.items.len()
    }

    fn push(&mut self, priority: P, item: T) {
        self.add(priority, item);
    }

    fn peek(&self) -> Option<(&P, &T)> {
        self.minimum().ok()
    }

    fn pop(&mut self) -> Option<(P, T)> {
        self.remove_minimum().ok()
    }
}

/// A position in a [`BinaryHeap`]'s backing array that survives releasing the
/// borrow of the heap.
///
/// Each call to [`advance`](Cursor::advance) checks that the heap has not been
/// structurally modified since the cursor was created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    index: usize,
    version: u64,
}

impl Cursor {
    /// Returns the next pair, or `None` once the array is exhausted.
    ///
    /// # Errors
    /// Returns [`HeapError::StaleCursor`] if `heap` changed since the cursor was
    /// created.
    pub fn advance<'h, P, T>(
        &mut self,
        heap: &'h BinaryHeap<P, T>,
    ) -> Result<Option<(&'h P, &'h T)>, HeapError> {
        if heap.version != self.version {
            return Err(HeapError::StaleCursor {
                expected: self.version,
                found: heap.version,
            });
        }

        let item = heap.items.get(self.index).map(|(p, t)| (p, t));
        if item.is_some() {
            self.index += 1;
        }
        Ok(item)
    }
}
