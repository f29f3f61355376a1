//! Fibonacci Heap implementation
//!
//! A Fibonacci heap is a data structure for priority queue operations with:
//! - O(1) amortized insert and decrease-key
//! - O(log n) amortized extract-min
//!
//! The structure consists of a collection of heap-ordered trees whose roots are
//! linked in a root list. Work is deferred: inserts only append a root, and
//! trees of equal degree are merged ("consolidated") when the top is extracted.
//! Decrease-key cuts a cell from its parent and, while ancestors have already
//! lost a child, keeps cutting upwards (the cascading cut). That bookkeeping is
//! what keeps a tree whose root has degree `k` at least `F(k+2)` cells large.
//!
//! Cells are stored in a [`SlotMap`] arena and addressed by generational keys,
//! so a [`FibonacciHandle`] whose cell has been removed is detected instead of
//! dangling. Handles also carry the identity of the heap that issued them,
//! since keys from two arenas may coincide.
//!
//! A heap has a [`HeapDirection`]: `Increasing` hands out the smallest priority
//! first, `Decreasing` the largest.
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
//!
//! heap.change_key(a, 2).unwrap();
//! assert_eq!(heap.dequeue(), Ok((2, "a")));
//! assert_eq!(heap.dequeue(), Ok((5, "b")));
//! ```

pub mod cell;
pub mod list;

use crate::compare::{Comparer, HeapDirection};
use crate::rank::{as_index, checked_increment, saturating_decrement};
use crate::traits::{Handle, Heap, HeapError};
use cell::{CellKey, FibonacciCell};
use list::CellList;
use rustc_hash::FxHashMap;
use slotmap::SlotMap;
use smallvec::SmallVec;
use std::cmp::Ordering;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use tracing::trace;

static NEXT_HEAP_ID: AtomicU64 = AtomicU64::new(0);

/// Handle to an element in a Fibonacci heap
///
/// Returned by [`FibonacciHeap::enqueue`] and consumed by
/// [`change_key`](FibonacciHeap::change_key) and [`delete`](FibonacciHeap::delete).
/// Using a handle after its element left the heap yields
/// [`HeapError::InvalidHandle`], and so does using it on any heap other
/// than the one that issued it.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct FibonacciHandle {
    heap: u64,
    key: CellKey,
}

impl Handle for FibonacciHandle {}

/// Fibonacci Heap
///
/// # Example
///
/// ```rust
/// use graph_collections::compare::{Comparer, HeapDirection};
/// use graph_collections::fibonacci::FibonacciHeap;
///
/// let mut heap = FibonacciHeap::with_direction(HeapDirection::Decreasing, Comparer::natural());
/// heap.enqueue(1, "low");
/// heap.enqueue(9, "high");
/// assert_eq!(heap.top(), Ok((&9, &"high")));
/// ```
#[derive(Debug, Clone)]
pub struct FibonacciHeap<P, T> {
    id: u64,
    cells: SlotMap<CellKey, FibonacciCell<P, T>>,
    roots: CellList,
    top: Option<CellKey>,
    direction: HeapDirection,
    comparer: Comparer<P>,
}

impl<P: Ord + 'static, T> FibonacciHeap<P, T> {
    /// Creates an empty min-heap over the natural order of `P`.
    pub fn new() -> Self {
        Self::with_direction(HeapDirection::Increasing, Comparer::natural())
    }
}

impl<P, T> FibonacciHeap<P, T> {
    /// Creates an empty heap with the given direction and ordering.
    pub fn with_direction(direction: HeapDirection, comparer: Comparer<P>) -> Self {
        Self {
            id: NEXT_HEAP_ID.fetch_add(1, AtomicOrdering::Relaxed),
            cells: SlotMap::with_key(),
            roots: CellList::new(),
            top: None,
            direction,
            comparer,
        }
    }

    /// Returns true if the heap is empty
    pub fn is_empty(&self) -> bool {
        self.top.is_none()
    }

    /// Returns the number of elements in the heap
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// The order in which elements are handed out.
    pub fn direction(&self) -> HeapDirection {
        self.direction
    }

    /// The ordering used by this heap.
    pub fn comparer(&self) -> &Comparer<P> {
        &self.comparer
    }

    /// Inserts `value` with the given priority in O(1).
    pub fn enqueue(&mut self, priority: P, value: T) -> FibonacciHandle {
        let key = self.cells.insert(FibonacciCell::new(priority, value));
        self.roots.push_back(&mut self.cells, key);

        match self.top {
            Some(top) if !self.better(key, top) => {}
            _ => self.top = Some(key),
        }

        self.handle(key)
    }

    /// Returns the top priority and value without removing them.
    ///
    /// # Errors
    /// Returns [`HeapError::Empty`] if the heap has no elements.
    pub fn top(&self) -> Result<(&P, &T), HeapError> {
        let top = self.top.ok_or(HeapError::Empty)?;
        let cell = &self.cells[top];
        Ok((&cell.priority, &cell.value))
    }

    /// Alias of [`top`](FibonacciHeap::top).
    pub fn peek(&self) -> Result<(&P, &T), HeapError> {
        self.top()
    }

    /// Looks up the priority and value behind a handle.
    pub fn get(&self, handle: FibonacciHandle) -> Result<(&P, &T), HeapError> {
        let cell = &self.cells[self.resolve(handle)?];
        Ok((&cell.priority, &cell.value))
    }

    /// Returns true if the handle was issued by this heap and its element is
    /// still in it.
    pub fn contains_handle(&self, handle: FibonacciHandle) -> bool {
        self.resolve(handle).is_ok()
    }

    /// Removes and returns the top element, then consolidates the root list.
    ///
    /// # Errors
    /// Returns [`HeapError::Empty`] if the heap has no elements.
    pub fn dequeue(&mut self) -> Result<(P, T), HeapError> {
        let top = self.top.ok_or(HeapError::Empty)?;

        self.roots.unlink(&mut self.cells, top);

        let mut children = self.cells[top].children;
        let mut cursor = children.first();
        while let Some(child) = cursor {
            let cell = &mut self.cells[child];
            cursor = cell.links.next;
            cell.parent = None;
            cell.marked = false;
        }
        self.roots.append(&mut self.cells, &mut children);

        let cell = self.cells.remove(top).ok_or(HeapError::InvalidHandle)?;
        self.top = None;
        self.consolidate();

        Ok((cell.priority, cell.value))
    }

    /// Changes the priority of the handle's element.
    ///
    /// Moving towards the top (smaller for `Increasing`) cuts the cell from
    /// its parent if heap order broke, cascading through marked ancestors.
    /// Moving away from the top cuts every child that now beats the cell.
    ///
    /// # Errors
    /// Returns [`HeapError::InvalidHandle`] if the element left the heap.
    pub fn change_key(&mut self, handle: FibonacciHandle, priority: P) -> Result<(), HeapError> {
        let key = self.resolve(handle)?;
        let current = &self.cells[key].priority;
        let ordering = self
            .direction
            .orient(self.comparer.compare(&priority, current));
        self.cells[key].priority = priority;

        match ordering {
            Ordering::Equal => {}
            Ordering::Less => {
                if let Some(parent) = self.cells[key].parent {
                    if self.better(key, parent) {
                        self.cut(key);
                    }
                }
                if let Some(top) = self.top {
                    if self.better(key, top) {
                        self.top = Some(key);
                    }
                }
            }
            Ordering::Greater => {
                let violating: SmallVec<[CellKey; 8]> = self.cells[key]
                    .children
                    .keys(&self.cells)
                    .filter(|&child| self.better(child, key))
                    .collect();

                for &child in &violating {
                    self.detach(child, key);
                }
                if !violating.is_empty() && self.cells[key].parent.is_some() {
                    self.cells[key].marked = true;
                }
                self.consolidate();
            }
        }

        Ok(())
    }

    /// Removes the handle's element regardless of its priority.
    ///
    /// # Errors
    /// Returns [`HeapError::InvalidHandle`] if the element already left the heap.
    pub fn delete(&mut self, handle: FibonacciHandle) -> Result<(P, T), HeapError> {
        let key = self.resolve(handle)?;
        if self.cells[key].parent.is_some() {
            self.cut(key);
        }
        // the cell now outranks everything
        self.top = Some(key);
        self.dequeue()
    }

    /// Moves every element of `other` into this heap.
    ///
    /// Cells of `other` are re-homed into this heap's arena, so this costs
    /// O(m) for `m = other.len()`. Handles issued by `other` are rejected
    /// with [`HeapError::InvalidHandle`] from then on; the returned map
    /// translates them into handles of this heap.
    ///
    /// # Errors
    /// Returns [`HeapError::DirectionMismatch`] if the heaps order in opposite
    /// directions; neither heap is modified.
    pub fn merge(
        &mut self,
        other: FibonacciHeap<P, T>,
    ) -> Result<FxHashMap<FibonacciHandle, FibonacciHandle>, HeapError> {
        if other.direction != self.direction {
            return Err(HeapError::DirectionMismatch);
        }

        let FibonacciHeap {
            id: other_id,
            cells: other_cells,
            roots: other_roots,
            top: other_top,
            ..
        } = other;

        let mut remap: FxHashMap<CellKey, CellKey> = FxHashMap::default();
        remap.reserve(other_cells.len());
        for (old, cell) in other_cells {
            let new = self.cells.insert(cell);
            remap.insert(old, new);
        }
        for &new in remap.values() {
            self.cells[new].remap_keys(|old| remap[&old]);
        }

        let mut moved_roots = other_roots.remap(|old| remap[&old]);
        self.roots.append(&mut self.cells, &mut moved_roots);

        if let Some(other_top) = other_top.map(|old| remap[&old]) {
            match self.top {
                Some(top) if !self.better(other_top, top) => {}
                _ => self.top = Some(other_top),
            }
        }

        trace!(moved = remap.len(), "merged fibonacci heaps");
        Ok(remap
            .into_iter()
            .map(|(old, new)| {
                let old = FibonacciHandle {
                    heap: other_id,
                    key: old,
                };
                (old, self.handle(new))
            })
            .collect())
    }

    /// Removes all elements in heap order.
    pub fn drain(&mut self) -> Drain<'_, P, T> {
        Drain { heap: self }
    }

    /// Iterates over clones of the elements in heap order without modifying
    /// the heap.
    ///
    /// The iterator works on a private copy, so it reflects the heap at the
    /// time of the call.
    pub fn iter(&self) -> IntoSorted<P, T>
    where
        P: Clone,
        T: Clone,
    {
        IntoSorted { heap: self.clone() }
    }

    /// Consumes the heap, yielding its elements in heap order.
    pub fn into_sorted(self) -> IntoSorted<P, T> {
        IntoSorted { heap: self }
    }

    /// Checks heap order, parent links, degrees and the top pointer.
    pub fn is_consistent(&self) -> bool {
        let mut reachable = 0;
        let mut stack: Vec<CellKey> = self.roots.keys(&self.cells).collect();

        for &root in &stack {
            if self.cells[root].parent.is_some() {
                return false;
            }
        }
        if let Some(top) = self.top {
            if self.roots.keys(&self.cells).any(|root| self.better(root, top)) {
                return false;
            }
        } else if !self.roots.is_empty() {
            return false;
        }

        while let Some(key) = stack.pop() {
            reachable += 1;
            let cell = &self.cells[key];
            if as_index(cell.degree) != cell.children.len() {
                return false;
            }
            for child in cell.children.keys(&self.cells) {
                if self.cells[child].parent != Some(key) || self.better(child, key) {
                    return false;
                }
                stack.push(child);
            }
        }

        reachable == self.cells.len()
    }

    fn handle(&self, key: CellKey) -> FibonacciHandle {
        FibonacciHandle { heap: self.id, key }
    }

    /// The live cell behind `handle`, if this heap issued it.
    fn resolve(&self, handle: FibonacciHandle) -> Result<CellKey, HeapError> {
        if handle.heap == self.id && self.cells.contains_key(handle.key) {
            Ok(handle.key)
        } else {
            Err(HeapError::InvalidHandle)
        }
    }

    /// Returns true if cell `a` belongs strictly closer to the top than `b`.
    #[inline]
    fn better(&self, a: CellKey, b: CellKey) -> bool {
        self.direction.orient(
            self.comparer
                .compare(&self.cells[a].priority, &self.cells[b].priority),
        ) == Ordering::Less
    }

    /// Moves `key` from its parent's children to the root list, then performs
    /// the cascading cut on its ancestors.
    fn cut(&mut self, key: CellKey) {
        let Some(parent) = self.cells[key].parent else {
            return;
        };
        self.detach(key, parent);

        let mut current = parent;
        let mut depth = 0usize;
        while self.cells[current].marked {
            let Some(grandparent) = self.cells[current].parent else {
                break;
            };
            self.detach(current, grandparent);
            current = grandparent;
            depth += 1;
        }
        if self.cells[current].parent.is_some() {
            self.cells[current].marked = true;
        }

        if depth > 0 {
            trace!(depth, "cascading cut");
        }
    }

    /// Unlinks `child` from `parent` and appends it to the root list.
    fn detach(&mut self, child: CellKey, parent: CellKey) {
        let mut children = self.cells[parent].children;
        children.unlink(&mut self.cells, child);
        let parent_cell = &mut self.cells[parent];
        parent_cell.children = children;
        parent_cell.degree = saturating_decrement(parent_cell.degree);

        let cell = &mut self.cells[child];
        cell.parent = None;
        cell.marked = false;
        self.roots.push_back(&mut self.cells, child);
    }

    /// Makes root `child` a child of root `parent`.
    fn link(&mut self, child: CellKey, parent: CellKey) {
        self.roots.unlink(&mut self.cells, child);

        let cell = &mut self.cells[child];
        cell.parent = Some(parent);
        cell.marked = false;

        let mut children = self.cells[parent].children;
        children.push_back(&mut self.cells, child);
        let parent_cell = &mut self.cells[parent];
        parent_cell.children = children;
        parent_cell.degree = checked_increment(parent_cell.degree);
    }

    /// Merges roots of equal degree until all root degrees are distinct, then
    /// rescans the roots for the new top.
    fn consolidate(&mut self) {
        let roots_before = self.roots.len();
        let mut by_degree: SmallVec<[Option<CellKey>; 64]> = SmallVec::new();

        let mut cursor = self.roots.first();
        while let Some(root) = cursor {
            // read ahead: `root` may be linked under an earlier root below
            cursor = self.cells[root].links.next;

            let mut tree = root;
            loop {
                let degree = as_index(self.cells[tree].degree);
                if degree >= by_degree.len() {
                    by_degree.resize(degree + 1, None);
                }
                match by_degree[degree].take() {
                    None => {
                        by_degree[degree] = Some(tree);
                        break;
                    }
                    Some(other) => {
                        // ties keep the tree that was seen first on top
                        let (parent, child) = if self.better(tree, other) {
                            (tree, other)
                        } else {
                            (other, tree)
                        };
                        self.link(child, parent);
                        tree = parent;
                    }
                }
            }
        }

        let mut top: Option<CellKey> = None;
        for root in self.roots.keys(&self.cells) {
            match top {
                Some(best) if !self.better(root, best) => {}
                _ => top = Some(root),
            }
        }
        self.top = top;

        trace!(
            roots_before,
            roots_after = self.roots.len(),
            "consolidated root list"
        );
    }
}

impl<P: Ord + 'static, T> Default for FibonacciHeap<P, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P, T> Heap<T, P> for FibonacciHeap<P, T> {
    fn len(&self) -> usize {
        self.cells.len()
    }

    fn push(&mut self, priority: P, item: T) {
        self.enqueue(priority, item);
    }

    fn peek(&self) -> Option<(&P, &T)> {
        self.top().ok()
    }

    fn pop(&mut self) -> Option<(P, T)> {
        self.dequeue().ok()
    }
}

/// Draining iterator returned by [`FibonacciHeap::drain`].
pub struct Drain<'a, P, T> {
    heap: &'a mut FibonacciHeap<P, T>,
}

impl<P, T> Iterator for Drain<'_, P, T> {
    type Item = (P, T);

    fn next(&mut self) -> Option<(P, T)> {
        self.heap.dequeue().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.heap.len(), Some(self.heap.len()))
    }
}

/// Owning iterator in heap order, returned by [`FibonacciHeap::iter`] and
/// [`FibonacciHeap::into_sorted`].
pub struct IntoSorted<P, T> {
    heap: FibonacciHeap<P, T>,
}

impl<P, T> Iterator for IntoSorted<P, T> {
    type Item = (P, T);

    fn next(&mut self) -> Option<(P, T)> {
        self.heap.dequeue().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.heap.len(), Some(self.heap.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_operations() {
        let mut heap = FibonacciHeap::new();
        assert!(heap.is_empty());
        assert_eq!(heap.len(), 0);

        heap.enqueue(5, "a");
        heap.enqueue(3, "b");
        heap.enqueue(7, "c");

        assert_eq!(heap.len(), 3);
        assert_eq!(heap.top(), Ok((&3, &"b")));

        assert_eq!(heap.dequeue(), Ok((3, "b")));
        assert_eq!(heap.top(), Ok((&5, &"a")));
        assert!(heap.is_consistent());
    }

    #[test]
    fn test_empty_heap_errors() {
        let mut heap: FibonacciHeap<i32, ()> = FibonacciHeap::new();
        assert_eq!(heap.top(), Err(HeapError::Empty));
        assert_eq!(heap.peek(), Err(HeapError::Empty));
        assert_eq!(heap.dequeue(), Err(HeapError::Empty));
        assert!(heap.is_empty());
    }

    #[test]
    fn test_change_key_to_top() {
        let mut heap = FibonacciHeap::new();
        let a = heap.enqueue(10, "a");
        heap.enqueue(5, "b");
        heap.enqueue(20, "c");

        heap.change_key(a, 2).unwrap();
        assert_eq!(heap.dequeue(), Ok((2, "a")));
        assert_eq!(heap.dequeue(), Ok((5, "b")));
        assert_eq!(heap.dequeue(), Ok((20, "c")));
    }

    #[test]
    fn test_decrease_key_inside_tree() {
        let mut heap = FibonacciHeap::new();
        let handles: Vec<_> = (0..32).map(|i| heap.enqueue(100 + i, i)).collect();

        // force consolidation so that most cells sit below a parent
        assert_eq!(heap.dequeue(), Ok((100, 0)));
        assert!(heap.is_consistent());

        for (i, &handle) in handles.iter().enumerate().skip(1).rev() {
            heap.change_key(handle, i as i32).unwrap();
            assert!(heap.is_consistent());
        }

        for i in 1..32 {
            assert_eq!(heap.dequeue(), Ok((i, i)));
        }
        assert!(heap.is_empty());
    }

    #[test]
    fn test_cascading_cut_marks_and_cuts_ancestors() {
        let mut heap = FibonacciHeap::new();
        let handles: Vec<_> = (0..17).map(|i| heap.enqueue(i, i)).collect();
        heap.dequeue().unwrap();

        // one root of degree 4 now holds keys 1..=16
        assert_eq!(heap.roots.len(), 1);

        // cut two children of the same internal cell: the second cut cascades
        for &i in &[16, 15, 14, 12, 8] {
            heap.change_key(handles[i], -(i as i32)).unwrap();
            assert!(heap.is_consistent());
        }

        let order: Vec<i32> = heap.drain().map(|(p, _)| p).collect();
        let mut sorted = order.clone();
        sorted.sort();
        assert_eq!(order, sorted);
        assert_eq!(order.len(), 16);
    }

    #[test]
    fn test_increase_key_cuts_violating_children() {
        let mut heap = FibonacciHeap::new();
        let handles: Vec<_> = (0..9).map(|i| heap.enqueue(i * 10, i)).collect();
        heap.dequeue().unwrap();

        // the remaining root (priority 10) has children; push it below them
        heap.change_key(handles[1], 1000).unwrap();
        assert!(heap.is_consistent());
        assert_eq!(heap.top(), Ok((&20, &2)));

        let order: Vec<i32> = heap.drain().map(|(p, _)| p).collect();
        assert_eq!(order, vec![20, 30, 40, 50, 60, 70, 80, 1000]);
    }

    #[test]
    fn test_delete() {
        let mut heap = FibonacciHeap::new();
        let handles: Vec<_> = (0..10).map(|i| heap.enqueue(i, i)).collect();
        heap.dequeue().unwrap();

        assert_eq!(heap.delete(handles[7]), Ok((7, 7)));
        assert_eq!(heap.delete(handles[7]), Err(HeapError::InvalidHandle));
        assert_eq!(heap.delete(handles[0]), Err(HeapError::InvalidHandle));
        assert!(heap.is_consistent());

        let order: Vec<i32> = heap.drain().map(|(p, _)| p).collect();
        assert_eq!(order, vec![1, 2, 3, 4, 5, 6, 8, 9]);
    }

    #[test]
    fn test_invalid_handle_after_dequeue() {
        let mut heap = FibonacciHeap::new();
        let a = heap.enqueue(1, "a");
        heap.enqueue(2, "b");
        heap.dequeue().unwrap();

        assert!(!heap.contains_handle(a));
        assert_eq!(heap.get(a), Err(HeapError::InvalidHandle));
        assert_eq!(heap.change_key(a, 0), Err(HeapError::InvalidHandle));
        assert_eq!(heap.len(), 1);
    }

    #[test]
    fn test_merge() {
        let mut heap1 = FibonacciHeap::new();
        heap1.enqueue(5, "a");
        heap1.enqueue(10, "b");

        let mut heap2 = FibonacciHeap::new();
        let c = heap2.enqueue(3, "c");
        let d = heap2.enqueue(7, "d");
        heap2.enqueue(1, "e");
        heap2.dequeue().unwrap();

        let remap = heap1.merge(heap2).unwrap();
        assert_eq!(heap1.top(), Ok((&3, &"c")));
        assert_eq!(heap1.len(), 4);
        assert!(heap1.is_consistent());

        // handles of the absorbed heap no longer resolve
        assert!(!heap1.contains_handle(c));
        assert_eq!(heap1.get(c), Err(HeapError::InvalidHandle));
        assert_eq!(heap1.change_key(c, 100), Err(HeapError::InvalidHandle));
        assert_eq!(heap1.delete(d), Err(HeapError::InvalidHandle));
        assert_eq!(heap1.len(), 4);

        let moved = remap[&d];
        assert_eq!(heap1.get(moved), Ok((&7, &"d")));
        heap1.change_key(moved, 0).unwrap();
        assert_eq!(heap1.dequeue(), Ok((0, "d")));

        let order: Vec<_> = heap1.drain().map(|(p, _)| p).collect();
        assert_eq!(order, vec![3, 5, 10]);
    }

    #[test]
    fn test_handle_from_another_heap_is_rejected() {
        let mut first = FibonacciHeap::new();
        let mut second = FibonacciHeap::new();
        let a = first.enqueue(5, "a");
        let b = second.enqueue(3, "b");

        // both are the first key of their arena
        assert_eq!(second.get(a), Err(HeapError::InvalidHandle));
        assert_eq!(second.change_key(a, 100), Err(HeapError::InvalidHandle));
        assert_eq!(first.delete(b), Err(HeapError::InvalidHandle));
        assert_eq!(first.get(a), Ok((&5, &"a")));
        assert_eq!(second.dequeue(), Ok((3, "b")));
    }

    #[test]
    fn test_merge_direction_mismatch() {
        let mut up: FibonacciHeap<i32, ()> = FibonacciHeap::new();
        up.enqueue(1, ());
        let down = FibonacciHeap::with_direction(HeapDirection::Decreasing, Comparer::natural());

        assert_eq!(up.merge(down).unwrap_err(), HeapError::DirectionMismatch);
        assert_eq!(up.len(), 1);
    }

    #[test]
    fn test_decreasing_direction() {
        let mut heap = FibonacciHeap::with_direction(HeapDirection::Decreasing, Comparer::natural());
        let handles: Vec<_> = [4, 8, 1, 9, 3].iter().map(|&p| heap.enqueue(p, p)).collect();

        assert_eq!(heap.dequeue(), Ok((9, 9)));
        // "better" means larger for a max-heap
        heap.change_key(handles[2], 100).unwrap();
        assert_eq!(heap.top(), Ok((&100, &1)));

        let order: Vec<_> = heap.drain().map(|(p, _)| p).collect();
        assert_eq!(order, vec![100, 8, 4, 3]);
    }

    #[test]
    fn test_iter_is_non_destructive() {
        let mut heap = FibonacciHeap::new();
        for p in [3, 1, 2] {
            heap.enqueue(p, p.to_string());
        }

        let snapshot: Vec<_> = heap.iter().map(|(p, _)| p).collect();
        assert_eq!(snapshot, vec![1, 2, 3]);
        assert_eq!(heap.len(), 3);

        heap.enqueue(0, "0".to_string());
        let sorted: Vec<_> = heap.into_sorted().map(|(_, v)| v).collect();
        assert_eq!(sorted, vec!["0", "1", "2", "3"]);
    }

    #[test]
    fn test_equal_change_key_is_noop() {
        let mut heap = FibonacciHeap::new();
        let a = heap.enqueue(4, 'a');
        heap.enqueue(2, 'b');
        heap.change_key(a, 4).unwrap();
        assert_eq!(heap.top(), Ok((&2, &'b')));
        assert!(heap.is_consistent());
    }
}
