//! Soft Heap implementation
//!
//! A soft heap (Chazelle, 2000) is a meldable priority queue that is allowed to
//! *corrupt* keys: it may raise the key an item is ordered by above the item's
//! true key. In exchange for a bounded amount of corruption it reaches O(1)
//! amortized insert and O(log 1/ε) amortized delete-min. With an error rate
//! `ε`, at most `ε·n` items are corrupted at any time, `n` being the number of
//! insertions so far.
//!
//! # Structure
//!
//! - A rank-ordered list of *heads*, one per tree. Each head also stores the
//!   head with the smallest root key among itself and all later heads (the
//!   suffix minimum), giving O(1) access to the overall minimum.
//! - Each tree is a binary tree of *nodes*. A node has a `next` subtree and a
//!   `child` subtree, a displayed key `ckey`, and an *item list*: the items
//!   currently ordered by `ckey`. Every item's true key is at most `ckey`.
//! - When the item list of a root runs dry the root is *sifted*: it refills
//!   its list from its `next` subtree. Above rank `r = 2 + 2⌈log2 1/ε⌉` it may
//!   refill twice and concatenate both lists under the larger key; that is the
//!   only place where corruption happens.
//!
//! Nodes, items and heads live in [`SlotMap`] arenas. An item list belongs to
//! exactly one node at a time; a parent takes it over from its `next` node
//! instead of sharing it.
//!
//! Soft heaps only support draining; [`SoftHeap::iter`] yields nothing.
//!
//! # Example
//!
//! ```rust
//! use graph_collections::soft::SoftHeap;
//!
//! let mut heap = SoftHeap::new(0.01, i32::MAX).unwrap();
//! for key in [5, 3, 8, 1] {
//!     heap.add(key, key * 10).unwrap();
//! }
//! assert_eq!(heap.remove_minimum(), Ok((1, 10)));
//! assert_eq!(heap.len(), 3);
//! ```

use crate::compare::Comparer;
use crate::rank::{checked_increment, Rank, MAX_RANK};
use crate::traits::HeapError;
use slotmap::{new_key_type, Key, SlotMap};
use std::cmp::Ordering;
use std::fmt;
use tracing::{debug, trace};

new_key_type! {
    struct NodeKey;
    struct CellKey;
    struct HeadKey;
}

/// An inserted item.
struct Cell<K, V> {
    key: K,
    value: V,
    next: Option<CellKey>,
}

#[derive(Debug, Clone, Copy, Default)]
struct ItemList {
    head: Option<CellKey>,
    tail: Option<CellKey>,
}

impl ItemList {
    fn is_empty(&self) -> bool {
        self.head.is_none()
    }
}

struct Node<K> {
    ckey: K,
    rank: Rank,
    /// Null for leaves; a node has either both subtrees or neither
    next: NodeKey,
    child: NodeKey,
    items: ItemList,
}

impl<K> Node<K> {
    fn is_leaf(&self) -> bool {
        self.next.is_null()
    }
}

/// A tree in the rank-ordered root list; `header` and `tail` are sentinels
/// with a null `queue`.
#[derive(Default)]
struct Head {
    queue: NodeKey,
    rank: Rank,
    prev: HeadKey,
    next: HeadKey,
    suffix_min: HeadKey,
}

/// Stage of an iterative sift frame.
#[derive(Clone, Copy)]
enum Stage {
    Enter,
    Refilled,
    Resifted,
}

/// An item removed from a [`SoftHeap`], together with the key it was
/// ordered by at removal time.
#[derive(Debug, Clone, PartialEq)]
pub struct SoftEntry<K, V> {
    /// The key the item was inserted with
    pub key: K,
    /// The item's value
    pub value: V,
    /// The (possibly raised) key the item was removed under
    pub ckey: K,
    corrupted: bool,
}

impl<K, V> SoftEntry<K, V> {
    /// Returns true if the item was ordered by a key above its own.
    pub fn is_corrupted(&self) -> bool {
        self.corrupted
    }
}

/// Soft Heap
pub struct SoftHeap<K, V> {
    nodes: SlotMap<NodeKey, Node<K>>,
    cells: SlotMap<CellKey, Cell<K, V>>,
    heads: SlotMap<HeadKey, Head>,
    header: HeadKey,
    tail: HeadKey,
    comparer: Comparer<K>,
    key_max_value: K,
    error_rate: f64,
    min_rank: Rank,
    len: usize,
}

impl<K: Ord + Clone + 'static, V> SoftHeap<K, V> {
    /// Creates a soft heap over the natural order of `K`.
    ///
    /// `key_max_value` plays the role of infinity: it must compare greater
    /// than every key that will be added.
    ///
    /// # Errors
    /// Returns [`HeapError::InvalidErrorRate`] unless `0 < error_rate <= 0.5`.
    pub fn new(error_rate: f64, key_max_value: K) -> Result<Self, HeapError> {
        Self::with_comparer(error_rate, key_max_value, Comparer::natural())
    }
}

impl<K: Clone, V> SoftHeap<K, V> {
    /// Creates a soft heap ordered by `comparer`.
    ///
    /// # Errors
    /// Returns [`HeapError::InvalidErrorRate`] unless `0 < error_rate <= 0.5`.
    pub fn with_comparer(
        error_rate: f64,
        key_max_value: K,
        comparer: Comparer<K>,
    ) -> Result<Self, HeapError> {
        if !(error_rate > 0.0 && error_rate <= 0.5) {
            return Err(HeapError::InvalidErrorRate(error_rate));
        }

        let min_rank = 2.0 + 2.0 * (1.0 / error_rate).log2().ceil();
        let min_rank = min_rank.min(f64::from(MAX_RANK)) as Rank;

        let mut heads = SlotMap::with_key();
        let header = heads.insert(Head::default());
        let tail = heads.insert(Head {
            rank: MAX_RANK,
            ..Head::default()
        });
        heads[header].next = tail;
        heads[tail].prev = header;

        Ok(Self {
            nodes: SlotMap::with_key(),
            cells: SlotMap::with_key(),
            heads,
            header,
            tail,
            comparer,
            key_max_value,
            error_rate,
            min_rank,
            len: 0,
        })
    }

    /// Returns the number of items in the heap
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the heap is empty
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The configured error rate `ε`.
    pub fn error_rate(&self) -> f64 {
        self.error_rate
    }

    /// Rank above which sifting may corrupt keys, `2 + 2⌈log2 1/ε⌉`.
    pub fn min_rank(&self) -> Rank {
        self.min_rank
    }

    /// The sentinel key standing in for infinity.
    pub fn key_max_value(&self) -> &K {
        &self.key_max_value
    }

    /// Inserts an item.
    ///
    /// # Errors
    /// Returns [`HeapError::KeyOutOfRange`] if `key` is not below the
    /// sentinel maximum; the heap is not modified.
    pub fn add(&mut self, key: K, value: V) -> Result<(), HeapError> {
        if self.comparer.compare(&key, &self.key_max_value) != Ordering::Less {
            return Err(HeapError::KeyOutOfRange);
        }

        let ckey = key.clone();
        let cell = self.cells.insert(Cell {
            key,
            value,
            next: None,
        });
        let node = self.nodes.insert(Node {
            ckey,
            rank: 0,
            next: NodeKey::null(),
            child: NodeKey::null(),
            items: ItemList {
                head: Some(cell),
                tail: Some(cell),
            },
        });

        self.meld(node);
        self.len += 1;
        Ok(())
    }

    /// Removes an item whose current key is minimal and returns its true key.
    ///
    /// Because of corruption the returned key is not necessarily the smallest
    /// true key in the heap.
    ///
    /// # Errors
    /// Returns [`HeapError::Empty`] if the heap has no items.
    pub fn remove_minimum(&mut self) -> Result<(K, V), HeapError> {
        self.remove_minimum_entry()
            .map(|entry| (entry.key, entry.value))
    }

    /// Like [`remove_minimum`](SoftHeap::remove_minimum), also reporting the
    /// key the item was removed under.
    ///
    /// # Errors
    /// Returns [`HeapError::Empty`] if the heap has no items.
    pub fn remove_minimum_entry(&mut self) -> Result<SoftEntry<K, V>, HeapError> {
        if self.len == 0 {
            return Err(HeapError::Empty);
        }

        let mut h = self.min_head();
        while self.nodes[self.heads[h].queue].items.is_empty() {
            let root = self.heads[h].queue;

            let mut chain: Rank = 0;
            let mut tmp = root;
            while !self.nodes[tmp].is_leaf() {
                tmp = self.nodes[tmp].next;
                chain += 1;
            }

            if chain < self.heads[h].rank / 2 {
                // too few children left for its rank: break the tree up
                let prev = self.unlink_head(h);
                self.fix_min_list(prev);

                let mut tmp = root;
                let mut remelded = 0usize;
                while !self.nodes[tmp].is_leaf() {
                    let (next, child) = (self.nodes[tmp].next, self.nodes[tmp].child);
                    self.free_node(tmp);
                    self.meld(child);
                    remelded += 1;
                    tmp = next;
                }
                self.free_node(tmp);
                debug!(remelded, "dismantled soft heap tree");
            } else {
                self.sift(root);
                if self.is_infinite(root) {
                    h = self.unlink_head(h);
                    self.free_node(root);
                }
                self.fix_min_list(h);
            }

            h = self.min_head();
        }

        let node = self.heads[h].queue;
        let cell_key = self.nodes[node]
            .items
            .head
            .ok_or(HeapError::Empty)?;
        let cell = self.cells.remove(cell_key).ok_or(HeapError::Empty)?;

        let node_ref = &mut self.nodes[node];
        node_ref.items.head = cell.next;
        if cell.next.is_none() {
            node_ref.items.tail = None;
        }
        let ckey = node_ref.ckey.clone();
        self.len -= 1;

        let corrupted = self.comparer.compare(&cell.key, &ckey) != Ordering::Equal;
        Ok(SoftEntry {
            key: cell.key,
            value: cell.value,
            ckey,
            corrupted,
        })
    }

    /// Removes all items, in the order `remove_minimum` would.
    pub fn drain(&mut self) -> Drain<'_, K, V> {
        Drain { heap: self }
    }

    /// Soft heaps cannot be enumerated; this iterator is always empty.
    pub fn iter(&self) -> std::iter::Empty<(&K, &V)> {
        std::iter::empty()
    }

    /// Number of items currently stored under a key above their own. O(n).
    pub fn corrupted_len(&self) -> usize {
        self.nodes
            .values()
            .map(|node| {
                let mut count = 0;
                let mut cursor = node.items.head;
                while let Some(key) = cursor {
                    let cell = &self.cells[key];
                    if self.comparer.compare(&cell.key, &node.ckey) != Ordering::Equal {
                        count += 1;
                    }
                    cursor = cell.next;
                }
                count
            })
            .sum()
    }

    /// The head whose root has the smallest key.
    fn min_head(&self) -> HeadKey {
        self.heads[self.heads[self.header].next].suffix_min
    }

    fn is_infinite(&self, node: NodeKey) -> bool {
        self.comparer
            .compare(&self.nodes[node].ckey, &self.key_max_value)
            == Ordering::Equal
    }

    fn free_node(&mut self, node: NodeKey) {
        if let Some(removed) = self.nodes.remove(node) {
            debug_assert!(removed.items.is_empty(), "freed node still owns items");
        }
    }

    /// Removes head `h` from the root list, returning its predecessor.
    fn unlink_head(&mut self, h: HeadKey) -> HeadKey {
        let (prev, next) = (self.heads[h].prev, self.heads[h].next);
        self.heads[prev].next = next;
        self.heads[next].prev = prev;
        self.heads.remove(h);
        prev
    }

    /// Adds tree `q` to the root list, linking equal-rank trees until ranks
    /// are unique again.
    fn meld(&mut self, mut q: NodeKey) {
        let mut to_head = self.heads[self.header].next;
        while self.nodes[q].rank > self.heads[to_head].rank {
            to_head = self.heads[to_head].next;
        }
        let prev_head = self.heads[to_head].prev;

        while self.nodes[q].rank == self.heads[to_head].rank {
            let other = self.heads[to_head].queue;
            let (top, bottom) = if self
                .comparer
                .compare(&self.nodes[other].ckey, &self.nodes[q].ckey)
                == Ordering::Greater
            {
                (q, other)
            } else {
                (other, q)
            };

            let top_node = &mut self.nodes[top];
            let combined = Node {
                ckey: top_node.ckey.clone(),
                rank: checked_increment(top_node.rank),
                next: top,
                child: bottom,
                items: std::mem::take(&mut top_node.items),
            };
            q = self.nodes.insert(combined);
            to_head = self.heads[to_head].next;
        }

        let h = if self.heads[to_head].prev == prev_head {
            self.heads.insert(Head::default())
        } else {
            // reuse the first head whose tree was consumed, drop the rest
            let reused = self.heads[prev_head].next;
            let mut stale = self.heads[reused].next;
            while stale != to_head {
                let next = self.heads[stale].next;
                self.heads.remove(stale);
                stale = next;
            }
            reused
        };

        let head = &mut self.heads[h];
        head.queue = q;
        head.rank = self.nodes[q].rank;
        head.prev = prev_head;
        head.next = to_head;
        self.heads[prev_head].next = h;
        self.heads[to_head].prev = h;

        self.fix_min_list(h);
    }

    /// Recomputes the suffix minimum of `h` and every head before it.
    fn fix_min_list(&mut self, mut h: HeadKey) {
        let mut min = if self.heads[h].next == self.tail {
            h
        } else {
            self.heads[self.heads[h].next].suffix_min
        };

        while h != self.header {
            let (candidate, current) = (self.heads[h].queue, self.heads[min].queue);
            if self
                .comparer
                .less(&self.nodes[candidate].ckey, &self.nodes[current].ckey)
            {
                min = h;
            }
            self.heads[h].suffix_min = min;
            h = self.heads[h].prev;
        }
    }

    /// Refills the item list of `root` from its subtrees.
    ///
    /// Runs on an explicit stack: every frame is a node waiting for its
    /// `next` subtree to be sifted once or twice.
    fn sift(&mut self, root: NodeKey) {
        let mut stack = vec![(root, Stage::Enter)];

        while let Some((v, stage)) = stack.pop() {
            match stage {
                Stage::Enter => {
                    let node = &mut self.nodes[v];
                    debug_assert!(node.items.is_empty(), "sifting a node that owns items");
                    node.items = ItemList::default();
                    if node.is_leaf() {
                        node.ckey = self.key_max_value.clone();
                        continue;
                    }
                    let next = node.next;
                    stack.push((v, Stage::Refilled));
                    stack.push((next, Stage::Enter));
                }
                Stage::Refilled => {
                    self.order_subtrees(v);
                    let next = self.nodes[v].next;
                    let items = std::mem::take(&mut self.nodes[next].items);
                    let ckey = self.nodes[next].ckey.clone();
                    let node = &mut self.nodes[v];
                    node.items = items;
                    node.ckey = ckey;

                    let rank = node.rank;
                    let child_rank = self.nodes[self.nodes[v].child].rank;
                    if rank > self.min_rank && (rank % 2 == 1 || child_rank < rank - 1) {
                        stack.push((v, Stage::Resifted));
                        stack.push((next, Stage::Enter));
                    } else {
                        self.prune(v);
                    }
                }
                Stage::Resifted => {
                    self.order_subtrees(v);
                    let next = self.nodes[v].next;
                    if !self.is_infinite(next) && !self.nodes[next].items.is_empty() {
                        self.corrupt(v, next);
                    }
                    self.prune(v);
                }
            }
        }
    }

    /// Keeps the subtree with the smaller key in `next`.
    fn order_subtrees(&mut self, v: NodeKey) {
        let node = &self.nodes[v];
        if self
            .comparer
            .compare(&self.nodes[node.next].ckey, &self.nodes[node.child].ckey)
            == Ordering::Greater
        {
            let node = &mut self.nodes[v];
            std::mem::swap(&mut node.next, &mut node.child);
        }
    }

    /// Prepends the item list of `next` to that of `v` and raises the key of
    /// `v` to `next`'s key, corrupting the items `v` already held.
    fn corrupt(&mut self, v: NodeKey, next: NodeKey) {
        let taken = std::mem::take(&mut self.nodes[next].items);
        let ckey = self.nodes[next].ckey.clone();
        let (Some(taken_head), Some(taken_tail)) = (taken.head, taken.tail) else {
            return;
        };

        let node = &mut self.nodes[v];
        self.cells[taken_tail].next = node.items.head;
        node.items.head = Some(taken_head);
        if node.items.tail.is_none() {
            node.items.tail = Some(taken_tail);
        }
        node.ckey = ckey;

        trace!(rank = node.rank, "soft heap corrupted an item list");
    }

    /// Drops exhausted subtrees of `v` after a sift.
    fn prune(&mut self, v: NodeKey) {
        let (next, child) = (self.nodes[v].next, self.nodes[v].child);
        if !self.is_infinite(child) {
            return;
        }

        // an exhausted `child` leaves `v` with only the subtrees of `next`
        let (new_next, new_child) = if self.is_infinite(next) {
            (NodeKey::null(), NodeKey::null())
        } else {
            (self.nodes[next].next, self.nodes[next].child)
        };
        let node = &mut self.nodes[v];
        node.next = new_next;
        node.child = new_child;
        self.free_node(next);
        self.free_node(child);
    }
}

impl<K, V> fmt::Debug for SoftHeap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SoftHeap")
            .field("len", &self.len)
            .field("error_rate", &self.error_rate)
            .field("min_rank", &self.min_rank)
            .field("trees", &self.heads.len().saturating_sub(2))
            .finish_non_exhaustive()
    }
}

/// Draining iterator returned by [`SoftHeap::drain`].
pub struct Drain<'a, K: Clone, V> {
    heap: &'a mut SoftHeap<K, V>,
}

impl<K: Clone, V> Iterator for Drain<'_, K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<(K, V)> {
        self.heap.remove_minimum().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.heap.len(), Some(self.heap.len()))
    }
}
