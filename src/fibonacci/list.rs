//! Doubly-linked sibling lists threaded through a cell arena.
//!
//! This follows the intrusive-list design: every node embeds its own
//! [`Links`], and the list itself is just a small `Copy` header (first, last,
//! length). Because the header does not own the nodes, one arena can hold any
//! number of lists (the root list plus one child list per cell) and splicing
//! two lists is O(1).
//!
//! Operations take the arena explicitly. A list stored inside a node is
//! copied out, modified, and written back:
//!
//! ```rust,ignore
//! let mut children = cells[parent].children;
//! children.unlink(&mut cells, child);
//! cells[parent].children = children;
//! ```

use super::cell::CellKey;
use slotmap::SlotMap;

/// Intrusive link embedded in every list node.
///
/// When unlinked, both `prev` and `next` are `None`; a linked node at either
/// end of its list also has one side `None`, so use the owning list's
/// [`CellList::contains`] to test membership.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Links {
    pub(crate) prev: Option<CellKey>,
    pub(crate) next: Option<CellKey>,
}

impl Links {
    /// Returns true if the node has a neighbour on either side.
    pub fn is_linked(&self) -> bool {
        self.prev.is_some() || self.next.is_some()
    }
}

/// Access to the [`Links`] embedded in a node.
pub trait ListNode {
    /// The node's links
    fn links(&self) -> &Links;

    /// The node's links, mutably
    fn links_mut(&mut self) -> &mut Links;
}

/// Header of a sibling list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CellList {
    head: Option<CellKey>,
    tail: Option<CellKey>,
    len: usize,
}

impl CellList {
    /// Creates an empty list.
    pub const fn new() -> Self {
        CellList {
            head: None,
            tail: None,
            len: 0,
        }
    }

    /// Number of nodes in the list.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the list has no nodes.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// First node, if any.
    pub fn first(&self) -> Option<CellKey> {
        self.head
    }

    /// Last node, if any.
    pub fn last(&self) -> Option<CellKey> {
        self.tail
    }

    /// Appends an unlinked node.
    pub fn push_back<N: ListNode>(&mut self, arena: &mut SlotMap<CellKey, N>, key: CellKey) {
        debug_assert!(!arena[key].links().is_linked(), "node is already linked");

        *arena[key].links_mut() = Links {
            prev: self.tail,
            next: None,
        };
        match self.tail {
            Some(tail) => arena[tail].links_mut().next = Some(key),
            None => self.head = Some(key),
        }
        self.tail = Some(key);
        self.len += 1;
    }

    /// Removes `key` from this list, leaving it unlinked.
    ///
    /// `key` must be a member of this list.
    pub fn unlink<N: ListNode>(&mut self, arena: &mut SlotMap<CellKey, N>, key: CellKey) {
        let Links { prev, next } = *arena[key].links();

        match prev {
            Some(prev) => arena[prev].links_mut().next = next,
            None => self.head = next,
        }
        match next {
            Some(next) => arena[next].links_mut().prev = prev,
            None => self.tail = prev,
        }

        *arena[key].links_mut() = Links::default();
        self.len -= 1;
    }

    /// Moves every node of `other` to the end of this list in O(1), leaving
    /// `other` empty.
    pub fn append<N: ListNode>(&mut self, arena: &mut SlotMap<CellKey, N>, other: &mut CellList) {
        let Some(other_head) = other.head else {
            return;
        };

        match self.tail {
            Some(tail) => {
                arena[tail].links_mut().next = Some(other_head);
                arena[other_head].links_mut().prev = Some(tail);
            }
            None => self.head = Some(other_head),
        }
        self.tail = other.tail;
        self.len += other.len;
        *other = CellList::new();
    }

    /// Returns true if `key` is a member of this list. O(len).
    pub fn contains<N: ListNode>(&self, arena: &SlotMap<CellKey, N>, key: CellKey) -> bool {
        self.keys(arena).any(|k| k == key)
    }

    /// Iterates over the node keys from first to last.
    pub fn keys<'a, N: ListNode>(&self, arena: &'a SlotMap<CellKey, N>) -> Keys<'a, N> {
        Keys {
            arena,
            current: self.head,
        }
    }

    /// The same list with its end keys translated, used when cells move between arenas.
    pub(crate) fn remap(&self, remap: impl Fn(CellKey) -> CellKey) -> CellList {
        CellList {
            head: self.head.map(&remap),
            tail: self.tail.map(&remap),
            len: self.len,
        }
    }
}

/// Iterator over the keys of a [`CellList`].
pub struct Keys<'a, N> {
    arena: &'a SlotMap<CellKey, N>,
    current: Option<CellKey>,
}

impl<N: ListNode> Iterator for Keys<'_, N> {
    type Item = CellKey;

    fn next(&mut self) -> Option<CellKey> {
        let key = self.current?;
        self.current = self.arena[key].links().next;
        Some(key)
    }
}
