//! Fibonacci heap cells
//!
//! A cell is a single `(priority, value)` entry together with its position in
//! the forest. Cells live in the heap's [`SlotMap`](slotmap::SlotMap) arena and
//! refer to each other by [`CellKey`], so cuts and links only rewrite keys.

use super::list::{CellList, Links, ListNode};
use crate::rank::Rank;
use slotmap::new_key_type;

new_key_type! {
    /// Arena key of a cell. Generational, so a key outlives its cell safely.
    pub struct CellKey;
}

/// A node of a Fibonacci heap tree.
#[derive(Debug, Clone)]
pub struct FibonacciCell<P, T> {
    pub(crate) priority: P,
    pub(crate) value: T,
    /// Number of children, kept in step with `children.len()`
    pub(crate) degree: Rank,
    /// Set once the cell lost a child while it was not a root
    pub(crate) marked: bool,
    /// Back-reference only; the parent owns this cell through `children`
    pub(crate) parent: Option<CellKey>,
    pub(crate) children: CellList,
    /// Position among its siblings (or among the roots)
    pub(crate) links: Links,
}

impl<P, T> FibonacciCell<P, T> {
    /// A detached, childless cell.
    pub(crate) fn new(priority: P, value: T) -> Self {
        FibonacciCell {
            priority,
            value,
            degree: 0,
            marked: false,
            parent: None,
            children: CellList::new(),
            links: Links::default(),
        }
    }

    /// The cell's priority.
    pub fn priority(&self) -> &P {
        &self.priority
    }

    /// The cell's value.
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Returns true if the cell sits in the root list.
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Rewrites every key stored in the cell, used when cells move between arenas.
    pub(crate) fn remap_keys(&mut self, remap: impl Fn(CellKey) -> CellKey) {
        self.parent = self.parent.map(&remap);
        self.children = self.children.remap(&remap);
        self.links = Links {
            prev: self.links.prev.map(&remap),
            next: self.links.next.map(&remap),
        };
    }
}

impl<P, T> ListNode for FibonacciCell<P, T> {
    fn links(&self) -> &Links {
        &self.links
    }

    fn links_mut(&mut self) -> &mut Links {
        &mut self.links
    }
}
