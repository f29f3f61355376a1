//! Rank/degree type shared by the tree-shaped collections.
//!
//! Three structures in this crate keep a small per-node counter bounded by
//! `O(log n)`:
//!
//! - the degree of a [`FibonacciHeap`](crate::fibonacci::FibonacciHeap) cell,
//! - the rank of a [`SoftHeap`](crate::soft::SoftHeap) node,
//! - the rank of a [`ForestDisjointSet`](crate::disjoint_set::ForestDisjointSet) element.
//!
//! A tree of rank `k` holds at least `2^k` (or `F(k+2)` for Fibonacci heaps)
//! elements, so `u8` is enough for any heap that fits in memory and saves
//! seven bytes per node over `usize`.

/// Type alias for node rank/degree.
pub type Rank = u8;

/// Maximum valid rank value.
///
/// The soft heap uses it as the rank of its tail sentinel, which must compare
/// greater than the rank of every real tree.
pub const MAX_RANK: Rank = u8::MAX;

/// Safely increment a rank value, panicking on overflow.
///
/// # Panics
///
/// Panics if `rank == MAX_RANK`. This should never happen in practice since
/// it would require a collection with more than 2²⁵⁵ elements.
///
/// # Example
///
/// ```rust
/// use graph_collections::rank::{checked_increment, Rank};
///
/// let rank: Rank = 5;
/// assert_eq!(checked_increment(rank), 6);
/// ```
#[inline]
pub fn checked_increment(rank: Rank) -> Rank {
    rank.checked_add(1).expect(
        "rank overflow: this should be impossible since max rank is log₂(n) \
         and u8::MAX (255) supports collections with up to 2²⁵⁵ elements",
    )
}

/// Decrement a rank value, stopping at 0.
///
/// Fibonacci cells lose degree when a child is cut; leaf cells stay at 0.
///
/// # Example
///
/// ```rust
/// use graph_collections::rank::saturating_decrement;
///
/// assert_eq!(saturating_decrement(5), 4);
/// assert_eq!(saturating_decrement(0), 0);
/// ```
#[inline]
pub fn saturating_decrement(rank: Rank) -> Rank {
    rank.saturating_sub(1)
}

/// Converts a rank to a table index.
#[inline]
pub fn as_index(rank: Rank) -> usize {
    usize::from(rank)
}
