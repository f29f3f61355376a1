//! Ordering functions shared by the heaps
//!
//! Every heap in this crate orders its priorities through a [`Comparer`]
//! supplied at construction instead of requiring `P: Ord`. This lets graph
//! algorithms order distances that are only partially ordered in Rust (such
//! as `f64`), or order the same priority type in several ways.
//!
//! # Example
//!
//! ```rust
//! use graph_collections::compare::Comparer;
//! use std::cmp::Ordering;
//!
//! let by_len = Comparer::new(|a: &&str, b: &&str| a.len().cmp(&b.len()));
//! assert_eq!(by_len.compare(&"ab", &"abc"), Ordering::Less);
//! assert!(by_len.reversed().less(&"abc", &"ab"));
//!
//! let floats = Comparer::new(|a: &f64, b: &f64| a.total_cmp(b));
//! assert!(floats.less(&0.5, &1.5));
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;

/// A cloneable total-order function over priorities.
///
/// Clones share the same underlying function, so two heaps built from clones
/// of one comparer order their priorities identically.
pub struct Comparer<P> {
    compare: Rc<dyn Fn(&P, &P) -> Ordering>,
}

impl<P> Comparer<P> {
    /// Wraps a comparison function.
    ///
    /// The function must be a total order; the heaps do not check this.
    pub fn new<F>(compare: F) -> Self
    where
        F: Fn(&P, &P) -> Ordering + 'static,
    {
        Comparer {
            compare: Rc::new(compare),
        }
    }

    /// Compares two priorities.
    #[inline]
    pub fn compare(&self, a: &P, b: &P) -> Ordering {
        (self.compare)(a, b)
    }

    /// Returns true if `a` orders strictly before `b`.
    #[inline]
    pub fn less(&self, a: &P, b: &P) -> bool {
        self.compare(a, b) == Ordering::Less
    }

    /// Returns a comparer with the opposite order.
    pub fn reversed(&self) -> Self
    where
        P: 'static,
    {
        let inner = Rc::clone(&self.compare);
        Comparer::new(move |a: &P, b: &P| inner(b, a))
    }
}

impl<P: Ord + 'static> Comparer<P> {
    /// The natural order of `P`.
    pub fn natural() -> Self {
        Comparer::new(|a: &P, b: &P| a.cmp(b))
    }
}

impl<P> Clone for Comparer<P> {
    fn clone(&self) -> Self {
        Comparer {
            compare: Rc::clone(&self.compare),
        }
    }
}

impl<P: Ord + 'static> Default for Comparer<P> {
    fn default() -> Self {
        Self::natural()
    }
}

impl<P> fmt::Debug for Comparer<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Comparer")
            .field(&Rc::as_ptr(&self.compare).cast::<()>())
            .finish()
    }
}

/// The order in which a [`FibonacciHeap`](crate::fibonacci::FibonacciHeap)
/// hands out its elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HeapDirection {
    /// Smallest priority first (a min-heap)
    #[default]
    Increasing,
    /// Largest priority first (a max-heap)
    Decreasing,
}

impl HeapDirection {
    /// Re-orients a comparison so that `Less` always means "closer to the top".
    #[inline]
    pub fn orient(self, ordering: Ordering) -> Ordering {
        match self {
            HeapDirection::Increasing => ordering,
            HeapDirection::Decreasing => ordering.reverse(),
        }
    }
}
