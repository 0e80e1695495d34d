//! Key comparison. A tree orders its keys with a [`Comparator`] rather than requiring `Ord`
//! directly, so the same key type can be stored under different orderings.

use std::cmp::Ordering;

/// A strict weak ordering over `K`.
///
/// Keys that compare [`Ordering::Equal`] are treated as the same key: inserting the second one is
/// rejected.
pub trait Comparator<K: ?Sized> {
    /// Compares `lhs` against `rhs`.
    fn compare(&self, lhs: &K, rhs: &K) -> Ordering;

    /// Whether `lhs` sorts strictly before `rhs`.
    fn less(&self, lhs: &K, rhs: &K) -> bool {
        self.compare(lhs, rhs) == Ordering::Less
    }
}

/// Orders keys by their `Ord` implementation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Natural;

impl<K: Ord + ?Sized> Comparator<K> for Natural {
    fn compare(&self, lhs: &K, rhs: &K) -> Ordering {
        lhs.cmp(rhs)
    }
}

/// Orders keys by the reverse of their `Ord` implementation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Reverse;

impl<K: Ord + ?Sized> Comparator<K> for Reverse {
    fn compare(&self, lhs: &K, rhs: &K) -> Ordering {
        rhs.cmp(lhs)
    }
}

/// Orders keys with a closure. Useful for keys that aren't `Ord`, like floats.
///
/// # Examples
///
/// ```
/// use threaded_bst::{FnComparator, InOrder, Tree};
///
/// let mut tree: Tree<f64, InOrder, _> = Tree::with_comparator(FnComparator(f64::total_cmp));
/// tree.extend([2.3, -1.1, 100.0]);
///
/// assert_eq!(tree.to_vec(), [-1.1, 2.3, 100.0]);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct FnComparator<F>(pub F);

impl<K: ?Sized, F> Comparator<K> for FnComparator<F>
where
    F: Fn(&K, &K) -> Ordering,
{
    fn compare(&self, lhs: &K, rhs: &K) -> Ordering {
        (self.0)(lhs, rhs)
    }
}
