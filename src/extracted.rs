//! The value handed back by [`Tree::extract`][crate::Tree::extract].

use crate::allocator::NodeAllocator;

/// A value removed from a tree, together with the allocator of the tree it came from.
///
/// An extraction that found nothing yields an empty wrapper. Emptiness is tracked explicitly, so a
/// key equal to `K::default()` is still reported as present.
///
/// # Examples
///
/// ```
/// use threaded_bst::{PostOrder, Tree};
///
/// let mut tree: Tree<i32, PostOrder> = Tree::from([3, 1, 2, 0]);
///
/// let zero = tree.extract(&0);
/// assert!(!zero.is_empty());
/// assert_eq!(zero.value(), Some(&0));
///
/// assert!(tree.extract(&5).is_empty());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Extracted<K, A: NodeAllocator> {
    value: Option<K>,
    allocator: A,
}

impl<K, A: NodeAllocator> Extracted<K, A> {
    pub(crate) fn new(value: Option<K>, allocator: A) -> Self {
        Self { value, allocator }
    }

    /// Whether nothing was extracted.
    pub fn is_empty(&self) -> bool {
        self.value.is_none()
    }

    /// The extracted value, if any.
    pub fn value(&self) -> Option<&K> {
        self.value.as_ref()
    }

    /// Takes the extracted value out of the wrapper.
    pub fn into_value(self) -> Option<K> {
        self.value
    }

    /// The allocator of the tree the value was extracted from.
    pub fn allocator(&self) -> &A {
        &self.allocator
    }

    /// Exchanges the contents of two wrappers.
    pub fn swap(&mut self, other: &mut Self) {
        std::mem::swap(self, other);
    }
}

impl<K, A: NodeAllocator + Default> Default for Extracted<K, A> {
    fn default() -> Self {
        Self::new(None, A::default())
    }
}
