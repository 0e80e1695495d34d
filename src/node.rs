//! The node shape shared by every traversal order.
//!
//! Children are owned by the tree through `left`/`right`. `parent` is a plain back-reference used
//! for upward navigation and never implies ownership. All accessors take raw `NonNull` pointers
//! because nodes are linked in both directions; callers promise the pointers are live.

use std::ptr::NonNull;

/// A possibly absent pointer to a node.
pub type Link<K> = Option<NonNull<Node<K>>>;

/// One link in the tree: either an element or the sentinel.
pub struct Node<K> {
    /// `None` marks the sentinel. Every real element holds `Some`.
    pub(crate) value: Option<K>,
    pub(crate) left: Link<K>,
    pub(crate) right: Link<K>,
    pub(crate) parent: Link<K>,
}

impl<K> Node<K> {
    pub(crate) fn new(value: K) -> Self {
        Self {
            value: Some(value),
            left: None,
            right: None,
            parent: None,
        }
    }

    pub(crate) fn sentinel() -> Self {
        Self {
            value: None,
            left: None,
            right: None,
            parent: None,
        }
    }

    /// # Safety
    ///
    /// `node` must point to a live node.
    pub(crate) unsafe fn left(node: NonNull<Self>) -> Link<K> {
        unsafe { (*node.as_ptr()).left }
    }

    /// # Safety
    ///
    /// `node` must point to a live node.
    pub(crate) unsafe fn right(node: NonNull<Self>) -> Link<K> {
        unsafe { (*node.as_ptr()).right }
    }

    /// # Safety
    ///
    /// `node` must point to a live node.
    pub(crate) unsafe fn parent(node: NonNull<Self>) -> Link<K> {
        unsafe { (*node.as_ptr()).parent }
    }

    /// Borrows the value stored in `node`, `None` for the sentinel.
    ///
    /// # Safety
    ///
    /// `node` must point to a live node that outlives `'a` and isn't mutated during `'a`.
    pub(crate) unsafe fn value<'a>(node: NonNull<Self>) -> Option<&'a K> {
        unsafe { (*node.as_ptr()).value.as_ref() }
    }

    /// Borrows the key of a real node.
    ///
    /// # Safety
    ///
    /// As for [`Node::value`]. `node` must not be the sentinel.
    pub(crate) unsafe fn key<'a>(node: NonNull<Self>) -> &'a K {
        unsafe { Self::value(node) }.expect("only real nodes are compared")
    }

    /// Descends `left` links as far as they go.
    ///
    /// # Safety
    ///
    /// Every node reachable from `node` must be live.
    pub(crate) unsafe fn leftmost(mut node: NonNull<Self>) -> NonNull<Self> {
        unsafe {
            while let Some(left) = Self::left(node) {
                node = left;
            }
        }
        node
    }

    /// Descends `right` links as far as they go. The tree must be unthreaded, or the walk must
    /// start inside a subtree that can't contain the sentinel.
    ///
    /// # Safety
    ///
    /// Every node reachable from `node` must be live.
    pub(crate) unsafe fn rightmost(mut node: NonNull<Self>) -> NonNull<Self> {
        unsafe {
            while let Some(right) = Self::right(node) {
                node = right;
            }
        }
        node
    }

    /// Descends to a leaf, preferring `left` and falling back to `right`. This is the first node
    /// of the subtree in post-order.
    ///
    /// # Safety
    ///
    /// Every node reachable from `node` must be live.
    pub(crate) unsafe fn deepest_leftward(mut node: NonNull<Self>) -> NonNull<Self> {
        unsafe {
            loop {
                match (Self::left(node), Self::right(node)) {
                    (Some(left), _) => node = left,
                    (None, Some(right)) => node = right,
                    (None, None) => return node,
                }
            }
        }
    }

    /// Descends to a leaf, preferring `right` and falling back to `left`. This is the last node of
    /// the subtree in pre-order.
    ///
    /// # Safety
    ///
    /// Every node reachable from `node` must be live.
    pub(crate) unsafe fn deepest_rightward(mut node: NonNull<Self>) -> NonNull<Self> {
        unsafe {
            loop {
                match (Self::left(node), Self::right(node)) {
                    (_, Some(right)) => node = right,
                    (Some(left), None) => node = left,
                    (None, None) => return node,
                }
            }
        }
    }
}
