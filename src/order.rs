//! Traversal orders. Each order is a zero-sized strategy type chosen when a tree is constructed.
//! It decides where the sentinel is threaded into the tree and how a position steps forwards and
//! backwards, using nothing but the links of the current node and its ancestors.
//!
//! | Order | Sentinel | First element |
//! |---|---|---|
//! | [`PreOrder`] | right child of the largest node | the root |
//! | [`InOrder`] | right child of the largest node | the leftmost node |
//! | [`PostOrder`] | above the root (`left == right == root`, `root.parent == sentinel`) | the first leaf reached preferring left over right |
//!
//! With that threading, stepping forwards from the last element lands on the sentinel and stepping
//! backwards from the sentinel lands on the last element, without any auxiliary stack.

use std::fmt;
use std::ptr::NonNull;

use crate::node::{Link, Node};

/// The runtime name of a traversal order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TraversalOrder {
    /// Node, then its left subtree, then its right subtree.
    PreOrder,
    /// Left subtree, then the node, then its right subtree. This is sorted order.
    InOrder,
    /// Left subtree, then right subtree, then the node.
    PostOrder,
}

impl fmt::Display for TraversalOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::PreOrder => "pre-order",
            Self::InOrder => "in-order",
            Self::PostOrder => "post-order",
        };
        f.write_str(name)
    }
}

mod sealed {
    pub trait Sealed {}

    impl Sealed for super::PreOrder {}
    impl Sealed for super::InOrder {}
    impl Sealed for super::PostOrder {}
}

/// A traversal strategy. This trait is sealed; the implementors are [`PreOrder`], [`InOrder`]
/// and [`PostOrder`].
///
/// The associated functions work on raw node links and are only meaningful inside this crate.
pub trait Traversal: sealed::Sealed {
    /// The runtime tag for this order.
    const ORDER: TraversalOrder;

    /// Links `end` into the tree rooted at `root`.
    ///
    /// # Safety
    ///
    /// The tree must be unthreaded, all of its nodes live, and `end` its sentinel.
    #[doc(hidden)]
    unsafe fn thread<K>(root: Link<K>, end: NonNull<Node<K>>);

    /// Undoes [`Traversal::thread`], leaving a plain binary search tree whose root has no parent.
    ///
    /// # Safety
    ///
    /// The tree must be threaded by this same order, all of its nodes live, and `end` its
    /// sentinel.
    #[doc(hidden)]
    unsafe fn unthread<K>(root: Link<K>, end: NonNull<Node<K>>);

    /// The first element of the non-empty tree rooted at `root`.
    ///
    /// # Safety
    ///
    /// Every node reachable from `root` must be live.
    #[doc(hidden)]
    unsafe fn first<K>(root: NonNull<Node<K>>) -> NonNull<Node<K>>;

    /// The position after `node`, or `None` when there is none.
    ///
    /// # Safety
    ///
    /// The tree must be threaded by this order and `node` must be one of its live nodes.
    #[doc(hidden)]
    unsafe fn increment<K>(node: NonNull<Node<K>>) -> Link<K>;

    /// The position before `node`, or `None` when there is none.
    ///
    /// # Safety
    ///
    /// The tree must be threaded by this order and `node` must be one of its live nodes.
    #[doc(hidden)]
    unsafe fn decrement<K>(node: NonNull<Node<K>>) -> Link<K>;
}

/// Visits a node before either of its subtrees.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct PreOrder;

/// Visits the left subtree, then the node, then the right subtree.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct InOrder;

/// Visits a node after both of its subtrees.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct PostOrder;

/// Hangs `end` off the right of the largest node. Shared by pre-order and in-order.
unsafe fn thread_after_maximum<K>(root: Link<K>, end: NonNull<Node<K>>) {
    unsafe {
        let sentinel = end.as_ptr();
        (*sentinel).left = None;
        (*sentinel).right = None;
        (*sentinel).parent = match root {
            Some(root) => {
                let maximum = Node::rightmost(root);
                (*maximum.as_ptr()).right = Some(end);
                Some(maximum)
            }
            None => None,
        };
    }
}

unsafe fn unthread_after_maximum<K>(end: NonNull<Node<K>>) {
    unsafe {
        if let Some(maximum) = (*end.as_ptr()).parent.take() {
            (*maximum.as_ptr()).right = None;
        }
    }
}

impl Traversal for PreOrder {
    const ORDER: TraversalOrder = TraversalOrder::PreOrder;

    unsafe fn thread<K>(root: Link<K>, end: NonNull<Node<K>>) {
        unsafe { thread_after_maximum(root, end) }
    }

    unsafe fn unthread<K>(_root: Link<K>, end: NonNull<Node<K>>) {
        unsafe { unthread_after_maximum(end) }
    }

    unsafe fn first<K>(root: NonNull<Node<K>>) -> NonNull<Node<K>> {
        root
    }

    unsafe fn increment<K>(node: NonNull<Node<K>>) -> Link<K> {
        unsafe {
            if let Some(left) = Node::left(node) {
                return Some(left);
            }
            if let Some(right) = Node::right(node) {
                return Some(right);
            }

            // A leaf. Climb until some ancestor has a right subtree we haven't come out of yet.
            // The largest node always has the sentinel on its right so this terminates.
            let mut child = node;
            let mut ancestor = Node::parent(node)?;
            loop {
                match Node::right(ancestor) {
                    Some(right) if right != child => return Some(right),
                    _ => {
                        child = ancestor;
                        ancestor = Node::parent(ancestor)?;
                    }
                }
            }
        }
    }

    unsafe fn decrement<K>(node: NonNull<Node<K>>) -> Link<K> {
        unsafe {
            let parent = Node::parent(node)?;
            match Node::left(parent) {
                // Coming from the right with a left sibling: the predecessor is the last
                // pre-order node of that sibling. The sentinel never lives in a left subtree.
                Some(left) if left != node => Some(Node::deepest_rightward(left)),
                _ => Some(parent),
            }
        }
    }
}

impl Traversal for InOrder {
    const ORDER: TraversalOrder = TraversalOrder::InOrder;

    unsafe fn thread<K>(root: Link<K>, end: NonNull<Node<K>>) {
        unsafe { thread_after_maximum(root, end) }
    }

    unsafe fn unthread<K>(_root: Link<K>, end: NonNull<Node<K>>) {
        unsafe { unthread_after_maximum(end) }
    }

    unsafe fn first<K>(root: NonNull<Node<K>>) -> NonNull<Node<K>> {
        unsafe { Node::leftmost(root) }
    }

    unsafe fn increment<K>(node: NonNull<Node<K>>) -> Link<K> {
        unsafe {
            // The largest node's right child is the sentinel, whose leftmost node is itself.
            if let Some(right) = Node::right(node) {
                return Some(Node::leftmost(right));
            }

            let mut child = node;
            loop {
                let parent = Node::parent(child)?;
                if Node::left(parent) == Some(child) {
                    return Some(parent);
                }
                child = parent;
            }
        }
    }

    unsafe fn decrement<K>(node: NonNull<Node<K>>) -> Link<K> {
        unsafe {
            if let Some(left) = Node::left(node) {
                return Some(Node::rightmost(left));
            }

            let mut child = node;
            loop {
                let parent = Node::parent(child)?;
                if Node::right(parent) == Some(child) {
                    return Some(parent);
                }
                child = parent;
            }
        }
    }
}

impl Traversal for PostOrder {
    const ORDER: TraversalOrder = TraversalOrder::PostOrder;

    unsafe fn thread<K>(root: Link<K>, end: NonNull<Node<K>>) {
        unsafe {
            let sentinel = end.as_ptr();
            (*sentinel).parent = None;
            (*sentinel).left = root;
            (*sentinel).right = root;
            if let Some(root) = root {
                (*root.as_ptr()).parent = Some(end);
            }
        }
    }

    unsafe fn unthread<K>(root: Link<K>, end: NonNull<Node<K>>) {
        unsafe {
            let sentinel = end.as_ptr();
            (*sentinel).left = None;
            (*sentinel).right = None;
            if let Some(root) = root {
                (*root.as_ptr()).parent = None;
            }
        }
    }

    unsafe fn first<K>(root: NonNull<Node<K>>) -> NonNull<Node<K>> {
        unsafe { Node::deepest_leftward(root) }
    }

    unsafe fn increment<K>(node: NonNull<Node<K>>) -> Link<K> {
        unsafe {
            // The root's parent is the sentinel whose right child is the root, so the root steps
            // onto the sentinel. The sentinel itself has no parent.
            let parent = Node::parent(node)?;
            match Node::right(parent) {
                Some(right) if right != node => Some(Node::deepest_leftward(right)),
                _ => Some(parent),
            }
        }
    }

    unsafe fn decrement<K>(node: NonNull<Node<K>>) -> Link<K> {
        unsafe {
            if let Some(right) = Node::right(node) {
                return Some(right);
            }
            if let Some(left) = Node::left(node) {
                return Some(left);
            }

            let mut child = node;
            let mut ancestor = Node::parent(node)?;
            loop {
                match Node::left(ancestor) {
                    Some(left) if left != child => return Some(left),
                    _ => {
                        child = ancestor;
                        ancestor = Node::parent(ancestor)?;
                    }
                }
            }
        }
    }
}
