//! Positions and iteration.
//!
//! A [`Position`] is a detached handle to one node of a tree, the way an iterator is in a
//! node-based container. It doesn't borrow the tree, so it can be passed back into mutating calls
//! like [`Tree::erase_at`][crate::Tree::erase_at]. Because of that it also carries the tree's
//! id and mutation stamp: once the tree changes shape or is dropped, older positions are rejected
//! with [`Error::InvalidPosition`][crate::Error::InvalidPosition] instead of dangling.
//!
//! A [`Cursor`] borrows the tree and can step freely; [`Iter`] is the ordinary double-ended
//! iterator over a span of positions.

use std::fmt;
use std::iter::FusedIterator;
use std::marker::PhantomData;
use std::ptr::NonNull;

use crate::error::{Error, Result};
use crate::node::{Link, Node};
use crate::order::Traversal;

/// A detached handle to an element of a tree, or to its end.
///
/// `Position::default()` is the null position; every tree rejects it.
pub struct Position<K> {
    pub(crate) node: Link<K>,
    /// The id of the owning tree. Zero for the null position.
    pub(crate) tree: u64,
    pub(crate) stamp: u64,
}

impl<K> Position<K> {
    /// Whether this is the null position.
    pub fn is_null(&self) -> bool {
        self.node.is_none()
    }
}

impl<K> Clone for Position<K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K> Copy for Position<K> {}

impl<K> Default for Position<K> {
    fn default() -> Self {
        Self {
            node: None,
            tree: 0,
            stamp: 0,
        }
    }
}

impl<K> PartialEq for Position<K> {
    fn eq(&self, other: &Self) -> bool {
        self.node == other.node && self.tree == other.tree
    }
}

impl<K> Eq for Position<K> {}

impl<K> fmt::Debug for Position<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Position")
            .field("node", &self.node)
            .field("stamp", &self.stamp)
            .finish()
    }
}

/// A borrowing, bidirectional cursor over a tree in its traversal order.
///
/// # Examples
///
/// ```
/// use threaded_bst::{Error, PreOrder, Tree};
///
/// let tree: Tree<i32, PreOrder> = Tree::from([2, 1, 3]);
/// let mut cursor = tree.cursor(tree.begin()).unwrap();
///
/// assert_eq!(cursor.get(), Some(&2));
/// assert_eq!(cursor.move_prev(), Err(Error::BeforeBegin));
///
/// cursor.move_next().unwrap();
/// cursor.move_next().unwrap();
/// assert_eq!(cursor.get(), Some(&3));
///
/// cursor.move_next().unwrap();
/// assert!(cursor.is_end());
/// assert_eq!(cursor.move_next(), Err(Error::PastEnd));
/// ```
pub struct Cursor<'a, K, O> {
    node: NonNull<Node<K>>,
    begin: NonNull<Node<K>>,
    end: NonNull<Node<K>>,
    tree: u64,
    stamp: u64,
    _marker: PhantomData<(&'a Node<K>, O)>,
}

impl<'a, K, O: Traversal> Cursor<'a, K, O> {
    pub(crate) fn new(
        node: NonNull<Node<K>>,
        begin: NonNull<Node<K>>,
        end: NonNull<Node<K>>,
        tree: u64,
        stamp: u64,
    ) -> Self {
        Self {
            node,
            begin,
            end,
            tree,
            stamp,
            _marker: PhantomData,
        }
    }

    /// The element under the cursor, or `None` at the end.
    pub fn get(&self) -> Option<&'a K> {
        // SAFETY: The cursor borrows the tree for `'a`, so the node is live and unchanged.
        unsafe { Node::value(self.node) }
    }

    /// Whether the cursor sits on the end position.
    pub fn is_end(&self) -> bool {
        self.node == self.end
    }

    /// Whether the cursor sits on the first element (or the end of an empty tree).
    pub fn is_begin(&self) -> bool {
        self.node == self.begin
    }

    /// Steps to the next position.
    ///
    /// ## Errors
    ///
    /// [`Error::PastEnd`] when already at the end. The cursor doesn't move.
    pub fn move_next(&mut self) -> Result<()> {
        if self.is_end() {
            return Err(Error::PastEnd);
        }
        // SAFETY: The tree is borrowed and threaded, and `node` is one of its real nodes.
        self.node = unsafe { O::increment(self.node) }.ok_or(Error::PastEnd)?;
        Ok(())
    }

    /// Steps to the previous position.
    ///
    /// ## Errors
    ///
    /// [`Error::BeforeBegin`] when already at the beginning. The cursor doesn't move.
    pub fn move_prev(&mut self) -> Result<()> {
        if self.is_begin() {
            return Err(Error::BeforeBegin);
        }
        // SAFETY: The tree is borrowed and threaded, and `node` is one of its nodes.
        self.node = unsafe { O::decrement(self.node) }.ok_or(Error::BeforeBegin)?;
        Ok(())
    }

    /// A detached handle to the cursor's current position.
    pub fn position(&self) -> Position<K> {
        Position {
            node: Some(self.node),
            tree: self.tree,
            stamp: self.stamp,
        }
    }
}

impl<K, O> Clone for Cursor<'_, K, O> {
    fn clone(&self) -> Self {
        Self {
            node: self.node,
            begin: self.begin,
            end: self.end,
            tree: self.tree,
            stamp: self.stamp,
            _marker: PhantomData,
        }
    }
}

impl<K, O> PartialEq for Cursor<'_, K, O> {
    fn eq(&self, other: &Self) -> bool {
        self.node == other.node
    }
}

impl<K, O> Eq for Cursor<'_, K, O> {}

impl<K: fmt::Debug, O: Traversal> fmt::Debug for Cursor<'_, K, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Cursor").field(&self.get()).finish()
    }
}

/// An iterator over `[front, back)` of a tree in its traversal order.
///
/// Iterating from the back walks the same span in reverse.
pub struct Iter<'a, K, O> {
    front: NonNull<Node<K>>,
    back: NonNull<Node<K>>,
    _marker: PhantomData<(&'a Node<K>, O)>,
}

impl<K, O> Iter<'_, K, O> {
    pub(crate) fn new(front: NonNull<Node<K>>, back: NonNull<Node<K>>) -> Self {
        Self {
            front,
            back,
            _marker: PhantomData,
        }
    }
}

impl<'a, K, O: Traversal> Iterator for Iter<'a, K, O> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        if self.front == self.back {
            return None;
        }
        let node = self.front;
        // SAFETY: The tree is borrowed for `'a`. `front` is a real node because it precedes
        // `back`, which is at most the sentinel.
        unsafe {
            self.front = O::increment(node)?;
            Node::value(node)
        }
    }
}

impl<'a, K, O: Traversal> DoubleEndedIterator for Iter<'a, K, O> {
    fn next_back(&mut self) -> Option<&'a K> {
        if self.front == self.back {
            return None;
        }
        // SAFETY: As in `next`. `back` follows `front` so it has a predecessor.
        unsafe {
            self.back = O::decrement(self.back)?;
            Node::value(self.back)
        }
    }
}

impl<K, O: Traversal> FusedIterator for Iter<'_, K, O> {}

impl<K, O> Clone for Iter<'_, K, O> {
    fn clone(&self) -> Self {
        Self::new(self.front, self.back)
    }
}

impl<K: fmt::Debug, O: Traversal> fmt::Debug for Iter<'_, K, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}
