//! This crate provides a threaded Binary Search Tree (BST) whose traversal
//! order is picked when the tree is built.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored keys. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` stores a key and
//! has up to two child `Node`s. The most important invariants of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    key less than its own key.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    key greater than its own key.
//!
//! Searching takes `O(height)`. This tree does no rebalancing, so the height
//! depends entirely on insertion order and inserting sorted keys builds a chain.
//!
//! ## Traversal orders
//!
//! A tree can be walked three ways:
//!
//! - [`PreOrder`]: a node, then its left subtree, then its right subtree.
//! - [`InOrder`]: the left subtree, then the node, then the right subtree. This is sorted order.
//! - [`PostOrder`]: the left subtree, then the right subtree, then the node.
//!
//! A [`Tree`] walks in exactly one of these, fixed by its type. Walking usually
//! needs either recursion or an explicit stack. Here every node keeps a pointer
//! to its parent and the tree threads one extra "sentinel" node into itself,
//! placed so that the last element's successor is the sentinel and the
//! sentinel's predecessor is the last element. A [`Position`] can then step
//! forwards or backwards looking only at nearby links, and the sentinel doubles
//! as the end position.
//!
//! ```
//! use threaded_bst::{Error, PostOrder, Tree};
//!
//! let mut tree: Tree<char, PostOrder> = Tree::from(['b', 'a', 'c']);
//! assert_eq!(tree.to_vec(), ['a', 'c', 'b']);
//!
//! let last = tree.prev(tree.end()).unwrap();
//! assert_eq!(tree.get(last), Ok(&'b'));
//! assert_eq!(tree.next(tree.end()), Err(Error::PastEnd));
//!
//! tree.insert('d');
//! // 'd' hangs under 'c', so it now comes before 'c'.
//! assert_eq!(tree.to_vec(), ['a', 'd', 'c', 'b']);
//! ```

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

mod allocator;
mod compare;
mod cursor;
mod error;
mod extracted;
mod node;
mod order;
mod tree;
mod util;


pub use allocator::{Counting, Global, NodeAllocator};
pub use compare::{Comparator, FnComparator, Natural, Reverse};
pub use cursor::{Cursor, Iter, Position};
pub use error::{Error, Result};
pub use extracted::Extracted;
pub use order::{InOrder, PostOrder, PreOrder, Traversal, TraversalOrder};
pub use tree::Tree;
