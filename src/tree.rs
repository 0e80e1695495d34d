//! An unbalanced binary search tree with a sentinel threaded in for a fixed traversal order.
//!
//! # Examples
//!
//! ```
//! use threaded_bst::{PostOrder, PreOrder, Tree};
//!
//! let keys = [10, 2, 1, 3, 11, 5, 100, 99, 101, 4];
//!
//! let pre: Tree<i32, PreOrder> = keys.into_iter().collect();
//! assert_eq!(pre.to_vec(), [10, 2, 1, 3, 5, 4, 11, 100, 99, 101]);
//!
//! let post: Tree<i32, PostOrder> = keys.into_iter().collect();
//! assert_eq!(post.to_vec(), [1, 4, 5, 3, 2, 99, 101, 100, 11, 10]);
//!
//! // Equality compares the walked sequences, not the key sets.
//! assert_eq!(pre.len(), post.len());
//! assert_ne!(pre, post);
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::marker::PhantomData;
use std::mem;
use std::ptr::{self, NonNull};
use std::sync::atomic::{self, AtomicU64};

use tracing::{debug, trace};

use crate::allocator::{Global, NodeAllocator};
use crate::compare::{Comparator, Natural};
use crate::cursor::{Cursor, Iter, Position};
use crate::error::{Error, Result};
use crate::extracted::Extracted;
use crate::node::{Link, Node};
use crate::order::{InOrder, Traversal, TraversalOrder};
use crate::util::Unlinked;

/// Source of tree ids. Zero is never handed out; it marks the null position.
static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// An ordered set of keys stored in a plain (unbalanced) binary search tree and walked in the
/// traversal order `O`.
///
/// Every tree owns one sentinel node that stands for the end position. The sentinel is re-threaded
/// after each structural change so that `begin` and `end` are O(1) and stepping in either
/// direction only looks at nearby links.
///
/// No rebalancing happens: the shape, and so the pre-order and post-order sequences, depend on
/// insertion order. Inserting sorted keys builds a chain.
pub struct Tree<K, O: Traversal = InOrder, C = Natural, A: NodeAllocator = Global> {
    root: Link<K>,
    /// The sentinel. Allocated with the tree and freed when the tree drops.
    end: NonNull<Node<K>>,
    /// Cached first position in traversal order. Equal to `end` when the tree is empty.
    begin: NonNull<Node<K>>,
    len: usize,
    /// Unique for the life of the process, so positions of a dropped tree never match a new one
    /// that happens to reuse its addresses.
    id: u64,
    /// Bumped on every structural change so that stale positions can be rejected.
    stamp: u64,
    comparator: C,
    allocator: A,
    _marker: PhantomData<(Box<Node<K>>, O)>,
}

impl<K, O: Traversal> Tree<K, O, Natural, Global> {
    /// Creates an empty tree ordered by `K`'s `Ord`.
    ///
    /// # Examples
    ///
    /// ```
    /// use threaded_bst::{InOrder, Tree};
    ///
    /// let tree: Tree<String, InOrder> = Tree::new();
    /// assert!(tree.is_empty());
    /// assert_eq!(tree.begin(), tree.end());
    /// ```
    pub fn new() -> Self {
        Self::with_comparator_in(Natural, Global)
    }
}

impl<K, O: Traversal, C> Tree<K, O, C, Global> {
    /// Creates an empty tree ordered by `comparator`.
    pub fn with_comparator(comparator: C) -> Self {
        Self::with_comparator_in(comparator, Global)
    }
}

impl<K, O: Traversal, A: NodeAllocator> Tree<K, O, Natural, A> {
    /// Creates an empty tree whose nodes come from `allocator`.
    pub fn new_in(allocator: A) -> Self {
        Self::with_comparator_in(Natural, allocator)
    }
}

impl<K, O: Traversal, C, A: NodeAllocator> Tree<K, O, C, A> {
    /// Creates an empty tree ordered by `comparator` whose nodes come from `allocator`.
    pub fn with_comparator_in(comparator: C, allocator: A) -> Self {
        let end = allocator.allocate(Node::sentinel());
        Self {
            root: None,
            end,
            begin: end,
            len: 0,
            id: NEXT_ID.fetch_add(1, atomic::Ordering::Relaxed),
            stamp: 0,
            comparator,
            allocator,
            _marker: PhantomData,
        }
    }

    /// The number of elements. The sentinel isn't counted.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree holds no elements.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// An upper bound on the number of elements, given the size of a node.
    pub fn max_size(&self) -> usize {
        isize::MAX as usize / mem::size_of::<Node<K>>()
    }

    /// The comparator ordering the keys.
    pub fn comparator(&self) -> &C {
        &self.comparator
    }

    /// The allocator the nodes come from.
    pub fn allocator(&self) -> &A {
        &self.allocator
    }

    /// The traversal order this tree was built with.
    pub fn order(&self) -> TraversalOrder {
        O::ORDER
    }

    /// The position of the first element, or [`Tree::end`] when empty.
    pub fn begin(&self) -> Position<K> {
        self.position(self.begin)
    }

    /// The position one past the last element.
    pub fn end(&self) -> Position<K> {
        self.position(self.end)
    }

    /// Iterates over the elements in traversal order. Use `.rev()` to walk backwards.
    ///
    /// # Examples
    ///
    /// ```
    /// use threaded_bst::{PreOrder, Tree};
    ///
    /// let tree: Tree<i32, PreOrder> = Tree::from([3, 1, 5, 4, 100, -9]);
    ///
    /// let forwards: Vec<_> = tree.iter().copied().collect();
    /// let mut backwards: Vec<_> = tree.iter().rev().copied().collect();
    /// backwards.reverse();
    ///
    /// assert_eq!(forwards, [3, 1, -9, 5, 4, 100]);
    /// assert_eq!(forwards, backwards);
    /// ```
    pub fn iter(&self) -> Iter<'_, K, O> {
        Iter::new(self.begin, self.end)
    }

    /// Iterates over `[first, last)`.
    ///
    /// ## Errors
    ///
    /// [`Error::InvalidPosition`] if either position doesn't belong to the current state of this
    /// tree, [`Error::PastEnd`] if `last` doesn't follow `first`.
    ///
    /// # Examples
    ///
    /// ```
    /// use threaded_bst::{Error, InOrder, Tree};
    ///
    /// let tree: Tree<i32, InOrder> = Tree::from([1, 2, 3, 4]);
    ///
    /// let middle: Vec<_> = tree.range(tree.find(&2), tree.find(&4)).unwrap().collect();
    /// assert_eq!(middle, [&2, &3]);
    ///
    /// assert_eq!(tree.range(tree.find(&3), tree.find(&1)).err(), Some(Error::PastEnd));
    /// ```
    pub fn range(&self, first: Position<K>, last: Position<K>) -> Result<Iter<'_, K, O>> {
        let first = self.locate(first)?;
        let last = self.locate(last)?;

        let mut node = first;
        while node != last {
            if node == self.end {
                return Err(Error::PastEnd);
            }
            // SAFETY: `node` is a real node of this threaded tree.
            node = unsafe { O::increment(node) }.ok_or(Error::PastEnd)?;
        }
        Ok(Iter::new(first, last))
    }

    /// A cursor starting at `position`.
    ///
    /// ## Errors
    ///
    /// [`Error::InvalidPosition`] if `position` doesn't belong to the current state of this tree.
    pub fn cursor(&self, position: Position<K>) -> Result<Cursor<'_, K, O>> {
        let node = self.locate(position)?;
        Ok(Cursor::new(node, self.begin, self.end, self.id, self.stamp))
    }

    /// The element at `position`.
    ///
    /// ## Errors
    ///
    /// [`Error::InvalidPosition`] for a stale or foreign position, [`Error::EndPosition`] for the
    /// end.
    pub fn get(&self, position: Position<K>) -> Result<&K> {
        let node = self.locate(position)?;
        // SAFETY: `locate` only returns live nodes of this tree.
        unsafe { Node::value(node) }.ok_or(Error::EndPosition)
    }

    /// The position after `position`.
    ///
    /// ## Errors
    ///
    /// [`Error::PastEnd`] when `position` is the end, [`Error::InvalidPosition`] for a stale or
    /// foreign position.
    pub fn next(&self, position: Position<K>) -> Result<Position<K>> {
        let mut cursor = self.cursor(position)?;
        cursor.move_next()?;
        Ok(cursor.position())
    }

    /// The position before `position`.
    ///
    /// ## Errors
    ///
    /// [`Error::BeforeBegin`] when `position` is the beginning, [`Error::InvalidPosition`] for a
    /// stale or foreign position.
    pub fn prev(&self, position: Position<K>) -> Result<Position<K>> {
        let mut cursor = self.cursor(position)?;
        cursor.move_prev()?;
        Ok(cursor.position())
    }

    /// The first element in traversal order.
    pub fn first(&self) -> Option<&K> {
        self.iter().next()
    }

    /// The last element in traversal order.
    pub fn last(&self) -> Option<&K> {
        self.iter().next_back()
    }

    /// Copies the elements out in traversal order.
    pub fn to_vec(&self) -> Vec<K>
    where
        K: Clone,
    {
        self.iter().cloned().collect()
    }

    /// Removes every element. The tree stays usable.
    pub fn clear(&mut self) {
        let removed = self.len;
        self.destroy_all();
        self.rethread();
        debug!(removed, "cleared tree");
    }

    /// Exchanges the contents of two trees without touching any node.
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(self, other);
    }

    fn position(&self, node: NonNull<Node<K>>) -> Position<K> {
        Position {
            node: Some(node),
            tree: self.id,
            stamp: self.stamp,
        }
    }

    fn locate(&self, position: Position<K>) -> Result<NonNull<Node<K>>> {
        match position.node {
            Some(node) if position.tree == self.id && position.stamp == self.stamp => {
                Ok(node)
            }
            _ => Err(Error::InvalidPosition),
        }
    }

    /// Drops the sentinel from a link. Only a right link can hold it.
    fn real(&self, link: Link<K>) -> Link<K> {
        link.filter(|&node| node != self.end)
    }

    /// Threads the sentinel back in after a structural change and recomputes `begin`.
    fn rethread(&mut self) {
        // SAFETY: Called only on an unthreaded tree. Every node reachable from the root is owned
        // by this tree.
        unsafe {
            O::thread(self.root, self.end);
            self.begin = match self.root {
                Some(root) => O::first(root),
                None => self.end,
            };
        }
        self.stamp = self.stamp.wrapping_add(1);
    }

    /// Frees every real node, leaving an unthreaded empty tree.
    fn destroy_all(&mut self) {
        // SAFETY: The tree is threaded on entry. Once unthreaded, the nodes reachable from the
        // root are exactly the real nodes, each reachable once, so each is freed once.
        unsafe {
            O::unthread(self.root, self.end);
            let mut pending: Vec<_> = self.root.take().into_iter().collect();
            while let Some(node) = pending.pop() {
                let node = self.allocator.deallocate(node);
                pending.extend(node.left);
                pending.extend(node.right);
            }
        }
        self.len = 0;
    }

    /// Replaces `old` with `new` in `old`'s parent (or as the root).
    ///
    /// # Safety
    ///
    /// The tree must be unthreaded and `old` one of its nodes.
    unsafe fn replace_child(&mut self, old: NonNull<Node<K>>, new: Link<K>) {
        unsafe {
            let parent = Node::parent(old);
            match parent {
                Some(parent) if Node::left(parent) == Some(old) => (*parent.as_ptr()).left = new,
                Some(parent) => (*parent.as_ptr()).right = new,
                None => self.root = new,
            }
            if let Some(new) = new {
                (*new.as_ptr()).parent = parent;
            }
        }
    }

    /// Removes `node` from the unthreaded tree.
    ///
    /// A node with at most one child is spliced out directly. A node with two children takes its
    /// in-order successor's value and the successor, which has no left child, is spliced out
    /// instead.
    ///
    /// # Safety
    ///
    /// The tree must be unthreaded and `node` one of its real nodes.
    unsafe fn unlink(&mut self, node: NonNull<Node<K>>) -> Unlinked<K> {
        unsafe {
            let doomed = match (Node::left(node), Node::right(node)) {
                (Some(_), Some(right)) => {
                    let successor = Node::leftmost(right);
                    ptr::swap(
                        ptr::addr_of_mut!((*node.as_ptr()).value),
                        ptr::addr_of_mut!((*successor.as_ptr()).value),
                    );
                    successor
                }
                _ => node,
            };

            let child = Node::left(doomed).or(Node::right(doomed));
            self.replace_child(doomed, child);

            let freed = self.allocator.deallocate(doomed);
            self.len -= 1;
            let swapped = doomed != node;
            trace!(swapped, len = self.len, "removed node");
            Unlinked {
                value: freed.value,
                freed: doomed,
            }
        }
    }

    /// Unthreads, removes `node`, and re-threads.
    fn remove(&mut self, node: NonNull<Node<K>>) -> Unlinked<K> {
        // SAFETY: The tree is threaded on entry and `node` is one of its real nodes (callers
        // checked it against `end`).
        let unlinked = unsafe {
            O::unthread(self.root, self.end);
            self.unlink(node)
        };
        self.rethread();
        unlinked
    }

    /// Checks that a real node exists at `position`.
    fn locate_element(&self, position: Position<K>) -> Result<NonNull<Node<K>>> {
        let node = self.locate(position)?;
        if node == self.end {
            return Err(Error::EndPosition);
        }
        Ok(node)
    }
}

impl<K, O: Traversal, C: Comparator<K>, A: NodeAllocator> Tree<K, O, C, A> {
    /// The position of `key`, or [`Tree::end`] if it isn't present.
    ///
    /// # Examples
    ///
    /// ```
    /// use threaded_bst::{PreOrder, Tree};
    ///
    /// let tree: Tree<&str, PreOrder> = Tree::from(["here", "yes"]);
    ///
    /// assert_eq!(tree.get(tree.find(&"here")), Ok(&"here"));
    /// assert_eq!(tree.find(&"no"), tree.end());
    /// ```
    pub fn find(&self, key: &K) -> Position<K> {
        self.position(self.search(key).unwrap_or(self.end))
    }

    /// `1` if `key` is present, `0` otherwise.
    pub fn count(&self, key: &K) -> usize {
        usize::from(self.contains(key))
    }

    /// Whether `key` is present.
    pub fn contains(&self, key: &K) -> bool {
        self.search(key).is_some()
    }

    /// The position of the smallest key not less than `key`, or [`Tree::end`].
    ///
    /// # Examples
    ///
    /// ```
    /// use threaded_bst::{PostOrder, Tree};
    ///
    /// let tree: Tree<i32, PostOrder> = Tree::from([1, 2, 4, 5]);
    /// assert_eq!(tree.get(tree.lower_bound(&3)), Ok(&4));
    /// assert_eq!(tree.get(tree.lower_bound(&4)), Ok(&4));
    /// assert_eq!(tree.lower_bound(&6), tree.end());
    /// ```
    pub fn lower_bound(&self, key: &K) -> Position<K> {
        self.position(self.bound(|here| !self.comparator.less(here, key)))
    }

    /// The position of the smallest key strictly greater than `key`, or [`Tree::end`].
    pub fn upper_bound(&self, key: &K) -> Position<K> {
        self.position(self.bound(|here| self.comparator.less(key, here)))
    }

    /// Inserts `key`. Returns its position and whether it was newly inserted. An existing equal
    /// key is left untouched and `false` is returned with its position.
    ///
    /// # Examples
    ///
    /// ```
    /// use threaded_bst::{InOrder, Tree};
    ///
    /// let mut tree: Tree<i32, InOrder> = Tree::from([1, 2]);
    ///
    /// let (position, inserted) = tree.insert(3);
    /// assert!(inserted);
    /// assert_eq!(tree.find(&3), position);
    ///
    /// let (_, inserted) = tree.insert(2);
    /// assert!(!inserted);
    /// assert_eq!(tree.len(), 3);
    /// ```
    pub fn insert(&mut self, key: K) -> (Position<K>, bool) {
        if let Some(existing) = self.search(&key) {
            trace!(len = self.len, "rejected duplicate key");
            return (self.position(existing), false);
        }

        // SAFETY: The tree is threaded on entry; it is unthreaded for the descent and the
        // new node is linked under a live parent.
        let node = unsafe {
            O::unthread(self.root, self.end);
            let slot = self.insertion_point(&key);
            let node = self.allocator.allocate(Node::new(key));
            match slot {
                Some((parent, true)) => (*parent.as_ptr()).left = Some(node),
                Some((parent, false)) => (*parent.as_ptr()).right = Some(node),
                None => self.root = Some(node),
            }
            (*node.as_ptr()).parent = slot.map(|(parent, _)| parent);
            node
        };
        self.len += 1;
        self.rethread();

        trace!(len = self.len, "inserted key");
        (self.position(node), true)
    }

    /// Builds a key from `args` and inserts it.
    pub fn emplace<T: Into<K>>(&mut self, args: T) -> (Position<K>, bool) {
        self.insert(args.into())
    }

    /// Removes `key`. Returns how many elements were removed: `0` or `1`.
    pub fn erase(&mut self, key: &K) -> usize {
        match self.search(key) {
            Some(node) => {
                self.remove(node);
                1
            }
            None => 0,
        }
    }

    /// Removes the element at `position` and returns the position of the element that followed
    /// it.
    ///
    /// ## Errors
    ///
    /// [`Error::EndPosition`] for the end, [`Error::InvalidPosition`] for a stale or foreign
    /// position. The tree is unchanged on error.
    ///
    /// # Examples
    ///
    /// ```
    /// use threaded_bst::{Error, PostOrder, Tree};
    ///
    /// let mut tree: Tree<char, PostOrder> = Tree::from(['\0', '@', 'a', 'c']);
    ///
    /// let after = tree.erase_at(tree.begin()).unwrap();
    /// assert_eq!(tree.get(after), Ok(&'a'));
    ///
    /// let last = tree.prev(tree.end()).unwrap();
    /// assert_eq!(tree.erase_at(last), Ok(tree.end()));
    /// assert_eq!(tree.len(), 2);
    ///
    /// assert_eq!(tree.erase_at(tree.end()), Err(Error::EndPosition));
    /// ```
    pub fn erase_at(&mut self, position: Position<K>) -> Result<Position<K>> {
        let node = self.locate_element(position)?;
        // SAFETY: `node` is a real node of this threaded tree, so it has a successor.
        let next = unsafe { O::increment(node) }.unwrap_or(self.end);
        let unlinked = self.remove(node);
        Ok(self.position(unlinked.relocate(node, next)))
    }

    /// Removes every element in `[first, last)` and returns the position of the element `last`
    /// referred to.
    ///
    /// The keys in the range are copied out first and then removed one by one, since each removal
    /// can move values between nodes.
    ///
    /// ## Errors
    ///
    /// [`Error::InvalidPosition`] for a stale or foreign position, [`Error::PastEnd`] if `last`
    /// doesn't follow `first`. The tree is unchanged on error.
    pub fn erase_range(&mut self, first: Position<K>, last: Position<K>) -> Result<Position<K>>
    where
        K: Clone,
    {
        let doomed: Vec<K> = self.range(first, last)?.cloned().collect();
        let resume = self.get(last).ok().cloned();

        debug!(count = doomed.len(), "erasing range");
        for key in &doomed {
            self.erase(key);
        }

        let resume = resume.and_then(|key| self.search(&key)).unwrap_or(self.end);
        Ok(self.position(resume))
    }

    /// Removes `key` and hands it back. The result is empty if `key` wasn't present.
    pub fn extract(&mut self, key: &K) -> Extracted<K, A> {
        let value = self.search(key).and_then(|node| self.remove(node).value);
        Extracted::new(value, self.allocator.clone())
    }

    /// Removes the element at `position` and hands it back.
    ///
    /// ## Errors
    ///
    /// [`Error::EndPosition`] for the end, [`Error::InvalidPosition`] for a stale or foreign
    /// position. The tree is unchanged on error.
    pub fn extract_at(&mut self, position: Position<K>) -> Result<Extracted<K, A>> {
        let node = self.locate_element(position)?;
        let value = self.remove(node).value;
        Ok(Extracted::new(value, self.allocator.clone()))
    }

    /// Inserts a copy of every element of `other`, in `other`'s traversal order. Keys already
    /// present are skipped.
    ///
    /// ## Errors
    ///
    /// [`Error::AllocatorMismatch`] if the two trees' allocators differ. Nothing is inserted.
    ///
    /// # Examples
    ///
    /// ```
    /// use threaded_bst::{InOrder, Tree};
    ///
    /// let mut odd: Tree<i32, InOrder> = Tree::from([1, 3, 5, 7, 9]);
    /// let even: Tree<i32, InOrder> = Tree::from([2, 4, 6, 8, 10]);
    ///
    /// odd.merge(&even).unwrap();
    /// assert_eq!(odd.to_vec(), [1, 2, 3, 4, 5, 6, 7, 8, 9, 10]);
    /// assert_eq!(even.len(), 5);
    /// ```
    pub fn merge<O2: Traversal, C2>(&mut self, other: &Tree<K, O2, C2, A>) -> Result<()>
    where
        K: Clone,
    {
        if self.allocator != other.allocator {
            return Err(Error::AllocatorMismatch);
        }
        debug!(incoming = other.len(), len = self.len, "merging trees");
        self.extend(other.iter().cloned());
        Ok(())
    }

    /// Finds the real node holding `key`.
    fn search(&self, key: &K) -> Link<K> {
        let mut current = self.root;
        while let Some(node) = current {
            // SAFETY: Descending from the root only visits live nodes, and `real` keeps the
            // sentinel out.
            unsafe {
                current = match self.comparator.compare(key, Node::key(node)) {
                    Ordering::Less => Node::left(node),
                    Ordering::Equal => return Some(node),
                    Ordering::Greater => self.real(Node::right(node)),
                };
            }
        }
        None
    }

    /// The leftmost node whose key satisfies `above`, which must be monotone in key order.
    fn bound(&self, above: impl Fn(&K) -> bool) -> NonNull<Node<K>> {
        let mut candidate = self.end;
        let mut current = self.root;
        while let Some(node) = current {
            // SAFETY: As in `search`.
            unsafe {
                current = if above(Node::key(node)) {
                    candidate = node;
                    Node::left(node)
                } else {
                    self.real(Node::right(node))
                };
            }
        }
        candidate
    }

    /// Where a new `key` hangs: its parent and whether it goes on the left, or `None` for an
    /// empty tree. Equal keys would go right.
    ///
    /// # Safety
    ///
    /// The tree must be unthreaded.
    unsafe fn insertion_point(&self, key: &K) -> Option<(NonNull<Node<K>>, bool)> {
        let mut parent = self.root?;
        unsafe {
            loop {
                let left = self.comparator.less(key, Node::key(parent));
                let next = if left {
                    Node::left(parent)
                } else {
                    Node::right(parent)
                };
                match next {
                    Some(next) => parent = next,
                    None => return Some((parent, left)),
                }
            }
        }
    }
}

impl<K: Clone, O: Traversal, C: Comparator<K> + Default, A: NodeAllocator + Default>
    Tree<K, O, C, A>
{
    /// Builds a tree from the elements of `source` in `[first, last)`.
    ///
    /// ## Errors
    ///
    /// [`Error::InvalidPosition`] if either position doesn't belong to the current state of
    /// `source`, [`Error::PastEnd`] if `last` doesn't follow `first`.
    ///
    /// # Examples
    ///
    /// ```
    /// use threaded_bst::{InOrder, Tree};
    ///
    /// let source: Tree<char, InOrder> = Tree::from(['d', 'c', 'b', 'a']);
    /// let first = source.next(source.begin()).unwrap();
    ///
    /// let tail: Tree<char, InOrder> = Tree::from_range(&source, first, source.end()).unwrap();
    /// assert_eq!(tail.to_vec(), ['b', 'c', 'd']);
    /// ```
    pub fn from_range<O2: Traversal, C2, A2: NodeAllocator>(
        source: &Tree<K, O2, C2, A2>,
        first: Position<K>,
        last: Position<K>,
    ) -> Result<Self> {
        let mut tree = Self::default();
        tree.extend(source.range(first, last)?.cloned());
        Ok(tree)
    }
}

impl<K, O: Traversal, C, A: NodeAllocator> Drop for Tree<K, O, C, A> {
    fn drop(&mut self) {
        self.destroy_all();
        // SAFETY: The sentinel was allocated by this allocator in `with_comparator_in` and
        // nothing references it once the tree is gone.
        unsafe { drop(self.allocator.deallocate(self.end)) };
    }
}

impl<K: Clone, O: Traversal, C: Clone, A: NodeAllocator> Clone for Tree<K, O, C, A> {
    /// Deep-copies every node into a fresh tree with its own sentinel.
    fn clone(&self) -> Self {
        let mut copy = Self::with_comparator_in(self.comparator.clone(), self.allocator.clone());
        let Some(root) = self.root else {
            return copy;
        };

        // SAFETY: Reads only walk live nodes of `self` (skipping its sentinel). The copy is
        // unthreaded while it's built; its root is set first so a panicking `K::clone` still lets
        // `Drop` free whatever was copied.
        unsafe {
            let new_root = copy.allocator.allocate(Node::new(Node::key(root).clone()));
            copy.root = Some(new_root);

            let mut pending = vec![(root, new_root)];
            while let Some((source, target)) = pending.pop() {
                if let Some(left) = Node::left(source) {
                    let child = copy.allocator.allocate(Node::new(Node::key(left).clone()));
                    (*child.as_ptr()).parent = Some(target);
                    (*target.as_ptr()).left = Some(child);
                    pending.push((left, child));
                }
                if let Some(right) = self.real(Node::right(source)) {
                    let child = copy.allocator.allocate(Node::new(Node::key(right).clone()));
                    (*child.as_ptr()).parent = Some(target);
                    (*target.as_ptr()).right = Some(child);
                    pending.push((right, child));
                }
            }
        }
        copy.len = self.len;
        copy.rethread();
        copy
    }
}

impl<K, O: Traversal, C: Default, A: NodeAllocator + Default> Default for Tree<K, O, C, A> {
    fn default() -> Self {
        Self::with_comparator_in(C::default(), A::default())
    }
}

impl<K: fmt::Debug, O: Traversal, C, A: NodeAllocator> fmt::Debug for Tree<K, O, C, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Trees are equal when they walk the same sequence of keys. Their orders don't have to match.
impl<K, O1, O2, C1, C2, A1, A2> PartialEq<Tree<K, O2, C2, A2>> for Tree<K, O1, C1, A1>
where
    K: PartialEq,
    O1: Traversal,
    O2: Traversal,
    A1: NodeAllocator,
    A2: NodeAllocator,
{
    fn eq(&self, other: &Tree<K, O2, C2, A2>) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<K: Eq, O: Traversal, C, A: NodeAllocator> Eq for Tree<K, O, C, A> {}

impl<K, O: Traversal, C: Comparator<K>, A: NodeAllocator> Extend<K> for Tree<K, O, C, A> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<K, O, C, A> FromIterator<K> for Tree<K, O, C, A>
where
    O: Traversal,
    C: Comparator<K> + Default,
    A: NodeAllocator + Default,
{
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut tree = Self::default();
        tree.extend(iter);
        tree
    }
}

impl<K, O, C, A, const N: usize> From<[K; N]> for Tree<K, O, C, A>
where
    O: Traversal,
    C: Comparator<K> + Default,
    A: NodeAllocator + Default,
{
    fn from(keys: [K; N]) -> Self {
        keys.into_iter().collect()
    }
}

impl<'a, K, O: Traversal, C, A: NodeAllocator> IntoIterator for &'a Tree<K, O, C, A> {
    type Item = &'a K;
    type IntoIter = Iter<'a, K, O>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
impl<K, O: Traversal, C: Comparator<K>, A: NodeAllocator> Tree<K, O, C, A> {
    /// Checks parent links, key ordering, the sentinel's placement and the walk invariant: `len`
    /// steps forward from `begin` reach `end`, and `len` steps back return to `begin`.
    pub(crate) fn assert_invariants(&self) {
        unsafe {
            match (self.root, O::ORDER) {
                (None, _) => assert_eq!(self.begin, self.end),
                (Some(root), TraversalOrder::PostOrder) => {
                    assert_eq!(Node::parent(root), Some(self.end));
                    assert_eq!(Node::right(self.end), Some(root));
                }
                (Some(root), _) => {
                    assert_eq!(Node::parent(root), None);
                    let maximum = Node::parent(self.end).expect("sentinel hangs off the maximum");
                    assert_eq!(Node::right(maximum), Some(self.end));
                }
            }

            let mut count = 0;
            let mut pending: Vec<_> = self.root.into_iter().collect();
            while let Some(node) = pending.pop() {
                count += 1;
                if let Some(left) = Node::left(node) {
                    assert_eq!(Node::parent(left), Some(node));
                    assert!(self.comparator.less(Node::key(left), Node::key(node)));
                    pending.push(left);
                }
                if let Some(right) = self.real(Node::right(node)) {
                    assert_eq!(Node::parent(right), Some(node));
                    assert!(self.comparator.less(Node::key(node), Node::key(right)));
                    pending.push(right);
                }
            }
            assert_eq!(count, self.len);

            let mut node = self.begin;
            for _ in 0..self.len {
                assert_ne!(node, self.end);
                node = O::increment(node).expect("walk reaches the end");
            }
            assert_eq!(node, self.end);

            for _ in 0..self.len {
                node = O::decrement(node).expect("walk returns to the beginning");
            }
            assert_eq!(node, self.begin);
        }
    }
}
