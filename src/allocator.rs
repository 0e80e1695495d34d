//! Node allocation. Every node, the sentinel included, is allocated one at a time through a
//! [`NodeAllocator`] owned by the tree.
//!
//! Two allocators comparing equal are interchangeable: [`Tree::merge`][crate::Tree::merge] refuses
//! to combine trees whose allocators differ.

use std::cell::Cell;
use std::ptr::NonNull;
use std::rc::Rc;

/// Allocates and frees single values on behalf of a tree.
pub trait NodeAllocator: Clone + PartialEq {
    /// Moves `value` to a fresh, stable heap address.
    fn allocate<T>(&self, value: T) -> NonNull<T>;

    /// Frees the allocation at `ptr` and returns the value it held.
    ///
    /// # Safety
    ///
    /// `ptr` must come from [`NodeAllocator::allocate`] on an allocator equal to `self`, must not
    /// have been deallocated already, and must not be dereferenced afterwards.
    unsafe fn deallocate<T>(&self, ptr: NonNull<T>) -> T;
}

/// The global heap, through `Box`. All `Global` handles are equal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Global;

impl NodeAllocator for Global {
    fn allocate<T>(&self, value: T) -> NonNull<T> {
        NonNull::from(Box::leak(Box::new(value)))
    }

    unsafe fn deallocate<T>(&self, ptr: NonNull<T>) -> T {
        // SAFETY: The caller guarantees `ptr` came from `Box::leak` in `allocate` and is freed
        // only once.
        unsafe { *Box::from_raw(ptr.as_ptr()) }
    }
}

/// A [`Global`]-backed allocator that counts live allocations.
///
/// Clones share the counter and compare equal. Independently created `Counting` allocators never
/// compare equal, which makes them handy for exercising allocator checks.
///
/// # Examples
///
/// ```
/// use threaded_bst::{Counting, InOrder, Natural, Tree};
///
/// let allocator = Counting::new();
/// {
///     let mut tree: Tree<i32, InOrder, Natural, Counting> = Tree::new_in(allocator.clone());
///     tree.insert(1);
///     tree.insert(2);
///
///     // Two elements plus the sentinel.
///     assert_eq!(allocator.live(), 3);
/// }
/// assert_eq!(allocator.live(), 0);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Counting {
    live: Rc<Cell<usize>>,
}

impl Counting {
    /// Creates an allocator with its own counter.
    pub fn new() -> Self {
        Self::default()
    }

    /// How many allocations made through this allocator (or its clones) are still alive.
    pub fn live(&self) -> usize {
        self.live.get()
    }
}

impl PartialEq for Counting {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.live, &other.live)
    }
}

impl Eq for Counting {}

impl NodeAllocator for Counting {
    fn allocate<T>(&self, value: T) -> NonNull<T> {
        self.live.set(self.live.get() + 1);
        Global.allocate(value)
    }

    unsafe fn deallocate<T>(&self, ptr: NonNull<T>) -> T {
        self.live.set(self.live.get() - 1);
        // SAFETY: Forwarded from the caller. Every `Counting` allocation came from `Global`.
        unsafe { Global.deallocate(ptr) }
    }
}
