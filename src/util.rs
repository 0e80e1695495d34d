use std::ptr::NonNull;

use crate::node::Node;

/// What removing a node from the tree did.
pub(crate) struct Unlinked<K> {
    /// The value that matched the removal. The caller owns it now.
    pub(crate) value: Option<K>,
    /// The node that was actually freed. When the matched node had two children this is its
    /// in-order successor: the successor's value moved into the matched node and the successor
    /// was freed in its place.
    pub(crate) freed: NonNull<Node<K>>,
}

impl<K> Unlinked<K> {
    /// Maps a node observed before the removal onto the node holding the same value afterwards.
    pub(crate) fn relocate(
        &self,
        matched: NonNull<Node<K>>,
        observed: NonNull<Node<K>>,
    ) -> NonNull<Node<K>> {
        if observed == self.freed {
            matched
        } else {
            observed
        }
    }
}
