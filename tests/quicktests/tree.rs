use threaded_bst::{InOrder, PostOrder, PreOrder, Traversal, Tree};

use std::collections::{BTreeSet, HashSet};

use crate::Op;

/// Applies a set of operations to a tree and a set.
/// This way we can ensure that after a random smattering of inserts
/// and deletes we have the same set of keys in both.
fn do_ops<O: Traversal>(ops: &[Op<i8>], tree: &mut Tree<i8, O>, set: &mut BTreeSet<i8>) -> bool {
    for op in ops {
        let agreed = match *op {
            Op::Insert(k) => tree.insert(k).1 == set.insert(k),
            Op::Remove(k) => (tree.erase(&k) == 1) == set.remove(&k),
        };
        if !agreed || tree.len() != set.len() {
            return false;
        }
    }
    true
}

/// Walking backwards visits exactly the forward walk, reversed.
fn reversible<O: Traversal>(tree: &Tree<i8, O>) -> bool {
    let forwards = tree.to_vec();
    let mut backwards: Vec<_> = tree.iter().rev().copied().collect();
    backwards.reverse();
    forwards == backwards && forwards.len() == tree.len()
}

fn fuzz<O: Traversal>(ops: &[Op<i8>]) -> bool {
    let mut tree = Tree::<i8, O>::new();
    let mut set = BTreeSet::new();

    do_ops(ops, &mut tree, &mut set)
        && reversible(&tree)
        && set.iter().all(|k| tree.contains(k))
        && tree.iter().all(|k| set.contains(k))
}

quickcheck::quickcheck! {
    fn fuzz_multiple_operations_pre_order(ops: Vec<Op<i8>>) -> bool {
        fuzz::<PreOrder>(&ops)
    }

    fn fuzz_multiple_operations_in_order(ops: Vec<Op<i8>>) -> bool {
        fuzz::<InOrder>(&ops)
    }

    fn fuzz_multiple_operations_post_order(ops: Vec<Op<i8>>) -> bool {
        fuzz::<PostOrder>(&ops)
    }

    fn in_order_is_sorted(xs: Vec<i8>) -> bool {
        let tree: Tree<i8, InOrder> = xs.iter().copied().collect();
        let set: BTreeSet<_> = xs.into_iter().collect();
        tree.iter().eq(set.iter())
    }

    fn pre_order_starts_at_the_first_key(xs: Vec<i8>) -> bool {
        let tree: Tree<i8, PreOrder> = xs.iter().copied().collect();
        tree.first() == xs.first()
    }

    fn post_order_ends_at_the_first_key(xs: Vec<i8>) -> bool {
        let tree: Tree<i8, PostOrder> = xs.iter().copied().collect();
        tree.last() == xs.first()
    }

    fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
        let tree: Tree<i8, PostOrder> = xs.iter().copied().collect();
        let added: HashSet<_> = xs.into_iter().collect();
        let nots: HashSet<_> = nots.into_iter().collect();
        let mut nots = nots.difference(&added);

        nots.all(|x| tree.find(x) == tree.end())
    }

    fn clone_survives_clearing_the_original(xs: Vec<i8>) -> bool {
        let mut tree: Tree<i8, PreOrder> = xs.into_iter().collect();
        let before = tree.to_vec();
        let copy = tree.clone();
        tree.clear();
        copy.to_vec() == before && tree.is_empty()
    }

    fn erase_range_removes_exactly_the_span(xs: Vec<i8>, skip: usize, take: usize) -> bool {
        let mut tree: Tree<i8, PostOrder> = xs.into_iter().collect();
        let walk = tree.to_vec();
        let skip = skip % (walk.len() + 1);
        let take = take % (walk.len() - skip + 1);

        let mut first = tree.begin();
        for _ in 0..skip {
            first = tree.next(first).unwrap();
        }
        let mut last = first;
        for _ in 0..take {
            last = tree.next(last).unwrap();
        }

        tree.erase_range(first, last).unwrap();
        let mut expected: Vec<_> = walk[..skip].iter().chain(&walk[skip + take..]).copied().collect();
        let mut remaining = tree.to_vec();
        expected.sort_unstable();
        remaining.sort_unstable();
        remaining == expected
    }
}
