use threaded_bst::{
    Counting, Error, FnComparator, InOrder, Natural, PostOrder, PreOrder, Reverse, Traversal,
    TraversalOrder, Tree,
};

const KEYS: [i32; 10] = [10, 2, 1, 3, 11, 5, 100, 99, 101, 4];

fn build<O: Traversal>() -> Tree<i32, O> {
    Tree::from(KEYS)
}

#[test]
fn each_order_walks_the_same_shape() {
    assert_eq!(
        build::<PreOrder>().to_vec(),
        [10, 2, 1, 3, 5, 4, 11, 100, 99, 101]
    );
    assert_eq!(
        build::<InOrder>().to_vec(),
        [1, 2, 3, 4, 5, 10, 11, 99, 100, 101]
    );
    assert_eq!(
        build::<PostOrder>().to_vec(),
        [1, 4, 5, 3, 2, 99, 101, 100, 11, 10]
    );
}

#[test]
fn in_order_with_negatives() {
    let tree: Tree<i32, InOrder> = Tree::from([300, 11, 2, -1, -5, 20, 21, 15]);
    assert_eq!(tree.to_vec(), [-5, -1, 2, 11, 15, 20, 21, 300]);
    assert_eq!(tree.order(), TraversalOrder::InOrder);
}

#[test]
fn post_order_chars() {
    let tree: Tree<char, PostOrder> = Tree::from(['a', 'c', 'b', 'd']);
    assert_eq!(tree.to_vec(), ['b', 'd', 'c', 'a']);
}

#[test]
fn walking_with_positions() {
    let tree = build::<PostOrder>();

    let mut seen = Vec::new();
    let mut position = tree.begin();
    while position != tree.end() {
        seen.push(*tree.get(position).unwrap());
        position = tree.next(position).unwrap();
    }
    assert_eq!(seen, tree.to_vec());

    let mut seen = Vec::new();
    let mut position = tree.end();
    while position != tree.begin() {
        position = tree.prev(position).unwrap();
        seen.push(*tree.get(position).unwrap());
    }
    seen.reverse();
    assert_eq!(seen, tree.to_vec());
}

#[test]
fn stepping_outside_the_walk_fails() {
    let tree = build::<PreOrder>();

    let past = tree.next(tree.end()).unwrap_err();
    assert_eq!(past, Error::PastEnd);
    assert!(past.is_range_error());

    let before = tree.prev(tree.begin()).unwrap_err();
    assert_eq!(before, Error::BeforeBegin);
    assert!(before.is_range_error());

    assert_eq!(tree.get(tree.end()), Err(Error::EndPosition));
    assert!(!Error::EndPosition.is_range_error());
}

#[test]
fn bounds() {
    let tree: Tree<i32, PreOrder> = Tree::from([1, 2, 4, 5]);
    assert_eq!(tree.get(tree.lower_bound(&3)), Ok(&4));
    assert_eq!(tree.get(tree.upper_bound(&4)), Ok(&5));
    assert_eq!(tree.get(tree.lower_bound(&0)), Ok(&1));

    let tree: Tree<i32, PreOrder> = Tree::from([1, 2, 3, 4, 5]);
    assert_eq!(tree.upper_bound(&5), tree.end());
}

#[test]
fn bounds_follow_the_comparator() {
    let tree: Tree<i32, InOrder, Reverse> = Tree::from([1, 2, 4, 5]);
    assert_eq!(tree.to_vec(), [5, 4, 2, 1]);
    // "Not less than 3" under the reversed ordering is 2.
    assert_eq!(tree.get(tree.lower_bound(&3)), Ok(&2));
}

#[test]
fn lookups() {
    let tree = build::<InOrder>();
    assert!(tree.contains(&99));
    assert!(!tree.contains(&98));
    assert_eq!(tree.count(&5), 1);
    assert_eq!(tree.count(&6), 0);
    assert_eq!(tree.find(&6), tree.end());
    assert_eq!(tree.get(tree.find(&101)), Ok(&101));
}

#[test]
fn erase_by_key_updates_len() {
    let mut tree = build::<PostOrder>();
    assert_eq!(tree.erase(&10), 1);
    assert_eq!(tree.len(), KEYS.len() - 1);
    assert_eq!(tree.erase(&10), 0);
    assert_eq!(tree.len(), KEYS.len() - 1);
    assert!(!tree.contains(&10));
}

#[test]
fn erase_at_end_fails_without_changes() {
    let mut tree = build::<InOrder>();
    assert_eq!(tree.erase_at(tree.end()), Err(Error::EndPosition));
    assert!(tree.extract_at(tree.end()).is_err());
    assert_eq!(tree.len(), KEYS.len());
}

#[test]
fn erase_everything_in_order() {
    let mut tree = build::<PreOrder>();
    let mut position = tree.begin();
    let mut erased = Vec::new();
    while position != tree.end() {
        erased.push(*tree.get(position).unwrap());
        position = tree.erase_at(position).unwrap();
    }
    assert!(tree.is_empty());
    let mut sorted = erased.clone();
    sorted.sort_unstable();
    assert_eq!(sorted, [1, 2, 3, 4, 5, 10, 11, 99, 100, 101]);
}

#[test]
fn erase_whole_range() {
    let mut tree = build::<PostOrder>();
    let end = tree.erase_range(tree.begin(), tree.end()).unwrap();
    assert_eq!(end, tree.end());
    assert!(tree.is_empty());
}

#[test]
fn erase_empty_range() {
    let mut tree = build::<InOrder>();
    let at = tree.find(&5);
    let resume = tree.erase_range(at, at).unwrap();
    assert_eq!(tree.get(resume), Ok(&5));
    assert_eq!(tree.len(), KEYS.len());
}

#[test]
fn extract_hands_back_the_value() {
    let mut tree: Tree<String, InOrder> = Tree::new();
    tree.emplace("left");
    tree.emplace("right");

    let extracted = tree.extract(&String::from("left"));
    assert_eq!(extracted.value().map(String::as_str), Some("left"));
    assert_eq!(tree.to_vec(), ["right"]);

    let position = tree.begin();
    let extracted = tree.extract_at(position).unwrap();
    assert_eq!(extracted.into_value().as_deref(), Some("right"));
    assert!(tree.is_empty());
}

#[test]
fn copy_then_mutate_is_independent() {
    let mut original = build::<PreOrder>();
    let copy = original.clone();

    original.erase(&2);
    original.insert(42);

    assert_eq!(copy.to_vec(), [10, 2, 1, 3, 5, 4, 11, 100, 99, 101]);
    assert_ne!(copy, original);
}

#[test]
fn equality_ignores_traversal_order() {
    let pre: Tree<i32, PreOrder> = Tree::from([2, 1]);
    let in_order: Tree<i32, InOrder> = Tree::from([2, 1]);
    let post: Tree<i32, PostOrder> = Tree::from([1, 2]);

    // pre-order [2, 1] and post-order [2, 1] are the same sequence.
    assert_eq!(pre, post);
    assert_ne!(pre, in_order);
}

#[test]
fn merge_disjoint_trees() {
    let mut left: Tree<i32, PostOrder> = Tree::from([4, 2, 6]);
    let right: Tree<i32, PostOrder> = Tree::from([5, 1, 7]);

    left.merge(&right).unwrap();
    // 5 hangs left of 6, 1 left of 2, 7 right of 6.
    assert_eq!(left.to_vec(), [1, 2, 5, 7, 6, 4]);
    assert_eq!(right.len(), 3);
}

#[test]
fn merge_skips_duplicates() {
    let mut left: Tree<i32, InOrder> = Tree::from([1, 2, 3]);
    let right: Tree<i32, PreOrder> = Tree::from([3, 4]);
    left.merge(&right).unwrap();
    assert_eq!(left.to_vec(), [1, 2, 3, 4]);
}

#[test]
fn merge_requires_equal_allocators() {
    let shared = Counting::new();
    let mut a: Tree<i32, InOrder, Natural, Counting> = Tree::new_in(shared.clone());
    let mut b: Tree<i32, InOrder, Natural, Counting> = Tree::new_in(shared.clone());
    a.insert(1);
    b.insert(2);
    a.merge(&b).unwrap();
    assert_eq!(a.to_vec(), [1, 2]);

    let stranger: Tree<i32, InOrder, Natural, Counting> = Tree::new_in(Counting::new());
    assert_eq!(a.merge(&stranger), Err(Error::AllocatorMismatch));
    assert_eq!(a.len(), 2);
}

#[test]
fn from_range_copies_a_span() {
    let source = build::<PreOrder>();
    let first = source.find(&3);
    let last = source.find(&11);

    let span: Tree<i32, PreOrder> = Tree::from_range(&source, first, last).unwrap();
    assert_eq!(span.to_vec(), [3, 5, 4]);

    let stale = source.clone();
    assert_eq!(
        Tree::<i32, PreOrder>::from_range(&stale, first, last),
        Err(Error::InvalidPosition)
    );
}

#[test]
fn clear_and_reuse() {
    let mut tree = build::<PostOrder>();
    tree.clear();
    assert!(tree.is_empty());
    assert_eq!(tree.begin(), tree.end());
    tree.extend([2, 1, 3]);
    assert_eq!(tree.to_vec(), [1, 3, 2]);
}

#[test]
fn swap_is_shallow() {
    let mut a = build::<InOrder>();
    let mut b: Tree<i32, InOrder> = Tree::new();
    a.swap(&mut b);
    assert!(a.is_empty());
    assert_eq!(b.len(), KEYS.len());
}

#[test]
fn closure_comparator() {
    let by_len = FnComparator(|a: &&str, b: &&str| a.len().cmp(&b.len()));
    let mut tree: Tree<&str, InOrder, _> = Tree::with_comparator(by_len);
    tree.extend(["ccc", "a", "bb", "zz"]);
    // "zz" has the same length as "bb" so it's a duplicate.
    assert_eq!(tree.to_vec(), ["a", "bb", "ccc"]);
}

#[test]
fn debug_prints_the_walk() {
    let tree: Tree<i32, PostOrder> = Tree::from([2, 1, 3]);
    assert_eq!(format!("{:?}", tree), "[1, 3, 2]");
}

#[test]
fn max_size_is_positive() {
    let tree: Tree<u64, InOrder> = Tree::new();
    assert!(tree.max_size() > 0);
}
