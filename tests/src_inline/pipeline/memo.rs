use std::collections::BTreeMap;

use super::*;
use crate::fixtures::{FAMILY_1, demo_store};
use crate::model::{Family, Project};

#[test]
fn test_memo_returns_same_arc_for_equal_key() {
    let memo: Memo<u32, Vec<u32>> = Memo::new();
    let a = memo.get_or_compute(1, || vec![1, 2, 3]);
    let b = memo.get_or_compute(1, || unreachable!());
    assert!(Arc::ptr_eq(&a, &b));
    assert_eq!(memo.recompute_count(), 1);

    let c = memo.get_or_compute(2, || vec![4]);
    assert!(!Arc::ptr_eq(&a, &c));
    assert_eq!(memo.recompute_count(), 2);

    // single slot: going back to the first key recomputes
    let d = memo.get_or_compute(1, || vec![1, 2, 3]);
    assert!(!Arc::ptr_eq(&a, &d));
    assert_eq!(*a, *d);
    assert_eq!(memo.recompute_count(), 3);
}

#[test]
fn test_clear_forces_recompute() {
    let memo: Memo<&str, usize> = Memo::default();
    memo.get_or_compute("k", || 1);
    memo.clear();
    memo.get_or_compute("k", || 1);
    assert_eq!(memo.recompute_count(), 2);
}

#[test]
fn test_by_ref_ignores_deep_equality() {
    let a = Arc::new(vec![1, 2]);
    let b = Arc::new(vec![1, 2]);
    assert_eq!(ByRef::new(&a), ByRef::new(&a));
    assert_ne!(ByRef::new(&a), ByRef::new(&b));
    assert_eq!(ByRef::new(&a).clone(), ByRef::new(&a));
}

#[test]
fn test_collection_ref_tracks_store_swaps() {
    let mut store = demo_store();
    let families = CollectionRef::of::<Family>(&store);
    let projects = CollectionRef::of::<Project>(&store);
    assert_eq!(families, CollectionRef::of::<Family>(&store));

    let family = (**store.get::<Family>(FAMILY_1).unwrap()).clone();
    store.merge(BTreeMap::from([(FAMILY_1.to_string(), Some(family))]));

    assert_ne!(families, CollectionRef::of::<Family>(&store));
    assert_eq!(projects, CollectionRef::of::<Project>(&store));
}
