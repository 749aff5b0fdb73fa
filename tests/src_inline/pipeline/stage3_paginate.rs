use super::*;

fn items(n: usize) -> Vec<Arc<usize>> {
    (0..n).map(Arc::new).collect()
}

#[test]
fn test_page_count() {
    assert_eq!(page_count(0, 10), 0);
    assert_eq!(page_count(10, 10), 1);
    assert_eq!(page_count(11, 10), 2);
    assert_eq!(page_count(5, 0), 5);
}

#[test]
fn test_pages_concatenate_to_full_list() {
    for total in [0usize, 1, 7, 10, 23] {
        let list = items(total);
        for size in [1usize, 3, 10, 25] {
            let first = run_stage3(&list, 0, size);
            let mut seen = Vec::new();
            for page in 0..first.page_count {
                let p = run_stage3(&list, page, size);
                assert_eq!(p.page, page);
                assert_eq!(p.offset(), page * size);
                seen.extend(p.items.iter().map(|v| **v));
            }
            assert_eq!(seen, (0..total).collect::<Vec<_>>(), "total={total} size={size}");
        }
    }
}

#[test]
fn test_page_is_clamped() {
    let list = items(23);
    let p = run_stage3(&list, 99, 10);
    assert_eq!(p.page, 2);
    assert_eq!(p.items.len(), 3);
    assert_eq!(p.total, 23);
    assert_eq!(p.page_count, 3);
}

#[test]
fn test_empty_list_is_valid_page() {
    let p = run_stage3::<usize>(&[], 4, 10);
    assert!(p.is_empty());
    assert_eq!(p.page, 0);
    assert_eq!(p.page_count, 0);
    assert_eq!(p.total, 0);
}

#[test]
fn test_zero_page_size_is_one() {
    let list = items(3);
    let p = run_stage3(&list, 1, 0);
    assert_eq!(p.records_per_page, 1);
    assert_eq!(*p.items[0], 1);
}
