use std::cmp::Ordering;

use super::*;

#[test]
fn test_sort_value_orders_mixed_variants() {
    assert!(SortValue::Number(5.0) < SortValue::Date(String::new()));
    assert!(SortValue::Date("2020".to_string()) < SortValue::Text(String::new()));
    assert_eq!(
        SortValue::Number(f64::NAN).cmp(&SortValue::Number(f64::NAN)),
        Ordering::Equal
    );
    assert!(SortValue::Number(-1.0) < SortValue::Number(2.0));
}

#[test]
fn test_text_is_case_insensitive() {
    assert_eq!(SortValue::text("Tutorial"), SortValue::text("tutorial"));
    assert!(SortValue::text("alpha") < SortValue::text("Beta"));
}

#[test]
fn test_missing_date_sorts_first() {
    assert!(SortValue::date(None) < SortValue::date(Some("2017-01-01")));
    assert!(SortValue::date(Some("2017-01-01")) < SortValue::date(Some("2018-01-01")));
}

#[test]
fn test_registry_lookup() {
    let defs = families::family_filter_defs();
    assert_eq!(find_filter_def(defs, "ACCEPTED").map(|d| d.name), Some("Accepted"));
    assert!(find_filter_def(defs, "accepted").is_none());

    let sorts = projects::project_sort_defs();
    let created = find_sort_def(sorts, "DATE_CREATED").unwrap();
    assert!(created.inverted);
    assert!(!find_sort_def(sorts, "PROJECT_NAME").unwrap().inverted);
}

#[test]
fn test_show_all_accepts_everything() {
    let predicate = show_all::<u32>();
    assert!(predicate(&0));
    assert!(predicate(&u32::MAX));
}
