//! Registries of named filters and sort keys for each table.
//!
//! A filter or sort option is resolved from its string key once, then asked
//! for a predicate or key getter bound to the current collections. Unknown
//! keys resolve to the show-all filter or the GUID identity sort.

use std::cmp::Ordering;

use crate::store::EntityStore;

pub mod families;
pub mod projects;
pub mod variants;

/// Collections a predicate or key getter may consult, plus the viewer.
#[derive(Debug, Clone, Copy)]
pub struct RelatedCollections<'a> {
    pub store: &'a EntityStore,
    pub viewer: Option<&'a str>,
}

impl<'a> RelatedCollections<'a> {
    pub fn new(store: &'a EntityStore) -> Self {
        Self {
            store,
            viewer: None,
        }
    }

    pub fn with_viewer(store: &'a EntityStore, viewer: Option<&'a str>) -> Self {
        Self { store, viewer }
    }
}

pub type Predicate<'a, E> = Box<dyn Fn(&E) -> bool + 'a>;
pub type KeyGetter<'a, E> = Box<dyn Fn(&E) -> SortValue + 'a>;

pub trait Filter<E> {
    fn value(&self) -> &str;
    fn name(&self) -> &str;
    fn predicate<'a>(&'a self, related: &RelatedCollections<'a>) -> Predicate<'a, E>;
}

pub trait SortKey<E> {
    fn value(&self) -> &str;
    fn name(&self) -> &str;
    /// Columns whose natural reading is newest-first flip the direction.
    fn inverted(&self) -> bool;
    fn key_getter<'a>(&'a self, related: &RelatedCollections<'a>) -> KeyGetter<'a, E>;
}

#[derive(Debug, Clone, Copy)]
pub struct FilterDef<F: 'static> {
    pub filter: F,
    pub value: &'static str,
    pub name: &'static str,
    pub category: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct SortDef<S: 'static> {
    pub sort: S,
    pub value: &'static str,
    pub name: &'static str,
    pub inverted: bool,
}

pub fn find_filter_def<'d, F>(defs: &'d [FilterDef<F>], key: &str) -> Option<&'d FilterDef<F>> {
    defs.iter().find(|d| d.value == key)
}

pub fn find_sort_def<'d, S>(defs: &'d [SortDef<S>], key: &str) -> Option<&'d SortDef<S>> {
    defs.iter().find(|d| d.value == key)
}

/// Comparable sort key. Variants order as `Number < Date < Text` when mixed.
#[derive(Debug, Clone)]
pub enum SortValue {
    Number(f64),
    /// ISO-8601; compares lexicographically.
    Date(String),
    /// Lowercased for case-insensitive ordering.
    Text(String),
}

impl SortValue {
    pub fn text(value: &str) -> Self {
        SortValue::Text(value.to_lowercase())
    }

    pub fn date(value: Option<&str>) -> Self {
        SortValue::Date(value.unwrap_or_default().to_string())
    }

    fn rank(&self) -> u8 {
        match self {
            SortValue::Number(_) => 0,
            SortValue::Date(_) => 1,
            SortValue::Text(_) => 2,
        }
    }
}

impl Ord for SortValue {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortValue::Number(a), SortValue::Number(b)) => a.total_cmp(b),
            (SortValue::Date(a), SortValue::Date(b)) => a.cmp(b),
            (SortValue::Text(a), SortValue::Text(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for SortValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for SortValue {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SortValue {}

pub fn show_all<'a, E>() -> Predicate<'a, E> {
    Box::new(|_| true)
}

#[cfg(test)]
#[path = "../../tests/src_inline/options/mod.rs"]
mod tests;
