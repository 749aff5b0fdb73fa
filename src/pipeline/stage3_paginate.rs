use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct Page<E> {
    pub items: Vec<Arc<E>>,
    /// Zero-based, after clamping.
    pub page: usize,
    pub page_count: usize,
    pub total: usize,
    pub records_per_page: usize,
}

impl<E> Page<E> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Index of the first item on this page within the full list.
    pub fn offset(&self) -> usize {
        self.page * self.records_per_page
    }
}

pub fn page_count(total: usize, records_per_page: usize) -> usize {
    total.div_ceil(records_per_page.max(1))
}

pub fn run_stage3<E>(sorted: &[Arc<E>], page: usize, records_per_page: usize) -> Page<E> {
    let size = records_per_page.max(1);
    let total = sorted.len();
    let pages = page_count(total, size);
    let page = page.min(pages.saturating_sub(1));
    let start = (page * size).min(total);
    let end = (start + size).min(total);
    Page {
        items: sorted[start..end].to_vec(),
        page,
        page_count: pages,
        total,
        records_per_page: size,
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage3_paginate.rs"]
mod tests;
