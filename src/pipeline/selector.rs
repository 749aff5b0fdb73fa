use std::sync::Arc;

use crate::model::{Family, Project, SavedVariant, SortDirection, ViewState};
use crate::options::families::{FamilyFilter, FamilySort};
use crate::options::projects::{ProjectFilter, ProjectSort};
use crate::options::variants::{VariantFilter, VariantSort};
use crate::options::{Filter, RelatedCollections, SortKey};
use crate::pipeline::memo::{ByRef, CollectionRef, Memo};
use crate::pipeline::stage1_filter::{Stage1Inputs, run_stage1};
use crate::pipeline::stage2_sort::run_stage2;
use crate::pipeline::stage3_paginate::{Page, run_stage3};
use crate::store::{Entity, EntityStore};

/// Joins searchable fields so a query cannot match across two of them.
pub const SEARCH_FIELD_SEPARATOR: &str = "\u{1f}";

/// An entity type that can back a table view.
pub trait ViewEntity: Entity {
    /// Optional props narrowing the candidate set, e.g. one project.
    type Scope: Clone + PartialEq;

    fn candidates(store: &EntityStore, scope: &Self::Scope) -> Vec<Arc<Self>>;
    fn search_text(&self, related: &RelatedCollections<'_>) -> String;
    /// Collections read while filtering, searching or sorting this type.
    fn dependencies(store: &EntityStore) -> Vec<CollectionRef>;
}

pub struct SelectorInputs<'a, E: ViewEntity, F, S> {
    pub store: &'a EntityStore,
    pub view: &'a ViewState<F, S>,
    pub scope: &'a E::Scope,
    pub viewer: Option<&'a str>,
}

impl<'a, E: ViewEntity, F, S> SelectorInputs<'a, E, F, S> {
    pub fn new(store: &'a EntityStore, view: &'a ViewState<F, S>, scope: &'a E::Scope) -> Self {
        Self {
            store,
            view,
            scope,
            viewer: None,
        }
    }

    pub fn with_viewer(mut self, viewer: Option<&'a str>) -> Self {
        self.viewer = viewer;
        self
    }
}

type List<E> = Vec<Arc<E>>;
type FilterStageKey<Sc, F> = (Vec<CollectionRef>, Sc, F, String, Option<String>);
type SortStageKey<E, S> = (ByRef<List<E>>, S, SortDirection);
type PageStageKey<E> = (ByRef<List<E>>, usize, usize);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectorStats {
    pub filter_runs: usize,
    pub sort_runs: usize,
    pub page_runs: usize,
}

/// Filter, sort and paginate stages, each memoized on the references it reads.
pub struct ViewSelector<E: ViewEntity, F, S> {
    filtered: Memo<FilterStageKey<E::Scope, F>, List<E>>,
    sorted: Memo<SortStageKey<E, S>, List<E>>,
    paged: Memo<PageStageKey<E>, Page<E>>,
}

impl<E: ViewEntity, F, S> Default for ViewSelector<E, F, S> {
    fn default() -> Self {
        Self {
            filtered: Memo::default(),
            sorted: Memo::default(),
            paged: Memo::default(),
        }
    }
}

impl<E, F, S> ViewSelector<E, F, S>
where
    E: ViewEntity,
    F: Filter<E> + Clone + PartialEq,
    S: SortKey<E> + Clone + PartialEq,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Entities passing scope, search and filter, in no particular order.
    pub fn filtered(&self, inputs: &SelectorInputs<'_, E, F, S>) -> Arc<List<E>> {
        let view = inputs.view;
        let key = (
            E::dependencies(inputs.store),
            inputs.scope.clone(),
            view.filter.clone(),
            view.search_text.clone(),
            inputs.viewer.map(str::to_string),
        );
        self.filtered.get_or_compute(key, || {
            let out = run_stage1::<E, F>(&Stage1Inputs {
                store: inputs.store,
                scope: inputs.scope,
                filter: &view.filter,
                search_text: &view.search_text,
                viewer: inputs.viewer,
            });
            tracing::debug!(
                kind = E::KIND.label(),
                filter = view.filter.value(),
                matched = out.len(),
                "filter stage recomputed"
            );
            out
        })
    }

    /// The full filtered list in display order.
    pub fn visible(&self, inputs: &SelectorInputs<'_, E, F, S>) -> Arc<List<E>> {
        let filtered = self.filtered(inputs);
        let view = inputs.view;
        let key = (
            ByRef::new(&filtered),
            view.sort_column.clone(),
            view.sort_direction,
        );
        self.sorted.get_or_compute(key, || {
            let related = RelatedCollections::with_viewer(inputs.store, inputs.viewer);
            let out = run_stage2(&filtered, &view.sort_column, view.sort_direction, &related);
            tracing::debug!(
                kind = E::KIND.label(),
                sort = view.sort_column.value(),
                n = out.len(),
                "sort stage recomputed"
            );
            out
        })
    }

    /// The current page of the display-ordered list.
    pub fn visible_page(&self, inputs: &SelectorInputs<'_, E, F, S>) -> Arc<Page<E>> {
        let sorted = self.visible(inputs);
        let view = inputs.view;
        let key = (
            ByRef::new(&sorted),
            view.current_page,
            view.records_per_page,
        );
        self.paged.get_or_compute(key, || {
            let page = run_stage3(&sorted, view.current_page, view.records_per_page);
            tracing::debug!(
                kind = E::KIND.label(),
                page = page.page,
                page_count = page.page_count,
                "page stage recomputed"
            );
            page
        })
    }

    pub fn stats(&self) -> SelectorStats {
        SelectorStats {
            filter_runs: self.filtered.recompute_count(),
            sort_runs: self.sorted.recompute_count(),
            page_runs: self.paged.recompute_count(),
        }
    }
}

pub type ProjectsView = ViewSelector<Project, ProjectFilter, ProjectSort>;
pub type FamiliesView = ViewSelector<Family, FamilyFilter, FamilySort>;
pub type SavedVariantsView = ViewSelector<SavedVariant, VariantFilter, VariantSort>;

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/selector.rs"]
mod tests;
