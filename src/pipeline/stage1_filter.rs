use std::sync::Arc;

use crate::options::{Filter, RelatedCollections};
use crate::pipeline::selector::ViewEntity;
use crate::store::EntityStore;

pub struct Stage1Inputs<'a, E: ViewEntity, F> {
    pub store: &'a EntityStore,
    pub scope: &'a E::Scope,
    pub filter: &'a F,
    pub search_text: &'a str,
    pub viewer: Option<&'a str>,
}

/// Scope candidates, narrowed by the search text, then by the filter.
pub fn run_stage1<E, F>(inputs: &Stage1Inputs<'_, E, F>) -> Vec<Arc<E>>
where
    E: ViewEntity,
    F: Filter<E>,
{
    let related = RelatedCollections::with_viewer(inputs.store, inputs.viewer);
    let candidates = E::candidates(inputs.store, inputs.scope);
    let searched = apply_search(candidates, inputs.search_text, &related);
    let predicate = inputs.filter.predicate(&related);
    searched.into_iter().filter(|e| predicate(e)).collect()
}

pub fn apply_search<E: ViewEntity>(
    candidates: Vec<Arc<E>>,
    search_text: &str,
    related: &RelatedCollections<'_>,
) -> Vec<Arc<E>> {
    let needle = search_text.trim().to_lowercase();
    if needle.is_empty() {
        return candidates;
    }
    candidates
        .into_iter()
        .filter(|e| e.search_text(related).to_lowercase().contains(&needle))
        .collect()
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage1_filter.rs"]
mod tests;
