use std::sync::Arc;

use crate::model::SortDirection;
use crate::options::{RelatedCollections, SortKey, SortValue};
use crate::pipeline::selector::ViewEntity;

/// Direction multiplier after applying the column's inversion flag.
pub fn effective_multiplier(direction: SortDirection, inverted: bool) -> i8 {
    if inverted {
        -direction.multiplier()
    } else {
        direction.multiplier()
    }
}

/// Orders by `(key, guid)`; the multiplier applies to the whole tuple so a
/// flipped direction is the exact reverse.
pub fn run_stage2<E, S>(
    items: &[Arc<E>],
    sort: &S,
    direction: SortDirection,
    related: &RelatedCollections<'_>,
) -> Vec<Arc<E>>
where
    E: ViewEntity,
    S: SortKey<E>,
{
    let key_of = sort.key_getter(related);
    let multiplier = effective_multiplier(direction, sort.inverted());

    let mut keyed: Vec<(SortValue, &Arc<E>)> = items.iter().map(|e| (key_of(e), e)).collect();
    keyed.sort_by(|(ka, a), (kb, b)| {
        let ord = ka.cmp(kb).then_with(|| a.guid().cmp(b.guid()));
        if multiplier < 0 { ord.reverse() } else { ord }
    });

    keyed.into_iter().map(|(_, e)| Arc::clone(e)).collect()
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage2_sort.rs"]
mod tests;
