//! Secondary views joining one collection against another by foreign key.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;

use crate::model::statuses::{analysis_status_order, case_review_status_order};
use crate::model::{
    AnalysisStatus, Family, Individual, Project, Sample, SavedVariant, VariantTag,
};
use crate::pipeline::memo::{CollectionRef, Memo};
use crate::store::EntityStore;

pub type JoinMap<E> = BTreeMap<String, Vec<Arc<E>>>;

/// Buckets `values` under every parent key they reference. A child listing
/// the same parent twice lands in that bucket once.
pub fn join_by_foreign_key<'a, E, I, K>(values: I, parent_keys: K) -> JoinMap<E>
where
    E: 'a,
    I: IntoIterator<Item = &'a Arc<E>>,
    K: Fn(&E) -> Vec<String>,
{
    let mut out: JoinMap<E> = BTreeMap::new();
    for value in values {
        let mut keys = parent_keys(value);
        keys.sort();
        keys.dedup();
        for key in keys {
            out.entry(key).or_default().push(Arc::clone(value));
        }
    }
    out
}

pub fn individuals_by_family(store: &EntityStore) -> JoinMap<Individual> {
    join_by_foreign_key(store.values::<Individual>(), |i: &Individual| {
        vec![i.family_guid.clone()]
    })
}

pub fn samples_by_individual(store: &EntityStore) -> JoinMap<Sample> {
    join_by_foreign_key(store.values::<Sample>(), |s: &Sample| {
        vec![s.individual_guid.clone()]
    })
}

pub fn families_by_project(store: &EntityStore) -> JoinMap<Family> {
    join_by_foreign_key(store.values::<Family>(), |f: &Family| {
        vec![f.project_guid.clone()]
    })
}

pub fn variants_by_family(store: &EntityStore) -> JoinMap<SavedVariant> {
    join_by_foreign_key(store.values::<SavedVariant>(), |v: &SavedVariant| {
        v.family_guids.clone()
    })
}

/// Variants carrying at least one resolvable tag, by family, in genomic order.
pub fn tagged_variants_by_family(store: &EntityStore) -> JoinMap<SavedVariant> {
    let tagged = store
        .values::<SavedVariant>()
        .filter(|v| {
            v.tag_guids
                .iter()
                .any(|guid| store.get::<VariantTag>(guid).is_some())
        })
        .collect::<Vec<_>>();
    let mut out = join_by_foreign_key(tagged, |v: &SavedVariant| v.family_guids.clone());
    for variants in out.values_mut() {
        variants.sort_by(|a, b| {
            a.xpos
                .cmp(&b.xpos)
                .then_with(|| a.variant_guid.cmp(&b.variant_guid))
        });
    }
    out
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusCount {
    pub value: &'static str,
    pub name: &'static str,
    pub color: &'static str,
    pub count: usize,
}

/// One entry per registered case-review status, zero-filled.
pub fn case_review_status_counts<'a>(
    individuals: impl IntoIterator<Item = &'a Arc<Individual>>,
) -> Vec<StatusCount> {
    let mut counts: BTreeMap<_, usize> = BTreeMap::new();
    for individual in individuals {
        *counts.entry(individual.case_review_status).or_default() += 1;
    }
    case_review_status_order()
        .iter()
        .map(|status| StatusCount {
            value: status.code(),
            name: status.name(),
            color: status.color(),
            count: counts.get(status).copied().unwrap_or(0),
        })
        .collect()
}

/// One entry per registered analysis status, zero-filled.
pub fn analysis_status_counts<'a>(
    families: impl IntoIterator<Item = &'a Arc<Family>>,
) -> Vec<StatusCount> {
    let mut counts: BTreeMap<_, usize> = BTreeMap::new();
    for family in families {
        *counts.entry(family.analysis_status).or_default() += 1;
    }
    analysis_status_order()
        .iter()
        .map(|status| StatusCount {
            value: status.code(),
            name: status.name(),
            color: status.color(),
            count: counts.get(status).copied().unwrap_or(0),
        })
        .collect()
}

/// Case-review counts for every project in the store. Individuals whose
/// family (or the family's project) does not resolve are skipped.
pub fn case_review_status_counts_by_project(
    store: &EntityStore,
) -> BTreeMap<String, Vec<StatusCount>> {
    let mut by_project: JoinMap<Individual> = store
        .values::<Project>()
        .map(|p| (p.project_guid.clone(), Vec::new()))
        .collect();
    for individual in store.values::<Individual>() {
        let Some(family) = store.get::<Family>(&individual.family_guid) else {
            tracing::debug!(
                individual = %individual.individual_guid,
                family = %individual.family_guid,
                "individual references unknown family; skipped in counts"
            );
            continue;
        };
        match by_project.get_mut(&family.project_guid) {
            Some(bucket) => bucket.push(Arc::clone(individual)),
            None => tracing::debug!(
                family = %family.family_guid,
                project = %family.project_guid,
                "family references unknown project; skipped in counts"
            ),
        }
    }
    by_project
        .into_iter()
        .map(|(guid, individuals)| (guid, case_review_status_counts(&individuals)))
        .collect()
}

/// Analysis-status counts for every project in the store.
pub fn analysis_status_counts_by_project(
    store: &EntityStore,
) -> BTreeMap<String, Vec<StatusCount>> {
    let mut by_project: JoinMap<Family> = store
        .values::<Project>()
        .map(|p| (p.project_guid.clone(), Vec::new()))
        .collect();
    for family in store.values::<Family>() {
        match by_project.get_mut(&family.project_guid) {
            Some(bucket) => bucket.push(Arc::clone(family)),
            None => tracing::debug!(
                family = %family.family_guid,
                project = %family.project_guid,
                "family references unknown project; skipped in counts"
            ),
        }
    }
    by_project
        .into_iter()
        .map(|(guid, families)| (guid, analysis_status_counts(&families)))
        .collect()
}

/// Share of solved families in percent, from the project's server-side
/// status summary. Zero when the project has no families.
pub fn percent_solved(project: &Project) -> f64 {
    if project.num_families == 0 {
        return 0.0;
    }
    let solved: u32 = project
        .analysis_status_counts
        .iter()
        .filter(|(code, _)| AnalysisStatus::from_code(code).is_some_and(AnalysisStatus::is_solved))
        .map(|(_, n)| *n)
        .sum();
    100.0 * solved as f64 / project.num_families as f64
}

pub fn family_display_name(store: &EntityStore, family_guid: &str) -> String {
    store
        .get::<Family>(family_guid)
        .map(|f| f.display().to_string())
        .unwrap_or_else(|| family_guid.to_string())
}

pub fn project_name(store: &EntityStore, project_guid: &str) -> String {
    store
        .get::<Project>(project_guid)
        .map(|p| p.name.clone())
        .unwrap_or_else(|| project_guid.to_string())
}

pub fn tag_name(store: &EntityStore, tag_guid: &str) -> String {
    store
        .get::<VariantTag>(tag_guid)
        .map(|t| t.name.clone())
        .unwrap_or_else(|| tag_guid.to_string())
}

type Refs2 = (CollectionRef, CollectionRef);
type Refs3 = (CollectionRef, CollectionRef, CollectionRef);

/// Memoized join selectors; each recomputes only when a collection it reads
/// has been replaced.
#[derive(Default)]
pub struct MemoizedJoins {
    individuals_by_family: Memo<CollectionRef, JoinMap<Individual>>,
    variants_by_family: Memo<CollectionRef, JoinMap<SavedVariant>>,
    tagged_variants_by_family: Memo<Refs2, JoinMap<SavedVariant>>,
    case_review_counts: Memo<Refs3, BTreeMap<String, Vec<StatusCount>>>,
    analysis_counts: Memo<Refs2, BTreeMap<String, Vec<StatusCount>>>,
}

impl MemoizedJoins {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn individuals_by_family(&self, store: &EntityStore) -> Arc<JoinMap<Individual>> {
        self.individuals_by_family
            .get_or_compute(CollectionRef::of::<Individual>(store), || {
                individuals_by_family(store)
            })
    }

    pub fn variants_by_family(&self, store: &EntityStore) -> Arc<JoinMap<SavedVariant>> {
        self.variants_by_family
            .get_or_compute(CollectionRef::of::<SavedVariant>(store), || {
                variants_by_family(store)
            })
    }

    pub fn tagged_variants_by_family(&self, store: &EntityStore) -> Arc<JoinMap<SavedVariant>> {
        let key = (
            CollectionRef::of::<SavedVariant>(store),
            CollectionRef::of::<VariantTag>(store),
        );
        self.tagged_variants_by_family
            .get_or_compute(key, || tagged_variants_by_family(store))
    }

    pub fn case_review_status_counts_by_project(
        &self,
        store: &EntityStore,
    ) -> Arc<BTreeMap<String, Vec<StatusCount>>> {
        let key = (
            CollectionRef::of::<Project>(store),
            CollectionRef::of::<Family>(store),
            CollectionRef::of::<Individual>(store),
        );
        self.case_review_counts
            .get_or_compute(key, || case_review_status_counts_by_project(store))
    }

    pub fn analysis_status_counts_by_project(
        &self,
        store: &EntityStore,
    ) -> Arc<BTreeMap<String, Vec<StatusCount>>> {
        let key = (
            CollectionRef::of::<Project>(store),
            CollectionRef::of::<Family>(store),
        );
        self.analysis_counts
            .get_or_compute(key, || analysis_status_counts_by_project(store))
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/joins.rs"]
mod tests;
