use std::collections::BTreeMap;
use std::sync::Arc;

use crate::model::{
    AnalysisGroup, Family, Individual, Project, ProjectCategory, Sample, SavedVariant, VariantTag,
};

/// Entities of one type keyed by GUID.
pub type Collection<E> = BTreeMap<String, Arc<E>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Project,
    ProjectCategory,
    Family,
    Individual,
    Sample,
    SavedVariant,
    VariantTag,
    AnalysisGroup,
}

impl EntityKind {
    pub fn label(self) -> &'static str {
        match self {
            EntityKind::Project => "project",
            EntityKind::ProjectCategory => "project_category",
            EntityKind::Family => "family",
            EntityKind::Individual => "individual",
            EntityKind::Sample => "sample",
            EntityKind::SavedVariant => "saved_variant",
            EntityKind::VariantTag => "variant_tag",
            EntityKind::AnalysisGroup => "analysis_group",
        }
    }
}

pub trait Entity: Clone + Send + Sync + 'static {
    const KIND: EntityKind;

    fn guid(&self) -> &str;
    fn collection(store: &EntityStore) -> &Arc<Collection<Self>>;
    fn collection_mut(store: &mut EntityStore) -> &mut Arc<Collection<Self>>;
}

/// Normalized entity collections. Each collection sits behind its own `Arc`
/// and is swapped wholesale on update, so a changed pointer means changed data.
#[derive(Debug, Clone, Default)]
pub struct EntityStore {
    projects: Arc<Collection<Project>>,
    project_categories: Arc<Collection<ProjectCategory>>,
    families: Arc<Collection<Family>>,
    individuals: Arc<Collection<Individual>>,
    samples: Arc<Collection<Sample>>,
    saved_variants: Arc<Collection<SavedVariant>>,
    variant_tags: Arc<Collection<VariantTag>>,
    analysis_groups: Arc<Collection<AnalysisGroup>>,
}

/// A load event for one collection. `None` values delete the GUID.
#[derive(Debug, Clone)]
pub enum StoreUpdate {
    Projects(BTreeMap<String, Option<Project>>),
    ProjectCategories(BTreeMap<String, Option<ProjectCategory>>),
    Families(BTreeMap<String, Option<Family>>),
    Individuals(BTreeMap<String, Option<Individual>>),
    Samples(BTreeMap<String, Option<Sample>>),
    SavedVariants(BTreeMap<String, Option<SavedVariant>>),
    VariantTags(BTreeMap<String, Option<VariantTag>>),
    AnalysisGroups(BTreeMap<String, Option<AnalysisGroup>>),
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get<E: Entity>(&self, guid: &str) -> Option<&Arc<E>> {
        E::collection(self).get(guid)
    }

    pub fn values<E: Entity>(&self) -> impl Iterator<Item = &Arc<E>> {
        E::collection(self).values()
    }

    pub fn collection<E: Entity>(&self) -> &Arc<Collection<E>> {
        E::collection(self)
    }

    pub fn len<E: Entity>(&self) -> usize {
        E::collection(self).len()
    }

    /// Replace-by-id merge. Always installs a new collection.
    pub fn merge<E: Entity>(&mut self, updates: BTreeMap<String, Option<E>>) {
        if updates.is_empty() {
            return;
        }
        let slot = E::collection_mut(self);
        let mut next: Collection<E> = (**slot).clone();
        let mut replaced = 0usize;
        let mut removed = 0usize;
        for (guid, entity) in updates {
            match entity {
                Some(entity) => {
                    if next.insert(guid, Arc::new(entity)).is_some() {
                        replaced += 1;
                    }
                }
                None => {
                    if next.remove(&guid).is_some() {
                        removed += 1;
                    }
                }
            }
        }
        tracing::debug!(
            kind = E::KIND.label(),
            total = next.len(),
            replaced,
            removed,
            "merged collection"
        );
        *slot = Arc::new(next);
    }

    /// Inserts every entity under its own GUID.
    pub fn insert_all<E: Entity>(&mut self, entities: impl IntoIterator<Item = E>) {
        let updates = entities
            .into_iter()
            .map(|e| (e.guid().to_string(), Some(e)))
            .collect::<BTreeMap<_, _>>();
        self.merge(updates);
    }

    pub fn apply(&mut self, update: StoreUpdate) {
        match update {
            StoreUpdate::Projects(u) => self.merge(u),
            StoreUpdate::ProjectCategories(u) => self.merge(u),
            StoreUpdate::Families(u) => self.merge(u),
            StoreUpdate::Individuals(u) => self.merge(u),
            StoreUpdate::Samples(u) => self.merge(u),
            StoreUpdate::SavedVariants(u) => self.merge(u),
            StoreUpdate::VariantTags(u) => self.merge(u),
            StoreUpdate::AnalysisGroups(u) => self.merge(u),
        }
    }
}

macro_rules! impl_entity {
    ($ty:ty, $kind:ident, $field:ident, $guid:ident) => {
        impl Entity for $ty {
            const KIND: EntityKind = EntityKind::$kind;

            fn guid(&self) -> &str {
                &self.$guid
            }

            fn collection(store: &EntityStore) -> &Arc<Collection<Self>> {
                &store.$field
            }

            fn collection_mut(store: &mut EntityStore) -> &mut Arc<Collection<Self>> {
                &mut store.$field
            }
        }
    };
}

impl_entity!(Project, Project, projects, project_guid);
impl_entity!(
    ProjectCategory,
    ProjectCategory,
    project_categories,
    project_category_guid
);
impl_entity!(Family, Family, families, family_guid);
impl_entity!(Individual, Individual, individuals, individual_guid);
impl_entity!(Sample, Sample, samples, sample_guid);
impl_entity!(SavedVariant, SavedVariant, saved_variants, variant_guid);
impl_entity!(VariantTag, VariantTag, variant_tags, tag_guid);
impl_entity!(AnalysisGroup, AnalysisGroup, analysis_groups, analysis_group_guid);

#[cfg(test)]
#[path = "../../tests/src_inline/store/tests.rs"]
mod tests;
