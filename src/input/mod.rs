use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use flate2::read::MultiGzDecoder;
use serde::Deserialize;

use crate::error::InputError;
use crate::model::entities::null_as_default;
use crate::model::{
    AnalysisGroup, Family, Individual, Project, ProjectCategory, Sample, SavedVariant, VariantTag,
};
use crate::store::{Entity, EntityStore, StoreUpdate};

pub mod view_state;

/// Server payload holding every collection keyed by GUID.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StoreSnapshot {
    #[serde(deserialize_with = "null_as_default")]
    pub projects_by_guid: BTreeMap<String, Project>,
    #[serde(deserialize_with = "null_as_default")]
    pub project_categories_by_guid: BTreeMap<String, ProjectCategory>,
    #[serde(deserialize_with = "null_as_default")]
    pub families_by_guid: BTreeMap<String, Family>,
    #[serde(deserialize_with = "null_as_default")]
    pub individuals_by_guid: BTreeMap<String, Individual>,
    #[serde(deserialize_with = "null_as_default")]
    pub samples_by_guid: BTreeMap<String, Sample>,
    #[serde(deserialize_with = "null_as_default")]
    pub saved_variants_by_guid: BTreeMap<String, SavedVariant>,
    #[serde(deserialize_with = "null_as_default")]
    pub variant_tags_by_guid: BTreeMap<String, VariantTag>,
    #[serde(deserialize_with = "null_as_default")]
    pub analysis_groups_by_guid: BTreeMap<String, AnalysisGroup>,
}

fn as_merge<E>(entities: BTreeMap<String, E>) -> BTreeMap<String, Option<E>> {
    entities.into_iter().map(|(k, v)| (k, Some(v))).collect()
}

fn check_keys<E: Entity>(entities: &BTreeMap<String, E>) -> Result<(), InputError> {
    match entities.iter().find(|(key, e)| e.guid() != key.as_str()) {
        Some((key, e)) => Err(InputError::InvalidInput(format!(
            "{} keyed as {key} carries guid {:?}",
            E::KIND.label(),
            e.guid()
        ))),
        None => Ok(()),
    }
}

impl StoreSnapshot {
    /// Every entry must be keyed by its own GUID.
    pub fn validate(&self) -> Result<(), InputError> {
        check_keys(&self.projects_by_guid)?;
        check_keys(&self.project_categories_by_guid)?;
        check_keys(&self.families_by_guid)?;
        check_keys(&self.individuals_by_guid)?;
        check_keys(&self.samples_by_guid)?;
        check_keys(&self.saved_variants_by_guid)?;
        check_keys(&self.variant_tags_by_guid)?;
        check_keys(&self.analysis_groups_by_guid)?;
        Ok(())
    }

    /// One update per collection, in the order the server sends them.
    pub fn into_updates(self) -> Vec<StoreUpdate> {
        vec![
            StoreUpdate::Projects(as_merge(self.projects_by_guid)),
            StoreUpdate::ProjectCategories(as_merge(self.project_categories_by_guid)),
            StoreUpdate::Families(as_merge(self.families_by_guid)),
            StoreUpdate::Individuals(as_merge(self.individuals_by_guid)),
            StoreUpdate::Samples(as_merge(self.samples_by_guid)),
            StoreUpdate::SavedVariants(as_merge(self.saved_variants_by_guid)),
            StoreUpdate::VariantTags(as_merge(self.variant_tags_by_guid)),
            StoreUpdate::AnalysisGroups(as_merge(self.analysis_groups_by_guid)),
        ]
    }
}

pub fn open_maybe_gz(path: &Path) -> Result<Box<dyn BufRead>, InputError> {
    let file = File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => InputError::MissingInput(path.display().to_string()),
        _ => InputError::Io(e),
    })?;
    if path.extension().is_some_and(|ext| ext == "gz") {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

pub fn parse_store(reader: impl Read) -> Result<EntityStore, InputError> {
    let snapshot: StoreSnapshot = serde_json::from_reader(reader)?;
    snapshot.validate()?;
    let mut store = EntityStore::new();
    for update in snapshot.into_updates() {
        store.apply(update);
    }
    Ok(store)
}

pub fn load_store(path: &Path) -> Result<EntityStore, InputError> {
    let reader = open_maybe_gz(path)?;
    let store = parse_store(reader)?;
    tracing::info!(
        path = %path.display(),
        projects = store.len::<Project>(),
        families = store.len::<Family>(),
        individuals = store.len::<Individual>(),
        saved_variants = store.len::<SavedVariant>(),
        "loaded store snapshot"
    );
    Ok(store)
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/tests.rs"]
mod tests;
