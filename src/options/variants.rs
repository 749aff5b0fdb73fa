use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::model::{Family, SavedVariant, VariantTag};
use crate::options::{
    Filter, FilterDef, KeyGetter, Predicate, RelatedCollections, SortDef, SortKey, SortValue,
    find_sort_def, show_all,
};
use crate::pipeline::joins::family_display_name;
use crate::pipeline::memo::CollectionRef;
use crate::pipeline::selector::{SEARCH_FIELD_SEPARATOR, ViewEntity};
use crate::store::EntityStore;

const TAG_PREFIX: &str = "TAG:";
const CATEGORY_PREFIX: &str = "CATEGORY:";

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum VariantFilter {
    #[default]
    All,
    Tagged,
    TagName(String),
    TagCategory(String),
}

const VARIANT_FILTERS: &[FilterDef<VariantFilter>] = &[
    FilterDef {
        filter: VariantFilter::All,
        value: "ALL",
        name: "All",
        category: "",
    },
    FilterDef {
        filter: VariantFilter::Tagged,
        value: "TAGGED",
        name: "Tagged",
        category: "",
    },
];

pub fn variant_filter_defs() -> &'static [FilterDef<VariantFilter>] {
    VARIANT_FILTERS
}

impl VariantFilter {
    /// `ALL`, `TAGGED`, `TAG:<tag name>` or `CATEGORY:<tag category>`.
    pub fn from_key(key: &str) -> Self {
        let key = key.trim();
        if let Some(name) = key.strip_prefix(TAG_PREFIX).filter(|n| !n.is_empty()) {
            return VariantFilter::TagName(name.to_string());
        }
        if let Some(category) = key.strip_prefix(CATEGORY_PREFIX).filter(|c| !c.is_empty()) {
            return VariantFilter::TagCategory(category.to_string());
        }
        match VARIANT_FILTERS.iter().find(|d| d.value == key) {
            Some(def) => def.filter.clone(),
            None => {
                tracing::warn!(key, "unknown variant filter; showing all");
                VariantFilter::All
            }
        }
    }

    pub fn key(&self) -> String {
        match self {
            VariantFilter::All => "ALL".to_string(),
            VariantFilter::Tagged => "TAGGED".to_string(),
            VariantFilter::TagName(name) => format!("{TAG_PREFIX}{name}"),
            VariantFilter::TagCategory(category) => format!("{CATEGORY_PREFIX}{category}"),
        }
    }
}

impl From<String> for VariantFilter {
    fn from(key: String) -> Self {
        VariantFilter::from_key(&key)
    }
}

impl From<VariantFilter> for String {
    fn from(filter: VariantFilter) -> Self {
        filter.key()
    }
}

fn tags_of<'s>(store: &'s EntityStore, variant: &SavedVariant) -> Vec<&'s Arc<VariantTag>> {
    variant
        .tag_guids
        .iter()
        .filter_map(|guid| store.get::<VariantTag>(guid))
        .collect()
}

impl Filter<SavedVariant> for VariantFilter {
    fn value(&self) -> &str {
        match self {
            VariantFilter::All => "ALL",
            VariantFilter::Tagged => "TAGGED",
            VariantFilter::TagName(name) => name,
            VariantFilter::TagCategory(category) => category,
        }
    }

    fn name(&self) -> &str {
        match self {
            VariantFilter::All => "All",
            VariantFilter::Tagged => "Tagged",
            VariantFilter::TagName(name) => name,
            VariantFilter::TagCategory(category) => category,
        }
    }

    fn predicate<'a>(&'a self, related: &RelatedCollections<'a>) -> Predicate<'a, SavedVariant> {
        let store = related.store;
        match self {
            VariantFilter::All => show_all(),
            VariantFilter::Tagged => {
                Box::new(move |v: &SavedVariant| !tags_of(store, v).is_empty())
            }
            VariantFilter::TagName(name) => {
                if !store.values::<VariantTag>().any(|t| t.name == *name) {
                    tracing::warn!(tag = %name, "unknown tag name filter; showing all");
                    return show_all();
                }
                Box::new(move |v: &SavedVariant| tags_of(store, v).iter().any(|t| t.name == *name))
            }
            VariantFilter::TagCategory(category) => {
                if !store.values::<VariantTag>().any(|t| t.category == *category) {
                    tracing::warn!(category = %category, "unknown tag category filter; showing all");
                    return show_all();
                }
                Box::new(move |v: &SavedVariant| {
                    tags_of(store, v).iter().any(|t| t.category == *category)
                })
            }
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum VariantSort {
    #[default]
    Family,
    Position,
    TagName,
    LastModified,
    Guid,
}

const VARIANT_SORTS: &[SortDef<VariantSort>] = &[
    SortDef {
        sort: VariantSort::Family,
        value: "FAMILY",
        name: "Family",
        inverted: false,
    },
    SortDef {
        sort: VariantSort::Position,
        value: "POSITION",
        name: "Position",
        inverted: false,
    },
    SortDef {
        sort: VariantSort::TagName,
        value: "TAG_NAME",
        name: "Tag",
        inverted: false,
    },
    SortDef {
        sort: VariantSort::LastModified,
        value: "LAST_MODIFIED",
        name: "Last Tagged",
        inverted: false,
    },
];

const GUID_SORT: SortDef<VariantSort> = SortDef {
    sort: VariantSort::Guid,
    value: "GUID",
    name: "GUID",
    inverted: false,
};

pub fn variant_sort_defs() -> &'static [SortDef<VariantSort>] {
    VARIANT_SORTS
}

impl VariantSort {
    pub fn from_key(key: &str) -> Self {
        match find_sort_def(VARIANT_SORTS, key) {
            Some(def) => def.sort,
            None => {
                tracing::warn!(key, "unknown variant sort; falling back to GUID order");
                VariantSort::Guid
            }
        }
    }

    fn def(self) -> &'static SortDef<VariantSort> {
        VARIANT_SORTS
            .iter()
            .find(|d| d.sort == self)
            .unwrap_or(&GUID_SORT)
    }
}

impl From<String> for VariantSort {
    fn from(key: String) -> Self {
        VariantSort::from_key(&key)
    }
}

impl From<VariantSort> for String {
    fn from(sort: VariantSort) -> Self {
        sort.def().value.to_string()
    }
}

impl SortKey<SavedVariant> for VariantSort {
    fn value(&self) -> &str {
        self.def().value
    }

    fn name(&self) -> &str {
        self.def().name
    }

    fn inverted(&self) -> bool {
        self.def().inverted
    }

    fn key_getter<'a>(&'a self, related: &RelatedCollections<'a>) -> KeyGetter<'a, SavedVariant> {
        let store = related.store;
        match self {
            VariantSort::Family => Box::new(move |v: &SavedVariant| {
                let name = v
                    .family_guids
                    .first()
                    .map(|guid| family_display_name(store, guid))
                    .unwrap_or_default();
                SortValue::text(&name)
            }),
            VariantSort::Position => Box::new(|v: &SavedVariant| SortValue::Number(v.xpos as f64)),
            VariantSort::TagName => Box::new(move |v: &SavedVariant| {
                let tags = tags_of(store, v);
                SortValue::text(tags.first().map(|t| t.name.as_str()).unwrap_or_default())
            }),
            VariantSort::LastModified => Box::new(move |v: &SavedVariant| {
                let tags = tags_of(store, v);
                let latest = tags
                    .iter()
                    .filter_map(|t| t.last_modified_date.as_deref())
                    .max();
                SortValue::date(latest)
            }),
            VariantSort::Guid => Box::new(|v: &SavedVariant| SortValue::Text(v.variant_guid.clone())),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct VariantScope {
    pub project_guid: Option<String>,
    pub family_guid: Option<String>,
}

impl ViewEntity for SavedVariant {
    type Scope = VariantScope;

    fn candidates(store: &EntityStore, scope: &VariantScope) -> Vec<Arc<Self>> {
        store
            .values::<SavedVariant>()
            .filter(|v| {
                scope
                    .family_guid
                    .as_ref()
                    .is_none_or(|guid| v.family_guids.contains(guid))
            })
            .filter(|v| {
                scope.project_guid.as_ref().is_none_or(|project| {
                    v.family_guids.iter().any(|guid| {
                        store
                            .get::<Family>(guid)
                            .is_some_and(|f| f.project_guid == *project)
                    })
                })
            })
            .cloned()
            .collect()
    }

    fn search_text(&self, related: &RelatedCollections<'_>) -> String {
        let mut parts = vec![format!(
            "{}-{}-{}-{}",
            self.chrom, self.pos, self.reference, self.alt
        )];
        parts.extend(self.transcripts.keys().cloned());
        for tag in tags_of(related.store, self) {
            parts.push(tag.name.clone());
        }
        for guid in &self.family_guids {
            parts.push(family_display_name(related.store, guid));
        }
        parts.join(SEARCH_FIELD_SEPARATOR)
    }

    fn dependencies(store: &EntityStore) -> Vec<CollectionRef> {
        vec![
            CollectionRef::of::<SavedVariant>(store),
            CollectionRef::of::<VariantTag>(store),
            CollectionRef::of::<Family>(store),
        ]
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/options/variants.rs"]
mod tests;
