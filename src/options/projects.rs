use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::model::{Project, ProjectCategory};
use crate::options::{
    Filter, FilterDef, KeyGetter, Predicate, RelatedCollections, SortDef, SortKey, SortValue,
    find_sort_def, show_all,
};
use crate::pipeline::joins::percent_solved;
use crate::pipeline::memo::CollectionRef;
use crate::pipeline::selector::{SEARCH_FIELD_SEPARATOR, ViewEntity};
use crate::store::EntityStore;

pub const SHOW_ALL: &str = "ALL";

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ProjectFilter {
    #[default]
    All,
    /// Projects tagged with the category of this GUID.
    Category(String),
}

const PROJECT_FILTERS: &[FilterDef<ProjectFilter>] = &[FilterDef {
    filter: ProjectFilter::All,
    value: SHOW_ALL,
    name: "All",
    category: "",
}];

pub fn project_filter_defs() -> &'static [FilterDef<ProjectFilter>] {
    PROJECT_FILTERS
}

impl ProjectFilter {
    /// `ALL` or a project category GUID. Category GUIDs are checked against
    /// the store when the predicate is built.
    pub fn from_key(key: &str) -> Self {
        let key = key.trim();
        if key.is_empty() || key == SHOW_ALL {
            ProjectFilter::All
        } else {
            ProjectFilter::Category(key.to_string())
        }
    }
}

impl From<String> for ProjectFilter {
    fn from(key: String) -> Self {
        ProjectFilter::from_key(&key)
    }
}

impl From<ProjectFilter> for String {
    fn from(filter: ProjectFilter) -> Self {
        match filter {
            ProjectFilter::All => SHOW_ALL.to_string(),
            ProjectFilter::Category(guid) => guid,
        }
    }
}

impl Filter<Project> for ProjectFilter {
    fn value(&self) -> &str {
        match self {
            ProjectFilter::All => SHOW_ALL,
            ProjectFilter::Category(guid) => guid,
        }
    }

    fn name(&self) -> &str {
        match self {
            ProjectFilter::All => "All",
            ProjectFilter::Category(_) => "Category",
        }
    }

    fn predicate<'a>(&'a self, related: &RelatedCollections<'a>) -> Predicate<'a, Project> {
        match self {
            ProjectFilter::All => show_all(),
            ProjectFilter::Category(guid) => {
                if related.store.get::<ProjectCategory>(guid).is_none() {
                    tracing::warn!(category = %guid, "unknown project category filter; showing all");
                    return show_all();
                }
                Box::new(move |project: &Project| {
                    project.project_category_guids.iter().any(|g| g == guid)
                })
            }
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ProjectSort {
    #[default]
    ProjectName,
    DateCreated,
    DateLastAccessed,
    NumFamilies,
    NumIndividuals,
    NumVariantTags,
    PercentSolved,
    /// Identity fallback for unrecognized keys.
    Guid,
}

const PROJECT_SORTS: &[SortDef<ProjectSort>] = &[
    SortDef {
        sort: ProjectSort::ProjectName,
        value: "PROJECT_NAME",
        name: "Name",
        inverted: false,
    },
    SortDef {
        sort: ProjectSort::DateCreated,
        value: "DATE_CREATED",
        name: "Created Date",
        inverted: true,
    },
    SortDef {
        sort: ProjectSort::DateLastAccessed,
        value: "DATE_LAST_ACCESSED",
        name: "Last Accessed",
        inverted: true,
    },
    SortDef {
        sort: ProjectSort::NumFamilies,
        value: "NUM_FAMILIES",
        name: "Families",
        inverted: false,
    },
    SortDef {
        sort: ProjectSort::NumIndividuals,
        value: "NUM_INDIVIDUALS",
        name: "Individuals",
        inverted: false,
    },
    SortDef {
        sort: ProjectSort::NumVariantTags,
        value: "NUM_VARIANT_TAGS",
        name: "Tagged Variants",
        inverted: false,
    },
    SortDef {
        sort: ProjectSort::PercentSolved,
        value: "PERCENT_SOLVED",
        name: "% Solved",
        inverted: false,
    },
];

const GUID_SORT: SortDef<ProjectSort> = SortDef {
    sort: ProjectSort::Guid,
    value: "GUID",
    name: "GUID",
    inverted: false,
};

pub fn project_sort_defs() -> &'static [SortDef<ProjectSort>] {
    PROJECT_SORTS
}

impl ProjectSort {
    pub fn from_key(key: &str) -> Self {
        match find_sort_def(PROJECT_SORTS, key) {
            Some(def) => def.sort,
            None => {
                tracing::warn!(key, "unknown project sort; falling back to GUID order");
                ProjectSort::Guid
            }
        }
    }

    fn def(self) -> &'static SortDef<ProjectSort> {
        PROJECT_SORTS
            .iter()
            .find(|d| d.sort == self)
            .unwrap_or(&GUID_SORT)
    }
}

impl From<String> for ProjectSort {
    fn from(key: String) -> Self {
        ProjectSort::from_key(&key)
    }
}

impl From<ProjectSort> for String {
    fn from(sort: ProjectSort) -> Self {
        sort.def().value.to_string()
    }
}

impl SortKey<Project> for ProjectSort {
    fn value(&self) -> &str {
        self.def().value
    }

    fn name(&self) -> &str {
        self.def().name
    }

    fn inverted(&self) -> bool {
        self.def().inverted
    }

    fn key_getter<'a>(&'a self, _related: &RelatedCollections<'a>) -> KeyGetter<'a, Project> {
        match self {
            ProjectSort::ProjectName => Box::new(|p: &Project| SortValue::text(&p.name)),
            ProjectSort::DateCreated => {
                Box::new(|p: &Project| SortValue::date(Some(&p.created_date)))
            }
            ProjectSort::DateLastAccessed => {
                Box::new(|p: &Project| SortValue::date(p.last_accessed_date.as_deref()))
            }
            ProjectSort::NumFamilies => {
                Box::new(|p: &Project| SortValue::Number(p.num_families as f64))
            }
            ProjectSort::NumIndividuals => {
                Box::new(|p: &Project| SortValue::Number(p.num_individuals as f64))
            }
            ProjectSort::NumVariantTags => {
                Box::new(|p: &Project| SortValue::Number(p.num_variant_tags as f64))
            }
            ProjectSort::PercentSolved => Box::new(|p: &Project| SortValue::Number(percent_solved(p))),
            ProjectSort::Guid => Box::new(|p: &Project| SortValue::Text(p.project_guid.clone())),
        }
    }
}

impl ViewEntity for Project {
    type Scope = ();

    fn candidates(store: &EntityStore, _scope: &()) -> Vec<Arc<Self>> {
        store.values::<Project>().cloned().collect()
    }

    fn search_text(&self, related: &RelatedCollections<'_>) -> String {
        let mut parts = vec![self.name.as_str(), self.description.as_str()];
        for guid in &self.project_category_guids {
            if let Some(category) = related.store.get::<ProjectCategory>(guid) {
                parts.push(category.name.as_str());
            }
        }
        parts.join(SEARCH_FIELD_SEPARATOR)
    }

    fn dependencies(store: &EntityStore) -> Vec<CollectionRef> {
        vec![
            CollectionRef::of::<Project>(store),
            CollectionRef::of::<ProjectCategory>(store),
        ]
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/options/projects.rs"]
mod tests;
