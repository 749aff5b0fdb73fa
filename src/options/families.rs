use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::model::{AnalysisGroup, CaseReviewStatus, Family, Individual, Sample};
use crate::options::{
    Filter, FilterDef, KeyGetter, Predicate, RelatedCollections, SortDef, SortKey, SortValue,
    find_filter_def, find_sort_def, show_all,
};
use crate::pipeline::memo::CollectionRef;
use crate::pipeline::selector::{SEARCH_FIELD_SEPARATOR, ViewEntity};
use crate::store::EntityStore;

const CASE_REVIEW: &str = "Case Review Status";
const DATA_STATUS: &str = "Data Status";
const ANALYSED_BY: &str = "Analysed By";
const ANALYSIS_STATUS: &str = "Analysis Status";
const ASSIGNED_TO: &str = "Assigned To";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FamilyFilter {
    #[default]
    All,
    InReview,
    Uncertain,
    Accepted,
    NotAccepted,
    MoreInfoNeeded,
    PendingResultsAndRecords,
    Waitlist,
    DataLoaded,
    NoDataLoaded,
    PhenotypesEntered,
    NoPhenotypesEntered,
    Analysed,
    NotAnalysed,
    Solved,
    StrongCandidate,
    ReviewedNoClearCandidate,
    AnalysisInProgress,
    AssignedToMe,
    AssignedToAnyone,
}

macro_rules! filter_def {
    ($variant:ident, $value:expr, $name:expr, $category:expr) => {
        FilterDef {
            filter: FamilyFilter::$variant,
            value: $value,
            name: $name,
            category: $category,
        }
    };
}

const FAMILY_FILTERS: &[FilterDef<FamilyFilter>] = &[
    filter_def!(All, "ALL", "All", ""),
    filter_def!(InReview, "IN_REVIEW", "In Review", CASE_REVIEW),
    filter_def!(Uncertain, "UNCERTAIN", "Uncertain", CASE_REVIEW),
    filter_def!(Accepted, "ACCEPTED", "Accepted", CASE_REVIEW),
    filter_def!(NotAccepted, "NOT_ACCEPTED", "Not Accepted", CASE_REVIEW),
    filter_def!(MoreInfoNeeded, "MORE_INFO_NEEDED", "More Info Needed", CASE_REVIEW),
    filter_def!(
        PendingResultsAndRecords,
        "PENDING_RESULTS_AND_RECORDS",
        "Pending Results and Records",
        CASE_REVIEW
    ),
    filter_def!(Waitlist, "WAITLIST", "Waitlist", CASE_REVIEW),
    filter_def!(DataLoaded, "DATA_LOADED", "Data Loaded", DATA_STATUS),
    filter_def!(NoDataLoaded, "NO_DATA_LOADED", "No Data Loaded", DATA_STATUS),
    filter_def!(
        PhenotypesEntered,
        "PHENOTYPES_ENTERED",
        "Phenotypes Entered",
        DATA_STATUS
    ),
    filter_def!(
        NoPhenotypesEntered,
        "NO_PHENOTYPES_ENTERED",
        "No Phenotypes Entered",
        DATA_STATUS
    ),
    filter_def!(Analysed, "ANALYSED", "Analysed", ANALYSED_BY),
    filter_def!(NotAnalysed, "NOT_ANALYSED", "Not Analysed", ANALYSED_BY),
    filter_def!(Solved, "SOLVED", "Solved", ANALYSIS_STATUS),
    filter_def!(
        StrongCandidate,
        "STRONG_CANDIDATE",
        "Strong Candidate",
        ANALYSIS_STATUS
    ),
    filter_def!(
        ReviewedNoClearCandidate,
        "REVIEWED_NO_CLEAR_CANDIDATE",
        "No Clear Candidate",
        ANALYSIS_STATUS
    ),
    filter_def!(
        AnalysisInProgress,
        "ANALYSIS_IN_PROGRESS",
        "Analysis In Progress",
        ANALYSIS_STATUS
    ),
    filter_def!(AssignedToMe, "ASSIGNED_TO_ME", "Assigned To Me", ASSIGNED_TO),
    filter_def!(
        AssignedToAnyone,
        "ASSIGNED_TO_ANYONE",
        "Assigned To Anyone",
        ASSIGNED_TO
    ),
];

pub fn family_filter_defs() -> &'static [FilterDef<FamilyFilter>] {
    FAMILY_FILTERS
}

impl FamilyFilter {
    pub fn from_key(key: &str) -> Self {
        match find_filter_def(FAMILY_FILTERS, key) {
            Some(def) => def.filter,
            None => {
                tracing::warn!(key, "unknown family filter; showing all");
                FamilyFilter::All
            }
        }
    }

    fn def(self) -> &'static FilterDef<FamilyFilter> {
        FAMILY_FILTERS
            .iter()
            .find(|d| d.filter == self)
            .unwrap_or(&FAMILY_FILTERS[0])
    }

    pub fn case_review_status(self) -> Option<CaseReviewStatus> {
        match self {
            FamilyFilter::InReview => Some(CaseReviewStatus::InReview),
            FamilyFilter::Uncertain => Some(CaseReviewStatus::Uncertain),
            FamilyFilter::Accepted => Some(CaseReviewStatus::Accepted),
            FamilyFilter::NotAccepted => Some(CaseReviewStatus::NotAccepted),
            FamilyFilter::MoreInfoNeeded => Some(CaseReviewStatus::MoreInfoNeeded),
            FamilyFilter::PendingResultsAndRecords => {
                Some(CaseReviewStatus::PendingResultsAndRecords)
            }
            FamilyFilter::Waitlist => Some(CaseReviewStatus::Waitlist),
            _ => None,
        }
    }
}

impl From<String> for FamilyFilter {
    fn from(key: String) -> Self {
        FamilyFilter::from_key(&key)
    }
}

impl From<FamilyFilter> for String {
    fn from(filter: FamilyFilter) -> Self {
        filter.def().value.to_string()
    }
}

/// Individuals of a family that resolve in the store; dangling GUIDs are skipped.
pub fn individuals_of<'s>(store: &'s EntityStore, family: &Family) -> Vec<&'s Arc<Individual>> {
    family
        .individual_guids
        .iter()
        .filter_map(|guid| store.get::<Individual>(guid))
        .collect()
}

fn has_loaded_data(store: &EntityStore, individual: &Individual) -> bool {
    individual
        .sample_guids
        .iter()
        .filter_map(|guid| store.get::<Sample>(guid))
        .any(|s| s.is_active && s.loaded_date.is_some())
}

fn has_phenotypes(individual: &Individual) -> bool {
    !individual.features.is_empty()
}

impl Filter<Family> for FamilyFilter {
    fn value(&self) -> &str {
        self.def().value
    }

    fn name(&self) -> &str {
        self.def().name
    }

    fn predicate<'a>(&'a self, related: &RelatedCollections<'a>) -> Predicate<'a, Family> {
        let store = related.store;
        if let Some(status) = self.case_review_status() {
            return Box::new(move |family: &Family| {
                individuals_of(store, family)
                    .iter()
                    .any(|i| i.case_review_status == status)
            });
        }
        match self {
            FamilyFilter::DataLoaded => Box::new(move |family: &Family| {
                individuals_of(store, family)
                    .iter()
                    .any(|i| has_loaded_data(store, i))
            }),
            FamilyFilter::NoDataLoaded => Box::new(move |family: &Family| {
                !individuals_of(store, family)
                    .iter()
                    .any(|i| has_loaded_data(store, i))
            }),
            FamilyFilter::PhenotypesEntered => Box::new(move |family: &Family| {
                individuals_of(store, family)
                    .iter()
                    .any(|i| has_phenotypes(i))
            }),
            FamilyFilter::NoPhenotypesEntered => Box::new(move |family: &Family| {
                !individuals_of(store, family)
                    .iter()
                    .any(|i| has_phenotypes(i))
            }),
            FamilyFilter::Analysed => Box::new(|family: &Family| !family.analysed_by.is_empty()),
            FamilyFilter::NotAnalysed => Box::new(|family: &Family| family.analysed_by.is_empty()),
            FamilyFilter::Solved => Box::new(|family: &Family| family.analysis_status.is_solved()),
            FamilyFilter::StrongCandidate => {
                Box::new(|family: &Family| family.analysis_status.is_strong_candidate())
            }
            FamilyFilter::ReviewedNoClearCandidate => Box::new(|family: &Family| {
                family.analysis_status == crate::model::AnalysisStatus::ReviewedNoClearCandidate
            }),
            FamilyFilter::AnalysisInProgress => Box::new(|family: &Family| {
                family.analysis_status == crate::model::AnalysisStatus::AnalysisInProgress
            }),
            FamilyFilter::AssignedToMe => {
                let viewer = related.viewer.map(|v| v.to_lowercase());
                Box::new(move |family: &Family| match (&viewer, &family.assigned_analyst) {
                    (Some(email), Some(analyst)) => analyst.email.to_lowercase() == *email,
                    _ => false,
                })
            }
            FamilyFilter::AssignedToAnyone => {
                Box::new(|family: &Family| family.assigned_analyst.is_some())
            }
            _ => show_all(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FamilySort {
    #[default]
    FamilyName,
    FamilyAdded,
    DataLoaded,
    ReviewStatusChanged,
    NumIndividuals,
    AnalysisStatus,
    Guid,
}

const FAMILY_SORTS: &[SortDef<FamilySort>] = &[
    SortDef {
        sort: FamilySort::FamilyName,
        value: "FAMILY_NAME",
        name: "Family Name",
        inverted: false,
    },
    SortDef {
        sort: FamilySort::FamilyAdded,
        value: "FAMILY_ADDED",
        name: "Date Added",
        inverted: false,
    },
    SortDef {
        sort: FamilySort::DataLoaded,
        value: "DATA_LOADED",
        name: "Date Loaded",
        inverted: false,
    },
    SortDef {
        sort: FamilySort::ReviewStatusChanged,
        value: "REVIEW_STATUS_CHANGED",
        name: "Review Status Changed",
        inverted: false,
    },
    SortDef {
        sort: FamilySort::NumIndividuals,
        value: "NUM_INDIVIDUALS",
        name: "Individuals",
        inverted: false,
    },
    SortDef {
        sort: FamilySort::AnalysisStatus,
        value: "ANALYSIS_STATUS",
        name: "Analysis Status",
        inverted: false,
    },
];

const GUID_SORT: SortDef<FamilySort> = SortDef {
    sort: FamilySort::Guid,
    value: "GUID",
    name: "GUID",
    inverted: false,
};

pub fn family_sort_defs() -> &'static [SortDef<FamilySort>] {
    FAMILY_SORTS
}

impl FamilySort {
    pub fn from_key(key: &str) -> Self {
        match find_sort_def(FAMILY_SORTS, key) {
            Some(def) => def.sort,
            None => {
                tracing::warn!(key, "unknown family sort; falling back to GUID order");
                FamilySort::Guid
            }
        }
    }

    fn def(self) -> &'static SortDef<FamilySort> {
        FAMILY_SORTS
            .iter()
            .find(|d| d.sort == self)
            .unwrap_or(&GUID_SORT)
    }
}

impl From<String> for FamilySort {
    fn from(key: String) -> Self {
        FamilySort::from_key(&key)
    }
}

impl From<FamilySort> for String {
    fn from(sort: FamilySort) -> Self {
        sort.def().value.to_string()
    }
}

fn latest<'s>(dates: impl Iterator<Item = &'s str>) -> Option<&'s str> {
    dates.max()
}

impl SortKey<Family> for FamilySort {
    fn value(&self) -> &str {
        self.def().value
    }

    fn name(&self) -> &str {
        self.def().name
    }

    fn inverted(&self) -> bool {
        self.def().inverted
    }

    fn key_getter<'a>(&'a self, related: &RelatedCollections<'a>) -> KeyGetter<'a, Family> {
        let store = related.store;
        match self {
            FamilySort::FamilyName => Box::new(|f: &Family| SortValue::text(f.display())),
            FamilySort::FamilyAdded => Box::new(|f: &Family| SortValue::date(Some(f.created_date.as_str()))),
            FamilySort::DataLoaded => Box::new(move |f: &Family| {
                let individuals = individuals_of(store, f);
                let loaded = latest(
                    individuals
                        .iter()
                        .flat_map(|i| i.sample_guids.iter())
                        .filter_map(|guid| store.get::<Sample>(guid))
                        .filter(|s| s.is_active)
                        .filter_map(|s| s.loaded_date.as_deref()),
                );
                SortValue::date(loaded)
            }),
            FamilySort::ReviewStatusChanged => Box::new(move |f: &Family| {
                let individuals = individuals_of(store, f);
                let changed = latest(
                    individuals
                        .iter()
                        .filter_map(|i| i.case_review_status_last_modified_date.as_deref()),
                );
                SortValue::date(changed)
            }),
            FamilySort::NumIndividuals => {
                Box::new(|f: &Family| SortValue::Number(f.individual_guids.len() as f64))
            }
            FamilySort::AnalysisStatus => {
                Box::new(|f: &Family| SortValue::Number(f.analysis_status.rank() as f64))
            }
            FamilySort::Guid => Box::new(|f: &Family| SortValue::Text(f.family_guid.clone())),
        }
    }
}

/// Restricts the family table to a project, and optionally one analysis group in it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FamilyScope {
    pub project_guid: Option<String>,
    pub analysis_group_guid: Option<String>,
}

impl FamilyScope {
    pub fn project(project_guid: &str) -> Self {
        Self {
            project_guid: Some(project_guid.to_string()),
            analysis_group_guid: None,
        }
    }

    pub fn analysis_group(project_guid: &str, analysis_group_guid: &str) -> Self {
        Self {
            project_guid: Some(project_guid.to_string()),
            analysis_group_guid: Some(analysis_group_guid.to_string()),
        }
    }
}

impl ViewEntity for Family {
    type Scope = FamilyScope;

    fn candidates(store: &EntityStore, scope: &FamilyScope) -> Vec<Arc<Self>> {
        let in_project = |f: &Family| {
            scope
                .project_guid
                .as_ref()
                .is_none_or(|guid| f.project_guid == *guid)
        };

        let group = scope.analysis_group_guid.as_ref().and_then(|guid| {
            let group = store.get::<AnalysisGroup>(guid);
            if group.is_none() {
                tracing::warn!(analysis_group = %guid, "unknown analysis group; showing whole project");
            }
            group
        });

        match group {
            Some(group) => group
                .family_guids
                .iter()
                .filter_map(|guid| store.get::<Family>(guid))
                .filter(|f| in_project(f))
                .cloned()
                .collect(),
            None => store
                .values::<Family>()
                .filter(|f| in_project(f))
                .cloned()
                .collect(),
        }
    }

    fn search_text(&self, related: &RelatedCollections<'_>) -> String {
        let mut parts: Vec<&str> = vec![self.display(), &self.family_id];
        if let Some(analyst) = &self.assigned_analyst {
            parts.push(&analyst.full_name);
            parts.push(&analyst.email);
        }
        for analysed in &self.analysed_by {
            parts.push(&analysed.created_by.full_name);
            parts.push(&analysed.created_by.email);
        }
        for individual in individuals_of(related.store, self) {
            parts.push(&individual.individual_id);
            parts.push(&individual.display_name);
            for feature in &individual.features {
                parts.push(&feature.label);
            }
        }
        parts.join(SEARCH_FIELD_SEPARATOR)
    }

    fn dependencies(store: &EntityStore) -> Vec<CollectionRef> {
        vec![
            CollectionRef::of::<Family>(store),
            CollectionRef::of::<Individual>(store),
            CollectionRef::of::<Sample>(store),
            CollectionRef::of::<AnalysisGroup>(store),
        ]
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/options/families.rs"]
mod tests;
