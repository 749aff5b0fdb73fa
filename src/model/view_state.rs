use serde::{Deserialize, Serialize};

use crate::options::families::{FamilyFilter, FamilySort};
use crate::options::projects::{ProjectFilter, ProjectSort};
use crate::options::variants::{VariantFilter, VariantSort};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn multiplier(self) -> i8 {
        match self {
            SortDirection::Ascending => 1,
            SortDirection::Descending => -1,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// Per-table UI settings. Lives only as long as the page that owns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewState<F, S> {
    pub filter: F,
    pub sort_column: S,
    pub sort_direction: SortDirection,
    pub search_text: String,
    pub current_page: usize,
    pub records_per_page: usize,
    pub show_details: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ViewStateUpdate<F, S> {
    SetFilter(F),
    SetSortColumn(S),
    SetSortDirection(SortDirection),
    ToggleSortDirection,
    SetSearchText(String),
    SetPage(usize),
    SetRecordsPerPage(usize),
    SetShowDetails(bool),
    Reset,
}

impl<F, S> ViewState<F, S>
where
    F: Default,
    S: Default,
{
    pub fn apply(&mut self, update: ViewStateUpdate<F, S>) {
        match update {
            ViewStateUpdate::SetFilter(filter) => {
                self.filter = filter;
                self.current_page = 0;
            }
            ViewStateUpdate::SetSortColumn(column) => {
                self.sort_column = column;
                self.current_page = 0;
            }
            ViewStateUpdate::SetSortDirection(direction) => {
                self.sort_direction = direction;
                self.current_page = 0;
            }
            ViewStateUpdate::ToggleSortDirection => {
                self.sort_direction = self.sort_direction.flipped();
                self.current_page = 0;
            }
            ViewStateUpdate::SetSearchText(text) => {
                self.search_text = text;
                self.current_page = 0;
            }
            ViewStateUpdate::SetPage(page) => {
                self.current_page = page;
            }
            ViewStateUpdate::SetRecordsPerPage(size) => {
                self.records_per_page = size;
                self.current_page = 0;
            }
            ViewStateUpdate::SetShowDetails(show) => {
                self.show_details = show;
            }
            ViewStateUpdate::Reset => {
                self.filter = F::default();
                self.sort_column = S::default();
                self.sort_direction = SortDirection::Ascending;
                self.search_text.clear();
                self.current_page = 0;
            }
        }
    }

    pub fn apply_all(&mut self, updates: impl IntoIterator<Item = ViewStateUpdate<F, S>>) {
        for update in updates {
            self.apply(update);
        }
    }
}

/// Mount-time defaults for one table.
#[derive(Debug, Clone)]
pub struct ViewProfile<F, S> {
    pub filter: F,
    pub sort_column: S,
    pub sort_direction: SortDirection,
    pub records_per_page: usize,
    pub show_details: bool,
}

impl<F: Clone, S: Clone> ViewProfile<F, S> {
    pub fn initial_state(&self) -> ViewState<F, S> {
        ViewState {
            filter: self.filter.clone(),
            sort_column: self.sort_column.clone(),
            sort_direction: self.sort_direction,
            search_text: String::new(),
            current_page: 0,
            records_per_page: self.records_per_page,
            show_details: self.show_details,
        }
    }
}

pub type DashboardProfile = ViewProfile<ProjectFilter, ProjectSort>;
pub type FamilyTableProfile = ViewProfile<FamilyFilter, FamilySort>;
pub type SavedVariantsProfile = ViewProfile<VariantFilter, VariantSort>;

impl DashboardProfile {
    pub fn dashboard_v1() -> Self {
        Self {
            filter: ProjectFilter::All,
            sort_column: ProjectSort::ProjectName,
            sort_direction: SortDirection::Ascending,
            records_per_page: 1000,
            show_details: false,
        }
    }
}

impl FamilyTableProfile {
    pub fn family_table_v1() -> Self {
        Self {
            filter: FamilyFilter::All,
            sort_column: FamilySort::FamilyName,
            sort_direction: SortDirection::Ascending,
            records_per_page: 200,
            show_details: true,
        }
    }
}

impl SavedVariantsProfile {
    pub fn saved_variants_v1() -> Self {
        Self {
            filter: VariantFilter::All,
            sort_column: VariantSort::Family,
            sort_direction: SortDirection::Ascending,
            records_per_page: 25,
            show_details: false,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/view_state.rs"]
mod tests;
