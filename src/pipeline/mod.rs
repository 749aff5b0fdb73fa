pub mod joins;
pub mod memo;
pub mod selector;
pub mod stage1_filter;
pub mod stage2_sort;
pub mod stage3_paginate;

pub use selector::{
    FamiliesView, ProjectsView, SavedVariantsView, SelectorInputs, SelectorStats, ViewEntity,
    ViewSelector,
};
pub use stage3_paginate::Page;
