pub mod entities;
pub mod statuses;
pub mod view_state;

pub use entities::{
    AnalysedBy, AnalysisGroup, Family, Individual, PhenotypeFeature, Project, ProjectCategory,
    Sample, SavedVariant, Transcript, User, VariantTag,
};
pub use statuses::{AnalysisStatus, CaseReviewStatus};
pub use view_state::{SortDirection, ViewProfile, ViewState, ViewStateUpdate};
