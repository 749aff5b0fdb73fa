use std::sync::Arc;

use serde::Serialize;

use crate::error::ReportError;
use crate::model::{Family, Individual, Project};
use crate::pipeline::joins::{
    MemoizedJoins, StatusCount, analysis_status_counts, case_review_status_counts, percent_solved,
};
use crate::store::EntityStore;

#[derive(Debug, Clone, Serialize)]
pub struct ProjectCounts {
    pub project_guid: String,
    pub name: String,
    pub num_families: u32,
    pub num_individuals: u32,
    pub percent_solved: f64,
    pub case_review_status_counts: Vec<StatusCount>,
    pub analysis_status_counts: Vec<StatusCount>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CountsReport {
    pub tool: &'static str,
    pub version: &'static str,
    pub projects: Vec<ProjectCounts>,
}

/// Status breakdowns for `projects`, in the order given.
pub fn build_counts_report(
    store: &EntityStore,
    joins: &MemoizedJoins,
    projects: &[Arc<Project>],
) -> CountsReport {
    let case_review = joins.case_review_status_counts_by_project(store);
    let analysis = joins.analysis_status_counts_by_project(store);
    let projects = projects
        .iter()
        .map(|p| ProjectCounts {
            project_guid: p.project_guid.clone(),
            name: p.name.clone(),
            num_families: p.num_families,
            num_individuals: p.num_individuals,
            percent_solved: percent_solved(p),
            case_review_status_counts: case_review
                .get(&p.project_guid)
                .cloned()
                .unwrap_or_else(|| case_review_status_counts(&[] as &[Arc<Individual>])),
            analysis_status_counts: analysis
                .get(&p.project_guid)
                .cloned()
                .unwrap_or_else(|| analysis_status_counts(&[] as &[Arc<Family>])),
        })
        .collect();
    CountsReport {
        tool: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        projects,
    }
}

pub fn render_counts_json(report: &CountsReport) -> Result<String, ReportError> {
    Ok(serde_json::to_string_pretty(report)?)
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/json.rs"]
mod tests;
