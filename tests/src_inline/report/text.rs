use std::sync::Arc;

use super::*;
use crate::fixtures::{FAMILY_1, FAMILY_2, TUTORIAL, demo_store};
use crate::options::families::{family_filter_defs, family_sort_defs};
use crate::options::projects::{project_filter_defs, project_sort_defs};
use crate::options::variants::{variant_filter_defs, variant_sort_defs};
use crate::pipeline::stage3_paginate::run_stage3;
use crate::pipeline::joins::MemoizedJoins;
use crate::report::json::build_counts_report;

#[test]
fn test_empty_page_reports_zero_found() {
    let page = run_stage3::<Project>(&[], 0, 10);
    assert_eq!(render_projects(&page, 2), "0 projects found (of 2)\n");
}

#[test]
fn test_projects_table() {
    let store = demo_store();
    let rows: Vec<_> = store.values::<Project>().cloned().collect();
    let out = render_projects(&run_stage3(&rows, 0, 1), 2);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines[0], "Showing 2 of 2 projects");
    assert!(lines[1].starts_with("Project"));
    assert!(lines[2].contains(" 2017-03-12 "));
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[3], "Page 1 of 2 (1 per page)");
}

#[test]
fn test_families_details() {
    let store = demo_store();
    let related = RelatedCollections::new(&store);
    let rows = vec![
        Arc::clone(store.get::<Family>(FAMILY_1).unwrap()),
        Arc::clone(store.get::<Family>(FAMILY_2).unwrap()),
    ];
    let page = run_stage3(&rows, 0, 10);

    let compact = render_families(&page, 2, &related, false);
    assert_eq!(compact.lines().count(), 4);
    assert!(!compact.contains("NA19679"));

    let detailed = render_families(&page, 2, &related, true);
    assert_eq!(detailed.lines().count(), 10);
    assert!(detailed.contains("NA19679"));
    assert!(detailed.contains("Accepted"));
    assert!(!detailed.contains("Page "));
}

#[test]
fn test_variants_list_resolves_names() {
    let store = demo_store();
    let related = RelatedCollections::new(&store);
    let rows: Vec<_> = store.values::<SavedVariant>().cloned().collect();
    let out = render_variants(&run_stage3(&rows, 0, 25), 3, &related);
    assert!(out.starts_with("Showing 3 of 3 saved variants\n"));
    assert!(out.contains("21-3343353-A-G\t1\tExcluded"));
}

#[test]
fn test_counts_text() {
    let store = demo_store();
    let projects = vec![Arc::clone(store.get::<Project>(TUTORIAL).unwrap())];
    let report = build_counts_report(&store, &MemoizedJoins::new(), &projects);
    let out = render_counts(&report);
    assert!(out.starts_with("Tutorial (2 families, 50.0% solved)\n"));
    assert!(out.contains("Waitlist"));
    assert!(out.contains("Waiting for data"));
}

#[test]
fn test_options_group_filters_by_category() {
    let text = render_options(family_filter_defs(), family_sort_defs());
    assert!(text.starts_with("Filters\n"));
    assert_eq!(text.matches("  Case Review Status\n").count(), 1);
    let heading = text.find("  Case Review Status").unwrap();
    assert!(text.find("IN_REVIEW").unwrap() > heading);
    assert!(text.find("ASSIGNED_TO_ME").unwrap() < text.find("Sort keys").unwrap());
    assert!(text.contains("FAMILY_NAME"));

    let projects = render_options(project_filter_defs(), project_sort_defs());
    let created = projects.lines().find(|l| l.contains("DATE_CREATED")).unwrap();
    assert!(created.ends_with("(newest first)"));
    let name = projects.lines().find(|l| l.contains("PROJECT_NAME")).unwrap();
    assert!(!name.ends_with("(newest first)"));
}

#[test]
fn test_variant_options_list_every_key() {
    let text = render_options(variant_filter_defs(), variant_sort_defs());
    for key in ["ALL", "TAGGED", "FAMILY", "POSITION", "TAG_NAME", "LAST_MODIFIED"] {
        assert!(text.contains(key), "missing {key}");
    }
    assert!(!text.contains("newest first"));
}
