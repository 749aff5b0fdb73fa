use std::collections::BTreeMap;

use super::*;
use crate::fixtures::{FAMILY_1, FAMILY_2, GENOMES, TUTORIAL, demo_store};
use crate::model::view_state::{DashboardProfile, FamilyTableProfile};
use crate::model::{Individual, ViewStateUpdate};
use crate::options::families::FamilyScope;

#[test]
fn test_visible_is_memoized_by_reference() {
    let store = demo_store();
    let state = DashboardProfile::dashboard_v1().initial_state();
    let selector = ProjectsView::new();
    let inputs = SelectorInputs::new(&store, &state, &());

    let first = selector.visible(&inputs);
    let second = selector.visible(&inputs);
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(
        selector.stats(),
        SelectorStats {
            filter_runs: 1,
            sort_runs: 1,
            page_runs: 0
        }
    );

    let page = selector.visible_page(&inputs);
    assert!(Arc::ptr_eq(&page, &selector.visible_page(&inputs)));
    assert_eq!(selector.stats().page_runs, 1);
}

fn guids(list: &[Arc<Project>]) -> Vec<String> {
    list.iter().map(|p| p.project_guid.clone()).collect()
}

#[test]
fn test_sort_change_skips_filter_stage() {
    let store = demo_store();
    let mut state = DashboardProfile::dashboard_v1().initial_state();
    let selector = ProjectsView::new();

    let by_name = selector.visible(&SelectorInputs::new(&store, &state, &()));
    state.apply(ViewStateUpdate::SetSortColumn(ProjectSort::DateCreated));
    let by_date = selector.visible(&SelectorInputs::new(&store, &state, &()));

    assert_eq!(selector.stats().filter_runs, 1);
    assert_eq!(selector.stats().sort_runs, 2);
    assert_eq!(guids(&by_name), vec![GENOMES, TUTORIAL]);
    assert_eq!(guids(&by_date), vec![GENOMES, TUTORIAL]);

    state.apply(ViewStateUpdate::ToggleSortDirection);
    let flipped = selector.visible(&SelectorInputs::new(&store, &state, &()));
    assert_eq!(guids(&flipped), vec![TUTORIAL, GENOMES]);
}

#[test]
fn test_page_change_skips_sort_stage() {
    let store = demo_store();
    let mut state = FamilyTableProfile::family_table_v1().initial_state();
    state.apply(ViewStateUpdate::SetRecordsPerPage(1));
    let scope = FamilyScope::project(TUTORIAL);
    let selector = FamiliesView::new();

    let first = selector.visible_page(&SelectorInputs::new(&store, &state, &scope));
    assert_eq!(first.items[0].family_guid, FAMILY_1);
    assert_eq!(first.page_count, 2);

    state.apply(ViewStateUpdate::SetPage(1));
    let second = selector.visible_page(&SelectorInputs::new(&store, &state, &scope));
    assert_eq!(second.items[0].family_guid, FAMILY_2);
    assert_eq!(
        selector.stats(),
        SelectorStats {
            filter_runs: 1,
            sort_runs: 1,
            page_runs: 2
        }
    );
}

#[test]
fn test_unrelated_store_update_keeps_result() {
    let mut store = demo_store();
    let state = DashboardProfile::dashboard_v1().initial_state();
    let selector = ProjectsView::new();
    let before = selector.visible(&SelectorInputs::new(&store, &state, &()));

    let individual = (**store.get::<Individual>("I021474_na19679").unwrap()).clone();
    store.merge(BTreeMap::from([(
        individual.individual_guid.clone(),
        Some(individual),
    )]));
    let after = selector.visible(&SelectorInputs::new(&store, &state, &()));
    assert!(Arc::ptr_eq(&before, &after));
}

#[test]
fn test_dependency_update_recomputes() {
    let mut store = demo_store();
    let mut state = FamilyTableProfile::family_table_v1().initial_state();
    state.apply(ViewStateUpdate::SetFilter(FamilyFilter::Accepted));
    let scope = FamilyScope::project(TUTORIAL);
    let selector = FamiliesView::new();

    let before = selector.visible(&SelectorInputs::new(&store, &state, &scope));
    assert_eq!(before.len(), 1);

    let mut individual = (**store.get::<Individual>("I021477_hg00731").unwrap()).clone();
    individual.case_review_status = crate::model::CaseReviewStatus::Accepted;
    store.insert_all([individual]);

    let after = selector.visible(&SelectorInputs::new(&store, &state, &scope));
    assert_eq!(after.len(), 2);
    assert_eq!(selector.stats().filter_runs, 2);
}

#[test]
fn test_viewer_is_part_of_the_key() {
    let store = demo_store();
    let mut state = FamilyTableProfile::family_table_v1().initial_state();
    state.apply(ViewStateUpdate::SetFilter(FamilyFilter::AssignedToMe));
    let scope = FamilyScope::project(TUTORIAL);
    let selector = FamiliesView::new();

    let anonymous = selector.visible(&SelectorInputs::new(&store, &state, &scope));
    assert!(anonymous.is_empty());
    let mine = selector.visible(
        &SelectorInputs::new(&store, &state, &scope)
            .with_viewer(Some(crate::fixtures::ANALYST_EMAIL)),
    );
    assert_eq!(mine.len(), 1);
}

#[test]
fn test_search_with_no_match_yields_empty_page() {
    let store = demo_store();
    let mut state = FamilyTableProfile::family_table_v1().initial_state();
    state.apply(ViewStateUpdate::SetSearchText("no such family".to_string()));
    let scope = FamilyScope::project(TUTORIAL);
    let page = FamiliesView::new().visible_page(&SelectorInputs::new(&store, &state, &scope));
    assert!(page.is_empty());
    assert_eq!(page.total, 0);
}

#[test]
fn test_variants_view() {
    let store = demo_store();
    let mut state = crate::model::view_state::SavedVariantsProfile::saved_variants_v1()
        .initial_state();
    state.apply(ViewStateUpdate::SetFilter(VariantFilter::Tagged));
    state.apply(ViewStateUpdate::SetSortColumn(VariantSort::Position));
    let scope = crate::options::variants::VariantScope::default();
    let visible = SavedVariantsView::new().visible(&SelectorInputs::new(&store, &state, &scope));
    let xpos: Vec<u64> = visible.iter().map(|v| v.xpos).collect();
    assert_eq!(xpos, vec![1_248_367_227, 21_003_343_353]);
}
