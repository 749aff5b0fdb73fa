use super::*;
use crate::fixtures::{FAMILY_1, FAMILY_2, GENOMES, TUTORIAL, demo_store, individual, project};
use crate::model::CaseReviewStatus;

#[test]
fn test_case_review_counts_are_zero_filled() {
    let individuals: Vec<Arc<Individual>> = (0..6)
        .map(|i| {
            let status = if i < 4 {
                CaseReviewStatus::InReview
            } else {
                CaseReviewStatus::Accepted
            };
            Arc::new(individual(&format!("I{i}"), "F", status))
        })
        .collect();
    let counts = case_review_status_counts(&individuals);
    assert_eq!(counts.len(), 7);
    assert_eq!(counts[0].value, "I");
    assert_eq!(counts[0].count, 4);
    assert_eq!(counts[2].value, "A");
    assert_eq!(counts[2].count, 2);
    assert_eq!(counts.iter().filter(|c| c.count == 0).count(), 5);
    assert_eq!(counts.iter().map(|c| c.count).sum::<usize>(), 6);
}

#[test]
fn test_analysis_counts_cover_registry() {
    let store = demo_store();
    let counts = analysis_status_counts(store.values::<Family>());
    assert_eq!(counts.len(), 11);
    assert_eq!(counts.iter().map(|c| c.count).sum::<usize>(), 2);
    assert_eq!(counts[0].count, 1);
    assert_eq!(counts[10].count, 1);
}

#[test]
fn test_join_places_child_in_every_bucket() {
    let store = demo_store();
    let mut variant = (**store.get::<SavedVariant>("SV0000001_2248367227_r0390").unwrap()).clone();
    variant.family_guids = vec![FAMILY_1.to_string(), FAMILY_2.to_string(), FAMILY_1.to_string()];
    let values = [Arc::new(variant)];
    let joined = join_by_foreign_key(&values, |v: &SavedVariant| v.family_guids.clone());
    assert_eq!(joined.len(), 2);
    assert_eq!(joined[FAMILY_1].len(), 1);
    assert_eq!(joined[FAMILY_2].len(), 1);
}

#[test]
fn test_store_joins() {
    let store = demo_store();
    assert_eq!(individuals_by_family(&store)[FAMILY_1].len(), 3);
    assert_eq!(samples_by_individual(&store)["I021474_na19679"].len(), 1);
    assert_eq!(families_by_project(&store)[TUTORIAL].len(), 2);
    assert!(!families_by_project(&store).contains_key(GENOMES));
    assert_eq!(variants_by_family(&store)[FAMILY_2].len(), 1);

    let tagged = tagged_variants_by_family(&store);
    assert!(!tagged.contains_key(FAMILY_2));
    let xpos: Vec<u64> = tagged[FAMILY_1].iter().map(|v| v.xpos).collect();
    assert_eq!(xpos, vec![1_248_367_227, 21_003_343_353]);
}

#[test]
fn test_counts_by_project_include_empty_projects() {
    let store = demo_store();
    let by_project = case_review_status_counts_by_project(&store);
    assert_eq!(by_project.len(), 2);
    let tutorial = &by_project[TUTORIAL];
    assert_eq!(tutorial[0].count, 4);
    assert_eq!(tutorial[2].count, 2);
    assert!(by_project[GENOMES].iter().all(|c| c.count == 0));
    assert_eq!(by_project[GENOMES].len(), 7);

    let analysis = analysis_status_counts_by_project(&store);
    assert_eq!(analysis[TUTORIAL].iter().map(|c| c.count).sum::<usize>(), 2);
}

#[test]
fn test_dangling_family_is_skipped_in_counts() {
    let mut store = demo_store();
    store.insert_all([individual("I999", "F404", CaseReviewStatus::Accepted)]);
    let by_project = case_review_status_counts_by_project(&store);
    let total: usize = by_project.values().flatten().map(|c| c.count).sum();
    assert_eq!(total, 6);
}

#[test]
fn test_percent_solved() {
    let mut p = project("P", "Empty", "2020-01-01");
    assert_eq!(percent_solved(&p), 0.0);
    p.analysis_status_counts.insert("S".to_string(), 3);
    assert_eq!(percent_solved(&p), 0.0);

    p.num_families = 4;
    p.analysis_status_counts.insert("S_ng".to_string(), 1);
    p.analysis_status_counts.insert("Q".to_string(), 0);
    assert_eq!(percent_solved(&p), 100.0);

    p.num_families = 8;
    assert_eq!(percent_solved(&p), 50.0);
}

#[test]
fn test_display_fallbacks() {
    let store = demo_store();
    assert_eq!(family_display_name(&store, FAMILY_1), "1");
    assert_eq!(family_display_name(&store, "F404"), "F404");
    assert_eq!(project_name(&store, TUTORIAL), "Tutorial");
    assert_eq!(project_name(&store, "R404"), "R404");
    assert_eq!(tag_name(&store, "VT2"), "Excluded");
    assert_eq!(tag_name(&store, "VT404"), "VT404");
}

#[test]
fn test_memoized_joins() {
    let mut store = demo_store();
    let joins = MemoizedJoins::new();
    let a = joins.case_review_status_counts_by_project(&store);
    let b = joins.case_review_status_counts_by_project(&store);
    assert!(Arc::ptr_eq(&a, &b));

    let tagged = joins.tagged_variants_by_family(&store);
    let by_family = joins.individuals_by_family(&store);
    store.insert_all([individual("I999", FAMILY_2, CaseReviewStatus::Waitlist)]);

    assert!(Arc::ptr_eq(&tagged, &joins.tagged_variants_by_family(&store)));
    assert!(!Arc::ptr_eq(&by_family, &joins.individuals_by_family(&store)));
    let c = joins.case_review_status_counts_by_project(&store);
    assert!(!Arc::ptr_eq(&a, &c));
    assert_eq!(c[TUTORIAL][6].count, 1);
    assert_eq!(joins.variants_by_family(&store)[FAMILY_1].len(), 2);
    assert_eq!(joins.analysis_status_counts_by_project(&store).len(), 2);
}
