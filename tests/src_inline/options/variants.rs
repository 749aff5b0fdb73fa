use super::*;
use crate::fixtures::{FAMILY_1, FAMILY_2, GENOMES, TUTORIAL, demo_store};

const SV1: &str = "SV0000001_2248367227_r0390";
const SV2: &str = "SV0000002_21003343353_r0390";
const SV3: &str = "SV0000003_2000001000_r0390";

fn matching(store: &EntityStore, filter: &VariantFilter) -> Vec<String> {
    let related = RelatedCollections::new(store);
    let predicate = filter.predicate(&related);
    store
        .values::<SavedVariant>()
        .filter(|v| predicate(v))
        .map(|v| v.variant_guid.clone())
        .collect()
}

#[test]
fn test_filter_keys_parse() {
    assert_eq!(VariantFilter::from_key("ALL"), VariantFilter::All);
    assert_eq!(VariantFilter::from_key("TAGGED"), VariantFilter::Tagged);
    assert_eq!(
        VariantFilter::from_key("TAG:Excluded"),
        VariantFilter::TagName("Excluded".to_string())
    );
    assert_eq!(
        VariantFilter::from_key("CATEGORY:Collaboration"),
        VariantFilter::TagCategory("Collaboration".to_string())
    );
    assert_eq!(VariantFilter::from_key("TAG:"), VariantFilter::All);
    assert_eq!(VariantFilter::from_key("whatever"), VariantFilter::All);
    assert_eq!(
        VariantFilter::TagName("Excluded".to_string()).key(),
        "TAG:Excluded"
    );
}

#[test]
fn test_tag_filters() {
    let store = demo_store();
    assert_eq!(matching(&store, &VariantFilter::Tagged), vec![SV1, SV2]);
    assert_eq!(
        matching(&store, &VariantFilter::TagName("Excluded".to_string())),
        vec![SV2]
    );
    assert_eq!(
        matching(&store, &VariantFilter::TagCategory("CMG Discovery Tags".to_string())),
        vec![SV1]
    );
}

#[test]
fn test_unknown_tag_shows_all() {
    let store = demo_store();
    assert_eq!(
        matching(&store, &VariantFilter::TagName("Nope".to_string())).len(),
        3
    );
    assert_eq!(
        matching(&store, &VariantFilter::TagCategory("Nope".to_string())).len(),
        3
    );
}

fn sorted(store: &EntityStore, sort: VariantSort) -> Vec<String> {
    let related = RelatedCollections::new(store);
    let key_of = sort.key_getter(&related);
    let mut variants: Vec<_> = store.values::<SavedVariant>().cloned().collect();
    variants.sort_by(|a, b| {
        key_of(a)
            .cmp(&key_of(b))
            .then_with(|| a.variant_guid.cmp(&b.variant_guid))
    });
    variants.iter().map(|v| v.variant_guid.clone()).collect()
}

#[test]
fn test_variant_sort_keys() {
    let store = demo_store();
    assert_eq!(sorted(&store, VariantSort::Position), vec![SV1, SV3, SV2]);
    assert_eq!(sorted(&store, VariantSort::Family), vec![SV1, SV2, SV3]);
    // untagged variants carry an empty key and come first
    assert_eq!(sorted(&store, VariantSort::TagName), vec![SV3, SV2, SV1]);
    assert_eq!(sorted(&store, VariantSort::LastModified), vec![SV3, SV2, SV1]);
    assert_eq!(VariantSort::from_key("CHROM"), VariantSort::Guid);
}

#[test]
fn test_scope_candidates() {
    let store = demo_store();
    let all = SavedVariant::candidates(&store, &VariantScope::default());
    assert_eq!(all.len(), 3);

    let by_family = VariantScope {
        project_guid: None,
        family_guid: Some(FAMILY_2.to_string()),
    };
    assert_eq!(SavedVariant::candidates(&store, &by_family).len(), 1);

    let by_project = VariantScope {
        project_guid: Some(TUTORIAL.to_string()),
        family_guid: Some(FAMILY_1.to_string()),
    };
    assert_eq!(SavedVariant::candidates(&store, &by_project).len(), 2);

    let other = VariantScope {
        project_guid: Some(GENOMES.to_string()),
        family_guid: None,
    };
    assert!(SavedVariant::candidates(&store, &other).is_empty());
}

#[test]
fn test_search_text() {
    let store = demo_store();
    let related = RelatedCollections::new(&store);
    let text = store.get::<SavedVariant>(SV2).unwrap().search_text(&related);
    assert!(text.contains("21-3343353-A-G"));
    assert!(text.contains("Excluded"));
}
