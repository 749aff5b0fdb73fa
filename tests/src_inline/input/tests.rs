use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use flate2::Compression;
use flate2::write::GzEncoder;

use super::*;
use crate::model::{AnalysisStatus, CaseReviewStatus};
use crate::model::entities::{Affected, Sex};

static DIR_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn make_temp_dir() -> PathBuf {
    let mut dir = std::env::temp_dir();
    let id = DIR_COUNTER.fetch_add(1, Ordering::SeqCst);
    dir.push(format!("seqr_views_input_test_{}_{}", std::process::id(), id));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn fixture_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/data/store.json")
}

fn write_gz(path: &Path, contents: &str) {
    let mut enc = GzEncoder::new(BufWriter::new(File::create(path).unwrap()), Compression::default());
    enc.write_all(contents.as_bytes()).unwrap();
    enc.finish().unwrap().flush().unwrap();
}

#[test]
fn test_load_fixture() {
    let store = load_store(&fixture_path()).unwrap();
    assert_eq!(store.len::<Project>(), 2);
    assert_eq!(store.len::<ProjectCategory>(), 1);
    assert_eq!(store.len::<Family>(), 2);
    assert_eq!(store.len::<Individual>(), 6);
    assert_eq!(store.len::<Sample>(), 1);
    assert_eq!(store.len::<SavedVariant>(), 3);
    assert_eq!(store.len::<VariantTag>(), 2);
    assert_eq!(store.len::<AnalysisGroup>(), 1);

    let proband = store.get::<Individual>("I021474_na19679").unwrap();
    assert_eq!(proband.case_review_status, CaseReviewStatus::Accepted);
    assert_eq!(proband.sex, Sex::Male);
    assert_eq!(proband.affected, Affected::Affected);
    assert_eq!(proband.features[0].id, "HP:0001631");

    let family = store.get::<Family>("F011652_1").unwrap();
    assert_eq!(family.analysis_status, AnalysisStatus::Solved);
    assert_eq!(family.assigned_analyst.as_ref().unwrap().full_name, "Test User");

    let variant = store.get::<SavedVariant>("SV0000002_21003343353_r0390").unwrap();
    assert_eq!(variant.reference, "GAGA");
    assert_eq!(variant.xpos, 21_003_343_353);
}

#[test]
fn test_load_gzipped_store() {
    let dir = make_temp_dir();
    let path = dir.join("store.json.gz");
    write_gz(&path, &fs::read_to_string(fixture_path()).unwrap());
    let store = load_store(&path).unwrap();
    assert_eq!(store.len::<Family>(), 2);
}

#[test]
fn test_missing_sections_default_to_empty() {
    let store = parse_store(r#"{"projectsByGuid": {"P1": {"projectGuid": "P1", "name": "One"}}}"#.as_bytes())
        .unwrap();
    assert_eq!(store.len::<Project>(), 1);
    assert_eq!(store.len::<Family>(), 0);
    assert_eq!(store.get::<Project>("P1").unwrap().num_families, 0);
}

#[test]
fn test_unknown_codes_are_tolerated() {
    let json = r#"{
        "familiesByGuid": {"F1": {"familyGuid": "F1", "analysisStatus": "XYZ"}},
        "individualsByGuid": {"I1": {"individualGuid": "I1", "caseReviewStatus": "?", "sex": "X"}}
    }"#;
    let store = parse_store(json.as_bytes()).unwrap();
    assert_eq!(
        store.get::<Family>("F1").unwrap().analysis_status,
        AnalysisStatus::WaitingForData
    );
    let individual = store.get::<Individual>("I1").unwrap();
    assert_eq!(individual.case_review_status, CaseReviewStatus::InReview);
    assert_eq!(individual.sex, Sex::Unknown);
}

#[test]
fn test_key_guid_mismatch_is_rejected() {
    let json = r#"{"familiesByGuid": {"F1": {"familyGuid": "F2"}}}"#;
    match parse_store(json.as_bytes()) {
        Err(InputError::InvalidInput(msg)) => assert!(msg.contains("F2")),
        other => panic!("expected InvalidInput, got {other:?}"),
    }
}

#[test]
fn test_missing_file_and_bad_json() {
    let dir = make_temp_dir();
    match load_store(&dir.join("absent.json")) {
        Err(InputError::MissingInput(_)) => {}
        other => panic!("expected MissingInput, got {other:?}"),
    }

    let bad = dir.join("bad.json");
    fs::write(&bad, "{ not json").unwrap();
    assert!(matches!(load_store(&bad), Err(InputError::Json(_))));
}

#[test]
fn test_null_fields_read_as_defaults() {
    let json = r#"{
        "projectsByGuid": {"P1": {"projectGuid": "P1", "name": "Demo", "description": null,
            "projectCategoryGuids": null, "numFamilies": null}},
        "familiesByGuid": {"F1": {"familyGuid": "F1", "projectGuid": "P1", "description": null,
            "analysisStatus": null, "analysedBy": null}},
        "individualsByGuid": {"I1": {"individualGuid": "I1", "familyGuid": "F1",
            "features": null, "caseReviewStatus": null, "sex": null, "affected": null}},
        "samplesByGuid": null
    }"#;
    let store = parse_store(json.as_bytes()).unwrap();

    let project = store.get::<Project>("P1").unwrap();
    assert_eq!(project.description, "");
    assert!(project.project_category_guids.is_empty());
    assert_eq!(project.num_families, 0);

    let family = store.get::<Family>("F1").unwrap();
    assert_eq!(family.description, "");
    assert_eq!(family.analysis_status, AnalysisStatus::WaitingForData);
    assert!(family.analysed_by.is_empty());

    let individual = store.get::<Individual>("I1").unwrap();
    assert!(individual.features.is_empty());
    assert_eq!(individual.case_review_status, CaseReviewStatus::InReview);
    assert_eq!(individual.sex, Sex::Unknown);
    assert_eq!(individual.affected, Affected::Unknown);
    assert_eq!(store.len::<Sample>(), 0);
}
