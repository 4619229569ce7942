//! Integration tests for file I/O operations.
//!
//! Tests cover:
//! - Plan save/load/discard
//! - Mapping record persistence

use series_organizer::core::mapping_store;
use series_organizer::core::planner::{discard_plan, load_plan, save_plan};
use series_organizer::models::mapping::{FileMapping, MappingRecord};
use series_organizer::models::plan::PendingPlan;
use series_organizer::models::series::{ClassifiedEpisode, SeriesStructure};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn sample_plan() -> PendingPlan {
    PendingPlan {
        version: "1.0".to_string(),
        id: "test-plan-id".to_string(),
        created_at: "2024-01-01T00:00:00Z".to_string(),
        source_folder: PathBuf::from("/tv_unordered/[Grp] Show"),
        destination_root: PathBuf::from("/tv"),
        original_tree: "└── a.mkv".to_string(),
        preview_tree: "Show\n└── Season 01\n    └── Show S01E01.mkv".to_string(),
        structure: SeriesStructure {
            series_name: "Show".to_string(),
            year: None,
            episodes: vec![ClassifiedEpisode {
                original_filename: "a.mkv".to_string(),
                new_filename: "Show S01E01.mkv".to_string(),
                season: 1,
                episode: 1,
            }],
        },
    }
}

// ========== PLAN I/O TESTS ==========

#[test]
fn test_save_and_load_plan() {
    let plan = sample_plan();
    let temp_dir = TempDir::new().unwrap();
    let plan_path = temp_dir.path().join("plans").join("test_plan.json");

    save_plan(&plan, &plan_path).unwrap();
    assert!(plan_path.exists());

    let loaded = load_plan(&plan_path).unwrap();
    assert_eq!(loaded.id, plan.id);
    assert_eq!(loaded.source_folder, plan.source_folder);
    assert_eq!(loaded.structure, plan.structure);
}

#[test]
fn test_plan_keeps_null_year() {
    let temp_dir = TempDir::new().unwrap();
    let plan_path = temp_dir.path().join("plan.json");
    save_plan(&sample_plan(), &plan_path).unwrap();

    let json = fs::read_to_string(&plan_path).unwrap();
    assert!(json.contains("\"year\": null"));
}

#[test]
fn test_load_nonexistent_plan() {
    let result = load_plan(&PathBuf::from("/nonexistent/plan.json"));
    assert!(result.is_err());
}

#[test]
fn test_load_invalid_plan() {
    let temp_dir = TempDir::new().unwrap();
    let plan_path = temp_dir.path().join("plan.json");
    fs::write(&plan_path, "{\"id\": 1}").unwrap();

    let err = load_plan(&plan_path).unwrap_err();
    assert!(matches!(err, series_organizer::Error::InvalidPlanFile(_)));
}

#[test]
fn test_discard_plan() {
    let temp_dir = TempDir::new().unwrap();
    let plan_path = temp_dir.path().join("plan.json");
    save_plan(&sample_plan(), &plan_path).unwrap();

    discard_plan(&plan_path).unwrap();
    assert!(!plan_path.exists());
    discard_plan(&plan_path).unwrap();
}

// ========== MAPPING RECORD TESTS ==========

#[test]
fn test_mapping_record_field_names() {
    let temp_dir = TempDir::new().unwrap();
    let record = MappingRecord {
        applied_at: chrono::Utc::now().to_rfc3339(),
        series_name: "Show".to_string(),
        year: Some(2020),
        destination_folder: PathBuf::from("/tv/Show (2020)"),
        file_mappings: vec![FileMapping::new(
            PathBuf::from("/src/[Grp] Show - 01.mkv"),
            PathBuf::from("/tv/Show (2020)/Season 01/Show S01E01.mkv"),
        )],
    };
    mapping_store::save(temp_dir.path(), &record).unwrap();

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(mapping_store::record_path(temp_dir.path())).unwrap())
            .unwrap();
    assert_eq!(json["series_name"], "Show");
    assert_eq!(json["year"], 2020);
    assert_eq!(json["destination_folder"], "/tv/Show (2020)");
    assert_eq!(json["file_mappings"][0]["old_name"], "[Grp] Show - 01.mkv");
    assert_eq!(json["file_mappings"][0]["new_name"], "Show S01E01.mkv");
    assert_eq!(
        json["file_mappings"][0]["new_path"],
        "/tv/Show (2020)/Season 01/Show S01E01.mkv"
    );
}
