//! End-to-end pipeline tests against real files on disk.

use pravasi::{PipelineConfig, PipelineError, run};
use pravasi_model::GbdtConfig;
use std::fs;
use std::path::{Path, PathBuf};

struct Workspace {
    input: PathBuf,
    artifact: PathBuf,
    model: PathBuf,
}

fn workspace(name: &str) -> Workspace {
    let root = std::env::temp_dir().join("pravasi_pipeline_tests").join(name);
    // Fresh directory per test run.
    fs::remove_dir_all(&root).ok();
    let input = root.join("input");
    fs::create_dir_all(&input).unwrap();
    Workspace {
        input,
        artifact: root.join("data").join("migration_master.json"),
        model: root.join("models").join("gbdt_migration_model.json"),
    }
}

fn config_for(ws: &Workspace) -> PipelineConfig {
    PipelineConfig {
        input_glob: format!("{}/*.csv", ws.input.display()),
        source_label: "TEST".to_string(),
        artifact_path: ws.artifact.clone(),
        model_path: ws.model.clone(),
        // Fewer rounds keep the suite fast; determinism does not depend on
        // the round count.
        estimator: GbdtConfig {
            n_rounds: 20,
            ..Default::default()
        },
    }
}

fn write_csv(dir: &Path, name: &str, body: &str) {
    let header = "date,district,pincode,demo_age_5_17,demo_age_17_\n";
    fs::write(dir.join(name), format!("{header}{body}")).unwrap();
}

fn artifact_json(ws: &Workspace) -> serde_json::Value {
    serde_json::from_str(&fs::read_to_string(&ws.artifact).unwrap()).unwrap()
}

#[test]
fn test_patna_single_transition() {
    let ws = workspace("patna");
    write_csv(
        &ws.input,
        "demo.csv",
        "2024-01-01,Patna,800001,10,40\n\
         2024-01-02,Patna,800001,12,38\n\
         2024-01-03,Patna,800002,11,39\n",
    );

    let report = run(&config_for(&ws)).unwrap();
    assert_eq!(report.observations_loaded, 3);
    assert_eq!(report.observations_kept, 3);
    assert_eq!(report.feature_rows, 1);

    let artifact = artifact_json(&ws);
    let historical = artifact["historical"].as_array().unwrap();
    assert_eq!(historical.len(), 1);

    let row = &historical[0];
    assert_eq!(row["district"], "patna");
    assert_eq!(row["month"], "2024-01");
    assert_eq!(row["migration_events"], 1);
    assert_eq!(row["age_5_17"], 33);
    assert_eq!(row["age_17_plus"], 117);
    assert_eq!(row["month_idx"], 0);

    let predictions = artifact["predictions_next_period"].as_array().unwrap();
    assert_eq!(predictions.len(), historical.len());
}

#[test]
fn test_rerun_is_byte_identical() {
    let ws = workspace("determinism");
    write_csv(
        &ws.input,
        "demo.csv",
        "2024-01-01,patna,800001,10,40\n\
         2024-01-15,patna,800002,12,38\n\
         2024-02-01,patna,800002,9,41\n\
         2024-01-01,mumbai,400001,5,20\n\
         2024-02-01,mumbai,400002,6,19\n",
    );
    let config = config_for(&ws);

    run(&config).unwrap();
    let first = fs::read_to_string(&ws.artifact).unwrap();

    run(&config).unwrap();
    let second = fs::read_to_string(&ws.artifact).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_unparseable_dates_are_dropped_not_fatal() {
    let ws = workspace("bad_dates");
    write_csv(
        &ws.input,
        "demo.csv",
        "2024-01-01,patna,800001,10,40\n\
         garbage,patna,800002,12,38\n",
    );

    let report = run(&config_for(&ws)).unwrap();
    assert_eq!(report.observations_loaded, 2);
    assert_eq!(report.observations_kept, 1);
}

#[test]
fn test_missing_column_aborts_without_artifact() {
    let ws = workspace("schema");
    fs::write(
        ws.input.join("demo.csv"),
        "date,district,demo_age_5_17,demo_age_17_\n2024-01-01,patna,10,40\n",
    )
    .unwrap();

    let err = run(&config_for(&ws)).unwrap_err();
    match err {
        PipelineError::Data(pravasi_data::DataError::SchemaMismatch { missing }) => {
            assert_eq!(missing, vec!["pincode".to_string()]);
        }
        other => panic!("expected SchemaMismatch, got {other}"),
    }
    assert!(!ws.artifact.exists());
    assert!(!ws.model.exists());
}

#[test]
fn test_empty_glob_aborts_with_source_not_found() {
    let ws = workspace("no_files");
    let err = run(&config_for(&ws)).unwrap_err();
    assert!(matches!(
        err,
        PipelineError::Data(pravasi_data::DataError::SourceNotFound { .. })
    ));
    assert!(!ws.artifact.exists());
}

#[test]
fn test_all_dates_unparseable_is_insufficient_data() {
    let ws = workspace("all_bad_dates");
    write_csv(&ws.input, "demo.csv", "garbage,patna,800001,10,40\n");

    let err = run(&config_for(&ws)).unwrap_err();
    assert!(matches!(
        err,
        PipelineError::Model(pravasi_model::ModelError::InsufficientData)
    ));
    assert!(!ws.artifact.exists());
    assert!(!ws.model.exists());
}

#[test]
fn test_model_snapshot_is_written_and_loads() {
    let ws = workspace("snapshot");
    write_csv(
        &ws.input,
        "demo.csv",
        "2024-01-01,patna,800001,10,40\n\
         2024-02-01,patna,800002,12,38\n",
    );

    run(&config_for(&ws)).unwrap();
    let model = pravasi_model::GbdtModel::load(&ws.model).unwrap();
    assert_eq!(model.n_features(), 3);
    assert_eq!(model.config().n_rounds, 20);
}
