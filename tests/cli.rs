use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

mod common;

#[test]
fn help_lists_subcommands() {
    let mut cmd = Command::cargo_bin("vistas2yolo").unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("list-labels"))
        .stdout(predicate::str::contains("--parallel"));
}

#[test]
fn missing_config_fails() {
    let temp = tempfile::tempdir().unwrap();
    let mut cmd = Command::cargo_bin("vistas2yolo").unwrap();
    cmd.current_dir(temp.path());
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("config.yaml"));
}

#[test]
fn default_run_converts_splits_and_writes_manifest() {
    let temp = tempfile::tempdir().unwrap();
    let root = temp.path().join("vistas");
    let training = common::split_paths(&root, "training");
    let validation = common::split_paths(&root, "validation");
    common::add_sample(&training, "train_0", common::STREET_SCENE, 200, 100);
    common::add_sample(&validation, "val_0", common::STREET_SCENE, 200, 100);
    common::write_text(&temp.path().join("config.yaml"), &common::config_yaml(&root));

    let mut cmd = Command::cargo_bin("vistas2yolo").unwrap();
    cmd.current_dir(temp.path());
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Generated vistas.yaml config."))
        .stdout(predicate::str::contains("--- DONE ---"));

    assert_eq!(
        fs::read_to_string(common::label_file(&validation, "val_0")).unwrap(),
        common::STREET_SCENE_LABELS
    );
    let manifest = fs::read_to_string(temp.path().join("vistas.yaml")).unwrap();
    assert!(manifest.contains("names:\n  0: road\n  1: car\n"));
}

#[test]
fn parallel_run_with_custom_paths() {
    let temp = tempfile::tempdir().unwrap();
    let root = temp.path().join("vistas");
    for split in ["training", "validation"] {
        let paths = common::split_paths(&root, split);
        for i in 0..4 {
            common::add_sample(&paths, &format!("{split}_{i}"), common::STREET_SCENE, 200, 100);
        }
    }
    let config_path = temp.path().join("conf").join("vistas-config.yaml");
    common::write_text(&config_path, &common::config_yaml(&root));
    let manifest_path = temp.path().join("detect.yaml");

    let mut cmd = Command::cargo_bin("vistas2yolo").unwrap();
    cmd.arg("--config")
        .arg(&config_path)
        .arg("--manifest")
        .arg(&manifest_path)
        .arg("--parallel");
    cmd.assert().success();

    assert!(manifest_path.is_file());
    let training = common::split_paths(&root, "training");
    assert_eq!(fs::read_dir(&training.output_dir).unwrap().count(), 4);
}

#[test]
fn failing_split_exits_non_zero() {
    let temp = tempfile::tempdir().unwrap();
    let root = temp.path().join("vistas");
    let training = common::split_paths(&root, "training");
    common::write_text(
        &training.annotations_dir.join("broken.json"),
        "{\"objects\": [",
    );
    common::write_bmp(&training.images_dir.join("broken.bmp"), 8, 8);
    common::write_text(&temp.path().join("config.yaml"), &common::config_yaml(&root));

    let mut cmd = Command::cargo_bin("vistas2yolo").unwrap();
    cmd.current_dir(temp.path());
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Malformed annotation file"));

    assert!(!temp.path().join("vistas.yaml").exists());
}

#[test]
fn list_labels_prints_catalog_positions() {
    let temp = tempfile::tempdir().unwrap();
    let root = temp.path().join("vistas");
    common::write_text(
        &root.join("config_v2.0.json"),
        r#"{"labels": [
            {"name": "animal--bird", "readable": "Bird", "color": [165, 42, 42]},
            {"name": "construction--flat--road", "readable": "Road", "color": [128, 64, 128]}
        ]}"#,
    );
    common::write_text(&temp.path().join("config.yaml"), &common::config_yaml(&root));

    let mut cmd = Command::cargo_bin("vistas2yolo").unwrap();
    cmd.current_dir(temp.path()).arg("list-labels");
    cmd.assert().success().stdout(
        "labels:\n\tanimal--bird: 0\n\tconstruction--flat--road: 1\n",
    );
}

#[test]
fn failure_is_reported_with_logging_disabled() {
    let temp = tempfile::tempdir().unwrap();
    let mut cmd = Command::cargo_bin("vistas2yolo").unwrap();
    cmd.current_dir(temp.path()).env("RUST_LOG", "off");
    cmd.assert()
        .failure()
        .stderr(predicate::str::starts_with("Error: Failed to read config file config.yaml"));
}
