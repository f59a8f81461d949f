use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn fixture(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

#[test]
fn test_generates_to_stdout() {
    let shapes = fixture("shapes.hpp");

    cargo_bin_cmd!("classforge")
        .args(["-", "Shape", shapes.as_str(), "--include-root", "fixtures/"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("#pragma once"))
        .stdout(predicate::str::contains("#include \"shapes.hpp\" // Shape"))
        .stdout(predicate::str::contains("{\"round\", \"Circle\"},"))
        .stdout(predicate::str::contains("inline geo::Shape* create_instance_shape("));
}

#[test]
fn test_generates_multiple_bases_to_file() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("registry.hpp");

    cargo_bin_cmd!("classforge")
        .arg(&output)
        .arg("Shape, Container")
        .arg(fixture("shapes.hpp"))
        .arg(fixture("containers.hpp"))
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let artifact = fs::read_to_string(&output).unwrap();
    assert!(artifact.contains("inline std::string resolve_shape_class_name("));
    assert!(artifact.contains("inline std::string resolve_storage_class_name("));
    assert!(artifact.contains("template<typename T>\nContainer<T>* create_instance_container("));
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn test_config_file_is_applied() {
    let shapes = fixture("shapes.hpp");
    let config = fixture("registry.toml");

    cargo_bin_cmd!("classforge")
        .args(["-", "Shape", shapes.as_str(), "--config", config.as_str()])
        .assert()
        .success()
        .stdout(predicate::str::contains("// Generated by classforge"))
        .stdout(predicate::str::contains("#include \"shapes.hpp\" // Circle"));
}

#[test]
fn test_missing_arguments_are_a_usage_error() {
    cargo_bin_cmd!("classforge")
        .args(["out.hpp", "Shape"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_empty_base_list_is_a_usage_error() {
    let shapes = fixture("shapes.hpp");

    cargo_bin_cmd!("classforge")
        .args(["-", " , ", shapes.as_str()])
        .assert()
        .failure()
        .code(2);
}

#[test]
fn test_unknown_base_fails_without_output() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("registry.hpp");

    cargo_bin_cmd!("classforge")
        .env("NO_COLOR", "1")
        .arg(&output)
        .arg("Brush")
        .arg(fixture("shapes.hpp"))
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Brush"));

    assert!(!output.exists());
}
