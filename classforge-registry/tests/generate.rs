// End-to-end generation from headers on disk

use classforge_registry::{generate, split_base_list, GeneratorConfig, RegistryError};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const SHAPE: &str = r#"
#pragma once
#include <string>

namespace geo {

class Shape {
public:
    virtual ~Shape() = default;
    virtual double area() const = 0;
};

} // namespace geo
"#;

const CIRCLE: &str = r#"
#pragma once
#include "shapes/shape.hpp"

namespace geo {

// @registry_name: circle
// @registry_aliases: round, disc
class Circle : public Shape {
public:
    explicit Circle(double radius) : radius_(radius) {}
    double area() const override { return 3.14159 * radius_ * radius_; }

private:
    double radius_;
};

class Square : public Shape {
public:
    Square(double side = 1.0) : side_(side) {}
    double area() const override { return side_ * side_; }

private:
    double side_;
};

} // namespace geo
"#;

fn write(dir: &Path, relative: &str, contents: &str) -> PathBuf {
    let path = dir.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, contents).unwrap();
    path
}

fn fixture() -> (TempDir, Vec<PathBuf>) {
    let dir = TempDir::new().unwrap();
    let inputs = vec![
        write(dir.path(), "include/shapes/shape.hpp", SHAPE),
        write(dir.path(), "include/shapes/circle.hpp", CIRCLE),
    ];
    (dir, inputs)
}

#[test]
fn test_generate_from_headers() {
    let (_dir, inputs) = fixture();
    let artifact = generate(&split_base_list("Shape"), &inputs, &GeneratorConfig::default()).unwrap();

    assert!(artifact.contains("#include \"shapes/shape.hpp\" // Shape"));
    assert!(artifact.contains("#include \"shapes/circle.hpp\" // Circle"));
    assert!(artifact.contains("#include \"shapes/circle.hpp\" // Square"));
    assert!(artifact.contains("        {\"circle\", \"Circle\"},"));
    assert!(artifact.contains("        {\"disc\", \"Circle\"},"));
    assert!(artifact.contains("inline geo::Shape* create_instance_shape("));
    assert!(artifact.contains("                return new geo::Circle(*reinterpret_cast<double*>(parameter[0]));"));
    assert!(artifact.contains("        return {\"Circle\", \"Square\"};"));
}

#[test]
fn test_generation_is_reproducible() {
    let (_dir, inputs) = fixture();
    let config = GeneratorConfig::default();
    let bases = split_base_list("Shape");

    assert_eq!(
        generate(&bases, &inputs, &config).unwrap(),
        generate(&bases, &inputs, &config).unwrap()
    );
}

#[test]
fn test_missing_base_fails() {
    let (_dir, inputs) = fixture();
    let result = generate(&split_base_list("Shape, Brush"), &inputs, &GeneratorConfig::default());

    assert!(matches!(result, Err(RegistryError::BaseNotFound { name }) if name == "Brush"));
}

#[test]
fn test_missing_input_fails() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope.hpp");
    let result = generate(&split_base_list("Shape"), &[missing], &GeneratorConfig::default());

    assert!(matches!(result, Err(RegistryError::UnreadableInput { .. })));
}

#[test]
fn test_alias_collision_fails() {
    let dir = TempDir::new().unwrap();
    let colliding = format!("{}\n// @registry_aliases: round\nclass Oval : public geo::Shape {{}};\n", CIRCLE);
    let inputs = vec![
        write(dir.path(), "include/shape.hpp", SHAPE),
        write(dir.path(), "include/round.hpp", &colliding),
    ];

    let result = generate(&split_base_list("Shape"), &inputs, &GeneratorConfig::default());
    assert!(matches!(result, Err(RegistryError::NameCollision { .. })));
}

#[test]
fn test_split_base_list() {
    assert_eq!(split_base_list(" Shape, ,Brush ,"), vec!["Shape", "Brush"]);
    assert!(split_base_list("").is_empty());
}
