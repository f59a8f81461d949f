// Registry scenarios run end to end: header text in, constructed instances out

use classforge_registry::{GeneratorConfig, ModelExtractor, Registry};
use classforge_runtime::{Factory, NamedBundle, ParamCell, Value};
use pretty_assertions::assert_eq;

const SHAPES: &str = r#"
class Shape {
public:
    virtual ~Shape() = default;
    virtual double area() const = 0;
};

class Circle : public Shape {
public:
    Circle(double radius) : radius_(radius) {}
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
"#;

const CONTAINERS: &str = r#"
template <typename T>
class Container {
public:
    virtual ~Container() = default;
    virtual int size() const = 0;
};

template <typename T>
class ListContainer : public Container<T> {
public:
    ListContainer(int capacity) : capacity_(capacity) {}
    int size() const override { return 0; }
private:
    int capacity_;
};

class IntBag : public Container<int> {
public:
    int size() const override { return 0; }
};
"#;

fn registry(bases: &[&str], path: &str, source: &str) -> Registry {
    let config = GeneratorConfig::default();
    let mut extractor = ModelExtractor::new(bases.iter().copied(), &config);
    extractor.add_source(path, source).unwrap();
    Registry::build(extractor.finish().unwrap()).unwrap()
}

#[test]
fn test_shape_round_trip() {
    let registry = registry(&["Shape"], "include/shapes.hpp", SHAPES);
    let factory = Factory::new(&registry);

    assert_eq!(registry.resolve("shape", "Circle"), "Circle");

    let circle = factory
        .create_positional("Shape", "Circle", &[], vec![Value::Float(5.0)])
        .unwrap();
    assert_eq!(circle.get("radius"), Some(&Value::Float(5.0)));
    assert_eq!(factory.type_name(&circle), "Circle");

    let square = factory
        .create_named("Shape", "Square", &[], &NamedBundle::new())
        .unwrap();
    assert_eq!(square.get("side"), Some(&Value::Float(1.0)));
    assert_eq!(factory.type_name(&square), "Square");

    assert!(factory
        .create_named("Shape", "Circle", &[], &NamedBundle::new())
        .is_none());
    assert_eq!(registry.get_subclasses("Shape"), ["Circle", "Square"]);
}

#[test]
fn test_generic_container_scenario() {
    let registry = registry(&["Container"], "include/containers.hpp", CONTAINERS);
    let factory = Factory::new(&registry);

    let list = factory
        .create_positional("Container", "ListContainer", &["int"], vec![Value::Integer(10)])
        .unwrap();
    assert_eq!(list.instantiation, "ListContainer<int>");
    assert_eq!(list.handle_type(), "Container<int>");
    assert_eq!(list.get("capacity"), Some(&Value::Integer(10)));

    let bag = factory
        .create_positional("Container", "IntBag", &["int"], vec![])
        .unwrap();
    assert_eq!(bag.instantiation, "IntBag");

    // IntBag only derives from Container<int>
    assert!(factory
        .create_positional("Container", "IntBag", &["double"], vec![])
        .is_none());
    assert!(factory
        .create_positional("Container", "ListContainer", &[], vec![Value::Integer(10)])
        .is_none());

    let named = factory
        .create_named(
            "Container",
            "ListContainer",
            &["double"],
            &NamedBundle::new().with("capacity", ParamCell::floating(4.7)),
        )
        .unwrap();
    assert_eq!(named.instantiation, "ListContainer<double>");
    assert_eq!(named.get("capacity"), Some(&Value::Integer(4)));
}
