use crate::cell::{NamedBundle, ParamCell, ParamTag};
use crate::error::{CastError, RuntimeError};
use crate::factory::Factory;
use crate::value::{Instance, Value};
use classforge_registry::{BaseType, ClassModel, ConcreteType, Parameter, Registry, UNKNOWN_TYPE_NAME};
use pretty_assertions::assert_eq;

fn shapes() -> Registry {
    let mut model = ClassModel::new();
    model.add_base(BaseType::new("Shape"));
    model
        .add_concrete(
            ConcreteType::new("Circle", "Shape")
                .with_registry_name("circle")
                .with_constructor(vec![Parameter::new("double", "radius")]),
        )
        .unwrap();
    model
        .add_concrete(
            ConcreteType::new("Square", "Shape")
                .with_constructor(vec![Parameter::new("double", "side").with_default("1.0")]),
        )
        .unwrap();
    model
        .add_concrete(
            ConcreteType::new("Label", "Shape").with_constructor(vec![
                Parameter::new("const std::string &", "text"),
                Parameter::new("int", "size").with_default("12"),
                Parameter::new("Shape *", "anchor").with_default("nullptr"),
            ]),
        )
        .unwrap();
    Registry::build(model).unwrap()
}

#[test]
fn test_positional_construction() {
    let registry = shapes();
    let factory = Factory::new(&registry);

    let circle = factory
        .create_positional("Shape", "Circle", &[], vec![Value::Float(5.0)])
        .unwrap();
    assert_eq!(circle.concrete, "Circle");
    assert_eq!(circle.get("radius"), Some(&Value::Float(5.0)));
    assert_eq!(factory.type_name(&circle), "Circle");
}

#[test]
fn test_positional_never_applies_defaults() {
    let registry = shapes();
    let factory = Factory::new(&registry);

    assert!(factory.create_positional("Shape", "Square", &[], vec![]).is_none());
    assert!(factory
        .create_positional("Shape", "Circle", &[], vec![Value::Integer(5)])
        .is_none());
    assert!(factory
        .create_positional("Shape", "circle", &[], vec![Value::Float(5.0)])
        .is_none());
}

#[test]
fn test_named_construction_with_defaults() {
    let registry = shapes();
    let factory = Factory::new(&registry);

    let square = factory
        .create_named("Shape", "Square", &[], &NamedBundle::new())
        .unwrap();
    assert_eq!(square.get("side"), Some(&Value::Float(1.0)));

    let label = factory
        .create_named(
            "Shape",
            "Label",
            &[],
            &NamedBundle::new().with("text", ParamCell::string("hi")),
        )
        .unwrap();
    assert_eq!(label.get("text"), Some(&Value::String("hi".to_string())));
    assert_eq!(label.get("size"), Some(&Value::Integer(12)));
    assert_eq!(label.get("anchor"), Some(&Value::Literal("nullptr".to_string())));
}

#[test]
fn test_named_construction_resolves_registry_names() {
    let registry = shapes();
    let factory = Factory::new(&registry);

    let circle = factory
        .create_named(
            "Shape",
            "circle",
            &[],
            &NamedBundle::new().with("radius", ParamCell::integer(2)),
        )
        .unwrap();
    assert_eq!(circle.concrete, "Circle");
    assert_eq!(circle.get("radius"), Some(&Value::Float(2.0)));
}

#[test]
fn test_named_failures_are_absent() {
    let registry = shapes();
    let factory = Factory::new(&registry);

    assert!(factory
        .create_named("Shape", "Circle", &[], &NamedBundle::new())
        .is_none());
    assert!(factory
        .create_named("Shape", "Hexagon", &[], &NamedBundle::new())
        .is_none());

    let too_many = NamedBundle::new()
        .with("side", ParamCell::floating(1.0))
        .with("colour", ParamCell::string("red"));
    assert!(factory.create_named("Shape", "Square", &[], &too_many).is_none());
}

#[test]
fn test_unsupported_and_mismatched_cells() {
    let registry = shapes();
    let factory = Factory::new(&registry);

    let wrong_kind = NamedBundle::new().with("radius", ParamCell::string("5"));
    assert_eq!(
        factory.try_create_named("Shape", "Circle", &[], &wrong_kind),
        Err(RuntimeError::Cast {
            parameter: "radius".to_string(),
            source: CastError::TypeMismatch {
                tag: ParamTag::String,
                expected: "double".to_string(),
            },
        })
    );
}

#[test]
fn test_faulting_constructors_are_absent() {
    let registry = shapes();
    let factory = Factory::new(&registry)
        .with_hook("Circle", |instance: &Instance| match instance.get("radius") {
            Some(Value::Float(r)) if *r < 0.0 => Err("negative radius".to_string()),
            _ => Ok(()),
        })
        .with_hook("Square", |_: &Instance| panic!("square constructor exploded"));

    assert!(factory
        .create_positional("Shape", "Circle", &[], vec![Value::Float(1.0)])
        .is_some());
    assert_eq!(
        factory.try_create_positional("Shape", "Circle", &[], vec![Value::Float(-1.0)]),
        Err(RuntimeError::ConstructorFault {
            concrete: "Circle".to_string(),
            message: "negative radius".to_string(),
        })
    );
    assert!(factory
        .create_named("Shape", "Square", &[], &NamedBundle::new())
        .is_none());
}

#[test]
fn test_type_name_of_foreign_instances() {
    let registry = shapes();
    let factory = Factory::new(&registry);

    assert_eq!(factory.type_name(&Instance::new("Triangle", "Shape")), UNKNOWN_TYPE_NAME);
    assert_eq!(factory.type_name(&Instance::new("Shape", "Shape")), "Shape");
}

#[test]
fn test_type_arguments_must_match_base_arity() {
    let registry = shapes();
    let factory = Factory::new(&registry);

    assert_eq!(
        factory.try_create_positional("Shape", "Circle", &["int"], vec![Value::Float(1.0)]),
        Err(RuntimeError::TypeArgumentArity {
            base: "Shape".to_string(),
            expected: 0,
            found: 1,
        })
    );
}
