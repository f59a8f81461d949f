
use crate::model::{BaseType, ClassModel, ConcreteType, Parameter};

/// `Shape` with `Circle(double radius)` and `Square(double side = 1.0)`
pub(crate) fn shapes_model() -> ClassModel {
    let mut model = ClassModel::new();
    model.add_base(BaseType::new("Shape").with_source("project/include/shapes/shape.hpp"));
    model
        .add_concrete(
            ConcreteType::new("Circle", "Shape")
                .with_source("project/include/shapes/circle.hpp")
                .with_registry_name("circle")
                .with_alias("round")
                .with_constructor(vec![Parameter::new("double", "radius")]),
        )
        .unwrap();
    model
        .add_concrete(
            ConcreteType::new("Square", "Shape")
                .with_source("project/include/shapes/square.hpp")
                .with_constructor(vec![Parameter::new("double", "side").with_default("1.0")]),
        )
        .unwrap();
    model
}

/// `Container<T>` with `ListContainer<T>(int capacity)` and `IntBag : Container<int>`
pub(crate) fn containers_model() -> ClassModel {
    let mut model = ClassModel::new();
    model.add_base(
        BaseType::new("Container")
            .with_generics(["T"])
            .with_source("include/store/container.hpp"),
    );
    model
        .add_concrete(
            ConcreteType::new("ListContainer", "Container")
                .with_generics(["T"])
                .with_base_args(["T"])
                .with_source("include/store/list_container.hpp")
                .with_constructor(vec![Parameter::new("int", "capacity")]),
        )
        .unwrap();
    model
        .add_concrete(
            ConcreteType::new("IntBag", "Container")
                .with_base_args(["int"])
                .with_source("include/store/int_bag.hpp"),
        )
        .unwrap();
    model
}
