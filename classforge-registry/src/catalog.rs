//! Constructor catalog
//!
//! Normalizes each concrete type's constructors into overload entries that
//! carry their arity range. A type without declared constructors gets a single
//! zero-parameter entry, so every registered type is constructible.

use crate::model::{Constructor, Hierarchy, Parameter};
use indexmap::IndexMap;

/// One resolvable constructor overload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverloadEntry {
    /// Position among the type's constructors, in declaration order
    pub index: usize,
    pub params: Vec<Parameter>,
    pub required_count: usize,
    pub total_count: usize,
}

impl OverloadEntry {
    pub fn from_constructor(index: usize, constructor: &Constructor) -> Self {
        Self {
            index,
            params: constructor.params.clone(),
            required_count: constructor.required_count(),
            total_count: constructor.total_count(),
        }
    }

    /// Positional bundles never use defaults: the length must be exact
    pub fn admits_positional(&self, len: usize) -> bool {
        len == self.total_count
    }

    /// Named bundles must fit the arity range and supply every required name
    pub fn admits_named<F>(&self, len: usize, has_key: F) -> bool
    where
        F: Fn(&str) -> bool,
    {
        self.admits_size(len)
            && self
                .params
                .iter()
                .filter(|p| p.is_required())
                .all(|p| has_key(&p.name))
    }

    pub fn admits_size(&self, len: usize) -> bool {
        self.required_count <= len && len <= self.total_count
    }

    pub fn has_defaults(&self) -> bool {
        self.required_count < self.total_count
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

/// Concrete type name to its overloads, in discovery order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConstructorCatalog {
    entries: IndexMap<String, Vec<OverloadEntry>>,
}

impl ConstructorCatalog {
    /// Catalog every concrete type of one hierarchy
    pub fn build(hierarchy: &Hierarchy) -> Self {
        let entries = hierarchy
            .concretes
            .iter()
            .map(|concrete| {
                let overloads = if concrete.constructors.is_empty() {
                    vec![OverloadEntry::from_constructor(0, &Constructor::default())]
                } else {
                    concrete
                        .constructors
                        .iter()
                        .enumerate()
                        .map(|(index, ctor)| OverloadEntry::from_constructor(index, ctor))
                        .collect()
                };
                (concrete.name.clone(), overloads)
            })
            .collect();

        Self { entries }
    }

    pub fn overloads(&self, concrete: &str) -> Option<&[OverloadEntry]> {
        self.entries.get(concrete).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[OverloadEntry])> {
        self.entries
            .iter()
            .map(|(name, overloads)| (name.as_str(), overloads.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Catalog one base type's concrete types
pub fn catalog(hierarchy: &Hierarchy) -> ConstructorCatalog {
    ConstructorCatalog::build(hierarchy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BaseType, ConcreteType};

    fn hierarchy() -> Hierarchy {
        let mut hierarchy = Hierarchy::new(BaseType::new("Shape"));
        hierarchy.concretes.push(
            ConcreteType::new("Square", "Shape")
                .with_constructor(vec![Parameter::new("double", "side").with_default("1.0")])
                .with_constructor(vec![
                    Parameter::new("double", "width"),
                    Parameter::new("double", "height"),
                ]),
        );
        hierarchy.concretes.push(ConcreteType::new("Point", "Shape"));
        hierarchy
    }

    #[test]
    fn test_declared_constructors_keep_order_and_ranges() {
        let catalog = ConstructorCatalog::build(&hierarchy());
        let square = catalog.overloads("Square").unwrap();

        assert_eq!(square.len(), 2);
        assert_eq!((square[0].required_count, square[0].total_count), (0, 1));
        assert_eq!((square[1].required_count, square[1].total_count), (2, 2));
        assert_eq!(square[1].index, 1);
    }

    #[test]
    fn test_missing_constructors_are_synthesized() {
        let catalog = ConstructorCatalog::build(&hierarchy());
        let point = catalog.overloads("Point").unwrap();

        assert_eq!(point.len(), 1);
        assert!(point[0].is_empty());
        assert!(point[0].admits_positional(0));
    }

    #[test]
    fn test_named_admission_requires_every_required_name() {
        let catalog = ConstructorCatalog::build(&hierarchy());
        let rect = &catalog.overloads("Square").unwrap()[1];

        assert!(rect.admits_named(2, |key| key == "width" || key == "height"));
        assert!(!rect.admits_named(2, |key| key == "width" || key == "depth"));
        assert!(!rect.admits_named(3, |_| true));
    }

    #[test]
    fn test_catalog_preserves_discovery_order() {
        let catalog = ConstructorCatalog::build(&hierarchy());
        let names: Vec<_> = catalog.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["Square", "Point"]);
    }
}
